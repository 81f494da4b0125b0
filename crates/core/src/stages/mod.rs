//! Stage definitions and prompt templating.
//!
//! A [`Stage`] is pure data plus a deterministic templating function: given
//! a topic and the outputs of its declared dependencies it produces a
//! fully-resolved prompt ready for execution by the external collaborator.
//! It never invokes a model itself.
//!
//! [`investigation_stages`] builds the fixed four-stage chain
//! research -> technical-analysis -> architecture -> documentation, where
//! stage *i* depends on all stages *1..i-1*. Depth changes prompt guidance
//! text only, never the chain.

use std::collections::HashMap;

use inq_protocol::{Depth, StageOutput, StageSpec};
use rust_embed::RustEmbed;
use thiserror::Error;

mod catalog;

pub use catalog::investigation_stages;

/// Prompt template markdown files embedded into the binary.
#[derive(RustEmbed)]
#[folder = "prompts"]
struct PromptAssets;

/// Errors produced while building or rendering a stage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    /// A declared dependency's output was not available when the prompt
    /// was rendered. Must never occur when the runner enforces dependency
    /// ordering correctly.
    #[error("Stage '{stage}' requires output of '{dependency}' which is not available yet")]
    MissingDependencyOutput { stage: String, dependency: String },

    /// The embedded prompt template for a stage could not be loaded.
    #[error("No prompt template embedded for stage '{name}'")]
    MissingTemplate { name: String },
}

/// One unit of work in the pipeline.
///
/// Constructed once per run invocation, immutable after construction, and
/// discarded at run end. Only stage outputs outlive the run.
#[derive(Debug, Clone)]
pub struct Stage {
    /// Static description: name, role, output contract, dependencies.
    pub spec: StageSpec,
    template: String,
}

impl Stage {
    /// Build a stage from its spec and an already-resolved template body.
    pub(crate) fn new(spec: StageSpec, template: String) -> Self {
        Self { spec, template }
    }

    /// Load the embedded prompt template for `name` and substitute the
    /// depth guidance into it.
    pub(crate) fn from_embedded(spec: StageSpec, depth: Depth) -> Result<Self, StageError> {
        let asset_name = format!("{}.md", spec.name);
        let asset = PromptAssets::get(&asset_name).ok_or_else(|| StageError::MissingTemplate {
            name: spec.name.clone(),
        })?;

        let raw = String::from_utf8_lossy(&asset.data);
        let template = raw.replace("{{depth_guidance}}", depth_guidance(depth));

        Ok(Self::new(spec, template))
    }

    /// Resolve the prompt for this stage.
    ///
    /// Substitutes the topic into the template, then appends the output of
    /// every declared dependency in order.
    ///
    /// # Errors
    ///
    /// `StageError::MissingDependencyOutput` if any declared dependency
    /// has not produced a [`StageOutput`] yet.
    pub fn render_prompt(
        &self,
        topic: &str,
        upstream: &HashMap<String, StageOutput>,
    ) -> Result<String, StageError> {
        let mut prompt = self.template.replace("{{topic}}", topic);

        if !self.spec.dependencies.is_empty() {
            prompt.push_str("\n\n# Context from earlier stages\n");
            for dependency in &self.spec.dependencies {
                let output = upstream.get(dependency).ok_or_else(|| {
                    StageError::MissingDependencyOutput {
                        stage: self.spec.name.clone(),
                        dependency: dependency.clone(),
                    }
                })?;
                prompt.push_str(&format!(
                    "\n## Output of {}\n\n{}\n",
                    dependency, output.text
                ));
            }
        }

        Ok(prompt)
    }
}

/// Guidance sentence interpolated into every template for a given depth.
fn depth_guidance(depth: Depth) -> &'static str {
    match depth {
        Depth::Quick => {
            "Keep the investigation brief: cover only the headline findings and skip \
             exhaustive source lists."
        }
        Depth::Standard => {
            "Provide balanced coverage: the key findings with representative sources."
        }
        Depth::Comprehensive => {
            "Be exhaustive: cover every relevant angle and cite all sources with URLs."
        }
    }
}
