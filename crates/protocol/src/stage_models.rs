//! Stage definition models.
//!
//! This module defines the static description of one pipeline stage and the
//! depth levels that tune the thoroughness requested from each stage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Requested thoroughness of an investigation.
///
/// Depth never changes the stage chain itself, only the guidance text that
/// is interpolated into each stage's prompt.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    /// Fast pass: headline findings only.
    Quick,

    /// Balanced coverage of the topic.
    Standard,

    /// Exhaustive treatment with full citations.
    #[default]
    Comprehensive,
}

impl Depth {
    /// All recognized depth levels, in increasing thoroughness.
    pub const ALL: [Depth; 3] = [Depth::Quick, Depth::Standard, Depth::Comprehensive];

    /// The wire name of this depth level.
    pub fn as_str(self) -> &'static str {
        match self {
            Depth::Quick => "quick",
            Depth::Standard => "standard",
            Depth::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a recognized depth level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDepthError(pub String);

impl fmt::Display for ParseDepthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "depth must be 'quick', 'standard', or 'comprehensive', got '{}'",
            self.0
        )
    }
}

impl std::error::Error for ParseDepthError {}

impl FromStr for Depth {
    type Err = ParseDepthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quick" => Ok(Depth::Quick),
            "standard" => Ok(Depth::Standard),
            "comprehensive" => Ok(Depth::Comprehensive),
            other => Err(ParseDepthError(other.to_string())),
        }
    }
}

/// Static description of one pipeline stage.
///
/// A `StageSpec` is constructed once per run invocation, is immutable after
/// construction, and is discarded when the run ends. Only stage outputs
/// survive a run, via the session log and the report sink.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StageSpec {
    /// Unique identifier within a run (e.g., "research").
    pub name: String,

    /// Semantic label shown in logs and prompts (e.g., "Researcher").
    pub role: String,

    /// Textual description of the required output structure.
    ///
    /// This is a documentation-level contract handed to the executing
    /// collaborator; it is never machine-validated.
    pub expected_output: String,

    /// Ordered names of upstream stages whose outputs must be available
    /// before this stage executes.
    pub dependencies: Vec<String>,
}
