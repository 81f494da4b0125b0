//! The fixed investigation stage chain.

use inq_protocol::{Depth, StageSpec};

use super::{Stage, StageError};

/// Build the fixed four-stage chain for one run invocation.
///
/// The chain is hardcoded by design: research -> technical-analysis ->
/// architecture -> documentation, each stage depending on every stage
/// before it (a true linear data dependency). `depth` tunes the prompt
/// guidance only.
pub fn investigation_stages(depth: Depth) -> Result<Vec<Stage>, StageError> {
    let specs = [
        StageSpec {
            name: "research".to_string(),
            role: "MCP Protocol Researcher".to_string(),
            expected_output: RESEARCH_CONTRACT.to_string(),
            dependencies: vec![],
        },
        StageSpec {
            name: "technical-analysis".to_string(),
            role: "Technical Analyst".to_string(),
            expected_output: ANALYSIS_CONTRACT.to_string(),
            dependencies: vec!["research".to_string()],
        },
        StageSpec {
            name: "architecture".to_string(),
            role: "System Architect".to_string(),
            expected_output: ARCHITECTURE_CONTRACT.to_string(),
            dependencies: vec!["research".to_string(), "technical-analysis".to_string()],
        },
        StageSpec {
            name: "documentation".to_string(),
            role: "Technical Writer".to_string(),
            expected_output: DOCUMENTATION_CONTRACT.to_string(),
            dependencies: vec![
                "research".to_string(),
                "technical-analysis".to_string(),
                "architecture".to_string(),
            ],
        },
    ];

    specs
        .into_iter()
        .map(|spec| Stage::from_embedded(spec, depth))
        .collect()
}

// Expected-output contracts are documentation-level only; they are handed
// to the executing collaborator verbatim and never machine-validated.

const RESEARCH_CONTRACT: &str = "\
A research report in markdown with sections for: MCP protocol overview, \
existing MCP tools, common patterns, integration approaches, and resources. \
All sections should include relevant URLs and citations.";

const ANALYSIS_CONTRACT: &str = "\
A technical analysis report in markdown with sections for: code examples \
found, implementation patterns, code quality insights, technical trade-offs, \
and key takeaways. Include code snippets with attribution where helpful.";

const ARCHITECTURE_CONTRACT: &str = "\
An architecture design document in markdown with sections for: executive \
summary, system architecture (with an ASCII diagram), key components, design \
decisions with rationale and alternatives, integration architecture, \
non-functional considerations, implementation roadmap, and risks.";

const DOCUMENTATION_CONTRACT: &str = "\
A comprehensive final report in markdown with sections for: executive \
summary, background, research findings, technical analysis, proposed \
architecture, implementation guide, and recommended next steps.";
