//! Tool Catalog
//!
//! Static catalog of the tools the AI may call during an interview. The
//! [`ToolName`] enum is the single source of truth: the advertised
//! [`ToolDefinition`] list is derived from it, and the dispatcher's
//! [`ToolHandlers`](super::dispatcher::ToolHandlers) trait matches on it
//! exhaustively, so adding a variant without a handler fails to build.
//!
//! # Adding a tool
//!
//! 1. Add a variant to [`ToolName`] and list it in [`ToolName::ALL`].
//! 2. Fill in its name, description and parameters below.
//! 3. Add the handler method to `ToolHandlers`.

use serde::Serialize;
use std::collections::BTreeMap;

/// Every tool the AI can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolName {
    SaveInterviewFeedback,
}

/// JSON type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
}

/// One entry of a tool's parameter schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParameterType,
    pub description: &'static str,
    pub required: bool,
}

const SAVE_INTERVIEW_FEEDBACK_PARAMS: &[ParameterSpec] = &[
    ParameterSpec {
        name: "strengths",
        kind: ParameterType::String,
        description: "Candidate's strengths during the interview",
        required: true,
    },
    ParameterSpec {
        name: "weaknesses",
        kind: ParameterType::String,
        description: "Areas for improvement for the candidate",
        required: true,
    },
    ParameterSpec {
        name: "overallRating",
        kind: ParameterType::String,
        description: "Overall rating of the interview (e.g., Excellent, Good, Average, Poor)",
        required: true,
    },
    ParameterSpec {
        name: "recommendations",
        kind: ParameterType::String,
        description: "Specific recommendations for improvement",
        required: true,
    },
];

impl ToolName {
    /// All catalog entries, in advertisement order.
    pub const ALL: &'static [ToolName] = &[ToolName::SaveInterviewFeedback];

    /// Name the provider uses when calling the tool.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SaveInterviewFeedback => "saveInterviewFeedback",
        }
    }

    /// Look up a catalog entry by its wire name (exact match).
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tool| tool.as_str() == name)
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::SaveInterviewFeedback => "Saves interview feedback for the candidate",
        }
    }

    pub const fn parameters(&self) -> &'static [ParameterSpec] {
        match self {
            Self::SaveInterviewFeedback => SAVE_INTERVIEW_FEEDBACK_PARAMS,
        }
    }

    /// Build the advertised definition for this tool.
    pub fn definition(&self) -> ToolDefinition {
        let params = self.parameters();
        let properties = params
            .iter()
            .map(|p| {
                (
                    p.name.to_string(),
                    PropertySchema {
                        kind: p.kind,
                        description: p.description.to_string(),
                    },
                )
            })
            .collect();
        let required = params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.to_string())
            .collect();

        ToolDefinition {
            tool_type: "function",
            name: self.as_str().to_string(),
            description: self.description().to_string(),
            parameters: ParameterSchema {
                schema_type: "object",
                properties,
                required,
            },
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tool definition in the provider's function-tool shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDefinition {
    /// Tool type (always "function")
    #[serde(rename = "type")]
    pub tool_type: &'static str,
    pub name: String,
    pub description: String,
    pub parameters: ParameterSchema,
}

/// JSON schema object describing a tool's arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSchema {
    #[serde(rename = "type")]
    pub schema_type: &'static str,
    pub properties: BTreeMap<String, PropertySchema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub kind: ParameterType,
    pub description: String,
}

/// Produce the full, ordered list of tool definitions.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    ToolName::ALL.iter().map(ToolName::definition).collect()
}
