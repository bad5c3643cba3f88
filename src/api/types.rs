//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request to run the research agent.
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchRequest {
    /// The research question or topic to investigate
    pub query: String,
}

/// Request to format content into a summary with references.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatRequest {
    /// The content to format
    pub prompt: String,
}

/// Formatted content: a summary plus its references.
///
/// Field names are capitalized on the wire; that is the published contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Format {
    #[serde(rename = "Summary")]
    pub summary: String,

    #[serde(rename = "Reference")]
    pub reference: Vec<String>,
}

/// Error payload for failed requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable failure description
    pub detail: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
