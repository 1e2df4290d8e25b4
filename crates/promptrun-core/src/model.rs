//! Dataset record model.

use serde::{Deserialize, Serialize};

/// One query/ground-truth pair used to drive a downstream request.
///
/// A record is only ever constructed from a JSON object carrying at
/// least `query` and `ground_truth` as strings. Fields the schema does
/// not recognize are ignored. An absent `context` stays `None`, which
/// is distinct from an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// The input query or prompt.
    pub query: String,

    /// The expected or correct response for the given query.
    ///
    /// Not used by the loader itself; carried through for downstream
    /// evaluation.
    pub ground_truth: String,

    /// Optional additional context for the query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}
