use serde::{Deserialize, Serialize};

/// Body of `POST /reasons`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReason {
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_to_signature_reasons: Option<bool>,
}
