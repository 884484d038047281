use serde::{Deserialize, Serialize};

use super::{DirectoryUser, SignatureReason};

/// The single JSON document held by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    #[serde(default)]
    pub users: Vec<DirectoryUser>,
    #[serde(default)]
    pub signature_reasons: Vec<String>,
    #[serde(default)]
    pub other_reasons: Vec<String>,
}

impl AppData {
    pub fn contains_reason(&self, reason: &str) -> bool {
        self.signature_reasons.iter().any(|r| r == reason)
            || self.other_reasons.iter().any(|r| r == reason)
    }

    /// Appends `reason` to one of the two catalogs unless either already
    /// holds it. Returns whether the document changed.
    pub fn add_reason(&mut self, reason: &SignatureReason, to_signature_reasons: bool) -> bool {
        let reason = reason.as_ref();
        if self.contains_reason(reason) {
            return false;
        }
        let catalog = if to_signature_reasons {
            &mut self.signature_reasons
        } else {
            &mut self.other_reasons
        };
        catalog.push(reason.to_string());
        true
    }

    /// Drops `reason` from the other-reasons catalog. Returns whether the
    /// document changed.
    pub fn remove_other_reason(&mut self, reason: &str) -> bool {
        let before = self.other_reasons.len();
        self.other_reasons.retain(|r| r != reason);
        before != self.other_reasons.len()
    }
}
