use crate::domain::{AppData, SignatureReason};

use super::typeahead::TypeaheadOption;

/// Label of the sentinel option that switches to free-text entry.
pub const OTHER_LABEL: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReasonOption {
    Reason {
        text: String,
        /// Only reasons from the other-reasons catalog can be deleted.
        deletable: bool,
    },
    Other,
}

impl TypeaheadOption for ReasonOption {
    fn label(&self) -> &str {
        match self {
            ReasonOption::Reason { text, .. } => text,
            ReasonOption::Other => OTHER_LABEL,
        }
    }

    fn always_listed(&self) -> bool {
        matches!(self, ReasonOption::Other)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ReasonError {
    #[error("a reason cannot be empty")]
    Empty,
    #[error("\"{0}\" is reserved")]
    Reserved(String),
    #[error("{0}")]
    Invalid(String),
}

/// Where a reason was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonSource {
    Signature,
    Other,
    Pending,
}

/// Canonical reasons, previously contributed reasons and reasons invented
/// in this session that the store has not seen yet.
#[derive(Debug, Clone, Default)]
pub struct ReasonCatalog {
    signature_reasons: Vec<String>,
    other_reasons: Vec<String>,
    pending: Vec<String>,
}

impl ReasonCatalog {
    pub fn from_data(data: &AppData) -> Self {
        let mut catalog = Self::default();
        for reason in &data.signature_reasons {
            catalog.insert_durable(reason, true);
        }
        for reason in &data.other_reasons {
            catalog.insert_durable(reason, false);
        }
        catalog
    }

    pub fn signature_reasons(&self) -> &[String] {
        &self.signature_reasons
    }

    pub fn other_reasons(&self) -> &[String] {
        &self.other_reasons
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn source_of(&self, reason: &str) -> Option<ReasonSource> {
        if self.signature_reasons.iter().any(|r| r == reason) {
            Some(ReasonSource::Signature)
        } else if self.other_reasons.iter().any(|r| r == reason) {
            Some(ReasonSource::Other)
        } else if self.pending.iter().any(|r| r == reason) {
            Some(ReasonSource::Pending)
        } else {
            None
        }
    }

    pub fn contains(&self, reason: &str) -> bool {
        self.source_of(reason).is_some()
    }

    /// Reasons in display order followed by the [`ReasonOption::Other`]
    /// sentinel.
    pub fn options(&self) -> Vec<ReasonOption> {
        let signature = self
            .signature_reasons
            .iter()
            .map(|text| ReasonOption::Reason {
                text: text.clone(),
                deletable: false,
            });
        let other = self
            .other_reasons
            .iter()
            .chain(&self.pending)
            .map(|text| ReasonOption::Reason {
                text: text.clone(),
                deletable: true,
            });
        signature
            .chain(other)
            .chain(std::iter::once(ReasonOption::Other))
            .collect()
    }

    /// Records a reason typed by the user. Returns the trimmed reason and
    /// whether it was new; a known reason keeps its original place.
    pub fn add_custom(&mut self, reason: &str) -> Result<(String, bool), ReasonError> {
        let reason = Self::normalize(reason)?;
        if self.contains(&reason) {
            return Ok((reason, false));
        }
        self.pending.push(reason.clone());
        Ok((reason, true))
    }

    /// Moves a pending reason into the catalog it was persisted to.
    pub fn mark_persisted(&mut self, reason: &str, to_signature_reasons: bool) {
        self.pending.retain(|r| r != reason);
        self.insert_durable(reason, to_signature_reasons);
    }

    /// Forgets a reason from the other-reasons or pending sets. Canonical
    /// reasons are never removed.
    pub fn remove(&mut self, reason: &str) -> bool {
        let before = self.other_reasons.len() + self.pending.len();
        self.other_reasons.retain(|r| r != reason);
        self.pending.retain(|r| r != reason);
        before != self.other_reasons.len() + self.pending.len()
    }

    fn insert_durable(&mut self, reason: &str, to_signature_reasons: bool) {
        let Ok(reason) = Self::normalize(reason) else {
            return;
        };
        if self.signature_reasons.contains(&reason) || self.other_reasons.contains(&reason) {
            return;
        }
        if to_signature_reasons {
            self.signature_reasons.push(reason);
        } else {
            self.other_reasons.push(reason);
        }
    }

    fn normalize(reason: &str) -> Result<String, ReasonError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ReasonError::Empty);
        }
        if reason.eq_ignore_ascii_case(OTHER_LABEL) {
            return Err(ReasonError::Reserved(reason.to_string()));
        }
        // Same rules the store applies, so nothing pending is refused later.
        let reason = SignatureReason::parse(reason).map_err(ReasonError::Invalid)?;
        Ok(reason.as_ref().to_string())
    }
}
