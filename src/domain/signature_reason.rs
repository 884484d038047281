use unicode_segmentation::UnicodeSegmentation;

/// A reason-for-signing accepted into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureReason(String);

impl SignatureReason {
    /// Trims the input and rejects it when it is blank, longer than 256
    /// graphemes or carries control characters.
    pub fn parse(s: &str) -> Result<SignatureReason, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("a reason cannot be empty".to_string());
        }
        if trimmed.graphemes(true).count() > 256 {
            return Err(format!("{} is too long to be a reason.", trimmed));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(format!("{:?} contains control characters.", trimmed));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for SignatureReason {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
