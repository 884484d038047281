#[derive(Debug)]
pub struct RecipientEmail(String);

impl RecipientEmail {
    /// Accepts any address carrying an `@`; the wizard checks nothing more
    /// before handing recipients on.
    pub fn parse(s: String) -> Result<RecipientEmail, String> {
        if s.contains('@') {
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid recipient email.", s))
        }
    }
}

impl AsRef<str> for RecipientEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
