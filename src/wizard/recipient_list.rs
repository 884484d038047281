use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::RecipientEmail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipientId(Uuid);

impl RecipientId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A signer entry. The id is fixed at creation; the other fields are edited
/// in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    id: RecipientId,
    pub name: String,
    pub email: String,
    pub reason: String,
}

impl Recipient {
    fn blank() -> Self {
        Self {
            id: RecipientId::generate(),
            name: String::new(),
            email: String::new(),
            reason: String::new(),
        }
    }

    pub fn id(&self) -> RecipientId {
        self.id
    }

    fn apply(&mut self, patch: RecipientPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(reason) = patch.reason {
            self.reason = reason;
        }
    }
}

/// Fields to overwrite on a recipient; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct RecipientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub reason: Option<String>,
}

impl RecipientPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// A recipient whose email failed validation, by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEmail {
    pub position: usize,
    pub id: RecipientId,
    pub email: String,
}

/// Ordered, never-empty list of recipients.
#[derive(Debug, Clone)]
pub struct RecipientList {
    recipients: Vec<Recipient>,
}

impl Default for RecipientList {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipientList {
    /// Starts with a single blank recipient.
    pub fn new() -> Self {
        Self {
            recipients: vec![Recipient::blank()],
        }
    }

    pub fn as_slice(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    // Never empty, see `delete`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, id: RecipientId) -> Option<&Recipient> {
        self.recipients.iter().find(|r| r.id == id)
    }

    pub fn position(&self, id: RecipientId) -> Option<usize> {
        self.recipients.iter().position(|r| r.id == id)
    }

    pub fn add(&mut self) -> RecipientId {
        let recipient = Recipient::blank();
        let id = recipient.id;
        self.recipients.push(recipient);
        id
    }

    /// Returns false when no recipient has `id`.
    pub fn update(&mut self, id: RecipientId, patch: RecipientPatch) -> bool {
        match self.recipients.iter_mut().find(|r| r.id == id) {
            Some(recipient) => {
                recipient.apply(patch);
                true
            }
            None => false,
        }
    }

    pub fn can_delete(&self) -> bool {
        self.recipients.len() > 1
    }

    /// Refuses to remove the last remaining recipient.
    pub fn delete(&mut self, id: RecipientId) -> bool {
        if !self.can_delete() {
            return false;
        }
        match self.position(id) {
            Some(index) => {
                self.recipients.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn move_recipient(&mut self, id: RecipientId, direction: Direction) -> bool {
        let Some(from) = self.position(id) else {
            return false;
        };
        let to = match direction {
            Direction::Up if from > 0 => from - 1,
            Direction::Down if from + 1 < self.recipients.len() => from + 1,
            _ => return false,
        };
        self.reorder(from, to)
    }

    /// Moves the recipient at `from` so it ends up at `to`, shifting the ones
    /// in between. `to` past the end means the last slot.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.recipients.len() {
            return false;
        }
        let to = to.min(self.recipients.len() - 1);
        if from == to {
            return false;
        }
        let recipient = self.recipients.remove(from);
        self.recipients.insert(to, recipient);
        true
    }

    /// Every non-empty email must parse as a [`RecipientEmail`].
    pub fn invalid_emails(&self) -> Vec<InvalidEmail> {
        self.recipients
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.email.is_empty())
            .filter(|(_, r)| RecipientEmail::parse(r.email.clone()).is_err())
            .map(|(position, r)| InvalidEmail {
                position,
                id: r.id,
                email: r.email.clone(),
            })
            .collect()
    }
}
