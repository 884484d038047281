use unicode_segmentation::UnicodeSegmentation;

use crate::domain::DirectoryUser;

use super::{
    reason_catalog::{ReasonCatalog, ReasonError, ReasonOption},
    recipient_list::{Recipient, RecipientId, RecipientList, RecipientPatch},
    typeahead::{OptionOrder, Typeahead, TypeaheadOption},
};

impl TypeaheadOption for DirectoryUser {
    fn label(&self) -> &str {
        &self.name
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKey {
    Up,
    Down,
    Enter,
    Escape,
}

/// Interaction state of one recipient row.
#[derive(Debug, Clone)]
pub struct RowWidgets {
    user_picker: Typeahead<DirectoryUser>,
    reason_picker: Typeahead<ReasonOption>,
    /// Text of the free-form reason while "Other" is being filled in.
    custom_reason: Option<String>,
}

impl Default for RowWidgets {
    fn default() -> Self {
        Self {
            user_picker: Typeahead::new(OptionOrder::Alphabetical).with_exact_match_on_enter(),
            reason_picker: Typeahead::new(OptionOrder::Insertion),
            custom_reason: None,
        }
    }
}

/// A row's widgets together with the shared state they act on.
///
/// Handed out by [`SignatureSetup::row`](super::SignatureSetup::row) for the
/// duration of one event.
pub struct RecipientRow<'a> {
    pub(super) id: RecipientId,
    pub(super) widgets: &'a mut RowWidgets,
    pub(super) recipients: &'a mut RecipientList,
    pub(super) directory: &'a [DirectoryUser],
    pub(super) catalog: &'a mut ReasonCatalog,
    pub(super) custom_reason_max_length: Option<usize>,
}

impl RecipientRow<'_> {
    pub fn id(&self) -> RecipientId {
        self.id
    }

    pub fn recipient(&self) -> Option<&Recipient> {
        self.recipients.get(self.id)
    }

    pub fn user_picker(&self) -> &Typeahead<DirectoryUser> {
        &self.widgets.user_picker
    }

    pub fn reason_picker(&self) -> &Typeahead<ReasonOption> {
        &self.widgets.reason_picker
    }

    pub fn user_options(&self) -> Vec<&DirectoryUser> {
        self.widgets.user_picker.visible(self.directory)
    }

    pub fn reason_options(&self) -> Vec<ReasonOption> {
        let source = self.catalog.options();
        self.widgets
            .reason_picker
            .visible(&source)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn focus_user_input(&mut self) {
        self.widgets.user_picker.open();
    }

    /// The name field doubles as the user search box: whatever is typed is
    /// also kept as the recipient's name.
    pub fn type_user_name(&mut self, text: &str) {
        self.widgets.user_picker.set_search(text);
        self.recipients.update(self.id, RecipientPatch::name(text));
    }

    pub fn user_key(&mut self, key: NavigationKey) -> bool {
        let directory = self.directory;
        let picker = &mut self.widgets.user_picker;
        match key {
            NavigationKey::Down => picker.highlight_next(directory),
            NavigationKey::Up => picker.highlight_previous(directory),
            NavigationKey::Escape => picker.close(),
            NavigationKey::Enter => {
                let (id, recipients) = (self.id, &mut *self.recipients);
                return picker.enter(directory, |user| commit_user(recipients, id, user));
            }
        }
        false
    }

    /// Commits the user at `index` of [`Self::user_options`].
    pub fn select_user(&mut self, index: usize) -> bool {
        let directory = self.directory;
        let Some(user) = self.widgets.user_picker.visible(directory).get(index).copied() else {
            return false;
        };
        let (id, recipients) = (self.id, &mut *self.recipients);
        self.widgets
            .user_picker
            .select(user, |user| commit_user(recipients, id, user));
        true
    }

    pub fn set_email(&mut self, email: &str) {
        self.recipients.update(self.id, RecipientPatch::email(email));
    }

    pub fn toggle_reason_picker(&mut self) {
        self.widgets.reason_picker.toggle();
    }

    pub fn type_reason_search(&mut self, text: &str) {
        self.widgets.reason_picker.set_search(text);
    }

    pub fn reason_key(&mut self, key: NavigationKey) -> bool {
        let source = self.catalog.options();
        let RowWidgets {
            reason_picker,
            custom_reason,
            ..
        } = &mut *self.widgets;
        match key {
            NavigationKey::Down => reason_picker.highlight_next(&source),
            NavigationKey::Up => reason_picker.highlight_previous(&source),
            NavigationKey::Escape => reason_picker.close(),
            NavigationKey::Enter => {
                let (id, recipients) = (self.id, &mut *self.recipients);
                return reason_picker.enter(&source, |option| {
                    commit_reason(recipients, custom_reason, id, option)
                });
            }
        }
        false
    }

    /// Commits the option at `index` of [`Self::reason_options`]. Picking
    /// [`ReasonOption::Other`] starts free-text entry instead.
    pub fn select_reason(&mut self, index: usize) -> bool {
        let source = self.catalog.options();
        let RowWidgets {
            reason_picker,
            custom_reason,
            ..
        } = &mut *self.widgets;
        let Some(option) = reason_picker.visible(&source).get(index).copied() else {
            return false;
        };
        let (id, recipients) = (self.id, &mut *self.recipients);
        reason_picker.select(option, |option| {
            commit_reason(recipients, custom_reason, id, option)
        });
        true
    }

    pub fn is_entering_custom_reason(&self) -> bool {
        self.widgets.custom_reason.is_some()
    }

    pub fn custom_reason(&self) -> Option<&str> {
        self.widgets.custom_reason.as_deref()
    }

    /// Replaces the pending free-text reason, cut to the configured length.
    pub fn type_custom_reason(&mut self, text: &str) {
        let Some(pending) = self.widgets.custom_reason.as_mut() else {
            return;
        };
        *pending = match self.custom_reason_max_length {
            Some(max) => text.graphemes(true).take(max).collect(),
            None => text.to_string(),
        };
    }

    pub fn custom_reason_key(&mut self, key: NavigationKey) -> Result<bool, ReasonError> {
        match key {
            NavigationKey::Enter => self.commit_custom_reason(),
            NavigationKey::Escape => {
                self.widgets.custom_reason = None;
                Ok(false)
            }
            NavigationKey::Up | NavigationKey::Down => Ok(false),
        }
    }

    /// Makes the pending text the recipient's reason and offers it to every
    /// row. Blank or invalid text is refused and editing continues.
    pub fn commit_custom_reason(&mut self) -> Result<bool, ReasonError> {
        let Some(pending) = self.widgets.custom_reason.as_deref() else {
            return Ok(false);
        };
        let (reason, added) = self.catalog.add_custom(pending)?;
        if added {
            tracing::debug!(%reason, "new reason kept for the next submission");
        }
        self.recipients.update(self.id, RecipientPatch::reason(reason));
        self.widgets.custom_reason = None;
        Ok(true)
    }

    /// Leaving the free-text field commits non-blank text and discards the
    /// rest.
    pub fn blur_custom_reason(&mut self) -> Result<bool, ReasonError> {
        let outcome = self.commit_custom_reason();
        self.widgets.custom_reason = None;
        match outcome {
            Err(ReasonError::Empty) => Ok(false),
            other => other,
        }
    }

    /// A click landing outside the row's inputs and dropdowns.
    pub fn click_outside(&mut self) {
        self.widgets.user_picker.close();
        self.widgets.reason_picker.close();
        if let Err(e) = self.blur_custom_reason() {
            tracing::debug!(error.message = %e, "discarded the custom reason");
        }
    }
}

fn commit_user(recipients: &mut RecipientList, id: RecipientId, user: &DirectoryUser) {
    let patch = RecipientPatch {
        name: Some(user.name.clone()),
        email: Some(user.email.clone()),
        reason: None,
    };
    recipients.update(id, patch);
}

fn commit_reason(
    recipients: &mut RecipientList,
    custom_reason: &mut Option<String>,
    id: RecipientId,
    option: &ReasonOption,
) {
    match option {
        ReasonOption::Reason { text, .. } => {
            recipients.update(id, RecipientPatch::reason(text.clone()));
        }
        ReasonOption::Other => *custom_reason = Some(String::new()),
    }
}
