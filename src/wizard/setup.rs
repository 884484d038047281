use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{
    configuration::WizardSettings,
    domain::{AppData, DirectoryUser},
    store_client::{StoreClient, StoreClientError},
};

use super::{
    reason_catalog::{ReasonCatalog, ReasonSource},
    recipient_list::{
        Direction, InvalidEmail, Recipient, RecipientId, RecipientList, RecipientPatch,
    },
    row::{RecipientRow, RowWidgets},
    toast::{Toast, ToastSlot},
};

/// What the wizard hands to the next step once submission succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub recipients: Vec<Recipient>,
    pub sign_in_order: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("{} recipient email(s) lack an @", .0.len())]
    InvalidEmails(Vec<InvalidEmail>),
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteReasonError {
    #[error("\"{0}\" is a canonical reason and cannot be deleted")]
    NotDeletable(String),
    #[error("the store refused to delete the reason, {0}")]
    Store(#[from] StoreClientError),
}

/// Owner of all wizard state: the recipients, the reference data loaded
/// from the store, per-row widget state and the toast.
pub struct SignatureSetup {
    settings: WizardSettings,
    recipients: RecipientList,
    directory: Vec<DirectoryUser>,
    catalog: ReasonCatalog,
    rows: HashMap<RecipientId, RowWidgets>,
    toast: ToastSlot,
    sign_in_order: bool,
}

impl SignatureSetup {
    pub fn new(data: AppData, settings: WizardSettings) -> Self {
        let catalog = ReasonCatalog::from_data(&data);
        let toast = ToastSlot::new(settings.toast_duration());
        Self {
            settings,
            recipients: RecipientList::new(),
            directory: data.users,
            catalog,
            rows: HashMap::new(),
            toast,
            sign_in_order: false,
        }
    }

    /// Falls back to an empty directory and catalog when the store cannot
    /// be reached.
    #[tracing::instrument(name = "Loading the recipient wizard", skip(client, settings))]
    pub async fn load(client: &StoreClient, settings: WizardSettings) -> Self {
        let data = match client.fetch_data().await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(
                    error.message = %e,
                    "couldn't load directory and reasons, starting empty"
                );
                AppData::default()
            }
        };
        Self::new(data, settings)
    }

    pub fn recipients(&self) -> &[Recipient] {
        self.recipients.as_slice()
    }

    pub fn directory(&self) -> &[DirectoryUser] {
        &self.directory
    }

    pub fn catalog(&self) -> &ReasonCatalog {
        &self.catalog
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.current()
    }

    pub fn close_toast(&mut self) {
        self.toast.close();
    }

    /// Drives the toast timer.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        self.toast.tick(now)
    }

    pub fn sign_in_order(&self) -> bool {
        self.sign_in_order
    }

    pub fn set_sign_in_order(&mut self, sign_in_order: bool) {
        self.sign_in_order = sign_in_order;
    }

    pub fn add_recipient(&mut self) -> RecipientId {
        self.recipients.add()
    }

    pub fn update_recipient(&mut self, id: RecipientId, patch: RecipientPatch) -> bool {
        self.recipients.update(id, patch)
    }

    pub fn can_delete_recipient(&self) -> bool {
        self.recipients.can_delete()
    }

    pub fn delete_recipient(&mut self, id: RecipientId) -> bool {
        let deleted = self.recipients.delete(id);
        if deleted {
            self.rows.remove(&id);
        }
        deleted
    }

    pub fn move_recipient(&mut self, id: RecipientId, direction: Direction) -> bool {
        self.recipients.move_recipient(id, direction)
    }

    /// Applies the end of a drag: the row at `from` is dropped at `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        self.recipients.reorder(from, to)
    }

    pub fn row(&mut self, id: RecipientId) -> Option<RecipientRow<'_>> {
        self.recipients.get(id)?;
        Some(RecipientRow {
            id,
            widgets: self.rows.entry(id).or_default(),
            recipients: &mut self.recipients,
            directory: &self.directory,
            catalog: &mut self.catalog,
            custom_reason_max_length: self.settings.custom_reason_max_length,
        })
    }

    /// Validates emails, flushes reasons invented during the session and
    /// returns the recipients for the next step.
    #[tracing::instrument(
        name = "Submitting recipients",
        skip(self, client),
        fields(
            recipients = self.recipients.len(),
            pending_reasons = self.catalog.pending().len()
        )
    )]
    pub async fn submit(&mut self, client: &StoreClient) -> Result<Submission, SubmitError> {
        let mut persisted = 0;
        if self.settings.persist_reasons_before_validation {
            persisted = self.flush_pending_reasons(client).await;
        }

        let invalid = self.recipients.invalid_emails();
        if !invalid.is_empty() {
            self.toast
                .error("Please enter a valid email address for every recipient");
            return Err(SubmitError::InvalidEmails(invalid));
        }

        if !self.settings.persist_reasons_before_validation {
            persisted = self.flush_pending_reasons(client).await;
        }
        if persisted > 0 {
            self.toast.success(if persisted == 1 {
                "1 new reason saved".to_string()
            } else {
                format!("{} new reasons saved", persisted)
            });
        }

        tracing::info!("recipients ready for the next step");
        Ok(Submission {
            recipients: self.recipients.as_slice().to_vec(),
            sign_in_order: self.sign_in_order,
        })
    }

    /// Posts every pending reason, one at a time. A failure is logged and
    /// the reason stays pending; the remaining ones are still sent.
    async fn flush_pending_reasons(&mut self, client: &StoreClient) -> usize {
        let to_signature_reasons = self.settings.add_reasons_to_signature_catalog;
        let pending = self.catalog.pending().to_vec();
        let mut persisted = 0;
        for reason in pending {
            match client.add_reason(&reason, Some(to_signature_reasons)).await {
                Ok(()) => {
                    self.catalog.mark_persisted(&reason, to_signature_reasons);
                    persisted += 1;
                }
                Err(e) => {
                    tracing::error!(
                        error.cause_chain = ?e,
                        error.message = %e,
                        %reason,
                        "failed to persist a new reason"
                    );
                }
            }
        }
        persisted
    }

    /// Removes a contributed reason. Reasons never sent to the store are
    /// dropped locally. Returns false when the reason is unknown.
    #[tracing::instrument(name = "Deleting an other reason", skip(self, client))]
    pub async fn delete_other_reason(
        &mut self,
        client: &StoreClient,
        reason: &str,
    ) -> Result<bool, DeleteReasonError> {
        match self.catalog.source_of(reason) {
            None => return Ok(false),
            Some(ReasonSource::Signature) => {
                return Err(DeleteReasonError::NotDeletable(reason.to_string()));
            }
            Some(ReasonSource::Pending) => return Ok(self.catalog.remove(reason)),
            Some(ReasonSource::Other) => {}
        }

        if !self.settings.confirm_reason_deletion {
            self.catalog.remove(reason);
        }
        match client.delete_reason(reason).await {
            Ok(()) => {
                self.catalog.remove(reason);
                Ok(true)
            }
            Err(e) => {
                tracing::error!(error.message = %e, "failed to delete a reason");
                self.toast.error(format!("Failed to delete \"{}\"", reason));
                Err(e.into())
            }
        }
    }
}
