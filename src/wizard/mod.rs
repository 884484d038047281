//! Headless state of the recipient wizard.
//!
//! A presentation layer renders from [`SignatureSetup`] and feeds user events
//! back into it, either directly (add, delete, reorder, submit) or through
//! the [`RecipientRow`] it hands out for a single row.

mod reason_catalog;
mod recipient_list;
mod row;
mod setup;
mod toast;
pub mod typeahead;

pub use reason_catalog::{OTHER_LABEL, ReasonCatalog, ReasonError, ReasonOption, ReasonSource};
pub use recipient_list::{
    Direction, InvalidEmail, Recipient, RecipientId, RecipientList, RecipientPatch,
};
pub use row::{NavigationKey, RecipientRow, RowWidgets};
pub use setup::{DeleteReasonError, SignatureSetup, Submission, SubmitError};
pub use toast::{Toast, ToastKind, ToastSlot};
