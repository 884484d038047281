mod app_data;
mod directory_user;
mod new_reason;
mod recipient_email;
mod signature_reason;

pub use app_data::AppData;
pub use directory_user::DirectoryUser;
pub use new_reason::NewReason;
pub use recipient_email::RecipientEmail;
pub use signature_reason::SignatureReason;
