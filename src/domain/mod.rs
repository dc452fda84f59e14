mod email_address;
mod email_message;

pub use email_address::EmailAddress;
pub use email_message::{EmailMessage, Mailbox};
