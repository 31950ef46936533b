//! Outbound email capability used to deliver verification codes
//!
//! The transport is a black box behind `EmailSender`; concrete senders live
//! in the infrastructure crate. `MockEmailSender` records messages in memory.

mod mock;
mod template;
mod traits;

pub use mock::MockEmailSender;
pub use template::VerificationEmailTemplate;
pub use traits::{EmailMessage, EmailSender};
