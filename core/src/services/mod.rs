//! Business services containing domain logic and use cases.

pub mod auth;
pub mod clock;
pub mod email;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use clock::{Clock, ManualClock, SystemClock};
pub use email::{EmailMessage, EmailSender, MockEmailSender, VerificationEmailTemplate};
pub use token::{TokenService, TokenServiceConfig};
pub use verification::{AttemptThrottle, VerificationService};
