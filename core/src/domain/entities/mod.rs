//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{Claims, IssuedToken, RefreshTokenRecord, TokenType};
pub use user::{UserAccount, VerificationState};
