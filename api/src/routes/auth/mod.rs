//! Authentication route handlers
//!
//! All handlers are generic over the repositories and the email transport so
//! the same routes serve MySQL in production and in-memory stores in tests.

pub mod login;
pub mod logout;
pub mod password;
pub mod password_login;
pub mod refresh;
pub mod register;
pub mod verify_code;

pub use login::login;
pub use logout::logout;
pub use password::set_password;
pub use password_login::password_login;
pub use refresh::refresh;
pub use register::register;
pub use verify_code::verify_code;
