//! Error conversion between the domain and HTTP

pub mod error;

pub use error::{json_error_handler, ApiError};
