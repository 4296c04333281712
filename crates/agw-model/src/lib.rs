pub mod error_response;

pub use error_response::{ErrorReply, ErrorResponse, HttpError};
