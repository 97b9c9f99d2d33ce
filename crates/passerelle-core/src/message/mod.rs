//! Request and response lifecycle.

mod request;
mod response;

pub use request::{Request, RequestCore};
pub use response::Response;
