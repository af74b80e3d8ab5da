mod client;
mod error;
pub mod gemini;
mod transport;

pub use client::{mask_api_key, RetryPolicy, RetryingClient, StatusReporter};
pub use error::{is_transient_status, ApiError};
pub use transport::{HttpReply, HttpTransport, ReqwestTransport, TransportError};
