//! REST endpoint implementations.

mod chat;
mod request;

pub use chat::chat_completion;
pub use request::send_request_with_retry;
