//! Chat-completion client and chord actions for selchord.
//!
//! This crate provides the HTTP client for an OpenAI-compatible
//! chat-completion API, the actions built on it (translation, search query
//! generation, question drafting), ticket summaries, and the observability
//! plumbing (OTLP tracing, Prometheus metrics) shared by the binary.

pub mod actions;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
pub mod ticket;
pub mod tracing;

pub use actions::{ActionError, ActionResult, Assistant, Dialog, TicketQuery, Variation};
pub use client::ChatClient;
pub use client::builder::ChatClientBuilder;
pub use error::{ClientError, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use ticket::TicketInfo;
