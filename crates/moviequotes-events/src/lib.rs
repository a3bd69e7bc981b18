#![forbid(unsafe_code)]
#![warn(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]
//! UI notification bus for the Movie Quotes client.
//!
//! Controllers publish typed notifications ("comment added", "movie added",
//! ...) after a mutation is confirmed by the server; views subscribe and
//! react. Internally the bus uses `tokio::broadcast` with a bounded replay
//! ring so a late subscriber can catch up from a known event id.

pub mod payloads;
pub mod routing;

pub use payloads::{DEFAULT_REPLAY_CAPACITY, EventEnvelope, EventId, UiEvent};
pub use routing::{EventBus, EventStream};
