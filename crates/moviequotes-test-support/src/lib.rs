#![forbid(unsafe_code)]
#![warn(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]

//! Shared test helpers used across integration suites.
//! Layout: fixtures.rs (JSON bodies and drafts), mocks.rs (scripted transport and navigator).

pub mod fixtures;
pub mod mocks;

use std::sync::Arc;

use moviequotes_client::{AppContext, ClientConfig};

pub use mocks::{Gate, NavigationRecord, RecordedCall, RecordingNavigator, Reply, ScriptedRemote};

/// Application context wired to a fresh scripted transport.
#[must_use]
pub fn scripted_context() -> (Arc<ScriptedRemote>, AppContext) {
    let remote = Arc::new(ScriptedRemote::new());
    let context = AppContext::with_remote(ClientConfig::default(), remote.clone());
    (remote, context)
}
