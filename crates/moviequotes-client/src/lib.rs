#![forbid(unsafe_code)]
#![warn(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! State synchronisation core for the Movie Quotes client.
//!
//! Layout:
//! - `remote/`: the request/response seam (`RemoteClient`) and its reqwest implementation
//! - `core/`: optimistic fields, in-flight tokens, pagination cursors, session cache, guard
//! - `stores/`: entity stores (quotes, movies, user) and UI flags
//! - `features/`: mutation controllers (likes, comments, forms, profile, account)
//! - `navigation.rs`: routes, the `Navigator` seam, and the guarded router
//! - `context.rs`: the application context that owns everything above

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod features;
pub mod navigation;
pub mod remote;
pub mod stores;

pub use config::{ClientConfig, ConfigError};
pub use context::AppContext;
pub use error::{ActionError, ActionResult, FieldErrors, RemoteError, RemoteResult};
pub use navigation::{Navigator, Route, RouteAccess, Router};
pub use remote::{Method, RemoteClient, RemoteResponse, RequestBody};
