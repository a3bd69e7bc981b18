//! Framework-agnostic state primitives shared by stores and controllers.

pub mod guard;
pub mod inflight;
pub mod optimistic;
pub mod pagination;
pub mod session;

pub use guard::{NavigationDecision, NavigationGuard, decide};
pub use inflight::{InFlight, RequestToken};
pub use optimistic::{Optimistic, OptimisticConflict, Phase};
pub use pagination::{PageCursor, PageLoad, SkipReason, page_path};
pub use session::{SessionCache, SessionFlag};
