//! Aggregated Search Module
//!
//! Fans a single free-text query out to every search-capable module,
//! concurrently, and merges the per-module results into one deterministic
//! aggregate ordered by module registration.
//!
//! # Architecture
//!
//! ```text
//! SearchCoordinator
//! ├── one spawned task per search-capable module
//! │       tokio::time::timeout(per-module budget, handler.search(...))
//! │       derived cancel = caller cancel ∪ module deadline
//! ├── caller cancellation aborts all outstanding tasks
//! └── aggregate::assemble (registration order, faults → empty groups)
//! ```

pub mod aggregate;
pub mod cancel;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod types;

// Re-exports for convenient access
pub use cancel::{CancelHandle, CancelSignal};
pub use config::SearchConfig;
pub use coordinator::SearchCoordinator;
pub use error::{ModuleSearchError, SearchError};
pub use types::{AggregateResult, ModuleResultGroup, ResultItem, SearchPage};
