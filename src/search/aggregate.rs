//! Aggregate assembly.
//!
//! Pure merge of per-module outcomes into the ordered aggregate. No I/O, no
//! concurrency; the dispatch order handed in by the coordinator is the module
//! registration order, and it is preserved verbatim regardless of which
//! module finished first.

use tracing::warn;

use super::types::{AggregateResult, ModuleDispatch, ModuleOutcome, ModuleResultGroup};

/// Assemble the aggregate from terminal per-module dispatches.
///
/// Faulted modules (timeout, failure, panic) still contribute a group with a
/// zero count and no items; the fault is logged here, once, as the single
/// observability point for recovered per-module errors.
pub fn assemble(dispatches: Vec<ModuleDispatch>) -> AggregateResult {
    let groups = dispatches
        .into_iter()
        .map(|dispatch| match dispatch.outcome {
            ModuleOutcome::Completed(page) => {
                ModuleResultGroup::from_page(dispatch.module_key, page)
            }
            ModuleOutcome::TimedOut => {
                warn!(module = %dispatch.module_key, "Module search timed out");
                ModuleResultGroup::empty(dispatch.module_key)
            }
            ModuleOutcome::Failed(reason) => {
                warn!(module = %dispatch.module_key, error = %reason, "Module search failed");
                ModuleResultGroup::empty(dispatch.module_key)
            }
        })
        .collect();

    AggregateResult { groups }
}
