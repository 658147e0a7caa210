//! Search coordinator: parallel fan-out across search-capable modules.
//!
//! One logical "search everywhere" request fans out to every module in the
//! frozen searchable index, runs all calls concurrently, isolates slow or
//! failing modules behind a per-module timeout, and merges the outcomes into
//! one deterministic aggregate ordered by registration.
//!
//! # Execution model
//!
//! One task is spawned per search-capable module, wrapped in
//! `tokio::time::timeout`. The coordinator then races joining all tasks
//! against the caller's cancellation; on caller cancel every outstanding task
//! is aborted and awaited before returning, so no spawned work outlives the
//! request boundary. Total wall-clock is bounded by the per-module timeout,
//! not by the sum of per-module latencies.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::registry::{FrozenRegistry, SearchEntry};

use super::aggregate;
use super::cancel::{CancelHandle, CancelSignal};
use super::config::SearchConfig;
use super::error::{validate_query, ModuleSearchError, SearchError, SearchResult};
use super::types::{AggregateResult, ModuleDispatch, ModuleOutcome};

/// Coordinates parallel search execution across registered modules.
pub struct SearchCoordinator {
    /// Search-capable modules in registration order (frozen at startup).
    entries: Arc<[SearchEntry]>,

    /// Per-module bound on concurrent in-flight calls across requests.
    limiters: HashMap<String, Arc<Semaphore>>,

    /// Configuration.
    config: SearchConfig,
}

impl SearchCoordinator {
    /// Create a coordinator over the frozen registry.
    pub fn new(registry: &FrozenRegistry, config: SearchConfig) -> Self {
        let entries = registry.search_entries();
        let limiters = entries
            .iter()
            .map(|entry| {
                (
                    entry.module_key.clone(),
                    Arc::new(Semaphore::new(config.max_inflight_per_module)),
                )
            })
            .collect();

        Self {
            entries,
            limiters,
            config,
        }
    }

    /// Keys of the modules a search call will dispatch to, in output order.
    pub fn searchable_module_keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.module_key.clone()).collect()
    }

    /// Execute one aggregated search.
    ///
    /// Every search-capable module is dispatched exactly once and appears in
    /// the aggregate even when it times out or fails. Group order equals
    /// registration order regardless of completion order.
    ///
    /// # Errors
    ///
    /// [`SearchError::Validation`] for a rejected query and
    /// [`SearchError::Cancelled`] when `cancel` fires before aggregation;
    /// a partial aggregate is never returned.
    pub async fn search(
        &self,
        query: &str,
        cancel: CancelSignal,
    ) -> SearchResult<AggregateResult> {
        validate_query(query, self.config.max_query_length)?;

        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let start = Instant::now();
        info!(
            query = %query,
            modules = self.entries.len(),
            timeout_ms = self.config.module_timeout_ms,
            "Search fan-out starting"
        );

        let mut handles: Vec<(String, JoinHandle<ModuleOutcome>)> = self
            .entries
            .iter()
            .map(|entry| {
                let handle = self.dispatch_module(entry, query, &cancel);
                (entry.module_key.clone(), handle)
            })
            .collect();

        // Race joining the tasks against the caller's cancellation. Joining
        // in dispatch order serializes nothing: every task already runs in
        // parallel and the per-module timeout guarantees each join resolves.
        let cancelled = cancel.cancelled();
        tokio::pin!(cancelled);

        let mut dispatches: Vec<ModuleDispatch> = Vec::with_capacity(handles.len());
        let mut was_cancelled = false;

        while dispatches.len() < handles.len() {
            let idx = dispatches.len();
            let (module_key, join) = &mut handles[idx];

            tokio::select! {
                result = join => {
                    let outcome = match result {
                        Ok(outcome) => outcome,
                        // A panicked handler is a recovered per-module fault.
                        Err(e) => ModuleOutcome::Failed(format!("task panicked: {e}")),
                    };
                    dispatches.push(ModuleDispatch {
                        module_key: module_key.clone(),
                        outcome,
                    });
                }
                _ = &mut cancelled => {
                    was_cancelled = true;
                }
            }

            if was_cancelled {
                // No spawned task may outlive the request boundary.
                Self::abort_all(handles.split_off(idx)).await;
                return Err(SearchError::Cancelled);
            }
        }

        let faults = dispatches.iter().filter(|d| d.outcome.is_fault()).count();
        let aggregate = aggregate::assemble(dispatches);

        info!(
            modules = aggregate.module_count(),
            faults = faults,
            total = aggregate.total_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Search fan-out complete"
        );

        Ok(aggregate)
    }

    /// Spawn one module's search call.
    ///
    /// The handler receives a derived signal that fires on caller cancel or
    /// on the module's own deadline; waiting for an in-flight slot counts
    /// against the deadline.
    fn dispatch_module(
        &self,
        entry: &SearchEntry,
        query: &str,
        cancel: &CancelSignal,
    ) -> JoinHandle<ModuleOutcome> {
        let module_key = entry.module_key.clone();
        let handler = entry.handler.clone();
        let limiter = self
            .limiters
            .get(&entry.module_key)
            .cloned()
            .unwrap_or_else(|| Arc::new(Semaphore::new(1)));
        let query = query.to_string();
        let caller_cancel = cancel.clone();
        let timeout = self.config.module_timeout();

        tokio::spawn(async move {
            let (deadline_handle, deadline_signal) = CancelHandle::new();
            let derived = caller_cancel.merge(&deadline_signal);

            let call = async {
                let _permit = limiter
                    .acquire()
                    .await
                    .map_err(|_| ModuleSearchError::internal("limiter closed"))?;
                handler.search(&query, derived).await
            };

            match tokio::time::timeout(timeout, call).await {
                Ok(Ok(page)) => {
                    debug!(module = %module_key, count = page.total_count, "Module search complete");
                    ModuleOutcome::Completed(page)
                }
                Ok(Err(e)) => ModuleOutcome::Failed(e.to_string()),
                Err(_) => {
                    // Let cooperative sub-work the handler may have spawned
                    // observe the deadline as well.
                    deadline_handle.cancel();
                    ModuleOutcome::TimedOut
                }
            }
        })
    }

    /// Abort every outstanding task and await its termination.
    async fn abort_all(handles: Vec<(String, JoinHandle<ModuleOutcome>)>) {
        for (_, handle) in &handles {
            handle.abort();
        }
        for (module_key, handle) in handles {
            if let Err(e) = handle.await {
                if e.is_cancelled() {
                    debug!(module = %module_key, "Module search aborted by caller cancellation");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::contract::{Module, ModuleDescriptor, ModuleSearch};
    use crate::registry::ModuleRegistry;
    use crate::search::types::{ResultItem, SearchPage};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Scripted behavior for a test module's search handler.
    enum Behavior {
        /// Answer with the given page after the given delay.
        Respond(Duration, SearchPage),
        /// Fail immediately.
        Fail,
        /// Panic immediately.
        Panic,
        /// Sleep until cancelled, then report cancellation.
        HangUntilCancelled,
    }

    struct ScriptedModule {
        descriptor: ModuleDescriptor,
        behavior: Arc<Behavior>,
        queries: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedModule {
        fn new(key: &str, behavior: Behavior) -> Self {
            Self {
                descriptor: ModuleDescriptor::new(key, key, "scripted", "tests", "0.1.0"),
                behavior: Arc::new(behavior),
                queries: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn instant(key: &str, items: Vec<ResultItem>) -> Self {
            Self::new(
                key,
                Behavior::Respond(Duration::ZERO, SearchPage::from_items(items)),
            )
        }
    }

    struct ScriptedSearch {
        behavior: Arc<Behavior>,
        queries: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ModuleSearch for ScriptedSearch {
        async fn search(
            &self,
            query: &str,
            cancel: CancelSignal,
        ) -> Result<SearchPage, ModuleSearchError> {
            self.queries.lock().unwrap().push(query.to_string());

            match &*self.behavior {
                Behavior::Respond(delay, page) => {
                    tokio::time::sleep(*delay).await;
                    Ok(page.clone())
                }
                Behavior::Fail => Err(ModuleSearchError::backend("scripted failure")),
                Behavior::Panic => panic!("scripted panic"),
                Behavior::HangUntilCancelled => {
                    cancel.cancelled().await;
                    Err(ModuleSearchError::Cancelled)
                }
            }
        }
    }

    impl Module for ScriptedModule {
        fn descriptor(&self) -> &ModuleDescriptor {
            &self.descriptor
        }

        fn search(&self) -> Option<Arc<dyn ModuleSearch>> {
            Some(Arc::new(ScriptedSearch {
                behavior: self.behavior.clone(),
                queries: self.queries.clone(),
            }))
        }
    }

    fn coordinator_for(
        modules: Vec<ScriptedModule>,
        config: SearchConfig,
    ) -> (SearchCoordinator, Vec<Arc<Mutex<Vec<String>>>>) {
        let mut registry = ModuleRegistry::new();
        let mut query_logs = Vec::new();

        for module in modules {
            query_logs.push(module.queries.clone());
            registry.register(Arc::new(module)).unwrap();
        }

        let frozen = registry.freeze();
        (SearchCoordinator::new(&frozen, config), query_logs)
    }

    fn two_items() -> Vec<ResultItem> {
        vec![
            ResultItem::new("first", "/finances/1"),
            ResultItem::new("second", "/finances/2"),
        ]
    }

    #[tokio::test]
    async fn test_every_module_receives_exact_query() {
        let (coordinator, logs) = coordinator_for(
            vec![
                ScriptedModule::instant("a", Vec::new()),
                ScriptedModule::instant("b", Vec::new()),
                ScriptedModule::instant("c", Vec::new()),
            ],
            SearchConfig::default(),
        );

        coordinator
            .search("oat milk", CancelSignal::never())
            .await
            .unwrap();

        for log in logs {
            assert_eq!(*log.lock().unwrap(), vec!["oat milk".to_string()]);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_module_times_out_without_extending_latency() {
        // finances answers in 50ms; kitchen would take 5s with a 200ms budget.
        let (coordinator, _) = coordinator_for(
            vec![
                ScriptedModule::new(
                    "finances",
                    Behavior::Respond(
                        Duration::from_millis(50),
                        SearchPage::from_items(two_items()),
                    ),
                ),
                ScriptedModule::new(
                    "kitchen",
                    Behavior::Respond(Duration::from_millis(5000), SearchPage::empty()),
                ),
            ],
            SearchConfig::new().with_module_timeout_ms(200),
        );

        let start = tokio::time::Instant::now();
        let aggregate = coordinator
            .search("milk", CancelSignal::never())
            .await
            .unwrap();
        let elapsed = start.elapsed();

        let keys: Vec<_> = aggregate.groups.iter().map(|g| g.module_key.as_str()).collect();
        assert_eq!(keys, vec!["finances", "kitchen"]);
        assert_eq!(aggregate.group("finances").unwrap().total_count, 2);
        assert_eq!(aggregate.group("kitchen").unwrap().total_count, 0);
        assert!(aggregate.group("kitchen").unwrap().items.is_empty());

        // Bounded by the timeout, never by the slow module.
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_millis(1000), "elapsed {elapsed:?}");
    }

    #[tokio::test]
    async fn test_failing_module_is_isolated() {
        let (coordinator, _) = coordinator_for(
            vec![
                ScriptedModule::new("broken", Behavior::Fail),
                ScriptedModule::instant("healthy", two_items()),
            ],
            SearchConfig::default(),
        );

        let aggregate = coordinator
            .search("anything", CancelSignal::never())
            .await
            .unwrap();

        assert_eq!(aggregate.group("broken").unwrap().total_count, 0);
        assert_eq!(aggregate.group("healthy").unwrap().total_count, 2);
    }

    #[tokio::test]
    async fn test_panicking_module_is_isolated() {
        let (coordinator, _) = coordinator_for(
            vec![
                ScriptedModule::new("explosive", Behavior::Panic),
                ScriptedModule::instant("healthy", two_items()),
            ],
            SearchConfig::default(),
        );

        let aggregate = coordinator
            .search("anything", CancelSignal::never())
            .await
            .unwrap();

        assert_eq!(aggregate.group("explosive").unwrap().total_count, 0);
        assert_eq!(aggregate.group("healthy").unwrap().total_count, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_output_order_is_registration_order_not_completion_order() {
        // slow registered before fast and finishing last must still be first.
        let (coordinator, _) = coordinator_for(
            vec![
                ScriptedModule::new(
                    "slow",
                    Behavior::Respond(
                        Duration::from_millis(150),
                        SearchPage::from_items(vec![ResultItem::new("s", "/s")]),
                    ),
                ),
                ScriptedModule::new(
                    "fast",
                    Behavior::Respond(
                        Duration::ZERO,
                        SearchPage::from_items(vec![ResultItem::new("f", "/f")]),
                    ),
                ),
            ],
            SearchConfig::new().with_module_timeout_ms(500),
        );

        let aggregate = coordinator
            .search("order", CancelSignal::never())
            .await
            .unwrap();

        let keys: Vec<_> = aggregate.groups.iter().map(|g| g.module_key.as_str()).collect();
        assert_eq!(keys, vec!["slow", "fast"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_caller_cancellation_yields_cancelled_not_partial() {
        let (coordinator, _) = coordinator_for(
            vec![
                ScriptedModule::new("hang-a", Behavior::HangUntilCancelled),
                ScriptedModule::new("hang-b", Behavior::HangUntilCancelled),
            ],
            SearchConfig::new().with_module_timeout_ms(60_000),
        );

        let (handle, signal) = CancelHandle::new();

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            handle.cancel();
            // Keep the handle alive so drop-cancel is not what fires.
            tokio::time::sleep(Duration::from_millis(50)).await;
        });

        let outcome = coordinator.search("milk", signal).await;
        assert!(matches!(outcome, Err(SearchError::Cancelled)));

        canceller.await.unwrap();
    }

    #[tokio::test]
    async fn test_pre_cancelled_signal_short_circuits() {
        let (coordinator, logs) = coordinator_for(
            vec![ScriptedModule::instant("a", Vec::new())],
            SearchConfig::default(),
        );

        let (handle, signal) = CancelHandle::new();
        handle.cancel();

        let outcome = coordinator.search("milk", signal).await;
        assert!(matches!(outcome, Err(SearchError::Cancelled)));

        // Nothing was dispatched.
        assert!(logs[0].lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_validation_rejects_bad_queries() {
        let (coordinator, _) =
            coordinator_for(vec![ScriptedModule::instant("a", Vec::new())], {
                SearchConfig::new().with_max_query_length(10)
            });

        assert!(matches!(
            coordinator.search("", CancelSignal::never()).await,
            Err(SearchError::Validation(_))
        ));
        assert!(matches!(
            coordinator
                .search("a query that is way too long", CancelSignal::never())
                .await,
            Err(SearchError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_no_searchable_modules_yields_empty_aggregate() {
        let registry = ModuleRegistry::new().freeze();
        let coordinator = SearchCoordinator::new(&registry, SearchConfig::default());

        let aggregate = coordinator
            .search("milk", CancelSignal::never())
            .await
            .unwrap();
        assert_eq!(aggregate.module_count(), 0);
    }
}
