//! Hook registry for similarity hooks
//!
//! Handles:
//! - Hook registration and unregistration
//! - Priority-based hook ordering
//! - Timeout enforcement for individual hooks
//! - Safe failure handling (a slow hook doesn't stop the lookup)

use super::traits::{HookResult, QueryContext, SimilarityHook};
use crate::models::ItemId;
use crate::storage::ItemQuery;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Registry for managing similarity hooks
///
/// Cloning the registry shares the underlying hook list.
#[derive(Debug, Clone, Default)]
pub struct HookRegistry {
    /// Registered hooks, kept sorted by priority (highest first) then name
    hooks: Arc<RwLock<Vec<Arc<dyn SimilarityHook>>>>,
}

impl HookRegistry {
    /// Create a new empty hook registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new hook
    pub async fn register(&self, hook: Arc<dyn SimilarityHook>) {
        let priority = hook.priority();
        let name = hook.name().to_string();
        let mut hooks = self.hooks.write().await;

        hooks.push(hook);
        hooks.sort_by(|a, b| {
            b.priority()
                .cmp(&a.priority())
                .then_with(|| a.name().cmp(b.name()))
        });

        debug!("Hook registered: {} (priority: {})", name, priority);
    }

    /// Remove every hook registered under `name`, returning how many were removed
    pub async fn unregister(&self, name: &str) -> usize {
        let mut hooks = self.hooks.write().await;
        let before = hooks.len();
        hooks.retain(|hook| hook.name() != name);
        before - hooks.len()
    }

    async fn snapshot(&self) -> Vec<Arc<dyn SimilarityHook>> {
        self.hooks.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.hooks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.hooks.read().await.is_empty()
    }

    /// Run `before_query` for all registered hooks
    ///
    /// Each hook works on a copy of the query; the copy replaces the query
    /// only if the hook finishes within its timeout. Returns the first veto.
    pub async fn execute_before_query(
        &self,
        query: &mut ItemQuery,
        ctx: &QueryContext<'_>,
    ) -> HookResult {
        // hooks may register or unregister while running
        let hooks = self.snapshot().await;

        for hook in &hooks {
            let timeout_ms = hook.timeout_ms();
            let name = hook.name();
            let mut candidate = query.clone();

            let outcome = tokio::time::timeout(
                std::time::Duration::from_millis(timeout_ms),
                hook.before_query(&mut candidate, ctx),
            )
            .await;

            match outcome {
                Ok(HookResult::Continue) => {
                    *query = candidate;
                    debug!("Hook '{}' completed successfully", name);
                }
                Ok(HookResult::Veto(reason)) => {
                    debug!("Hook '{}' vetoed query for {}: {}", name, ctx.source_id(), reason);
                    return HookResult::Veto(reason);
                }
                Err(_) => {
                    warn!("Hook '{}' timed out after {}ms", name, timeout_ms);
                }
            }
        }

        HookResult::Continue
    }

    /// First finite base score offered by a hook, in priority order
    pub async fn resolve_base_score(&self, source_id: ItemId, candidate: ItemId) -> Option<f64> {
        let hooks = self.hooks.read().await;
        hooks
            .iter()
            .filter_map(|hook| hook.base_score(source_id, candidate))
            .find(|score| score.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ContentType};
    use async_trait::async_trait;
    use std::time::Duration;

    #[derive(Debug)]
    struct LimitHook {
        name: &'static str,
        priority: i32,
        limit: usize,
    }

    #[async_trait]
    impl SimilarityHook for LimitHook {
        async fn before_query(&self, query: &mut ItemQuery, _ctx: &QueryContext<'_>) -> HookResult {
            query.limit = self.limit;
            HookResult::Continue
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    #[derive(Debug)]
    struct VetoHook;

    #[async_trait]
    impl SimilarityHook for VetoHook {
        async fn before_query(&self, _query: &mut ItemQuery, _ctx: &QueryContext<'_>) -> HookResult {
            HookResult::Veto("maintenance".to_string())
        }

        fn priority(&self) -> i32 {
            10
        }

        fn name(&self) -> &str {
            "veto"
        }
    }

    #[derive(Debug)]
    struct SlowHook;

    #[async_trait]
    impl SimilarityHook for SlowHook {
        async fn before_query(&self, query: &mut ItemQuery, _ctx: &QueryContext<'_>) -> HookResult {
            query.limit = 999;
            tokio::time::sleep(Duration::from_secs(60)).await;
            HookResult::Continue
        }

        fn timeout_ms(&self) -> u64 {
            10
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    /// Removes itself from the registry it belongs to on first use
    #[derive(Debug)]
    struct OneShotHook {
        registry: HookRegistry,
    }

    #[async_trait]
    impl SimilarityHook for OneShotHook {
        async fn before_query(&self, query: &mut ItemQuery, _ctx: &QueryContext<'_>) -> HookResult {
            self.registry.unregister("one-shot").await;
            query.limit = 2;
            HookResult::Continue
        }

        fn name(&self) -> &str {
            "one-shot"
        }
    }

    #[derive(Debug)]
    struct BaseScoreHook(Option<f64>, i32);

    impl SimilarityHook for BaseScoreHook {
        fn base_score(&self, _source_id: ItemId, _candidate: ItemId) -> Option<f64> {
            self.0
        }

        fn priority(&self) -> i32 {
            self.1
        }
    }

    fn query() -> ItemQuery {
        ItemQuery::new(&[ContentType::from("post")], "publish", 15)
    }

    fn category() -> Category {
        Category::new("category", 1, 1)
    }

    #[tokio::test]
    async fn test_hooks_run_in_priority_order() {
        let registry = HookRegistry::new();
        registry
            .register(Arc::new(LimitHook { name: "low", priority: 1, limit: 3 }))
            .await;
        registry
            .register(Arc::new(LimitHook { name: "high", priority: 5, limit: 7 }))
            .await;

        let category = category();
        let ctx = QueryContext::Category { source_id: ItemId::from(1), category: &category };
        let mut query = query();
        let result = registry.execute_before_query(&mut query, &ctx).await;

        assert_eq!(result, HookResult::Continue);
        // "low" runs last and wins
        assert_eq!(query.limit, 3);
    }

    #[tokio::test]
    async fn test_veto_stops_the_chain() {
        let registry = HookRegistry::new();
        registry.register(Arc::new(VetoHook)).await;
        registry
            .register(Arc::new(LimitHook { name: "after", priority: 0, limit: 1 }))
            .await;

        let category = category();
        let ctx = QueryContext::Category { source_id: ItemId::from(1), category: &category };
        let mut query = query();
        let result = registry.execute_before_query(&mut query, &ctx).await;

        assert_eq!(result, HookResult::Veto("maintenance".to_string()));
        assert_eq!(query.limit, 15);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_hook_changes_are_discarded() {
        let registry = HookRegistry::new();
        registry.register(Arc::new(SlowHook)).await;

        let ctx = QueryContext::Author {
            source_id: ItemId::from(1),
            author: crate::models::AuthorId(4),
        };
        let mut query = query();
        let result = registry.execute_before_query(&mut query, &ctx).await;

        assert_eq!(result, HookResult::Continue);
        assert_eq!(query.limit, 15);
    }

    #[tokio::test]
    async fn test_resolve_base_score_takes_first_finite_value() {
        let registry = HookRegistry::new();
        assert_eq!(
            registry.resolve_base_score(ItemId::from(1), ItemId::from(2)).await,
            None
        );

        registry.register(Arc::new(BaseScoreHook(Some(f64::NAN), 9))).await;
        registry.register(Arc::new(BaseScoreHook(None, 8))).await;
        registry.register(Arc::new(BaseScoreHook(Some(0.25), 1))).await;
        registry.register(Arc::new(BaseScoreHook(Some(2.0), 0))).await;

        assert_eq!(
            registry.resolve_base_score(ItemId::from(1), ItemId::from(2)).await,
            Some(0.25)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_hook_can_unregister_itself_while_running() {
        let registry = HookRegistry::new();
        registry
            .register(Arc::new(OneShotHook { registry: registry.clone() }))
            .await;

        let category = category();
        let ctx = QueryContext::Category { source_id: ItemId::from(1), category: &category };
        let mut query = query();
        let result = registry.execute_before_query(&mut query, &ctx).await;

        assert_eq!(result, HookResult::Continue);
        // the hook finished instead of timing out on the registry lock
        assert_eq!(query.limit, 2);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_unregister_by_name() {
        let registry = HookRegistry::new();
        registry.register(Arc::new(VetoHook)).await;
        registry.register(Arc::new(SlowHook)).await;
        assert_eq!(registry.len().await, 2);

        assert_eq!(registry.unregister("veto").await, 1);
        assert_eq!(registry.unregister("veto").await, 0);
        assert_eq!(registry.len().await, 1);
        assert!(!registry.is_empty().await);
    }
}
