//! Candidate lookup for a single shared category
//!
//! The fetcher turns a `(source, content types, category)` triple into a
//! bounded, newest-first list of candidate ids. Every lookup goes through the
//! hook registry and the query cache; collaborator failures are logged and
//! yield no candidates.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::{query_cache_key, QueryCache};
use crate::config::{CacheConfig, FetcherConfig, RelataConfig};
use crate::hooks::{HookRegistry, HookResult, QueryContext};
use crate::models::{AuthorId, Category, ContentType, ItemId};
use crate::storage::{CatalogMetadata, ContentRepository, ItemQuery};

/// Type, status, recency and exclusion rules for one source item
#[derive(Debug, Clone)]
pub struct LookupScope {
    source_id: ItemId,
    /// `None` when no content type is allowed
    base: Option<ItemQuery>,
}

impl LookupScope {
    pub fn source_id(&self) -> ItemId {
        self.source_id
    }

    /// Ids every lookup in this scope leaves out
    pub fn excluded_ids(&self) -> &[ItemId] {
        self.base
            .as_ref()
            .map(|query| query.exclude_ids.as_slice())
            .unwrap_or_default()
    }
}

/// Fetches items sharing a category (or an author) with a source item
#[derive(Debug, Clone)]
pub struct CategoryMatchFetcher {
    repository: Arc<dyn ContentRepository>,
    catalog: Option<Arc<dyn CatalogMetadata>>,
    cache: Option<Arc<dyn QueryCache>>,
    hooks: HookRegistry,
    config: FetcherConfig,
    cache_config: CacheConfig,
}

impl CategoryMatchFetcher {
    /// Create a fetcher without cache, catalog metadata or hooks
    pub fn new(repository: Arc<dyn ContentRepository>, config: &RelataConfig) -> Self {
        Self {
            repository,
            catalog: None,
            cache: None,
            hooks: HookRegistry::new(),
            config: config.fetcher.clone(),
            cache_config: config.cache.clone(),
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn QueryCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Source of the hidden-from-catalog ids for product lookups
    pub fn with_catalog(mut self, catalog: Arc<dyn CatalogMetadata>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Resolve the rules shared by every lookup for `source_id`.
    ///
    /// The catalog is consulted here, once, so a scope reused across the
    /// category and author lookups of one computation reads it only once.
    pub async fn scope(&self, source_id: ItemId, content_types: &[ContentType]) -> LookupScope {
        if content_types.is_empty() {
            return LookupScope { source_id, base: None };
        }

        let mut query = ItemQuery::new(content_types, self.config.status.clone(), self.config.top_n)
            .exclude([source_id]);

        let sells_products = content_types
            .iter()
            .any(|content_type| content_type.as_str() == self.config.product_type);

        if sells_products {
            query = query
                .exclude(self.hidden_from_catalog().await)
                .without_out_of_stock(self.config.hide_out_of_stock);
        }

        LookupScope { source_id, base: Some(query) }
    }

    /// Newest items sharing `category` with `source_id`, excluding the source
    pub async fn fetch(
        &self,
        source_id: ItemId,
        content_types: &[ContentType],
        category: &Category,
    ) -> Vec<ItemId> {
        let scope = self.scope(source_id, content_types).await;
        self.fetch_in(&scope, category).await
    }

    /// Newest items written by `author`, excluding the source
    pub async fn fetch_by_author(
        &self,
        source_id: ItemId,
        content_types: &[ContentType],
        author: AuthorId,
    ) -> Vec<ItemId> {
        let scope = self.scope(source_id, content_types).await;
        self.fetch_by_author_in(&scope, author).await
    }

    /// [`fetch`](Self::fetch) within an already resolved scope
    pub async fn fetch_in(&self, scope: &LookupScope, category: &Category) -> Vec<ItemId> {
        let Some(base) = &scope.base else {
            return Vec::new();
        };

        let query = base
            .clone()
            .in_category(category.taxonomy.clone(), category.term_taxonomy_id);
        let source_id = scope.source_id;

        self.execute(query, QueryContext::Category { source_id, category })
            .await
    }

    /// [`fetch_by_author`](Self::fetch_by_author) within an already resolved scope
    pub async fn fetch_by_author_in(&self, scope: &LookupScope, author: AuthorId) -> Vec<ItemId> {
        let Some(base) = &scope.base else {
            return Vec::new();
        };

        let query = base.clone().by_author(author);
        let source_id = scope.source_id;

        self.execute(query, QueryContext::Author { source_id, author })
            .await
    }

    async fn hidden_from_catalog(&self) -> Vec<ItemId> {
        let Some(catalog) = &self.catalog else {
            return Vec::new();
        };

        match catalog.hidden_from_catalog_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(transient = e.is_transient(), "Failed to read hidden catalog items: {}", e);
                Vec::new()
            }
        }
    }

    async fn execute(&self, mut query: ItemQuery, ctx: QueryContext<'_>) -> Vec<ItemId> {
        let source_id = ctx.source_id();

        if let HookResult::Veto(reason) = self.hooks.execute_before_query(&mut query, &ctx).await {
            debug!("Candidate query for {} vetoed: {}", source_id, reason);
            return Vec::new();
        }

        let key = self.cache_key(&query);

        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            match cache.get(key).await {
                Ok(Some(ids)) => {
                    debug!("Query cache hit for {}: {} candidates", source_id, ids.len());
                    return ids;
                }
                Ok(None) => debug!("Query cache miss for {}", source_id),
                Err(e) => warn!("Query cache lookup failed: {}", e),
            }
        }

        let mut ids = match self.repository.query_items(&query).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(transient = e.is_transient(), "Candidate query for {} failed: {}", source_id, e);
                return Vec::new();
            }
        };

        // Hooks may drop the exclusion; the source never counts as a candidate
        ids.retain(|id| *id != source_id);
        ids.truncate(query.limit);

        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Err(e) = cache.set(key, &ids, self.cache_config.ttl).await {
                warn!("Failed to store query result in cache: {}", e);
            }
        }

        ids
    }

    fn cache_key(&self, query: &ItemQuery) -> Option<String> {
        if !self.cache_config.enabled || self.cache.is_none() {
            return None;
        }

        match query_cache_key(&self.cache_config.key_prefix, query) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!("Failed to compute query cache key: {}", e);
                None
            }
        }
    }
}
