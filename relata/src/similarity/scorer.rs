//! Similarity scoring across taxonomies
//!
//! For every taxonomy of the request, the scorer looks up the categories the
//! source item belongs to, fetches the newest items sharing each category and
//! awards them the taxonomy's points. Candidates matching several categories
//! accumulate points. An optional same-author pass then boosts candidates
//! that already scored, before the ranking is sorted and projected.

use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::fetcher::{CategoryMatchFetcher, LookupScope};
use super::options::SimilarOptions;
use super::request::SimilarityRequest;
use super::table::{ScoreTable, SimilarItems};
use super::taxonomy::TaxonomySpec;
use crate::cache::{MemoryQueryCache, QueryCache};
use crate::config::validation::validate_config;
use crate::config::RelataConfig;
use crate::hooks::HookRegistry;
use crate::models::{AuthorId, ContentType, ItemId, ItemSummary};
use crate::storage::{CatalogMetadata, ContentRepository, MemoryContentStore, TaxonomyStore};
use crate::{RelataError, Result};

/// Computes ranked similar items for a source item
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    fetcher: CategoryMatchFetcher,
    repository: Arc<dyn ContentRepository>,
    taxonomy_store: Arc<dyn TaxonomyStore>,
    hooks: HookRegistry,
    config: RelataConfig,
}

impl SimilarityScorer {
    pub fn builder() -> ScorerBuilder {
        ScorerBuilder::new()
    }

    /// Scorer reading everything from one in-memory store
    pub fn in_memory(store: Arc<MemoryContentStore>, config: RelataConfig) -> Result<Self> {
        Self::builder().with_store(store).with_config(config).build()
    }

    pub fn fetcher(&self) -> &CategoryMatchFetcher {
        &self.fetcher
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn config(&self) -> &RelataConfig {
        &self.config
    }

    /// Rank the items similar to `source_id`.
    ///
    /// A missing or zero id yields an empty result. Empty `content_types`
    /// default to the source item's own type. Lookup failures only remove
    /// the candidates of the failed lookup.
    pub async fn compute(
        &self,
        source_id: impl Into<Option<ItemId>>,
        content_types: &[ContentType],
        taxonomies: &TaxonomySpec,
        options: &SimilarOptions,
    ) -> SimilarItems {
        let Some(source_id) = source_id.into().filter(|id| id.is_valid()) else {
            debug!("No valid source item, returning empty result");
            return SimilarItems::empty(options);
        };

        self.compute_for(source_id, content_types, taxonomies, options)
            .await
    }

    /// Run a request parsed from host input
    pub async fn compute_request(&self, request: &SimilarityRequest) -> SimilarItems {
        self.compute(
            request.item_id,
            &request.content_types,
            &request.taxonomies,
            &request.options,
        )
        .await
    }

    #[instrument(
        name = "similarity.compute",
        skip(self, content_types, taxonomies, options),
        fields(taxonomies = taxonomies.len())
    )]
    async fn compute_for(
        &self,
        source_id: ItemId,
        content_types: &[ContentType],
        taxonomies: &TaxonomySpec,
        options: &SimilarOptions,
    ) -> SimilarItems {
        let boost = options.author_boost();
        let source = if content_types.is_empty() || boost.is_some() {
            self.source_summary(source_id).await
        } else {
            None
        };

        let content_types = if content_types.is_empty() {
            match &source {
                Some(summary) => vec![summary.content_type.clone()],
                None => return SimilarItems::empty(options),
            }
        } else {
            content_types.to_vec()
        };

        let scope = self.fetcher.scope(source_id, &content_types).await;
        let mut table = self.score_taxonomies(&scope, taxonomies).await;

        if let (Some(boost), Some(summary)) = (boost, &source) {
            self.apply_author_boost(&mut table, &scope, summary.author, boost)
                .await;
        }

        debug!("Scored {} candidates for {}", table.len(), source_id);
        SimilarItems::project(table.into_ranked(), options)
    }

    async fn score_taxonomies(&self, scope: &LookupScope, taxonomies: &TaxonomySpec) -> ScoreTable {
        let source_id = scope.source_id();
        let mut table = ScoreTable::new();

        for (taxonomy, points) in taxonomies.iter() {
            let categories = match self.taxonomy_store.item_categories(source_id, taxonomy).await {
                Ok(categories) => categories,
                Err(e) => {
                    warn!(
                        transient = e.is_transient(),
                        "Failed to read {} categories of {}: {}",
                        taxonomy,
                        source_id,
                        e
                    );
                    continue;
                }
            };

            for category in &categories {
                for candidate in self.fetcher.fetch_in(scope, category).await {
                    if !table.contains(candidate) {
                        let base = self.base_score(source_id, candidate).await;
                        table.insert(candidate, base);
                    }
                    table.add(candidate, points);
                }
            }
        }

        table
    }

    /// Add `boost` to every scored candidate written by the source's author
    async fn apply_author_boost(
        &self,
        table: &mut ScoreTable,
        scope: &LookupScope,
        author: AuthorId,
        boost: f64,
    ) {
        if table.is_empty() {
            return;
        }

        let same_author = self.fetcher.fetch_by_author_in(scope, author).await;

        for candidate in same_author {
            if table.score(candidate).is_some_and(|score| score != 0.0) {
                table.add(candidate, boost);
            }
        }
    }

    async fn base_score(&self, source_id: ItemId, candidate: ItemId) -> f64 {
        self.hooks
            .resolve_base_score(source_id, candidate)
            .await
            .unwrap_or(self.config.scoring.base_score)
    }

    async fn source_summary(&self, source_id: ItemId) -> Option<ItemSummary> {
        match self.repository.get_item(source_id).await {
            Ok(Some(summary)) => Some(summary),
            Ok(None) => {
                debug!("Source item {} not found", source_id);
                None
            }
            Err(e) => {
                warn!(transient = e.is_transient(), "Failed to read source item {}: {}", source_id, e);
                None
            }
        }
    }
}

/// Builder for [`SimilarityScorer`]
#[derive(Debug, Default)]
pub struct ScorerBuilder {
    repository: Option<Arc<dyn ContentRepository>>,
    taxonomy_store: Option<Arc<dyn TaxonomyStore>>,
    catalog: Option<Arc<dyn CatalogMetadata>>,
    cache: Option<Arc<dyn QueryCache>>,
    hooks: HookRegistry,
    config: RelataConfig,
}

impl ScorerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(mut self, repository: Arc<dyn ContentRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn with_taxonomy_store(mut self, taxonomy_store: Arc<dyn TaxonomyStore>) -> Self {
        self.taxonomy_store = Some(taxonomy_store);
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn CatalogMetadata>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Use all three collaborators of a single store
    pub fn with_store<S>(self, store: Arc<S>) -> Self
    where
        S: ContentRepository + TaxonomyStore + CatalogMetadata + 'static,
    {
        let repository: Arc<dyn ContentRepository> = store.clone();
        let taxonomy_store: Arc<dyn TaxonomyStore> = store.clone();
        let catalog: Arc<dyn CatalogMetadata> = store;

        self.with_repository(repository)
            .with_taxonomy_store(taxonomy_store)
            .with_catalog(catalog)
    }

    /// Query cache to use instead of the default in-process one
    pub fn with_cache(mut self, cache: Arc<dyn QueryCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_config(mut self, config: RelataConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration and assemble the scorer
    pub fn build(self) -> Result<SimilarityScorer> {
        validate_config(&self.config)?;

        let repository = self.repository.ok_or_else(|| {
            RelataError::Configuration("A content repository is required".to_string())
        })?;
        let taxonomy_store = self.taxonomy_store.ok_or_else(|| {
            RelataError::Configuration("A taxonomy store is required".to_string())
        })?;

        let mut fetcher = CategoryMatchFetcher::new(repository.clone(), &self.config)
            .with_hooks(self.hooks.clone());

        if let Some(catalog) = self.catalog {
            fetcher = fetcher.with_catalog(catalog);
        }

        if self.config.cache.enabled {
            let cache: Arc<dyn QueryCache> = match self.cache {
                Some(cache) => cache,
                None => Arc::new(MemoryQueryCache::from_config(&self.config.cache)),
            };
            fetcher = fetcher.with_cache(cache);
        }

        Ok(SimilarityScorer {
            fetcher,
            repository,
            taxonomy_store,
            hooks: self.hooks,
            config: self.config,
        })
    }
}
