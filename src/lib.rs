//! cms-blog: a server-rendered blog front-end for a hosted headless CMS
//!
//! Posts are fetched with GROQ queries, cached for a configurable window,
//! and rendered to HTML with maud. Post bodies are portable-text blocks
//! mapped to markup through a table of per-block rules.

pub mod cache;
pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod image;
pub mod pages;
pub mod render;
pub mod server;
pub mod templates;

use std::sync::Arc;
use std::time::Duration;

use crate::cache::QueryCache;
use crate::cms::{CmsClient, ContentSource};
use crate::error::Result;
use crate::pages::{IndexView, PageMetadata, PostView};
use crate::render::PortableRenderer;

pub use crate::config::SiteConfig;
pub use crate::error::BlogError;

/// The blog application
pub struct Blog {
    /// Site configuration
    pub config: SiteConfig,
    source: Arc<dyn ContentSource>,
    renderer: PortableRenderer,
}

impl Blog {
    /// Create a blog backed by the hosted CMS, with a query cache
    pub fn new(config: SiteConfig) -> Result<Self> {
        config.validate()?;
        let client = CmsClient::new(&config.cms)?.with_cache(QueryCache::default());
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// Create a blog that reads from an arbitrary content source
    pub fn with_source(config: SiteConfig, source: Arc<dyn ContentSource>) -> Self {
        let renderer = PortableRenderer::from_config(&config);
        Self {
            config,
            source,
            renderer,
        }
    }

    pub fn source(&self) -> &dyn ContentSource {
        self.source.as_ref()
    }

    pub fn renderer(&self) -> &PortableRenderer {
        &self.renderer
    }

    /// How stale a cached query answer may be
    pub fn revalidate(&self) -> Duration {
        self.config.cms.revalidate()
    }

    /// Assemble the index view
    pub async fn index(&self) -> Result<IndexView> {
        pages::index::assemble(self).await
    }

    /// Assemble the detail view for `slug`
    pub async fn post(&self, slug: &str) -> Result<PostView> {
        pages::detail::assemble(self, slug).await
    }

    /// Document metadata for the detail view of `slug`
    pub async fn post_metadata(&self, slug: &str) -> Result<PageMetadata> {
        pages::metadata::assemble(self, slug).await
    }
}

impl std::fmt::Debug for Blog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blog")
            .field("config", &self.config)
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}
