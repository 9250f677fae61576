use crate::backend::Backend;
use crate::source::ContentSource;
use crate::types::{ConnectionConfig, PageRecord, SiteSettings, TemplateRecord};
use tracing::{debug, warn};

/// Content source backed by the remote backend, bound to one connection
/// config for the duration of a resolution. Every transport or data error
/// collapses to "not found" so the resolver falls through instead of
/// aborting.
pub struct LiveSource<'a, B> {
    backend: &'a B,
    config: &'a ConnectionConfig,
}

impl<'a, B: Backend> LiveSource<'a, B> {
    pub fn new(backend: &'a B, config: &'a ConnectionConfig) -> Self {
        Self { backend, config }
    }
}

impl<B: Backend> ContentSource for LiveSource<'_, B> {
    async fn fetch_page(&self, slug: &str) -> Option<PageRecord> {
        match self.backend.get_page(slug, self.config).await {
            Ok(Some(page)) if page.is_published() => Some(page),
            Ok(Some(page)) => {
                debug!(slug, status = %page.status, "live page not published");
                None
            }
            Ok(None) => {
                debug!(slug, "live page not found");
                None
            }
            Err(e) => {
                warn!(slug, transport = e.is_transport(), error = %e, "live page fetch failed");
                None
            }
        }
    }

    async fn fetch_template(&self, name: &str) -> Option<TemplateRecord> {
        match self.backend.get_template(name, self.config).await {
            Ok(found) => found,
            Err(e) => {
                warn!(name, transport = e.is_transport(), error = %e, "live template fetch failed");
                None
            }
        }
    }

    async fn fetch_settings(&self) -> SiteSettings {
        match self.backend.get_settings(self.config).await {
            Ok(Some(settings)) => settings,
            Ok(None) => SiteSettings::default(),
            Err(e) => {
                debug!(error = %e, "live settings unavailable, using defaults");
                SiteSettings::default()
            }
        }
    }
}
