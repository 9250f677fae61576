use crate::source::ContentSource;
use crate::types::{PageRecord, SiteSettings, TemplateRecord};
use tracing::{debug, warn};

const BUNDLED_PAGES: &str = include_str!("../../data/pages.json");
const BUNDLED_TEMPLATES: &str = include_str!("../../data/templates.json");
const BUNDLED_SETTINGS: &str = include_str!("../../data/settings.json");

/// Fallback dataset shipped with the application. Reads are local lookups,
/// no network and no timeout. A dataset file that fails to parse marks that
/// portion unavailable instead of crashing the pipeline.
pub struct StaticSource {
    pages: Option<Vec<PageRecord>>,
    templates: Option<Vec<TemplateRecord>>,
    settings: SiteSettings,
    home_slug: String,
    default_template: String,
}

impl StaticSource {
    /// Parse the compiled-in dataset.
    pub fn bundled(home_slug: &str, default_template: &str) -> Self {
        Self::from_json(
            BUNDLED_PAGES,
            BUNDLED_TEMPLATES,
            BUNDLED_SETTINGS,
            home_slug,
            default_template,
        )
    }

    /// Build a source from raw JSON documents. Used by `bundled` and by
    /// tests exercising malformed datasets.
    pub fn from_json(
        pages_json: &str,
        templates_json: &str,
        settings_json: &str,
        home_slug: &str,
        default_template: &str,
    ) -> Self {
        let pages = match serde_json::from_str(pages_json) {
            Ok(pages) => Some(pages),
            Err(e) => {
                warn!(error = %e, "static page dataset unreadable");
                None
            }
        };
        let templates = match serde_json::from_str(templates_json) {
            Ok(templates) => Some(templates),
            Err(e) => {
                warn!(error = %e, "static template dataset unreadable");
                None
            }
        };
        let settings = match serde_json::from_str(settings_json) {
            Ok(settings) => settings,
            Err(e) => {
                debug!(error = %e, "static settings unreadable, using defaults");
                SiteSettings::default()
            }
        };
        Self {
            pages,
            templates,
            settings,
            home_slug: home_slug.to_string(),
            default_template: default_template.to_string(),
        }
    }

    /// Whether the page dataset loaded at all. When it did not, the
    /// resolver skips straight to its hardcoded last resort.
    pub fn dataset_ok(&self) -> bool {
        self.pages.is_some()
    }

    fn lookup_page(&self, slug: &str) -> Option<&PageRecord> {
        self.pages
            .as_deref()?
            .iter()
            .find(|p| p.slug == slug && p.is_published())
    }
}

impl ContentSource for StaticSource {
    /// Exact slug first, then the designated home slug.
    async fn fetch_page(&self, slug: &str) -> Option<PageRecord> {
        if let Some(page) = self.lookup_page(slug) {
            return Some(page.clone());
        }
        debug!(slug, home = %self.home_slug, "static page missing, trying home fallback");
        self.lookup_page(&self.home_slug).cloned()
    }

    /// Exact name first, then the designated default template.
    async fn fetch_template(&self, name: &str) -> Option<TemplateRecord> {
        let templates = self.templates.as_deref()?;
        if let Some(template) = templates.iter().find(|t| t.name == name) {
            return Some(template.clone());
        }
        debug!(name, default = %self.default_template, "static template missing, trying default");
        templates
            .iter()
            .find(|t| t.name == self.default_template)
            .cloned()
    }

    async fn fetch_settings(&self) -> SiteSettings {
        self.settings.clone()
    }
}
