use serde::{Deserialize, Serialize};

/// Credentials for the remote backend. An opaque bag supplied explicitly by
/// the caller per resolution; the core only presence-checks host/username.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionConfig {
    pub host: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub database: String,
}

impl ConnectionConfig {
    /// A config missing its host or username can never reach a backend, so
    /// the probe refuses it without touching the network.
    pub fn is_complete(&self) -> bool {
        !self.host.is_empty() && !self.username.is_empty()
    }
}

/// One CMS page as stored in either source. Immutable once fetched within a
/// resolution.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageRecord {
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub page_css: String,
    #[serde(default)]
    pub template: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "published".to_string()
}

impl PageRecord {
    pub fn is_published(&self) -> bool {
        self.status == "published"
    }
}

/// Template markup. Two shapes exist in stored data: a single `body` with
/// content placeholders, or a `header`/`footer` pair wrapped around raw page
/// content. The composer supports both.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TemplateRecord {
    pub name: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub footer: Option<String>,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub script: String,
}

impl TemplateRecord {
    pub fn is_wrapped(&self) -> bool {
        self.header.is_some() && self.footer.is_some()
    }
}

/// Site-wide settings singleton. Missing or malformed settings degrade to
/// empty defaults rather than blocking composition.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SiteSettings {
    #[serde(default)]
    pub custom_css: String,
    #[serde(default)]
    pub site_title: String,
}

/// Provenance of a resolved page, surfaced to the UI so it can render a
/// "connected" vs "default data" indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Live,
    Static,
    Hardcoded,
}

/// The composed, renderable document. Recomputed per request and never
/// cached. The output is raw markup; sanitizing or sandboxing it before
/// rendering is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPage {
    pub html: String,
    pub stylesheet: String,
    pub source: SourceKind,
}

/// Terminal result of one resolution, ordered by fallback priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Live(ResolvedPage),
    Static(ResolvedPage),
    Hardcoded(ResolvedPage),
    NotFound,
}

impl Outcome {
    pub fn page(&self) -> Option<&ResolvedPage> {
        match self {
            Self::Live(p) | Self::Static(p) | Self::Hardcoded(p) => Some(p),
            Self::NotFound => None,
        }
    }
}
