use crate::backend::Backend;
use crate::compose;
use crate::config::Config;
use crate::probe::{Reachability, probe};
use crate::source::{ContentSource, LiveSource, StaticSource};
use crate::types::{ConnectionConfig, Outcome, PageRecord, ResolvedPage, SiteSettings, SourceKind};
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Observable position of the resolver's state machine, for progress
/// display. Terminal states mirror the fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverStatus {
    Idle,
    Resolving,
    Live,
    Static,
    Hardcoded,
    NotFound,
}

/// Drives one resolution pipeline per requested slug: probe the backend,
/// fetch from the live source, fall back to the bundled dataset, and as a
/// last resort serve hardcoded content. Overlapping resolutions are handled
/// with a sequence token per request; a resolution that finishes after a
/// newer one has started never overwrites the newer observable status.
pub struct PageResolver<B> {
    backend: B,
    static_source: StaticSource,
    default_template: String,
    probe_timeout: Duration,
    seq: AtomicU64,
    status: Mutex<ResolverStatus>,
}

impl<B: Backend> PageResolver<B> {
    pub fn new(backend: B, static_source: StaticSource, config: &Config) -> Self {
        Self {
            backend,
            static_source,
            default_template: config.default_template.clone(),
            probe_timeout: config.probe_timeout(),
            seq: AtomicU64::new(0),
            status: Mutex::new(ResolverStatus::Idle),
        }
    }

    /// Access to the underlying backend, mainly for instrumentation and
    /// test assertions on call gating.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn status(&self) -> ResolverStatus {
        *self
            .status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Write `status` only while `token` is still the newest resolution.
    /// The sequence check happens under the status lock so a superseded
    /// resolution can never interleave its write after the newer one's.
    fn set_status_if_current(&self, token: u64, status: ResolverStatus) -> bool {
        let mut guard = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        if self.seq.load(Ordering::SeqCst) == token {
            *guard = status;
            true
        } else {
            false
        }
    }

    /// Resolve one slug. The connection config, when present, is read-only
    /// input for this call only; the resolver never reads ambient storage.
    pub async fn resolve(&self, slug: &str, config: Option<&ConnectionConfig>) -> Outcome {
        let token = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_status_if_current(token, ResolverStatus::Resolving);

        let outcome = self.run(slug, config).await;

        // Commit only if no newer resolution started meanwhile. Stale
        // results are discarded, not cancelled.
        if !self.set_status_if_current(token, terminal_status(&outcome)) {
            debug!(slug, token, "stale resolution result discarded");
        }
        outcome
    }

    async fn run(&self, slug: &str, config: Option<&ConnectionConfig>) -> Outcome {
        if let Some(config) = config {
            if probe(&self.backend, config, self.probe_timeout).await == Reachability::Reachable {
                let live = LiveSource::new(&self.backend, config);
                if let Some(page) = live.fetch_page(slug).await {
                    let settings = live.fetch_settings().await;
                    let resolved = self
                        .compose_from(&live, &page, &settings, SourceKind::Live)
                        .await;
                    info!(slug, "resolved from live backend");
                    return Outcome::Live(resolved);
                }
                debug!(slug, "live source had no page, falling back to static");
            }
        }

        if !self.static_source.dataset_ok() {
            warn!(slug, "static dataset unreadable, serving hardcoded content");
            return Outcome::Hardcoded(compose::hardcoded_page());
        }

        if let Some(page) = self.static_source.fetch_page(slug).await {
            let settings = self.static_source.fetch_settings().await;
            let resolved = self
                .compose_from(&self.static_source, &page, &settings, SourceKind::Static)
                .await;
            info!(slug, found = %page.slug, "resolved from static dataset");
            return Outcome::Static(resolved);
        }

        info!(slug, "no page in any source");
        Outcome::NotFound
    }

    /// Fetch the page's template from `source`, retrying with the default
    /// template name, then synthesizing the built-in wrapper when no stored
    /// template is usable. Provenance stays with the page's source.
    async fn compose_from<S: ContentSource>(
        &self,
        source: &S,
        page: &PageRecord,
        settings: &SiteSettings,
        kind: SourceKind,
    ) -> ResolvedPage {
        let template = match source.fetch_template(&page.template).await {
            Some(template) => Some(template),
            None => {
                debug!(
                    template = %page.template,
                    default = %self.default_template,
                    "template missing, retrying with default"
                );
                source.fetch_template(&self.default_template).await
            }
        };

        let Some(template) = template else {
            debug!(slug = %page.slug, "no stored template, synthesizing builtin wrapper");
            return compose::compose_builtin(page, settings, kind);
        };

        match compose::compose(page, &template, settings, kind) {
            Ok(resolved) => resolved,
            Err(e) => {
                debug!(slug = %page.slug, error = %e, "stored template unusable, synthesizing builtin wrapper");
                compose::compose_builtin(page, settings, kind)
            }
        }
    }
}

fn terminal_status(outcome: &Outcome) -> ResolverStatus {
    match outcome {
        Outcome::Live(_) => ResolverStatus::Live,
        Outcome::Static(_) => ResolverStatus::Static,
        Outcome::Hardcoded(_) => ResolverStatus::Hardcoded,
        Outcome::NotFound => ResolverStatus::NotFound,
    }
}
