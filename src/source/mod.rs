pub mod bundled;
pub mod live;

use crate::types::{PageRecord, SiteSettings, TemplateRecord};
use std::future::Future;

pub use bundled::StaticSource;
pub use live::LiveSource;

/// Uniform read contract over one data source. Absence and failure look the
/// same to callers: `None` means "fall through", never "abort" — transport
/// and parse problems are a source problem, not a resolver bug.
pub trait ContentSource: Send + Sync {
    fn fetch_page(&self, slug: &str) -> impl Future<Output = Option<PageRecord>> + Send;

    fn fetch_template(&self, name: &str) -> impl Future<Output = Option<TemplateRecord>> + Send;

    /// Settings never block resolution; a source that cannot produce them
    /// yields defaults.
    fn fetch_settings(&self) -> impl Future<Output = SiteSettings> + Send;
}
