pub mod backend;
pub mod compose;
pub mod config;
pub mod error;
pub mod probe;
pub mod resolver;
pub mod source;
pub mod types;

pub use error::ResolveError;
pub use resolver::{PageResolver, ResolverStatus};
pub use types::{ConnectionConfig, Outcome, ResolvedPage, SourceKind};
