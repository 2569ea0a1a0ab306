pub mod crawler;
pub mod dom;
pub mod error;
pub mod links;
pub mod paths;
pub mod result;
pub mod rewrite;
pub mod target;
pub mod visited;
pub mod gate;

mod context;
mod fetch;
mod frontier;

pub use crawler::{Crawler, ProgressCallback, ResultCallback};
pub use error::MirrorError;
pub use frontier::CrawlTask;
pub use links::{ClassifiedLinks, LinkKind};
pub use result::{ContentKind, FetchRecord, MirrorReport};
pub use target::MirrorTarget;
