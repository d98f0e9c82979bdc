pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
mod http;
pub mod locate;
pub mod normalize;
pub mod pacing;
pub mod pipeline;
pub mod roster;
pub mod storage;

pub use config::{AcquireConfig, ExtractorKind};
pub use error::AcquireError;
pub use pipeline::{acquire, Pipeline};
