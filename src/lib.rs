pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod logging;
pub mod lookup;
pub mod resolve;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use error::{ResolverError, Result};
