pub mod config;
pub mod error;

pub use config::LigaConfig;
pub use error::{LigaError, Result};
