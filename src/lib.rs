pub mod cache;
pub mod cli;
pub mod collector;
pub mod config;
pub mod context;
pub mod error;
pub mod fec;
pub mod lookup;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use context::AppContext;
pub use error::{CollectorError, Result};
