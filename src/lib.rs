pub mod config;
pub mod model;
pub mod scraper;
pub mod utils;

pub use model::{ConfigError, FetchError, FetchResponse};
pub use scraper::{fetch, FetchOptions, Fetcher};
