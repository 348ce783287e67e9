//! Server glue for the sensor price tracker: configuration, persistence,
//! the read API, and the scheduled crawl that feeds them.

pub mod config;
pub mod crawl;
pub mod naver_source;
pub mod scheduled_tasks;
pub mod server;
pub mod store;

pub use config::Config;
pub use store::{ProductRow, ProductStore};
