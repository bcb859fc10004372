//! Live-source adapters.

pub mod http_json;
pub mod static_source;

pub use http_json::HttpJsonSource;
pub use static_source::StaticSource;
