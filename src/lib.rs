//! Download Redirect Proxy Library

pub mod catalog;
pub mod config;
pub mod downloads;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
