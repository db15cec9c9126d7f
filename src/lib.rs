//! HTTP service that renders etcd cluster bootstrap scripts from form parameters.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod params;
pub mod templates;

pub use config::schema::ServiceConfig;
pub use error::ServiceError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use params::ParameterSet;
pub use templates::TemplateStore;
