pub mod config;
pub mod error;
pub mod scan;
pub mod services;

pub use config::{Config, ConfigOverrides};
pub use error::{ApiError, ConfigError, ScanError};
pub use services::sourcegraph_api::SourcegraphClient;
pub use services::transport::{HttpReply, ReqwestTransport, Transport};
