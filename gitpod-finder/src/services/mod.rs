pub mod queries;
pub mod sourcegraph_api;
pub mod transport;
