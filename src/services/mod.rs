// Service exports
pub mod api;
pub mod probe;

pub use api::{AgentApiClient, ApiError, ErrorBody};
pub use probe::ConnectivityProbe;
