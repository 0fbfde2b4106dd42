//! Status sources for the gas monitor: the remote HTTP API and an offline
//! simulator.

pub mod error;
pub mod http;
pub mod sim;
pub mod wire;

pub use error::SourceError;
pub use http::HttpStatusSource;
pub use sim::SimulatedSource;
pub use wire::decode_status;
