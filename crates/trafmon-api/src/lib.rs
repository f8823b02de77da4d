// trafmon-api: Async Rust client for the traffic monitor backend API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use models::{
    ActionReply, ApiAlert, ApiInterface, ApiPacket, ApiTrafficSample, ApiTrafficStats, ApiTrendPoint, ApiUser,
};
pub use transport::{TlsMode, TransportConfig};
