pub mod client;

pub use client::FlywheelClient;
pub use fwtag_api_types;
