//! External AMM backend: trait contract, wire types, and the HTTP client.

mod http;
mod traits;
pub mod types;

pub use http::HttpBackend;
pub use traits::AmmBackend;
pub use types::{BundleOrder, BundleType, ExclusiveOrder, OptionOrder};
