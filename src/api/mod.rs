pub mod client;
pub mod transport;

pub use client::ShareClient;
pub use transport::{HttpTransport, RequestBody, Transport, TransportResponse};
