pub mod client;
pub mod operations;
pub mod transport;

pub use client::ChatClient;
pub use operations::GraphqlError;
pub use transport::{ChatTransport, GraphqlTransport, TransportError};
