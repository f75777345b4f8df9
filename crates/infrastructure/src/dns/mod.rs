pub mod codec;
pub mod transport;

pub use codec::HickoryCodec;
pub use transport::{QuicConnection, QuicConnector};
