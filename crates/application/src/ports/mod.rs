mod dns_codec;
mod doq_connection;

pub use dns_codec::DnsCodec;
pub use doq_connection::{DoqConnection, QueryStream, StreamRecvHalf, StreamSendHalf};

// Re-export for convenience
pub use ferrous_doq_domain::DnsQuery;
