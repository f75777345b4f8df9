use ferrous_doq_domain::{DnsQuery, QueryError, QueryOptions};

/// Converts between queries and DNS wire format.
pub trait DnsCodec: Send + Sync {
    /// Failures surface as [`QueryError::Send`].
    fn encode_query(&self, query: &DnsQuery, options: &QueryOptions)
        -> Result<Vec<u8>, QueryError>;

    /// Decodes one response message and renders it for display. Malformed
    /// wire data surfaces as [`QueryError::Decode`].
    fn decode_response(&self, wire: &[u8]) -> Result<String, QueryError>;
}
