use super::message_builder::MessageBuilder;
use super::response_renderer::ResponseRenderer;
use ferrous_doq_application::ports::DnsCodec;
use ferrous_doq_domain::{DnsQuery, QueryError, QueryOptions};

/// [`DnsCodec`] backed by `hickory-proto`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HickoryCodec;

impl HickoryCodec {
    pub fn new() -> Self {
        Self
    }
}

impl DnsCodec for HickoryCodec {
    fn encode_query(&self, query: &DnsQuery, options: &QueryOptions) -> Result<Vec<u8>, QueryError> {
        MessageBuilder::build_query(query, options)
    }

    fn decode_response(&self, wire: &[u8]) -> Result<String, QueryError> {
        ResponseRenderer::render(wire)
    }
}
