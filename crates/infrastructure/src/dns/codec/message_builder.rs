//! DNS-over-QUIC query construction.

use super::record_type_map::RecordTypeMapper;
use ferrous_doq_domain::{DnsQuery, QueryError, QueryOptions, DOQ_MESSAGE_ID, EDNS_MAX_PAYLOAD};
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::Name;
use std::str::FromStr;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Wire form of one query: ID 0, class IN, RD per `options`, plus an
    /// OPT record advertising 4096 bytes with DO per `options`.
    pub fn build_query(query: &DnsQuery, options: &QueryOptions) -> Result<Vec<u8>, QueryError> {
        let name = Name::from_str(&query.domain).map_err(|e| {
            QueryError::Send(format!("invalid domain '{}': {}", query.domain, e))
        })?;

        let mut message = Message::new(DOQ_MESSAGE_ID, MessageType::Query, OpCode::Query);
        message.metadata.recursion_desired = options.recursion_desired;
        message.add_query(Query::query(
            name,
            RecordTypeMapper::to_hickory(&query.record_type),
        ));

        let mut edns = Edns::new();
        edns.set_max_payload(EDNS_MAX_PAYLOAD)
            .set_dnssec_ok(options.dnssec_ok);
        message.set_edns(edns);

        message
            .to_vec()
            .map_err(|e| QueryError::Send(format!("failed to serialize DNS message: {}", e)))
    }
}
