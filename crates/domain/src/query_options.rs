use serde::{Deserialize, Serialize};

/// Maximum UDP-equivalent payload size advertised in the EDNS OPT record.
pub const EDNS_MAX_PAYLOAD: u16 = 4096;

/// Every query owns an isolated stream, so no ID-based demultiplexing is
/// needed and RFC 9250 requires the ID to be zero. Revisit if several
/// queries ever share one stream.
pub const DOQ_MESSAGE_ID: u16 = 0;

/// Header and EDNS flags applied to every outgoing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct QueryOptions {
    #[serde(default = "default_true")]
    pub recursion_desired: bool,

    #[serde(default = "default_true")]
    pub dnssec_ok: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            recursion_desired: true,
            dnssec_ok: true,
        }
    }
}

fn default_true() -> bool {
    true
}
