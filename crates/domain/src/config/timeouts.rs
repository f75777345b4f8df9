use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct TimeoutConfig {
    /// Bound on the QUIC handshake.
    #[serde(default = "default_connect_timeout")]
    pub connect: Duration,

    /// Idle deadline for each query's read phase, armed once the request has
    /// been written. Expiry while waiting for a new frame ends the response.
    #[serde(default = "default_read_timeout")]
    pub read: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: default_connect_timeout(),
            read: default_read_timeout(),
        }
    }
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(3)
}

fn default_read_timeout() -> Duration {
    Duration::from_secs(1)
}
