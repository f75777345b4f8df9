mod mock_doq;

pub use mock_doq::{frame, MockDoqConnection, ServerAction, TextCodec};
