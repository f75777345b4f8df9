mod hickory_codec;
pub mod message_builder;
pub mod record_type_map;
pub mod response_renderer;

pub use hickory_codec::HickoryCodec;
pub use message_builder::MessageBuilder;
pub use record_type_map::RecordTypeMapper;
pub use response_renderer::ResponseRenderer;
