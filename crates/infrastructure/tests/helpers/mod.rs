mod doq_server_mock;
mod tls_material;

pub use doq_server_mock::{address_response, query_type, question_end, Handler, MockDoqServer};
pub use tls_material::{write_file, SelfSignedCert};
