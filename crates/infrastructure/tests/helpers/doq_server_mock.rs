#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::tls_material::SelfSignedCert;

/// Produces the response messages for one request message.
pub type Handler = Arc<dyn Fn(&[u8]) -> Vec<Vec<u8>> + Send + Sync>;

/// DNS-over-QUIC server on a loopback port with a fresh self-signed
/// certificate for `localhost`.
pub struct MockDoqServer {
    addr: SocketAddr,
    cert: SelfSignedCert,
    endpoint: quinn::Endpoint,
}

impl MockDoqServer {
    pub fn start(handler: Handler) -> Self {
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

        let cert = SelfSignedCert::generate("localhost");

        let mut tls = rustls::ServerConfig::builder_with_protocol_versions(&[&rustls::version::TLS13])
            .with_no_client_auth()
            .with_single_cert(vec![cert.cert_der()], cert.key_der())
            .unwrap();
        tls.alpn_protocols = vec![b"doq".to_vec()];

        let quic_tls = quinn::crypto::rustls::QuicServerConfig::try_from(Arc::new(tls)).unwrap();
        let server_config = quinn::ServerConfig::with_crypto(Arc::new(quic_tls));
        let endpoint =
            quinn::Endpoint::server(server_config, "127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = endpoint.local_addr().unwrap();

        let accept_endpoint = endpoint.clone();
        tokio::spawn(async move {
            while let Some(incoming) = accept_endpoint.accept().await {
                let handler = handler.clone();
                tokio::spawn(async move {
                    let Ok(connection) = incoming.await else {
                        return;
                    };
                    while let Ok((send, recv)) = connection.accept_bi().await {
                        tokio::spawn(Self::serve_stream(send, recv, handler.clone()));
                    }
                });
            }
        });

        Self {
            addr,
            cert,
            endpoint,
        }
    }

    /// Answers A/AAAA queries with loopback addresses and AXFR with three
    /// messages.
    pub fn answering() -> Self {
        Self::start(Arc::new(|query| {
            if query_type(query) == Some(252) {
                (0..3).map(|_| address_response(query)).collect()
            } else {
                vec![address_response(query)]
            }
        }))
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn cert(&self) -> &SelfSignedCert {
        &self.cert
    }

    async fn serve_stream(mut send: quinn::SendStream, mut recv: quinn::RecvStream, handler: Handler) {
        let mut len = [0u8; 2];
        if AsyncReadExt::read_exact(&mut recv, &mut len).await.is_err() {
            return;
        }
        let mut query = vec![0u8; u16::from_be_bytes(len) as usize];
        if AsyncReadExt::read_exact(&mut recv, &mut query).await.is_err() {
            return;
        }

        for response in handler(&query) {
            let mut frame = (response.len() as u16).to_be_bytes().to_vec();
            frame.extend_from_slice(&response);
            if AsyncWriteExt::write_all(&mut send, &frame).await.is_err() {
                return;
            }
        }
        let _ = send.finish();
        let _ = send.stopped().await;
    }
}

impl Drop for MockDoqServer {
    fn drop(&mut self) {
        self.endpoint.close(0u32.into(), b"");
    }
}

/// Offset just past the question section of a single-question message.
pub fn question_end(message: &[u8]) -> Option<usize> {
    let mut pos = 12;
    loop {
        let label_len = *message.get(pos)? as usize;
        pos += 1;
        if label_len == 0 {
            break;
        }
        pos += label_len;
    }
    (pos + 4 <= message.len()).then_some(pos + 4)
}

pub fn query_type(message: &[u8]) -> Option<u16> {
    let end = question_end(message)?;
    Some(u16::from_be_bytes([message[end - 4], message[end - 3]]))
}

/// Response carrying one record for the question: 127.0.0.1 for A, ::1 for
/// AAAA, and an A record for anything else.
pub fn address_response(query: &[u8]) -> Vec<u8> {
    let Some(end) = question_end(query) else {
        return Vec::new();
    };

    let mut response = Vec::with_capacity(end + 32);
    response.extend_from_slice(&query[0..2]);
    response.extend_from_slice(&[0x81, 0x80]);
    response.extend_from_slice(&[0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00]);
    response.extend_from_slice(&query[12..end]);

    response.extend_from_slice(&[0xC0, 0x0C]);
    if query_type(query) == Some(28) {
        response.extend_from_slice(&[0x00, 0x1C, 0x00, 0x01, 0x00, 0x00, 0x01, 0x2C, 0x00, 0x10]);
        response.extend_from_slice(&[0u8; 15]);
        response.push(0x01);
    } else {
        response.extend_from_slice(&[0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x01, 0x2C, 0x00, 0x04]);
        response.extend_from_slice(&[127, 0, 0, 1]);
    }

    response
}
