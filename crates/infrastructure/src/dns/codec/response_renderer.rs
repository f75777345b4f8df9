use ferrous_doq_domain::QueryError;
use hickory_proto::op::{Message, MessageType, Metadata};
use hickory_proto::rr::Record;
use std::fmt::Write;
use tracing::debug;

/// Renders a wire-format DNS response as dig-style text.
pub struct ResponseRenderer;

impl ResponseRenderer {
    pub fn render(wire: &[u8]) -> Result<String, QueryError> {
        let message = Message::from_vec(wire).map_err(|e| QueryError::Decode(e.to_string()))?;
        let metadata = &message.metadata;

        // The extended bits from OPT are already merged in by the decoder.
        let rcode = u16::from(metadata.response_code);

        debug!(
            rcode = rcode,
            answers = message.answers.len(),
            authority = message.authorities.len(),
            "DNS response decoded"
        );

        let mut out = String::with_capacity(512);

        let _ = writeln!(
            out,
            ";; ->>HEADER<<- opcode: {}, status: {}, id: {}",
            opcode_name(u8::from(metadata.op_code)),
            rcode_name(rcode),
            metadata.id
        );
        let _ = writeln!(
            out,
            ";; flags: {}; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
            flag_names(metadata).join(" "),
            message.queries.len(),
            message.answers.len(),
            message.authorities.len(),
            message.additionals.len() + usize::from(message.edns.is_some())
        );

        if let Some(edns) = &message.edns {
            let flags = if edns.flags().dnssec_ok { " do" } else { "" };
            let _ = write!(
                out,
                "\n;; OPT PSEUDOSECTION:\n; EDNS: version: {}, flags:{}; udp: {}\n",
                edns.version(),
                flags,
                edns.max_payload()
            );
        }

        if !message.queries.is_empty() {
            out.push_str("\n;; QUESTION SECTION:\n");
            for query in &message.queries {
                let _ = writeln!(
                    out,
                    ";{}\t\t{}\t{}",
                    query.name(),
                    query.query_class(),
                    query.query_type()
                );
            }
        }

        render_section(&mut out, "ANSWER", &message.answers);
        render_section(&mut out, "AUTHORITY", &message.authorities);
        render_section(&mut out, "ADDITIONAL", &message.additionals);

        Ok(out.trim_end().to_string())
    }
}

/// Set header flags in presentation order.
fn flag_names(metadata: &Metadata) -> Vec<&'static str> {
    [
        (metadata.message_type == MessageType::Response, "qr"),
        (metadata.authoritative, "aa"),
        (metadata.truncation, "tc"),
        (metadata.recursion_desired, "rd"),
        (metadata.recursion_available, "ra"),
        (metadata.authentic_data, "ad"),
        (metadata.checking_disabled, "cd"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect()
}

fn render_section(out: &mut String, title: &str, records: &[Record]) {
    if records.is_empty() {
        return;
    }
    let _ = write!(out, "\n;; {} SECTION:\n", title);
    for record in records {
        let _ = writeln!(out, "{}", record);
    }
}

fn opcode_name(opcode: u8) -> String {
    match opcode {
        0 => "QUERY".to_string(),
        1 => "IQUERY".to_string(),
        2 => "STATUS".to_string(),
        4 => "NOTIFY".to_string(),
        5 => "UPDATE".to_string(),
        other => format!("OPCODE{}", other),
    }
}

fn rcode_name(rcode: u16) -> String {
    let name = match rcode {
        0 => "NOERROR",
        1 => "FORMERR",
        2 => "SERVFAIL",
        3 => "NXDOMAIN",
        4 => "NOTIMP",
        5 => "REFUSED",
        6 => "YXDOMAIN",
        7 => "YXRRSET",
        8 => "NXRRSET",
        9 => "NOTAUTH",
        10 => "NOTZONE",
        16 => "BADVERS",
        23 => "BADCOOKIE",
        other => return format!("RCODE{}", other),
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a_response(rcode: u8) -> Vec<u8> {
        let mut buf = vec![
            0x00, 0x00, 0x81, 0x80 | rcode, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
        ];
        buf.extend_from_slice(b"\x07example\x03com\x00\x00\x01\x00\x01");
        buf.extend_from_slice(&[
            0xC0, 0x0C, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x01, 0x2C, 0x00, 0x04, 93, 184, 216,
            34,
        ]);
        buf.extend_from_slice(&[0x00, 0x00, 0x29, 0x10, 0x00, 0x00, 0x00, 0x80, 0x00, 0x00, 0x00]);
        buf
    }

    #[test]
    fn test_renders_header_and_answer() {
        let text = ResponseRenderer::render(&a_response(0)).unwrap();

        assert!(text.starts_with(";; ->>HEADER<<- opcode: QUERY, status: NOERROR, id: 0"));
        assert!(text.contains(";; flags: qr rd ra; QUERY: 1, ANSWER: 1, AUTHORITY: 0, ADDITIONAL: 1"));
        assert!(text.contains("; EDNS: version: 0, flags: do; udp: 4096"));
        assert!(text.contains(";; QUESTION SECTION:\n;example.com."));
        assert!(text.contains(";; ANSWER SECTION:"));
        assert!(text.contains("93.184.216.34"));
        assert!(!text.contains("AUTHORITY SECTION"));
    }

    #[test]
    fn test_extended_rcode_combines_with_header() {
        // BADVERS: header rcode 0, OPT extended rcode 1
        let mut wire = a_response(0);
        let opt_ttl = wire.len() - 6;
        wire[opt_ttl] = 0x01;

        let text = ResponseRenderer::render(&wire).unwrap();
        assert!(text.contains("status: BADVERS"));
    }

    #[test]
    fn test_nxdomain_status() {
        let text = ResponseRenderer::render(&a_response(3)).unwrap();
        assert!(text.contains("status: NXDOMAIN"));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = ResponseRenderer::render(&[0x00, 0x01, 0x02]).unwrap_err();
        assert!(matches!(err, QueryError::Decode(_)));

        let mut truncated = a_response(0);
        truncated.truncate(30);
        assert!(matches!(
            ResponseRenderer::render(&truncated),
            Err(QueryError::Decode(_))
        ));
    }

    #[test]
    fn test_unassigned_codes() {
        assert_eq!(rcode_name(12), "RCODE12");
        assert_eq!(opcode_name(9), "OPCODE9");
    }
}
