use crate::{DnsQuery, DomainError, RecordType};

/// Queries accepted from the command line, plus the pairs that were
/// recognised but cannot be sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPlan {
    pub queries: Vec<DnsQuery>,
    pub skipped: Vec<SkippedQuery>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedQuery {
    pub domain: String,
    pub qtype: String,
}

impl SkippedQuery {
    pub fn warning(&self) -> String {
        format!("skipping unsupported qtype: {}", self.qtype)
    }
}

impl QueryPlan {
    /// Parses alternating `<qname> <qtype>` tokens.
    ///
    /// An empty or odd token list is a usage error and an unknown type
    /// mnemonic aborts the whole plan. IXFR needs a serial number that this
    /// client has no way to take, so it is set aside in `skipped` instead.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, DomainError> {
        if args.is_empty() || args.len() % 2 != 0 {
            return Err(DomainError::Usage(format!(
                "expected (<qname> <qtype>) pairs, got {} argument(s)",
                args.len()
            )));
        }

        let mut plan = QueryPlan::default();

        for pair in args.chunks_exact(2) {
            let name = pair[0].as_ref();
            let qtype = pair[1].as_ref();

            let record_type: RecordType = qtype
                .parse()
                .map_err(|_| DomainError::InvalidQueryType(qtype.to_string()))?;

            if record_type == RecordType::IXFR {
                plan.skipped.push(SkippedQuery {
                    domain: name.to_string(),
                    qtype: qtype.to_string(),
                });
                continue;
            }

            plan.queries.push(DnsQuery::new(name, record_type));
        }

        Ok(plan)
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
