use std::fmt;
use std::str::FromStr;

/// Query and record types by IANA code. Every assigned mnemonic has a
/// variant; anything else is carried as [`RecordType::Unknown`].
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    NS,
    MD,
    MF,
    CNAME,
    SOA,
    MB,
    MG,
    MR,
    NULL,
    WKS,
    PTR,
    HINFO,
    MINFO,
    MX,
    TXT,
    RP,
    AFSDB,
    X25,
    ISDN,
    RT,
    NSAP,
    NSAPPTR,
    SIG,
    KEY,
    PX,
    GPOS,
    AAAA,
    LOC,
    NXT,
    EID,
    NIMLOC,
    SRV,
    ATMA,
    NAPTR,
    KX,
    CERT,
    A6,
    DNAME,
    SINK,
    OPT,
    APL,
    DS,
    SSHFP,
    IPSECKEY,
    RRSIG,
    NSEC,
    DNSKEY,
    DHCID,
    NSEC3,
    NSEC3PARAM,
    TLSA,
    SMIMEA,
    HIP,
    NINFO,
    RKEY,
    TALINK,
    CDS,
    CDNSKEY,
    OPENPGPKEY,
    CSYNC,
    ZONEMD,
    SVCB,
    HTTPS,
    DSYNC,
    SPF,
    UINFO,
    UID,
    GID,
    UNSPEC,
    NID,
    L32,
    L64,
    LP,
    EUI48,
    EUI64,
    TKEY,
    TSIG,
    IXFR,
    AXFR,
    MAILB,
    MAILA,
    ANY,
    URI,
    CAA,
    AVC,
    DOA,
    AMTRELAY,
    RESINFO,
    TA,
    DLV,

    Unknown(u16),
}

const NAMED: &[(RecordType, &str, u16)] = &[
    (RecordType::A, "A", 1),
    (RecordType::NS, "NS", 2),
    (RecordType::MD, "MD", 3),
    (RecordType::MF, "MF", 4),
    (RecordType::CNAME, "CNAME", 5),
    (RecordType::SOA, "SOA", 6),
    (RecordType::MB, "MB", 7),
    (RecordType::MG, "MG", 8),
    (RecordType::MR, "MR", 9),
    (RecordType::NULL, "NULL", 10),
    (RecordType::WKS, "WKS", 11),
    (RecordType::PTR, "PTR", 12),
    (RecordType::HINFO, "HINFO", 13),
    (RecordType::MINFO, "MINFO", 14),
    (RecordType::MX, "MX", 15),
    (RecordType::TXT, "TXT", 16),
    (RecordType::RP, "RP", 17),
    (RecordType::AFSDB, "AFSDB", 18),
    (RecordType::X25, "X25", 19),
    (RecordType::ISDN, "ISDN", 20),
    (RecordType::RT, "RT", 21),
    (RecordType::NSAP, "NSAP", 22),
    (RecordType::NSAPPTR, "NSAP-PTR", 23),
    (RecordType::SIG, "SIG", 24),
    (RecordType::KEY, "KEY", 25),
    (RecordType::PX, "PX", 26),
    (RecordType::GPOS, "GPOS", 27),
    (RecordType::AAAA, "AAAA", 28),
    (RecordType::LOC, "LOC", 29),
    (RecordType::NXT, "NXT", 30),
    (RecordType::EID, "EID", 31),
    (RecordType::NIMLOC, "NIMLOC", 32),
    (RecordType::SRV, "SRV", 33),
    (RecordType::ATMA, "ATMA", 34),
    (RecordType::NAPTR, "NAPTR", 35),
    (RecordType::KX, "KX", 36),
    (RecordType::CERT, "CERT", 37),
    (RecordType::A6, "A6", 38),
    (RecordType::DNAME, "DNAME", 39),
    (RecordType::SINK, "SINK", 40),
    (RecordType::OPT, "OPT", 41),
    (RecordType::APL, "APL", 42),
    (RecordType::DS, "DS", 43),
    (RecordType::SSHFP, "SSHFP", 44),
    (RecordType::IPSECKEY, "IPSECKEY", 45),
    (RecordType::RRSIG, "RRSIG", 46),
    (RecordType::NSEC, "NSEC", 47),
    (RecordType::DNSKEY, "DNSKEY", 48),
    (RecordType::DHCID, "DHCID", 49),
    (RecordType::NSEC3, "NSEC3", 50),
    (RecordType::NSEC3PARAM, "NSEC3PARAM", 51),
    (RecordType::TLSA, "TLSA", 52),
    (RecordType::SMIMEA, "SMIMEA", 53),
    (RecordType::HIP, "HIP", 55),
    (RecordType::NINFO, "NINFO", 56),
    (RecordType::RKEY, "RKEY", 57),
    (RecordType::TALINK, "TALINK", 58),
    (RecordType::CDS, "CDS", 59),
    (RecordType::CDNSKEY, "CDNSKEY", 60),
    (RecordType::OPENPGPKEY, "OPENPGPKEY", 61),
    (RecordType::CSYNC, "CSYNC", 62),
    (RecordType::ZONEMD, "ZONEMD", 63),
    (RecordType::SVCB, "SVCB", 64),
    (RecordType::HTTPS, "HTTPS", 65),
    (RecordType::DSYNC, "DSYNC", 66),
    (RecordType::SPF, "SPF", 99),
    (RecordType::UINFO, "UINFO", 100),
    (RecordType::UID, "UID", 101),
    (RecordType::GID, "GID", 102),
    (RecordType::UNSPEC, "UNSPEC", 103),
    (RecordType::NID, "NID", 104),
    (RecordType::L32, "L32", 105),
    (RecordType::L64, "L64", 106),
    (RecordType::LP, "LP", 107),
    (RecordType::EUI48, "EUI48", 108),
    (RecordType::EUI64, "EUI64", 109),
    (RecordType::TKEY, "TKEY", 249),
    (RecordType::TSIG, "TSIG", 250),
    (RecordType::IXFR, "IXFR", 251),
    (RecordType::AXFR, "AXFR", 252),
    (RecordType::MAILB, "MAILB", 253),
    (RecordType::MAILA, "MAILA", 254),
    (RecordType::ANY, "ANY", 255),
    (RecordType::URI, "URI", 256),
    (RecordType::CAA, "CAA", 257),
    (RecordType::AVC, "AVC", 258),
    (RecordType::DOA, "DOA", 259),
    (RecordType::AMTRELAY, "AMTRELAY", 260),
    (RecordType::RESINFO, "RESINFO", 261),
    (RecordType::TA, "TA", 32768),
    (RecordType::DLV, "DLV", 32769),
];

impl RecordType {
    /// Presentation mnemonic, `None` for types only known by number.
    pub fn mnemonic(&self) -> Option<&'static str> {
        NAMED
            .iter()
            .find(|(rt, _, _)| rt == self)
            .map(|(_, name, _)| *name)
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::Unknown(code) => *code,
            named => NAMED
                .iter()
                .find(|(rt, _, _)| rt == named)
                .map_or(0, |(_, _, code)| *code),
        }
    }

    /// Never fails: codes without a variant become [`RecordType::Unknown`].
    pub fn from_u16(code: u16) -> Self {
        NAMED
            .iter()
            .find(|(_, _, c)| *c == code)
            .map_or(RecordType::Unknown(code), |(rt, _, _)| *rt)
    }

    /// Zone transfers may be answered with several messages on one stream.
    pub fn is_zone_transfer(&self) -> bool {
        matches!(self, RecordType::AXFR | RecordType::IXFR)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mnemonic() {
            Some(name) => f.write_str(name),
            None => write!(f, "TYPE{}", self.to_u16()),
        }
    }
}

impl FromStr for RecordType {
    type Err = String;

    /// Accepts mnemonics case-insensitively and the generic `TYPE<n>` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();

        if let Some((found, _, _)) = NAMED.iter().find(|(_, name, _)| *name == upper) {
            return Ok(*found);
        }

        upper
            .strip_prefix("TYPE")
            .and_then(|digits| digits.parse::<u16>().ok())
            .map(RecordType::from_u16)
            .ok_or_else(|| format!("Unknown record type: {}", s))
    }
}
