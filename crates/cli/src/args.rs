use clap::{ArgAction, Parser};
use ferrous_doq_domain::config::server::DEFAULT_SERVER;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line flags. Long flags may be written with one dash or two.
#[derive(Parser, Debug)]
#[command(name = "ferrous-doq")]
#[command(version)]
#[command(about = "Send DNS queries over QUIC (RFC 9250) and print the responses")]
#[command(override_usage = "ferrous-doq [flags] <name> <type> [<name> <type> ...]")]
pub struct Cli {
    /// DNS-over-QUIC server address
    #[arg(long, value_name = "HOST:PORT", default_value = DEFAULT_SERVER)]
    pub server: String,

    /// TLS server name, defaults to the host part of -server
    #[arg(long = "server_name", value_name = "NAME")]
    pub server_name: Option<String>,

    /// Set the DNSSEC OK bit in the EDNS record
    #[arg(
        long,
        value_name = "BOOL",
        value_parser = parse_bool,
        default_value = "true",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub dnssec: bool,

    /// Set the recursion desired flag
    #[arg(
        long,
        value_name = "BOOL",
        value_parser = parse_bool,
        default_value = "true",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub recursion: bool,

    /// Write TLS session keys to this file (NSS key log format)
    #[arg(long = "export_keys_path", value_name = "PATH")]
    pub export_keys_path: Option<PathBuf>,

    /// Connection timeout
    #[arg(long, value_name = "DURATION", value_parser = parse_duration, default_value = "3s")]
    pub timeout: Duration,

    /// How long to wait for response messages once a query is sent
    #[arg(
        long = "read_timeout",
        value_name = "DURATION",
        value_parser = parse_duration,
        default_value = "1s"
    )]
    pub read_timeout: Duration,

    /// PEM bundle of trusted CA certificates; without it the server is not verified
    #[arg(long = "ca_certs", value_name = "PATH")]
    pub ca_certs: Option<PathBuf>,

    /// Client certificate (PEM), used together with -key
    #[arg(long, value_name = "PATH")]
    pub cert: Option<PathBuf>,

    /// Client private key (PEM), used together with -cert
    #[arg(long, value_name = "PATH")]
    pub key: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long = "log_level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Alternating query names and types, e.g. example.com A example.com AAAA
    #[arg(value_name = "NAME TYPE")]
    pub queries: Vec<String>,
}

/// Rewrites single-dash long flags (`-server`) to their double-dash form.
/// Short flags, negative-looking values and everything after `--` are left
/// alone.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;

    for (index, arg) in args.into_iter().enumerate() {
        if index == 0 || passthrough {
            normalized.push(arg);
            continue;
        }

        let rewritten = match arg.to_str() {
            Some("--") => {
                passthrough = true;
                None
            }
            Some(text) if is_single_dash_long_flag(text) => {
                Some(OsString::from(format!("-{}", text)))
            }
            _ => None,
        };

        normalized.push(rewritten.unwrap_or(arg));
    }

    normalized
}

fn is_single_dash_long_flag(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    let name = rest.split('=').next().unwrap_or_default();
    name.len() > 1
        && name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Boolean spellings accepted for `-flag=value`.
pub fn parse_bool(value: &str) -> Result<bool, String> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        other => Err(format!("invalid boolean value {:?}", other)),
    }
}

/// Parses durations such as `300ms`, `1.5s` or `1m30s`. A bare `0` is
/// accepted; any other number needs a unit.
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    if value == "0" {
        return Ok(Duration::ZERO);
    }
    if value.is_empty() {
        return Err("invalid duration \"\"".to_string());
    }

    let invalid = || format!("invalid duration {:?}", value);
    let mut rest = value;
    let mut total_nanos: f64 = 0.0;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(invalid());
        }
        let number: f64 = rest[..number_len].parse().map_err(|_| invalid())?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let nanos_per_unit = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60.0 * 1e9,
            "h" => 3600.0 * 1e9,
            "" => return Err(format!("missing unit in duration {:?}", value)),
            unit => return Err(format!("unknown unit {:?} in duration {:?}", unit, value)),
        };
        rest = &rest[unit_len..];

        total_nanos += number * nanos_per_unit;
    }

    if !total_nanos.is_finite() || total_nanos > u64::MAX as f64 {
        return Err(invalid());
    }
    Ok(Duration::from_nanos(total_nanos.round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let argv = std::iter::once("ferrous-doq")
            .chain(args.iter().copied())
            .map(OsString::from);
        Cli::try_parse_from(normalize_args(argv))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["example.com", "A"]).unwrap();

        assert_eq!(cli.server, "127.0.0.1:853");
        assert!(cli.dnssec);
        assert!(cli.recursion);
        assert_eq!(cli.timeout, Duration::from_secs(3));
        assert_eq!(cli.read_timeout, Duration::from_secs(1));
        assert_eq!(cli.log_level, "warn");
        assert_eq!(cli.queries, vec!["example.com", "A"]);
        assert!(cli.ca_certs.is_none());
    }

    #[test]
    fn test_single_dash_long_flags() {
        let cli = parse(&[
            "-server",
            "dns.example:8853",
            "-ca_certs",
            "/etc/ca.pem",
            "-read_timeout=250ms",
            "example.com",
            "AAAA",
        ])
        .unwrap();

        assert_eq!(cli.server, "dns.example:8853");
        assert_eq!(cli.ca_certs, Some(PathBuf::from("/etc/ca.pem")));
        assert_eq!(cli.read_timeout, Duration::from_millis(250));
        assert_eq!(cli.queries, vec!["example.com", "AAAA"]);
    }

    #[test]
    fn test_bool_flags_need_equals_for_a_value() {
        let cli = parse(&["-dnssec=false", "-recursion", "example.com", "A"]).unwrap();
        assert!(!cli.dnssec);
        assert!(cli.recursion);
        assert_eq!(cli.queries, vec!["example.com", "A"]);

        let cli = parse(&["--recursion=0", "example.com", "A"]).unwrap();
        assert!(!cli.recursion);
    }

    #[test]
    fn test_invalid_duration_is_rejected() {
        assert!(parse(&["-timeout", "soon", "example.com", "A"]).is_err());
    }

    #[test]
    fn test_normalize_leaves_short_flags_and_passthrough() {
        let normalized = normalize_args(
            ["ferrous-doq", "-h", "-server", "--", "-odd"]
                .into_iter()
                .map(OsString::from),
        );
        assert_eq!(normalized, vec!["ferrous-doq", "-h", "--server", "--", "-odd"]);
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
        assert_eq!(parse_duration("1s"), Ok(Duration::from_secs(1)));
        assert_eq!(parse_duration("1.5s"), Ok(Duration::from_millis(1500)));
        assert_eq!(parse_duration("1m30s"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_duration("2h"), Ok(Duration::from_secs(7200)));
        assert_eq!(parse_duration("750us"), Ok(Duration::from_micros(750)));
    }

    #[test]
    fn test_parse_duration_rejects_bad_input() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("3").is_err());
        assert!(parse_duration("-1s").is_err());
        assert!(parse_duration("5d").is_err());
        assert!(parse_duration("s").is_err());
    }

    #[test]
    fn test_parse_bool_spellings() {
        assert_eq!(parse_bool("T"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        assert!(parse_bool("yes").is_err());
    }
}
