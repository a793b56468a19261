//! Lexical validation and canonicalization hooks
//!
//! IRIs are checked with `oxiri`. Literals are checked against the lexical
//! space of the common XSD datatypes; any other datatype passes through
//! untouched. Canonicalizing an invalid lexical form leaves it as is.

use crate::rdf::{BlankNode, Literal, LiteralKind, NamedNode};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use oxiri::Iri;
use regex::Regex;
use std::sync::OnceLock;

const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// XSD datatypes with a known lexical space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum XsdKind {
    Boolean,
    /// Integer family, with inclusive bounds; `None` leaves that side open
    Integer { min: Option<i128>, max: Option<i128> },
    Decimal,
    Double,
    Float,
    Date,
    DateTime,
}

impl XsdKind {
    fn integer(min: impl Into<i128>, max: impl Into<i128>) -> Self {
        XsdKind::Integer {
            min: Some(min.into()),
            max: Some(max.into()),
        }
    }

    fn from_iri(datatype: &str) -> Option<Self> {
        let local = datatype.strip_prefix(XSD)?;
        let kind = match local {
            "boolean" => XsdKind::Boolean,
            "integer" => XsdKind::Integer { min: None, max: None },
            "nonPositiveInteger" => XsdKind::Integer { min: None, max: Some(0) },
            "negativeInteger" => XsdKind::Integer { min: None, max: Some(-1) },
            "nonNegativeInteger" => XsdKind::Integer { min: Some(0), max: None },
            "positiveInteger" => XsdKind::Integer { min: Some(1), max: None },
            "long" => XsdKind::integer(i64::MIN, i64::MAX),
            "int" => XsdKind::integer(i32::MIN, i32::MAX),
            "short" => XsdKind::integer(i16::MIN, i16::MAX),
            "byte" => XsdKind::integer(i8::MIN, i8::MAX),
            "unsignedLong" => XsdKind::integer(0, u64::MAX),
            "unsignedInt" => XsdKind::integer(0, u32::MAX),
            "unsignedShort" => XsdKind::integer(0, u16::MAX),
            "unsignedByte" => XsdKind::integer(0, u8::MAX),
            "decimal" => XsdKind::Decimal,
            "double" => XsdKind::Double,
            "float" => XsdKind::Float,
            "date" => XsdKind::Date,
            "dateTime" => XsdKind::DateTime,
            _ => return None,
        };
        Some(kind)
    }

    fn is_valid(self, lexical: &str) -> bool {
        match self {
            XsdKind::Boolean => matches!(lexical, "true" | "false" | "1" | "0"),
            XsdKind::Integer { min, max } => {
                integer_re().is_match(lexical) && integer_in_range(lexical, min, max)
            }
            XsdKind::Decimal => decimal_re().is_match(lexical),
            XsdKind::Double | XsdKind::Float => double_re().is_match(lexical),
            XsdKind::Date => date_re().is_match(lexical) && parse_date(lexical).is_some(),
            XsdKind::DateTime => {
                date_time_re().is_match(lexical) && parse_date_time(lexical).is_some()
            }
        }
    }

    fn canonical(self, lexical: &str) -> Option<String> {
        if !self.is_valid(lexical) {
            return None;
        }
        match self {
            XsdKind::Boolean => Some(
                match lexical {
                    "1" | "true" => "true",
                    _ => "false",
                }
                .to_string(),
            ),
            XsdKind::Integer { .. } => Some(canonical_integer(lexical)),
            XsdKind::Decimal => Some(canonical_decimal(lexical)),
            XsdKind::Double => canonical_double(lexical, false),
            XsdKind::Float => canonical_double(lexical, true),
            XsdKind::Date => canonical_date(lexical),
            XsdKind::DateTime => canonical_date_time(lexical),
        }
    }
}

fn integer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?[0-9]+$").expect("valid regex"))
}

fn decimal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").expect("valid regex"))
}

fn double_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?|[+-]?INF|NaN)$")
            .expect("valid regex")
    })
}

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^-?[0-9]{4,}-[0-9]{2}-[0-9]{2}(Z|[+-][0-9]{2}:[0-9]{2})?$").expect("valid regex")
    })
}

fn date_time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^-?[0-9]{4,}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?(Z|[+-][0-9]{2}:[0-9]{2})?$",
        )
        .expect("valid regex")
    })
}

/// Split a trailing `Z` / `±hh:mm` off a date or dateTime
///
/// Returns the local part, the raw zone text, and its offset in seconds.
fn split_timezone(lexical: &str) -> (&str, Option<(&str, i64)>) {
    if let Some(local) = lexical.strip_suffix('Z') {
        return (local, Some(("Z", 0)));
    }
    let bytes = lexical.as_bytes();
    if bytes.len() > 6 && bytes[bytes.len() - 3] == b':' {
        let sign_at = bytes.len() - 6;
        let sign = match bytes[sign_at] {
            b'+' => 1,
            b'-' => -1,
            _ => return (lexical, None),
        };
        let zone = &lexical[sign_at..];
        let hours: i64 = zone[1..3].parse().unwrap_or(0);
        let minutes: i64 = zone[4..6].parse().unwrap_or(0);
        return (&lexical[..sign_at], Some((zone, sign * (hours * 3600 + minutes * 60))));
    }
    (lexical, None)
}

fn parse_date(lexical: &str) -> Option<NaiveDate> {
    let (local, _) = split_timezone(lexical);
    NaiveDate::parse_from_str(local, "%Y-%m-%d").ok()
}

fn parse_date_time(lexical: &str) -> Option<NaiveDateTime> {
    let (local, _) = split_timezone(lexical);
    NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

// Values beyond i128 can only sit on an open side of the range
fn integer_in_range(lexical: &str, min: Option<i128>, max: Option<i128>) -> bool {
    match lexical.parse::<i128>() {
        Ok(value) => min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max),
        Err(_) => {
            let (negative, _) = split_sign(lexical);
            if negative {
                min.is_none()
            } else {
                max.is_none()
            }
        }
    }
}

fn canonical_integer(lexical: &str) -> String {
    let (negative, digits) = split_sign(lexical);
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        "0".to_string()
    } else if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    }
}

fn canonical_decimal(lexical: &str) -> String {
    let (negative, unsigned) = split_sign(lexical);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let int_part = int_part.trim_start_matches('0');
    let frac_part = frac_part.trim_end_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let frac_part = if frac_part.is_empty() { "0" } else { frac_part };
    if negative && !(int_part == "0" && frac_part == "0") {
        format!("-{int_part}.{frac_part}")
    } else {
        format!("{int_part}.{frac_part}")
    }
}

fn canonical_double(lexical: &str, single: bool) -> Option<String> {
    match lexical {
        "INF" | "+INF" => return Some("INF".to_string()),
        "-INF" => return Some("-INF".to_string()),
        "NaN" => return Some("NaN".to_string()),
        _ => {}
    }
    let scientific = if single {
        format!("{:E}", lexical.parse::<f32>().ok()?)
    } else {
        format!("{:E}", lexical.parse::<f64>().ok()?)
    };
    // `{:E}` yields `1E2` / `1.5E-1`; the canonical mantissa always has a fraction
    let (mantissa, exponent) = scientific.split_once('E')?;
    if mantissa.contains('.') {
        Some(format!("{mantissa}E{exponent}"))
    } else {
        Some(format!("{mantissa}.0E{exponent}"))
    }
}

fn canonical_date(lexical: &str) -> Option<String> {
    let (local, zone) = split_timezone(lexical);
    Some(match zone {
        Some((_, 0)) => format!("{local}Z"),
        Some((zone, _)) => format!("{local}{zone}"),
        None => local.to_string(),
    })
}

fn canonical_date_time(lexical: &str) -> Option<String> {
    let (_, zone) = split_timezone(lexical);
    let local = parse_date_time(lexical)?;
    match zone {
        None => Some(format_date_time(&local)),
        Some((_, offset)) => {
            let utc = local.checked_sub_signed(chrono::Duration::seconds(offset))?;
            Some(format!("{}Z", format_date_time(&utc)))
        }
    }
}

fn format_date_time(value: &NaiveDateTime) -> String {
    let base = value.format("%Y-%m-%dT%H:%M:%S").to_string();
    let nanos = value.nanosecond();
    if nanos == 0 {
        return base;
    }
    let fraction = format!("{nanos:09}");
    format!("{base}.{}", fraction.trim_end_matches('0'))
}

fn split_sign(lexical: &str) -> (bool, &str) {
    if let Some(rest) = lexical.strip_prefix('-') {
        (true, rest)
    } else {
        (false, lexical.strip_prefix('+').unwrap_or(lexical))
    }
}

/// Check IRI syntax
pub fn validate_iri(iri: &str) -> Result<(), String> {
    Iri::parse(iri).map(|_| ()).map_err(|e| format!("<{iri}>: {e}"))
}

/// Canonical textual form of an IRI, `None` when it does not parse
///
/// Lowercases scheme and host, drops the scheme's default port and gives an
/// empty path below an authority a single `/`.
pub fn canonicalize_iri(iri: &str) -> Option<String> {
    let parsed = Iri::parse(iri).ok()?;
    let scheme = parsed.scheme().to_ascii_lowercase();

    let mut out = String::with_capacity(iri.len());
    out.push_str(&scheme);
    out.push(':');
    match parsed.authority() {
        Some(authority) => {
            out.push_str("//");
            out.push_str(&canonical_authority(&scheme, authority));
            if parsed.path().is_empty() {
                out.push('/');
            } else {
                out.push_str(parsed.path());
            }
        }
        None => out.push_str(parsed.path()),
    }
    if let Some(query) = parsed.query() {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = parsed.fragment() {
        out.push('#');
        out.push_str(fragment);
    }
    Some(out)
}

fn canonical_authority(scheme: &str, authority: &str) -> String {
    let (userinfo, host_port) = match authority.rsplit_once('@') {
        Some((userinfo, host_port)) => (Some(userinfo), host_port),
        None => (None, authority),
    };
    // the port separator is the last ':' outside an IPv6 literal
    let (host, port) = match host_port.rfind(':') {
        Some(i) if !host_port[i..].contains(']') => (&host_port[..i], Some(&host_port[i + 1..])),
        _ => (host_port, None),
    };
    let default_port = match scheme {
        "http" => Some("80"),
        "https" => Some("443"),
        "ftp" => Some("21"),
        _ => None,
    };

    let mut out = String::with_capacity(authority.len());
    if let Some(userinfo) = userinfo {
        out.push_str(userinfo);
        out.push('@');
    }
    out.push_str(&host.to_ascii_lowercase());
    match port {
        Some("") | None => {}
        Some(port) if Some(port) == default_port => {}
        Some(port) => {
            out.push(':');
            out.push_str(port);
        }
    }
    out
}

/// Check that a blank node label is a Turtle `BLANK_NODE_LABEL`
pub fn validate_blank_node_label(label: &str) -> Result<(), String> {
    BlankNode::with_label(label)
        .map(|_| ())
        .map_err(|_| format!("\"_:{label}\" is not a valid blank node label"))
}

/// Check a literal's lexical form against its datatype or language tag
pub fn validate_literal(literal: &Literal) -> Result<(), String> {
    match literal.kind() {
        LiteralKind::Plain => Ok(()),
        LiteralKind::LanguageTagged(tag) => {
            Literal::new_language_tagged_literal(literal.value(), tag)
                .map(|_| ())
                .map_err(|_| format!("{tag:?} is not a valid language tag"))
        }
        LiteralKind::Typed(datatype) => match XsdKind::from_iri(datatype) {
            Some(kind) if !kind.is_valid(literal.value()) => Err(format!(
                "{:?} is not a valid lexical form for <{}>",
                literal.value(),
                datatype
            )),
            _ => Ok(()),
        },
    }
}

/// Rewrite a literal to the canonical lexical form for its datatype
pub fn canonicalize_literal(literal: Literal) -> Literal {
    let replacement = match literal.kind() {
        LiteralKind::Plain => None,
        LiteralKind::LanguageTagged(tag) if tag.bytes().any(|b| b.is_ascii_uppercase()) => Some(
            Literal::new_language_tagged_literal_unchecked(literal.value(), tag.to_ascii_lowercase()),
        ),
        LiteralKind::LanguageTagged(_) => None,
        LiteralKind::Typed(datatype) => XsdKind::from_iri(datatype)
            .and_then(|kind| kind.canonical(literal.value()))
            .filter(|canonical| canonical != literal.value())
            .map(|canonical| {
                Literal::new_typed_literal(canonical, NamedNode::new_unchecked(datatype))
            }),
    };
    replacement.unwrap_or(literal)
}
