//! RDF serialization formats
//!
//! Supports:
//! - RDF/JSON (RJ, `application/rdf+json`)
//! - N-Triples (NT)
//! - Turtle (TTL)

pub mod json;
mod turtle;

pub use turtle::{NTriplesParserWrapper, NTriplesSerializerWrapper, TurtleParserWrapper, TurtleSerializerWrapper};

use super::{Graph, Triple};
use json::{DecoderConfig, EncoderConfig, RdfJsonDecoder, RdfJsonEncoder};
use std::path::Path;
use thiserror::Error;

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdfFormat {
    /// RDF/JSON format (.rj, .json)
    RdfJson,
    /// N-Triples format (.nt)
    NTriples,
    /// Turtle format (.ttl)
    Turtle,
}

impl RdfFormat {
    /// Every supported format
    pub const ALL: [RdfFormat; 3] = [RdfFormat::RdfJson, RdfFormat::NTriples, RdfFormat::Turtle];

    /// Short, human readable name
    pub fn name(self) -> &'static str {
        match self {
            RdfFormat::RdfJson => "RDF/JSON",
            RdfFormat::NTriples => "N-Triples",
            RdfFormat::Turtle => "Turtle",
        }
    }

    /// Registered content types, preferred first
    ///
    /// `application/json` is the legacy RDF/JSON registration.
    pub fn content_types(self) -> &'static [&'static str] {
        match self {
            RdfFormat::RdfJson => &["application/rdf+json", "application/json"],
            RdfFormat::NTriples => &["application/n-triples"],
            RdfFormat::Turtle => &["text/turtle"],
        }
    }

    /// Registered file extensions, preferred first
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            RdfFormat::RdfJson => &["rj", "json"],
            RdfFormat::NTriples => &["nt"],
            RdfFormat::Turtle => &["ttl"],
        }
    }

    /// Look a format up by content type, ignoring parameters and case
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type.split(';').next().unwrap_or("").trim();
        Self::ALL.into_iter().find(|format| {
            format
                .content_types()
                .iter()
                .any(|ct| ct.eq_ignore_ascii_case(essence))
        })
    }

    /// Look a format up by file extension (without the dot)
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim_start_matches('.');
        Self::ALL.into_iter().find(|format| {
            format
                .extensions()
                .iter()
                .any(|ext| ext.eq_ignore_ascii_case(extension))
        })
    }

    /// Look a format up from a file path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl std::fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or its top level is not an object
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A term object is missing `type`/`value` or has an unknown `type`
    #[error("Malformed term: {0}")]
    MalformedTerm(String),

    /// A lexical form does not satisfy its datatype or IRI syntax
    #[error("Validation failure: {0}")]
    ValidationFailure(String),

    /// A lenient, validating decode skipped one or more statements
    #[error("Decode had errors: {count} statement(s) skipped")]
    DecodeHadErrors {
        /// Number of recorded per-statement errors
        count: usize,
    },

    /// Parse error from a non-JSON format
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse RDF data from a string
    pub fn parse(input: &str, format: RdfFormat) -> ParseResult<Vec<Triple>> {
        Self::parse_with(input, format, &DecoderConfig::default())
    }

    /// Parse RDF data from a string, with decoder options for RDF/JSON
    pub fn parse_with(input: &str, format: RdfFormat, config: &DecoderConfig) -> ParseResult<Vec<Triple>> {
        match format {
            RdfFormat::RdfJson => RdfJsonDecoder::with_config(config.clone()).decode_all(input),
            RdfFormat::NTriples => NTriplesParserWrapper::parse(input),
            RdfFormat::Turtle => TurtleParserWrapper::parse(input),
        }
    }

    /// Parse RDF data from a file, picking the format from its extension
    pub fn parse_file(path: &Path) -> ParseResult<Vec<Triple>> {
        Self::parse_file_with(path, &DecoderConfig::default())
    }

    /// Parse RDF data from a file with decoder options
    pub fn parse_file_with(path: &Path, config: &DecoderConfig) -> ParseResult<Vec<Triple>> {
        let format = RdfFormat::from_path(path)
            .ok_or_else(|| ParseError::UnsupportedFormat(path.display().to_string()))?;
        let input = std::fs::read_to_string(path)?;
        Self::parse_with(&input, format, config)
    }
}

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize triples to a string
    pub fn serialize(triples: &[Triple], format: RdfFormat) -> SerializeResult<String> {
        Self::serialize_with(triples, format, &EncoderConfig::default())
    }

    /// Serialize triples to a string, with encoder options for RDF/JSON
    pub fn serialize_with(
        triples: &[Triple],
        format: RdfFormat,
        config: &EncoderConfig,
    ) -> SerializeResult<String> {
        match format {
            RdfFormat::RdfJson => {
                let mut encoder = RdfJsonEncoder::with_config(config.clone());
                encoder.extend(triples.iter().cloned());
                encoder.finish_to_string()
            }
            RdfFormat::NTriples => NTriplesSerializerWrapper::serialize(triples),
            RdfFormat::Turtle => TurtleSerializerWrapper::serialize(triples),
        }
    }

    /// Serialize a graph to a string
    pub fn serialize_graph(graph: &Graph, format: RdfFormat) -> SerializeResult<String> {
        Self::serialize(graph.triples(), format)
    }

    /// Serialize triples to a file, picking the format from its extension
    pub fn serialize_file(triples: &[Triple], path: &Path) -> SerializeResult<()> {
        let format = RdfFormat::from_path(path)
            .ok_or_else(|| SerializeError::UnsupportedFormat(path.display().to_string()))?;
        let output = Self::serialize(triples, format)?;
        std::fs::write(path, output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_registry() {
        assert_eq!(RdfFormat::from_content_type("application/rdf+json"), Some(RdfFormat::RdfJson));
        assert_eq!(RdfFormat::from_content_type("application/json"), Some(RdfFormat::RdfJson));
        assert_eq!(
            RdfFormat::from_content_type("Application/JSON; charset=utf-8"),
            Some(RdfFormat::RdfJson)
        );
        assert_eq!(RdfFormat::from_content_type("text/turtle"), Some(RdfFormat::Turtle));
        assert_eq!(RdfFormat::from_content_type("text/html"), None);

        assert_eq!(RdfFormat::from_extension("rj"), Some(RdfFormat::RdfJson));
        assert_eq!(RdfFormat::from_extension(".json"), Some(RdfFormat::RdfJson));
        assert_eq!(RdfFormat::from_extension("nt"), Some(RdfFormat::NTriples));
        assert_eq!(RdfFormat::from_path(Path::new("etc/doap.json")), Some(RdfFormat::RdfJson));
        assert_eq!(RdfFormat::from_path(Path::new("etc/doap")), None);
    }

    #[test]
    fn test_parse_dispatch() {
        let input = r#"{"http://example.org/a":{"http://example.org/b":[{"type":"literal","value":"c"}]}}"#;
        let triples = RdfParser::parse(input, RdfFormat::RdfJson).unwrap();
        assert_eq!(triples.len(), 1);

        let nt = RdfSerializer::serialize(&triples, RdfFormat::NTriples).unwrap();
        let back = RdfParser::parse(&nt, RdfFormat::NTriples).unwrap();
        assert_eq!(triples, back);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.rj");

        let input = r#"{"_:a":{"http://example.org/knows":[{"type":"bnode","value":"_:b"}]}}"#;
        let triples = RdfParser::parse(input, RdfFormat::RdfJson).unwrap();
        RdfSerializer::serialize_file(&triples, &path).unwrap();

        let back = RdfParser::parse_file(&path).unwrap();
        assert_eq!(triples, back);

        let unknown = dir.path().join("graph.xyz");
        assert!(matches!(
            RdfSerializer::serialize_file(&triples, &unknown),
            Err(SerializeError::UnsupportedFormat(_))
        ));
    }
}
