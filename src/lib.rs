//! RDF/JSON codec
//!
//! Reads and writes RDF graphs in the RDF/JSON format (`application/rdf+json`),
//! and converts them to and from N-Triples and Turtle.
//!
//! ## Example Usage
//!
//! ```rust
//! use rdfjson::rdf::serialization::json::{RdfJsonDecoder, RdfJsonEncoder};
//!
//! let input = r#"{
//!   "http://example.org/about": {
//!     "http://purl.org/dc/terms/title": [
//!       {"value": "Anna's Homepage", "type": "literal", "lang": "en"}
//!     ]
//!   }
//! }"#;
//!
//! let triples = RdfJsonDecoder::new().decode_all(input).unwrap();
//! assert_eq!(triples.len(), 1);
//!
//! let mut encoder = RdfJsonEncoder::new();
//! encoder.extend(&triples);
//! let output = encoder.finish_to_string().unwrap();
//! assert!(output.starts_with("{\"http://example.org/about\""));
//! ```

pub mod rdf;

pub use rdf::serialization::json::{
    CodecConfig, DecoderConfig, EncoderConfig, RdfJsonDecoder, RdfJsonEncoder,
};
pub use rdf::{
    Graph, ParseError, RdfFormat, RdfParser, RdfSerializer, SerializeError, Triple, TripleSink,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
