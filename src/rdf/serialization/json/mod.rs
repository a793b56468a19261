//! RDF/JSON (`application/rdf+json`)
//!
//! A document is a two-level JSON object keyed by subject, then predicate:
//!
//! ```json
//! {
//!   "http://example.org/about": {
//!     "http://purl.org/dc/terms/title": [
//!       {"value": "Anna's Homepage", "type": "literal", "lang": "en"}
//!     ]
//!   }
//! }
//! ```
//!
//! Decoding yields a lazy stream of [`Triple`]s; encoding groups statements
//! by subject and predicate and writes the document in one go.

mod config;
mod decoder;
mod encoder;
pub mod lexical;
pub mod term;

pub use config::{CodecConfig, ConfigError, ConfigResult, DecoderConfig, EncoderConfig};
pub use decoder::{BlankNodeArena, BlankNodeId, RdfJsonDecoder, Statements};
pub use encoder::RdfJsonEncoder;
pub use term::{format_term, object_to_json, triple_to_json};

use crate::rdf::serialization::{ParseResult, SerializeResult};
use crate::rdf::Triple;

/// Decode a document with default options
pub fn decode(input: &str) -> ParseResult<Vec<Triple>> {
    RdfJsonDecoder::new().decode_all(input)
}

/// Encode triples into a document value
pub fn encode_triples<'a, I>(triples: I) -> serde_json::Value
where
    I: IntoIterator<Item = &'a Triple>,
{
    let mut encoder = RdfJsonEncoder::new();
    encoder.extend(triples);
    encoder.finish()
}

/// Encode triples into JSON text
pub fn to_string(triples: &[Triple], config: &EncoderConfig) -> SerializeResult<String> {
    let mut encoder = RdfJsonEncoder::with_config(config.clone());
    encoder.extend(triples);
    encoder.finish_to_string()
}
