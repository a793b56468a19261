//! RDF data model and serialization
//!
//! This module implements:
//! - RDF terms and triples (subject-predicate-object)
//! - An ordered in-memory graph and the `TripleSink` seam
//! - RDF serialization formats (RDF/JSON, N-Triples, Turtle)
//!
//! # Example
//!
//! ```rust
//! use rdfjson::rdf::{Graph, Literal, NamedNode, RdfFormat, RdfPredicate, RdfSerializer, Triple};
//!
//! let subject = NamedNode::new("http://example.org/about").unwrap();
//! let predicate = RdfPredicate::new("http://purl.org/dc/terms/title").unwrap();
//! let object = Literal::new_language_tagged_literal("Anna's Homepage", "en").unwrap();
//!
//! let mut graph = Graph::new();
//! graph.add(Triple::new(subject.into(), predicate, object.into()));
//!
//! let json = RdfSerializer::serialize_graph(&graph, RdfFormat::RdfJson).unwrap();
//! assert!(json.contains("\"lang\":\"en\""));
//! ```

mod graph;
pub mod serialization;
mod types;

pub use types::{
    BlankNode, Literal, LiteralKind, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult,
    RdfSubject, Triple,
};

pub use graph::{Graph, TripleSink};

pub use serialization::{
    ParseError, ParseResult, RdfFormat, RdfParser, RdfSerializer, SerializeError,
    SerializeResult,
};
