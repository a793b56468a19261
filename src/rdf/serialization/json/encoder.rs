//! RDF/JSON encoder
//!
//! Accumulates statements grouped by subject and predicate and emits the
//! document once, when the encoder is finished.

use super::config::EncoderConfig;
use super::term::{object_to_json, predicate_key, subject_key};
use crate::rdf::serialization::{SerializeError, SerializeResult};
use crate::rdf::{RdfObject, RdfPredicate, RdfSubject, Triple, TripleSink};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::io::Write;
use tracing::debug;

/// RDF/JSON encoder
///
/// Subjects and predicates keep first-seen order; objects under a predicate
/// keep insertion order and duplicates are written as given.
#[derive(Debug, Clone, Default)]
pub struct RdfJsonEncoder {
    config: EncoderConfig,
    subjects: IndexMap<String, IndexMap<String, Vec<Value>>>,
    count: usize,
}

impl RdfJsonEncoder {
    /// Create an encoder emitting compact JSON
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with custom configuration
    pub fn with_config(config: EncoderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Add one statement
    pub fn accept(&mut self, triple: &Triple) {
        self.push(&triple.subject, &triple.predicate, &triple.object);
    }

    /// Add one statement given by its parts
    ///
    /// Scalars such as `&str`, `bool` or `i64` are written as plain literals.
    pub fn accept_parts(&mut self, subject: &RdfSubject, predicate: &RdfPredicate, object: impl Into<RdfObject>) {
        self.push(subject, predicate, &object.into());
    }

    fn push(&mut self, subject: &RdfSubject, predicate: &RdfPredicate, object: &RdfObject) {
        self.subjects
            .entry(subject_key(subject))
            .or_default()
            .entry(predicate_key(predicate))
            .or_default()
            .push(object_to_json(object));
        self.count += 1;
    }

    /// Number of statements accepted
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if no statement was accepted
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Build the document
    pub fn finish(self) -> Value {
        debug!(
            statements = self.count,
            subjects = self.subjects.len(),
            "encoding RDF/JSON document"
        );
        let document: Map<String, Value> = self
            .subjects
            .into_iter()
            .map(|(subject, predicates)| {
                let predicates: Map<String, Value> = predicates
                    .into_iter()
                    .map(|(predicate, objects)| (predicate, Value::Array(objects)))
                    .collect();
                (subject, Value::Object(predicates))
            })
            .collect();
        Value::Object(document)
    }

    /// Build the document as JSON text
    pub fn finish_to_string(self) -> SerializeResult<String> {
        let pretty = self.config.pretty;
        let document = self.finish();
        let text = if pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        text.map_err(|e| SerializeError::Serialize(e.to_string()))
    }

    /// Write the document to `writer`, followed by a newline
    pub fn finish_to_writer<W: Write>(self, mut writer: W) -> SerializeResult<()> {
        let pretty = self.config.pretty;
        let document = self.finish();
        let written = if pretty {
            serde_json::to_writer_pretty(&mut writer, &document)
        } else {
            serde_json::to_writer(&mut writer, &document)
        };
        written.map_err(|e| {
            if e.is_io() {
                SerializeError::Io(e.into())
            } else {
                SerializeError::Serialize(e.to_string())
            }
        })?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

impl TripleSink for RdfJsonEncoder {
    fn insert_triple(&mut self, triple: Triple) {
        self.accept(&triple);
    }
}

impl Extend<Triple> for RdfJsonEncoder {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.accept(&triple);
        }
    }
}

impl<'a> Extend<&'a Triple> for RdfJsonEncoder {
    fn extend<I: IntoIterator<Item = &'a Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.accept(triple);
        }
    }
}
