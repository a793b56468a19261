//! RDF/JSON decoder
//!
//! Turns one JSON document into a lazy stream of triples. The whole document
//! is parsed up front (a syntax error or a non-object top level fails before
//! anything is produced); statements are then built one at a time while the
//! iterator is driven.

use super::config::DecoderConfig;
use super::lexical;
use super::term::{TermType, BNODE_PREFIX, DATATYPE_KEY, LANG_KEY, TYPE_KEY, VALUE_KEY};
use crate::rdf::serialization::{ParseError, ParseResult};
use crate::rdf::{BlankNode, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple, TripleSink};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::io::Read;
use std::iter::FusedIterator;
use tracing::{debug, warn};

/// Handle to a blank node allocated in a [`BlankNodeArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlankNodeId(usize);

impl BlankNodeId {
    /// Get the raw index value
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-document blank node table
///
/// Each distinct label is allocated once; every later lookup of the label
/// hands out the same node, so [`BlankNode::same_node`] holds between them.
/// Labels are stored as given, with no syntax checks.
#[derive(Debug, Default)]
pub struct BlankNodeArena {
    nodes: Vec<BlankNode>,
    by_label: HashMap<String, BlankNodeId>,
}

impl BlankNodeArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the node for `label`, or return the one already allocated
    pub fn intern(&mut self, label: &str) -> BlankNodeId {
        if let Some(&id) = self.by_label.get(label) {
            return id;
        }
        let id = BlankNodeId(self.nodes.len());
        self.nodes.push(BlankNode::new_unchecked(label));
        self.by_label.insert(label.to_string(), id);
        id
    }

    /// Get a node by handle
    pub fn get(&self, id: BlankNodeId) -> Option<&BlankNode> {
        self.nodes.get(id.0)
    }

    /// Intern `label` and return a handle-sharing clone of its node
    pub fn resolve(&mut self, label: &str) -> BlankNode {
        let id = self.intern(label);
        self.nodes[id.0].clone()
    }

    /// Number of distinct blank nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no blank node was allocated
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// RDF/JSON decoder
///
/// ```
/// use rdfjson::rdf::serialization::json::RdfJsonDecoder;
///
/// let input = r#"{"_:x": {"http://example.org/p": [{"type": "bnode", "value": "_:x"}]}}"#;
/// let triples = RdfJsonDecoder::new().decode_all(input).unwrap();
///
/// let subject = triples[0].subject.as_blank_node().unwrap();
/// let object = triples[0].object.as_blank_node().unwrap();
/// assert!(subject.same_node(object));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RdfJsonDecoder {
    config: DecoderConfig,
}

impl RdfJsonDecoder {
    /// Create a decoder with default options (strict, no validation)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with custom configuration
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a document from text
    pub fn decode(&self, input: &str) -> ParseResult<Statements> {
        let document: Value =
            serde_json::from_str(input).map_err(|e| ParseError::MalformedDocument(e.to_string()))?;
        self.decode_value(document)
    }

    /// Decode a document read to the end from `reader`
    pub fn decode_reader<R: Read>(&self, reader: R) -> ParseResult<Statements> {
        let document: Value = serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                ParseError::Io(e.into())
            } else {
                ParseError::MalformedDocument(e.to_string())
            }
        })?;
        self.decode_value(document)
    }

    /// Decode an already parsed JSON value
    pub fn decode_value(&self, document: Value) -> ParseResult<Statements> {
        match document {
            Value::Object(subjects) => {
                debug!(subjects = subjects.len(), "decoding RDF/JSON document");
                Ok(Statements::new(self.clone(), subjects))
            }
            other => Err(ParseError::MalformedDocument(format!(
                "expected a JSON object at the top level, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Decode a whole document into a vector
    pub fn decode_all(&self, input: &str) -> ParseResult<Vec<Triple>> {
        self.decode(input)?.collect()
    }

    /// Decode a whole document and append it to `sink`
    ///
    /// Nothing is appended when the decode fails.
    pub fn decode_into<S: TripleSink + ?Sized>(&self, input: &str, sink: &mut S) -> ParseResult<usize> {
        let triples = self.decode_all(input)?;
        let count = triples.len();
        for triple in triples {
            sink.insert_triple(triple);
        }
        Ok(count)
    }

    /// Parse a top-level key into a subject
    pub fn parse_subject(&self, subject: &str, blank_nodes: &mut BlankNodeArena) -> ParseResult<RdfSubject> {
        match subject.strip_prefix(BNODE_PREFIX) {
            Some(label) => Ok(RdfSubject::BlankNode(self.parse_label(label, blank_nodes)?)),
            None => Ok(RdfSubject::NamedNode(self.parse_iri(subject)?)),
        }
    }

    /// Parse a second-level key into a predicate
    ///
    /// Predicates are always IRIs, even when they start with `_:`.
    pub fn parse_predicate(&self, predicate: &str) -> ParseResult<RdfPredicate> {
        Ok(RdfPredicate::from(self.parse_iri(predicate)?))
    }

    /// Parse a term object into an object-position term
    pub fn parse_object(&self, object: &Value, blank_nodes: &mut BlankNodeArena) -> ParseResult<RdfObject> {
        let term = object
            .as_object()
            .ok_or_else(|| ParseError::MalformedTerm(format!("expected a term object, got {object}")))?;

        let term_type = term
            .get(TYPE_KEY)
            .ok_or_else(|| ParseError::MalformedTerm(format!("missing 'type' key in {object}")))?;
        let value = term
            .get(VALUE_KEY)
            .ok_or_else(|| ParseError::MalformedTerm(format!("missing 'value' key in {object}")))?;
        let value = value
            .as_str()
            .ok_or_else(|| ParseError::MalformedTerm(format!("'value' must be a string in {object}")))?;

        match term_type.as_str().map(str::parse::<TermType>) {
            Some(Ok(TermType::Bnode)) => Ok(RdfObject::BlankNode(self.parse_node(value, blank_nodes)?)),
            Some(Ok(TermType::Uri)) => Ok(RdfObject::NamedNode(self.parse_iri(value)?)),
            Some(Ok(TermType::Literal)) => Ok(RdfObject::Literal(self.parse_literal(value, term)?)),
            _ => Err(ParseError::MalformedTerm(format!(
                "expected 'type' to be 'bnode', 'uri', or 'literal', but got {term_type}"
            ))),
        }
    }

    fn parse_node(&self, value: &str, blank_nodes: &mut BlankNodeArena) -> ParseResult<BlankNode> {
        let label = value.strip_prefix(BNODE_PREFIX).ok_or_else(|| {
            ParseError::MalformedTerm(format!("blank node value {value:?} does not start with '_:'"))
        })?;
        self.parse_label(label, blank_nodes)
    }

    fn parse_label(&self, label: &str, blank_nodes: &mut BlankNodeArena) -> ParseResult<BlankNode> {
        if self.config.validate {
            lexical::validate_blank_node_label(label).map_err(ParseError::ValidationFailure)?;
        }
        Ok(blank_nodes.resolve(label))
    }

    fn parse_iri(&self, iri: &str) -> ParseResult<NamedNode> {
        if self.config.validate {
            lexical::validate_iri(iri).map_err(ParseError::ValidationFailure)?;
        }
        if self.config.canonicalize {
            if let Some(canonical) = lexical::canonicalize_iri(iri) {
                return Ok(NamedNode::new_unchecked(canonical));
            }
        }
        Ok(NamedNode::new_unchecked(iri))
    }

    // `datatype` wins when both it and `lang` are given
    fn parse_literal(&self, value: &str, term: &Map<String, Value>) -> ParseResult<Literal> {
        let datatype = optional_str(term, DATATYPE_KEY)?;
        let language = optional_str(term, LANG_KEY)?.filter(|tag| !tag.is_empty());

        let literal = match (datatype, language) {
            (Some(datatype), _) => {
                if self.config.validate {
                    lexical::validate_iri(datatype).map_err(ParseError::ValidationFailure)?;
                }
                Literal::new_typed_literal(value, NamedNode::new_unchecked(datatype))
            }
            (None, Some(tag)) => Literal::new_language_tagged_literal_unchecked(value, tag),
            (None, None) => Literal::new_simple_literal(value),
        };

        if self.config.validate {
            lexical::validate_literal(&literal).map_err(ParseError::ValidationFailure)?;
        }
        if self.config.canonicalize {
            return Ok(lexical::canonicalize_literal(literal));
        }
        Ok(literal)
    }
}

fn optional_str<'a>(term: &'a Map<String, Value>, key: &str) -> ParseResult<Option<&'a str>> {
    match term.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(ParseError::MalformedTerm(format!(
            "'{key}' must be a string, got {other}"
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

struct SubjectCursor {
    subject: RdfSubject,
    predicates: serde_json::map::IntoIter,
    current: Option<PredicateCursor>,
}

struct PredicateCursor {
    predicate: RdfPredicate,
    objects: std::vec::IntoIter<Value>,
}

enum Step {
    Emit(Triple),
    Fail(ParseError),
    Continue,
    End,
}

/// Lazy stream of decoded triples
///
/// In strict mode the first error is yielded and the stream ends. In lenient
/// mode failing statements are skipped and recorded; if validation is on and
/// anything was skipped, the stream ends with [`ParseError::DecodeHadErrors`].
pub struct Statements {
    decoder: RdfJsonDecoder,
    subjects: serde_json::map::IntoIter,
    current: Option<SubjectCursor>,
    blank_nodes: BlankNodeArena,
    predicates: HashMap<String, RdfPredicate>,
    errors: Vec<ParseError>,
    emitted: usize,
    done: bool,
}

impl Statements {
    fn new(decoder: RdfJsonDecoder, subjects: Map<String, Value>) -> Self {
        Self {
            decoder,
            subjects: subjects.into_iter(),
            current: None,
            blank_nodes: BlankNodeArena::new(),
            predicates: HashMap::new(),
            errors: Vec::new(),
            emitted: 0,
            done: false,
        }
    }

    /// Errors recorded so far by a lenient decode
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Blank nodes allocated so far in this pass
    pub fn blank_nodes(&self) -> &BlankNodeArena {
        &self.blank_nodes
    }

    fn step(&mut self) -> Step {
        if let Some(cursor) = self.current.as_mut() {
            if let Some(current) = cursor.current.as_mut() {
                if let Some(value) = current.objects.next() {
                    return match self.decoder.parse_object(&value, &mut self.blank_nodes) {
                        Ok(object) => Step::Emit(Triple::new(
                            cursor.subject.clone(),
                            current.predicate.clone(),
                            object,
                        )),
                        Err(e) => Step::Fail(e),
                    };
                }
                cursor.current = None;
                return Step::Continue;
            }

            let next = cursor.predicates.next();
            return match next {
                Some((key, objects)) => {
                    let predicate = match cached_predicate(&self.decoder, &mut self.predicates, &key) {
                        Ok(predicate) => predicate,
                        Err(e) => return Step::Fail(e),
                    };
                    match objects {
                        Value::Array(items) => {
                            cursor.current = Some(PredicateCursor {
                                predicate,
                                objects: items.into_iter(),
                            });
                            Step::Continue
                        }
                        other => Step::Fail(ParseError::MalformedTerm(format!(
                            "expected an array of term objects for <{key}>, got {}",
                            json_kind(&other)
                        ))),
                    }
                }
                None => {
                    self.current = None;
                    Step::Continue
                }
            };
        }

        match self.subjects.next() {
            Some((key, predicates)) => {
                let subject = match self.decoder.parse_subject(&key, &mut self.blank_nodes) {
                    Ok(subject) => subject,
                    Err(e) => return Step::Fail(e),
                };
                match predicates {
                    Value::Object(map) => {
                        self.current = Some(SubjectCursor {
                            subject,
                            predicates: map.into_iter(),
                            current: None,
                        });
                        Step::Continue
                    }
                    other => Step::Fail(ParseError::MalformedTerm(format!(
                        "expected an object of predicates for {key:?}, got {}",
                        json_kind(&other)
                    ))),
                }
            }
            None => Step::End,
        }
    }

    /// Returns the error to surface, if it is fatal
    fn fail(&mut self, error: ParseError) -> Option<ParseError> {
        if self.decoder.config.strict {
            self.done = true;
            debug!(emitted = self.emitted, error = %error, "RDF/JSON decode aborted");
            return Some(error);
        }
        warn!(error = %error, "skipping RDF/JSON statement");
        self.errors.push(error);
        None
    }

    fn finish(&mut self) -> Option<ParseResult<Triple>> {
        self.done = true;
        debug!(
            emitted = self.emitted,
            blank_nodes = self.blank_nodes.len(),
            errors = self.errors.len(),
            "RDF/JSON decode finished"
        );
        let config = &self.decoder.config;
        if !config.strict && config.validate && !self.errors.is_empty() {
            return Some(Err(ParseError::DecodeHadErrors {
                count: self.errors.len(),
            }));
        }
        None
    }
}

fn cached_predicate(
    decoder: &RdfJsonDecoder,
    cache: &mut HashMap<String, RdfPredicate>,
    key: &str,
) -> ParseResult<RdfPredicate> {
    if let Some(predicate) = cache.get(key) {
        return Ok(predicate.clone());
    }
    let predicate = decoder.parse_predicate(key)?;
    cache.insert(key.to_string(), predicate.clone());
    Ok(predicate)
}

impl Iterator for Statements {
    type Item = ParseResult<Triple>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.step() {
                Step::Emit(triple) => {
                    self.emitted += 1;
                    return Some(Ok(triple));
                }
                Step::Fail(error) => {
                    if let Some(fatal) = self.fail(error) {
                        return Some(Err(fatal));
                    }
                }
                Step::Continue => {}
                Step::End => return self.finish(),
            }
        }
        None
    }
}

impl FusedIterator for Statements {}
