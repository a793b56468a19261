//! Term ↔ JSON mapping shared by the decoder and the encoder
//!
//! Subjects and predicates are bare strings on the wire. Only objects are
//! tagged term objects: `{"type": ..., "value": ..., ["lang" | "datatype"]}`.

use crate::rdf::{BlankNode, LiteralKind, RdfObject, RdfPredicate, RdfSubject, Triple};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Prefix of blank node keys and values
pub const BNODE_PREFIX: &str = "_:";

pub const TYPE_KEY: &str = "type";
pub const VALUE_KEY: &str = "value";
pub const LANG_KEY: &str = "lang";
pub const DATATYPE_KEY: &str = "datatype";

/// The `type` field of a term object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermType {
    Uri,
    Bnode,
    Literal,
}

impl TermType {
    pub fn as_str(self) -> &'static str {
        match self {
            TermType::Uri => "uri",
            TermType::Bnode => "bnode",
            TermType::Literal => "literal",
        }
    }
}

impl FromStr for TermType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uri" => Ok(TermType::Uri),
            "bnode" => Ok(TermType::Bnode),
            "literal" => Ok(TermType::Literal),
            _ => Err(()),
        }
    }
}

/// `_:label`
pub fn blank_node_key(node: &BlankNode) -> String {
    format!("{BNODE_PREFIX}{}", node.as_str())
}

/// Top-level key for a subject
pub fn subject_key(subject: &RdfSubject) -> String {
    match subject {
        RdfSubject::NamedNode(n) => n.as_str().to_string(),
        RdfSubject::BlankNode(b) => blank_node_key(b),
    }
}

/// Second-level key for a predicate
pub fn predicate_key(predicate: &RdfPredicate) -> String {
    predicate.as_str().to_string()
}

/// Build the term object for a value in object position
pub fn object_to_json(object: &RdfObject) -> Value {
    let mut term = Map::new();
    match object {
        RdfObject::BlankNode(b) => {
            term.insert(TYPE_KEY.into(), TermType::Bnode.as_str().into());
            term.insert(VALUE_KEY.into(), blank_node_key(b).into());
        }
        RdfObject::NamedNode(n) => {
            term.insert(TYPE_KEY.into(), TermType::Uri.as_str().into());
            term.insert(VALUE_KEY.into(), n.as_str().into());
        }
        RdfObject::Literal(l) => {
            term.insert(TYPE_KEY.into(), TermType::Literal.as_str().into());
            term.insert(VALUE_KEY.into(), l.value().into());
            match l.kind() {
                LiteralKind::Plain => {}
                LiteralKind::LanguageTagged(lang) => {
                    term.insert(LANG_KEY.into(), lang.into());
                }
                LiteralKind::Typed(datatype) => {
                    term.insert(DATATYPE_KEY.into(), datatype.into());
                }
            }
        }
    }
    Value::Object(term)
}

/// JSON text of a single term object
pub fn format_term(object: &RdfObject) -> String {
    object_to_json(object).to_string()
}

/// A one-statement document: `{s: {p: [o]}}`
pub fn triple_to_json(triple: &Triple) -> Value {
    let mut predicates = Map::new();
    predicates.insert(
        predicate_key(&triple.predicate),
        Value::Array(vec![object_to_json(&triple.object)]),
    );
    let mut document = Map::new();
    document.insert(subject_key(&triple.subject), Value::Object(predicates));
    Value::Object(document)
}
