//! RDF type definitions
//!
//! This module provides wrapper types around the oxrdf library for RDF primitives.
//! The codec only ever constructs and inspects these values; it never needs
//! to reach into oxrdf directly.

use oxrdf::{
    vocab::xsd,
    BlankNode as OxBlankNode,
    Literal as OxLiteral,
    NamedNode as OxNamedNode,
    Subject as OxSubject,
    Term as OxTerm,
    Triple as OxTriple,
};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// RDF errors
#[derive(Error, Debug)]
pub enum RdfError {
    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Invalid blank node
    #[error("Invalid blank node: {0}")]
    InvalidBlankNode(String),

    /// Invalid literal
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),
}

pub type RdfResult<T> = Result<T, RdfError>;

/// Named node (IRI)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNode(OxNamedNode);

impl NamedNode {
    /// Create a new named node from an IRI string
    pub fn new(iri: &str) -> RdfResult<Self> {
        OxNamedNode::new(iri)
            .map(Self)
            .map_err(|e| RdfError::InvalidIri(format!("{iri}: {e}")))
    }

    /// Create a named node without checking IRI syntax
    ///
    /// The string is kept verbatim, even if it is relative or malformed.
    pub fn new_unchecked(iri: impl Into<String>) -> Self {
        Self(OxNamedNode::new_unchecked(iri))
    }

    /// Get the IRI string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Get the inner oxrdf NamedNode
    pub fn inner(&self) -> &OxNamedNode {
        &self.0
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.as_str())
    }
}

impl From<OxNamedNode> for NamedNode {
    fn from(node: OxNamedNode) -> Self {
        Self(node)
    }
}

impl From<NamedNode> for OxNamedNode {
    fn from(node: NamedNode) -> Self {
        node.0
    }
}

/// Blank node (anonymous node)
///
/// Clones share one allocation, so two handles can be checked for node
/// identity with [`BlankNode::same_node`]. `==` compares labels only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlankNode(Arc<OxBlankNode>);

impl BlankNode {
    /// Create a new blank node with a unique identifier
    pub fn new() -> Self {
        Self(Arc::new(OxBlankNode::default()))
    }

    /// Create a blank node from a label (without the `_:` prefix)
    pub fn with_label(label: &str) -> RdfResult<Self> {
        OxBlankNode::new(label)
            .map(|node| Self(Arc::new(node)))
            .map_err(|e| RdfError::InvalidBlankNode(format!("{label}: {e}")))
    }

    /// Create a blank node from any label, without syntax checks
    ///
    /// RDF/JSON documents may carry labels that Turtle would reject, such as
    /// `""` or `"a b"`.
    pub fn new_unchecked(label: impl Into<String>) -> Self {
        Self(Arc::new(OxBlankNode::new_unchecked(label)))
    }

    /// Get the blank node identifier
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// True when both handles point at the same node, not merely the same label
    pub fn same_node(&self, other: &BlankNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Get the inner oxrdf BlankNode
    pub fn inner(&self) -> &OxBlankNode {
        &self.0
    }
}

impl Default for BlankNode {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.as_str())
    }
}

impl From<OxBlankNode> for BlankNode {
    fn from(node: OxBlankNode) -> Self {
        Self(Arc::new(node))
    }
}

impl From<BlankNode> for OxBlankNode {
    fn from(node: BlankNode) -> Self {
        Arc::try_unwrap(node.0).unwrap_or_else(|shared| (*shared).clone())
    }
}

/// How a literal is tagged on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind<'a> {
    /// No language tag and no datatype given
    Plain,
    /// Language-tagged string
    LanguageTagged(&'a str),
    /// Explicit datatype IRI
    Typed(&'a str),
}

/// RDF literal value
///
/// oxrdf folds `"x"^^xsd:string` into the simple literal `"x"`. The
/// `explicit_datatype` flag remembers that a datatype was given, so an
/// explicit `xsd:string` is still written back with its datatype.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    inner: OxLiteral,
    explicit_datatype: bool,
}

impl Literal {
    /// Create a simple literal (plain string)
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self {
            inner: OxLiteral::new_simple_literal(value),
            explicit_datatype: false,
        }
    }

    /// Create a literal with language tag
    ///
    /// The tag is checked against BCP47 and normalized to lowercase.
    pub fn new_language_tagged_literal(value: impl Into<String>, language: impl Into<String>) -> RdfResult<Self> {
        OxLiteral::new_language_tagged_literal(value, language)
            .map(Self::from)
            .map_err(|e| RdfError::InvalidLiteral(e.to_string()))
    }

    /// Create a language-tagged literal keeping the tag verbatim
    pub fn new_language_tagged_literal_unchecked(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self::from(OxLiteral::new_language_tagged_literal_unchecked(value, language))
    }

    /// Create a typed literal
    pub fn new_typed_literal(value: impl Into<String>, datatype: NamedNode) -> Self {
        Self {
            inner: OxLiteral::new_typed_literal(value, datatype.0),
            explicit_datatype: true,
        }
    }

    /// Get the lexical value
    pub fn value(&self) -> &str {
        self.inner.value()
    }

    /// Get the language tag if present
    pub fn language(&self) -> Option<&str> {
        self.inner.language()
    }

    /// Get the datatype
    pub fn datatype(&self) -> NamedNode {
        NamedNode(self.inner.datatype().into_owned())
    }

    /// Classify the literal as plain, language-tagged or typed
    pub fn kind(&self) -> LiteralKind<'_> {
        if let Some(lang) = self.inner.language() {
            return LiteralKind::LanguageTagged(lang);
        }
        let datatype = self.inner.datatype();
        if datatype == xsd::STRING && !self.explicit_datatype {
            LiteralKind::Plain
        } else {
            LiteralKind::Typed(datatype.as_str())
        }
    }

    /// Get the inner oxrdf Literal
    pub fn inner(&self) -> &OxLiteral {
        &self.inner
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)?;
        if self.explicit_datatype && self.inner.datatype() == xsd::STRING {
            write!(f, "^^<{}>", xsd::STRING.as_str())?;
        }
        Ok(())
    }
}

impl From<OxLiteral> for Literal {
    fn from(lit: OxLiteral) -> Self {
        Self {
            inner: lit,
            explicit_datatype: false,
        }
    }
}

impl From<Literal> for OxLiteral {
    fn from(lit: Literal) -> Self {
        lit.inner
    }
}

/// RDF subject (NamedNode or BlankNode)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfSubject {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node
    BlankNode(BlankNode),
}

impl RdfSubject {
    /// Check if this is a named node
    pub fn is_named_node(&self) -> bool {
        matches!(self, RdfSubject::NamedNode(_))
    }

    /// Check if this is a blank node
    pub fn is_blank_node(&self) -> bool {
        matches!(self, RdfSubject::BlankNode(_))
    }

    /// Get the blank node, if this subject is one
    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            RdfSubject::BlankNode(b) => Some(b),
            RdfSubject::NamedNode(_) => None,
        }
    }
}

impl fmt::Display for RdfSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfSubject::NamedNode(n) => write!(f, "{}", n),
            RdfSubject::BlankNode(b) => write!(f, "{}", b),
        }
    }
}

impl From<NamedNode> for RdfSubject {
    fn from(node: NamedNode) -> Self {
        RdfSubject::NamedNode(node)
    }
}

impl From<BlankNode> for RdfSubject {
    fn from(node: BlankNode) -> Self {
        RdfSubject::BlankNode(node)
    }
}

impl From<RdfSubject> for OxSubject {
    fn from(subject: RdfSubject) -> Self {
        match subject {
            RdfSubject::NamedNode(n) => OxSubject::NamedNode(n.0),
            RdfSubject::BlankNode(b) => OxSubject::BlankNode(b.into()),
        }
    }
}

/// RDF predicate (always a NamedNode)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RdfPredicate(NamedNode);

impl RdfPredicate {
    /// Create a new predicate from an IRI
    pub fn new(iri: &str) -> RdfResult<Self> {
        Ok(Self(NamedNode::new(iri)?))
    }

    /// Get the underlying named node
    pub fn as_named_node(&self) -> &NamedNode {
        &self.0
    }

    /// Get the IRI string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RdfPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NamedNode> for RdfPredicate {
    fn from(node: NamedNode) -> Self {
        RdfPredicate(node)
    }
}

impl From<RdfPredicate> for NamedNode {
    fn from(pred: RdfPredicate) -> Self {
        pred.0
    }
}

/// RDF object (NamedNode, BlankNode, or Literal)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfObject {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node
    BlankNode(BlankNode),
    /// Literal value
    Literal(Literal),
}

impl RdfObject {
    /// Check if this is a named node
    pub fn is_named_node(&self) -> bool {
        matches!(self, RdfObject::NamedNode(_))
    }

    /// Check if this is a blank node
    pub fn is_blank_node(&self) -> bool {
        matches!(self, RdfObject::BlankNode(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, RdfObject::Literal(_))
    }

    /// Get the blank node, if this object is one
    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            RdfObject::BlankNode(b) => Some(b),
            _ => None,
        }
    }

    /// Get the literal, if this object is one
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            RdfObject::Literal(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for RdfObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfObject::NamedNode(n) => write!(f, "{}", n),
            RdfObject::BlankNode(b) => write!(f, "{}", b),
            RdfObject::Literal(l) => write!(f, "{}", l),
        }
    }
}

impl From<NamedNode> for RdfObject {
    fn from(node: NamedNode) -> Self {
        RdfObject::NamedNode(node)
    }
}

impl From<BlankNode> for RdfObject {
    fn from(node: BlankNode) -> Self {
        RdfObject::BlankNode(node)
    }
}

impl From<Literal> for RdfObject {
    fn from(lit: Literal) -> Self {
        RdfObject::Literal(lit)
    }
}

impl From<RdfSubject> for RdfObject {
    fn from(subject: RdfSubject) -> Self {
        match subject {
            RdfSubject::NamedNode(n) => RdfObject::NamedNode(n),
            RdfSubject::BlankNode(b) => RdfObject::BlankNode(b),
        }
    }
}

// Host values that are not RDF terms become plain literals of their text form.

impl From<&str> for RdfObject {
    fn from(value: &str) -> Self {
        RdfObject::Literal(Literal::new_simple_literal(value))
    }
}

impl From<String> for RdfObject {
    fn from(value: String) -> Self {
        RdfObject::Literal(Literal::new_simple_literal(value))
    }
}

impl From<bool> for RdfObject {
    fn from(value: bool) -> Self {
        RdfObject::Literal(Literal::new_simple_literal(value.to_string()))
    }
}

impl From<i64> for RdfObject {
    fn from(value: i64) -> Self {
        RdfObject::Literal(Literal::new_simple_literal(value.to_string()))
    }
}

impl From<f64> for RdfObject {
    fn from(value: f64) -> Self {
        RdfObject::Literal(Literal::new_simple_literal(value.to_string()))
    }
}

impl From<RdfObject> for OxTerm {
    fn from(object: RdfObject) -> Self {
        match object {
            RdfObject::NamedNode(n) => OxTerm::NamedNode(n.0),
            RdfObject::BlankNode(b) => OxTerm::BlankNode(b.into()),
            RdfObject::Literal(l) => OxTerm::Literal(l.inner),
        }
    }
}

/// RDF triple (subject-predicate-object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject
    pub subject: RdfSubject,
    /// Predicate
    pub predicate: RdfPredicate,
    /// Object
    pub object: RdfObject,
}

impl Triple {
    /// Create a new triple
    pub fn new(subject: RdfSubject, predicate: RdfPredicate, object: RdfObject) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Convert to oxrdf Triple
    pub fn to_oxrdf(&self) -> OxTriple {
        let subject: OxSubject = self.subject.clone().into();
        let predicate: OxNamedNode = self.predicate.clone().0.into();
        let object: OxTerm = self.object.clone().into();

        OxTriple::new(subject, predicate, object)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}
