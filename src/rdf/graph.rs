//! In-memory graph container
//!
//! The codec never stores triples itself. Decoded statements are appended to
//! a [`TripleSink`], and the encoder walks any iterator of triples. [`Graph`]
//! is the plain container used by the parsers, the CLI and the tests.

use super::types::{RdfSubject, Triple};
use indexmap::IndexSet;

/// Anything that can receive decoded triples
pub trait TripleSink {
    /// Append one triple
    fn insert_triple(&mut self, triple: Triple);
}

impl TripleSink for Vec<Triple> {
    fn insert_triple(&mut self, triple: Triple) {
        self.push(triple);
    }
}

/// A bag of triples in insertion order
///
/// Duplicates are kept; call [`Graph::dedupe`] for set semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    triples: Vec<Triple>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a triple to the graph
    pub fn add(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    /// Get the number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over triples
    pub fn iter(&self) -> std::slice::Iter<'_, Triple> {
        self.triples.iter()
    }

    /// Check if a triple exists in the graph
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Distinct subjects, in the order they were first added
    pub fn subjects(&self) -> Vec<&RdfSubject> {
        let subjects: IndexSet<&RdfSubject> = self.triples.iter().map(|t| &t.subject).collect();
        subjects.into_iter().collect()
    }

    /// Get triples with a specific subject
    pub fn triples_with_subject<'a>(
        &'a self,
        subject: &'a RdfSubject,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples.iter().filter(move |t| &t.subject == subject)
    }

    /// Remove duplicate triples, keeping the first occurrence of each
    pub fn dedupe(&mut self) {
        let unique: IndexSet<Triple> = self.triples.drain(..).collect();
        self.triples = unique.into_iter().collect();
    }

    /// Get a reference to the triples
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Get all triples (consuming the graph)
    pub fn into_triples(self) -> Vec<Triple> {
        self.triples
    }
}

impl TripleSink for Graph {
    fn insert_triple(&mut self, triple: Triple) {
        self.add(triple);
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        Graph {
            triples: iter.into_iter().collect(),
        }
    }
}

impl Extend<Triple> for Graph {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        self.triples.extend(iter);
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = std::vec::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
