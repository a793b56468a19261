//! Turtle and N-Triples implementations
//!
//! Both formats go through `rio`; only the parser/formatter type differs.

use crate::rdf::{
    BlankNode, Literal, LiteralKind, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple,
};
use super::{ParseError, ParseResult, SerializeError, SerializeResult};
use rio_api::formatter::TriplesFormatter;
use rio_api::model;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesFormatter, NTriplesParser, TurtleError, TurtleFormatter, TurtleParser};
use std::io::{BufReader, Cursor};

/// Turtle parser
pub struct TurtleParserWrapper;

impl TurtleParserWrapper {
    /// Parse Turtle string to Triples
    pub fn parse(input: &str) -> ParseResult<Vec<Triple>> {
        let mut reader = BufReader::new(Cursor::new(input));
        collect_triples(TurtleParser::new(&mut reader, None))
    }
}

/// N-Triples parser
pub struct NTriplesParserWrapper;

impl NTriplesParserWrapper {
    /// Parse N-Triples string to Triples
    pub fn parse(input: &str) -> ParseResult<Vec<Triple>> {
        let mut reader = BufReader::new(Cursor::new(input));
        collect_triples(NTriplesParser::new(&mut reader))
    }
}

fn collect_triples<P>(mut parser: P) -> ParseResult<Vec<Triple>>
where
    P: TriplesParser<Error = TurtleError>,
{
    let mut triples = Vec::new();

    let res: Result<(), TurtleError> = parser.parse_all(&mut |t| {
        let triple = convert_triple(t)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        triples.push(triple);
        Ok(())
    });

    res.map(|_| triples).map_err(|e| ParseError::Parse(e.to_string()))
}

/// Turtle serializer
pub struct TurtleSerializerWrapper;

impl TurtleSerializerWrapper {
    /// Serialize Triples to Turtle string
    pub fn serialize(triples: &[Triple]) -> SerializeResult<String> {
        let mut formatter = TurtleFormatter::new(Vec::new());
        for triple in triples {
            with_rio_triple(triple, |t| formatter.format(t))?;
        }
        let output = formatter
            .finish()
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

/// N-Triples serializer
pub struct NTriplesSerializerWrapper;

impl NTriplesSerializerWrapper {
    /// Serialize Triples to N-Triples string
    pub fn serialize(triples: &[Triple]) -> SerializeResult<String> {
        let mut formatter = NTriplesFormatter::new(Vec::new());
        for triple in triples {
            with_rio_triple(triple, |t| formatter.format(t))?;
        }
        let output = formatter
            .finish()
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

/// Borrow a triple as a rio model triple and hand it to `f`
fn with_rio_triple<F>(triple: &Triple, f: F) -> SerializeResult<()>
where
    F: FnOnce(&model::Triple<'_>) -> std::io::Result<()>,
{
    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => model::Subject::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfSubject::BlankNode(b) => model::Subject::BlankNode(model::BlankNode { id: b.as_str() }),
    };

    let predicate = model::NamedNode { iri: triple.predicate.as_str() };

    let object = match &triple.object {
        RdfObject::NamedNode(n) => model::Term::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfObject::BlankNode(b) => model::Term::BlankNode(model::BlankNode { id: b.as_str() }),
        RdfObject::Literal(l) => model::Term::Literal(match l.kind() {
            LiteralKind::Plain => model::Literal::Simple { value: l.value() },
            LiteralKind::LanguageTagged(language) => model::Literal::LanguageTaggedString {
                value: l.value(),
                language,
            },
            LiteralKind::Typed(datatype) => model::Literal::Typed {
                value: l.value(),
                datatype: model::NamedNode { iri: datatype },
            },
        }),
    };

    f(&model::Triple { subject, predicate, object })
        .map_err(|e| SerializeError::Serialize(e.to_string()))
}

fn convert_triple(t: model::Triple<'_>) -> ParseResult<Triple> {
    Ok(Triple::new(
        convert_subject(t.subject)?,
        convert_predicate(t.predicate)?,
        convert_object(t.object)?,
    ))
}

fn convert_subject(s: model::Subject<'_>) -> ParseResult<RdfSubject> {
    match s {
        model::Subject::NamedNode(n) => Ok(RdfSubject::NamedNode(convert_named_node(n)?)),
        model::Subject::BlankNode(b) => Ok(RdfSubject::BlankNode(convert_blank_node(b)?)),
        _ => Err(ParseError::Parse("Unsupported subject type".to_string())),
    }
}

fn convert_predicate(p: model::NamedNode<'_>) -> ParseResult<RdfPredicate> {
    Ok(RdfPredicate::from(convert_named_node(p)?))
}

fn convert_object(o: model::Term<'_>) -> ParseResult<RdfObject> {
    match o {
        model::Term::NamedNode(n) => Ok(RdfObject::NamedNode(convert_named_node(n)?)),
        model::Term::BlankNode(b) => Ok(RdfObject::BlankNode(convert_blank_node(b)?)),
        model::Term::Literal(l) => {
            let literal = match l {
                model::Literal::Simple { value } => Literal::new_simple_literal(value),
                model::Literal::LanguageTaggedString { value, language } => {
                    Literal::new_language_tagged_literal(value, language)
                        .map_err(|e| ParseError::Parse(e.to_string()))?
                }
                model::Literal::Typed { value, datatype } => {
                    Literal::new_typed_literal(value, convert_named_node(datatype)?)
                }
            };
            Ok(RdfObject::Literal(literal))
        }
        _ => Err(ParseError::Parse("Unsupported object type".to_string())),
    }
}

fn convert_named_node(n: model::NamedNode<'_>) -> ParseResult<NamedNode> {
    NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))
}

fn convert_blank_node(b: model::BlankNode<'_>) -> ParseResult<BlankNode> {
    BlankNode::with_label(b.id).map_err(|e| ParseError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turtle_roundtrip() {
        let input = r#"<http://example.org/a> <http://example.org/b> "c" ."#;
        let triples = TurtleParserWrapper::parse(input).unwrap();
        assert_eq!(triples.len(), 1);
        let output = TurtleSerializerWrapper::serialize(&triples).unwrap();
        assert!(output.contains("http://example.org/a"));
    }

    #[test]
    fn test_ntriples_literal_kinds() {
        let input = concat!(
            "<http://example.org/about> <http://purl.org/dc/terms/title> \"Anna's Homepage\"@en .\n",
            "<http://example.org/about> <http://example.org/count> \"3\"^^<http://www.w3.org/2001/XMLSchema#integer> .\n",
            "_:x <http://example.org/self> _:x .\n",
        );
        let triples = NTriplesParserWrapper::parse(input).unwrap();
        assert_eq!(triples.len(), 3);

        let lit = triples[0].object.as_literal().unwrap();
        assert_eq!(lit.kind(), LiteralKind::LanguageTagged("en"));
        let lit = triples[1].object.as_literal().unwrap();
        assert_eq!(
            lit.kind(),
            LiteralKind::Typed("http://www.w3.org/2001/XMLSchema#integer")
        );

        let output = NTriplesSerializerWrapper::serialize(&triples).unwrap();
        assert_eq!(NTriplesParserWrapper::parse(&output).unwrap(), triples);
    }

    #[test]
    fn test_ntriples_syntax_error() {
        let err = NTriplesParserWrapper::parse("<http://example.org/a> <http://example.org/b> .").unwrap_err();
        assert!(matches!(err, ParseError::Parse(_)));
    }
}
