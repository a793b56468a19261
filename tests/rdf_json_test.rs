use rdfjson::rdf::serialization::json::{
    self, BlankNodeArena, DecoderConfig, EncoderConfig, RdfJsonDecoder, RdfJsonEncoder,
};
use rdfjson::rdf::{
    BlankNode, Graph, LiteralKind, NamedNode, ParseError, RdfFormat, RdfObject, RdfParser,
    RdfPredicate, RdfSerializer, RdfSubject, Triple, TripleSink,
};
use serde_json::{json, Value};

/// N-Triples rendering paired with the equivalent RDF/JSON document
const W3C_EXAMPLES: &[(&str, &str, &str)] = &[
    (
        "example 1",
        r#"<http://example.org/about> <http://purl.org/dc/terms/title> "Anna's Homepage"@en ."#,
        r#"{
          "http://example.org/about" : {
              "http://purl.org/dc/terms/title" : [ { "value" : "Anna's Homepage", "type" : "literal", "lang" : "en" } ]
          }
        }"#,
    ),
    (
        "example 3",
        concat!(
            "<http://example.org/about> <http://purl.org/dc/terms/title> \"Anna's Homepage\"@en .\n",
            "<http://example.org/about> <http://purl.org/dc/terms/title> \"Annas hjemmeside\"@da .\n",
        ),
        r#"{
          "http://example.org/about" : {
              "http://purl.org/dc/terms/title" : [
                  { "value" : "Anna's Homepage", "type" : "literal", "lang" : "en" },
                  { "value" : "Annas hjemmeside", "type" : "literal", "lang" : "da" } ]
          }
        }"#,
    ),
    (
        "example 5",
        r#"<http://example.org/about> <http://purl.org/dc/terms/title> "<p xmlns=\"http://www.w3.org/1999/xhtml\"><b>Anna's</b> Homepage>/p>"^^<http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral> ."#,
        r#"{
          "http://example.org/about" : {
              "http://purl.org/dc/terms/title" : [ {
                  "value" : "<p xmlns=\"http://www.w3.org/1999/xhtml\"><b>Anna's</b> Homepage>/p>",
                  "type" : "literal",
                  "datatype" : "http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral" } ]
          }
        }"#,
    ),
    (
        "example 7",
        concat!(
            "<http://example.org/about> <http://purl.org/dc/terms/creator> _:anna .\n",
            "_:anna <http://xmlns.com/foaf/0.1/name> \"Anna\" .\n",
        ),
        r#"{
          "http://example.org/about" : {
              "http://purl.org/dc/terms/creator" : [ { "value" : "_:anna", "type" : "bnode" } ]
          },
          "_:anna" : {
              "http://xmlns.com/foaf/0.1/name" : [ { "value" : "Anna", "type" : "literal" } ]
          }
        }"#,
    ),
    (
        "example 9",
        "_:anna <http://xmlns.com/foaf/0.1/homepage> <http://example.org/anna> .",
        r#"{
          "_:anna" : {
              "http://xmlns.com/foaf/0.1/homepage" : [ { "value" : "http://example.org/anna", "type" : "uri" } ]
          }
        }"#,
    ),
    (
        "example 11",
        concat!(
            "_:anna <http://xmlns.com/foaf/0.1/name> \"Anna\" .\n",
            "_:anna <http://xmlns.com/foaf/0.1/homepage> <http://example.org/anna> .\n",
        ),
        r#"{
          "_:anna" : {
              "http://xmlns.com/foaf/0.1/name" : [ { "value" : "Anna", "type" : "literal" } ],
              "http://xmlns.com/foaf/0.1/homepage" : [ { "value" : "http://example.org/anna", "type" : "uri" } ]
          }
        }"#,
    ),
];

#[test]
fn test_w3c_examples_match_ntriples() {
    for (name, nt, rj) in W3C_EXAMPLES {
        let expected = RdfParser::parse(nt, RdfFormat::NTriples).unwrap();
        let decoded = RdfParser::parse(rj, RdfFormat::RdfJson).unwrap();
        assert_eq!(decoded, expected, "{name}");
    }
}

#[test]
fn test_w3c_examples_encode_back() {
    for (name, nt, rj) in W3C_EXAMPLES {
        let triples = RdfParser::parse(nt, RdfFormat::NTriples).unwrap();
        let encoded = json::encode_triples(&triples);
        let expected: Value = serde_json::from_str(rj).unwrap();
        assert_eq!(encoded, expected, "{name}");
    }
}

#[test]
fn test_shared_blank_node_connects_statements() {
    let (_, _, rj) = W3C_EXAMPLES[3];
    let triples = RdfJsonDecoder::new().decode_all(rj).unwrap();
    assert_eq!(triples.len(), 2);

    let creator = triples[0].object.as_blank_node().unwrap();
    let named = triples[1].subject.as_blank_node().unwrap();
    assert!(creator.same_node(named));
}

#[test]
fn test_roundtrip_is_isomorphic() {
    let mut graph = Graph::new();
    let alice = BlankNode::new();
    let bob = BlankNode::new();
    let knows = RdfPredicate::new("http://xmlns.com/foaf/0.1/knows").unwrap();
    let name = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
    let age = RdfPredicate::new("http://xmlns.com/foaf/0.1/age").unwrap();

    graph.add(Triple::new(alice.clone().into(), knows.clone(), bob.clone().into()));
    graph.add(Triple::new(bob.clone().into(), knows, alice.clone().into()));
    graph.add(Triple::new(alice.clone().into(), name.clone(), "Alice".into()));
    graph.add(Triple::new(bob.into(), name, "Bob".into()));
    graph.add(Triple::new(alice.into(), age, 30i64.into()));

    let text = RdfSerializer::serialize_graph(&graph, RdfFormat::RdfJson).unwrap();
    let back: Graph = RdfParser::parse(&text, RdfFormat::RdfJson).unwrap().into_iter().collect();

    // labels survive a round trip, so equality here is exact
    assert_eq!(back.len(), graph.len());
    for triple in &graph {
        assert!(back.contains(triple), "missing {triple}");
    }

    // alice's three statements come first, then bob's
    let a = back.triples()[0].subject.as_blank_node().unwrap();
    let a_again = back.triples()[3].object.as_blank_node().unwrap();
    assert!(a.same_node(a_again));
}

#[test]
fn test_explicit_string_datatype_survives_roundtrip() {
    let input = json!({
        "http://example.org/s": {
            "http://example.org/p": [
                {"type": "literal", "value": "typed", "datatype": "http://www.w3.org/2001/XMLSchema#string"},
                {"type": "literal", "value": "plain"}
            ]
        }
    });
    let triples = RdfJsonDecoder::new().decode_all(&input.to_string()).unwrap();
    assert_eq!(
        triples[0].object.as_literal().unwrap().kind(),
        LiteralKind::Typed("http://www.w3.org/2001/XMLSchema#string")
    );
    assert_eq!(triples[1].object.as_literal().unwrap().kind(), LiteralKind::Plain);

    assert_eq!(json::encode_triples(&triples), input);
}

#[test]
fn test_labels_outside_turtle_syntax_roundtrip() {
    let input = json!({
        "_:": {"http://example.org/p": [{"type": "bnode", "value": "_:a b"}]},
        "_:a b": {"http://example.org/p": [{"type": "bnode", "value": "_:"}]}
    });
    let triples = RdfJsonDecoder::new().decode_all(&input.to_string()).unwrap();
    assert_eq!(triples.len(), 2);
    assert!(triples[0]
        .object
        .as_blank_node()
        .unwrap()
        .same_node(triples[1].subject.as_blank_node().unwrap()));

    assert_eq!(json::encode_triples(&triples), input);

    let validating = RdfJsonDecoder::with_config(DecoderConfig {
        validate: true,
        ..DecoderConfig::default()
    });
    assert!(matches!(
        validating.decode_all(&input.to_string()),
        Err(ParseError::ValidationFailure(_))
    ));
}

#[test]
fn test_huge_negative_integer_validates() {
    let huge = format!("-{}", "9".repeat(42));
    let input = json!({
        "http://example.org/s": {
            "http://example.org/p": [{
                "type": "literal",
                "value": huge,
                "datatype": "http://www.w3.org/2001/XMLSchema#negativeInteger"
            }]
        }
    });
    let decoder = RdfJsonDecoder::with_config(DecoderConfig {
        validate: true,
        ..DecoderConfig::default()
    });
    let triples = decoder.decode_all(&input.to_string()).unwrap();
    assert_eq!(triples[0].object.as_literal().unwrap().value(), huge);
}

#[test]
fn test_subject_and_predicate_are_bare_strings() {
    let triples = RdfParser::parse(
        concat!(
            "_:b0 <http://example.org/p> <http://example.org/o> .\n",
            "<http://example.org/s> <http://example.org/p> \"1\"^^<http://www.w3.org/2001/XMLSchema#integer> .\n",
        ),
        RdfFormat::NTriples,
    )
    .unwrap();

    let document = json::encode_triples(&triples);
    for (subject, predicates) in document.as_object().unwrap() {
        assert!(subject.starts_with("_:") || subject.starts_with("http://"));
        for (predicate, objects) in predicates.as_object().unwrap() {
            assert!(predicate.starts_with("http://"));
            for object in objects.as_array().unwrap() {
                let term = object.as_object().unwrap();
                assert!(term.contains_key("type"));
                assert!(!(term.contains_key("lang") && term.contains_key("datatype")));
            }
        }
    }
}

#[test]
fn test_malformed_input_policy() {
    let input = r#"{"s":{"p":[{"value":"x"}]}}"#;

    let strict = RdfJsonDecoder::new().decode_all(input);
    assert!(matches!(strict, Err(ParseError::MalformedTerm(_))));

    let lenient = RdfJsonDecoder::with_config(DecoderConfig {
        strict: false,
        ..DecoderConfig::default()
    });
    let mut statements = lenient.decode(input).unwrap();
    assert!(statements.next().is_none());
    assert_eq!(statements.errors().len(), 1);

    let validating = RdfJsonDecoder::with_config(DecoderConfig::lenient_validating());
    let results: Vec<_> = validating.decode(input).unwrap().collect();
    assert!(matches!(
        results.as_slice(),
        [Err(ParseError::DecodeHadErrors { count: 1 })]
    ));
}

#[test]
fn test_lenient_skips_only_failing_parts() {
    let input = json!({
        "http://example.org/a": {
            "http://example.org/p": "not a list",
            "http://example.org/q": [{"type": "literal", "value": "kept"}]
        },
        "http://example.org/b": [],
        "http://example.org/c": {
            "http://example.org/p": [{"type": "uri", "value": "http://example.org/o"}]
        }
    })
    .to_string();

    let decoder = RdfJsonDecoder::with_config(DecoderConfig {
        strict: false,
        ..DecoderConfig::default()
    });
    let mut statements = decoder.decode(&input).unwrap();
    let triples: Vec<Triple> = statements.by_ref().map(Result::unwrap).collect();

    assert_eq!(triples.len(), 2);
    assert_eq!(triples[0].predicate.as_str(), "http://example.org/q");
    assert_eq!(triples[1].subject.to_string(), "<http://example.org/c>");
    assert_eq!(statements.errors().len(), 2);
}

#[test]
fn test_decoding_is_restartable() {
    let (_, _, rj) = W3C_EXAMPLES[5];
    let decoder = RdfJsonDecoder::new();
    assert_eq!(decoder.decode_all(rj).unwrap(), decoder.decode_all(rj).unwrap());
}

#[test]
fn test_validate_and_canonicalize_together() {
    let decoder = RdfJsonDecoder::with_config(DecoderConfig {
        validate: true,
        canonicalize: true,
        strict: true,
    });
    let input = json!({
        "http://example.org/s": {
            "http://example.org/p": [
                {"type": "literal", "value": "1", "datatype": "http://www.w3.org/2001/XMLSchema#boolean"},
                {"type": "literal", "value": "+007", "datatype": "http://www.w3.org/2001/XMLSchema#integer"},
                {"type": "literal", "value": "Hello", "lang": "EN-gb"}
            ]
        }
    })
    .to_string();

    let triples = decoder.decode_all(&input).unwrap();
    let values: Vec<&str> = triples
        .iter()
        .map(|t| t.object.as_literal().unwrap().value())
        .collect();
    assert_eq!(values, vec!["true", "7", "Hello"]);
    assert_eq!(
        triples[2].object.as_literal().unwrap().kind(),
        LiteralKind::LanguageTagged("en-gb")
    );
}

#[test]
fn test_parse_single_terms() {
    let decoder = RdfJsonDecoder::new();
    let mut arena = BlankNodeArena::new();

    let subject = decoder.parse_subject("_:foobar", &mut arena).unwrap();
    assert_eq!(subject.to_string(), "_:foobar");

    let object = decoder
        .parse_object(
            &json!({"type": "literal", "value": "Hello!", "lang": "en"}),
            &mut arena,
        )
        .unwrap();
    assert_eq!(object.as_literal().unwrap().language(), Some("en"));

    let object = decoder
        .parse_object(&json!({"type": "uri", "value": "http://rdf.rubyforge.org/"}), &mut arena)
        .unwrap();
    assert_eq!(object, RdfObject::NamedNode(NamedNode::new("http://rdf.rubyforge.org/").unwrap()));
}

#[test]
fn test_encoder_is_a_triple_sink() {
    let (_, _, rj) = W3C_EXAMPLES[1];
    let mut encoder = RdfJsonEncoder::with_config(EncoderConfig { pretty: true });
    let count = RdfJsonDecoder::new().decode_into(rj, &mut encoder).unwrap();
    assert_eq!(count, 2);
    assert_eq!(encoder.len(), 2);

    let text = encoder.finish_to_string().unwrap();
    let expected: Value = serde_json::from_str(rj).unwrap();
    assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), expected);
}

#[test]
fn test_sink_for_vec() {
    let mut sink: Vec<Triple> = Vec::new();
    sink.insert_triple(Triple::new(
        RdfSubject::NamedNode(NamedNode::new("http://example.org/s").unwrap()),
        RdfPredicate::new("http://example.org/p").unwrap(),
        true.into(),
    ));
    let text = json::to_string(&sink, &EncoderConfig::default()).unwrap();
    assert_eq!(
        text,
        r#"{"http://example.org/s":{"http://example.org/p":[{"type":"literal","value":"true"}]}}"#
    );
}

#[test]
fn test_format_discovery() {
    for id in ["application/json", "application/rdf+json"] {
        assert_eq!(RdfFormat::from_content_type(id), Some(RdfFormat::RdfJson));
    }
    for ext in ["json", "rj"] {
        assert_eq!(RdfFormat::from_extension(ext), Some(RdfFormat::RdfJson));
    }
    assert_eq!(
        RdfFormat::from_path(std::path::Path::new("etc/doap.json")),
        Some(RdfFormat::RdfJson)
    );
}

#[test]
fn test_file_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let nt_path = dir.path().join("anna.nt");
    let rj_path = dir.path().join("anna.rj");

    let (_, nt, _) = W3C_EXAMPLES[4];
    std::fs::write(&nt_path, nt).unwrap();

    let triples = RdfParser::parse_file(&nt_path).unwrap();
    RdfSerializer::serialize_file(&triples, &rj_path).unwrap();

    let back = RdfParser::parse_file(&rj_path).unwrap();
    assert_eq!(back, triples);
}
