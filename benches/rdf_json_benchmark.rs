use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rdfjson::rdf::serialization::json::{DecoderConfig, RdfJsonDecoder, RdfJsonEncoder};
use rdfjson::rdf::{BlankNode, Literal, NamedNode, RdfPredicate, Triple};

const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

/// People with a name, an age and a blank-node address each
fn build_triples(people: usize) -> Vec<Triple> {
    let name = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
    let age = RdfPredicate::new("http://xmlns.com/foaf/0.1/age").unwrap();
    let knows = RdfPredicate::new("http://xmlns.com/foaf/0.1/knows").unwrap();
    let address = RdfPredicate::new("http://schema.org/address").unwrap();
    let city = RdfPredicate::new("http://schema.org/addressLocality").unwrap();
    let integer = NamedNode::new(XSD_INTEGER).unwrap();

    let mut triples = Vec::with_capacity(people * 5);
    for i in 0..people {
        let person = NamedNode::new(&format!("http://example.org/person/{}", i)).unwrap();
        let friend = NamedNode::new(&format!("http://example.org/person/{}", (i + 1) % people)).unwrap();
        let home = BlankNode::new();

        triples.push(Triple::new(person.clone().into(), name.clone(), format!("Person{}", i).into()));
        triples.push(Triple::new(
            person.clone().into(),
            age.clone(),
            Literal::new_typed_literal((i % 100).to_string(), integer.clone()).into(),
        ));
        triples.push(Triple::new(person.clone().into(), knows.clone(), friend.into()));
        triples.push(Triple::new(person.into(), address.clone(), home.clone().into()));
        triples.push(Triple::new(home.into(), city.clone(), "Springfield".into()));
    }
    triples
}

fn encode(triples: &[Triple]) -> String {
    let mut encoder = RdfJsonEncoder::new();
    encoder.extend(triples);
    encoder.finish_to_string().unwrap()
}

/// Benchmark document encoding throughput
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("rdf_json_encode");

    for size in [100, 1000, 10_000].iter() {
        let triples = build_triples(*size);
        group.throughput(Throughput::Elements(triples.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &triples, |b, triples| {
            b.iter(|| encode(triples));
        });
    }
    group.finish();
}

/// Benchmark document decoding throughput, with and without the lexical hooks
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("rdf_json_decode");

    let checked = RdfJsonDecoder::with_config(DecoderConfig {
        validate: true,
        canonicalize: true,
        strict: true,
    });
    let plain = RdfJsonDecoder::new();

    for size in [100, 1000, 10_000].iter() {
        let input = encode(&build_triples(*size));
        group.throughput(Throughput::Bytes(input.len() as u64));

        group.bench_with_input(BenchmarkId::new("plain", size), &input, |b, input| {
            b.iter(|| plain.decode_all(input).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("validate_canonicalize", size), &input, |b, input| {
            b.iter(|| checked.decode_all(input).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
