use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::executor::block_on;
use futures::StreamExt;
use oxigraph::io::RdfFormat;
use oxigraph::model::{Dataset, GraphNameRef, NamedNodeRef, QuadRef};

use hydra_rdf::consts::{DEFAULT_MEDIA_TYPES, TYPE};
use hydra_rdf::parse::{materialize, parse};
use hydra_rdf::{
    InferenceEngine, MediaTypeProcessor, OxigraphQuadParser, ParserRegistry, ProcessError,
    QuadParser, QuadStream, ResponseWrapper, TextResponse,
};

const BASE: &str = "http://example.org/api/people";

const PEOPLE_TTL: &str = r#"@prefix hydra: <http://www.w3.org/ns/hydra/core#> .
@prefix schema: <http://schema.org/> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .

<> a hydra:Collection ;
    hydra:totalItems 2 ;
    hydra:memberAssertion [
        hydra:property rdf:type ;
        hydra:object schema:Person
    ] , [
        hydra:subject <../organization> ;
        hydra:property schema:employee
    ] ;
    hydra:member <1>, <2> ;
    hydra:view <?page=1> .

<1> schema:name "Ada" .
<2> schema:name "Grace" .

<?page=1> a hydra:PartialCollectionView ;
    hydra:next <?page=2> .
"#;

const PEOPLE_JSONLD: &str = r#"{
  "@context": {
    "hydra": "http://www.w3.org/ns/hydra/core#",
    "schema": "http://schema.org/",
    "member": { "@id": "hydra:member", "@type": "@id" },
    "object": { "@id": "hydra:object", "@type": "@id" },
    "property": { "@id": "hydra:property", "@type": "@id" }
  },
  "@id": "",
  "@type": "hydra:Collection",
  "hydra:memberAssertion": {
    "property": "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
    "object": "schema:Person"
  },
  "member": ["1", "2"]
}
"#;

fn assert_send<T: Send>(_: &T) {}

fn process(processor: &MediaTypeProcessor, response: &TextResponse) -> Dataset {
    let stream = block_on(processor.process(BASE, response)).expect("process");
    materialize(stream).expect("materialize")
}

fn has(dataset: &Dataset, s: &str, p: &str, o: &str) -> bool {
    dataset.contains(QuadRef::new(
        NamedNodeRef::new_unchecked(s),
        NamedNodeRef::new_unchecked(p),
        NamedNodeRef::new_unchecked(o),
        GraphNameRef::DefaultGraph,
    ))
}

/// Parser that delegates to Turtle but counts how often it was used.
struct CountingParser {
    calls: AtomicUsize,
}

impl QuadParser for CountingParser {
    fn import(
        &self,
        media_type: &str,
        input: Box<dyn Read + Send>,
        base_iri: &str,
    ) -> Result<Option<QuadStream>, ProcessError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        OxigraphQuadParser::new(RdfFormat::Turtle).import(media_type, input, base_iri)
    }
}

/// Parser that never accepts anything.
struct DecliningParser;

impl QuadParser for DecliningParser {
    fn import(
        &self,
        _media_type: &str,
        _input: Box<dyn Read + Send>,
        _base_iri: &str,
    ) -> Result<Option<QuadStream>, ProcessError> {
        Ok(None)
    }
}

struct BrokenResponse;

#[async_trait::async_trait]
impl ResponseWrapper for BrokenResponse {
    async fn text(&self) -> std::io::Result<String> {
        Err(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset",
        ))
    }

    fn media_type(&self) -> &str {
        "text/turtle"
    }
}

#[test]
fn registered_media_types_are_processable() {
    let processor = MediaTypeProcessor::default();
    for media_type in DEFAULT_MEDIA_TYPES {
        assert!(processor.can_process(media_type), "{media_type}");
        assert!(processor.can_process(&format!("{media_type}; charset=utf-8")));
        let response = TextResponse::new("", *media_type);
        let result = block_on(processor.process(BASE, &response));
        // an empty body may be rejected by a parser, but never as an unsupported type
        if let Err(err) = result {
            assert!(!err.is_unsupported_media_type(), "{media_type}: {err}");
        }
    }
}

#[test]
fn unregistered_media_types_are_rejected() {
    let processor = MediaTypeProcessor::default();
    for media_type in ["text/html", "application/json", "", "image/png; q=1"] {
        assert!(!processor.can_process(media_type), "{media_type}");
        let response = TextResponse::new("<s> <p> <o> .", media_type);
        let err = block_on(processor.process(BASE, &response)).unwrap_err();
        assert!(err.is_unsupported_media_type(), "{media_type}: {err}");
    }
}

#[test]
fn turtle_collection_is_augmented() {
    let processor = MediaTypeProcessor::default();
    let response = TextResponse::new(PEOPLE_TTL, "text/turtle; charset=utf-8");
    let dataset = process(&processor, &response);

    let person = "http://schema.org/Person";
    assert!(has(&dataset, "http://example.org/api/1", TYPE.as_str(), person));
    assert!(has(&dataset, "http://example.org/api/2", TYPE.as_str(), person));
    let employee = "http://schema.org/employee";
    assert!(has(&dataset, "http://example.org/organization", employee, "http://example.org/api/1"));
    assert!(has(&dataset, "http://example.org/organization", employee, "http://example.org/api/2"));
    assert!(has(
        &dataset,
        "http://example.org/api/people?page=1",
        "http://www.w3.org/ns/hydra/core#next",
        "http://example.org/api/people?page=2"
    ));
    // 15 parsed quads, 4 member statements, 2 properties typed by range
    assert_eq!(dataset.len(), 21);
}

#[test]
fn jsonld_collection_is_augmented() {
    let processor = MediaTypeProcessor::default();
    let response = TextResponse::new(PEOPLE_JSONLD, "application/ld+json");
    let dataset = process(&processor, &response);
    assert!(has(&dataset, "http://example.org/api/1", TYPE.as_str(), "http://schema.org/Person"));
    assert!(has(&dataset, "http://example.org/api/2", TYPE.as_str(), "http://schema.org/Person"));
}

#[test]
fn output_is_superset_of_parsed_input() {
    let registry = ParserRegistry::with_defaults();
    let text = PEOPLE_TTL.to_string();
    let parsed = materialize(parse(&registry, text.clone(), BASE, "text/turtle").unwrap()).unwrap();

    let processor = MediaTypeProcessor::new(Arc::new(registry), InferenceEngine::default());
    let output = process(&processor, &TextResponse::new(text, "text/turtle"));
    assert!(output.len() > parsed.len());
    // blank nodes are relabelled on each parse, so compare ground quads only
    for quad in parsed.iter() {
        if quad.subject.is_blank_node() || quad.object.is_blank_node() {
            continue;
        }
        assert!(output.contains(quad), "missing {quad}");
    }
}

#[test]
fn processing_twice_is_stable() {
    let processor = MediaTypeProcessor::default();
    let response = TextResponse::new(PEOPLE_TTL, "text/turtle");
    let mut dataset = process(&processor, &response);
    let before = dataset.len();
    assert_eq!(processor.inference().apply_all(&mut dataset), 0);
    assert_eq!(dataset.len(), before);
}

#[test]
fn malformed_body_is_rejected() {
    let processor = MediaTypeProcessor::default();
    let response = TextResponse::new("<http://ex.org/s> <http://ex.org/p> .", "text/turtle");
    let err = block_on(processor.process(BASE, &response)).unwrap_err();
    assert!(matches!(err, ProcessError::MalformedInput { .. }), "{err}");
}

#[test]
fn unreadable_body_is_rejected() {
    let processor = MediaTypeProcessor::default();
    let err = block_on(processor.process(BASE, &BrokenResponse)).unwrap_err();
    assert!(matches!(err, ProcessError::BodyRead(_)), "{err}");
}

#[test]
fn added_parser_overrides_existing_one() {
    let processor = MediaTypeProcessor::default();
    let counting = Arc::new(CountingParser {
        calls: AtomicUsize::new(0),
    });
    processor.add_parsers([("text/turtle", counting.clone() as Arc<dyn QuadParser>)]);

    let response = TextResponse::new("<a> <b> <c> .", "text/turtle");
    process(&processor, &response);
    process(&processor, &response);
    assert_eq!(counting.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn added_parsers_extend_supported_types() {
    let processor = MediaTypeProcessor::default();
    assert!(!processor.can_process("text/x-hydra-turtle"));
    processor.add_parsers(vec![
        (
            "text/x-hydra-turtle".to_string(),
            Arc::new(OxigraphQuadParser::new(RdfFormat::Turtle)) as Arc<dyn QuadParser>,
        ),
        (
            "text/x-declined".to_string(),
            Arc::new(DecliningParser) as Arc<dyn QuadParser>,
        ),
    ]);
    assert!(processor.can_process("text/x-hydra-turtle; charset=utf-8"));
    assert!(processor.media_types().contains("text/x-declined"));

    let dataset = process(
        &processor,
        &TextResponse::new("<a> <b> <c> .", "text/x-hydra-turtle"),
    );
    assert!(has(
        &dataset,
        "http://example.org/api/a",
        "http://example.org/api/b",
        "http://example.org/api/c"
    ));

    // a registered parser that declines the body is reported as unsupported
    let err = block_on(processor.process(BASE, &TextResponse::new("", "text/x-declined")))
        .unwrap_err();
    assert!(err.is_unsupported_media_type());
}

#[test]
fn output_stream_adapts_to_async_stream() {
    let processor = MediaTypeProcessor::default();
    let response = TextResponse::new(
        "<http://ex.org/a> <http://ex.org/b> <http://ex.org/c> .",
        "application/n-triples",
    );
    let stream = block_on(processor.process(BASE, &response)).unwrap();
    let quads: Vec<_> = block_on(stream.into_stream().collect::<Vec<_>>());
    assert_eq!(quads.len(), 1);
    assert!(quads[0].is_ok());
}

#[test]
fn malformed_member_assertion_adds_nothing() {
    let processor = MediaTypeProcessor::default();
    let body = "@prefix hydra: <http://www.w3.org/ns/hydra/core#> .\n\
                <> hydra:memberAssertion [ hydra:property <knows> ] ;\n\
                   hydra:member <m1> .";
    let dataset = process(&processor, &TextResponse::new(body, "text/turtle"));
    // link, block property and member exactly as parsed
    assert_eq!(dataset.len(), 3, "{dataset}");
    assert!(!has(
        &dataset,
        "http://example.org/api/knows",
        TYPE.as_str(),
        "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property"
    ));
}

#[test]
fn process_future_and_output_are_send() {
    let processor = MediaTypeProcessor::default();
    let response = TextResponse::new(PEOPLE_TTL, "text/turtle");
    let future = processor.process(BASE, &response);
    assert_send(&future);
    let stream = block_on(future).expect("process");
    assert_send(&stream);
    assert_eq!(materialize(stream).expect("materialize").len(), 21);
}
