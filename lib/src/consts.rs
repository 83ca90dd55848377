//! Defines constant NamedNodeRefs for the Hydra Core vocabulary terms used by the inference
//! rules, along with the media types served by the default parser set.

use oxigraph::model::NamedNodeRef;

pub const TYPE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
pub const RDF_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#Property");

// collections
pub const MEMBER: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#member");
pub const MEMBER_ASSERTION: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#memberAssertion");
// older drafts of Hydra named the member assertion block hydra:manages
pub const MANAGES: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#manages");
pub const SUBJECT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#subject");
pub const PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#property");
pub const OBJECT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#object");

// api documentation
pub const SUPPORTED_CLASS: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#supportedClass");
pub const SUPPORTED_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#supportedProperty");
pub const SUPPORTED_OPERATION: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#supportedOperation");
pub const OPERATION: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#operation");
pub const SEARCH: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#search");
pub const MAPPING: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#mapping");

pub const CLASS: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#Class");
pub const SUPPORTED_PROPERTY_CLASS: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#SupportedProperty");
pub const OPERATION_CLASS: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#Operation");
pub const IRI_TEMPLATE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#IriTemplate");
pub const IRI_TEMPLATE_MAPPING: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/hydra/core#IriTemplateMapping");

/// `rdfs:range` declarations of the Hydra Core vocabulary that the range rule materializes.
pub const HYDRA_RANGES: [(NamedNodeRef<'_>, NamedNodeRef<'_>); 7] = [
    (SUPPORTED_CLASS, CLASS),
    (SUPPORTED_PROPERTY, SUPPORTED_PROPERTY_CLASS),
    (PROPERTY, RDF_PROPERTY),
    (SUPPORTED_OPERATION, OPERATION_CLASS),
    (OPERATION, OPERATION_CLASS),
    (SEARCH, IRI_TEMPLATE),
    (MAPPING, IRI_TEMPLATE_MAPPING),
];

/// Media types registered by [`crate::registry::ParserRegistry::with_defaults`].
pub const DEFAULT_MEDIA_TYPES: &[&str] = &[
    "text/turtle",
    "application/ld+json",
    "application/n-quads",
    "application/trig",
    "application/rdf+xml",
    "application/n-triples",
    "text/n3",
];
