//! Inference rules that materialize triples implied by Hydra documents.
//!
//! Rules only ever add quads, and only quads derivable from the dataset itself plus the Hydra
//! Core vocabulary. The [`InferenceEngine`] runs its rules in declaration order and repeats full
//! passes until nothing new is added, so a rule whose precondition matches another rule's
//! output still sees it regardless of where it sits in the list.

use crate::consts::{HYDRA_RANGES, MANAGES, MEMBER, MEMBER_ASSERTION, OBJECT, PROPERTY, SUBJECT, TYPE};
use crate::util::quads_for_pattern;
use log::{debug, info, warn};
use oxigraph::model::{Dataset, NamedNodeRef, NamedOrBlankNodeRef, Quad, TermRef};

pub trait InferenceRule: Send + Sync {
    /// Stable identifier, used to disable rules from configuration.
    fn name(&self) -> &'static str;

    /// Adds every quad this rule derives from `dataset`. Must never remove quads.
    fn apply(&self, dataset: &mut Dataset);
}

/// The rules every processor runs unless configured otherwise, in execution order.
pub fn standard_rules() -> Vec<Box<dyn InferenceRule>> {
    vec![Box::new(ManagesBlockRule), Box::new(HydraRangeRule)]
}

fn as_subject(term: TermRef<'_>) -> Option<NamedOrBlankNodeRef<'_>> {
    match term {
        TermRef::NamedNode(nn) => Some(NamedOrBlankNodeRef::NamedNode(nn)),
        TermRef::BlankNode(bn) => Some(NamedOrBlankNodeRef::BlankNode(bn)),
        _ => None,
    }
}

/// A well-formed member assertion (manages block).
#[derive(Debug, Clone, Copy)]
enum MemberAssertion<'a> {
    /// `subject property ?member`
    Subject {
        subject: NamedOrBlankNodeRef<'a>,
        property: NamedNodeRef<'a>,
    },
    /// `?member property object`
    Object {
        property: NamedNodeRef<'a>,
        object: TermRef<'a>,
    },
}

impl<'a> MemberAssertion<'a> {
    /// Returns `None` for blocks without a property, or with neither or both of
    /// subject and object.
    fn read(dataset: &'a Dataset, block: NamedOrBlankNodeRef<'a>) -> Option<Self> {
        let value = |predicate: NamedNodeRef<'a>| {
            quads_for_pattern(dataset, Some(block), Some(predicate), None, None)
                .map(|q| q.object)
                .next()
        };
        let property = match value(PROPERTY)? {
            TermRef::NamedNode(nn) => nn,
            _ => return None,
        };
        match (value(SUBJECT), value(OBJECT)) {
            (Some(subject), None) => Some(MemberAssertion::Subject {
                subject: as_subject(subject)?,
                property,
            }),
            (None, Some(object)) => Some(MemberAssertion::Object { property, object }),
            _ => None,
        }
    }
}

/// Expands member assertions into explicit statements about every member of the collection.
///
/// Given `?c hydra:memberAssertion ?b` (or the older `hydra:manages`) and `?c hydra:member ?m`:
/// - `?b hydra:subject ?s ; hydra:property ?p` adds `?s ?p ?m`
/// - `?b hydra:property ?p ; hydra:object ?o` adds `?m ?p ?o`
///
/// Derived quads go to the graph holding the `hydra:member` statement.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManagesBlockRule;

impl InferenceRule for ManagesBlockRule {
    fn name(&self) -> &'static str {
        "manages-block"
    }

    fn apply(&self, dataset: &mut Dataset) {
        let view = &*dataset;
        let mut derived: Vec<Quad> = vec![];
        for link in [MEMBER_ASSERTION, MANAGES] {
            for block_quad in view.quads_for_predicate(link) {
                let resource = block_quad.subject;
                let Some(block) = as_subject(block_quad.object) else {
                    debug!("Skipping literal member assertion on {}", resource);
                    continue;
                };
                let Some(assertion) = MemberAssertion::read(view, block) else {
                    debug!("Skipping incomplete member assertion {} on {}", block, resource);
                    continue;
                };
                for member_quad in quads_for_pattern(view, Some(resource), Some(MEMBER), None, None)
                {
                    let member = member_quad.object;
                    let graph = member_quad.graph_name;
                    match assertion {
                        MemberAssertion::Subject { subject, property } => {
                            derived.push(Quad::new(subject, property, member, graph));
                        }
                        MemberAssertion::Object { property, object } => match as_subject(member) {
                            Some(member) => derived.push(Quad::new(member, property, object, graph)),
                            None => debug!("Skipping literal member {} of {}", member, resource),
                        },
                    }
                }
            }
        }
        for quad in derived {
            dataset.insert(&quad);
        }
    }
}

/// Whether `node` is linked as a member assertion block but cannot be read as one.
fn is_malformed_block(dataset: &Dataset, node: NamedOrBlankNodeRef<'_>) -> bool {
    let linked = [MEMBER_ASSERTION, MANAGES].into_iter().any(|link| {
        quads_for_pattern(dataset, None, Some(link), Some(node.into()), None)
            .next()
            .is_some()
    });
    linked && MemberAssertion::read(dataset, node).is_none()
}

/// Types the objects of Hydra API documentation properties with their declared `rdfs:range`.
///
/// `hydra:property` statements of malformed member assertion blocks are left alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct HydraRangeRule;

impl InferenceRule for HydraRangeRule {
    fn name(&self) -> &'static str {
        "hydra-ranges"
    }

    fn apply(&self, dataset: &mut Dataset) {
        let view = &*dataset;
        let mut derived: Vec<Quad> = vec![];
        for (property, range) in HYDRA_RANGES {
            for quad in view.quads_for_predicate(property) {
                if property == PROPERTY && is_malformed_block(view, quad.subject) {
                    debug!("Skipping range of malformed member assertion {}", quad.subject);
                    continue;
                }
                if let Some(node) = as_subject(quad.object) {
                    derived.push(Quad::new(node, TYPE, range, quad.graph_name));
                }
            }
        }
        for quad in derived {
            dataset.insert(&quad);
        }
    }
}

/// Ordered rule list applied to a materialized dataset.
pub struct InferenceEngine {
    rules: Vec<Box<dyn InferenceRule>>,
    max_rounds: Option<usize>,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new(standard_rules())
    }
}

impl InferenceEngine {
    pub fn new(rules: Vec<Box<dyn InferenceRule>>) -> Self {
        Self {
            rules,
            max_rounds: None,
        }
    }

    /// Caps the number of full passes `apply_all` makes. Values below one are treated as one.
    ///
    /// Without a cap the engine always reaches a fixpoint, since rules only combine terms already
    /// in the dataset with vocabulary constants. A capped engine is only idempotent when the
    /// dataset's derivation chains fit within the cap.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = Some(max_rounds.max(1));
        self
    }

    /// Drops every rule whose name appears in `names`.
    pub fn without<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.rules
            .retain(|rule| !names.iter().any(|name| name.as_ref() == rule.name()));
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Runs every rule against `dataset` until a full pass adds nothing, returning the number of
    /// quads added.
    pub fn apply_all(&self, dataset: &mut Dataset) -> usize {
        let initial = dataset.len();
        let mut round = 0;
        loop {
            round += 1;
            let before = dataset.len();
            for rule in &self.rules {
                let len = dataset.len();
                rule.apply(dataset);
                debug!("Rule {} added {} quads", rule.name(), dataset.len() - len);
            }
            if dataset.len() == before {
                debug!("Inference reached a fixpoint after {} rounds", round);
                break;
            }
            if self.max_rounds.is_some_and(|max| round >= max) {
                warn!("Inference stopped after {} rounds before reaching a fixpoint", round);
                break;
            }
        }
        let added = dataset.len() - initial;
        info!("Inference added {} quads", added);
        added
    }
}
