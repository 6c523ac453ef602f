//! Just enough RDF to read a profile document

mod parser;
pub(crate) mod vocab;

pub(crate) use parser::{RdfFormat, parse};

/// An RDF term in subject, object or graph position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Term {
    Iri(String),
    BlankNode(String),
    Literal {
        value: String,
        datatype: Option<String>,
        language: Option<String>,
    },
}

impl Term {
    #[cfg(test)]
    pub(crate) fn iri(iri: impl Into<String>) -> Term {
        Term::Iri(iri.into())
    }

    pub(crate) fn literal(value: impl Into<String>) -> Term {
        Term::Literal {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    /// The IRI, blank node label or lexical form, without any type metadata.
    pub(crate) fn value(&self) -> &str {
        match self {
            Term::Iri(iri) => iri,
            Term::BlankNode(id) => id,
            Term::Literal { value, .. } => value,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub(crate) enum GraphName {
    #[default]
    Default,
    Named(Term),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Quad {
    pub(crate) subject: Term,
    pub(crate) predicate: String,
    pub(crate) object: Term,
    pub(crate) graph: GraphName,
}

#[cfg(test)]
impl Quad {
    pub(crate) fn new(subject: Term, predicate: impl Into<String>, object: Term) -> Quad {
        Quad {
            subject,
            predicate: predicate.into(),
            object,
            graph: GraphName::Default,
        }
    }
}

/// The quads of one fetched document, in document order.
///
/// Duplicates are kept and lookups are linear scans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct QuadStore {
    quads: Vec<Quad>,
}

impl QuadStore {
    pub(crate) fn empty() -> QuadStore {
        QuadStore::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.quads.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.quads.iter()
    }

    /// Object of the first quad whose predicate is exactly `predicate`.
    pub(crate) fn first_object(&self, predicate: &str) -> Option<&Term> {
        self.quads
            .iter()
            .find(|quad| quad.predicate == predicate)
            .map(|quad| &quad.object)
    }

    /// Value of the first `predicate` object, or `default` when there is none.
    pub(crate) fn extract<'a>(&'a self, predicate: &str, default: &'a str) -> &'a str {
        self.first_object(predicate)
            .map(Term::value)
            .unwrap_or(default)
    }
}

impl From<Vec<Quad>> for QuadStore {
    fn from(quads: Vec<Quad>) -> Self {
        QuadStore { quads }
    }
}

impl FromIterator<Quad> for QuadStore {
    fn from_iter<T: IntoIterator<Item = Quad>>(iter: T) -> Self {
        QuadStore {
            quads: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::vocab::{FOAF_NAME, PIM_STORAGE, VCARD_FN};
    use super::{Quad, QuadStore, Term};

    const ME: &str = "https://alice.example/profile/card#me";

    #[test]
    fn extract_missing_predicate_returns_default() {
        let store = QuadStore::from(vec![Quad::new(
            Term::iri(ME),
            FOAF_NAME,
            Term::literal("Alice"),
        )]);
        assert_eq!(store.extract(PIM_STORAGE, "hmm, not found"), "hmm, not found");
        assert_eq!(QuadStore::empty().extract(FOAF_NAME, ""), "");
    }

    #[test]
    fn extract_returns_first_match_in_document_order() {
        let store: QuadStore = [
            Quad::new(Term::iri(ME), VCARD_FN, Term::literal("Alice A.")),
            Quad::new(Term::iri(ME), FOAF_NAME, Term::literal("Alice")),
            Quad::new(Term::iri(ME), FOAF_NAME, Term::literal("Alicia")),
            Quad::new(Term::iri(ME), FOAF_NAME, Term::literal("Alice")),
        ]
        .into_iter()
        .collect();
        assert_eq!(store.len(), 4);
        assert_eq!(store.extract(FOAF_NAME, "Anonymous"), "Alice");
        assert_eq!(store.extract(VCARD_FN, "Anonymous"), "Alice A.");
    }

    #[test]
    fn extract_ignores_literal_metadata() {
        let store = QuadStore::from(vec![Quad::new(
            Term::iri(ME),
            FOAF_NAME,
            Term::Literal {
                value: "Alice".to_string(),
                datatype: None,
                language: Some("en".to_string()),
            },
        )]);
        assert_eq!(store.extract(FOAF_NAME, "Anonymous"), "Alice");
    }

    #[test]
    fn extract_returns_iri_objects_verbatim() {
        let store = QuadStore::from(vec![Quad::new(
            Term::iri(ME),
            PIM_STORAGE,
            Term::iri("https://alice.example/"),
        )]);
        assert!(store.first_object(PIM_STORAGE).is_some_and(Term::is_iri));
        assert_eq!(store.extract(PIM_STORAGE, "none"), "https://alice.example/");
    }
}
