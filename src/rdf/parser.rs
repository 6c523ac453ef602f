use oxiri::Iri;
use rio_api::model;
use rio_api::parser::{QuadsParser, TriplesParser};
use rio_turtle::{NQuadsParser, NTriplesParser, TriGParser, TurtleError, TurtleParser};

use super::{GraphName, Quad, QuadStore, Term};

/// Textual RDF serializations accepted from a server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum RdfFormat {
    #[default]
    Turtle,
    NTriples,
    NQuads,
    TriG,
}

impl RdfFormat {
    /// Picks the parser for a `Content-Type` header value. Parameters are
    /// ignored and anything unrecognized is read as Turtle.
    pub(crate) fn from_content_type(content_type: Option<&str>) -> RdfFormat {
        let Some(content_type) = content_type else {
            return RdfFormat::default();
        };
        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match media_type.as_str() {
            "application/n-triples" => RdfFormat::NTriples,
            "application/n-quads" => RdfFormat::NQuads,
            "application/trig" => RdfFormat::TriG,
            _ => RdfFormat::Turtle,
        }
    }
}

/// Parses `text` into quads, resolving relative IRIs against `base_iri`.
///
/// The whole document is materialized and document order is kept.
pub(crate) fn parse(text: &str, base_iri: &str, format: RdfFormat) -> Result<QuadStore, TurtleError> {
    // An unusable base only matters to documents with relative IRIs, which
    // then fail to parse on their own.
    let base = Iri::parse(base_iri.to_string()).ok();
    let reader = text.as_bytes();
    let quads = match format {
        RdfFormat::Turtle => collect_triples(TurtleParser::new(reader, base))?,
        RdfFormat::NTriples => collect_triples(NTriplesParser::new(reader))?,
        RdfFormat::NQuads => collect_quads(NQuadsParser::new(reader))?,
        RdfFormat::TriG => collect_quads(TriGParser::new(reader, base))?,
    };
    Ok(QuadStore::from(quads))
}

fn collect_triples<P>(mut parser: P) -> Result<Vec<Quad>, TurtleError>
where
    P: TriplesParser<Error = TurtleError>,
{
    let mut quads = Vec::new();
    parser.parse_all(&mut |triple| -> Result<(), TurtleError> {
        quads.push(Quad {
            subject: convert_subject(triple.subject),
            predicate: triple.predicate.iri.to_string(),
            object: convert_term(triple.object),
            graph: GraphName::Default,
        });
        Ok(())
    })?;
    Ok(quads)
}

fn collect_quads<P>(mut parser: P) -> Result<Vec<Quad>, TurtleError>
where
    P: QuadsParser<Error = TurtleError>,
{
    let mut quads = Vec::new();
    parser.parse_all(&mut |quad| -> Result<(), TurtleError> {
        quads.push(Quad {
            subject: convert_subject(quad.subject),
            predicate: quad.predicate.iri.to_string(),
            object: convert_term(quad.object),
            graph: quad.graph_name.map_or(GraphName::Default, convert_graph),
        });
        Ok(())
    })?;
    Ok(quads)
}

fn convert_subject(subject: model::Subject<'_>) -> Term {
    match subject {
        model::Subject::NamedNode(node) => Term::Iri(node.iri.to_string()),
        model::Subject::BlankNode(node) => Term::BlankNode(node.id.to_string()),
        // RDF-star quoted triples never carry profile attributes
        model::Subject::Triple(triple) => Term::BlankNode(triple.to_string()),
    }
}

fn convert_term(term: model::Term<'_>) -> Term {
    match term {
        model::Term::NamedNode(node) => Term::Iri(node.iri.to_string()),
        model::Term::BlankNode(node) => Term::BlankNode(node.id.to_string()),
        model::Term::Literal(literal) => convert_literal(literal),
        model::Term::Triple(triple) => Term::BlankNode(triple.to_string()),
    }
}

fn convert_literal(literal: model::Literal<'_>) -> Term {
    match literal {
        model::Literal::Simple { value } => Term::literal(value),
        model::Literal::LanguageTaggedString { value, language } => Term::Literal {
            value: value.to_string(),
            datatype: None,
            language: Some(language.to_string()),
        },
        model::Literal::Typed { value, datatype } => Term::Literal {
            value: value.to_string(),
            datatype: Some(datatype.iri.to_string()),
            language: None,
        },
    }
}

fn convert_graph(graph: model::GraphName<'_>) -> GraphName {
    match graph {
        model::GraphName::NamedNode(node) => GraphName::Named(Term::Iri(node.iri.to_string())),
        model::GraphName::BlankNode(node) => GraphName::Named(Term::BlankNode(node.id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::{RdfFormat, parse};
    use crate::rdf::vocab::{FOAF_NAME, PIM_STORAGE, SOLID_PUBLIC_TYPE_INDEX, VCARD_FN};
    use crate::rdf::{GraphName, Term};

    const BASE: &str = "https://alice.example/profile/card";

    #[test]
    fn parse_turtle_profile() -> Result<()> {
        let text = r#"
            @prefix foaf: <http://xmlns.com/foaf/0.1/> .
            @prefix vcard: <http://www.w3.org/2006/vcard/ns#> .
            @prefix solid: <http://www.w3.org/ns/solid/terms#> .

            <#me> a foaf:Person ;
                foaf:name "Alice"@en ;
                vcard:fn "Alice A." ;
                solid:publicTypeIndex </settings/publicTypeIndex.ttl> .
        "#;
        let store = parse(text, BASE, RdfFormat::Turtle)?;
        assert_eq!(store.len(), 4);

        let first = store.iter().next().unwrap();
        assert_eq!(
            first.subject,
            Term::iri("https://alice.example/profile/card#me")
        );
        assert_eq!(first.graph, GraphName::Default);

        assert_eq!(store.extract(FOAF_NAME, ""), "Alice");
        assert_eq!(store.extract(VCARD_FN, ""), "Alice A.");
        assert_eq!(
            store.extract(SOLID_PUBLIC_TYPE_INDEX, ""),
            "https://alice.example/settings/publicTypeIndex.ttl"
        );
        Ok(())
    }

    #[test]
    fn parse_keeps_document_order_and_duplicates() -> Result<()> {
        let text = r#"
            <#me> <http://xmlns.com/foaf/0.1/name> "first" .
            <#me> <http://xmlns.com/foaf/0.1/name> "second" .
            <#me> <http://xmlns.com/foaf/0.1/name> "first" .
        "#;
        let store = parse(text, BASE, RdfFormat::Turtle)?;
        let names: Vec<_> = store.iter().map(|quad| quad.object.value()).collect();
        assert_eq!(names, ["first", "second", "first"]);
        assert_eq!(store.extract(FOAF_NAME, ""), "first");
        Ok(())
    }

    #[test]
    fn parse_empty_document() -> Result<()> {
        let store = parse("", BASE, RdfFormat::Turtle)?;
        assert!(store.is_empty());
        Ok(())
    }

    #[test]
    fn parse_malformed_turtle_fails() {
        let text = r#"<#me> <http://xmlns.com/foaf/0.1/name> "Alice" "#;
        assert!(parse(text, BASE, RdfFormat::Turtle).is_err());
    }

    #[test]
    fn parse_typed_literal() -> Result<()> {
        let text = r#"<#me> <http://xmlns.com/foaf/0.1/name> "42"^^<http://www.w3.org/2001/XMLSchema#integer> ."#;
        let store = parse(text, BASE, RdfFormat::Turtle)?;
        let object = store.first_object(FOAF_NAME).unwrap();
        assert_eq!(
            object,
            &Term::Literal {
                value: "42".to_string(),
                datatype: Some("http://www.w3.org/2001/XMLSchema#integer".to_string()),
                language: None,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_n_quads_with_named_graph() -> Result<()> {
        let text = "<https://alice.example/profile/card#me> <http://www.w3.org/ns/pim/space#storage> <https://alice.example/> <https://alice.example/graph> .\n";
        let store = parse(text, BASE, RdfFormat::NQuads)?;
        let quad = store.iter().next().unwrap();
        assert_eq!(
            quad.graph,
            GraphName::Named(Term::iri("https://alice.example/graph"))
        );
        assert_eq!(store.extract(PIM_STORAGE, ""), "https://alice.example/");
        Ok(())
    }

    #[test]
    fn format_from_content_type() {
        assert_eq!(RdfFormat::from_content_type(None), RdfFormat::Turtle);
        assert_eq!(
            RdfFormat::from_content_type(Some("text/turtle; charset=utf-8")),
            RdfFormat::Turtle
        );
        assert_eq!(
            RdfFormat::from_content_type(Some("Application/N-Triples")),
            RdfFormat::NTriples
        );
        assert_eq!(
            RdfFormat::from_content_type(Some("application/trig")),
            RdfFormat::TriG
        );
        assert_eq!(
            RdfFormat::from_content_type(Some("text/html")),
            RdfFormat::Turtle
        );
    }
}
