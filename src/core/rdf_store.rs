//! # RdfStore — Oxigraph Embutido como Fact Base
//!
//! Implementação de produção de [`KnowledgeStore`]: um
//! [`oxigraph::store::Store`] em memória carregado a partir de um
//! documento de ontologia (Turtle ou RDF/XML), com avaliação SPARQL para
//! as consultas nomeadas.
//!
//! ## Descoberta do Namespace
//!
//! O documento deve declarar a própria identidade via `owl:Ontology`:
//!
//! ```text
//! <http://example.org/manufacturing> a owl:Ontology .
//! ```
//!
//! O sujeito dessa declaração, normalizado (trim, espaço → `_`, separador
//! `#` garantido), vira o namespace sob o qual todos os indicadores são
//! endereçados. Documento sem a declaração é rejeitado no load — sem
//! namespace não há endereçamento.
//!
//! ## Ciclo de Vida
//!
//! O working set vive só em memória: fatos assertados durante o processo
//! **não são persistidos** de volta ao documento. Uma execução = um load,
//! um lote de asserções, um lote de consultas.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use oxigraph::io::RdfFormat;
use oxigraph::model::{GraphName, Literal, NamedNode, Quad, Subject};
use oxigraph::sparql::QueryResults;
use oxigraph::store::Store;

use crate::core::store::{render_term, KnowledgeStore, ResultTable};
use crate::error::KbError;
use crate::resolver;

/// IRI da classe `owl:Ontology` — marca a auto-declaração do documento.
const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";

/// Fact base RDF com avaliador SPARQL, exclusivamente possuído pelo
/// orquestrador durante a vida do processo.
pub struct RdfStore {
    /// O store oxigraph (triplas da ontologia + fatos assertados).
    store: Store,
    /// Namespace base extraído do documento, já normalizado.
    namespace: String,
}

impl std::fmt::Debug for RdfStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `oxigraph::store::Store` não implementa `Debug` — só o namespace
        // é representável aqui.
        f.debug_struct("RdfStore")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl RdfStore {
    /// Carrega o documento de ontologia em `path` e extrai seu namespace.
    ///
    /// O formato é escolhido pela extensão: `.owl`/`.rdf`/`.xml` →
    /// RDF/XML, `.nt` → N-Triples, qualquer outra → Turtle.
    ///
    /// # Erros
    ///
    /// [`KbError::Load`] se o arquivo não existir, não parsear, ou não
    /// declarar um `owl:Ontology`.
    pub fn load(path: &Path) -> Result<Self, KbError> {
        let load_err = |reason: String| KbError::Load {
            path: path.display().to_string(),
            reason,
        };
        let file = File::open(path).map_err(|e| load_err(e.to_string()))?;
        let store = Store::new().map_err(|e| load_err(e.to_string()))?;
        store
            .load_from_reader(Self::format_for(path), BufReader::new(file))
            .map_err(|e| load_err(e.to_string()))?;
        Self::bind(store, path.display().to_string())
    }

    /// Carrega uma ontologia a partir de um documento Turtle em memória.
    ///
    /// Mesmo contrato de [`RdfStore::load`], sem tocar o filesystem.
    pub fn from_turtle(document: &str) -> Result<Self, KbError> {
        let load_err = |reason: String| KbError::Load {
            path: "<memória>".to_string(),
            reason,
        };
        let store = Store::new().map_err(|e| load_err(e.to_string()))?;
        store
            .load_from_reader(RdfFormat::Turtle, document.as_bytes())
            .map_err(|e| load_err(e.to_string()))?;
        Self::bind(store, "<memória>".to_string())
    }

    /// Extrai o namespace auto-declarado e finaliza a construção.
    fn bind(store: Store, origin: String) -> Result<Self, KbError> {
        let declared = Self::declared_namespace(&store).ok_or_else(|| KbError::Load {
            path: origin,
            reason: "o documento não declara um owl:Ontology".to_string(),
        })?;
        let namespace = resolver::ensure_separator(&resolver::normalize(&declared));
        tracing::info!(
            namespace = %namespace,
            triplas = store.len().unwrap_or(0),
            "ontologia carregada"
        );
        Ok(Self { store, namespace })
    }

    /// Busca o sujeito da primeira tripla `?s a owl:Ontology`.
    fn declared_namespace(store: &Store) -> Option<String> {
        let owl_ontology = NamedNode::new(OWL_ONTOLOGY).ok()?;
        let quad = store
            .quads_for_pattern(
                None,
                Some(oxigraph::model::vocab::rdf::TYPE),
                Some(owl_ontology.as_ref().into()),
                None,
            )
            .next()?
            .ok()?;
        match quad.subject {
            Subject::NamedNode(n) => Some(n.into_string()),
            _ => None,
        }
    }

    /// Formato RDF inferido pela extensão do arquivo.
    fn format_for(path: &Path) -> RdfFormat {
        match path.extension().and_then(|e| e.to_str()) {
            Some("owl") | Some("rdf") | Some("xml") => RdfFormat::RdfXml,
            Some("nt") => RdfFormat::NTriples,
            _ => RdfFormat::Turtle,
        }
    }
}

impl KnowledgeStore for RdfStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn assert_value(
        &mut self,
        subject: &NamedNode,
        relation: &NamedNode,
        value: f64,
    ) -> Result<(), KbError> {
        // Literal xsd:double — mesma tipagem do valor numérico original.
        let fact = Quad::new(
            subject.clone(),
            relation.clone(),
            Literal::from(value),
            GraphName::DefaultGraph,
        );
        self.store.insert(&fact).map_err(|e| KbError::Assertion {
            subject: subject.as_str().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(subject = %subject, value, "fato registrado no working set");
        Ok(())
    }

    fn evaluate(&self, name: &str, sparql: &str) -> Result<ResultTable, KbError> {
        let query_err = |reason: String| KbError::Query {
            name: name.to_string(),
            reason,
        };
        let results = self
            .store
            .query(sparql)
            .map_err(|e| query_err(e.to_string()))?;
        let QueryResults::Solutions(solutions) = results else {
            return Err(query_err(
                "a consulta não é SELECT (não produz linhas)".to_string(),
            ));
        };
        let mut rows = Vec::new();
        for solution in solutions {
            let solution = solution.map_err(|e| query_err(e.to_string()))?;
            rows.push(
                solution
                    .iter()
                    .map(|(var, term)| (var.as_str().to_string(), render_term(term)))
                    .collect(),
            );
        }
        Ok(ResultTable { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DEMO: &str = r#"
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        <http://example.org/demo> a owl:Ontology .
    "#;

    fn demo_store() -> RdfStore {
        RdfStore::from_turtle(DEMO).unwrap()
    }

    // ─── load / namespace ──────────────────────────────────────

    #[test]
    fn namespace_gains_trailing_hash() {
        assert_eq!(demo_store().namespace(), "http://example.org/demo#");
    }

    #[test]
    fn namespace_with_separator_kept() {
        let doc = r#"
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            <http://example.org/demo#> a owl:Ontology .
        "#;
        let store = RdfStore::from_turtle(doc).unwrap();
        assert_eq!(store.namespace(), "http://example.org/demo#");
    }

    #[test]
    fn missing_ontology_declaration_is_load_error() {
        let doc = r#"<http://example.org/x> <http://example.org/p> "y" ."#;
        let err = RdfStore::from_turtle(doc).unwrap_err();
        assert!(matches!(err, KbError::Load { .. }));
    }

    #[test]
    fn unparseable_document_is_load_error() {
        let err = RdfStore::from_turtle("isto não é turtle @@@").unwrap_err();
        assert!(matches!(err, KbError::Load { .. }));
    }

    #[test]
    fn missing_file_is_load_error() {
        let err = RdfStore::load(Path::new("/nao/existe/ontologia.ttl")).unwrap_err();
        assert!(matches!(err, KbError::Load { .. }));
    }

    #[test]
    fn load_from_file_extracts_namespace() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DEMO.as_bytes()).unwrap();
        let store = RdfStore::load(file.path()).unwrap();
        assert_eq!(store.namespace(), "http://example.org/demo#");
    }

    // ─── assert_value ──────────────────────────────────────────

    #[test]
    fn assertions_accumulate_append_only() {
        let mut store = demo_store();
        let subject = crate::resolver::resolve(store.namespace(), "AREA_POWER").unwrap();
        let relation = crate::resolver::resolve(store.namespace(), "hasValue").unwrap();
        store.assert_value(&subject, &relation, 144.0).unwrap();
        store.assert_value(&subject, &relation, 150.0).unwrap();

        let table = store
            .evaluate(
                "count",
                "SELECT ?v WHERE { <http://example.org/demo#AREA_POWER> \
                 <http://example.org/demo#hasValue> ?v }",
            )
            .unwrap();
        // Duas asserções coexistem — append, não replace.
        assert_eq!(table.len(), 2);
    }

    // ─── evaluate ──────────────────────────────────────────────

    #[test]
    fn malformed_sparql_is_query_error() {
        let err = demo_store().evaluate("bad", "SELECT WHERE {").unwrap_err();
        assert!(matches!(err, KbError::Query { .. }));
    }

    #[test]
    fn non_select_query_is_query_error() {
        let err = demo_store()
            .evaluate("ask", "ASK { ?s ?p ?o }")
            .unwrap_err();
        assert!(matches!(err, KbError::Query { .. }));
    }

    #[test]
    fn select_over_empty_match_is_empty_table() {
        let table = demo_store()
            .evaluate(
                "none",
                "SELECT ?v WHERE { <http://example.org/demo#X> \
                 <http://example.org/demo#hasValue> ?v }",
            )
            .unwrap();
        assert!(table.is_empty());
        assert_eq!(table.to_text(), "(vazio)");
    }
}
