//! # Orquestrador — Ingestão de Indicadores e Consultas Derivadas
//!
//! O [`Orchestrator`] rege a sequência completa de uma execução:
//!
//! ```text
//! initialize(config)
//!   │
//!   ├── 1. Carrega a ontologia e extrai o namespace auto-declarado
//!   ├── 2. Monta o registro de consultas nomeadas (nome → SPARQL)
//!   │
//! ingest(observations)            — para cada (nome, valor), em ordem:
//!   ├── resolve nome → IRI do indicador
//!   ├── resolve "hasValue" → IRI da relação
//!   └── asserta o fato (indicador, hasValue, valor) no fact base
//!   │
//! execute_named_query(nome)       — para cada consulta configurada:
//!   └── avalia o SPARQL registrado e serializa as linhas para texto
//! ```
//!
//! ## Estado
//!
//! Não há máquina de estados além de *não-inicializado → inicializado →
//! (ingerindo | consultando)*. A inicialização é única e não-retryável por
//! execução; o store é exclusivamente possuído pelo orquestrador.
//!
//! ## Semântica de Asserção
//!
//! **Append-only**: ingerir o mesmo indicador duas vezes com valores
//! diferentes produz dois fatos coexistentes — nada é sobrescrito nem
//! deduplicado. Consultas posteriores veem todas as asserções anteriores.
//!
//! ## Falhas
//!
//! Fail-fast: qualquer erro ([`KbError`]) aborta o lote inteiro e sobe
//! até o `main` — sem isolamento por indicador neste desenho batch.

use std::collections::HashMap;

use crate::config::{NamedQuery, Observation, RunConfig};
use crate::core::{KnowledgeStore, RdfStore};
use crate::error::KbError;
use crate::resolver;

/// Nome fixo da relação de valor — resolvido contra o mesmo namespace
/// que os indicadores, exatamente como qualquer outro nome de entidade.
pub const RELATION_HAS_VALUE: &str = "hasValue";

/// Orquestrador do pipeline: fact base + registro de consultas nomeadas.
///
/// Genérico sobre [`KnowledgeStore`] — a costura que permite exercitar o
/// orquestrador com stubs nos testes sem tocar o oxigraph.
pub struct Orchestrator<S: KnowledgeStore> {
    /// Fact base exclusivamente possuído (um escritor, um leitor, uma thread).
    store: S,
    /// Registro de consultas pré-declaradas: nome → texto SPARQL.
    queries: HashMap<String, String>,
}

impl Orchestrator<RdfStore> {
    /// Inicializa o orquestrador de produção a partir da configuração.
    ///
    /// Carrega o documento de ontologia, extrai o namespace, e registra
    /// as consultas nomeadas. Passo único, não-retryável.
    ///
    /// # Erros
    ///
    /// [`KbError::Load`] se o documento não carregar — nenhuma ingestão
    /// parcial ocorre.
    pub fn initialize(config: &RunConfig) -> Result<Self, KbError> {
        let store = RdfStore::load(&config.ontology_path)?;
        Ok(Self::new(store, &config.queries))
    }
}

impl<S: KnowledgeStore> Orchestrator<S> {
    /// Constrói um orquestrador sobre um store já carregado.
    pub fn new(store: S, queries: &[NamedQuery]) -> Self {
        let queries = queries
            .iter()
            .map(|q| (q.name.clone(), q.sparql.clone()))
            .collect();
        Self { store, queries }
    }

    /// Namespace base sob o qual os indicadores são endereçados.
    pub fn namespace(&self) -> &str {
        self.store.namespace()
    }

    /// Ingere uma observação: resolve os nomes e asserta o fato.
    ///
    /// Resolve `name` e a relação fixa [`RELATION_HAS_VALUE`] contra o
    /// namespace da ontologia, e acrescenta a tripla
    /// `(indicador, hasValue, valor)` ao working set.
    ///
    /// # Erros
    ///
    /// - [`KbError::Addressing`] — o nome não resolve para IRI válido
    /// - [`KbError::Assertion`] — o fact base rejeitou o fato
    pub fn set_indicator_value(&mut self, name: &str, value: f64) -> Result<(), KbError> {
        let indicator = resolver::resolve(self.store.namespace(), name)?;
        let relation = resolver::resolve(self.store.namespace(), RELATION_HAS_VALUE)?;
        tracing::info!(indicador = %indicator, value, "ingerindo observação");
        self.store.assert_value(&indicator, &relation, value)
    }

    /// Ingere um lote de observações, na ordem dada.
    ///
    /// Fail-fast: a primeira falha aborta o lote (asserções anteriores
    /// permanecem no working set em memória).
    pub fn ingest(&mut self, observations: &[Observation]) -> Result<(), KbError> {
        for obs in observations {
            self.set_indicator_value(&obs.name, obs.value)?;
        }
        tracing::info!(total = observations.len(), "lote de observações ingerido");
        Ok(())
    }

    /// Avalia uma consulta nomeada e devolve o resultado serializado.
    ///
    /// Sem mutação — pode ser chamada repetidamente e é determinística
    /// para um fact base inalterado.
    ///
    /// # Erros
    ///
    /// [`KbError::Query`] se o nome não estiver no registro, ou se a
    /// avaliação falhar.
    pub fn execute_named_query(&self, name: &str) -> Result<String, KbError> {
        let sparql = self.queries.get(name).ok_or_else(|| KbError::Query {
            name: name.to_string(),
            reason: "consulta não declarada no registro".to_string(),
        })?;
        let table = self.store.evaluate(name, sparql)?;
        tracing::debug!(consulta = name, linhas = table.len(), "consulta avaliada");
        Ok(table.to_text())
    }

    /// Avalia um lote de consultas, em ordem, devolvendo `(nome, texto)`.
    pub fn run_queries(&self, names: &[String]) -> Result<Vec<(String, String)>, KbError> {
        names
            .iter()
            .map(|name| Ok((name.clone(), self.execute_named_query(name)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{render_term, ResultTable};
    use oxigraph::model::{Literal, NamedNode};

    const DEMO: &str = r#"
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        <http://example.org/demo> a owl:Ontology .
    "#;

    const GET_STATES: &str = "\
        PREFIX kb: <http://example.org/demo#> \
        SELECT ?indicator ?value \
        WHERE { ?indicator kb:hasValue ?value . FILTER(?value > 100) }";

    const GET_RESUME: &str = "\
        PREFIX kb: <http://example.org/demo#> \
        SELECT (COUNT(?indicator) AS ?indicators) \
        WHERE { ?indicator kb:hasValue ?value }";

    fn demo_orchestrator() -> Orchestrator<RdfStore> {
        let store = RdfStore::from_turtle(DEMO).unwrap();
        let queries = vec![
            NamedQuery {
                name: "GetStates".to_string(),
                sparql: GET_STATES.to_string(),
            },
            NamedQuery {
                name: "GetResume".to_string(),
                sparql: GET_RESUME.to_string(),
            },
        ];
        Orchestrator::new(store, &queries)
    }

    // ─── end-to-end ────────────────────────────────────────────

    #[test]
    fn get_states_surfaces_only_values_above_threshold() {
        let mut orch = demo_orchestrator();
        orch.set_indicator_value("AREA_POWER", 144.0).unwrap();
        orch.set_indicator_value("TOOL_COUNT", 18.0).unwrap();

        let text = orch.execute_named_query("GetStates").unwrap();
        assert!(text.contains("AREA_POWER"));
        assert!(!text.contains("TOOL_COUNT"));
        // O valor aparece com a mesma renderização do literal assertado.
        let rendered = render_term(&Literal::from(144.0).into());
        assert!(text.contains(&rendered));
    }

    #[test]
    fn get_resume_counts_all_indicators() {
        let mut orch = demo_orchestrator();
        orch.set_indicator_value("AREA_POWER", 144.0).unwrap();
        orch.set_indicator_value("TOOL_COUNT", 18.0).unwrap();

        let text = orch.execute_named_query("GetResume").unwrap();
        assert_eq!(text, "?indicators=2");
    }

    #[test]
    fn space_and_underscore_ingest_same_indicator() {
        let mut orch = demo_orchestrator();
        orch.set_indicator_value("AREA POWER", 144.0).unwrap();
        orch.set_indicator_value("AREA_POWER", 144.0).unwrap();

        // Mesmo identificador + mesmo valor = um único fato (semântica de
        // conjunto do RDF); a contagem de indicadores distintos é 1.
        let text = orch.execute_named_query("GetResume").unwrap();
        assert_eq!(text, "?indicators=1");
    }

    #[test]
    fn repeated_ingestion_accumulates_assertions() {
        let mut orch = demo_orchestrator();
        orch.set_indicator_value("AREA_POWER", 144.0).unwrap();
        orch.set_indicator_value("AREA_POWER", 150.0).unwrap();

        let text = orch.execute_named_query("GetStates").unwrap();
        // Duas linhas, ambas do mesmo indicador — append, não replace.
        assert_eq!(text.lines().count(), 2);
    }

    // ─── erros ─────────────────────────────────────────────────

    #[test]
    fn unknown_query_fails_without_touching_store() {
        let mut orch = demo_orchestrator();
        orch.set_indicator_value("AREA_POWER", 144.0).unwrap();

        let err = orch.execute_named_query("GetNothing").unwrap_err();
        assert!(matches!(err, KbError::Query { .. }));

        // O fact base permanece inalterado após a falha.
        let text = orch.execute_named_query("GetResume").unwrap();
        assert_eq!(text, "?indicators=1");
    }

    #[test]
    fn invalid_indicator_name_fails_addressing() {
        let mut orch = demo_orchestrator();
        let err = orch.set_indicator_value("BAD<NAME>", 1.0).unwrap_err();
        assert!(matches!(err, KbError::Addressing { .. }));
    }

    // ─── stub: rejeição de asserção ────────────────────────────

    /// Stub que rejeita toda asserção — exercita a propagação de
    /// [`KbError::Assertion`] sem depender do comportamento do oxigraph.
    struct RejectingStore;

    impl KnowledgeStore for RejectingStore {
        fn namespace(&self) -> &str {
            "http://example.org/demo#"
        }

        fn assert_value(
            &mut self,
            subject: &NamedNode,
            _relation: &NamedNode,
            _value: f64,
        ) -> Result<(), KbError> {
            Err(KbError::Assertion {
                subject: subject.as_str().to_string(),
                reason: "tipo incompatível na relação".to_string(),
            })
        }

        fn evaluate(&self, _name: &str, _sparql: &str) -> Result<ResultTable, KbError> {
            Ok(ResultTable::default())
        }
    }

    #[test]
    fn assertion_rejection_propagates() {
        let mut orch = Orchestrator::new(RejectingStore, &[]);
        let err = orch.set_indicator_value("AREA_POWER", 144.0).unwrap_err();
        assert!(matches!(err, KbError::Assertion { .. }));
    }
}
