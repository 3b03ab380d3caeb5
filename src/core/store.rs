//! # KnowledgeStore — A Costura com o Motor de Conhecimento
//!
//! O motor de base de conhecimento (armazenamento de triplas + avaliador
//! de consultas) é uma **capacidade externa consumida**, nunca
//! reimplementada aqui. Este módulo define a interface estreita pela qual
//! o [`Orchestrator`](crate::orchestrator::Orchestrator) conversa com ele:
//!
//! - `namespace()` — o namespace que o documento carregado declara para si
//! - `assert_value()` — acrescenta um fato `(sujeito, relação, valor)`
//! - `evaluate()` — avalia uma consulta SELECT, sem mutação
//!
//! A implementação de produção é [`RdfStore`](crate::core::rdf_store::RdfStore)
//! (oxigraph embutido). Os testes do orquestrador usam a mesma interface
//! com stubs para exercitar os caminhos de erro.

use oxigraph::model::{NamedNode, Term};

use crate::error::KbError;

/// Interface estreita sobre o motor de base de conhecimento.
///
/// Uma implementação é **exclusivamente possuída** pelo orquestrador
/// durante a vida do processo — um único escritor e um único leitor, a
/// mesma thread, sem disciplina de locks.
pub trait KnowledgeStore {
    /// Namespace base auto-declarado pela ontologia carregada.
    ///
    /// Já normalizado: termina garantidamente em `#` ou `/`.
    fn namespace(&self) -> &str;

    /// Acrescenta o fato `(subject, relation, valor xsd:double)` ao
    /// working set em memória.
    ///
    /// Semântica **append-only**: asserções se acumulam; chamar duas vezes
    /// para o mesmo sujeito com valores diferentes produz dois fatos
    /// coexistentes, não uma substituição.
    ///
    /// # Erros
    ///
    /// [`KbError::Assertion`] se o fact base rejeitar o fato.
    fn assert_value(
        &mut self,
        subject: &NamedNode,
        relation: &NamedNode,
        value: f64,
    ) -> Result<(), KbError>;

    /// Avalia uma consulta SPARQL SELECT sobre o estado atual do store.
    ///
    /// `name` serve apenas para diagnóstico nos erros. Sem mutação:
    /// determinística enquanto o fact base não mudar.
    ///
    /// # Erros
    ///
    /// [`KbError::Query`] para SPARQL malformado, falha de avaliação, ou
    /// forma de consulta que não produz linhas (ASK/CONSTRUCT).
    fn evaluate(&self, name: &str, sparql: &str) -> Result<ResultTable, KbError>;
}

/// Resultado tabular de uma consulta nomeada.
///
/// Cada linha é a lista de pares `(variável, termo renderizado)` de uma
/// solução SPARQL, na ordem em que o avaliador as produziu.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResultTable {
    /// Linhas de solução: pares `(variável, valor renderizado)`.
    pub rows: Vec<Vec<(String, String)>>,
}

impl ResultTable {
    /// Número de linhas no resultado.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` quando a consulta não produziu nenhuma linha.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serializa o resultado para exibição.
    ///
    /// Uma linha de texto por solução, no formato
    /// `?var=valor, ?var=valor`. As linhas são **ordenadas
    /// lexicograficamente** antes da junção — a ordem de iteração do
    /// avaliador não é garantida, e a saída precisa ser determinística
    /// para um fact base inalterado.
    ///
    /// Resultado vazio vira `(vazio)`.
    pub fn to_text(&self) -> String {
        if self.rows.is_empty() {
            return "(vazio)".to_string();
        }
        let mut lines: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|(var, value)| format!("?{var}={value}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .collect();
        lines.sort();
        lines.join("\n")
    }
}

/// Renderiza um termo RDF para exibição.
///
/// IRIs aparecem sem os colchetes angulares, literais só com a forma
/// lexical (sem aspas nem datatype) — o formato N-Triples completo é
/// ruído para quem lê o resultado de uma consulta de estados.
pub fn render_term(term: &Term) -> String {
    match term {
        Term::NamedNode(n) => n.as_str().to_string(),
        Term::Literal(l) => l.value().to_string(),
        other => other.to_string(),
    }
}
