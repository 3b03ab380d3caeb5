//! # Taxonomia de Erros
//!
//! Todos os erros do pipeline de ingestão/consulta pertencem a uma das
//! quatro classes de [`KbError`]. A política de propagação é **fail-fast**:
//! nenhum erro é recuperado localmente — todos sobem até o `main`, que
//! imprime o diagnóstico e encerra o processo com status não-zero.
//!
//! | Variante | Quando ocorre | Efeito |
//! |----------|---------------|--------|
//! | `Load` | Documento de ontologia ausente, ilegível ou sem declaração de namespace | Aborta antes de qualquer ingestão |
//! | `Addressing` | Nome não resolve para um IRI absoluto válido | Aborta o lote de ingestão |
//! | `Assertion` | O fact base rejeita a asserção | Aborta o lote de ingestão |
//! | `Query` | Consulta não declarada ou falha na avaliação | Aborta o lote de consultas |
//!
//! Num redesign como serviço de longa duração, o correto seria isolar
//! falhas por indicador/consulta e devolver uma lista estruturada de erros
//! em vez de abortar no primeiro — fica registrado para quando (se) o PoC
//! evoluir nessa direção.

use thiserror::Error;

/// Erro do pipeline de ingestão de indicadores e consultas derivadas.
///
/// Cada variante carrega o identificador do elemento que falhou (caminho,
/// nome ou sujeito) e um `reason` textual vindo da camada subjacente
/// (parser de IRI, loader RDF, avaliador SPARQL).
#[derive(Debug, Error)]
pub enum KbError {
    /// Documento de ontologia ausente, não parseável, ou sem a declaração
    /// `owl:Ontology` da qual o namespace é extraído.
    #[error("falha ao carregar a ontologia de '{path}': {reason}")]
    Load {
        /// Caminho do documento que falhou ao carregar.
        path: String,
        /// Causa reportada pela camada de I/O ou pelo parser RDF.
        reason: String,
    },

    /// Um nome (de indicador ou de relação) não resolve para um IRI
    /// absoluto sintaticamente válido.
    #[error("'{name}' não resolve para um identificador global válido: {reason}")]
    Addressing {
        /// O nome humano que falhou a resolução.
        name: String,
        /// Causa reportada pelo parser de IRI.
        reason: String,
    },

    /// O fact base rejeitou a asserção de valor.
    #[error("asserção rejeitada para '{subject}': {reason}")]
    Assertion {
        /// IRI do sujeito da asserção rejeitada.
        subject: String,
        /// Causa reportada pelo armazenamento.
        reason: String,
    },

    /// Consulta nomeada inexistente no registro, ou falha de avaliação.
    #[error("consulta nomeada '{name}' falhou: {reason}")]
    Query {
        /// Nome da consulta (chave no registro).
        name: String,
        /// Causa: não declarada, SPARQL malformado, erro de avaliação.
        reason: String,
    },
}
