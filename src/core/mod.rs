//! # Módulo Core — A Costura com o Motor de Conhecimento
//!
//! Agrupa a interface consumida do motor de base de conhecimento e sua
//! implementação de produção:
//!
//! - [`KnowledgeStore`] — trait estreita: namespace, asserção de valor,
//!   avaliação de consulta
//! - [`ResultTable`] — resultado tabular com serialização determinística
//! - [`RdfStore`] — oxigraph embutido (load de Turtle/RDF-XML + SPARQL)
//!
//! O motor em si (armazenamento de triplas, avaliação SPARQL) é uma
//! dependência madura consumida — nada de raciocínio é implementado aqui.

/// Sub-módulo com a trait [`KnowledgeStore`] e o [`ResultTable`].
pub mod store;

/// Sub-módulo com o [`RdfStore`] — oxigraph embutido.
pub mod rdf_store;

// Re-exports para conveniência — permite usar `crate::core::RdfStore` diretamente.
pub use rdf_store::RdfStore;
pub use store::{KnowledgeStore, ResultTable};
