#![allow(dead_code)]
//! # Semantic Indicators — Ingestão de Indicadores em Base de Conhecimento
//!
//! **Ponto de entrada principal** do pipeline de ingestão de indicadores
//! e consultas derivadas.
//!
//! O processo carrega uma ontologia de domínio (manufatura/produção),
//! injeta observações numéricas ("valores de indicadores") como fatos, e
//! avalia consultas nomeadas pré-declaradas que derivam estados compostos
//! e sumários. Uma execução, um lote, fail-fast.
//!
//! ## Fluxo de Execução
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging
//!   ├── Carrega RunConfig (JSON — 1º argumento ou data/config.json)
//!   ├── Orchestrator::initialize
//!   │     ├── Carrega a ontologia (Turtle/RDF-XML via oxigraph)
//!   │     └── Extrai o namespace auto-declarado (owl:Ontology)
//!   ├── Ingere as observações configuradas, em ordem
//!   └── Avalia cada consulta nomeada, em ordem
//!         └── Imprime o resultado serializado no stdout
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Executa o lote padrão (data/config.json)
//! cargo run
//!
//! # Lote alternativo, com logs detalhados
//! RUST_LOG=debug cargo run -- caminho/para/config.json
//! ```
//!
//! Qualquer falha (documento ausente, nome irresolvível, asserção
//! rejeitada, consulta desconhecida) aborta a execução com status
//! não-zero e diagnóstico no stderr.

// Declaração dos módulos da aplicação.
// Cada módulo corresponde a uma camada da arquitetura:

/// Módulo `config` — lote de execução (ontologia, observações, consultas).
mod config;

/// Módulo `core` — costura com o motor de conhecimento (trait + oxigraph).
mod core;

/// Módulo `error` — taxonomia de erros do pipeline.
mod error;

/// Módulo `orchestrator` — sequencia ingestão e consultas derivadas.
mod orchestrator;

/// Módulo `resolver` — de nomes humanos a IRIs globais.
mod resolver;

use std::path::Path;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::RunConfig;
use crate::orchestrator::Orchestrator;

/// Caminho padrão da configuração quando nenhum argumento é passado.
const DEFAULT_CONFIG: &str = "data/config.json";

/// Função principal do pipeline.
///
/// # Erros
///
/// Retorna erro (e o processo encerra com status não-zero) se:
/// - A configuração não carregar
/// - A ontologia não carregar ou não declarar namespace
/// - Alguma observação não resolver/assertar
/// - Alguma consulta nomeada falhar
fn main() -> Result<()> {
    // Configura o sistema de logging/tracing.
    // Aceita a variável de ambiente RUST_LOG para configurar o nível.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🏭 Semantic Indicators — Starting...");

    // Lote de execução: 1º argumento da CLI, ou o padrão.
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = RunConfig::load(Path::new(&config_path))?;
    tracing::info!(
        ontologia = %config.ontology_path.display(),
        observacoes = config.observations.len(),
        consultas = config.queries.len(),
        "configuração carregada"
    );

    // Inicialização única e não-retryável: load + namespace + registro.
    let mut orchestrator = Orchestrator::initialize(&config)?;
    tracing::info!(namespace = %orchestrator.namespace(), "orquestrador inicializado");

    // Ingestão do lote, em ordem — consultas posteriores veem tudo.
    orchestrator.ingest(&config.observations)?;

    // Avaliação e emissão, na ordem configurada.
    let query_names: Vec<String> = config.queries.iter().map(|q| q.name.clone()).collect();
    for (name, text) in orchestrator.run_queries(&query_names)? {
        println!("{name}:\n{text}\n");
    }

    tracing::info!("✅ Execução concluída");
    Ok(())
}
