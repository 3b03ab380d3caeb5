//! # Configuração da Execução
//!
//! O lote que o processo executa — caminho da ontologia, observações a
//! ingerir, consultas a rodar — é dado, não código. Lido de um JSON
//! (padrão `data/config.json`, ou o primeiro argumento da CLI):
//!
//! ```json
//! {
//!   "ontology_path": "data/ontology.ttl",
//!   "observations": [
//!     { "name": "AREA_POWER", "value": 144.0 }
//!   ],
//!   "queries": [
//!     { "name": "GetStates", "sparql": "SELECT ..." }
//!   ]
//! }
//! ```
//!
//! A **ordem importa**: observações são assertadas na ordem do arquivo
//! (consultas posteriores veem todas as asserções anteriores), e os
//! resultados são emitidos na ordem em que as consultas aparecem.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Uma observação plana: nome de indicador + valor numérico.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Rótulo humano do indicador (ex: `"AREA_POWER"`). Pode conter
    /// espaços — o resolver normaliza.
    pub name: String,
    /// Valor numérico observado, assertado como literal `xsd:double`.
    pub value: f64,
}

/// Uma consulta nomeada: chave + texto SPARQL SELECT.
///
/// A chave é o que o orquestrador expõe; o SPARQL é a regra de derivação
/// pré-declarada que acompanha a ontologia.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedQuery {
    /// Chave da consulta (ex: `"GetStates"`).
    pub name: String,
    /// Texto SPARQL SELECT avaliado sobre o fact base.
    pub sparql: String,
}

/// Configuração completa de uma execução do pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Caminho do documento de ontologia a carregar.
    pub ontology_path: PathBuf,
    /// Observações a ingerir, em ordem.
    pub observations: Vec<Observation>,
    /// Consultas nomeadas a avaliar, em ordem de emissão.
    pub queries: Vec<NamedQuery>,
}

impl RunConfig {
    /// Carrega a configuração de um arquivo JSON.
    ///
    /// # Erros
    ///
    /// Retorna erro se o arquivo não existir, não for legível, ou não
    /// desserializar para a struct esperada.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Falha ao ler configuração em {}", path.display()))?;
        let config: RunConfig = serde_json::from_str(&json)
            .with_context(|| format!("Falha ao desserializar {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "ontology_path": "data/ontology.ttl",
            "observations": [
                { "name": "AREA_POWER", "value": 144.0 },
                { "name": "TOOL_COUNT", "value": 18.0 }
            ],
            "queries": [
                { "name": "GetStates", "sparql": "SELECT ?s WHERE { ?s ?p ?o }" }
            ]
        }"#;
        let config: RunConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.observations.len(), 2);
        assert_eq!(config.observations[0].name, "AREA_POWER");
        assert_eq!(config.queries[0].name, "GetStates");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{ "ontology_path": "x.ttl", "observations": [], "queries": [] }"#,
        )
        .unwrap();
        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config.ontology_path, PathBuf::from("x.ttl"));
        assert!(config.observations.is_empty());
    }

    #[test]
    fn missing_file_is_error() {
        assert!(RunConfig::load(Path::new("/nao/existe.json")).is_err());
    }
}
