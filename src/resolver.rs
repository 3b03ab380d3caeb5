//! # Entity Resolver — De Nomes Humanos a IRIs Globais
//!
//! Converte um rótulo legível (ex: `"AREA_POWER"`, ou até `"AREA POWER"`
//! com espaço) mais um namespace base no **identificador global** usado
//! pelo fact base. A disciplina de endereçamento é o que permite mesclar
//! observações planas (nome/valor) numa base simbólica sem colisões:
//!
//! ```text
//! resolve("http://example.org/manufacturing", "AREA POWER")
//!   └── normaliza base   → "http://example.org/manufacturing"
//!   └── garante separador → "http://example.org/manufacturing#"
//!   └── normaliza nome    → "AREA_POWER"
//!   └── parseia IRI       → <http://example.org/manufacturing#AREA_POWER>
//! ```
//!
//! ## Invariantes
//!
//! - [`normalize`] é pura, total e **idempotente** — normalizar uma string
//!   já normalizada devolve a mesma string.
//! - Dois nomes que normalizam para a mesma string denotam a **mesma
//!   entidade** (resolvem para o mesmo IRI).
//! - O separador padrão é `#` (endereçamento por fragmento, convenção das
//!   bases de conhecimento OWL); só é acrescentado quando o namespace
//!   ainda não termina em `#` ou `/`, o que torna [`resolve`] idempotente
//!   independente de como o namespace já vem formatado.
//! - Nenhum efeito colateral: falha de resolução não muta estado algum.

use oxigraph::model::NamedNode;

use crate::error::KbError;

/// Normaliza um texto para uso em IRI: trim + espaço → `_`.
///
/// Pura e total sobre qualquer string. Idempotente: a saída não contém
/// espaços nem bordas em branco, logo uma segunda aplicação é identidade.
pub fn normalize(text: &str) -> String {
    text.trim().replace(' ', "_")
}

/// Garante que o namespace termina com um separador (`#` ou `/`).
///
/// Se já termina, devolve a string inalterada — é isso que mantém a
/// resolução idempotente para namespaces já formatados.
pub fn ensure_separator(base: &str) -> String {
    if base.ends_with('#') || base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}#")
    }
}

/// Resolve `(namespace, nome)` para um IRI global absoluto.
///
/// Normaliza ambos os lados, concatena, e valida o resultado como IRI
/// absoluto (RFC 3987, via `NamedNode::new`). Determinística e sem
/// efeitos colaterais.
///
/// # Erros
///
/// [`KbError::Addressing`] quando a concatenação não é um IRI absoluto
/// válido — ex: namespace sem scheme, ou nome contendo `<` / `>`.
pub fn resolve(namespace: &str, entity_name: &str) -> Result<NamedNode, KbError> {
    let base = ensure_separator(&normalize(namespace));
    let fragment = normalize(entity_name);
    NamedNode::new(format!("{base}{fragment}")).map_err(|e| KbError::Addressing {
        name: entity_name.to_string(),
        reason: e.to_string(),
    })
}
