//! Static lookup tables for region derivation and categorical recodes.
//!
//! All tables are process-wide read-only constants, built once on first
//! use. Codes follow the PNAD Contínua microdata dictionary; the label for
//! codes outside a table is the caller's concern (the pipeline substitutes
//! [`NOT_INFORMED`]).

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Label used when a categorical code is unmapped or unparsable.
pub const NOT_INFORMED: &str = "Não informado";

/// Two-letter federation-unit code → macro-region, all 27 units.
pub static REGIONS: Lazy<IndexMap<&'static str, &'static str>> = Lazy::new(|| {
    IndexMap::from([
        ("AC", "Norte"),
        ("AP", "Norte"),
        ("AM", "Norte"),
        ("PA", "Norte"),
        ("RO", "Norte"),
        ("RR", "Norte"),
        ("TO", "Norte"),
        ("AL", "Nordeste"),
        ("BA", "Nordeste"),
        ("CE", "Nordeste"),
        ("MA", "Nordeste"),
        ("PB", "Nordeste"),
        ("PE", "Nordeste"),
        ("PI", "Nordeste"),
        ("RN", "Nordeste"),
        ("SE", "Nordeste"),
        ("ES", "Sudeste"),
        ("MG", "Sudeste"),
        ("RJ", "Sudeste"),
        ("SP", "Sudeste"),
        ("PR", "Sul"),
        ("RS", "Sul"),
        ("SC", "Sul"),
        ("DF", "Centro-Oeste"),
        ("GO", "Centro-Oeste"),
        ("MS", "Centro-Oeste"),
        ("MT", "Centro-Oeste"),
    ])
});

/// Literacy (`sabe_ler_escrever`, V3001).
pub static LITERACY: Lazy<IndexMap<&'static str, &'static str>> =
    Lazy::new(|| IndexMap::from([("1", "Sim"), ("2", "Não")]));

/// Prior school attendance (`frequentou_escola`, V3008).
pub static SCHOOL_ATTENDANCE: Lazy<IndexMap<&'static str, &'static str>> =
    Lazy::new(|| IndexMap::from([("1", "Sim"), ("2", "Não")]));

/// School network type (`rede_ensino`, V3002A).
pub static SCHOOL_NETWORK: Lazy<IndexMap<&'static str, &'static str>> =
    Lazy::new(|| IndexMap::from([("1", "Privada"), ("2", "Pública")]));

/// Highest level attended (`maior_curso_frequentado`, V3009A).
pub static HIGHEST_LEVEL: Lazy<IndexMap<&'static str, &'static str>> = Lazy::new(|| {
    IndexMap::from([
        ("1", "Creche"),
        ("2", "Pré-escola"),
        ("3", "Alfabetização de jovens e adultos"),
        ("4", "Antigo primário"),
        ("5", "Antigo ginásio"),
        ("6", "Ensino fundamental"),
        ("7", "Antigo científico ou clássico"),
        ("8", "Ensino médio"),
        ("9", "Superior de graduação"),
        ("10", "Especialização de nível superior"),
        ("11", "Mestrado"),
        ("12", "Doutorado"),
    ])
});
