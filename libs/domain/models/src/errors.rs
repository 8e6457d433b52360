// [libs/domain/models/src/errors.rs]
// =================================================================
// APARATO: MODEL ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DE CONTRATOS DE DOMINIO
// =================================================================

use thiserror::Error;

/// Fallos al construir o parsear los contratos del dominio.
#[derive(Error, Debug)]
pub enum ModelError {
    /// El texto canónico contiene una línea sin separador `KEY=VALUE`.
    #[error("Línea canónica malformada: '{0}'")]
    MalformedCanonicalLine(String),

    /// El texto canónico contiene una clave fuera del conjunto soberano.
    #[error("Clave canónica desconocida: '{0}'")]
    UnknownCanonicalKey(String),

    /// Falta una clave obligatoria del conjunto soberano.
    #[error("Clave canónica ausente: '{0}'")]
    MissingCanonicalKey(&'static str),

    /// El registro de evidencia persistido no pudo deserializarse.
    #[error("Evidencia persistida malformada: {0}")]
    MalformedPersistedEvidence(#[from] serde_json::Error),

    /// El perfil de titular carece de nombre legal o artístico.
    #[error("Perfil de titular degenerado: se requieren nombre legal y artístico")]
    DegenerateOwnerProfile,
}
