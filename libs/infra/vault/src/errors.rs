// [libs/infra/vault/src/errors.rs]
// =================================================================
// APARATO: VAULT ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DE COLABORADORES
// =================================================================

use thiserror::Error;

/// Fallos de los colaboradores externos del núcleo.
#[derive(Error, Debug)]
pub enum VaultError {
    /// Ya existe un registro sellado para el identificador de obra.
    ///
    /// El registro de evidencia es inmutable: la re-escritura se
    /// rechaza en lugar de sobre-escribir silenciosamente.
    #[error("Registro duplicado para la obra '{0}'")]
    DuplicateRecord(String),

    /// No existe registro para el identificador consultado.
    #[error("Registro ausente para la obra '{0}'")]
    RecordNotFound(String),

    /// El colaborador de anclaje rechazó o no respondió la solicitud.
    ///
    /// El fallo es aislado por contrato: jamás revierte el sellado.
    #[error("Anclaje temporal fallido: {0}")]
    AnchorUnavailable(String),

    /// El candado interno del almacén de referencia quedó envenenado.
    #[error("Almacén de referencia inconsistente")]
    StorePoisoned,
}
