// [libs/domain/evidence/src/errors.rs]
// =================================================================
// APARATO: EVIDENCE ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DE LA AUTORIDAD CRIPTOGRÁFICA
// =================================================================

use thiserror::Error;

/// Fallos de la autoridad criptográfica de evidencias.
#[derive(Error, Debug)]
pub enum EvidenceError {
    /// Material de firma ausente o malformado.
    ///
    /// El sellado continúa sin firma; el registro marca la ausencia de
    /// forma explícita. Solo la verificación exige material válido.
    #[error("Firmante no configurado: {0}")]
    SignerUnconfigured(String),

    /// La llave secreta decodificada fue rechazada por la curva.
    #[error("Llave secreta inválida para secp256k1: {0}")]
    InvalidSecretKey(#[from] secp256k1::Error),

    /// La firma o la llave pública entregadas no decodifican.
    #[error("Material de verificación malformado: {0}")]
    MalformedVerificationMaterial(String),
}
