// [libs/domain/watermark/src/errors.rs]
// =================================================================
// APARATO: WATERMARK ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DEL MOTOR DE SELLADO
// =================================================================

use thiserror::Error;

/// Fallos fatales del motor de sellado.
///
/// `QualityBelowTarget` y el fracaso RS no figuran aquí: la calidad
/// degradada es una advertencia en el resultado y el fracaso RS viaja
/// dentro del reporte de extracción, nunca como excepción.
#[derive(Error, Debug)]
pub enum WatermarkError {
    /// Los bytes de imagen no decodifican o el formato es desconocido.
    #[error("Entrada ilegible: {0}")]
    InputUnreadable(String),

    /// Payload + paridad exceden los bloques disponibles del plano.
    #[error("Capacidad excedida: se requieren {required_bits} bits y hay {total_blocks} bloques")]
    CapacityExceeded {
        /// Bits requeridos por payload + paridad.
        required_bits: usize,
        /// Bloques 8×8 completos disponibles.
        total_blocks: usize,
    },

    /// Fallo dimensional o numérico del estrato DSP.
    #[error("Fallo DSP: {0}")]
    Dsp(#[from] gjp_core_dsp::errors::DspError),

    /// Fallo estructural del códec Reed-Solomon (no el fracaso de decodificación).
    #[error("Fallo del códec: {0}")]
    Codec(#[from] gjp_core_ecc::errors::CodecError),

    /// Fallo al sintetizar las huellas perceptuales.
    #[error("Fallo de huellas: {0}")]
    Fingerprint(#[from] gjp_domain_fingerprint::FingerprintError),

    /// Material de firma ausente o rechazado cuando la firma es obligatoria.
    #[error("Fallo del firmante: {0}")]
    Signer(#[from] gjp_domain_evidence::EvidenceError),

    /// Fallo del codificador de salida (JPEG/PNG).
    #[error("Codificación de salida fallida: {0}")]
    OutputEncoding(String),

    /// Cancelación cooperativa observada en una frontera de bloque o cuadro.
    #[error("Operación cancelada cooperativamente")]
    Cancelled,
}
