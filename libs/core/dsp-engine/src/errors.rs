// [libs/core/dsp-engine/src/errors.rs]
// =================================================================
// APARATO: DSP ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS NUMÉRICOS Y DIMENSIONALES
// =================================================================

use thiserror::Error;

/// Define los errores posibles durante la operación del estrato DSP.
///
/// Este enum centraliza los fallos dimensionales que pueden ocurrir al
/// manipular planos de luminancia y buffers RGB crudos.
#[derive(Error, Debug)]
pub enum DspError {
    /// Los dos buffers comparados no comparten dimensiones.
    ///
    /// El validador de calidad exige que el original y el artefacto
    /// sellado tengan exactamente el mismo ancho y alto.
    #[error("Discordancia dimensional: original {original_width}x{original_height} vs comparado {candidate_width}x{candidate_height}")]
    DimensionMismatch {
        /// Ancho del buffer original.
        original_width: u32,
        /// Alto del buffer original.
        original_height: u32,
        /// Ancho del buffer comparado.
        candidate_width: u32,
        /// Alto del buffer comparado.
        candidate_height: u32,
    },

    /// El lado de bloque solicitado es cero o excede el plano completo.
    #[error("Lado de bloque inválido: {0}")]
    InvalidBlockSide(usize),

    /// El buffer RGB entregado no corresponde a `width * height * 3` bytes.
    #[error("Buffer RGB malformado: se esperaban {expected} bytes, llegaron {got}")]
    MalformedRgbBuffer {
        /// Longitud esperada del buffer.
        expected: usize,
        /// Longitud recibida.
        got: usize,
    },
}
