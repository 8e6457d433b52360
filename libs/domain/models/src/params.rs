// [libs/domain/models/src/params.rs]
/*!
 * =================================================================
 * APARATO: EMBEDDING PARAMETERS MODEL (V4.0)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: PARÁMETROS INMUTABLES DE UN SELLADO
 *
 * # Contrato:
 * Los parámetros quedan sellados en el registro de evidencia verbatim
 * una vez ejecutado el sellado; jamás se reinterpretan a posteriori.
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// Cota inferior de la fuerza de cuantización.
pub const STRENGTH_FLOOR: f64 = 0.05;
/// Cota superior de la fuerza de cuantización.
pub const STRENGTH_CEILING: f64 = 0.20;
/// Valores de paridad admitidos.
pub const ADMITTED_ECC_BYTES: [usize; 3] = [8, 12, 16];

/**
 * Parámetros de sellado registrados verbatim en la evidencia.
 */
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingParams {
    /// Fuerza de cuantización QIM ∈ [0.05, 0.20].
    pub strength: f64,
    /// Bytes de paridad Reed-Solomon ∈ {8, 12, 16}.
    pub ecc_bytes: usize,
    /// Lado del bloque DCT (8 en producción).
    pub block_size: usize,
    /// Semilla textual del saltador: `<workId>:<payloadHash>`.
    pub coefficient_seed: String,
}

impl EmbeddingParams {
    /**
     * Parámetros por defecto para imágenes fijas: fuerza 0.15, ecc 8.
     *
     * El sellador de video hereda la misma fuerza 0.15 por defecto y
     * solo desciende cuando el llamador lo solicita explícitamente
     * (decisión registrada en DESIGN.md).
     */
    #[must_use]
    pub fn default_for_still(work_identifier: &str, payload_hash_hexadecimal: &str) -> Self {
        Self {
            strength: 0.15,
            ecc_bytes: 8,
            block_size: 8,
            coefficient_seed: format!("{}:{}", work_identifier, payload_hash_hexadecimal),
        }
    }

    /// Parámetros por defecto para cuadros de video: ecc 12.
    #[must_use]
    pub fn default_for_video_frame(work_identifier: &str, payload_hash_hexadecimal: &str) -> Self {
        Self {
            ecc_bytes: 12,
            ..Self::default_for_still(work_identifier, payload_hash_hexadecimal)
        }
    }

    /// Valida que los parámetros residan en el dominio admitido.
    #[must_use]
    pub fn is_admissible(&self) -> bool {
        (STRENGTH_FLOOR..=STRENGTH_CEILING).contains(&self.strength)
            && ADMITTED_ECC_BYTES.contains(&self.ecc_bytes)
            && self.block_size >= 4
    }

    /// Paso de cuantización Δ = fuerza · 255.
    #[inline(always)]
    #[must_use]
    pub fn quantization_step(&self) -> f64 {
        self.strength * 255.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certify_still_defaults() {
        let params = EmbeddingParams::default_for_still("GJP-MEDIA-2026-X", "abcd");
        assert_eq!(params.strength, 0.15);
        assert_eq!(params.ecc_bytes, 8);
        assert_eq!(params.block_size, 8);
        assert_eq!(params.coefficient_seed, "GJP-MEDIA-2026-X:abcd");
        assert!(params.is_admissible());
        assert!((params.quantization_step() - 38.25).abs() < 1e-12);
    }

    #[test]
    fn certify_video_defaults_raise_parity() {
        let params = EmbeddingParams::default_for_video_frame("GJP-MEDIA-2026-X", "abcd");
        assert_eq!(params.ecc_bytes, 12);
        assert_eq!(params.strength, 0.15, "El video hereda la fuerza de imagen fija");
    }

    #[test]
    fn certify_inadmissible_domains() {
        let mut params = EmbeddingParams::default_for_still("W", "H");
        params.strength = 0.25;
        assert!(!params.is_admissible());

        params.strength = 0.15;
        params.ecc_bytes = 10;
        assert!(!params.is_admissible());
    }
}
