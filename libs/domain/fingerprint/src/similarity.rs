// INICIO DEL ARCHIVO [libs/domain/fingerprint/src/similarity.rs]
/*!
 * =================================================================
 * APARATO: HAMMING SIMILARITY LADDER (V3.1)
 * CLASIFICACIÓN: DOMAIN FINGERPRINT (ESTRATO L2)
 * RESPONSABILIDAD: SIMILITUD PONDERADA Y ESCALERA DE VEREDICTOS
 *
 * # Mathematical Proof (Weighted Combination):
 * similitud_h = (64 − distancia_Hamming) / 64 por huella.
 * combinada = 0.3·pHash + 0.2·aHash + 0.5·dHash. El dHash domina por
 * su estabilidad ante recompresión; el aHash pondera menos por su
 * sensibilidad a cambios globales de brillo.
 * =================================================================
 */

use crate::trio::FingerprintTrio;
use serde::{Deserialize, Serialize};

/// Umbral por defecto para declarar una detección positiva.
pub const DETECTION_MATCH_THRESHOLD: f64 = 0.85;

/// Peso del pHash en la similitud combinada.
const P_HASH_WEIGHT: f64 = 0.3;
/// Peso del aHash en la similitud combinada.
const A_HASH_WEIGHT: f64 = 0.2;
/// Peso del dHash en la similitud combinada.
const D_HASH_WEIGHT: f64 = 0.5;

/// Escalera de veredictos de similitud perceptual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimilarityVerdict {
    /// Similitud combinada ≥ 0.95.
    Excellent,
    /// Similitud combinada ≥ 0.90.
    Good,
    /// Similitud combinada ≥ 0.85.
    Fair,
    /// Similitud combinada ≥ 0.75.
    Marginal,
    /// Sin similitud relevante.
    None,
}

impl SimilarityVerdict {
    /// Clasifica una similitud combinada en la escalera.
    #[must_use]
    pub fn classify(combined_similarity: f64) -> Self {
        if combined_similarity >= 0.95 {
            Self::Excellent
        } else if combined_similarity >= 0.90 {
            Self::Good
        } else if combined_similarity >= 0.85 {
            Self::Fair
        } else if combined_similarity >= 0.75 {
            Self::Marginal
        } else {
            Self::None
        }
    }

    /// Etiqueta estable para registros y exportaciones.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Fair => "FAIR",
            Self::Marginal => "MARGINAL",
            Self::None => "NONE",
        }
    }

    /// Una detección positiva exige al menos el peldaño FAIR.
    #[inline(always)]
    #[must_use]
    pub fn is_detection_match(&self) -> bool {
        matches!(self, Self::Excellent | Self::Good | Self::Fair)
    }
}

/// Similitud Hamming de una huella de 64 bits: `(64 − distancia) / 64`.
#[inline(always)]
#[must_use]
pub fn hamming_similarity(first_hash: u64, second_hash: u64) -> f64 {
    let hamming_distance = (first_hash ^ second_hash).count_ones();
    f64::from(64 - hamming_distance) / 64.0
}

/// Similitud combinada ponderada del trío: 0.3·p + 0.2·a + 0.5·d.
#[must_use]
pub fn combined_similarity(first_trio: &FingerprintTrio, second_trio: &FingerprintTrio) -> f64 {
    P_HASH_WEIGHT * hamming_similarity(first_trio.p_hash, second_trio.p_hash)
        + A_HASH_WEIGHT * hamming_similarity(first_trio.a_hash, second_trio.a_hash)
        + D_HASH_WEIGHT * hamming_similarity(first_trio.d_hash, second_trio.d_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certify_identity_reaches_unity() {
        let trio = FingerprintTrio { p_hash: 0xDEAD_BEEF_CAFE_F00D, a_hash: 1, d_hash: u64::MAX };
        assert!((combined_similarity(&trio, &trio) - 1.0).abs() < 1e-12);
        assert_eq!(SimilarityVerdict::classify(1.0), SimilarityVerdict::Excellent);
    }

    #[test]
    fn certify_hamming_similarity_gradations() {
        assert!((hamming_similarity(0, 0) - 1.0).abs() < 1e-12);
        assert!((hamming_similarity(0, 1) - 63.0 / 64.0).abs() < 1e-12);
        assert!((hamming_similarity(0, u64::MAX)).abs() < 1e-12);
    }

    #[test]
    fn certify_ladder_boundaries() {
        assert_eq!(SimilarityVerdict::classify(0.96), SimilarityVerdict::Excellent);
        assert_eq!(SimilarityVerdict::classify(0.92), SimilarityVerdict::Good);
        assert_eq!(SimilarityVerdict::classify(0.87), SimilarityVerdict::Fair);
        assert_eq!(SimilarityVerdict::classify(0.80), SimilarityVerdict::Marginal);
        assert_eq!(SimilarityVerdict::classify(0.10), SimilarityVerdict::None);

        assert!(SimilarityVerdict::Fair.is_detection_match());
        assert!(!SimilarityVerdict::Marginal.is_detection_match());
    }

    #[test]
    fn certify_dhash_dominant_weighting() {
        let baseline = FingerprintTrio { p_hash: 0, a_hash: 0, d_hash: 0 };
        let phash_flipped = FingerprintTrio { p_hash: u64::MAX, a_hash: 0, d_hash: 0 };
        let dhash_flipped = FingerprintTrio { p_hash: 0, a_hash: 0, d_hash: u64::MAX };

        let phash_penalty = 1.0 - combined_similarity(&baseline, &phash_flipped);
        let dhash_penalty = 1.0 - combined_similarity(&baseline, &dhash_flipped);

        assert!(dhash_penalty > phash_penalty, "El dHash debe dominar la ponderación");
        assert!((phash_penalty - 0.3).abs() < 1e-12);
        assert!((dhash_penalty - 0.5).abs() < 1e-12);
    }
}
// FIN DEL ARCHIVO [libs/domain/fingerprint/src/similarity.rs]
