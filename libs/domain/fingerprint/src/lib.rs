// [libs/domain/fingerprint/src/lib.rs]
/*!
 * =================================================================
 * APARATO: FINGERPRINT DOMAIN BARREL (V4.0)
 * CLASIFICACIÓN: DOMAIN FINGERPRINT (ESTRATO L2)
 * RESPONSABILIDAD: EXPOSICIÓN DEL TRÍO PERCEPTUAL Y SU SIMILITUD
 * =================================================================
 */

pub mod similarity;
pub mod trio;

pub use similarity::{
    combined_similarity, hamming_similarity, SimilarityVerdict, DETECTION_MATCH_THRESHOLD,
};
pub use trio::{FingerprintEngine, FingerprintError, FingerprintTrio};
