// [libs/domain/models/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN MODELS BARREL (V6.0 - EVIDENCE ALIGNED)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: EXPOSICIÓN DE CONTRATOS DEL DOMINIO FORENSE
 * =================================================================
 */

pub mod aspect;
pub mod errors;
pub mod evidence;
pub mod params;
pub mod payload;
pub mod profile;

pub use aspect::detect_aspect_ratio_label;
pub use errors::ModelError;
pub use evidence::{
    AnchorExport, AnchorReceipt, CryptographicProofExport, DetectionEntry, EvidenceRecord,
    PersistedEvidence, PerceptualFingerprint, QualityMetricsRecord, TimestampsExport,
};
pub use params::EmbeddingParams;
pub use payload::{CanonicalPayload, CompactPayload, MediaType};
pub use profile::OwnerProfile;
