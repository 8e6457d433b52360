// [libs/domain/evidence/src/lib.rs]
/*!
 * =================================================================
 * APARATO: EVIDENCE DOMAIN BARREL (V5.0)
 * CLASIFICACIÓN: DOMAIN EVIDENCE (ESTRATO L2)
 * RESPONSABILIDAD: EXPOSICIÓN DE LA AUTORIDAD CRIPTOGRÁFICA
 * =================================================================
 */

pub mod context;
pub mod errors;
pub mod hashing;
pub mod signer;

pub use errors::EvidenceError;
pub use hashing::{constant_time_hex_equals, sha256_hex};
pub use signer::EvidenceSigner;
