// [libs/infra/vault/src/lib.rs]
/*!
 * =================================================================
 * APARATO: EVIDENCE VAULT BARREL (V4.0)
 * CLASIFICACIÓN: INFRA COLLABORATORS (ESTRATO L3)
 * RESPONSABILIDAD: CONTRATOS ANGOSTOS DE COLABORADORES EXTERNOS
 *
 * # Contrato de Estrato:
 * El núcleo jamás abre contenedores ni toca almacenamiento: consume
 * estas interfaces angostas. Las implementaciones reales (base de
 * datos alojada, ancla de cadena, desmuxer) viven fuera del monorepo;
 * aquí reside el almacén de referencia en memoria para pruebas y
 * para el modo local del sellador.
 * =================================================================
 */

pub mod anchor;
pub mod errors;
pub mod lookup;
pub mod store;
pub mod video_io;

pub use anchor::TimestampAnchor;
pub use errors::VaultError;
pub use lookup::{DetectionMatch, PerceptualLookup};
pub use store::{EvidenceStore, MemoryEvidenceStore};
pub use video_io::{VideoMetadata, VideoSource};
