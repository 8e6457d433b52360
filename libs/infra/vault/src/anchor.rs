// [libs/infra/vault/src/anchor.rs]
/*!
 * =================================================================
 * APARATO: TIMESTAMP ANCHOR CONTRACT (V2.0)
 * CLASIFICACIÓN: INFRA COLLABORATORS (ESTRATO L3)
 * RESPONSABILIDAD: CONTRATO DEL COLABORADOR DE ANCLAJE TEMPORAL
 *
 * # Aislamiento:
 * El anclaje jamás bloquea el resultado principal del sellado; un
 * fallo aquí deja el registro sin bloque de ancla y nada más.
 * =================================================================
 */

use crate::errors::VaultError;
use gjp_domain_models::AnchorReceipt;

/**
 * Colaborador externo que ancla la tupla de evidencia en un registro
 * de tiempo autoritativo.
 */
pub trait TimestampAnchor: Send + Sync {
    /// Ancla `(workId, mediaHash, payloadHash)` y retorna el recibo.
    ///
    /// # Errors:
    /// `AnchorUnavailable` ante rechazo o silencio del colaborador; el
    /// llamador aísla el fallo y continúa sin bloque de ancla.
    fn anchor(
        &self,
        work_identifier: &str,
        media_hash_hexadecimal: &str,
        payload_hash_hexadecimal: &str,
    ) -> Result<AnchorReceipt, VaultError>;
}
