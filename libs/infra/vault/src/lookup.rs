// INICIO DEL ARCHIVO [libs/infra/vault/src/lookup.rs]
/*!
 * =================================================================
 * APARATO: PERCEPTUAL LOOKUP SERVICE (V3.0 - RECENT SCAN)
 * CLASIFICACIÓN: INFRA COLLABORATORS (ESTRATO L3)
 * RESPONSABILIDAD: BÚSQUEDA DE HUELLAS SOBRE EL BARRIDO RECIENTE
 *
 * # Contrato:
 * La sonda se compara contra los N registros más recientes del
 * almacén con la similitud combinada 0.3·p + 0.2·a + 0.5·d; una
 * coincidencia exige el peldaño FAIR (≥ 0.85) y queda anexada al
 * historial de detecciones de la obra coincidente.
 * =================================================================
 */

use crate::errors::VaultError;
use crate::store::EvidenceStore;
use chrono::Utc;
use gjp_domain_fingerprint::{combined_similarity, FingerprintTrio, SimilarityVerdict};
use gjp_domain_models::DetectionEntry;
use tracing::{info, instrument};

/// Coincidencia de una sonda contra el almacén.
#[derive(Debug, Clone)]
pub struct DetectionMatch {
    /// Obra coincidente.
    pub work_id: String,
    /// Similitud combinada ponderada.
    pub combined_similarity: f64,
    /// Peldaño de la escalera de veredictos.
    pub verdict: SimilarityVerdict,
}

/**
 * Servicio de búsqueda perceptual sobre un almacén de evidencias.
 */
pub struct PerceptualLookup<'a, S: EvidenceStore + ?Sized> {
    store: &'a S,
    scan_limit: usize,
}

impl<'a, S: EvidenceStore + ?Sized> PerceptualLookup<'a, S> {
    /// Construye el servicio con un límite de barrido reciente.
    #[must_use]
    pub fn new(store: &'a S, scan_limit: usize) -> Self {
        Self { store, scan_limit }
    }

    /**
     * Busca coincidencias de la sonda y registra las detecciones.
     *
     * # Errors:
     * Propaga fallos del almacén; los registros con huellas
     * malformadas se omiten del barrido.
     */
    #[instrument(skip_all, fields(scan_limit = self.scan_limit))]
    pub fn find_matches(
        &self,
        probe_trio: &FingerprintTrio,
    ) -> Result<Vec<DetectionMatch>, VaultError> {
        let recent_records = self.store.recent_records(self.scan_limit)?;
        let mut matches = Vec::new();

        for record in recent_records {
            let Ok(stored_trio) = FingerprintTrio::from_record(&record.fingerprint) else {
                continue;
            };

            let similarity = combined_similarity(probe_trio, &stored_trio);
            let verdict = SimilarityVerdict::classify(similarity);

            if verdict.is_detection_match() {
                let detection_entry = DetectionEntry {
                    entry_id: format!("det-{}-{}", record.work_id, record.timestamp_millis),
                    work_id: record.work_id.clone(),
                    detected_at: Utc::now().to_rfc3339(),
                    combined_similarity: similarity,
                    verdict_label: verdict.as_label().to_string(),
                };
                self.store.append_detection(&record.work_id, detection_entry)?;

                matches.push(DetectionMatch {
                    work_id: record.work_id,
                    combined_similarity: similarity,
                    verdict,
                });
            }
        }

        // Mejor coincidencia primero.
        matches.sort_by(|left, right| {
            right
                .combined_similarity
                .partial_cmp(&left.combined_similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        info!(match_count = matches.len(), "🔎 [LOOKUP]: Barrido perceptual completado.");
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryEvidenceStore;
    use gjp_domain_models::{
        EmbeddingParams, EvidenceRecord, PerceptualFingerprint, QualityMetricsRecord,
    };

    fn record_with_trio(work_identifier: &str, trio: &FingerprintTrio) -> EvidenceRecord {
        EvidenceRecord {
            work_id: work_identifier.to_string(),
            original_hash: "0".repeat(64),
            payload_hash: "f".repeat(64),
            canonical_payload: "AUTHOR=x".into(),
            embedding_params: EmbeddingParams::default_for_still(work_identifier, "h"),
            quality_metrics: QualityMetricsRecord { psnr: 45.0, ssim: 0.99, mse: 1.0, max_diff: 3 },
            fingerprint: trio.to_record(),
            signature: None,
            signature_public_key: None,
            signature_algorithm: "secp256k1".into(),
            timestamp_millis: 1_700_000_000_000,
        }
    }

    #[test]
    fn certify_exact_probe_matches_and_records_detection() {
        let store = MemoryEvidenceStore::new();
        let stored_trio =
            FingerprintTrio { p_hash: 0xAAAA_BBBB_CCCC_DDDD, a_hash: 0x1234, d_hash: 0xF0F0 };
        store
            .put_record(record_with_trio("GJP-MEDIA-2026-A", &stored_trio))
            .expect("Persistencia válida");

        let lookup = PerceptualLookup::new(&store, 50);
        let matches = lookup.find_matches(&stored_trio).expect("Barrido válido");

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].work_id, "GJP-MEDIA-2026-A");
        assert_eq!(matches[0].verdict, SimilarityVerdict::Excellent);

        let history = store.detection_history("GJP-MEDIA-2026-A").expect("Historial válido");
        assert_eq!(history.len(), 1, "La detección debe quedar registrada");
    }

    #[test]
    fn certify_distant_probe_yields_no_matches() {
        let store = MemoryEvidenceStore::new();
        let stored_trio = FingerprintTrio { p_hash: 0, a_hash: 0, d_hash: 0 };
        store
            .put_record(record_with_trio("GJP-MEDIA-2026-A", &stored_trio))
            .expect("Persistencia válida");

        let distant_probe =
            FingerprintTrio { p_hash: u64::MAX, a_hash: u64::MAX, d_hash: u64::MAX };
        let lookup = PerceptualLookup::new(&store, 50);
        let matches = lookup.find_matches(&distant_probe).expect("Barrido válido");

        assert!(matches.is_empty(), "Huellas opuestas no deben coincidir");
    }
}
// FIN DEL ARCHIVO [libs/infra/vault/src/lookup.rs]
