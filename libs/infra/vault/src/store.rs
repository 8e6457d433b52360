// INICIO DEL ARCHIVO [libs/infra/vault/src/store.rs]
/*!
 * =================================================================
 * APARATO: EVIDENCE STORE CONTRACT (V5.0 - INSERTION ORDERED)
 * CLASIFICACIÓN: INFRA COLLABORATORS (ESTRATO L3)
 * RESPONSABILIDAD: ALMACÉN CLAVE-VALOR DE REGISTROS POR OBRA
 *
 * # Contrato:
 * Clave = workId; orden = tiempo de inserción; el barrido "recientes N"
 * alimenta la búsqueda por huella perceptual. El historial de
 * detecciones se referencia por ids opacos (sin punteros cíclicos).
 * =================================================================
 */

use crate::errors::VaultError;
use gjp_domain_models::{DetectionEntry, EvidenceRecord};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument};

/**
 * Contrato del almacén de evidencias consumido por el núcleo.
 */
pub trait EvidenceStore: Send + Sync {
    /// Persiste un registro inmutable; rechaza duplicados.
    ///
    /// # Errors:
    /// `DuplicateRecord` si la obra ya posee registro.
    fn put_record(&self, record: EvidenceRecord) -> Result<(), VaultError>;

    /// Recupera el registro de una obra.
    ///
    /// # Errors:
    /// Fallos internos del almacén; la ausencia es `Ok(None)`.
    fn get_record(&self, work_identifier: &str) -> Result<Option<EvidenceRecord>, VaultError>;

    /// Barrido de los N registros más recientes (orden de inserción inverso).
    ///
    /// # Errors:
    /// Fallos internos del almacén.
    fn recent_records(&self, limit: usize) -> Result<Vec<EvidenceRecord>, VaultError>;

    /// Anexa una entrada al historial de detecciones de una obra.
    ///
    /// # Errors:
    /// `RecordNotFound` si la obra no posee registro sellado.
    fn append_detection(
        &self,
        work_identifier: &str,
        entry: DetectionEntry,
    ) -> Result<(), VaultError>;

    /// Historial de detecciones de una obra (vacío si no hay).
    ///
    /// # Errors:
    /// Fallos internos del almacén.
    fn detection_history(&self, work_identifier: &str) -> Result<Vec<DetectionEntry>, VaultError>;
}

/// Estado interior del almacén de referencia.
#[derive(Default)]
struct MemoryStoreState {
    insertion_ordered_records: Vec<EvidenceRecord>,
    detections_by_work: HashMap<String, Vec<DetectionEntry>>,
}

/**
 * Almacén de referencia en memoria para pruebas y modo local.
 */
#[derive(Default)]
pub struct MemoryEvidenceStore {
    state: Mutex<MemoryStoreState>,
}

impl MemoryEvidenceStore {
    /// Construye un almacén vacío.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EvidenceStore for MemoryEvidenceStore {
    #[instrument(skip_all, fields(work_id = %record.work_id))]
    fn put_record(&self, record: EvidenceRecord) -> Result<(), VaultError> {
        let mut state = self.state.lock().map_err(|_| VaultError::StorePoisoned)?;

        if state
            .insertion_ordered_records
            .iter()
            .any(|existing| existing.work_id == record.work_id)
        {
            return Err(VaultError::DuplicateRecord(record.work_id));
        }

        debug!("🗄️ [VAULT]: Registro sellado persistido.");
        state.insertion_ordered_records.push(record);
        Ok(())
    }

    fn get_record(&self, work_identifier: &str) -> Result<Option<EvidenceRecord>, VaultError> {
        let state = self.state.lock().map_err(|_| VaultError::StorePoisoned)?;
        Ok(state
            .insertion_ordered_records
            .iter()
            .find(|record| record.work_id == work_identifier)
            .cloned())
    }

    fn recent_records(&self, limit: usize) -> Result<Vec<EvidenceRecord>, VaultError> {
        let state = self.state.lock().map_err(|_| VaultError::StorePoisoned)?;
        Ok(state
            .insertion_ordered_records
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    fn append_detection(
        &self,
        work_identifier: &str,
        entry: DetectionEntry,
    ) -> Result<(), VaultError> {
        let mut state = self.state.lock().map_err(|_| VaultError::StorePoisoned)?;

        if !state
            .insertion_ordered_records
            .iter()
            .any(|record| record.work_id == work_identifier)
        {
            return Err(VaultError::RecordNotFound(work_identifier.to_string()));
        }

        state
            .detections_by_work
            .entry(work_identifier.to_string())
            .or_default()
            .push(entry);
        Ok(())
    }

    fn detection_history(&self, work_identifier: &str) -> Result<Vec<DetectionEntry>, VaultError> {
        let state = self.state.lock().map_err(|_| VaultError::StorePoisoned)?;
        Ok(state.detections_by_work.get(work_identifier).cloned().unwrap_or_default())
    }
}

// FIN DEL ARCHIVO [libs/infra/vault/src/store.rs]
