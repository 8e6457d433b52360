// INICIO DEL ARCHIVO [libs/domain/models/src/evidence.rs]
/*!
 * =================================================================
 * APARATO: EVIDENCE RECORD CONTRACTS (V8.0 - COURT DEFENSIBLE)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: REGISTRO INMUTABLE Y EXPORTACIÓN JSON v1.0
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. IMMUTABILITY CONTRACT: El registro sella hash del original, hash
 *    del payload, parámetros, métricas, huellas y firma; tras el
 *    sellado jamás muta.
 * 2. EXPLICIT SCHEMA: La exportación persistida es un esquema versionado
 *    explícito con 'deny_unknown_fields': los campos desconocidos se
 *    rechazan ruidosamente en la frontera de integración.
 * 3. ABSENT FIELDS ARE LOUD: Firma y ancla ausentes se expresan como
 *    Option explícitos, nunca como cadenas vacías.
 *
 * # Mathematical Proof (Signature Coverage):
 * La firma cubre exactamente `originalHash:payloadHash:timestampMillis`
 * (ASCII, timestamp decimal): cualquier mutación de artefacto, payload
 * o instante invalida la verificación secp256k1.
 * =================================================================
 */

use crate::params::EmbeddingParams;
use crate::profile::OwnerProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Algoritmo de firma soberano del registro de evidencia.
pub const SIGNATURE_ALGORITHM: &str = "secp256k1";
/// Versión del esquema de exportación persistida.
pub const PERSISTED_SCHEMA_VERSION: &str = "1.0";

/// Trío de huellas perceptuales, cada una 64 bits en 16 hex minúsculas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PerceptualFingerprint {
    /// Huella de frecuencias bajas (proxy DCT 32×32 → 8×8).
    pub p_hash: String,
    /// Huella de umbral por media 8×8.
    pub a_hash: String,
    /// Huella de gradiente horizontal 9×8.
    pub d_hash: String,
}

/// Métricas de calidad selladas en el registro.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetricsRecord {
    /// PSNR en decibelios (`null` imposible; +∞ serializa como string "inf" aguas arriba).
    pub psnr: f64,
    /// SSIM global ∈ [−1, 1].
    pub ssim: f64,
    /// Error cuadrático medio.
    pub mse: f64,
    /// Desviación máxima absoluta por muestra.
    pub max_diff: u8,
}

/**
 * Registro de evidencia inmutable de un sellado.
 */
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceRecord {
    /// Identificador de obra del sellado.
    pub work_id: String,
    /// SHA-256 hex del artefacto original.
    pub original_hash: String,
    /// SHA-256 hex del payload canónico.
    pub payload_hash: String,
    /// Payload canónico serializado verbatim.
    pub canonical_payload: String,
    /// Parámetros del sellado, verbatim.
    pub embedding_params: EmbeddingParams,
    /// Métricas de calidad del sellado.
    pub quality_metrics: QualityMetricsRecord,
    /// Trío de huellas perceptuales del artefacto sellado.
    pub fingerprint: PerceptualFingerprint,
    /// Firma compacta 64 bytes en hex (ausente si el firmante no está configurado).
    pub signature: Option<String>,
    /// Llave pública comprimida 33 bytes en hex (ausente junto a la firma).
    pub signature_public_key: Option<String>,
    /// Algoritmo de firma (constante `secp256k1`).
    pub signature_algorithm: String,
    /// Instante de sellado en milisegundos Unix.
    pub timestamp_millis: i64,
}

impl EvidenceRecord {
    /// Mensaje exacto cubierto por la firma: `originalHash:payloadHash:timestampMillis`.
    #[must_use]
    pub fn signing_message(&self) -> String {
        format!("{}:{}:{}", self.original_hash, self.payload_hash, self.timestamp_millis)
    }

    /// Señala si el registro viaja sin firma (firmante no configurado).
    #[inline(always)]
    #[must_use]
    pub fn is_unsigned(&self) -> bool {
        self.signature.is_none() || self.signature_public_key.is_none()
    }
}

/// Recibo del colaborador de anclaje temporal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnchorReceipt {
    /// Identificador del anclaje emitido por el colaborador.
    pub anchor_id: String,
    /// Instante del bloque ancla (milisegundos Unix).
    pub block_time: i64,
    /// Recibo opaco del colaborador (verbatim, sin interpretar).
    pub opaque_receipt: String,
}

/// Bloque de ancla de la exportación persistida.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnchorExport {
    /// Identificador de transacción en la red ancla.
    pub tx_id: String,
    /// Nombre de la red ancla.
    pub network: String,
    /// Altura del bloque ancla.
    pub block_number: u64,
    /// Instante del bloque en ISO-8601.
    pub timestamp: String,
    /// URL de verificación pública.
    pub verification_url: String,
}

/// Entrada del historial de detecciones, referenciada por ids opacos.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DetectionEntry {
    /// Identificador opaco de la entrada.
    pub entry_id: String,
    /// Obra contra la que se detectó similitud.
    pub work_id: String,
    /// Instante de la detección en ISO-8601.
    pub detected_at: String,
    /// Similitud combinada ponderada ∈ [0, 1].
    pub combined_similarity: f64,
    /// Grado del veredicto (`EXCELLENT`...`NONE`).
    pub verdict_label: String,
}

/// Bloque de prueba criptográfica de la exportación.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CryptographicProofExport {
    /// SHA-256 hex del artefacto original.
    pub original_hash: String,
    /// SHA-256 hex del payload canónico.
    pub payload_hash: String,
    /// Payload compacto embebido en el artefacto.
    pub watermark_payload: String,
    /// Firma de evidencia en hex (ausente si no se firmó).
    pub evidence_signature: Option<String>,
    /// Algoritmo de firma.
    pub signature_algorithm: String,
    /// Llave pública del firmante (ausente junto a la firma).
    pub signature_public_key: Option<String>,
}

/// Bloque de marcas temporales de la exportación.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TimestampsExport {
    /// Instante de creación de la obra (ISO-8601).
    pub created: String,
    /// Instante de carga del original (ISO-8601).
    pub uploaded: String,
    /// Instante de procesamiento del sellado (ISO-8601).
    pub processed: String,
}

/**
 * Exportación persistida de evidencia, esquema v1.0.
 *
 * Forma estable de un único objeto JSON; los campos desconocidos se
 * rechazan ruidosamente en la deserialización.
 */
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersistedEvidence {
    /// Instante de exportación en ISO-8601.
    pub exported_at: String,
    /// Versión del esquema (constante `1.0`).
    pub version: String,
    /// Identificador de obra.
    pub work_id: String,
    /// Etiqueta del tipo de medio.
    pub media_type: String,
    /// Nombre del archivo original.
    pub original_file_name: String,
    /// Tamaño del archivo original en bytes.
    pub original_file_size: u64,
    /// Etiqueta de proporción.
    pub aspect_ratio: String,
    /// Perfil del titular de derechos.
    pub owner: OwnerProfile,
    /// Bloque de prueba criptográfica.
    pub cryptographic_proof: CryptographicProofExport,
    /// Trío de huellas perceptuales.
    pub perceptual_hashes: PerceptualFingerprint,
    /// Bloque de ancla (ausente si no se ancló).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<AnchorExport>,
    /// Parámetros del sellado.
    pub embedding_params: EmbeddingParams,
    /// Métricas de calidad.
    pub quality_metrics: QualityMetricsRecord,
    /// Metadatos libres de la integración (orden estable).
    pub metadata: BTreeMap<String, String>,
    /// Marcas temporales del ciclo de vida.
    pub timestamps: TimestampsExport,
    /// Historial de detecciones registrado.
    pub detection_history: Vec<DetectionEntry>,
}

impl PersistedEvidence {
    /// Serializa la exportación con llaves estables.
    ///
    /// # Errors:
    /// Propaga fallos de `serde_json` (inalcanzables para valores finitos).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializa rechazando campos desconocidos ruidosamente.
    ///
    /// # Errors:
    /// `serde_json::Error` ante esquema violado o campos intrusos.
    pub fn from_json(json_text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_text)
    }
}

// -----------------------------------------------------------------
// ESTRATO DE CERTIFICACIÓN: ESQUEMA Y RECHAZO RUIDOSO (L2)
// -----------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_persisted() -> PersistedEvidence {
        PersistedEvidence {
            exported_at: "2026-01-15T12:00:00.000Z".into(),
            version: PERSISTED_SCHEMA_VERSION.into(),
            work_id: "GJP-MEDIA-2026-DEADBEEF01".into(),
            media_type: "IMAGE".into(),
            original_file_name: "atardecer.jpg".into(),
            original_file_size: 1_048_576,
            aspect_ratio: "3:2".into(),
            owner: OwnerProfile::new("Alex Berenguer", "Alex", 2026, "https://alex.example")
                .expect("Perfil válido"),
            cryptographic_proof: CryptographicProofExport {
                original_hash: "0".repeat(64),
                payload_hash: "f".repeat(64),
                watermark_payload: "©AB|Alex|GJP-MEDIA-2026-DEADBEEF01".into(),
                evidence_signature: None,
                signature_algorithm: SIGNATURE_ALGORITHM.into(),
                signature_public_key: None,
            },
            perceptual_hashes: PerceptualFingerprint {
                p_hash: "a".repeat(16),
                a_hash: "b".repeat(16),
                d_hash: "c".repeat(16),
            },
            anchor: None,
            embedding_params: EmbeddingParams::default_for_still(
                "GJP-MEDIA-2026-DEADBEEF01",
                &"f".repeat(64),
            ),
            quality_metrics: QualityMetricsRecord { psnr: 44.7, ssim: 0.987, mse: 2.2, max_diff: 9 },
            metadata: BTreeMap::new(),
            timestamps: TimestampsExport {
                created: "2026-01-15T11:59:00.000Z".into(),
                uploaded: "2026-01-15T11:59:30.000Z".into(),
                processed: "2026-01-15T12:00:00.000Z".into(),
            },
            detection_history: Vec::new(),
        }
    }

    #[test]
    fn certify_export_round_trip() {
        let exported = sample_persisted();
        let json_text = exported.to_json().expect("Serialización válida");
        let restored = PersistedEvidence::from_json(&json_text).expect("Deserialización válida");
        assert_eq!(exported, restored);
        println!("✅ EVIDENCE: Round-trip del esquema v1.0 certificado.");
    }

    #[test]
    fn certify_unknown_field_loud_rejection() {
        let mut json_value: serde_json::Value =
            serde_json::from_str(&sample_persisted().to_json().expect("JSON válido"))
                .expect("Valor válido");
        json_value["campoIntruso"] = serde_json::json!("ruido");

        let malicious_text = json_value.to_string();
        assert!(
            PersistedEvidence::from_json(&malicious_text).is_err(),
            "Los campos desconocidos deben rechazarse ruidosamente"
        );
    }

    #[test]
    fn certify_signing_message_shape() {
        let record = EvidenceRecord {
            work_id: "GJP-MEDIA-2026-DEADBEEF01".into(),
            original_hash: "0".repeat(64),
            payload_hash: "f".repeat(64),
            canonical_payload: "AUTHOR=x".into(),
            embedding_params: EmbeddingParams::default_for_still("W", "H"),
            quality_metrics: QualityMetricsRecord { psnr: 45.0, ssim: 0.99, mse: 1.0, max_diff: 4 },
            fingerprint: PerceptualFingerprint {
                p_hash: "a".repeat(16),
                a_hash: "b".repeat(16),
                d_hash: "c".repeat(16),
            },
            signature: None,
            signature_public_key: None,
            signature_algorithm: SIGNATURE_ALGORITHM.into(),
            timestamp_millis: 1_700_000_000_000,
        };

        let message = record.signing_message();
        assert!(message.starts_with(&"0".repeat(64)));
        assert!(message.ends_with(":1700000000000"));
        assert_eq!(message.matches(':').count(), 2);
        assert!(record.is_unsigned());
    }
}
// FIN DEL ARCHIVO [libs/domain/models/src/evidence.rs]
