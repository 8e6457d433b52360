// INICIO DEL ARCHIVO [libs/domain/watermark/src/sealer.rs]
/*!
 * =================================================================
 * APARATO: STILL IMAGE SEALER (V12.0 - EVIDENCE ASSEMBLY)
 * CLASIFICACIÓN: DOMAIN WATERMARK (ESTRATO L2)
 * RESPONSABILIDAD: ORQUESTACIÓN ATÓMICA DEL SELLADO DE IMAGEN FIJA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC LIFECYCLE: El sellado consume el buffer original y emite
 *    el buffer sellado más el registro de evidencia; los buffers son
 *    transitorios y el registro es inmutable a partir de entonces.
 * 2. QUALITY AS WARNING: PSNR < 40 o SSIM < 0.95 degradan a advertencia;
 *    el sellado retorna igualmente con la bandera encendida.
 * 3. SIGNING ISOLATION: El firmante ausente jamás aborta el sellado;
 *    el registro marca la ausencia de firma de forma explícita.
 *
 * # Máquina de estados:
 * INIT → CAPACITY_CHECKED → ECC_ENCODED → HOPPER_READY →
 * BLOCKS_WRITTEN → ENCODED → VALIDATED → SIGNED → DONE.
 * =================================================================
 */

use crate::cancel::CancellationToken;
use crate::engine::{ExtractionReport, QimEmbedEngine, QimExtractEngine};
use crate::errors::WatermarkError;
use crate::imaging::{DecodedImage, OUTPUT_JPEG_QUALITY};
use crate::state::EmbedStage;
use gjp_core_dsp::prelude::*;
use gjp_core_ecc::prelude::*;
use gjp_core_gen::CoefficientHopper;
use gjp_domain_evidence::{sha256_hex, EvidenceSigner};
use gjp_domain_fingerprint::{FingerprintEngine, FingerprintTrio};
use gjp_domain_models::{EmbeddingParams, EvidenceRecord, QualityMetricsRecord};
use tracing::{debug, info, instrument, warn};

/// Formato de salida del artefacto sellado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JPEG con calidad explícita (≥ 95 por defecto).
    Jpeg {
        /// Calidad del codificador ∈ [1, 100].
        quality: u8,
    },
    /// PNG sin pérdidas.
    Png,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Jpeg { quality: OUTPUT_JPEG_QUALITY }
    }
}

/**
 * Solicitud de sellado de una imagen fija.
 */
#[derive(Debug, Clone)]
pub struct SealRequest {
    /// Texto de payload embebible (forma compacta).
    pub payload_text: String,
    /// Identificador de obra (separador de dominio de la semilla).
    pub work_identifier: String,
    /// Hash hexadecimal que co-determina el calendario del saltador
    /// (SHA-256 del payload canónico en el flujo completo).
    pub payload_hash_hexadecimal: String,
    /// Parámetros de sellado verbatim.
    pub params: EmbeddingParams,
    /// Formato de re-codificación de salida.
    pub output_format: OutputFormat,
}

/**
 * Resultado del sellado: buffer sellado, métricas y huellas.
 */
#[derive(Debug, Clone)]
pub struct SealOutcome {
    /// Artefacto sellado re-codificado.
    pub watermarked_bytes: Vec<u8>,
    /// Reporte de calidad perceptual original vs sellado.
    pub quality: QualityReport,
    /// Bandera de advertencia: calidad bajo el contrato (no fatal).
    pub quality_below_target: bool,
    /// Trío de huellas perceptuales del artefacto sellado.
    pub fingerprint: FingerprintTrio,
    /// Última etapa alcanzada por la máquina de estados.
    pub stage_reached: EmbedStage,
}

/**
 * Orquestador del sellado de imagen fija.
 */
pub struct StillSealer;

impl StillSealer {
    /**
     * Ejecuta el pipeline completo de sellado sobre bytes de imagen.
     *
     * # Errors:
     * - `InputUnreadable` ante bytes indecodificables.
     * - `CapacityExceeded` si payload + paridad no caben en los bloques.
     * - `Cancelled` ante el token observado en fronteras de bloque.
     * - `OutputEncoding` ante fallos del codificador de salida.
     */
    #[instrument(skip_all, fields(work_id = %request.work_identifier))]
    pub fn seal(
        original_bytes: &[u8],
        request: &SealRequest,
        cancellation: &CancellationToken,
    ) -> Result<SealOutcome, WatermarkError> {
        let mut stage = EmbedStage::Init;
        debug!(stage = stage.as_label(), "🛠️ [SEALER]: Decodificando artefacto original.");

        let original_image = DecodedImage::from_bytes(original_bytes)?;
        let original_plane = LuminancePlane::from_rgb8(
            &original_image.rgb_buffer,
            original_image.width as usize,
            original_image.height as usize,
        )?;

        // 1. CAPACITY_CHECKED: bits requeridos vs bloques completos.
        let grid = BlockGrid::new(
            original_plane.width,
            original_plane.height,
            request.params.block_size,
        )?;
        let required_bits = (request.payload_text.len() + request.params.ecc_bytes) * 8;
        if required_bits > grid.total_blocks() {
            return Err(WatermarkError::CapacityExceeded {
                required_bits,
                total_blocks: grid.total_blocks(),
            });
        }
        stage = EmbedStage::CapacityChecked;
        debug!(stage = stage.as_label(), required_bits, "Capacidad verificada.");

        // 2. ECC_ENCODED: palabra sistemática → flujo de bits MSB-first.
        let codec = ReedSolomonCodec::new(request.params.ecc_bytes)?;
        let codeword = codec.encode(request.payload_text.as_bytes())?;
        let ecc_bits = unpack_bits_msb_first(&codeword);
        stage = EmbedStage::EccEncoded;
        debug!(stage = stage.as_label(), bit_count = ecc_bits.len(), "Flujo ECC sintetizado.");

        // 3. HOPPER_READY: calendario determinista del par (workId, payloadHash).
        let hopper =
            CoefficientHopper::new(&request.work_identifier, &request.payload_hash_hexadecimal);
        stage = EmbedStage::HopperReady;
        debug!(stage = stage.as_label(), "Calendario de coeficientes sellado.");

        // 4. BLOCKS_WRITTEN: QIM por bloque sobre la portadora Y.
        let mut sealed_plane = original_plane.clone();
        QimEmbedEngine::embed_bits(
            &mut sealed_plane,
            &ecc_bits,
            &hopper,
            request.params.quantization_step(),
            request.params.block_size,
            cancellation,
        )?;
        stage = EmbedStage::BlocksWritten;
        debug!(stage = stage.as_label(), "Bloques QIM escritos en la portadora.");

        // Reconstrucción RGB con delta de luminancia por canal.
        let sealed_rgb =
            sealed_plane.reapply_delta_to_rgb8(&original_image.rgb_buffer, &original_plane)?;
        let sealed_image = DecodedImage::from_rgb_parts(
            sealed_rgb,
            original_image.width,
            original_image.height,
        )?;

        // 5. ENCODED: re-codificación del artefacto.
        let watermarked_bytes = match request.output_format {
            OutputFormat::Jpeg { quality } => sealed_image.encode_jpeg(quality)?,
            OutputFormat::Png => sealed_image.encode_png()?,
        };
        stage = EmbedStage::Encoded;
        debug!(stage = stage.as_label(), byte_count = watermarked_bytes.len(), "Salida re-codificada.");

        // 6. VALIDATED: métricas de calidad (advertencia, no fatal).
        let quality = QualityValidator::evaluate(
            &original_image.rgb_buffer,
            &sealed_image.rgb_buffer,
            original_image.width,
            original_image.height,
        )?;
        let quality_below_target = !quality.is_perceptually_indistinguishable();
        if quality_below_target {
            warn!(
                psnr = quality.psnr_decibels,
                ssim = quality.ssim_index,
                "⚠️ [QUALITY_BELOW_TARGET]: El sellado continúa bajo advertencia."
            );
        }
        stage = EmbedStage::Validated;

        // Huellas perceptuales del artefacto sellado.
        let fingerprint = FingerprintEngine::fingerprint_rgb(
            &sealed_image.rgb_buffer,
            sealed_image.width,
            sealed_image.height,
        )?;

        info!(
            stage = stage.as_label(),
            psnr = quality.psnr_decibels,
            "✅ [SEALER]: Artefacto sellado y validado."
        );

        Ok(SealOutcome {
            watermarked_bytes,
            quality,
            quality_below_target,
            fingerprint,
            stage_reached: stage,
        })
    }

    /**
     * Ensambla el registro de evidencia inmutable del sellado.
     *
     * La firma es aislada: un firmante ausente produce un registro sin
     * firma con la ausencia marcada explícitamente (etapa SIGNED se
     * alcanza igual, con omisión registrada).
     */
    #[must_use]
    pub fn assemble_evidence(
        request: &SealRequest,
        outcome: &SealOutcome,
        original_bytes: &[u8],
        canonical_payload_text: &str,
        signer: Option<&EvidenceSigner>,
        timestamp_millis: i64,
    ) -> EvidenceRecord {
        let original_hash = sha256_hex(original_bytes);
        let payload_hash = sha256_hex(canonical_payload_text.as_bytes());

        let (signature, signature_public_key) = match signer {
            Some(signing_authority) => (
                Some(signing_authority.sign_evidence(&original_hash, &payload_hash, timestamp_millis)),
                Some(signing_authority.public_key_hex().to_string()),
            ),
            None => {
                warn!("⚠️ [SIGNER_UNCONFIGURED]: Registro emitido sin firma (ausencia explícita).");
                (None, None)
            }
        };

        EvidenceRecord {
            work_id: request.work_identifier.clone(),
            original_hash,
            payload_hash,
            canonical_payload: canonical_payload_text.to_string(),
            embedding_params: request.params.clone(),
            quality_metrics: QualityMetricsRecord {
                psnr: outcome.quality.psnr_decibels,
                ssim: outcome.quality.ssim_index,
                mse: outcome.quality.mean_squared_error,
                max_diff: outcome.quality.maximum_absolute_difference,
            },
            fingerprint: outcome.fingerprint.to_record(),
            signature,
            signature_public_key,
            signature_algorithm: gjp_domain_models::evidence::SIGNATURE_ALGORITHM.to_string(),
            timestamp_millis,
        }
    }

    /**
     * Extracción desde bytes de imagen: decodifica, reconstruye el
     * calendario y delega en el motor QIM + RS.
     *
     * # Errors:
     * Solo fallos estructurales; el fracaso RS viaja en el reporte.
     */
    #[instrument(skip_all, fields(work_id = %work_identifier))]
    pub fn extract(
        image_bytes: &[u8],
        work_identifier: &str,
        payload_hash_hexadecimal: &str,
        payload_byte_length: usize,
        params: &EmbeddingParams,
        cancellation: &CancellationToken,
    ) -> Result<ExtractionReport, WatermarkError> {
        let decoded_image = DecodedImage::from_bytes(image_bytes)?;
        let luminance_plane = LuminancePlane::from_rgb8(
            &decoded_image.rgb_buffer,
            decoded_image.width as usize,
            decoded_image.height as usize,
        )?;

        let hopper = CoefficientHopper::new(work_identifier, payload_hash_hexadecimal);

        QimExtractEngine::extract_payload(
            &luminance_plane,
            payload_byte_length,
            params.ecc_bytes,
            &hopper,
            params.quantization_step(),
            params.block_size,
            cancellation,
        )
    }
}

// FIN DEL ARCHIVO [libs/domain/watermark/src/sealer.rs]
