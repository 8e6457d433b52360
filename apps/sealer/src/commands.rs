// INICIO DEL ARCHIVO [apps/sealer/src/commands.rs]
/*!
 * =================================================================
 * APARATO: SEALER COMMAND HANDLERS (V9.0 - FOUR VERBS)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L6)
 * RESPONSABILIDAD: EMBED / EXTRACT / VERIFY / ROBUST
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DIRECT PAYLOAD MODE: El verbo 'embed' consume el payload textual
 *    directo; su SHA-256 co-determina el calendario del saltador y el
 *    registro lo transporta verbatim (el hash del registro reproduce
 *    el hash del texto: invariante verificable por cualquier perito).
 * 2. SIGNING ISOLATION: GJP_SIGNING_KEY ausente degrada a registro
 *    sin firma con advertencia; solo 'verify' exige material válido.
 * 3. EVIDENCE SIDE-CAR: El registro JSON viaja junto al artefacto
 *    sellado como `<salida>.evidence.json`.
 * =================================================================
 */

use crate::exit_codes::ExitCode;
use anyhow::{Context, Result};
use gjp_domain_evidence::{constant_time_hex_equals, sha256_hex, EvidenceSigner};
use gjp_domain_models::{EmbeddingParams, EvidenceRecord};
use gjp_domain_watermark::{
    CancellationToken, OutputFormat, RobustnessHarness, SealRequest, StillSealer, WatermarkError,
};
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Variable de entorno con el material de firma (64 hex minúsculas).
pub const SIGNING_KEY_ENV: &str = "GJP_SIGNING_KEY";

/// Construye el firmante desde el entorno; la ausencia no es fatal.
fn signer_from_environment() -> Option<EvidenceSigner> {
    match std::env::var(SIGNING_KEY_ENV) {
        Ok(key_material) => match EvidenceSigner::from_hex_key(&key_material) {
            Ok(signer) => Some(signer),
            Err(signer_fault) => {
                warn!(%signer_fault, "⚠️ [SIGNER_UNCONFIGURED]: Material inválido; se sella sin firma.");
                None
            }
        },
        Err(_) => None,
    }
}

/// Mapea un fallo del motor al código de salida del contrato.
fn exit_code_for_fault(fault: &WatermarkError) -> ExitCode {
    match fault {
        WatermarkError::CapacityExceeded { .. } => ExitCode::CapacityExceeded,
        WatermarkError::InputUnreadable(_) | WatermarkError::Dsp(_) => ExitCode::UsageError,
        WatermarkError::Signer(_) => ExitCode::SigningError,
        _ => ExitCode::ExtractionFailed,
    }
}

/**
 * Verbo 'embed': sella un artefacto y emite el registro de evidencia.
 */
#[allow(clippy::too_many_arguments)]
pub fn run_embed(
    input_path: &Path,
    output_path: &Path,
    payload_text: &str,
    work_identifier: &str,
    strength: f64,
    ecc_bytes: usize,
    emit_png: bool,
    cancellation: &CancellationToken,
) -> Result<ExitCode> {
    let original_bytes = fs::read(input_path)
        .with_context(|| format!("IO_FAULT: No se pudo leer '{}'", input_path.display()))?;

    let payload_hash = sha256_hex(payload_text.as_bytes());
    let params = EmbeddingParams {
        strength,
        ecc_bytes,
        block_size: 8,
        coefficient_seed: format!("{}:{}", work_identifier, payload_hash),
    };
    if !params.is_admissible() {
        error!("❌ [USAGE]: Parámetros fuera de dominio (fuerza ∈ [0.05, 0.20], ecc ∈ {{8,12,16}}).");
        return Ok(ExitCode::UsageError);
    }

    let request = SealRequest {
        payload_text: payload_text.to_string(),
        work_identifier: work_identifier.to_string(),
        payload_hash_hexadecimal: payload_hash,
        params,
        output_format: if emit_png {
            OutputFormat::Png
        } else {
            OutputFormat::default()
        },
    };

    let outcome = match StillSealer::seal(&original_bytes, &request, cancellation) {
        Ok(outcome) => outcome,
        Err(seal_fault) => {
            error!(%seal_fault, "❌ [EMBED]: Sellado abortado.");
            return Ok(exit_code_for_fault(&seal_fault));
        }
    };

    if outcome.quality_below_target {
        warn!("⚠️ [QUALITY_BELOW_TARGET]: PSNR/SSIM bajo el contrato; el artefacto se emite igual.");
    }

    // Ensamblaje y persistencia del registro de evidencia (side-car).
    let signer = signer_from_environment();
    let record = StillSealer::assemble_evidence(
        &request,
        &outcome,
        &original_bytes,
        payload_text,
        signer.as_ref(),
        chrono::Utc::now().timestamp_millis(),
    );

    fs::write(output_path, &outcome.watermarked_bytes)
        .with_context(|| format!("IO_FAULT: No se pudo escribir '{}'", output_path.display()))?;

    let evidence_path = output_path.with_extension(format!(
        "{}evidence.json",
        output_path
            .extension()
            .map(|extension| format!("{}.", extension.to_string_lossy()))
            .unwrap_or_default()
    ));
    fs::write(&evidence_path, serde_json::to_string_pretty(&record)?)
        .with_context(|| format!("IO_FAULT: No se pudo escribir '{}'", evidence_path.display()))?;

    info!(
        psnr = outcome.quality.psnr_decibels,
        ssim = outcome.quality.ssim_index,
        evidence = %evidence_path.display(),
        "✅ [EMBED]: Artefacto sellado y registro emitido."
    );
    println!("payloadHash={}", record.payload_hash);
    println!("originalHash={}", record.original_hash);

    Ok(ExitCode::Success)
}

/**
 * Verbo 'extract': recupera el payload de un artefacto sellado.
 */
pub fn run_extract(
    input_path: &Path,
    work_identifier: &str,
    payload_hash_hexadecimal: &str,
    payload_byte_length: usize,
    ecc_bytes: usize,
    strength: f64,
    cancellation: &CancellationToken,
) -> Result<ExitCode> {
    let image_bytes = fs::read(input_path)
        .with_context(|| format!("IO_FAULT: No se pudo leer '{}'", input_path.display()))?;

    let params = EmbeddingParams {
        strength,
        ecc_bytes,
        block_size: 8,
        coefficient_seed: format!("{}:{}", work_identifier, payload_hash_hexadecimal),
    };

    let report = match StillSealer::extract(
        &image_bytes,
        work_identifier,
        payload_hash_hexadecimal,
        payload_byte_length,
        &params,
        cancellation,
    ) {
        Ok(report) => report,
        Err(extract_fault) => {
            error!(%extract_fault, "❌ [EXTRACT]: Extracción abortada.");
            return Ok(exit_code_for_fault(&extract_fault));
        }
    };

    match &report.payload {
        Some(recovered_payload) => {
            info!(
                confidence = report.confidence,
                errors_found = report.errors_found,
                errors_corrected = report.errors_corrected,
                "✅ [EXTRACT]: Payload recuperado."
            );
            println!("payload={}", recovered_payload);
            println!("confidence={:.4}", report.confidence);
            println!("errorsFound={}", report.errors_found);
            println!("errorsCorrected={}", report.errors_corrected);
            Ok(ExitCode::Success)
        }
        None => {
            error!("❌ [EXTRACT]: Fracaso RS (síndromes residuales no nulos).");
            println!("payload=null");
            println!("confidence=0");
            println!("errorsFound=-1");
            Ok(ExitCode::ExtractionFailed)
        }
    }
}

/**
 * Verbo 'verify': valida la coherencia interna y la firma de un registro.
 */
pub fn run_verify(record_path: &Path) -> Result<ExitCode> {
    let record_text = fs::read_to_string(record_path)
        .with_context(|| format!("IO_FAULT: No se pudo leer '{}'", record_path.display()))?;

    let record: EvidenceRecord = match serde_json::from_str(&record_text) {
        Ok(record) => record,
        Err(parse_fault) => {
            error!(%parse_fault, "❌ [VERIFY]: Registro malformado.");
            return Ok(ExitCode::UsageError);
        }
    };

    // Invariante del registro: SHA-256 del payload canónico reproduce payloadHash.
    let recomputed_payload_hash = sha256_hex(record.canonical_payload.as_bytes());
    if !constant_time_hex_equals(&recomputed_payload_hash, &record.payload_hash) {
        error!("❌ [VERIFY]: El hash del payload canónico no reproduce el registro.");
        return Ok(ExitCode::ExtractionFailed);
    }

    let (Some(signature), Some(public_key)) =
        (record.signature.as_deref(), record.signature_public_key.as_deref())
    else {
        error!("❌ [VERIFY]: El registro viaja sin firma; nada que verificar.");
        return Ok(ExitCode::SigningError);
    };

    let verdict = match EvidenceSigner::verify_evidence(
        &record.original_hash,
        &record.payload_hash,
        record.timestamp_millis,
        signature,
        public_key,
    ) {
        Ok(verdict) => verdict,
        Err(material_fault) => {
            error!(%material_fault, "❌ [VERIFY]: Material de verificación malformado.");
            return Ok(ExitCode::SigningError);
        }
    };

    if verdict {
        info!(work_id = %record.work_id, "✅ [VERIFY]: Firma y hashes íntegros.");
        println!("verified=true");
        Ok(ExitCode::Success)
    } else {
        error!("❌ [VERIFY]: Firma inválida para el mensaje del registro.");
        println!("verified=false");
        Ok(ExitCode::ExtractionFailed)
    }
}

/**
 * Verbo 'robust': ejecuta la matriz de ataques sobre un artefacto sellado.
 */
#[allow(clippy::too_many_arguments)]
pub fn run_robust(
    input_path: &Path,
    work_identifier: &str,
    payload_hash_hexadecimal: &str,
    payload_byte_length: usize,
    ecc_bytes: usize,
    strength: f64,
    expected_payload: Option<&str>,
    cancellation: &CancellationToken,
) -> Result<ExitCode> {
    let watermarked_bytes = fs::read(input_path)
        .with_context(|| format!("IO_FAULT: No se pudo leer '{}'", input_path.display()))?;

    let params = EmbeddingParams {
        strength,
        ecc_bytes,
        block_size: 8,
        coefficient_seed: format!("{}:{}", work_identifier, payload_hash_hexadecimal),
    };

    let report = match RobustnessHarness::run_matrix(
        &watermarked_bytes,
        work_identifier,
        payload_hash_hexadecimal,
        payload_byte_length,
        expected_payload,
        &params,
        cancellation,
    ) {
        Ok(report) => report,
        Err(harness_fault) => {
            error!(%harness_fault, "❌ [ROBUST]: Arnés abortado.");
            return Ok(exit_code_for_fault(&harness_fault));
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    info!(survived = report.survived, total = report.total, "🛡️ [ROBUST]: Matriz completada.");

    Ok(ExitCode::Success)
}
// FIN DEL ARCHIVO [apps/sealer/src/commands.rs]
