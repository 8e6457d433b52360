// INICIO DEL ARCHIVO [libs/domain/watermark/src/robustness.rs]
/*!
 * =================================================================
 * APARATO: ROBUSTNESS HARNESS (V5.0 - ATTACK MATRIX)
 * CLASIFICACIÓN: DOMAIN WATERMARK (ESTRATO L2)
 * RESPONSABILIDAD: MEDICIÓN DE SUPERVIVENCIA BAJO TRANSFORMACIONES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATTACK MATRIX: Recompresión JPEG {95, 85, 75, 65}, reescalado
 *    bilineal ida-vuelta {0.5, 0.75, 1.25, 1.5}, recorte central
 *    {5%, 10%, 15%} por lado y el perfil "Instagram" (borde largo a
 *    1080, JPEG Q=72).
 * 2. MEASUREMENT, NOT PROMISE: El arnés documenta la supervivencia o
 *    el rechazo; la desincronización por recorte/reescalado es un
 *    resultado esperado, no un defecto del motor.
 * =================================================================
 */

use crate::cancel::CancellationToken;
use crate::errors::WatermarkError;
use crate::imaging::DecodedImage;
use crate::sealer::StillSealer;
use gjp_domain_models::EmbeddingParams;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Escalera de calidades JPEG del arnés.
const JPEG_QUALITY_LADDER: [u8; 4] = [95, 85, 75, 65];
/// Escalas del reescalado bilineal ida-vuelta.
const RESIZE_SCALE_LADDER: [f64; 4] = [0.5, 0.75, 1.25, 1.5];
/// Fracciones de recorte central por lado.
const CROP_FRACTION_LADDER: [f64; 3] = [0.05, 0.10, 0.15];
/// Borde largo del perfil de red social.
const SOCIAL_PROFILE_LONG_EDGE: u32 = 1080;
/// Calidad JPEG del perfil de red social.
const SOCIAL_PROFILE_JPEG_QUALITY: u8 = 72;
/// Umbral de detección cuando no hay payload esperado de referencia.
const CANDIDATE_DETECTION_FLOOR: f64 = 0.5;

/// Registro por caso del arnés de robustez.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobustnessCase {
    /// Familia de transformación (`jpeg`, `resize`, `crop`, `instagram`).
    pub transformation: String,
    /// Parámetros del caso en forma legible.
    pub params: String,
    /// Detección positiva: payload exacto recuperado.
    pub detected: bool,
    /// Confianza reportada por la extracción.
    pub confidence: f64,
    /// Errores detectados (−1 en fracaso RS).
    pub errors_found: i32,
    /// Errores corregidos.
    pub errors_corrected: usize,
    /// Payload recuperado, si lo hubo.
    pub payload: Option<String>,
}

/// Reporte agregado del arnés.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobustnessReport {
    /// Casos individuales en orden de ejecución.
    pub cases: Vec<RobustnessCase>,
    /// Casos con detección positiva.
    pub survived: usize,
    /// Casos totales ejecutados.
    pub total: usize,
}

/**
 * Arnés de robustez sobre un artefacto ya sellado.
 */
pub struct RobustnessHarness;

impl RobustnessHarness {
    /**
     * Ejecuta la matriz completa de ataques simulados.
     *
     * # Errors:
     * - `InputUnreadable` si el artefacto sellado no decodifica.
     * - `Cancelled` ante el token observado entre casos.
     */
    #[instrument(skip_all, fields(work_id = %work_identifier))]
    pub fn run_matrix(
        watermarked_bytes: &[u8],
        work_identifier: &str,
        payload_hash_hexadecimal: &str,
        payload_byte_length: usize,
        expected_payload: Option<&str>,
        params: &EmbeddingParams,
        cancellation: &CancellationToken,
    ) -> Result<RobustnessReport, WatermarkError> {
        let baseline_image = DecodedImage::from_bytes(watermarked_bytes)?;
        let mut cases = Vec::new();

        // 1. ESCALERA JPEG: recompresión directa.
        for quality in JPEG_QUALITY_LADDER {
            if cancellation.is_cancelled() {
                return Err(WatermarkError::Cancelled);
            }
            let attacked = baseline_image.recompress_jpeg(quality)?;
            cases.push(Self::evaluate_case(
                "jpeg",
                &format!("quality={}", quality),
                &attacked,
                work_identifier,
                payload_hash_hexadecimal,
                payload_byte_length,
                expected_payload,
                params,
                cancellation,
            )?);
        }

        // 2. REESCALADO IDA-VUELTA: bilineal abajo/arriba y retorno.
        for scale in RESIZE_SCALE_LADDER {
            if cancellation.is_cancelled() {
                return Err(WatermarkError::Cancelled);
            }
            let scaled_width = (f64::from(baseline_image.width) * scale).round() as u32;
            let scaled_height = (f64::from(baseline_image.height) * scale).round() as u32;
            let attacked = baseline_image
                .resize_bilinear(scaled_width, scaled_height)
                .resize_bilinear(baseline_image.width, baseline_image.height);

            cases.push(Self::evaluate_case(
                "resize",
                &format!("scale={}", scale),
                &attacked,
                work_identifier,
                payload_hash_hexadecimal,
                payload_byte_length,
                expected_payload,
                params,
                cancellation,
            )?);
        }

        // 3. RECORTE CENTRAL: desincronización esperada y documentada.
        for crop_fraction in CROP_FRACTION_LADDER {
            if cancellation.is_cancelled() {
                return Err(WatermarkError::Cancelled);
            }
            let attacked = baseline_image.center_crop(crop_fraction);
            cases.push(Self::evaluate_case(
                "crop",
                &format!("perSide={}%", (crop_fraction * 100.0).round()),
                &attacked,
                work_identifier,
                payload_hash_hexadecimal,
                payload_byte_length,
                expected_payload,
                params,
                cancellation,
            )?);
        }

        // 4. PERFIL INSTAGRAM: borde largo 1080 + JPEG Q=72.
        if cancellation.is_cancelled() {
            return Err(WatermarkError::Cancelled);
        }
        let long_edge = baseline_image.width.max(baseline_image.height);
        let social_scale = f64::from(SOCIAL_PROFILE_LONG_EDGE) / f64::from(long_edge);
        let social_width = (f64::from(baseline_image.width) * social_scale).round() as u32;
        let social_height = (f64::from(baseline_image.height) * social_scale).round() as u32;
        let social_attacked = baseline_image
            .resize_bilinear(social_width, social_height)
            .recompress_jpeg(SOCIAL_PROFILE_JPEG_QUALITY)?;

        cases.push(Self::evaluate_case(
            "instagram",
            &format!("longEdge={} quality={}", SOCIAL_PROFILE_LONG_EDGE, SOCIAL_PROFILE_JPEG_QUALITY),
            &social_attacked,
            work_identifier,
            payload_hash_hexadecimal,
            payload_byte_length,
            expected_payload,
            params,
            cancellation,
        )?);

        let survived = cases.iter().filter(|case| case.detected).count();
        let total = cases.len();
        info!(survived, total, "🛡️ [ROBUSTNESS]: Matriz de ataques completada.");

        Ok(RobustnessReport { cases, survived, total })
    }

    /// Extrae sobre el artefacto atacado y registra el veredicto del caso.
    #[allow(clippy::too_many_arguments)]
    fn evaluate_case(
        transformation: &str,
        case_params: &str,
        attacked_image: &DecodedImage,
        work_identifier: &str,
        payload_hash_hexadecimal: &str,
        payload_byte_length: usize,
        expected_payload: Option<&str>,
        params: &EmbeddingParams,
        cancellation: &CancellationToken,
    ) -> Result<RobustnessCase, WatermarkError> {
        // El caso viaja por PNG para no añadir una recompresión espuria.
        let attacked_bytes = attacked_image.encode_png()?;

        let extraction = StillSealer::extract(
            &attacked_bytes,
            work_identifier,
            payload_hash_hexadecimal,
            payload_byte_length,
            params,
            cancellation,
        );

        let case = match extraction {
            Ok(report) => {
                let detected = match (expected_payload, report.payload.as_deref()) {
                    (Some(expected), Some(recovered)) => expected == recovered,
                    (None, Some(_)) => report.confidence > CANDIDATE_DETECTION_FLOOR,
                    _ => false,
                };
                RobustnessCase {
                    transformation: transformation.to_string(),
                    params: case_params.to_string(),
                    detected,
                    confidence: report.confidence,
                    errors_found: report.errors_found,
                    errors_corrected: report.errors_corrected,
                    payload: report.payload,
                }
            }
            // La desincronización estructural (recorte que rompe la rejilla)
            // se documenta como rechazo, jamás como pánico.
            Err(WatermarkError::CapacityExceeded { .. }) | Err(WatermarkError::Dsp(_)) => {
                RobustnessCase {
                    transformation: transformation.to_string(),
                    params: case_params.to_string(),
                    detected: false,
                    confidence: 0.0,
                    errors_found: -1,
                    errors_corrected: 0,
                    payload: None,
                }
            }
            Err(structural_fault) => return Err(structural_fault),
        };

        Ok(case)
    }
}

// -----------------------------------------------------------------
// ESTRATO DE CERTIFICACIÓN: SUPERVIVENCIA Y RECHAZO (L2)
// -----------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::sealer::{OutputFormat, SealRequest};
    use gjp_domain_evidence::sha256_hex;

    const WORK_ID: &str = "GJP-MEDIA-2026-DEADBEEF01";

    fn sealed_artifact(payload_text: &str) -> (Vec<u8>, String, EmbeddingParams) {
        let rgb_buffer: Vec<u8> = (0..512u32 * 512)
            .flat_map(|pixel_index| {
                let row = pixel_index / 512;
                let column = pixel_index % 512;
                let shade = (120.0
                    + 70.0 * ((row as f64 / 17.0).sin() * (column as f64 / 23.0).cos())
                    + ((row * 7 + column * 13) % 23) as f64) as u8;
                [shade, shade.wrapping_add(30), shade.wrapping_add(55)]
            })
            .collect();
        let original = DecodedImage::from_rgb_parts(rgb_buffer, 512, 512)
            .expect("Imagen válida")
            .encode_png()
            .expect("PNG válido");

        let payload_hash = sha256_hex(payload_text.as_bytes());
        let params = EmbeddingParams::default_for_still(WORK_ID, &payload_hash);
        let request = SealRequest {
            payload_text: payload_text.to_string(),
            work_identifier: WORK_ID.to_string(),
            payload_hash_hexadecimal: payload_hash.clone(),
            params: params.clone(),
            output_format: OutputFormat::Png,
        };

        let outcome = StillSealer::seal(&original, &request, &CancellationToken::new())
            .expect("Sellado válido");
        (outcome.watermarked_bytes, payload_hash, params)
    }

    #[test]
    fn certify_jpeg_ladder_survival_and_crop_rejection() {
        let payload_text = "©AB|Alex|GJP-MEDIA-2026-DEADBEEF";
        let (watermarked, payload_hash, params) = sealed_artifact(payload_text);

        let report = RobustnessHarness::run_matrix(
            &watermarked,
            WORK_ID,
            &payload_hash,
            payload_text.len(),
            Some(payload_text),
            &params,
            &CancellationToken::new(),
        )
        .expect("Arnés válido");

        assert_eq!(report.total, 12, "4 JPEG + 4 resize + 3 crop + instagram");

        // Supervivencia JPEG de alta calidad (Q=95): canal casi limpio.
        let q95_case = report
            .cases
            .iter()
            .find(|case| case.transformation == "jpeg" && case.params == "quality=95")
            .expect("Caso presente");
        assert!(q95_case.detected, "Q=95 debe sobrevivir: {:?}", q95_case);

        // El recorte del 15% por lado desincroniza la rejilla: rechazo documentado.
        let crop15_case = report
            .cases
            .iter()
            .find(|case| case.transformation == "crop" && case.params == "perSide=15%")
            .expect("Caso presente");
        assert!(
            !crop15_case.detected || crop15_case.confidence < 0.5,
            "El recorte pesado no promete recuperación"
        );
        println!("✅ ROBUSTNESS: Matriz de 12 ataques certificada.");
    }

    #[test]
    fn certify_cancellation_between_cases() {
        let payload_text = "©AB|Alex|GJP-MEDIA-2026-DEADBEEF";
        let (watermarked, payload_hash, params) = sealed_artifact(payload_text);

        let cancellation = CancellationToken::new();
        cancellation.cancel();

        let outcome = RobustnessHarness::run_matrix(
            &watermarked,
            WORK_ID,
            &payload_hash,
            payload_text.len(),
            Some(payload_text),
            &params,
            &cancellation,
        );
        assert!(matches!(outcome, Err(WatermarkError::Cancelled)));
    }
}
// FIN DEL ARCHIVO [libs/domain/watermark/src/robustness.rs]
