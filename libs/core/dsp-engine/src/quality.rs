// INICIO DEL ARCHIVO [libs/core/dsp-engine/src/quality.rs]
/*!
 * =================================================================
 * APARATO: PERCEPTUAL QUALITY VALIDATOR (V6.0 - SSIM DUAL)
 * CLASIFICACIÓN: CORE DSP (ESTRATO L1)
 * RESPONSABILIDAD: MÉTRICAS PSNR / MSE / SSIM SOBRE RGB CRUDO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DUAL SSIM: Variante global (rápida, suficiente para el umbral de
 *    sellado) y variante ventaneada 8×8 sobre escala de grises BT.601.
 * 2. INFINITE FIDELITY: PSNR reporta +∞ cuando MSE = 0, señal de una
 *    entrega sin pérdidas bit-perfecta.
 *
 * # Mathematical Proof (SSIM Constants):
 * C1 = (0.01·255)^2 y C2 = (0.03·255)^2 estabilizan la división cuando
 * las medias o varianzas locales colapsan a cero (regiones planas).
 * =================================================================
 */

use crate::errors::DspError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Constante de estabilización C1 del índice SSIM.
const SSIM_C1: f64 = (0.01 * 255.0) * (0.01 * 255.0);
/// Constante de estabilización C2 del índice SSIM.
const SSIM_C2: f64 = (0.03 * 255.0) * (0.03 * 255.0);
/// Lado de la ventana local para la variante ventaneada.
const SSIM_WINDOW_SIDE: usize = 8;

/// Umbral PSNR del contrato "perceptualmente indistinguible".
pub const PSNR_FLOOR_DB: f64 = 40.0;
/// Umbral SSIM del contrato "perceptualmente indistinguible".
pub const SSIM_FLOOR: f64 = 0.95;

/**
 * Reporte inmutable de calidad perceptual de un sellado.
 */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    /// Relación señal-ruido de pico en decibelios (+∞ si MSE = 0).
    pub psnr_decibels: f64,
    /// Índice de similitud estructural global ∈ [−1, 1].
    pub ssim_index: f64,
    /// Error cuadrático medio sobre la muestra RGB completa.
    pub mean_squared_error: f64,
    /// Máxima desviación absoluta por muestra de 8 bits.
    pub maximum_absolute_difference: u8,
}

impl QualityReport {
    /// Contrato de sellado: `psnr ≥ 40 ∧ ssim ≥ 0.95`.
    #[inline(always)]
    #[must_use]
    pub fn is_perceptually_indistinguishable(&self) -> bool {
        self.psnr_decibels >= PSNR_FLOOR_DB && self.ssim_index >= SSIM_FLOOR
    }
}

/**
 * Validador de calidad por-llamada, sin estado mutable compartido.
 */
pub struct QualityValidator;

impl QualityValidator {
    /**
     * Computa el reporte completo entre el original y el candidato.
     *
     * # Errors:
     * - `DimensionMismatch` si los planos difieren en ancho o alto.
     * - `MalformedRgbBuffer` si algún buffer no es `width·height·3`.
     */
    #[instrument(level = "debug", skip(original_rgb, candidate_rgb))]
    pub fn evaluate(
        original_rgb: &[u8],
        candidate_rgb: &[u8],
        width: u32,
        height: u32,
    ) -> Result<QualityReport, DspError> {
        let expected_length = width as usize * height as usize * 3;
        if original_rgb.len() != expected_length {
            return Err(DspError::MalformedRgbBuffer {
                expected: expected_length,
                got: original_rgb.len(),
            });
        }
        if candidate_rgb.len() != original_rgb.len() {
            return Err(DspError::DimensionMismatch {
                original_width: width,
                original_height: height,
                candidate_width: (candidate_rgb.len() / 3 / height.max(1) as usize) as u32,
                candidate_height: height,
            });
        }

        let (mean_squared_error, maximum_absolute_difference) =
            Self::mse_and_peak(original_rgb, candidate_rgb);

        let psnr_decibels = if mean_squared_error == 0.0 {
            f64::INFINITY
        } else {
            10.0 * (255.0f64 * 255.0 / mean_squared_error).log10()
        };

        let ssim_index = Self::global_ssim(original_rgb, candidate_rgb);

        Ok(QualityReport {
            psnr_decibels,
            ssim_index,
            mean_squared_error,
            maximum_absolute_difference,
        })
    }

    /// MSE y pico de desviación en una única pasada por la muestra.
    fn mse_and_peak(original_samples: &[u8], candidate_samples: &[u8]) -> (f64, u8) {
        let mut squared_accumulator = 0.0f64;
        let mut peak_deviation: u8 = 0;

        for (original_value, candidate_value) in
            original_samples.iter().zip(candidate_samples.iter())
        {
            let deviation = i16::from(*original_value) - i16::from(*candidate_value);
            squared_accumulator += f64::from(deviation) * f64::from(deviation);
            peak_deviation = peak_deviation.max(deviation.unsigned_abs() as u8);
        }

        (squared_accumulator / original_samples.len() as f64, peak_deviation)
    }

    /**
     * SSIM global sobre la muestra RGB completa.
     *
     * Utiliza medias, varianzas y covarianza de población sobre todos
     * los canales tratados como una única señal.
     */
    #[must_use]
    pub fn global_ssim(original_samples: &[u8], candidate_samples: &[u8]) -> f64 {
        Self::ssim_of_signals(
            original_samples.iter().map(|v| f64::from(*v)),
            candidate_samples.iter().map(|v| f64::from(*v)),
            original_samples.len(),
        )
    }

    /**
     * SSIM ventaneado: promedio de ventanas 8×8 no solapadas sobre la
     * reducción a escala de grises BT.601 de ambos buffers.
     *
     * # Errors:
     * Propaga los fallos dimensionales de la extracción de luminancia.
     */
    pub fn windowed_ssim(
        original_rgb: &[u8],
        candidate_rgb: &[u8],
        width: usize,
        height: usize,
    ) -> Result<f64, DspError> {
        let original_plane = crate::luminance::LuminancePlane::from_rgb8(original_rgb, width, height)?;
        let candidate_plane =
            crate::luminance::LuminancePlane::from_rgb8(candidate_rgb, width, height)?;

        let windows_per_row = width / SSIM_WINDOW_SIDE;
        let windows_per_column = height / SSIM_WINDOW_SIDE;

        if windows_per_row == 0 || windows_per_column == 0 {
            // Imagen menor que una ventana: degrada a la variante global.
            return Ok(Self::ssim_of_signals(
                original_plane.samples.iter().copied(),
                candidate_plane.samples.iter().copied(),
                original_plane.samples.len(),
            ));
        }

        let mut ssim_accumulator = 0.0f64;
        for window_row in 0..windows_per_column {
            for window_column in 0..windows_per_row {
                let mut original_window = Vec::with_capacity(SSIM_WINDOW_SIDE * SSIM_WINDOW_SIDE);
                let mut candidate_window = Vec::with_capacity(SSIM_WINDOW_SIDE * SSIM_WINDOW_SIDE);

                for local_row in 0..SSIM_WINDOW_SIDE {
                    for local_column in 0..SSIM_WINDOW_SIDE {
                        let plane_index = (window_row * SSIM_WINDOW_SIDE + local_row) * width
                            + window_column * SSIM_WINDOW_SIDE
                            + local_column;
                        original_window.push(original_plane.samples[plane_index]);
                        candidate_window.push(candidate_plane.samples[plane_index]);
                    }
                }

                ssim_accumulator += Self::ssim_of_signals(
                    original_window.iter().copied(),
                    candidate_window.iter().copied(),
                    original_window.len(),
                );
            }
        }

        Ok(ssim_accumulator / (windows_per_row * windows_per_column) as f64)
    }

    /// Núcleo SSIM sobre dos señales de igual longitud.
    fn ssim_of_signals(
        original_signal: impl Iterator<Item = f64>,
        candidate_signal: impl Iterator<Item = f64>,
        sample_count: usize,
    ) -> f64 {
        let count_f = sample_count as f64;
        let mut sum_original = 0.0f64;
        let mut sum_candidate = 0.0f64;
        let mut sum_original_squared = 0.0f64;
        let mut sum_candidate_squared = 0.0f64;
        let mut sum_cross_product = 0.0f64;

        for (original_value, candidate_value) in original_signal.zip(candidate_signal) {
            sum_original += original_value;
            sum_candidate += candidate_value;
            sum_original_squared += original_value * original_value;
            sum_candidate_squared += candidate_value * candidate_value;
            sum_cross_product += original_value * candidate_value;
        }

        let mean_original = sum_original / count_f;
        let mean_candidate = sum_candidate / count_f;
        let variance_original = sum_original_squared / count_f - mean_original * mean_original;
        let variance_candidate = sum_candidate_squared / count_f - mean_candidate * mean_candidate;
        let covariance = sum_cross_product / count_f - mean_original * mean_candidate;

        ((2.0 * mean_original * mean_candidate + SSIM_C1) * (2.0 * covariance + SSIM_C2))
            / ((mean_original * mean_original + mean_candidate * mean_candidate + SSIM_C1)
                * (variance_original + variance_candidate + SSIM_C2))
    }
}

// -----------------------------------------------------------------
// ESTRATO DE CERTIFICACIÓN: MÉTRICAS PERCEPTUALES (L1-DSP)
// -----------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_rgb(width: usize, height: usize) -> Vec<u8> {
        (0..width * height * 3).map(|i| ((i * 31 + 7) % 256) as u8).collect()
    }

    #[test]
    fn certify_identical_buffers_reach_infinite_psnr() {
        let rgb = synthetic_rgb(16, 16);
        let report = QualityValidator::evaluate(&rgb, &rgb, 16, 16).expect("Evaluación válida");

        assert!(report.psnr_decibels.is_infinite(), "PSNR debe ser +∞ con MSE nulo");
        assert!((report.ssim_index - 1.0).abs() < 1e-9, "SSIM debe ser 1.0 en identidad");
        assert_eq!(report.mean_squared_error, 0.0);
        assert_eq!(report.maximum_absolute_difference, 0);
        assert!(report.is_perceptually_indistinguishable());
        println!("✅ QUALITY: Identidad bit-perfecta certificada (PSNR = +∞).");
    }

    #[test]
    fn certify_known_mse_psnr_value() {
        // Desviación uniforme de 1 nivel: MSE = 1, PSNR = 10*log10(65025) ≈ 48.13 dB.
        let original = vec![100u8; 16 * 16 * 3];
        let candidate = vec![101u8; 16 * 16 * 3];

        let report =
            QualityValidator::evaluate(&original, &candidate, 16, 16).expect("Evaluación válida");

        assert!((report.mean_squared_error - 1.0).abs() < 1e-12);
        assert!((report.psnr_decibels - 48.1308).abs() < 0.001, "PSNR: {}", report.psnr_decibels);
        assert_eq!(report.maximum_absolute_difference, 1);
    }

    #[test]
    fn certify_dimension_mismatch_rejection() {
        let original = synthetic_rgb(16, 16);
        let candidate = synthetic_rgb(8, 8);

        assert!(QualityValidator::evaluate(&original, &candidate, 16, 16).is_err());
    }

    #[test]
    fn certify_windowed_ssim_tracks_global_on_identity() {
        let rgb = synthetic_rgb(32, 24);
        let windowed =
            QualityValidator::windowed_ssim(&rgb, &rgb, 32, 24).expect("Ventaneo válido");
        assert!((windowed - 1.0).abs() < 1e-9, "SSIM ventaneado en identidad: {}", windowed);
    }

    #[test]
    fn certify_heavy_noise_degrades_ssim() {
        let original = vec![128u8; 32 * 32 * 3];
        let mut corrupted = original.clone();
        for (sample_index, sample_slot) in corrupted.iter_mut().enumerate() {
            *sample_slot = ((sample_index * 97 + 13) % 256) as u8;
        }

        let report =
            QualityValidator::evaluate(&original, &corrupted, 32, 32).expect("Evaluación válida");

        assert!(report.ssim_index < SSIM_FLOOR, "Ruido pesado debería hundir el SSIM");
        assert!(!report.is_perceptually_indistinguishable());
    }
}
// FIN DEL ARCHIVO [libs/core/dsp-engine/src/quality.rs]
