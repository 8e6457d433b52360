// INICIO DEL ARCHIVO [libs/domain/fingerprint/src/trio.rs]
/*!
 * =================================================================
 * APARATO: PERCEPTUAL HASH TRIO ENGINE (V6.0 - 64 BIT SOVEREIGN)
 * CLASIFICACIÓN: DOMAIN FINGERPRINT (ESTRATO L2)
 * RESPONSABILIDAD: SÍNTESIS DE aHASH / dHASH / pHASH
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BIT ORDER CONTRACT: Cada huella es Row-Major MSB-first; la celda
 *    (0,0) ocupa el bit más significativo del u64.
 * 2. GRAYSCALE SOVEREIGNTY: La reducción a grises usa BT.601 propio
 *    (misma portadora que el sellador) en lugar del luma del códec,
 *    garantizando huellas reproducibles entre versiones de 'image'.
 * 3. COARSE DCT PROXY: El pHash usa medias de teselas 4×4 sobre la
 *    reducción 32×32 como proxy de frecuencias bajas, umbralizado a
 *    la mediana de las 63 celdas no-DC.
 * =================================================================
 */

use gjp_domain_models::PerceptualFingerprint;
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{instrument, trace};

/// Fallos de la síntesis de huellas.
#[derive(Error, Debug)]
pub enum FingerprintError {
    /// El buffer RGB entregado no corresponde a `width * height * 3` bytes.
    #[error("Buffer RGB malformado para huellas: se esperaban {expected} bytes, llegaron {got}")]
    MalformedRgbBuffer {
        /// Longitud esperada.
        expected: usize,
        /// Longitud recibida.
        got: usize,
    },

    /// La cadena hexadecimal de una huella no codifica 64 bits.
    #[error("Huella hexadecimal malformada: '{0}'")]
    MalformedHexFingerprint(String),
}

/**
 * Trío de huellas de 64 bits de un artefacto.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintTrio {
    /// Proxy de frecuencias bajas (32×32 → teselas 4×4, mediana).
    pub p_hash: u64,
    /// Umbral por media sobre la reducción 8×8.
    pub a_hash: u64,
    /// Signo del gradiente horizontal sobre la reducción 9×8.
    pub d_hash: u64,
}

impl FingerprintTrio {
    /// Renderiza el trío como registro de 16 hex minúsculas por huella.
    #[must_use]
    pub fn to_record(&self) -> PerceptualFingerprint {
        PerceptualFingerprint {
            p_hash: format!("{:016x}", self.p_hash),
            a_hash: format!("{:016x}", self.a_hash),
            d_hash: format!("{:016x}", self.d_hash),
        }
    }

    /// Reconstruye el trío desde un registro hexadecimal.
    ///
    /// # Errors:
    /// `MalformedHexFingerprint` si alguna cadena no es u64 hexadecimal.
    pub fn from_record(record: &PerceptualFingerprint) -> Result<Self, FingerprintError> {
        let parse_hash = |hex_text: &str| {
            u64::from_str_radix(hex_text, 16)
                .map_err(|_| FingerprintError::MalformedHexFingerprint(hex_text.to_string()))
        };

        Ok(Self {
            p_hash: parse_hash(&record.p_hash)?,
            a_hash: parse_hash(&record.a_hash)?,
            d_hash: parse_hash(&record.d_hash)?,
        })
    }
}

/**
 * Motor de síntesis de huellas por-llamada.
 */
pub struct FingerprintEngine;

impl FingerprintEngine {
    /**
     * Sintetiza el trío completo desde un buffer RGB crudo.
     *
     * # Errors:
     * `MalformedRgbBuffer` ante longitudes inconsistentes.
     */
    #[instrument(level = "debug", skip(rgb_buffer))]
    pub fn fingerprint_rgb(
        rgb_buffer: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FingerprintTrio, FingerprintError> {
        let grayscale_plane = Self::bt601_grayscale(rgb_buffer, width, height)?;

        let trio = FingerprintTrio {
            p_hash: Self::perceptual_hash(&grayscale_plane),
            a_hash: Self::average_hash(&grayscale_plane),
            d_hash: Self::difference_hash(&grayscale_plane),
        };

        trace!(?trio, "🔍 [FINGERPRINT]: Trío perceptual sintetizado.");
        Ok(trio)
    }

    /// Reducción a grises BT.601 propia (portadora idéntica al sellador).
    fn bt601_grayscale(
        rgb_buffer: &[u8],
        width: u32,
        height: u32,
    ) -> Result<GrayImage, FingerprintError> {
        let expected_length = width as usize * height as usize * 3;
        if rgb_buffer.len() != expected_length {
            return Err(FingerprintError::MalformedRgbBuffer {
                expected: expected_length,
                got: rgb_buffer.len(),
            });
        }

        let mut grayscale_plane = GrayImage::new(width, height);
        for (pixel_index, grayscale_pixel) in grayscale_plane.pixels_mut().enumerate() {
            let channel_offset = pixel_index * 3;
            let luminance = 0.299 * f64::from(rgb_buffer[channel_offset])
                + 0.587 * f64::from(rgb_buffer[channel_offset + 1])
                + 0.114 * f64::from(rgb_buffer[channel_offset + 2]);
            *grayscale_pixel = Luma([luminance.round().clamp(0.0, 255.0) as u8]);
        }

        Ok(grayscale_plane)
    }

    /// aHash: reducción 8×8 y umbral en la media muestral.
    fn average_hash(grayscale_plane: &GrayImage) -> u64 {
        let reduced = imageops::resize(grayscale_plane, 8, 8, FilterType::Triangle);

        let sample_sum: u64 = reduced.pixels().map(|pixel| u64::from(pixel.0[0])).sum();
        let sample_mean = sample_sum as f64 / 64.0;

        let mut hash_accumulator = 0u64;
        for pixel in reduced.pixels() {
            hash_accumulator <<= 1;
            if f64::from(pixel.0[0]) >= sample_mean {
                hash_accumulator |= 1;
            }
        }
        hash_accumulator
    }

    /// dHash: reducción 9×8 y signo de la diferencia horizontal vecina.
    fn difference_hash(grayscale_plane: &GrayImage) -> u64 {
        let reduced = imageops::resize(grayscale_plane, 9, 8, FilterType::Triangle);

        let mut hash_accumulator = 0u64;
        for row_index in 0..8u32 {
            for column_index in 0..8u32 {
                let left_sample = reduced.get_pixel(column_index, row_index).0[0];
                let right_sample = reduced.get_pixel(column_index + 1, row_index).0[0];

                hash_accumulator <<= 1;
                if right_sample > left_sample {
                    hash_accumulator |= 1;
                }
            }
        }
        hash_accumulator
    }

    /// pHash: reducción 32×32, medias de teselas 4×4, mediana de las 63 no-DC.
    fn perceptual_hash(grayscale_plane: &GrayImage) -> u64 {
        let reduced = imageops::resize(grayscale_plane, 32, 32, FilterType::Triangle);

        // Media de cada tesela 4×4 del damero 8×8 (proxy de baja frecuencia).
        let mut tile_means = [0.0f64; 64];
        for tile_row in 0..8usize {
            for tile_column in 0..8usize {
                let mut tile_accumulator = 0.0f64;
                for local_row in 0..4usize {
                    for local_column in 0..4usize {
                        let sample = reduced.get_pixel(
                            (tile_column * 4 + local_column) as u32,
                            (tile_row * 4 + local_row) as u32,
                        );
                        tile_accumulator += f64::from(sample.0[0]);
                    }
                }
                tile_means[tile_row * 8 + tile_column] = tile_accumulator / 16.0;
            }
        }

        // Mediana de las 63 celdas excluyendo la DC-equivalente (0,0).
        let mut non_dc_means: Vec<f64> = tile_means[1..].to_vec();
        non_dc_means.sort_by(|left, right| left.partial_cmp(right).expect("Medias finitas"));
        let median_threshold = non_dc_means[non_dc_means.len() / 2];

        let mut hash_accumulator = 0u64;
        for (cell_index, tile_mean) in tile_means.iter().enumerate() {
            hash_accumulator <<= 1;
            if cell_index != 0 && *tile_mean > median_threshold {
                hash_accumulator |= 1;
            }
        }
        hash_accumulator
    }
}

// -----------------------------------------------------------------
// ESTRATO DE CERTIFICACIÓN: DETERMINISMO Y SENSIBILIDAD (L2)
// -----------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_rgb(width: u32, height: u32) -> Vec<u8> {
        let mut buffer = Vec::with_capacity((width * height * 3) as usize);
        for row in 0..height {
            for column in 0..width {
                let shade = ((column * 255) / width.max(1)) as u8;
                let counter_shade = ((row * 255) / height.max(1)) as u8;
                buffer.extend_from_slice(&[shade, counter_shade, shade / 2]);
            }
        }
        buffer
    }

    #[test]
    fn certify_fingerprint_determinism() {
        let rgb = gradient_rgb(64, 64);
        let first = FingerprintEngine::fingerprint_rgb(&rgb, 64, 64).expect("Huella válida");
        let second = FingerprintEngine::fingerprint_rgb(&rgb, 64, 64).expect("Huella válida");
        assert_eq!(first, second, "Las huellas deben ser deterministas");
        println!("✅ TRIO: Determinismo del trío perceptual certificado.");
    }

    #[test]
    fn certify_horizontal_gradient_saturates_dhash() {
        // Gradiente creciente hacia la derecha: todas las diferencias positivas.
        let mut buffer = Vec::new();
        for _row in 0..32u32 {
            for column in 0..32u32 {
                let shade = (column * 8) as u8;
                buffer.extend_from_slice(&[shade, shade, shade]);
            }
        }
        let trio = FingerprintEngine::fingerprint_rgb(&buffer, 32, 32).expect("Huella válida");
        assert_eq!(trio.d_hash, u64::MAX, "Un gradiente monótono debe saturar el dHash");
    }

    #[test]
    fn certify_hex_record_round_trip() {
        let rgb = gradient_rgb(48, 48);
        let trio = FingerprintEngine::fingerprint_rgb(&rgb, 48, 48).expect("Huella válida");

        let record = trio.to_record();
        assert_eq!(record.p_hash.len(), 16);
        assert_eq!(record.a_hash.len(), 16);
        assert_eq!(record.d_hash.len(), 16);
        assert_eq!(record.p_hash, record.p_hash.to_lowercase());

        let restored = FingerprintTrio::from_record(&record).expect("Registro válido");
        assert_eq!(trio, restored);
    }

    #[test]
    fn certify_phash_dc_cell_is_excluded() {
        let rgb = gradient_rgb(64, 64);
        let trio = FingerprintEngine::fingerprint_rgb(&rgb, 64, 64).expect("Huella válida");
        // El bit más significativo (celda DC) jamás se enciende.
        assert_eq!(trio.p_hash >> 63, 0, "La celda DC debe quedar excluida del pHash");
    }

    #[test]
    fn certify_malformed_buffer_rejection() {
        assert!(FingerprintEngine::fingerprint_rgb(&[0u8; 10], 8, 8).is_err());
    }

    #[test]
    fn certify_phash_survives_jpeg_recompression() {
        use crate::similarity::hamming_similarity;
        use image::codecs::jpeg::JpegEncoder;

        let rgb = gradient_rgb(256, 256);
        let baseline = FingerprintEngine::fingerprint_rgb(&rgb, 256, 256).expect("Huella válida");

        // Ciclo JPEG Q=70: el peor caso del contrato de estabilidad.
        let mut jpeg_bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg_bytes, 70)
            .encode(&rgb, 256, 256, image::ColorType::Rgb8)
            .expect("Codificación válida");
        let recompressed = image::load_from_memory(&jpeg_bytes).expect("Decodificación válida");
        let recompressed_rgb = recompressed.to_rgb8();

        let degraded = FingerprintEngine::fingerprint_rgb(
            recompressed_rgb.as_raw(),
            256,
            256,
        )
        .expect("Huella válida");

        let phash_similarity = hamming_similarity(baseline.p_hash, degraded.p_hash);
        assert!(
            phash_similarity >= 0.85,
            "Estabilidad pHash bajo JPEG Q=70: {}",
            phash_similarity
        );
        println!("✅ TRIO: Estabilidad pHash bajo recompresión certificada ({}).", phash_similarity);
    }
}
// FIN DEL ARCHIVO [libs/domain/fingerprint/src/trio.rs]
