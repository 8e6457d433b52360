// INICIO DEL ARCHIVO [libs/domain/watermark/src/imaging.rs]
/*!
 * =================================================================
 * APARATO: IMAGE CODEC BRIDGE (V5.0 - ALPHA STRIPPED)
 * CLASIFICACIÓN: DOMAIN WATERMARK (ESTRATO L2)
 * RESPONSABILIDAD: DECODIFICACIÓN RGB CRUDA Y RE-CODIFICACIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NARROW INTERFACE: El núcleo solo consume ancho, alto y RGB de
 *    8 bits (alfa descartado); la elección de códec queda contenida
 *    en este puente.
 * 2. JPEG POR DEFECTO: La salida se re-codifica JPEG con Q ≥ 95 (PNG
 *    opcional); la robustez del sellado está sintonizada contra
 *    recompresiones JPEG subsiguientes.
 * =================================================================
 */

use crate::errors::WatermarkError;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ColorType, ImageEncoder, RgbImage};
use tracing::instrument;

/// Calidad JPEG mínima de la salida sellada.
pub const OUTPUT_JPEG_QUALITY: u8 = 95;

/**
 * Imagen decodificada a RGB crudo de 8 bits, alfa descartado.
 */
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Buffer RGB entrelazado (`width * height * 3` bytes).
    pub rgb_buffer: Vec<u8>,
    /// Ancho en píxeles.
    pub width: u32,
    /// Alto en píxeles.
    pub height: u32,
}

impl DecodedImage {
    /**
     * Decodifica bytes JPEG/PNG/WebP a RGB crudo.
     *
     * # Errors:
     * `InputUnreadable` ante bytes malformados o formato desconocido.
     */
    #[instrument(level = "debug", skip(image_bytes), fields(byte_count = image_bytes.len()))]
    pub fn from_bytes(image_bytes: &[u8]) -> Result<Self, WatermarkError> {
        let dynamic_image = image::load_from_memory(image_bytes)
            .map_err(|decode_fault| WatermarkError::InputUnreadable(decode_fault.to_string()))?;

        let rgb_image = dynamic_image.to_rgb8();
        let (width, height) = rgb_image.dimensions();

        Ok(Self { rgb_buffer: rgb_image.into_raw(), width, height })
    }

    /// Envuelve un buffer RGB ya decodificado (ruta de video y pruebas).
    ///
    /// # Errors:
    /// `InputUnreadable` si la longitud no es `width * height * 3`.
    pub fn from_rgb_parts(rgb_buffer: Vec<u8>, width: u32, height: u32) -> Result<Self, WatermarkError> {
        if rgb_buffer.len() != width as usize * height as usize * 3 {
            return Err(WatermarkError::InputUnreadable(format!(
                "buffer RGB de {} bytes no corresponde a {}x{}",
                rgb_buffer.len(),
                width,
                height
            )));
        }
        Ok(Self { rgb_buffer, width, height })
    }

    /// Vista tipada `RgbImage` del buffer (clonación del contenedor).
    fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_raw(self.width, self.height, self.rgb_buffer.clone())
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }

    /**
     * Re-codifica a JPEG con la calidad indicada.
     *
     * # Errors:
     * `OutputEncoding` ante fallos del codificador.
     */
    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>, WatermarkError> {
        let mut encoded_bytes = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut encoded_bytes, quality);
        encoder
            .encode(&self.rgb_buffer, self.width, self.height, ColorType::Rgb8)
            .map_err(|encode_fault| WatermarkError::OutputEncoding(encode_fault.to_string()))?;
        Ok(encoded_bytes)
    }

    /**
     * Re-codifica a PNG sin pérdidas.
     *
     * # Errors:
     * `OutputEncoding` ante fallos del codificador.
     */
    pub fn encode_png(&self) -> Result<Vec<u8>, WatermarkError> {
        let mut encoded_bytes = Vec::new();
        PngEncoder::new(&mut encoded_bytes)
            .write_image(&self.rgb_buffer, self.width, self.height, ColorType::Rgb8)
            .map_err(|encode_fault| WatermarkError::OutputEncoding(encode_fault.to_string()))?;
        Ok(encoded_bytes)
    }

    /// Reescalado bilineal a dimensiones explícitas.
    #[must_use]
    pub fn resize_bilinear(&self, target_width: u32, target_height: u32) -> Self {
        let resized = imageops::resize(
            &self.to_rgb_image(),
            target_width.max(1),
            target_height.max(1),
            FilterType::Triangle,
        );
        Self {
            width: resized.width(),
            height: resized.height(),
            rgb_buffer: resized.into_raw(),
        }
    }

    /// Recorte central con una fracción por-lado ∈ [0, 0.5).
    #[must_use]
    pub fn center_crop(&self, per_side_fraction: f64) -> Self {
        let clamped_fraction = per_side_fraction.clamp(0.0, 0.49);
        let margin_x = (f64::from(self.width) * clamped_fraction).round() as u32;
        let margin_y = (f64::from(self.height) * clamped_fraction).round() as u32;

        let cropped_width = self.width.saturating_sub(2 * margin_x).max(1);
        let cropped_height = self.height.saturating_sub(2 * margin_y).max(1);

        let cropped =
            imageops::crop_imm(&self.to_rgb_image(), margin_x, margin_y, cropped_width, cropped_height)
                .to_image();

        Self {
            width: cropped.width(),
            height: cropped.height(),
            rgb_buffer: cropped.into_raw(),
        }
    }

    /**
     * Ciclo de recompresión JPEG: codifica y decodifica de vuelta.
     *
     * # Errors:
     * Propaga fallos de codificación o decodificación.
     */
    pub fn recompress_jpeg(&self, quality: u8) -> Result<Self, WatermarkError> {
        let recompressed_bytes = self.encode_jpeg(quality)?;
        Self::from_bytes(&recompressed_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_image(width: u32, height: u32) -> DecodedImage {
        let rgb_buffer: Vec<u8> = (0..width * height)
            .flat_map(|pixel_index| {
                let shade = ((pixel_index * 37 + 11) % 256) as u8;
                [shade, shade.wrapping_add(40), shade.wrapping_add(90)]
            })
            .collect();
        DecodedImage::from_rgb_parts(rgb_buffer, width, height).expect("Imagen válida")
    }

    #[test]
    fn certify_png_round_trip_is_lossless() {
        let original = synthetic_image(32, 24);
        let png_bytes = original.encode_png().expect("PNG válido");
        let restored = DecodedImage::from_bytes(&png_bytes).expect("Decodificación válida");

        assert_eq!(restored.width, 32);
        assert_eq!(restored.height, 24);
        assert_eq!(restored.rgb_buffer, original.rgb_buffer, "PNG debe ser sin pérdidas");
        println!("✅ IMAGING: Round-trip PNG sin pérdidas certificado.");
    }

    #[test]
    fn certify_jpeg_round_trip_preserves_dimensions() {
        let original = synthetic_image(40, 40);
        let recompressed = original.recompress_jpeg(90).expect("Recompresión válida");

        assert_eq!(recompressed.width, 40);
        assert_eq!(recompressed.height, 40);
    }

    #[test]
    fn certify_center_crop_geometry() {
        let original = synthetic_image(100, 80);
        let cropped = original.center_crop(0.10);

        assert_eq!(cropped.width, 80, "10% por lado sobre 100 de ancho");
        assert_eq!(cropped.height, 64, "10% por lado sobre 80 de alto");
    }

    #[test]
    fn certify_malformed_bytes_rejection() {
        assert!(matches!(
            DecodedImage::from_bytes(&[0xDE, 0xAD, 0xBE, 0xEF]),
            Err(WatermarkError::InputUnreadable(_))
        ));
        assert!(DecodedImage::from_rgb_parts(vec![0u8; 5], 2, 2).is_err());
    }
}
// FIN DEL ARCHIVO [libs/domain/watermark/src/imaging.rs]
