// INICIO DEL ARCHIVO [libs/core/dsp-engine/src/luminance.rs]
/*!
 * =================================================================
 * APARATO: LUMINANCE PLANE ENGINE (V4.1 - BT.601)
 * CLASIFICACIÓN: CORE DSP (ESTRATO L1)
 * RESPONSABILIDAD: PORTADORA DE LUMINANCIA Y RECONSTRUCCIÓN RGB
 *
 * # Mathematical Proof (BT.601 Carrier):
 * La luminancia se computa como Y = 0.299R + 0.587G + 0.114B.
 * La reconstrucción suma el delta de luminancia por igual a los tres
 * canales (aproximación preservadora de crominancia): como los pesos
 * BT.601 suman 1, la luminancia resultante converge a Y' salvo por
 * saturación de canal.
 * =================================================================
 */

use crate::errors::DspError;

/// Pesos del estándar ITU-R BT.601 para la portadora de luminancia.
const BT601_RED_WEIGHT: f64 = 0.299;
const BT601_GREEN_WEIGHT: f64 = 0.587;
const BT601_BLUE_WEIGHT: f64 = 0.114;

/**
 * Plano de luminancia Row-Major desacoplado del buffer RGB de origen.
 *
 * El plano es transitorio: vive durante una única operación de sellado
 * o extracción y es propiedad exclusiva de esa llamada.
 */
#[derive(Debug, Clone)]
pub struct LuminancePlane {
    /// Muestras Y en punto flotante, orden Row-Major.
    pub samples: Vec<f64>,
    /// Ancho del plano en píxeles.
    pub width: usize,
    /// Alto del plano en píxeles.
    pub height: usize,
}

impl LuminancePlane {
    /**
     * Extrae el plano Y desde un buffer RGB de 8 bits entrelazado.
     *
     * # Errors:
     * Rechaza buffers cuya longitud no sea exactamente `width * height * 3`.
     */
    pub fn from_rgb8(rgb_buffer: &[u8], width: usize, height: usize) -> Result<Self, DspError> {
        let expected_length = width * height * 3;
        if rgb_buffer.len() != expected_length {
            return Err(DspError::MalformedRgbBuffer {
                expected: expected_length,
                got: rgb_buffer.len(),
            });
        }

        let mut samples = vec![0.0f64; width * height];
        for (pixel_index, sample_slot) in samples.iter_mut().enumerate() {
            let channel_offset = pixel_index * 3;
            *sample_slot = BT601_RED_WEIGHT * f64::from(rgb_buffer[channel_offset])
                + BT601_GREEN_WEIGHT * f64::from(rgb_buffer[channel_offset + 1])
                + BT601_BLUE_WEIGHT * f64::from(rgb_buffer[channel_offset + 2]);
        }

        Ok(Self { samples, width, height })
    }

    /**
     * Reconstruye un buffer RGB aplicando el delta de luminancia por canal.
     *
     * Para cada píxel: δ = Y' − Y; R' = clamp(R + δ), ídem G y B.
     * La operación consume el plano modificado y el RGB original intacto.
     *
     * # Errors:
     * Rechaza discordancias de longitud entre el RGB y el plano.
     */
    pub fn reapply_delta_to_rgb8(
        &self,
        original_rgb: &[u8],
        original_luminance: &Self,
    ) -> Result<Vec<u8>, DspError> {
        let expected_length = self.width * self.height * 3;
        if original_rgb.len() != expected_length {
            return Err(DspError::MalformedRgbBuffer {
                expected: expected_length,
                got: original_rgb.len(),
            });
        }

        let mut reconstructed_rgb = vec![0u8; expected_length];
        for pixel_index in 0..(self.width * self.height) {
            let luminance_delta =
                self.samples[pixel_index] - original_luminance.samples[pixel_index];
            let channel_offset = pixel_index * 3;

            for channel_index in 0..3 {
                let shifted_channel =
                    f64::from(original_rgb[channel_offset + channel_index]) + luminance_delta;
                reconstructed_rgb[channel_offset + channel_index] =
                    shifted_channel.round().clamp(0.0, 255.0) as u8;
            }
        }

        Ok(reconstructed_rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certify_bt601_weights_on_primaries() {
        // Píxel rojo puro, verde puro y azul puro.
        let rgb = [255u8, 0, 0, 0, 255, 0, 0, 0, 255];
        let plane = LuminancePlane::from_rgb8(&rgb, 3, 1).expect("Plano válido");

        assert!((plane.samples[0] - 0.299 * 255.0).abs() < 1e-9);
        assert!((plane.samples[1] - 0.587 * 255.0).abs() < 1e-9);
        assert!((plane.samples[2] - 0.114 * 255.0).abs() < 1e-9);
    }

    #[test]
    fn certify_zero_delta_preserves_rgb() {
        let rgb: Vec<u8> = (0..48).map(|i| (i * 5) as u8).collect();
        let plane = LuminancePlane::from_rgb8(&rgb, 4, 4).expect("Plano válido");

        let reconstructed = plane
            .reapply_delta_to_rgb8(&rgb, &plane)
            .expect("Reconstrucción válida");

        assert_eq!(reconstructed, rgb, "Delta nulo alteró el buffer RGB");
    }

    #[test]
    fn certify_delta_saturation_bounds() {
        let rgb = [250u8, 250, 250, 5, 5, 5];
        let original = LuminancePlane::from_rgb8(&rgb, 2, 1).expect("Plano válido");

        let mut brightened = original.clone();
        brightened.samples[0] += 40.0;
        brightened.samples[1] -= 40.0;

        let reconstructed = brightened
            .reapply_delta_to_rgb8(&rgb, &original)
            .expect("Reconstrucción válida");

        assert_eq!(&reconstructed[0..3], &[255, 255, 255], "Saturación superior fallida");
        assert_eq!(&reconstructed[3..6], &[0, 0, 0], "Saturación inferior fallida");
    }

    #[test]
    fn certify_malformed_buffer_rejection() {
        assert!(LuminancePlane::from_rgb8(&[0u8; 10], 2, 2).is_err());
    }
}
// FIN DEL ARCHIVO [libs/core/dsp-engine/src/luminance.rs]
