// INICIO DEL ARCHIVO [libs/domain/watermark/src/temporal.rs]
/*!
 * =================================================================
 * APARATO: TEMPORAL VIDEO WRAPPER (V8.0 - SHARD PLURALITY)
 * CLASIFICACIÓN: DOMAIN WATERMARK (ESTRATO L2)
 * RESPONSABILIDAD: FRAGMENTACIÓN DEL FLUJO ECC A TRAVÉS DE CUADROS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CONTIGUOUS SHARDS: El flujo de bits RS se parte en S fragmentos
 *    contiguos (S ≈ min(3, ⌈N/10⌉)); cada fragmento se re-codifica a
 *    hex y viaja como payload del sellador de imagen fija.
 * 2. PER-SHARD HOPPER: El sellador se invoca con el identificador
 *    `<base>-shard<s>`, produciendo calendarios independientes.
 * 3. PLURALITY VOTE: En extracción se muestrea cada 5º cuadro por
 *    intervalo; los candidatos con confianza > 0.5 votan y la cadena
 *    hex pluralitaria representa al fragmento.
 * 4. POSITIONAL IDENTITY: Los fragmentos se identifican por su
 *    intervalo de cuadros, sin byte de índice; el reordenamiento de
 *    fragmentos es una limitación documentada.
 *
 * # Nota de redundancia:
 * La cadena hex del fragmento re-entra al codificador RS dentro del
 * sellador de imagen. El doble RS es intencional: conserva único el
 * contrato de payload-texto del motor de imagen fija.
 * =================================================================
 */

use crate::cancel::CancellationToken;
use crate::errors::WatermarkError;
use crate::imaging::DecodedImage;
use crate::sealer::{OutputFormat, SealRequest, StillSealer};
use gjp_core_dsp::prelude::*;
use gjp_core_ecc::prelude::*;
use gjp_domain_models::EmbeddingParams;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Paso de muestreo de cuadros durante la extracción por intervalo.
const EXTRACTION_SAMPLING_STEP: usize = 5;
/// Umbral de confianza para que un candidato vote en la pluralidad.
const CANDIDATE_CONFIDENCE_FLOOR: f64 = 0.5;
/// Normalizador de la varianza de textura.
const TEXTURE_VARIANCE_NORMALIZER: f64 = 5000.0;

/**
 * Configuración de la envoltura temporal.
 */
#[derive(Debug, Clone)]
pub struct TemporalConfig {
    /// Fuerza de cuantización (hereda 0.15; menor solo bajo pedido explícito).
    pub strength: f64,
    /// Bytes de paridad por fragmento y para el flujo global (12 en video).
    pub ecc_bytes: usize,
    /// Lado del bloque DCT.
    pub block_size: usize,
    /// Compuerta de textura: saltar cuadros planos (apagada por defecto).
    pub texture_gate_enabled: bool,
    /// Umbral de varianza normalizada bajo el cual se salta el cuadro.
    pub texture_threshold: f64,
    /// Tasa de muestreo: cuadros con índice % tasa ≠ 0 se emiten verbatim.
    pub frame_sampling_rate: usize,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            strength: 0.15,
            ecc_bytes: 12,
            block_size: 8,
            texture_gate_enabled: false,
            texture_threshold: 0.3,
            frame_sampling_rate: 1,
        }
    }
}

/// Reporte de la extracción temporal completa.
#[derive(Debug, Clone)]
pub struct TemporalExtractReport {
    /// Payload global recuperado, o `None` si algún fragmento faltó.
    pub payload: Option<String>,
    /// Confianza final combinada ∈ [0, 1].
    pub confidence: f64,
    /// Fragmentos recuperados por pluralidad.
    pub shards_recovered: usize,
    /// Fragmentos totales del calendario.
    pub shard_count: usize,
    /// Cuadros muestreados durante la extracción.
    pub frames_sampled: usize,
}

/**
 * Envoltura temporal del sellador de imagen fija.
 */
pub struct TemporalWrapper;

impl TemporalWrapper {
    /// Cardinal de fragmentos: S = min(3, ⌈N/10⌉), al menos 1.
    #[must_use]
    pub fn shard_count_for(frame_count: usize) -> usize {
        usize::min(3, frame_count.div_ceil(10)).max(1)
    }

    /// Varianza de grises normalizada: min(var/5000, 1).
    #[must_use]
    pub fn normalized_texture_variance(frame: &DecodedImage) -> f64 {
        let plane = match LuminancePlane::from_rgb8(
            &frame.rgb_buffer,
            frame.width as usize,
            frame.height as usize,
        ) {
            Ok(plane) => plane,
            Err(_) => return 0.0,
        };

        let sample_count = plane.samples.len() as f64;
        let mean = plane.samples.iter().sum::<f64>() / sample_count;
        let variance = plane
            .samples
            .iter()
            .map(|sample| (sample - mean) * (sample - mean))
            .sum::<f64>()
            / sample_count;

        (variance / TEXTURE_VARIANCE_NORMALIZER).min(1.0)
    }

    /**
     * Sella una secuencia finita de cuadros decodificados.
     *
     * Mantiene un único cuadro en memoria a la vez: cada cuadro sellado
     * (o emitido verbatim) se entrega al sumidero antes de decodificar
     * el siguiente.
     *
     * # Errors:
     * - `CapacityExceeded` si un fragmento no cabe en el cuadro.
     * - `Cancelled` ante el token observado entre cuadros.
     */
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip_all, fields(frame_count, work_id = %base_work_identifier))]
    pub fn wrap_frames<I, S>(
        frames: I,
        frame_count: usize,
        base_work_identifier: &str,
        payload_text: &str,
        payload_hash_hexadecimal: &str,
        config: &TemporalConfig,
        cancellation: &CancellationToken,
        mut frame_sink: S,
    ) -> Result<(), WatermarkError>
    where
        I: Iterator<Item = Vec<u8>>,
        S: FnMut(usize, Vec<u8>),
    {
        let shard_hex_payloads =
            Self::shard_hex_payloads(payload_text, config.ecc_bytes, frame_count)?;
        let shard_count = shard_hex_payloads.len();
        let interval_length = frame_count.div_ceil(shard_count);

        info!(shard_count, interval_length, "🎬 [TEMPORAL]: Calendario de fragmentos sellado.");

        for (frame_index, frame_bytes) in frames.enumerate() {
            if cancellation.is_cancelled() {
                return Err(WatermarkError::Cancelled);
            }

            // Muestreo: cuadros fuera de la tasa viajan verbatim.
            if config.frame_sampling_rate > 1 && frame_index % config.frame_sampling_rate != 0 {
                frame_sink(frame_index, frame_bytes);
                continue;
            }

            let shard_index = (frame_index / interval_length).min(shard_count - 1);

            // Compuerta de textura: cuadros planos viajan verbatim.
            if config.texture_gate_enabled {
                let decoded_frame = DecodedImage::from_bytes(&frame_bytes)?;
                if Self::normalized_texture_variance(&decoded_frame) < config.texture_threshold {
                    debug!(frame_index, "🪵 [TEXTURE_GATE]: Cuadro plano emitido verbatim.");
                    frame_sink(frame_index, frame_bytes);
                    continue;
                }
            }

            let shard_request = SealRequest {
                payload_text: shard_hex_payloads[shard_index].clone(),
                work_identifier: format!("{}-shard{}", base_work_identifier, shard_index),
                payload_hash_hexadecimal: payload_hash_hexadecimal.to_string(),
                params: EmbeddingParams {
                    strength: config.strength,
                    ecc_bytes: config.ecc_bytes,
                    block_size: config.block_size,
                    coefficient_seed: format!(
                        "{}-shard{}:{}",
                        base_work_identifier, shard_index, payload_hash_hexadecimal
                    ),
                },
                output_format: OutputFormat::default(),
            };

            match StillSealer::seal(&frame_bytes, &shard_request, cancellation) {
                Ok(sealed_outcome) => frame_sink(frame_index, sealed_outcome.watermarked_bytes),
                Err(WatermarkError::CapacityExceeded { required_bits, total_blocks }) => {
                    return Err(WatermarkError::CapacityExceeded { required_bits, total_blocks });
                }
                Err(frame_fault) => {
                    // Un cuadro ilegible no colapsa la secuencia: viaja verbatim.
                    warn!(frame_index, %frame_fault, "⚠️ [TEMPORAL]: Cuadro emitido verbatim tras fallo.");
                    frame_sink(frame_index, frame_bytes);
                }
            }
        }

        Ok(())
    }

    /**
     * Extracción temporal: muestreo por intervalo, voto pluralitario por
     * fragmento y decodificación RS final del flujo reconstituido.
     *
     * # Errors:
     * Solo fallos estructurales; los fragmentos irrecuperables viajan
     * en el reporte (`payload = None`).
     */
    #[instrument(skip_all, fields(frame_count, work_id = %base_work_identifier))]
    pub fn extract_frames<I>(
        frames: I,
        frame_count: usize,
        base_work_identifier: &str,
        payload_hash_hexadecimal: &str,
        payload_byte_length: usize,
        config: &TemporalConfig,
        cancellation: &CancellationToken,
    ) -> Result<TemporalExtractReport, WatermarkError>
    where
        I: Iterator<Item = Vec<u8>>,
    {
        let shard_count = Self::shard_count_for(frame_count);
        let shard_bit_lengths =
            Self::shard_bit_lengths(payload_byte_length, config.ecc_bytes, shard_count);
        let interval_length = frame_count.div_ceil(shard_count);

        let extraction_params = EmbeddingParams {
            strength: config.strength,
            ecc_bytes: config.ecc_bytes,
            block_size: config.block_size,
            coefficient_seed: String::new(),
        };

        // Votos por fragmento: cadena hex → (votos, suma de confianzas).
        let mut shard_ballots: Vec<HashMap<String, (usize, f64)>> =
            vec![HashMap::new(); shard_count];
        let mut frames_sampled = 0usize;

        for (frame_index, frame_bytes) in frames.enumerate() {
            if cancellation.is_cancelled() {
                return Err(WatermarkError::Cancelled);
            }

            let position_in_interval = frame_index % interval_length;
            if position_in_interval % EXTRACTION_SAMPLING_STEP != 0 {
                continue;
            }

            let shard_index = (frame_index / interval_length).min(shard_count - 1);
            let shard_hex_length = shard_bit_lengths[shard_index].div_ceil(8) * 2;
            frames_sampled += 1;

            let report = StillSealer::extract(
                &frame_bytes,
                &format!("{}-shard{}", base_work_identifier, shard_index),
                payload_hash_hexadecimal,
                shard_hex_length,
                &extraction_params,
                cancellation,
            );

            if let Ok(extraction) = report {
                if extraction.confidence > CANDIDATE_CONFIDENCE_FLOOR {
                    if let Some(candidate_hex) = extraction.payload {
                        let ballot_slot =
                            shard_ballots[shard_index].entry(candidate_hex).or_insert((0, 0.0));
                        ballot_slot.0 += 1;
                        ballot_slot.1 += extraction.confidence;
                    }
                }
            }
        }

        // Pluralidad por fragmento.
        let mut winning_shards: Vec<Option<(String, f64)>> = Vec::with_capacity(shard_count);
        for ballots in &shard_ballots {
            let winner = ballots
                .iter()
                .max_by(|left, right| {
                    left.1 .0.cmp(&right.1 .0).then(
                        left.1
                             .1
                            .partial_cmp(&right.1 .1)
                            .unwrap_or(std::cmp::Ordering::Equal),
                    )
                })
                .map(|(candidate_hex, (votes, confidence_sum))| {
                    (candidate_hex.clone(), confidence_sum / *votes as f64)
                });
            winning_shards.push(winner);
        }

        let shards_recovered = winning_shards.iter().flatten().count();
        if shards_recovered < shard_count {
            warn!(
                shards_recovered,
                shard_count, "❌ [TEMPORAL]: Fragmentos insuficientes para la reconstitución."
            );
            return Ok(TemporalExtractReport {
                payload: None,
                confidence: 0.0,
                shards_recovered,
                shard_count,
                frames_sampled,
            });
        }

        // Reconstitución: hex → bits exactos por fragmento → palabra RS global.
        let mut reconstituted_bits: Vec<u8> = Vec::new();
        let mut mean_shard_confidence = 0.0f64;
        for (shard_index, winner) in winning_shards.iter().enumerate() {
            let (candidate_hex, shard_confidence) =
                winner.as_ref().expect("Fragmento recuperado verificado");
            mean_shard_confidence += shard_confidence;

            let shard_bytes = match hex::decode(candidate_hex) {
                Ok(bytes) => bytes,
                Err(_) => {
                    return Ok(TemporalExtractReport {
                        payload: None,
                        confidence: 0.0,
                        shards_recovered,
                        shard_count,
                        frames_sampled,
                    });
                }
            };

            let mut shard_bits = unpack_bits_msb_first(&shard_bytes);
            shard_bits.truncate(shard_bit_lengths[shard_index]);
            reconstituted_bits.extend_from_slice(&shard_bits);
        }
        mean_shard_confidence /= shard_count as f64;

        let global_codeword = pack_bits_msb_first(&reconstituted_bits)?;
        let codec = ReedSolomonCodec::new(config.ecc_bytes)?;

        match codec.decode(&global_codeword) {
            Ok(decode_report) => {
                let decode_factor =
                    (1.0 - decode_report.errors_corrected as f64 / config.ecc_bytes as f64).max(0.0);
                let final_confidence = mean_shard_confidence * decode_factor;

                info!(
                    shards_recovered,
                    final_confidence, "✅ [TEMPORAL]: Payload global reconstituido."
                );

                Ok(TemporalExtractReport {
                    payload: Some(String::from_utf8_lossy(&decode_report.message).into_owned()),
                    confidence: final_confidence,
                    shards_recovered,
                    shard_count,
                    frames_sampled,
                })
            }
            Err(_decode_failure) => Ok(TemporalExtractReport {
                payload: None,
                confidence: 0.0,
                shards_recovered,
                shard_count,
                frames_sampled,
            }),
        }
    }

    /// Longitudes de bits por fragmento: partición contigua equitativa.
    fn shard_bit_lengths(
        payload_byte_length: usize,
        parity_bytes: usize,
        shard_count: usize,
    ) -> Vec<usize> {
        let total_bits = (payload_byte_length + parity_bytes) * 8;
        let base_length = total_bits / shard_count;
        let remainder = total_bits % shard_count;

        (0..shard_count)
            .map(|shard_index| base_length + usize::from(shard_index < remainder))
            .collect()
    }

    /// Fragmentos hex del flujo RS global del payload.
    fn shard_hex_payloads(
        payload_text: &str,
        parity_bytes: usize,
        frame_count: usize,
    ) -> Result<Vec<String>, WatermarkError> {
        let codec = ReedSolomonCodec::new(parity_bytes)?;
        let global_codeword = codec.encode(payload_text.as_bytes())?;
        let global_bits = unpack_bits_msb_first(&global_codeword);

        let shard_count = Self::shard_count_for(frame_count);
        let shard_lengths =
            Self::shard_bit_lengths(payload_text.len(), parity_bytes, shard_count);

        let mut shard_hex_payloads = Vec::with_capacity(shard_count);
        let mut bit_cursor = 0usize;
        for shard_length in shard_lengths {
            let mut shard_bits = global_bits[bit_cursor..bit_cursor + shard_length].to_vec();
            bit_cursor += shard_length;

            // Relleno a múltiplo de 8 para el empaquetado hex.
            while shard_bits.len() % 8 != 0 {
                shard_bits.push(0);
            }
            let shard_bytes = pack_bits_msb_first(&shard_bits)?;
            shard_hex_payloads.push(hex::encode(shard_bytes));
        }

        Ok(shard_hex_payloads)
    }
}

// -----------------------------------------------------------------
// ESTRATO DE CERTIFICACIÓN: FRAGMENTACIÓN Y PLURALIDAD (L2)
// -----------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    const WORK_ID: &str = "GJP-MEDIA-2026-DEADBEEF01";
    const PAYLOAD_HASH: &str = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";

    /// Cuadro sintético con ruido determinista (textura alta).
    fn noisy_frame_bytes(frame_index: usize, width: u32, height: u32) -> Vec<u8> {
        let rgb_buffer: Vec<u8> = (0..width as usize * height as usize)
            .flat_map(|pixel_index| {
                let mixed = pixel_index
                    .wrapping_mul(2654435761)
                    .wrapping_add(frame_index.wrapping_mul(40503));
                let shade = ((mixed >> 8) % 256) as u8;
                [shade, ((mixed >> 16) % 256) as u8, ((mixed >> 3) % 256) as u8]
            })
            .collect();
        DecodedImage::from_rgb_parts(rgb_buffer, width, height)
            .expect("Cuadro válido")
            .encode_png()
            .expect("PNG válido")
    }

    #[test]
    fn certify_shard_count_rule() {
        assert_eq!(TemporalWrapper::shard_count_for(5), 1);
        assert_eq!(TemporalWrapper::shard_count_for(10), 1);
        assert_eq!(TemporalWrapper::shard_count_for(11), 2);
        assert_eq!(TemporalWrapper::shard_count_for(30), 3);
        assert_eq!(TemporalWrapper::shard_count_for(300), 3);
        assert_eq!(TemporalWrapper::shard_count_for(1), 1);
    }

    #[test]
    fn certify_shard_bit_partition_is_contiguous_and_exact() {
        let lengths = TemporalWrapper::shard_bit_lengths(20, 12, 3);
        assert_eq!(lengths.iter().sum::<usize>(), (20 + 12) * 8);
        assert!(lengths.windows(2).all(|pair| pair[0] >= pair[1]), "Resto al frente");
    }

    #[test]
    fn certify_texture_variance_gate_separates_flat_from_noise() {
        let flat_frame = DecodedImage::from_rgb_parts(vec![128u8; 64 * 64 * 3], 64, 64)
            .expect("Cuadro válido");
        assert!(TemporalWrapper::normalized_texture_variance(&flat_frame) < 0.01);

        let noisy_bytes = noisy_frame_bytes(0, 64, 64);
        let noisy_frame = DecodedImage::from_bytes(&noisy_bytes).expect("Cuadro válido");
        assert!(
            TemporalWrapper::normalized_texture_variance(&noisy_frame) > 0.3,
            "El ruido denso debe superar el umbral"
        );
    }

    #[test]
    fn certify_video_shard_recovery_with_frame_drop() {
        // 30 cuadros de ruido, 3 fragmentos, ecc 12 (escenario de referencia).
        let frame_count = 30usize;
        let payload_text = "©AB|Alex|GJP-MEDIA-2026-DEAD";
        let config = TemporalConfig::default();
        let cancellation = CancellationToken::new();

        let source_frames: Vec<Vec<u8>> =
            (0..frame_count).map(|index| noisy_frame_bytes(index, 200, 160)).collect();

        let mut sealed_frames: Vec<Vec<u8>> = vec![Vec::new(); frame_count];
        TemporalWrapper::wrap_frames(
            source_frames.into_iter(),
            frame_count,
            WORK_ID,
            payload_text,
            PAYLOAD_HASH,
            &config,
            &cancellation,
            |frame_index, sealed_bytes| sealed_frames[frame_index] = sealed_bytes,
        )
        .expect("Envoltura válida");

        // Caída determinista del 20%: se retira 1 de cada 5 cuadros.
        let surviving_frames: Vec<Vec<u8>> = sealed_frames
            .into_iter()
            .enumerate()
            .filter(|(frame_index, _)| frame_index % 5 != 2)
            .map(|(_, frame_bytes)| frame_bytes)
            .collect();

        let report = TemporalWrapper::extract_frames(
            surviving_frames.iter().cloned(),
            surviving_frames.len(),
            WORK_ID,
            PAYLOAD_HASH,
            payload_text.len(),
            &config,
            &cancellation,
        )
        .expect("Extracción válida");

        assert_eq!(report.shard_count, 3);
        assert_eq!(report.shards_recovered, 3, "Los tres fragmentos deben recuperarse");
        assert_eq!(report.payload.as_deref(), Some(payload_text));
        assert!(report.confidence >= 0.6, "Confianza final: {}", report.confidence);
        println!("✅ TEMPORAL: Recuperación con caída del 20% certificada.");
    }

    #[test]
    fn certify_cancellation_between_frames() {
        let cancellation = CancellationToken::new();
        cancellation.cancel();

        let outcome = TemporalWrapper::wrap_frames(
            std::iter::once(noisy_frame_bytes(0, 64, 64)),
            1,
            WORK_ID,
            "©A|A|W",
            PAYLOAD_HASH,
            &TemporalConfig::default(),
            &cancellation,
            |_, _| {},
        );
        assert!(matches!(outcome, Err(WatermarkError::Cancelled)));
    }
}
// FIN DEL ARCHIVO [libs/domain/watermark/src/temporal.rs]
