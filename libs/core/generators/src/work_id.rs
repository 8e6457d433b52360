// INICIO DEL ARCHIVO [libs/core/generators/src/work_id.rs]
/*!
 * =================================================================
 * APARATO: WORK IDENTIFIER SYNTHESIZER (V2.2)
 * CLASIFICACIÓN: CORE GENERATORS (ESTRATO L1)
 * RESPONSABILIDAD: IDENTIFICADORES DE OBRA GJP-MEDIA ÚNICOS
 *
 * # Contrato:
 * Formato `GJP-MEDIA-<año>-<timestamp base36><6 base36 aleatorios>`,
 * mayúsculas, longitud total 24-32. El identificador actúa como
 * separador de dominio en todas las semillas del sellador.
 * =================================================================
 */

use chrono::{Datelike, TimeZone, Utc};
use rand::Rng;

/// Alfabeto base36 en mayúsculas.
const BASE36_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Prefijo soberano de los identificadores de obra.
pub const WORK_ID_PREFIX: &str = "GJP-MEDIA";

/// Longitud del sufijo aleatorio.
const RANDOM_SUFFIX_LENGTH: usize = 6;

/**
 * Sintetizador de identificadores de obra.
 */
pub struct WorkIdentifierGenerator;

impl WorkIdentifierGenerator {
    /// Sintetiza un identificador nuevo anclado al reloj del sistema.
    #[must_use]
    pub fn synthesize() -> String {
        let now = Utc::now();
        Self::synthesize_at(now.timestamp_millis(), &mut rand::thread_rng())
    }

    /**
     * Sintetiza un identificador para un instante explícito (en milisegundos
     * Unix) con una fuente de entropía inyectada. La variante inyectada
     * existe para los Proving Grounds: el reloj y el RNG son los únicos
     * insumos no deterministas.
     */
    #[must_use]
    pub fn synthesize_at<R: Rng>(timestamp_millis: i64, entropy_source: &mut R) -> String {
        let calendar_year = Utc
            .timestamp_millis_opt(timestamp_millis)
            .single()
            .map_or(1970, |instant| instant.year());

        let timestamp_base36 = Self::encode_base36(timestamp_millis.unsigned_abs());

        let mut random_suffix = String::with_capacity(RANDOM_SUFFIX_LENGTH);
        for _ in 0..RANDOM_SUFFIX_LENGTH {
            let alphabet_index = entropy_source.gen_range(0..BASE36_ALPHABET.len());
            random_suffix.push(char::from(BASE36_ALPHABET[alphabet_index]));
        }

        format!("{}-{}-{}{}", WORK_ID_PREFIX, calendar_year, timestamp_base36, random_suffix)
    }

    /// Codificación base36 en mayúsculas, sin ceros a la izquierda.
    #[must_use]
    fn encode_base36(mut value: u64) -> String {
        if value == 0 {
            return "0".to_string();
        }

        let mut digits_reversed = Vec::new();
        while value > 0 {
            digits_reversed.push(BASE36_ALPHABET[(value % 36) as usize]);
            value /= 36;
        }
        digits_reversed.reverse();
        String::from_utf8(digits_reversed).unwrap_or_default()
    }

    /// Valida la forma de un identificador entregado externamente.
    #[must_use]
    pub fn is_well_formed(candidate_identifier: &str) -> bool {
        let within_length_bounds =
            candidate_identifier.len() >= 24 && candidate_identifier.len() <= 32;

        within_length_bounds
            && candidate_identifier.starts_with(WORK_ID_PREFIX)
            && candidate_identifier
                .chars()
                .all(|symbol| symbol.is_ascii_uppercase() || symbol.is_ascii_digit() || symbol == '-')
    }
}

// FIN DEL ARCHIVO [libs/core/generators/src/work_id.rs]
