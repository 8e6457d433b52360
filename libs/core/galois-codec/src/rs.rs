// INICIO DEL ARCHIVO [libs/core/galois-codec/src/rs.rs]
/*!
 * =================================================================
 * APARATO: REED-SOLOMON CODEC ENGINE (V9.0 - FORNEY CERTIFIED)
 * CLASIFICACIÓN: CORE ECC (ESTRATO L1)
 * RESPONSABILIDAD: CODIFICACIÓN SISTEMÁTICA Y CORRECCIÓN t = ⌊ecc/2⌋
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SYSTEMATIC SOVEREIGNTY: La palabra de código es mensaje || paridad;
 *    el mensaje viaja en claro y la paridad es el residuo módulo g(x).
 * 2. FOUR-STAGE DECODE: Síndromes → Berlekamp-Massey → Chien → Forney,
 *    con una segunda pasada de síndromes como certificación residual.
 * 3. FAIL LOUD, FAIL CLEAN: Si la paridad se agota, el decodificador
 *    reporta los errores detectados y corrige cero por contrato.
 *
 * # Mathematical Proof (Generator Polynomial):
 * g(x) = ∏_{i=0}^{ecc-1} (x − α^i) con α = 2. Toda palabra de código
 * c(x) es múltiplo de g(x), luego c(α^i) = 0 para i ∈ [0, ecc).
 * Un patrón de e ≤ ⌊ecc/2⌋ errores produce síndromes no nulos que
 * determinan unívocamente localizadores y magnitudes.
 * =================================================================
 */

use crate::errors::CodecError;
use crate::gf256;
use tracing::{debug, instrument, trace};

/// Máxima longitud de palabra de código en GF(2^8).
const MAX_CODEWORD_LENGTH: usize = 255;

/**
 * Reporte inmutable de una decodificación exitosa.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsDecodeReport {
    /// Mensaje recuperado (sin bytes de paridad).
    pub message: Vec<u8>,
    /// Errores de byte detectados en la palabra recibida.
    pub errors_found: usize,
    /// Errores de byte efectivamente corregidos (== detectados en éxito).
    pub errors_corrected: usize,
}

/**
 * Códec Reed-Solomon por-llamada sobre GF(2^8).
 *
 * El códec es inmutable tras su construcción: el polinomio generador
 * se sintetiza una vez para la cantidad de paridad solicitada.
 */
pub struct ReedSolomonCodec {
    parity_length: usize,
    /// Generador g(x) con el menor grado primero; g[0] es el término independiente.
    generator_lsb_first: Vec<u8>,
}

impl ReedSolomonCodec {
    /**
     * Construye el códec para `parity_length` bytes de paridad.
     *
     * # Errors:
     * Rechaza paridad nula (un código sin redundancia no corrige nada).
     */
    pub fn new(parity_length: usize) -> Result<Self, CodecError> {
        if parity_length == 0 {
            return Err(CodecError::DegenerateParameters {
                message_length: 0,
                parity_length,
            });
        }

        // g(x) = ∏ (x − α^i), construido incrementalmente con el menor grado primero.
        let mut generator_lsb_first = vec![1u8];
        for root_index in 0..parity_length {
            let root = gf256::alpha_power(root_index as i32);
            // Multiplicación por (x + root): en GF(2^8) la resta es suma.
            generator_lsb_first = gf256::poly_multiply_lsb_first(&generator_lsb_first, &[root, 1]);
        }

        Ok(Self { parity_length, generator_lsb_first })
    }

    /// Bytes de paridad gobernados por este códec.
    #[inline(always)]
    #[must_use]
    pub fn parity_length(&self) -> usize {
        self.parity_length
    }

    /// Capacidad de corrección t = ⌊ecc/2⌋ en bytes.
    #[inline(always)]
    #[must_use]
    pub fn correction_capacity(&self) -> usize {
        self.parity_length / 2
    }

    /**
     * Codificación sistemática: retorna `mensaje || paridad`.
     *
     * La paridad es el residuo de m(x)·x^ecc módulo g(x), computado con
     * el registro de desplazamiento LFSR clásico.
     *
     * # Errors:
     * - `DegenerateParameters` ante mensaje vacío.
     * - `CodewordOverflow` si mensaje + paridad > 255 bytes.
     */
    #[instrument(level = "trace", skip(self, message))]
    pub fn encode(&self, message: &[u8]) -> Result<Vec<u8>, CodecError> {
        if message.is_empty() {
            return Err(CodecError::DegenerateParameters {
                message_length: 0,
                parity_length: self.parity_length,
            });
        }
        if message.len() + self.parity_length > MAX_CODEWORD_LENGTH {
            return Err(CodecError::CodewordOverflow {
                message_length: message.len(),
                parity_length: self.parity_length,
            });
        }

        // Registro LFSR: residuo de la división polinómica larga.
        let mut parity_register = vec![0u8; self.parity_length];
        for message_byte in message {
            let feedback = gf256::add(*message_byte, parity_register[0]);
            parity_register.rotate_left(1);
            parity_register[self.parity_length - 1] = 0;

            if feedback != 0 {
                for (register_slot, generator_degree) in
                    parity_register.iter_mut().zip((0..self.parity_length).rev())
                {
                    // Coeficientes de g(x) sin el término líder x^ecc.
                    *register_slot = gf256::add(
                        *register_slot,
                        gf256::multiply(feedback, self.generator_lsb_first[generator_degree]),
                    );
                }
            }
        }

        let mut codeword = Vec::with_capacity(message.len() + self.parity_length);
        codeword.extend_from_slice(message);
        codeword.extend_from_slice(&parity_register);

        trace!(
            codeword_length = codeword.len(),
            "🧬 [RS_ENCODE]: Palabra sistemática sintetizada."
        );
        Ok(codeword)
    }

    /**
     * Decodificación con corrección de hasta t = ⌊ecc/2⌋ errores.
     *
     * Etapas: (1) síndromes; (2) Berlekamp-Massey; (3) búsqueda de Chien
     * sobre las posiciones de la palabra; (4) magnitudes de Forney;
     * (5) segunda pasada de síndromes como certificación residual.
     *
     * # Errors:
     * - `ParityExhausted` cuando los síndromes residuales no son nulos
     *   tras el intento de corrección (errores > t o patrón inconsistente).
     * - `DegenerateParameters` / `CodewordOverflow` ante palabras malformadas.
     */
    #[instrument(level = "trace", skip(self, received_codeword))]
    pub fn decode(&self, received_codeword: &[u8]) -> Result<RsDecodeReport, CodecError> {
        if received_codeword.len() <= self.parity_length {
            return Err(CodecError::DegenerateParameters {
                message_length: received_codeword.len().saturating_sub(self.parity_length),
                parity_length: self.parity_length,
            });
        }
        if received_codeword.len() > MAX_CODEWORD_LENGTH {
            return Err(CodecError::CodewordOverflow {
                message_length: received_codeword.len() - self.parity_length,
                parity_length: self.parity_length,
            });
        }

        let message_length = received_codeword.len() - self.parity_length;

        // 1. SÍNDROMES: S_i = r(α^i). Todos nulos ⇒ palabra intacta.
        let syndromes = self.compute_syndromes(received_codeword);
        if syndromes.iter().all(|syndrome| *syndrome == 0) {
            return Ok(RsDecodeReport {
                message: received_codeword[..message_length].to_vec(),
                errors_found: 0,
                errors_corrected: 0,
            });
        }

        // 2. BERLEKAMP-MASSEY: localizador Λ(x) con Λ(0) = 1.
        let error_locator = Self::berlekamp_massey(&syndromes);
        let locator_degree = error_locator.len() - 1;

        if locator_degree > self.correction_capacity() {
            debug!(
                locator_degree,
                capacity = self.correction_capacity(),
                "❌ [RS_DECODE]: Grado del localizador excede la capacidad."
            );
            return Err(CodecError::ParityExhausted { errors_found: locator_degree });
        }

        // 3. CHIEN: raíces de Λ sobre las posiciones de la palabra.
        let error_positions =
            Self::chien_search(&error_locator, received_codeword.len());

        if error_positions.len() != locator_degree {
            // Raíces espurias o insuficientes: patrón incorregible.
            return Err(CodecError::ParityExhausted { errors_found: locator_degree });
        }

        // 4. FORNEY: magnitudes sobre Ω(x) = S(x)·Λ(x) mod x^ecc.
        let mut corrected_codeword = received_codeword.to_vec();
        self.apply_forney_corrections(
            &mut corrected_codeword,
            &syndromes,
            &error_locator,
            &error_positions,
        );

        // 5. CERTIFICACIÓN RESIDUAL: segunda pasada de síndromes.
        let residual_syndromes = self.compute_syndromes(&corrected_codeword);
        if residual_syndromes.iter().any(|syndrome| *syndrome != 0) {
            debug!("❌ [RS_DECODE]: Síndromes residuales no nulos tras la corrección.");
            return Err(CodecError::ParityExhausted { errors_found: error_positions.len() });
        }

        debug!(
            errors_corrected = error_positions.len(),
            "✅ [RS_DECODE]: Corrección certificada por síndromes residuales."
        );

        Ok(RsDecodeReport {
            message: corrected_codeword[..message_length].to_vec(),
            errors_found: error_positions.len(),
            errors_corrected: error_positions.len(),
        })
    }

    /// Síndromes S_i = r(α^i) para i ∈ [0, ecc).
    fn compute_syndromes(&self, codeword: &[u8]) -> Vec<u8> {
        (0..self.parity_length)
            .map(|syndrome_index| {
                gf256::poly_eval_msb_first(codeword, gf256::alpha_power(syndrome_index as i32))
            })
            .collect()
    }

    /**
     * Berlekamp-Massey: sintetiza el LFSR mínimo que genera los síndromes.
     * Retorna Λ(x) con el menor grado primero (Λ[0] = 1).
     */
    fn berlekamp_massey(syndromes: &[u8]) -> Vec<u8> {
        let mut current_locator = vec![1u8];
        let mut previous_locator = vec![1u8];
        let mut current_length = 0usize;
        let mut shift_distance = 1usize;
        let mut previous_discrepancy = 1u8;

        for iteration in 0..syndromes.len() {
            // Discrepancia δ = S_n + Σ Λ_i · S_{n−i} sobre el grado vigente.
            let mut discrepancy = syndromes[iteration];
            for tap_index in 1..current_locator.len() {
                if tap_index > iteration {
                    break;
                }
                discrepancy = gf256::add(
                    discrepancy,
                    gf256::multiply(current_locator[tap_index], syndromes[iteration - tap_index]),
                );
            }

            if discrepancy == 0 {
                shift_distance += 1;
                continue;
            }

            let scale_factor = gf256::divide(discrepancy, previous_discrepancy);
            let correction_degree = previous_locator.len() + shift_distance;
            let mut updated_locator = current_locator.clone();
            if updated_locator.len() < correction_degree {
                updated_locator.resize(correction_degree, 0);
            }
            for (tap_index, previous_coefficient) in previous_locator.iter().enumerate() {
                updated_locator[tap_index + shift_distance] = gf256::add(
                    updated_locator[tap_index + shift_distance],
                    gf256::multiply(scale_factor, *previous_coefficient),
                );
            }

            if 2 * current_length <= iteration {
                previous_locator = current_locator;
                previous_discrepancy = discrepancy;
                current_length = iteration + 1 - current_length;
                shift_distance = 1;
            } else {
                shift_distance += 1;
            }
            current_locator = updated_locator;
        }

        // Poda de ceros líderes residuales del buffer de trabajo.
        while current_locator.len() > 1 && *current_locator.last().unwrap() == 0 {
            current_locator.pop();
        }
        current_locator
    }

    /**
     * Búsqueda de Chien: posiciones p donde Λ(α^{-(n-1-p)}) = 0.
     *
     * La posición p del arreglo corresponde al término x^{n-1-p}, de modo
     * que el localizador del error es X = α^{n-1-p}.
     */
    fn chien_search(error_locator_lsb_first: &[u8], codeword_length: usize) -> Vec<usize> {
        let mut error_positions = Vec::new();
        for array_position in 0..codeword_length {
            let degree_from_right = (codeword_length - 1 - array_position) as i32;
            let evaluation_point = gf256::alpha_power(-degree_from_right);
            if gf256::poly_eval_lsb_first(error_locator_lsb_first, evaluation_point) == 0 {
                error_positions.push(array_position);
            }
        }
        error_positions
    }

    /// Magnitudes de Forney: e = X · Ω(X⁻¹) / Λ'(X⁻¹), con b = 0.
    fn apply_forney_corrections(
        &self,
        codeword: &mut [u8],
        syndromes: &[u8],
        error_locator_lsb_first: &[u8],
        error_positions: &[usize],
    ) {
        // Ω(x) = S(x)·Λ(x) mod x^ecc (menor grado primero).
        let mut error_evaluator =
            gf256::poly_multiply_lsb_first(syndromes, error_locator_lsb_first);
        error_evaluator.truncate(self.parity_length);

        // Λ'(x): derivada formal; en característica 2 sobreviven los grados impares.
        let mut locator_derivative = vec![0u8; error_locator_lsb_first.len().saturating_sub(1).max(1)];
        for (degree, coefficient) in error_locator_lsb_first.iter().enumerate().skip(1) {
            if degree % 2 == 1 {
                locator_derivative[degree - 1] = *coefficient;
            }
        }

        let codeword_length = codeword.len();
        for array_position in error_positions {
            let degree_from_right = (codeword_length - 1 - array_position) as i32;
            let locator_value = gf256::alpha_power(degree_from_right);
            let locator_inverse = gf256::alpha_power(-degree_from_right);

            let evaluator_at_inverse =
                gf256::poly_eval_lsb_first(&error_evaluator, locator_inverse);
            let derivative_at_inverse =
                gf256::poly_eval_lsb_first(&locator_derivative, locator_inverse);

            let magnitude = gf256::multiply(
                locator_value,
                gf256::divide(evaluator_at_inverse, derivative_at_inverse),
            );
            codeword[*array_position] = gf256::add(codeword[*array_position], magnitude);
        }
    }
}

// FIN DEL ARCHIVO [libs/core/galois-codec/src/rs.rs]
