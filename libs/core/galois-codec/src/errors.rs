// [libs/core/galois-codec/src/errors.rs]
// =================================================================
// APARATO: CODEC ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DEL CÓDEC REED-SOLOMON
// =================================================================

use thiserror::Error;

/// Define los errores posibles durante la codificación y decodificación.
#[derive(Error, Debug)]
pub enum CodecError {
    /// El mensaje más la paridad exceden el tamaño de palabra GF(2^8).
    ///
    /// Reed-Solomon sobre GF(2^8) admite palabras de código de a lo sumo
    /// 255 bytes; mensajes mayores deben fragmentarse aguas arriba.
    #[error("Palabra de código desbordada: {message_length} + {parity_length} > 255")]
    CodewordOverflow {
        /// Longitud del mensaje entregado.
        message_length: usize,
        /// Bytes de paridad solicitados.
        parity_length: usize,
    },

    /// El mensaje está vacío o la paridad solicitada es nula.
    #[error("Parámetros degenerados: mensaje {message_length} bytes, paridad {parity_length}")]
    DegenerateParameters {
        /// Longitud del mensaje entregado.
        message_length: usize,
        /// Bytes de paridad solicitados.
        parity_length: usize,
    },

    /// La corrección fracasó: los síndromes residuales no son nulos.
    ///
    /// Se reporta la cantidad de errores detectados; la cantidad
    /// corregida es cero por contrato (la palabra queda inservible).
    #[error("Capacidad de paridad agotada: {errors_found} errores detectados, corrección imposible")]
    ParityExhausted {
        /// Errores detectados antes de declarar el fracaso.
        errors_found: usize,
    },

    /// El flujo de bits entregado no es múltiplo de 8 o contiene valores no binarios.
    #[error("Flujo de bits malformado: longitud {bit_count}")]
    MalformedBitStream {
        /// Cantidad de bits recibida.
        bit_count: usize,
    },
}
