// [libs/core/galois-codec/src/lib.rs]
#![deny(missing_docs)]

/*!
 * =================================================================
 * APARATO: GALOIS CODEC MASTER HUB (V5.0 - PARITY SOVEREIGN)
 * CLASIFICACIÓN: CORE ECC (ESTRATO L1)
 * RESPONSABILIDAD: ORQUESTACIÓN DEL CÓDEC REED-SOLOMON
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FIELD SOVEREIGNTY: Aritmética GF(2^8) pura sobre el polinomio
 *    primitivo 0x11D, sin dependencias de C ni tablas externas.
 * 2. RESIDUAL VERIFICATION: Toda corrección se certifica con una
 *    segunda pasada de síndromes antes de declarar éxito.
 * 3. BIT ORDER CONTRACT: Empaquetado MSB-first bidireccional para el
 *    flujo de bloques del sellador.
 *
 * # Mathematical Proof (Correction Capacity):
 * Con 'ecc' bytes de paridad el código corrige t = ⌊ecc/2⌋ errores
 * de byte en posiciones desconocidas (cota de Singleton alcanzada:
 * Reed-Solomon es MDS).
 * =================================================================
 */

/// Empaquetado y desempaquetado de bits MSB-first.
pub mod bits;
/// Catálogo de fallos del códec.
pub mod errors;
/// Aritmética del campo finito GF(2^8) con tablas exp/log globales.
pub mod gf256;
/// Codificador y decodificador Reed-Solomon sistemático.
pub mod rs;

/// Prelude nominal del estrato L1-ECC.
pub mod prelude {
    pub use crate::bits::{pack_bits_msb_first, unpack_bits_msb_first};
    pub use crate::errors::CodecError;
    pub use crate::rs::{ReedSolomonCodec, RsDecodeReport};
}
