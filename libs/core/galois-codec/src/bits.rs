// INICIO DEL ARCHIVO [libs/core/galois-codec/src/bits.rs]
/*!
 * =================================================================
 * APARATO: MSB-FIRST BIT MARSHALLER (V3.0)
 * CLASIFICACIÓN: CORE ECC (ESTRATO L1)
 * RESPONSABILIDAD: CONTRATO DE ORDEN DE BITS DEL FLUJO DE BLOQUES
 *
 * # Invariante:
 * Los bytes del mensaje se serializan con el bit más significativo
 * primero, en ambas direcciones. El bit i del flujo corresponde al
 * bloque i de la rejilla de luminancia.
 * =================================================================
 */

use crate::errors::CodecError;

/// Desempaqueta bytes a un flujo de bits MSB-first (valores 0/1).
#[must_use]
pub fn unpack_bits_msb_first(bytes: &[u8]) -> Vec<u8> {
    let mut bit_stream = Vec::with_capacity(bytes.len() * 8);
    for byte_value in bytes {
        for bit_offset in (0..8).rev() {
            bit_stream.push((byte_value >> bit_offset) & 1);
        }
    }
    bit_stream
}

/// Empaqueta un flujo de bits MSB-first de vuelta a bytes.
///
/// # Errors:
/// Rechaza flujos cuya longitud no sea múltiplo de 8 o que contengan
/// valores distintos de 0/1.
pub fn pack_bits_msb_first(bit_stream: &[u8]) -> Result<Vec<u8>, CodecError> {
    if bit_stream.len() % 8 != 0 || bit_stream.iter().any(|bit| *bit > 1) {
        return Err(CodecError::MalformedBitStream { bit_count: bit_stream.len() });
    }

    let mut bytes = Vec::with_capacity(bit_stream.len() / 8);
    for byte_bits in bit_stream.chunks_exact(8) {
        let mut assembled_byte = 0u8;
        for bit_value in byte_bits {
            assembled_byte = (assembled_byte << 1) | bit_value;
        }
        bytes.push(assembled_byte);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certify_msb_first_orientation() {
        // 0xA9 = 1010_1001
        let bits = unpack_bits_msb_first(&[0xA9]);
        assert_eq!(bits, vec![1, 0, 1, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn certify_pack_unpack_round_trip() {
        let original: Vec<u8> = (0..=255u8).collect();
        let packed = pack_bits_msb_first(&unpack_bits_msb_first(&original)).expect("Flujo válido");
        assert_eq!(packed, original);
        println!("✅ BITS: Round-trip MSB-first certificado sobre los 256 bytes.");
    }

    #[test]
    fn certify_malformed_stream_rejection() {
        assert!(pack_bits_msb_first(&[1, 0, 1]).is_err(), "Longitud no múltiplo de 8");
        assert!(pack_bits_msb_first(&[2; 8]).is_err(), "Valores no binarios");
    }
}
// FIN DEL ARCHIVO [libs/core/galois-codec/src/bits.rs]
