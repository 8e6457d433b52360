// INICIO DEL ARCHIVO [libs/domain/evidence/src/hashing.rs]
/*!
 * =================================================================
 * APARATO: DIGEST AUTHORITY (V3.0 - SHA-256 STANDARD)
 * CLASIFICACIÓN: DOMAIN EVIDENCE (ESTRATO L2)
 * RESPONSABILIDAD: RESÚMENES DE ARTEFACTOS Y COMPARACIÓN CONSTANTE
 * =================================================================
 */

use sha2::{Digest, Sha256};

/// SHA-256 de un buffer, renderizado en hex minúsculas.
///
/// Autoridad única de resumen para artefactos (`originalHash`) y para
/// el payload canónico UTF-8 (`payloadHash`).
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Comparación de tiempo constante entre dos cadenas hexadecimales.
///
/// Acumula las diferencias byte a byte con XOR sin corto-circuito:
/// el tiempo de ejecución no depende del prefijo coincidente.
#[must_use]
pub fn constant_time_hex_equals(first_hex: &str, second_hex: &str) -> bool {
    let first_bytes = first_hex.as_bytes();
    let second_bytes = second_hex.as_bytes();

    if first_bytes.len() != second_bytes.len() {
        return false;
    }

    let mut difference_accumulator = 0u8;
    for (first_byte, second_byte) in first_bytes.iter().zip(second_bytes.iter()) {
        difference_accumulator |= first_byte ^ second_byte;
    }
    difference_accumulator == 0
}

// FIN DEL ARCHIVO [libs/domain/evidence/src/hashing.rs]
