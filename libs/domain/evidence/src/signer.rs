// INICIO DEL ARCHIVO [libs/domain/evidence/src/signer.rs]
/*!
 * =================================================================
 * APARATO: DETERMINISTIC EVIDENCE SIGNER (V7.0 - RFC6979)
 * CLASIFICACIÓN: DOMAIN EVIDENCE (ESTRATO L2)
 * RESPONSABILIDAD: FIRMA Y VERIFICACIÓN SECP256K1 DEL REGISTRO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DETERMINISTIC NONCE: La firma ECDSA usa nonce RFC6979; firmar el
 *    mismo mensaje con la misma llave reproduce la firma bit a bit.
 * 2. COMPACT REPRESENTATION: La firma viaja como 64 bytes (r || s) en
 *    hex de 128 caracteres; la llave pública como 33 bytes comprimidos.
 * 3. KEY HYGIENE: La llave de 32 bytes llega fuera-de-banda como hex;
 *    el buffer temporal se borra tras construir la SecretKey y la
 *    llave interna se borra en el Drop. Jamás se registra en logs.
 *
 * # Mathematical Proof (Signing Coverage):
 * El mensaje exacto es `mediaHash:payloadHash:timestampMillis` (ASCII,
 * timestamp decimal). Se firma SHA-256(mensaje): un bit mutado en
 * cualquiera de los tres componentes invalida la verificación.
 * =================================================================
 */

use crate::context::global_context;
use crate::errors::EvidenceError;
use secp256k1::ecdsa::Signature;
use secp256k1::{Message, PublicKey, SecretKey};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

/// Longitud exigida del material de llave: 64 caracteres hex minúsculas.
const SECRET_KEY_HEX_LENGTH: usize = 64;

/**
 * Firmante determinista del registro de evidencia.
 *
 * Construido una vez al arranque del proceso; la llave pública
 * comprimida se deriva en la construcción y queda cacheada.
 */
pub struct EvidenceSigner {
    secret_key: SecretKey,
    compressed_public_key_hex: String,
}

impl EvidenceSigner {
    /**
     * Construye el firmante desde material hexadecimal fuera-de-banda.
     *
     * # Errors:
     * - `SignerUnconfigured` ante material vacío, de longitud incorrecta,
     *   con mayúsculas o no-hexadecimal.
     * - `InvalidSecretKey` si la curva rechaza el escalar (cero u orden).
     */
    #[instrument(skip(secret_key_hexadecimal))]
    pub fn from_hex_key(secret_key_hexadecimal: &str) -> Result<Self, EvidenceError> {
        let trimmed_material = secret_key_hexadecimal.trim();

        if trimmed_material.len() != SECRET_KEY_HEX_LENGTH {
            return Err(EvidenceError::SignerUnconfigured(format!(
                "se esperaban {} caracteres hex, llegaron {}",
                SECRET_KEY_HEX_LENGTH,
                trimmed_material.len()
            )));
        }
        if !trimmed_material.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()) {
            return Err(EvidenceError::SignerUnconfigured(
                "el material debe ser hex minúsculas".to_string(),
            ));
        }

        let mut secret_key_buffer = [0u8; 32];
        hex::decode_to_slice(trimmed_material, &mut secret_key_buffer).map_err(|_| {
            EvidenceError::SignerUnconfigured("material hexadecimal indecodificable".to_string())
        })?;

        let secret_key = SecretKey::from_slice(&secret_key_buffer)?;

        // Borrado del buffer temporal: la única copia viva queda en la SecretKey.
        secret_key_buffer.fill(0);

        let public_key = PublicKey::from_secret_key(global_context(), &secret_key);
        let compressed_public_key_hex = hex::encode(public_key.serialize());

        debug!(public_key = %compressed_public_key_hex, "🔏 [SIGNER]: Autoridad de firma configurada.");

        Ok(Self { secret_key, compressed_public_key_hex })
    }

    /// Llave pública comprimida (33 bytes) en hex.
    #[inline(always)]
    #[must_use]
    pub fn public_key_hex(&self) -> &str {
        &self.compressed_public_key_hex
    }

    /**
     * Firma el mensaje de evidencia `mediaHash:payloadHash:timestampMillis`.
     *
     * @returns Firma compacta (r || s) en 128 caracteres hexadecimales.
     */
    #[must_use]
    pub fn sign_evidence(
        &self,
        media_hash_hexadecimal: &str,
        payload_hash_hexadecimal: &str,
        timestamp_millis: i64,
    ) -> String {
        let signing_message = format!(
            "{}:{}:{}",
            media_hash_hexadecimal, payload_hash_hexadecimal, timestamp_millis
        );

        let message_digest: [u8; 32] = Sha256::digest(signing_message.as_bytes()).into();
        let message = Message::from_digest(message_digest);

        let compact_signature =
            global_context().sign_ecdsa(&message, &self.secret_key).serialize_compact();
        hex::encode(compact_signature)
    }

    /**
     * Verificación pura de una firma de evidencia.
     *
     * # Errors:
     * `MalformedVerificationMaterial` si la firma o la llave no decodifican;
     * una firma bien formada pero inválida retorna `Ok(false)`.
     */
    pub fn verify_evidence(
        media_hash_hexadecimal: &str,
        payload_hash_hexadecimal: &str,
        timestamp_millis: i64,
        signature_hexadecimal: &str,
        public_key_hexadecimal: &str,
    ) -> Result<bool, EvidenceError> {
        let signature_bytes = hex::decode(signature_hexadecimal).map_err(|_| {
            EvidenceError::MalformedVerificationMaterial("firma no hexadecimal".to_string())
        })?;
        let signature = Signature::from_compact(&signature_bytes).map_err(|_| {
            EvidenceError::MalformedVerificationMaterial("firma compacta inválida".to_string())
        })?;

        let public_key_bytes = hex::decode(public_key_hexadecimal).map_err(|_| {
            EvidenceError::MalformedVerificationMaterial("llave pública no hexadecimal".to_string())
        })?;
        let public_key = PublicKey::from_slice(&public_key_bytes).map_err(|_| {
            EvidenceError::MalformedVerificationMaterial("llave pública inválida".to_string())
        })?;

        let signing_message = format!(
            "{}:{}:{}",
            media_hash_hexadecimal, payload_hash_hexadecimal, timestamp_millis
        );
        let message_digest: [u8; 32] = Sha256::digest(signing_message.as_bytes()).into();
        let message = Message::from_digest(message_digest);

        Ok(global_context().verify_ecdsa(&message, &signature, &public_key).is_ok())
    }
}

impl Drop for EvidenceSigner {
    fn drop(&mut self) {
        // Borrado best-effort del escalar secreto al apagar el proceso.
        self.secret_key.non_secure_erase();
    }
}

// FIN DEL ARCHIVO [libs/domain/evidence/src/signer.rs]
