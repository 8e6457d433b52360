// INICIO DEL ARCHIVO [libs/domain/evidence/src/context.rs]
/*!
 * =================================================================
 * APARATO: GLOBAL CRYPTO CONTEXT (V2.0)
 * CLASIFICACIÓN: DOMAIN EVIDENCE (L2)
 * RESPONSABILIDAD: SINGLETON DEL CONTEXTO SECP256K1
 * =================================================================
 */

use secp256k1::{All, Secp256k1};
use std::sync::LazyLock;

/**
 * Instancia global y estática del contexto de Curva Elíptica.
 *
 * Este Singleton pre-computa las tablas de multiplicación escalar
 * durante el primer acceso, optimizando todas las firmas subsiguientes.
 */
pub static GLOBAL_CONTEXT: LazyLock<Secp256k1<All>> = LazyLock::new(Secp256k1::new);

/**
 * Provee acceso seguro y de alto rendimiento al contexto global de criptografía.
 *
 * @returns Una referencia estática al motor de secp256k1.
 */
#[inline]
#[must_use]
pub fn global_context() -> &'static Secp256k1<All> {
    &GLOBAL_CONTEXT
}
// FIN DEL ARCHIVO [libs/domain/evidence/src/context.rs]
