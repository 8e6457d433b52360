// [libs/domain/watermark/src/cancel.rs]
/*!
 * =================================================================
 * APARATO: COOPERATIVE CANCELLATION TOKEN (V2.0)
 * CLASIFICACIÓN: DOMAIN WATERMARK (ESTRATO L2)
 * RESPONSABILIDAD: SEÑAL DE PARADA ENTRE FRONTERAS DE BLOQUE
 *
 * # Contrato:
 * El token se observa entre bandas de bloques y entre cuadros; jamás
 * dentro de un bloque. Al observarse, la operación retorna 'Cancelled'
 * y libera todos los buffers intermedios (caída natural de scope).
 * =================================================================
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Token de cancelación cooperativa compartible entre hilos.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancel_flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Construye un token no cancelado.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispara la cancelación (idempotente).
    #[inline(always)]
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// Observa la señal de cancelación.
    #[inline(always)]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }
}
