// INICIO DEL ARCHIVO [libs/core/dsp-engine/src/cosine_table.rs]
/*!
 * =================================================================
 * APARATO: COSINE BASIS SINGLETON (V2.1 - ONCE INIT)
 * CLASIFICACIÓN: CORE DSP (L1)
 * RESPONSABILIDAD: PRE-CÓMPUTO GLOBAL DE LA BASE DCT-II
 * =================================================================
 */

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/**
 * Base de cosenos pre-computada para un lado de bloque N.
 *
 * Contiene la matriz $cos((2x+1)k\pi / 2N)$ en orden (k, x) y los
 * factores de normalización $\alpha(k)$ del estándar JPEG:
 * $\alpha(0) = \sqrt{1/N}$, $\alpha(k>0) = \sqrt{2/N}$.
 */
#[derive(Debug)]
pub struct CosineBasis {
    /// Lado del bloque cuadrado N.
    pub block_side: usize,
    /// Matriz de cosenos aplanada: `cosines[k * N + x]`.
    pub cosines: Vec<f64>,
    /// Factores de normalización por frecuencia.
    pub alphas: Vec<f64>,
}

impl CosineBasis {
    fn synthesize(block_side: usize) -> Self {
        let side_f = block_side as f64;
        let mut cosines = vec![0.0f64; block_side * block_side];
        let mut alphas = vec![0.0f64; block_side];

        for frequency_index in 0..block_side {
            alphas[frequency_index] = if frequency_index == 0 {
                (1.0 / side_f).sqrt()
            } else {
                (2.0 / side_f).sqrt()
            };

            for sample_index in 0..block_side {
                let angle = ((2 * sample_index + 1) as f64)
                    * (frequency_index as f64)
                    * std::f64::consts::PI
                    / (2.0 * side_f);
                cosines[frequency_index * block_side + sample_index] = angle.cos();
            }
        }

        Self { block_side, cosines, alphas }
    }

    /// Acceso directo al coseno `(k, x)`.
    #[inline(always)]
    #[must_use]
    pub fn cosine(&self, frequency_index: usize, sample_index: usize) -> f64 {
        self.cosines[frequency_index * self.block_side + sample_index]
    }
}

/// Caché global de bases, llenado perezoso bajo el primer acceso.
///
/// La visibilidad entre hilos concurrentes está garantizada por el
/// RwLock: el primer escritor publica la base y los lectores
/// subsiguientes obtienen el mismo Arc inmutable.
static COSINE_BASIS_CACHE: Lazy<RwLock<HashMap<usize, Arc<CosineBasis>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/**
 * Provee acceso de alto rendimiento a la base de cosenos para un lado N.
 *
 * @returns Un Arc compartido e inmutable hacia la base pre-computada.
 */
#[must_use]
pub fn cosine_basis(block_side: usize) -> Arc<CosineBasis> {
    if let Some(existing_basis) = COSINE_BASIS_CACHE
        .read()
        .expect("COSINE_CACHE_POISONED")
        .get(&block_side)
    {
        return Arc::clone(existing_basis);
    }

    let mut writable_cache = COSINE_BASIS_CACHE.write().expect("COSINE_CACHE_POISONED");
    Arc::clone(
        writable_cache
            .entry(block_side)
            .or_insert_with(|| Arc::new(CosineBasis::synthesize(block_side))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certify_alpha_normalization_values() {
        let basis = cosine_basis(8);
        assert!((basis.alphas[0] - (1.0f64 / 8.0).sqrt()).abs() < 1e-12);
        for frequency_index in 1..8 {
            assert!((basis.alphas[frequency_index] - (2.0f64 / 8.0).sqrt()).abs() < 1e-12);
        }
        println!("✅ BASIS: Normalización α certificada para N=8.");
    }

    #[test]
    fn certify_cache_returns_shared_instance() {
        let first_handle = cosine_basis(8);
        let second_handle = cosine_basis(8);
        assert!(Arc::ptr_eq(&first_handle, &second_handle), "El caché duplicó la base");
    }
}
// FIN DEL ARCHIVO [libs/core/dsp-engine/src/cosine_table.rs]
