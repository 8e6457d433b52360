// INICIO DEL ARCHIVO [libs/core/dsp-engine/src/dct.rs]
/*!
 * =================================================================
 * APARATO: DCT-II TRANSFORM ENGINE (V7.0 - SEPARABLE GOLD)
 * CLASIFICACIÓN: CORE DSP (ESTRATO L1)
 * RESPONSABILIDAD: TRANSFORMADA COSENO 2-D BIT-PERFECTA
 *
 * # Mathematical Proof (Separability):
 * La DCT-II bidimensional se factoriza como el producto de dos
 * transformadas 1-D: primero sobre filas, luego sobre columnas.
 * $D = A \cdot B \cdot A^T$ donde $A_{k,x} = \alpha(k)cos((2x+1)k\pi/2N)$.
 * La inversa aplica $A^T \cdot D \cdot A$, restaurando el bloque
 * original con error acotado por la precisión de f64 (~1e-12).
 * =================================================================
 */

use crate::cosine_table::{cosine_basis, CosineBasis};
use std::sync::Arc;

/**
 * Motor de transformada 2-D sobre bloques cuadrados de lado N.
 *
 * El motor es una instancia por-llamada sin estado mutable: toda su
 * determinación proviene de la base de cosenos global pre-computada.
 */
pub struct Dct2dEngine {
    basis: Arc<CosineBasis>,
}

impl Dct2dEngine {
    /// Construye un motor para bloques de lado `block_side` (8 en producción).
    #[must_use]
    pub fn new(block_side: usize) -> Self {
        Self { basis: cosine_basis(block_side) }
    }

    /// Lado del bloque cuadrado gobernado por este motor.
    #[inline(always)]
    #[must_use]
    pub fn block_side(&self) -> usize {
        self.basis.block_side
    }

    /**
     * Transformada directa 2-D: espacio → frecuencia.
     *
     * El coeficiente DC del bloque (tras el level-shift) reside en `[0]`
     * del buffer aplanado (posición fila 0, columna 0).
     *
     * # Performance:
     * Complejidad O(N^3) por bloque. Para N=8 son 1,024 productos por
     * pasada, residentes por completo en caché L1.
     */
    #[must_use]
    pub fn forward(&self, spatial_block: &[f64]) -> Vec<f64> {
        let transformed_rows = self.transform_axis(spatial_block, true);
        self.transform_axis(&transformed_rows, false)
    }

    /**
     * Transformada inversa 2-D: frecuencia → espacio.
     */
    #[must_use]
    pub fn inverse(&self, coefficient_block: &[f64]) -> Vec<f64> {
        let restored_columns = self.inverse_axis(coefficient_block, false);
        self.inverse_axis(&restored_columns, true)
    }

    /// Aplica la DCT-II 1-D a cada fila (o columna) del bloque.
    fn transform_axis(&self, input_block: &[f64], over_rows: bool) -> Vec<f64> {
        let side = self.basis.block_side;
        let mut output_block = vec![0.0f64; side * side];

        for lane_index in 0..side {
            for frequency_index in 0..side {
                let mut accumulator = 0.0f64;
                for sample_index in 0..side {
                    let sample_value = if over_rows {
                        input_block[lane_index * side + sample_index]
                    } else {
                        input_block[sample_index * side + lane_index]
                    };
                    accumulator += sample_value * self.basis.cosine(frequency_index, sample_index);
                }
                let normalized = self.basis.alphas[frequency_index] * accumulator;
                if over_rows {
                    output_block[lane_index * side + frequency_index] = normalized;
                } else {
                    output_block[frequency_index * side + lane_index] = normalized;
                }
            }
        }

        output_block
    }

    /// Aplica la DCT-III (inversa) 1-D a cada fila (o columna) del bloque.
    fn inverse_axis(&self, input_block: &[f64], over_rows: bool) -> Vec<f64> {
        let side = self.basis.block_side;
        let mut output_block = vec![0.0f64; side * side];

        for lane_index in 0..side {
            for sample_index in 0..side {
                let mut accumulator = 0.0f64;
                for frequency_index in 0..side {
                    let coefficient_value = if over_rows {
                        input_block[lane_index * side + frequency_index]
                    } else {
                        input_block[frequency_index * side + lane_index]
                    };
                    accumulator += self.basis.alphas[frequency_index]
                        * coefficient_value
                        * self.basis.cosine(frequency_index, sample_index);
                }
                if over_rows {
                    output_block[lane_index * side + sample_index] = accumulator;
                } else {
                    output_block[sample_index * side + lane_index] = accumulator;
                }
            }
        }

        output_block
    }
}

// FIN DEL ARCHIVO [libs/core/dsp-engine/src/dct.rs]
