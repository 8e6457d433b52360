// INICIO DEL ARCHIVO [libs/core/dsp-engine/src/blocks.rs]
/*!
 * =================================================================
 * APARATO: LUMINANCE BLOCK GRID (V5.2 - ROW MAJOR)
 * CLASIFICACIÓN: CORE DSP (ESTRATO L1)
 * RESPONSABILIDAD: E/S DE BLOQUES N×N Y LEVEL SHIFT JPEG
 *
 * # Invariantes:
 * - Solo los bloques completos que caben estrictamente en el plano
 *   participan de la rejilla: se leen y se escriben enteros.
 * - Las lecturas fuera de límites devuelven 0 y jamás se escriben.
 * - El orden de recorrido es Row-Major: el índice de bloque i define
 *   sin ambigüedad el bit i del flujo ECC.
 * =================================================================
 */

use crate::errors::DspError;

/// Desplazamiento de nivel JPEG: centra la muestra [0,255] alrededor de cero.
#[inline(always)]
#[must_use]
pub fn level_shift(pixel_sample: f64) -> f64 {
    pixel_sample - 128.0
}

/// Inversa del desplazamiento de nivel con saturación al rango de 8 bits.
#[inline(always)]
#[must_use]
pub fn inverse_level_shift(shifted_value: f64) -> f64 {
    (shifted_value + 128.0).round().clamp(0.0, 255.0)
}

/**
 * Rejilla de bloques cuadrados sobre un plano de luminancia Row-Major.
 *
 * La rejilla es una vista de coordenadas: no posee el plano, solo
 * gobierna la aritmética de indexación de los bloques completos.
 */
#[derive(Debug, Clone, Copy)]
pub struct BlockGrid {
    plane_width: usize,
    plane_height: usize,
    block_side: usize,
    blocks_per_row: usize,
    blocks_per_column: usize,
}

impl BlockGrid {
    /// Construye la rejilla para un plano `width × height` y lado de bloque N.
    ///
    /// # Errors:
    /// Rechaza un lado de bloque nulo o mayor que cualquiera de las dimensiones.
    pub fn new(plane_width: usize, plane_height: usize, block_side: usize) -> Result<Self, DspError> {
        if block_side == 0 || block_side > plane_width || block_side > plane_height {
            return Err(DspError::InvalidBlockSide(block_side));
        }

        Ok(Self {
            plane_width,
            plane_height,
            block_side,
            blocks_per_row: plane_width / block_side,
            blocks_per_column: plane_height / block_side,
        })
    }

    /// Cantidad total de bloques completos disponibles en el plano.
    #[inline(always)]
    #[must_use]
    pub fn total_blocks(&self) -> usize {
        self.blocks_per_row * self.blocks_per_column
    }

    /// Lado del bloque cuadrado.
    #[inline(always)]
    #[must_use]
    pub fn block_side(&self) -> usize {
        self.block_side
    }

    /// Coordenada superior-izquierda (x, y) del bloque `block_index` (Row-Major).
    #[inline(always)]
    #[must_use]
    pub fn block_origin(&self, block_index: usize) -> (usize, usize) {
        let block_column = block_index % self.blocks_per_row;
        let block_row = block_index / self.blocks_per_row;
        (block_column * self.block_side, block_row * self.block_side)
    }

    /**
     * Extrae el bloque `block_index` aplicando el level shift.
     *
     * Los índices fuera del plano se leen como 0. Dado que la rejilla
     * solo enumera bloques completos, esa rama es inalcanzable en el
     * recorrido nominal y existe como contrato de robustez.
     */
    #[must_use]
    pub fn extract_shifted_block(&self, luminance_samples: &[f64], block_index: usize) -> Vec<f64> {
        let (origin_x, origin_y) = self.block_origin(block_index);
        let mut block_buffer = vec![0.0f64; self.block_side * self.block_side];

        for local_row in 0..self.block_side {
            for local_column in 0..self.block_side {
                let plane_x = origin_x + local_column;
                let plane_y = origin_y + local_row;

                let raw_sample = if plane_x < self.plane_width && plane_y < self.plane_height {
                    luminance_samples[plane_y * self.plane_width + plane_x]
                } else {
                    0.0
                };

                block_buffer[local_row * self.block_side + local_column] = level_shift(raw_sample);
            }
        }

        block_buffer
    }

    /**
     * Escribe el bloque restaurado con inverse level shift y saturación.
     *
     * Solo las coordenadas dentro del plano reciben escritura; el resto
     * del bloque (inexistente en el recorrido nominal) se descarta.
     */
    pub fn write_restored_block(
        &self,
        luminance_samples: &mut [f64],
        block_index: usize,
        restored_block: &[f64],
    ) {
        let (origin_x, origin_y) = self.block_origin(block_index);

        for local_row in 0..self.block_side {
            for local_column in 0..self.block_side {
                let plane_x = origin_x + local_column;
                let plane_y = origin_y + local_row;

                if plane_x < self.plane_width && plane_y < self.plane_height {
                    luminance_samples[plane_y * self.plane_width + plane_x] = inverse_level_shift(
                        restored_block[local_row * self.block_side + local_column],
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certify_level_shift_round_trip_saturation() {
        assert_eq!(level_shift(128.0), 0.0);
        assert_eq!(inverse_level_shift(0.0), 128.0);
        assert_eq!(inverse_level_shift(500.0), 255.0, "Saturación superior fallida");
        assert_eq!(inverse_level_shift(-500.0), 0.0, "Saturación inferior fallida");
    }

    #[test]
    fn certify_grid_counts_only_whole_blocks() {
        // 100x50 con bloques de 8: 12 x 6 = 72 bloques completos.
        let grid = BlockGrid::new(100, 50, 8).expect("Rejilla válida");
        assert_eq!(grid.total_blocks(), 72);

        let (last_x, last_y) = grid.block_origin(71);
        assert_eq!((last_x, last_y), (88, 40));
    }

    #[test]
    fn certify_extract_write_round_trip() {
        let grid = BlockGrid::new(16, 16, 8).expect("Rejilla válida");
        let mut plane: Vec<f64> = (0..256).map(|i| (i % 251) as f64).collect();
        let original_plane = plane.clone();

        for block_index in 0..grid.total_blocks() {
            let extracted = grid.extract_shifted_block(&plane, block_index);
            grid.write_restored_block(&mut plane, block_index, &extracted);
        }

        assert_eq!(plane, original_plane, "El round-trip de rejilla alteró el plano");
        println!("✅ GRID: Extracción/escritura de bloques certificada bit-perfecta.");
    }

    #[test]
    fn certify_invalid_block_side_rejection() {
        assert!(BlockGrid::new(4, 4, 8).is_err());
        assert!(BlockGrid::new(64, 64, 0).is_err());
    }
}
// FIN DEL ARCHIVO [libs/core/dsp-engine/src/blocks.rs]
