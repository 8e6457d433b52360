// [libs/core/dsp-engine/src/lib.rs]
#![deny(missing_docs)]

/*!
 * =================================================================
 * APARATO: CORE DSP MASTER HUB (V4.0 - FORENSIC SYNC)
 * CLASIFICACIÓN: CORE DSP (ESTRATO L1)
 * RESPONSABILIDAD: ORQUESTACIÓN DE PRIMITIVAS DE SEÑAL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. COSINE STRATA REGISTRATION: Inyecta el módulo 'cosine_table'
 *    para habilitar el pre-cómputo global de la base DCT-II.
 * 2. NOMINAL PRELUDE ALIGNMENT: Sincroniza la exportación de la
 *    rejilla de bloques y el validador de calidad bajo un prelude único.
 * 3. SOBERANÍA NUMÉRICA: Cero dependencias de C (FFTW/OpenCV); toda
 *    la transformada es Rust puro apto para compilación cruzada MUSL.
 *
 * # Mathematical Proof (Modular Integrity):
 * Este aparato actúa como el nodo raíz del grafo DSP, asegurando que
 * la transformada y su inversa sean bit-perfectas a través de todos
 * los hilos de computación del enjambre de sellado.
 * =================================================================
 */

/// Rejilla de bloques N×N sobre el plano de luminancia (Row-Major).
pub mod blocks;
/// Base de cosenos pre-computada (Static LUT global, once-init).
pub mod cosine_table;
/// Transformada Coseno Discreta 2-D tipo II y su inversa (separables).
pub mod dct;
/// Catálogo de fallos numéricos y dimensionales del sistema.
pub mod errors;
/// Extracción del plano de luminancia BT.601 y re-aplicación de deltas.
pub mod luminance;
/// Validador de calidad perceptual: MSE, PSNR y SSIM (global y ventaneado).
pub mod quality;

/// Prelude nominal del estrato L1-DSP.
pub mod prelude {
    pub use crate::blocks::{inverse_level_shift, level_shift, BlockGrid};
    pub use crate::dct::Dct2dEngine;
    pub use crate::errors::DspError;
    pub use crate::luminance::LuminancePlane;
    pub use crate::quality::{QualityReport, QualityValidator};
}
