// [libs/domain/watermark/src/lib.rs]
/*!
 * =================================================================
 * APARATO: WATERMARK DOMAIN MASTER HUB (V9.0 - QIM SOVEREIGN)
 * CLASIFICACIÓN: DOMAIN WATERMARK (ESTRATO L2)
 * RESPONSABILIDAD: ORQUESTACIÓN DEL MOTOR DE SELLADO FORENSE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PIPELINE COMPLETO: bytes de imagen → portadora Y → rejilla →
 *    payload → ECC → calendario de coeficientes → QIM por bloque →
 *    recomposición → calidad → huellas → firma.
 * 2. EXTRACCIÓN SIN PÁNICO: La extracción jamás lanza para entradas
 *    decodificables; el fracaso RS viaja en el reporte.
 * 3. CANCELACIÓN COOPERATIVA: Todo punto de entrada de larga duración
 *    observa el token entre fronteras de bloque o cuadro.
 * =================================================================
 */

/// Token de cancelación cooperativa.
pub mod cancel;
/// Motor QIM de incrustación y extracción sobre bloques DCT.
pub mod engine;
/// Catálogo de fallos del dominio de sellado.
pub mod errors;
/// Puente con el códec de imagen (decodificación, JPEG/PNG, resize, crop).
pub mod imaging;
/// Arnés de robustez: recompresión, reescalado, recorte y perfil social.
pub mod robustness;
/// Orquestador de sellado de imagen fija con ensamblaje de evidencia.
pub mod sealer;
/// Máquina de estados del sellado.
pub mod state;
/// Envoltura temporal: fragmentación del flujo ECC a través de cuadros.
pub mod temporal;

pub use cancel::CancellationToken;
pub use engine::{ExtractionReport, QimEmbedEngine, QimExtractEngine};
pub use errors::WatermarkError;
pub use imaging::DecodedImage;
pub use robustness::{RobustnessCase, RobustnessHarness, RobustnessReport};
pub use sealer::{OutputFormat, SealOutcome, SealRequest, StillSealer};
pub use state::EmbedStage;
pub use temporal::{TemporalConfig, TemporalExtractReport, TemporalWrapper};
