// [libs/core/generators/src/lib.rs]
#![deny(missing_docs)]

/*!
 * =================================================================
 * APARATO: DETERMINISTIC GENERATORS HUB (V3.0 - HOPPER SYNC)
 * CLASIFICACIÓN: CORE GENERATORS (ESTRATO L1)
 * RESPONSABILIDAD: EXPOSICIÓN DE GENERADORES DETERMINISTAS
 *
 * # Invariante de Estrato:
 * Todo generador de este aparato deriva su determinismo de entradas
 * explícitas (semillas SHA-256); la única fuente de entropía ambiente
 * permitida es el sufijo aleatorio del identificador de obra.
 * =================================================================
 */

/// Saltador determinista de coeficientes de media frecuencia.
pub mod hopper;
/// Sintetizador de identificadores de obra GJP-MEDIA.
pub mod work_id;

pub use hopper::CoefficientHopper;
pub use work_id::WorkIdentifierGenerator;
