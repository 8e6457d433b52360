// [apps/sealer/src/lib.rs]
/*!
 * =================================================================
 * APARATO: SEALER LIBRARY BARREL (V9.0)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L6)
 * RESPONSABILIDAD: LÓGICA DE COMANDOS AUDITABLE EN PROVING GROUNDS
 *
 * # Nota de arquitectura:
 * El binario es un orquestador puro y ligero; la totalidad de la
 * lógica de comandos reside aquí para permitir su auditoría directa.
 * =================================================================
 */

pub mod commands;
pub mod exit_codes;

pub use commands::{run_embed, run_extract, run_robust, run_verify};
pub use exit_codes::ExitCode;
