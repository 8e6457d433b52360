// [apps/sealer/src/exit_codes.rs]
// =================================================================
// APARATO: EXIT CODE CONTRACT
// RESPONSABILIDAD: CÓDIGOS DE SALIDA ESTABLES DEL SELLADOR
// =================================================================

/// Códigos de salida del contrato de línea de mando.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Operación exitosa.
    Success = 0,
    /// Error de uso: argumentos o entradas ilegibles.
    UsageError = 2,
    /// Payload + paridad exceden la capacidad de bloques.
    CapacityExceeded = 3,
    /// La extracción o la verificación fracasaron.
    ExtractionFailed = 4,
    /// Material de firma ausente o malformado cuando era obligatorio.
    SigningError = 5,
}

impl ExitCode {
    /// Valor numérico del proceso.
    #[must_use]
    pub fn as_process_code(self) -> i32 {
        self as i32
    }
}
