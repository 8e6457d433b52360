// [libs/domain/watermark/src/state.rs]
/*!
 * =================================================================
 * APARATO: EMBED STATE MACHINE (V2.1)
 * CLASIFICACIÓN: DOMAIN WATERMARK (ESTRATO L2)
 * RESPONSABILIDAD: PROGRESIÓN OBSERVABLE DEL SELLADO
 *
 * # Contrato:
 * INIT → CAPACITY_CHECKED → ECC_ENCODED → HOPPER_READY →
 * BLOCKS_WRITTEN → ENCODED → VALIDATED → SIGNED → DONE.
 * Los fracasos corto-circuitan; la calidad degradada es advertencia
 * (el sellado continúa) y la firma ausente es omisible.
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// Etapas de la máquina de estados del sellado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EmbedStage {
    /// Entrada decodificada, operación iniciada.
    Init,
    /// Capacidad de bloques verificada contra payload + paridad.
    CapacityChecked,
    /// Flujo ECC sintetizado.
    EccEncoded,
    /// Calendario de coeficientes sellado.
    HopperReady,
    /// Todos los bloques QIM escritos en el plano.
    BlocksWritten,
    /// Artefacto re-codificado (JPEG/PNG).
    Encoded,
    /// Métricas de calidad evaluadas.
    Validated,
    /// Registro firmado (u omisión explícita registrada).
    Signed,
    /// Sellado completo.
    Done,
}

impl EmbedStage {
    /// Etiqueta estable para trazas y reportes.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::CapacityChecked => "CAPACITY_CHECKED",
            Self::EccEncoded => "ECC_ENCODED",
            Self::HopperReady => "HOPPER_READY",
            Self::BlocksWritten => "BLOCKS_WRITTEN",
            Self::Encoded => "ENCODED",
            Self::Validated => "VALIDATED",
            Self::Signed => "SIGNED",
            Self::Done => "DONE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certify_stage_progression_is_totally_ordered() {
        let progression = [
            EmbedStage::Init,
            EmbedStage::CapacityChecked,
            EmbedStage::EccEncoded,
            EmbedStage::HopperReady,
            EmbedStage::BlocksWritten,
            EmbedStage::Encoded,
            EmbedStage::Validated,
            EmbedStage::Signed,
            EmbedStage::Done,
        ];

        for stage_pair in progression.windows(2) {
            assert!(stage_pair[0] < stage_pair[1], "Progresión violada en {:?}", stage_pair);
        }
    }
}
