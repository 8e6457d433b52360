// INICIO DEL ARCHIVO [libs/core/generators/src/hopper.rs]
/*!
 * =================================================================
 * APARATO: COEFFICIENT HOPPER ENGINE (V6.1 - FISHER-YATES SEEDED)
 * CLASIFICACIÓN: CORE GENERATORS (ESTRATO L1)
 * RESPONSABILIDAD: CALENDARIO DETERMINISTA DE COORDENADAS DCT
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PURE FUNCTION CONTRACT: El calendario es función pura de
 *    (workId, payloadHash); dos saltadores con la misma semilla emiten
 *    secuencias idénticas para todo índice de bloque.
 * 2. MID-FREQUENCY BAND: El conjunto de coordenadas vive en la banda
 *    que sobrevive la matriz de cuantización JPEG estándar con Q ≥ 65.
 *    El DC porta la luminancia visible y las altas frecuencias se
 *    desvanecen bajo recompresión: ambas quedan excluidas.
 * 3. WRAP-AROUND REUSE: El patrón de salto cicla a través de los
 *    bloques (no dentro de un bloque); la reutilización es intencional.
 *
 * # Mathematical Proof (Seeded Shuffle):
 * Fisher-Yates con fuente modular de índices: el byte i de la semilla
 * SHA-256 (con envoltura) provee j ← seedByte mod (i+1). La biyección
 * resultante queda determinada por los 32 bytes de la semilla.
 * =================================================================
 */

use sha2::{Digest, Sha256};
use tracing::trace;

/// Banda de media frecuencia por defecto para bloques 8×8 (fila, columna).
pub const DEFAULT_MID_FREQUENCY_BAND: [(usize, usize); 13] = [
    (2, 2),
    (2, 3),
    (3, 2),
    (3, 3),
    (2, 4),
    (4, 2),
    (3, 4),
    (4, 3),
    (4, 4),
    (2, 5),
    (5, 2),
    (3, 5),
    (5, 3),
];

/**
 * Saltador determinista de coordenadas de media frecuencia.
 *
 * Instancia por-llamada: su única memoria es la permutación sellada
 * en la construcción. No existe estado mutable compartido.
 */
#[derive(Debug, Clone)]
pub struct CoefficientHopper {
    shuffled_band: Vec<(usize, usize)>,
}

impl CoefficientHopper {
    /**
     * Construye el saltador para un par (workId, payloadHash).
     *
     * La semilla es SHA-256(workId || ":" || payloadHash); la permutación
     * de la banda se obtiene con Fisher-Yates alimentado por los bytes
     * de la semilla con envoltura.
     */
    #[must_use]
    pub fn new(work_identifier: &str, payload_hash_hexadecimal: &str) -> Self {
        let seed_digest = Self::derive_seed(work_identifier, payload_hash_hexadecimal);

        let mut shuffled_band = DEFAULT_MID_FREQUENCY_BAND.to_vec();
        Self::fisher_yates_with_seed(&mut shuffled_band, &seed_digest);

        trace!(
            work_identifier,
            first_coordinate = ?shuffled_band[0],
            "🎲 [HOPPER]: Permutación de banda sellada."
        );

        Self { shuffled_band }
    }

    /// Semilla soberana: SHA-256 del dominio `workId:payloadHash`.
    #[must_use]
    pub fn derive_seed(work_identifier: &str, payload_hash_hexadecimal: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(work_identifier.as_bytes());
        hasher.update(b":");
        hasher.update(payload_hash_hexadecimal.as_bytes());
        hasher.finalize().into()
    }

    /// Fisher-Yates descendente con fuente modular de índices.
    fn fisher_yates_with_seed(band: &mut [(usize, usize)], seed_bytes: &[u8; 32]) {
        for descending_index in (1..band.len()).rev() {
            let seed_byte = seed_bytes[descending_index % seed_bytes.len()];
            let swap_index = usize::from(seed_byte) % (descending_index + 1);
            band.swap(descending_index, swap_index);
        }
    }

    /**
     * Coordenada (fila, columna) asignada al bloque `block_index`.
     *
     * El calendario cicla sobre la banda permutada: la reutilización
     * por envoltura es parte del contrato.
     */
    #[inline(always)]
    #[must_use]
    pub fn position(&self, block_index: usize) -> (usize, usize) {
        self.shuffled_band[block_index % self.shuffled_band.len()]
    }

    /// Longitud del ciclo del calendario (cardinal de la banda).
    #[inline(always)]
    #[must_use]
    pub fn cycle_length(&self) -> usize {
        self.shuffled_band.len()
    }
}

// -----------------------------------------------------------------
// ESTRATO DE CERTIFICACIÓN: PUREZA Y DIVERGENCIA (L1-GEN)
// -----------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    const WORK_ID: &str = "GJP-MEDIA-2026-DEADBEEF01";
    const PAYLOAD_HASH: &str = "aa5c01b1e2f3d4c5b6a79887766554433221100ffeeddccbbaa009988776655";

    #[test]
    fn certify_hopper_purity_across_instances() {
        let first_hopper = CoefficientHopper::new(WORK_ID, PAYLOAD_HASH);
        let second_hopper = CoefficientHopper::new(WORK_ID, PAYLOAD_HASH);

        for block_index in 0..1_000 {
            assert_eq!(
                first_hopper.position(block_index),
                second_hopper.position(block_index),
                "Divergencia en el bloque {}",
                block_index
            );
        }
        println!("✅ HOPPER: Pureza certificada sobre 1.000 índices de bloque.");
    }

    #[test]
    fn certify_divergence_on_distinct_payload_hash() {
        let baseline_hopper = CoefficientHopper::new(WORK_ID, PAYLOAD_HASH);
        let mut divergent_hash = PAYLOAD_HASH.to_string();
        divergent_hash.replace_range(0..1, "b");
        let divergent_hopper = CoefficientHopper::new(WORK_ID, &divergent_hash);

        // Con probabilidad abrumadora las permutaciones difieren en el ciclo completo.
        let baseline_cycle: Vec<_> =
            (0..baseline_hopper.cycle_length()).map(|i| baseline_hopper.position(i)).collect();
        let divergent_cycle: Vec<_> =
            (0..divergent_hopper.cycle_length()).map(|i| divergent_hopper.position(i)).collect();

        assert_ne!(baseline_cycle, divergent_cycle, "Hashes distintos produjeron el mismo calendario");
    }

    #[test]
    fn certify_band_membership_and_wraparound() {
        let hopper = CoefficientHopper::new(WORK_ID, PAYLOAD_HASH);

        for block_index in 0..100 {
            let coordinate = hopper.position(block_index);
            assert!(
                DEFAULT_MID_FREQUENCY_BAND.contains(&coordinate),
                "Coordenada fuera de la banda: {:?}",
                coordinate
            );
            assert_eq!(
                coordinate,
                hopper.position(block_index + hopper.cycle_length()),
                "La envoltura del ciclo no es estable"
            );
        }
    }

    mod property_strata {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Propiedad: semillas iguales ⇒ calendarios iguales; la banda
            /// permutada siempre es una biyección del conjunto soberano.
            #[test]
            fn equal_seeds_produce_equal_schedules(
                work_identifier in "[A-Z0-9-]{8,32}",
                payload_hash in "[a-f0-9]{64}",
            ) {
                let first = CoefficientHopper::new(&work_identifier, &payload_hash);
                let second = CoefficientHopper::new(&work_identifier, &payload_hash);

                for block_index in 0..64 {
                    prop_assert_eq!(first.position(block_index), second.position(block_index));
                }

                let mut cycle: Vec<_> =
                    (0..first.cycle_length()).map(|i| first.position(i)).collect();
                cycle.sort_unstable();
                cycle.dedup();
                prop_assert_eq!(cycle.len(), DEFAULT_MID_FREQUENCY_BAND.len());
            }
        }
    }

    #[test]
    fn certify_permutation_is_bijective() {
        let hopper = CoefficientHopper::new(WORK_ID, PAYLOAD_HASH);
        let mut seen_coordinates: Vec<(usize, usize)> =
            (0..hopper.cycle_length()).map(|i| hopper.position(i)).collect();
        seen_coordinates.sort_unstable();
        seen_coordinates.dedup();

        assert_eq!(
            seen_coordinates.len(),
            DEFAULT_MID_FREQUENCY_BAND.len(),
            "La permutación perdió o duplicó coordenadas"
        );
    }
}
// FIN DEL ARCHIVO [libs/core/generators/src/hopper.rs]
