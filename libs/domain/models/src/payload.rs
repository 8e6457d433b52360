// INICIO DEL ARCHIVO [libs/domain/models/src/payload.rs]
/*!
 * =================================================================
 * APARATO: PAYLOAD CANONICALIZER (V7.0 - NINE KEY SOVEREIGN)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: FORMAS CANÓNICA Y COMPACTA DEL PAYLOAD
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DETERMINISMO ABSOLUTO: La forma canónica es función pura de
 *    (perfil, workId, mediaType, aspecto, instante). Claves en orden
 *    lexicográfico ascendente, una por línea, sin salto final.
 * 2. IDEMPOTENCIA: serialize(parse(serialize(x))) == serialize(x);
 *    el parser preserva los valores verbatim (incluido CREATEDUTC).
 * 3. FORMA COMPACTA: `©<iniciales>|<artístico>|<workId>` es el único
 *    texto que viaja dentro de la imagen; la forma canónica viaja en
 *    el registro de evidencia.
 * =================================================================
 */

use crate::errors::ModelError;
use crate::profile::OwnerProfile;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Conjunto soberano de claves canónicas, en orden lexicográfico ascendente.
pub const CANONICAL_KEYS: [&str; 9] = [
    "ASPECTRATIO",
    "AUTHOR",
    "COPYRIGHT",
    "CREATEDUTC",
    "KNOWNAS",
    "MEDIATYPE",
    "RIGHTS",
    "SOURCE",
    "WORKID",
];

/// Declaración de derechos fija del registro canónico.
const RIGHTS_DECLARATION: &str = "ALL RIGHTS RESERVED";

/// Tipo de medio sellado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    /// Imagen fija (JPEG/PNG/WebP).
    Image,
    /// Secuencia de cuadros de video.
    Video,
}

impl MediaType {
    /// Etiqueta canónica en mayúsculas.
    #[must_use]
    pub fn as_canonical_label(&self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Video => "VIDEO",
        }
    }
}

/**
 * Payload canónico de nueve claves.
 *
 * Los valores se almacenan verbatim: el parser no reinterpreta fechas
 * ni números, garantizando la idempotencia del ciclo parse/serialize.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalPayload {
    /// Etiqueta de proporción (`16:9`, `custom`, ...).
    pub aspect_ratio: String,
    /// Nombre legal del titular.
    pub author: String,
    /// Año de copyright declarado.
    pub copyright: String,
    /// Instante de creación en ISO-8601 UTC.
    pub created_utc: String,
    /// Nombre artístico del titular.
    pub known_as: String,
    /// Etiqueta del tipo de medio (`IMAGE` / `VIDEO`).
    pub media_type: String,
    /// Declaración de derechos.
    pub rights: String,
    /// Fuente primaria de publicación.
    pub source: String,
    /// Identificador de obra.
    pub work_id: String,
}

impl CanonicalPayload {
    /**
     * Compone la forma canónica desde sus insumos de dominio.
     *
     * Determinista: mismo perfil, obra, medio, aspecto e instante
     * producen byte a byte el mismo texto serializado.
     */
    #[must_use]
    pub fn compose(
        owner_profile: &OwnerProfile,
        work_identifier: &str,
        media_type: MediaType,
        aspect_ratio_label: &str,
        created_instant: DateTime<Utc>,
    ) -> Self {
        Self {
            aspect_ratio: aspect_ratio_label.to_string(),
            author: owner_profile.legal_name.clone(),
            copyright: owner_profile.copyright_year.to_string(),
            created_utc: created_instant.to_rfc3339_opts(SecondsFormat::Millis, true),
            known_as: owner_profile.display_name.clone(),
            media_type: media_type.as_canonical_label().to_string(),
            rights: RIGHTS_DECLARATION.to_string(),
            source: owner_profile.primary_source.clone(),
            work_id: work_identifier.to_string(),
        }
    }

    /**
     * Serializa las nueve claves en orden ascendente, una `KEY=VALUE`
     * por línea, unidas por `\n` y sin salto de línea final.
     */
    #[must_use]
    pub fn serialize_canonical(&self) -> String {
        [
            format!("ASPECTRATIO={}", self.aspect_ratio),
            format!("AUTHOR={}", self.author),
            format!("COPYRIGHT={}", self.copyright),
            format!("CREATEDUTC={}", self.created_utc),
            format!("KNOWNAS={}", self.known_as),
            format!("MEDIATYPE={}", self.media_type),
            format!("RIGHTS={}", self.rights),
            format!("SOURCE={}", self.source),
            format!("WORKID={}", self.work_id),
        ]
        .join("\n")
    }

    /**
     * Parsea un texto canónico de vuelta a la estructura.
     *
     * # Errors:
     * - `MalformedCanonicalLine` ante líneas sin `=`.
     * - `UnknownCanonicalKey` ante claves fuera del conjunto soberano.
     * - `MissingCanonicalKey` si alguna de las nueve claves falta.
     */
    pub fn parse_canonical(canonical_text: &str) -> Result<Self, ModelError> {
        let mut field_slots: [Option<String>; 9] = Default::default();

        for canonical_line in canonical_text.split('\n') {
            let (key, value) = canonical_line
                .split_once('=')
                .ok_or_else(|| ModelError::MalformedCanonicalLine(canonical_line.to_string()))?;

            let slot_index = CANONICAL_KEYS
                .iter()
                .position(|canonical_key| *canonical_key == key)
                .ok_or_else(|| ModelError::UnknownCanonicalKey(key.to_string()))?;

            field_slots[slot_index] = Some(value.to_string());
        }

        let mut take_field = |slot_index: usize| {
            field_slots[slot_index]
                .take()
                .ok_or(ModelError::MissingCanonicalKey(CANONICAL_KEYS[slot_index]))
        };

        Ok(Self {
            aspect_ratio: take_field(0)?,
            author: take_field(1)?,
            copyright: take_field(2)?,
            created_utc: take_field(3)?,
            known_as: take_field(4)?,
            media_type: take_field(5)?,
            rights: take_field(6)?,
            source: take_field(7)?,
            work_id: take_field(8)?,
        })
    }
}

/**
 * Payload compacto embebible: `©<iniciales>|<artístico>|<workId>`.
 *
 * Es el único texto que atraviesa el códec RS hacia la imagen; su
 * longitud en bytes debe respetar la capacidad de bloques del plano.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactPayload {
    embeddable_text: String,
}

impl CompactPayload {
    /// Compone la forma compacta desde el perfil y el identificador de obra.
    #[must_use]
    pub fn compose(owner_profile: &OwnerProfile, work_identifier: &str) -> Self {
        Self {
            embeddable_text: format!(
                "©{}|{}|{}",
                owner_profile.uppercase_initials(),
                owner_profile.display_name,
                work_identifier
            ),
        }
    }

    /// Envuelve un texto embebible ya compuesto (ruta de extracción).
    #[must_use]
    pub fn from_embeddable_text(embeddable_text: impl Into<String>) -> Self {
        Self { embeddable_text: embeddable_text.into() }
    }

    /// Texto embebible verbatim.
    #[inline(always)]
    #[must_use]
    pub fn as_text(&self) -> &str {
        &self.embeddable_text
    }

    /// Longitud en bytes UTF-8 (el símbolo © ocupa dos).
    #[inline(always)]
    #[must_use]
    pub fn byte_length(&self) -> usize {
        self.embeddable_text.len()
    }
}

// -----------------------------------------------------------------
// ESTRATO DE CERTIFICACIÓN: DETERMINISMO E IDEMPOTENCIA (L2)
// -----------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_profile() -> OwnerProfile {
        OwnerProfile::new("Alex Berenguer", "Alex", 2026, "https://alex.example")
            .expect("Perfil válido")
    }

    fn sample_payload() -> CanonicalPayload {
        let created_instant = Utc.timestamp_millis_opt(1_768_500_000_000).single().unwrap();
        CanonicalPayload::compose(
            &sample_profile(),
            "GJP-MEDIA-2026-DEADBEEF01",
            MediaType::Image,
            "1:1",
            created_instant,
        )
    }

    #[test]
    fn certify_key_order_and_terminal_shape() {
        let serialized = sample_payload().serialize_canonical();

        let observed_keys: Vec<&str> = serialized
            .split('\n')
            .map(|line| line.split_once('=').expect("Línea KEY=VALUE").0)
            .collect();

        assert_eq!(observed_keys, CANONICAL_KEYS.to_vec(), "Orden de claves violado");
        assert!(!serialized.ends_with('\n'), "No debe existir salto de línea final");
        println!("✅ PAYLOAD: Orden lexicográfico y forma terminal certificados.");
    }

    #[test]
    fn certify_canonicalization_idempotence() {
        let first_pass = sample_payload().serialize_canonical();
        let reparsed = CanonicalPayload::parse_canonical(&first_pass).expect("Parse válido");
        let second_pass = reparsed.serialize_canonical();

        assert_eq!(first_pass, second_pass, "El ciclo parse/serialize no es idempotente");
    }

    #[test]
    fn certify_compose_determinism() {
        let first = sample_payload().serialize_canonical();
        let second = sample_payload().serialize_canonical();
        assert_eq!(first, second);
    }

    #[test]
    fn certify_malformed_and_unknown_rejection() {
        assert!(matches!(
            CanonicalPayload::parse_canonical("SIN_SEPARADOR"),
            Err(ModelError::MalformedCanonicalLine(_))
        ));
        assert!(matches!(
            CanonicalPayload::parse_canonical("INTRUSA=x"),
            Err(ModelError::UnknownCanonicalKey(_))
        ));
        assert!(matches!(
            CanonicalPayload::parse_canonical("AUTHOR=x"),
            Err(ModelError::MissingCanonicalKey(_))
        ));
    }

    mod property_strata {
        use super::*;
        use chrono::TimeZone;
        use proptest::prelude::*;

        proptest! {
            /// Propiedad: serialize(parse(serialize(x))) == serialize(x)
            /// para cualquier perfil sin saltos de línea en sus valores.
            #[test]
            fn canonicalization_is_idempotent(
                legal_name in "[A-Za-z][A-Za-z ._-]{0,38}",
                display_name in "[A-Za-z][A-Za-z0-9._-]{0,20}",
                copyright_year in 1900u16..2100,
                source in "[a-z0-9:/.-]{0,40}",
                work_suffix in "[A-Z0-9]{8,14}",
            ) {
                let profile = OwnerProfile::new(legal_name, display_name, copyright_year, source)
                    .expect("Perfil no degenerado por construcción");
                let created_instant =
                    Utc.timestamp_millis_opt(1_768_500_000_000).single().unwrap();

                let composed = CanonicalPayload::compose(
                    &profile,
                    &format!("GJP-MEDIA-2026-{}", work_suffix),
                    MediaType::Image,
                    "16:9",
                    created_instant,
                );

                let first_pass = composed.serialize_canonical();
                let reparsed = CanonicalPayload::parse_canonical(&first_pass).unwrap();
                prop_assert_eq!(first_pass, reparsed.serialize_canonical());
            }
        }
    }

    #[test]
    fn certify_compact_payload_shape() {
        let compact = CompactPayload::compose(&sample_profile(), "GJP-MEDIA-2026-DEADBEEF01");
        assert_eq!(compact.as_text(), "©AB|Alex|GJP-MEDIA-2026-DEADBEEF01");
        // '©' es U+00A9: dos bytes UTF-8.
        assert_eq!(compact.byte_length(), compact.as_text().chars().count() + 1);
    }
}
// FIN DEL ARCHIVO [libs/domain/models/src/payload.rs]
