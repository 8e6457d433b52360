// [libs/domain/models/src/profile.rs]
/*!
 * =================================================================
 * APARATO: OWNER PROFILE MODEL (V2.1)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: IDENTIDAD DEL TITULAR DE DERECHOS
 * =================================================================
 */

use crate::errors::ModelError;
use serde::{Deserialize, Serialize};

/// Perfil del titular de derechos, consumido en modo solo-lectura
/// por el canonicalizador de payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnerProfile {
    /// Nombre legal completo del titular.
    pub legal_name: String,
    /// Nombre artístico o de despliegue público.
    pub display_name: String,
    /// Año de copyright declarado.
    pub copyright_year: u16,
    /// Fuente primaria de publicación (portafolio, catálogo, red).
    pub primary_source: String,
}

impl OwnerProfile {
    /// Construye un perfil validando que ambos nombres sean no vacíos.
    ///
    /// # Errors:
    /// `DegenerateOwnerProfile` si el nombre legal o el artístico están vacíos.
    pub fn new(
        legal_name: impl Into<String>,
        display_name: impl Into<String>,
        copyright_year: u16,
        primary_source: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let legal_name = legal_name.into();
        let display_name = display_name.into();

        if legal_name.trim().is_empty() || display_name.trim().is_empty() {
            return Err(ModelError::DegenerateOwnerProfile);
        }

        Ok(Self {
            legal_name,
            display_name,
            copyright_year,
            primary_source: primary_source.into(),
        })
    }

    /// Iniciales en mayúsculas de cada componente del nombre legal.
    ///
    /// `"Alex Berenguer Ponce"` → `"ABP"`.
    #[must_use]
    pub fn uppercase_initials(&self) -> String {
        self.legal_name
            .split_whitespace()
            .filter_map(|name_component| name_component.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}
