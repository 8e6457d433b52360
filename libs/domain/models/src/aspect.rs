// [libs/domain/models/src/aspect.rs]
/*!
 * =================================================================
 * APARATO: ASPECT RATIO DETECTOR (V1.3)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: ETIQUETADO DE PROPORCIONES COMUNES
 * =================================================================
 */

/// Tabla de proporciones comunes y sus etiquetas canónicas.
const COMMON_RATIOS: [(&str, f64); 7] = [
    ("16:9", 16.0 / 9.0),
    ("4:3", 4.0 / 3.0),
    ("1:1", 1.0),
    ("3:2", 3.0 / 2.0),
    ("21:9", 21.0 / 9.0),
    ("9:16", 9.0 / 16.0),
    ("4:5", 4.0 / 5.0),
];

/// Tolerancia absoluta para aceptar una proporción de la tabla.
const RATIO_TOLERANCE: f64 = 0.05;

/**
 * Detecta la etiqueta de proporción para unas dimensiones dadas.
 *
 * La proporción de tabla más cercana dentro de la tolerancia 0.05
 * gana; fuera de toda tolerancia se etiqueta `custom`.
 */
#[must_use]
pub fn detect_aspect_ratio_label(width: u32, height: u32) -> String {
    if width == 0 || height == 0 {
        return "custom".to_string();
    }

    let observed_ratio = f64::from(width) / f64::from(height);

    let mut best_label = "custom";
    let mut best_distance = RATIO_TOLERANCE;

    for (candidate_label, candidate_ratio) in COMMON_RATIOS {
        let distance = (observed_ratio - candidate_ratio).abs();
        if distance <= best_distance {
            best_distance = distance;
            best_label = candidate_label;
        }
    }

    best_label.to_string()
}
