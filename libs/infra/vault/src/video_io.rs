// [libs/infra/vault/src/video_io.rs]
/*!
 * =================================================================
 * APARATO: VIDEO I/O CONTRACT (V2.1)
 * CLASIFICACIÓN: INFRA COLLABORATORS (ESTRATO L3)
 * RESPONSABILIDAD: CONTRATO ANGOSTO DE EXTRACCIÓN Y RE-MUXADO
 *
 * # Contrato:
 * El núcleo jamás abre archivos contenedores: consume metadatos más
 * un iterador de buffers de cuadro (JPEG/PNG por cuadro) y entrega
 * los cuadros sellados de vuelta al colaborador para el re-muxado.
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// Metadatos del contenedor entregados por el colaborador.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    /// Ancho del cuadro en píxeles.
    pub width: u32,
    /// Alto del cuadro en píxeles.
    pub height: u32,
    /// Cuadros por segundo.
    pub fps: f64,
    /// Duración total en segundos.
    pub duration_seconds: f64,
    /// Códec del contenedor original.
    pub codec: String,
}

/**
 * Fuente de cuadros decodificados provista por el colaborador de video.
 *
 * La secuencia es finita y perezosa: el núcleo sostiene un cuadro a la
 * vez y el colaborador gobierna la decodificación del contenedor.
 */
pub trait VideoSource {
    /// Metadatos del contenedor.
    fn metadata(&self) -> VideoMetadata;

    /// Cantidad total de cuadros de la secuencia.
    fn frame_count(&self) -> usize;

    /// Iterador consumidor sobre los buffers de cuadro (JPEG/PNG).
    fn frames(self: Box<Self>) -> Box<dyn Iterator<Item = Vec<u8>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Doble de prueba: secuencia sintética de tres cuadros.
    struct SyntheticSource {
        frame_buffers: Vec<Vec<u8>>,
    }

    impl VideoSource for SyntheticSource {
        fn metadata(&self) -> VideoMetadata {
            VideoMetadata {
                width: 64,
                height: 48,
                fps: 24.0,
                duration_seconds: 0.125,
                codec: "h264".into(),
            }
        }

        fn frame_count(&self) -> usize {
            self.frame_buffers.len()
        }

        fn frames(self: Box<Self>) -> Box<dyn Iterator<Item = Vec<u8>>> {
            Box::new(self.frame_buffers.into_iter())
        }
    }

    #[test]
    fn certify_source_contract_streams_frames() {
        let source = Box::new(SyntheticSource {
            frame_buffers: vec![vec![1], vec![2], vec![3]],
        });

        assert_eq!(source.frame_count(), 3);
        assert_eq!(source.metadata().codec, "h264");

        let streamed: Vec<Vec<u8>> = source.frames().collect();
        assert_eq!(streamed, vec![vec![1], vec![2], vec![3]]);
    }
}
