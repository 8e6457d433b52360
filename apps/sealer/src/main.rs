// [apps/sealer/src/main.rs]
/*!
 * =================================================================
 * APARATO: FORENSIC SEALER SHELL (V9.0 - FOUR VERB SHELL)
 * CLASIFICACIÓN: APPLICATION LAYER (ENTRY POINT)
 * RESPONSABILIDAD: ORQUESTACIÓN DE ARGUMENTOS Y DISPARO DE COMANDOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. LIBRARY SYNERGY: El binario es un orquestador puro; la lógica de
 *    los cuatro verbos reside en 'gjp_sealer_lib' para su auditoría
 *    en Proving Grounds.
 * 2. COOPERATIVE SHUTDOWN: SIGINT dispara el token de cancelación que
 *    el motor observa entre fronteras de bloque y de cuadro.
 * 3. STABLE EXIT CODES: 0 éxito, 2 uso, 3 capacidad, 4 extracción,
 *    5 firma/configuración.
 * =================================================================
 */

use anyhow::Result;
use clap::{Parser, Subcommand};
use gjp_core_gen::WorkIdentifierGenerator;
use gjp_domain_watermark::CancellationToken;
use gjp_sealer_lib::{run_embed, run_extract, run_robust, run_verify};
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;
use tracing::{info, warn};

/// Directivas de mando del sellador forense de medios.
#[derive(Parser, Debug)]
#[command(
    author = "Raz Podesta <metaShark Tech>",
    version = "9.0",
    about = "Sellador Forense GJP: marcas de agua DCT/QIM con evidencia criptográfica."
)]
struct SealerDirectives {
    #[command(subcommand)]
    command: SealerVerb,
}

/// Verbos soportados por el sellador.
#[derive(Subcommand, Debug)]
enum SealerVerb {
    /// Sella un payload dentro de una imagen y emite el registro de evidencia.
    Embed {
        /// Ruta del artefacto original (JPEG/PNG/WebP).
        #[arg(long = "in", value_name = "PATH")]
        input_path: PathBuf,
        /// Texto de payload embebible.
        #[arg(long)]
        payload: String,
        /// Identificador de obra; ausente ⇒ se sintetiza uno nuevo GJP-MEDIA.
        #[arg(long = "workid")]
        work_identifier: Option<String>,
        /// Fuerza de cuantización ∈ [0.05, 0.20].
        #[arg(long, default_value_t = 0.15)]
        strength: f64,
        /// Bytes de paridad Reed-Solomon ∈ {8, 12, 16}.
        #[arg(long, default_value_t = 8)]
        ecc: usize,
        /// Ruta del artefacto sellado de salida.
        #[arg(long = "out", value_name = "PATH")]
        output_path: PathBuf,
        /// Emite PNG sin pérdidas en lugar de JPEG Q95.
        #[arg(long, default_value_t = false)]
        png: bool,
    },
    /// Extrae el payload de un artefacto sellado.
    Extract {
        /// Ruta del artefacto sellado.
        #[arg(long = "in", value_name = "PATH")]
        input_path: PathBuf,
        /// Identificador de obra del sellado.
        #[arg(long = "workid")]
        work_identifier: String,
        /// Hash hexadecimal que co-determinó el calendario.
        #[arg(long = "payload-hash")]
        payload_hash: String,
        /// Longitud en bytes del payload sellado.
        #[arg(long)]
        length: usize,
        /// Bytes de paridad usados en el sellado.
        #[arg(long, default_value_t = 8)]
        ecc: usize,
        /// Fuerza de cuantización usada en el sellado.
        #[arg(long, default_value_t = 0.15)]
        strength: f64,
    },
    /// Verifica la coherencia y la firma de un registro de evidencia.
    Verify {
        /// Ruta del registro de evidencia JSON.
        #[arg(long = "record", value_name = "PATH")]
        record_path: PathBuf,
    },
    /// Ejecuta la matriz de robustez sobre un artefacto sellado.
    Robust {
        /// Ruta del artefacto sellado.
        #[arg(long = "in", value_name = "PATH")]
        input_path: PathBuf,
        /// Identificador de obra del sellado.
        #[arg(long = "workid")]
        work_identifier: String,
        /// Hash hexadecimal que co-determinó el calendario.
        #[arg(long = "payload-hash")]
        payload_hash: String,
        /// Longitud en bytes del payload sellado.
        #[arg(long)]
        length: usize,
        /// Bytes de paridad usados en el sellado.
        #[arg(long, default_value_t = 8)]
        ecc: usize,
        /// Fuerza de cuantización usada en el sellado.
        #[arg(long, default_value_t = 0.15)]
        strength: f64,
        /// Payload esperado para la detección exacta (opcional).
        #[arg(long = "expected-payload")]
        expected_payload: Option<String>,
    },
}

/**
 * Punto de ignición del binario ejecutable.
 *
 * # Performance:
 * La transformada DCT y el códec RS son intensivos en CPU; se
 * recomienda ejecutar con el flag --release.
 */
fn main() -> ProcessExitCode {
    // 1. INICIALIZACIÓN DEL SISTEMA NERVIOSO (ENTORNO + LOGGING)
    let _ = dotenvy::dotenv();
    gjp_shared_heimdall::init_tracing("gjp_sealer");

    info!("🛡️ [SEALER_SHELL]: Initializing execution shell V9.0...");

    // 2. PARSEO DE DIRECTIVAS DE MANDO
    let directives = SealerDirectives::parse();

    // 3. PROTOCOLO DE SEÑALES DE SISTEMA (Terminación Ordenada)
    let cancellation = CancellationToken::new();
    let signal_token = cancellation.clone();
    let _ = ctrlc::set_handler(move || {
        warn!("⚠️ [SIGNAL]: Termination requested by host. Sealing current strata...");
        signal_token.cancel();
    });

    // 4. DESPACHO DEL VERBO
    match dispatch_verb(directives, &cancellation) {
        Ok(exit_code) => ProcessExitCode::from(exit_code.as_process_code() as u8),
        Err(fatal_fault) => {
            tracing::error!(%fatal_fault, "🔥 [SEALER_SHELL]: Fallo fatal no mapeado.");
            ProcessExitCode::from(1)
        }
    }
}

/// Enruta el verbo parseado hacia su manejador de librería.
fn dispatch_verb(
    directives: SealerDirectives,
    cancellation: &CancellationToken,
) -> Result<gjp_sealer_lib::ExitCode> {
    match directives.command {
        SealerVerb::Embed {
            input_path,
            payload,
            work_identifier,
            strength,
            ecc,
            output_path,
            png,
        } => {
            let resolved_work_identifier = work_identifier.unwrap_or_else(|| {
                let synthesized = WorkIdentifierGenerator::synthesize();
                info!(work_id = %synthesized, "🆔 [SEALER_SHELL]: Identificador de obra sintetizado.");
                synthesized
            });
            run_embed(
                &input_path,
                &output_path,
                &payload,
                &resolved_work_identifier,
                strength,
                ecc,
                png,
                cancellation,
            )
        }
        SealerVerb::Extract {
            input_path,
            work_identifier,
            payload_hash,
            length,
            ecc,
            strength,
        } => run_extract(
            &input_path,
            &work_identifier,
            &payload_hash,
            length,
            ecc,
            strength,
            cancellation,
        ),
        SealerVerb::Verify { record_path } => run_verify(&record_path),
        SealerVerb::Robust {
            input_path,
            work_identifier,
            payload_hash,
            length,
            ecc,
            strength,
            expected_payload,
        } => run_robust(
            &input_path,
            &work_identifier,
            &payload_hash,
            length,
            ecc,
            strength,
            expected_payload.as_deref(),
            cancellation,
        ),
    }
}
