// [apps/sealer/tests/seal_cycle_integrity.rs]
/*!
 * =================================================================
 * APARATO: SEAL CYCLE INTEGRITY CERTIFIER (V2.0)
 * CLASIFICACIÓN: PROVING GROUNDS // ESTRATO L6-APP
 * RESPONSABILIDAD: CERTIFICACIÓN DEL CICLO EMBED → EXTRACT → VERIFY
 * =================================================================
 */

use gjp_domain_watermark::CancellationToken;
use gjp_sealer_lib::{run_embed, run_extract, run_verify, ExitCode};
use image::{ImageBuffer, Rgb};
use std::fs;

const WORK_ID: &str = "GJP-MEDIA-2026-DEADBEEF01";
const PAYLOAD_TEXT: &str = "©AB|Alex|GJP-MEDIA-2026-DEADBEEF";

/// Fotografía sintética con textura suficiente para el sellado.
fn write_synthetic_photo(path: &std::path::Path) {
    let photo = ImageBuffer::from_fn(512, 512, |column, row| {
        let radial = ((row as f64 - 256.0).powi(2) + (column as f64 - 256.0).powi(2)).sqrt();
        let shade =
            (110.0 + 60.0 * (radial / 11.0).sin() + ((row * 11 + column * 5) % 29) as f64) as u8;
        Rgb([shade, shade.wrapping_add(28), shade.wrapping_add(57)])
    });
    photo.save(path).expect("Fotografía sintética persistida");
}

/**
 * Ciclo completo en un único proceso: el material de firma se inyecta
 * por entorno una sola vez para evitar carreras entre hilos de prueba.
 */
#[test]
fn certify_embed_extract_verify_cycle() {
    let workspace = tempfile::tempdir().expect("Directorio temporal");
    let input_path = workspace.path().join("original.png");
    let output_path = workspace.path().join("sellado.png");

    write_synthetic_photo(&input_path);
    std::env::set_var(gjp_sealer_lib::commands::SIGNING_KEY_ENV, "01".repeat(32));

    let cancellation = CancellationToken::new();

    // 1. EMBED: sellado con salida PNG (canal limpio para la certificación).
    let embed_code = run_embed(
        &input_path,
        &output_path,
        PAYLOAD_TEXT,
        WORK_ID,
        0.15,
        8,
        true,
        &cancellation,
    )
    .expect("Embed sin fallo fatal");
    assert_eq!(embed_code, ExitCode::Success);
    assert!(output_path.exists(), "El artefacto sellado debe existir");

    let evidence_path = workspace.path().join("sellado.png.evidence.json");
    assert!(evidence_path.exists(), "El side-car de evidencia debe existir");

    // 2. EXTRACT: recuperación exacta con el hash del payload directo.
    let payload_hash = gjp_domain_evidence::sha256_hex(PAYLOAD_TEXT.as_bytes());
    let extract_code = run_extract(
        &output_path,
        WORK_ID,
        &payload_hash,
        PAYLOAD_TEXT.len(),
        8,
        0.15,
        &cancellation,
    )
    .expect("Extract sin fallo fatal");
    assert_eq!(extract_code, ExitCode::Success);

    // 3. VERIFY: el registro side-car verifica firma y hashes.
    let verify_code = run_verify(&evidence_path).expect("Verify sin fallo fatal");
    assert_eq!(verify_code, ExitCode::Success);

    // 4. MUTACIÓN: un registro adulterado debe fracasar en la verificación.
    let mutated_path = workspace.path().join("adulterado.json");
    let mutated_text = fs::read_to_string(&evidence_path)
        .expect("Registro legible")
        .replace(&payload_hash, &"0".repeat(64));
    fs::write(&mutated_path, mutated_text).expect("Registro adulterado persistido");

    let mutated_code = run_verify(&mutated_path).expect("Verify sin fallo fatal");
    assert_eq!(mutated_code, ExitCode::ExtractionFailed);

    println!("✅ CYCLE: Ciclo embed → extract → verify certificado de punta a punta.");
}

/// La capacidad se rechaza con el código de contrato (3).
#[test]
fn certify_capacity_exit_code() {
    let workspace = tempfile::tempdir().expect("Directorio temporal");
    let input_path = workspace.path().join("diminuta.png");
    let output_path = workspace.path().join("sellada.png");

    let tiny = ImageBuffer::from_pixel(64, 64, Rgb([128u8, 128, 128]));
    tiny.save(&input_path).expect("Imagen diminuta persistida");

    let embed_code = run_embed(
        &input_path,
        &output_path,
        "A",
        WORK_ID,
        0.15,
        8,
        true,
        &CancellationToken::new(),
    )
    .expect("Embed sin fallo fatal");

    assert_eq!(embed_code, ExitCode::CapacityExceeded);
}
