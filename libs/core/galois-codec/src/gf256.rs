// INICIO DEL ARCHIVO [libs/core/galois-codec/src/gf256.rs]
/*!
 * =================================================================
 * APARATO: GF(2^8) FIELD ENGINE (V8.0 - TABLE SOVEREIGN)
 * CLASIFICACIÓN: CORE ECC (ESTRATO L1)
 * RESPONSABILIDAD: ARITMÉTICA DE CAMPO FINITO SOBRE 0x11D
 *
 * # Mathematical Proof (Primitive Polynomial):
 * El campo se construye sobre p(x) = x^8 + x^4 + x^3 + x^2 + 1 (0x11D)
 * con generador α = 2. La tabla exp se duplica a 510 entradas para
 * eliminar la reducción modular 255 del producto en el camino caliente.
 * =================================================================
 */

use once_cell::sync::Lazy;

/// Polinomio primitivo del campo: x^8 + x^4 + x^3 + x^2 + 1.
pub const PRIMITIVE_POLYNOMIAL: u16 = 0x11D;

/// Tablas de logaritmo y antilogaritmo del campo.
struct GaloisTables {
    exponential: [u8; 512],
    logarithm: [u8; 256],
}

/// Singleton global de tablas, llenado perezoso en el primer acceso.
static GALOIS_TABLES: Lazy<GaloisTables> = Lazy::new(|| {
    let mut exponential = [0u8; 512];
    let mut logarithm = [0u8; 256];

    let mut field_element: u16 = 1;
    for power_index in 0..255usize {
        exponential[power_index] = field_element as u8;
        logarithm[field_element as usize] = power_index as u8;

        field_element <<= 1;
        if field_element & 0x100 != 0 {
            field_element ^= PRIMITIVE_POLYNOMIAL;
        }
    }

    // Duplicado de la tabla exp para productos sin módulo 255.
    for power_index in 255..512usize {
        exponential[power_index] = exponential[power_index - 255];
    }

    GaloisTables { exponential, logarithm }
});

/// Suma (y resta) del campo: XOR byte a byte.
#[inline(always)]
#[must_use]
pub fn add(left_operand: u8, right_operand: u8) -> u8 {
    left_operand ^ right_operand
}

/// Producto del campo vía tablas log/exp.
#[inline(always)]
#[must_use]
pub fn multiply(left_operand: u8, right_operand: u8) -> u8 {
    if left_operand == 0 || right_operand == 0 {
        return 0;
    }
    let tables = &*GALOIS_TABLES;
    let log_sum = usize::from(tables.logarithm[usize::from(left_operand)])
        + usize::from(tables.logarithm[usize::from(right_operand)]);
    tables.exponential[log_sum]
}

/// Cociente del campo.
///
/// # Panics:
/// Provoca pánico ante división por cero; el decodificador garantiza
/// divisores no nulos por construcción (Λ'(X⁻¹) ≠ 0 en raíces simples).
#[inline(always)]
#[must_use]
pub fn divide(numerator: u8, denominator: u8) -> u8 {
    assert!(denominator != 0, "GF_FAULT: División por cero en GF(2^8)");
    if numerator == 0 {
        return 0;
    }
    let tables = &*GALOIS_TABLES;
    let log_difference = 255 + usize::from(tables.logarithm[usize::from(numerator)])
        - usize::from(tables.logarithm[usize::from(denominator)]);
    tables.exponential[log_difference]
}

/// Potencia del generador: α^exponent (exponent puede ser negativo módulo 255).
#[inline(always)]
#[must_use]
pub fn alpha_power(exponent: i32) -> u8 {
    let tables = &*GALOIS_TABLES;
    let reduced_exponent = exponent.rem_euclid(255) as usize;
    tables.exponential[reduced_exponent]
}

/// Inverso multiplicativo.
#[inline(always)]
#[must_use]
pub fn inverse(field_element: u8) -> u8 {
    divide(1, field_element)
}

/// Evalúa un polinomio (coeficiente de mayor grado primero) vía Horner.
#[must_use]
pub fn poly_eval_msb_first(coefficients: &[u8], point: u8) -> u8 {
    let mut accumulator = 0u8;
    for coefficient in coefficients {
        accumulator = add(multiply(accumulator, point), *coefficient);
    }
    accumulator
}

/// Evalúa un polinomio (coeficiente de menor grado primero) vía Horner.
#[must_use]
pub fn poly_eval_lsb_first(coefficients: &[u8], point: u8) -> u8 {
    let mut accumulator = 0u8;
    for coefficient in coefficients.iter().rev() {
        accumulator = add(multiply(accumulator, point), *coefficient);
    }
    accumulator
}

/// Producto de polinomios (ambos con el menor grado primero).
#[must_use]
pub fn poly_multiply_lsb_first(left_poly: &[u8], right_poly: &[u8]) -> Vec<u8> {
    let mut product = vec![0u8; left_poly.len() + right_poly.len() - 1];
    for (left_degree, left_coefficient) in left_poly.iter().enumerate() {
        if *left_coefficient == 0 {
            continue;
        }
        for (right_degree, right_coefficient) in right_poly.iter().enumerate() {
            product[left_degree + right_degree] = add(
                product[left_degree + right_degree],
                multiply(*left_coefficient, *right_coefficient),
            );
        }
    }
    product
}

// -----------------------------------------------------------------
// ESTRATO DE CERTIFICACIÓN: AXIOMAS DE CAMPO (L1-ECC)
// -----------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certify_generator_cycle_closure() {
        // α^255 = 1: el generador recorre el grupo multiplicativo completo.
        assert_eq!(alpha_power(255), 1);
        assert_eq!(alpha_power(0), 1);
        assert_eq!(alpha_power(1), 2);
        println!("✅ GF256: Ciclo del generador α certificado (orden 255).");
    }

    #[test]
    fn certify_multiplicative_inverse_axiom() {
        for candidate in 1..=255u8 {
            assert_eq!(
                multiply(candidate, inverse(candidate)),
                1,
                "Inverso fallido para {}",
                candidate
            );
        }
    }

    #[test]
    fn certify_distributivity_sample() {
        // (a + b) * c == a*c + b*c sobre un barrido determinista.
        for raw in 0..255u32 {
            let a = (raw * 7 + 3) as u8;
            let b = (raw * 13 + 11) as u8;
            let c = (raw * 29 + 1) as u8;
            assert_eq!(
                multiply(add(a, b), c),
                add(multiply(a, c), multiply(b, c)),
                "Distributividad violada en ({}, {}, {})",
                a,
                b,
                c
            );
        }
    }

    #[test]
    fn certify_known_products_of_0x11d_field() {
        // Vectores canónicos del campo AES-contiguo 0x11D.
        assert_eq!(multiply(0x02, 0x80), 0x1D);
        assert_eq!(multiply(0xFF, 0x01), 0xFF);
        assert_eq!(multiply(0x00, 0x55), 0x00);
    }

    #[test]
    fn certify_horner_evaluation_orientations() {
        // p(x) = 3x^2 + 2x + 1 evaluado en x = 2: 3*4 ^ 2*2 ^ 1 = 12 ^ 4 ^ 1 = 9.
        let msb_first = [3u8, 2, 1];
        let lsb_first = [1u8, 2, 3];
        assert_eq!(poly_eval_msb_first(&msb_first, 2), 9);
        assert_eq!(poly_eval_lsb_first(&lsb_first, 2), 9);
    }
}
// FIN DEL ARCHIVO [libs/core/galois-codec/src/gf256.rs]
