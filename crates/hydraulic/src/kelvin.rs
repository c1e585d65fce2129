//! Kelvin functions of orders 0 and 1.
//!
//! `ker_ν(x) + i·kei_ν(x) = e^{−iνπ/2}·K_ν(x·e^{iπ/4})`, with the modified
//! Bessel function `K_ν` evaluated by its power series for `x < 10` and by
//! its large-argument expansion otherwise.

use std::f64::consts::{FRAC_PI_4, PI};

use num_complex::Complex64;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Argument at which evaluation switches to the asymptotic expansion.
const SERIES_LIMIT: f64 = 10.0;

const MAX_SERIES_TERMS: usize = 200;
const MAX_ASYMPTOTIC_TERMS: usize = 60;

/// `ker₀, kei₀, ker₁, kei₁` at one argument.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kelvin {
    pub ker0: f64,
    pub kei0: f64,
    pub ker1: f64,
    pub kei1: f64,
}

/// Evaluates the Kelvin functions at `x`.
///
/// Defined for `x > 0`; any other argument yields NaN in every field.
pub fn kelvin(x: f64) -> Kelvin {
    if !(x > 0.0 && x.is_finite()) {
        return Kelvin {
            ker0: f64::NAN,
            kei0: f64::NAN,
            ker1: f64::NAN,
            kei1: f64::NAN,
        };
    }
    let z = Complex64::from_polar(x, FRAC_PI_4);
    let (k0, k1) = if x < SERIES_LIMIT {
        bessel_k_series(z)
    } else {
        (bessel_k_asymptotic(z, 0.0), bessel_k_asymptotic(z, 1.0))
    };
    // e^{−iπ/2} = −i
    let k1 = k1 * Complex64::new(0.0, -1.0);
    Kelvin {
        ker0: k0.re,
        kei0: k0.im,
        ker1: k1.re,
        kei1: k1.im,
    }
}

/// `K₀(z)` and `K₁(z)` from their ascending series.
fn bessel_k_series(z: Complex64) -> (Complex64, Complex64) {
    let zero = Complex64::new(0.0, 0.0);
    let q = z * z / 4.0;
    let log_half = (z / 2.0).ln();

    // term = q^k / (k!)²,  psi = ψ(k + 1)
    let mut term = Complex64::new(1.0, 0.0);
    let mut psi = -EULER_GAMMA;
    let (mut i0, mut s0, mut i1, mut s1) = (zero, zero, zero, zero);
    for k in 0..MAX_SERIES_TERMS {
        let next = k as f64 + 1.0;
        let term1 = term / next;
        let psi_next = psi + 1.0 / next;
        i0 += term;
        s0 += term * psi;
        i1 += term1;
        s1 += term1 * (psi + psi_next);
        if k > 5 && term.norm() < 1e-17 * i0.norm() {
            break;
        }
        term = term * q / (next * next);
        psi = psi_next;
    }

    let k0 = -log_half * i0 + s0;
    let big_i1 = z / 2.0 * i1;
    let k1 = z.inv() + log_half * big_i1 - z / 4.0 * s1;
    (k0, k1)
}

/// `K_ν(z)` from the large-argument expansion, truncated at its smallest term.
fn bessel_k_asymptotic(z: Complex64, order: f64) -> Complex64 {
    let mu = 4.0 * order * order;
    let mut term = Complex64::new(1.0, 0.0);
    let mut sum = term;
    let mut previous = f64::INFINITY;
    for k in 1..MAX_ASYMPTOTIC_TERMS {
        let kf = k as f64;
        let odd = 2.0 * kf - 1.0;
        term = term * (mu - odd * odd) / (z * (8.0 * kf));
        let size = term.norm();
        if size > previous {
            break;
        }
        sum += term;
        previous = size;
    }
    (Complex64::new(PI, 0.0) / (z * 2.0)).sqrt() * (-z).exp() * sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn check(x: f64, expected: [f64; 4]) {
        let k = kelvin(x);
        assert_relative_eq!(k.ker0, expected[0], max_relative = 1e-9);
        assert_relative_eq!(k.kei0, expected[1], max_relative = 1e-9);
        assert_relative_eq!(k.ker1, expected[2], max_relative = 1e-9);
        assert_relative_eq!(k.kei1, expected[3], max_relative = 1e-9);
    }

    #[test]
    fn small_arguments() {
        check(
            0.5,
            [
                0.8559058721186342,
                -0.6715816950943676,
                -1.5224034065320902,
                -1.0511820854125227,
            ],
        );
        check(
            1.0,
            [
                0.28670620872831604,
                -0.4949946365187199,
                -0.7403222768419827,
                -0.2419959664297382,
            ],
        );
    }

    #[test]
    fn moderate_arguments() {
        check(
            2.5,
            [
                -0.06968797258904534,
                -0.11069609915567485,
                -0.11725613585987055,
                0.0933137881353575,
            ],
        );
        check(
            5.0,
            [
                -0.011511727199490663,
                0.011187586509869639,
                0.012737390484218567,
                0.011577754393252468,
            ],
        );
    }

    #[test]
    fn asymptotic_arguments() {
        check(
            12.0,
            [
                -6.307713705205455e-05,
                -3.899959497178822e-05,
                -3.8340115177540535e-05,
                6.605000654623384e-05,
            ],
        );
        check(
            20.0,
            [
                -7.715233109860961e-08,
                -1.8589415111194372e-07,
                -1.8783787318216384e-07,
                8.17455627943058e-08,
            ],
        );
    }

    #[test]
    fn non_positive_argument_is_nan() {
        assert!(kelvin(0.0).ker0.is_nan());
        assert!(kelvin(-1.0).kei1.is_nan());
    }
}
