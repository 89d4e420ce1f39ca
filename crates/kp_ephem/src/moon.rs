//! Geocentric lunar longitude.
//!
//! The 34 largest periodic terms of Meeus, "Astronomical Algorithms",
//! Table 47.A, plus the three additive corrections. Accuracy is about
//! 10″, ample for locating the Moon's sub lord.

use kp_frames::fundamental_arguments;

/// `[D, M, M′, F, Σl]`, Σl in 10⁻⁶ degrees.
#[rustfmt::skip]
const LONGITUDE_TERMS: [(i8, i8, i8, i8, f64); 34] = [
    (0, 0, 1, 0, 6_288_774.0),
    (2, 0, -1, 0, 1_274_027.0),
    (2, 0, 0, 0, 658_314.0),
    (0, 0, 2, 0, 213_618.0),
    (0, 1, 0, 0, -185_116.0),
    (0, 0, 0, 2, -114_332.0),
    (2, 0, -2, 0, 58_793.0),
    (2, -1, -1, 0, 57_066.0),
    (2, 0, 1, 0, 53_322.0),
    (2, -1, 0, 0, 45_758.0),
    (0, 1, -1, 0, -40_923.0),
    (1, 0, 0, 0, -34_720.0),
    (0, 1, 1, 0, -30_383.0),
    (2, 0, 0, -2, 15_327.0),
    (0, 0, 1, 2, -12_528.0),
    (0, 0, 1, -2, 10_980.0),
    (4, 0, -1, 0, 10_675.0),
    (0, 0, 3, 0, 10_034.0),
    (4, 0, -2, 0, 8_548.0),
    (2, 1, -1, 0, -7_888.0),
    (2, 1, 0, 0, -6_766.0),
    (1, 0, -1, 0, -5_163.0),
    (1, 1, 0, 0, 4_987.0),
    (2, -1, 1, 0, 4_036.0),
    (2, 0, 2, 0, 3_994.0),
    (4, 0, 0, 0, 3_861.0),
    (2, 0, -3, 0, 3_665.0),
    (0, 1, -2, 0, -2_689.0),
    (2, 0, -1, 2, -2_602.0),
    (2, -1, -2, 0, 2_390.0),
    (1, 0, 1, 0, -2_348.0),
    (2, -2, 0, 0, 2_236.0),
    (0, 1, 2, 0, -2_120.0),
    (0, 2, 0, 0, -2_069.0),
];

/// Geocentric lunar longitude, mean equinox of date, degrees in [0, 360).
///
/// `t` is TT Julian centuries since J2000.0.
pub fn moon_longitude_deg(t: f64) -> f64 {
    let args = fundamental_arguments(t);
    let d = args.elongation.to_radians();
    let m = args.sun_anomaly.to_radians();
    let mp = args.moon_anomaly.to_radians();
    let f = args.moon_latitude_arg.to_radians();
    // Mean longitude L′ = F + Ω
    let lp = args.moon_latitude_arg + args.node;

    // Eccentricity damping of terms involving the solar anomaly
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t * t;

    let mut sigma: f64 = LONGITUDE_TERMS
        .iter()
        .map(|&(cd, cm, cmp, cf, coeff)| {
            let arg = f64::from(cd) * d + f64::from(cm) * m + f64::from(cmp) * mp + f64::from(cf) * f;
            let damp = match cm.abs() {
                1 => e,
                2 => e * e,
                _ => 1.0,
            };
            coeff * damp * arg.sin()
        })
        .sum();

    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479_264.290 * t).to_radians();
    // L′ − F is the node
    sigma += 3958.0 * a1.sin() + 1962.0 * args.node.to_radians().sin() + 318.0 * a2.sin();

    (lp + sigma / 1e6).rem_euclid(360.0)
}
