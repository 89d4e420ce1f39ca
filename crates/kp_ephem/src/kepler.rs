//! Keplerian mean elements for the planets.
//!
//! Source: E.M. Standish, "Keplerian Elements for Approximate Positions
//! of the Major Planets" (JPL), Table 1, valid 1800–2050. Positions are
//! heliocentric, ecliptic and equinox J2000, in AU. Errors stay within
//! about 0.01° for the inner planets and 0.2° for Jupiter and Saturn.

use std::f64::consts::TAU;

/// Mean elements at J2000 and their rates per Julian century.
#[derive(Debug, Clone, Copy)]
pub struct OrbitalElements {
    /// Semi-major axis, AU.
    pub a: [f64; 2],
    pub e: [f64; 2],
    /// Inclination, degrees.
    pub i: [f64; 2],
    /// Mean longitude, degrees.
    pub l: [f64; 2],
    /// Longitude of perihelion, degrees.
    pub peri: [f64; 2],
    /// Longitude of ascending node, degrees.
    pub node: [f64; 2],
}

#[rustfmt::skip]
pub const MERCURY: OrbitalElements = OrbitalElements {
    a: [0.38709927, 0.00000037], e: [0.20563593, 0.00001906], i: [7.00497902, -0.00594749],
    l: [252.25032350, 149472.67411175], peri: [77.45779628, 0.16047689], node: [48.33076593, -0.12534081],
};
#[rustfmt::skip]
pub const VENUS: OrbitalElements = OrbitalElements {
    a: [0.72333566, 0.00000390], e: [0.00677672, -0.00004107], i: [3.39467605, -0.00078890],
    l: [181.97909950, 58517.81538729], peri: [131.60246718, 0.00268329], node: [76.67984255, -0.27769418],
};
#[rustfmt::skip]
pub const EARTH_MOON: OrbitalElements = OrbitalElements {
    a: [1.00000261, 0.00000562], e: [0.01671123, -0.00004392], i: [-0.00001531, -0.01294668],
    l: [100.46457166, 35999.37244981], peri: [102.93768193, 0.32327364], node: [0.0, 0.0],
};
#[rustfmt::skip]
pub const MARS: OrbitalElements = OrbitalElements {
    a: [1.52371034, 0.00001847], e: [0.09339410, 0.00007882], i: [1.84969142, -0.00813131],
    l: [-4.55343205, 19140.30268499], peri: [-23.94362959, 0.44441088], node: [49.55953891, -0.29257343],
};
#[rustfmt::skip]
pub const JUPITER: OrbitalElements = OrbitalElements {
    a: [5.20288700, -0.00011607], e: [0.04838624, -0.00013253], i: [1.30439695, -0.00183714],
    l: [34.39644051, 3034.74612775], peri: [14.72847983, 0.21252668], node: [100.47390909, 0.20469106],
};
#[rustfmt::skip]
pub const SATURN: OrbitalElements = OrbitalElements {
    a: [9.53667594, -0.00125060], e: [0.05386179, -0.00050991], i: [2.48599187, 0.00193609],
    l: [49.95424423, 1222.49362201], peri: [92.59887831, -0.41897216], node: [113.66242448, -0.28867794],
};

const KEPLER_MAX_ITER: usize = 30;
const KEPLER_TOLERANCE: f64 = 1e-12;

/// Solve `E − e sin E = M` by Newton iteration (radians).
pub fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let m = (mean_anomaly + std::f64::consts::PI).rem_euclid(TAU) - std::f64::consts::PI;
    let mut ecc = m + e * m.sin();
    for _ in 0..KEPLER_MAX_ITER {
        let delta = (ecc - e * ecc.sin() - m) / (1.0 - e * ecc.cos());
        ecc -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            break;
        }
    }
    ecc
}

impl OrbitalElements {
    /// Heliocentric ecliptic J2000 position in AU at `t` TT centuries.
    pub fn heliocentric(&self, t: f64) -> [f64; 3] {
        let at = |p: [f64; 2]| p[0] + p[1] * t;
        let a = at(self.a);
        let e = at(self.e);
        let inc = at(self.i).to_radians();
        let l = at(self.l);
        let peri = at(self.peri);
        let node = at(self.node);

        let omega = (peri - node).to_radians();
        let node = node.to_radians();
        let ecc = solve_kepler((l - peri).to_radians(), e);

        let xp = a * (ecc.cos() - e);
        let yp = a * (1.0 - e * e).sqrt() * ecc.sin();

        let (so, co) = omega.sin_cos();
        let (sn, cn) = node.sin_cos();
        let (si, ci) = inc.sin_cos();
        [
            (co * cn - so * sn * ci) * xp + (-so * cn - co * sn * ci) * yp,
            (co * sn + so * cn * ci) * xp + (-so * sn + co * cn * ci) * yp,
            (so * si) * xp + (co * si) * yp,
        ]
    }
}

/// Geocentric ecliptic J2000 longitude of a planet in degrees, [0, 360).
pub fn geocentric_longitude_deg(planet: &OrbitalElements, t: f64) -> f64 {
    let p = planet.heliocentric(t);
    let earth = EARTH_MOON.heliocentric(t);
    let lon = f64::atan2(p[1] - earth[1], p[0] - earth[0]).to_degrees();
    lon.rem_euclid(360.0)
}

/// Geocentric ecliptic J2000 longitude of the Sun and its distance in AU.
pub fn sun_longitude_deg(t: f64) -> (f64, f64) {
    let earth = EARTH_MOON.heliocentric(t);
    let lon = f64::atan2(-earth[1], -earth[0]).to_degrees().rem_euclid(360.0);
    let r = (earth[0] * earth[0] + earth[1] * earth[1] + earth[2] * earth[2]).sqrt();
    (lon, r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kepler_circular_is_identity() {
        assert!((solve_kepler(1.234, 0.0) - 1.234).abs() < 1e-15);
    }

    #[test]
    fn kepler_satisfies_equation() {
        for e in [0.0167, 0.2056, 0.6] {
            for m in [0.1, 1.0, 2.5, 3.1, 5.0] {
                let ecc = solve_kepler(m, e);
                let back = (ecc - e * ecc.sin()).rem_euclid(TAU);
                assert!((back - m).abs() < 1e-10, "e={e} m={m} back={back}");
            }
        }
    }

    #[test]
    fn earth_distance_near_one_au() {
        let (_, r) = sun_longitude_deg(0.0);
        // Early January, near perihelion.
        assert!((r - 0.9833).abs() < 0.001, "r = {r}");
    }

    #[test]
    fn jupiter_orbit_radius() {
        let p = JUPITER.heliocentric(0.24);
        let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
        assert!(r > 4.9 && r < 5.5, "r = {r}");
    }
}
