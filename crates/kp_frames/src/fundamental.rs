//! Delaunay fundamental arguments of lunar and solar motion.
//!
//! Source: IERS Conventions 2010, Table 5.2e (Simon et al. 1994).

/// Delaunay arguments in degrees, each normalized to `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundamentalArguments {
    /// Mean anomaly of the Moon (l).
    pub moon_anomaly: f64,
    /// Mean anomaly of the Sun (l′).
    pub sun_anomaly: f64,
    /// Moon's mean argument of latitude (F).
    pub moon_latitude_arg: f64,
    /// Mean elongation of the Moon from the Sun (D).
    pub elongation: f64,
    /// Mean longitude of the Moon's ascending node (Ω), i.e. mean Rahu.
    pub node: f64,
}

fn poly_arcsec_to_deg(c: [f64; 5], t: f64) -> f64 {
    let arcsec = c[0] + t * (c[1] + t * (c[2] + t * (c[3] + t * c[4])));
    (arcsec / 3600.0).rem_euclid(360.0)
}

pub fn fundamental_arguments(t: f64) -> FundamentalArguments {
    FundamentalArguments {
        moon_anomaly: poly_arcsec_to_deg(
            [485_868.249036, 1_717_915_923.2178, 31.8792, 0.051635, -0.00024470],
            t,
        ),
        sun_anomaly: poly_arcsec_to_deg(
            [1_287_104.79305, 129_596_581.0481, -0.5532, 0.000136, -0.00001149],
            t,
        ),
        moon_latitude_arg: poly_arcsec_to_deg(
            [335_779.526232, 1_739_527_262.8478, -12.7512, -0.001037, 0.00000417],
            t,
        ),
        elongation: poly_arcsec_to_deg(
            [1_072_260.70369, 1_602_961_601.2090, -6.3706, 0.006593, -0.00003169],
            t,
        ),
        node: poly_arcsec_to_deg(
            [450_160.398036, -6_962_890.5431, 7.4722, 0.007702, -0.00005939],
            t,
        ),
    }
}
