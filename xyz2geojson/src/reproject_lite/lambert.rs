//! Projection Lambert 93 (EPSG:2154)
//!
//! Conique conforme de Lambert sécante, ellipsoïde GRS80.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use super::ellipsoid::GRS80;
use super::Geographic;
use anyhow::{bail, Result};

/// Constantes dérivées d'une conique conforme sécante
struct ConicConstants {
    /// Exposant de la projection
    n: f64,
    /// Constante de projection
    c: f64,
    /// Rayon du parallèle origine
    r0: f64,
    /// Longitude origine (radians)
    lon0: f64,
    /// Faux est
    x0: f64,
    /// Faux nord
    y0: f64,
}

impl ConicConstants {
    /// Paramètres Lambert 93 : origine 3°E / 46.5°N, parallèles 44°N et 49°N
    fn lambert93() -> Self {
        Self::secant(3.0, 46.5, 44.0, 49.0, 700000.0, 6600000.0)
    }

    fn secant(lon0: f64, lat0: f64, lat1: f64, lat2: f64, x0: f64, y0: f64) -> Self {
        let (lat0, lat1, lat2) = (lat0.to_radians(), lat1.to_radians(), lat2.to_radians());

        let n1 = grande_normale(lat1) * lat1.cos();
        let n2 = grande_normale(lat2) * lat2.cos();
        let iso1 = isometric_latitude(lat1);
        let iso2 = isometric_latitude(lat2);

        let n = (n1.ln() - n2.ln()) / (iso2 - iso1);
        let c = (n1 / n) * (n * iso1).exp();
        let r0 = c * (-n * isometric_latitude(lat0)).exp();

        Self {
            n,
            c,
            r0,
            lon0: lon0.to_radians(),
            x0,
            y0,
        }
    }
}

/// Latitude isométrique sur GRS80
fn isometric_latitude(lat: f64) -> f64 {
    let e = GRS80::E;
    let e_sin = e * lat.sin();
    ((FRAC_PI_4 + lat / 2.0).tan() * ((1.0 - e_sin) / (1.0 + e_sin)).powf(e / 2.0)).ln()
}

/// Latitude depuis la latitude isométrique (point fixe)
fn latitude_from_isometric(iso_lat: f64) -> f64 {
    let e = GRS80::E;
    let mut lat = 2.0 * iso_lat.exp().atan() - FRAC_PI_2;

    for _ in 0..10 {
        let e_sin = e * lat.sin();
        let next = 2.0 * (iso_lat.exp() * ((1.0 + e_sin) / (1.0 - e_sin)).powf(e / 2.0)).atan()
            - FRAC_PI_2;

        if (next - lat).abs() < 1e-12 {
            return next;
        }
        lat = next;
    }
    lat
}

/// Grande normale (rayon de courbure du premier vertical)
fn grande_normale(lat: f64) -> f64 {
    GRS80::A / (1.0 - GRS80::E2 * lat.sin().powi(2)).sqrt()
}

/// Convertit Lambert 93 vers coordonnées géographiques
pub fn lambert93_to_geographic(x: f64, y: f64) -> Result<Geographic> {
    let k = ConicConstants::lambert93();

    let dx = x - k.x0;
    let dy = k.r0 - (y - k.y0);

    let r = dx.hypot(dy).copysign(k.n);
    if r == 0.0 {
        bail!("Lambert 93 coordinate ({}, {}) is the projection apex", x, y);
    }

    // Angle au sommet du cône : au-delà de n·π, la longitude sort de ±180° du méridien origine
    let gamma = dx.atan2(dy);
    if gamma.abs() > k.n * PI {
        bail!("Lambert 93 coordinate ({}, {}) outside the projection domain", x, y);
    }
    let iso_lat = -(r / k.c).ln() / k.n;

    Ok(Geographic::new(
        k.lon0 + gamma / k.n,
        latitude_from_isometric(iso_lat),
    ))
}
