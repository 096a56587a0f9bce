//! Projection UTM (Universal Transverse Mercator) sur WGS84
//!
//! Inverse par développement en série (Snyder, *Map Projections: A Working
//! Manual*, §8).

use super::ellipsoid::WGS84;
use super::Geographic;
use anyhow::{bail, Result};

const SCALE: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Écart maximal au faux est accepté (la série diverge loin de la zone)
const MAX_EASTING_OFFSET: f64 = 1_000_000.0;

/// Distance méridienne équateur → pôle sur WGS84
const QUARTER_MERIDIAN: f64 = 10_001_965.729;

/// Méridien central d'une zone, en radians
fn central_meridian(zone: u32) -> f64 {
    (f64::from(zone) * 6.0 - 183.0).to_radians()
}

/// Latitude de pied (footprint) pour une distance méridienne donnée
fn footprint_latitude(meridian_distance: f64) -> f64 {
    let e2 = WGS84::E2;
    let e4 = e2 * e2;
    let mu = meridian_distance / (WGS84::A * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e4 * e2 / 256.0));

    let root = (1.0 - e2).sqrt();
    let e1 = (1.0 - root) / (1.0 + root);
    let (e1_2, e1_3) = (e1 * e1, e1 * e1 * e1);
    let e1_4 = e1_2 * e1_2;

    mu + (1.5 * e1 - 27.0 / 32.0 * e1_3) * (2.0 * mu).sin()
        + (21.0 / 16.0 * e1_2 - 55.0 / 32.0 * e1_4) * (4.0 * mu).sin()
        + 151.0 / 96.0 * e1_3 * (6.0 * mu).sin()
        + 1097.0 / 512.0 * e1_4 * (8.0 * mu).sin()
}

/// Convertit UTM (WGS84) vers coordonnées géographiques
///
/// `zone` va de 1 à 60, `south` sélectionne le faux nord de l'hémisphère sud.
pub fn utm_to_geographic(x: f64, y: f64, zone: u32, south: bool) -> Result<Geographic> {
    let e2 = WGS84::E2;
    let ep2 = WGS84::EP2;

    let easting = x - FALSE_EASTING;
    let northing = if south { y - FALSE_NORTHING_SOUTH } else { y };

    if easting.abs() > MAX_EASTING_OFFSET {
        bail!("UTM easting {} too far from zone {} central meridian", x, zone);
    }
    let meridian_distance = northing / SCALE;
    if meridian_distance.abs() > QUARTER_MERIDIAN {
        bail!("UTM northing {} beyond the pole", y);
    }

    let phi1 = footprint_latitude(meridian_distance);
    let (sin1, cos1) = phi1.sin_cos();
    let tan1 = phi1.tan();

    let w = 1.0 - e2 * sin1 * sin1;
    let n1 = WGS84::A / w.sqrt();
    let r1 = WGS84::A * (1.0 - e2) / w.powf(1.5);
    let t1 = tan1 * tan1;
    let c1 = ep2 * cos1 * cos1;

    let d = easting / (n1 * SCALE);
    let d2 = d * d;
    let d3 = d2 * d;
    let d4 = d2 * d2;

    let lat_series = d2 / 2.0
        - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d4 / 24.0
        + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1) * d4 * d2
            / 720.0;
    let lat = phi1 - n1 * tan1 / r1 * lat_series;

    let lon_series = d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
        + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1) * d3 * d2
            / 120.0;
    let lon = central_meridian(zone) + lon_series / cos1;

    Ok(Geographic::new(lon, lat))
}
