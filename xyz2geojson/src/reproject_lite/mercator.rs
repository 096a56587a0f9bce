//! Projection Web Mercator (EPSG:3857)
//!
//! Modèle sphérique de rayon égal au demi-grand axe WGS84.

use super::ellipsoid::WGS84;
use super::Geographic;
use anyhow::{bail, Result};

/// Latitude limite de la projection (degrés)
const MAX_LATITUDE: f64 = 85.06;

/// Convertit coordonnées géographiques vers Web Mercator
pub fn geographic_to_web_mercator(geo: Geographic) -> Result<(f64, f64)> {
    let r = WGS84::A;

    // Latitude bornée, sinon y diverge aux pôles
    let limit = MAX_LATITUDE.to_radians();
    let lat = geo.lat.clamp(-limit, limit);

    let x = r * geo.lon;
    let y = r * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln();

    Ok((x, y))
}

/// Convertit Web Mercator vers coordonnées géographiques
pub fn web_mercator_to_geographic(x: f64, y: f64) -> Result<Geographic> {
    let r = WGS84::A;
    let half_extent = std::f64::consts::PI * r;

    if x.abs() > half_extent * (1.0 + 1e-9) {
        bail!("Web Mercator x={} outside projection extent", x);
    }

    let lon = x / r;
    let lat = 2.0 * (y / r).exp().atan() - std::f64::consts::FRAC_PI_2;

    Ok(Geographic::new(lon, lat))
}
