//! Reprojection légère en Rust pur (sans dépendances externes)
//!
//! Sources supportées :
//! - Lambert 93 (EPSG:2154)
//! - UTM WGS84, toutes zones (EPSG:32601-32660 nord, EPSG:32701-32760 sud)
//! - WGS84 géographique (EPSG:4326)
//! - Web Mercator (EPSG:3857)
//!
//! Cibles supportées :
//! - WGS84 (EPSG:4326)
//! - Web Mercator (EPSG:3857)

mod ellipsoid;
mod lambert;
mod mercator;
mod smart;
mod utm;

pub use smart::SmartReprojector;

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use anyhow::{bail, Result};
use geo::Coord;

use crate::crs::Reproject;

pub use ellipsoid::WGS84;

/// Point en coordonnées géographiques (radians)
#[derive(Debug, Clone, Copy)]
pub struct Geographic {
    /// Longitude en radians
    pub lon: f64,
    /// Latitude en radians
    pub lat: f64,
}

impl Geographic {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Convertit en degrés
    pub fn to_degrees(self) -> (f64, f64) {
        (self.lon.to_degrees(), self.lat.to_degrees())
    }

    /// Crée depuis des degrés
    pub fn from_degrees(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lon: lon_deg.to_radians(),
            lat: lat_deg.to_radians(),
        }
    }

    /// Rejette une latitude hors de [-90°, 90°] et ramène la longitude
    /// dans [-180°, 180°]
    pub fn normalized(self) -> Result<Self> {
        if !self.lon.is_finite() || !self.lat.is_finite() || self.lat.abs() > FRAC_PI_2 + 1e-12 {
            let (lon, lat) = self.to_degrees();
            bail!("Geographic position ({}, {}) outside the valid domain", lon, lat);
        }

        let lon = if self.lon.abs() > PI {
            (self.lon + PI).rem_euclid(TAU) - PI
        } else {
            self.lon
        };
        Ok(Self::new(lon, self.lat.clamp(-FRAC_PI_2, FRAC_PI_2)))
    }
}

/// Système source reconnu par la reprojection légère
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Lambert93,
    WebMercator,
    Geographic,
    Utm { zone: u32, south: bool },
}

impl Source {
    fn from_epsg(epsg: u32) -> Option<Self> {
        match epsg {
            2154 => Some(Self::Lambert93),
            3857 => Some(Self::WebMercator),
            4326 => Some(Self::Geographic),
            32601..=32660 => Some(Self::Utm {
                zone: epsg - 32600,
                south: false,
            }),
            32701..=32760 => Some(Self::Utm {
                zone: epsg - 32700,
                south: true,
            }),
            _ => None,
        }
    }

    fn to_geographic(self, x: f64, y: f64) -> Result<Geographic> {
        match self {
            Self::Lambert93 => lambert::lambert93_to_geographic(x, y),
            Self::WebMercator => mercator::web_mercator_to_geographic(x, y),
            Self::Geographic => {
                if !(-180.0..=180.0).contains(&x) || !(-90.0..=90.0).contains(&y) {
                    bail!("Geographic coordinate ({}, {}) out of bounds", x, y);
                }
                Ok(Geographic::from_degrees(x, y))
            }
            Self::Utm { zone, south } => utm::utm_to_geographic(x, y, zone, south),
        }
    }
}

/// Système cible reconnu par la reprojection légère
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Geographic,
    WebMercator,
}

impl Target {
    fn from_epsg(epsg: u32) -> Option<Self> {
        match epsg {
            4326 => Some(Self::Geographic),
            3857 => Some(Self::WebMercator),
            _ => None,
        }
    }

    fn project(self, geo: Geographic) -> Result<(f64, f64)> {
        match self {
            Self::Geographic => Ok(geo.to_degrees()),
            Self::WebMercator => mercator::geographic_to_web_mercator(geo),
        }
    }
}

/// Reprojection légère pour les CRS courants des levés
#[derive(Debug, Clone, Copy)]
pub struct ReprojectorLite {
    source: Source,
    target: Target,
}

impl ReprojectorLite {
    /// Crée un reprojector pour une paire de codes EPSG
    pub fn new(source_epsg: u32, target_epsg: u32) -> Result<Self> {
        let Some(source) = Source::from_epsg(source_epsg) else {
            bail!(
                "EPSG:{} not supported. Supported sources: 2154, 3857, 4326, 32601-32660, 32701-32760",
                source_epsg
            );
        };
        let Some(target) = Target::from_epsg(target_epsg) else {
            bail!(
                "EPSG:{} not supported. Supported targets: 4326, 3857",
                target_epsg
            );
        };

        Ok(Self { source, target })
    }

    /// Vrai si le code EPSG est connu sans PROJ
    pub fn knows(epsg: u32) -> bool {
        Source::from_epsg(epsg).is_some()
    }

    /// Vrai si la paire est couverte sans PROJ
    pub fn is_supported(source_epsg: u32, target_epsg: u32) -> bool {
        Source::from_epsg(source_epsg).is_some() && Target::from_epsg(target_epsg).is_some()
    }

    /// Transforme un point (x, y), en passant par WGS84 géographique
    pub fn transform_point(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let geo = self.source.to_geographic(x, y)?.normalized()?;
        let (tx, ty) = self.target.project(geo)?;

        if !tx.is_finite() || !ty.is_finite() {
            bail!(
                "Transformation of ({}, {}) produced a non-finite coordinate",
                x,
                y
            );
        }
        Ok((tx, ty))
    }
}

impl Reproject for ReprojectorLite {
    fn reproject(&self, coord: Coord) -> Result<Coord> {
        let (x, y) = self.transform_point(coord.x, coord.y)?;
        Ok(Coord { x, y })
    }

    fn description(&self) -> &'static str {
        "reproject_lite (pure Rust)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lambert93_to_wgs84() {
        // Tour Eiffel
        let reproj = ReprojectorLite::new(2154, 4326).unwrap();
        let (lon, lat) = reproj.transform_point(648237.3015, 6862271.6816).unwrap();

        assert!((lon - 2.2945).abs() < 1e-7, "lon={}", lon);
        assert!((lat - 48.8584).abs() < 1e-7, "lat={}", lat);
    }

    #[test]
    fn test_utm15n_to_wgs84() {
        // Levé dans l'Iowa, zone 15N (méridien central -93°)
        let reproj = ReprojectorLite::new(32615, 4326).unwrap();
        let (lon, lat) = reproj.transform_point(440287.50, 4431748.25).unwrap();

        assert!((lon - (-93.6998823339)).abs() < 1e-7, "lon={}", lon);
        assert!((lat - 40.0338446330).abs() < 1e-7, "lat={}", lat);
    }

    #[test]
    fn test_utm_south_to_web_mercator() {
        // Saint-Denis de la Réunion, zone 40S : 55.4426869°E, 20.8741123°S
        let reproj = ReprojectorLite::new(32740, 3857).unwrap();
        let (x, y) = reproj.transform_point(338000.0, 7691000.0).unwrap();

        assert!((x - 6_171_851.679).abs() < 0.05, "x={}", x);
        assert!((y - (-2_376_874.135)).abs() < 0.05, "y={}", y);
    }

    #[test]
    fn test_utm_outside_zone_rejected() {
        let reproj = ReprojectorLite::new(32615, 4326).unwrap();
        assert!(reproj.transform_point(440287.5, 1e9).is_err());
        assert!(reproj.transform_point(1e8, 4431748.25).is_err());
    }

    #[test]
    fn test_normalized_wraps_longitude() {
        let geo = Geographic::new(190f64.to_radians(), 0.5).normalized().unwrap();
        assert!((geo.lon.to_degrees() - (-170.0)).abs() < 1e-9, "lon={}", geo.lon.to_degrees());

        let (lon, lat) = Geographic::from_degrees(180.0, 90.0)
            .normalized()
            .unwrap()
            .to_degrees();
        assert!((lon - 180.0).abs() < 1e-9, "lon={}", lon);
        assert!((lat - 90.0).abs() < 1e-9, "lat={}", lat);
    }

    #[test]
    fn test_normalized_rejects_latitude() {
        assert!(Geographic::from_degrees(0.0, 90.5).normalized().is_err());
        assert!(Geographic::new(0.0, f64::NAN).normalized().is_err());
    }

    #[test]
    fn test_lambert93_far_outside_rejected() {
        let reproj = ReprojectorLite::new(2154, 4326).unwrap();
        assert!(reproj.transform_point(700000.0, 6600000.0 + 2.0e7).is_err());
    }

    #[test]
    fn test_geographic_out_of_bounds() {
        let reproj = ReprojectorLite::new(4326, 3857).unwrap();
        assert!(reproj.transform_point(2.35, 48.85).is_ok());
        assert!(reproj.transform_point(200.0, 48.85).is_err());
        assert!(reproj.transform_point(2.35, -91.0).is_err());
    }

    #[test]
    fn test_reproject_trait() {
        let reproj = ReprojectorLite::new(3857, 4326).unwrap();
        let coord = reproj.reproject(Coord { x: 0.0, y: 0.0 }).unwrap();
        assert!(coord.x.abs() < 1e-9);
        assert!(coord.y.abs() < 1e-9);
    }

    #[test]
    fn test_source_from_epsg() {
        assert_eq!(
            Source::from_epsg(32740),
            Some(Source::Utm {
                zone: 40,
                south: true
            })
        );
        assert_eq!(Source::from_epsg(32600), None);
        assert!(ReprojectorLite::is_supported(32601, 3857));
        assert!(!ReprojectorLite::is_supported(4326, 2154));
    }

    #[test]
    fn test_unsupported_epsg() {
        assert!(ReprojectorLite::new(32661, 4326).is_err());
        assert!(ReprojectorLite::new(2154, 2154).is_err());
        assert!(ReprojectorLite::new(32615, 32615).is_err());
    }
}
