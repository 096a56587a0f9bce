//! Reprojection intelligente : reproject_lite en priorité, fallback sur proj
//!
//! Utilise automatiquement la meilleure option disponible.

use super::ReprojectorLite;
use crate::crs::{Crs, Reproject};
#[cfg(not(feature = "reproject"))]
use anyhow::bail;
use anyhow::Result;
use geo::Coord;

/// Reprojection intelligente
///
/// Essaie d'abord reproject_lite (pure Rust), puis fallback sur proj si disponible.
pub enum SmartReprojector {
    /// Reprojection légère (pure Rust)
    Lite(ReprojectorLite),
    /// Reprojection via PROJ (si feature activée)
    #[cfg(feature = "reproject")]
    Proj(crate::export::reproject::Reprojector),
    /// Pas de reprojection (même code EPSG connu des deux côtés)
    Identity,
}

impl SmartReprojector {
    /// Crée un nouveau reprojector
    pub fn new(source: &Crs, target: &Crs) -> Result<Self> {
        if let (Some(from), Some(to)) = (source.epsg(), target.epsg()) {
            if from == to && ReprojectorLite::knows(from) {
                return Ok(Self::Identity);
            }
            if ReprojectorLite::is_supported(from, to) {
                return Ok(Self::Lite(ReprojectorLite::new(from, to)?));
            }
        }

        #[cfg(feature = "reproject")]
        {
            let proj = crate::export::reproject::Reprojector::new(source, target)?;
            return Ok(Self::Proj(proj));
        }

        #[cfg(not(feature = "reproject"))]
        bail!(
            "Reprojection {} → {} not supported.\n\
             Supported without PROJ (reproject_lite):\n\
             - Sources: EPSG:2154, EPSG:3857, EPSG:4326, EPSG:326xx/327xx (UTM WGS84)\n\
             - Targets: EPSG:4326, EPSG:3857\n\
             For other systems, build with: cargo build --features reproject",
            source,
            target
        );
    }
}

impl Reproject for SmartReprojector {
    fn reproject(&self, coord: Coord) -> Result<Coord> {
        match self {
            Self::Identity => Ok(coord),
            Self::Lite(lite) => lite.reproject(coord),
            #[cfg(feature = "reproject")]
            Self::Proj(proj) => proj.reproject(coord),
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Identity => "identity (no reprojection)",
            Self::Lite(lite) => lite.description(),
            #[cfg(feature = "reproject")]
            Self::Proj(proj) => proj.description(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let r = SmartReprojector::new(&Crs::new("EPSG:4326"), &Crs::new("epsg:4326")).unwrap();
        assert!(matches!(r, SmartReprojector::Identity));

        let coord = Coord { x: 12.5, y: -3.25 };
        assert_eq!(r.reproject(coord).unwrap(), coord);
    }

    #[test]
    fn test_lite_for_utm() {
        let r = SmartReprojector::new(&Crs::from_epsg(32615), &Crs::from_epsg(4326)).unwrap();
        assert!(matches!(r, SmartReprojector::Lite(_)));
    }

    #[test]
    fn test_lite_for_lambert93_to_3857() {
        let r = SmartReprojector::new(&Crs::from_epsg(2154), &Crs::from_epsg(3857)).unwrap();
        assert!(matches!(r, SmartReprojector::Lite(_)));
    }

    #[cfg(not(feature = "reproject"))]
    #[test]
    fn test_unsupported_without_proj() {
        let result = SmartReprojector::new(&Crs::from_epsg(99999), &Crs::from_epsg(4326));
        assert!(result.is_err());
    }

    #[test]
    fn test_identical_unknown_crs_rejected() {
        let unknown = Crs::from_epsg(99999);
        assert!(SmartReprojector::new(&unknown, &unknown).is_err());

        let nonsense = Crs::new("nonsense");
        assert!(SmartReprojector::new(&nonsense, &nonsense).is_err());
    }

    #[test]
    fn test_identity_for_known_projected_crs() {
        let r = SmartReprojector::new(&Crs::from_epsg(2154), &Crs::from_epsg(2154)).unwrap();
        assert!(matches!(r, SmartReprojector::Identity));
    }
}
