//! Reprojection de coordonnées avec PROJ
//!
//! Ce module est disponible uniquement avec le feature `reproject`.

#[cfg(feature = "reproject")]
use anyhow::{bail, Context, Result};
#[cfg(feature = "reproject")]
use geo::Coord;
#[cfg(feature = "reproject")]
use proj::Proj;

#[cfg(feature = "reproject")]
use crate::crs::{Crs, Reproject};

/// Reprojection entre deux systèmes de coordonnées quelconques connus de PROJ
///
/// `Proj` n'est pas `Sync` : en mode parallèle, chaque worker construit le sien.
#[cfg(feature = "reproject")]
pub struct Reprojector {
    proj: Proj,
    source: Crs,
    target: Crs,
}

#[cfg(feature = "reproject")]
impl Reprojector {
    /// Crée un nouveau reprojector entre deux CRS
    pub fn new(source: &Crs, target: &Crs) -> Result<Self> {
        let proj = Proj::new_known_crs(source.definition(), target.definition(), None)
            .context(format!(
                "Failed to create projection from {} to {}",
                source, target
            ))?;

        Ok(Self {
            proj,
            source: source.clone(),
            target: target.clone(),
        })
    }

    /// CRS source
    pub fn source(&self) -> &Crs {
        &self.source
    }

    /// CRS cible
    pub fn target(&self) -> &Crs {
        &self.target
    }
}

#[cfg(feature = "reproject")]
impl Reproject for Reprojector {
    fn reproject(&self, coord: Coord) -> Result<Coord> {
        let (x, y) = self
            .proj
            .convert((coord.x, coord.y))
            .context("Coordinate transformation failed")?;

        if !x.is_finite() || !y.is_finite() {
            bail!(
                "Transformation of ({}, {}) from {} to {} produced a non-finite coordinate",
                coord.x,
                coord.y,
                self.source,
                self.target
            );
        }
        Ok(Coord { x, y })
    }

    fn description(&self) -> &'static str {
        "proj (PROJ library)"
    }
}
