//! Transformation des points par lots
//!
//! Les lots ne servent qu'à borner la mémoire de travail et à répartir le
//! travail en mode parallèle : ni l'ordre ni le contenu du résultat ne
//! dépendent de leur taille.

use anyhow::{bail, Result};
use geojson::Feature;
use rayon::prelude::*;
use tracing::{debug, warn};
use xyz::Point;

use crate::config::TransformOptions;
use crate::crs::Reproject;
use crate::export::geojson::point_feature;
use crate::vertical::{DatumShift, GeoidModel};

/// Point écarté pendant la transformation
#[derive(Debug, Clone, PartialEq)]
pub struct PointFailure {
    /// Numéro de ligne source
    pub line: usize,
    /// Cause de l'échec
    pub reason: String,
}

/// Résultat de la transformation d'une suite de points
#[derive(Debug, Default)]
pub struct Transformed {
    /// Features produites, dans l'ordre des points
    pub features: Vec<Feature>,
    /// Points en échec, dans l'ordre des points
    pub failures: Vec<PointFailure>,
}

impl Transformed {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            features: Vec::with_capacity(capacity),
            failures: Vec::new(),
        }
    }

    /// Tous les points d'un lot en échec pour la même raison
    fn all_failed(batch: &[Point], reason: &str) -> Self {
        let failures = batch
            .iter()
            .map(|point| {
                warn!(line = point.line, reason = %reason, "Point transformation failed");
                PointFailure {
                    line: point.line,
                    reason: reason.to_string(),
                }
            })
            .collect();

        Self {
            features: Vec::new(),
            failures,
        }
    }

    fn append(&mut self, other: Transformed) {
        self.features.extend(other.features);
        self.failures.extend(other.failures);
    }
}

/// Transforme des points en features GeoJSON
pub struct BatchTransformer<'a> {
    batch_size: usize,
    shift: DatumShift,
    geoid: &'a dyn GeoidModel,
}

impl<'a> BatchTransformer<'a> {
    /// Crée un transformer à partir des options de conversion
    pub fn new(options: &TransformOptions, geoid: &'a dyn GeoidModel) -> Self {
        Self {
            batch_size: options.batch_size.max(1),
            shift: options.datum_shift(),
            geoid,
        }
    }

    /// Décalage vertical appliqué à chaque point
    pub fn shift(&self) -> &DatumShift {
        &self.shift
    }

    /// Transforme un point : reprojection puis ajustement vertical
    pub fn transform_point<R: Reproject + ?Sized>(
        &self,
        reprojector: &R,
        point: &Point,
    ) -> Result<Feature> {
        let coord = reprojector.reproject(point.planar())?;
        if !coord.x.is_finite() || !coord.y.is_finite() {
            bail!(
                "Reprojection of ({}, {}) produced a non-finite coordinate ({}, {})",
                point.x,
                point.y,
                coord.x,
                coord.y
            );
        }
        let (longitude, latitude) = (coord.x, coord.y);

        let elevation = self
            .shift
            .apply(point.z, latitude, longitude, self.geoid)?;

        Ok(point_feature(point, longitude, latitude, elevation))
    }

    fn transform_batch<R: Reproject + ?Sized>(&self, reprojector: &R, batch: &[Point]) -> Transformed {
        let mut result = Transformed::with_capacity(batch.len());

        for point in batch {
            match self.transform_point(reprojector, point) {
                Ok(feature) => result.features.push(feature),
                Err(e) => {
                    let reason = format!("{:#}", e);
                    warn!(line = point.line, reason = %reason, "Point transformation failed");
                    result.failures.push(PointFailure {
                        line: point.line,
                        reason,
                    });
                }
            }
        }

        result
    }

    /// Transforme les points séquentiellement, lot par lot
    pub fn transform<R: Reproject + ?Sized>(&self, points: &[Point], reprojector: &R) -> Transformed {
        let mut result = Transformed::with_capacity(points.len());

        for (index, batch) in points.chunks(self.batch_size).enumerate() {
            debug!(batch = index, size = batch.len(), "Processing batch");
            result.append(self.transform_batch(reprojector, batch));
        }

        result
    }

    /// Transforme les lots en parallèle sur le pool rayon
    ///
    /// Chaque worker construit son propre reprojector via `make_reprojector`.
    /// Les lots sont réassemblés dans leur ordre d'origine.
    pub fn transform_parallel<R, F>(&self, points: &[Point], make_reprojector: F) -> Transformed
    where
        R: Reproject,
        F: Fn() -> Result<R> + Sync + Send,
    {
        let batches: Vec<Transformed> = points
            .par_chunks(self.batch_size)
            .map_init(&make_reprojector, |reprojector, batch| match reprojector {
                Ok(reprojector) => self.transform_batch(&*reprojector, batch),
                Err(e) => Transformed::all_failed(batch, &format!("{:#}", e)),
            })
            .collect();

        debug!(batches = batches.len(), "Parallel batches complete");

        let mut result = Transformed::with_capacity(points.len());
        for batch in batches {
            result.append(batch);
        }
        result
    }
}
