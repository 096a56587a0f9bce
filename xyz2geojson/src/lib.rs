//! # xyz2geojson
//!
//! Conversion de points de levé XYZ en FeatureCollection GeoJSON.
//!
//! ## Features
//!
//! - Reprojection planimétrique (Rust pur pour UTM/Lambert 93/Web Mercator,
//!   PROJ avec le feature `reproject`)
//! - Ajustement vertical NAVD88 ↔ WGS84 via un modèle de géoïde interchangeable
//! - Traitement par lots, séquentiel ou parallèle (rayon), à résultat identique
//! - Lignes invalides et points en échec écartés et rapportés, jamais fatals
//!
//! ## Usage
//!
//! ```rust,ignore
//! use xyz2geojson::{convert, to_geojson_string, TransformOptions};
//!
//! let text = "440287.50 4431748.25 125.3\n440291.20 4431752.80 126.1";
//! let collection = convert(text, "EPSG:32615", "EPSG:4326", &TransformOptions::default())?;
//! println!("{}", to_geojson_string(&collection)?);
//! ```

pub mod batch;
pub mod config;
pub mod crs;
pub mod error;
pub mod export;
pub mod logging;
pub mod report;
pub mod reproject_lite;
pub mod vertical;

pub use config::TransformOptions;
pub use crs::{Crs, Reproject};
pub use error::ConvertError;
pub use export::geojson::to_geojson_string;
pub use report::{ConversionReport, ConversionStatus, Diagnostic};
pub use reproject_lite::SmartReprojector;
pub use vertical::{GeoidModel, ZeroGeoid};

use std::time::Instant;

use geojson::FeatureCollection;
use tracing::{info, warn};

use crate::batch::BatchTransformer;
use crate::export::geojson::feature_collection;
use crate::vertical::DatumShift;

/// Résultat d'une conversion : la FeatureCollection et son rapport
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Features produites, dans l'ordre des lignes source
    pub collection: FeatureCollection,
    /// Lignes ignorées, points en échec, compteurs
    pub report: ConversionReport,
}

impl Conversion {
    /// Sérialise la FeatureCollection en GeoJSON
    pub fn to_geojson_string(&self) -> Result<String, ConvertError> {
        to_geojson_string(&self.collection)
    }
}

/// Convertit un texte XYZ en FeatureCollection GeoJSON
///
/// Échoue avant tout parsing si le texte ou un CRS est vide. Les lignes
/// invalides et les points non transformables sont écartés et journalisés.
pub fn convert(
    xyz_text: &str,
    from_crs: &str,
    to_crs: &str,
    options: &TransformOptions,
) -> Result<FeatureCollection, ConvertError> {
    convert_with_report(xyz_text, from_crs, to_crs, options).map(|c| c.collection)
}

/// Comme [`convert`], en retournant aussi le rapport de conversion
pub fn convert_with_report(
    xyz_text: &str,
    from_crs: &str,
    to_crs: &str,
    options: &TransformOptions,
) -> Result<Conversion, ConvertError> {
    convert_with_geoid(xyz_text, from_crs, to_crs, options, &ZeroGeoid)
}

/// Comme [`convert_with_report`], avec un modèle de géoïde fourni
pub fn convert_with_geoid(
    xyz_text: &str,
    from_crs: &str,
    to_crs: &str,
    options: &TransformOptions,
    geoid: &dyn GeoidModel,
) -> Result<Conversion, ConvertError> {
    check_input(xyz_text)?;
    if from_crs.trim().is_empty() {
        return Err(ConvertError::missing_crs("source"));
    }
    if to_crs.trim().is_empty() {
        return Err(ConvertError::missing_crs("target"));
    }

    let source = Crs::new(from_crs);
    let target = Crs::new(to_crs);

    run(
        xyz_text,
        &source.to_string(),
        &target.to_string(),
        || SmartReprojector::new(&source, &target),
        geoid,
        options,
    )
}

/// Convertit avec une reprojection fournie par l'appelant
///
/// `make_reprojector` est appelé une fois pour valider la paire de CRS, puis
/// une fois par worker en mode parallèle.
pub fn convert_with<R, F>(
    xyz_text: &str,
    make_reprojector: F,
    geoid: &dyn GeoidModel,
    options: &TransformOptions,
) -> Result<Conversion, ConvertError>
where
    R: Reproject,
    F: Fn() -> anyhow::Result<R> + Sync + Send,
{
    check_input(xyz_text)?;
    run(xyz_text, "custom", "custom", make_reprojector, geoid, options)
}

fn check_input(xyz_text: &str) -> Result<(), ConvertError> {
    if xyz_text.trim().is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    Ok(())
}

fn run<R, F>(
    xyz_text: &str,
    from_label: &str,
    to_label: &str,
    make_reprojector: F,
    geoid: &dyn GeoidModel,
    options: &TransformOptions,
) -> Result<Conversion, ConvertError>
where
    R: Reproject,
    F: Fn() -> anyhow::Result<R> + Sync + Send,
{
    let start = Instant::now();
    options.validate()?;

    // Paire de CRS inutilisable : une seule erreur plutôt qu'un échec par point
    let reprojector = make_reprojector().map_err(|reason| ConvertError::Reprojection {
        from: from_label.to_string(),
        to: to_label.to_string(),
        reason,
    })?;

    let mut report = ConversionReport::new(from_label, to_label);
    report.reprojector = reprojector.description().to_string();

    let transformer = BatchTransformer::new(options, geoid);
    if let DatumShift::Unsupported { source, target } = transformer.shift() {
        warn!(source = %source, target = %target, "Unsupported vertical datum pair, elevations left unchanged");
        report.record_warning(Diagnostic::unsupported_datum(source, target));
    }

    let parsed = xyz::parse(xyz_text);
    report.lines_read = parsed.lines_read;
    report.points_parsed = parsed.points.len();
    for skipped in &parsed.skipped {
        report.record_skipped_line(skipped);
    }

    info!(
        from = from_label,
        to = to_label,
        points = parsed.points.len(),
        batch_size = options.batch_size,
        parallel = options.parallel,
        reprojector = reprojector.description(),
        "Transforming points"
    );

    let transformed = if options.parallel {
        transformer.transform_parallel(&parsed.points, &make_reprojector)
    } else {
        transformer.transform(&parsed.points, &reprojector)
    };

    for failure in &transformed.failures {
        report.record_failed_point(failure.line, &failure.reason);
    }
    report.features_emitted = transformed.features.len();
    report.set_duration(start.elapsed());
    report.finalize();

    info!(
        features = report.features_emitted,
        skipped = report.lines_skipped,
        failed = report.points_failed,
        "Conversion complete"
    );

    Ok(Conversion {
        collection: feature_collection(transformed.features),
        report,
    })
}
