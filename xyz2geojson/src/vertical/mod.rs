//! Ajustement des altitudes entre datums verticaux
//!
//! Seules les paires NAVD88 ↔ WGS84 sont connues. Une paire inconnue laisse
//! l'altitude inchangée mais se résout en [`DatumShift::Unsupported`], que
//! l'appelant signale.

mod geoid;

pub use geoid::{ConstantGeoid, GeoidModel, ZeroGeoid};

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Datum vertical reconnu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalDatum {
    /// North American Vertical Datum 1988 (altitude orthométrique)
    Navd88,
    /// Hauteur ellipsoïdale WGS84
    Wgs84,
}

impl FromStr for VerticalDatum {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("NAVD88") {
            Ok(Self::Navd88)
        } else if name.eq_ignore_ascii_case("WGS84") {
            Ok(Self::Wgs84)
        } else {
            Err(format!("unknown vertical datum: {}", name))
        }
    }
}

impl fmt::Display for VerticalDatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navd88 => f.write_str("NAVD88"),
            Self::Wgs84 => f.write_str("WGS84"),
        }
    }
}

/// Décalage vertical résolu pour une paire de datums
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatumShift {
    /// Datum source ou cible absent : altitude inchangée
    None,
    /// Même datum des deux côtés
    Identity,
    /// NAVD88 → WGS84 : h = H + N
    AddGeoid,
    /// WGS84 → NAVD88 : H = h - N
    SubtractGeoid,
    /// Paire non supportée : altitude inchangée
    Unsupported { source: String, target: String },
}

impl DatumShift {
    /// Résout une paire de noms de datums
    pub fn resolve(source: Option<&str>, target: Option<&str>) -> Self {
        let (source, target) = match (non_empty(source), non_empty(target)) {
            (Some(s), Some(t)) => (s, t),
            _ => return Self::None,
        };

        match (source.parse::<VerticalDatum>(), target.parse::<VerticalDatum>()) {
            (Ok(s), Ok(t)) if s == t => Self::Identity,
            (Ok(VerticalDatum::Navd88), Ok(VerticalDatum::Wgs84)) => Self::AddGeoid,
            (Ok(VerticalDatum::Wgs84), Ok(VerticalDatum::Navd88)) => Self::SubtractGeoid,
            _ => Self::Unsupported {
                source: source.to_string(),
                target: target.to_string(),
            },
        }
    }

    /// Vrai si l'altitude passe telle quelle
    pub fn is_passthrough(&self) -> bool {
        !matches!(self, Self::AddGeoid | Self::SubtractGeoid)
    }

    /// Applique le décalage à une altitude
    pub fn apply(
        &self,
        z: f64,
        latitude: f64,
        longitude: f64,
        geoid: &dyn GeoidModel,
    ) -> Result<f64> {
        let sign = match self {
            Self::AddGeoid => 1.0,
            Self::SubtractGeoid => -1.0,
            _ => return Ok(z),
        };

        let offset = geoid.offset(latitude, longitude).with_context(|| {
            format!(
                "Geoid lookup failed at ({}, {}) with model {}",
                latitude,
                longitude,
                geoid.name()
            )
        })?;

        let elevation = z + sign * offset;
        if !elevation.is_finite() {
            bail!(
                "Geoid model {} returned a non-finite offset at ({}, {})",
                geoid.name(),
                latitude,
                longitude
            );
        }
        Ok(elevation)
    }
}

fn non_empty(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|n| !n.is_empty())
}

/// Ajuste une altitude d'un datum vertical à un autre
pub fn vertical_adjust(
    z: f64,
    latitude: f64,
    longitude: f64,
    source: Option<&str>,
    target: Option<&str>,
    geoid: &dyn GeoidModel,
) -> Result<f64> {
    DatumShift::resolve(source, target).apply(z, latitude, longitude, geoid)
}
