//! Erreurs fatales de conversion
//!
//! Une `ConvertError` signifie qu'aucun résultat n'a été produit. Les lignes
//! et points défaillants ne sont pas des erreurs : ils apparaissent dans le
//! [`ConversionReport`](crate::report::ConversionReport).

use thiserror::Error;

/// Erreurs qui interrompent la conversion entière
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Texte XYZ absent ou vide
    #[error("XYZ input is empty")]
    EmptyInput,

    /// Identifiant de CRS absent ou vide
    #[error("{role} CRS is required")]
    MissingCrs { role: &'static str },

    /// Options incohérentes
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Options JSON illisibles
    #[error("Failed to parse options: {0}")]
    Config(#[from] serde_json::Error),

    /// Paire de CRS impossible à instancier
    #[error("Cannot reproject from {from} to {to}: {reason:#}")]
    Reprojection {
        from: String,
        to: String,
        reason: anyhow::Error,
    },

    /// Échec de sérialisation GeoJSON
    #[error("GeoJSON serialization failed: {0}")]
    Serialization(String),
}

impl ConvertError {
    /// Crée une erreur de CRS manquant
    pub fn missing_crs(role: &'static str) -> Self {
        Self::MissingCrs { role }
    }
}
