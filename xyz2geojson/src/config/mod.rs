//! Options de conversion
//!
//! Une instance par appel : aucune configuration globale.

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;
use crate::vertical::DatumShift;

/// Taille de lot par défaut
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Options de transformation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOptions {
    /// Nombre de points traités par lot (n'influe pas sur le résultat)
    pub batch_size: usize,

    /// Active l'ajustement vertical
    pub transform_vertical_datum: bool,

    /// Datum vertical source (ex: "NAVD88")
    pub source_vertical_datum: Option<String>,

    /// Datum vertical cible (ex: "WGS84")
    pub target_vertical_datum: Option<String>,

    /// Répartit les lots sur le pool rayon
    pub parallel: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            transform_vertical_datum: false,
            source_vertical_datum: None,
            target_vertical_datum: None,
            parallel: false,
        }
    }
}

impl TransformOptions {
    /// Parse des options JSON (clés camelCase, valeurs par défaut sinon)
    pub fn from_json(json: &str) -> Result<Self, ConvertError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Vérifie la cohérence des options
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.batch_size == 0 {
            return Err(ConvertError::InvalidOptions(
                "batchSize must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Active l'ajustement vertical entre deux datums
    pub fn with_vertical_datums(mut self, source: &str, target: &str) -> Self {
        self.transform_vertical_datum = true;
        self.source_vertical_datum = Some(source.to_string());
        self.target_vertical_datum = Some(target.to_string());
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Décalage vertical à appliquer, `DatumShift::None` si désactivé
    pub fn datum_shift(&self) -> DatumShift {
        if !self.transform_vertical_datum {
            return DatumShift::None;
        }
        DatumShift::resolve(
            self.source_vertical_datum.as_deref(),
            self.target_vertical_datum.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TransformOptions::default();
        assert_eq!(options.batch_size, 10_000);
        assert!(!options.transform_vertical_datum);
        assert!(!options.parallel);
        assert_eq!(options.datum_shift(), DatumShift::None);
    }

    #[test]
    fn test_from_json_camel_case() {
        let options = TransformOptions::from_json(
            r#"{"batchSize": 500, "transformVerticalDatum": true,
                "sourceVerticalDatum": "NAVD88", "targetVerticalDatum": "WGS84"}"#,
        )
        .unwrap();

        assert_eq!(options.batch_size, 500);
        assert_eq!(options.datum_shift(), DatumShift::AddGeoid);
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let options = TransformOptions::from_json("{}").unwrap();
        assert_eq!(options, TransformOptions::default());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        assert!(matches!(
            TransformOptions::from_json(r#"{"batchSize": 0}"#),
            Err(ConvertError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            TransformOptions::from_json("{batchSize"),
            Err(ConvertError::Config(_))
        ));
    }

    #[test]
    fn test_vertical_disabled_ignores_datums() {
        let mut options = TransformOptions::default().with_vertical_datums("NAVD88", "WGS84");
        options.transform_vertical_datum = false;
        assert_eq!(options.datum_shift(), DatumShift::None);
    }
}
