//! Types d'erreurs pour le crate xyz

use thiserror::Error;

/// Raisons pour lesquelles une ligne XYZ est ignorée
///
/// Ces erreurs ne sont jamais fatales : la ligne fautive est écartée et le
/// parsing continue avec la suivante.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// Moins de trois champs (X, Y, Z) sur la ligne
    #[error("expected at least 3 fields, found {found}")]
    TooFewFields { found: usize },

    /// Champ non numérique
    #[error("invalid number: {token:?}")]
    InvalidNumber { token: String },

    /// Champ numérique mais non fini (NaN, inf)
    #[error("non-finite number: {token:?}")]
    NonFinite { token: String },
}

impl LineError {
    /// Crée une erreur de champ non numérique
    pub fn invalid_number(token: impl Into<String>) -> Self {
        Self::InvalidNumber {
            token: token.into(),
        }
    }

    /// Crée une erreur de champ non fini
    pub fn non_finite(token: impl Into<String>) -> Self {
        Self::NonFinite {
            token: token.into(),
        }
    }
}
