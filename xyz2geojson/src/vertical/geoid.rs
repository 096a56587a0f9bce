//! Modèles de géoïde (ondulation N en mètres)

use anyhow::Result;

/// Source d'ondulation du géoïde pour une position géographique
///
/// N est la hauteur du géoïde au-dessus de l'ellipsoïde : une altitude
/// orthométrique H devient une hauteur ellipsoïdale h = H + N.
pub trait GeoidModel: Send + Sync {
    /// Ondulation en mètres à (latitude, longitude) en degrés
    fn offset(&self, latitude: f64, longitude: f64) -> Result<f64>;

    /// Nom du modèle, pour les logs
    fn name(&self) -> &str {
        "custom"
    }
}

/// Géoïde nul : aucune grille chargée, N = 0 partout
///
/// Déclaré comme stub tant qu'aucune grille de géoïde n'est branchée.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroGeoid;

impl GeoidModel for ZeroGeoid {
    fn offset(&self, _latitude: f64, _longitude: f64) -> Result<f64> {
        Ok(0.0)
    }

    fn name(&self) -> &str {
        "zero (stub)"
    }
}

/// Ondulation constante, pour un chantier de faible emprise
#[derive(Debug, Clone, Copy)]
pub struct ConstantGeoid(pub f64);

impl GeoidModel for ConstantGeoid {
    fn offset(&self, _latitude: f64, _longitude: f64) -> Result<f64> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "constant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_geoid() {
        assert_eq!(ZeroGeoid.offset(40.03, -93.70).unwrap(), 0.0);
    }

    #[test]
    fn test_constant_geoid() {
        let geoid = ConstantGeoid(-28.5);
        assert_eq!(geoid.offset(0.0, 0.0).unwrap(), -28.5);
        assert_eq!(geoid.name(), "constant");
    }
}
