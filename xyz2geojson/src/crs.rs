//! Identifiants de systèmes de coordonnées et interface de reprojection

use std::fmt;

use anyhow::Result;
use geo::Coord;

/// Système de coordonnées de référence
///
/// Les formes `EPSG:<code>` et `urn:ogc:def:crs:EPSG::<code>` sont reconnues
/// comme codes EPSG. Toute autre définition est conservée telle quelle et
/// transmise à PROJ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crs {
    definition: String,
    epsg: Option<u32>,
}

impl Crs {
    /// Crée un CRS depuis un identifiant (espaces de bord ignorés)
    pub fn new(identifier: &str) -> Self {
        let definition = identifier.trim();
        let epsg = parse_epsg(definition);

        Self {
            definition: match epsg {
                Some(code) => format!("EPSG:{}", code),
                None => definition.to_string(),
            },
            epsg,
        }
    }

    /// Crée un CRS depuis un code EPSG
    pub fn from_epsg(code: u32) -> Self {
        Self {
            definition: format!("EPSG:{}", code),
            epsg: Some(code),
        }
    }

    /// Code EPSG, si l'identifiant en est un
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    /// Définition normalisée, utilisable par PROJ
    pub fn definition(&self) -> &str {
        &self.definition
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.definition)
    }
}

fn parse_epsg(identifier: &str) -> Option<u32> {
    let upper = identifier.to_ascii_uppercase();
    let code = upper
        .strip_prefix("URN:OGC:DEF:CRS:EPSG::")
        .or_else(|| upper.strip_prefix("EPSG:"))?;
    code.trim().parse().ok()
}

/// Reprojection d'une coordonnée planimétrique pour une paire de CRS fixée
///
/// Une erreur ne concerne que la coordonnée fournie : l'appelant écarte le
/// point et continue.
pub trait Reproject {
    /// Transforme `(x, y)` du CRS source vers le CRS cible
    fn reproject(&self, coord: Coord) -> Result<Coord>;

    /// Description du moteur de reprojection
    fn description(&self) -> &'static str {
        "custom"
    }
}

impl<R: Reproject + ?Sized> Reproject for &R {
    fn reproject(&self, coord: Coord) -> Result<Coord> {
        (**self).reproject(coord)
    }

    fn description(&self) -> &'static str {
        (**self).description()
    }
}
