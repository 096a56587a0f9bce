//! Types de données pour le crate xyz

use geo::Coord;

use crate::LineError;

/// Point de levé validé, avec sa provenance dans le fichier source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Coordonnée planimétrique X (easting, ou longitude)
    pub x: f64,

    /// Coordonnée planimétrique Y (northing, ou latitude)
    pub y: f64,

    /// Altitude
    pub z: f64,

    /// Numéro de ligne dans le texte source (à partir de 1)
    pub line: usize,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64, line: usize) -> Self {
        Self { x, y, z, line }
    }

    /// Coordonnée planimétrique (X, Y) au format `geo`
    pub fn planar(&self) -> Coord {
        Coord {
            x: self.x,
            y: self.y,
        }
    }
}

/// Ligne écartée pendant le parsing
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    /// Numéro de ligne (à partir de 1)
    pub line: usize,

    /// Texte brut de la ligne, sans les espaces de bord
    pub text: String,

    /// Raison du rejet
    pub reason: LineError,
}

/// Résultat du parsing d'un texte XYZ
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Points valides, dans l'ordre du texte source
    pub points: Vec<Point>,

    /// Lignes non vides rejetées, dans l'ordre du texte source
    pub skipped: Vec<SkippedLine>,

    /// Nombre total de lignes lues (vides comprises)
    pub lines_read: usize,
}

impl ParseResult {
    /// Vrai si aucune ligne n'a été rejetée
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
