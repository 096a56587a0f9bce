//! Rapport de conversion avec graceful degradation
//!
//! Ce module collecte les lignes ignorées et les points en échec d'une
//! conversion. Les erreurs fatales n'y figurent pas : elles sont retournées
//! sous forme de [`ConvertError`](crate::error::ConvertError).

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use xyz::SkippedLine;

/// Statut global de la conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConversionStatus {
    /// Tous les points ont été convertis
    Complete,
    /// Au moins une feature produite, avec des lignes ou points écartés
    Partial,
    /// Aucune feature produite
    Empty,
}

/// Niveau de sévérité d'un diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Donnée conservée avec dégradation
    Warning,
    /// Donnée écartée
    Error,
}

/// Nature d'un diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// Ligne XYZ invalide
    SkippedLine,
    /// Point dont la transformation a échoué
    FailedPoint,
    /// Paire de datums verticaux non supportée
    UnsupportedDatum,
}

/// Diagnostic non fatal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Niveau de sévérité
    pub level: Severity,
    /// Nature du diagnostic
    pub kind: DiagnosticKind,
    /// Numéro de ligne source (optionnel)
    pub line: Option<usize>,
    /// Message
    pub message: String,
    /// Détails supplémentaires (texte de la ligne, etc.)
    pub details: Option<String>,
}

impl Diagnostic {
    /// Diagnostic pour une ligne ignorée par le parser
    pub fn skipped_line(skipped: &SkippedLine) -> Self {
        Self {
            level: Severity::Error,
            kind: DiagnosticKind::SkippedLine,
            line: Some(skipped.line),
            message: format!("Skipped line {}: {}", skipped.line, skipped.reason),
            details: Some(skipped.text.clone()),
        }
    }

    /// Diagnostic pour un point dont la transformation a échoué
    pub fn failed_point(line: usize, reason: &str) -> Self {
        Self {
            level: Severity::Error,
            kind: DiagnosticKind::FailedPoint,
            line: Some(line),
            message: format!("Failed to transform point at line {}: {}", line, reason),
            details: None,
        }
    }

    /// Diagnostic pour une paire de datums non supportée
    pub fn unsupported_datum(source: &str, target: &str) -> Self {
        Self {
            level: Severity::Warning,
            kind: DiagnosticKind::UnsupportedDatum,
            line: None,
            message: format!(
                "Unsupported vertical datum pair {} -> {}, elevations left unchanged",
                source, target
            ),
            details: None,
        }
    }
}

/// Rapport complet de conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// CRS source
    pub from_crs: String,
    /// CRS cible
    pub to_crs: String,
    /// Moteur de reprojection utilisé
    pub reprojector: String,
    /// Durée de la conversion
    pub duration_secs: f64,
    /// Statut global
    pub status: ConversionStatus,

    /// Nombre de lignes lues (vides comprises)
    pub lines_read: usize,
    /// Nombre de points valides après parsing
    pub points_parsed: usize,
    /// Nombre de features produites
    pub features_emitted: usize,
    /// Nombre de lignes ignorées
    pub lines_skipped: usize,
    /// Nombre de points en échec de transformation
    pub points_failed: usize,

    /// Diagnostics, triés par numéro de ligne
    pub diagnostics: Vec<Diagnostic>,
}

impl ConversionReport {
    /// Crée un rapport vide pour une paire de CRS
    pub fn new(from_crs: &str, to_crs: &str) -> Self {
        Self {
            from_crs: from_crs.to_string(),
            to_crs: to_crs.to_string(),
            reprojector: String::new(),
            duration_secs: 0.0,
            status: ConversionStatus::Empty,
            lines_read: 0,
            points_parsed: 0,
            features_emitted: 0,
            lines_skipped: 0,
            points_failed: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Enregistre une ligne ignorée
    pub fn record_skipped_line(&mut self, skipped: &SkippedLine) {
        self.lines_skipped += 1;
        self.diagnostics.push(Diagnostic::skipped_line(skipped));
    }

    /// Enregistre un point en échec
    pub fn record_failed_point(&mut self, line: usize, reason: &str) {
        self.points_failed += 1;
        self.diagnostics.push(Diagnostic::failed_point(line, reason));
    }

    /// Enregistre un avertissement
    pub fn record_warning(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Définit la durée de la conversion
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final et ordonne les diagnostics
    pub fn finalize(&mut self) {
        self.diagnostics.sort_by_key(|d| d.line.unwrap_or(0));

        let has_errors = self.diagnostics.iter().any(|d| d.level == Severity::Error);

        self.status = if self.features_emitted == 0 {
            ConversionStatus::Empty
        } else if has_errors {
            ConversionStatus::Partial
        } else {
            ConversionStatus::Complete
        };
    }

    /// Lignes source citées par les diagnostics d'erreur
    pub fn error_lines(&self) -> Vec<usize> {
        self.diagnostics
            .iter()
            .filter(|d| d.level == Severity::Error)
            .filter_map(|d| d.line)
            .collect()
    }

    /// Sérialise le rapport en JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{} -> {}: {} features, {} lines skipped, {} points failed",
            self.from_crs, self.to_crs, self.features_emitted, self.lines_skipped, self.points_failed
        )
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "CONVERSION REPORT - {} -> {}", self.from_crs, self.to_crs)?;
        writeln!(f, "{}", "=".repeat(60))?;

        writeln!(f, "Status: {:?}", self.status)?;
        writeln!(f, "Reprojector: {}", self.reprojector)?;
        writeln!(f, "Duration: {:.3}s", self.duration_secs)?;
        writeln!(
            f,
            "Lines: {} read, {} points parsed, {} skipped",
            self.lines_read, self.points_parsed, self.lines_skipped
        )?;
        writeln!(
            f,
            "Points: {} emitted, {} failed",
            self.features_emitted, self.points_failed
        )?;

        if !self.diagnostics.is_empty() {
            writeln!(f, "--- DIAGNOSTICS ({}) ---", self.diagnostics.len())?;
            for d in self.diagnostics.iter().take(20) {
                writeln!(f, "  {:?} {}", d.level, d.message)?;
            }
            if self.diagnostics.len() > 20 {
                writeln!(f, "  ... and {} more", self.diagnostics.len() - 20)?;
            }
        }

        write!(f, "{}", "=".repeat(60))
    }
}
