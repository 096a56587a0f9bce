//! # xyz
//!
//! Parser pour les fichiers de points de levé au format XYZ.
//!
//! ## Format
//!
//! Un point par ligne, trois champs numériques (X, Y, Z) séparés par des
//! espaces, tabulations ou virgules. Les lignes vides sont ignorées, les
//! champs supplémentaires aussi.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let result = xyz::parse("440287.50 4431748.25 125.3\n440291.20,4431752.80,126.1");
//!
//! for point in &result.points {
//!     println!("ligne {}: {} {} {}", point.line, point.x, point.y, point.z);
//! }
//! for skipped in &result.skipped {
//!     println!("ligne {} ignorée: {}", skipped.line, skipped.reason);
//! }
//! ```

pub mod error;
pub mod parser;
pub mod types;

pub use error::LineError;
pub use parser::{parse, parse_line, tokenize};
pub use types::{ParseResult, Point, SkippedLine};
