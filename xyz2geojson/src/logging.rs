//! Initialisation du logging (tracing)

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Niveau de log selon la verbosité (-v, -vv) et le mode silencieux
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    }
}

/// Installe un subscriber `fmt` filtré par `RUST_LOG` et la verbosité
///
/// Sans effet si un subscriber global est déjà installé.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::from_default_env().add_directive(level_for(verbose, quiet).into());

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0, true), Level::WARN);
        assert_eq!(level_for(3, true), Level::WARN);
        assert_eq!(level_for(0, false), Level::INFO);
        assert_eq!(level_for(1, false), Level::DEBUG);
        assert_eq!(level_for(2, false), Level::TRACE);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(0, true);
        init_logging(1, false);
    }
}
