//! Parser pour les enregistrements XYZ (une ligne = un point)

use tracing::warn;

use crate::types::{ParseResult, Point, SkippedLine};
use crate::LineError;

/// Nombre minimal de champs par ligne (X, Y, Z)
pub const MIN_FIELDS: usize = 3;

/// Séparateur de champs : espace, tabulation ou virgule
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | ',')
}

/// Découpe une ligne en champs
///
/// Une suite de séparateurs compte comme un seul séparateur, et les
/// séparateurs de bord ne produisent pas de champ vide.
pub fn tokenize(line: &str) -> impl Iterator<Item = &str> {
    line.split(is_separator).filter(|token| !token.is_empty())
}

/// Parse un champ en nombre flottant fini
fn parse_number(token: &str) -> Result<f64, LineError> {
    let value = fast_float::parse::<f64, _>(token).map_err(|_| LineError::invalid_number(token))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(LineError::non_finite(token))
    }
}

/// Parse une ligne XYZ
///
/// Retourne `Ok(None)` pour une ligne vide. Les champs au-delà du troisième
/// doivent être numériques mais ne sont pas conservés.
pub fn parse_line(line_number: usize, line: &str) -> Result<Option<Point>, LineError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let mut coords = [0.0_f64; MIN_FIELDS];
    let mut found = 0;

    for token in tokenize(trimmed) {
        let value = parse_number(token)?;
        if found < MIN_FIELDS {
            coords[found] = value;
        }
        found += 1;
    }

    if found < MIN_FIELDS {
        return Err(LineError::TooFewFields { found });
    }

    let [x, y, z] = coords;
    Ok(Some(Point::new(x, y, z, line_number)))
}

/// Parse un texte XYZ complet
///
/// N'échoue jamais : chaque ligne invalide est journalisée puis ajoutée à
/// `ParseResult::skipped`.
pub fn parse(text: &str) -> ParseResult {
    let mut result = ParseResult::default();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        result.lines_read = line_number;

        match parse_line(line_number, line) {
            Ok(Some(point)) => result.points.push(point),
            Ok(None) => {}
            Err(reason) => {
                let trimmed = line.trim();
                warn!(line = line_number, text = %trimmed, reason = %reason, "Skipping invalid line");
                result.skipped.push(SkippedLine {
                    line: line_number,
                    text: trimmed.to_string(),
                    reason,
                });
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_mixed_separators() {
        let tokens: Vec<&str> = tokenize(",1.5 ,\t2.5,,3.5 ,").collect();
        assert_eq!(tokens, vec!["1.5", "2.5", "3.5"]);
    }

    #[test]
    fn test_other_whitespace_is_not_a_separator() {
        assert_eq!(tokenize("1\u{0B}2\u{0B}3").count(), 1);
        assert_eq!(tokenize("4\u{A0}5\u{A0}6").count(), 1);

        let result = parse("1\u{0B}2\u{0B}3\n4\u{A0}5\u{A0}6\n7 8 9");
        let lines: Vec<usize> = result.points.iter().map(|p| p.line).collect();
        assert_eq!(lines, vec![3]);
        assert_eq!(result.skipped.len(), 2);
    }

    #[test]
    fn test_parse_line_space_separated() {
        let point = parse_line(4, "440287.50 4431748.25 125.3").unwrap().unwrap();
        assert_eq!(point.x, 440287.50);
        assert_eq!(point.y, 4431748.25);
        assert_eq!(point.z, 125.3);
        assert_eq!(point.line, 4);
    }

    #[test]
    fn test_parse_line_comma_and_tab() {
        let point = parse_line(1, "1.0,\t2.0 , 3.0").unwrap().unwrap();
        assert_eq!((point.x, point.y, point.z), (1.0, 2.0, 3.0));
    }

    #[test]
    fn test_parse_line_extra_fields_ignored() {
        let point = parse_line(1, "1 2 3 4 5").unwrap().unwrap();
        assert_eq!((point.x, point.y, point.z), (1.0, 2.0, 3.0));
    }

    #[test]
    fn test_parse_line_scientific_and_negative() {
        let point = parse_line(1, "-1.5e3 2E-2 7").unwrap().unwrap();
        assert_eq!((point.x, point.y, point.z), (-1500.0, 0.02, 7.0));
    }

    #[test]
    fn test_parse_line_blank() {
        assert_eq!(parse_line(1, "   \t ").unwrap(), None);
    }

    #[test]
    fn test_parse_line_too_few_fields() {
        assert_eq!(
            parse_line(1, "1.0 2.0"),
            Err(LineError::TooFewFields { found: 2 })
        );
    }

    #[test]
    fn test_parse_line_invalid_number() {
        assert_eq!(
            parse_line(1, "not a number 125.3"),
            Err(LineError::invalid_number("not"))
        );
    }

    #[test]
    fn test_parse_line_invalid_extra_field() {
        assert!(matches!(
            parse_line(1, "1 2 3 abc"),
            Err(LineError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_parse_line_rejects_nan_and_inf() {
        assert_eq!(parse_line(1, "NaN 2 3"), Err(LineError::non_finite("NaN")));
        assert_eq!(parse_line(1, "1 inf 3"), Err(LineError::non_finite("inf")));
        assert_eq!(
            parse_line(1, "1 2 -infinity"),
            Err(LineError::non_finite("-infinity"))
        );
    }

    #[test]
    fn test_parse_keeps_line_numbers() {
        let text = "1 2 3\n\n   \nbad line\n4 5 6\r\n7,8,9";
        let result = parse(text);

        let lines: Vec<usize> = result.points.iter().map(|p| p.line).collect();
        assert_eq!(lines, vec![1, 5, 6]);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].line, 4);
        assert_eq!(result.skipped[0].text, "bad line");
        assert_eq!(result.lines_read, 6);
    }

    #[test]
    fn test_parse_empty_text() {
        let result = parse("");
        assert!(result.points.is_empty());
        assert!(result.is_clean());
        assert_eq!(result.lines_read, 0);
    }
}
