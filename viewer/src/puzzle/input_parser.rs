// puzzle/input_parser.rs - Raw form input → validated puzzle matrix

use super::{PuzzleError, PuzzleMatrix, Result, MAX_PUZZLE_SIZE, MIN_PUZZLE_SIZE};

/// First maximal run of ASCII digits in `raw`
pub fn first_digit_run(raw: &str) -> Option<&str> {
    let start = raw.find(|c: char| c.is_ascii_digit())?;
    let rest = &raw[start..];
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Parse the digit string for a `size`×`size` board.
///
/// Only the first run of digits counts; each digit is one cell, row-major.
pub fn parse(raw: &str, size: usize) -> Result<PuzzleMatrix> {
    let digits = first_digit_run(raw).ok_or(PuzzleError::NoDigitsFound)?;

    let actual = digits.len();
    let expected = size.checked_mul(size).ok_or(PuzzleError::SizeMismatch { expected: usize::MAX, actual })?;
    if actual != expected {
        return Err(PuzzleError::SizeMismatch { expected, actual });
    }

    let values: Vec<u32> = digits.bytes().map(|b| u32::from(b - b'0')).collect();
    let matrix = PuzzleMatrix::from_row_major(&values, size)?;
    log::debug!("parsed {size}x{size} puzzle from {} digits", digits.len());
    Ok(matrix)
}

/// Validate a requested board size from the numeric field
pub fn validate_size(requested: i64) -> Result<usize> {
    let range = MIN_PUZZLE_SIZE as i64..=MAX_PUZZLE_SIZE as i64;
    if range.contains(&requested) {
        Ok(requested as usize)
    } else {
        Err(PuzzleError::SizeOutOfRange { requested })
    }
}

/// Parse the numeric size field: a leading integer, anything else rejected
pub fn parse_size_field(raw: &str) -> Result<usize> {
    let trimmed = raw.trim();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digits_len = trimmed[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len() - sign_len);
    trimmed[..sign_len + digits_len]
        .parse::<i64>()
        .map_err(|_| PuzzleError::SizeOutOfRange { requested: 0 })
        .and_then(validate_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_by_two() {
        let m = parse("3214", 2).unwrap();
        assert_eq!(m.rows(), &[vec![3, 2], vec![1, 4]]);
    }

    #[test]
    fn test_no_digits() {
        assert_eq!(parse("abc", 4).unwrap_err(), PuzzleError::NoDigitsFound);
        assert_eq!(parse("", 4).unwrap_err(), PuzzleError::NoDigitsFound);
    }

    #[test]
    fn test_size_mismatch() {
        assert_eq!(
            parse("123", 4).unwrap_err(),
            PuzzleError::SizeMismatch { expected: 16, actual: 3 }
        );
    }

    #[test]
    fn test_only_first_run_counts() {
        // The second run would complete the board, but only the first is used.
        assert_eq!(
            parse("12341234 12341234", 4).unwrap_err(),
            PuzzleError::SizeMismatch { expected: 16, actual: 8 }
        );
        let m = parse("board: 1234432121433412 (solved)", 4).unwrap();
        assert_eq!(m, PuzzleMatrix::initial());
    }

    #[test]
    fn test_zero_digits_are_cells() {
        let m = parse("0000111122223333", 4).unwrap();
        assert_eq!(m.get(0, 0), Some(0));
        assert_eq!(m.get(3, 3), Some(3));
    }

    #[test]
    fn test_validate_size_bounds() {
        assert_eq!(validate_size(3).unwrap_err(), PuzzleError::SizeOutOfRange { requested: 3 });
        assert_eq!(validate_size(10).unwrap_err(), PuzzleError::SizeOutOfRange { requested: 10 });
        assert_eq!(validate_size(4), Ok(4));
        assert_eq!(validate_size(9), Ok(9));
    }

    #[test]
    fn test_parse_size_field() {
        assert_eq!(parse_size_field("5"), Ok(5));
        assert_eq!(parse_size_field(" 7px"), Ok(7));
        assert!(parse_size_field("").is_err());
        assert!(parse_size_field("-5").is_err());
        assert!(parse_size_field("12").is_err());
    }

    #[test]
    fn test_error_text_matches_alerts() {
        assert_eq!(PuzzleError::NoDigitsFound.to_string(), "No matching numbers found");
        assert_eq!(
            PuzzleError::SizeMismatch { expected: 16, actual: 3 }.to_string(),
            "Input Size different: 3"
        );
        assert_eq!(
            PuzzleError::SizeOutOfRange { requested: 10 }.to_string(),
            "Puzzle size must be range 4 ~ 9"
        );
    }

    #[test]
    fn test_huge_size_is_a_mismatch_not_an_overflow() {
        assert_eq!(
            parse("1234", usize::MAX).unwrap_err(),
            PuzzleError::SizeMismatch { expected: usize::MAX, actual: 4 }
        );
        assert!(matches!(parse("1", 1 << 40), Err(PuzzleError::SizeMismatch { actual: 1, .. })));
    }
}
