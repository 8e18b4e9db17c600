//! Line reading and integer parsing helpers.

use std::fmt::Display;
use std::str::FromStr;

use aoc_solver::{ParseError, SolveError};

/// Wrap anything displayable as [`ParseError::InvalidFormat`].
pub fn invalid_format(err: impl Display) -> ParseError {
    ParseError::InvalidFormat(err.to_string())
}

/// Wrap anything displayable as [`SolveError::SolveFailed`].
pub fn solve_failed(err: impl Display) -> SolveError {
    SolveError::SolveFailed(err.to_string().into())
}

/// Non-blank lines of the input.
pub fn lines(input: &str) -> impl Iterator<Item = &str> {
    input.lines().filter(|line| !line.trim().is_empty())
}

/// Splits at the first blank line: the text before it and everything after.
///
/// A line holding only whitespace counts as blank, so `\r\n` input splits
/// the same way as `\n` input.
pub fn sections(input: &str) -> Option<(&str, &str)> {
    let mut start = 0;
    for line in input.split_inclusive('\n') {
        let end = start + line.len();
        if line.trim().is_empty() {
            return Some((input[..start].trim_end(), &input[end..]));
        }
        start = end;
    }
    None
}

/// Blank-line separated sections of the input.
pub fn blocks(input: &str) -> impl Iterator<Item = &str> {
    let mut rest = input;
    std::iter::from_fn(move || loop {
        if rest.trim().is_empty() {
            return None;
        }
        let (block, tail) = sections(rest).unwrap_or((rest.trim_end(), ""));
        rest = tail;
        if !block.is_empty() {
            return Some(block);
        }
    })
}

/// Parse every non-blank line with `f`.
///
/// Failures become [`ParseError::Line`] with the 1-based line number.
pub fn parse_lines<'a, T, F>(input: &'a str, mut f: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&'a str) -> anyhow::Result<T>,
{
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_idx, line)| f(line).map_err(|e| ParseError::at_line(line_idx + 1, e)))
        .collect()
}

/// Every integer appearing in `s`, in order.
///
/// A `-` counts as a sign only when it directly precedes a digit and does not
/// follow one, so `3-5` yields `[3, 5]` while `v=3,-3` yields `[3, -3]`.
pub fn ints<T>(s: &str) -> Result<Vec<T>, ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    let bytes = s.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let is_sign = bytes[i] == b'-'
            && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
            && (i == 0 || !bytes[i - 1].is_ascii_digit());
        if bytes[i].is_ascii_digit() || is_sign {
            let start = i;
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let token = &s[start..i];
            let value = token
                .parse::<T>()
                .map_err(|e| invalid_format(format!("{:?}: {}", token, e)))?;
            out.push(value);
        } else {
            i += 1;
        }
    }
    Ok(out)
}

/// Exactly `N` integers from `s`.
pub fn ints_exact<T, const N: usize>(s: &str) -> Result<[T; N], ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    let values = ints::<T>(s)?;
    let found = values.len();
    values
        .try_into()
        .map_err(|_| invalid_format(format!("expected {} numbers in {:?}, found {}", N, s, found)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ints_signs_and_ranges() {
        assert_eq!(ints::<i64>("p=0,4 v=3,-3").unwrap(), vec![0, 4, 3, -3]);
        assert_eq!(ints::<u64>("3-5").unwrap(), vec![3, 5]);
        assert_eq!(ints::<i32>("Button A: X+94, Y+34").unwrap(), vec![94, 34]);
        assert!(ints::<i32>("no digits").unwrap().is_empty());
    }

    #[test]
    fn test_ints_overflow_is_an_error() {
        assert!(ints::<u8>("300").is_err());
    }

    #[test]
    fn test_ints_exact_count_mismatch() {
        assert_eq!(ints_exact::<i32, 2>("1,2").unwrap(), [1, 2]);
        assert!(ints_exact::<i32, 3>("1,2").is_err());
    }

    #[test]
    fn test_parse_lines_reports_line_numbers() {
        let err = parse_lines("1\n\nx\n", |l| Ok(l.parse::<u32>()?)).unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_blocks_split_on_blank_lines() {
        let parts: Vec<&str> = blocks("a\nb\n\nc\n\n\nd\n").collect();
        assert_eq!(parts, vec!["a\nb", "c", "d"]);
    }

    #[test]
    fn test_blocks_accept_crlf() {
        let parts: Vec<&str> = blocks("a\r\nb\r\n\r\nc\r\n\r\n").collect();
        assert_eq!(parts, vec!["a\r\nb", "c"]);
        assert_eq!(parts[0].lines().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_sections_split_at_first_blank_line() {
        assert_eq!(sections("x\ny\n\nz\n\nw\n"), Some(("x\ny", "z\n\nw\n")));
        assert_eq!(sections("x\r\n\r\ny\r\n"), Some(("x", "y\r\n")));
        assert_eq!(sections("x\n  \ny"), Some(("x", "y")));
        assert_eq!(sections("x\ny\n"), None);
    }

    proptest! {
        #[test]
        fn prop_ints_recovers_joined_numbers(values in prop::collection::vec(-10_000i64..10_000, 0..20)) {
            let text = values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ");
            prop_assert_eq!(ints::<i64>(&text).unwrap(), values);
        }
    }
}
