//! Puzzle front-ends built on the solver facade.
//!
//! Both front-ends consume the same textual format: a `width height`
//! header followed by `height` rows of cell characters, all
//! whitespace-separated.

pub mod hashi;
pub mod slither;

use crate::error::{Result, SolverError};

/// A rectangular character grid as read from puzzle input.
#[derive(Debug, Clone)]
pub struct PuzzleGrid {
    width: usize,
    height: usize,
    rows: Vec<String>,
}

impl PuzzleGrid {
    /// Parses `width height` followed by `height` rows of `width`
    /// characters from whitespace-separated input.
    pub fn parse(input: &str) -> Result<Self> {
        let mut tokens = input.split_whitespace();
        let width = Self::dimension(tokens.next(), "width")?;
        let height = Self::dimension(tokens.next(), "height")?;

        let mut rows = Vec::with_capacity(height);
        for index in 0..height {
            let row = tokens
                .next()
                .ok_or_else(|| {
                    SolverError::MalformedGrid(format!("expected {height} rows, got {index}"))
                })?
                .to_string();
            if row.chars().count() != width {
                return Err(SolverError::MalformedGrid(format!(
                    "row {index} has {} cells, expected {width}",
                    row.chars().count()
                ))
                .into());
            }
            rows.push(row);
        }
        Ok(Self {
            width,
            height,
            rows,
        })
    }

    fn dimension(token: Option<&str>, name: &str) -> Result<usize> {
        let token =
            token.ok_or_else(|| SolverError::MalformedGrid(format!("missing {name}")))?;
        let value: usize = token.parse().map_err(|_| {
            SolverError::MalformedGrid(format!("{name} is not a number: {token:?}"))
        })?;
        if value == 0 {
            return Err(SolverError::MalformedGrid(format!("{name} must be positive")).into());
        }
        Ok(value)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, x: usize, y: usize) -> char {
        self.rows[y].chars().nth(x).unwrap_or(' ')
    }

    /// The digit at `(x, y)`, or `None` for a non-digit cell.
    pub fn digit(&self, x: usize, y: usize) -> Option<u8> {
        self.cell(x, y).to_digit(10).map(|d| d as u8)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::SolverError;

    #[test]
    fn parses_header_and_rows() {
        let grid = PuzzleGrid::parse("3 2\n1.2\n..3\n").unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.cell(0, 0), '1');
        assert_eq!(grid.cell(1, 0), '.');
        assert_eq!(grid.digit(2, 1), Some(3));
        assert_eq!(grid.digit(0, 1), None);
    }

    #[test]
    fn any_whitespace_separates_tokens() {
        let grid = PuzzleGrid::parse("  2   2  33  33 ").unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.digit(1, 1), Some(3));
    }

    #[test]
    fn missing_rows_are_rejected() {
        let err = PuzzleGrid::parse("2 3\n33\n33\n").unwrap_err();
        assert!(matches!(err.inner(), SolverError::MalformedGrid(_)));
    }

    #[test]
    fn short_rows_are_rejected() {
        let err = PuzzleGrid::parse("3 1\n33\n").unwrap_err();
        assert!(matches!(err.inner(), SolverError::MalformedGrid(_)));
    }

    #[test]
    fn non_numeric_header_is_rejected() {
        let err = PuzzleGrid::parse("two 2\n33\n33\n").unwrap_err();
        assert!(matches!(err.inner(), SolverError::MalformedGrid(_)));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let err = PuzzleGrid::parse("0 2").unwrap_err();
        assert!(matches!(err.inner(), SolverError::MalformedGrid(_)));
    }
}
