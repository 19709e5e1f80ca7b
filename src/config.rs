use grid_util::point::Point;

use crate::{SearchError, DEFAULT_COLS, DEFAULT_END, DEFAULT_ROWS, DEFAULT_START};

/// Dimensions and fixed endpoints of a [PathingGrid](crate::PathingGrid).
///
/// Points use `x` for the column and `y` for the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub start: Point,
    pub end: Point,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            start: Point::new(DEFAULT_START.1, DEFAULT_START.0),
            end: Point::new(DEFAULT_END.1, DEFAULT_END.0),
        }
    }
}

impl GridConfig {
    pub fn new(rows: usize, cols: usize, start: Point, end: Point) -> GridConfig {
        GridConfig {
            rows,
            cols,
            start,
            end,
        }
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.cols
            && (point.y as usize) < self.rows
    }

    /// Checks that the grid is non-empty and addressable, that both endpoints are inside it and
    /// that they differ.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SearchError::EmptyGrid);
        }
        // Coordinates are stored as i32 in a Point
        if self.rows.checked_mul(self.cols).is_none()
            || i32::try_from(self.rows).is_err()
            || i32::try_from(self.cols).is_err()
        {
            return Err(SearchError::TooLarge {
                rows: self.rows,
                cols: self.cols,
            });
        }
        for point in [self.start, self.end] {
            if !self.contains(&point) {
                return Err(SearchError::OutOfBounds {
                    point,
                    rows: self.rows,
                    cols: self.cols,
                });
            }
        }
        if self.start == self.end {
            return Err(SearchError::StartIsEnd(self.start));
        }
        Ok(())
    }
}
