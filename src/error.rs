use grid_util::point::Point;
use thiserror::Error;

/// Errors raised while building or editing a grid, or while selecting an algorithm.
///
/// An unreachable end cell is not an error: a run simply returns an empty path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The grid was given zero rows or zero columns.
    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    /// The cell count overflows, or a coordinate does not fit a [Point].
    #[error("a {rows}x{cols} grid is too large")]
    TooLarge {
        /// Requested number of rows
        rows: usize,
        /// Requested number of columns
        cols: usize,
    },

    /// A point lies outside the grid.
    #[error("{point} lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// Offending point (x is the column, y the row)
        point: Point,
        /// Number of rows of the grid
        rows: usize,
        /// Number of columns of the grid
        cols: usize,
    },

    /// Start and end were given the same cell.
    #[error("start and end must be different cells, both are {0}")]
    StartIsEnd(Point),

    /// The start and end cells can never become walls.
    #[error("{0} is the start or end cell and cannot be edited")]
    ProtectedCell(Point),

    /// The algorithm name is not one of `astar`, `dijkstra`, `bfs` or `dfs`.
    #[error("unknown algorithm {0:?}")]
    UnknownAlgorithm(String),

    /// Wall density must be a probability.
    #[error("wall density {0} is not within [0, 1]")]
    InvalidDensity(f64),

    /// A text map could not be parsed.
    #[error("invalid map: {0}")]
    InvalidMap(String),
}
