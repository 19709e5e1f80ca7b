//! # grid_search
//!
//! Exploration order and path reconstruction on a fixed-size grid with walls, for four
//! interchangeable strategies: [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic,
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm),
//! breadth-first search and depth-first search. Movement is 4-directional and every step costs
//! one.
//!
//! A run returns the cells in the order the strategy visited them together with the path from
//! start to end, so that a front end can replay the exploration at whatever pace it likes.
//!
//! ```
//! use grid_search::{Algorithm, PathingGrid};
//!
//! let grid: PathingGrid = "S.#.\n..#.\n...E".parse().unwrap();
//! let result = grid.run(Algorithm::AStar);
//! assert_eq!(result.path_length(), 6);
//! ```
pub mod config;
pub mod context;
pub mod error;
pub mod path;
pub mod pathing_grid;
pub mod run;
pub mod solver;

pub use config::GridConfig;
pub use context::{SearchContext, UNREACHED};
pub use error::SearchError;
pub use path::reconstruct_path;
pub use pathing_grid::PathingGrid;
pub use run::{run, run_all, run_named, SearchResult, Step};
pub use solver::{Algorithm, GridSolver};

/// Rows of the default grid.
pub const DEFAULT_ROWS: usize = 20;
/// Columns of the default grid.
pub const DEFAULT_COLS: usize = 40;
/// Start cell of the default grid as (row, column).
pub const DEFAULT_START: (i32, i32) = (10, 5);
/// End cell of the default grid as (row, column).
pub const DEFAULT_END: (i32, i32) = (10, 35);
/// Share of cells turned into walls by a generated maze.
pub const DEFAULT_WALL_DENSITY: f64 = 0.3;

/// At most four neighbours on a 4-connected grid.
pub const N_SMALLVEC_SIZE: usize = 4;
