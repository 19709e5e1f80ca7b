use core::fmt;
use std::str::FromStr;

use crate::{context::SearchContext, pathing_grid::PathingGrid, SearchError};

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;

use astar::AstarSolver;
use bfs::BreadthFirstSolver;
use dfs::DepthFirstSolver;
use dijkstra::DijkstraSolver;

/// A search strategy over a [PathingGrid].
///
/// `search` explores from `start` until `end` is visited or the frontier is exhausted. It returns
/// the cell indices in the order they were marked visited and leaves distances, visited flags
/// and predecessors in `context` for path reconstruction. The context is expected to be fresh.
pub trait GridSolver {
    fn search(
        &self,
        grid: &PathingGrid,
        context: &mut SearchContext,
        start: usize,
        end: usize,
    ) -> Vec<usize>;
}

/// The four interchangeable strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Best-first search on distance plus Manhattan distance to the end.
    AStar,
    /// Uniform-cost search.
    Dijkstra,
    BreadthFirst,
    /// Finds a path, not necessarily a shortest one.
    DepthFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::AStar,
        Algorithm::Dijkstra,
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::AStar => "astar",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::BreadthFirst => "bfs",
            Algorithm::DepthFirst => "dfs",
        }
    }

    /// Whether every path this strategy finds is a shortest one.
    pub fn is_optimal(&self) -> bool {
        !matches!(self, Algorithm::DepthFirst)
    }

    /// Runs the strategy with its default settings.
    pub fn search(
        &self,
        grid: &PathingGrid,
        context: &mut SearchContext,
        start: usize,
        end: usize,
    ) -> Vec<usize> {
        match self {
            Algorithm::AStar => AstarSolver::new().search(grid, context, start, end),
            Algorithm::Dijkstra => DijkstraSolver.search(grid, context, start, end),
            Algorithm::BreadthFirst => BreadthFirstSolver.search(grid, context, start, end),
            Algorithm::DepthFirst => DepthFirstSolver::new().search(grid, context, start, end),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Algorithm, SearchError> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SearchError::UnknownAlgorithm(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SearchContext;

    #[test]
    fn names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!("BFS".parse::<Algorithm>(), Ok(Algorithm::BreadthFirst));
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "greedy".parse::<Algorithm>(),
            Err(SearchError::UnknownAlgorithm("greedy".to_owned()))
        );
    }

    #[test]
    fn enum_dispatch_matches_solver() {
        let grid: PathingGrid = "S...\n.##.\n...E".parse().unwrap();
        let (start, end) = (grid.start_ix(), grid.end_ix());
        let mut by_enum = SearchContext::new(grid.cell_count());
        let mut by_solver = SearchContext::new(grid.cell_count());
        let a = Algorithm::DepthFirst.search(&grid, &mut by_enum, start, end);
        let b = DepthFirstSolver::new().search(&grid, &mut by_solver, start, end);
        assert_eq!(a, b);
        assert_eq!(by_enum, by_solver);
    }
}
