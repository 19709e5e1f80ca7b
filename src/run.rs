use grid_util::point::Point;
use itertools::Itertools;
use log::info;

use crate::context::SearchContext;
use crate::path::reconstruct_path;
use crate::{Algorithm, PathingGrid, SearchError};

/// Everything a run produces: the cells in the order they were visited and the path from start
/// to end, empty if the end could not be reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub algorithm: Algorithm,
    pub visited: Vec<Point>,
    pub path: Vec<Point>,
    context: SearchContext,
    cols: usize,
}

/// One frame of a playback: first every visited cell, then every path cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Visit(Point),
    Path(Point),
}

impl SearchResult {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
    /// Number of cells on the path, start and end included.
    pub fn path_length(&self) -> usize {
        self.path.len()
    }
    /// The run-scoped cell state left behind by the search.
    pub fn context(&self) -> &SearchContext {
        &self.context
    }
    /// Distance from the start recorded for `point`. Depth-first search records none.
    pub fn distance(&self, point: &Point) -> Option<usize> {
        if point.x < 0 || point.y < 0 || point.x as usize >= self.cols {
            return None;
        }
        self.context
            .distance(point.y as usize * self.cols + point.x as usize)
    }
    /// Visited cells followed by path cells, for a caller-driven animation.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.visited
            .iter()
            .map(|&p| Step::Visit(p))
            .chain(self.path.iter().map(|&p| Step::Path(p)))
    }
}

/// Runs `algorithm` on a fresh [SearchContext] and reconstructs the path to the end cell.
pub fn run(grid: &PathingGrid, algorithm: Algorithm) -> SearchResult {
    let mut context = SearchContext::new(grid.cell_count());
    let (start, end) = (grid.start_ix(), grid.end_ix());
    let order = algorithm.search(grid, &mut context, start, end);
    let path = reconstruct_path(&context, end);
    debug_assert!(order.iter().all_unique());
    debug_assert!(path
        .iter()
        .tuple_windows()
        .all(|(&a, &b)| grid.neighbour_indices(a).contains(&b)));
    let to_points = |ixs: Vec<usize>| {
        ixs.into_iter()
            .map(|ix| grid.point_of(ix))
            .collect::<Vec<Point>>()
    };
    let result = SearchResult {
        algorithm,
        visited: to_points(order),
        path: to_points(path),
        context,
        cols: grid.cols(),
    };
    if result.found() {
        info!(
            "{}: visited {} cells, path of {} cells from {} to {}",
            algorithm,
            result.visited_count(),
            result.path_length(),
            grid.start(),
            grid.end()
        );
    } else {
        info!(
            "{}: visited {} cells, {} is not reachable from {}",
            algorithm,
            result.visited_count(),
            grid.end(),
            grid.start()
        );
    }
    result
}

/// Like [run], selecting the algorithm by name (`astar`, `dijkstra`, `bfs` or `dfs`).
pub fn run_named(grid: &PathingGrid, name: &str) -> Result<SearchResult, SearchError> {
    let algorithm = name.parse::<Algorithm>()?;
    Ok(run(grid, algorithm))
}

/// Runs every algorithm on the same grid.
pub fn run_all(grid: &PathingGrid) -> Vec<SearchResult> {
    Algorithm::ALL
        .into_iter()
        .map(|algorithm| run(grid, algorithm))
        .collect()
}

impl PathingGrid {
    pub fn run(&self, algorithm: Algorithm) -> SearchResult {
        run(self, algorithm)
    }
}
