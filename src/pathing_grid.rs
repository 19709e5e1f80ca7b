use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;
use itertools::Itertools;
use log::debug;
use petgraph::unionfind::UnionFind;
use rand::Rng;
use smallvec::SmallVec;

use crate::run::SearchResult;
use crate::{GridConfig, SearchError, N_SMALLVEC_SIZE};

/// [PathingGrid] holds the static part of the search problem: a fixed `rows` x `cols` grid of
/// cells that are either open or blocked by a wall, together with one start and one end cell
/// that never become walls. It also maintains the connected components of the open cells in a
/// [UnionFind] structure so that reachability can be answered without searching.
///
/// Points use `x` for the column and `y` for the row. Cells are stored row-major, so the flat
/// index of a point is `y * cols + x`.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    rows: usize,
    cols: usize,
    walls: Vec<bool>,
    start: Point,
    end: Point,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid::build(&GridConfig::default())
    }
}

impl PathingGrid {
    /// Creates a wall-free grid. Fails if the grid is empty, if start or end lie outside of it or
    /// if they are the same cell.
    pub fn new(
        rows: usize,
        cols: usize,
        start: Point,
        end: Point,
    ) -> Result<PathingGrid, SearchError> {
        PathingGrid::from_config(&GridConfig::new(rows, cols, start, end))
    }

    pub fn from_config(config: &GridConfig) -> Result<PathingGrid, SearchError> {
        config.validate()?;
        Ok(PathingGrid::build(config))
    }

    fn build(config: &GridConfig) -> PathingGrid {
        let cell_count = config.rows * config.cols;
        let mut grid = PathingGrid {
            rows: config.rows,
            cols: config.cols,
            walls: vec![false; cell_count],
            start: config.start,
            end: config.end,
            components: UnionFind::new(cell_count),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    pub fn config(&self) -> GridConfig {
        GridConfig::new(self.rows, self.cols, self.start, self.end)
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn cell_count(&self) -> usize {
        self.walls.len()
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn end(&self) -> Point {
        self.end
    }
    pub(crate) fn start_ix(&self) -> usize {
        self.ix(&self.start)
    }
    pub(crate) fn end_ix(&self) -> usize {
        self.ix(&self.end)
    }

    pub fn in_bounds(&self, point: &Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.cols
            && (point.y as usize) < self.rows
    }
    /// Unchecked conversion, callers guarantee the point is in bounds.
    fn ix(&self, point: &Point) -> usize {
        point.y as usize * self.cols + point.x as usize
    }
    /// Flat index of a point, [None] if it lies outside the grid.
    pub fn ix_of(&self, point: &Point) -> Option<usize> {
        self.in_bounds(point).then(|| self.ix(point))
    }
    pub fn point_of(&self, ix: usize) -> Point {
        Point::new((ix % self.cols) as i32, (ix / self.cols) as i32)
    }

    pub fn is_wall(&self, point: &Point) -> bool {
        self.ix_of(point).is_some_and(|ix| self.walls[ix])
    }
    pub(crate) fn is_wall_ix(&self, ix: usize) -> bool {
        self.walls[ix]
    }
    pub fn is_start(&self, point: &Point) -> bool {
        *point == self.start
    }
    pub fn is_end(&self, point: &Point) -> bool {
        *point == self.end
    }
    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|&&w| w).count()
    }

    /// The open cells adjacent to `ix`, always in the order up, down, left, right. The order
    /// decides tie-breaking and therefore the exact visitation order of every search.
    pub fn neighbour_indices(&self, ix: usize) -> SmallVec<[usize; N_SMALLVEC_SIZE]> {
        let (row, col) = (ix / self.cols, ix % self.cols);
        let mut neighbours = SmallVec::<[usize; N_SMALLVEC_SIZE]>::new();
        if row > 0 {
            neighbours.push(ix - self.cols);
        }
        if row + 1 < self.rows {
            neighbours.push(ix + self.cols);
        }
        if col > 0 {
            neighbours.push(ix - 1);
        }
        if col + 1 < self.cols {
            neighbours.push(ix + 1);
        }
        neighbours.retain(|n| !self.walls[*n]);
        neighbours
    }
    /// Point based version of [neighbour_indices](Self::neighbour_indices). Empty for points
    /// outside the grid.
    pub fn neighbours(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        match self.ix_of(point) {
            Some(ix) => self
                .neighbour_indices(ix)
                .into_iter()
                .map(|n| self.point_of(n))
                .collect(),
            None => SmallVec::new(),
        }
    }

    fn editable_ix(&self, point: &Point) -> Result<usize, SearchError> {
        let ix = self.ix_of(point).ok_or(SearchError::OutOfBounds {
            point: *point,
            rows: self.rows,
            cols: self.cols,
        })?;
        if self.is_start(point) || self.is_end(point) {
            return Err(SearchError::ProtectedCell(*point));
        }
        Ok(ix)
    }

    /// Places or removes a wall. Joins newly connected components and flags the components as
    /// dirty if they are (potentially) broken apart into multiple.
    pub fn set_wall(&mut self, point: Point, blocked: bool) -> Result<(), SearchError> {
        let ix = self.editable_ix(&point)?;
        if self.walls[ix] == blocked {
            return Ok(());
        }
        debug!("Setting wall at {} to {}", point, blocked);
        if blocked {
            self.components_dirty = true;
        } else {
            for n in self.neighbour_indices(ix) {
                self.components.union(ix, n);
            }
        }
        self.walls[ix] = blocked;
        Ok(())
    }

    /// Flips the wall state of a cell and returns the new state.
    pub fn toggle_wall(&mut self, point: Point) -> Result<bool, SearchError> {
        let blocked = !self.is_wall(&point);
        self.set_wall(point, blocked)?;
        Ok(blocked)
    }

    pub fn clear_walls(&mut self) {
        debug!("Clearing all walls");
        self.walls.fill(false);
        self.generate_components();
    }

    /// Replaces every wall: each cell other than start and end independently becomes a wall with
    /// probability `density`.
    pub fn generate_maze<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        density: f64,
    ) -> Result<(), SearchError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(SearchError::InvalidDensity(density));
        }
        let (start_ix, end_ix) = (self.start_ix(), self.end_ix());
        for (ix, wall) in self.walls.iter_mut().enumerate() {
            *wall = ix != start_ix && ix != end_ix && rng.gen_bool(density);
        }
        debug!(
            "Generated maze with {} walls at density {}",
            self.wall_count(),
            density
        );
        self.generate_components();
        Ok(())
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.ix_of(point).map(|ix| self.components.find(ix))
    }
    /// Checks if start and goal are on the same component. Components must be current, see
    /// [update](Self::update).
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.ix_of(start), self.ix_of(goal)) {
            (Some(start_ix), Some(goal_ix)) => {
                !self.walls[start_ix]
                    && !self.walls[goal_ix]
                    && self.components.equiv(start_ix, goal_ix)
            }
            _ => false,
        }
    }
    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open neighbours to the same components.
    pub fn generate_components(&mut self) {
        debug!("Generating connected components");
        self.components = UnionFind::new(self.cell_count());
        self.components_dirty = false;
        for ix in 0..self.cell_count() {
            if self.walls[ix] {
                continue;
            }
            // Linking downwards and rightwards covers every edge once
            let (row, col) = (ix / self.cols, ix % self.cols);
            if row + 1 < self.rows && !self.walls[ix + self.cols] {
                self.components.union(ix, ix + self.cols);
            }
            if col + 1 < self.cols && !self.walls[ix + 1] {
                self.components.union(ix, ix + 1);
            }
        }
    }

    fn cell_char(&self, ix: usize) -> char {
        let point = self.point_of(ix);
        if self.is_start(&point) {
            'S'
        } else if self.is_end(&point) {
            'E'
        } else if self.walls[ix] {
            '#'
        } else {
            '.'
        }
    }

    /// Draws the grid with the cells visited by `result` as `o` and its path as `*`.
    pub fn render(&self, result: &SearchResult) -> String {
        let mut chars = (0..self.cell_count())
            .map(|ix| self.cell_char(ix))
            .collect::<Vec<char>>();
        for (marks, mark) in [(&result.visited, 'o'), (&result.path, '*')] {
            for point in marks.iter() {
                if let Some(ix) = self.ix_of(point) {
                    if chars[ix] == '.' || chars[ix] == 'o' {
                        chars[ix] = mark;
                    }
                }
            }
        }
        chars
            .chunks(self.cols)
            .map(|row| row.iter().collect::<String>())
            .join("\n")
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            let line = (0..self.cols)
                .map(|col| self.cell_char(row * self.cols + col))
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses a map made of `.` (open), `#` (wall), `S` (start) and `E` (end), one line per row.
/// Blank lines and surrounding whitespace are ignored.
impl FromStr for PathingGrid {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<PathingGrid, SearchError> {
        let lines = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<&str>>();
        let cols = lines.first().ok_or(SearchError::EmptyGrid)?.chars().count();
        let mut walls = Vec::with_capacity(lines.len() * cols);
        let mut start = None;
        let mut end = None;
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != cols {
                return Err(SearchError::InvalidMap(format!(
                    "row {row} has {width} cells, expected {cols}"
                )));
            }
            for (col, c) in line.chars().enumerate() {
                let point = Point::new(col as i32, row as i32);
                let slot = match c {
                    '.' | '#' => None,
                    'S' => Some((&mut start, "start")),
                    'E' => Some((&mut end, "end")),
                    other => {
                        return Err(SearchError::InvalidMap(format!(
                            "unexpected character {other:?} at row {row}, column {col}"
                        )))
                    }
                };
                if let Some((slot, name)) = slot {
                    if slot.replace(point).is_some() {
                        return Err(SearchError::InvalidMap(format!(
                            "more than one {name} cell"
                        )));
                    }
                }
                walls.push(c == '#');
            }
        }
        let start =
            start.ok_or_else(|| SearchError::InvalidMap("missing start cell 'S'".to_owned()))?;
        let end = end.ok_or_else(|| SearchError::InvalidMap("missing end cell 'E'".to_owned()))?;
        let mut grid = PathingGrid::new(lines.len(), cols, start, end)?;
        grid.walls = walls;
        grid.generate_components();
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn open_grid(rows: usize, cols: usize) -> PathingGrid {
        PathingGrid::new(
            rows,
            cols,
            Point::new(0, 0),
            Point::new(cols as i32 - 1, rows as i32 - 1),
        )
        .unwrap()
    }

    #[test]
    fn neighbours_are_up_down_left_right() {
        let grid = open_grid(3, 3);
        let neighbours = grid.neighbours(&Point::new(1, 1));
        assert_eq!(
            neighbours.as_slice(),
            &[
                Point::new(1, 0),
                Point::new(1, 2),
                Point::new(0, 1),
                Point::new(2, 1)
            ]
        );
    }

    #[test]
    fn neighbours_respect_bounds_and_walls() {
        //  ___
        // |S# |
        // |   |
        // |  E|
        //  ___
        let mut grid = open_grid(3, 3);
        grid.set_wall(Point::new(1, 0), true).unwrap();
        assert_eq!(grid.neighbours(&Point::new(0, 0)).as_slice(), &[Point::new(0, 1)]);
        assert_eq!(grid.neighbours(&Point::new(2, 2)).len(), 2);
        assert!(grid.neighbours(&Point::new(-1, 0)).is_empty());
        assert!(grid.neighbours(&Point::new(0, 3)).is_empty());
    }

    #[test]
    fn start_and_end_are_protected() {
        let mut grid = open_grid(2, 2);
        assert_eq!(
            grid.set_wall(Point::new(0, 0), true),
            Err(SearchError::ProtectedCell(Point::new(0, 0)))
        );
        assert!(grid.toggle_wall(Point::new(1, 1)).is_err());
        assert!(matches!(
            grid.set_wall(Point::new(2, 0), true),
            Err(SearchError::OutOfBounds { .. })
        ));
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn toggle_flips_wall() {
        let mut grid = open_grid(2, 2);
        let p = Point::new(1, 0);
        assert!(grid.toggle_wall(p).unwrap());
        assert!(grid.is_wall(&p));
        assert!(!grid.toggle_wall(p).unwrap());
        assert!(!grid.is_wall(&p));
    }

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        //  ___
        // |S# |
        // | #E|
        //  ___
        let grid: PathingGrid = "S#.\n.#E".parse().unwrap();
        let p1 = Point::new(0, 0);
        let p2 = Point::new(0, 1);
        let p3 = Point::new(2, 0);
        assert!(grid.reachable(&p1, &p2));
        assert!(grid.unreachable(&p1, &p3));
        assert!(grid.reachable(&p3, &grid.end()));
        assert!(grid.unreachable(&p1, &Point::new(1, 0)));
        assert!(grid.unreachable(&p1, &Point::new(5, 5)));
    }

    #[test]
    fn components_follow_edits() {
        let mut grid: PathingGrid = "S#.\n.#E".parse().unwrap();
        let (start, end) = (grid.start(), grid.end());
        assert!(grid.unreachable(&start, &end));
        grid.set_wall(Point::new(1, 1), false).unwrap();
        assert!(!grid.components_dirty);
        assert!(grid.reachable(&start, &end));
        grid.set_wall(Point::new(1, 1), true).unwrap();
        assert!(grid.components_dirty);
        grid.update();
        assert!(grid.unreachable(&start, &end));
    }

    #[test]
    fn parse_and_display_round_trip() {
        let map = "S..#\n.#..\n...E\n";
        let grid: PathingGrid = map.parse().unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.start(), Point::new(0, 0));
        assert_eq!(grid.end(), Point::new(3, 2));
        assert_eq!(grid.wall_count(), 2);
        assert_eq!(grid.to_string(), map);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            "S..\n..".parse::<PathingGrid>(),
            Err(SearchError::InvalidMap(_))
        ));
        assert!(matches!(
            "S.x\n..E".parse::<PathingGrid>(),
            Err(SearchError::InvalidMap(_))
        ));
        assert!(matches!(
            "S.S\n..E".parse::<PathingGrid>(),
            Err(SearchError::InvalidMap(_))
        ));
        assert!(matches!(
            "S..\n...".parse::<PathingGrid>(),
            Err(SearchError::InvalidMap(_))
        ));
        assert_eq!("\n  \n".parse::<PathingGrid>().unwrap_err(), SearchError::EmptyGrid);
    }

    #[test]
    fn maze_density_extremes() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut grid = PathingGrid::default();
        grid.generate_maze(&mut rng, 1.0).unwrap();
        assert_eq!(grid.wall_count(), grid.cell_count() - 2);
        assert!(!grid.is_wall(&grid.start()) && !grid.is_wall(&grid.end()));
        grid.generate_maze(&mut rng, 0.0).unwrap();
        assert_eq!(grid.wall_count(), 0);
        assert_eq!(
            grid.generate_maze(&mut rng, 1.5),
            Err(SearchError::InvalidDensity(1.5))
        );
        grid.generate_maze(&mut rng, 0.3).unwrap();
        grid.clear_walls();
        assert_eq!(grid.wall_count(), 0);
    }
}
