use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use log::warn;

use crate::context::{SearchContext, UNREACHED};
use crate::{pathing_grid::PathingGrid, solver::GridSolver};

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Best-first search on `distance + heuristic`. With the default factor of 1.0 the Manhattan
/// heuristic is admissible and consistent on a 4-connected unit-cost grid, so the path found is
/// a shortest one.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic_factor: f32,
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }

    /// Manhattan distance between two cells times the heuristic factor.
    pub fn heuristic(&self, grid: &PathingGrid, ix: usize, end: usize) -> usize {
        let (p1, p2) = (grid.point_of(ix), grid.point_of(end));
        let manhattan = (p1.x - p2.x).unsigned_abs() + (p1.y - p2.y).unsigned_abs();
        (manhattan as f32 * self.heuristic_factor) as usize
    }
}

impl GridSolver for AstarSolver {
    fn search(
        &self,
        grid: &PathingGrid,
        context: &mut SearchContext,
        start: usize,
        end: usize,
    ) -> Vec<usize> {
        let limit = grid.cell_count();
        let mut visited_order = Vec::new();
        // New cells join at the back. A stable sort by f before every selection keeps equal f
        // values in the order left by the previous selection, so a cell whose distance improves
        // moves without losing its place among its new ties.
        let mut open = FxIndexSet::default();
        context.distance[start] = 0;
        open.insert(start);
        while !open.is_empty() {
            if visited_order.len() >= limit {
                warn!("A* stopped after {} expansions", limit);
                break;
            }
            let f = |ix: usize| context.distance[ix].saturating_add(self.heuristic(grid, ix, end));
            open.sort_by(|&a, &b| f(a).cmp(&f(b)));
            let Some(current) = open.shift_remove_index(0) else {
                break;
            };
            if grid.is_wall_ix(current) {
                continue;
            }
            if context.distance[current] == UNREACHED {
                break;
            }
            context.visited[current] = true;
            visited_order.push(current);
            if current == end {
                break;
            }
            let tentative = context.distance[current] + 1;
            for n in grid.neighbour_indices(current) {
                // Closed cells only improve under an inconsistent (scaled) heuristic
                if context.visited[n] {
                    continue;
                }
                if tentative < context.distance[n] {
                    context.distance[n] = tentative;
                    context.previous[n] = Some(current);
                    open.insert(n);
                }
            }
        }
        visited_order
    }
}
