use log::warn;

use crate::context::SearchContext;
use crate::{pathing_grid::PathingGrid, solver::GridSolver};

/// Depth-first search with an explicit stack.
///
/// Cells are marked visited when popped, so a cell can be on the stack several times; stale
/// copies are skipped. The predecessor of a cell is set on every push, which means it ends up as
/// the cell that pushed it last before it was popped. The path found is therefore the most
/// recently discovered route, not necessarily a shortest one.
#[derive(Clone, Debug, Default)]
pub struct DepthFirstSolver {
    /// Push neighbours right, left, down, up instead of up, down, left, right.
    pub reverse_neighbours: bool,
}

impl DepthFirstSolver {
    pub fn new() -> DepthFirstSolver {
        DepthFirstSolver {
            reverse_neighbours: false,
        }
    }
}

impl GridSolver for DepthFirstSolver {
    fn search(
        &self,
        grid: &PathingGrid,
        context: &mut SearchContext,
        start: usize,
        end: usize,
    ) -> Vec<usize> {
        let limit = grid.cell_count();
        let mut visited_order = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if context.visited[current] || grid.is_wall_ix(current) {
                continue;
            }
            if visited_order.len() >= limit {
                warn!("DFS stopped after {} expansions", limit);
                break;
            }
            context.visited[current] = true;
            visited_order.push(current);
            if current == end {
                break;
            }
            let mut neighbours = grid.neighbour_indices(current);
            if self.reverse_neighbours {
                neighbours.reverse();
            }
            for n in neighbours {
                if !context.visited[n] {
                    context.previous[n] = Some(current);
                    stack.push(n);
                }
            }
        }
        visited_order
    }
}
