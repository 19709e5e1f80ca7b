use std::collections::VecDeque;

use log::warn;

use crate::context::SearchContext;
use crate::{pathing_grid::PathingGrid, solver::GridSolver};

/// Breadth-first search. Cells are marked visited when they are enqueued, which keeps every cell
/// in the queue at most once; they enter the visitation order when dequeued. Distances are
/// recorded as well, although the search does not need them.
#[derive(Clone, Debug)]
pub struct BreadthFirstSolver;

impl GridSolver for BreadthFirstSolver {
    fn search(
        &self,
        grid: &PathingGrid,
        context: &mut SearchContext,
        start: usize,
        end: usize,
    ) -> Vec<usize> {
        let limit = grid.cell_count();
        let mut visited_order = Vec::new();
        let mut queue = VecDeque::new();
        context.visited[start] = true;
        context.distance[start] = 0;
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            if visited_order.len() >= limit {
                warn!("BFS stopped after {} expansions", limit);
                break;
            }
            visited_order.push(current);
            if current == end {
                break;
            }
            for n in grid.neighbour_indices(current) {
                if !context.visited[n] {
                    context.visited[n] = true;
                    context.distance[n] = context.distance[current] + 1;
                    context.previous[n] = Some(current);
                    queue.push_back(n);
                }
            }
        }
        visited_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::reconstruct_path;

    #[test]
    fn level_order_with_fixed_neighbour_priority() {
        let grid: PathingGrid = "S..\n...\n..E".parse().unwrap();
        let mut context = SearchContext::new(grid.cell_count());
        let order = BreadthFirstSolver.search(&grid, &mut context, grid.start_ix(), grid.end_ix());
        assert_eq!(order, vec![0, 3, 1, 6, 4, 2, 7, 5, 8]);
        assert_eq!(reconstruct_path(&context, 8), vec![0, 3, 6, 7, 8]);
        assert_eq!(context.distance(8), Some(4));
    }

    #[test]
    fn goes_around_walls() {
        //  _____
        // |S#  E|
        // |.#.#.|
        // |.....|
        //  _____
        let grid: PathingGrid = "S#..E\n.#.#.\n.....".parse().unwrap();
        let mut context = SearchContext::new(grid.cell_count());
        let order = BreadthFirstSolver.search(&grid, &mut context, grid.start_ix(), grid.end_ix());
        let path = reconstruct_path(&context, grid.end_ix());
        assert_eq!(path.len(), 9);
        assert_eq!(*order.last().unwrap(), grid.end_ix());
    }
}
