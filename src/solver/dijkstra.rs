use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::warn;

use crate::context::SearchContext;
use crate::{pathing_grid::PathingGrid, solver::GridSolver};

/// Heap entry. `seq` is the number of the expansion that discovered the cell.
#[derive(PartialEq, Eq)]
struct SmallestCostHolder {
    cost: usize,
    seq: usize,
    index: usize,
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest cost first. Equal costs go to the earliest discovery, cells discovered by the
        // same expansion in row-major order.
        (other.cost, other.seq, other.index).cmp(&(self.cost, self.seq, self.index))
    }
}

/// Uniform-cost search. Every unreached cell is conceptually part of the frontier at distance
/// infinity; only cells with a finite distance are kept in the heap, so the search ends exactly
/// when the smallest remaining distance would be infinite.
///
/// The frontier behaves like a row-major list of all cells that is stably sorted by distance
/// before every selection: among cells of equal distance, those reached by an earlier expansion
/// come first.
#[derive(Clone, Debug)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn search(
        &self,
        grid: &PathingGrid,
        context: &mut SearchContext,
        start: usize,
        end: usize,
    ) -> Vec<usize> {
        let limit = grid.cell_count();
        let mut visited_order = Vec::new();
        let mut to_see = BinaryHeap::new();
        context.distance[start] = 0;
        to_see.push(SmallestCostHolder {
            cost: 0,
            seq: 0,
            index: start,
        });
        while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
            // A cell may sit in the heap several times if a shorter way to it was found later.
            // Only the entry carrying its current distance counts.
            if context.visited[index] || cost > context.distance[index] {
                continue;
            }
            if grid.is_wall_ix(index) {
                continue;
            }
            if visited_order.len() >= limit {
                warn!("Dijkstra stopped after {} expansions", limit);
                break;
            }
            context.visited[index] = true;
            visited_order.push(index);
            if index == end {
                break;
            }
            let seq = visited_order.len();
            for n in grid.neighbour_indices(index) {
                let new_cost = cost + 1;
                if new_cost < context.distance[n] {
                    context.distance[n] = new_cost;
                    context.previous[n] = Some(index);
                    to_see.push(SmallestCostHolder {
                        cost: new_cost,
                        seq,
                        index: n,
                    });
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
    fn expands_by_distance_on_open_grid() {
        let grid: PathingGrid = "S..\n...\n..E".parse().unwrap();
        let mut context = SearchContext::new(grid.cell_count());
        let order = DijkstraSolver.search(&grid, &mut context, grid.start_ix(), grid.end_ix());
        assert_eq!(order, vec![0, 1, 3, 2, 4, 6, 5, 7, 8]);
        assert_eq!(context.distance(8), Some(4));
        assert_eq!(reconstruct_path(&context, 8).len(), 5);
    }

    /// Cells 0 and 2 are found by the expansion of 1, cell 8 later by the expansion of 5 and
    /// cell 6 last by the expansion of 7. Row-major order alone would visit 6 before 8.
    #[test]
    fn equal_distances_follow_discovery_order() {
        // |...|
        // |#S.|
        // |..E|
        let grid: PathingGrid = "...\n#S.\n..E".parse().unwrap();
        let mut context = SearchContext::new(grid.cell_count());
        let order = DijkstraSolver.search(&grid, &mut context, grid.start_ix(), grid.end_ix());
        assert_eq!(order, vec![4, 1, 5, 7, 0, 2, 8]);
        assert!(!context.is_visited(6));
        assert_eq!(context.distance(6), Some(2));
    }

    #[test]
    fn distances_never_decrease_along_visitation() {
        let grid: PathingGrid = "\
            S..#......
            .#.#.####.
            .#...#....
            .####..##.
            ......#..E"
            .parse()
            .unwrap();
        let mut context = SearchContext::new(grid.cell_count());
        let order = DijkstraSolver.search(&grid, &mut context, grid.start_ix(), grid.end_ix());
        let distances = order
            .iter()
            .map(|&ix| context.distance(ix).unwrap())
            .collect::<Vec<_>>();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*order.last().unwrap(), grid.end_ix());
    }

    #[test]
    fn exhausts_component_when_end_is_walled_in() {
        let grid: PathingGrid = "S..#.\n...#E".parse().unwrap();
        let mut context = SearchContext::new(grid.cell_count());
        let order = DijkstraSolver.search(&grid, &mut context, grid.start_ix(), grid.end_ix());
        assert_eq!(order.len(), 6);
        assert!(!order.contains(&grid.end_ix()));
        assert!(context.distance(grid.end_ix()).is_none());
    }
}
