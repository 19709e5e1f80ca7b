use std::iter;

use crate::context::SearchContext;

/// Walks the predecessors left by a search back from `end` and returns the cells from the start
/// to `end`, both included.
///
/// A walk of a single cell means `end` never received a predecessor, so no path was found and
/// the result is empty. The walk is cut off after as many steps as there are cells.
pub fn reconstruct_path(context: &SearchContext, end: usize) -> Vec<usize> {
    let mut path = iter::successors(Some(end), |&ix| context.previous(ix))
        .take(context.len())
        .collect::<Vec<usize>>();
    if path.len() <= 1 {
        return Vec::new();
    }
    path.reverse();
    path
}
