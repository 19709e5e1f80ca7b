/// Marks a cell that no search has reached yet.
pub const UNREACHED: usize = usize::MAX;

/// Run-scoped state of every cell, stored as flat arrays indexed by cell index.
///
/// A fresh context is created for every run so that results never depend on leftovers of an
/// earlier run. Predecessors are cell indices, so following them never aliases another run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchContext {
    pub(crate) distance: Vec<usize>,
    pub(crate) visited: Vec<bool>,
    pub(crate) previous: Vec<Option<usize>>,
}

impl SearchContext {
    pub fn new(cell_count: usize) -> SearchContext {
        SearchContext {
            distance: vec![UNREACHED; cell_count],
            visited: vec![false; cell_count],
            previous: vec![None; cell_count],
        }
    }
    pub fn len(&self) -> usize {
        self.visited.len()
    }
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
    /// Distance from the start recorded by the search, [None] if the cell was never reached.
    pub fn distance(&self, ix: usize) -> Option<usize> {
        match self.distance.get(ix) {
            Some(&d) if d != UNREACHED => Some(d),
            _ => None,
        }
    }
    pub fn is_visited(&self, ix: usize) -> bool {
        self.visited.get(ix).copied().unwrap_or(false)
    }
    pub fn previous(&self, ix: usize) -> Option<usize> {
        self.previous.get(ix).copied().flatten()
    }
}
