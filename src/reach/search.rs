//! Breadth-first search over the territory graph.
//!
//! All searches are multi-source and take a per-territory predicate: an edge
//! may be crossed only when the predicate holds at both of its ends. Sources
//! failing the predicate are not part of the result.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::map::{Adjacency, TerritoryId};

/// Shortest path to every reached territory, source first and target last.
pub type Paths = BTreeMap<TerritoryId, Vec<TerritoryId>>;

/// Parent links of a BFS forest; sources map to `None`.
fn bfs(
    adjacency: &Adjacency,
    sources: &[TerritoryId],
    mut passable: impl FnMut(TerritoryId) -> bool,
) -> BTreeMap<TerritoryId, Option<TerritoryId>> {
    let mut parent = BTreeMap::new();
    let mut queue = VecDeque::with_capacity(adjacency.len());

    for &source in sources {
        if !parent.contains_key(&source) && passable(source) {
            parent.insert(source, None);
            queue.push_back(source);
        }
    }

    while let Some(current) = queue.pop_front() {
        for &next in adjacency.neighbors(current) {
            if parent.contains_key(&next) || !passable(next) {
                continue;
            }
            parent.insert(next, Some(current));
            queue.push_back(next);
        }
    }
    parent
}

/// Territories reachable from any source.
pub fn reachable(
    adjacency: &Adjacency,
    sources: &[TerritoryId],
    passable: impl FnMut(TerritoryId) -> bool,
) -> BTreeSet<TerritoryId> {
    bfs(adjacency, sources, passable).into_keys().collect()
}

/// Shortest path from the nearest source to every reachable territory.
/// Ties go to the source listed first, then to lower neighbor ids.
pub fn shortest_paths(
    adjacency: &Adjacency,
    sources: &[TerritoryId],
    passable: impl FnMut(TerritoryId) -> bool,
) -> Paths {
    let parent = bfs(adjacency, sources, passable);
    parent
        .keys()
        .map(|&target| {
            let mut path = vec![target];
            let mut at = target;
            while let Some(&Some(prev)) = parent.get(&at) {
                path.push(prev);
                at = prev;
            }
            path.reverse();
            (target, path)
        })
        .collect()
}
