//! Adjacency graph derived from map polygons.
//!
//! Two regions are neighbors when their outlines share an edge: two
//! consecutive boundary vertices, in either winding order. Regions that only
//! touch at a corner are not adjacent. Neighbor lists are sorted and free of
//! duplicates, so traversals over the graph are deterministic.

use std::collections::HashMap;

use super::territory::TerritoryId;

/// A polygon vertex in map coordinates.
pub type Point = (i32, i32);

/// Symmetric neighbor lists indexed by territory id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    neighbors: Vec<Vec<TerritoryId>>,
}

fn edge_key(a: Point, b: Point) -> (Point, Point) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl Adjacency {
    /// Builds the graph from one closed outline per territory, in id order.
    pub fn from_polygons(polygons: &[Vec<Point>]) -> Adjacency {
        let mut edges: HashMap<(Point, Point), Vec<usize>> = HashMap::new();
        for (region, polygon) in polygons.iter().enumerate() {
            let n = polygon.len();
            if n < 2 {
                continue;
            }
            for i in 0..n {
                let key = edge_key(polygon[i], polygon[(i + 1) % n]);
                if key.0 == key.1 {
                    continue;
                }
                edges.entry(key).or_default().push(region);
            }
        }

        let mut neighbors = vec![Vec::new(); polygons.len()];
        for regions in edges.values() {
            for &a in regions {
                for &b in regions {
                    if a != b {
                        neighbors[a].push(TerritoryId(b));
                    }
                }
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }
        Adjacency { neighbors }
    }

    /// Builds a graph from explicit neighbor pairs. Each pair is linked both ways.
    pub fn from_pairs(count: usize, pairs: &[(TerritoryId, TerritoryId)]) -> Adjacency {
        let mut neighbors = vec![Vec::new(); count];
        for &(a, b) in pairs {
            if a != b {
                neighbors[a.0].push(b);
                neighbors[b.0].push(a);
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }
        Adjacency { neighbors }
    }

    /// Neighbors of `t`, sorted by id. Unknown ids have none.
    pub fn neighbors(&self, t: TerritoryId) -> &[TerritoryId] {
        self.neighbors.get(t.0).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_adjacent(&self, a: TerritoryId, b: TerritoryId) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}
