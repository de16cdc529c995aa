//! Pure derivations over an existing quadruples map.
//!
//! Every function here allocates only its own output and leaves the input
//! untouched; all run in O(number of quadruples) with a small constant.
//! Ordered maps keep iteration deterministic for downstream consumers.

use std::collections::{BTreeMap, BTreeSet};

use crate::triangulation::QuadruplesMap;
use crate::types::{Pair, Quadruple, Sphere, Triple};

/// Sphere-id adjacency: every unordered pair of members of every quadruple
/// becomes a bidirectional edge.
pub fn collect_neighbors_map_from_quadruples_map(
    quadruples_map: &QuadruplesMap,
) -> BTreeMap<usize, BTreeSet<usize>> {
    let mut map: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
    for quadruple in quadruples_map.keys() {
        for pair in quadruple.pairs() {
            map.entry(pair.get(0)).or_default().insert(pair.get(1));
            map.entry(pair.get(1)).or_default().insert(pair.get(0));
        }
    }
    map
}

/// Dense adjacency-list form of an id->set map, indexed 0..n-1.
/// Ids at or beyond `n` are dropped from both sides.
pub fn collect_ids_graph_from_ids_map(
    ids_map: &BTreeMap<usize, BTreeSet<usize>>,
    n: usize,
) -> Vec<Vec<usize>> {
    let mut graph = vec![Vec::new(); n];
    for (&id, neighbors) in ids_map {
        if id >= n {
            continue;
        }
        graph[id] = neighbors.iter().copied().filter(|&other| other < n).collect();
    }
    graph
}

/// For every vertex of the triangulation, record its index in the vertices
/// vector against each of its 4 member ids.
pub fn collect_vertices_map_from_vertices_vector(
    vertices_vector: &[(Quadruple, Sphere)],
) -> BTreeMap<usize, BTreeSet<usize>> {
    let mut map: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
    for (vertex_index, (quadruple, _)) in vertices_vector.iter().enumerate() {
        for pos in 0..4 {
            map.entry(quadruple.get(pos)).or_default().insert(vertex_index);
        }
    }
    map
}

/// Vertex indices against each of the 6 member pairs of every vertex.
pub fn collect_pairs_vertices_map_from_vertices_vector(
    vertices_vector: &[(Quadruple, Sphere)],
) -> BTreeMap<Pair, BTreeSet<usize>> {
    let mut map: BTreeMap<Pair, BTreeSet<usize>> = BTreeMap::new();
    for (vertex_index, (quadruple, _)) in vertices_vector.iter().enumerate() {
        for pair in quadruple.pairs() {
            map.entry(pair).or_default().insert(vertex_index);
        }
    }
    map
}

/// Vertex indices against each of the 4 member triples of every vertex.
pub fn collect_triples_vertices_map_from_vertices_vector(
    vertices_vector: &[(Quadruple, Sphere)],
) -> BTreeMap<Triple, BTreeSet<usize>> {
    let mut map: BTreeMap<Triple, BTreeSet<usize>> = BTreeMap::new();
    for (vertex_index, (quadruple, _)) in vertices_vector.iter().enumerate() {
        for triple in quadruple.triples() {
            map.entry(triple).or_default().insert(vertex_index);
        }
    }
    map
}

/// For each pair of each quadruple, the two remaining members as
/// third-party neighbors of that pair. Used to find all simplices sharing
/// an edge.
pub fn collect_pairs_neighbors_map_from_quadruples_map(
    quadruples_map: &QuadruplesMap,
) -> BTreeMap<Pair, BTreeSet<usize>> {
    let mut map: BTreeMap<Pair, BTreeSet<usize>> = BTreeMap::new();
    for quadruple in quadruples_map.keys() {
        let ids = quadruple.ids();
        for a in 0..3 {
            for b in (a + 1)..4 {
                let pair = Pair::new(ids[a], ids[b]);
                let entry = map.entry(pair).or_default();
                for (pos, &id) in ids.iter().enumerate() {
                    if pos != a && pos != b {
                        entry.insert(id);
                    }
                }
            }
        }
    }
    map
}
