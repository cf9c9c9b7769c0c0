//! The configuration datastructure: a plane near-triangulation together with
//! its bounding ring (the free completion), the raw and contracted distance
//! metrics and the path caches every later analysis step reads from.
//!
//! Ring vertices carry the indices `0..r`, interior vertices `r..n`. The ring
//! always induces the cycle `i -- (i + 1) % r`.

use std::cmp::min;
use std::collections::BTreeSet;
use std::io::prelude::*;

use fxhash::FxHashSet;

use crate::cust_errors::{ImportError, ProcessingError};
use crate::report::Log;

/// Distances at or above this value mean "not connected".
pub const INF: i32 = 10_000;

/// A configuration with its ring and all tables derived from the current
/// contraction.
///
/// The adjacency and the raw metric never change after import. Everything
/// else is recomputed as a whole by `set_contract()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Total number of vertices of the free completion.
    pub n: usize,
    /// Ring size.
    pub r: usize,
    /// Adjacency of the free completion. Ordered sets keep every path
    /// enumeration in a stable lexicographic order.
    pub adj: Vec<BTreeSet<usize>>,
    /// Raw shortest-path distances.
    pub dist: Vec<Vec<i32>>,
    pub(crate) contract: Vec<(usize, usize)>,
    /// Shortest-path distances with every contraction edge at weight 0.
    pub(crate) dist_contracted: Vec<Vec<i32>>,
    /// Smallest index of each contracted equivalence class.
    pub(crate) representative: Vec<usize>,
    /// Vertices a 2,3-cut inside the configuration can eliminate after the
    /// contraction.
    pub(crate) reductable_inside: Vec<bool>,
    /// Vertices a 2,3-cut through the surrounding 6-cycle can eliminate.
    pub(crate) reductable_outside6: Vec<bool>,
    /// Vertices a 2,3-cut through the surrounding 7-cycle can eliminate.
    pub(crate) reductable_outside7: Vec<bool>,
    /// `length6[p][q]`: minimum length of a pq-contractibly connected outer
    /// path inside a surrounding 6-cycle that is not forbidden.
    pub(crate) length6: Vec<Vec<i32>>,
    pub(crate) length7: Vec<Vec<i32>>,
    /// Same bound when one edge of the outer path lies on the cycle.
    pub(crate) length_oneedge6: Vec<Vec<i32>>,
    pub(crate) length_oneedge7: Vec<Vec<i32>>,
    /// `all_paths[p][q]`: every simple path of at most 7 edges between the
    /// ring vertices `p` and `q`.
    pub(crate) all_paths: Vec<Vec<Vec<Vec<usize>>>>,
}

impl Configuration {

    /// Builds a configuration from its adjacency and computes all tables
    /// that do not depend on a contraction.
    pub fn new(n: usize, r: usize, adj: Vec<BTreeSet<usize>>) -> Self {
        let mut conf = Configuration {
            n,
            r,
            adj,
            dist: Vec::new(),
            contract: Vec::new(),
            dist_contracted: Vec::new(),
            representative: Vec::new(),
            reductable_inside: vec![false; n],
            reductable_outside6: vec![false; n],
            reductable_outside7: vec![false; n],
            length6: Vec::new(),
            length7: Vec::new(),
            length_oneedge6: Vec::new(),
            length_oneedge7: Vec::new(),
            all_paths: Vec::new(),
        };
        conf.dist = conf.all_pairs_shortest_paths(false);
        conf.dist_contracted = conf.dist.clone();
        conf.representative = conf.calc_representative();
        conf.all_paths = vec![vec![Vec::new(); r]; r];
        for p in 0..r {
            for q in 0..r {
                if p == q {
                    continue;
                }
                conf.all_paths[p][q] = conf.calculate_paths(p, q);
            }
        }
        conf.length6 = conf.calc_lower_bound_length_outer_path(6);
        conf.length7 = conf.calc_lower_bound_length_outer_path(7);
        conf.length_oneedge6 = conf.calc_lower_bound_length_outer_path_oneedge(6);
        conf.length_oneedge7 = conf.calc_lower_bound_length_outer_path_oneedge(7);
        conf
    }

    /// Reads a configuration from a `BufRead` type.
    ///
    /// The first line is a free-form comment. The second line holds `n` and
    /// `r`. Each following line describes one interior vertex: its 1-based
    /// label, its neighbor count and the 1-based neighbor labels. Labels have
    /// to appear in sequence, starting at `r + 1`. Edges between an interior
    /// vertex and the ring are inserted symmetrically, interior vertices are
    /// expected to list each other.
    pub fn read_conf<R: BufRead>(conf: R) -> Result<Self, ImportError> {
        let mut lines = conf.lines();
        // comment line
        lines.next().ok_or(ImportError::InputMalformedError)??;
        let mut tokens: Vec<usize> = Vec::new();
        for line in lines {
            let line = line?;
            for tok in line.split_whitespace() {
                tokens.push(tok.parse::<usize>()?);
            }
        }
        let mut tokens = tokens.into_iter();
        let mut next = || tokens.next().ok_or(ImportError::InputMalformedError);
        let n = next()?;
        let r = next()?;
        if r > n {
            return Err(ImportError::InputMalformedError);
        }
        let mut adj = vec![BTreeSet::new(); n];
        for i in 0..r {
            adj[i].insert((i + 1) % r);
            adj[(i + 1) % r].insert(i);
        }
        for i in r..n {
            let v = next()?.checked_sub(1).ok_or(ImportError::InputMalformedError)?;
            if v != i {
                return Err(ImportError::InputMalformedError);
            }
            let d = next()?;
            for _ in 0..d {
                let u = next()?.checked_sub(1).ok_or(ImportError::InputMalformedError)?;
                if u >= n {
                    return Err(ImportError::InputMalformedError);
                }
                adj[v].insert(u);
                if u < r {
                    adj[u].insert(v);
                }
            }
        }
        Ok(Configuration::new(n, r, adj))
    }

    /// Installs the contraction edges and recomputes every table that
    /// depends on them.
    ///
    /// Vertices that become erasable by a 2,3-cut reduction are reported on
    /// `log`. Throws an error if one of the given edges does not exist.
    pub fn set_contract(
        &mut self,
        contract: Vec<(usize, usize)>,
        log: &mut Log,
    ) -> Result<(), ProcessingError> {
        for &(u, v) in &contract {
            if u >= self.n || v >= self.n || !self.adj[u].contains(&v) {
                return Err(ProcessingError::InvalidParameter(format!(
                    "Contraction edge ({}, {}) is not an edge of the configuration.",
                    u, v
                )));
            }
        }
        self.contract = contract;
        self.dist_contracted = self.all_pairs_shortest_paths(true);
        self.reductable_inside = self.calc_cut_reduction();
        self.reductable_outside6 = self.calc_reductable_vertices(6);
        self.reductable_outside7 = self.calc_reductable_vertices(7);
        self.representative = self.calc_representative();
        for v in 0..self.n {
            if self.reductable_inside[v] || self.reductable_outside6[v] {
                log.info(&format!("vertex {} is erased by 6", v));
            }
            if self.reductable_inside[v] || self.reductable_outside7[v] {
                log.info(&format!("vertex {} is erased by 7", v));
            }
        }
        Ok(())
    }

    /// True iff `u` and `v` collapse to the same vertex under the current
    /// contraction.
    pub fn equivalent(&self, u: usize, v: usize) -> bool {
        self.dist_contracted[v][u] == 0
    }

    /// Returns the smallest index of the contracted equivalence class of `v`.
    pub fn representative(&self, v: usize) -> usize {
        self.representative[v]
    }

    pub fn contract_edges(&self) -> &[(usize, usize)] {
        &self.contract
    }

    pub fn dist_contracted(&self, u: usize, v: usize) -> i32 {
        self.dist_contracted[u][v]
    }

    pub fn is_reductable_inside(&self, v: usize) -> bool {
        self.reductable_inside[v]
    }

    pub fn is_reductable_outside(&self, v: usize, cut_size: i32) -> bool {
        match cut_size {
            6 => self.reductable_outside6[v],
            7 => self.reductable_outside7[v],
            _ => panic!("cut size is 6 or 7"),
        }
    }

    fn calc_representative(&self) -> Vec<usize> {
        let mut representative = vec![0; self.n];
        for v in 0..self.n {
            for u in 0..self.n {
                if self.equivalent(v, u) {
                    representative[v] = u;
                    break;
                }
            }
        }
        representative
    }

    /// All-pairs shortest paths over the free completion.
    ///
    /// With `after_contract` every contraction edge is taken at weight 0, so
    /// two vertices at distance 0 are identified by the contraction.
    pub fn all_pairs_shortest_paths(&self, after_contract: bool) -> Vec<Vec<i32>> {
        let mut dist = vec![vec![INF; self.n]; self.n];
        for v in 0..self.n {
            dist[v][v] = 0;
            for &u in &self.adj[v] {
                dist[v][u] = 1;
            }
        }
        if after_contract {
            for &(u, v) in &self.contract {
                dist[u][v] = 0;
                dist[v][u] = 0;
            }
        }
        for k in 0..self.n {
            for i in 0..self.n {
                for j in 0..self.n {
                    dist[i][j] = min(dist[i][j], dist[i][k] + dist[k][j]);
                }
            }
        }
        dist
    }

    /// Enumerates every distinct simple shortest path from `s` to `t`, in the
    /// raw metric or, with `after_contract`, with contraction edges at
    /// weight 0.
    ///
    /// A 0-1 BFS computes the distance labels, then the shortest-path DAG is
    /// traced forward. The ordered adjacency keeps the result order stable,
    /// in particular the first returned path is the same on every run.
    pub fn shortest_paths(&self, s: usize, t: usize, after_contract: bool) -> Vec<Vec<usize>> {
        let mut contract_set: FxHashSet<(usize, usize)> = FxHashSet::default();
        if after_contract {
            for &(u, v) in &self.contract {
                contract_set.insert((u, v));
                contract_set.insert((v, u));
            }
        }
        let mut dist = vec![INF; self.n];
        dist[s] = 0;
        let mut que = std::collections::VecDeque::new();
        que.push_back(s);
        while let Some(v) = que.pop_front() {
            for &u in &self.adj[v] {
                if contract_set.contains(&(u, v)) {
                    if dist[v] < dist[u] {
                        dist[u] = dist[v];
                        que.push_front(u);
                    }
                } else if dist[v] + 1 < dist[u] {
                    dist[u] = dist[v] + 1;
                    que.push_back(u);
                }
            }
        }

        // paths[v] collects the s-v shortest paths found so far
        let mut paths: Vec<Vec<Vec<usize>>> = vec![Vec::new(); self.n];
        paths[s].push(vec![s]);
        que.push_back(s);
        while let Some(v) = que.pop_front() {
            for &u in &self.adj[v] {
                if dist[u] == dist[v] + 1 || (dist[u] == dist[v] && contract_set.contains(&(u, v)))
                {
                    let mut update = false;
                    let vpaths = paths[v].clone();
                    for path in vpaths {
                        // no revisits, no duplicates
                        if path.contains(&u) {
                            continue;
                        }
                        let mut upath = path;
                        upath.push(u);
                        if paths[u].contains(&upath) {
                            continue;
                        }
                        paths[u].push(upath);
                        update = true;
                    }
                    if update {
                        if dist[u] == dist[v] + 1 {
                            que.push_back(u);
                        } else {
                            que.push_front(u);
                        }
                    }
                }
            }
        }

        let mut unique_paths: Vec<Vec<usize>> = Vec::new();
        for path in &paths[t] {
            if !unique_paths.contains(path) {
                unique_paths.push(path.clone());
            }
        }
        unique_paths
    }

    /// Enumerates every simple path of at most 7 edges between `p` and `q`
    /// by depth-first search.
    pub fn calculate_paths(&self, p: usize, q: usize) -> Vec<Vec<usize>> {
        fn dfs(
            adj: &[BTreeSet<usize>],
            q: usize,
            v: usize,
            path: &mut Vec<usize>,
            paths: &mut Vec<Vec<usize>>,
        ) {
            path.push(v);
            if v == q {
                paths.push(path.clone());
                path.pop();
                return;
            }
            if path.len() == 8 {
                path.pop();
                return;
            }
            for &u in &adj[v] {
                if !path.contains(&u) {
                    dfs(adj, q, u, path, paths);
                }
            }
            path.pop();
        }
        let mut paths = Vec::new();
        let mut path = Vec::new();
        dfs(&self.adj, q, p, &mut path, &mut paths);
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Level;
    use std::io::Cursor;

    /// A hexagonal ring with no interior.
    pub(crate) fn hexagon() -> Configuration {
        let conf = Cursor::new("plain hexagon\n6 6\n");
        Configuration::read_conf(conf).unwrap()
    }

    /// The Birkhoff diamond: a 6-ring around four interior vertices of
    /// degree 5.
    pub(crate) fn birkhoff_diamond() -> Configuration {
        let conf = Cursor::new(
            "birkhoff diamond\n10 6\n\
             7 5 6 1 2 8 10\n\
             8 5 2 3 9 10 7\n\
             9 5 3 4 5 10 8\n\
             10 5 5 6 7 8 9\n",
        );
        Configuration::read_conf(conf).unwrap()
    }

    #[test]
    fn read_conf_test() {
        let conf = birkhoff_diamond();
        assert_eq!(conf.n, 10);
        assert_eq!(conf.r, 6);
        // ring cycle
        for i in 0..6 {
            assert!(conf.adj[i].contains(&((i + 1) % 6)));
            assert!(conf.adj[(i + 1) % 6].contains(&i));
        }
        // ring edges were inserted symmetrically from the interior lines
        assert!(conf.adj[0].contains(&6));
        assert!(conf.adj[5].contains(&9));
        // every interior vertex of the diamond has degree 5
        for v in 6..10 {
            assert_eq!(conf.adj[v].len(), 5);
        }
    }

    #[test]
    fn read_conf_malformed_test() {
        // truncated after the header
        let conf = Cursor::new("comment\n7 6\n");
        assert!(Configuration::read_conf(conf).is_err());
        // interior label out of sequence
        let conf = Cursor::new("comment\n7 6\n8 2 1 2\n");
        assert!(Configuration::read_conf(conf).is_err());
        // ring larger than the vertex count
        let conf = Cursor::new("comment\n5 6\n");
        assert!(Configuration::read_conf(conf).is_err());
    }

    #[test]
    fn metric_invariants_test() {
        let conf = birkhoff_diamond();
        for u in 0..conf.n {
            assert_eq!(conf.dist[u][u], 0);
            for v in 0..conf.n {
                assert_eq!(conf.dist[u][v], conf.dist[v][u]);
                for w in 0..conf.n {
                    assert!(conf.dist[u][v] <= conf.dist[u][w] + conf.dist[w][v]);
                }
            }
        }
        assert_eq!(conf.dist[0][1], 1);
        assert_eq!(conf.dist[0][3], 3);
    }

    #[test]
    fn metric_matches_bfs_test() {
        // cross-check the Warshall-Floyd matrix against a plain BFS
        for input in [
            "plain hexagon\n6 6\n",
            "birkhoff diamond\n10 6\n\
             7 5 6 1 2 8 10\n\
             8 5 2 3 9 10 7\n\
             9 5 3 4 5 10 8\n\
             10 5 5 6 7 8 9\n",
            "pocket behind two interior vertices\n9 6\n\
             7 5 1 2 3 8 9\n\
             8 5 4 5 6 7 9\n\
             9 2 7 8\n",
        ] {
            let conf = Configuration::read_conf(Cursor::new(input)).unwrap();
            for s in 0..conf.n {
                let mut dist = vec![INF; conf.n];
                dist[s] = 0;
                let mut queue = std::collections::VecDeque::from(vec![s]);
                while let Some(v) = queue.pop_front() {
                    for &u in &conf.adj[v] {
                        if dist[v] + 1 < dist[u] {
                            dist[u] = dist[v] + 1;
                            queue.push_back(u);
                        }
                    }
                }
                for t in 0..conf.n {
                    assert_eq!(conf.dist[s][t], dist[t]);
                }
            }
        }
    }

    #[test]
    fn shortest_paths_complete_test() {
        let conf = birkhoff_diamond();
        // both ring arcs between opposite vertices, nothing through the
        // interior is as short
        let paths = conf.shortest_paths(0, 3, false);
        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&vec![0, 1, 2, 3]));
        assert!(paths.contains(&vec![0, 5, 4, 3]));
    }

    #[test]
    fn fresh_instance_is_uncontracted_test() {
        let conf = birkhoff_diamond();
        for v in 0..conf.n {
            assert_eq!(conf.representative(v), v);
            assert!(!conf.is_reductable_inside(v));
            assert!(!conf.is_reductable_outside(v, 6));
            assert!(!conf.is_reductable_outside(v, 7));
        }
    }

    #[test]
    fn set_contract_rejects_non_edge_test() {
        let mut conf = hexagon();
        let mut buf: Vec<u8> = Vec::new();
        let mut log = Log::new(&mut buf, Level::Info);
        assert!(conf.set_contract(vec![(0, 3)], &mut log).is_err());
    }

    #[test]
    fn set_contract_representative_test() {
        let mut conf = birkhoff_diamond();
        let mut buf: Vec<u8> = Vec::new();
        let mut log = Log::new(&mut buf, Level::Info);
        conf.set_contract(vec![(0, 6), (6, 7)], &mut log).unwrap();
        // 0, 6 and 7 collapse into one class represented by 0
        assert_eq!(conf.representative(0), 0);
        assert_eq!(conf.representative(6), 0);
        assert_eq!(conf.representative(7), 0);
        assert_eq!(conf.dist_contracted(0, 7), 0);
        // representatives are idempotent and minimal
        for v in 0..conf.n {
            assert_eq!(conf.representative(conf.representative(v)), conf.representative(v));
            assert!(conf.representative(v) <= v);
        }
        // symmetry of the contracted metric
        for u in 0..conf.n {
            assert_eq!(conf.dist_contracted(u, u), 0);
            for v in 0..conf.n {
                assert_eq!(conf.dist_contracted(u, v), conf.dist_contracted(v, u));
            }
        }
    }

    #[test]
    fn set_contract_reset_test() {
        let mut conf = birkhoff_diamond();
        let pristine = conf.clone();
        let mut buf: Vec<u8> = Vec::new();
        let mut log = Log::new(&mut buf, Level::Info);
        conf.set_contract(vec![(0, 6), (6, 7)], &mut log).unwrap();
        assert_ne!(conf, pristine);
        conf.set_contract(Vec::new(), &mut log).unwrap();
        assert_eq!(conf, pristine);
    }

    #[test]
    fn set_contract_idempotent_test() {
        let mut conf = birkhoff_diamond();
        let mut buf: Vec<u8> = Vec::new();
        let mut log = Log::new(&mut buf, Level::Info);
        conf.set_contract(vec![(0, 6), (6, 7)], &mut log).unwrap();
        let first = conf.clone();
        conf.set_contract(vec![(0, 6), (6, 7)], &mut log).unwrap();
        assert_eq!(conf, first);
    }

    #[test]
    fn shortest_paths_test() {
        let conf = hexagon();
        // a single shortest path along the ring
        assert_eq!(conf.shortest_paths(0, 2, false), vec![vec![0, 1, 2]]);
        // opposite vertices are connected by both arcs
        let paths = conf.shortest_paths(0, 3, false);
        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&vec![0, 1, 2, 3]));
        assert!(paths.contains(&vec![0, 5, 4, 3]));
    }

    #[test]
    fn shortest_paths_contracted_test() {
        // a hexagon with one interior vertex chording 0 and 3
        let input = Cursor::new("chord\n7 6\n7 2 1 4\n");
        let mut conf = Configuration::read_conf(input).unwrap();
        let mut buf: Vec<u8> = Vec::new();
        let mut log = Log::new(&mut buf, Level::Info);
        conf.set_contract(vec![(0, 6), (6, 3)], &mut log).unwrap();
        assert_eq!(conf.dist_contracted(0, 3), 0);
        // the only contracted shortest path runs through the chord vertex
        assert_eq!(conf.shortest_paths(0, 3, true), vec![vec![0, 6, 3]]);
    }

    #[test]
    fn calculate_paths_test() {
        let conf = hexagon();
        let paths = conf.calculate_paths(0, 1);
        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&vec![0, 1]));
        assert!(paths.contains(&vec![0, 5, 4, 3, 2, 1]));
        // enumeration order is lexicographic in the vertex sequences
        assert_eq!(paths[0], vec![0, 1]);
    }
}
