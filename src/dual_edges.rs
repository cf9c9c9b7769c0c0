//! Translation of dual edge ids into primal edges.
//!
//! The contraction set reaches the checker as a list of edge ids of the dual
//! graph. The id assignment enumerates the ring edges in ring order first,
//! then the edges of every 3-cycle of the free completion in ascending order
//! of the cycle triple; each edge receives an id on first sight.

use std::collections::BTreeSet;

use fxhash::FxHashMap;

use crate::configuration::Configuration;
use crate::cust_errors::ProcessingError;

impl Configuration {

    fn is_three_cycle(&self, x: usize, y: usize, z: usize) -> bool {
        self.adj[x].contains(&y) && self.adj[y].contains(&z) && self.adj[z].contains(&x)
    }

    /// Resolves a list of dual edge ids to primal edges.
    /// Throws an error if an id does not name an edge.
    pub fn edges_from_ids(&self, edgeids: &[usize]) -> Result<Vec<(usize, usize)>, ProcessingError> {
        let mut triangles: BTreeSet<(usize, usize, usize)> = BTreeSet::new();
        for i in 0..self.n {
            for j in 0..i {
                for k in 0..j {
                    if self.is_three_cycle(k, j, i) {
                        triangles.insert((k, j, i));
                    }
                }
            }
        }

        let mut index_of_edge: FxHashMap<(usize, usize), usize> = FxHashMap::default();
        let mut edge_of_index: Vec<(usize, usize)> = Vec::new();
        let mut add_edge = |x: usize, y: usize| {
            let edge = if x > y { (y, x) } else { (x, y) };
            if !index_of_edge.contains_key(&edge) {
                index_of_edge.insert(edge, edge_of_index.len());
                edge_of_index.push(edge);
            }
        };
        for i in 0..self.r {
            add_edge(i, (i + 1) % self.r);
        }
        for &(a, b, c) in &triangles {
            add_edge(a, b);
            add_edge(b, c);
            add_edge(c, a);
        }

        edgeids
            .iter()
            .map(|&id| edge_of_index.get(id).copied().ok_or(ProcessingError::InvalidEdgeId(id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::configuration::Configuration;
    use crate::cust_errors::ProcessingError;
    use std::io::Cursor;

    fn birkhoff_diamond() -> Configuration {
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
    fn ring_edges_first_test() {
        let conf = birkhoff_diamond();
        let edges = conf.edges_from_ids(&[0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(edges, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (0, 5)]);
    }

    #[test]
    fn triangle_edges_test() {
        let conf = birkhoff_diamond();
        // the first triangle in ascending order is (0, 1, 6); its non-ring
        // edges take the next two ids
        let edges = conf.edges_from_ids(&[6, 7]).unwrap();
        assert_eq!(edges, vec![(1, 6), (0, 6)]);
        // the Birkhoff diamond has 21 edges in total
        assert!(conf.edges_from_ids(&[20]).is_ok());
        assert_eq!(conf.edges_from_ids(&[21]), Err(ProcessingError::InvalidEdgeId(21)));
    }

    #[test]
    fn stable_assignment_test() {
        let conf = birkhoff_diamond();
        assert_eq!(conf.edges_from_ids(&[6, 7]), conf.edges_from_ids(&[6, 7]));
    }
}
