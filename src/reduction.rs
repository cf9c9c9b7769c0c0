//! Cut reductions.
//!
//! This module determines which vertices of the free completion are erased
//! by a 2,3-cut reduction after the contraction: either by a cut inside the
//! configuration, or by a cut that combines interior paths with paths
//! through the surrounding 6- or 7-cycle.

use std::cmp::max;

use fxhash::FxHashSet;

use crate::bounds::is_forbidden_cut;
use crate::configuration::Configuration;

/// A side of one or two ring-to-ring paths through the configuration.
///
/// Every region is resolved by the same component walker: a cut set and a
/// seed side, as selected by the variant.
#[derive(Debug, Clone, Copy)]
pub enum Region<'a> {
    /// The side of a single path that contains the ring arc running from the
    /// first to the last path vertex in ring direction.
    Enclosed(&'a [usize]),
    /// For ring vertices in cyclic order `p1, q1, p2, q2` and paths
    /// `q1 -> p2` and `q2 -> p1`: the component enclosed between the two
    /// paths.
    Between(&'a [usize], &'a [usize]),
    /// Same setup, but everything outside the two paths and their enclosed
    /// component.
    Outside(&'a [usize], &'a [usize]),
}

impl Configuration {

    /// Walks the graph minus `cutset`, starting at `seeds`, and returns the
    /// visited vertices.
    fn walk_component(&self, cutset: &FxHashSet<usize>, seeds: &[usize]) -> Vec<usize> {
        let mut visited = vec![false; self.n];
        let mut component = Vec::new();
        let mut stack = Vec::new();
        for &s in seeds {
            if cutset.contains(&s) || visited[s] {
                continue;
            }
            visited[s] = true;
            stack.push(s);
            while let Some(v) = stack.pop() {
                component.push(v);
                for &u in &self.adj[v] {
                    if !cutset.contains(&u) && !visited[u] {
                        visited[u] = true;
                        stack.push(u);
                    }
                }
            }
        }
        component
    }

    /// The component cut off by a single ring-to-ring path that contains the
    /// ring arc from the first to the last path vertex.
    fn enclosed_component(&self, pqpath: &[usize]) -> Vec<usize> {
        let p = pqpath[0];
        let q = *pqpath.last().expect("a path has at least one vertex");
        assert!(p != q && p < self.r && q < self.r, "path endpoints lie on the ring");
        let cutset: FxHashSet<usize> = pqpath.iter().copied().collect();
        let mut seeds = Vec::new();
        let mut v = (p + 1) % self.r;
        while v != q {
            seeds.push(v);
            v = (v + 1) % self.r;
        }
        self.walk_component(&cutset, &seeds)
    }

    /// Resolves a region descriptor to its vertex set.
    pub fn region_vertices(&self, region: Region) -> Vec<usize> {
        match region {
            Region::Enclosed(pqpath) => self.enclosed_component(pqpath),
            Region::Between(q1p2_path, q2p1_path) => {
                let other: FxHashSet<usize> =
                    self.enclosed_component(q1p2_path).into_iter().collect();
                let mut p1q2_path = q2p1_path.to_vec();
                p1q2_path.reverse();
                self.enclosed_component(&p1q2_path)
                    .into_iter()
                    .filter(|v| !other.contains(v))
                    .collect()
            }
            Region::Outside(q1p2_path, q2p1_path) => {
                let mut other: FxHashSet<usize> =
                    self.enclosed_component(q1p2_path).into_iter().collect();
                let mut component = Vec::new();
                for v in self.enclosed_component(q2p1_path) {
                    if other.contains(&v) {
                        other.remove(&v);
                        continue;
                    }
                    component.push(v);
                }
                component.extend(other.into_iter());
                component
            }
        }
    }

    /// Counts the ring and interior vertices of a region.
    pub fn region_size(&self, region: Region) -> (i32, i32) {
        let mut s = 0;
        let mut t = 0;
        for v in self.region_vertices(region) {
            if v < self.r {
                s += 1;
            } else {
                t += 1;
            }
        }
        (s, t)
    }

    /// Labels the components of the graph minus the equivalence closure of
    /// `cut`. Component 0 holds everything the ring reaches, further
    /// components are numbered in index order; cut vertices stay `None`.
    pub(crate) fn component_id_equivalence(&self, cut: &[usize]) -> Vec<Option<usize>> {
        let mut cutset: FxHashSet<usize> = FxHashSet::default();
        for &v in cut {
            cutset.insert(v);
            for u in 0..self.n {
                if self.equivalent(v, u) {
                    cutset.insert(u);
                }
            }
        }

        let mut component_id: Vec<Option<usize>> = vec![None; self.n];
        let mut assign = |seed: usize, c: usize, component_id: &mut Vec<Option<usize>>| {
            let mut stack = vec![seed];
            component_id[seed] = Some(c);
            while let Some(v) = stack.pop() {
                for &u in &self.adj[v] {
                    if cutset.contains(&u) || component_id[u].is_some() {
                        continue;
                    }
                    component_id[u] = Some(c);
                    stack.push(u);
                }
            }
        };
        // everything the ring touches is connected through the outside
        for v in 0..self.r {
            if !cutset.contains(&v) && component_id[v].is_none() {
                assign(v, 0, &mut component_id);
            }
        }
        let mut num_components = 1;
        for v in self.r..self.n {
            if !cutset.contains(&v) && component_id[v].is_none() {
                assign(v, num_components, &mut component_id);
                num_components += 1;
            }
        }
        component_id
    }

    /// Marks every member of a component that holds neither a ring vertex
    /// nor a vertex identified with one.
    fn update_is_reductable(
        &self,
        is_reductable: &mut [bool],
        component_id: &[Option<usize>],
        is_ring: &[bool],
    ) {
        let mut is_reducing_component = vec![true; self.n];
        for v in 0..self.n {
            if let Some(c) = component_id[v] {
                if is_ring[v] {
                    is_reducing_component[c] = false;
                }
            }
        }
        for v in 0..self.n {
            if let Some(c) = component_id[v] {
                if is_reducing_component[c] {
                    is_reductable[v] = true;
                }
            }
        }
    }

    /// Computes the vertices a 2,3-cut inside the configuration can erase
    /// after the contraction.
    ///
    /// Every choice of one, two or three vertices is closed under the
    /// contracted equivalence and taken as a cut; components that do not
    /// touch the ring are erased.
    pub(crate) fn calc_cut_reduction(&self) -> Vec<bool> {
        let mut is_reductable = vec![false; self.n];
        // ring vertices and vertices identified with one
        let mut is_ring = vec![false; self.n];
        for v in 0..self.r {
            for u in 0..self.n {
                if self.equivalent(v, u) {
                    is_ring[u] = true;
                }
            }
        }
        for v0 in 0..self.n {
            let component_id = self.component_id_equivalence(&[v0]);
            self.update_is_reductable(&mut is_reductable, &component_id, &is_ring);
            for v1 in 0..v0 {
                let component_id = self.component_id_equivalence(&[v0, v1]);
                self.update_is_reductable(&mut is_reductable, &component_id, &is_ring);
                for v2 in 0..v1 {
                    let component_id = self.component_id_equivalence(&[v0, v1, v2]);
                    self.update_is_reductable(&mut is_reductable, &component_id, &is_ring);
                }
            }
        }
        is_reductable
    }

    /// Computes the vertices a 2,3-cut through the surrounding cycle of size
    /// `cut_size` can erase after the contraction.
    pub(crate) fn calc_reductable_vertices(&self, cut_size: i32) -> Vec<bool> {
        assert!(cut_size == 6 || cut_size == 7);
        let mut is_reductable = vec![false; self.n];
        self.mark_single_outer_path(cut_size, &mut is_reductable);
        self.mark_contractible_pair(cut_size, &mut is_reductable);
        self.mark_noncontractible_pair(cut_size, &mut is_reductable);
        self.mark_mixed_pair(cut_size, &mut is_reductable);
        is_reductable
    }

    /// Marks every vertex of a region that is not identified with a vertex
    /// of the surrounding paths.
    fn mark_region(&self, region: Region, paths: &[&[usize]], is_reductable: &mut [bool]) {
        for v in self.region_vertices(region) {
            let pinned = paths
                .iter()
                .any(|path| path.iter().any(|&u| self.equivalent(v, u)));
            if !pinned {
                is_reductable[v] = true;
            }
        }
    }

    /// Vertices erased through a single outer path between two ring
    /// vertices.
    fn mark_single_outer_path(&self, cut_size: i32, is_reductable: &mut [bool]) {
        for p in 0..self.r {
            for q in 0..self.r {
                if p == q {
                    continue;
                }
                let pathlen_min = max(0, 5 - self.dist[p][q]);
                let pathlen_max = 3 - self.dist_contracted[p][q];
                if pathlen_min > pathlen_max {
                    continue;
                }
                let contracted_paths = self.shortest_paths(p, q, true);

                for pathlen in pathlen_min..=pathlen_max {
                    if self.check_short_cycle(p, q, pathlen, cut_size) {
                        continue;
                    }
                    for contracted_path in &contracted_paths {
                        if contracted_path.len() as i32 - 1 == self.dist[p][q] {
                            continue;
                        }
                        self.mark_region(
                            Region::Enclosed(contracted_path),
                            &[contracted_path.as_slice()],
                            is_reductable,
                        );
                    }
                }
            }
        }
    }

    /// Vertices erased through two contractible outer paths on ring vertices
    /// in cyclic order `p1, q1, p2, q2`.
    fn mark_contractible_pair(&self, cut_size: i32, is_reductable: &mut [bool]) {
        for p1 in 0..self.r {
            for q1_ in p1 + 1..p1 + self.r {
                for p2_ in q1_ + 1..p1 + self.r {
                    for q2_ in p2_ + 1..p1 + self.r {
                        let q1 = q1_ % self.r;
                        let p2 = p2_ % self.r;
                        let q2 = q2_ % self.r;
                        let pathlen_min1 = max(0, 5 - self.dist[p1][q1]);
                        let pathlen_min2 = max(0, 5 - self.dist[p2][q2]);
                        let length_inside =
                            self.dist_contracted[q1][p2] + self.dist_contracted[q2][p1];
                        let pathlen_max = 3 - length_inside;
                        if pathlen_min1 > pathlen_max || pathlen_min2 > pathlen_max {
                            continue;
                        }

                        let shortest_path1s = self.shortest_paths(q1, p2, false);
                        let shortest_path2s = self.shortest_paths(q2, p1, false);
                        let contracted_path1s = self.shortest_paths(q1, p2, true);
                        let contracted_path2s = self.shortest_paths(q2, p1, true);

                        for pathlen1 in pathlen_min1..=pathlen_max {
                            for pathlen2 in pathlen_min2..=pathlen_max {
                                if pathlen1 + pathlen2 + length_inside > 3 {
                                    continue;
                                }
                                if self.check_short_cycle(p1, q1, pathlen1, cut_size) {
                                    continue;
                                }
                                if self.check_short_cycle(p2, q2, pathlen2, cut_size) {
                                    continue;
                                }
                                let mut has_smallcut = false;
                                'smallcut: for path1 in &shortest_path1s {
                                    for path2 in &shortest_path2s {
                                        if self.can_be_almost_minimal_pair(
                                            path1, path2, pathlen1, pathlen2, cut_size,
                                        ) {
                                            continue;
                                        }
                                        let (s, t) =
                                            self.region_size(Region::Between(path1, path2));
                                        let sz =
                                            max(s - max(pathlen1 + pathlen2 - 2, 0) + 1, 0) / 2 + t;
                                        let cut = path1.len() as i32 + path2.len() as i32 - 2
                                            + pathlen1
                                            + pathlen2;
                                        if is_forbidden_cut(cut, sz) {
                                            has_smallcut = true;
                                            break 'smallcut;
                                        }
                                    }
                                }
                                if has_smallcut {
                                    continue;
                                }
                                for contracted_path1 in &contracted_path1s {
                                    for contracted_path2 in &contracted_path2s {
                                        if contracted_path1.len() as i32 - 1 == self.dist[q1][p2]
                                            && contracted_path2.len() as i32 - 1
                                                == self.dist[q2][p1]
                                        {
                                            continue;
                                        }
                                        self.mark_region(
                                            Region::Between(contracted_path1, contracted_path2),
                                            &[contracted_path1.as_slice(), contracted_path2.as_slice()],
                                            is_reductable,
                                        );
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Vertices erased through two noncontractible paths on ring vertices in
    /// cyclic order `p1, q1, p2, q2`.
    fn mark_noncontractible_pair(&self, cut_size: i32, is_reductable: &mut [bool]) {
        for p1 in 0..self.r {
            for q1_ in p1 + 1..p1 + self.r {
                for p2_ in q1_ + 1..p1 + self.r {
                    for q2_ in p2_ + 1..p1 + self.r {
                        if q1_ + 1 == p2_ && q2_ + 1 == p1 + self.r {
                            continue;
                        }
                        let q1 = q1_ % self.r;
                        let p2 = p2_ % self.r;
                        let q2 = q2_ % self.r;
                        // after the contraction neither side may shrink below
                        // a representative distance of 2
                        let pathlen_min1 = max(2 - self.dist_contracted[p1][q1], 0);
                        let pathlen_min2 = max(2 - self.dist_contracted[p2][q2], 0);
                        let length_inside =
                            self.dist_contracted[q1][p2] + self.dist_contracted[q2][p1];
                        let pathlen_max = 3 - length_inside;
                        if pathlen_min1 > pathlen_max || pathlen_min2 > pathlen_max {
                            continue;
                        }

                        assert!(q1 != p2 && q2 != p1);
                        let path1s = &self.all_paths[q1][p2];
                        let path2s = &self.all_paths[q2][p1];
                        let contracted_path1s = self.shortest_paths(q1, p2, true);
                        let contracted_path2s = self.shortest_paths(q2, p1, true);

                        for pathlen1 in pathlen_min1..=pathlen_max {
                            for pathlen2 in pathlen_min2..=pathlen_max {
                                if pathlen1 + pathlen2 + length_inside > 3 {
                                    continue;
                                }
                                let lower_bound = self.calc_lower_bound_cycle(
                                    p1, q1, p2, q2, pathlen1, pathlen2, cut_size,
                                );
                                if lower_bound > cut_size {
                                    continue;
                                }
                                let mut has_smallcut = false;
                                'smallcut: for path1 in path1s {
                                    for path2 in path2s {
                                        let l = pathlen1
                                            + pathlen2
                                            + path1.len() as i32
                                            + path2.len() as i32
                                            - 2;
                                        if l > 5 {
                                            continue;
                                        }
                                        let (s, t) =
                                            self.region_size(Region::Outside(path1, path2));
                                        let sz =
                                            max(s - max(pathlen1 + pathlen2 - 2, 0) + 1, 0) / 2 + t;
                                        if (l <= 4 && sz > 0) || (l == 5 && sz > 1) {
                                            has_smallcut = true;
                                            break 'smallcut;
                                        }
                                    }
                                }
                                if has_smallcut {
                                    continue;
                                }
                                for contracted_path1 in &contracted_path1s {
                                    for contracted_path2 in &contracted_path2s {
                                        if contracted_path1.len() as i32 - 1 == self.dist[q1][p2]
                                            && contracted_path2.len() as i32 - 1
                                                == self.dist[q2][p1]
                                        {
                                            continue;
                                        }
                                        self.mark_region(
                                            Region::Outside(contracted_path1, contracted_path2),
                                            &[contracted_path1.as_slice(), contracted_path2.as_slice()],
                                            is_reductable,
                                        );
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Vertices erased through a contractible path `p1 -> q1` combined with
    /// a contractible path `q2 -> p2`, the second pair taken in reverse.
    fn mark_mixed_pair(&self, cut_size: i32, is_reductable: &mut [bool]) {
        for p1 in 0..self.r {
            for q1_ in p1 + 1..p1 + self.r {
                for p2_ in q1_ + 1..p1 + self.r {
                    for q2_ in p2_ + 1..p1 + self.r {
                        let q1 = q1_ % self.r;
                        let p2 = p2_ % self.r;
                        let q2 = q2_ % self.r;
                        let pathlen_min1 = max(0, 5 - self.dist[p1][q1]);
                        let pathlen_min2 = max(0, 5 - self.dist[p2][q2]);
                        let length_inside =
                            self.dist_contracted[q1][p2] + self.dist_contracted[q2][p1];
                        let pathlen_max = 3 - length_inside;
                        if pathlen_min1 > pathlen_max || pathlen_min2 > pathlen_max {
                            continue;
                        }

                        let shortest_path1s = self.shortest_paths(q1, p2, false);
                        let shortest_path2s = self.shortest_paths(q2, p1, false);
                        let contracted_path1s = self.shortest_paths(q1, p2, true);
                        let contracted_path2s = self.shortest_paths(q2, p1, true);

                        for pathlen1 in pathlen_min1..=pathlen_max {
                            for pathlen2 in pathlen_min2..=pathlen_max {
                                if pathlen1 + pathlen2 + length_inside > 3 {
                                    continue;
                                }
                                if self.check_short_cycle(p1, q1, pathlen1, cut_size) {
                                    continue;
                                }
                                if self.check_short_cycle(q2, p2, pathlen2, cut_size) {
                                    continue;
                                }
                                let mut has_smallcut = false;
                                'smallcut: for path1 in &shortest_path1s {
                                    for path2 in &shortest_path2s {
                                        if self.can_be_almost_minimal_mixed(
                                            path1, path2, pathlen1, pathlen2, cut_size,
                                        ) {
                                            continue;
                                        }
                                        let (s, t) =
                                            self.region_size(Region::Outside(path1, path2));
                                        let sz =
                                            max(s - max(pathlen1 + pathlen2 - 2, 0) + 1, 0) / 2 + t;
                                        let cut = path1.len() as i32 + path2.len() as i32 - 2
                                            + pathlen1
                                            + pathlen2;
                                        if is_forbidden_cut(cut, sz) {
                                            has_smallcut = true;
                                            break 'smallcut;
                                        }
                                    }
                                }
                                if has_smallcut {
                                    continue;
                                }
                                for contracted_path1 in &contracted_path1s {
                                    for contracted_path2 in &contracted_path2s {
                                        if contracted_path1.len() as i32 - 1 == self.dist[q1][p2]
                                            && contracted_path2.len() as i32 - 1
                                                == self.dist[q2][p1]
                                        {
                                            continue;
                                        }
                                        self.mark_region(
                                            Region::Outside(contracted_path1, contracted_path2),
                                            &[contracted_path1.as_slice(), contracted_path2.as_slice()],
                                            is_reductable,
                                        );
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Configuration;
    use crate::report::{Level, Log};
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
    fn enclosed_component_test() {
        let conf = birkhoff_diamond();
        // the path 5 - 9 - 4 pinches off everything but the arc vertex 4
        let mut inside = conf.region_vertices(Region::Enclosed(&[5, 9, 4]));
        inside.sort_unstable();
        assert_eq!(inside, vec![0, 1, 2, 3, 6, 7, 8]);
        assert_eq!(conf.region_size(Region::Enclosed(&[5, 9, 4])), (4, 3));
        // and nothing lies on the other side of 4 - 9 - 5
        assert!(conf.region_vertices(Region::Enclosed(&[4, 9, 5])).is_empty());
    }

    #[test]
    fn component_id_equivalence_test() {
        let conf = Cursor::new(
            "pocket behind two interior vertices\n9 6\n\
             7 5 1 2 3 8 9\n\
             8 5 4 5 6 7 9\n\
             9 2 7 8\n",
        );
        let conf = Configuration::read_conf(conf).unwrap();
        let ids = conf.component_id_equivalence(&[6, 7]);
        // ring stays component 0, the pocket vertex gets its own component
        for v in 0..6 {
            assert_eq!(ids[v], Some(0));
        }
        assert_eq!(ids[6], None);
        assert_eq!(ids[7], None);
        assert_eq!(ids[8], Some(1));
    }

    #[test]
    fn cut_reduction_pocket_test() {
        let conf = Cursor::new(
            "pocket behind two interior vertices\n9 6\n\
             7 5 1 2 3 8 9\n\
             8 5 4 5 6 7 9\n\
             9 2 7 8\n",
        );
        let mut conf = Configuration::read_conf(conf).unwrap();
        let mut buf: Vec<u8> = Vec::new();
        let mut log = Log::new(&mut buf, Level::Info);
        conf.set_contract(Vec::new(), &mut log).unwrap();
        // vertex 8 sits behind the 2-cut {6, 7}
        assert!(conf.is_reductable_inside(8));
        assert!(!conf.is_reductable_inside(6));
        assert!(!conf.is_reductable_inside(7));
        for v in 0..6 {
            assert!(!conf.is_reductable_inside(v));
        }
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("vertex 8 is erased by 6"));
        assert!(out.contains("vertex 8 is erased by 7"));
    }

    #[test]
    fn no_interior_no_inside_reduction_test() {
        let conf = Cursor::new("plain hexagon\n6 6\n");
        let mut conf = Configuration::read_conf(conf).unwrap();
        let mut buf: Vec<u8> = Vec::new();
        let mut log = Log::new(&mut buf, Level::Info);
        conf.set_contract(Vec::new(), &mut log).unwrap();
        for v in 0..conf.n {
            assert!(!conf.is_reductable_inside(v));
            assert!(!conf.is_reductable_outside(v, 6));
            assert!(!conf.is_reductable_outside(v, 7));
        }
    }

    #[test]
    fn empty_contraction_leaves_birkhoff_untouched_test() {
        let mut conf = birkhoff_diamond();
        let mut buf: Vec<u8> = Vec::new();
        let mut log = Log::new(&mut buf, Level::Info);
        conf.set_contract(Vec::new(), &mut log).unwrap();
        for v in 0..conf.n {
            assert!(!conf.is_reductable_inside(v));
            assert!(!conf.is_reductable_outside(v, 6));
            assert!(!conf.is_reductable_outside(v, 7));
        }
        assert!(String::from_utf8(buf).unwrap().is_empty());
    }
}
