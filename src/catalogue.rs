//! The catalogue of dangerous cut patterns.
//!
//! Every entry describes a suspected 6- or 7-cut around the configuration:
//! a tuple of ring anchors under contracted-distance constraints, a length
//! partition of the surrounding cycle, per-segment one-edge flags and an
//! optional bound on the vertices enclosed after the contraction. A single
//! evaluator iterates the table and reports every match.

use std::cmp::max;
use std::collections::BTreeSet;
use std::error;
use std::fs::File;
use std::io::BufReader;

use crate::configuration::Configuration;
use crate::reduction::Region;
use crate::report::Log;

/// The anchor groups of the catalogue. Each variant selects ring tuples in
/// cyclic order whose consecutive (or, for `Fan3`, pairwise) contracted
/// distances match the given values.
#[derive(Debug, Clone, Copy)]
enum Anchors {
    /// `(a, b)` with `dist(a, b) = d0`.
    Pair(i32),
    /// `(a, b, c)` with `dist(a, b) = d0`, `dist(b, c) = d1`.
    Chain3(i32, i32),
    /// `(a, b, c)` with `dist(a, b) = d0`, `dist(a, c) = d1`,
    /// `dist(b, c) = d2`.
    Fan3(i32, i32, i32),
    /// `(a, b, c, d)` with `dist(a, b) = d0`, `dist(c, d) = d1`.
    PairPair(i32, i32),
    /// `(a, b, c, d)` with consecutive distances `d0`, `d1`, `d2`.
    Chain4(i32, i32, i32),
    /// `(a, b, c, d, e)` with `dist(a, b) = d0`, `dist(b, c) = d1`,
    /// `dist(d, e) = d2`.
    Chain3Pair(i32, i32, i32),
}

/// The post-contraction component bound attached to a pattern.
#[derive(Debug, Clone, Copy)]
enum SizeCheck {
    None,
    /// One spliced ring-to-ring arc, closed by an outer path of length `k`.
    Arc {
        order: &'static [usize],
        k: i32,
        rev: bool,
    },
    /// Two spliced arcs closed by outer paths of lengths `k1` and `k2`.
    TwoArcs {
        first: &'static [usize],
        second: &'static [usize],
        k1: i32,
        k2: i32,
    },
}

/// One signature of a pattern: the anchor permutation fed to `is_valid`,
/// the segment lengths, the one-edge flags and the size check.
struct PatternRow {
    sig: &'static str,
    order: &'static [usize],
    lens: &'static [i32],
    onedge: &'static [bool],
    check: SizeCheck,
}

/// A named pattern: one anchor group and the signatures tested on each of
/// its tuples.
struct PatternBlock {
    name: &'static str,
    anchors: Anchors,
    rows: &'static [PatternRow],
}

const F: bool = false;
const T: bool = true;

/// The full catalogue, in reporting order.
static CATALOGUE: &[PatternBlock] = &[
    PatternBlock {
        name: "6cut-1",
        anchors: Anchors::Pair(0),
        rows: &[
            PatternRow { sig: "24", order: &[0, 1], lens: &[2, 4], onedge: &[F, F],
                check: SizeCheck::Arc { order: &[1, 0], k: 4, rev: false } },
            PatternRow { sig: "42", order: &[0, 1], lens: &[4, 2], onedge: &[F, F],
                check: SizeCheck::Arc { order: &[0, 1], k: 4, rev: false } },
        ],
    },
    PatternBlock {
        name: "6cut-2",
        anchors: Anchors::PairPair(0, 0),
        rows: &[
            PatternRow { sig: "2121", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 1],
                onedge: &[F, F, F, F], check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "6cut-3",
        anchors: Anchors::Fan3(0, 0, 0),
        rows: &[
            PatternRow { sig: "222", order: &[0, 1, 2], lens: &[2, 2, 2], onedge: &[F, F, F],
                check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "6cut-4",
        anchors: Anchors::PairPair(0, 1),
        rows: &[
            PatternRow { sig: "2121", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 1],
                onedge: &[F, F, F, F], check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "6cut-4",
        anchors: Anchors::PairPair(0, 0),
        rows: &[
            PatternRow { sig: "2121-1", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 1],
                onedge: &[T, F, F, F], check: SizeCheck::None },
            PatternRow { sig: "2121-2", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 1],
                onedge: &[F, T, F, F], check: SizeCheck::None },
            PatternRow { sig: "2121-3", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 1],
                onedge: &[F, F, T, F], check: SizeCheck::None },
            PatternRow { sig: "2121-4", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 1],
                onedge: &[F, F, F, T], check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "6cut-5",
        anchors: Anchors::Fan3(0, 1, 1),
        rows: &[
            PatternRow { sig: "222", order: &[0, 1, 2], lens: &[2, 2, 2], onedge: &[F, F, F],
                check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "6cut-5",
        anchors: Anchors::Fan3(0, 0, 0),
        rows: &[
            PatternRow { sig: "222-1", order: &[0, 1, 2], lens: &[2, 2, 2], onedge: &[T, F, F],
                check: SizeCheck::None },
            PatternRow { sig: "222-2", order: &[0, 1, 2], lens: &[2, 2, 2], onedge: &[F, T, F],
                check: SizeCheck::None },
            PatternRow { sig: "222-3", order: &[0, 1, 2], lens: &[2, 2, 2], onedge: &[F, F, T],
                check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "6cut-6",
        anchors: Anchors::Pair(0),
        rows: &[
            PatternRow { sig: "33", order: &[0, 1], lens: &[3, 3], onedge: &[F, F],
                check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "6cut-7",
        anchors: Anchors::Pair(1),
        rows: &[
            PatternRow { sig: "24", order: &[0, 1], lens: &[2, 4], onedge: &[F, F],
                check: SizeCheck::Arc { order: &[1, 0], k: 4, rev: false } },
            PatternRow { sig: "42", order: &[0, 1], lens: &[4, 2], onedge: &[F, F],
                check: SizeCheck::Arc { order: &[0, 1], k: 4, rev: false } },
        ],
    },
    PatternBlock {
        name: "6cut-7",
        anchors: Anchors::Pair(0),
        rows: &[
            PatternRow { sig: "24-1", order: &[0, 1], lens: &[2, 4], onedge: &[T, F],
                check: SizeCheck::Arc { order: &[1, 0], k: 5, rev: false } },
            PatternRow { sig: "42-1", order: &[0, 1], lens: &[4, 2], onedge: &[T, F],
                check: SizeCheck::Arc { order: &[0, 1], k: 5, rev: false } },
            PatternRow { sig: "24-2", order: &[0, 1], lens: &[2, 4], onedge: &[F, T],
                check: SizeCheck::Arc { order: &[1, 0], k: 5, rev: false } },
            PatternRow { sig: "42-2", order: &[0, 1], lens: &[4, 2], onedge: &[F, T],
                check: SizeCheck::Arc { order: &[0, 1], k: 5, rev: false } },
        ],
    },
    PatternBlock {
        name: "6cut-8",
        anchors: Anchors::PairPair(1, 1),
        rows: &[
            PatternRow { sig: "2121", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 1],
                onedge: &[F, F, F, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 1, k2: 1 } },
        ],
    },
    PatternBlock {
        name: "6cut-8",
        anchors: Anchors::PairPair(0, 1),
        rows: &[
            PatternRow { sig: "2121-1", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 1],
                onedge: &[T, F, F, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 1 } },
            PatternRow { sig: "2121-2", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 1],
                onedge: &[F, T, F, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 1 } },
        ],
    },
    PatternBlock {
        name: "6cut-8",
        anchors: Anchors::PairPair(0, 0),
        rows: &[
            PatternRow { sig: "2121-14", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 1],
                onedge: &[T, F, F, T],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 3, k2: 1 } },
            PatternRow { sig: "2121-23", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 1],
                onedge: &[F, T, T, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 3, k2: 1 } },
            PatternRow { sig: "2121-13", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 1],
                onedge: &[T, F, T, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 2 } },
            PatternRow { sig: "2121-24", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 1],
                onedge: &[F, T, F, T],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 2 } },
        ],
    },
    PatternBlock {
        name: "6cut-9",
        anchors: Anchors::Chain3(1, 1),
        rows: &[
            PatternRow { sig: "222", order: &[0, 1, 2], lens: &[2, 2, 2], onedge: &[F, F, F],
                check: SizeCheck::Arc { order: &[0, 1, 2], k: 2, rev: true } },
        ],
    },
    PatternBlock {
        name: "6cut-9",
        anchors: Anchors::Chain3(0, 1),
        rows: &[
            PatternRow { sig: "222-1", order: &[0, 1, 2], lens: &[2, 2, 2], onedge: &[T, F, F],
                check: SizeCheck::Arc { order: &[0, 1, 2], k: 3, rev: true } },
        ],
    },
    PatternBlock {
        name: "6cut-9",
        anchors: Anchors::Chain3(1, 0),
        rows: &[
            PatternRow { sig: "222-3", order: &[0, 1, 2], lens: &[2, 2, 2], onedge: &[F, F, T],
                check: SizeCheck::Arc { order: &[0, 1, 2], k: 3, rev: true } },
        ],
    },
    PatternBlock {
        name: "6cut-9",
        anchors: Anchors::Fan3(0, 0, 0),
        rows: &[
            PatternRow { sig: "222-13", order: &[0, 1, 2], lens: &[2, 2, 2], onedge: &[T, F, T],
                check: SizeCheck::Arc { order: &[0, 1, 2], k: 4, rev: true } },
            PatternRow { sig: "222-13", order: &[1, 2, 0], lens: &[2, 2, 2], onedge: &[T, F, T],
                check: SizeCheck::Arc { order: &[1, 2, 0], k: 4, rev: true } },
            PatternRow { sig: "222-13", order: &[2, 0, 1], lens: &[2, 2, 2], onedge: &[T, F, T],
                check: SizeCheck::Arc { order: &[2, 0, 1], k: 4, rev: true } },
        ],
    },
    PatternBlock {
        name: "6cut-9",
        anchors: Anchors::PairPair(0, 0),
        rows: &[
            PatternRow { sig: "2220-14", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 0],
                onedge: &[T, F, F, T],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 2 } },
            PatternRow { sig: "2022-23", order: &[0, 1, 2, 3], lens: &[2, 0, 2, 2],
                onedge: &[F, T, T, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 2 } },
        ],
    },
    PatternBlock {
        name: "6cut-10",
        anchors: Anchors::Fan3(1, 1, 1),
        rows: &[
            PatternRow { sig: "222", order: &[0, 1, 2], lens: &[2, 2, 2], onedge: &[F, F, F],
                check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "6cut-10",
        anchors: Anchors::Chain4(0, 1, 0),
        rows: &[
            PatternRow { sig: "2220-14", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 0],
                onedge: &[T, F, F, T], check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-1",
        anchors: Anchors::Pair(0),
        rows: &[
            PatternRow { sig: "25", order: &[0, 1], lens: &[2, 5], onedge: &[F, F],
                check: SizeCheck::Arc { order: &[1, 0], k: 5, rev: false } },
            PatternRow { sig: "52", order: &[0, 1], lens: &[5, 2], onedge: &[F, F],
                check: SizeCheck::Arc { order: &[0, 1], k: 5, rev: false } },
        ],
    },
    PatternBlock {
        name: "7cut-2",
        anchors: Anchors::PairPair(0, 0),
        rows: &[
            PatternRow { sig: "3121", order: &[0, 1, 2, 3], lens: &[3, 1, 2, 1],
                onedge: &[F, F, F, F], check: SizeCheck::None },
            PatternRow { sig: "2131", order: &[0, 1, 2, 3], lens: &[2, 1, 3, 1],
                onedge: &[F, F, F, F], check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-3",
        anchors: Anchors::PairPair(0, 0),
        rows: &[
            PatternRow { sig: "2122", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 2],
                onedge: &[F, F, F, F], check: SizeCheck::None },
            PatternRow { sig: "2221", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[F, F, F, F], check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-4",
        anchors: Anchors::Fan3(0, 0, 0),
        rows: &[
            PatternRow { sig: "322", order: &[0, 1, 2], lens: &[3, 2, 2], onedge: &[F, F, F],
                check: SizeCheck::None },
            PatternRow { sig: "232", order: &[0, 1, 2], lens: &[2, 3, 2], onedge: &[F, F, F],
                check: SizeCheck::None },
            PatternRow { sig: "223", order: &[0, 1, 2], lens: &[2, 2, 3], onedge: &[F, F, F],
                check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-5",
        anchors: Anchors::Chain3(0, 1),
        rows: &[
            PatternRow { sig: "223", order: &[0, 1, 2], lens: &[2, 2, 3], onedge: &[F, F, F],
                check: SizeCheck::Arc { order: &[0, 1, 2], k: 3, rev: true } },
        ],
    },
    PatternBlock {
        name: "7cut-5",
        anchors: Anchors::Chain3(1, 0),
        rows: &[
            PatternRow { sig: "223", order: &[0, 1, 2], lens: &[2, 2, 3], onedge: &[F, F, F],
                check: SizeCheck::Arc { order: &[0, 1, 2], k: 3, rev: true } },
        ],
    },
    PatternBlock {
        name: "7cut-5",
        anchors: Anchors::Fan3(0, 0, 0),
        rows: &[
            PatternRow { sig: "223-1", order: &[0, 1, 2], lens: &[2, 2, 3], onedge: &[T, F, F],
                check: SizeCheck::Arc { order: &[0, 1, 2], k: 4, rev: true } },
            PatternRow { sig: "223-1", order: &[1, 2, 0], lens: &[2, 2, 3], onedge: &[T, F, F],
                check: SizeCheck::Arc { order: &[1, 2, 0], k: 4, rev: true } },
            PatternRow { sig: "223-1", order: &[2, 0, 1], lens: &[2, 2, 3], onedge: &[T, F, F],
                check: SizeCheck::Arc { order: &[2, 0, 1], k: 4, rev: true } },
            PatternRow { sig: "223-1", order: &[0, 1, 2], lens: &[3, 2, 2], onedge: &[T, F, F],
                check: SizeCheck::Arc { order: &[1, 2, 0], k: 4, rev: true } },
            PatternRow { sig: "223-1", order: &[1, 2, 0], lens: &[3, 2, 2], onedge: &[T, F, F],
                check: SizeCheck::Arc { order: &[2, 0, 1], k: 4, rev: true } },
            PatternRow { sig: "223-1", order: &[2, 0, 1], lens: &[3, 2, 2], onedge: &[T, F, F],
                check: SizeCheck::Arc { order: &[0, 1, 2], k: 4, rev: true } },
        ],
    },
    PatternBlock {
        name: "7cut-6",
        anchors: Anchors::PairPair(0, 1),
        rows: &[
            PatternRow { sig: "2122", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 2],
                onedge: &[F, F, F, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 1, k2: 2 } },
            PatternRow { sig: "2221", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[F, F, F, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 1, k2: 2 } },
        ],
    },
    PatternBlock {
        name: "7cut-6",
        anchors: Anchors::PairPair(0, 0),
        rows: &[
            PatternRow { sig: "2122-1", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 2],
                onedge: &[T, F, F, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 1, k2: 3 } },
            PatternRow { sig: "2221-2", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[F, T, F, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 1, k2: 3 } },
            PatternRow { sig: "2221-3", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[F, F, T, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 1, k2: 3 } },
            PatternRow { sig: "2122-4", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 2],
                onedge: &[F, F, F, T],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 1, k2: 3 } },
            PatternRow { sig: "2221-1", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[T, F, F, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 2 } },
            PatternRow { sig: "2122-2", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 2],
                onedge: &[F, T, F, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 2 } },
            PatternRow { sig: "2122-3", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 2],
                onedge: &[F, F, T, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 2 } },
            PatternRow { sig: "2221-4", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[F, F, F, T],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 2 } },
        ],
    },
    PatternBlock {
        name: "7cut-7",
        anchors: Anchors::Chain4(0, 1, 1),
        rows: &[
            PatternRow { sig: "2221", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[F, F, F, F], check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-7",
        anchors: Anchors::Chain4(1, 1, 0),
        rows: &[
            PatternRow { sig: "2221", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[F, F, F, F], check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-7",
        anchors: Anchors::Chain4(0, 1, 0),
        rows: &[
            PatternRow { sig: "2221-1", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[T, F, F, F], check: SizeCheck::None },
            PatternRow { sig: "2221-4", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[F, F, F, T], check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-7",
        anchors: Anchors::Chain3Pair(0, 0, 0),
        rows: &[
            PatternRow { sig: "22021-34", order: &[0, 1, 2, 3, 4], lens: &[2, 2, 0, 2, 1],
                onedge: &[F, F, T, T, F], check: SizeCheck::None },
            PatternRow { sig: "22120-15", order: &[0, 1, 2, 3, 4], lens: &[2, 2, 1, 2, 0],
                onedge: &[T, F, F, F, T], check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-8",
        anchors: Anchors::Chain4(1, 0, 1),
        rows: &[
            PatternRow { sig: "2221", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[F, F, F, F], check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-8",
        anchors: Anchors::Chain4(0, 0, 1),
        rows: &[
            PatternRow { sig: "2221-1", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[T, F, F, F], check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-8",
        anchors: Anchors::Chain4(1, 0, 0),
        rows: &[
            PatternRow { sig: "2221-4", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[F, F, F, T], check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-8",
        anchors: Anchors::Chain4(0, 0, 0),
        rows: &[
            PatternRow { sig: "2221-14", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[T, F, F, T], check: SizeCheck::None },
            PatternRow { sig: "2221-14", order: &[1, 2, 3, 0], lens: &[2, 2, 2, 1],
                onedge: &[T, F, F, T], check: SizeCheck::None },
            PatternRow { sig: "2221-14", order: &[2, 3, 0, 1], lens: &[2, 2, 2, 1],
                onedge: &[T, F, F, T], check: SizeCheck::None },
            PatternRow { sig: "2221-14", order: &[3, 0, 1, 2], lens: &[2, 2, 2, 1],
                onedge: &[T, F, F, T], check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-9",
        anchors: Anchors::Pair(0),
        rows: &[
            PatternRow { sig: "34", order: &[0, 1], lens: &[3, 4], onedge: &[F, F],
                check: SizeCheck::None },
            PatternRow { sig: "43", order: &[0, 1], lens: &[4, 3], onedge: &[F, F],
                check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-10",
        anchors: Anchors::Fan3(0, 1, 1),
        rows: &[
            PatternRow { sig: "322", order: &[0, 1, 2], lens: &[3, 2, 2], onedge: &[F, F, F],
                check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-10",
        anchors: Anchors::Fan3(0, 0, 0),
        rows: &[
            PatternRow { sig: "232-1", order: &[0, 1, 2], lens: &[2, 3, 2], onedge: &[T, F, F],
                check: SizeCheck::None },
            PatternRow { sig: "223-2", order: &[0, 1, 2], lens: &[2, 2, 3], onedge: &[F, T, F],
                check: SizeCheck::None },
            PatternRow { sig: "322-3", order: &[0, 1, 2], lens: &[3, 2, 2], onedge: &[F, F, T],
                check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-11",
        anchors: Anchors::PairPair(0, 1),
        rows: &[
            PatternRow { sig: "3121", order: &[0, 1, 2, 3], lens: &[3, 1, 2, 1],
                onedge: &[F, F, F, F], check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-11",
        anchors: Anchors::PairPair(0, 0),
        rows: &[
            PatternRow { sig: "2131-1", order: &[0, 1, 2, 3], lens: &[2, 1, 3, 1],
                onedge: &[T, F, F, F], check: SizeCheck::None },
            PatternRow { sig: "2131-2", order: &[0, 1, 2, 3], lens: &[2, 1, 3, 1],
                onedge: &[F, T, F, F], check: SizeCheck::None },
            PatternRow { sig: "3121-3", order: &[0, 1, 2, 3], lens: &[3, 1, 2, 1],
                onedge: &[F, F, T, F], check: SizeCheck::None },
            PatternRow { sig: "3121-4", order: &[0, 1, 2, 3], lens: &[3, 1, 2, 1],
                onedge: &[F, F, F, T], check: SizeCheck::None },
        ],
    },
    PatternBlock {
        name: "7cut-12",
        anchors: Anchors::Pair(1),
        rows: &[
            PatternRow { sig: "25", order: &[0, 1], lens: &[2, 5], onedge: &[F, F],
                check: SizeCheck::Arc { order: &[1, 0], k: 5, rev: false } },
            PatternRow { sig: "52", order: &[0, 1], lens: &[5, 2], onedge: &[F, F],
                check: SizeCheck::Arc { order: &[0, 1], k: 5, rev: false } },
        ],
    },
    PatternBlock {
        name: "7cut-12",
        anchors: Anchors::Pair(0),
        rows: &[
            PatternRow { sig: "25-1", order: &[0, 1], lens: &[2, 5], onedge: &[T, F],
                check: SizeCheck::Arc { order: &[1, 0], k: 6, rev: false } },
            PatternRow { sig: "52-1", order: &[0, 1], lens: &[5, 2], onedge: &[T, F],
                check: SizeCheck::Arc { order: &[0, 1], k: 6, rev: false } },
            PatternRow { sig: "25-2", order: &[0, 1], lens: &[2, 5], onedge: &[F, T],
                check: SizeCheck::Arc { order: &[1, 0], k: 6, rev: false } },
            PatternRow { sig: "52-2", order: &[0, 1], lens: &[5, 2], onedge: &[F, T],
                check: SizeCheck::Arc { order: &[0, 1], k: 6, rev: false } },
        ],
    },
    PatternBlock {
        name: "7cut-13",
        anchors: Anchors::Chain3(1, 1),
        rows: &[
            PatternRow { sig: "223", order: &[0, 1, 2], lens: &[2, 2, 3], onedge: &[F, F, F],
                check: SizeCheck::Arc { order: &[0, 1, 2], k: 3, rev: true } },
        ],
    },
    PatternBlock {
        name: "7cut-13",
        anchors: Anchors::Chain3(0, 1),
        rows: &[
            PatternRow { sig: "223-1", order: &[0, 1, 2], lens: &[2, 2, 3], onedge: &[T, F, F],
                check: SizeCheck::Arc { order: &[0, 1, 2], k: 4, rev: true } },
        ],
    },
    PatternBlock {
        name: "7cut-13",
        anchors: Anchors::Chain3(1, 0),
        rows: &[
            PatternRow { sig: "223-3", order: &[0, 1, 2], lens: &[2, 2, 3], onedge: &[F, F, T],
                check: SizeCheck::Arc { order: &[0, 1, 2], k: 4, rev: true } },
        ],
    },
    PatternBlock {
        name: "7cut-13",
        anchors: Anchors::Fan3(0, 0, 0),
        rows: &[
            PatternRow { sig: "322-12", order: &[0, 1, 2], lens: &[3, 2, 2], onedge: &[T, T, F],
                check: SizeCheck::Arc { order: &[1, 2, 0], k: 5, rev: true } },
            PatternRow { sig: "223-13", order: &[0, 1, 2], lens: &[2, 2, 3], onedge: &[T, F, T],
                check: SizeCheck::Arc { order: &[0, 1, 2], k: 5, rev: true } },
            PatternRow { sig: "232-23", order: &[0, 1, 2], lens: &[2, 3, 2], onedge: &[F, T, T],
                check: SizeCheck::Arc { order: &[2, 0, 1], k: 5, rev: true } },
        ],
    },
    PatternBlock {
        name: "7cut-13",
        anchors: Anchors::PairPair(0, 0),
        rows: &[
            PatternRow { sig: "2320-14", order: &[0, 1, 2, 3], lens: &[2, 3, 2, 0],
                onedge: &[T, F, F, T],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 3 } },
            PatternRow { sig: "2023-23", order: &[0, 1, 2, 3], lens: &[2, 0, 2, 3],
                onedge: &[F, T, T, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 3 } },
        ],
    },
    PatternBlock {
        name: "7cut-14",
        anchors: Anchors::PairPair(1, 1),
        rows: &[
            PatternRow { sig: "2221", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[F, F, F, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 1, k2: 2 } },
            PatternRow { sig: "2122", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 2],
                onedge: &[F, F, F, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 1, k2: 2 } },
        ],
    },
    PatternBlock {
        name: "7cut-14",
        anchors: Anchors::PairPair(0, 1),
        rows: &[
            PatternRow { sig: "2122-1", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 2],
                onedge: &[T, F, F, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 1, k2: 3 } },
            PatternRow { sig: "2221-2", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[F, T, F, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 1, k2: 3 } },
            PatternRow { sig: "2221-1", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[T, F, F, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 2 } },
            PatternRow { sig: "2122-2", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 2],
                onedge: &[F, T, F, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 2 } },
        ],
    },
    PatternBlock {
        name: "7cut-14",
        anchors: Anchors::PairPair(0, 0),
        rows: &[
            PatternRow { sig: "2122-14", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 2],
                onedge: &[T, F, F, T],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 1, k2: 4 } },
            PatternRow { sig: "2221-23", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[F, T, T, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 1, k2: 4 } },
            PatternRow { sig: "2221-14", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[T, F, F, T],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 3 } },
            PatternRow { sig: "2122-23", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 2],
                onedge: &[F, T, T, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 3 } },
            PatternRow { sig: "2122-13", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 2],
                onedge: &[T, F, T, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 3 } },
            PatternRow { sig: "2221-24", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[F, T, F, T],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 3 } },
            PatternRow { sig: "2221-13", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[T, F, T, F],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 3 } },
            PatternRow { sig: "2122-24", order: &[0, 1, 2, 3], lens: &[2, 1, 2, 2],
                onedge: &[F, T, F, T],
                check: SizeCheck::TwoArcs { first: &[0, 1], second: &[2, 3], k1: 2, k2: 3 } },
        ],
    },
    PatternBlock {
        name: "7cut-15",
        anchors: Anchors::Chain4(1, 1, 1),
        rows: &[
            PatternRow { sig: "2221", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[F, F, F, F],
                check: SizeCheck::Arc { order: &[0, 1, 2, 3], k: 1, rev: true } },
        ],
    },
    PatternBlock {
        name: "7cut-15",
        anchors: Anchors::Chain4(0, 1, 1),
        rows: &[
            PatternRow { sig: "2221-1", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[T, F, F, F],
                check: SizeCheck::Arc { order: &[0, 1, 2, 3], k: 2, rev: true } },
        ],
    },
    PatternBlock {
        name: "7cut-15",
        anchors: Anchors::Chain4(1, 1, 0),
        rows: &[
            PatternRow { sig: "2221-4", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[F, F, F, T],
                check: SizeCheck::Arc { order: &[0, 1, 2, 3], k: 2, rev: true } },
        ],
    },
    PatternBlock {
        name: "7cut-15",
        anchors: Anchors::Chain4(0, 1, 0),
        rows: &[
            PatternRow { sig: "2221-14", order: &[0, 1, 2, 3], lens: &[2, 2, 2, 1],
                onedge: &[T, F, F, T],
                check: SizeCheck::Arc { order: &[0, 1, 2, 3], k: 3, rev: true } },
        ],
    },
    PatternBlock {
        name: "7cut-15",
        anchors: Anchors::Chain3Pair(1, 0, 0),
        rows: &[
            PatternRow { sig: "22021-34", order: &[0, 1, 2, 3, 4], lens: &[2, 2, 0, 2, 1],
                onedge: &[F, F, T, T, F],
                check: SizeCheck::TwoArcs { first: &[0, 1, 2], second: &[3, 4], k1: 1, k2: 2 } },
        ],
    },
    PatternBlock {
        name: "7cut-15",
        anchors: Anchors::Chain3Pair(0, 1, 0),
        rows: &[
            PatternRow { sig: "22120-15", order: &[0, 1, 2, 3, 4], lens: &[2, 2, 1, 2, 0],
                onedge: &[T, F, F, F, T],
                check: SizeCheck::TwoArcs { first: &[0, 1, 2], second: &[3, 4], k1: 1, k2: 2 } },
        ],
    },
    PatternBlock {
        name: "7cut-15",
        anchors: Anchors::Chain3Pair(0, 0, 0),
        rows: &[
            PatternRow { sig: "22120-135", order: &[0, 1, 2, 3, 4], lens: &[2, 2, 1, 2, 0],
                onedge: &[T, F, T, F, T],
                check: SizeCheck::TwoArcs { first: &[0, 1, 2], second: &[3, 4], k1: 2, k2: 2 } },
            PatternRow { sig: "22021-134", order: &[0, 1, 2, 3, 4], lens: &[2, 2, 0, 2, 1],
                onedge: &[T, F, T, T, F],
                check: SizeCheck::TwoArcs { first: &[0, 1, 2], second: &[3, 4], k1: 2, k2: 2 } },
        ],
    },
];

impl Configuration {

    /// Checks a suspected cut: ring anchors `vs`, segment lengths `lens` and
    /// per-segment one-edge flags. The cut survives iff no segment, taken in
    /// either ring direction, forces a forbidden cycle.
    pub fn is_valid(&self, vs: &[usize], lens: &[i32], onedge: &[bool]) -> bool {
        assert_eq!(vs.len(), lens.len());
        assert_eq!(vs.len(), onedge.len());
        let cut_size: i32 = lens.iter().sum();
        assert!(cut_size == 6 || cut_size == 7);

        let m = vs.len();
        for i in 0..m {
            let j = (i + 1) % m;
            if onedge[i] && onedge[j] {
                continue;
            }
            if onedge[i] || onedge[j] {
                if self.forbidden_cycle_oneedge(vs[i], vs[j], lens[i], cut_size)
                    || self.forbidden_cycle_oneedge(vs[j], vs[i], cut_size - lens[i], cut_size)
                {
                    return false;
                }
            } else if self.forbidden_cycle(vs[i], vs[j], lens[i], cut_size)
                || self.forbidden_cycle(vs[j], vs[i], cut_size - lens[i], cut_size)
            {
                return false;
            }
        }
        true
    }

    /// Counts the ring and interior representatives of `component` that
    /// survive the contraction and the cut reductions.
    fn vertex_size_after_contract(&self, component: &[usize], cut_size: i32) -> (i32, i32) {
        assert!(cut_size == 6 || cut_size == 7);
        let mut s = 0;
        let mut t = 0;
        for &v in component {
            if self.reductable_inside[v] || self.is_reductable_outside(v, cut_size) {
                continue;
            }
            if v < self.r && self.representative(v) == v {
                s += 1;
            } else if v >= self.r && self.representative(v) == v {
                t += 1;
            }
        }
        (s, t)
    }

    /// Splices the contracted shortest paths through the anchors `vs` into
    /// one ring-to-ring arc, closes it with an outer path of length `k` and
    /// tests whether the contracted graph keeps a cycle that no admissible
    /// host graph has. With `rev` the complementary side of the arc is
    /// counted.
    pub fn forbidden_vertex_size(&self, vs: &[usize], k: i32, cut_size: i32, rev: bool) -> bool {
        assert!(vs.len() >= 2);

        let mut l = k;
        let path = self.splice_contracted_path(vs, &mut l);
        let path = if rev {
            let mut path = path;
            path.reverse();
            path
        } else {
            path
        };

        let component = self.region_vertices(Region::Enclosed(&path));
        let (s, t) = self.vertex_size_after_contract(&component, cut_size);
        let sz = max(s - (k - 1) + 1, 0) / 2 + t;

        (l == 4 && sz > 0) || (l == 5 && sz > 1) || (l == 6 && sz > 2)
    }

    /// Two-arc variant of `forbidden_vertex_size`: the anchors `vs1` and
    /// `vs2` are spliced separately and closed by outer paths of lengths
    /// `k1` and `k2`.
    pub fn forbidden_vertex_size2(
        &self,
        vs1: &[usize],
        vs2: &[usize],
        k1: i32,
        k2: i32,
        cut_size: i32,
    ) -> bool {
        assert!(vs1.len() >= 2);
        assert!(vs2.len() >= 2);

        let mut l = k1 + k2;
        let path1 = self.splice_contracted_path(vs1, &mut l);
        let path2 = self.splice_contracted_path(vs2, &mut l);

        let component = self.region_vertices(Region::Between(&path1, &path2));
        let (s, t) = self.vertex_size_after_contract(&component, cut_size);
        let sz = max(s - max(k1 + k2 - 2, 0) + 1, 0) / 2 + t;

        (l == 4 && sz > 0) || (l == 5 && sz > 1) || (l == 6 && sz > 2)
    }

    /// Joins the first contracted shortest path between every pair of
    /// consecutive anchors; `l` accumulates the contracted length.
    fn splice_contracted_path(&self, vs: &[usize], l: &mut i32) -> Vec<usize> {
        let mut path = vec![vs[0]];
        for i in 0..vs.len() - 1 {
            assert!(vs[i] < self.r);
            assert!(self.dist_contracted[vs[i]][vs[i + 1]] <= 1);
            *l += self.dist_contracted[vs[i]][vs[i + 1]];
            let path_i = self
                .shortest_paths(vs[i], vs[i + 1], true)
                .into_iter()
                .next()
                .expect("ring vertices are connected");
            path.extend(path_i.into_iter().skip(1));
        }
        assert!(*path.last().expect("spliced paths are nonempty") < self.r);
        path
    }

    /// After the contraction and the cut reductions against a surrounding
    /// 7-cycle, checks that at most one interior vertex survives and that a
    /// sole survivor has degree 7 in the contracted graph.
    pub fn check_degree7(&self) -> bool {
        let mut adj_contracted: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); self.n];
        for v in 0..self.n {
            if self.reductable_inside[v] || self.reductable_outside7[v] {
                continue;
            }
            for &u in &self.adj[v] {
                if self.reductable_inside[u] || self.reductable_outside7[u] {
                    continue;
                }
                adj_contracted[self.representative(v)].insert(self.representative(u));
                adj_contracted[self.representative(u)].insert(self.representative(v));
            }
        }

        let mut n_conf = 0;
        let mut not_deg7 = false;
        for v in 0..self.n {
            if self.reductable_inside[v] || self.reductable_outside7[v] {
                continue;
            }
            if v >= self.r && self.representative(v) == v {
                n_conf += 1;
                if adj_contracted[v].len() != 7 {
                    not_deg7 = true;
                    break;
                }
            }
        }
        n_conf >= 2 || not_deg7
    }

    /// Reports pairs and quadruples of ring vertices whose contracted
    /// distances admit a contractible loop around the configuration.
    pub fn can_have_contractible_loop(&self, log: &mut Log) {
        for cut_size in 6..=7 {
            for p in 0..self.r {
                for q in 0..self.r {
                    if p == q || p + 1 == q || (p == self.r - 1 && q == 0) {
                        continue;
                    }
                    let pathlen_max = 1 - self.dist_contracted[p][q];
                    if pathlen_max < 0 {
                        continue;
                    }
                    for pathlen in 0..=pathlen_max {
                        if self.check_short_cycle(p, q, pathlen, cut_size) {
                            continue;
                        }
                        log.info(&format!(
                            "dangerous: may be a bridge by {},{}-contractible in {}-cycle, general",
                            p, q, cut_size
                        ));
                    }
                }
            }
            let length = self.length_table(cut_size);
            for p1 in 0..self.r {
                for q1_ in p1 + 1..p1 + self.r {
                    for p2_ in q1_ + 1..p1 + self.r {
                        for q2_ in p2_ + 1..p1 + self.r {
                            let q1 = q1_ % self.r;
                            let p2 = p2_ % self.r;
                            let q2 = q2_ % self.r;
                            let length_inside =
                                self.dist_contracted[q1][p2] + self.dist_contracted[q2][p1];
                            if length_inside + length[p1][q1] + length[p2][q2] <= 1 {
                                log.info(&format!(
                                    "dangerous: may be a bridge by {},{}-contractible, {},{}-contractible in {}-cycle, general",
                                    p1, q1, p2, q2, cut_size
                                ));
                            }
                            if length_inside + length[p1][q1] + length[q2][p2] <= 1 {
                                log.info(&format!(
                                    "dangerous: may be a bridge by {},{}-contractible, {},{}-contractible in {}-cycle, general",
                                    p1, q1, q2, p2, cut_size
                                ));
                            }
                        }
                    }
                }
            }
        }
    }

    fn find_pairs(&self, d0: i32) -> Vec<Vec<usize>> {
        let mut tuples = Vec::new();
        for a in 0..self.r {
            for b in a + 1..self.r {
                if self.dist_contracted[a][b] == d0 {
                    tuples.push(vec![a, b]);
                }
            }
        }
        tuples
    }

    fn find_chain3(&self, d0: i32, d1: i32) -> Vec<Vec<usize>> {
        let mut tuples = Vec::new();
        for a in 0..self.r {
            for b in a + 1..self.r {
                if self.dist_contracted[a][b] != d0 {
                    continue;
                }
                for c in a + 1..b {
                    if self.dist_contracted[a][c] == d1 {
                        tuples.push(vec![b, a, c]);
                    }
                }
                for c in b + 1..a + self.r {
                    if self.dist_contracted[b][c % self.r] == d1 {
                        tuples.push(vec![a, b, c % self.r]);
                    }
                }
            }
        }
        tuples.sort_unstable();
        tuples.dedup();
        tuples
    }

    fn find_fan3(&self, d0: i32, d1: i32, d2: i32) -> Vec<Vec<usize>> {
        let mut tuples = Vec::new();
        for a in 0..self.r {
            for b in a + 1..self.r {
                if self.dist_contracted[a][b] != d0 {
                    continue;
                }
                for c in a + 1..b {
                    if self.dist_contracted[b][c] == d1 && self.dist_contracted[a][c] == d2 {
                        tuples.push(vec![b, a, c]);
                    }
                }
                for c in b + 1..a + self.r {
                    if self.dist_contracted[a][c % self.r] == d1
                        && self.dist_contracted[b][c % self.r] == d2
                    {
                        tuples.push(vec![a, b, c % self.r]);
                    }
                }
            }
        }
        tuples.sort_unstable();
        tuples.dedup();
        tuples
    }

    fn find_pair_pairs(&self, d0: i32, d1: i32) -> Vec<Vec<usize>> {
        let mut tuples = Vec::new();
        for a in 0..self.r {
            for b in a + 1..self.r {
                if self.dist_contracted[a][b] != d0 {
                    continue;
                }
                for c in b + 1..a + self.r {
                    for d in c + 1..a + self.r {
                        if self.dist_contracted[c % self.r][d % self.r] == d1 {
                            tuples.push(vec![a, b, c % self.r, d % self.r]);
                        }
                    }
                }
                for c in a + 1..b {
                    for d in c + 1..b {
                        if self.dist_contracted[c][d] == d1 {
                            tuples.push(vec![b, a, c, d]);
                        }
                    }
                }
            }
        }
        tuples.sort_unstable();
        tuples.dedup();
        tuples
    }

    fn find_chain4(&self, d0: i32, d1: i32, d2: i32) -> Vec<Vec<usize>> {
        let mut tuples = Vec::new();
        for a in 0..self.r {
            for b in a + 1..self.r {
                if self.dist_contracted[a][b] != d0 {
                    continue;
                }
                for c in b + 1..a + self.r {
                    if self.dist_contracted[b][c % self.r] != d1 {
                        continue;
                    }
                    for d in c + 1..a + self.r {
                        if self.dist_contracted[c % self.r][d % self.r] == d2 {
                            tuples.push(vec![a, b, c % self.r, d % self.r]);
                        }
                    }
                }
                for c in a + 1..b {
                    if self.dist_contracted[a][c] != d1 {
                        continue;
                    }
                    for d in c + 1..b {
                        if self.dist_contracted[c][d] == d2 {
                            tuples.push(vec![b, a, c, d]);
                        }
                    }
                }
            }
        }
        tuples.sort_unstable();
        tuples.dedup();
        tuples
    }

    fn find_chain3_pair(&self, d0: i32, d1: i32, d2: i32) -> Vec<Vec<usize>> {
        let mut tuples = Vec::new();
        for a in 0..self.r {
            for b in a + 1..self.r {
                if self.dist_contracted[a][b] != d0 {
                    continue;
                }
                for c in b + 1..a + self.r {
                    if self.dist_contracted[b][c % self.r] != d1 {
                        continue;
                    }
                    for d in c + 1..a + self.r {
                        for e in d + 1..a + self.r {
                            if self.dist_contracted[d % self.r][e % self.r] == d2 {
                                tuples.push(vec![a, b, c % self.r, d % self.r, e % self.r]);
                            }
                        }
                    }
                }
                for c in a + 1..b {
                    if self.dist_contracted[a][c] != d1 {
                        continue;
                    }
                    for d in c + 1..b {
                        for e in d + 1..b {
                            if self.dist_contracted[d][e] == d2 {
                                tuples.push(vec![b, a, c, d, e]);
                            }
                        }
                    }
                }
            }
        }
        tuples.sort_unstable();
        tuples.dedup();
        tuples
    }

    fn anchor_tuples(&self, anchors: Anchors) -> Vec<Vec<usize>> {
        match anchors {
            Anchors::Pair(d0) => self.find_pairs(d0),
            Anchors::Chain3(d0, d1) => self.find_chain3(d0, d1),
            Anchors::Fan3(d0, d1, d2) => self.find_fan3(d0, d1, d2),
            Anchors::PairPair(d0, d1) => self.find_pair_pairs(d0, d1),
            Anchors::Chain4(d0, d1, d2) => self.find_chain4(d0, d1, d2),
            Anchors::Chain3Pair(d0, d1, d2) => self.find_chain3_pair(d0, d1, d2),
        }
    }

    /// Runs the contractible-loop pre-check, the pattern catalogue and the
    /// degree-7 check, reporting every dangerous match on `log`.
    pub fn report_dangerous_cuts(&self, filename: &str, log: &mut Log) {
        self.can_have_contractible_loop(log);

        for block in CATALOGUE {
            let tuples = self.anchor_tuples(block.anchors);
            log.trace(&format!(
                "{}: {} anchor tuples for {:?}",
                block.name,
                tuples.len(),
                block.anchors
            ));
            for tuple in &tuples {
                for row in block.rows {
                    let vs: Vec<usize> = row.order.iter().map(|&i| tuple[i]).collect();
                    if !self.is_valid(&vs, row.lens, row.onedge) {
                        continue;
                    }
                    let cut_size: i32 = row.lens.iter().sum();
                    let dangerous = match row.check {
                        SizeCheck::None => true,
                        SizeCheck::Arc { order, k, rev } => {
                            let avs: Vec<usize> = order.iter().map(|&i| tuple[i]).collect();
                            !self.forbidden_vertex_size(&avs, k, cut_size, rev)
                        }
                        SizeCheck::TwoArcs { first, second, k1, k2 } => {
                            let vs1: Vec<usize> = first.iter().map(|&i| tuple[i]).collect();
                            let vs2: Vec<usize> = second.iter().map(|&i| tuple[i]).collect();
                            !self.forbidden_vertex_size2(&vs1, &vs2, k1, k2, cut_size)
                        }
                    };
                    if dangerous {
                        log.info(&format!(
                            "{} ({}) ({}) is dangerous in {}",
                            block.name,
                            row.sig,
                            join_indices(&vs),
                            filename
                        ));
                    }
                }
            }
        }

        if !self.check_degree7() {
            log.info(&format!(
                "7cut-16 (degree 7 in 7-cycle) is dangerous in {}",
                filename
            ));
        }
    }
}

fn join_indices(vs: &[usize]) -> String {
    vs.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reads the configuration from `filename`, installs the contraction named
/// by the dual edge ids and reports every dangerous cut pattern on `log`.
pub fn check(filename: &str, edgeids: &[usize], log: &mut Log) -> Result<(), Box<dyn error::Error>> {
    log.info(&format!("filename: {}", filename));
    let file = match File::open(filename) {
        Ok(file) => file,
        Err(err) => {
            log.critical(&format!("Failed to open {}", filename));
            return Err(Box::new(err));
        }
    };
    let mut conf = Configuration::read_conf(BufReader::new(file))?;
    log.debug(&format!(
        "{} vertices, ring size {}",
        conf.n, conf.r
    ));
    let edges = conf.edges_from_ids(edgeids)?;
    log.debug(&format!("contraction edges: {:?}", edges));
    conf.set_contract(edges, log)?;
    conf.report_dangerous_cuts(filename, log);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Level;
    use std::io::Cursor;

    /// Runs the full analysis on an in-memory configuration and returns the
    /// captured log lines.
    fn run(input: &str, contract: Vec<(usize, usize)>, name: &str) -> Vec<String> {
        let mut conf = Configuration::read_conf(Cursor::new(input)).unwrap();
        let mut buf: Vec<u8> = Vec::new();
        let mut log = Log::new(&mut buf, Level::Info);
        conf.set_contract(contract, &mut log).unwrap();
        conf.report_dangerous_cuts(name, &mut log);
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| l.to_owned())
            .collect()
    }

    #[test]
    fn empty_hexagon_fails_only_degree7_test() {
        let lines = run("plain hexagon\n6 6\n", Vec::new(), "hexagon.conf");
        assert_eq!(
            lines,
            vec!["[info] 7cut-16 (degree 7 in 7-cycle) is dangerous in hexagon.conf"]
        );
    }

    #[test]
    fn hexagon_with_center_is_clean_test() {
        // one interior vertex of degree 5: no pattern matches, the degree-7
        // check passes through the off-degree survivor
        let lines = run(
            "hexagon with center\n7 6\n7 5 1 2 3 4 5\n",
            Vec::new(),
            "center.conf",
        );
        assert!(lines.is_empty());
    }

    #[test]
    fn ring_chord_triggers_6cut1_test() {
        // contracting the interior chord 0 - 6 - 2 identifies two ring
        // vertices at raw distance 2
        let lines = run(
            "chorded hexagon\n7 6\n7 2 1 3\n",
            vec![(0, 6), (6, 2)],
            "chord.conf",
        );
        assert!(lines
            .iter()
            .any(|l| l.contains("6cut-1 (24) (0, 2) is dangerous in chord.conf")));
        // the 4+2 split dies in is_valid: the ring arc from 0 to 2 is
        // shorter than its segment
        assert!(!lines
            .iter()
            .any(|l| l.contains("6cut-1 (42) (0, 2) is dangerous in chord.conf")));
    }

    #[test]
    fn opposite_collapse_triggers_6cut6_test() {
        // collapsing two opposite ring vertices through an interior vertex
        let lines = run(
            "collapsed hexagon\n7 6\n7 2 1 4\n",
            vec![(0, 6), (6, 3)],
            "collapse.conf",
        );
        assert!(lines
            .iter()
            .any(|l| l.contains("6cut-6 (33) (0, 3) is dangerous in collapse.conf")));
    }

    #[test]
    fn warning_stream_is_deterministic_test() {
        let input = "chorded hexagon\n7 6\n7 2 1 3\n";
        let first = run(input, vec![(0, 6), (6, 2)], "twice.conf");
        let second = run(input, vec![(0, 6), (6, 2)], "twice.conf");
        assert_eq!(first, second);
    }

    #[test]
    fn degree7_warning_matches_check_test() {
        let input = "birkhoff diamond\n10 6\n\
                     7 5 6 1 2 8 10\n\
                     8 5 2 3 9 10 7\n\
                     9 5 3 4 5 10 8\n\
                     10 5 5 6 7 8 9\n";
        let mut conf = Configuration::read_conf(Cursor::new(input)).unwrap();
        let mut buf: Vec<u8> = Vec::new();
        let mut log = Log::new(&mut buf, Level::Info);
        conf.set_contract(vec![(0, 6), (6, 7)], &mut log).unwrap();
        conf.report_dangerous_cuts("birkhoff.conf", &mut log);
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out.contains("7cut-16"), !conf.check_degree7());
    }

    #[test]
    fn is_valid_collapsed_opposites_test() {
        let input = "collapsed hexagon\n7 6\n7 2 1 4\n";
        let mut conf = Configuration::read_conf(Cursor::new(input)).unwrap();
        let mut buf: Vec<u8> = Vec::new();
        let mut log = Log::new(&mut buf, Level::Info);
        conf.set_contract(vec![(0, 6), (6, 3)], &mut log).unwrap();
        // both ring arcs between 0 and 3 have length 3, so the 3+3 split
        // matches exactly and no segment is forbidden
        assert!(conf.is_valid(&[0, 3], &[3, 3], &[false, false]));
        // a 2+4 split forces a short cycle through the collapsed chord
        assert!(!conf.is_valid(&[0, 3], &[2, 4], &[false, false]));
    }

    #[test]
    fn anchor_groups_test() {
        let input = "collapsed hexagon\n7 6\n7 2 1 4\n";
        let mut conf = Configuration::read_conf(Cursor::new(input)).unwrap();
        let mut buf: Vec<u8> = Vec::new();
        let mut log = Log::new(&mut buf, Level::Info);
        conf.set_contract(vec![(0, 6), (6, 3)], &mut log).unwrap();
        assert_eq!(conf.anchor_tuples(Anchors::Pair(0)), vec![vec![0, 3]]);
        // adjacent ring pairs plus the pairs shortened through the collapse
        let ab1 = conf.anchor_tuples(Anchors::Pair(1));
        assert!(ab1.contains(&vec![0, 1]));
        assert!(ab1.contains(&vec![1, 3]));
        assert!(!ab1.contains(&vec![1, 4]));
        // anchor tuples are sorted and unique
        let chains = conf.anchor_tuples(Anchors::Chain3(1, 1));
        let mut sorted = chains.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(chains, sorted);
    }
}
