//! Verifier for reducible configurations in cubic graphs with girth and
//! cycle-cut constraints.
//!
//! Given a plane near-triangulation with its bounding ring (the free
//! completion) and a set of contraction edges, the checker computes the
//! contracted distance metric, the vertices eliminated by small cut
//! reductions inside and outside the configuration, and lower bounds on the
//! lengths of outer paths. On top of these primitives it evaluates a fixed
//! catalogue of 6-cut and 7-cut danger patterns and reports every match as a
//! warning line.

pub mod bounds;
pub mod catalogue;
pub mod configuration;
pub mod cust_errors;
pub mod dual_edges;
pub mod reduction;
pub mod report;
