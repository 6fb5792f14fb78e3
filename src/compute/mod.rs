//! Geometric computation: quadrant classification and coordinate validation.

pub mod classify;
pub mod validation;

pub use classify::{
    Intercepts, Quadrant, QuadrantIntercepts, QuadrantSet, classify, classify_endpoints, overlaps,
};
