//! Finite element and linear-algebra primitives for Boiling Core.

pub mod basis;
pub mod gmres;
pub mod quadrature;
pub mod sparse;
pub mod templates;
