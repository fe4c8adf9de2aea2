//! Axisymmetric convection-diffusion FEM solver.
//!
//! Stage 1: local assemblers, scatter, boundary conditions
//! Stage 2: context, two-layer scheme, equation assembler
//! Stage 3: solver driver and solution field

pub mod assembler;
pub mod assembling;
pub mod boundary;
pub mod context;
pub mod material;
pub mod scheme;
pub mod solution;
pub mod solver;
pub mod velocity;
