//! examples of usage of RustedGaussQuad
/// Gauss-Legendre integrals, sampling, export and task documents
pub mod quadrature_examples;
