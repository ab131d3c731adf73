///  Example#1
/// ```
/// use RustedGaussQuad::numerical::gauss_legendre::{integrate, format_result, GaussOrder};
/// // 2-point rule is exact for cubics
/// let value = integrate("x^3", 0.0, 2.0, GaussOrder::Two).unwrap();
/// assert_eq!(format_result(value), "4.00000000");
/// ```
/// Example#2
/// ```
/// use RustedGaussQuad::numerical::gauss_legendre::sample_curve;
/// let samples = sample_curve("2x + 1", 0.0, 1.0, 101).unwrap();
/// assert_eq!(samples.len(), 101);
/// assert_eq!(samples[0], (0.0, 1.0));
/// ```
pub mod gauss_legendre;
/// task api: configuration document, logging, run and export
pub mod integral_task;
