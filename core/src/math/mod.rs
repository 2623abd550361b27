pub mod quadrature;

pub use quadrature::QuadratureHelper;
