pub mod polygon;
pub mod random;
pub mod checks;
mod vtest;

pub use vtest::VTest;
