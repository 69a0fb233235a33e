pub mod normalize;
pub mod similarity;

pub use normalize::{normalize, split};
pub use similarity::similarity;

#[cfg(test)]
#[path = "../../tests/src_inline/names/tests.rs"]
mod tests;
