pub mod source;

#[allow(unused_imports)]
pub use source::{MockSource, package};
