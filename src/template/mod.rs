pub mod definition;
pub mod parse;

pub use definition::*;
