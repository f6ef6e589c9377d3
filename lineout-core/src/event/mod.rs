mod parse;
mod types;


pub use types::*;
