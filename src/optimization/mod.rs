pub mod matching;
pub mod padding;
pub mod simplifier;
