pub mod diff;
pub mod input;
pub mod merge;
