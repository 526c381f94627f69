// programs/cover_claims_processor/src/instructions/mod.rs

pub mod initialize;
pub mod submission;
pub mod resolution;

pub use initialize::*;
pub use submission::*;
pub use resolution::*;
