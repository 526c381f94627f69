// programs/cover_policy_manager/src/instructions/mod.rs

pub mod initialize;
pub mod issuance;
pub mod lifecycle;

pub use initialize::*;
pub use issuance::*;
pub use lifecycle::*;
