// programs/cover_risk_registry/src/instructions/mod.rs

pub mod initialize;
pub mod profiles;
pub mod pricing;

pub use initialize::*;
pub use profiles::*;
pub use pricing::*;
