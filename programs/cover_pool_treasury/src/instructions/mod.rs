// programs/cover_pool_treasury/src/instructions/mod.rs

pub mod initialize;
pub mod funds;
pub mod flows;
pub mod views;

pub use initialize::*;
pub use funds::*;
pub use flows::*;
pub use views::*;
