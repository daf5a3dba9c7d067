//! Java detection domain model

pub mod effective;
pub mod inference;
pub mod managed_map;
pub mod property_map;

pub use effective::*;
pub use inference::*;
pub use managed_map::*;
pub use property_map::*;
