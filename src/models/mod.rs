pub mod offer;
pub mod tier;

pub use offer::*;
pub use tier::*;
