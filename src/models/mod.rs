pub mod metric;
pub mod item;
pub mod problem;

pub use metric::*;
pub use item::*;
pub use problem::*;
