mod check;
mod moves;
pub use check::*;
pub use moves::*;
