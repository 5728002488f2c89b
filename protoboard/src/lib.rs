pub use board::*;
pub use card::*;
pub use drag::*;
pub use errors::*;
pub use layout::*;
pub use presentation::*;
pub use reference::*;
pub use store::*;
pub use view::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod card;
mod drag;
mod errors;
mod layout;
mod presentation;
mod reference;
mod store;
mod view;
mod visualization;
