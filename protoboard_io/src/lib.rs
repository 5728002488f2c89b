mod cards;
mod error;
mod layout;
mod session;
pub use cards::*;
pub use error::*;
pub use layout::*;
pub use session::*;
