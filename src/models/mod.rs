pub mod card;
pub mod list;
pub mod release;

pub use card::*;
pub use list::*;
pub use release::*;
