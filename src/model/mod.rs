mod filter;
mod match_card;
mod raw;

pub use filter::*;
pub use match_card::*;
pub use raw::*;
