mod basic;
mod interface;
mod lock;
mod state;

pub use basic::*;
pub use interface::*;
pub use lock::*;
pub(crate) use state::*;
