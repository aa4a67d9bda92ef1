mod identity;
mod mutex;
mod snowflake;
mod status;

pub use identity::*;
pub(crate) use mutex::*;
pub use snowflake::*;
pub use status::*;
