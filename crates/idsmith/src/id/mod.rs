mod decode;
mod snowflake;

pub use decode::*;
pub use snowflake::*;
