mod random_id;
mod random_string;

pub use random_id::*;
pub use random_string::*;
