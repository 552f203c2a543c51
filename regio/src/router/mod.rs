pub mod collections;
pub mod fanout;
pub mod macros;

pub mod util;
