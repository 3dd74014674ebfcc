//! Leaf types shared with the rest of the host process. They carry no
//! allocation accounting of their own.

pub mod clone_buffer;
pub use clone_buffer::*;

pub mod datetime;
pub use datetime::*;
