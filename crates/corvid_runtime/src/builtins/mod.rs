mod dir;

pub use dir::*;
