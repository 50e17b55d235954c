//! Core runtime types: values, the object heap and built-in object state.

pub mod dir;
pub mod heap;
pub mod value;
