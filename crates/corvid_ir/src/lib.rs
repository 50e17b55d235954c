//! Intermediate representation operands.
//!
//! Operands are the value nodes the optimizer builds before lowering to
//! executable instructions. Constant folding only needs two things from
//! them: whether they are constant, and compile-time element access for
//! array operands.
mod array;
mod constant;
mod operand;

pub use array::*;
pub use constant::*;
pub use operand::*;
