//! Corvid language runtime: value model and the `Dir` built-in.

#![allow(clippy::new_without_default)]

pub mod core;
pub mod errors;
mod builtins;
pub mod builtins_registry;
mod methods;
mod runtime;
mod util;

// Re-exports from core/
pub use crate::core::dir::DirHandle;
pub use crate::core::heap::{Heap, ManagedObject, ObjectId};
pub use crate::core::value::Value;

// Re-exports from util/
pub use util::{Capabilities, Environment, FileSystem, StdEnvironment, StdFileSystem};

pub use builtins_registry::{BuiltinFn, BuiltinProvider, BuiltinRegistry, StdBuiltinProvider};
pub use errors::{Result, RuntimeError};
pub use methods::instance_method_names;
pub use runtime::{Block, Runtime, RuntimeConfig};
