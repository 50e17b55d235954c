mod capabilities;

pub use capabilities::{Capabilities, Environment, FileSystem, StdEnvironment, StdFileSystem};
