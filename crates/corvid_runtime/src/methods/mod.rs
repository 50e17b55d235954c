use crate::Value;
use crate::errors::{Result, RuntimeError};
use crate::runtime::{Block, Runtime};

mod common;
mod dir;

pub(crate) use common::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MethodKind {
    DirClose,
    DirEach,
    DirEntries,
    DirPath,
    DirTell,
    DirSeek,
    DirSetPos,
    DirRead,
    DirRewind,
    Unknown,
}

const INSTANCE_METHODS: &[&str] = &[
    "close", "each", "entries", "path", "tell", "pos", "seek", "pos=", "read", "rewind",
];

/// Names of the `Dir` instance methods, aliases included.
pub fn instance_method_names() -> &'static [&'static str] {
    INSTANCE_METHODS
}

impl MethodKind {
    pub(crate) fn from_str(s: &str) -> Self {
        match s {
            "close" => Self::DirClose,
            "each" => Self::DirEach,
            "entries" => Self::DirEntries,
            "path" => Self::DirPath,
            "tell" | "pos" => Self::DirTell,
            "seek" => Self::DirSeek,
            "pos=" => Self::DirSetPos,
            "read" => Self::DirRead,
            "rewind" => Self::DirRewind,
            _ => Self::Unknown,
        }
    }
}

pub(crate) fn dispatch_builtin_method(
    rt: &mut Runtime,
    recv: &Value,
    kind: MethodKind,
    args: &[Value],
    block: Option<Block<'_>>,
    method: &str,
) -> Result<Value> {
    match recv {
        Value::Dir(_) => dir::dispatch(rt, recv, kind, args, block, method),
        _ => Err(RuntimeError::NoMethod {
            method: method.to_string(),
            receiver: recv.type_name(),
        }),
    }
}
