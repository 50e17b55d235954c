use crate::Value;
use crate::errors::{Result, RuntimeError, messages};
use crate::runtime::{Block, Runtime};

use super::{MethodKind, expect_int, validate_arity};

pub(super) fn dispatch(
    rt: &mut Runtime,
    recv: &Value,
    kind: MethodKind,
    args: &[Value],
    block: Option<Block<'_>>,
    method: &str,
) -> Result<Value> {
    match kind {
        MethodKind::DirClose => {
            validate_arity(args.len(), 0, 0)?;
            rt.dir_mut(recv)?.close();
            Ok(Value::Nil)
        }
        MethodKind::DirEach => {
            validate_arity(args.len(), 0, 0)?;
            let Some(block) = block else {
                return Err(RuntimeError::Argument(messages::NO_BLOCK_GIVEN.into()));
            };
            // The block may close or reposition this Dir; iteration follows
            // the snapshot taken here.
            let snapshot = rt.dir(recv)?.snapshot();
            for name in snapshot.iter() {
                block(rt, &[Value::Str(name.clone())])?;
            }
            Ok(recv.clone())
        }
        MethodKind::DirEntries => {
            validate_arity(args.len(), 0, 0)?;
            let items = rt
                .dir(recv)?
                .entries()
                .iter()
                .map(|name| Value::Str(name.clone()))
                .collect();
            Ok(rt.new_list(items))
        }
        MethodKind::DirPath => {
            validate_arity(args.len(), 0, 0)?;
            Ok(Value::str(rt.dir(recv)?.path()?))
        }
        MethodKind::DirTell => {
            validate_arity(args.len(), 0, 0)?;
            Ok(Value::Int(rt.dir(recv)?.tell()))
        }
        MethodKind::DirSeek => {
            validate_arity(args.len(), 1, 1)?;
            let pos = expect_int(&args[0])?;
            rt.dir_mut(recv)?.seek(pos);
            Ok(recv.clone())
        }
        MethodKind::DirSetPos => {
            validate_arity(args.len(), 1, 1)?;
            let pos = expect_int(&args[0])?;
            rt.dir_mut(recv)?.seek(pos);
            Ok(args[0].clone())
        }
        MethodKind::DirRead => {
            validate_arity(args.len(), 0, 0)?;
            Ok(match rt.dir_mut(recv)?.read()? {
                Some(name) => Value::Str(name),
                None => Value::Nil,
            })
        }
        MethodKind::DirRewind => {
            validate_arity(args.len(), 0, 0)?;
            Ok(Value::Int(rt.dir_mut(recv)?.rewind()))
        }
        MethodKind::Unknown => Err(RuntimeError::NoMethod {
            method: method.to_string(),
            receiver: recv.type_name(),
        }),
    }
}
