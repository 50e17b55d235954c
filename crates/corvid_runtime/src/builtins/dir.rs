//! Class-level `Dir` functions.

use tracing::{info, instrument, warn};

use crate::Value;
use crate::core::dir::list_entries;
use crate::errors::{Result, RuntimeError, messages};
use crate::methods::{expect_str, validate_arity};
use crate::runtime::{Block, Runtime};

pub fn builtin_dir_new(rt: &mut Runtime, args: &[Value], _block: Option<Block<'_>>) -> Result<Value> {
    validate_arity(args.len(), 1, 1)?;
    let path = expect_str(&args[0])?;
    rt.open_dir(path)
}

/// Without a block the caller owns the returned `Dir`. With a block the
/// `Dir` is closed after the block returns, even if it failed.
#[instrument(skip_all)]
pub fn builtin_dir_open(rt: &mut Runtime, args: &[Value], block: Option<Block<'_>>) -> Result<Value> {
    validate_arity(args.len(), 1, 1)?;
    let dir = rt.open_dir(expect_str(&args[0])?)?;
    let Some(block) = block else {
        return Ok(dir);
    };
    let result = block(rt, std::slice::from_ref(&dir));
    rt.dir_mut(&dir)?.close();
    result.map(|_| Value::Nil)
}

pub fn builtin_dir_entries(
    rt: &mut Runtime,
    args: &[Value],
    _block: Option<Block<'_>>,
) -> Result<Value> {
    validate_arity(args.len(), 1, 1)?;
    let path = expect_str(&args[0])?;
    let names = list_entries(rt.fs(), rt.current_dir(), path)?;
    let items = names.iter().map(|n| Value::str(n)).collect();
    Ok(rt.new_list(items))
}

pub fn builtin_dir_foreach(
    rt: &mut Runtime,
    args: &[Value],
    block: Option<Block<'_>>,
) -> Result<Value> {
    validate_arity(args.len(), 1, 1)?;
    let dir = rt.open_dir(expect_str(&args[0])?)?;
    // The Dir is internal to this call.
    let result = rt.call_method(&dir, "each", &[], block);
    rt.release(&dir);
    result.map(|_| Value::Nil)
}

/// Matches against the current directory. With a block, yields each match
/// and returns nil; otherwise returns the matches as a list.
#[instrument(skip_all)]
pub fn builtin_dir_glob(rt: &mut Runtime, args: &[Value], block: Option<Block<'_>>) -> Result<Value> {
    validate_arity(args.len(), 1, 1)?;
    let pattern = expect_str(&args[0])?;
    let names = rt
        .fs()
        .glob(rt.current_dir(), pattern)
        .map_err(RuntimeError::SystemCall)?;
    match block {
        Some(block) => {
            for name in &names {
                block(rt, &[Value::str(name)])?;
            }
            Ok(Value::Nil)
        }
        None => {
            let items = names.iter().map(|n| Value::str(n)).collect();
            Ok(rt.new_list(items))
        }
    }
}

/// Changes the current directory, permanently or for the extent of a block.
///
/// The block receives the path argument as given (or the home directory),
/// and the previous directory is restored before the block's result is
/// returned, whether it succeeded or not.
#[instrument(skip_all)]
pub fn builtin_dir_chdir(rt: &mut Runtime, args: &[Value], block: Option<Block<'_>>) -> Result<Value> {
    validate_arity(args.len(), 0, 1)?;
    let path = match args.first() {
        Some(v) => v.clone(),
        None => Value::str(&rt.home_dir()?),
    };
    let path_str = expect_str(&path)?;
    let target = rt.fs().resolve(rt.current_dir(), path_str);
    if !rt.fs().is_dir(&target) {
        return Err(RuntimeError::not_a_directory(path_str));
    }
    // Flatten `a/..` style paths where possible.
    let real = rt.fs().canonicalize(&target).unwrap_or(target);
    match block {
        Some(block) => rt.with_current_dir(real, |rt| block(rt, std::slice::from_ref(&path))),
        None => {
            rt.set_current_dir(real);
            Ok(Value::Int(0))
        }
    }
}

pub fn builtin_dir_chroot(
    _rt: &mut Runtime,
    args: &[Value],
    _block: Option<Block<'_>>,
) -> Result<Value> {
    validate_arity(args.len(), 1, 1)?;
    Err(RuntimeError::NotImplemented(messages::CHROOT_UNSUPPORTED.into()))
}

pub fn builtin_dir_getwd(rt: &mut Runtime, args: &[Value], _block: Option<Block<'_>>) -> Result<Value> {
    validate_arity(args.len(), 0, 0)?;
    Ok(Value::str(rt.current_dir()))
}

/// Deletes an empty directory.
pub fn builtin_dir_rmdir(rt: &mut Runtime, args: &[Value], _block: Option<Block<'_>>) -> Result<Value> {
    validate_arity(args.len(), 1, 1)?;
    let path = expect_str(&args[0])?;
    let target = rt.fs().resolve(rt.current_dir(), path);
    if !rt.fs().is_dir(&target) {
        return Err(RuntimeError::not_a_directory(path));
    }
    rt.fs()
        .remove_dir(&target)
        .map_err(|e| RuntimeError::SystemCall(format!("{e} - {path}")))?;
    info!(path = %target, "directory removed");
    Ok(Value::Int(0))
}

/// Creates `path` and any missing parents. The mode argument is accepted
/// and ignored. Returns 0 when created and 1 when creation failed.
pub fn builtin_dir_mkdir(rt: &mut Runtime, args: &[Value], _block: Option<Block<'_>>) -> Result<Value> {
    validate_arity(args.len(), 1, 2)?;
    let path = expect_str(&args[0])?;
    let target = rt.fs().resolve(rt.current_dir(), path);
    if rt.fs().is_dir(&target) {
        return Err(RuntimeError::AlreadyExists(path.to_string()));
    }
    match rt.fs().create_dir_all(&target) {
        Ok(()) => {
            info!(path = %target, "directory created");
            Ok(Value::Int(0))
        }
        Err(e) => {
            warn!(path = %target, error = %e, "mkdir failed");
            Ok(Value::Int(1))
        }
    }
}
