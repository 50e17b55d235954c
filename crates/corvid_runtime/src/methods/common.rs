use crate::Value;
use crate::errors::{Result, RuntimeError};

pub(crate) fn validate_arity(args_len: usize, min: usize, max: usize) -> Result<()> {
    if args_len < min || args_len > max {
        return Err(RuntimeError::arity(min, max, args_len));
    }
    Ok(())
}

pub(crate) fn expect_str(value: &Value) -> Result<&str> {
    value.as_str().ok_or(RuntimeError::TypeMismatch {
        expected: "str",
        actual: value.type_name(),
    })
}

pub(crate) fn expect_int(value: &Value) -> Result<i64> {
    value.as_int().ok_or(RuntimeError::TypeMismatch {
        expected: "int",
        actual: value.type_name(),
    })
}
