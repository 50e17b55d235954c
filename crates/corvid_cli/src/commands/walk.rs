use corvid_runtime::{Runtime, Value};

use crate::args::CliArgs;
use crate::commands::{fail, single_arg, write_line};

/// Reads the directory entry by entry, printing the cursor before each read.
pub(crate) fn run(args: &CliArgs) {
    let path = single_arg(args, "dir");
    let mut rt = Runtime::new();
    let dir = rt
        .call_builtin("Dir.open", &[Value::str(path)], None)
        .unwrap_or_else(|e| fail(e));
    let mut out = std::io::stdout().lock();
    loop {
        let pos = rt.dir(&dir).map(|h| h.tell()).unwrap_or_else(|e| fail(e));
        match rt.call_method(&dir, "read", &[], None) {
            Ok(Value::Nil) => break,
            Ok(name) => write_line(&mut out, format_args!("{pos}\t{}", rt.value_to_string(&name))),
            Err(e) => fail(e),
        }
    }
    if let Err(e) = rt.call_method(&dir, "close", &[], None) {
        fail(e);
    }
}
