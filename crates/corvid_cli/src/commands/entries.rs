use corvid_runtime::{Runtime, Value};

use crate::args::CliArgs;
use crate::commands::{fail, print_names, single_arg};

pub(crate) fn run(args: &CliArgs) {
    let dir = single_arg(args, "dir");
    let mut rt = Runtime::new();
    let list = rt
        .call_builtin("Dir.entries", &[Value::str(dir)], None)
        .unwrap_or_else(|e| fail(e));
    print_names(&rt, &list, args.json_out);
}
