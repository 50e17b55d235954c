use corvid_runtime::{Runtime, instance_method_names};

use crate::commands::write_line;

pub(crate) fn run() {
    let rt = Runtime::new();
    let mut out = std::io::stdout().lock();
    for name in rt.builtin_names() {
        write_line(&mut out, format_args!("{name}"));
    }
    for name in instance_method_names() {
        write_line(&mut out, format_args!("Dir#{name}"));
    }
}
