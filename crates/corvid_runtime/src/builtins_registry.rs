use crate::Value;
use crate::builtins;
use crate::errors::Result;
use crate::runtime::{Block, BuiltinTable, Runtime};

pub type BuiltinFn = fn(&mut Runtime, &[Value], Option<Block<'_>>) -> Result<Value>;

pub struct BuiltinRegistry {
    entries: Vec<(String, BuiltinFn)>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn register(&mut self, name: &str, fun: BuiltinFn) {
        self.entries.push((name.to_string(), fun));
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Later registrations of the same name replace earlier ones.
    pub(crate) fn install_into(self, table: &mut BuiltinTable) {
        for (name, fun) in self.entries {
            table.insert(name, fun);
        }
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub trait BuiltinProvider {
    fn install(&self, registry: &mut BuiltinRegistry);
}

pub struct StdBuiltinProvider;

impl BuiltinProvider for StdBuiltinProvider {
    fn install(&self, registry: &mut BuiltinRegistry) {
        registry.register("Dir.new", builtins::builtin_dir_new);
        registry.register("Dir.open", builtins::builtin_dir_open);
        registry.register("Dir.entries", builtins::builtin_dir_entries);
        registry.register("Dir.foreach", builtins::builtin_dir_foreach);
        registry.register("Dir.glob", builtins::builtin_dir_glob);
        registry.register("Dir.[]", builtins::builtin_dir_glob);
        registry.register("Dir.chdir", builtins::builtin_dir_chdir);
        registry.register("Dir.chroot", builtins::builtin_dir_chroot);
        registry.register("Dir.getwd", builtins::builtin_dir_getwd);
        registry.register("Dir.pwd", builtins::builtin_dir_getwd);
        registry.register("Dir.mkdir", builtins::builtin_dir_mkdir);
        // removal
        registry.register("Dir.rmdir", builtins::builtin_dir_rmdir);
        registry.register("Dir.unlink", builtins::builtin_dir_rmdir);
        registry.register("Dir.delete", builtins::builtin_dir_rmdir);
    }
}
