use ahash::RandomState;
use indexmap::IndexMap;
use tracing::debug;

use corvid_ir::Constant;

use crate::Value;
use crate::builtins_registry::{BuiltinFn, BuiltinProvider, BuiltinRegistry, StdBuiltinProvider};
use crate::core::dir::DirHandle;
use crate::core::heap::{Heap, ManagedObject};
use crate::errors::{Result, RuntimeError};
use crate::methods::{self, MethodKind};
use crate::util::{Capabilities, Environment, FileSystem};

mod config;

pub use config::RuntimeConfig;

/// A block passed to a built-in. It receives the runtime back so it can
/// call further built-ins while the caller is suspended.
pub type Block<'a> = &'a mut dyn FnMut(&mut Runtime, &[Value]) -> Result<Value>;

pub(crate) type BuiltinTable = IndexMap<String, BuiltinFn, RandomState>;

/// Interpreter state shared by the built-ins.
///
/// The current directory lives here rather than in the process, and every
/// change to it goes through `&mut Runtime`. Embedders running scripts on
/// several threads must serialize access to one runtime themselves.
pub struct Runtime {
    pub(crate) heap: Heap,
    caps: Capabilities,
    config: RuntimeConfig,
    current_dir: String,
    builtins: BuiltinTable,
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self::with_capabilities(config, Capabilities::default())
    }

    /// Builds a runtime over the given collaborators. Without a configured
    /// start directory, the initial current directory comes from `caps.env`.
    pub fn with_capabilities(config: RuntimeConfig, caps: Capabilities) -> Self {
        let current_dir = config
            .start_dir
            .clone()
            .or_else(|| caps.env.current_dir())
            .unwrap_or_else(|| ".".to_string());
        let mut rt = Self {
            heap: Heap::new(),
            caps,
            config,
            current_dir,
            builtins: BuiltinTable::default(),
        };
        rt.install(&StdBuiltinProvider);
        rt
    }

    pub fn set_file_system(&mut self, fs: Box<dyn FileSystem>) {
        self.caps.fs = fs;
    }

    pub fn set_environment(&mut self, env: Box<dyn Environment>) {
        self.caps.env = env;
    }

    pub fn install(&mut self, provider: &dyn BuiltinProvider) {
        let mut registry = BuiltinRegistry::new();
        provider.install(&mut registry);
        registry.install_into(&mut self.builtins);
    }

    /// Registered built-in names in registration order.
    pub fn builtin_names(&self) -> Vec<String> {
        self.builtins.keys().cloned().collect()
    }

    pub fn has_builtin(&self, name: &str) -> bool {
        self.builtins.contains_key(name)
    }

    pub fn current_dir(&self) -> &str {
        &self.current_dir
    }

    /// Runs `f` with the current directory set to `dir`, then restores the
    /// previous directory whether `f` succeeded or not.
    pub fn with_current_dir<T>(
        &mut self,
        dir: String,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let saved = std::mem::replace(&mut self.current_dir, dir);
        debug!(from = %saved, to = %self.current_dir, "enter directory scope");
        let result = f(self);
        let inner = std::mem::replace(&mut self.current_dir, saved);
        debug!(from = %inner, to = %self.current_dir, "leave directory scope");
        result
    }

    pub(crate) fn set_current_dir(&mut self, dir: String) {
        debug!(from = %self.current_dir, to = %dir, "change directory");
        self.current_dir = dir;
    }

    pub(crate) fn fs(&self) -> &dyn FileSystem {
        self.caps.fs.as_ref()
    }

    pub(crate) fn home_dir(&self) -> Result<String> {
        for key in &self.config.home_vars {
            if let Some(v) = self.caps.env.var(key) {
                if !v.is_empty() {
                    return Ok(v);
                }
            }
        }
        Err(RuntimeError::Argument(format!(
            "{} not set",
            self.config.home_vars.join("/")
        )))
    }

    /// Calls a class-level built-in such as `Dir.entries`.
    pub fn call_builtin(
        &mut self,
        name: &str,
        args: &[Value],
        block: Option<Block<'_>>,
    ) -> Result<Value> {
        let Some(fun) = self.builtins.get(name).copied() else {
            return Err(RuntimeError::NoMethod {
                method: name.to_string(),
                receiver: "runtime",
            });
        };
        fun(self, args, block)
    }

    pub fn call_method(
        &mut self,
        recv: &Value,
        method: &str,
        args: &[Value],
        block: Option<Block<'_>>,
    ) -> Result<Value> {
        let kind = MethodKind::from_str(method);
        methods::dispatch_builtin_method(self, recv, kind, args, block, method)
    }

    /// Creates a `Dir` object over `path`, resolved against the current
    /// directory.
    pub fn open_dir(&mut self, path: &str) -> Result<Value> {
        let handle = DirHandle::open(self.caps.fs.as_ref(), &self.current_dir, path)?;
        let id = self.heap.alloc(ManagedObject::Dir(Box::new(handle)));
        Ok(Value::Dir(id))
    }

    pub fn dir(&self, value: &Value) -> Result<&DirHandle> {
        let Value::Dir(id) = value else {
            return Err(RuntimeError::TypeMismatch {
                expected: "Dir",
                actual: value.type_name(),
            });
        };
        match self.heap.get(*id) {
            Some(ManagedObject::Dir(h)) => Ok(&**h),
            _ => Err(RuntimeError::DanglingObject),
        }
    }

    pub(crate) fn dir_mut(&mut self, value: &Value) -> Result<&mut DirHandle> {
        let Value::Dir(id) = value else {
            return Err(RuntimeError::TypeMismatch {
                expected: "Dir",
                actual: value.type_name(),
            });
        };
        match self.heap.get_mut(*id) {
            Some(ManagedObject::Dir(h)) => Ok(&mut **h),
            _ => Err(RuntimeError::DanglingObject),
        }
    }

    /// Drops the object behind `value` and recycles its heap slot. Other
    /// copies of the value become dangling. Returns false for values that
    /// are not heap objects or were already released.
    pub fn release(&mut self, value: &Value) -> bool {
        match value {
            Value::List(id) | Value::Dir(id) => self.heap.free(*id).is_some(),
            _ => false,
        }
    }

    /// Objects currently held by the heap.
    pub fn live_objects(&self) -> usize {
        self.heap.len()
    }

    pub fn new_list(&mut self, items: Vec<Value>) -> Value {
        Value::List(self.heap.alloc(ManagedObject::List(items)))
    }

    pub fn list_items(&self, value: &Value) -> Result<&[Value]> {
        let Value::List(id) = value else {
            return Err(RuntimeError::TypeMismatch {
                expected: "list",
                actual: value.type_name(),
            });
        };
        match self.heap.get(*id) {
            Some(ManagedObject::List(items)) => Ok(items),
            _ => Err(RuntimeError::DanglingObject),
        }
    }

    /// Strings of a list value, e.g. the result of `Dir.entries`.
    pub fn list_strings(&self, value: &Value) -> Result<Vec<String>> {
        self.list_items(value)?
            .iter()
            .map(|v| crate::methods::expect_str(v).map(str::to_string))
            .collect()
    }

    /// Turns a folded compile-time constant into a runtime value.
    pub fn materialize(&mut self, constant: &Constant) -> Value {
        match constant {
            Constant::Nil => Value::Nil,
            Constant::Bool(b) => Value::Bool(*b),
            Constant::Int(i) => Value::Int(*i),
            Constant::Float(f) => Value::Float(*f),
            Constant::Str(s) | Constant::Symbol(s) => Value::str(s),
            Constant::Array(items) => {
                let values = items.iter().map(|c| self.materialize(c)).collect();
                self.new_list(values)
            }
        }
    }

    pub fn value_to_string(&self, value: &Value) -> String {
        match value {
            Value::Nil => "nil".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => itoa::Buffer::new().format(*i).to_string(),
            Value::Float(f) => ryu::Buffer::new().format(*f).to_string(),
            Value::Str(s) => s.to_string(),
            Value::List(_) => {
                let items = self.list_items(value).unwrap_or(&[]);
                let parts: Vec<String> = items.iter().map(|v| self.value_to_string(v)).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Dir(_) => match self.dir(value) {
                Ok(h) => format!("#<Dir:{}>", h.raw_path()),
                Err(_) => "#<Dir>".to_string(),
            },
        }
    }
}
