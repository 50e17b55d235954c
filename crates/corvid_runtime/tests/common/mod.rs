#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use corvid_runtime::{
    Block, Capabilities, Environment, FileSystem, Runtime, RuntimeConfig, Value,
};

/// In-memory directory tree. Listings come back in insertion order.
#[derive(Clone, Default)]
pub struct MockFileSystem {
    pub dirs: Rc<RefCell<HashMap<String, Vec<String>>>>,
    pub failing_lists: Rc<RefCell<Vec<String>>>,
}

impl MockFileSystem {
    pub fn with_dir(self, path: &str, names: &[&str]) -> Self {
        self.dirs.borrow_mut().insert(
            path.to_string(),
            names.iter().map(|s| s.to_string()).collect(),
        );
        self
    }
}

impl FileSystem for MockFileSystem {
    fn is_dir(&self, path: &str) -> bool {
        self.dirs.borrow().contains_key(path)
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>, String> {
        if self.failing_lists.borrow().iter().any(|p| p == path) {
            return Err("Permission denied".into());
        }
        self.dirs
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| "No such file or directory".to_string())
    }

    fn canonicalize(&self, path: &str) -> Result<String, String> {
        Ok(path.trim_end_matches('/').to_string())
    }

    fn remove_dir(&self, path: &str) -> Result<(), String> {
        let mut dirs = self.dirs.borrow_mut();
        match dirs.get(path) {
            Some(names) if !names.is_empty() => Err("Directory not empty".into()),
            Some(_) => {
                dirs.remove(path);
                Ok(())
            }
            None => Err("No such file or directory".into()),
        }
    }

    fn create_dir_all(&self, path: &str) -> Result<(), String> {
        self.dirs.borrow_mut().entry(path.to_string()).or_default();
        Ok(())
    }

    fn glob(&self, _base: &str, pattern: &str) -> Result<Vec<String>, String> {
        let mut hits: Vec<String> = self
            .dirs
            .borrow()
            .keys()
            .filter(|k| k.starts_with(pattern.trim_end_matches('*')))
            .cloned()
            .collect();
        hits.sort();
        Ok(hits)
    }
}

#[derive(Default)]
pub struct MockEnvironment {
    pub vars: HashMap<String, String>,
    pub cwd: Option<String>,
}

impl Environment for MockEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn current_dir(&self) -> Option<String> {
        self.cwd.clone()
    }
}

pub fn mock_runtime(fs: &MockFileSystem, start_dir: &str) -> Runtime {
    let caps = Capabilities {
        fs: Box::new(fs.clone()),
        env: Box::new(MockEnvironment::default()),
    };
    let config = RuntimeConfig {
        start_dir: Some(start_dir.to_string()),
        ..RuntimeConfig::default()
    };
    Runtime::with_capabilities(config, caps)
}

/// Calls `Dir.<name>` with string arguments.
pub fn dir_call(
    rt: &mut Runtime,
    name: &str,
    args: &[&str],
    block: Option<Block<'_>>,
) -> corvid_runtime::Result<Value> {
    let values: Vec<Value> = args.iter().map(|a| Value::str(a)).collect();
    rt.call_builtin(&format!("Dir.{name}"), &values, block)
}

pub fn read_all(rt: &mut Runtime, dir: &Value) -> Vec<String> {
    let mut out = Vec::new();
    loop {
        match rt.call_method(dir, "read", &[], None).unwrap() {
            Value::Nil => return out,
            v => out.push(rt.value_to_string(&v)),
        }
    }
}
