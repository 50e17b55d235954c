//! Runtime configuration options.

#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Environment variables consulted, in order, for the home directory.
    pub home_vars: Vec<String>,
    /// Initial current directory. Defaults to the process working directory.
    pub start_dir: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            home_vars: vec!["HOME".to_string(), "LOGDIR".to_string()],
            start_dir: None,
        }
    }
}
