//! Query configuration

/// Name of the top-level folder that terminates ancestry walks
pub const DEFAULT_ROOT_FOLDER_NAME: &str = "OmniFocus";

/// Settings shared by every query an engine runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// Folder name treated as the root sentinel
    pub root_folder_name: String,
}

impl QueryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different root sentinel name
    pub fn with_root_folder_name(mut self, name: impl Into<String>) -> Self {
        self.root_folder_name = name.into();
        self
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            root_folder_name: DEFAULT_ROOT_FOLDER_NAME.to_string(),
        }
    }
}
