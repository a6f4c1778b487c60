// Named groups of tools with per-group enablement and a global read-only switch

use crate::tools::{Tool, ToolRegistry};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Enables every toolset present at the time of the call.
pub const ALL_TOOLSETS: &str = "all";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolsetError {
    #[error("toolset {0} does not exist")]
    UnknownToolset(String),
}

/// A named group of read and write tools.
///
/// Write tools are kept even when the toolset is read-only; they are just
/// never exposed.
pub struct Toolset {
    name: String,
    description: String,
    enabled: bool,
    read_only: bool,
    read_tools: Vec<Arc<dyn Tool>>,
    write_tools: Vec<Arc<dyn Tool>>,
}

impl Toolset {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            enabled: false,
            read_only: false,
            read_tools: Vec::new(),
            write_tools: Vec::new(),
        }
    }

    pub fn add_read_tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.read_tools.extend(tools);
        self
    }

    pub fn add_write_tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.write_tools.extend(tools);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self) {
        self.read_only = true;
    }

    /// Tools exposed right now: nothing unless enabled.
    pub fn active_tools(&self) -> Vec<Arc<dyn Tool>> {
        if self.enabled {
            self.available_tools()
        } else {
            Vec::new()
        }
    }

    /// Tools this toolset would expose once enabled.
    pub fn available_tools(&self) -> Vec<Arc<dyn Tool>> {
        let mut tools = self.read_tools.clone();
        if !self.read_only {
            tools.extend(self.write_tools.iter().cloned());
        }
        tools
    }

    pub fn register_tools(&self, registry: &mut ToolRegistry) {
        for tool in self.active_tools() {
            registry.register(tool);
        }
    }
}

/// All toolsets of the server, keyed by name.
pub struct ToolsetGroup {
    toolsets: BTreeMap<String, Toolset>,
    everything_on: bool,
    read_only: bool,
}

impl ToolsetGroup {
    pub fn new(read_only: bool) -> Self {
        Self {
            toolsets: BTreeMap::new(),
            everything_on: false,
            read_only,
        }
    }

    /// Add a toolset, marking it read-only if the group is.
    pub fn add_toolset(&mut self, mut toolset: Toolset) {
        if self.read_only {
            toolset.set_read_only();
        }
        self.toolsets.insert(toolset.name.clone(), toolset);
    }

    /// Enable the named toolsets.
    ///
    /// `"all"` enables every toolset currently present, and names after it
    /// are ignored. Names are validated before anything is enabled, so an
    /// unknown name leaves the group untouched.
    pub fn enable_toolsets<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), ToolsetError> {
        let mut requested = Vec::new();
        let mut all = false;
        for name in names.iter().map(AsRef::as_ref) {
            if name == ALL_TOOLSETS {
                all = true;
                break;
            }
            if !self.toolsets.contains_key(name) {
                return Err(ToolsetError::UnknownToolset(name.to_string()));
            }
            requested.push(name);
        }

        for name in requested {
            self.enable_toolset(name)?;
        }
        if all {
            self.everything_on = true;
            for toolset in self.toolsets.values_mut() {
                toolset.enabled = true;
            }
        }
        Ok(())
    }

    pub fn enable_toolset(&mut self, name: &str) -> Result<(), ToolsetError> {
        let toolset = self
            .toolsets
            .get_mut(name)
            .ok_or_else(|| ToolsetError::UnknownToolset(name.to_string()))?;
        toolset.enabled = true;
        Ok(())
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        if self.everything_on {
            return true;
        }
        self.toolsets.get(name).map(|t| t.enabled).unwrap_or(false)
    }

    pub fn toolset(&self, name: &str) -> Option<&Toolset> {
        self.toolsets.get(name)
    }

    pub fn toolsets(&self) -> impl Iterator<Item = &Toolset> {
        self.toolsets.values()
    }

    /// Register the tools of every enabled toolset.
    pub fn register_tools(&self, registry: &mut ToolRegistry) {
        for toolset in self.toolsets.values() {
            toolset.register_tools(registry);
        }
    }
}
