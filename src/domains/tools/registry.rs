//! Tool Registry - central registration and dispatch for all tools.
//!
//! Registration happens once at startup through [`ToolRegistryBuilder`]. The
//! builder only yields a [`ToolRegistry`] after at least one tool has been
//! registered, and the registry itself has no way to add or remove tools, so
//! it can be shared across concurrent invocations without locking.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use rmcp::model::{JsonObject, Tool};
use tracing::{debug, info, instrument, warn};

use super::containment::contain;
use super::descriptor::ToolDescriptor;
use super::error::ToolError;
use super::handlers::{ToolHandler, ToolInvocationResult};

/// Builder state before any tool is registered.
pub struct Uninitialized;

/// Builder state once at least one tool is registered.
pub struct Registered;

struct Entry {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

/// Collects tool handlers and rejects duplicate names.
pub struct ToolRegistryBuilder<State = Uninitialized> {
    entries: HashMap<&'static str, Entry>,
    order: Vec<&'static str>,
    deadline: Option<Duration>,
    _state: PhantomData<State>,
}

impl ToolRegistryBuilder<Uninitialized> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            deadline: None,
            _state: PhantomData,
        }
    }

    /// Register every handler in order. Fails on an empty list.
    pub fn register_all(
        self,
        handlers: impl IntoIterator<Item = Arc<dyn ToolHandler>>,
    ) -> Result<ToolRegistryBuilder<Registered>, ToolError> {
        let mut handlers = handlers.into_iter();
        let first = handlers
            .next()
            .ok_or_else(|| ToolError::configuration("no tools selected for registration"))?;
        handlers.try_fold(self.register(first)?, ToolRegistryBuilder::<Registered>::register)
    }
}

impl Default for ToolRegistryBuilder<Uninitialized> {
    fn default() -> Self {
        Self::new()
    }
}

impl<State> ToolRegistryBuilder<State> {
    /// Per-invocation deadline; `None` lets invocations run unbounded.
    pub fn deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Add a handler under its descriptor's name.
    pub fn register(
        mut self,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<ToolRegistryBuilder<Registered>, ToolError> {
        let descriptor = handler.descriptor();
        let name = descriptor.name;
        if self.entries.contains_key(name) {
            return Err(ToolError::duplicate_tool(name));
        }

        debug!(tool = name, "Registered tool");
        self.order.push(name);
        self.entries.insert(name, Entry { descriptor, handler });

        Ok(ToolRegistryBuilder {
            entries: self.entries,
            order: self.order,
            deadline: self.deadline,
            _state: PhantomData,
        })
    }
}

impl ToolRegistryBuilder<Registered> {
    /// Freeze the registry.
    pub fn build(self) -> ToolRegistry {
        info!("Tool registry ready with {} tool(s): {:?}", self.order.len(), self.order);
        ToolRegistry {
            entries: self.entries,
            order: self.order,
            deadline: self.deadline,
        }
    }
}

/// Read-only mapping from tool name to descriptor and handler.
pub struct ToolRegistry {
    entries: HashMap<&'static str, Entry>,
    order: Vec<&'static str>,
    deadline: Option<Duration>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder<Uninitialized> {
        ToolRegistryBuilder::new()
    }

    /// Get all tool names in registration order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.order.clone()
    }

    /// Descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.order
            .iter()
            .filter_map(|name| self.entries.get(name))
            .map(|entry| &entry.descriptor)
    }

    pub fn descriptor(&self, name: &str) -> Option<&ToolDescriptor> {
        self.entries.get(name).map(|entry| &entry.descriptor)
    }

    /// Get all tools as Tool models (metadata).
    pub fn tools(&self) -> Vec<Tool> {
        self.descriptors().map(ToolDescriptor::to_tool).collect()
    }

    /// Dispatch one invocation.
    ///
    /// Unknown names and invalid arguments are rejected before the handler
    /// runs; anything the handler does wrong (error, panic, overrun) comes
    /// back as [`ToolInvocationResult::Error`].
    #[instrument(skip_all, fields(tool = %name))]
    pub async fn invoke(&self, name: &str, arguments: JsonObject) -> ToolInvocationResult {
        let Some(entry) = self.entries.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return ToolInvocationResult::Error(ToolError::unknown_tool(name));
        };

        let arguments = match entry.descriptor.prepare_arguments(arguments) {
            Ok(arguments) => arguments,
            Err(err) => {
                warn!("Rejected arguments: {}", err);
                return ToolInvocationResult::Error(err);
            }
        };

        info!("Tool called");
        contain(entry.handler.call(arguments), self.deadline).await.into()
    }
}
