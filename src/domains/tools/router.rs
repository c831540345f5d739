//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! One route per registered descriptor; every route dispatches back through
//! [`ToolRegistry::invoke`], so validation and containment are the same for
//! every transport.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};

use super::registry::ToolRegistry;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let mut router = ToolRouter::new();
    for descriptor in registry.descriptors() {
        let name = descriptor.name;
        let registry = registry.clone();
        router = router.with_route(ToolRoute::new_dyn(
            descriptor.to_tool(),
            move |ctx: ToolCallContext<'_, S>| {
                let args = ctx.arguments.clone().unwrap_or_default();
                let registry = registry.clone();
                async move { Ok(registry.invoke(name, args).await.into_call_result()) }.boxed()
            },
        ));
    }
    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::remote::fakes::Fakes;
    use crate::domains::tools::toolset::build_registry;

    struct TestServer {}

    #[test]
    fn test_router_matches_registry() {
        let registry = Arc::new(build_registry(&Config::default(), &Fakes::default().services()).unwrap());
        let router: ToolRouter<TestServer> = build_tool_router(registry.clone());

        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(router_names.len(), registry.tool_names().len());
        for name in registry.tool_names() {
            assert!(router_names.contains(&name));
        }
    }
}
