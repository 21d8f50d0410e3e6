//! # MCP Server
//!
//! Exposes the amass adapter as a single MCP tool. The handler is
//! stateless per call; it holds only the adapter configuration, so
//! concurrent invocations need no synchronization.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
};

use crate::amass::{AmassAdapter, AmassRequest, EXEC_TIMEOUT};
use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AmassServer {
    adapter: Arc<AmassAdapter>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl AmassServer {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            adapter: Arc::new(AmassAdapter::new(config.binary.clone(), EXEC_TIMEOUT)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Advanced subdomain enumeration and reconnaissance tool. Runs amass in 'enum' mode for subdomain enumeration and network mapping, or 'intel' mode for gathering intelligence about target domains from various sources."
    )]
    async fn amass(
        &self,
        Parameters(request): Parameters<AmassRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = self.adapter.invoke(&request).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for AmassServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Wraps the amass reconnaissance binary. Call the 'amass' tool with \
                 subcommand 'enum' (requires domain) or 'intel' (requires domain+whois \
                 or organization)."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_server() -> AmassServer {
        AmassServer::new(&ServerConfig {
            port: 8000,
            binary: "amass".to_string(),
        })
    }

    #[test]
    fn advertises_tool_capability() {
        let info = test_server().get_info();
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn routes_single_amass_tool() {
        let server = test_server();
        let tools = server.tool_router.list_all();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "amass");
    }
}
