// JSON-RPC 2.0 server over stdio
//
// Reads one request per line from stdin and writes one response per line to
// stdout. Logging must go to stderr; stdout carries the protocol.

use crate::protocol::{
    InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListResourceTemplatesResult,
    ListResourcesResult, ReadResourceParams, ResourcesCapability, ServerCapabilities, ServerInfo,
};
use crate::resources::{ResourceError, ResourceRegistry};
use anyhow::Result;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP server that answers resource requests from a registry.
pub struct McpServer {
    registry: ResourceRegistry,
}

impl McpServer {
    pub fn new(registry: ResourceRegistry) -> Self {
        Self { registry }
    }

    /// Run the server until stdin reaches EOF.
    pub async fn run(&self) -> Result<()> {
        info!("MCP server started, listening on stdin");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();
        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    debug!("Received EOF, shutting down");
                    break;
                }
                Ok(_) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let Some(response) = self.process_request(line).await else {
                        continue;
                    };

                    let payload = serde_json::to_string(&response)?;
                    stdout.write_all(payload.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        info!("MCP server shutting down");
        Ok(())
    }

    /// Process a single request line. Notifications yield no response.
    async fn process_request(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(format!("Invalid JSON: {}", e)),
                ));
            }
        };

        // Notifications get no reply, not even for protocol violations
        if request.is_notification() {
            debug!("Ignoring notification: {}", request.method);
            return None;
        }

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(Value::Null),
                JsonRpcError::invalid_request("jsonrpc must be '2.0'"),
            ));
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        debug!("Handling request: {}", request.method);

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "resources/list" => JsonRpcResponse::success(
                id,
                ListResourcesResult {
                    resources: self.registry.list_resources(),
                },
            ),
            "resources/templates/list" => JsonRpcResponse::success(
                id,
                ListResourceTemplatesResult {
                    resource_templates: self.registry.list_templates(),
                },
            ),
            "resources/read" => self.handle_resources_read(id, request.params).await,
            _ => JsonRpcResponse::error(id, JsonRpcError::method_not_found(&request.method)),
        };

        Some(response)
    }

    fn handle_initialize(&self, id: Value) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            InitializeResult {
                protocol_version: PROTOCOL_VERSION.to_string(),
                capabilities: ServerCapabilities {
                    resources: Some(ResourcesCapability {
                        subscribe: false,
                        list_changed: false,
                    }),
                },
                server_info: ServerInfo {
                    name: "msk-mcp".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
                instructions: Some(
                    "Read-only best practices and sizing guidance for Amazon MSK clusters."
                        .to_string(),
                ),
            },
        )
    }

    async fn handle_resources_read(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: ReadResourceParams = match params.map(serde_json::from_value).transpose() {
            Ok(Some(p)) => p,
            Ok(None) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("missing params: expected {\"uri\": ...}"),
                );
            }
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("invalid params: {}", e)),
                );
            }
        };

        let Some((resource, template_params)) = self.registry.resolve(&params.uri) else {
            return JsonRpcResponse::error(id, JsonRpcError::resource_not_found(&params.uri));
        };

        match resource.read(&params.uri, &template_params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(ResourceError::InvalidParams(message)) => {
                JsonRpcResponse::error(id, JsonRpcError::invalid_params(message))
            }
            Err(ResourceError::Internal(e)) => {
                error!("Resource read failed for {}: {:#}", params.uri, e);
                JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{BestPracticesCatalogResource, ClusterBestPracticesResource};
    use serde_json::json;
    use std::sync::Arc;

    fn server() -> McpServer {
        let mut registry = ResourceRegistry::new();
        registry.register(Arc::new(BestPracticesCatalogResource));
        registry.register(Arc::new(ClusterBestPracticesResource));
        McpServer::new(registry)
    }

    async fn request(server: &McpServer, body: Value) -> JsonRpcResponse {
        server
            .process_request(&body.to_string())
            .await
            .expect("expected a response")
    }

    #[tokio::test]
    async fn initialize_reports_resource_capability() {
        let response = request(
            &server(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        )
        .await;

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "msk-mcp");
        assert!(result["capabilities"]["resources"].is_object());
    }

    #[tokio::test]
    async fn lists_split_fixed_and_templated_resources() {
        let srv = server();

        let listed = request(
            &srv,
            json!({"jsonrpc": "2.0", "id": 2, "method": "resources/list"}),
        )
        .await;
        let resources = listed.result.unwrap()["resources"].clone();
        assert_eq!(resources.as_array().unwrap().len(), 1);
        assert_eq!(resources[0]["uri"], "resource://msk-best-practices");

        let templates = request(
            &srv,
            json!({"jsonrpc": "2.0", "id": 3, "method": "resources/templates/list"}),
        )
        .await;
        let templates = templates.result.unwrap()["resourceTemplates"].clone();
        assert_eq!(templates.as_array().unwrap().len(), 1);
        assert_eq!(
            templates[0]["uriTemplate"],
            "resource://msk-best-practices/cluster/{instance_type}/{number_of_brokers}"
        );
    }

    #[tokio::test]
    async fn reads_catalog_resource() {
        let response = request(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 4,
                "method": "resources/read",
                "params": {"uri": "resource://msk-best-practices"}
            }),
        )
        .await;

        let contents = response.result.unwrap()["contents"].clone();
        assert_eq!(contents[0]["mimeType"], "application/json");
        let doc: Value = serde_json::from_str(contents[0]["text"].as_str().unwrap()).unwrap();
        assert!(doc["instance_categories"]["standard"].is_array());
    }

    #[tokio::test]
    async fn reads_templated_cluster_resource() {
        let response = request(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 5,
                "method": "resources/read",
                "params": {"uri": "resource://msk-best-practices/cluster/kafka.t3.small/2"}
            }),
        )
        .await;

        let contents = response.result.unwrap()["contents"].clone();
        let doc: Value = serde_json::from_str(contents[0]["text"].as_str().unwrap()).unwrap();
        assert_eq!(doc["Replication Factor"], "2 (recommended)");
        assert_eq!(doc["Minimum In-Sync Replicas"], 2);
    }

    #[tokio::test]
    async fn unknown_uri_is_resource_not_found() {
        let response = request(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 6,
                "method": "resources/read",
                "params": {"uri": "resource://nope"}
            }),
        )
        .await;

        assert_eq!(response.error.unwrap().code, -32002);
    }

    #[tokio::test]
    async fn non_integer_broker_count_is_invalid_params() {
        let response = request(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "resources/read",
                "params": {"uri": "resource://msk-best-practices/cluster/kafka.m5.large/lots"}
            }),
        )
        .await;

        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert!(error.message.contains("lots"));
    }

    #[tokio::test]
    async fn unknown_method_and_bad_json_are_protocol_errors() {
        let srv = server();

        let response = request(
            &srv,
            json!({"jsonrpc": "2.0", "id": 8, "method": "tools/call"}),
        )
        .await;
        assert_eq!(response.error.unwrap().code, -32601);

        let response = srv.process_request("{not json").await.unwrap();
        assert_eq!(response.error.unwrap().code, -32700);
        assert_eq!(response.id, Value::Null);
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let srv = server();

        let response = srv
            .process_request(
                &json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
            )
            .await;
        assert!(response.is_none());

        // Stay silent even when the notification is malformed
        let response = srv
            .process_request(
                &json!({"jsonrpc": "1.0", "method": "notifications/initialized"}).to_string(),
            )
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn wrong_version_with_id_is_invalid_request() {
        let response = request(
            &server(),
            json!({"jsonrpc": "1.0", "id": 9, "method": "ping"}),
        )
        .await;
        assert_eq!(response.error.unwrap().code, -32600);
    }
}
