//! MCP tool handlers implementation

use cadence_core::{params as core, Planner};
use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types
///
/// Adds the serde and schema integration the MCP protocol needs while the
/// core parameter types stay free of framework concerns. Serialization
/// passes straight through to the wrapped type.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type Id = McpParams<core::Id>;
pub type PlanRef = McpParams<core::PlanRef>;
pub type CreatePlan = McpParams<core::CreatePlan>;
pub type UpdatePlan = McpParams<core::UpdatePlan>;
pub type MarkItem = McpParams<core::MarkItem>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text_result(text: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text.into())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Planner,
}

impl McpHandlers {
    pub fn new(planner: Planner) -> Self {
        Self { planner }
    }

    pub async fn create_plan(&self, Parameters(params): Parameters<CreatePlan>) -> McpResult {
        debug!("create_plan: {:?}", params);

        let result = self
            .planner
            .create_plan_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;
        text_result(result.to_string())
    }

    pub async fn update_plan(&self, Parameters(params): Parameters<UpdatePlan>) -> McpResult {
        debug!("update_plan: {:?}", params);

        let result = self
            .planner
            .update_plan_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update plan", &e))?;
        text_result(result.to_string())
    }

    pub async fn list_plans(&self) -> McpResult {
        debug!("list_plans");

        let summaries = self
            .planner
            .list_plans_summary()
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;
        text_result(summaries.to_string())
    }

    pub async fn get_plan(&self, Parameters(params): Parameters<PlanRef>) -> McpResult {
        debug!("get_plan: {:?}", params);

        let plan = self
            .planner
            .get_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", &e))?;
        text_result(plan.to_string())
    }

    pub async fn set_active_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("set_active_plan: {:?}", params);

        let result = self
            .planner
            .set_active_plan_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to set active plan", &e))?;
        text_result(result.to_string())
    }

    pub async fn mark_item(&self, Parameters(params): Parameters<MarkItem>) -> McpResult {
        debug!("mark_item: {:?}", params);

        let result = self
            .planner
            .mark_item_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to mark item", &e))?;
        text_result(result.to_string())
    }

    pub async fn delete_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_plan: {:?}", params);

        let result = self
            .planner
            .delete_plan_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete plan", &e))?;
        text_result(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use cadence_core::PlannerBuilder;
    use serde_json::json;

    use super::*;

    async fn handlers() -> McpHandlers {
        let planner = PlannerBuilder::new().in_memory().build().await.unwrap();
        McpHandlers::new(planner)
    }

    fn params<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Parameters<T> {
        Parameters(serde_json::from_value(value).unwrap())
    }

    fn text(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).unwrap();
        value["content"][0]["text"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_create_then_mark() {
        let handlers = handlers().await;

        let created = handlers
            .create_plan(params(json!({
                "id": "launch",
                "title": "Launch",
                "items": [{"content": "Announce"}, {"content": "Banner", "image_prompt": "a rocket"}]
            })))
            .await
            .unwrap();
        assert!(text(&created).starts_with("Plan created successfully with ID: launch"));

        let marked = handlers
            .mark_item(params(json!({"index": 1, "status": "failed", "notes": "no credits"})))
            .await
            .unwrap();
        let marked = text(&marked);
        assert!(marked.starts_with("Item 1 updated in plan 'launch'."));
        assert!(marked.contains("Media Prompt: a rocket"));
        assert!(marked.contains("no credits"));
    }

    #[tokio::test]
    async fn test_get_plan_defaults_to_active() {
        let handlers = handlers().await;
        handlers
            .create_plan(params(json!({
                "id": "a", "title": "First", "items": [{"content": "one"}]
            })))
            .await
            .unwrap();

        let shown = handlers.get_plan(params(json!({}))).await.unwrap();
        assert!(text(&shown).starts_with("Plan: First (ID: a)"));
    }

    #[tokio::test]
    async fn test_errors_carry_store_message() {
        let handlers = handlers().await;

        let err = handlers
            .delete_plan(params(json!({"id": "ghost"})))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Failed to delete plan: No plan found with ID: ghost");

        let err = handlers
            .mark_item(params(json!({"index": 0, "status": "completed"})))
            .await
            .unwrap_err();
        assert!(err.message.contains("No active plan"));
    }

    #[tokio::test]
    async fn test_list_plans_empty() {
        let handlers = handlers().await;
        let listed = handlers.list_plans().await.unwrap();
        assert!(text(&listed).starts_with("No plans available."));
    }
}
