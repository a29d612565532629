//! Error handling utilities for MCP server

use cadence_core::PlannerError;
use rmcp::ErrorData;

/// Helper to convert planner errors to MCP errors.
///
/// Errors caused by the request itself become `invalid_params`; store
/// failures become `internal_error`.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        PlannerError::AlreadyExists { .. }
        | PlannerError::NotFound { .. }
        | PlannerError::NoActivePlan
        | PlannerError::IndexOutOfRange { .. }
        | PlannerError::InvalidInput { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_request_errors_are_invalid_params() {
        let error = to_mcp_error(
            "Failed to get plan",
            &PlannerError::NotFound {
                id: "x".to_string(),
            },
        );
        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(error.message, "Failed to get plan: No plan found with ID: x");
    }

    #[test]
    fn test_store_errors_are_internal() {
        let error = to_mcp_error(
            "Failed to list plans",
            &PlannerError::Configuration {
                message: "store lock poisoned".to_string(),
            },
        );
        assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    }
}
