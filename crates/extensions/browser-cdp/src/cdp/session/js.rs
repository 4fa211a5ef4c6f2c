//! JavaScript evaluation for a page session.

use serde_json::{Value, json};

use crate::cdp::error::CdpError;

use super::core::PageSession;

impl PageSession {
    /// Evaluate an expression and return its value by JSON.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                    "userGesture": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            return Err(CdpError::JavaScript(exception_text(exception)));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Call a function expression with JSON arguments.
    pub async fn call_function(&self, function: &str, args: &[Value]) -> Result<Value, CdpError> {
        self.evaluate(&invocation(function, args)?).await
    }
}

/// `(function)(arg0, arg1, ...)` with each argument as a JSON literal.
pub(super) fn invocation(function: &str, args: &[Value]) -> Result<String, CdpError> {
    let args = args
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("({})({})", function.trim(), args.join(", ")))
}

/// The most useful message from `exceptionDetails`.
pub(super) fn exception_text(exception: &Value) -> String {
    exception["exception"]["description"]
        .as_str()
        .or_else(|| exception["text"].as_str())
        .unwrap_or("Unknown error")
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}
