use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, trace};
use webassist_protocols::{DriverError, ElementState, PageDriver};

use super::QUERY_SCRIPT;
use crate::cdp::{PageSession, QueryResult};

/// Element operations of the query helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QueryOp {
    State,
    Scroll,
    Point,
    Focus,
    SetValue,
    Commit,
    Value,
    Select,
    Check,
}

impl QueryOp {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            QueryOp::State => "state",
            QueryOp::Scroll => "scroll",
            QueryOp::Point => "point",
            QueryOp::Focus => "focus",
            QueryOp::SetValue => "setValue",
            QueryOp::Commit => "commit",
            QueryOp::Value => "value",
            QueryOp::Select => "select",
            QueryOp::Check => "check",
        }
    }
}

/// Map a raw helper result to the element it describes.
pub(crate) fn interpret(selector: &str, raw: Value) -> Result<QueryResult, DriverError> {
    let result: QueryResult = serde_json::from_value(raw)
        .map_err(|e| DriverError::Protocol(format!("unexpected helper result: {}", e)))?;
    if let Some(reason) = result.invalid {
        return Err(DriverError::InvalidSelector(format!("{}: {}", selector, reason)));
    }
    if result.missing {
        return Err(DriverError::ElementNotFound(selector.to_string()));
    }
    Ok(result)
}

/// Page driver for one Chrome tab.
pub struct CdpPageDriver {
    session: Arc<PageSession>,
}

impl CdpPageDriver {
    pub fn new(session: Arc<PageSession>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<PageSession> {
        &self.session
    }

    async fn run(&self, selector: &str, op: QueryOp, arg: Value) -> Result<QueryResult, DriverError> {
        trace!("{} {}", op.as_str(), selector);
        let raw = self
            .session
            .call_function(QUERY_SCRIPT, &[json!(selector), json!(op.as_str()), arg])
            .await?;
        interpret(selector, raw)
    }

    /// Scroll the element into view and return its center, failing for
    /// hidden or disabled elements.
    async fn point(&self, selector: &str, action: &str) -> Result<(f64, f64), DriverError> {
        let result = self.run(selector, QueryOp::Point, Value::Null).await?;
        if !result.visible {
            return Err(DriverError::NotVisible(selector.to_string()));
        }
        if !result.enabled {
            return Err(DriverError::Rejected(format!("{} is disabled, cannot {}", selector, action)));
        }
        match (result.x, result.y) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(DriverError::Protocol(format!("no position for {}", selector))),
        }
    }
}

#[async_trait]
impl PageDriver for CdpPageDriver {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), DriverError> {
        match tokio::time::timeout(timeout, self.session.navigate(url, timeout)).await {
            Ok(result) => result.map(|_| ()).map_err(|e| match DriverError::from(e) {
                DriverError::Timeout(msg) => DriverError::Navigation(format!("{} loading {}", msg, url)),
                other => other,
            }),
            Err(_) => Err(DriverError::Navigation(format!(
                "timed out after {} ms loading {}",
                timeout.as_millis(),
                url
            ))),
        }
    }

    async fn url(&self) -> Result<String, DriverError> {
        Ok(self.session.get_url().await?)
    }

    async fn title(&self) -> Result<String, DriverError> {
        Ok(self.session.get_title().await?)
    }

    async fn query(&self, selector: &str) -> Result<Option<ElementState>, DriverError> {
        match self.run(selector, QueryOp::State, Value::Null).await {
            Ok(result) => Ok(Some(ElementState {
                tag: result.tag.unwrap_or_default(),
                visible: result.visible,
                enabled: result.enabled,
            })),
            Err(DriverError::ElementNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn scroll_into_view(&self, selector: &str) -> Result<(), DriverError> {
        self.run(selector, QueryOp::Scroll, Value::Null).await.map(|_| ())
    }

    async fn click(&self, selector: &str) -> Result<(), DriverError> {
        let (x, y) = self.point(selector, "click").await?;
        self.session.click(x, y).await?;
        Ok(())
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<(), DriverError> {
        if text.is_empty() {
            let result = self.run(selector, QueryOp::SetValue, json!("")).await?;
            if !result.enabled {
                return Err(DriverError::Rejected(format!("{} is disabled", selector)));
            }
            return Ok(());
        }

        let result = self.run(selector, QueryOp::Focus, Value::Null).await?;
        if !result.enabled {
            return Err(DriverError::Rejected(format!("{} is disabled", selector)));
        }
        self.session.type_text(text).await?;
        self.run(selector, QueryOp::Commit, Value::Null).await?;
        Ok(())
    }

    async fn hover(&self, selector: &str) -> Result<(), DriverError> {
        let result = self.run(selector, QueryOp::Point, Value::Null).await?;
        let (Some(x), Some(y)) = (result.x, result.y) else {
            return Err(DriverError::NotVisible(selector.to_string()));
        };
        self.session.mouse_move(x, y).await?;
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<(), DriverError> {
        let result = self.run(selector, QueryOp::Select, json!(value)).await?;
        if result.value.as_bool() == Some(true) {
            Ok(())
        } else {
            Err(DriverError::Rejected(format!("{} has no option '{}'", selector, value)))
        }
    }

    async fn check(&self, selector: &str) -> Result<(), DriverError> {
        let result = self.run(selector, QueryOp::Check, Value::Null).await?;
        if result.value.as_bool() == Some(true) {
            Ok(())
        } else {
            Err(DriverError::Rejected(format!("{} did not become checked", selector)))
        }
    }

    async fn read_value(&self, selector: &str) -> Result<Option<String>, DriverError> {
        let result = self.run(selector, QueryOp::Value, Value::Null).await?;
        Ok(result.value.as_str().map(str::to_string))
    }

    async fn press_key(&self, key: &str) -> Result<(), DriverError> {
        self.session.press_key(key).await?;
        Ok(())
    }

    async fn evaluate(&self, script: &str, args: Vec<Value>) -> Result<Value, DriverError> {
        let value = self.session.call_function(script, &args).await?;
        debug!("Script returned {}", value);
        Ok(value)
    }
}
