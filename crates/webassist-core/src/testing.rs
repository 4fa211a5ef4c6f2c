//! In-memory fakes shared by the unit tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use webassist_config::AutomationConfig;
use webassist_protocols::provider::ModelDefinition;
use webassist_protocols::{
    ChannelError, CompletionRequest, CompletionResponse, DriverError, ElementState,
    LLMProvider, Message, PageDriver, ProviderError, SpeechChannel, StopReason, Usage,
};

use crate::engine::Engine;
use crate::generator::{GenerationOptions, TextGenerator};
use crate::planner::ActionPlanner;

/// Automation settings with near-zero waits.
pub(crate) fn fast_config() -> AutomationConfig {
    AutomationConfig {
        max_retries: 2,
        retry_base_ms: 1,
        element_timeout_ms: 10,
        navigation_timeout_ms: 100,
        settle_ms: 0,
        ..Default::default()
    }
}

pub(crate) fn planner(provider: Arc<ScriptedProvider>) -> Arc<ActionPlanner> {
    let options = GenerationOptions {
        timeout: Duration::from_secs(5),
        ..Default::default()
    };
    Arc::new(ActionPlanner::new(TextGenerator::new(provider, "scripted"), options))
}

pub(crate) fn engine(
    page: Arc<FakePage>,
    channel: Arc<RecordingChannel>,
    provider: Option<Arc<ScriptedProvider>>,
) -> Engine {
    Engine::new(page, channel, provider.map(planner), fast_config())
}

#[derive(Debug, Clone)]
pub(crate) struct FakeElement {
    pub tag: String,
    pub visible: bool,
    pub rejects: bool,
    pub ignores_fill: bool,
    pub value: Option<String>,
}

impl FakeElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            visible: true,
            rejects: false,
            ignores_fill: false,
            value: None,
        }
    }

    pub fn input() -> Self {
        Self {
            value: Some(String::new()),
            ..Self::new("input")
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn rejecting(mut self) -> Self {
        self.rejects = true;
        self
    }

    pub fn ignoring_fill(mut self) -> Self {
        self.ignores_fill = true;
        self
    }
}

type EvalHandler = Box<dyn Fn(&str, &[Value]) -> Value + Send + Sync>;

#[derive(Default)]
struct PageState {
    url: String,
    title: String,
    elements: HashMap<String, FakeElement>,
    titles: HashMap<String, String>,
    failing_urls: HashSet<String>,
    log: Vec<String>,
    queries: Vec<String>,
    evaluations: Vec<(String, Vec<Value>)>,
}

/// Scripted page: elements are keyed by the exact selector string.
pub(crate) struct FakePage {
    state: Mutex<PageState>,
    eval: Mutex<Option<EvalHandler>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PageState {
                url: "about:blank".to_string(),
                ..Default::default()
            }),
            eval: Mutex::new(None),
        }
    }

    pub fn with(self, selector: &str, element: FakeElement) -> Self {
        self.state.lock().elements.insert(selector.to_string(), element);
        self
    }

    pub fn at(self, url: &str) -> Self {
        self.state.lock().url = url.to_string();
        self
    }

    pub fn titled(self, url: &str, title: &str) -> Self {
        self.state.lock().titles.insert(url.to_string(), title.to_string());
        self
    }

    pub fn failing(self, url: &str) -> Self {
        self.state.lock().failing_urls.insert(url.to_string());
        self
    }

    pub fn on_evaluate(self, handler: impl Fn(&str, &[Value]) -> Value + Send + Sync + 'static) -> Self {
        *self.eval.lock() = Some(Box::new(handler));
        self
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn log(&self) -> Vec<String> {
        self.state.lock().log.clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.state.lock().queries.clone()
    }

    pub fn evaluations(&self) -> Vec<(String, Vec<Value>)> {
        self.state.lock().evaluations.clone()
    }

    pub fn value_of(&self, selector: &str) -> Option<String> {
        self.state.lock().elements.get(selector).and_then(|e| e.value.clone())
    }

    pub fn current_url(&self) -> String {
        self.state.lock().url.clone()
    }

    fn element(&self, selector: &str) -> Result<FakeElement, DriverError> {
        self.state
            .lock()
            .elements
            .get(selector)
            .cloned()
            .ok_or_else(|| DriverError::ElementNotFound(selector.to_string()))
    }

    fn record(&self, entry: String) {
        self.state.lock().log.push(entry);
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn goto(&self, url: &str, _timeout: Duration) -> Result<(), DriverError> {
        let mut state = self.state.lock();
        state.log.push(format!("goto {}", url));
        if state.failing_urls.contains(url) {
            return Err(DriverError::Navigation(format!("net::ERR_NAME_NOT_RESOLVED at {}", url)));
        }
        state.url = url.to_string();
        state.title = state.titles.get(url).cloned().unwrap_or_else(|| "Untitled".to_string());
        Ok(())
    }

    async fn url(&self) -> Result<String, DriverError> {
        Ok(self.state.lock().url.clone())
    }

    async fn title(&self) -> Result<String, DriverError> {
        Ok(self.state.lock().title.clone())
    }

    async fn query(&self, selector: &str) -> Result<Option<ElementState>, DriverError> {
        let mut state = self.state.lock();
        state.queries.push(selector.to_string());
        Ok(state.elements.get(selector).map(|e| ElementState {
            tag: e.tag.clone(),
            visible: e.visible,
            enabled: !e.rejects,
        }))
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<ElementState, DriverError> {
        match self.query(selector).await? {
            Some(state) if state.visible => Ok(state),
            Some(_) => Err(DriverError::NotVisible(selector.to_string())),
            None => Err(DriverError::ElementNotFound(selector.to_string())),
        }
    }

    async fn scroll_into_view(&self, selector: &str) -> Result<(), DriverError> {
        self.element(selector).map(|_| ())
    }

    async fn click(&self, selector: &str) -> Result<(), DriverError> {
        let element = self.element(selector)?;
        if element.rejects {
            return Err(DriverError::Rejected(format!("{} is disabled", selector)));
        }
        self.record(format!("click {}", selector));
        Ok(())
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<(), DriverError> {
        let element = self.element(selector)?;
        if element.rejects {
            return Err(DriverError::Rejected(format!("{} is read-only", selector)));
        }
        let mut state = self.state.lock();
        state.log.push(format!("fill {}={}", selector, text));
        if !element.ignores_fill {
            if let Some(el) = state.elements.get_mut(selector) {
                el.value = Some(text.to_string());
            }
        }
        Ok(())
    }

    async fn hover(&self, selector: &str) -> Result<(), DriverError> {
        self.element(selector)?;
        self.record(format!("hover {}", selector));
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<(), DriverError> {
        self.element(selector)?;
        self.record(format!("select {}={}", selector, value));
        Ok(())
    }

    async fn check(&self, selector: &str) -> Result<(), DriverError> {
        self.element(selector)?;
        self.record(format!("check {}", selector));
        Ok(())
    }

    async fn read_value(&self, selector: &str) -> Result<Option<String>, DriverError> {
        Ok(self.element(selector)?.value)
    }

    async fn press_key(&self, key: &str) -> Result<(), DriverError> {
        self.record(format!("press {}", key));
        Ok(())
    }

    async fn evaluate(&self, script: &str, args: Vec<Value>) -> Result<Value, DriverError> {
        self.state.lock().evaluations.push((script.to_string(), args.clone()));
        let result = match self.eval.lock().as_ref() {
            Some(handler) => handler(script, &args),
            None => Value::Bool(false),
        };
        Ok(result)
    }
}

/// Provider replaying canned responses in order.
pub(crate) struct ScriptedProvider {
    models: Vec<ModelDefinition>,
    responses: Mutex<VecDeque<Result<String, ProviderError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            models: vec![ModelDefinition::new("scripted", "Scripted")],
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .iter()
            .map(|r| r.messages.iter().map(|m| m.content.text()).collect::<Vec<_>>().join("\n"))
            .collect()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    fn id(&self) -> &str {
        "scripted"
    }

    fn models(&self) -> &[ModelDefinition] {
        &self.models
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let model = request.model.clone();
        self.requests.lock().push(request);
        let text = self
            .responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Network("no scripted response".to_string())))?;
        Ok(CompletionResponse {
            id: "resp-1".to_string(),
            model,
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }
}

/// Channel replaying scripted input and capturing everything spoken.
pub(crate) struct RecordingChannel {
    inputs: Mutex<VecDeque<String>>,
    spoken: Mutex<Vec<String>>,
}

impl RecordingChannel {
    pub fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: Mutex::new(inputs.iter().map(|s| s.to_string()).collect()),
            spoken: Mutex::new(Vec::new()),
        }
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().clone()
    }

    pub fn said(&self, fragment: &str) -> bool {
        self.spoken.lock().iter().any(|s| s.contains(fragment))
    }
}

#[async_trait]
impl SpeechChannel for RecordingChannel {
    async fn listen(&self) -> Result<String, ChannelError> {
        self.inputs.lock().pop_front().ok_or(ChannelError::Closed)
    }

    async fn speak(&self, text: &str) {
        self.spoken.lock().push(text.to_string());
    }
}
