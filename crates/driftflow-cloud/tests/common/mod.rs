use async_trait::async_trait;
use driftflow_cloud::{
    CloudError, DetectionStatusReport, DriftProvider, Result, StackPage, StackSummary,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// In-memory provider with scripted responses and a call log
#[derive(Default)]
pub struct FakeProvider {
    pages: Vec<Vec<String>>,
    triggers: HashMap<String, std::result::Result<String, (String, String)>>,
    statuses: Mutex<HashMap<String, VecDeque<DetectionStatusReport>>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listing page; pages are served in the order they are added
    pub fn page(mut self, names: &[&str]) -> Self {
        self.pages
            .push(names.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn submits(mut self, stack: &str, id: &str) -> Self {
        self.triggers.insert(stack.into(), Ok(id.into()));
        self
    }

    pub fn fails(mut self, stack: &str, code: &str, message: &str) -> Self {
        self.triggers
            .insert(stack.into(), Err((code.into(), message.into())));
        self
    }

    pub fn reports(self, id: &str, reports: Vec<DetectionStatusReport>) -> Self {
        self.statuses
            .lock()
            .unwrap()
            .insert(id.into(), reports.into());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DriftProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    async fn list_stacks_page(&self, next_token: Option<String>) -> Result<StackPage> {
        self.record(format!("list:{}", next_token.as_deref().unwrap_or("")));

        let index: usize = match next_token {
            Some(token) => token
                .parse()
                .map_err(|_| CloudError::api("ValidationError", "bad token"))?,
            None => 0,
        };
        let summaries = self
            .pages
            .get(index)
            .map(|names| {
                names
                    .iter()
                    .map(|n| StackSummary::new(n.clone(), "CREATE_COMPLETE"))
                    .collect()
            })
            .unwrap_or_default();
        let next_token = (index + 1 < self.pages.len()).then(|| (index + 1).to_string());

        Ok(StackPage {
            summaries,
            next_token,
        })
    }

    async fn detect_stack_drift(&self, stack_name: &str) -> Result<String> {
        self.record(format!("detect:{}", stack_name));
        match self.triggers.get(stack_name) {
            Some(Ok(id)) => Ok(id.clone()),
            Some(Err((code, message))) => Err(CloudError::api(code, message)),
            None => Err(CloudError::api(
                "ValidationError",
                format!("Stack with id {} does not exist", stack_name),
            )),
        }
    }

    async fn describe_detection_status(&self, detection_id: &str) -> Result<DetectionStatusReport> {
        self.record(format!("status:{}", detection_id));
        self.statuses
            .lock()
            .unwrap()
            .get_mut(detection_id)
            .and_then(|queue| queue.pop_front())
            .ok_or_else(|| CloudError::api("Unscripted", detection_id.to_string()))
    }
}
