#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use threatscope::domain::{StatsSnapshot, Verdict};
use threatscope::remote::{RemoteClassifier, RemoteExplainer, Services, StatsProvider};
use threatscope::ui::{DashboardViewModel, RenderSurface};
use threatscope::{Dashboard, Result, RuntimeTiming, SessionSettings, SessionState, Theme, ThreatscopeError};
use tokio::sync::Notify;

/// Scripted stand-in for the classify, explain and stats endpoints.
pub struct FakeBackend {
    prediction: Mutex<std::result::Result<String, String>>,
    explanation: Mutex<std::result::Result<String, String>>,
    stats: Mutex<std::result::Result<StatsSnapshot, String>>,
    gate: Option<Notify>,
    explain_panics: AtomicBool,
    classified_texts: Mutex<Vec<String>>,
    classify_calls: AtomicUsize,
    explain_calls: AtomicUsize,
    stats_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn new(prediction: &str) -> Self {
        Self {
            prediction: Mutex::new(Ok(prediction.to_string())),
            explanation: Mutex::new(Ok("Matches a known attack pattern".to_string())),
            stats: Mutex::new(Ok(StatsSnapshot::new(1, 1, 0).unwrap())),
            gate: None,
            explain_panics: AtomicBool::new(false),
            classified_texts: Mutex::new(vec![]),
            classify_calls: AtomicUsize::new(0),
            explain_calls: AtomicUsize::new(0),
            stats_calls: AtomicUsize::new(0),
        }
    }

    /// Classification waits for [`FakeBackend::release`] before answering.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Notify::new());
        self
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn fail_classify(&self, message: &str) {
        *self.prediction.lock().unwrap() = Err(message.to_string());
    }

    pub fn fail_explain(&self, message: &str) {
        *self.explanation.lock().unwrap() = Err(message.to_string());
    }

    /// The explainer panics instead of answering until told otherwise.
    pub fn crash_explain(&self, crash: bool) {
        self.explain_panics.store(crash, Ordering::SeqCst);
    }

    pub fn set_stats(&self, stats: std::result::Result<StatsSnapshot, &str>) {
        *self.stats.lock().unwrap() = stats.map_err(str::to_string);
    }

    pub fn classified_texts(&self) -> Vec<String> {
        self.classified_texts.lock().unwrap().clone()
    }

    pub fn classify_calls(&self) -> usize {
        self.classify_calls.load(Ordering::SeqCst)
    }

    pub fn explain_calls(&self) -> usize {
        self.explain_calls.load(Ordering::SeqCst)
    }

    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteClassifier for FakeBackend {
    async fn classify(&self, text: &str) -> Result<Verdict> {
        self.classify_calls.fetch_add(1, Ordering::SeqCst);
        self.classified_texts.lock().unwrap().push(text.to_string());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let prediction = self.prediction.lock().unwrap().clone();
        prediction
            .map(|label| Verdict::from_prediction(&label))
            .map_err(ThreatscopeError::Classifier)
    }
}

#[async_trait]
impl RemoteExplainer for FakeBackend {
    async fn explain(&self, _text: &str) -> Result<String> {
        self.explain_calls.fetch_add(1, Ordering::SeqCst);
        assert!(!self.explain_panics.load(Ordering::SeqCst), "explainer crashed");
        self.explanation.lock().unwrap().clone().map_err(ThreatscopeError::Explainer)
    }
}

#[async_trait]
impl StatsProvider for FakeBackend {
    async fn fetch_stats(&self) -> Result<StatsSnapshot> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        self.stats.lock().unwrap().clone().map_err(ThreatscopeError::StatsRefresh)
    }
}

/// Surface that keeps every frame's view model.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub frames: Vec<DashboardViewModel>,
}

impl RecordingSurface {
    pub fn last(&self) -> &DashboardViewModel {
        self.frames.last().expect("at least one frame rendered")
    }
}

impl RenderSurface for RecordingSurface {
    fn render(&mut self, vm: &DashboardViewModel, _theme: &Theme) {
        self.frames.push(vm.clone());
    }
}

pub fn dashboard(backend: &Arc<FakeBackend>) -> Dashboard<RecordingSurface> {
    let state = SessionState::new(SessionSettings::default(), Theme::default());
    Dashboard::new(
        state,
        Services::from_backend(backend.clone()),
        RecordingSurface::default(),
        RuntimeTiming::default(),
    )
}

/// Steps the loop until `done` holds, failing after a minute of (paused) time.
pub async fn run_until<F>(dashboard: &mut Dashboard<RecordingSurface>, done: F)
where
    F: Fn(&SessionState) -> bool,
{
    let finished = tokio::time::timeout(Duration::from_secs(60), async {
        while !done(dashboard.state()) {
            assert!(dashboard.step().await, "event channel closed");
        }
    })
    .await;

    assert!(finished.is_ok(), "dashboard never reached the expected state");
}
