//! Scripted in-memory data-provider service.
//!
//! Replies are queued per city. A gated reply stays pending until the test
//! releases it, which lets a test decide the order responses arrive in.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use laborsuche_core::{
    DatasetDescriptor, ErrorSink, FetchError, Filters, Operation, ProviderSetController,
    ProviderSource, RawProvider, ViewportSettings,
};
use tokio::sync::oneshot;

pub type ProvidersResult = Result<Vec<RawProvider>, FetchError>;

enum Reply {
    Now(ProvidersResult),
    Gated(oneshot::Receiver<ProvidersResult>),
}

#[derive(Default)]
pub struct ScriptedSource {
    datasets: Mutex<VecDeque<Result<Vec<DatasetDescriptor>, FetchError>>>,
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<Filters>>,
}

impl ScriptedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, city: &str, result: ProvidersResult) {
        self.push(city, Reply::Now(result));
    }

    /// Queue a reply that resolves when the returned sender fires
    pub fn gate(&self, city: &str) -> oneshot::Sender<ProvidersResult> {
        let (tx, rx) = oneshot::channel();
        self.push(city, Reply::Gated(rx));
        tx
    }

    pub fn datasets(&self, result: Result<Vec<DatasetDescriptor>, FetchError>) {
        self.datasets.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<Filters> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, city: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(city.to_string())
            .or_default()
            .push_back(reply);
    }
}

#[async_trait]
impl ProviderSource for ScriptedSource {
    async fn datasets(&self) -> Result<Vec<DatasetDescriptor>, FetchError> {
        let next = self.datasets.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn providers(&self, filters: &Filters) -> ProvidersResult {
        self.calls.lock().unwrap().push(filters.clone());
        let next = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&filters.city)
            .and_then(VecDeque::pop_front);

        match next {
            Some(Reply::Now(result)) => result,
            Some(Reply::Gated(rx)) => rx.await.expect("gate dropped without a reply"),
            None => panic!("no scripted reply for {}", filters.city),
        }
    }
}

/// Error sink that remembers what it was told
#[derive(Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<(Operation, FetchError)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reports(&self) -> Vec<(Operation, FetchError)> {
        self.reports.lock().unwrap().clone()
    }
}

impl ErrorSink for RecordingSink {
    fn report(&self, operation: &Operation, error: &FetchError) {
        self.reports
            .lock()
            .unwrap()
            .push((operation.clone(), error.clone()));
    }
}

pub fn controller(
    source: &Arc<ScriptedSource>,
    sink: &Arc<RecordingSink>,
) -> ProviderSetController {
    ProviderSetController::new(
        source.clone(),
        sink.clone(),
        ViewportSettings::default(),
    )
}
