//! Testing utilities including mock implementations.
//!
//! These let applications exercise the fetch, batch and comparison flows
//! without network calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use swapi_client::{starship_url, Result, ShipId, Starship, SwapiError, Transport};

use crate::batch::Catalog;
use crate::comparator::ComparisonResult;
use crate::presenter::Presenter;

/// API root the mock transport answers for.
pub const MOCK_API_ROOT: &str = "http://swapi.test/api";

#[derive(Debug, Clone)]
enum MockRoute {
    Body(String),
    NetworkFailure,
}

/// Response handed from `get` to `decode`.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub url: String,
    pub body: String,
}

/// A mock transport with canned bodies, failures and per-route delays.
///
/// Unknown URLs fail as transport errors.
#[derive(Default)]
pub struct MockTransport {
    routes: Arc<RwLock<HashMap<String, MockRoute>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    get_calls: Arc<Mutex<Vec<String>>>,
    decode_calls: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn url(id: ShipId) -> String {
        starship_url(MOCK_API_ROOT, id)
    }

    /// Serve `body` as JSON for the starship.
    pub fn with_ship(self, id: ShipId, body: Value) -> Self {
        self.with_raw_body(id, body.to_string())
    }

    /// Serve a raw, possibly malformed, body for the starship.
    pub fn with_raw_body(self, id: ShipId, body: impl Into<String>) -> Self {
        self.routes
            .write()
            .unwrap()
            .insert(Self::url(id), MockRoute::Body(body.into()));
        self
    }

    /// Fail the request for the starship before any response exists.
    pub fn with_network_failure(self, id: ShipId) -> Self {
        self.routes
            .write()
            .unwrap()
            .insert(Self::url(id), MockRoute::NetworkFailure);
        self
    }

    /// Delay the request for the starship.
    pub fn with_delay(self, id: ShipId, delay: Duration) -> Self {
        self.delays.write().unwrap().insert(Self::url(id), delay);
        self
    }

    /// URLs requested so far, in call order.
    pub fn get_calls(&self) -> Vec<String> {
        self.get_calls.lock().unwrap().clone()
    }

    pub fn decode_count(&self) -> usize {
        self.decode_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    type Response = MockResponse;

    async fn get(&self, url: &str) -> Result<MockResponse> {
        self.get_calls.lock().unwrap().push(url.to_string());

        let delay = self.delays.read().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let route = self.routes.read().unwrap().get(url).cloned();
        match route {
            Some(MockRoute::Body(body)) => Ok(MockResponse {
                url: url.to_string(),
                body,
            }),
            Some(MockRoute::NetworkFailure) => {
                Err(SwapiError::transport(format!("connection refused: {}", url)))
            }
            None => Err(SwapiError::transport(format!("no route for {}", url))),
        }
    }

    async fn decode(&self, response: MockResponse) -> Result<Starship> {
        self.decode_calls.lock().unwrap().push(response.url);
        Ok(serde_json::from_str(&response.body)?)
    }
}

/// Record of a render instruction sent to the presenter.
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterCall {
    CatalogLoading(bool),
    PopulatePickers(Catalog),
    ComparisonLoading(bool),
    SelectionInvalid(Option<String>),
    ShowComparison(Vec<ComparisonResult>),
    ShowError(String),
}

/// A presenter that records every instruction for assertions.
#[derive(Default)]
pub struct RecordingPresenter {
    calls: Mutex<Vec<PresenterCall>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<PresenterCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: PresenterCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Presenter for RecordingPresenter {
    fn catalog_loading(&self, loading: bool) {
        self.record(PresenterCall::CatalogLoading(loading));
    }

    fn populate_pickers(&self, catalog: &Catalog) {
        self.record(PresenterCall::PopulatePickers(catalog.clone()));
    }

    fn comparison_loading(&self, loading: bool) {
        self.record(PresenterCall::ComparisonLoading(loading));
    }

    fn selection_invalid(&self, message: Option<&str>) {
        self.record(PresenterCall::SelectionInvalid(message.map(str::to_string)));
    }

    fn show_comparison(&self, results: &[ComparisonResult]) {
        self.record(PresenterCall::ShowComparison(results.to_vec()));
    }

    fn show_error(&self, error: &(dyn std::error::Error + 'static)) {
        self.record(PresenterCall::ShowError(error.to_string()));
    }
}
