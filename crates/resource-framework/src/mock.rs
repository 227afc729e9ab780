//! # Mock Store & Testing Guide
//!
//! [`MockStore<T>`] hands out a real [`StoreClient<T>`] whose requests are answered
//! from a queue of expectations instead of stored rows. Plug it into a
//! [`LifecycleService`](crate::service::LifecycleService) to test the service logic
//! against failures that a real store rarely produces (a dropped connection, a
//! corrupted row) and to assert which store calls were made.
//!
//! ## When to use Mocks vs the Real Store
//!
//! | Feature | MockStore | StoreActor |
//! |---------|-----------|------------|
//! | **State** | None (scripted answers) | Real rows and unique index |
//! | **Use Case** | Error translation, "no write happened" | End-to-end lifecycle |
//! | **Error Injection** | Easy (`return_err`) | Only through real conflicts |
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut mock = MockStore::<Product>::new();
//! mock.expect_find_by_id(ProductId(1)).return_ok(None);
//!
//! let service = LifecycleService::new(Arc::new(mock.client()), stamper, MergeMode::Replace);
//! assert!(matches!(service.update(ProductId(1), update).await, Err(ServiceError::NotFound(_))));
//!
//! mock.verify(); // every expectation consumed, and nothing else was sent
//! ```
//!
//! A request that arrives with no matching expectation is answered with
//! [`StoreError::Backend`] and recorded; [`MockStore::verify`] then panics, so an
//! unwanted `save` fails the test.
//!
//! For raw access to the requests, use [`create_mock_store`] and the `expect_*`
//! free functions.

use crate::client::StoreClient;
use crate::entity::Resource;
use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected store request and the answer to send back.
enum Expectation<T: Resource> {
    FindAll {
        response: Result<Vec<T>, StoreError>,
    },
    FindById {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    Save {
        response: Result<T, StoreError>,
    },
    DeleteById {
        id: T::Id,
        response: Result<bool, StoreError>,
    },
    Count {
        response: Result<usize, StoreError>,
    },
}

struct MockState<T: Resource> {
    expectations: VecDeque<Expectation<T>>,
    unexpected: Vec<String>,
}

/// A mock store with expectation tracking for fluent testing.
pub struct MockStore<T: Resource> {
    client: StoreClient<T>,
    state: Arc<Mutex<MockState<T>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Resource> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> MockStore<T> {
    /// Creates a new mock store with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let state = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            unexpected: Vec::new(),
        }));
        let state_clone = state.clone();

        // Spawn background task to answer requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut state = state_clone.lock().unwrap();
                let expectation = state.expectations.pop_front();

                match (request, expectation) {
                    (StoreRequest::FindAll { respond_to }, Some(Expectation::FindAll { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::FindById { id, respond_to },
                        Some(Expectation::FindById { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Save { respond_to, .. }, Some(Expectation::Save { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::DeleteById { id, respond_to },
                        Some(Expectation::DeleteById { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Count { respond_to }, Some(Expectation::Count { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        // Put the expectation back so verify() reports it as unmet.
                        if let Some(expectation) = expectation {
                            state.expectations.push_front(expectation);
                        }
                        let description = describe(&request);
                        state.unexpected.push(description.clone());
                        reject(request, description);
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    pub fn expect_find_all(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::FindAll { response })
    }

    pub fn expect_find_by_id(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::FindById { id, response })
    }

    pub fn expect_save(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Save { response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, bool> {
        self.builder(move |response| Expectation::DeleteById { id, response })
    }

    pub fn expect_count(&mut self) -> ExpectationBuilder<T, usize> {
        self.builder(|response| Expectation::Count { response })
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            state: self.state.clone(),
        }
    }

    /// Verifies that all expectations were met and no unexpected request arrived.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.unexpected.is_empty() {
            panic!("Unexpected store requests: {:?}", state.unexpected);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

/// Builder for one expectation; finish it with `return_ok` or `return_err`.
pub struct ExpectationBuilder<T: Resource, R> {
    make: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T>>,
    state: Arc<Mutex<MockState<T>>>,
}

impl<T: Resource, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let expectation = (self.make)(response);
        self.state.lock().unwrap().expectations.push_back(expectation);
    }
}

fn describe<T: Resource>(request: &StoreRequest<T>) -> String {
    match request {
        StoreRequest::FindAll { .. } => "FindAll".to_string(),
        StoreRequest::FindById { id, .. } => format!("FindById({id})"),
        StoreRequest::Save { entity, .. } => format!("Save({entity:?})"),
        StoreRequest::DeleteById { id, .. } => format!("DeleteById({id})"),
        StoreRequest::Count { .. } => "Count".to_string(),
    }
}

fn reject<T: Resource>(request: StoreRequest<T>, description: String) {
    let err = || StoreError::Backend(format!("unexpected request {description}"));
    match request {
        StoreRequest::FindAll { respond_to } => {
            let _ = respond_to.send(Err(err()));
        }
        StoreRequest::FindById { respond_to, .. } => {
            let _ = respond_to.send(Err(err()));
        }
        StoreRequest::Save { respond_to, .. } => {
            let _ = respond_to.send(Err(err()));
        }
        StoreRequest::DeleteById { respond_to, .. } => {
            let _ = respond_to.send(Err(err()));
        }
        StoreRequest::Count { respond_to } => {
            let _ = respond_to.send(Err(err()));
        }
    }
}

// =============================================================================
// RAW HELPERS
// =============================================================================

/// Creates a store client and the receiver its requests arrive on.
///
/// Use this when a test needs to inspect the request payload itself, e.g. the entity
/// handed to `save`, before answering it.
pub fn create_mock_store<T: Resource>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Helper to verify that the next message is a FindById request
pub async fn expect_find_by_id<T: Resource>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::FindById { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Save request
pub async fn expect_save<T: Resource>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T, Response<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Save { entity, respond_to }) => Some((entity, respond_to)),
        _ => None,
    }
}
