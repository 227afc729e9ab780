//! # Store Client
//!
//! This module defines the client half of the in-memory store actor.

use crate::entity::Resource;
use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use crate::store::ResourceStore;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// ## StoreClient
///
/// The `StoreClient<T>` forwards [`ResourceStore`] calls to a
/// [`StoreActor<T>`](crate::actor::StoreActor) over a Tokio mpsc channel and awaits the
/// answer on a oneshot channel.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive.
/// * **Shutdown** – the actor stops once every clone has been dropped.
#[derive(Clone)]
pub struct StoreClient<T: Resource> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Resource> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}

#[async_trait]
impl<T: Resource> ResourceStore<T> for StoreClient<T> {
    async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::FindAll { respond_to })
            .await
    }

    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::FindById { id, respond_to })
            .await
    }

    async fn save(&self, entity: T) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Save { entity, respond_to })
            .await
    }

    async fn delete_by_id(&self, id: T::Id) -> Result<bool, StoreError> {
        self.request(|respond_to| StoreRequest::DeleteById { id, respond_to })
            .await
    }

    async fn count(&self) -> Result<usize, StoreError> {
        self.request(|respond_to| StoreRequest::Count { respond_to })
            .await
    }
}
