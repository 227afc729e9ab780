//! # Store Messages
//!
//! This module defines the message types exchanged between the
//! [`StoreClient`](crate::client::StoreClient) and the
//! [`StoreActor`](crate::actor::StoreActor).

use crate::entity::Resource;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to the store actor.
///
/// The variants map 1:1 onto the [`ResourceStore`](crate::store::ResourceStore)
/// operations. Each carries its own response channel, typed by what that operation
/// returns, so the actor cannot answer a `Count` with an entity.
#[derive(Debug)]
pub enum StoreRequest<T: Resource> {
    FindAll {
        respond_to: Response<Vec<T>>,
    },
    FindById {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Save {
        entity: T,
        respond_to: Response<T>,
    },
    DeleteById {
        id: T::Id,
        respond_to: Response<bool>,
    },
    Count {
        respond_to: Response<usize>,
    },
}
