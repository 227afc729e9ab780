use resource_framework::{
    render, Audited, AuditMetadata, AuditStamper, FixedActor, Identified, LifecycleService,
    MergeMode, Projectable, Resource, ResourceService, ServiceError, StoreActor, SystemClock,
    UniqueKey, View,
};
use serde::ser::SerializeMap;
use serde::Serializer;
use std::sync::Arc;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Account {
    id: Option<u64>,
    audit: AuditMetadata,
    handle: String,
    display_name: String,
}

#[derive(Debug, Default)]
struct AccountUpdate {
    handle: Option<String>,
    display_name: Option<String>,
}

impl Account {
    fn new(handle: &str, display_name: &str) -> Self {
        Self {
            id: None,
            audit: AuditMetadata::default(),
            handle: handle.into(),
            display_name: display_name.into(),
        }
    }
}

impl Identified for Account {
    type Id = u64;

    fn id(&self) -> Option<&u64> {
        self.id.as_ref()
    }

    fn assign_id(&mut self, id: u64) {
        self.id = Some(id);
    }
}

impl Audited for Account {
    fn audit(&self) -> &AuditMetadata {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditMetadata {
        &mut self.audit
    }
}

impl Resource for Account {
    type Update = AccountUpdate;

    fn resource_name() -> &'static str {
        "Account"
    }

    fn apply_update(&mut self, update: AccountUpdate, mode: MergeMode) {
        self.handle = mode.resolve(std::mem::take(&mut self.handle), update.handle);
        self.display_name = mode.resolve(std::mem::take(&mut self.display_name), update.display_name);
    }

    fn validate(&self) -> Result<(), ServiceError> {
        if self.handle.trim().is_empty() {
            return Err(ServiceError::invalid("handle", "must not be blank"));
        }
        Ok(())
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new("handle", self.handle.clone())]
    }
}

impl Projectable for Account {
    fn project<S: Serializer>(&self, view: View, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("handle", &self.handle)?;
        map.serialize_entry("displayName", &self.display_name)?;
        if view.shows_audit() {
            map.serialize_entry("createdBy", &self.audit.created_by)?;
            map.serialize_entry("updatedBy", &self.audit.updated_by)?;
        }
        map.end()
    }
}

struct AccountService {
    inner: LifecycleService<Account>,
}

impl ResourceService<Account> for AccountService {
    fn lifecycle(&self) -> &LifecycleService<Account> {
        &self.inner
    }
}

fn setup(actor_name: &str) -> AccountService {
    let (actor, store) = StoreActor::<Account>::new(64);
    tokio::spawn(actor.run());
    let stamper = AuditStamper::new(
        Arc::new(SystemClock),
        Arc::new(FixedActor(actor_name.to_string())),
        "system",
    );
    AccountService {
        inner: LifecycleService::new(Arc::new(store), stamper, MergeMode::Replace),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_lifecycle_through_service_trait() {
    let service = setup("alice");

    let created = service
        .lifecycle()
        .create(Account::new("ada", "Ada"))
        .await
        .unwrap();
    let id = created.id.unwrap();
    assert_eq!(created.audit.created_by.as_deref(), Some("alice"));
    assert_eq!(created.audit.updated_by, None);

    let fetched = service.find_by_id(id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(service.count().await.unwrap(), 1);

    let updated = service
        .lifecycle()
        .update(
            id,
            AccountUpdate {
                handle: Some("ada".into()),
                display_name: Some("Ada L.".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.display_name, "Ada L.");
    assert_eq!(updated.audit.updated_by.as_deref(), Some("alice"));
    assert_eq!(updated.audit.created_at, created.audit.created_at);
    assert!(updated.audit.updated_at >= created.audit.updated_at);

    service.delete_by_id(id).await.unwrap();
    assert_eq!(
        service.find_by_id(id).await.unwrap_err(),
        ServiceError::NotFound(id.to_string())
    );
    assert!(service.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_creates_with_same_key() {
    let service = setup("alice");
    let lifecycle = service.lifecycle().clone();

    let mut handles = Vec::new();
    for i in 0..10 {
        let lifecycle = lifecycle.clone();
        handles.push(tokio::spawn(async move {
            lifecycle
                .create(Account::new("same", &format!("Racer {i}")))
                .await
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(ServiceError::Conflict { field, value }) => {
                assert_eq!(field, "handle");
                assert_eq!(value, "same");
                conflicts += 1;
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 9);
    assert_eq!(service.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_deleted_key_can_be_reused() {
    let service = setup("alice");
    let first = service
        .lifecycle()
        .create(Account::new("reuse", "One"))
        .await
        .unwrap();
    service.delete_by_id(first.id.unwrap()).await.unwrap();

    let second = service
        .lifecycle()
        .create(Account::new("reuse", "Two"))
        .await
        .unwrap();
    assert_ne!(second.id, first.id);
}

#[tokio::test]
async fn test_projection_tiers() {
    let service = setup("bob");
    let created = service
        .lifecycle()
        .create(Account::new("grace", "Grace"))
        .await
        .unwrap();

    let public = render(&created, View::Public).unwrap();
    let internal = render(&created, View::Internal).unwrap();

    assert!(public.get("createdBy").is_none());
    assert_eq!(internal["createdBy"], "bob");
    for (key, value) in public.as_object().unwrap() {
        assert_eq!(&internal[key], value);
    }
}
