//! Typed data-access interface. One method per entity operation; every
//! implementation binds parameters, never splices values into SQL.
//!
//! Handlers receive these as trait objects through `AppState`, so the
//! Postgres store and the in-memory store are interchangeable.

use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::*;
use crate::types::RoleSet;

pub type StoreResult<T> = Result<T, DatabaseError>;

/// Accounts, role rows and the registration transaction
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Round-trip to the backing store
    async fn ping(&self) -> StoreResult<()>;

    /// Stored password hash for the email, `None` when no account exists
    async fn password_hash(&self, email: &str) -> StoreResult<Option<String>>;

    /// Role rows held by the email
    async fn roles(&self, email: &str) -> StoreResult<RoleSet>;

    /// Write the account and its role row as one atomic unit.
    ///
    /// For supervisors the museum is inserted first when its address is
    /// unknown; an existing museum is left untouched. An existing email
    /// yields `UniqueViolation`, an unknown supervisor or museum yields
    /// `ForeignKeyViolation`. Nothing is written when any step fails.
    async fn register(&self, account: NewAccount, role: RoleAssignment) -> StoreResult<()>;

    async fn account(&self, email: &str) -> StoreResult<Option<Account>>;

    /// Returns false when no account matched
    async fn update_account(&self, email: &str, update: AccountUpdate) -> StoreResult<bool>;

    /// Removes the account; role rows go with it
    async fn delete_account(&self, email: &str) -> StoreResult<bool>;

    async fn supervisor_info(&self, email: &str) -> StoreResult<Option<SupervisorInfo>>;

    async fn employee_info(&self, email: &str) -> StoreResult<Option<EmployeeInfo>>;

    async fn employees_of(&self, supervisor_email: &str) -> StoreResult<Vec<EmployeeSummary>>;
}

/// Museums, visits, exhibits, artifacts, events, artists, reviews, edit logs
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // Museums and visits
    async fn museums(&self, name: Option<&str>) -> StoreResult<Vec<Museum>>;
    async fn museum(&self, address: &str) -> StoreResult<Option<Museum>>;
    async fn visited_museums(&self, visitor_email: &str) -> StoreResult<Vec<Museum>>;
    /// Recording the same visit twice is a no-op
    async fn add_visit(&self, visitor_email: &str, museum_address: &str) -> StoreResult<()>;
    async fn remove_visit(&self, visitor_email: &str, museum_address: &str) -> StoreResult<bool>;

    // Exhibits
    async fn exhibits(&self, museum_address: Option<&str>) -> StoreResult<Vec<Exhibit>>;
    async fn create_exhibit(&self, exhibit: NewExhibit) -> StoreResult<Exhibit>;
    async fn update_exhibit(&self, id: i64, update: ExhibitUpdate, stamp: &EditStamp) -> StoreResult<Option<Exhibit>>;
    async fn delete_exhibit(&self, id: i64, stamp: &EditStamp) -> StoreResult<bool>;

    // Artifacts
    async fn artifacts(&self, exhibit_id: Option<i64>) -> StoreResult<Vec<Artifact>>;
    async fn artifact(&self, id: i64) -> StoreResult<Option<ArtifactDetail>>;
    async fn create_artifact(&self, artifact: NewArtifact) -> StoreResult<Artifact>;
    async fn update_artifact(&self, id: i64, update: ArtifactUpdate, stamp: &EditStamp) -> StoreResult<Option<Artifact>>;
    async fn delete_artifact(&self, id: i64, stamp: &EditStamp) -> StoreResult<bool>;

    // Events
    async fn events(&self, museum_address: Option<&str>) -> StoreResult<Vec<Event>>;
    async fn event(&self, id: i64) -> StoreResult<Option<EventDetail>>;
    async fn create_event(&self, event: NewEvent) -> StoreResult<Event>;
    /// The merged row must still satisfy end >= start (`CheckViolation`)
    async fn update_event(&self, id: i64, update: EventUpdate, stamp: &EditStamp) -> StoreResult<Option<Event>>;
    async fn delete_event(&self, id: i64, stamp: &EditStamp) -> StoreResult<bool>;
    async fn attach_exhibit(&self, event_id: i64, exhibit_id: i64) -> StoreResult<()>;
    async fn detach_exhibit(&self, event_id: i64, exhibit_id: i64) -> StoreResult<bool>;

    // Artists
    async fn artists(&self) -> StoreResult<Vec<Artist>>;
    async fn create_artist(&self, artist: NewArtist) -> StoreResult<Artist>;
    async fn update_artist(&self, id: i64, update: ArtistUpdate) -> StoreResult<Option<Artist>>;
    async fn delete_artist(&self, id: i64) -> StoreResult<bool>;
    async fn link_work(&self, artist_id: i64, artifact_id: i64) -> StoreResult<()>;
    async fn unlink_work(&self, artist_id: i64, artifact_id: i64) -> StoreResult<bool>;
    async fn artist_works(&self, artist_id: i64) -> StoreResult<Vec<Artifact>>;

    // Reviews. A second review by the same visitor replaces the first.
    async fn artifact_reviews(&self, artifact_id: i64) -> StoreResult<Vec<ArtifactReview>>;
    async fn event_reviews(&self, event_id: i64) -> StoreResult<Vec<EventReview>>;
    async fn visitor_reviews(&self, visitor_email: &str) -> StoreResult<VisitorReviews>;
    async fn put_artifact_review(&self, visitor_email: &str, artifact_id: i64, body: &str) -> StoreResult<()>;
    async fn put_event_review(&self, visitor_email: &str, event_id: i64, body: &str) -> StoreResult<()>;
    async fn delete_artifact_review(&self, visitor_email: &str, artifact_id: i64) -> StoreResult<bool>;
    async fn delete_event_review(&self, visitor_email: &str, event_id: i64) -> StoreResult<bool>;

    /// Newest first
    async fn edit_logs(&self, supervisor_email: &str) -> StoreResult<Vec<EditLog>>;
}
