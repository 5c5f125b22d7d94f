//! In-process store with the same key, reference and atomicity rules as the
//! Postgres schema. Backs the test suite; the server binary always runs on
//! `PgStore`.
//!
//! Writes run against a staged copy of the tables which replaces the live
//! copy only when every step succeeded, so a failed multi-step write leaves
//! nothing behind.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::manager::DatabaseError;
use super::models::*;
use super::store::{AccountStore, CatalogStore, StoreResult};
use crate::types::RoleSet;

#[derive(Debug, Clone)]
struct EmployeeRow {
    supervisor_email: String,
    museum_address: String,
}

#[derive(Debug, Clone)]
struct ReviewRow {
    body: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    museums: BTreeMap<String, Museum>,
    accounts: BTreeMap<String, Account>,
    visitors: BTreeSet<String>,
    supervisors: BTreeMap<String, Option<String>>,
    employees: BTreeMap<String, EmployeeRow>,
    visits: BTreeSet<(String, String)>,
    exhibits: BTreeMap<i64, Exhibit>,
    artifacts: BTreeMap<i64, Artifact>,
    artists: BTreeMap<i64, Artist>,
    artist_works: BTreeSet<(i64, i64)>,
    events: BTreeMap<i64, Event>,
    event_exhibits: BTreeSet<(i64, i64)>,
    artifact_reviews: BTreeMap<(String, i64), ReviewRow>,
    event_reviews: BTreeMap<(String, i64), ReviewRow>,
    edit_logs: Vec<EditLog>,
    next_id: i64,
}

fn fk(constraint: &str) -> DatabaseError {
    DatabaseError::ForeignKeyViolation(constraint.to_string())
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn username(&self, email: &str) -> String {
        self.accounts
            .get(email)
            .map(|a| a.username.clone())
            .unwrap_or_default()
    }

    fn log_edit(&mut self, stamp: &EditStamp, target: EditTarget, target_id: i64, action: EditAction) {
        let id = self.next_id();
        self.edit_logs.push(EditLog {
            id,
            editor_email: stamp.editor_email.clone(),
            supervisor_email: stamp.supervisor_email.clone(),
            target_kind: target.as_str().to_string(),
            target_id,
            action: action.as_str().to_string(),
            edited_at: Utc::now(),
        });
    }

    fn artifact_review(&self, key: &(String, i64), row: &ReviewRow) -> ArtifactReview {
        ArtifactReview {
            visitor_email: key.0.clone(),
            username: self.username(&key.0),
            artifact_id: key.1,
            artifact_name: self.artifacts.get(&key.1).map(|a| a.name.clone()).unwrap_or_default(),
            body: row.body.clone(),
            created_at: row.created_at,
        }
    }

    fn event_review(&self, key: &(String, i64), row: &ReviewRow) -> EventReview {
        EventReview {
            visitor_email: key.0.clone(),
            username: self.username(&key.0),
            event_id: key.1,
            event_name: self.events.get(&key.1).map(|e| e.name.clone()).unwrap_or_default(),
            body: row.body.clone(),
            created_at: row.created_at,
        }
    }

    fn insert_account(&mut self, account: &NewAccount) -> StoreResult<()> {
        if self.accounts.contains_key(&account.email) {
            return Err(DatabaseError::UniqueViolation("accounts_pkey".to_string()));
        }
        self.accounts.insert(
            account.email.clone(),
            Account {
                email: account.email.clone(),
                first_name: account.first_name.clone(),
                middle_name: account.middle_name.clone(),
                last_name: account.last_name.clone(),
                username: account.username.clone(),
                password_hash: account.password_hash.clone(),
                year_of_birth: account.year_of_birth,
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    fn insert_role(&mut self, email: &str, role: &RoleAssignment) -> StoreResult<()> {
        match role {
            RoleAssignment::Visitor => {
                self.visitors.insert(email.to_string());
            }
            RoleAssignment::Supervisor { museum } => {
                if !self.museums.contains_key(&museum.address) {
                    return Err(fk("supervisors_museum_address_fkey"));
                }
                self.supervisors.insert(email.to_string(), Some(museum.address.clone()));
            }
            RoleAssignment::Employee {
                supervisor_email,
                museum_address,
            } => {
                if !self.supervisors.contains_key(supervisor_email) {
                    return Err(fk("employees_supervisor_email_fkey"));
                }
                if !self.museums.contains_key(museum_address) {
                    return Err(fk("employees_museum_address_fkey"));
                }
                self.employees.insert(
                    email.to_string(),
                    EmployeeRow {
                        supervisor_email: supervisor_email.clone(),
                        museum_address: museum_address.clone(),
                    },
                );
            }
        }
        Ok(())
    }

    fn check_event_dates(event: &Event) -> StoreResult<()> {
        if event.end_date < event.start_date {
            return Err(DatabaseError::CheckViolation("events_check".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_next_role_insert: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` on a staged copy; the copy becomes live only on success
    fn transaction<T>(&self, f: impl FnOnce(&mut Tables) -> StoreResult<T>) -> StoreResult<T> {
        let mut live = self.read();
        let mut staged = live.clone();
        let value = f(&mut staged)?;
        *live = staged;
        Ok(value)
    }

    /// Make the next registration fail after its account row is staged, as
    /// if the connection dropped mid-transaction
    pub fn fail_next_role_insert(&self) {
        self.fail_next_role_insert.store(true, Ordering::SeqCst);
    }

    pub fn account_count(&self) -> usize {
        self.read().accounts.len()
    }

    pub fn role_row_count(&self) -> usize {
        let tables = self.read();
        tables.visitors.len() + tables.supervisors.len() + tables.employees.len()
    }

    pub fn museum_count(&self) -> usize {
        self.read().museums.len()
    }

    /// Seed a museum directly, outside of supervisor registration
    pub fn insert_museum(&self, museum: Museum) {
        self.read().museums.insert(museum.address.clone(), museum);
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn password_hash(&self, email: &str) -> StoreResult<Option<String>> {
        Ok(self.read().accounts.get(email).map(|a| a.password_hash.clone()))
    }

    async fn roles(&self, email: &str) -> StoreResult<RoleSet> {
        let tables = self.read();
        Ok(RoleSet {
            visitor: tables.visitors.contains(email),
            supervisor: tables.supervisors.contains_key(email),
            employee: tables.employees.contains_key(email),
        })
    }

    async fn register(&self, account: NewAccount, role: RoleAssignment) -> StoreResult<()> {
        let inject_failure = self.fail_next_role_insert.swap(false, Ordering::SeqCst);

        self.transaction(|tables| {
            if let RoleAssignment::Supervisor { museum } = &role {
                tables
                    .museums
                    .entry(museum.address.clone())
                    .or_insert_with(|| museum.clone());
            }
            tables.insert_account(&account)?;
            if inject_failure {
                return Err(DatabaseError::ConnectionError("connection reset by peer".to_string()));
            }
            tables.insert_role(&account.email, &role)
        })
    }

    async fn account(&self, email: &str) -> StoreResult<Option<Account>> {
        Ok(self.read().accounts.get(email).cloned())
    }

    async fn update_account(&self, email: &str, update: AccountUpdate) -> StoreResult<bool> {
        let mut tables = self.read();
        let Some(account) = tables.accounts.get_mut(email) else {
            return Ok(false);
        };
        if let Some(username) = update.username {
            account.username = username;
        }
        if let Some(hash) = update.password_hash {
            account.password_hash = hash;
        }
        Ok(true)
    }

    async fn delete_account(&self, email: &str) -> StoreResult<bool> {
        self.transaction(|tables| {
            if tables.accounts.remove(email).is_none() {
                return Ok(false);
            }
            if tables.employees.values().any(|e| e.supervisor_email == email) {
                return Err(fk("employees_supervisor_email_fkey"));
            }
            tables.visitors.remove(email);
            tables.supervisors.remove(email);
            tables.employees.remove(email);
            tables.visits.retain(|(visitor, _)| visitor != email);
            tables.artifact_reviews.retain(|(visitor, _), _| visitor != email);
            tables.event_reviews.retain(|(visitor, _), _| visitor != email);
            Ok(true)
        })
    }

    async fn supervisor_info(&self, email: &str) -> StoreResult<Option<SupervisorInfo>> {
        let tables = self.read();
        let Some(museum_address) = tables.supervisors.get(email) else {
            return Ok(None);
        };
        let museum_name = museum_address
            .as_ref()
            .and_then(|address| tables.museums.get(address))
            .map(|m| m.name.clone());
        Ok(Some(SupervisorInfo {
            email: email.to_string(),
            username: tables.username(email),
            museum_address: museum_address.clone(),
            museum_name,
        }))
    }

    async fn employee_info(&self, email: &str) -> StoreResult<Option<EmployeeInfo>> {
        let tables = self.read();
        Ok(tables.employees.get(email).map(|row| EmployeeInfo {
            email: email.to_string(),
            username: tables.username(email),
            supervisor_email: row.supervisor_email.clone(),
            museum_address: row.museum_address.clone(),
            museum_name: tables
                .museums
                .get(&row.museum_address)
                .map(|m| m.name.clone())
                .unwrap_or_default(),
        }))
    }

    async fn employees_of(&self, supervisor_email: &str) -> StoreResult<Vec<EmployeeSummary>> {
        let tables = self.read();
        Ok(tables
            .employees
            .iter()
            .filter(|(_, row)| row.supervisor_email == supervisor_email)
            .filter_map(|(email, row)| {
                tables.accounts.get(email).map(|a| EmployeeSummary {
                    email: a.email.clone(),
                    first_name: a.first_name.clone(),
                    middle_name: a.middle_name.clone(),
                    last_name: a.last_name.clone(),
                    username: a.username.clone(),
                    museum_address: row.museum_address.clone(),
                })
            })
            .collect())
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn museums(&self, name: Option<&str>) -> StoreResult<Vec<Museum>> {
        let mut rows: Vec<Museum> = self
            .read()
            .museums
            .values()
            .filter(|m| name.map_or(true, |n| m.name == n))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (&a.name, &a.address).cmp(&(&b.name, &b.address)));
        Ok(rows)
    }

    async fn museum(&self, address: &str) -> StoreResult<Option<Museum>> {
        Ok(self.read().museums.get(address).cloned())
    }

    async fn visited_museums(&self, visitor_email: &str) -> StoreResult<Vec<Museum>> {
        let tables = self.read();
        let mut rows: Vec<Museum> = tables
            .visits
            .iter()
            .filter(|(visitor, _)| visitor == visitor_email)
            .filter_map(|(_, address)| tables.museums.get(address).cloned())
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn add_visit(&self, visitor_email: &str, museum_address: &str) -> StoreResult<()> {
        self.transaction(|tables| {
            if !tables.visitors.contains(visitor_email) {
                return Err(fk("visits_visitor_email_fkey"));
            }
            if !tables.museums.contains_key(museum_address) {
                return Err(fk("visits_museum_address_fkey"));
            }
            tables
                .visits
                .insert((visitor_email.to_string(), museum_address.to_string()));
            Ok(())
        })
    }

    async fn remove_visit(&self, visitor_email: &str, museum_address: &str) -> StoreResult<bool> {
        Ok(self
            .read()
            .visits
            .remove(&(visitor_email.to_string(), museum_address.to_string())))
    }

    async fn exhibits(&self, museum_address: Option<&str>) -> StoreResult<Vec<Exhibit>> {
        Ok(self
            .read()
            .exhibits
            .values()
            .filter(|x| museum_address.map_or(true, |m| x.museum_address == m))
            .cloned()
            .collect())
    }

    async fn create_exhibit(&self, exhibit: NewExhibit) -> StoreResult<Exhibit> {
        self.transaction(|tables| {
            if !tables.museums.contains_key(&exhibit.museum_address) {
                return Err(fk("exhibits_museum_address_fkey"));
            }
            let row = Exhibit {
                id: tables.next_id(),
                name: exhibit.name,
                museum_address: exhibit.museum_address,
            };
            tables.exhibits.insert(row.id, row.clone());
            Ok(row)
        })
    }

    async fn update_exhibit(&self, id: i64, update: ExhibitUpdate, stamp: &EditStamp) -> StoreResult<Option<Exhibit>> {
        self.transaction(|tables| {
            let Some(exhibit) = tables.exhibits.get_mut(&id) else {
                return Ok(None);
            };
            if let Some(name) = update.name {
                exhibit.name = name;
            }
            let row = exhibit.clone();
            tables.log_edit(stamp, EditTarget::Exhibit, id, EditAction::Update);
            Ok(Some(row))
        })
    }

    async fn delete_exhibit(&self, id: i64, stamp: &EditStamp) -> StoreResult<bool> {
        self.transaction(|tables| {
            if !tables.exhibits.contains_key(&id) {
                return Ok(false);
            }
            if tables.artifacts.values().any(|a| a.exhibit_id == id) {
                return Err(fk("artifacts_exhibit_id_fkey"));
            }
            tables.exhibits.remove(&id);
            tables.event_exhibits.retain(|(_, exhibit)| *exhibit != id);
            tables.log_edit(stamp, EditTarget::Exhibit, id, EditAction::Delete);
            Ok(true)
        })
    }

    async fn artifacts(&self, exhibit_id: Option<i64>) -> StoreResult<Vec<Artifact>> {
        Ok(self
            .read()
            .artifacts
            .values()
            .filter(|a| exhibit_id.map_or(true, |x| a.exhibit_id == x))
            .cloned()
            .collect())
    }

    async fn artifact(&self, id: i64) -> StoreResult<Option<ArtifactDetail>> {
        let tables = self.read();
        let Some(artifact) = tables.artifacts.get(&id) else {
            return Ok(None);
        };
        let Some(exhibit) = tables.exhibits.get(&artifact.exhibit_id) else {
            return Ok(None);
        };
        let Some(museum) = tables.museums.get(&exhibit.museum_address) else {
            return Ok(None);
        };
        Ok(Some(ArtifactDetail {
            artifact: artifact.clone(),
            exhibit_name: exhibit.name.clone(),
            museum_name: museum.name.clone(),
            museum_address: museum.address.clone(),
        }))
    }

    async fn create_artifact(&self, artifact: NewArtifact) -> StoreResult<Artifact> {
        self.transaction(|tables| {
            if !tables.exhibits.contains_key(&artifact.exhibit_id) {
                return Err(fk("artifacts_exhibit_id_fkey"));
            }
            let row = Artifact {
                id: tables.next_id(),
                name: artifact.name,
                description: artifact.description,
                year_made: artifact.year_made,
                creators: artifact.creators,
                display_status: artifact
                    .display_status
                    .unwrap_or_else(|| DEFAULT_DISPLAY_STATUS.to_string()),
                exhibit_id: artifact.exhibit_id,
            };
            tables.artifacts.insert(row.id, row.clone());
            Ok(row)
        })
    }

    async fn update_artifact(&self, id: i64, update: ArtifactUpdate, stamp: &EditStamp) -> StoreResult<Option<Artifact>> {
        self.transaction(|tables| {
            if let Some(exhibit_id) = update.exhibit_id {
                if !tables.exhibits.contains_key(&exhibit_id) {
                    return Err(fk("artifacts_exhibit_id_fkey"));
                }
            }
            let Some(artifact) = tables.artifacts.get_mut(&id) else {
                return Ok(None);
            };
            update.apply(artifact);
            let row = artifact.clone();
            tables.log_edit(stamp, EditTarget::Artifact, id, EditAction::Update);
            Ok(Some(row))
        })
    }

    async fn delete_artifact(&self, id: i64, stamp: &EditStamp) -> StoreResult<bool> {
        self.transaction(|tables| {
            if tables.artifacts.remove(&id).is_none() {
                return Ok(false);
            }
            tables.artist_works.retain(|(_, artifact)| *artifact != id);
            tables.artifact_reviews.retain(|(_, artifact), _| *artifact != id);
            tables.log_edit(stamp, EditTarget::Artifact, id, EditAction::Delete);
            Ok(true)
        })
    }

    async fn events(&self, museum_address: Option<&str>) -> StoreResult<Vec<Event>> {
        let mut rows: Vec<Event> = self
            .read()
            .events
            .values()
            .filter(|e| museum_address.map_or(true, |m| e.museum_address == m))
            .cloned()
            .collect();
        rows.sort_by_key(|e| (e.start_date, e.id));
        Ok(rows)
    }

    async fn event(&self, id: i64) -> StoreResult<Option<EventDetail>> {
        let tables = self.read();
        Ok(tables.events.get(&id).map(|event| EventDetail {
            event: event.clone(),
            exhibits: tables
                .event_exhibits
                .iter()
                .filter(|(event_id, _)| *event_id == id)
                .filter_map(|(_, exhibit_id)| tables.exhibits.get(exhibit_id).cloned())
                .collect(),
        }))
    }

    async fn create_event(&self, event: NewEvent) -> StoreResult<Event> {
        self.transaction(|tables| {
            if !tables.museums.contains_key(&event.museum_address) {
                return Err(fk("events_museum_address_fkey"));
            }
            let row = Event {
                id: tables.next_id(),
                name: event.name,
                start_date: event.start_date,
                end_date: event.end_date,
                museum_address: event.museum_address,
            };
            Tables::check_event_dates(&row)?;
            tables.events.insert(row.id, row.clone());
            Ok(row)
        })
    }

    async fn update_event(&self, id: i64, update: EventUpdate, stamp: &EditStamp) -> StoreResult<Option<Event>> {
        self.transaction(|tables| {
            let Some(event) = tables.events.get_mut(&id) else {
                return Ok(None);
            };
            update.apply(event);
            let row = event.clone();
            Tables::check_event_dates(&row)?;
            tables.log_edit(stamp, EditTarget::Event, id, EditAction::Update);
            Ok(Some(row))
        })
    }

    async fn delete_event(&self, id: i64, stamp: &EditStamp) -> StoreResult<bool> {
        self.transaction(|tables| {
            if tables.events.remove(&id).is_none() {
                return Ok(false);
            }
            tables.event_exhibits.retain(|(event, _)| *event != id);
            tables.event_reviews.retain(|(_, event), _| *event != id);
            tables.log_edit(stamp, EditTarget::Event, id, EditAction::Delete);
            Ok(true)
        })
    }

    async fn attach_exhibit(&self, event_id: i64, exhibit_id: i64) -> StoreResult<()> {
        self.transaction(|tables| {
            if !tables.events.contains_key(&event_id) {
                return Err(fk("event_exhibits_event_id_fkey"));
            }
            if !tables.exhibits.contains_key(&exhibit_id) {
                return Err(fk("event_exhibits_exhibit_id_fkey"));
            }
            tables.event_exhibits.insert((event_id, exhibit_id));
            Ok(())
        })
    }

    async fn detach_exhibit(&self, event_id: i64, exhibit_id: i64) -> StoreResult<bool> {
        Ok(self.read().event_exhibits.remove(&(event_id, exhibit_id)))
    }

    async fn artists(&self) -> StoreResult<Vec<Artist>> {
        let mut rows: Vec<Artist> = self.read().artists.values().cloned().collect();
        rows.sort_by(|a, b| (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id)));
        Ok(rows)
    }

    async fn create_artist(&self, artist: NewArtist) -> StoreResult<Artist> {
        self.transaction(|tables| {
            let row = Artist {
                id: tables.next_id(),
                first_name: artist.first_name,
                middle_name: artist.middle_name,
                last_name: artist.last_name,
                date_of_birth: artist.date_of_birth,
                date_of_death: artist.date_of_death,
            };
            tables.artists.insert(row.id, row.clone());
            Ok(row)
        })
    }

    async fn update_artist(&self, id: i64, update: ArtistUpdate) -> StoreResult<Option<Artist>> {
        let mut tables = self.read();
        Ok(tables.artists.get_mut(&id).map(|artist| {
            update.apply(artist);
            artist.clone()
        }))
    }

    async fn delete_artist(&self, id: i64) -> StoreResult<bool> {
        self.transaction(|tables| {
            if tables.artists.remove(&id).is_none() {
                return Ok(false);
            }
            tables.artist_works.retain(|(artist, _)| *artist != id);
            Ok(true)
        })
    }

    async fn link_work(&self, artist_id: i64, artifact_id: i64) -> StoreResult<()> {
        self.transaction(|tables| {
            if !tables.artists.contains_key(&artist_id) {
                return Err(fk("artist_works_artist_id_fkey"));
            }
            if !tables.artifacts.contains_key(&artifact_id) {
                return Err(fk("artist_works_artifact_id_fkey"));
            }
            tables.artist_works.insert((artist_id, artifact_id));
            Ok(())
        })
    }

    async fn unlink_work(&self, artist_id: i64, artifact_id: i64) -> StoreResult<bool> {
        Ok(self.read().artist_works.remove(&(artist_id, artifact_id)))
    }

    async fn artist_works(&self, artist_id: i64) -> StoreResult<Vec<Artifact>> {
        let tables = self.read();
        Ok(tables
            .artist_works
            .iter()
            .filter(|(artist, _)| *artist == artist_id)
            .filter_map(|(_, artifact)| tables.artifacts.get(artifact).cloned())
            .collect())
    }

    async fn artifact_reviews(&self, artifact_id: i64) -> StoreResult<Vec<ArtifactReview>> {
        let tables = self.read();
        let mut rows: Vec<ArtifactReview> = tables
            .artifact_reviews
            .iter()
            .filter(|((_, artifact), _)| *artifact == artifact_id)
            .map(|(key, row)| tables.artifact_review(key, row))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn event_reviews(&self, event_id: i64) -> StoreResult<Vec<EventReview>> {
        let tables = self.read();
        let mut rows: Vec<EventReview> = tables
            .event_reviews
            .iter()
            .filter(|((_, event), _)| *event == event_id)
            .map(|(key, row)| tables.event_review(key, row))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn visitor_reviews(&self, visitor_email: &str) -> StoreResult<VisitorReviews> {
        let tables = self.read();
        Ok(VisitorReviews {
            artifacts: tables
                .artifact_reviews
                .iter()
                .filter(|((visitor, _), _)| visitor == visitor_email)
                .map(|(key, row)| tables.artifact_review(key, row))
                .collect(),
            events: tables
                .event_reviews
                .iter()
                .filter(|((visitor, _), _)| visitor == visitor_email)
                .map(|(key, row)| tables.event_review(key, row))
                .collect(),
        })
    }

    async fn put_artifact_review(&self, visitor_email: &str, artifact_id: i64, body: &str) -> StoreResult<()> {
        self.transaction(|tables| {
            if !tables.visitors.contains(visitor_email) {
                return Err(fk("artifact_reviews_visitor_email_fkey"));
            }
            if !tables.artifacts.contains_key(&artifact_id) {
                return Err(fk("artifact_reviews_artifact_id_fkey"));
            }
            tables.artifact_reviews.insert(
                (visitor_email.to_string(), artifact_id),
                ReviewRow {
                    body: body.to_string(),
                    created_at: Utc::now(),
                },
            );
            Ok(())
        })
    }

    async fn put_event_review(&self, visitor_email: &str, event_id: i64, body: &str) -> StoreResult<()> {
        self.transaction(|tables| {
            if !tables.visitors.contains(visitor_email) {
                return Err(fk("event_reviews_visitor_email_fkey"));
            }
            if !tables.events.contains_key(&event_id) {
                return Err(fk("event_reviews_event_id_fkey"));
            }
            tables.event_reviews.insert(
                (visitor_email.to_string(), event_id),
                ReviewRow {
                    body: body.to_string(),
                    created_at: Utc::now(),
                },
            );
            Ok(())
        })
    }

    async fn delete_artifact_review(&self, visitor_email: &str, artifact_id: i64) -> StoreResult<bool> {
        Ok(self
            .read()
            .artifact_reviews
            .remove(&(visitor_email.to_string(), artifact_id))
            .is_some())
    }

    async fn delete_event_review(&self, visitor_email: &str, event_id: i64) -> StoreResult<bool> {
        Ok(self
            .read()
            .event_reviews
            .remove(&(visitor_email.to_string(), event_id))
            .is_some())
    }

    async fn edit_logs(&self, supervisor_email: &str) -> StoreResult<Vec<EditLog>> {
        let mut rows: Vec<EditLog> = self
            .read()
            .edit_logs
            .iter()
            .filter(|log| log.supervisor_email == supervisor_email)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.edited_at, b.id).cmp(&(a.edited_at, a.id)));
        Ok(rows)
    }
}
