use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, warn};

use super::manager::DatabaseManager;
use super::models::*;
use super::store::{AccountStore, CatalogStore, StoreResult};
use crate::types::RoleSet;

const ARTIFACT_COLUMNS: &str =
    "a.id, a.name, a.description, a.year_made, a.creators, a.display_status, a.exhibit_id";

/// Postgres-backed store. Every multi-statement operation runs inside one
/// transaction that is committed or rolled back before the method returns.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(manager: &DatabaseManager) -> Self {
        Self {
            pool: manager.pool().clone(),
        }
    }

    async fn register_in(
        tx: &mut Transaction<'_, Postgres>,
        account: &NewAccount,
        role: &RoleAssignment,
    ) -> StoreResult<()> {
        if let RoleAssignment::Supervisor { museum } = role {
            let inserted = sqlx::query(
                "INSERT INTO museums (address, name) VALUES ($1, $2) ON CONFLICT (address) DO NOTHING",
            )
            .bind(&museum.address)
            .bind(&museum.name)
            .execute(&mut **tx)
            .await?
            .rows_affected();
            if inserted == 0 {
                debug!("Museum '{}' already exists, keeping its name", museum.address);
            }
        }

        sqlx::query(
            r#"
            INSERT INTO accounts
                (email, first_name, middle_name, last_name, username, password_hash, year_of_birth)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.middle_name)
        .bind(&account.last_name)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.year_of_birth)
        .execute(&mut **tx)
        .await?;

        match role {
            RoleAssignment::Visitor => {
                sqlx::query("INSERT INTO visitors (email) VALUES ($1)")
                    .bind(&account.email)
                    .execute(&mut **tx)
                    .await?;
            }
            RoleAssignment::Supervisor { museum } => {
                sqlx::query("INSERT INTO supervisors (email, museum_address) VALUES ($1, $2)")
                    .bind(&account.email)
                    .bind(&museum.address)
                    .execute(&mut **tx)
                    .await?;
            }
            RoleAssignment::Employee {
                supervisor_email,
                museum_address,
            } => {
                sqlx::query(
                    "INSERT INTO employees (email, supervisor_email, museum_address) VALUES ($1, $2, $3)",
                )
                .bind(&account.email)
                .bind(supervisor_email)
                .bind(museum_address)
                .execute(&mut **tx)
                .await?;
            }
        }

        Ok(())
    }

    async fn log_edit(
        tx: &mut Transaction<'_, Postgres>,
        stamp: &EditStamp,
        target: EditTarget,
        target_id: i64,
        action: EditAction,
    ) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO edit_logs (editor_email, supervisor_email, target_kind, target_id, action)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&stamp.editor_email)
        .bind(&stamp.supervisor_email)
        .bind(target.as_str())
        .bind(target_id)
        .bind(action.as_str())
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn password_hash(&self, email: &str) -> StoreResult<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT password_hash FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(hash,)| hash))
    }

    async fn roles(&self, email: &str) -> StoreResult<RoleSet> {
        let (visitor, supervisor, employee): (bool, bool, bool) = sqlx::query_as(
            r#"
            SELECT
                EXISTS (SELECT 1 FROM visitors WHERE email = $1),
                EXISTS (SELECT 1 FROM supervisors WHERE email = $1),
                EXISTS (SELECT 1 FROM employees WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(RoleSet {
            visitor,
            supervisor,
            employee,
        })
    }

    async fn register(&self, account: NewAccount, role: RoleAssignment) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        match Self::register_in(&mut tx, &account, &role).await {
            Ok(()) => {
                tx.commit().await?;
                Ok(())
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback after failed registration of '{}' failed: {}", account.email, rollback_err);
                }
                Err(err)
            }
        }
    }

    async fn account(&self, email: &str) -> StoreResult<Option<Account>> {
        let row = sqlx::query_as::<_, Account>(
            r#"
            SELECT email, first_name, middle_name, last_name, username,
                   password_hash, year_of_birth, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_account(&self, email: &str, update: AccountUpdate) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET username = COALESCE($2, username),
                password_hash = COALESCE($3, password_hash)
            WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(update.username)
        .bind(update.password_hash)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_account(&self, email: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn supervisor_info(&self, email: &str) -> StoreResult<Option<SupervisorInfo>> {
        let row = sqlx::query_as::<_, SupervisorInfo>(
            r#"
            SELECT u.email, u.username, s.museum_address, m.name AS museum_name
            FROM accounts u
            JOIN supervisors s ON s.email = u.email
            LEFT JOIN museums m ON m.address = s.museum_address
            WHERE u.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn employee_info(&self, email: &str) -> StoreResult<Option<EmployeeInfo>> {
        let row = sqlx::query_as::<_, EmployeeInfo>(
            r#"
            SELECT u.email, u.username, e.supervisor_email, e.museum_address, m.name AS museum_name
            FROM accounts u
            JOIN employees e ON e.email = u.email
            JOIN museums m ON m.address = e.museum_address
            WHERE u.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn employees_of(&self, supervisor_email: &str) -> StoreResult<Vec<EmployeeSummary>> {
        let rows = sqlx::query_as::<_, EmployeeSummary>(
            r#"
            SELECT u.email, u.first_name, u.middle_name, u.last_name, u.username, e.museum_address
            FROM employees e
            JOIN accounts u ON u.email = e.email
            WHERE e.supervisor_email = $1
            ORDER BY u.email
            "#,
        )
        .bind(supervisor_email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn museums(&self, name: Option<&str>) -> StoreResult<Vec<Museum>> {
        let rows = sqlx::query_as::<_, Museum>(
            "SELECT address, name FROM museums WHERE ($1::text IS NULL OR name = $1) ORDER BY name, address",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn museum(&self, address: &str) -> StoreResult<Option<Museum>> {
        let row = sqlx::query_as::<_, Museum>("SELECT address, name FROM museums WHERE address = $1")
            .bind(address)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn visited_museums(&self, visitor_email: &str) -> StoreResult<Vec<Museum>> {
        let rows = sqlx::query_as::<_, Museum>(
            r#"
            SELECT m.address, m.name
            FROM visits v
            JOIN museums m ON m.address = v.museum_address
            WHERE v.visitor_email = $1
            ORDER BY m.name
            "#,
        )
        .bind(visitor_email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn add_visit(&self, visitor_email: &str, museum_address: &str) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO visits (visitor_email, museum_address) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(visitor_email)
        .bind(museum_address)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_visit(&self, visitor_email: &str, museum_address: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM visits WHERE visitor_email = $1 AND museum_address = $2")
            .bind(visitor_email)
            .bind(museum_address)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exhibits(&self, museum_address: Option<&str>) -> StoreResult<Vec<Exhibit>> {
        let rows = sqlx::query_as::<_, Exhibit>(
            r#"
            SELECT id, name, museum_address
            FROM exhibits
            WHERE ($1::text IS NULL OR museum_address = $1)
            ORDER BY id
            "#,
        )
        .bind(museum_address)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_exhibit(&self, exhibit: NewExhibit) -> StoreResult<Exhibit> {
        let row = sqlx::query_as::<_, Exhibit>(
            "INSERT INTO exhibits (name, museum_address) VALUES ($1, $2) RETURNING id, name, museum_address",
        )
        .bind(&exhibit.name)
        .bind(&exhibit.museum_address)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_exhibit(&self, id: i64, update: ExhibitUpdate, stamp: &EditStamp) -> StoreResult<Option<Exhibit>> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Exhibit>(
            r#"
            UPDATE exhibits SET name = COALESCE($2, name)
            WHERE id = $1
            RETURNING id, name, museum_address
            "#,
        )
        .bind(id)
        .bind(update.name)
        .fetch_optional(&mut *tx)
        .await?;

        if row.is_some() {
            Self::log_edit(&mut tx, stamp, EditTarget::Exhibit, id, EditAction::Update).await?;
        }
        tx.commit().await?;
        Ok(row)
    }

    async fn delete_exhibit(&self, id: i64, stamp: &EditStamp) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        let deleted = sqlx::query("DELETE FROM exhibits WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if deleted {
            Self::log_edit(&mut tx, stamp, EditTarget::Exhibit, id, EditAction::Delete).await?;
        }
        tx.commit().await?;
        Ok(deleted)
    }

    async fn artifacts(&self, exhibit_id: Option<i64>) -> StoreResult<Vec<Artifact>> {
        let sql = format!(
            "SELECT {} FROM artifacts a WHERE ($1::bigint IS NULL OR a.exhibit_id = $1) ORDER BY a.id",
            ARTIFACT_COLUMNS
        );
        let rows = sqlx::query_as::<_, Artifact>(&sql)
            .bind(exhibit_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn artifact(&self, id: i64) -> StoreResult<Option<ArtifactDetail>> {
        let sql = format!(
            r#"
            SELECT {}, e.name AS exhibit_name, m.name AS museum_name, m.address AS museum_address
            FROM artifacts a
            JOIN exhibits e ON e.id = a.exhibit_id
            JOIN museums m ON m.address = e.museum_address
            WHERE a.id = $1
            "#,
            ARTIFACT_COLUMNS
        );
        let row = sqlx::query_as::<_, ArtifactDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_artifact(&self, artifact: NewArtifact) -> StoreResult<Artifact> {
        let row = sqlx::query_as::<_, Artifact>(
            r#"
            INSERT INTO artifacts (name, description, year_made, creators, display_status, exhibit_id)
            VALUES ($1, $2, $3, $4, COALESCE($5, 'On Display'), $6)
            RETURNING id, name, description, year_made, creators, display_status, exhibit_id
            "#,
        )
        .bind(&artifact.name)
        .bind(&artifact.description)
        .bind(artifact.year_made)
        .bind(&artifact.creators)
        .bind(&artifact.display_status)
        .bind(artifact.exhibit_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_artifact(&self, id: i64, update: ArtifactUpdate, stamp: &EditStamp) -> StoreResult<Option<Artifact>> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Artifact>(
            r#"
            UPDATE artifacts SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                year_made = COALESCE($4, year_made),
                creators = COALESCE($5, creators),
                display_status = COALESCE($6, display_status),
                exhibit_id = COALESCE($7, exhibit_id)
            WHERE id = $1
            RETURNING id, name, description, year_made, creators, display_status, exhibit_id
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.description)
        .bind(update.year_made)
        .bind(update.creators)
        .bind(update.display_status)
        .bind(update.exhibit_id)
        .fetch_optional(&mut *tx)
        .await?;

        if row.is_some() {
            Self::log_edit(&mut tx, stamp, EditTarget::Artifact, id, EditAction::Update).await?;
        }
        tx.commit().await?;
        Ok(row)
    }

    async fn delete_artifact(&self, id: i64, stamp: &EditStamp) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        let deleted = sqlx::query("DELETE FROM artifacts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if deleted {
            Self::log_edit(&mut tx, stamp, EditTarget::Artifact, id, EditAction::Delete).await?;
        }
        tx.commit().await?;
        Ok(deleted)
    }

    async fn events(&self, museum_address: Option<&str>) -> StoreResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, start_date, end_date, museum_address
            FROM events
            WHERE ($1::text IS NULL OR museum_address = $1)
            ORDER BY start_date, id
            "#,
        )
        .bind(museum_address)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn event(&self, id: i64) -> StoreResult<Option<EventDetail>> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, name, start_date, end_date, museum_address FROM events WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(event) = event else {
            return Ok(None);
        };

        let exhibits = sqlx::query_as::<_, Exhibit>(
            r#"
            SELECT x.id, x.name, x.museum_address
            FROM event_exhibits ee
            JOIN exhibits x ON x.id = ee.exhibit_id
            WHERE ee.event_id = $1
            ORDER BY x.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(EventDetail { event, exhibits }))
    }

    async fn create_event(&self, event: NewEvent) -> StoreResult<Event> {
        let row = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, start_date, end_date, museum_address)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, start_date, end_date, museum_address
            "#,
        )
        .bind(&event.name)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(&event.museum_address)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_event(&self, id: i64, update: EventUpdate, stamp: &EditStamp) -> StoreResult<Option<Event>> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events SET
                name = COALESCE($2, name),
                start_date = COALESCE($3, start_date),
                end_date = COALESCE($4, end_date)
            WHERE id = $1
            RETURNING id, name, start_date, end_date, museum_address
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.start_date)
        .bind(update.end_date)
        .fetch_optional(&mut *tx)
        .await?;

        if row.is_some() {
            Self::log_edit(&mut tx, stamp, EditTarget::Event, id, EditAction::Update).await?;
        }
        tx.commit().await?;
        Ok(row)
    }

    async fn delete_event(&self, id: i64, stamp: &EditStamp) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        let deleted = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if deleted {
            Self::log_edit(&mut tx, stamp, EditTarget::Event, id, EditAction::Delete).await?;
        }
        tx.commit().await?;
        Ok(deleted)
    }

    async fn attach_exhibit(&self, event_id: i64, exhibit_id: i64) -> StoreResult<()> {
        sqlx::query("INSERT INTO event_exhibits (event_id, exhibit_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(event_id)
            .bind(exhibit_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn detach_exhibit(&self, event_id: i64, exhibit_id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM event_exhibits WHERE event_id = $1 AND exhibit_id = $2")
            .bind(event_id)
            .bind(exhibit_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn artists(&self) -> StoreResult<Vec<Artist>> {
        let rows = sqlx::query_as::<_, Artist>(
            r#"
            SELECT id, first_name, middle_name, last_name, date_of_birth, date_of_death
            FROM artists
            ORDER BY last_name, first_name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_artist(&self, artist: NewArtist) -> StoreResult<Artist> {
        let row = sqlx::query_as::<_, Artist>(
            r#"
            INSERT INTO artists (first_name, middle_name, last_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, middle_name, last_name, date_of_birth, date_of_death
            "#,
        )
        .bind(&artist.first_name)
        .bind(&artist.middle_name)
        .bind(&artist.last_name)
        .bind(artist.date_of_birth)
        .bind(artist.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_artist(&self, id: i64, update: ArtistUpdate) -> StoreResult<Option<Artist>> {
        let row = sqlx::query_as::<_, Artist>(
            r#"
            UPDATE artists SET
                first_name = COALESCE($2, first_name),
                middle_name = COALESCE($3, middle_name),
                last_name = COALESCE($4, last_name),
                date_of_birth = COALESCE($5, date_of_birth),
                date_of_death = COALESCE($6, date_of_death)
            WHERE id = $1
            RETURNING id, first_name, middle_name, last_name, date_of_birth, date_of_death
            "#,
        )
        .bind(id)
        .bind(update.first_name)
        .bind(update.middle_name)
        .bind(update.last_name)
        .bind(update.date_of_birth)
        .bind(update.date_of_death)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_artist(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn link_work(&self, artist_id: i64, artifact_id: i64) -> StoreResult<()> {
        sqlx::query("INSERT INTO artist_works (artist_id, artifact_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(artist_id)
            .bind(artifact_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn unlink_work(&self, artist_id: i64, artifact_id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM artist_works WHERE artist_id = $1 AND artifact_id = $2")
            .bind(artist_id)
            .bind(artifact_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn artist_works(&self, artist_id: i64) -> StoreResult<Vec<Artifact>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM artist_works w
            JOIN artifacts a ON a.id = w.artifact_id
            WHERE w.artist_id = $1
            ORDER BY a.id
            "#,
            ARTIFACT_COLUMNS
        );
        let rows = sqlx::query_as::<_, Artifact>(&sql)
            .bind(artist_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn artifact_reviews(&self, artifact_id: i64) -> StoreResult<Vec<ArtifactReview>> {
        let rows = sqlx::query_as::<_, ArtifactReview>(
            r#"
            SELECT r.visitor_email, u.username, r.artifact_id, a.name AS artifact_name, r.body, r.created_at
            FROM artifact_reviews r
            JOIN accounts u ON u.email = r.visitor_email
            JOIN artifacts a ON a.id = r.artifact_id
            WHERE r.artifact_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(artifact_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn event_reviews(&self, event_id: i64) -> StoreResult<Vec<EventReview>> {
        let rows = sqlx::query_as::<_, EventReview>(
            r#"
            SELECT r.visitor_email, u.username, r.event_id, e.name AS event_name, r.body, r.created_at
            FROM event_reviews r
            JOIN accounts u ON u.email = r.visitor_email
            JOIN events e ON e.id = r.event_id
            WHERE r.event_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn visitor_reviews(&self, visitor_email: &str) -> StoreResult<VisitorReviews> {
        let artifacts = sqlx::query_as::<_, ArtifactReview>(
            r#"
            SELECT r.visitor_email, u.username, r.artifact_id, a.name AS artifact_name, r.body, r.created_at
            FROM artifact_reviews r
            JOIN accounts u ON u.email = r.visitor_email
            JOIN artifacts a ON a.id = r.artifact_id
            WHERE r.visitor_email = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(visitor_email)
        .fetch_all(&self.pool)
        .await?;

        let events = sqlx::query_as::<_, EventReview>(
            r#"
            SELECT r.visitor_email, u.username, r.event_id, e.name AS event_name, r.body, r.created_at
            FROM event_reviews r
            JOIN accounts u ON u.email = r.visitor_email
            JOIN events e ON e.id = r.event_id
            WHERE r.visitor_email = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(visitor_email)
        .fetch_all(&self.pool)
        .await?;

        Ok(VisitorReviews { artifacts, events })
    }

    async fn put_artifact_review(&self, visitor_email: &str, artifact_id: i64, body: &str) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO artifact_reviews (visitor_email, artifact_id, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (visitor_email, artifact_id)
            DO UPDATE SET body = EXCLUDED.body, created_at = now()
            "#,
        )
        .bind(visitor_email)
        .bind(artifact_id)
        .bind(body)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn put_event_review(&self, visitor_email: &str, event_id: i64, body: &str) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO event_reviews (visitor_email, event_id, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (visitor_email, event_id)
            DO UPDATE SET body = EXCLUDED.body, created_at = now()
            "#,
        )
        .bind(visitor_email)
        .bind(event_id)
        .bind(body)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_artifact_review(&self, visitor_email: &str, artifact_id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM artifact_reviews WHERE visitor_email = $1 AND artifact_id = $2")
            .bind(visitor_email)
            .bind(artifact_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_event_review(&self, visitor_email: &str, event_id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM event_reviews WHERE visitor_email = $1 AND event_id = $2")
            .bind(visitor_email)
            .bind(event_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn edit_logs(&self, supervisor_email: &str) -> StoreResult<Vec<EditLog>> {
        let rows = sqlx::query_as::<_, EditLog>(
            r#"
            SELECT id, editor_email, supervisor_email, target_kind, target_id, action, edited_at
            FROM edit_logs
            WHERE supervisor_email = $1
            ORDER BY edited_at DESC, id DESC
            "#,
        )
        .bind(supervisor_email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
