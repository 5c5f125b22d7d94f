// Registration and constraint handling against a live Postgres.
// Runs only when DATABASE_URL is set; every test uses fresh emails and
// museum addresses so the database can be reused between runs.

mod common;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use common::{employee_body, supervisor_body, visitor_body};
use museum_api::config::AppConfig;
use museum_api::database::models::NewEvent;
use museum_api::database::{CatalogStore, DatabaseError, DatabaseManager, PgStore};
use museum_api::services::{AccountError, RegistrationRequest, RegistrationService};
use museum_api::types::Role;

struct PgHarness {
    pool: PgPool,
    store: Arc<PgStore>,
    registration: RegistrationService,
}

async fn harness() -> Result<Option<PgHarness>> {
    let _ = dotenvy::dotenv();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping Postgres tests");
        return Ok(None);
    };

    let mut config = AppConfig::development().database;
    config.url = url;
    config.max_connections = 2;

    let db = DatabaseManager::connect(&config).await?;
    db.migrate().await?;

    let store = Arc::new(PgStore::new(&db));
    Ok(Some(PgHarness {
        pool: db.pool().clone(),
        registration: RegistrationService::new(store.clone(), 1),
        store,
    }))
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

fn request(body: Value) -> Result<RegistrationRequest> {
    serde_json::from_value(body).context("registration body")
}

async fn count(pool: &PgPool, sql: &str, key: &str) -> Result<i64> {
    let (n,): (i64,) = sqlx::query_as(sql).bind(key).fetch_one(pool).await?;
    Ok(n)
}

async fn accounts_with(pool: &PgPool, email: &str) -> Result<i64> {
    count(pool, "SELECT COUNT(*) FROM accounts WHERE email = $1", email).await
}

async fn museums_at(pool: &PgPool, address: &str) -> Result<i64> {
    count(pool, "SELECT COUNT(*) FROM museums WHERE address = $1", address).await
}

#[tokio::test]
async fn duplicate_email_keeps_one_account() -> Result<()> {
    let Some(pg) = harness().await? else { return Ok(()) };
    let email = format!("{}@x.com", unique("dup"));

    pg.registration
        .register(Role::Visitor, request(visitor_body(&email, "pw123"))?)
        .await?;
    let err = pg
        .registration
        .register(Role::Visitor, request(visitor_body(&email, "pw123"))?)
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::DuplicateAccount(ref e) if *e == email), "{:?}", err);
    assert_eq!(accounts_with(&pg.pool, &email).await?, 1);
    assert_eq!(count(&pg.pool, "SELECT COUNT(*) FROM visitors WHERE email = $1", &email).await?, 1);
    Ok(())
}

#[tokio::test]
async fn failed_supervisor_registration_rolls_back_the_museum() -> Result<()> {
    let Some(pg) = harness().await? else { return Ok(()) };
    let email = format!("{}@x.com", unique("taken"));
    let address = unique("addr");

    pg.registration
        .register(Role::Visitor, request(visitor_body(&email, "pw123"))?)
        .await?;

    // The museum insert succeeds inside the transaction, then the account
    // insert hits the existing email.
    let err = pg
        .registration
        .register(Role::Supervisor, request(supervisor_body(&email, &address, "Town Museum"))?)
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::DuplicateAccount(_)), "{:?}", err);
    assert_eq!(museums_at(&pg.pool, &address).await?, 0);
    assert_eq!(count(&pg.pool, "SELECT COUNT(*) FROM supervisors WHERE email = $1", &email).await?, 0);
    Ok(())
}

#[tokio::test]
async fn failed_role_insert_leaves_no_account() -> Result<()> {
    let Some(pg) = harness().await? else { return Ok(()) };
    let boss = format!("{}@x.com", unique("boss"));
    let address = unique("addr");
    pg.registration
        .register(Role::Supervisor, request(supervisor_body(&boss, &address, "Town Museum"))?)
        .await?;

    // Account row is written, then the employee row names a museum that
    // does not exist.
    let email = format!("{}@x.com", unique("emp"));
    let err = pg
        .registration
        .register(Role::Employee, request(employee_body(&email, &boss, &unique("nowhere")))?)
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::ReferentialViolation(ref what) if what == "museum"), "{:?}", err);
    assert_eq!(accounts_with(&pg.pool, &email).await?, 0);
    Ok(())
}

#[tokio::test]
async fn unknown_supervisor_is_a_referential_violation() -> Result<()> {
    let Some(pg) = harness().await? else { return Ok(()) };
    let boss = format!("{}@x.com", unique("boss"));
    let address = unique("addr");
    pg.registration
        .register(Role::Supervisor, request(supervisor_body(&boss, &address, "Town Museum"))?)
        .await?;

    let email = format!("{}@x.com", unique("emp"));
    let ghost = format!("{}@x.com", unique("ghost"));
    let err = pg
        .registration
        .register(Role::Employee, request(employee_body(&email, &ghost, &address))?)
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::ReferentialViolation(ref what) if what == "supervisor"), "{:?}", err);
    assert_eq!(accounts_with(&pg.pool, &email).await?, 0);

    pg.registration
        .register(Role::Employee, request(employee_body(&email, &boss, &address))?)
        .await?;
    assert_eq!(count(&pg.pool, "SELECT COUNT(*) FROM employees WHERE email = $1", &email).await?, 1);
    Ok(())
}

#[tokio::test]
async fn existing_museum_is_not_renamed() -> Result<()> {
    let Some(pg) = harness().await? else { return Ok(()) };
    let address = unique("addr");
    let first = format!("{}@x.com", unique("first"));
    let second = format!("{}@x.com", unique("second"));

    pg.registration
        .register(Role::Supervisor, request(supervisor_body(&first, &address, "Town Museum"))?)
        .await?;
    pg.registration
        .register(Role::Supervisor, request(supervisor_body(&second, &address, "Renamed Museum"))?)
        .await?;

    assert_eq!(museums_at(&pg.pool, &address).await?, 1);
    let museum = pg.store.museum(&address).await?.context("museum")?;
    assert_eq!(museum.name, "Town Museum");
    Ok(())
}

#[tokio::test]
async fn constraint_errors_are_classified() -> Result<()> {
    let Some(pg) = harness().await? else { return Ok(()) };
    let boss = format!("{}@x.com", unique("boss"));
    let visitor = format!("{}@x.com", unique("visitor"));
    let address = unique("addr");
    pg.registration
        .register(Role::Supervisor, request(supervisor_body(&boss, &address, "Town Museum"))?)
        .await?;
    pg.registration
        .register(Role::Visitor, request(visitor_body(&visitor, "pw123"))?)
        .await?;

    let err = pg.store.add_visit(&visitor, &unique("nowhere")).await.unwrap_err();
    assert!(matches!(err, DatabaseError::ForeignKeyViolation(_)), "{:?}", err);

    pg.store.add_visit(&visitor, &address).await?;
    pg.store.add_visit(&visitor, &address).await?;
    assert_eq!(pg.store.visited_museums(&visitor).await?.len(), 1);

    let date = |s: &str| s.parse::<NaiveDate>().context("date");
    let err = pg
        .store
        .create_event(NewEvent {
            name: "Backwards".to_string(),
            start_date: date("2025-05-03")?,
            end_date: date("2025-05-01")?,
            museum_address: address.clone(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::CheckViolation(_)), "{:?}", err);
    Ok(())
}
