use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use super::{normalize_email, AccountError};
use crate::auth::{check_password, PasswordError, TokenIssuer, TokenKind, TokenPair};
use crate::database::AccountStore;
use crate::types::{Portal, Role};

/// Identity confirmed by a password check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedAccount {
    pub email: String,
    pub role: Role,
}

/// What a successful login or refresh returns to the client
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub email: String,
    pub username: String,
    pub role: Role,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

pub struct CredentialService {
    store: Arc<dyn AccountStore>,
    issuer: Arc<TokenIssuer>,
}

impl CredentialService {
    pub fn new(store: Arc<dyn AccountStore>, issuer: Arc<TokenIssuer>) -> Self {
        Self { store, issuer }
    }

    /// Check the password, then resolve the first role the portal accepts.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`;
    /// a correct password without an acceptable role row yields `RoleMismatch`.
    pub async fn verify(&self, email: &str, password: &str, portal: Portal) -> Result<VerifiedAccount, AccountError> {
        let email = normalize_email(email);
        let email = email.as_str();
        let stored_hash = self.store.password_hash(email).await?;
        let known = stored_hash.is_some();

        match check_password(password.to_string(), stored_hash).await {
            Ok(true) => {}
            Ok(false) if !known => {
                warn!("Login failed for '{}': no such account", email);
                return Err(AccountError::InvalidCredentials);
            }
            Ok(false) => {
                warn!("Login failed for '{}': password mismatch", email);
                return Err(AccountError::InvalidCredentials);
            }
            Err(PasswordError::MalformedHash(detail)) => {
                error!("Stored hash for '{}' is unreadable: {}", email, detail);
                return Err(AccountError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        }

        let roles = self.store.roles(email).await?;
        match portal.resolve(&roles) {
            Some(role) => Ok(VerifiedAccount {
                email: email.to_string(),
                role,
            }),
            None => {
                warn!("Login refused for '{}' on the {} portal: no matching role", email, portal);
                Err(AccountError::RoleMismatch(portal))
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str, portal: Portal) -> Result<Session, AccountError> {
        let verified = self.verify(email, password, portal).await?;
        let session = self.open_session(&verified.email, verified.role).await?;
        info!("{} '{}' logged in", verified.role, verified.email);
        Ok(session)
    }

    /// Trade a refresh token for a new pair. The role is checked against
    /// storage again, so deleted or demoted accounts cannot refresh.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session, AccountError> {
        let claims = self.issuer.validate(refresh_token, TokenKind::Refresh)?;

        let roles = self.store.roles(&claims.sub).await?;
        if !roles.contains(claims.role) {
            warn!("Refresh refused for '{}': no longer holds role {}", claims.sub, claims.role);
            return Err(AccountError::InvalidToken("account no longer holds this role".to_string()));
        }

        self.open_session(&claims.sub, claims.role).await
    }

    async fn open_session(&self, email: &str, role: Role) -> Result<Session, AccountError> {
        let account = self
            .store
            .account(email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        Ok(Session {
            email: account.email,
            username: account.username,
            role,
            tokens: self.issuer.issue(email, role)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hash_password;
    use crate::config::AppConfig;
    use crate::database::models::{Museum, NewAccount, RoleAssignment};
    use crate::database::MemoryStore;
    use std::time::Instant;

    fn new_account(email: &str, password: &str) -> NewAccount {
        NewAccount {
            email: email.to_string(),
            first_name: "Grace".to_string(),
            middle_name: String::new(),
            last_name: "Hopper".to_string(),
            username: "grace".to_string(),
            password_hash: hash_password(password).unwrap(),
            year_of_birth: 1985,
        }
    }

    async fn service_with(accounts: Vec<(NewAccount, RoleAssignment)>) -> CredentialService {
        let store = Arc::new(MemoryStore::new());
        for (account, role) in accounts {
            store.register(account, role).await.unwrap();
        }
        let issuer = Arc::new(TokenIssuer::from_config(&AppConfig::development().security).unwrap());
        CredentialService::new(store, issuer)
    }

    fn supervisor() -> RoleAssignment {
        RoleAssignment::Supervisor {
            museum: Museum {
                address: "1 Main St".to_string(),
                name: "Town Museum".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_look_the_same() {
        let service = service_with(vec![(new_account("a@x.com", "pw123"), RoleAssignment::Visitor)]).await;

        let unknown = service.verify("nobody@x.com", "pw123", Portal::Visitor).await.unwrap_err();
        let wrong = service.verify("a@x.com", "wrong", Portal::Visitor).await.unwrap_err();
        assert!(matches!(unknown, AccountError::InvalidCredentials));
        assert!(matches!(wrong, AccountError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn unknown_email_costs_a_password_check() {
        let service = service_with(vec![(new_account("a@x.com", "pw123"), RoleAssignment::Visitor)]).await;
        // Warm the decoy so its one-time hashing is not measured
        let _ = service.verify("warmup@x.com", "pw123", Portal::Visitor).await;

        let started = Instant::now();
        let _ = service.verify("a@x.com", "wrong", Portal::Visitor).await;
        let wrong_password = started.elapsed();

        let started = Instant::now();
        let _ = service.verify("nobody@x.com", "wrong", Portal::Visitor).await;
        let unknown_email = started.elapsed();

        // Both run one Argon2 verification; without the decoy the unknown
        // email path is several hundred times faster.
        assert!(
            unknown_email * 10 >= wrong_password,
            "unknown email took {:?}, wrong password took {:?}",
            unknown_email,
            wrong_password
        );
    }

    #[tokio::test]
    async fn staff_on_visitor_portal_is_a_role_mismatch() {
        let service = service_with(vec![(new_account("s@x.com", "pw123"), supervisor())]).await;

        let err = service.verify("s@x.com", "pw123", Portal::Visitor).await.unwrap_err();
        assert!(matches!(err, AccountError::RoleMismatch(Portal::Visitor)));

        let ok = service.verify("s@x.com", "pw123", Portal::Staff).await.unwrap();
        assert_eq!(ok.role, Role::Supervisor);

        let shouted = service.verify(" S@X.COM", "pw123", Portal::Staff).await.unwrap();
        assert_eq!(shouted.email, "s@x.com");
    }

    #[tokio::test]
    async fn refresh_reissues_for_live_accounts_only() {
        let store = Arc::new(MemoryStore::new());
        store
            .register(new_account("a@x.com", "pw123"), RoleAssignment::Visitor)
            .await
            .unwrap();
        let issuer = Arc::new(TokenIssuer::from_config(&AppConfig::development().security).unwrap());
        let service = CredentialService::new(store.clone(), issuer);

        let session = service.login("a@x.com", "pw123", Portal::Visitor).await.unwrap();
        assert_eq!(session.username, "grace");

        let refreshed = service.refresh(&session.tokens.refresh_token).await.unwrap();
        assert_eq!(refreshed.role, Role::Visitor);

        // Access tokens cannot be used to refresh
        assert!(matches!(
            service.refresh(&session.tokens.access_token).await,
            Err(AccountError::InvalidToken(_))
        ));

        store.delete_account("a@x.com").await.unwrap();
        assert!(matches!(
            service.refresh(&session.tokens.refresh_token).await,
            Err(AccountError::InvalidToken(_))
        ));
    }
}
