use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use chrono::DateTime;
use chrono::Utc;
use sha2::Digest;
use sha2::Sha256;

use crate::account::errors::AccountError;
use crate::account::errors::StoreError;
use crate::account::events::Notification;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::LoginCommand;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::Role;
use crate::account::models::Secret;
use crate::account::models::Session;
use crate::account::ports::AccountStore;
use crate::account::ports::CredentialServicePort;
use crate::account::ports::Notifier;

/// Session token claim holding the account's first name.
pub const FIRST_NAME_CLAIM: &str = "first_name";
/// Session token claim holding the account's last name.
pub const LAST_NAME_CLAIM: &str = "last_name";

/// Process-wide settings for the credential service, fixed at startup.
pub struct CredentialSettings {
    /// Key a registration must present to be granted the admin role.
    /// `None` disables admin registration.
    pub admin_key: Option<Secret>,
    pub token_expiration_hours: i64,
}

/// Domain service implementation for registration and login.
///
/// Concrete implementation of CredentialServicePort with dependency injection.
pub struct CredentialService<S, N>
where
    S: AccountStore + ?Sized,
    N: Notifier + ?Sized,
{
    store: Arc<S>,
    notifier: Arc<N>,
    authenticator: Arc<Authenticator>,
    settings: CredentialSettings,
}

impl<S, N> CredentialService<S, N>
where
    S: AccountStore + ?Sized,
    N: Notifier + ?Sized,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Account persistence implementation
    /// * `notifier` - Notification sink
    /// * `authenticator` - Password hashing and token signing
    /// * `settings` - Admin key and token lifetime
    pub fn new(
        store: Arc<S>,
        notifier: Arc<N>,
        authenticator: Arc<Authenticator>,
        settings: CredentialSettings,
    ) -> Self {
        Self {
            store,
            notifier,
            authenticator,
            settings,
        }
    }

    /// Admin only when asked for AND the configured key is presented.
    fn resolve_role(&self, requested: Role, presented_key: Option<&str>) -> Role {
        if requested != Role::Admin {
            return Role::Standard;
        }

        match (self.settings.admin_key.as_deref(), presented_key) {
            (Some(expected), Some(presented)) if keys_match(expected, presented) => Role::Admin,
            _ => {
                tracing::warn!("Admin role requested without a valid admin key, downgrading");
                Role::Standard
            }
        }
    }

    async fn hash_password(&self, password: Secret) -> Result<String, AccountError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing task failed");
                AccountError::HashingFailed
            })?
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                AccountError::HashingFailed
            })
    }

    async fn verify_password(
        &self,
        account: &Account,
        password: Secret,
    ) -> Result<(), AccountError> {
        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = account.password_hash.clone();

        let outcome = tokio::task::spawn_blocking(move || {
            authenticator.verify_password(&password, &stored_hash)
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password verification task failed");
            AccountError::Unknown("password verification interrupted".to_string())
        })?;

        match outcome {
            Ok(()) => Ok(()),
            Err(AuthenticationError::InvalidCredentials) => Err(AccountError::InvalidPassword),
            Err(e) => {
                tracing::error!(
                    account_id = %account.id,
                    error = %e,
                    "Stored password hash could not be verified"
                );
                Err(AccountError::Unknown("stored credential unreadable".to_string()))
            }
        }
    }

    fn issue_token(&self, account: &Account) -> Result<(String, DateTime<Utc>), AccountError> {
        let claims = Claims::for_subject(account.id, self.settings.token_expiration_hours)
            .with_extra(FIRST_NAME_CLAIM, &account.first_name)
            .with_extra(LAST_NAME_CLAIM, &account.last_name);

        let issued_at = claims
            .iat
            .and_then(|iat| DateTime::from_timestamp(iat, 0))
            .unwrap_or_else(Utc::now);

        let token = self.authenticator.generate_token(&claims).map_err(|e| {
            tracing::error!(account_id = %account.id, error = %e, "Session token signing failed");
            AccountError::SigningFailed
        })?;

        Ok((token, issued_at))
    }

    /// Hand a notification to the notifier without waiting for it.
    fn dispatch(&self, notification: Notification) {
        let notifier = Arc::clone(&self.notifier);

        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&notification).await {
                tracing::warn!(
                    kind = notification.kind.as_str(),
                    account_id = %notification.account_id,
                    error = %e,
                    "Notification dropped"
                );
            }
        });
    }
}

#[async_trait]
impl<S, N> CredentialServicePort for CredentialService<S, N>
where
    S: AccountStore + ?Sized,
    N: Notifier + ?Sized,
{
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError> {
        if self
            .store
            .find_by_email(&command.email)
            .await
            .map_err(|e| storage_failure("find_by_email", e))?
            .is_some()
        {
            return Err(AccountError::DuplicateEmail(command.email.to_string()));
        }

        if self
            .store
            .find_by_card_id(&command.card_id)
            .await
            .map_err(|e| storage_failure("find_by_card_id", e))?
            .is_some()
        {
            return Err(AccountError::DuplicateCardId(command.card_id.to_string()));
        }

        let role = self.resolve_role(
            command.requested_role,
            command.admin_key.as_deref().map(String::as_str),
        );
        let password_hash = self.hash_password(command.password).await?;

        let account = Account {
            id: AccountId::new(),
            card_id: command.card_id,
            email: command.email,
            password_hash,
            first_name: command.first_name,
            last_name: command.last_name,
            city: command.city,
            street: command.street,
            role,
            created_at: Utc::now(),
        };

        // The store's unique constraints decide concurrent duplicates.
        let created = self
            .store
            .create(account)
            .await
            .map_err(|e| storage_failure("create", e))?;

        tracing::info!(account_id = %created.id, role = %created.role, "Account registered");

        self.dispatch(Notification::registration(&created));

        Ok(created)
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, AccountError> {
        let account = self
            .store
            .find_by_email(&command.email)
            .await
            .map_err(|e| storage_failure("find_by_email", e))?
            .ok_or_else(|| AccountError::AccountNotFound(command.email.to_string()))?;

        self.verify_password(&account, command.password).await?;

        let (token, issued_at) = self.issue_token(&account)?;

        tracing::info!(account_id = %account.id, "Session token issued");

        self.dispatch(Notification::login(&account, issued_at));

        Ok(Session {
            token,
            account,
            issued_at,
        })
    }
}

fn storage_failure(operation: &'static str, err: StoreError) -> AccountError {
    match &err {
        StoreError::UniquenessViolation { field } => {
            tracing::warn!(operation, field = %field, "Concurrent registration lost the uniqueness race");
        }
        _ => tracing::error!(operation, error = %err, "Account store failure"),
    }
    AccountError::PersistenceFailed
}

/// Compare fixed-length digests so timing does not depend on the key contents.
/// Compare keys through fixed-length digests, touching every byte.
fn keys_match(expected: &str, presented: &str) -> bool {
    let expected = Sha256::digest(expected.as_bytes());
    let presented = Sha256::digest(presented.as_bytes());

    expected
        .iter()
        .zip(presented.iter())
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}
