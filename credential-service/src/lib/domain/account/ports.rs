use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::errors::NotifierError;
use crate::account::errors::StoreError;
use crate::account::events::Notification;
use crate::account::models::Account;
use crate::account::models::CardId;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::Session;

/// Port for the credential domain service.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated registration fields and plaintext password
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `DuplicateCardId` - Card ID is already registered
    /// * `HashingFailed` - Password could not be hashed
    /// * `PersistenceFailed` - Store rejected or failed the write
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError>;

    /// Authenticate and issue a session token.
    ///
    /// # Arguments
    /// * `command` - Validated email and plaintext password
    ///
    /// # Returns
    /// Signed token and the authenticated account
    ///
    /// # Errors
    /// * `AccountNotFound` - No account with this email
    /// * `InvalidPassword` - Password does not match
    /// * `SigningFailed` - Token could not be signed
    /// * `PersistenceFailed` - Store lookup failed
    async fn login(&self, command: LoginCommand) -> Result<Session, AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// Implementations must enforce email and card ID uniqueness atomically with
/// the insert. Callers' pre-checks are not a substitute.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `UniquenessViolation` - Email or card ID already taken
    /// * `Unavailable` - Storage operation failed
    async fn create(&self, account: Account) -> Result<Account, StoreError>;

    /// Retrieve an account by email address.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, StoreError>;

    /// Retrieve an account by card ID.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    async fn find_by_card_id(&self, card_id: &CardId) -> Result<Option<Account>, StoreError>;
}

/// Outbound notification sink.
///
/// Delivery is best-effort and at-most-once. The service never awaits it on
/// the request path.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Send a notification.
    ///
    /// # Errors
    /// * `SerializationFailed` - Notification could not be encoded
    /// * `PublishFailed` - Transport rejected the message
    async fn notify(&self, notification: &Notification) -> Result<(), NotifierError>;
}
