use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::StoreError;
use crate::account::errors::UniqueField;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::CardId;
use crate::account::models::EmailAddress;
use crate::account::ports::AccountStore;

/// Process-local account store.
///
/// Both unique indexes are checked and updated under a single write lock, so
/// concurrent creates with the same email or card ID commit exactly once.
#[derive(Default)]
pub struct InMemoryAccountStore {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    accounts: HashMap<AccountId, Account>,
    by_email: HashMap<String, AccountId>,
    by_card_id: HashMap<String, AccountId>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.state.read().await.accounts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        let mut state = self.state.write().await;

        if state.by_email.contains_key(account.email.as_str()) {
            return Err(StoreError::UniquenessViolation {
                field: UniqueField::Email,
            });
        }
        if state.by_card_id.contains_key(account.card_id.as_str()) {
            return Err(StoreError::UniquenessViolation {
                field: UniqueField::CardId,
            });
        }

        state
            .by_email
            .insert(account.email.as_str().to_string(), account.id);
        state
            .by_card_id
            .insert(account.card_id.as_str().to_string(), account.id);
        state.accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, StoreError> {
        let state = self.state.read().await;

        Ok(state
            .by_email
            .get(email.as_str())
            .and_then(|id| state.accounts.get(id))
            .cloned())
    }

    async fn find_by_card_id(&self, card_id: &CardId) -> Result<Option<Account>, StoreError> {
        let state = self.state.read().await;

        Ok(state
            .by_card_id
            .get(card_id.as_str())
            .and_then(|id| state.accounts.get(id))
            .cloned())
    }
}
