use std::fmt;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::StoreError;
use crate::account::errors::UniqueField;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::CardId;
use crate::account::models::EmailAddress;
use crate::account::models::Role;
use crate::account::ports::AccountStore;

const EMAIL_CONSTRAINT: &str = "accounts_email_key";
const CARD_ID_CONSTRAINT: &str = "accounts_card_id_key";

const SELECT_COLUMNS: &str = r#"
    SELECT id, card_id, email, password_hash, first_name, last_name, city, street, role, created_at
    FROM accounts
"#;

/// Account store backed by PostgreSQL.
///
/// Uniqueness is enforced by the `accounts_email_key` and
/// `accounts_card_id_key` constraints created in the migrations.
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<Account>, StoreError> {
        let query = format!("{} WHERE {} = $1", SELECT_COLUMNS, column);

        sqlx::query_as::<_, AccountRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?
            .map(Account::try_from)
            .transpose()
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    card_id: String,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    city: String,
    street: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let card_id = CardId::new(row.card_id).map_err(|e| corrupted(row.id, e))?;
        let email = EmailAddress::new(row.email).map_err(|e| corrupted(row.id, e))?;
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| corrupted(row.id, e))?;

        Ok(Account {
            id: AccountId(row.id),
            card_id,
            email,
            password_hash: row.password_hash,
            first_name: row.first_name,
            last_name: row.last_name,
            city: row.city,
            street: row.street,
            role,
            created_at: row.created_at,
        })
    }
}

fn corrupted(id: Uuid, err: impl fmt::Display) -> StoreError {
    StoreError::Corrupted(format!("account {}: {}", id, err))
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO accounts
                (id, card_id, email, password_hash, first_name, last_name, city, street, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(account.id.0)
        .bind(account.card_id.as_str())
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.city)
        .bind(&account.street)
        .bind(account.role.as_str())
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    match db_err.constraint() {
                        Some(EMAIL_CONSTRAINT) => {
                            return StoreError::UniquenessViolation {
                                field: UniqueField::Email,
                            }
                        }
                        Some(CARD_ID_CONSTRAINT) => {
                            return StoreError::UniquenessViolation {
                                field: UniqueField::CardId,
                            }
                        }
                        _ => {}
                    }
                }
            }
            StoreError::Unavailable(e.to_string())
        })?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, StoreError> {
        self.find_one("email", email.as_str()).await
    }

    async fn find_by_card_id(&self, card_id: &CardId) -> Result<Option<Account>, StoreError> {
        self.find_one("card_id", card_id.as_str()).await
    }
}
