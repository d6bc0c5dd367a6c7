use super::traits::DatabaseClient;
use crate::types::{
    Advert, AppError, Budget, BudgetTotal, Campaign, CampaignFilter, Client, ConceptNote,
    DashboardStats, Result, StatusCount, Tenant, User,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use libsql::{params, Builder, Connection, Database, Row, Rows, Transaction, Value};
use std::ops::Deref;
use tokio::sync::{Mutex, MutexGuard};

const DATE_FORMAT: &str = "%Y-%m-%d";

const SCHEMA: &[(&str, &str)] = &[
    (
        "tenants",
        "CREATE TABLE IF NOT EXISTS tenants (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )",
    ),
    (
        "users",
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            tenant_id TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            name TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            FOREIGN KEY (tenant_id) REFERENCES tenants(id)
        )",
    ),
    (
        "clients",
        "CREATE TABLE IF NOT EXISTS clients (
            id TEXT PRIMARY KEY,
            tenant_id TEXT NOT NULL,
            name TEXT NOT NULL,
            contact_name TEXT,
            contact_email TEXT,
            phone TEXT,
            notes TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            FOREIGN KEY (tenant_id) REFERENCES tenants(id)
        )",
    ),
    (
        "campaigns",
        "CREATE TABLE IF NOT EXISTS campaigns (
            id TEXT PRIMARY KEY,
            tenant_id TEXT NOT NULL,
            client_id TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            status TEXT NOT NULL,
            start_date TEXT,
            end_date TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            FOREIGN KEY (client_id) REFERENCES clients(id)
        )",
    ),
    (
        "adverts",
        "CREATE TABLE IF NOT EXISTS adverts (
            id TEXT PRIMARY KEY,
            tenant_id TEXT NOT NULL,
            campaign_id TEXT NOT NULL,
            title TEXT NOT NULL,
            channel TEXT NOT NULL,
            content TEXT,
            status TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            FOREIGN KEY (campaign_id) REFERENCES campaigns(id)
        )",
    ),
    (
        "concept_notes",
        "CREATE TABLE IF NOT EXISTS concept_notes (
            id TEXT PRIMARY KEY,
            tenant_id TEXT NOT NULL,
            campaign_id TEXT NOT NULL,
            title TEXT NOT NULL,
            body TEXT NOT NULL,
            author_id TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            FOREIGN KEY (campaign_id) REFERENCES campaigns(id)
        )",
    ),
    (
        "budgets",
        "CREATE TABLE IF NOT EXISTS budgets (
            id TEXT PRIMARY KEY,
            tenant_id TEXT NOT NULL,
            campaign_id TEXT NOT NULL,
            category TEXT NOT NULL,
            amount_cents INTEGER NOT NULL,
            currency TEXT NOT NULL,
            notes TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            FOREIGN KEY (campaign_id) REFERENCES campaigns(id)
        )",
    ),
    (
        "indexes",
        "CREATE INDEX IF NOT EXISTS idx_users_tenant ON users(tenant_id);
         CREATE INDEX IF NOT EXISTS idx_clients_tenant ON clients(tenant_id);
         CREATE INDEX IF NOT EXISTS idx_campaigns_tenant ON campaigns(tenant_id, client_id);
         CREATE INDEX IF NOT EXISTS idx_adverts_campaign ON adverts(tenant_id, campaign_id);
         CREATE INDEX IF NOT EXISTS idx_concept_notes_campaign ON concept_notes(tenant_id, campaign_id);
         CREATE INDEX IF NOT EXISTS idx_budgets_campaign ON budgets(tenant_id, campaign_id);",
    ),
];

const USER_COLUMNS: &str =
    "id, tenant_id, email, name, password_hash, role, created_at, updated_at";
const CLIENT_COLUMNS: &str =
    "id, tenant_id, name, contact_name, contact_email, phone, notes, created_at, updated_at";
const CAMPAIGN_COLUMNS: &str = "id, tenant_id, client_id, name, description, status, start_date, end_date, created_at, updated_at";
const ADVERT_COLUMNS: &str =
    "id, tenant_id, campaign_id, title, channel, content, status, created_at, updated_at";
const CONCEPT_NOTE_COLUMNS: &str =
    "id, tenant_id, campaign_id, title, body, author_id, created_at, updated_at";
const BUDGET_COLUMNS: &str =
    "id, tenant_id, campaign_id, category, amount_cents, currency, notes, created_at, updated_at";

/// libsql-backed implementation of [`DatabaseClient`].
///
/// In-memory databases exist per connection, so memory mode keeps a single
/// shared connection behind a mutex and every operation holds it until it
/// finishes. File and remote databases open one connection per operation.
pub struct TursoClient {
    db: Database,
    shared: Option<Mutex<Connection>>,
}

/// A connection checked out for the duration of one operation.
pub enum ConnectionGuard<'a> {
    Shared(MutexGuard<'a, Connection>),
    Owned(Connection),
}

impl Deref for ConnectionGuard<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        match self {
            ConnectionGuard::Shared(conn) => &**conn,
            ConnectionGuard::Owned(conn) => conn,
        }
    }
}

impl TursoClient {
    /// Ephemeral in-memory database with the schema applied.
    pub async fn new_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open in-memory database: {}", e)))?;
        let shared = db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))?;
        enable_foreign_keys(&shared).await?;

        let client = Self {
            db,
            shared: Some(Mutex::new(shared)),
        };
        client.initialize_schema().await?;

        Ok(client)
    }

    /// File-backed SQLite database. `:memory:` is accepted as well.
    pub async fn new_local(path: &str) -> Result<Self> {
        if path == ":memory:" {
            return Self::new_memory().await;
        }

        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Database(format!("Failed to create database directory: {}", e))
                })?;
            }
        }

        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open {}: {}", path, e)))?;

        let client = Self { db, shared: None };
        client.initialize_schema().await?;

        Ok(client)
    }

    /// Remote Turso database.
    pub async fn new_remote(url: String, auth_token: String) -> Result<Self> {
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Turso: {}", e)))?;

        let client = Self { db, shared: None };
        client.initialize_schema().await?;

        Ok(client)
    }

    /// Checks out a connection with foreign keys enforced. In memory mode
    /// this waits for the shared connection.
    pub async fn connection(&self) -> Result<ConnectionGuard<'_>> {
        match &self.shared {
            Some(conn) => Ok(ConnectionGuard::Shared(conn.lock().await)),
            None => {
                let conn = self
                    .db
                    .connect()
                    .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))?;
                enable_foreign_keys(&conn).await?;
                Ok(ConnectionGuard::Owned(conn))
            }
        }
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection().await?;

        for (name, ddl) in SCHEMA {
            conn.execute_batch(ddl)
                .await
                .map_err(|e| AppError::Database(format!("Failed to create {}: {}", name, e)))?;
        }

        tracing::debug!("Database schema initialized");
        Ok(())
    }

    async fn query_all<T>(
        &self,
        sql: &str,
        params: Vec<Value>,
        map: fn(&Row) -> Result<T>,
    ) -> Result<Vec<T>> {
        let conn = self.connection().await?;
        let mut rows = conn
            .query(sql, params)
            .await
            .map_err(|e| AppError::Database(format!("Query failed: {}", e)))?;

        let mut items = Vec::new();
        while let Some(row) = next_row(&mut rows).await? {
            items.push(map(&row)?);
        }
        Ok(items)
    }

    async fn query_one<T>(
        &self,
        sql: &str,
        params: Vec<Value>,
        map: fn(&Row) -> Result<T>,
    ) -> Result<Option<T>> {
        let conn = self.connection().await?;
        let mut rows = conn
            .query(sql, params)
            .await
            .map_err(|e| AppError::Database(format!("Query failed: {}", e)))?;

        match next_row(&mut rows).await? {
            Some(row) => Ok(Some(map(&row)?)),
            None => Ok(None),
        }
    }

    async fn count(&self, sql: &str, params: Vec<Value>) -> Result<i64> {
        Ok(self
            .query_one(sql, params, |row| col::<i64>(row, 0))
            .await?
            .unwrap_or(0))
    }

    async fn delete_scoped(&self, table: &str, tenant_id: &str, id: &str) -> Result<bool> {
        let conn = self.connection().await?;
        let affected = conn
            .execute(
                &format!("DELETE FROM {} WHERE tenant_id = ? AND id = ?", table),
                params![tenant_id, id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete from {}: {}", table, e)))?;

        Ok(affected > 0)
    }

    async fn list_for_campaign<T>(
        &self,
        table: &str,
        columns: &str,
        tenant_id: &str,
        campaign_id: Option<&str>,
        map: fn(&Row) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut sql = format!("SELECT {} FROM {} WHERE tenant_id = ?", columns, table);
        let mut values = vec![text(tenant_id)];
        if let Some(campaign_id) = campaign_id {
            sql.push_str(" AND campaign_id = ?");
            values.push(text(campaign_id));
        }
        sql.push_str(" ORDER BY created_at ASC, rowid ASC");

        self.query_all(&sql, values, map).await
    }
}

// ============= Row Helpers =============

async fn next_row(rows: &mut Rows) -> Result<Option<Row>> {
    rows.next()
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Column types the mappers read.
trait Column: Sized {
    fn read(row: &Row, idx: i32) -> libsql::Result<Self>;
}

impl Column for i64 {
    fn read(row: &Row, idx: i32) -> libsql::Result<Self> {
        row.get::<i64>(idx)
    }
}

impl Column for String {
    fn read(row: &Row, idx: i32) -> libsql::Result<Self> {
        row.get::<String>(idx)
    }
}

impl Column for Option<String> {
    fn read(row: &Row, idx: i32) -> libsql::Result<Self> {
        row.get::<Option<String>>(idx)
    }
}

fn col<T: Column>(row: &Row, idx: i32) -> Result<T> {
    T::read(row, idx)
        .map_err(|e| AppError::Database(format!("Failed to read column {}: {}", idx, e)))
}

fn timestamp_col(row: &Row, idx: i32) -> Result<DateTime<Utc>> {
    let secs = col::<i64>(row, idx)?;
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| AppError::Database(format!("Invalid timestamp: {}", secs)))
}

fn date_col(row: &Row, idx: i32) -> Result<Option<NaiveDate>> {
    col::<Option<String>>(row, idx)?
        .map(|s| {
            NaiveDate::parse_from_str(&s, DATE_FORMAT)
                .map_err(|e| AppError::Database(format!("Invalid date '{}': {}", s, e)))
        })
        .transpose()
}

fn parsed_col<T: std::str::FromStr<Err = AppError>>(row: &Row, idx: i32) -> Result<T> {
    let raw = col::<String>(row, idx)?;
    raw.parse()
        .map_err(|_| AppError::Database(format!("Unexpected value in column {}: {}", idx, raw)))
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn date_text(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format(DATE_FORMAT).to_string())
}

async fn begin(conn: &Connection) -> Result<Transaction> {
    conn.transaction()
        .await
        .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))
}

/// Commits on success, rolls back on error.
async fn finish<T>(tx: Transaction, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|e| AppError::Database(format!("Failed to commit: {}", e)))?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::error!("Rollback failed: {}", rollback);
            }
            Err(e)
        }
    }
}

async fn insert_tenant_and_admin(tx: &Transaction, tenant: &Tenant, admin: &User) -> Result<()> {
    tx.execute(
        "INSERT INTO tenants (id, name, created_at) VALUES (?, ?, ?)",
        params![
            tenant.id.as_str(),
            tenant.name.as_str(),
            tenant.created_at.timestamp()
        ],
    )
    .await
    .map_err(|e| AppError::Database(format!("Failed to create tenant: {}", e)))?;

    tx.execute(
        &format!("INSERT INTO users ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)", USER_COLUMNS),
        params![
            admin.id.as_str(),
            admin.tenant_id.as_str(),
            admin.email.as_str(),
            admin.name.as_str(),
            admin.password_hash.as_str(),
            admin.role.as_str(),
            admin.created_at.timestamp(),
            admin.updated_at.timestamp()
        ],
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("User already exists".to_string())
        } else {
            AppError::Database(format!("Failed to create user: {}", e))
        }
    })?;

    Ok(())
}

/// Deletes a campaign and its adverts, concept notes and budgets.
async fn delete_campaign_tree(tx: &Transaction, tenant_id: &str, id: &str) -> Result<bool> {
    for table in ["adverts", "concept_notes", "budgets"] {
        tx.execute(
            &format!("DELETE FROM {} WHERE tenant_id = ? AND campaign_id = ?", table),
            params![tenant_id, id],
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to delete {}: {}", table, e)))?;
    }

    let affected = tx
        .execute(
            "DELETE FROM campaigns WHERE tenant_id = ? AND id = ?",
            params![tenant_id, id],
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to delete campaign: {}", e)))?;

    Ok(affected > 0)
}

fn is_unique_violation(e: &libsql::Error) -> bool {
    e.to_string().contains("UNIQUE constraint failed")
}

fn is_foreign_key_violation(e: &libsql::Error) -> bool {
    e.to_string().contains("FOREIGN KEY constraint failed")
}

async fn enable_foreign_keys(conn: &Connection) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", ())
        .await
        .map_err(|e| AppError::Database(format!("Failed to enable foreign keys: {}", e)))?;
    Ok(())
}

fn tenant_from_row(row: &Row) -> Result<Tenant> {
    Ok(Tenant {
        id: col(row, 0)?,
        name: col(row, 1)?,
        created_at: timestamp_col(row, 2)?,
    })
}

fn user_from_row(row: &Row) -> Result<User> {
    Ok(User {
        id: col(row, 0)?,
        tenant_id: col(row, 1)?,
        email: col(row, 2)?,
        name: col(row, 3)?,
        password_hash: col(row, 4)?,
        role: parsed_col(row, 5)?,
        created_at: timestamp_col(row, 6)?,
        updated_at: timestamp_col(row, 7)?,
    })
}

fn client_from_row(row: &Row) -> Result<Client> {
    Ok(Client {
        id: col(row, 0)?,
        tenant_id: col(row, 1)?,
        name: col(row, 2)?,
        contact_name: col(row, 3)?,
        contact_email: col(row, 4)?,
        phone: col(row, 5)?,
        notes: col(row, 6)?,
        created_at: timestamp_col(row, 7)?,
        updated_at: timestamp_col(row, 8)?,
    })
}

fn campaign_from_row(row: &Row) -> Result<Campaign> {
    Ok(Campaign {
        id: col(row, 0)?,
        tenant_id: col(row, 1)?,
        client_id: col(row, 2)?,
        name: col(row, 3)?,
        description: col(row, 4)?,
        status: parsed_col(row, 5)?,
        start_date: date_col(row, 6)?,
        end_date: date_col(row, 7)?,
        created_at: timestamp_col(row, 8)?,
        updated_at: timestamp_col(row, 9)?,
    })
}

fn advert_from_row(row: &Row) -> Result<Advert> {
    Ok(Advert {
        id: col(row, 0)?,
        tenant_id: col(row, 1)?,
        campaign_id: col(row, 2)?,
        title: col(row, 3)?,
        channel: parsed_col(row, 4)?,
        content: col(row, 5)?,
        status: parsed_col(row, 6)?,
        created_at: timestamp_col(row, 7)?,
        updated_at: timestamp_col(row, 8)?,
    })
}

fn concept_note_from_row(row: &Row) -> Result<ConceptNote> {
    Ok(ConceptNote {
        id: col(row, 0)?,
        tenant_id: col(row, 1)?,
        campaign_id: col(row, 2)?,
        title: col(row, 3)?,
        body: col(row, 4)?,
        author_id: col(row, 5)?,
        created_at: timestamp_col(row, 6)?,
        updated_at: timestamp_col(row, 7)?,
    })
}

fn budget_from_row(row: &Row) -> Result<Budget> {
    Ok(Budget {
        id: col(row, 0)?,
        tenant_id: col(row, 1)?,
        campaign_id: col(row, 2)?,
        category: col(row, 3)?,
        amount_cents: col(row, 4)?,
        currency: col(row, 5)?,
        notes: col(row, 6)?,
        created_at: timestamp_col(row, 7)?,
        updated_at: timestamp_col(row, 8)?,
    })
}

#[async_trait]
impl DatabaseClient for TursoClient {
    async fn ping(&self) -> Result<()> {
        self.count("SELECT 1", vec![]).await.map(|_| ())
    }

    // ============== Tenant & User Operations ==============

    async fn create_tenant_with_admin(&self, tenant: &Tenant, admin: &User) -> Result<()> {
        let conn = self.connection().await?;
        let tx = begin(&conn).await?;
        let result = insert_tenant_and_admin(&tx, tenant, admin).await;
        finish(tx, result).await
    }

    async fn get_tenant(&self, id: &str) -> Result<Option<Tenant>> {
        self.query_one(
            "SELECT id, name, created_at FROM tenants WHERE id = ?",
            vec![text(id)],
            tenant_from_row,
        )
        .await
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let conn = self.connection().await?;

        conn.execute(
            &format!("INSERT INTO users ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)", USER_COLUMNS),
            params![
                user.id.as_str(),
                user.tenant_id.as_str(),
                user.email.as_str(),
                user.name.as_str(),
                user.password_hash.as_str(),
                user.role.as_str(),
                user.created_at.timestamp(),
                user.updated_at.timestamp()
            ],
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("User already exists".to_string())
            } else {
                AppError::Database(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.query_one(
            &format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS),
            vec![text(email)],
            user_from_row,
        )
        .await
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        self.query_one(
            &format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS),
            vec![text(id)],
            user_from_row,
        )
        .await
    }

    async fn list_users(&self, tenant_id: &str) -> Result<Vec<User>> {
        self.query_all(
            &format!(
                "SELECT {} FROM users WHERE tenant_id = ? ORDER BY created_at ASC, rowid ASC",
                USER_COLUMNS
            ),
            vec![text(tenant_id)],
            user_from_row,
        )
        .await
    }

    // ============== Client Operations ==============

    async fn insert_client(&self, client: &Client) -> Result<()> {
        let conn = self.connection().await?;

        conn.execute(
            &format!(
                "INSERT INTO clients ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                CLIENT_COLUMNS
            ),
            params![
                client.id.as_str(),
                client.tenant_id.as_str(),
                client.name.as_str(),
                client.contact_name.as_deref(),
                client.contact_email.as_deref(),
                client.phone.as_deref(),
                client.notes.as_deref(),
                client.created_at.timestamp(),
                client.updated_at.timestamp()
            ],
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create client: {}", e)))?;

        Ok(())
    }

    async fn get_client(&self, tenant_id: &str, id: &str) -> Result<Option<Client>> {
        self.query_one(
            &format!(
                "SELECT {} FROM clients WHERE tenant_id = ? AND id = ?",
                CLIENT_COLUMNS
            ),
            vec![text(tenant_id), text(id)],
            client_from_row,
        )
        .await
    }

    async fn list_clients(&self, tenant_id: &str) -> Result<Vec<Client>> {
        self.query_all(
            &format!(
                "SELECT {} FROM clients WHERE tenant_id = ? ORDER BY created_at ASC, rowid ASC",
                CLIENT_COLUMNS
            ),
            vec![text(tenant_id)],
            client_from_row,
        )
        .await
    }

    async fn update_client(&self, client: &Client) -> Result<()> {
        let conn = self.connection().await?;

        conn.execute(
            "UPDATE clients
             SET name = ?, contact_name = ?, contact_email = ?, phone = ?, notes = ?, updated_at = ?
             WHERE tenant_id = ? AND id = ?",
            params![
                client.name.as_str(),
                client.contact_name.as_deref(),
                client.contact_email.as_deref(),
                client.phone.as_deref(),
                client.notes.as_deref(),
                client.updated_at.timestamp(),
                client.tenant_id.as_str(),
                client.id.as_str()
            ],
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to update client: {}", e)))?;

        Ok(())
    }

    async fn delete_client(&self, tenant_id: &str, id: &str) -> Result<bool> {
        let conn = self.connection().await?;
        let affected = conn
            .execute(
                "DELETE FROM clients WHERE tenant_id = ? AND id = ?",
                params![tenant_id, id],
            )
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Conflict("Client still has campaigns".to_string())
                } else {
                    AppError::Database(format!("Failed to delete client: {}", e))
                }
            })?;

        Ok(affected > 0)
    }

    // ============== Campaign Operations ==============

    async fn insert_campaign(&self, campaign: &Campaign) -> Result<()> {
        let conn = self.connection().await?;

        conn.execute(
            &format!(
                "INSERT INTO campaigns ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                CAMPAIGN_COLUMNS
            ),
            params![
                campaign.id.as_str(),
                campaign.tenant_id.as_str(),
                campaign.client_id.as_str(),
                campaign.name.as_str(),
                campaign.description.as_deref(),
                campaign.status.as_str(),
                date_text(campaign.start_date),
                date_text(campaign.end_date),
                campaign.created_at.timestamp(),
                campaign.updated_at.timestamp()
            ],
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create campaign: {}", e)))?;

        Ok(())
    }

    async fn get_campaign(&self, tenant_id: &str, id: &str) -> Result<Option<Campaign>> {
        self.query_one(
            &format!(
                "SELECT {} FROM campaigns WHERE tenant_id = ? AND id = ?",
                CAMPAIGN_COLUMNS
            ),
            vec![text(tenant_id), text(id)],
            campaign_from_row,
        )
        .await
    }

    async fn list_campaigns(
        &self,
        tenant_id: &str,
        filter: &CampaignFilter,
    ) -> Result<Vec<Campaign>> {
        let mut sql = format!("SELECT {} FROM campaigns WHERE tenant_id = ?", CAMPAIGN_COLUMNS);
        let mut values = vec![text(tenant_id)];

        if let Some(ref client_id) = filter.client_id {
            sql.push_str(" AND client_id = ?");
            values.push(text(client_id));
        }
        if let Some(status) = filter.status {
            sql.push_str(" AND status = ?");
            values.push(text(status.as_str()));
        }
        sql.push_str(" ORDER BY created_at ASC, rowid ASC");

        self.query_all(&sql, values, campaign_from_row).await
    }

    async fn update_campaign(&self, campaign: &Campaign) -> Result<()> {
        let conn = self.connection().await?;

        conn.execute(
            "UPDATE campaigns
             SET client_id = ?, name = ?, description = ?, status = ?, start_date = ?, end_date = ?, updated_at = ?
             WHERE tenant_id = ? AND id = ?",
            params![
                campaign.client_id.as_str(),
                campaign.name.as_str(),
                campaign.description.as_deref(),
                campaign.status.as_str(),
                date_text(campaign.start_date),
                date_text(campaign.end_date),
                campaign.updated_at.timestamp(),
                campaign.tenant_id.as_str(),
                campaign.id.as_str()
            ],
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to update campaign: {}", e)))?;

        Ok(())
    }

    async fn delete_campaign(&self, tenant_id: &str, id: &str) -> Result<bool> {
        let conn = self.connection().await?;
        let tx = begin(&conn).await?;
        let result = delete_campaign_tree(&tx, tenant_id, id).await;
        finish(tx, result).await
    }

    async fn count_campaigns_for_client(&self, tenant_id: &str, client_id: &str) -> Result<i64> {
        self.count(
            "SELECT COUNT(*) FROM campaigns WHERE tenant_id = ? AND client_id = ?",
            vec![text(tenant_id), text(client_id)],
        )
        .await
    }

    // ============== Advert Operations ==============

    async fn insert_advert(&self, advert: &Advert) -> Result<()> {
        let conn = self.connection().await?;

        conn.execute(
            &format!(
                "INSERT INTO adverts ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                ADVERT_COLUMNS
            ),
            params![
                advert.id.as_str(),
                advert.tenant_id.as_str(),
                advert.campaign_id.as_str(),
                advert.title.as_str(),
                advert.channel.as_str(),
                advert.content.as_deref(),
                advert.status.as_str(),
                advert.created_at.timestamp(),
                advert.updated_at.timestamp()
            ],
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create advert: {}", e)))?;

        Ok(())
    }

    async fn get_advert(&self, tenant_id: &str, id: &str) -> Result<Option<Advert>> {
        self.query_one(
            &format!(
                "SELECT {} FROM adverts WHERE tenant_id = ? AND id = ?",
                ADVERT_COLUMNS
            ),
            vec![text(tenant_id), text(id)],
            advert_from_row,
        )
        .await
    }

    async fn list_adverts(
        &self,
        tenant_id: &str,
        campaign_id: Option<&str>,
    ) -> Result<Vec<Advert>> {
        self.list_for_campaign("adverts", ADVERT_COLUMNS, tenant_id, campaign_id, advert_from_row)
            .await
    }

    async fn update_advert(&self, advert: &Advert) -> Result<()> {
        let conn = self.connection().await?;

        conn.execute(
            "UPDATE adverts
             SET title = ?, channel = ?, content = ?, status = ?, updated_at = ?
             WHERE tenant_id = ? AND id = ?",
            params![
                advert.title.as_str(),
                advert.channel.as_str(),
                advert.content.as_deref(),
                advert.status.as_str(),
                advert.updated_at.timestamp(),
                advert.tenant_id.as_str(),
                advert.id.as_str()
            ],
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to update advert: {}", e)))?;

        Ok(())
    }

    async fn delete_advert(&self, tenant_id: &str, id: &str) -> Result<bool> {
        self.delete_scoped("adverts", tenant_id, id).await
    }

    // ============== Concept Note Operations ==============

    async fn insert_concept_note(&self, note: &ConceptNote) -> Result<()> {
        let conn = self.connection().await?;

        conn.execute(
            &format!(
                "INSERT INTO concept_notes ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                CONCEPT_NOTE_COLUMNS
            ),
            params![
                note.id.as_str(),
                note.tenant_id.as_str(),
                note.campaign_id.as_str(),
                note.title.as_str(),
                note.body.as_str(),
                note.author_id.as_str(),
                note.created_at.timestamp(),
                note.updated_at.timestamp()
            ],
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create concept note: {}", e)))?;

        Ok(())
    }

    async fn get_concept_note(&self, tenant_id: &str, id: &str) -> Result<Option<ConceptNote>> {
        self.query_one(
            &format!(
                "SELECT {} FROM concept_notes WHERE tenant_id = ? AND id = ?",
                CONCEPT_NOTE_COLUMNS
            ),
            vec![text(tenant_id), text(id)],
            concept_note_from_row,
        )
        .await
    }

    async fn list_concept_notes(
        &self,
        tenant_id: &str,
        campaign_id: Option<&str>,
    ) -> Result<Vec<ConceptNote>> {
        self.list_for_campaign(
            "concept_notes",
            CONCEPT_NOTE_COLUMNS,
            tenant_id,
            campaign_id,
            concept_note_from_row,
        )
        .await
    }

    async fn update_concept_note(&self, note: &ConceptNote) -> Result<()> {
        let conn = self.connection().await?;

        conn.execute(
            "UPDATE concept_notes SET title = ?, body = ?, updated_at = ?
             WHERE tenant_id = ? AND id = ?",
            params![
                note.title.as_str(),
                note.body.as_str(),
                note.updated_at.timestamp(),
                note.tenant_id.as_str(),
                note.id.as_str()
            ],
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to update concept note: {}", e)))?;

        Ok(())
    }

    async fn delete_concept_note(&self, tenant_id: &str, id: &str) -> Result<bool> {
        self.delete_scoped("concept_notes", tenant_id, id).await
    }

    // ============== Budget Operations ==============

    async fn insert_budget(&self, budget: &Budget) -> Result<()> {
        let conn = self.connection().await?;

        conn.execute(
            &format!(
                "INSERT INTO budgets ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                BUDGET_COLUMNS
            ),
            params![
                budget.id.as_str(),
                budget.tenant_id.as_str(),
                budget.campaign_id.as_str(),
                budget.category.as_str(),
                budget.amount_cents,
                budget.currency.as_str(),
                budget.notes.as_deref(),
                budget.created_at.timestamp(),
                budget.updated_at.timestamp()
            ],
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create budget: {}", e)))?;

        Ok(())
    }

    async fn get_budget(&self, tenant_id: &str, id: &str) -> Result<Option<Budget>> {
        self.query_one(
            &format!(
                "SELECT {} FROM budgets WHERE tenant_id = ? AND id = ?",
                BUDGET_COLUMNS
            ),
            vec![text(tenant_id), text(id)],
            budget_from_row,
        )
        .await
    }

    async fn list_budgets(
        &self,
        tenant_id: &str,
        campaign_id: Option<&str>,
    ) -> Result<Vec<Budget>> {
        self.list_for_campaign("budgets", BUDGET_COLUMNS, tenant_id, campaign_id, budget_from_row)
            .await
    }

    async fn update_budget(&self, budget: &Budget) -> Result<()> {
        let conn = self.connection().await?;

        conn.execute(
            "UPDATE budgets
             SET category = ?, amount_cents = ?, currency = ?, notes = ?, updated_at = ?
             WHERE tenant_id = ? AND id = ?",
            params![
                budget.category.as_str(),
                budget.amount_cents,
                budget.currency.as_str(),
                budget.notes.as_deref(),
                budget.updated_at.timestamp(),
                budget.tenant_id.as_str(),
                budget.id.as_str()
            ],
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to update budget: {}", e)))?;

        Ok(())
    }

    async fn delete_budget(&self, tenant_id: &str, id: &str) -> Result<bool> {
        self.delete_scoped("budgets", tenant_id, id).await
    }

    async fn budget_totals(&self, tenant_id: &str, campaign_id: &str) -> Result<Vec<BudgetTotal>> {
        let amounts = self
            .query_all(
                "SELECT currency, amount_cents FROM budgets
                 WHERE tenant_id = ? AND campaign_id = ?
                 ORDER BY currency ASC",
                vec![text(tenant_id), text(campaign_id)],
                |row| Ok((col::<String>(row, 0)?, col::<i64>(row, 1)?)),
            )
            .await?;

        let mut totals: Vec<BudgetTotal> = Vec::new();
        for (currency, amount) in amounts {
            match totals.last_mut() {
                Some(total) if total.currency == currency => {
                    total.amount_cents = total.amount_cents.checked_add(amount).ok_or_else(|| {
                        AppError::InvalidInput(format!("{} budget total is out of range", currency))
                    })?;
                }
                _ => totals.push(BudgetTotal {
                    currency,
                    amount_cents: amount,
                }),
            }
        }

        Ok(totals)
    }

    // ============== Reporting ==============

    async fn dashboard_stats(&self, tenant_id: &str) -> Result<DashboardStats> {
        let scoped = |table: &str| format!("SELECT COUNT(*) FROM {} WHERE tenant_id = ?", table);

        let campaigns_by_status = self
            .query_all(
                "SELECT status, COUNT(*) FROM campaigns WHERE tenant_id = ?
                 GROUP BY status ORDER BY status ASC",
                vec![text(tenant_id)],
                |row| {
                    Ok(StatusCount {
                        status: parsed_col(row, 0)?,
                        count: col(row, 1)?,
                    })
                },
            )
            .await?;

        Ok(DashboardStats {
            clients: self.count(&scoped("clients"), vec![text(tenant_id)]).await?,
            campaigns: campaigns_by_status.iter().map(|s| s.count).sum(),
            campaigns_by_status,
            adverts: self.count(&scoped("adverts"), vec![text(tenant_id)]).await?,
            concept_notes: self
                .count(&scoped("concept_notes"), vec![text(tenant_id)])
                .await?,
            budgets: self.count(&scoped("budgets"), vec![text(tenant_id)]).await?,
        })
    }
}
