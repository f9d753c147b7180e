mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deepwork_core::models::*;
use deepwork_core::repository::{CategoryRepository, SessionRepository};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};
use uuid::Uuid;

const SESSION_COLUMNS: &str = "id, template_id, name, description, status, scheduled_start,
     actual_start, actual_end, created_at, updated_at";

const TEMPLATE_COLUMNS: &str = "id, name, description, is_public, created_at, updated_at";

const BLOCK_CATEGORIES_SQL: &str = "SELECT bc.category_id, c.name, c.color, c.created_at, c.updated_at
     FROM time_block_categories bc
     LEFT JOIN categories c ON c.id = bc.category_id
     WHERE bc.time_block_id = ?
     ORDER BY bc.position";

const TEMPLATE_BLOCK_CATEGORIES_SQL: &str = "SELECT bc.category_id, c.name, c.color, c.created_at, c.updated_at
     FROM time_block_template_categories bc
     LEFT JOIN categories c ON c.id = bc.category_id
     WHERE bc.time_block_template_id = ?
     ORDER BY bc.position";

/// SQLite storage for categories, sessions and templates.
///
/// Cloning is cheap; clones share one connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        tracing::debug!(path = %path.display(), "Opened database");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "deepwork")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("deepwork.db"))
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }

    // ============================================================
    // Category operations
    // ============================================================

    pub fn get_all_categories(&self) -> Result<Vec<Category>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, color, created_at, updated_at FROM categories ORDER BY name",
        )?;

        let categories = stmt
            .query_map([], category_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    pub fn get_category(&self, id: Uuid) -> Result<Option<Category>> {
        let conn = self.lock()?;
        let category = conn
            .query_row(
                "SELECT id, name, color, created_at, updated_at FROM categories WHERE id = ?",
                [id.to_string()],
                category_from_row,
            )
            .optional()?;
        Ok(category)
    }

    /// Inserts the category or replaces the stored name and color.
    pub fn upsert_category(&self, category: &Category) -> Result<Category> {
        if category.is_default() {
            anyhow::bail!("The default category is built in and cannot be stored");
        }

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO categories (id, name, color, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                color = excluded.color,
                updated_at = excluded.updated_at",
            (
                category.id.to_string(),
                &category.name,
                category.color,
                category.created_at.to_rfc3339(),
                category.updated_at.to_rfc3339(),
            ),
        )?;

        Ok(category.clone())
    }

    pub fn delete_category(&self, id: Uuid) -> Result<bool> {
        let conn = self.lock()?;
        let rows = conn.execute("DELETE FROM categories WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Session operations
    // ============================================================

    /// Stores the session and replaces its schedule in one transaction.
    pub fn save_session(&self, session: &ScheduledSession) -> Result<ScheduledSession> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let session_id = session.id.to_string();

        tx.execute(
            "INSERT INTO scheduled_sessions (id, template_id, name, description, status,
                scheduled_start, actual_start, actual_end, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                template_id = excluded.template_id,
                name = excluded.name,
                description = excluded.description,
                status = excluded.status,
                scheduled_start = excluded.scheduled_start,
                actual_start = excluded.actual_start,
                actual_end = excluded.actual_end,
                updated_at = excluded.updated_at",
            (
                &session_id,
                session.template_id.map(|id| id.to_string()),
                &session.name,
                &session.description,
                session.status.as_str(),
                session.scheduled_start.to_rfc3339(),
                session.actual_start.map(|t| t.to_rfc3339()),
                session.actual_end.map(|t| t.to_rfc3339()),
                session.created_at.to_rfc3339(),
                session.updated_at.to_rfc3339(),
            ),
        )?;

        tx.execute(
            "DELETE FROM time_block_categories WHERE time_block_id IN
                (SELECT id FROM scheduled_time_blocks WHERE session_id = ?)",
            [&session_id],
        )?;
        tx.execute(
            "DELETE FROM scheduled_time_blocks WHERE session_id = ?",
            [&session_id],
        )?;

        for (position, block) in session.time_blocks.iter().enumerate() {
            let block_id = block.id().to_string();
            tx.execute(
                "INSERT INTO scheduled_time_blocks (id, session_id, position, kind, duration_secs,
                    status, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                (
                    &block_id,
                    &session_id,
                    position as i64,
                    block.kind().as_str(),
                    duration_secs(block.duration())?,
                    block.status().as_str(),
                    block.created_at().to_rfc3339(),
                    block.updated_at().to_rfc3339(),
                ),
            )?;
            for (rank, category) in block.categories().iter().enumerate() {
                tx.execute(
                    "INSERT INTO time_block_categories (time_block_id, category_id, position)
                     VALUES (?, ?, ?)",
                    (&block_id, category.id.to_string(), rank as i64),
                )?;
            }
        }

        tx.commit().context("Failed to commit session")?;
        tracing::debug!(
            session_id = %session.id,
            blocks = session.time_blocks.len(),
            "Stored session"
        );
        Ok(session.clone())
    }

    pub fn get_session(&self, id: Uuid) -> Result<Option<ScheduledSession>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {SESSION_COLUMNS} FROM scheduled_sessions WHERE id = ?");
        let Some(session) = conn
            .query_row(&sql, [id.to_string()], session_from_row)
            .optional()?
        else {
            return Ok(None);
        };

        let time_blocks = load_time_blocks(&conn, session.id)?;
        Ok(Some(ScheduledSession {
            time_blocks,
            ..session
        }))
    }

    /// All sessions, earliest scheduled start first.
    pub fn get_all_sessions(&self) -> Result<Vec<ScheduledSession>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {SESSION_COLUMNS} FROM scheduled_sessions ORDER BY scheduled_start");
        let mut stmt = conn.prepare(&sql)?;
        let sessions = stmt
            .query_map([], session_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        sessions
            .into_iter()
            .map(|session| {
                let time_blocks = load_time_blocks(&conn, session.id)?;
                Ok(ScheduledSession {
                    time_blocks,
                    ..session
                })
            })
            .collect()
    }

    pub fn delete_session(&self, id: Uuid) -> Result<bool> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM time_block_categories WHERE time_block_id IN
                (SELECT id FROM scheduled_time_blocks WHERE session_id = ?)",
            [id.to_string()],
        )?;
        tx.execute(
            "DELETE FROM scheduled_time_blocks WHERE session_id = ?",
            [id.to_string()],
        )?;
        let rows = tx.execute(
            "DELETE FROM scheduled_sessions WHERE id = ?",
            [id.to_string()],
        )?;
        tx.commit()?;
        Ok(rows > 0)
    }

    // ============================================================
    // Template operations
    // ============================================================

    /// Stores the template and replaces its block definitions.
    pub fn save_template(&self, template: &SessionTemplate) -> Result<SessionTemplate> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let template_id = template.id.to_string();

        tx.execute(
            "INSERT INTO session_templates (id, name, description, is_public, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                is_public = excluded.is_public,
                updated_at = excluded.updated_at",
            (
                &template_id,
                &template.name,
                &template.description,
                template.is_public,
                template.created_at.to_rfc3339(),
                template.updated_at.to_rfc3339(),
            ),
        )?;

        tx.execute(
            "DELETE FROM time_block_template_categories WHERE time_block_template_id IN
                (SELECT id FROM time_block_templates WHERE template_id = ?)",
            [&template_id],
        )?;
        tx.execute(
            "DELETE FROM time_block_templates WHERE template_id = ?",
            [&template_id],
        )?;

        for (position, block) in template.time_blocks.iter().enumerate() {
            let block_id = block.id.to_string();
            tx.execute(
                "INSERT INTO time_block_templates (id, template_id, position, kind, duration_secs,
                    created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                (
                    &block_id,
                    &template_id,
                    position as i64,
                    block.kind.as_str(),
                    duration_secs(block.duration)?,
                    block.created_at.to_rfc3339(),
                    block.updated_at.to_rfc3339(),
                ),
            )?;
            for (rank, category) in block.categories.iter().enumerate() {
                tx.execute(
                    "INSERT INTO time_block_template_categories
                        (time_block_template_id, category_id, position)
                     VALUES (?, ?, ?)",
                    (&block_id, category.id.to_string(), rank as i64),
                )?;
            }
        }

        tx.commit().context("Failed to commit template")?;
        Ok(template.clone())
    }

    pub fn get_template(&self, id: Uuid) -> Result<Option<SessionTemplate>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {TEMPLATE_COLUMNS} FROM session_templates WHERE id = ?");
        let Some(template) = conn
            .query_row(&sql, [id.to_string()], template_from_row)
            .optional()?
        else {
            return Ok(None);
        };

        let time_blocks = load_template_blocks(&conn, template.id)?;
        Ok(Some(SessionTemplate {
            time_blocks,
            ..template
        }))
    }

    pub fn get_all_templates(&self) -> Result<Vec<SessionTemplate>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {TEMPLATE_COLUMNS} FROM session_templates ORDER BY name");
        let mut stmt = conn.prepare(&sql)?;
        let templates = stmt
            .query_map([], template_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        templates
            .into_iter()
            .map(|template| {
                let time_blocks = load_template_blocks(&conn, template.id)?;
                Ok(SessionTemplate {
                    time_blocks,
                    ..template
                })
            })
            .collect()
    }
}

#[async_trait]
impl CategoryRepository for Database {
    async fn get_all(&self) -> Result<Vec<Category>> {
        self.get_all_categories()
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        self.get_category(id)
    }

    async fn upsert(&self, category: Category) -> Result<Category> {
        self.upsert_category(&category)
    }

    async fn delete(&self, category: &Category) -> Result<()> {
        self.delete_category(category.id)?;
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for Database {
    async fn save(&self, session: &ScheduledSession) -> Result<ScheduledSession> {
        self.save_session(session)
    }
}

// ============================================================
// Row mapping
// ============================================================

fn category_from_row(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: uuid_column(row, 0)?,
        name: row.get(1)?,
        color: row.get(2)?,
        created_at: datetime_column(row, 3)?,
        updated_at: datetime_column(row, 4)?,
    })
}

fn session_from_row(row: &Row) -> rusqlite::Result<ScheduledSession> {
    let status: String = row.get(4)?;
    Ok(ScheduledSession {
        id: uuid_column(row, 0)?,
        template_id: optional_uuid_column(row, 1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        time_blocks: Vec::new(),
        status: SessionStatus::from_str(&status)
            .ok_or_else(|| conversion_error(4, format!("unknown session status '{status}'")))?,
        scheduled_start: datetime_column(row, 5)?,
        actual_start: optional_datetime_column(row, 6)?,
        actual_end: optional_datetime_column(row, 7)?,
        created_at: datetime_column(row, 8)?,
        updated_at: datetime_column(row, 9)?,
    })
}

fn template_from_row(row: &Row) -> rusqlite::Result<SessionTemplate> {
    Ok(SessionTemplate {
        id: uuid_column(row, 0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        is_public: row.get(3)?,
        time_blocks: Vec::new(),
        created_at: datetime_column(row, 4)?,
        updated_at: datetime_column(row, 5)?,
    })
}

struct StoredBlock {
    id: Uuid,
    kind: BlockKind,
    duration: Duration,
    status: BlockStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn load_time_blocks(conn: &Connection, session_id: Uuid) -> Result<Vec<TimeBlock>> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, duration_secs, status, created_at, updated_at
         FROM scheduled_time_blocks WHERE session_id = ? ORDER BY position",
    )?;
    let stored = stmt
        .query_map([session_id.to_string()], |row| {
            let status: String = row.get(3)?;
            Ok(StoredBlock {
                id: uuid_column(row, 0)?,
                kind: kind_column(row, 1)?,
                duration: duration_column(row, 2)?,
                status: BlockStatus::from_str(&status)
                    .ok_or_else(|| conversion_error(3, format!("unknown block status '{status}'")))?,
                created_at: datetime_column(row, 4)?,
                updated_at: datetime_column(row, 5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    stored
        .into_iter()
        .map(|b| {
            let categories = if b.kind.is_work() {
                load_categories(conn, BLOCK_CATEGORIES_SQL, b.id)?
            } else {
                Vec::new()
            };
            Ok(TimeBlock::new(b.kind, b.duration, categories)
                .minted(b.id, b.created_at)
                .with_status(b.status, b.updated_at))
        })
        .collect()
}

fn load_template_blocks(conn: &Connection, template_id: Uuid) -> Result<Vec<TimeBlockTemplate>> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, duration_secs, created_at, updated_at
         FROM time_block_templates WHERE template_id = ? ORDER BY position",
    )?;
    let stored = stmt
        .query_map([template_id.to_string()], |row| {
            Ok(StoredBlock {
                id: uuid_column(row, 0)?,
                kind: kind_column(row, 1)?,
                duration: duration_column(row, 2)?,
                status: BlockStatus::default(),
                created_at: datetime_column(row, 3)?,
                updated_at: datetime_column(row, 4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    stored
        .into_iter()
        .map(|b| {
            let categories = if b.kind.is_work() {
                load_categories(conn, TEMPLATE_BLOCK_CATEGORIES_SQL, b.id)?
            } else {
                Vec::new()
            };
            Ok(TimeBlockTemplate {
                id: b.id,
                created_at: b.created_at,
                updated_at: b.updated_at,
                ..TimeBlockTemplate::new(b.kind, b.duration, categories)
            })
        })
        .collect()
}

/// Categories linked to one block, in their stored order.
///
/// The nil id maps back to the default category. Links to categories that
/// were deleted since are dropped; a work block left with none falls back
/// to the default.
fn load_categories(conn: &Connection, sql: &str, owner_id: Uuid) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(sql)?;
    let linked = stmt
        .query_map([owner_id.to_string()], |row| {
            let id = uuid_column(row, 0)?;
            if id.is_nil() {
                return Ok(Some(Category::uncategorized()));
            }
            let Some(name) = row.get::<_, Option<String>>(1)? else {
                return Ok(None);
            };
            Ok(Some(Category {
                id,
                name,
                color: row.get(2)?,
                created_at: datetime_column(row, 3)?,
                updated_at: datetime_column(row, 4)?,
            }))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let categories: Vec<Category> = linked.into_iter().flatten().collect();
    if categories.is_empty() {
        return Ok(vec![Category::uncategorized()]);
    }
    Ok(categories)
}

fn duration_secs(duration: Duration) -> Result<i64> {
    i64::try_from(duration.as_secs()).context("Block duration out of range")
}

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, message.into())
}

fn uuid_column(row: &Row, idx: usize) -> rusqlite::Result<Uuid> {
    let s: String = row.get(idx)?;
    Uuid::parse_str(&s)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn optional_uuid_column(row: &Row, idx: usize) -> rusqlite::Result<Option<Uuid>> {
    match row.get::<_, Option<String>>(idx)? {
        Some(_) => uuid_column(row, idx).map(Some),
        None => Ok(None),
    }
}

fn datetime_column(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let s: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn optional_datetime_column(row: &Row, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    match row.get::<_, Option<String>>(idx)? {
        Some(_) => datetime_column(row, idx).map(Some),
        None => Ok(None),
    }
}

fn duration_column(row: &Row, idx: usize) -> rusqlite::Result<Duration> {
    let secs: i64 = row.get(idx)?;
    u64::try_from(secs)
        .map(Duration::from_secs)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

fn kind_column(row: &Row, idx: usize) -> rusqlite::Result<BlockKind> {
    let s: String = row.get(idx)?;
    BlockKind::from_str(&s).ok_or_else(|| conversion_error(idx, format!("unknown block kind '{s}'")))
}
