// src/memory/store.rs — SQLite operations

use chrono::Utc;
use rusqlite::{params, Connection, Row};

/// One `chat_sessions` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSessionRow {
    pub id: i64,
    pub created_at: i64,
    pub topic: String,
    pub question: String,
    pub answer: String,
    pub score: i32,
    pub label: String,
    pub summary: String,
}

/// Column values for a new row; id and created_at are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub topic: String,
    pub question: String,
    pub answer: String,
    pub score: i32,
    pub label: String,
    pub summary: String,
}

const SESSION_COLUMNS: &str =
    "id, created_at, topic, question, answer, score, label, summary";

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<ChatSessionRow> {
    Ok(ChatSessionRow {
        id: row.get(0)?,
        created_at: row.get(1)?,
        topic: row.get(2)?,
        question: row.get(3)?,
        answer: row.get(4)?,
        score: row.get(5)?,
        label: row.get(6)?,
        summary: row.get(7)?,
    })
}

/// Low-level SQLite operations for practice sessions.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Insert a session stamped with the current time. Returns the new row id.
    pub fn insert_session(&self, session: &NewSession) -> anyhow::Result<i64> {
        self.insert_session_at(session, Utc::now().timestamp_millis())
    }

    pub fn insert_session_at(&self, session: &NewSession, created_at: i64) -> anyhow::Result<i64> {
        self.conn.execute(
            "INSERT INTO chat_sessions (created_at, topic, question, answer, score, label, summary)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                created_at,
                session.topic,
                session.question,
                session.answer,
                session.score,
                session.label,
                session.summary
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All sessions, newest first.
    pub fn list_sessions(&self) -> anyhow::Result<Vec<ChatSessionRow>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SESSION_COLUMNS} FROM chat_sessions ORDER BY created_at DESC, id DESC"
        ))?;

        let rows = stmt.query_map([], session_from_row)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    pub fn recent_sessions(&self, limit: u32) -> anyhow::Result<Vec<ChatSessionRow>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SESSION_COLUMNS} FROM chat_sessions
             ORDER BY created_at DESC, id DESC LIMIT ?1"
        ))?;

        let rows = stmt.query_map(params![limit], session_from_row)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    pub fn get_session(&self, id: i64) -> anyhow::Result<Option<ChatSessionRow>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SESSION_COLUMNS} FROM chat_sessions WHERE id = ?1"
        ))?;
        let mut rows = stmt.query_map(params![id], session_from_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Returns the number of rows removed (0 when the id is unknown).
    pub fn delete_session(&self, id: i64) -> anyhow::Result<usize> {
        let n = self
            .conn
            .execute("DELETE FROM chat_sessions WHERE id = ?1", params![id])?;
        Ok(n)
    }

    pub fn count_sessions(&self) -> anyhow::Result<i64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM chat_sessions", [], |r| r.get(0))?;
        Ok(n)
    }

    /// Mean score over all rows; 0.0 when there are none.
    pub fn average_score(&self) -> anyhow::Result<f64> {
        let avg: Option<f64> =
            self.conn
                .query_row("SELECT AVG(score) FROM chat_sessions", [], |r| r.get(0))?;
        Ok(avg.unwrap_or(0.0))
    }
}
