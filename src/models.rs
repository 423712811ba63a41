use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Author of a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Display label shown in the transcript header
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Assistant",
        }
    }
}

/// Tabular payload attached to an assistant reply.
///
/// Every row has exactly as many cells as there are headers. The invariant
/// is checked on construction and on deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct TableData {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

#[derive(Deserialize)]
struct RawTable {
    headers: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<String>>,
}

impl TryFrom<RawTable> for TableData {
    type Error = TableError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        TableData::new(raw.headers, raw.rows)
    }
}

impl TableData {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        if headers.is_empty() {
            return Err(TableError::NoHeaders);
        }
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != headers.len())
        {
            return Err(TableError::RaggedRow {
                row,
                expected: headers.len(),
                found: cells.len(),
            });
        }
        Ok(TableData { headers, rows })
    }

    /// Build a table from string literals
    pub fn from_strs(headers: &[&str], rows: &[&[&str]]) -> Result<Self, TableError> {
        TableData::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// A single chat message
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub table: Option<TableData>,
    /// True while the typing animation still owns this message
    pub is_streaming: bool,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
            table: None,
            is_streaming: false,
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>, table: Option<TableData>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
            table,
            is_streaming: false,
            timestamp: Utc::now(),
        }
    }

    /// Table to display: hidden until the message has finished streaming
    pub fn visible_table(&self) -> Option<&TableData> {
        if self.is_streaming {
            None
        } else {
            self.table.as_ref()
        }
    }
}

/// Payload returned by a producer's `fetch_reply`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub content: String,
    #[serde(default)]
    pub table: Option<TableData>,
}

impl Reply {
    pub fn new(content: impl Into<String>, table: Option<TableData>) -> Self {
        Reply {
            content: content.into(),
            table,
        }
    }
}

/// Acknowledgement of a submitted message. Only its arrival matters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub id: Option<String>,
}
