//! `PostRepository` over the hosted table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use writer_core::domain::{NewPost, Post, PostChanges};
use writer_core::error::RepoError;
use writer_core::ports::{BaseRepository, PostRepository};

use super::client::{TableClient, TableError};
use super::config::RestConfig;

/// Row as the table returns it. Hosted tables often use integer keys, so
/// the id is accepted as a string or a number.
#[derive(Debug, Deserialize)]
struct PostRow {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    user_id: String,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            user_id: row.user_id,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Key {
        Text(String),
        Number(i64),
    }

    Ok(match Key::deserialize(deserializer)? {
        Key::Text(s) => s,
        Key::Number(n) => n.to_string(),
    })
}

/// Post repository backed by the hosted `posts` table.
pub struct RestPostRepository {
    client: TableClient,
    table: String,
}

impl RestPostRepository {
    pub fn new(config: &RestConfig) -> Result<Self, TableError> {
        let client = TableClient::new(config)?;
        tracing::info!(url = %config.url, table = %config.table, "Hosted table client ready");

        Ok(Self {
            client,
            table: config.table.clone(),
        })
    }
}

#[async_trait]
impl BaseRepository<Post, String> for RestPostRepository {
    async fn find_by_id(&self, id: String) -> Result<Option<Post>, RepoError> {
        let result = self
            .client
            .from(&self.table)
            .select("*")
            .eq("id", &id)
            .single()
            .execute::<PostRow>()
            .await;

        match result {
            Ok(row) => Ok(Some(row.into())),
            Err(TableError::NotSingle) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: String) -> Result<bool, RepoError> {
        let removed: Vec<PostRow> = self
            .client
            .from(&self.table)
            .delete()
            .eq("id", &id)
            .execute()
            .await?;

        Ok(!removed.is_empty())
    }
}

#[async_trait]
impl PostRepository for RestPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let rows: Vec<PostRow> = self
            .client
            .from(&self.table)
            .select("*")
            .order("created_at", false)
            .execute()
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let rows: Vec<PostRow> = self
            .client
            .from(&self.table)
            .insert(serde_json::json!([post]))
            .select("*")
            .execute()
            .await?;

        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or_else(|| RepoError::Query("insert returned no rows".to_string()))
    }

    async fn update(&self, id: String, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let values =
            serde_json::to_value(&changes).map_err(|e| RepoError::Query(e.to_string()))?;

        let rows: Vec<PostRow> = self
            .client
            .from(&self.table)
            .update(values)
            .eq("id", &id)
            .select("*")
            .execute()
            .await?;

        Ok(rows.into_iter().next().map(Into::into))
    }
}
