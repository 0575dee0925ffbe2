//! Query-builder client for a hosted table exposed through a PostgREST-style API.
//!
//! ```ignore
//! let rows: Vec<Row> = client
//!     .from("posts")
//!     .select("*")
//!     .order("created_at", false)
//!     .execute()
//!     .await?;
//! ```

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use writer_core::error::RepoError;

use super::config::RestConfig;

/// Asks the server for exactly one JSON object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Errors raised while talking to the hosted table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Table API answered {status}: {message}")]
    Status {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Expected exactly one row")]
    NotSingle,

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl From<TableError> for RepoError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::Transport(e) => RepoError::Connection(e.to_string()),
            TableError::Config(msg) => RepoError::Connection(msg),
            // SQLSTATE class 23: integrity constraint violation.
            TableError::Status {
                code: Some(code),
                message,
                ..
            } if code.starts_with("23") => RepoError::Constraint(message),
            TableError::Status {
                status: 409,
                message,
                ..
            } => RepoError::Constraint(message),
            TableError::Status { .. } => RepoError::Query(err.to_string()),
            TableError::NotSingle => RepoError::NotFound,
            TableError::Decode(msg) => RepoError::Decode(msg),
        }
    }
}

/// Error document returned by the table API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// HTTP client bound to one project.
#[derive(Clone)]
pub struct TableClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TableClient {
    pub fn new(config: &RestConfig) -> Result<Self, TableError> {
        if config.url.trim().is_empty() {
            return Err(TableError::Config("table API url is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TableError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
        })
    }

    /// Start a query against `table`. Defaults to `select=*`.
    pub fn from(&self, table: &str) -> QueryBuilder<'_> {
        QueryBuilder {
            client: self,
            table: table.to_string(),
            operation: Operation::Select,
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            single: false,
        }
    }
}

enum Operation {
    Select,
    Insert(serde_json::Value),
    Update(serde_json::Value),
    Delete,
}

/// One request under construction.
pub struct QueryBuilder<'a> {
    client: &'a TableClient,
    table: String,
    operation: Operation,
    columns: String,
    filters: Vec<(String, String)>,
    order: Option<String>,
    single: bool,
}

impl QueryBuilder<'_> {
    /// Columns to return. Also applies to rows returned by writes.
    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    pub fn insert(mut self, rows: serde_json::Value) -> Self {
        self.operation = Operation::Insert(rows);
        self
    }

    pub fn update(mut self, values: serde_json::Value) -> Self {
        self.operation = Operation::Update(values);
        self
    }

    pub fn delete(mut self) -> Self {
        self.operation = Operation::Delete;
        self
    }

    /// Filter rows where `column` equals `value`.
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push((column.to_string(), format!("eq.{value}")));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order = Some(format!("{column}.{direction}"));
        self
    }

    /// Expect exactly one row back, as an object.
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    /// Send the request and decode the body as `T`.
    pub async fn execute<T: DeserializeOwned>(self) -> Result<T, TableError> {
        let QueryBuilder {
            client,
            table,
            operation,
            columns,
            filters,
            order,
            single,
        } = self;

        let url = format!("{}/{}", client.base_url, table);

        let mut query = vec![("select".to_string(), columns)];
        query.extend(filters);
        if let Some(order) = order {
            query.push(("order".to_string(), order));
        }

        let request = match operation {
            Operation::Select => client.http.get(&url),
            Operation::Insert(rows) => client
                .http
                .post(&url)
                .header("Prefer", RETURN_REPRESENTATION)
                .json(&rows),
            Operation::Update(values) => client
                .http
                .patch(&url)
                .header("Prefer", RETURN_REPRESENTATION)
                .json(&values),
            Operation::Delete => client
                .http
                .delete(&url)
                .header("Prefer", RETURN_REPRESENTATION),
        };

        let mut request = request
            .query(&query)
            .header("apikey", &client.api_key)
            .bearer_auth(&client.api_key);
        if single {
            request = request.header(ACCEPT, SINGLE_OBJECT);
        }

        let response = request.send().await?;
        let status = response.status();

        if single && status == StatusCode::NOT_ACCEPTABLE {
            return Err(TableError::NotSingle);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let parsed: Option<ApiErrorBody> = serde_json::from_str(&body).ok();
            let (code, message) = match parsed {
                Some(err) => (err.code, err.message.unwrap_or(body)),
                None => (None, body),
            };
            tracing::debug!(table = %table, status = status.as_u16(), "Table API error");
            return Err(TableError::Status {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| TableError::Decode(e.to_string()))
    }
}
