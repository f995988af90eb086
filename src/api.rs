use std::env;

use chrono::Utc;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

use crate::bench::TodoService;
use crate::client;
use crate::todo::{ApiError, NewTodo, Todo, TodoId, TodoPatch};

/// Where the benchmarked backend listens unless `TODO_API_URL` says otherwise.
pub const DEFAULT_API_URL: &str = "http://localhost:1111/api/v1";

pub const API_URL_ENV: &str = "TODO_API_URL";

/// Base URL from `TODO_API_URL`, falling back to [`DEFAULT_API_URL`].
pub fn api_url_from_env() -> String {
    env::var(API_URL_ENV).unwrap_or_else(|_| String::from(DEFAULT_API_URL))
}

/// Blocking client for the `/api/v1/todos` REST endpoints.
///
/// Every call issues exactly one request. Failures come back as [`ApiError`]
/// and are logged to stdout; nothing is retried. Any 2xx JSON body counts as
/// success, even one carrying only an `id`.
#[derive(Clone, Debug)]
pub struct RemoteTodos {
    base_url: String,
    client: Client,
}

impl RemoteTodos {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, client::BLOCKING_CLIENT.clone())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /todos with a random due date 1..=30 days out.
    pub fn create_todo(&self, title: &str) -> Result<Todo, ApiError> {
        let body = NewTodo::with_random_due_date(title, Utc::now().date_naive(), &mut rand::rng());
        let res = self.client.post(self.url("/todos")).json(&body).send()?;
        decode(check("POST", "/todos", res)?)
    }

    /// GET /todos.
    pub fn get_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let res = self.client.get(self.url("/todos")).send()?;
        decode(check("GET", "/todos", res)?)
    }

    /// PUT /todos/{id} with only the `completed` flag.
    pub fn update_todo(&self, id: &TodoId, completed: bool) -> Result<Todo, ApiError> {
        let path = format!("/todos/{}", id);
        let res = self
            .client
            .put(self.url(&path))
            .json(&TodoPatch::completed(completed))
            .send()?;
        decode(check("PUT", &path, res)?)
    }

    /// DELETE /todos/{id}. Any response body is ignored.
    pub fn delete_todo(&self, id: &TodoId) -> Result<(), ApiError> {
        let path = format!("/todos/{}", id);
        let res = self.client.delete(self.url(&path)).send()?;
        check("DELETE", &path, res)?;
        Ok(())
    }

    /// Boolean view of [`RemoteTodos::delete_todo`]; the error is logged to stdout.
    pub fn delete_ok(&self, id: &TodoId) -> bool {
        self.delete_todo(id)
            .inspect_err(|e| println!("delete todo {} failed: {}", id, e))
            .is_ok()
    }
}

fn check(method: &'static str, path: &str, res: Response) -> Result<Response, ApiError> {
    if res.status().is_success() {
        return Ok(res);
    }
    let status = res.status().as_u16();
    let body = res.text().unwrap_or_default();
    Err(ApiError::Status {
        method,
        path: path.to_string(),
        status,
        body,
    })
}

fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
    let bytes = res.bytes()?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

impl TodoService for RemoteTodos {
    fn create(&mut self, title: &str) -> Result<Todo, ApiError> {
        self.create_todo(title)
            .inspect_err(|e| println!("create todo failed: {}", e))
    }

    fn list(&mut self) -> Result<Vec<Todo>, ApiError> {
        self.get_todos()
            .inspect_err(|e| println!("list todos failed: {}", e))
    }

    fn update(&mut self, id: &TodoId, completed: bool) -> Result<Todo, ApiError> {
        self.update_todo(id, completed)
            .inspect_err(|e| println!("update todo {} failed: {}", id, e))
    }

    fn delete(&mut self, id: &TodoId) -> Result<(), ApiError> {
        self.delete_todo(id)
            .inspect_err(|e| println!("delete todo {} failed: {}", id, e))
    }
}
