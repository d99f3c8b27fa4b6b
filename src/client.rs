//! HTTP client for the departments, users and website-links API.

use std::fmt::Display;
use std::time::{Duration, Instant};

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{AuthConfig, ServerConfig};
use crate::error::Result;
use crate::models::{CreateDepartment, DepartmentQuery, Envelope, MoveDepartment, UpdateDepartment};

/// Path of the department resource group.
pub const DEPARTMENTS_PATH: &str = "/api/v1/departments";
/// Path of the user resource group.
pub const USERS_PATH: &str = "/api/v1/users";
/// Path of the website-link resource group.
pub const WEBSITE_LINKS_PATH: &str = "/api/v1/website-links";

/// How a request authenticates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Configured bearer token, if any.
    #[default]
    Default,
    /// `Authorization` header present but empty.
    Empty,
    /// Explicit bearer token.
    Bearer(String),
}

/// Observed response. Any HTTP status is a valid observation here.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    /// Request path relative to the base URL.
    pub path: String,
    pub body: String,
    pub elapsed: Duration,
}

impl ApiResponse {
    /// Parse the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Decode the body as an envelope around `T`.
    pub fn envelope<T: DeserializeOwned>(&self) -> Result<Envelope<T>> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Body truncated for diagnostics.
    pub fn excerpt(&self) -> String {
        const LIMIT: usize = 512;
        match self.body.char_indices().nth(LIMIT) {
            Some((idx, _)) => format!("{}…", &self.body[..idx]),
            None => self.body.clone(),
        }
    }
}

/// API client.
///
/// Wraps a pooled `reqwest::Client`. Transport failures are errors; HTTP
/// error statuses are returned as ordinary responses so callers can assert on them.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `server` - Base URL (e.g., "http://192.168.1.23:8080/auth-PM2") and timeout
    /// * `auth` - Default credentials
    pub fn new(server: &ServerConfig, auth: &AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(server.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: server.base_url.trim_end_matches('/').to_string(),
            token: auth.token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with query pairs.
    pub async fn get(&self, path: &str, query: &[(&str, String)], auth: AuthMode) -> Result<ApiResponse> {
        let request = self.request(Method::GET, path, auth).query(query);
        self.execute(Method::GET, path, request).await
    }

    /// POST a JSON body to `path`.
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let request = self.request(Method::POST, path, AuthMode::Default).json(body);
        self.execute(Method::POST, path, request).await
    }

    /// PUT a JSON body to `path`.
    pub async fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let request = self.request(Method::PUT, path, AuthMode::Default).json(body);
        self.execute(Method::PUT, path, request).await
    }

    /// DELETE `path`.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        let request = self.request(Method::DELETE, path, AuthMode::Default);
        self.execute(Method::DELETE, path, request).await
    }

    /// Search departments.
    pub async fn list_departments(&self, query: &DepartmentQuery) -> Result<ApiResponse> {
        self.get(DEPARTMENTS_PATH, &query.to_pairs(), AuthMode::Default).await
    }

    /// Fetch the department tree.
    pub async fn department_tree(&self, query: &DepartmentQuery) -> Result<ApiResponse> {
        let path = format!("{DEPARTMENTS_PATH}/tree");
        self.get(&path, &query.to_pairs(), AuthMode::Default).await
    }

    /// Fetch one department with its users. `id` is sent verbatim.
    pub async fn get_department(&self, id: impl Display) -> Result<ApiResponse> {
        let path = format!("{DEPARTMENTS_PATH}/{id}");
        self.get(&path, &[], AuthMode::Default).await
    }

    /// Create a department.
    pub async fn create_department(&self, data: &CreateDepartment) -> Result<ApiResponse> {
        self.post_json(DEPARTMENTS_PATH, data).await
    }

    /// Update a department.
    pub async fn update_department(&self, id: impl Display, data: &UpdateDepartment) -> Result<ApiResponse> {
        let path = format!("{DEPARTMENTS_PATH}/{id}");
        self.put_json(&path, data).await
    }

    /// Re-parent a department.
    pub async fn move_department(&self, data: &MoveDepartment) -> Result<ApiResponse> {
        let path = format!("{DEPARTMENTS_PATH}/move");
        self.post_json(&path, data).await
    }

    /// Delete a department and its subtree.
    pub async fn delete_department(&self, id: impl Display) -> Result<ApiResponse> {
        let path = format!("{DEPARTMENTS_PATH}/{id}");
        self.delete(&path).await
    }

    /// Fetch one user.
    pub async fn get_user(&self, id: impl Display) -> Result<ApiResponse> {
        let path = format!("{USERS_PATH}/{id}");
        self.get(&path, &[], AuthMode::Default).await
    }

    /// Fetch one website link. An empty `id` requests the bare collection path.
    pub async fn get_website_link(&self, id: impl Display, auth: AuthMode) -> Result<ApiResponse> {
        let path = format!("{WEBSITE_LINKS_PATH}/{id}");
        self.get(&path, &[], auth).await
    }

    fn request(&self, method: Method, path: &str, auth: AuthMode) -> RequestBuilder {
        let url = format!("{base}{path}", base = self.base_url);
        let request = self.client.request(method, url);

        match auth {
            AuthMode::Default => match &self.token {
                Some(token) => request.bearer_auth(token),
                None => request,
            },
            AuthMode::Empty => request.header(AUTHORIZATION, ""),
            AuthMode::Bearer(token) => request.bearer_auth(token),
        }
    }

    async fn execute(&self, method: Method, path: &str, request: RequestBuilder) -> Result<ApiResponse> {
        let start = Instant::now();
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        let elapsed = start.elapsed();

        debug!("{method} {path} -> {status} ({} ms)", elapsed.as_millis());

        Ok(ApiResponse {
            status,
            path: path.to_string(),
            body,
            elapsed,
        })
    }
}
