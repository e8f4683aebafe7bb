//! `UsersApi` over the remote `/users` collection endpoint.

use async_trait::async_trait;
use modkit::{TracedClient, APPLICATION_PROBLEM_JSON};
use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::UsersAdminConfig;
use crate::contract::{
    client::UsersApi,
    error::{ErrorBody, Fault},
    model::{NewUser, User, UserPatch},
};

const COLLECTION: &str = "users";

#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Single-shot HTTP client: no retries, no cache.
#[derive(Debug, Clone)]
pub struct HttpUsersClient {
    client: TracedClient,
    base: Url,
}

impl HttpUsersClient {
    pub fn new(client: TracedClient, base_url: &str) -> Result<Self, ClientBuildError> {
        let invalid = |reason: String| ClientBuildError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a hierarchical url".to_string()));
        }
        Ok(Self { client, base })
    }

    pub fn from_config(cfg: &UsersAdminConfig) -> Result<Self, ClientBuildError> {
        let client = TracedClient::with_timeout(cfg.request_timeout)?;
        Self::new(client, &cfg.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `<base>/users` or `<base>/users/<id>`, with `id` escaped as one segment.
    pub fn users_url(&self, id: Option<&str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(COLLECTION);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    /// Send and return the response when its status is 2xx.
    async fn send(&self, builder: RequestBuilder, url: &Url, id: Option<&str>) -> Result<Response, Fault> {
        let request = builder.build().map_err(|e| map_transport(url, e))?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| map_transport(url, e))?;

        let status = response.status();
        debug!(status = status.as_u16(), "collection responded");
        if status.is_success() {
            return Ok(response);
        }

        // An unreadable error body still yields a fault for the status.
        let body = match response.text().await {
            Ok(text) => ErrorBody::from_text(&text),
            Err(_) => ErrorBody::Empty,
        };
        Err(match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => Fault::NotFound {
                id: id.to_string(),
                url: url.to_string(),
                body,
            },
            _ => Fault::service(
                url.as_str(),
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Error"),
                body,
            ),
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        url: &Url,
        id: Option<&str>,
    ) -> Result<T, Fault> {
        let response = self.send(builder, url, id).await?;
        response.json::<T>().await.map_err(|e| map_transport(url, e))
    }

    fn request(&self, method: Method, url: &Url) -> RequestBuilder {
        self.client
            .request(method, url.as_str())
            .header(header::ACCEPT, format!("application/json, {APPLICATION_PROBLEM_JSON}"))
    }
}

fn map_transport(url: &Url, err: reqwest::Error) -> Fault {
    if err.is_timeout() {
        Fault::timeout(url.as_str())
    } else if err.is_decode() || err.is_builder() {
        Fault::unknown(err.to_string())
    } else {
        Fault::network(url.as_str(), err.to_string())
    }
}

#[async_trait]
impl UsersApi for HttpUsersClient {
    #[instrument(name = "users_admin.http.list", skip_all)]
    async fn list(&self) -> Result<Vec<User>, Fault> {
        let url = self.users_url(None);
        self.send_json(self.request(Method::GET, &url), &url, None)
            .await
    }

    #[instrument(name = "users_admin.http.get", skip(self))]
    async fn get(&self, id: &str) -> Result<User, Fault> {
        let url = self.users_url(Some(id));
        self.send_json(self.request(Method::GET, &url), &url, Some(id))
            .await
    }

    #[instrument(name = "users_admin.http.create", skip_all)]
    async fn create(&self, new_user: NewUser) -> Result<User, Fault> {
        let url = self.users_url(None);
        let builder = self.request(Method::POST, &url).json(&new_user);
        self.send_json(builder, &url, None).await
    }

    #[instrument(name = "users_admin.http.update", skip(self, patch))]
    async fn update(&self, id: &str, patch: UserPatch) -> Result<User, Fault> {
        let url = self.users_url(Some(id));
        let builder = self.request(Method::PUT, &url).json(&patch);
        self.send_json(builder, &url, Some(id)).await
    }

    #[instrument(name = "users_admin.http.remove", skip(self))]
    async fn remove(&self, id: &str) -> Result<(), Fault> {
        let url = self.users_url(Some(id));
        self.send(self.request(Method::DELETE, &url), &url, Some(id))
            .await
            .map(drop)
    }
}
