//! HTTP client wrapper
//!
//! Every request is built against the configured API base and picks up the
//! bearer token from the [`TokenStore`] at send time, so a login or logout is
//! visible to the next request without rebuilding the client. Without a token
//! the request goes out unauthenticated.
//!
//! Non-2xx responses become an [`ApiError`] carrying whatever structured
//! `detail` the server sent.

use std::sync::Arc;

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::app::config::Config;
use crate::app::token_store::TokenStore;
use crate::shared::error::ApiError;

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Config,
    client: Client,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(config: Config, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            config,
            client: Client::new(),
            tokens,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path);
        self.execute(Method::GET, path, builder).await
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path).query(query);
        self.execute(Method::GET, path, builder).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(body);
        self.execute(Method::POST, path, builder).await
    }

    /// POST `application/x-www-form-urlencoded` fields.
    pub async fn post_form<B, T>(&self, path: &str, fields: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).form(fields);
        self.execute(Method::POST, path, builder).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path).multipart(form);
        self.execute(Method::POST, path, builder).await
    }

    pub async fn put_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, ApiError> {
        let builder = self.request(Method::PUT, path).multipart(form);
        self.execute(Method::PUT, path, builder).await
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path);
        self.execute(Method::POST, path, builder).await
    }

    /// DELETE that answers with a JSON body.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::DELETE, path);
        self.execute(Method::DELETE, path, builder).await
    }

    /// DELETE that answers 204.
    pub async fn delete_no_content(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, path);
        let span = request_span(&Method::DELETE, path);
        async move {
            self.send(builder).await?;
            Ok(())
        }
        .instrument(span)
        .await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.config.api_url(path));
        match self.tokens.load() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let span = request_span(&method, path);
        async move {
            let response = self.send(builder).await?;
            response.json::<T>().await.map_err(|e| {
                tracing::error!("Failed to parse response: {}", e);
                ApiError::decode(e.to_string())
            })
        }
        .instrument(span)
        .await
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        tracing::debug!("sending request");
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("Network error: {}", e);
            ApiError::network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_response(status.as_u16(), &body);
        tracing::debug!(status = status.as_u16(), "request failed: {}", error);
        Err(error)
    }
}

fn request_span(method: &Method, path: &str) -> tracing::Span {
    tracing::debug_span!("api_request", request_id = %Uuid::new_v4(), %method, path)
}
