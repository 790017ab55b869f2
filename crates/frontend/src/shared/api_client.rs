//! HTTP-клиент сессии.
//!
//! Создаётся один раз на сессию в `AuthProvider` и передаётся в операции
//! явно. Токен в хранилище клиент не читает.

use super::operation_error::OperationError;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Клиент без токена (только для входа)
    pub fn anonymous(base_url: impl Into<String>) -> Self {
        Self::new(base_url, None)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn builder(&self, method: HttpMethod, path: &str) -> RequestBuilder {
        let url = self.url(path);
        let builder = match method {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
        };
        match self.authorization() {
            Some(header) => builder.header("Authorization", &header),
            None => builder,
        }
    }

    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, OperationError> {
        let builder = self.builder(method, path).header("Accept", "application/json");
        let sent = match body {
            Some(value) => {
                builder
                    .json(&value)
                    .map_err(|e| OperationError::Transport(e.to_string()))?
                    .send()
                    .await
            }
            None => builder.send().await,
        };
        let response = sent.map_err(|e| {
            log::error!("{:?} {} failed: {}", method, path, e);
            OperationError::Transport(e.to_string())
        })?;

        if !response.ok() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            log::warn!("{:?} {} rejected: {} {}", method, path, status, text);
            return Err(OperationError::rejected(status, &text));
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, OperationError> {
        response
            .json::<T>()
            .await
            .map_err(|e| OperationError::Decode(e.to_string()))
    }

    fn encode<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, OperationError> {
        serde_json::to_value(body).map_err(|e| OperationError::Decode(e.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, OperationError> {
        let response = self.execute(HttpMethod::Get, path, None).await?;
        Self::decode(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, OperationError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = Self::encode(body)?;
        let response = self.execute(HttpMethod::Post, path, Some(body)).await?;
        Self::decode(response).await
    }

    /// POST без тела; ответ не разбирается
    pub async fn post_empty(&self, path: &str) -> Result<(), OperationError> {
        self.execute(HttpMethod::Post, path, None).await.map(|_| ())
    }

    /// POST с телом; ответ не разбирается
    pub async fn post_discard<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), OperationError> {
        let body = Self::encode(body)?;
        self.execute(HttpMethod::Post, path, Some(body)).await.map(|_| ())
    }

    /// PUT с телом; ответ не разбирается
    pub async fn put_discard<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), OperationError> {
        let body = Self::encode(body)?;
        self.execute(HttpMethod::Put, path, Some(body)).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_path() {
        let client = ApiClient::new("http://127.0.0.1:3000/", None);
        assert_eq!(
            client.url("/api/transfers"),
            "http://127.0.0.1:3000/api/transfers"
        );
    }

    #[test]
    fn test_authorization_header() {
        let client = ApiClient::new("http://h:3000", Some("abc".into()));
        assert!(client.is_authenticated());
        assert_eq!(client.authorization().as_deref(), Some("Bearer abc"));
        assert_eq!(ApiClient::anonymous("http://h:3000").authorization(), None);
    }
}
