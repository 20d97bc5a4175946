//! HTTP client for the catalog & order service.
//!
//! Uses `reqwest` with JSON bodies. Non-success responses are decoded from
//! the service's `{"message": ...}` error body when possible.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use vibe_commerce_core::{NewOrder, NewProduct, Order, Product, ProductId, ProductUpdate};

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Errors that can occur when talking to the service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    /// The configured base URL is unusable.
    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// Whether the service reported that the resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

/// The slice of the API the storefront state machine depends on.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError>;

    async fn create_order(&self, order: &NewOrder) -> Result<Order, ClientError>;
}

/// `{"message": ...}` body used by error responses and delete confirmations.
#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

/// Client for the catalog & order service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url` (e.g. `http://host:5000/api`).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        // Url::join replaces the last segment unless the base ends in '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: Url::parse(&normalized)?,
        })
    }

    /// The normalized base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    /// Fetch one product.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 404 if the product does not exist.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ClientError> {
        let response = self.client.get(self.url(&format!("products/{id}"))?).send().await?;
        decode(response).await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 400 if the service rejects the fields.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ClientError> {
        let response = self
            .client
            .post(self.url("products")?)
            .json(product)
            .send()
            .await?;
        decode(response).await
    }

    /// Partially update a product.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` on 400 or 404.
    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> Result<Product, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("products/{id}"))?)
            .json(update)
            .send()
            .await?;
        decode(response).await
    }

    /// Delete a product, returning the service's confirmation message.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 404 if the product does not exist.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<String, ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("products/{id}"))?)
            .send()
            .await?;
        let body: MessageBody = decode(response).await?;
        Ok(body.message)
    }

    /// All orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ClientError> {
        let response = self.client.get(self.url("orders")?).send().await?;
        decode(response).await
    }

    /// Fetch one order by store id or `ORD-` number.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 404 if the order does not exist.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &str) -> Result<Order, ClientError> {
        let response = self.client.get(self.url(&format!("orders/{id}"))?).send().await?;
        decode(response).await
    }
}

#[async_trait]
impl CatalogApi for ApiClient {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let response = self.client.get(self.url("products")?).send().await?;
        decode(response).await
    }

    #[instrument(skip(self, order), fields(items = order.items.len()))]
    async fn create_order(&self, order: &NewOrder) -> Result<Order, ClientError> {
        let response = self
            .client
            .post(self.url("orders")?)
            .json(order)
            .send()
            .await?;
        decode(response).await
    }
}

/// Decode a success body, or turn the error body into `ClientError::Api`.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(status = %status, body = %body.chars().take(500).collect::<String>(), "API error response");
    Err(ClientError::Api {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<MessageBody>(body).map_or_else(
        |_| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        },
        |parsed| parsed.message,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = ApiClient::new("http://localhost:5000/api").unwrap();
        assert_eq!(
            client.url("products").unwrap().as_str(),
            "http://localhost:5000/api/products"
        );

        let client = ApiClient::new("http://localhost:5000/api/").unwrap();
        assert_eq!(
            client.url("orders/ORD-1").unwrap().as_str(),
            "http://localhost:5000/api/orders/ORD-1"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_error_message_prefers_body() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"message":"Product not found"}"#),
            "Product not found"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html>upstream down</html>"),
            "Bad Gateway"
        );
    }

    #[test]
    fn test_message_body_carries_delete_confirmation() {
        let body: MessageBody =
            serde_json::from_str(r#"{"message":"Product deleted"}"#).unwrap();
        assert_eq!(body.message, "Product deleted");
    }

    #[test]
    fn test_is_not_found() {
        let err = ClientError::Api {
            status: 404,
            message: "Order not found".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Order not found (HTTP 404)");
    }
}
