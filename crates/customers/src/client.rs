//! Client for the `/v1/customers` resource.

use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::{ConfigError, InvalidRequest};
use crate::models::{Customer, CustomerId};
use crate::transport::{HttpTransport, Method, Request, Transport};

/// Path of the customers collection, relative to the base URL.
pub const CUSTOMERS_PATH: &str = "/v1/customers";

/// Customers API client.
///
/// Each operation issues exactly one request and hands back the transport's
/// response or error unchanged.
#[derive(Debug, Clone)]
pub struct CustomerClient<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl CustomerClient<HttpTransport> {
    /// Create a client backed by [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_transport(config, HttpTransport::new()?))
    }

    /// Create a client from environment variables.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not set or the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> CustomerClient<T> {
    /// Create a client with a custom transport.
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `{base}/v1/customers`
    fn collection_url(&self) -> String {
        format!("{}{CUSTOMERS_PATH}", self.config.base_url)
    }

    /// `{base}/v1/customers/{id}`
    fn item_url(&self, customer_id: &CustomerId) -> Result<String, InvalidRequest> {
        if customer_id.is_empty() {
            return Err(InvalidRequest::EmptyId);
        }
        Ok(format!("{}/{customer_id}", self.collection_url()))
    }

    /// List all customers.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged.
    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<T::Response, T::Error> {
        let request = Request::new(Method::Get, self.collection_url());
        self.send(request).await
    }

    /// Fetch a single customer.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged (a missing customer is a
    /// transport error, typically a 404). An empty id is rejected with
    /// [`InvalidRequest::EmptyId`] before any request is made.
    pub async fn get_customer(
        &self,
        customer_id: impl Into<CustomerId>,
    ) -> Result<T::Response, T::Error> {
        self.get_by_id(&customer_id.into()).await
    }

    #[instrument(skip(self, customer_id), fields(customer_id = %customer_id))]
    async fn get_by_id(&self, customer_id: &CustomerId) -> Result<T::Response, T::Error> {
        let url = self.item_url(customer_id)?;
        self.send(Request::new(Method::Get, url)).await
    }

    /// Create a customer. The customer is sent as the request body unmodified.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged, including validation
    /// failures reported by the service.
    #[instrument(skip(self, customer))]
    pub async fn save_customer(&self, customer: &Customer) -> Result<T::Response, T::Error> {
        let request =
            Request::new(Method::Post, self.collection_url()).with_body(customer.to_json());
        self.send(request).await
    }

    /// Delete a customer.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged. An empty id is rejected with
    /// [`InvalidRequest::EmptyId`] before any request is made.
    pub async fn delete_customer(
        &self,
        customer_id: impl Into<CustomerId>,
    ) -> Result<T::Response, T::Error> {
        self.delete_by_id(&customer_id.into()).await
    }

    #[instrument(skip(self, customer_id), fields(customer_id = %customer_id))]
    async fn delete_by_id(&self, customer_id: &CustomerId) -> Result<T::Response, T::Error> {
        let url = self.item_url(customer_id)?;
        self.send(Request::new(Method::Delete, url)).await
    }

    /// Replace a customer, addressed by its own `id`.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged. A customer without an id
    /// cannot be addressed: it fails with [`InvalidRequest::MissingId`]
    /// (or [`InvalidRequest::EmptyId`]) converted into the transport's
    /// error type, and no request is made.
    #[instrument(skip(self, customer), fields(customer_id = ?customer.id))]
    pub async fn update_customer(&self, customer: &Customer) -> Result<T::Response, T::Error> {
        let customer_id = customer.id.as_ref().ok_or(InvalidRequest::MissingId)?;
        let url = self.item_url(customer_id)?;
        let request = Request::new(Method::Put, url).with_body(customer.to_json());
        self.send(request).await
    }

    async fn send(&self, request: Request) -> Result<T::Response, T::Error> {
        debug!(method = %request.method, url = %request.url, "Dispatching customers request");
        self.transport.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    const BASE: &str = "http://localhost:8080";

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    enum FakeError {
        #[error("network unreachable: {0}")]
        Network(String),
        #[error("invalid request: {0}")]
        Invalid(#[from] InvalidRequest),
    }

    /// Records every request and answers with a canned outcome.
    struct RecordingTransport {
        outcome: Result<&'static str, FakeError>,
        requests: Mutex<Vec<Request>>,
    }

    impl RecordingTransport {
        fn answering(outcome: Result<&'static str, FakeError>) -> Self {
            Self {
                outcome,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<Request> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        type Response = &'static str;
        type Error = FakeError;

        async fn execute(&self, request: Request) -> Result<&'static str, FakeError> {
            self.requests.lock().unwrap().push(request);
            self.outcome.clone()
        }
    }

    fn client(outcome: Result<&'static str, FakeError>) -> CustomerClient<RecordingTransport> {
        CustomerClient::with_transport(
            ClientConfig::new(BASE),
            RecordingTransport::answering(outcome),
        )
    }

    #[tokio::test]
    async fn test_list_customers_issues_single_get() {
        let client = client(Ok("[]"));
        let response = client.list_customers().await.unwrap();

        assert_eq!(response, "[]");
        assert_eq!(
            client.transport().requests(),
            vec![Request::new(Method::Get, "http://localhost:8080/v1/customers")]
        );
    }

    #[tokio::test]
    async fn test_get_customer_addresses_item() {
        let client = client(Ok("customer"));
        let response = client.get_customer("abc-1").await.unwrap();

        assert_eq!(response, "customer");
        assert_eq!(
            client.transport().requests(),
            vec![Request::new(
                Method::Get,
                "http://localhost:8080/v1/customers/abc-1"
            )]
        );
    }

    #[tokio::test]
    async fn test_save_customer_posts_body_verbatim() {
        let client = client(Ok("created"));
        let customer = Customer::new()
            .with_field("name", "alex")
            .with_field("email", "alex@example.com")
            .with_field("age", 30);

        client.save_customer(&customer).await.unwrap();

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, "http://localhost:8080/v1/customers");
        assert_eq!(
            requests[0].body,
            Some(json!({"name": "alex", "email": "alex@example.com", "age": 30}))
        );
    }

    #[tokio::test]
    async fn test_delete_customer_addresses_item() {
        let client = client(Ok(""));
        client.delete_customer("7").await.unwrap();

        assert_eq!(
            client.transport().requests(),
            vec![Request::new(
                Method::Delete,
                "http://localhost:8080/v1/customers/7"
            )]
        );
    }

    #[tokio::test]
    async fn test_update_customer_puts_to_own_id() {
        let client = client(Ok("updated"));
        let customer = Customer::new().with_id("42").with_field("name", "alex");

        client.update_customer(&customer).await.unwrap();

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[0].url, "http://localhost:8080/v1/customers/42");
        assert_eq!(requests[0].body, Some(json!({"id": "42", "name": "alex"})));
    }

    #[tokio::test]
    async fn test_update_customer_uses_id_set_as_field() {
        let client = client(Ok("updated"));
        let customer = Customer::new().with_field("id", 42).with_field("name", "alex");

        client.update_customer(&customer).await.unwrap();

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[0].url, "http://localhost:8080/v1/customers/42");
        assert_eq!(requests[0].body, Some(json!({"id": 42, "name": "alex"})));
    }

    #[tokio::test]
    async fn test_update_customer_without_id_sends_nothing() {
        let client = client(Ok("updated"));
        let customer = Customer::new().with_field("name", "alex");

        let err = client.update_customer(&customer).await.unwrap_err();

        assert_eq!(err, FakeError::Invalid(InvalidRequest::MissingId));
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_ids_are_rejected() {
        let client = client(Ok(""));

        assert_eq!(
            client.get_customer("").await.unwrap_err(),
            FakeError::Invalid(InvalidRequest::EmptyId)
        );
        assert_eq!(
            client.delete_customer(String::new()).await.unwrap_err(),
            FakeError::Invalid(InvalidRequest::EmptyId)
        );
        assert_eq!(
            client
                .update_customer(&Customer::new().with_id(""))
                .await
                .unwrap_err(),
            FakeError::Invalid(InvalidRequest::EmptyId)
        );
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_transport_errors_pass_through_unchanged() {
        let failure = FakeError::Network("connection reset".to_string());
        let client = client(Err(failure.clone()));
        let customer = Customer::new().with_id(5).with_field("name", "alex");

        assert_eq!(client.list_customers().await.unwrap_err(), failure);
        assert_eq!(client.get_customer(5).await.unwrap_err(), failure);
        assert_eq!(client.save_customer(&customer).await.unwrap_err(), failure);
        assert_eq!(client.delete_customer(5).await.unwrap_err(), failure);
        assert_eq!(client.update_customer(&customer).await.unwrap_err(), failure);
        assert_eq!(client.transport().requests().len(), 5);
    }

    #[test]
    fn test_base_url_is_not_normalised() {
        let client = CustomerClient::with_transport(
            ClientConfig::new("http://localhost:8080/api/"),
            RecordingTransport::answering(Ok("")),
        );
        assert_eq!(
            client.collection_url(),
            "http://localhost:8080/api//v1/customers"
        );
        assert_eq!(
            client.item_url(&CustomerId::from(1)).unwrap(),
            "http://localhost:8080/api//v1/customers/1"
        );
    }

    /// Collects `customer_id` values recorded on new spans.
    #[derive(Clone, Default)]
    struct SpanIds(Arc<Mutex<Vec<String>>>);

    struct CustomerIdVisitor<'a>(&'a mut Vec<String>);

    impl Visit for CustomerIdVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "customer_id" {
                self.0.push(format!("{value:?}"));
            }
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for SpanIds {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
            attrs.record(&mut CustomerIdVisitor(&mut self.0.lock().unwrap()));
        }
    }

    #[tokio::test]
    async fn test_item_operations_record_customer_id_on_span() {
        let ids = SpanIds::default();
        let subscriber = tracing_subscriber::registry().with(ids.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let client = client(Ok(""));
        client.get_customer(42).await.unwrap();
        client.delete_customer("7").await.unwrap();

        let recorded = ids.0.lock().unwrap().clone();
        assert_eq!(recorded, vec!["42".to_string(), "7".to_string()]);
    }
}
