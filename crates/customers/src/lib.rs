//! HTTP client for the customers REST API.
//!
//! This crate wraps the five operations of the `/v1/customers` resource:
//!
//! - `GET    /v1/customers`       - [`CustomerClient::list_customers`]
//! - `GET    /v1/customers/{id}`  - [`CustomerClient::get_customer`]
//! - `POST   /v1/customers`       - [`CustomerClient::save_customer`]
//! - `DELETE /v1/customers/{id}`  - [`CustomerClient::delete_customer`]
//! - `PUT    /v1/customers/{id}`  - [`CustomerClient::update_customer`]
//!
//! Every call issues one request and returns the transport's response or
//! error as-is. There is no retrying, caching, or validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use customers::{ClientConfig, Customer, CustomerClient};
//!
//! let client = CustomerClient::new(ClientConfig::new("http://localhost:8080"))?;
//!
//! let created = client
//!     .save_customer(&Customer::new().with_field("name", "alex").with_field("age", 30))
//!     .await?
//!     .json::<Customer>()?;
//!
//! let all: Vec<Customer> = client.list_customers().await?.json()?;
//! ```
//!
//! # Configuration
//!
//! [`CustomerClient::from_env`] reads the base URL from:
//!
//! - `API_BASE_URL`
//! - `VITE_API_BASE_URL` (fallback, shared with the web frontend)
//!
//! # Architecture
//!
//! - [`Transport`] is the seam between the client and the network
//! - [`HttpTransport`] implements it with `reqwest`
//! - [`CustomerClient`] builds URLs and forwards to its transport

#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{CustomerClient, CUSTOMERS_PATH};
pub use config::ClientConfig;
pub use error::{ConfigError, InvalidRequest, TransportError};
pub use models::{ApiError, Customer, CustomerId};
pub use transport::{HttpResponse, HttpTransport, Method, Request, Transport};
