//! Core types and traits for Nimbus
//!
//! This crate provides the transport, error model, pagination and waiter
//! machinery shared by all Nimbus service clients.

pub mod client;
pub mod config;
pub mod credentials;
mod enums;
pub mod error;
pub mod operation;
pub mod paginator;
pub mod request;
pub mod request_id;
pub mod retry;
pub mod waiter;
pub mod xml;

pub use client::{AwsClient, Protocol, ServiceMetadata};
pub use config::ClientConfig;
pub use credentials::Credentials;
pub use error::{Error, ErrorCode, ServiceError};
pub use operation::{required, Dispatch, Input, Operation, PaginatedOperation};
pub use paginator::Paginator;
pub use request::{QueryBody, Request, Response};
pub use request_id::RequestId;
pub use retry::RetryPolicy;
pub use waiter::{Waiter, WaiterState};
pub use xml::XmlNode;

#[doc(hidden)]
pub use serde;
