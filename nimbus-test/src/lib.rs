//! Test utilities for Nimbus
//!
//! Provides an in-process AWS endpoint for integration testing:
//! - Listens on an ephemeral local port
//! - Plays back queued responses per operation
//! - Records every request and checks its SigV4 signature
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nimbus_test::{MockResponse, MockServer};
//!
//! #[tokio::test]
//! async fn test_get_queue_url() {
//!     let server = MockServer::start().await.unwrap();
//!     server.enqueue("GetQueueUrl", MockResponse::xml("<GetQueueUrlResponse/>"));
//!
//!     // Build a client from server.config() and call it
//!
//!     assert!(server.requests()[0].is_signed());
//! }
//! ```

pub mod exchange;
pub mod server;

pub use exchange::{MockResponse, RecordedRequest};
pub use server::{MockServer, TestError, TEST_ACCESS_KEY, TEST_SECRET_KEY};
