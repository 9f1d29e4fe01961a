//! Parlor Content
//!
//! Read access to the headless content store and the live invalidation bus
//! that keeps browsers in sync with it.
//!
//! # Example
//!
//! ```no_run
//! use parlor_content::{ContentClient, HttpContentClient, QueryRequest};
//! use parlor_core::Config;
//!
//! # async fn demo(config: &Config) -> Result<(), parlor_content::ContentError> {
//! let client = HttpContentClient::from_config(config)?;
//! let request = QueryRequest::recent_documents("chat", 100).with_tags(["chat"]);
//! let documents = client.fetch(&request).await?;
//! println!("{} chats", documents.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod live;
pub mod query;

pub use client::{ContentClient, HttpContentClient};
pub use error::{ContentError, Result};
pub use live::{Invalidation, LiveBus};
pub use query::QueryRequest;
