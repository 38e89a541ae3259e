//! Ujeebu API client
//!
//! Rust client for the Ujeebu web scraping, article extraction, and SERP
//! (search engine results) APIs. Operations are addressed by
//! `(resource, operation)` pairs and executed over item batches, mirroring
//! how workflow hosts drive the API.
//!
//! ## Operations
//!
//! - **Extract**: article — structured JSON out of a news/blog URL
//! - **Scrape**: rendered HTML, screenshots, PDFs, or CSS-selector
//!   extraction rules
//! - **SERP**: Google web, news, image, video, and maps search
//!
//! ## Example
//!
//! ```no_run
//! use serde_json::json;
//! use ujeebu::{run_batch, Client, Credentials, Operation, Resource};
//!
//! # async fn example() -> Result<(), ujeebu::UjeebuError> {
//! let client = Client::new(Credentials::new("my-api-key"))?;
//! let item = json!({"url": "https://example.com"})
//!     .as_object()
//!     .cloned()
//!     .unwrap();
//!
//! let output = run_batch(
//!     &client,
//!     Resource::Scrape,
//!     Operation::GetHtml,
//!     &[item],
//!     false,
//! )
//! .await?;
//! println!("{}", output[0].json["html"]);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod credentials;
mod error;
mod item;
pub mod ops;
mod params;
pub mod rules;
pub mod transport;
pub mod types;

pub use batch::{run_batch, run_one};
pub use credentials::{Credentials, DEFAULT_BASE_URL};
pub use error::UjeebuError;
pub use item::{BinaryAttachment, InputItem, OutputItem};
pub use ops::{input_schema, Handler, Operation, Registry, Resource};
pub use params::Params;
pub use rules::{Rule, RuleInput, RuleType};
pub use transport::{endpoints, Client, API_KEY_HEADER};
