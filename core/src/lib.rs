//! Minimal blocking HTTP request helper.
//!
//! # Overview
//! Describe a request with `RequestOptions`, turn it into a `RequestSpec`
//! against a `ClientConfig`, then `send` it through a `Transport`. The
//! response is decoded into a `ResponseValue`: parsed JSON when the server
//! says `application/json`, plain text otherwise.
//!
//! # Design
//! - Defaults, URL resolution and header fixing all happen in
//!   `RequestSpec::new`; the spec is immutable afterwards.
//! - Building (`to_http_request`) and decoding (`handle_response`) are pure,
//!   so the I/O boundary is the `Transport` trait alone.
//! - `UreqTransport` (default `ureq` feature) is the stock blocking
//!   transport. No retries, no timeouts of our own.
//!
//! ```no_run
//! use rest_request::{BaseUrlConfig, RequestOptions, RequestSpec, UreqTransport};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BaseUrlConfig::new("https://api.example.com")?;
//! let options = RequestOptions::new()
//!     .with_method("post")
//!     .with_url("endpoint")
//!     .with_param("key", "value")
//!     .with_json(true);
//! let value = RequestSpec::new(options, &config)?.send(&UreqTransport::new())?;
//! println!("{value:?}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod transport;
pub mod types;

pub use config::{BaseUrlConfig, ClientConfig};
pub use error::{BoxError, RequestError, UnsupportedVersion};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpVersion};
pub use request::{handle_response, RequestSpec, CLIENT_NAME};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{Params, RequestOptions, ResponseValue};
