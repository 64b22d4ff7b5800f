#![doc = svgbobdoc::transform!(
//! Turns a directory of sample server sources into catalog records.
//!
//! # Overview
//!
//! Each sample source carries its catalog metadata as YAML inside leading
//! line comments, between two sentinel lines:
//!
//! ```cs
//! // ---
//! // id: weather
//! // description: Forecasts for any city.
//! // tags:
//! //     - http
//! // ---
//! public static class WeatherTools { ... }
//! ```
//!
//! An [`Extractor`] reads every matching file in a directory and builds one
//! [`CatalogRecord`] per file:
//!
//! ```svgbob
//!  +-------------+    +-------------+    +--------+    +----------+
//!  | source file |--->| front matter|--->| decode |--->| defaults |---+
//!  +------+------+    |    span     |    +--------+    +----------+   |
//!         |           +------+------+                                 v
//!         |                  |          +--------------+      +---------------+
//!         |                  +--------->| display code |----->| CatalogRecord |
//!         |                             +--------------+      +-------+-------+
//!         |           +--------------+                                ^
//!         +---------->| tool scanner |--------------------------------+
//!                     +--------------+
//! ```
//!
//! 1. The front matter span is located between the first two sentinel lines.
//! 2. Its comment lines are stripped of their markers and decoded as YAML
//!    into a [`RawFrontMatter`], where every field is optional. A field with
//!    an unusable value is dropped on its own.
//! 3. [`RawFrontMatter::resolve()`] fills in every missing field.
//! 4. Independently, the whole text is scanned for tool attributes.
//! 5. The text after the front matter, with HTML entities decoded, becomes
//!    the record's display code.
//!
//! Records are collected into a [`Catalog`], keyed by id, in discovery order.
//! [`Catalog::to_list()`] flattens it for listing and pagination.
//!
//! Everything the extractor knows about is in [`ExtractorConfig`];
//! diagnostics go to an injected [`Reporter`].
)]

#[macro_use]
pub mod error;
pub mod util;
pub mod fstree;
pub mod format;
pub mod config;
pub mod record;
pub mod frontmatter;
pub mod tools;
pub mod report;
pub mod catalog;
pub mod extract;

pub use catalog::Catalog;
pub use config::{ExtractorConfig, OnDuplicate};
pub use extract::Extractor;
pub use record::{CatalogRecord, FrontMatter, InvalidField, RawFrontMatter, ToolDescriptor};
pub use report::{Reporter, Silent, TracingReporter};
