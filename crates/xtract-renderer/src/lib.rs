//! Xtract renderer
//!
//! Turns a platform post payload into a readable [`NormalizedPost`]. Standard
//! posts keep their plain text with shortened links expanded; long-form
//! articles are parsed from their block/entity content state and rendered
//! as markdown. Quoted posts are followed recursively.
//!
//! Everything here is a pure function of its input. Fetching payloads is
//! left to the caller.

pub mod article;
pub mod config;
pub mod error;
pub mod post;
pub mod raw;
pub mod richtext;

pub use config::TransformConfig;
pub use error::TransformError;
pub use post::{NormalizedPost, transform_json, transform_post, transform_post_with};
pub use raw::{PostResponse, RawPost};
