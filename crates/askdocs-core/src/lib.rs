//! # askdocs core
//!
//! Runtime-free logic for askdocs: data models, the error taxonomy, the
//! vector wire codec, word-boundary chunking, the guardrail engine, and the
//! storage abstraction.
//!
//! This crate contains no tokio, sqlx, or network dependencies. Everything
//! that talks to a model server or a database lives in the `askdocs` app
//! crate and plugs in through the traits defined here.

pub mod chunk;
pub mod error;
pub mod guardrail;
pub mod models;
pub mod store;
pub mod vector;

pub use error::{RagError, Result};
