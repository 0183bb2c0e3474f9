//! indexcheck - an index-then-search consistency probe.
//!
//! Every candidate file is submitted to a remote index (`POST /index`),
//! then a fixed query is run against the same mailbox (`POST /search`).
//! The number of search results must never shrink over the course of a
//! run; any shrinkage, transport failure, bad status or malformed
//! response aborts the run.
//!
//! # Quick start
//!
//! ```no_run
//! use indexcheck::{IndexClient, Runner, walker};
//!
//! # async fn demo() -> indexcheck::Result<()> {
//! let client = IndexClient::new("http://localhost:8080", None)?;
//! let mut runner = Runner::new(client, "testtest", "dnet_usage main");
//!
//! let paths = walker::discover_paths(std::path::Path::new("./src"))?;
//! let state = runner.run(paths).await?;
//! println!("indexed {} documents", state.indexed);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod consistency;
pub mod document;
pub mod error;
pub mod protocol;
pub mod run;
pub mod walker;

pub use client::IndexClient;
pub use consistency::ConsistencyChecker;
pub use error::{Error, Result};
pub use run::{RunState, Runner};
