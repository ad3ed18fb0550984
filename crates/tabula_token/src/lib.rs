//! Token engine, load context, and deferred processing for Tabula.
//!
//! This crate provides:
//! - [`PrimaryToken`] / [`DeferredToken`] - The contracts every token implements
//! - [`ReferenceListToken`] / [`TagListToken`] - Built-in list-edit tokens
//! - [`TokenRegistry`] - Token lookup by object type and name
//! - [`LoadContext`] - Atomic token application, unparse, and the load report
//! - [`DeferredScheduler`] - Priority-ordered second pass

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod context;
pub mod edit;
pub mod lst;
pub mod message;
pub mod registry;
pub mod scheduler;
pub mod token;
pub mod tokens;

pub use config::LoadConfig;
pub use context::{LoadContext, LoadReport};
pub use edit::Edit;
pub use message::{LoadMessage, Severity};
pub use registry::TokenRegistry;
pub use scheduler::{DeferredScheduler, DeferredTask, SchedulerRun};
pub use token::{DeferredToken, PrimaryToken};
pub use tokens::{DamageToken, MasterListTask, ReferenceListToken, TagListToken};
