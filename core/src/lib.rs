//! Client core for a REST-backed to-do list.
//!
//! # Overview
//! `TaskClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO). A `Transport` executes them;
//! `TasksApi` strings the two together into the five collection operations.
//! `TaskList` owns the in-memory tasks and derives the filtered, ordered view,
//! while `TaskView` turns per-task user actions into intents for it.
//!
//! # Design
//! - `TaskClient` is stateless apart from `base_url` and the token.
//! - Controller operations never return errors; they log and move on.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod task_list;
pub mod task_view;
pub mod transport;
pub mod types;

pub use api::TasksApi;
pub use client::TaskClient;
pub use config::Config;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use task_list::{BusyHandle, TaskList};
pub use task_view::{Key, TaskIntent, TaskView};
pub use transport::{Transport, UreqTransport};
pub use types::{clamp_message, Envelope, NewTask, Task, TaskId, TaskPatch, MAX_MESSAGE_LEN};
