//! Client for the Ansible Automation Platform controller API (`/api/v2`).
mod client;
pub mod errors;
mod poll;
pub mod types;

pub use client::{Client, DEFAULT_REQUEST_TIMEOUT};
pub use errors::{ClientError, Result};
pub use types::{Credential, ExtraVars, Job, JobStatus, JobTemplate, PollPolicy};
