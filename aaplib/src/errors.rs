use crate::types::JobId;
use reqwest::StatusCode;
use std::{result, time::Duration};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The token endpoint refused the credentials.
    #[error("{status} - {body}")]
    Auth { status: StatusCode, body: String },
    /// Any other non-success response from the API.
    #[error("{status} - {body}")]
    Http { status: StatusCode, body: String },
    #[error("Job {job_id} timed out after {secs} seconds", secs = .timeout.as_secs())]
    Timeout { job_id: JobId, timeout: Duration },
    #[error("{0}")]
    InvalidInput(String),
    /// Connection, TLS or body decoding failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Status code of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Auth { status, .. } | ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = result::Result<T, ClientError>;
