use crate::errors::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};

pub type JobId = u64;
pub type TemplateId = u64;
pub type OutputBlob = bytes::Bytes;

/// Login details for the controller. Fixed for the lifetime of the process.
#[derive(Clone)]
pub struct Credential {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Off by default so self-signed controller certificates are accepted.
    pub verify_ssl: bool,
}

impl Credential {
    pub fn new(host: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            verify_ssl: false,
        }
    }

    pub fn verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    /// Root of the v2 API. A host that already carries a scheme is used as the origin verbatim.
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}/api/v2", host)
        } else {
            format!("https://{}/api/v2", host)
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("verify_ssl", &self.verify_ssl)
            .finish()
    }
}

/// Bearer token issued by `POST /tokens/`.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    New,
    Pending,
    Waiting,
    Running,
    Successful,
    Failed,
    Error,
    Canceled,
}

impl JobStatus {
    /// No further transition happens once a job reaches one of these.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Successful | JobStatus::Failed | JobStatus::Error | JobStatus::Canceled
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::New => "new",
            JobStatus::Pending => "pending",
            JobStatus::Waiting => "waiting",
            JobStatus::Running => "running",
            JobStatus::Successful => "successful",
            JobStatus::Failed => "failed",
            JobStatus::Error => "error",
            JobStatus::Canceled => "canceled",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    pub started: Option<String>,
    pub finished: Option<String>,
}

/// The server reports a template's project as its numeric id; older exports carry a name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProjectRef {
    Id(u64),
    Name(String),
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectRef::Id(id) => write!(f, "{}", id),
            ProjectRef::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct JobTemplate {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub project: Option<ProjectRef>,
}

/// Variables passed to a launch. Always a JSON object.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExtraVars(serde_json::Map<String, serde_json::Value>);

impl ExtraVars {
    pub fn parse(raw: &str) -> Result<Self> {
        match serde_json::from_str(raw) {
            Ok(serde_json::Value::Object(map)) => Ok(Self(map)),
            _ => Err(ClientError::InvalidInput("Invalid JSON in extra-vars".into())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Body of `POST /job_templates/{id}/launch/`.
#[derive(Debug, Default, Serialize)]
pub(crate) struct LaunchRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_vars: Option<&'a ExtraVars>,
}

/// How often to ask for a job's status and when to give up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollPolicy {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}
