use crate::errors::{ClientError, Result};
use crate::types::{
    Credential, ExtraVars, Job, JobId, JobTemplate, LaunchRequest, OutputBlob, TemplateId, Token,
};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct TokenRequest {
    description: &'static str,
    scope: &'static str,
}

const TOKEN_REQUEST: TokenRequest = TokenRequest {
    description: "API Token for automation",
    scope: "write",
};

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Deserialize)]
struct Page<T> {
    results: Vec<T>,
}

#[derive(Deserialize)]
struct LaunchResponse {
    job: JobId,
}

/// An authenticated session with the controller API.
///
/// The only way to build one is `Client::connect`, which obtains a bearer token first,
/// so every request made through a `Client` carries `Authorization: Bearer <token>`.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    token: Token,
}

impl Client {
    /// Build the HTTP session and exchange the credential's username/password for a token.
    pub async fn connect(credential: &Credential, request_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!credential.verify_ssl)
            .timeout(request_timeout)
            .build()?;
        let base_url = credential.base_url();
        let token = Self::authenticate(&http, &base_url, credential).await?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// `POST /tokens/` with basic auth. Anything but 201 is an auth failure.
    async fn authenticate(
        http: &reqwest::Client,
        base_url: &str,
        credential: &Credential,
    ) -> Result<Token> {
        let url = format!("{}/tokens/", base_url);
        debug!(%url, username = %credential.username, "requesting token");
        let response = http
            .post(&url)
            .basic_auth(&credential.username, Some(&credential.password))
            .json(&TOKEN_REQUEST)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Auth { status, body });
        }
        let TokenResponse { token } = response.json().await?;
        info!(host = %credential.host, "authenticated");
        Ok(Token::new(token))
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub async fn list_job_templates(&self) -> Result<Vec<JobTemplate>> {
        let request = self.http.get(self.url("/job_templates/"));
        let response = self.send(request, StatusCode::OK).await?;
        let page: Page<JobTemplate> = response.json().await?;
        Ok(page.results)
    }

    pub async fn launch_job_template(
        &self,
        template_id: TemplateId,
        extra_vars: Option<&ExtraVars>,
    ) -> Result<JobId> {
        let body = LaunchRequest {
            extra_vars: extra_vars.filter(|vars| !vars.is_empty()),
        };
        let request = self
            .http
            .post(self.url(&format!("/job_templates/{}/launch/", template_id)))
            .json(&body);
        let response = self.send(request, StatusCode::CREATED).await?;
        let LaunchResponse { job } = response.json().await?;
        info!(template_id, job_id = job, "job launched");
        Ok(job)
    }

    pub async fn get_job_status(&self, job_id: JobId) -> Result<Job> {
        let request = self.http.get(self.url(&format!("/jobs/{}/", job_id)));
        let response = self.send(request, StatusCode::OK).await?;
        Ok(response.json().await?)
    }

    pub async fn get_job_output(&self, job_id: JobId) -> Result<OutputBlob> {
        let request = self.http.get(self.url(&format!("/jobs/{}/stdout/", job_id)));
        let response = self.send(request, StatusCode::OK).await?;
        Ok(response.bytes().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token, send once, and insist on the expected status.
    async fn send(&self, request: RequestBuilder, expected: StatusCode) -> Result<Response> {
        let response = request.bearer_auth(self.token.as_str()).send().await?;
        let status = response.status();
        debug!(url = %response.url(), %status, "response");
        if status == expected {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Http { status, body })
        }
    }
}
