use aaplib::types::{JobId, TemplateId};
use aaplib::{Client, ClientError, Credential, ExtraVars, Job, JobStatus, JobTemplate, PollPolicy};
use std::fmt::Write;
use std::time::Duration;

/// Runs one CLI action against an authenticated session and prints the result.
///
/// Request failures are reported on stderr and otherwise swallowed: the process exit code
/// only reflects authentication and input problems.
pub struct ClientCli {
    inner: Client,
}

impl ClientCli {
    pub async fn connect(credential: &Credential, request_timeout: Duration) -> Result<Self, ClientError> {
        let inner = Client::connect(credential, request_timeout).await?;
        println!("Successfully authenticated with AAP");
        Ok(Self { inner })
    }

    pub async fn list_templates(&self) {
        match self.inner.list_job_templates().await {
            Ok(templates) => print!("{}", format_templates(&templates)),
            Err(err) => eprintln!("Failed to get job templates: {}", err),
        }
    }

    pub async fn launch(
        &self,
        template_id: TemplateId,
        extra_vars: Option<&ExtraVars>,
        wait: Option<&PollPolicy>,
    ) {
        let job_id = match self.inner.launch_job_template(template_id, extra_vars).await {
            Ok(job_id) => job_id,
            Err(err) => {
                eprintln!("Failed to launch job: {}", err);
                return;
            }
        };
        println!("Job launched successfully. Job ID: {}", job_id);

        if let Some(policy) = wait {
            self.wait(job_id, policy).await;
        }
    }

    async fn wait(&self, job_id: JobId, policy: &PollPolicy) {
        let result = self
            .inner
            .wait_for_job_completion(job_id, policy, |job| {
                println!("Job {} status: {}", job_id, job.status)
            })
            .await;
        match result {
            Ok(job) => print!("{}", format_completion(&job)),
            Err(err) => eprintln!("{}", err),
        }
    }

    pub async fn query_status(&self, job_id: JobId) {
        match self.inner.get_job_status(job_id).await {
            Ok(job) => print!("{}", format_status(&job)),
            Err(err) => eprintln!("Failed to get job status: {}", err),
        }
    }

    pub async fn print_output(&self, job_id: JobId) {
        match self.inner.get_job_output(job_id).await {
            Ok(data) if !data.is_empty() => println!("{}", String::from_utf8_lossy(&data)),
            Ok(_) => {}
            Err(err) => eprintln!("Failed to get job output: {}", err),
        }
    }
}

pub fn format_templates(templates: &[JobTemplate]) -> String {
    if templates.is_empty() {
        return "No job templates found.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "\nAvailable Job Templates:");
    let _ = writeln!(out, "{}", "-".repeat(50));
    for template in templates {
        let project = template
            .project
            .as_ref()
            .map_or_else(|| "None".to_string(), ToString::to_string);
        let _ = writeln!(out, "ID: {} - Name: {}", template.id, template.name);
        let _ = writeln!(out, "   Description: {}", template.description);
        let _ = writeln!(out, "   Project: {}", project);
        let _ = writeln!(out);
    }
    out
}

pub fn format_status(job: &Job) -> String {
    format!(
        "Job Status: {}\nStarted: {}\nFinished: {}\n",
        job.status,
        job.started.as_deref().unwrap_or("None"),
        job.finished.as_deref().unwrap_or("None"),
    )
}

pub fn format_completion(job: &Job) -> String {
    let verdict = if job.status == JobStatus::Successful {
        "Job executed successfully!"
    } else {
        "Job failed or was canceled"
    };
    format!("\nJob completed with status: {}\n{}\n", job.status, verdict)
}
