use crate::client::Client;
use crate::errors::{ClientError, Result};
use crate::types::{Job, JobId, PollPolicy};
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

impl Client {
    /// Poll `GET /jobs/{id}/` every `policy.interval` until the job reaches a terminal status.
    ///
    /// `on_status` sees every record fetched, terminal or not. A failed fetch is logged and
    /// polling carries on; only the deadline ends the loop without a result.
    pub async fn wait_for_job_completion<F>(
        &self,
        job_id: JobId,
        policy: &PollPolicy,
        mut on_status: F,
    ) -> Result<Job>
    where
        F: FnMut(&Job),
    {
        let start = Instant::now();
        while start.elapsed() < policy.timeout {
            match self.get_job_status(job_id).await {
                Ok(job) => {
                    debug!(job_id, status = %job.status, "polled");
                    on_status(&job);
                    if job.status.is_terminal() {
                        return Ok(job);
                    }
                }
                Err(err) => warn!(job_id, error = %err, "Failed to get job status"),
            }
            sleep(policy.interval).await;
        }
        Err(ClientError::Timeout {
            job_id,
            timeout: policy.timeout,
        })
    }
}
