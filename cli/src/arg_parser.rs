use aaplib::types::{JobId, TemplateId};
use aaplib::{ClientError, Credential, ExtraVars, PollPolicy};
use clap::{ArgEnum, Parser};
use std::time::Duration;

/// Ansible Automation Platform API client
#[derive(Debug, Parser)]
pub struct ArgParser {
    /// AAP controller host, or a full origin such as http://localhost:8080
    #[clap(long, env = "AAP_HOST")]
    pub host: String,

    #[clap(long, env = "AAP_USERNAME")]
    pub username: String,

    #[clap(long, env = "AAP_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Enforce TLS certificate validation (off by default for self-signed controllers)
    #[clap(long, env = "AAP_VERIFY_SSL")]
    pub verify_ssl: bool,

    /// Action to perform
    #[clap(long, arg_enum)]
    pub action: Action,

    /// Job template ID (launch)
    #[clap(long)]
    pub template_id: Option<TemplateId>,

    /// Job ID (status, output)
    #[clap(long)]
    pub job_id: Option<JobId>,

    /// Extra variables as a JSON object string (launch)
    #[clap(long)]
    pub extra_vars: Option<String>,

    /// Wait for a launched job to complete
    #[clap(long)]
    pub wait: bool,

    /// Seconds between status checks while waiting
    #[clap(long, env = "AAP_POLL_INTERVAL", default_value_t = 10)]
    pub poll_interval: u64,

    /// Seconds to wait for a job before giving up
    #[clap(long, env = "AAP_TIMEOUT", default_value_t = 300)]
    pub timeout: u64,

    /// Seconds before a single HTTP request is abandoned
    #[clap(long, env = "AAP_REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// More log output on stderr (-v, -vv, -vvv)
    #[clap(short, long, parse(from_occurrences))]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ArgEnum)]
pub enum Action {
    /// list job templates
    List,
    /// launch a job template
    Launch,
    /// show a job's status
    Status,
    /// print a job's output
    Output,
}

/// An action together with the inputs it needs, checked before any request is made.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    List,
    Launch {
        template_id: TemplateId,
        extra_vars: Option<ExtraVars>,
        wait: bool,
    },
    Status {
        job_id: JobId,
    },
    Output {
        job_id: JobId,
    },
}

impl ArgParser {
    pub fn credential(&self) -> Credential {
        Credential::new(&self.host, &self.username, &self.password).verify_ssl(self.verify_ssl)
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_secs(self.poll_interval),
            timeout: Duration::from_secs(self.timeout),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn command(&self) -> Result<Command, ClientError> {
        match self.action {
            Action::List => Ok(Command::List),
            Action::Launch => {
                let template_id = self.template_id.ok_or_else(|| {
                    ClientError::InvalidInput("Template ID is required for launch action".into())
                })?;
                let extra_vars = self
                    .extra_vars
                    .as_deref()
                    .map(ExtraVars::parse)
                    .transpose()?;
                Ok(Command::Launch {
                    template_id,
                    extra_vars,
                    wait: self.wait,
                })
            }
            Action::Status => Ok(Command::Status {
                job_id: required_job_id(self.job_id, "status")?,
            }),
            Action::Output => Ok(Command::Output {
                job_id: required_job_id(self.job_id, "output")?,
            }),
        }
    }
}

fn required_job_id(job_id: Option<JobId>, action: &str) -> Result<JobId, ClientError> {
    job_id.ok_or_else(|| {
        ClientError::InvalidInput(format!("Job ID is required for {} action", action))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> ArgParser {
        let base = ["aap", "--host", "aap.example", "--username", "u", "--password", "p"];
        ArgParser::try_parse_from(base.iter().chain(extra)).expect("args should parse")
    }

    #[test]
    fn defaults() {
        let args = parse(&["--action", "list"]);
        assert_eq!(args.command().unwrap(), Command::List);
        assert!(!args.credential().verify_ssl);
        assert_eq!(args.poll_policy(), PollPolicy::default());
        assert_eq!(args.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn verify_ssl_is_opt_in() {
        let args = parse(&["--action", "list", "--verify-ssl"]);
        assert!(args.credential().verify_ssl);
    }

    #[test]
    fn credentials_have_no_defaults() {
        let result = ArgParser::try_parse_from(["aap", "--action", "list"]);
        if std::env::var_os("AAP_HOST").is_none() {
            assert!(result.is_err());
        }
    }

    #[test]
    fn launch_collects_vars_and_wait() {
        let args = parse(&[
            "--action",
            "launch",
            "--template-id",
            "7",
            "--extra-vars",
            r#"{"a":1}"#,
            "--wait",
        ]);
        assert_eq!(
            args.command().unwrap(),
            Command::Launch {
                template_id: 7,
                extra_vars: Some(ExtraVars::parse(r#"{"a":1}"#).unwrap()),
                wait: true,
            }
        );
    }

    #[test]
    fn launch_needs_template_id() {
        let err = parse(&["--action", "launch"]).command().unwrap_err();
        assert_eq!(err.to_string(), "Template ID is required for launch action");
    }

    #[test]
    fn launch_rejects_bad_json() {
        let err = parse(&["--action", "launch", "--template-id", "7", "--extra-vars", "{bad"])
            .command()
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON in extra-vars");
    }

    #[test]
    fn status_and_output_need_job_id() {
        for action in ["status", "output"] {
            let err = parse(&["--action", action]).command().unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Job ID is required for {} action", action)
            );
        }
        assert_eq!(
            parse(&["--action", "output", "--job-id", "3"]).command().unwrap(),
            Command::Output { job_id: 3 }
        );
    }

    #[test]
    fn unknown_action_is_a_usage_error() {
        let result = ArgParser::try_parse_from([
            "aap", "--host", "h", "--username", "u", "--password", "p", "--action", "delete",
        ]);
        assert!(result.is_err());
    }
}
