mod arg_parser;
mod client_cli;

use arg_parser::{ArgParser, Command};
use client_cli::ClientCli;

use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    let args = ArgParser::parse();
    setup_logging(args.verbose);

    // reject bad input before any request goes out
    let command = match args.command() {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let client = match ClientCli::connect(&args.credential(), args.request_timeout()).await {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Authentication failed: {}", err);
            process::exit(1);
        }
    };

    match command {
        Command::List => client.list_templates().await,
        Command::Launch {
            template_id,
            extra_vars,
            wait,
        } => {
            let policy = args.poll_policy();
            client
                .launch(template_id, extra_vars.as_ref(), wait.then(|| &policy))
                .await
        }
        Command::Status { job_id } => client.query_status(job_id).await,
        Command::Output { job_id } => client.print_output(job_id).await,
    }
}

fn setup_logging(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug,hyper=info,reqwest=info"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
