//! Nimbus - typed AWS clients from the command line
//!
//! Every command prints its result as pretty JSON on stdout; logs go to
//! stderr.

mod commands;
mod config;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "nimbus", version)]
#[command(about = "Query CloudFormation, DynamoDB and SQS", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// AWS region
    #[arg(long, global = true, env = "NIMBUS_REGION")]
    pub region: Option<String>,

    /// Endpoint URL overriding the regional one
    #[arg(long, global = true, env = "NIMBUS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn", env = "NIMBUS_LOG_LEVEL")]
    pub log_level: String,

    /// Fetch pages one at a time, only when needed
    #[arg(long, global = true)]
    pub no_prefetch: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// CloudFormation stacks
    #[command(subcommand)]
    Cloudformation(CloudFormationCommand),

    /// DynamoDB tables
    #[command(subcommand)]
    Dynamodb(DynamoDbCommand),

    /// SQS queues
    #[command(subcommand)]
    Sqs(SqsCommand),
}

#[derive(Subcommand, Debug)]
pub enum CloudFormationCommand {
    DescribeStacks {
        #[arg(long)]
        stack_name: Option<String>,

        /// Follow every page instead of printing the first
        #[arg(long)]
        all: bool,
    },
    ListStacks {
        /// Only stacks in this status; repeatable
        #[arg(long = "status", value_name = "STATUS")]
        statuses: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DynamoDbCommand {
    ListTables,
    DescribeTable {
        #[arg(long)]
        table_name: String,
    },
    /// Every item of the table
    Scan {
        #[arg(long)]
        table_name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SqsCommand {
    ListQueues {
        #[arg(long)]
        prefix: Option<String>,
    },
    DeleteQueue {
        #[arg(long)]
        queue_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("nimbus={}", cli.global.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::client_config(&cli.global)?;
    info!(region = %config.region, endpoint = ?config.endpoint, "Loaded configuration");

    let output = commands::run(cli.command, config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "nimbus",
            "dynamodb",
            "scan",
            "--table-name",
            "Thread",
            "--region",
            "eu-west-1",
            "--no-prefetch",
        ])
        .unwrap();

        assert_eq!(cli.global.region.as_deref(), Some("eu-west-1"));
        assert!(cli.global.no_prefetch);
        assert!(matches!(
            cli.command,
            Command::Dynamodb(DynamoDbCommand::Scan { ref table_name }) if table_name == "Thread"
        ));
    }

    #[test]
    fn test_repeated_status_filter() {
        let cli = Cli::try_parse_from([
            "nimbus",
            "cloudformation",
            "list-stacks",
            "--status",
            "CREATE_COMPLETE",
            "--status",
            "DELETE_FAILED",
        ])
        .unwrap();

        let Command::Cloudformation(CloudFormationCommand::ListStacks { statuses }) = cli.command
        else {
            panic!("expected list-stacks");
        };
        assert_eq!(statuses, vec!["CREATE_COMPLETE", "DELETE_FAILED"]);
    }

    #[test]
    fn test_required_argument() {
        assert!(Cli::try_parse_from(["nimbus", "sqs", "delete-queue"]).is_err());
    }
}
