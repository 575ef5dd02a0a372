//! DynamoDB infrastructure management commands.

mod error;

pub use error::{DynamodbError, Result};

use authsession_core::schema::{
    calculate_destroy_plan, calculate_provision_plan, format_destroy_plan, format_provision_plan,
    DestroyPlan, ProvisionPlan,
};
use authsession_store::dynamodb::{
    create_client, execute_destroy_plan, execute_provision_plan, get_table_state, DynamoDbConfig,
};
use dialoguer::Confirm;

use crate::prelude::*;

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy the session table.
    Deploy(DeployCommand),
}

/// Deploy or destroy the session table.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy the session DynamoDB table.

By default, this command creates the session table (hash key `key`, plain
attribute `value`, on-demand billing) if it does not exist and waits until it
is active.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  DynamoDBSessionTableName - Default table name (defaults to session_store)
  AWS_ENDPOINT_URL         - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION               - AWS region (defaults to us-east-1)
  AWS_PROFILE              - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the table instead of creating it.
    #[arg(long)]
    pub destroy: bool,

    /// Table name to use.
    #[arg(long, env = "DynamoDBSessionTableName", default_value = "session_store")]
    pub table_name: String,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let config = DynamoDbConfig::from_env().with_table_name(&cmd.table_name);

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), config.target_display());
        aprintln!();
    }

    let client = create_client(&config).await;
    let current_state = get_table_state(&client, &config.table_name).await?;

    if cmd.destroy {
        let plan = calculate_destroy_plan(current_state.as_ref(), &config.table_name);

        if !global.is_silent() {
            aprintln!("{}", p_y("Destroy Plan:"));
            for line in format_destroy_plan(&plan) {
                aprintln!("  {}", p_r(&line));
            }
            aprintln!();
        }

        if matches!(plan, DestroyPlan::AlreadyGone { .. }) {
            if !global.is_silent() {
                aprintln!("{}", p_g("Nothing to destroy."));
            }
            return Ok(());
        }

        confirm(
            cmd.force,
            "Are you sure you want to delete this table? ALL SESSIONS WILL BE LOST",
            false,
        )?;

        if !global.is_silent() {
            aprintln!("{}", p_b("Deleting table..."));
        }

        execute_destroy_plan(&client, &plan).await?;

        if !global.is_silent() {
            aprintln!("{}", p_g("Table destroyed successfully."));
        }
    } else {
        let plan = calculate_provision_plan(current_state.as_ref(), &config.schema());

        if !global.is_silent() {
            aprintln!("{}", p_c("Deploy Plan:"));
            for line in format_provision_plan(&plan) {
                if line.starts_with('+') {
                    aprintln!("  {}", p_g(&line));
                } else if line.starts_with('!') {
                    aprintln!("  {}", p_r(&line));
                } else if line.starts_with('~') {
                    aprintln!("  {}", p_y(&line));
                } else {
                    aprintln!("  {}", line);
                }
            }
            aprintln!();
        }

        if matches!(plan, ProvisionPlan::Ready { .. }) {
            if !global.is_silent() {
                aprintln!("{}", p_g("Infrastructure is up to date."));
            }
            return Ok(());
        }

        if matches!(plan, ProvisionPlan::CreateTable { .. }) {
            confirm(cmd.force, "Apply these changes?", true)?;
        }

        if !global.is_silent() {
            aprintln!("{}", p_b("Applying changes..."));
        }

        execute_provision_plan(&client, &plan, &config.activation).await?;

        if !global.is_silent() {
            aprintln!("{}", p_g("Infrastructure deployed successfully."));
        }
    }

    Ok(())
}

fn confirm(force: bool, prompt: &str, default: bool) -> Result<()> {
    if force {
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| DynamodbError::Prompt(e.to_string()))?;

    if confirmed {
        Ok(())
    } else {
        Err(DynamodbError::UserCancelled)
    }
}
