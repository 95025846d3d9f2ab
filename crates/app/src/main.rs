//! `edudash` — query the access-control core from the command line.
//!
//! ```text
//! edudash resolve 2 firstName --role principal
//! edudash view 2 --role teacher
//! edudash menu --role municipality-admin
//! edudash explain school-admin --role orgadmin
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use edudash_app::{AccessContext, AppConfig};
use edudash_auth::Role;
use edudash_core::SubjectId;

#[derive(Parser, Debug)]
#[command(name = "edudash", about = "Role and privacy checks for the education dashboard")]
struct Cli {
    /// Caller role; the configured fallback applies when omitted.
    #[arg(long, global = true)]
    role: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one field of a protected subject as the caller may see it.
    Resolve { subject: SubjectId, field: String },
    /// Print every field of a protected subject as JSON (`null` if unprotected).
    View { subject: SubjectId },
    /// List the administrative screens the caller may open.
    Menu,
    /// Explain whether the caller satisfies a required role.
    Explain { required: Role },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env().context("reading configuration")?;
    edudash_observability::tracing::init(config.log_format);

    let ctx = AccessContext::from_config(&config).context("loading protected subjects")?;
    let role = cli.role.as_deref();

    match cli.command {
        Command::Resolve { subject, field } => {
            if !ctx.guard().is_protected(subject) {
                tracing::info!(subject = %subject, "subject is not protected");
            }
            println!("{}", ctx.resolve_named_field(subject, &field, role));
        }
        Command::View { subject } => {
            println!("{}", ctx.view_json(subject, role)?);
        }
        Command::Menu => {
            for feature in ctx.menu(role) {
                println!("{}", feature);
            }
        }
        Command::Explain { required } => {
            let explanation = ctx.explain(role, required);
            println!("{}", serde_json::to_string_pretty(&explanation)?);
        }
    }

    Ok(())
}
