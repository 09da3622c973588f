//! Command-line surface.

use clap::{Parser, Subcommand};

/// Field client for the incident-alert service.
#[derive(Debug, Parser)]
#[command(name = "alerta", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Authenticate and store the bearer token.
    Login(LoginArgs),
    /// Discard the stored bearer token.
    Logout,
    /// Report a new incident alert.
    Report(ReportArgs),
    /// Refresh and show the alert list.
    List(ListArgs),
    /// Edit fields of an existing alert.
    Edit(EditArgs),
    /// Delete an alert.
    Delete(DeleteArgs),
}

#[derive(Debug, Parser)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Parser)]
pub struct ReportArgs {
    /// Reporter name (5 to 24 characters).
    #[arg(long)]
    pub nome: String,

    /// Incident description (10 to 150 characters).
    #[arg(long)]
    pub descricao: String,

    #[arg(long)]
    pub logradouro: String,

    #[arg(long)]
    pub bairro: String,

    #[arg(long)]
    pub cidade: String,

    #[arg(long)]
    pub estado: String,

    /// Postal code; digits are masked into `00000-000`.
    #[arg(long)]
    pub cep: String,
}

#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Print the raw JSON snapshot instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct EditArgs {
    /// Id of the alert to edit.
    pub id: String,

    #[arg(long)]
    pub nome: Option<String>,

    #[arg(long)]
    pub descricao: Option<String>,

    #[arg(long)]
    pub logradouro: Option<String>,

    #[arg(long)]
    pub bairro: Option<String>,

    #[arg(long)]
    pub cidade: Option<String>,

    #[arg(long)]
    pub estado: Option<String>,

    #[arg(long)]
    pub cep: Option<String>,
}

#[derive(Debug, Parser)]
pub struct DeleteArgs {
    /// Id of the alert to delete.
    pub id: String,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}
