//! Command implementations: the glue the screens provided in the field
//! app. Each flow is validate → auth gate → sync client → reconciler
//! refresh, and each failure is translated into a user-facing message at
//! this boundary, never swallowed and never retried automatically.

use std::io::Write;
use std::sync::Arc;

use alerta_core::{
    ApiError, AuthError, Config, DraftAlert, ListReconciler, SubmitError, SyncClient, TokenStore,
    ValidationErrorSet,
};
use alerta_protocol::{AlertField, AlertRecord};

use crate::cli::{DeleteArgs, EditArgs, ListArgs, LoginArgs, ReportArgs};

/// Error surface of the CLI, mapped to exit codes in `main`.
#[derive(Debug)]
pub enum Error {
    /// Per-field failures; submission never reached the network.
    Validation(ValidationErrorSet),
    Api(ApiError),
    Auth(AuthError),
    Other(anyhow::Error),
}

impl From<ApiError> for Error {
    fn from(e: ApiError) -> Self {
        Error::Api(e)
    }
}

impl From<AuthError> for Error {
    fn from(e: AuthError) -> Self {
        Error::Auth(e)
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Other(e)
    }
}

pub type OpResult = Result<(), Error>;

pub async fn login(config: &Config, args: &LoginArgs) -> OpResult {
    let client = SyncClient::new(config);
    let token = client.login(&args.email, &args.password).await?;

    let mut store = TokenStore::load(&config.home)?;
    store.set_token(token);
    store.save(&config.home)?;
    println!("Login efetuado!");
    Ok(())
}

pub async fn logout(config: &Config) -> OpResult {
    let mut store = TokenStore::load(&config.home)?;
    store.clear();
    store.save(&config.home)?;
    println!("Sessão encerrada.");
    Ok(())
}

pub async fn report(config: &Config, args: &ReportArgs) -> OpResult {
    let mut draft = DraftAlert::new();
    draft.set(AlertField::Nome, &args.nome);
    draft.set(AlertField::Descricao, &args.descricao);
    draft.set(AlertField::Logradouro, &args.logradouro);
    draft.set(AlertField::Bairro, &args.bairro);
    draft.set(AlertField::Cidade, &args.cidade);
    draft.set(AlertField::Estado, &args.estado);
    draft.set(AlertField::Cep, &args.cep);

    let payload = submit(&mut draft)?;

    let client = SyncClient::new(config);
    match client.create(&payload).await {
        Ok(created) => {
            let _ = draft.resolve_success(created.clone());
            match created.id {
                Some(id) => println!("Denúncia enviada! (id {id})"),
                None => println!("Denúncia enviada!"),
            }
        }
        Err(e) => {
            let _ = draft.resolve_failure();
            return Err(e.into());
        }
    }

    refresh_and_render(client, false).await
}

pub async fn list(config: &Config, args: &ListArgs) -> OpResult {
    let client = SyncClient::new(config);
    refresh_and_render(client, args.json).await
}

pub async fn edit(config: &Config, args: &EditArgs) -> OpResult {
    let client = SyncClient::new(config);

    // The edit flow starts from the server's current view of the record.
    let current = client
        .list()
        .await?
        .into_iter()
        .find(|r| r.id.as_deref() == Some(args.id.as_str()))
        .ok_or_else(|| Error::Other(anyhow::anyhow!("Alerta não encontrado: {}", args.id)))?;

    let mut draft = DraftAlert::edit(current);
    for (field, value) in [
        (AlertField::Nome, &args.nome),
        (AlertField::Descricao, &args.descricao),
        (AlertField::Logradouro, &args.logradouro),
        (AlertField::Bairro, &args.bairro),
        (AlertField::Cidade, &args.cidade),
        (AlertField::Estado, &args.estado),
        (AlertField::Cep, &args.cep),
    ] {
        if let Some(value) = value {
            draft.set(field, value);
        }
    }

    let payload = submit(&mut draft)?;
    match client.update(&args.id, &payload).await {
        Ok(acknowledged) => {
            let _ = draft.resolve_success(acknowledged);
            println!("Alerta atualizado com sucesso!");
        }
        Err(e) => {
            let _ = draft.resolve_failure();
            return Err(e.into());
        }
    }

    refresh_and_render(client, false).await
}

pub async fn delete(config: &Config, args: &DeleteArgs) -> OpResult {
    if !args.yes && !confirm_deletion(&args.id)? {
        println!("Cancelado.");
        return Ok(());
    }

    let client = SyncClient::new(config);
    client.delete(&args.id).await?;
    println!("Alerta deletado!");

    // Refresh regardless of whether the id was in the local snapshot.
    refresh_and_render(client, false).await
}

/// Wholesale validation; a non-empty error set blocks before any
/// network activity.
fn submit(draft: &mut DraftAlert) -> Result<AlertRecord, Error> {
    draft.submit().map_err(|e| match e {
        SubmitError::Invalid => Error::Validation(draft.errors().clone()),
        SubmitError::Lifecycle(l) => Error::Other(anyhow::anyhow!(l)),
    })
}

async fn refresh_and_render(client: SyncClient, json: bool) -> OpResult {
    let reconciler = ListReconciler::new(Arc::new(client));
    reconciler.request_refresh().await?;
    let snapshot = reconciler.snapshot();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(snapshot.as_slice())
                .map_err(|e| Error::Other(e.into()))?
        );
    } else {
        print!("{}", render_snapshot(&snapshot));
    }
    Ok(())
}

/// Text rendering of the snapshot, one block per alert.
fn render_snapshot(records: &[AlertRecord]) -> String {
    if records.is_empty() {
        return "Nenhum alerta encontrado.\n".to_string();
    }
    let mut out = String::new();
    for record in records {
        let id = record.id.as_deref().unwrap_or("-");
        let e = &record.endereco;
        out.push_str(&format!("[{id}] {}\n", record.nome));
        out.push_str(&format!("    {}\n", record.descricao));
        out.push_str(&format!(
            "    {}, {} - {}/{}\n",
            e.logradouro, e.bairro, e.cidade, e.estado
        ));
        out.push_str(&format!("    CEP: {}\n", e.cep));
    }
    out
}

/// Renders the per-field messages the way the form screens did.
pub fn render_validation_errors(errors: &ValidationErrorSet) -> String {
    let mut out = String::new();
    for (field, message) in errors.iter() {
        out.push_str(&format!("{field}: {message}\n"));
    }
    out
}

/// Maps an operational failure to the message the user sees.
pub fn user_message(error: &Error) -> String {
    match error {
        Error::Validation(_) => "Corrija os campos destacados.".to_string(),
        Error::Api(ApiError::NotAuthenticated) => {
            "Usuário não autenticado. Execute `alerta login`.".to_string()
        }
        Error::Api(ApiError::Network(_)) => "Erro de conexão com o servidor.".to_string(),
        Error::Api(ApiError::ServerRejected { status, message }) => {
            format!("Erro do servidor ({status}): {message}")
        }
        Error::Api(ApiError::Parse(e)) => format!("Resposta inesperada do servidor: {e}"),
        Error::Auth(e) => format!("Falha ao acessar credenciais: {e}"),
        Error::Other(e) => format!("Erro: {e}"),
    }
}

fn confirm_deletion(id: &str) -> Result<bool, Error> {
    print!("Deseja realmente deletar o alerta {id}? [s/N] ");
    std::io::stdout()
        .flush()
        .map_err(|e| Error::Other(e.into()))?;
    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .map_err(|e| Error::Other(e.into()))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "s" | "sim"))
}
