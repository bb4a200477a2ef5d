//! MotionFlow command-line entry point.

mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{CliArgs, Command, ThemeAction};
use motionflow::adapters::ai::{LlmTextRefiner, OpenAIConfig, OpenAIProvider};
use motionflow::adapters::document::PulldownExportService;
use motionflow::adapters::storage::FileDraftStorage;
use motionflow::application::{ProposalSession, RefinementService};
use motionflow::config::AppConfig;
use motionflow::domain::proposal::{Theme, PROJECT_TYPES};
use motionflow::ports::DocumentExportService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    init_tracing(&config.log_level);

    let mut session = open_session(&config).await;
    run(args.command, &mut session).await
}

/// Logs go to stderr so command output on stdout stays pipeable.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn open_session(config: &AppConfig) -> ProposalSession {
    let storage = Arc::new(FileDraftStorage::new(&config.storage.data_dir));

    let exporter = PulldownExportService::new()
        .with_pdf_engine(config.export.pdf_engine.clone())
        .with_pdf_timeout(config.export.pdf_timeout_secs);

    ProposalSession::restore(storage, Arc::new(exporter), refinement_service(config)).await
}

fn refinement_service(config: &AppConfig) -> RefinementService {
    let Some(api_key) = config.ai.api_key.as_ref().filter(|_| config.ai.has_api_key()) else {
        tracing::debug!("no AI api key configured; refinement disabled");
        return RefinementService::unconfigured();
    };

    let mut provider_config = OpenAIConfig::new(api_key.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_model(config.ai.model.clone());
    if let Some(timeout) = config.ai.timeout() {
        provider_config = provider_config.with_timeout(timeout);
    }

    match OpenAIProvider::new(provider_config) {
        Ok(provider) => RefinementService::new(Arc::new(LlmTextRefiner::new(Arc::new(provider)))),
        Err(e) => {
            tracing::warn!(error = %e, "AI provider unavailable; refinement disabled");
            RefinementService::unconfigured()
        }
    }
}

async fn run(command: Command, session: &mut ProposalSession) -> anyhow::Result<()> {
    match command {
        Command::Show { style, json } => {
            session.set_style(style);
            let document = session.preview();
            if json {
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else {
                print!("{}", PulldownExportService::new().to_markdown(&document));
            }
        }
        Command::Set { field, value } => {
            session.set_text(field, value).await?;
        }
        Command::AddItem { list } => {
            session.add_item(list).await?;
            println!("{} now has {} items", list, session.record().list(list).len());
        }
        Command::SetItem { list, index, value } => {
            session.set_list_item(list, index, value).await?;
        }
        Command::RemoveItem { list, index } => {
            session.remove_item(list, index).await?;
        }
        Command::Refine { field } => {
            let value = session.refine_field(field).await?;
            println!("{}", value);
        }
        Command::SuggestScope { append } => {
            let count = session.suggest_scope(append).await?;
            if count == 0 {
                eprintln!("No suggestions; scope unchanged");
            }
            for item in &session.record().scope {
                println!("- {}", item);
            }
        }
        Command::Reset => {
            session.reset().await?;
            println!("Proposal reset");
        }
        Command::Theme { action } => {
            let theme = match action {
                None => session.theme(),
                Some(ThemeAction::Toggle) => session.toggle_theme().await?,
                Some(ThemeAction::Light) => set_theme(session, Theme::Light).await?,
                Some(ThemeAction::Dark) => set_theme(session, Theme::Dark).await?,
            };
            println!("{}", theme);
        }
        Command::Export {
            style,
            format,
            output,
        } => {
            session.set_style(style);
            let exported = session.export(format).await?;
            let path = output.unwrap_or_else(|| exported.filename.clone().into());
            tokio::fs::write(&path, &exported.content)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "{} ({} bytes, sha256 {})",
                path.display(),
                exported.size_bytes(),
                exported.checksum
            );
        }
        Command::ProjectTypes => {
            for project_type in PROJECT_TYPES {
                println!("{}", project_type);
            }
        }
    }

    Ok(())
}

async fn set_theme(session: &mut ProposalSession, theme: Theme) -> anyhow::Result<Theme> {
    session.set_theme(theme).await?;
    Ok(theme)
}
