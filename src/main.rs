mod cli;
mod view;

use sendarr::{
    arr::RadarrClient,
    browser::{Browser, NativeTab, PageSource},
    config::{self, FileStore, SettingsStore},
    notifications::{DesktopNotifier, LogNotifier, NotificationRelay, Notifier},
    options::{OptionsView, SettingsForm},
    popup::{Popup, PopupState, SubmitOutcome},
};
use sendarr_common::RuntimeMessage;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, SaveArgs, SettingsCommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use view::ConsoleView;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "sendarr=trace,sendarr_common=trace".to_string()
        } else {
            "sendarr=warn,sendarr_common=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings_path = config::settings_path(cli.config.as_deref());

    match cli.command {
        Commands::Send {
            url,
            html,
            profile,
            no_notify,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(send(&settings_path, url, html, profile, no_notify))
        }
        Commands::Extract { url, html, json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(extract(url, html, json))
        }
        Commands::Settings(SettingsCommand::Show) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(show_settings(&settings_path))
        }
        Commands::Settings(SettingsCommand::Save(args)) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(save_settings(&settings_path, args))
        }
        Commands::Init => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(init(&settings_path))
        }
        Commands::Check => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(check(&settings_path))
        }
        Commands::Version => {
            println!("sendarr {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Open the settings file, applying install defaults first.
async fn open_store(path: &Path) -> Result<Arc<FileStore>> {
    let store = FileStore::new(path);
    if store.ensure_defaults().await? {
        tracing::info!("Created settings at {}", path.display());
    }
    Ok(Arc::new(store))
}

async fn send(
    settings_path: &Path,
    url: String,
    html: Option<PathBuf>,
    profile: Option<String>,
    no_notify: bool,
) -> Result<ExitCode> {
    let store = open_store(settings_path).await?;

    let notifier: Arc<dyn Notifier> = if no_notify {
        Arc::new(LogNotifier)
    } else {
        Arc::new(DesktopNotifier::discover())
    };
    let (notify_tx, relay) = NotificationRelay::new(notifier).spawn();

    let source = html.map(PageSource::File).unwrap_or(PageSource::Http);
    let browser = Arc::new(NativeTab::new(Some(url), source));

    let mut popup = Popup::new(
        browser,
        store,
        Arc::new(RadarrClient::new()),
        notify_tx,
        ConsoleView,
    );

    let code = if popup.initialise().await != PopupState::Ready {
        ExitCode::from(2)
    } else {
        if let Some(ref profile) = profile {
            if !popup.select_profile(profile) {
                tracing::warn!("Unknown quality profile: {}", profile);
            }
        }

        match popup.submit().await {
            SubmitOutcome::Added(_) => ExitCode::SUCCESS,
            SubmitOutcome::NotReady | SubmitOutcome::NoSelection => ExitCode::from(2),
            SubmitOutcome::Failed(_) => ExitCode::FAILURE,
        }
    };

    // Dropping the popup closes the channel; wait for pending notifications
    drop(popup);
    relay.await.context("Notification relay panicked")?;

    Ok(code)
}

async fn extract(url: String, html: Option<PathBuf>, json: bool) -> Result<ExitCode> {
    let source = html.map(PageSource::File).unwrap_or(PageSource::Http);
    let tab = NativeTab::new(Some(url), source);

    let Some(active) = tab.active_tab().await? else {
        anyhow::bail!("No page to extract from");
    };
    let response = match tab.send_to_tab(active.id, RuntimeMessage::GetImdbMovie).await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("✗ {}", e);
            return Ok(ExitCode::from(2));
        }
    };
    let success = response.success;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        match response.into_result() {
            Ok(movie) => {
                println!("Title: {}", movie.title);
                println!("Year: {}", movie.year.as_deref().unwrap_or("unknown"));
                println!("IMDb: {}", movie.imdb_id);
            }
            Err(reason) => eprintln!("✗ {}", reason),
        }
    }

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

async fn show_settings(settings_path: &Path) -> Result<ExitCode> {
    let store = open_store(settings_path).await?;
    let view = OptionsView::load(store.as_ref()).await?;

    println!("Settings: {}", settings_path.display());
    println!("  Radarr URL: {}", view.manager_url);
    println!(
        "  API key: {}",
        if view.api_key.is_empty() { "" } else { "********" }
    );
    println!("  Root folder: {}", view.root_folder);
    println!("  Quality profiles:");
    for line in view.profiles_text.lines() {
        println!("    {}", line);
    }
    let default = view
        .default_choices
        .iter()
        .find(|c| c.selected)
        .map(|c| format!("{} ({})", c.label, c.value))
        .unwrap_or_else(|| "None".to_string());
    println!("  Default profile: {}", default);

    Ok(ExitCode::SUCCESS)
}

async fn save_settings(settings_path: &Path, args: SaveArgs) -> Result<ExitCode> {
    let profiles_text = match (args.profiles, args.profiles_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read profiles file: {:?}", path))?,
        (None, None) => String::new(),
    };

    let form = SettingsForm {
        manager_url: args.url,
        api_key: args.api_key,
        root_folder: args.root_folder,
        profiles_text,
        default_profile_id: args.default_profile,
    };

    let store = FileStore::new(settings_path);
    match form.save(&store).await {
        Ok(config) => {
            println!("✓ Settings saved.");
            println!("  Radarr URL: {}", config.manager_url);
            println!("  Quality profiles: {}", config.profiles.len());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            Ok(ExitCode::from(2))
        }
    }
}

async fn init(settings_path: &Path) -> Result<ExitCode> {
    let store = FileStore::new(settings_path);
    if store.ensure_defaults().await? {
        println!("Initialized settings: {}", settings_path.display());
    } else {
        println!("Settings already initialized: {}", settings_path.display());
    }
    Ok(ExitCode::SUCCESS)
}

async fn check(settings_path: &Path) -> Result<ExitCode> {
    let store = open_store(settings_path).await?;
    let settings = store.load().await?;

    let Some(connection) = settings.connection() else {
        eprintln!("✗ {}", sendarr_common::Error::ConfigIncomplete);
        return Ok(ExitCode::from(2));
    };
    let connection = connection.normalized();

    println!("Checking {}...", connection.url);
    match RadarrClient::new().test_connection(&connection).await {
        Ok(status) => {
            println!(
                "✓ Connected to {} {}",
                status.app_name.as_deref().unwrap_or("Radarr"),
                status.version.as_deref().unwrap_or("")
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
