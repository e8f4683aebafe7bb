use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use futures::{Stream, StreamExt};
use runtime::{AppConfig, CliArgs, ConfigProvider};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use users_admin::contract::{
    client::UsersApi,
    error::Fault,
    model::{Category, EntryContext},
};
use users_admin::domain::{
    dashboard::Dashboard,
    dialog,
    form::{FormError, UserForm},
    list_view::{DeleteOutcome, ListViewError, PageEvent, UsersListController},
    notify::{BroadcastNotificationSink, Notification, NotificationLevel, NotificationSink},
};
use users_admin::gateways::InterceptedUsersClient;
use users_admin::infra::http::HttpUsersClient;
use users_admin::{UsersAdminConfig, MODULE_NAME};

/// Users Admin - manage the remote user collection
#[derive(Parser)]
#[command(name = "users-admin")]
#[command(about = "Users Admin - list, edit and summarize users of a remote collection")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the collection service (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show active/inactive statistics
    Stats,
    /// Show one page of the user list
    List {
        /// Free-text search over the configured fields
        #[arg(long)]
        search: Option<String>,
        /// Start filtered by status (active | inactive)
        #[arg(long)]
        category: Option<Category>,
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: usize,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Show a single user
    Show { id: String },
    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Create the user as inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Update fields of an existing user
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a user after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        module: MODULE_NAME.to_string(),
        base_url: cli.base_url.clone(),
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.app.home_dir));
    tracing::debug!(home_dir = %config.app.home_dir, "users-admin starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(ExitCode::SUCCESS);
    }

    let module_cfg: UsersAdminConfig = config.module_config(MODULE_NAME)?;

    let sink = Arc::new(BroadcastNotificationSink::new(16));
    let printer = tokio::spawn(print_notifications(sink.subscribe()));

    let command = cli.command.unwrap_or(Commands::Check);
    let result = run_command(command, &config, &module_cfg, sink.clone()).await;

    // Every sender is gone once the command returns, which ends the printer.
    drop(sink);
    let _ = printer.await;

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // Already shown as a notification.
        Err(e) if is_reported_fault(&e) => {
            tracing::debug!(error = %e, "command failed");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e),
    }
}

fn is_reported_fault(err: &anyhow::Error) -> bool {
    err.downcast_ref::<Fault>().is_some()
        || matches!(err.downcast_ref::<FormError>(), Some(FormError::Fault(_)))
        || matches!(err.downcast_ref::<ListViewError>(), Some(ListViewError::Fault(_)))
}

async fn print_notifications(notifications: impl Stream<Item = Notification>) {
    futures::pin_mut!(notifications);
    while let Some(n) = notifications.next().await {
        let tag = match n.level {
            NotificationLevel::Info => "info",
            NotificationLevel::Error => "error",
        };
        eprintln!("[{tag}] {} ({})", n.message, n.action);
    }
}

/// Collection client with fault reporting in front of it.
fn build_api(cfg: &UsersAdminConfig, sink: Arc<dyn NotificationSink>) -> Result<Arc<dyn UsersApi>> {
    let http = HttpUsersClient::from_config(cfg).context("Failed to build collection client")?;
    Ok(Arc::new(InterceptedUsersClient::new(
        Arc::new(http),
        sink,
        cfg.notifications.clone(),
    )))
}

async fn run_command(
    command: Commands,
    config: &AppConfig,
    cfg: &UsersAdminConfig,
    sink: Arc<dyn NotificationSink>,
) -> Result<()> {
    let api = || build_api(cfg, sink.clone());

    match command {
        Commands::Check => check_config(config, cfg),
        Commands::Stats => {
            let dashboard = Dashboard::load(api()?.as_ref(), cfg.labels.clone()).await?;
            let stats = &dashboard.stats;
            print_json(&serde_json::json!({
                "total": stats.total,
                "active": stats.active,
                "inactive": stats.inactive,
                "active_percentage": stats.active_percentage(),
                "inactive_percentage": stats.inactive_percentage(),
                "chart": {
                    "labels": dashboard.chart_labels(),
                    "data": stats.chart_data(),
                },
            }))
        }
        Commands::List {
            search,
            category,
            page,
            page_size,
        } => {
            let mut controller =
                UsersListController::new(api()?, sink.clone(), cfg, EntryContext { category });
            controller.refresh().await?;

            if let Some(term) = search {
                if let Some(input) = controller.search_input() {
                    input.send(term);
                }
                controller.close_input();
                controller.next_search().await;
            }

            let size = page_size.unwrap_or(controller.view().window().size);
            controller.change_page(PageEvent {
                page_index: 0,
                page_size: size,
            })?;
            controller.change_page(PageEvent {
                page_index: page,
                page_size: size,
            })?;
            print_json(&controller.view().page())
        }
        Commands::Show { id } => print_json(&api()?.get(&id).await?),
        Commands::Create {
            name,
            email,
            username,
            phone,
            inactive,
        } => {
            let form = UserForm {
                name,
                email,
                username: username.unwrap_or_default(),
                phone: phone.unwrap_or_default(),
                active: !inactive,
                ..Default::default()
            };
            let saved = form
                .save(api()?.as_ref(), sink.as_ref(), &cfg.notifications)
                .await?;
            print_json(&saved)
        }
        Commands::Update {
            id,
            name,
            email,
            username,
            phone,
            active,
        } => {
            let api = api()?;
            let mut form = UserForm::load(api.as_ref(), &id).await?;
            if let Some(v) = name {
                form.name = v;
            }
            if let Some(v) = email {
                form.email = v;
            }
            if let Some(v) = username {
                form.username = v;
            }
            if let Some(v) = phone {
                form.phone = v;
            }
            if let Some(v) = active {
                form.active = v;
            }
            let saved = form
                .save(api.as_ref(), sink.as_ref(), &cfg.notifications)
                .await?;
            print_json(&saved)
        }
        Commands::Delete { id, yes } => {
            let mut controller =
                UsersListController::new(api()?, sink.clone(), cfg, EntryContext::default());
            controller.refresh().await?;
            let user = controller
                .details(&id)
                .cloned()
                .ok_or_else(|| anyhow!("No user with id {id}"))?;

            let (handle, confirmation) = dialog::open::<bool>();
            if yes {
                handle.close(true);
            } else {
                let (title, message) = dialog::delete_confirmation(&user.name);
                tokio::task::spawn_blocking(move || {
                    if let Some(answer) = prompt(&title, &message) {
                        handle.close(answer);
                    }
                });
            }

            match controller.delete(&user, confirmation).await? {
                DeleteOutcome::Deleted => println!("Deleted user {id}"),
                DeleteOutcome::Cancelled => println!("Delete cancelled"),
                DeleteOutcome::Skipped => println!("Nothing to delete"),
            }
            Ok(())
        }
    }
}

/// Ask a yes/no question on the terminal; `None` when stdin is closed.
fn prompt(title: &str, message: &str) -> Option<bool> {
    let mut stderr = std::io::stderr();
    let _ = write!(stderr, "{title}\n{message} [y/N] ");
    let _ = stderr.flush();

    let mut line = String::new();
    match std::io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(matches!(line.trim(), "y" | "Y" | "yes" | "s" | "sim")),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn check_config(config: &AppConfig, cfg: &UsersAdminConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    HttpUsersClient::from_config(cfg).context("Invalid users_admin configuration")?;
    if !cfg.page_size_options.contains(&cfg.default_page_size) {
        return Err(anyhow!(
            "default_page_size {} is not one of {:?}",
            cfg.default_page_size,
            cfg.page_size_options
        ));
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
