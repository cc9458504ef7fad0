//! CLI front end for seiun.
//!
//! Binds the client core the way a screen would: one [`FeedViewModel`] per
//! feed command, paging with `load_more` and re-authenticating once when the
//! session has expired.
//!
//! ```ignore
//! use seiun::cli::{parse_args, run_cli_command};
//! use seiun::config::Config;
//!
//! let command = parse_args(std::env::args());
//! run_cli_command(command, &Config::from_env()).await?;
//! ```

pub mod args;
pub mod render;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use version::{version_line, VERSION};

use chrono::Local;
use color_eyre::eyre::{bail, eyre};
use color_eyre::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::adapters::{FileStore, ReqwestHttpClient};
use crate::auth::{Authenticator, RegistrationParams, SessionManager};
use crate::config::Config;
use crate::feed::{FeedRepository, FeedSource, NotificationSource, TimelineSource};
use crate::traits::{HttpClient, KeyValueStore};
use crate::viewmodel::{FeedViewModel, LoadOutcome};

/// Everything a command needs, wired from the config.
struct Context {
    config: Config,
    http: Arc<dyn HttpClient>,
    auth: Authenticator,
}

impl Context {
    fn new(config: &Config) -> Result<Self> {
        let http: Arc<dyn HttpClient> =
            Arc::new(ReqwestHttpClient::with_timeout(config.request_timeout)?);

        let store = match &config.data_dir {
            Some(dir) => FileStore::new(dir),
            None => FileStore::in_data_dir()
                .ok_or_else(|| eyre!("Could not determine a data directory; set SEIUN_DATA_DIR"))?,
        };
        debug!("Using data directory {}", store.dir().display());
        let store: Arc<dyn KeyValueStore> = Arc::new(store);

        let sessions = Arc::new(SessionManager::new(store));
        let auth = Authenticator::new(http.clone(), sessions);

        Ok(Self {
            config: config.clone(),
            http,
            auth,
        })
    }

    fn sessions(&self) -> Arc<SessionManager> {
        self.auth.sessions().clone()
    }
}

/// Run a parsed command to completion.
pub async fn run_cli_command(command: CliCommand, config: &Config) -> Result<()> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Ok(())
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::Invalid(message) => bail!("{}\n\n{}", message, USAGE),
        command => {
            let context = Context::new(config)?;
            run_with_context(command, &context).await
        }
    }
}

async fn run_with_context(command: CliCommand, context: &Context) -> Result<()> {
    match command {
        CliCommand::Login {
            handle,
            password,
            host,
        } => {
            let host = host.unwrap_or_else(|| context.config.service_host.clone());
            let session = context
                .auth
                .login(&host, &handle, &password)
                .await
                .map_err(|e| eyre!("Login failed: {}", e.user_message()))?;
            println!("Logged in as {} ({})", session.handle, session.did);
            Ok(())
        }
        CliCommand::Register {
            email,
            handle,
            password,
            invite,
            host,
        } => {
            let host = host.unwrap_or_else(|| context.config.service_host.clone());
            let mut params = RegistrationParams::new(host, email, handle, password);
            if let Some(code) = invite {
                params = params.with_invite_code(code);
            }
            let session = context
                .auth
                .register(&params)
                .await
                .map_err(|e| eyre!("Registration failed: {}", e.user_message()))?;
            println!("Registered {} ({})", session.handle, session.did);
            Ok(())
        }
        CliCommand::Notifications { pages } => {
            require_session(context).await?;
            let source = NotificationSource::new(context.http.clone(), context.sessions());
            print_feed(context, source, pages, |n| render::render_notification(n, &Local)).await
        }
        CliCommand::Timeline { pages } => {
            require_session(context).await?;
            let source = TimelineSource::new(context.http.clone(), context.sessions());
            print_feed(context, source, pages, |p| {
                Some(render::render_post(p, &Local))
            })
            .await
        }
        CliCommand::Logout => {
            context.auth.logout().await?;
            println!("Logged out");
            Ok(())
        }
        CliCommand::Version | CliCommand::Help | CliCommand::Invalid(_) => Ok(()),
    }
}

async fn require_session(context: &Context) -> Result<()> {
    if context.sessions().restore().await.is_none() {
        bail!("Not logged in. Run `seiun login <handle> <password>` first.");
    }
    Ok(())
}

/// Load up to `pages` pages through a view model and print new items as
/// they arrive.
async fn print_feed<S, F>(context: &Context, source: S, pages: u32, render: F) -> Result<()>
where
    S: FeedSource,
    F: Fn(&S::Item) -> Option<String>,
{
    let repository = FeedRepository::with_limit(source, context.config.page_limit);
    let view_model = FeedViewModel::new(repository, context.config.request_timeout);
    view_model.set_error_handler(|err| {
        debug!("Feed error [{}]: {}", err.error_code(), err);
    });

    let mut printed = 0;
    let mut reauthenticated = false;
    let mut loaded = 0;

    while loaded < pages {
        let outcome = view_model.load_more().await;

        let outcome = if outcome.requires_reauth() && !reauthenticated {
            reauthenticated = true;
            info!("Session expired, signing in again");
            context
                .auth
                .reauthenticate()
                .await
                .map_err(|e| eyre!("Could not renew the session: {}", e.user_message()))?;
            view_model.retry().await
        } else {
            outcome
        };

        match outcome {
            LoadOutcome::Loaded { exhausted, .. } => {
                let snapshot = view_model.snapshot();
                for item in &snapshot.items[printed..] {
                    if let Some(line) = render(item) {
                        println!("{}", line);
                    }
                }
                printed = snapshot.items.len();
                loaded += 1;
                if exhausted {
                    break;
                }
            }
            LoadOutcome::Exhausted | LoadOutcome::Disposed => break,
            LoadOutcome::Busy => continue,
            LoadOutcome::Failed(err) => {
                bail!("{} ({})", err.user_message(), err.error_code());
            }
        }
    }

    if printed == 0 {
        println!("Nothing to show.");
    }
    view_model.dispose();
    Ok(())
}
