//! Lark Notice CLI
//!
//! Renders build notices locally, without sending anything.
//!
//! ## Commands
//!
//! - `render`: print the message body of an event for one robot type
//! - `draft`: print the card draft of an event as JSON
//! - `preview`: print every notice the configured robots would receive
//! - `validate`: check a config file

use std::io::Read;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    bail,
    Context,
    Result,
};
use chrono::TimeDelta;
use clap::{
    Parser,
    Subcommand,
};
use lark_notice_api::RobotProfile;
use lark_notice_core::config::ConfigValidator;
use lark_notice_core::logging;
use lark_notice_core::{
    render,
    to_outbound_draft,
    BuildEvent,
    ConfigLoader,
    NoticeConfig,
    Notifier,
    RobotRegistry,
};

#[derive(Parser)]
#[command(name = "lark-notice")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render Jenkins build notices for Lark and DingTalk robots", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the message body for one robot type
    Render {
        /// Build event JSON file, or "-" for stdin
        #[arg(short, long)]
        event: PathBuf,

        /// Robot type id or alias (lark, feishu, ding_talk, dingtalk)
        #[arg(short, long, default_value = "lark")]
        robot: String,

        /// Elapsed build time in milliseconds, overrides the event duration
        #[arg(long)]
        elapsed_ms: Option<i64>,
    },

    /// Print the card draft (kind, status, buttons, title) as JSON
    Draft {
        /// Build event JSON file, or "-" for stdin
        #[arg(short, long)]
        event: PathBuf,
    },

    /// Print the notices every configured robot would receive, as JSON
    Preview {
        /// Build event JSON file, or "-" for stdin
        #[arg(short, long)]
        event: PathBuf,

        /// Config file (default: discovered)
        #[arg(short, long, env = "LARK_NOTICE_CONFIG_PATH")]
        config: Option<PathBuf>,

        /// Elapsed build time in milliseconds, overrides the event duration
        #[arg(long)]
        elapsed_ms: Option<i64>,
    },

    /// Validate a config file
    Validate {
        /// Config file (default: discovered)
        #[arg(short, long, env = "LARK_NOTICE_CONFIG_PATH")]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.command {
        Commands::Preview { config, .. } | Commands::Validate { config } => Some(
            config
                .clone()
                .unwrap_or_else(ConfigLoader::discover_config_path),
        ),
        _ => None,
    };

    let raw_config = config_path.as_deref().map(read_raw_config).transpose()?;

    let log_filter = logging::select_filter(
        cli.verbose,
        raw_config.as_ref().map(|c| c.general.log_filter.as_str()),
    );
    logging::init_with_filter(log_filter);

    let registry = RobotRegistry::with_builtin();

    match cli.command {
        Commands::Render {
            event,
            robot,
            elapsed_ms,
        } => {
            let event = with_elapsed(read_event(&event)?, elapsed_ms);
            let profile = resolve_robot(&registry, &robot)?;
            tracing::debug!(robot = profile.id(), "Rendering event");
            println!("{}", render(&event, profile));
        }
        Commands::Draft { event } => {
            let event = read_event(&event)?;
            let draft = to_outbound_draft(&event);
            println!("{}", serde_json::to_string_pretty(&draft)?);
        }
        Commands::Preview {
            event, elapsed_ms, ..
        } => {
            let event = with_elapsed(read_event(&event)?, elapsed_ms);
            let path = config_path.context("Config path not resolved")?;
            let config = ConfigLoader::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;

            let notifier = Notifier::new(config, registry);
            let notices = notifier.prepare(&event)?;
            println!("{}", serde_json::to_string_pretty(&notices)?);
        }
        Commands::Validate { .. } => {
            let path = config_path.context("Config path not resolved")?;
            let raw = raw_config.context("Config not loaded")?;

            let result = ConfigValidator::validate(&raw, &registry);
            for warning in &result.warnings {
                println!("warning: {}", warning);
            }
            for error in &result.errors {
                println!("error: {}", error);
            }

            ConfigLoader::load(&path)
                .with_context(|| format!("Failed to resolve config {}", path.display()))?;

            if !result.is_ok() {
                bail!("{}: {}", path.display(), result.summary());
            }
            println!("{}: {}", path.display(), result.summary());
        }
    }

    Ok(())
}

fn resolve_robot<'a>(registry: &'a RobotRegistry, robot: &str) -> Result<&'a dyn RobotProfile> {
    registry.resolve(robot).with_context(|| {
        format!(
            "Unknown robot type '{}', expected one of: {}",
            robot,
            registry.robot_ids().join(", ")
        )
    })
}

fn with_elapsed(event: BuildEvent, elapsed_ms: Option<i64>) -> BuildEvent {
    match elapsed_ms {
        Some(ms) => event.with_elapsed(TimeDelta::milliseconds(ms)),
        None => event,
    }
}

fn read_raw_config(path: &Path) -> Result<NoticeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    ConfigLoader::parse_raw(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))
}

fn read_event(path: &Path) -> Result<BuildEvent> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read event from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event {}", path.display()))?
    };

    BuildEvent::from_json(&content).context("Failed to parse build event JSON")
}
