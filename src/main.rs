//! chatstack - Entry Point

use chatstack::source::Conversation;
use chatstack::state::AppState;
use chatstack::view_state::{LayoutParams, ScrollPosition, UiMode};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// chatstack - chat viewer with depth-stack scrolling
#[derive(Parser, Debug)]
#[command(name = "chatstack")]
#[command(version)]
#[command(about = "Chat viewer whose message sections scroll as receding depth stacks")]
pub struct Args {
    /// Path to JSONL conversation file (shows a demo conversation if not provided)
    pub file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Interaction mode selecting the spacing table
    #[arg(long, value_parser = parse_ui_mode)]
    pub mode: Option<UiMode>,

    /// Number of item heights a receding item stays visible (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub stack_depth: Option<u32>,

    /// Start at this depth position instead of the newest item
    #[arg(long, allow_negative_numbers = true)]
    pub depth: Option<f64>,

    /// Print the layout pass as JSON and exit instead of starting the TUI
    #[arg(long)]
    pub dump: bool,
}

fn parse_ui_mode(raw: &str) -> Result<UiMode, String> {
    raw.parse::<UiMode>().map_err(|e| e.to_string())
}

impl Args {
    /// Scroll position requested on the command line.
    fn start_position(&self) -> ScrollPosition {
        match self.depth {
            Some(depth) => ScrollPosition::at_depth(depth),
            None => ScrollPosition::Newest,
        }
    }
}

/// Lay out the conversation at `start` and render the visible items as JSON.
fn dump_layout(
    conversation: Conversation,
    params: LayoutParams,
    start: ScrollPosition,
) -> Result<String, serde_json::Error> {
    let mut state = AppState::new(conversation, params);
    state.jump_to(start);
    let pass = state.layout_pass();
    serde_json::to_string_pretty(&pass.rows())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = chatstack::config::load_config_with_precedence(args.config.clone())?;
        let merged = chatstack::config::merge_config(config_file);
        let with_env = chatstack::config::apply_env_overrides(merged);
        chatstack::config::apply_cli_overrides(with_env, args.mode, args.stack_depth)
    };

    chatstack::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let params = config.layout_params()?;
    let mut input_source = chatstack::source::detect_input_source(args.file.clone())?;

    if args.dump {
        let conversation = Conversation::from_messages(input_source.poll());
        println!("{}", dump_layout(conversation, params, args.start_position())?);
        return Ok(());
    }

    chatstack::view::run_with_source(input_source, params, args.start_position())?;

    Ok(())
}
