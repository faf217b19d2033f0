//! Solace terminal entry point.
//!
//! Wires the session core to a line-based terminal front-end: a single UI
//! loop drains the dispatch channel and applies events, while stdin lines
//! become sends, connects, and breathing toggles.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use solace::breathing::BreathingTimer;
use solace::cli_output::TerminalRenderer;
use solace::config::{self, ProviderKind, QUICK_PROMPTS};
use solace::models::MessageRole;
use solace::render::Renderer;
use solace::session::{ConnectionState, SessionOrchestrator, USER_NAME};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--version") {
        println!("solace {VERSION}");
        return Ok(());
    }

    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("solace=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut orchestrator = SessionOrchestrator::new();
    let mut events = orchestrator
        .take_events()
        .ok_or_else(|| eyre!("UI event channel already taken"))?;
    let breathing = BreathingTimer::new(orchestrator.dispatch());
    let mut renderer = TerminalRenderer::new();

    print_welcome();

    // Auto-connect when a key is already in the environment.
    if let Some((provider, key)) = config::provider_from_env() {
        println!("Found {} API key in environment, connecting…", provider.label());
        orchestrator.connect(provider, &key)?;
    } else {
        println!("No API key found. Use /connect to get started.");
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                let was_connected = orchestrator.state() == ConnectionState::Connected;
                orchestrator.apply(event, &mut renderer);
                if !was_connected && orchestrator.state() == ConnectionState::Connected {
                    println!("● Connected");
                    // Elicit the opening message once per fresh session.
                    if orchestrator.transcript().is_empty() {
                        if let Err(e) = orchestrator.send_greeting() {
                            eprintln!("{e}");
                        }
                    }
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(&mut orchestrator, &breathing, &mut renderer, line.trim()) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn print_welcome() {
    println!();
    println!("✦ Solace — here for you");
    println!("{}", "═".repeat(60));
    println!("Commands: /connect [openai|openrouter], /breathe, /help, /quit");
    println!("Quick starts:");
    for (i, prompt) in QUICK_PROMPTS.iter().enumerate() {
        println!("  {}. {prompt}", i + 1);
    }
    println!("⚠ Crisis? Call/text 988");
    println!("{}", "═".repeat(60));
}

/// Handle one line of input. Returns false when the app should exit.
fn handle_line(
    orchestrator: &mut SessionOrchestrator,
    breathing: &BreathingTimer,
    renderer: &mut TerminalRenderer,
    line: &str,
) -> bool {
    match line {
        "" => {}
        "/quit" | "/exit" => return false,
        "/help" => print_welcome(),
        "/breathe" => {
            if breathing.is_running() {
                breathing.stop();
            } else {
                breathing.start();
            }
        }
        _ if line.starts_with("/connect") => {
            let provider = line
                .strip_prefix("/connect")
                .and_then(|rest| ProviderKind::parse(rest))
                .unwrap_or(ProviderKind::OpenRouter);
            match rpassword::prompt_password(format!("{} API key: ", provider.label())) {
                Ok(key) => {
                    if let Err(e) = orchestrator.connect(provider, &key) {
                        eprintln!("{e}");
                    }
                }
                Err(e) => eprintln!("could not read key: {e}"),
            }
        }
        _ => {
            // Bare 1-6 selects a quick prompt.
            let text = match line.parse::<usize>() {
                Ok(n) if (1..=QUICK_PROMPTS.len()).contains(&n) => QUICK_PROMPTS[n - 1],
                _ => line,
            };
            match orchestrator.send(text) {
                Ok(()) => renderer.render_message(MessageRole::User, USER_NAME, text),
                Err(e) => eprintln!("{e}"),
            }
        }
    }
    true
}
