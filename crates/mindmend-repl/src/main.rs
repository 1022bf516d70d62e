use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::Editor;
use rustyline::{Context, Helper};
use tracing_subscriber::EnvFilter;

use mindmend_application::{ChatService, JournalService};
use mindmend_core::{
    BreathPhase, BreathingEngine, BreathingPattern, Notification, Notifier, SessionManager,
    Severity, TokioClock, MEDITATION_LIBRARY,
};
use mindmend_infrastructure::{
    JsonFileStore, JsonJournalRepository, MindmendPaths, SecretFileService,
};
use mindmend_interaction::GeminiClient;

type Repl = Editor<CliHelper, DefaultHistory>;

const COMMANDS: &[&str] = &[
    "/login",
    "/signup",
    "/logout",
    "/whoami",
    "/breathe",
    "/stop",
    "/pattern",
    "/chat",
    "/journal",
    "/meditations",
    "/help",
];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Notifier that renders notifications as colored console lines, standing in
/// for the toasts of the original UI.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => println!(
                "{} {}",
                notification.title.bright_green().bold(),
                notification.description
            ),
            Severity::Destructive => println!(
                "{} {}",
                notification.title.bright_red().bold(),
                notification.description.red()
            ),
        }
    }
}

struct App {
    sessions: SessionManager,
    engine: BreathingEngine,
    journal: JournalService,
    chat: Option<ChatService>,
}

/// The main entry point for the MindMend REPL application.
///
/// Sets up a rustyline-based REPL that:
/// 1. Wires the file-backed stores under ~/.config/mindmend/
/// 2. Restores a persisted session, if any
/// 3. Provides command completion for the / commands
/// 4. Drives the session manager, breathing engine, journal, and chat
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // ===== Backend Initialization =====
    let paths = MindmendPaths::new()?;
    paths.ensure_secret_file()?;

    let notifier = Arc::new(ConsoleNotifier);
    let clock = Arc::new(TokioClock);
    let store = Arc::new(JsonFileStore::open(paths.storage_file())?);
    let repository = Arc::new(JsonJournalRepository::open(paths.journal_dir())?);
    let secrets = SecretFileService::with_path(paths.secret_file());

    let sessions = SessionManager::new(store, notifier.clone(), clock.clone());
    let engine = BreathingEngine::new(clock);
    let journal = JournalService::new(repository, notifier.clone());

    // Chat stays disabled until a Gemini API key is configured.
    let chat = match GeminiClient::from_secrets(&secrets).await {
        Ok(client) => Some(ChatService::new(Arc::new(client), notifier.clone())),
        Err(err) => {
            tracing::warn!(error = %err, "chat disabled");
            None
        }
    };

    let app = App {
        sessions,
        engine,
        journal,
        chat,
    };

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== MindMend ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();

    if let Some(session) = app.sessions.restore().await? {
        println!(
            "{}",
            format!("Welcome back, {}!", session.name).bright_green()
        );
    }

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    app.engine.stop();
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if let Err(err) = handle_command(&app, &mut rl, trimmed).await {
                    eprintln!("{}", format!("Error: {}", err).red());
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                app.engine.stop();
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

async fn handle_command(app: &App, rl: &mut Repl, input: &str) -> Result<()> {
    let mut parts = input.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match command {
        "/help" => print_help(),
        "/login" => match args.as_slice() {
            [email, password] => {
                let _ = app.sessions.login(email, password).await;
            }
            _ => println!("{}", "Usage: /login <email> <password>".bright_black()),
        },
        "/signup" => match args.as_slice() {
            [email, password, name @ ..] if !name.is_empty() => {
                let _ = app.sessions.signup(email, password, &name.join(" ")).await;
            }
            _ => println!(
                "{}",
                "Usage: /signup <email> <password> <name>".bright_black()
            ),
        },
        "/logout" => {
            app.sessions.logout().await;
        }
        "/whoami" => match app.sessions.current_session().await {
            Some(session) => println!(
                "{} {}",
                session.name.bright_green(),
                format!("<{}>", session.email).bright_black()
            ),
            None => println!("{}", "Not logged in.".bright_black()),
        },
        "/pattern" => handle_pattern(app, &args)?,
        "/breathe" => handle_breathe(app)?,
        "/stop" => {
            app.engine.stop();
            println!("{}", BreathPhase::Idle.instruction().bright_blue());
        }
        "/chat" => handle_chat(app, &args).await?,
        "/journal" => handle_journal(app, rl, &args).await?,
        "/meditations" => print_meditations(),
        _ => println!("{}", "Unknown command".bright_black()),
    }

    Ok(())
}

fn handle_pattern(app: &App, args: &[&str]) -> Result<()> {
    match args {
        [] => {
            let pattern = app.engine.pattern();
            println!(
                "Breathing pattern: {}",
                format!(
                    "{}-{}-{}",
                    pattern.inhale_secs, pattern.hold_secs, pattern.exhale_secs
                )
                .bright_cyan()
            );
        }
        [inhale, hold, exhale] => {
            let parse = |value: &str| value.parse::<u64>().ok();
            match (parse(inhale), parse(hold), parse(exhale)) {
                (Some(inhale), Some(hold), Some(exhale)) => {
                    let pattern = BreathingPattern::new(inhale, hold, exhale)?;
                    app.engine.set_pattern(pattern)?;
                    println!("{}", "Pattern updated.".bright_green());
                }
                _ => println!("{}", "Durations must be whole seconds.".bright_black()),
            }
        }
        _ => println!(
            "{}",
            "Usage: /pattern [<inhale> <hold> <exhale>]".bright_black()
        ),
    }
    Ok(())
}

fn handle_breathe(app: &App) -> Result<()> {
    app.engine.start()?;

    // Print phase instructions as they happen, until the engine goes idle.
    let mut rx = app.engine.subscribe();
    tokio::spawn(async move {
        loop {
            let phase = *rx.borrow_and_update();
            if phase != BreathPhase::Idle {
                println!("{}", phase.instruction().bright_blue());
            }
            if rx.changed().await.is_err() {
                break;
            }
            if *rx.borrow() == BreathPhase::Idle {
                break;
            }
        }
    });

    println!("{}", "Breathing cycle started. '/stop' to end.".bright_black());
    Ok(())
}

async fn handle_chat(app: &App, args: &[&str]) -> Result<()> {
    if app.sessions.current_session().await.is_none() {
        println!("{}", "Please /login first.".yellow());
        return Ok(());
    }

    let Some(chat) = &app.chat else {
        println!(
            "{}",
            "Chat is disabled: add your Gemini API key to secret.json.".yellow()
        );
        return Ok(());
    };

    if args.is_empty() {
        println!("{}", "Usage: /chat <message>".bright_black());
        return Ok(());
    }

    let message = args.join(" ");
    println!("{}", format!("> {}", message).green());
    match chat.send(&message).await {
        Ok(reply) => {
            for line in reply.lines() {
                println!("{}", line.bright_blue());
            }
        }
        Err(_) => {
            // The failure notification has already been printed.
        }
    }
    Ok(())
}

async fn handle_journal(app: &App, rl: &mut Repl, args: &[&str]) -> Result<()> {
    if app.sessions.current_session().await.is_none() {
        println!("{}", "Please /login first.".yellow());
        return Ok(());
    }

    match args.first().copied() {
        Some("add") => {
            let title = rl.readline("Title: ")?;
            let content = rl.readline("Content: ")?;
            let mood_line = rl.readline("Mood (1-5): ")?;
            let mood = mood_line.trim().parse::<u8>().unwrap_or(0);
            let activities_line = rl.readline("Activities (comma-separated): ")?;
            let activities: Vec<String> = activities_line
                .split(',')
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect();

            let _ = app
                .journal
                .add_entry(title.trim(), content.trim(), mood, activities)
                .await;
        }
        Some("list") | None => {
            let entries = app.journal.list_entries().await?;
            if entries.is_empty() {
                println!("{}", "Your log book is empty.".bright_black());
            }
            for entry in entries {
                println!(
                    "{} {} {}",
                    entry.date.format("%Y-%m-%d").to_string().bright_black(),
                    entry.title.bright_green(),
                    format!("(mood {}/5, id {})", entry.mood, entry.id).bright_black()
                );
                for line in entry.content.lines() {
                    println!("  {}", line);
                }
                if !entry.activities.is_empty() {
                    println!("  {}", entry.activities.join(", ").bright_cyan());
                }
            }
        }
        Some("delete") => match args.get(1) {
            Some(id) => {
                app.journal.delete_entry(id).await?;
                println!("{}", "Entry deleted.".bright_green());
            }
            None => println!("{}", "Usage: /journal delete <id>".bright_black()),
        },
        Some(_) => println!(
            "{}",
            "Usage: /journal [add | list | delete <id>]".bright_black()
        ),
    }
    Ok(())
}

fn print_meditations() {
    for session in MEDITATION_LIBRARY {
        println!(
            "{} {} {}",
            session.title.bright_green(),
            format!("({} min, {:?})", session.duration_mins, session.level).bright_black(),
            session.id.bright_cyan()
        );
        println!("  {}", session.description);
    }
}

fn print_help() {
    let lines = [
        ("/login <email> <password>", "Log in"),
        ("/signup <email> <password> <name>", "Create an account"),
        ("/logout", "Log out"),
        ("/whoami", "Show the current session"),
        ("/pattern [i h e]", "Show or set the breathing pattern"),
        ("/breathe", "Start a breathing cycle"),
        ("/stop", "Stop the breathing cycle"),
        ("/chat <message>", "Talk to the MindMend assistant"),
        ("/journal [add|list|delete <id>]", "Manage your log book"),
        ("/meditations", "List guided meditation sessions"),
    ];
    for (command, description) in lines {
        println!("{:<36} {}", command.bright_cyan(), description);
    }
}
