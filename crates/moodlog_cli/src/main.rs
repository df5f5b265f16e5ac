//! Interactive mood tracker driver.
//!
//! # Responsibility
//! - Read one user action per line and route it to `MoodService`.
//! - Render replies, history and degraded-capability notices as text.
//!
//! # Invariants
//! - Collaborator and store failures are printed, never panicked on.
//! - The only argument is an optional store path.

use log::{error, info};
use moodlog_core::{
    core_version, init_logging, AppConfig, Capability, Collaborators, MoodLabel, MoodService,
    PrimarySource, ServiceError,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Moods,
    Select(MoodLabel),
    Feel(String),
    Voice,
    Message,
    Save,
    History,
    Status,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    match head.to_ascii_lowercase().as_str() {
        "moods" => Ok(Command::Moods),
        "select" => parse_selection(rest).map(Command::Select),
        "feel" => Ok(Command::Feel(rest.to_string())),
        "voice" => Ok(Command::Voice),
        "message" | "msg" => Ok(Command::Message),
        "save" => Ok(Command::Save),
        "history" => Ok(Command::History),
        "status" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "" => Err("empty command; type `help`".to_string()),
        other => Err(format!("unknown command `{other}`; type `help`")),
    }
}

/// Accepts a 1-based selector index or a label name.
fn parse_selection(value: &str) -> Result<MoodLabel, String> {
    if let Ok(index) = value.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| MoodLabel::ALL.get(i).copied())
            .ok_or_else(|| format!("mood number must be 1..={}", MoodLabel::ALL.len()));
    }
    MoodLabel::parse_display(value).ok_or_else(|| format!("unknown mood `{value}`"))
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  moods            list selectable moods")?;
    writeln!(out, "  select <n|name>  pick a mood from the list")?;
    writeln!(out, "  feel <text>      describe your mood in your own words")?;
    writeln!(out, "  voice            describe your mood by voice")?;
    writeln!(out, "  message          show a kind message for the current mood")?;
    writeln!(out, "  save             save the current mood for today")?;
    writeln!(out, "  history          show your recent mood history")?;
    writeln!(out, "  status           show available capabilities")?;
    writeln!(out, "  quit             leave")
}

fn resolve_collaborators() -> Collaborators {
    // No model or device backends are linked into this binary.
    Collaborators::resolve(
        || {
            Err(ServiceError::unavailable(
                Capability::Generation,
                "no text generation backend linked",
            ))
        },
        || {
            Err(ServiceError::unavailable(
                Capability::Voice,
                "no speech recognition backend linked",
            ))
        },
        || {
            Err(ServiceError::unavailable(
                Capability::Camera,
                "no camera backend linked",
            ))
        },
    )
}

/// Rolling logs live next to the store: `<store dir>/logs`, made absolute.
fn default_log_dir(store_path: &Path) -> io::Result<PathBuf> {
    let store_dir = match store_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok(std::env::current_dir()?.join(store_dir).join(LOG_DIR_NAME))
}

/// Starts file logging when `config.log_dir` is set. Returns a notice to show
/// when logging could not be started.
fn start_logging(config: &AppConfig) -> Option<String> {
    let log_dir = config.log_dir.as_ref()?;
    let log_dir = log_dir.to_string_lossy().to_string();
    init_logging(&config.log_level, &log_dir)
        .err()
        .map(|err| format!("logging disabled: {err}"))
}

fn run<R: BufRead, W: Write>(service: &mut MoodService, input: R, out: &mut W) -> io::Result<()> {
    let mut current = MoodLabel::default();

    writeln!(out, "🌤️ Mood Companion {}", core_version())?;
    writeln!(out, "Type `help` for commands.")?;
    for capability in service.capabilities().missing() {
        writeln!(out, "⚠️ {}", capability.degraded_notice())?;
    }

    write!(out, "[{current}] > ")?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                handle(service, command, &mut current, out)?;
            }
            Err(message) => writeln!(out, "{message}")?,
        }
        write!(out, "[{current}] > ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

fn handle<W: Write>(
    service: &mut MoodService,
    command: Command,
    current: &mut MoodLabel,
    out: &mut W,
) -> io::Result<()> {
    match command {
        Command::Moods => {
            for (index, label) in MoodLabel::ALL.iter().enumerate() {
                writeln!(out, "  {}. {label}", index + 1)?;
            }
        }
        Command::Select(label) => {
            *current = label;
        }
        Command::Feel(text) => {
            *current = service.select(*current, &text);
            writeln!(out, "💭 Sounds like: {current}")?;
        }
        Command::Voice => {
            writeln!(out, "🎤 Listening...")?;
            match service.capture_voice(*current) {
                Ok(outcome) if outcome.is_success() => {
                    *current = outcome.mood;
                    if let Some(transcript) = outcome.transcript {
                        writeln!(out, "You said: {transcript}")?;
                    }
                    writeln!(out, "💭 Sounds like: {current}")?;
                }
                Ok(outcome) => match outcome.error {
                    Some(err) => writeln!(out, "Sorry, {err}. Mood unchanged.")?,
                    None => writeln!(out, "Sorry, no speech recognized. Mood unchanged.")?,
                },
                Err(err) => writeln!(out, "⚠️ {err}")?,
            }
        }
        Command::Message => {
            let message = service.compose_message(*current);
            if message.source == PrimarySource::Fallback {
                writeln!(out, "(generator unavailable right now, here is a quote)")?;
            }
            writeln!(out, "✅ {}", message.primary)?;
            writeln!(out, "ℹ️ {}", message.secondary)?;
        }
        Command::Save => match service.save_mood(*current) {
            Ok(record) => writeln!(out, "Mood saved for {}! 💖", record.date)?,
            Err(err) => writeln!(out, "⚠️ {err}")?,
        },
        Command::History => {
            let history = service.history();
            if history.is_empty() {
                writeln!(out, "No moods saved yet.")?;
            } else {
                writeln!(out, "📊 Your recent mood history")?;
                writeln!(out, "  Date        Mood")?;
                for record in history {
                    writeln!(out, "  {}  {}", record.date, record.mood)?;
                }
            }
        }
        Command::Status => {
            let capabilities = service.capabilities();
            for capability in Capability::ALL {
                let state = if capabilities.contains(capability) {
                    "on"
                } else {
                    "off"
                };
                writeln!(
                    out,
                    "  {:<10} {state:<3} {}",
                    capability.as_str(),
                    capability.description()
                )?;
            }
            writeln!(out, "  store      {}", service.log().source())?;
        }
        Command::Help => print_help(out)?,
        Command::Quit => {}
    }
    Ok(())
}

fn main() {
    let mut config = match std::env::args().nth(1) {
        Some(path) => AppConfig::with_store_path(path),
        None => AppConfig::default(),
    };
    match default_log_dir(&config.store_path) {
        Ok(log_dir) => config.log_dir = Some(log_dir),
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    if let Some(notice) = start_logging(&config) {
        eprintln!("{notice}");
    }

    info!(
        "event=cli_start module=cli status=ok version={} store={}",
        core_version(),
        config.store_path.display()
    );
    let mut service = match MoodService::open(config, resolve_collaborators()) {
        Ok(service) => service,
        Err(err) => {
            error!("event=cli_start module=cli status=error error={err}");
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if let Err(err) = run(&mut service, stdin.lock(), &mut stdout) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{default_log_dir, parse_command, parse_selection, run, start_logging, Command};
    use moodlog_core::{logging_status, AppConfig, Collaborators, MoodLabel, MoodService};
    use std::path::Path;

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!(parse_command("  HISTORY "), Ok(Command::History));
        assert_eq!(
            parse_command("feel kind of tired today"),
            Ok(Command::Feel("kind of tired today".to_string()))
        );
        assert!(parse_command("dance").is_err());
        assert!(parse_command("   ").is_err());
    }

    #[test]
    fn selection_accepts_index_or_name() {
        assert_eq!(parse_selection("2"), Ok(MoodLabel::Sad));
        assert_eq!(parse_selection("happy"), Ok(MoodLabel::Happy));
        assert!(parse_selection("0").is_err());
        assert!(parse_selection("7").is_err());
    }

    #[test]
    fn session_saves_and_shows_history() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::with_store_path(dir.path().join("mood_log.csv"));
        let mut service = MoodService::open(config, Collaborators::none()).unwrap();

        let script = "feel so stressed\nsave\nhistory\nquit\n";
        let mut out = Vec::new();
        run(&mut service, script.as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Sounds like: 😰 Stressed"));
        assert!(text.contains("Mood saved"));
        assert!(text.contains("😰 Stressed"));
        assert_eq!(service.history().len(), 1);
        assert_eq!(service.history()[0].mood, MoodLabel::Stressed);
    }

    #[test]
    fn logging_is_skipped_when_no_log_dir_is_configured() {
        let config = AppConfig::default();
        assert_eq!(config.log_dir, None);
        assert_eq!(start_logging(&config), None);
        assert!(logging_status().is_none());
    }

    #[test]
    fn default_log_dir_sits_next_to_the_store() {
        let log_dir = default_log_dir(Path::new("data/mood_log.csv")).unwrap();
        assert!(log_dir.is_absolute());
        assert!(log_dir.ends_with("data/logs"));

        let log_dir = default_log_dir(Path::new("mood_log.csv")).unwrap();
        assert!(log_dir.ends_with("logs"));
    }
}
