//! Line-driven task board.
//!
//! # Responsibility
//! - Mount a board on an in-memory document and drive it from stdin.
//! - Start file logging only when a log directory is given.

use clap::Parser;
use log::info;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::rc::Rc;
use taskboard_core::{
    core_version, default_log_level, init_logging, Board, MemoryDocument, ProjectId,
    ProjectStatus, SubmitOutcome,
};

const HELP_TEXT: &str = "commands:
  add <title> | <description> | <effort>   create a project (effort in person-days)
  move <id-or-prefix> <active|finished>    drag a project onto a list
  show                                     print the board
  json                                     print all projects as JSON
  help                                     show this text
  quit                                     exit";

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(version, about = "In-memory task board with active and finished lists", long_about = None)]
struct Cli {
    /// Log level (trace|debug|info|warn|error); defaults to the build mode level
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging stays off when omitted
    #[arg(long)]
    log_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Add {
        title: String,
        description: String,
        effort: String,
    },
    Move {
        key: String,
        status: ProjectStatus,
    },
    Show,
    Json,
    Help,
    Quit,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging init failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    let document = Rc::new(MemoryDocument::with_board_templates());
    let board = match Board::mount(document.clone()) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("board mount failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!("event=cli_start module=cli status=ok");
    println!("taskboard {} (type `help` for commands)", core_version());
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("read failed: {err}");
                return ExitCode::FAILURE;
            }
        };

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => run_command(&board, &document, command),
            Err(message) => println!("error: {message}"),
        }
        flush_output(&mut stdout);
    }

    info!(
        "event=cli_exit module=cli status=ok projects={}",
        board.store().len()
    );
    ExitCode::SUCCESS
}

fn run_command(board: &Board, document: &MemoryDocument, command: Command) {
    match command {
        Command::Add {
            title,
            description,
            effort,
        } => {
            let outcome = board
                .input()
                .fill(&title, &description, &effort)
                .and_then(|()| board.input().submit());
            match outcome {
                Ok(SubmitOutcome::Added(id)) => println!("added {id}"),
                Ok(SubmitOutcome::Rejected(_)) => {
                    if let Some(alert) = document.alerts().last() {
                        println!("{alert}");
                    }
                }
                Err(err) => println!("error: {err}"),
            }
        }
        Command::Move { key, status } => match resolve_project(board, &key) {
            Ok(id) => match board.drag_project(id, status) {
                Ok(phase) => println!("drop {phase:?}"),
                Err(err) => println!("error: {err}"),
            },
            Err(message) => println!("error: {message}"),
        },
        Command::Show => print!("{}", document.render_text("app")),
        Command::Json => match serde_json::to_string_pretty(&board.store().projects()) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("error: {err}"),
        },
        Command::Help => println!("{HELP_TEXT}"),
        Command::Quit => {}
    }
}

/// Flushes command output, reporting a failure the same way read errors are.
fn flush_output(out: &mut dyn Write) -> bool {
    match out.flush() {
        Ok(()) => true,
        Err(err) => {
            eprintln!("write failed: {err}");
            false
        }
    }
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match verb {
        "add" => {
            let parts = rest.split('|').map(str::trim).collect::<Vec<_>>();
            let [title, description, effort] = parts.as_slice() else {
                return Err("usage: add <title> | <description> | <effort>".to_string());
            };
            Command::Add {
                title: title.to_string(),
                description: description.to_string(),
                effort: effort.to_string(),
            }
        }
        "move" => {
            let mut args = rest.split_whitespace();
            let (Some(key), Some(status), None) = (args.next(), args.next(), args.next()) else {
                return Err("usage: move <id-or-prefix> <active|finished>".to_string());
            };
            let status = ProjectStatus::parse(status)
                .ok_or_else(|| format!("unknown list `{status}`; expected active|finished"))?;
            Command::Move {
                key: key.to_string(),
                status,
            }
        }
        "show" => Command::Show,
        "json" => Command::Json,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command `{other}`; try `help`")),
    };
    Ok(Some(command))
}

fn resolve_project(board: &Board, key: &str) -> Result<ProjectId, String> {
    let matches = board
        .store()
        .projects()
        .into_iter()
        .map(|project| project.id())
        .filter(|id| id.to_string().starts_with(key))
        .collect::<Vec<_>>();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(format!("no project matches `{key}`")),
        _ => Err(format!("`{key}` matches {} projects", matches.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::{flush_output, parse_command, resolve_project, Command};
    use std::io::{self, Write};
    use std::rc::Rc;
    use taskboard_core::{Board, MemoryDocument, ProjectStatus};

    #[test]
    fn parses_add_with_pipe_separated_fields() {
        let command = parse_command("add Build API | Implement REST endpoints | 15")
            .unwrap()
            .unwrap();
        assert_eq!(
            command,
            Command::Add {
                title: "Build API".to_string(),
                description: "Implement REST endpoints".to_string(),
                effort: "15".to_string(),
            }
        );
    }

    #[test]
    fn add_keeps_empty_fields_for_validation() {
        let command = parse_command("add  | ok | 0").unwrap().unwrap();
        assert_eq!(
            command,
            Command::Add {
                title: String::new(),
                description: "ok".to_string(),
                effort: "0".to_string(),
            }
        );
    }

    #[test]
    fn parses_move_and_rejects_unknown_lists() {
        assert_eq!(
            parse_command("move 1a2b finished").unwrap(),
            Some(Command::Move {
                key: "1a2b".to_string(),
                status: ProjectStatus::Finished,
            })
        );
        assert!(parse_command("move 1a2b done").is_err());
        assert!(parse_command("move 1a2b").is_err());
    }

    #[test]
    fn blank_lines_are_ignored_and_unknown_verbs_fail() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert!(parse_command("delete x").is_err());
        assert_eq!(parse_command("exit").unwrap(), Some(Command::Quit));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn flush_failures_are_reported_not_swallowed() {
        assert!(!flush_output(&mut ClosedPipe));
        assert!(flush_output(&mut Vec::<u8>::new()));
    }

    #[test]
    fn resolve_project_matches_unique_prefix() {
        let document = Rc::new(MemoryDocument::with_board_templates());
        let board = Board::mount(document).unwrap();
        let id = board
            .store()
            .add_project("Build API", "Implement REST endpoints", 15.0);

        let full = id.to_string();
        assert_eq!(resolve_project(&board, &full[..8]).unwrap(), id);
        assert!(resolve_project(&board, "zzzz").is_err());
        assert!(resolve_project(&board, "").is_ok());
    }
}
