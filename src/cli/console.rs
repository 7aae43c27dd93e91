//! Interactive console commands

use std::io::{self, BufRead};
use std::str::FromStr;
use std::thread;

use thiserror::Error;
use tokio::sync::mpsc;

/// Help text printed by the `help` command
pub const CONSOLE_HELP: &str = "\
Commands:
  record [name]  start capturing (name defaults to PcmAudio <date time>)
  stop           stop the running capture
  save           write every buffered recording to the output directory
  clear          drop every buffered recording
  count          number of buffered recordings
  list           show buffered recordings
  help           show this help
  quit           stop any capture and exit

Ctrl+C stops a running capture, or exits when idle.";

/// One line typed at the console prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Record(Option<String>),
    Stop,
    Save,
    Clear,
    Count,
    List,
    Help,
    Quit,
    /// Blank line
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown command \"{0}\". Type 'help' for the list of commands")]
pub struct UnknownCommand(pub String);

impl FromStr for ConsoleCommand {
    type Err = UnknownCommand;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "" => Self::Empty,
            "record" | "start" => {
                Self::Record(Some(rest.to_string()).filter(|name| !name.is_empty()))
            }
            "stop" => Self::Stop,
            "save" => Self::Save,
            "clear" => Self::Clear,
            "count" | "size" => Self::Count,
            "list" | "ls" => Self::List,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return Err(UnknownCommand(word.to_string())),
        };
        Ok(command)
    }
}

/// Read stdin lines on a detached thread.
///
/// The channel closes at end of input. A blocked read never holds up exit.
pub fn spawn_line_reader() -> mpsc::Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel(8);

    let spawned = thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
        });
    if let Err(e) = spawned {
        log::error!("Failed to start stdin reader: {}", e);
    }

    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_takes_rest_of_line_as_name() {
        assert_eq!(
            "record morning take".parse(),
            Ok(ConsoleCommand::Record(Some("morning take".to_string())))
        );
        assert_eq!("record".parse(), Ok(ConsoleCommand::Record(None)));
        assert_eq!("  RECORD   ".parse(), Ok(ConsoleCommand::Record(None)));
    }

    #[test]
    fn simple_commands() {
        assert_eq!("stop".parse(), Ok(ConsoleCommand::Stop));
        assert_eq!("save".parse(), Ok(ConsoleCommand::Save));
        assert_eq!("clear".parse(), Ok(ConsoleCommand::Clear));
        assert_eq!("count".parse(), Ok(ConsoleCommand::Count));
        assert_eq!("ls".parse(), Ok(ConsoleCommand::List));
        assert_eq!("exit".parse(), Ok(ConsoleCommand::Quit));
    }

    #[test]
    fn blank_line_is_empty() {
        assert_eq!("".parse(), Ok(ConsoleCommand::Empty));
        assert_eq!("   \t".parse(), Ok(ConsoleCommand::Empty));
    }

    #[test]
    fn unknown_command_is_reported() {
        let err = "play t1".parse::<ConsoleCommand>().unwrap_err();
        assert_eq!(err, UnknownCommand("play".to_string()));
        assert!(err.to_string().contains("help"));
    }
}
