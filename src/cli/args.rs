//! Command-line argument parsing.

/// Usage text printed for `--help`.
pub const USAGE: &str = "\
Usage: bookchat [--no-stream] [MESSAGE]

Ask the book search assistant a question. Without MESSAGE, questions are
read from stdin one per line and the conversation history is kept.

Options:
  --no-stream    Use the non-streaming endpoint
  -V, --version  Print version
  -h, --help     Print this help

Environment:
  BOOKCHAT_API_URL               Backend base URL (default http://localhost:8000)
  BOOKCHAT_CONNECT_TIMEOUT_SECS  Connect timeout in seconds
  BOOKCHAT_LOG                   Log filter (default bookchat=info)";

/// Options for a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatArgs {
    /// Use `/chat` instead of `/chat/stream`
    pub no_stream: bool,
    /// One-shot question; interactive when None
    pub message: Option<String>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run a chat session (default)
    Chat(ChatArgs),
    /// Unrecognized flag
    Unknown(String),
}

/// Parse command-line arguments, program name first.
///
/// Words that are not flags are joined with spaces into the message, so
/// `bookchat 村上春樹 の 小説` needs no quoting. Everything after `--` is
/// message text.
///
/// ```
/// use bookchat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["bookchat".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut chat = ChatArgs::default();
    let mut words: Vec<String> = Vec::new();
    let mut literal = false;

    // Skip the program name
    for arg in args.skip(1) {
        if literal {
            words.push(arg);
            continue;
        }
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--no-stream" => chat.no_stream = true,
            "--" => literal = true,
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return CliCommand::Unknown(flag.to_string())
            }
            _ => words.push(arg),
        }
    }

    let message = words.join(" ");
    if !message.trim().is_empty() {
        chat.message = Some(message);
    }
    CliCommand::Chat(chat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let args: Vec<String> = std::iter::once("bookchat")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        parse_args(args.into_iter())
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_help_wins_over_message() {
        assert_eq!(parse(&["hello", "-h"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_no_args_is_interactive() {
        assert_eq!(parse(&[]), CliCommand::Chat(ChatArgs::default()));
    }

    #[test]
    fn test_parse_message_words_joined() {
        assert_eq!(
            parse(&["--no-stream", "村上春樹の", "小説"]),
            CliCommand::Chat(ChatArgs {
                no_stream: true,
                message: Some("村上春樹の 小説".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_literal_after_double_dash() {
        assert_eq!(
            parse(&["--", "-V", "books"]),
            CliCommand::Chat(ChatArgs {
                no_stream: false,
                message: Some("-V books".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(parse(&["--stream"]), CliCommand::Unknown("--stream".to_string()));
    }
}
