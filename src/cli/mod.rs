//! Command-line front end for the `bookchat` binary.
//!
//! ```ignore
//! use bookchat::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! match run_cli_command(&command) {
//!     Some(code) => std::process::exit(code),
//!     None => { /* start chatting */ }
//! }
//! ```

pub mod args;
pub mod render;
pub mod version;

pub use args::{parse_args, ChatArgs, CliCommand, USAGE};
pub use version::{version_line, VERSION};

/// Handle commands that finish without talking to the backend.
///
/// Returns the exit code, or `None` for [`CliCommand::Chat`].
pub fn run_cli_command(command: &CliCommand) -> Option<i32> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Some(0)
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Some(0)
        }
        CliCommand::Unknown(flag) => {
            eprintln!("bookchat: unknown option '{}'\n\n{}", flag, USAGE);
            Some(2)
        }
        CliCommand::Chat(_) => None,
    }
}
