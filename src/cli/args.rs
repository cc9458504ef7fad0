//! Command-line argument parsing for the seiun CLI.

/// Pages printed by `notifications` / `timeline` unless `--pages` is given.
pub const DEFAULT_PAGES: u32 = 1;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    Login {
        handle: String,
        password: String,
        host: Option<String>,
    },
    Register {
        email: String,
        handle: String,
        password: String,
        invite: Option<String>,
        host: Option<String>,
    },
    Notifications {
        pages: u32,
    },
    Timeline {
        pages: u32,
    },
    Logout,
    /// Arguments could not be parsed; the message says why.
    Invalid(String),
}

pub const USAGE: &str = "\
usage: seiun <command> [options]

commands:
  login <handle> <password> [--host HOST]
  register <email> <handle> <password> [--invite CODE] [--host HOST]
  notifications [--pages N]
  timeline [--pages N]
  logout
  help
  --version";

/// Parse command-line arguments into a command.
///
/// # Examples
///
/// ```
/// use seiun::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["seiun".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1);
    let Some(command) = args.next() else {
        return CliCommand::Help;
    };

    let mut positional = Vec::new();
    let mut host = None;
    let mut invite = None;
    let mut pages = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--host" | "--invite" | "--pages" => {
                let Some(value) = args.next() else {
                    return CliCommand::Invalid(format!("{} needs a value", arg));
                };
                match arg.as_str() {
                    "--host" => host = Some(value),
                    "--invite" => invite = Some(value),
                    _ => match value.parse::<u32>() {
                        Ok(n) if n > 0 => pages = Some(n),
                        _ => {
                            return CliCommand::Invalid(format!(
                                "--pages expects a positive number, got '{}'",
                                value
                            ))
                        }
                    },
                }
            }
            flag if flag.starts_with("--") => {
                return CliCommand::Invalid(format!("unknown option '{}'", flag));
            }
            _ => positional.push(arg),
        }
    }

    let pages = pages.unwrap_or(DEFAULT_PAGES);

    match (command.as_str(), positional.as_slice()) {
        ("--version" | "-V" | "version", []) => CliCommand::Version,
        ("help" | "--help" | "-h", _) => CliCommand::Help,
        ("login", [handle, password]) => CliCommand::Login {
            handle: handle.clone(),
            password: password.clone(),
            host,
        },
        ("register", [email, handle, password]) => CliCommand::Register {
            email: email.clone(),
            handle: handle.clone(),
            password: password.clone(),
            invite,
            host,
        },
        ("notifications", []) => CliCommand::Notifications { pages },
        ("timeline", []) => CliCommand::Timeline { pages },
        ("logout", []) => CliCommand::Logout,
        ("login" | "register" | "notifications" | "timeline" | "logout", _) => {
            CliCommand::Invalid(format!("wrong number of arguments for '{}'", command))
        }
        _ => CliCommand::Invalid(format!("unknown command '{}'", command)),
    }
}
