//! Command-line pre-processing.
//!
//! Both tools accept options they do not recognize and ignore them, so stray
//! flags from shared wrapper scripts do not fail a run. Unknown `--name` or
//! `--name=value` tokens are removed before clap sees the arguments.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

/// Result of parsing the process arguments.
#[derive(Debug)]
pub enum ParsedArgs<T> {
    /// Arguments parsed; run the tool
    Run {
        /// Parsed options
        args: T,
        /// Unrecognized options that were dropped
        ignored: Vec<String>,
    },
    /// Help, version or an argument error was printed; exit with this code
    Exit(i32),
}

/// Splits raw arguments into those `C` recognizes and those it does not.
///
/// The first element (program name) is always kept. Tokens that do not start
/// with `-` are kept, as they may be the value of a recognized flag.
pub fn split_recognized_args<C: CommandFactory>(
    args: impl IntoIterator<Item = String>,
) -> (Vec<String>, Vec<String>) {
    let command = C::command();
    let mut longs: Vec<String> = command
        .get_arguments()
        .filter_map(|arg| arg.get_long().map(str::to_string))
        .collect();
    longs.extend(["help".to_string(), "version".to_string()]);
    let mut shorts: Vec<char> = command.get_arguments().filter_map(|arg| arg.get_short()).collect();
    shorts.extend(['h', 'V']);

    let mut recognized = Vec::new();
    let mut ignored = Vec::new();

    for (index, arg) in args.into_iter().enumerate() {
        let keep = if index == 0 || arg == "--" || !arg.starts_with('-') || arg == "-" {
            true
        } else if let Some(long) = arg.strip_prefix("--") {
            let name = long.split_once('=').map(|(name, _)| name).unwrap_or(long);
            longs.iter().any(|known| known == name)
        } else {
            arg.chars().nth(1).is_some_and(|c| shorts.contains(&c))
        };

        if keep {
            recognized.push(arg);
        } else {
            ignored.push(arg);
        }
    }

    (recognized, ignored)
}

/// Parses process arguments for a tool, ignoring unrecognized options.
///
/// The dropped options are handed back so the caller can log them once its
/// logger is up.
///
/// `--help`/`-h` and `--version` print to stdout and yield `Exit(0)`; any other
/// argument error is printed to stderr and yields `Exit(1)`.
pub fn parse_args<T: Parser>(args: impl IntoIterator<Item = String>) -> ParsedArgs<T> {
    let (recognized, ignored) = split_recognized_args::<T>(args);
    match T::try_parse_from(recognized) {
        Ok(args) => ParsedArgs::Run { args, ignored },
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ParsedArgs::Exit(0),
                _ => ParsedArgs::Exit(1),
            }
        }
    }
}
