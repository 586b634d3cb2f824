//! Command-line argument parsing and help for lister.
//!
//! `lst [OPTIONS] [PATH]...`. Without paths the current directory is listed.

use crate::config::{ColorMode, Config};

use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    List(CliOptions),
    Help,
    Version,
    Init,
    Invalid(String),
}

/// Flags and targets of a listing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub detailed: bool,
    pub all: bool,
    pub sort: bool,
    pub human: bool,
    pub color: Option<ColorMode>,
    pub targets: Vec<PathBuf>,
}

impl CliOptions {
    /// Applies the flags on top of the file configuration.
    /// Flags only ever switch things on; an explicit `--color` always wins.
    pub fn apply(&self, config: &mut Config) {
        let general = config.general_mut();
        if self.all {
            general.set_show_hidden(true);
        }
        if self.sort {
            general.set_sort(true);
        }
        if self.human {
            general.set_human_sizes(true);
        }
        if let Some(color) = self.color {
            general.set_color(color);
        }
    }
}

pub fn handle_args() -> CliAction {
    parse_args(std::env::args_os().skip(1))
}

/// Parses arguments (without the program name).
pub fn parse_args<I>(args: I) -> CliAction
where
    I: IntoIterator<Item = OsString>,
{
    let mut opts = CliOptions::default();
    let mut only_paths = false;

    for arg in args {
        if only_paths {
            opts.targets.push(PathBuf::from(arg));
            continue;
        }

        let s = match arg.to_str() {
            Some(s) => s,
            None => {
                opts.targets.push(PathBuf::from(&arg));
                continue;
            }
        };

        match s {
            "--" => only_paths = true,
            "-h" | "--help" => return CliAction::Help,
            "-v" | "--version" => return CliAction::Version,
            "--init" => return CliAction::Init,
            "--all" => opts.all = true,
            "--sort" => opts.sort = true,
            "--human" => opts.human = true,
            "--color" => opts.color = Some(ColorMode::Always),
            long if long.starts_with("--") => {
                let Some(value) = long.strip_prefix("--color=") else {
                    return CliAction::Invalid(format!("unknown option '{}'", long));
                };
                match ColorMode::parse(value) {
                    Some(mode) => opts.color = Some(mode),
                    None => {
                        return CliAction::Invalid(format!("invalid color mode '{}'", value));
                    }
                }
            }
            short if short.len() > 1 && short.starts_with('-') => {
                for c in short[1..].chars() {
                    match c {
                        'l' => opts.detailed = true,
                        'a' => opts.all = true,
                        'h' => return CliAction::Help,
                        'v' => return CliAction::Version,
                        other => return CliAction::Invalid(format!("unknown option '-{}'", other)),
                    }
                }
            }
            path => opts.targets.push(PathBuf::from(path)),
        }
    }
    CliAction::List(opts)
}

pub fn print_version() {
    println!("lister {}", env!("CARGO_PKG_VERSION"));
}

pub fn print_help() {
    println!(
        r#"lst - list directory contents

USAGE:
  lst [OPTIONS] [PATH]...

PATH:
  Directories to list (defaults to the current directory)

OPTIONS:
  -l                      Detailed listing: mode, links, owner, group, size, time
  -a, --all               Include entries starting with '.' in detailed listings
      --sort              Sort entries by name
      --human             Print sizes as kB, MB, ... (detailed listings)
      --color[=WHEN]      Color names: auto, always, never [default: auto]
      --init              Generate a default configuration file
  -h, --help              Print help information
  -v, --version           Display the current installed version

ENVIRONMENT:
  LISTER_CONFIG           Override the default config path
  LISTER_LOG              Log filter for diagnostics on stderr (eg. "debug")
"#
    );
}
