// src/bin/logrecon.rs

//! Driver program _logrecon_ drives the [_logreconlib_].
//!
//! Processes user-passed command-line arguments, loads the configuration file,
//! then reconciles the newest local event against the server access log with
//! [`reconcile`].
//!
//! The newest local record and the matching server records are written to
//! the configured output files as delimited text.
//!
//! The exit code is success only if exactly one server request matched the
//! local event with the same payload.
//!
//! [_logreconlib_]: logreconlib
//! [`reconcile`]: logreconlib::reconcile::reconcile

#![allow(non_camel_case_types)]

use std::process::ExitCode;

use ::anyhow::Context;
use ::clap::{Parser, ValueEnum};
use ::const_format::concatcp;
use ::si_trace_print::stack::stack_offset_set;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use ::logreconlib::common::{FPath, Path};
use ::logreconlib::config::Config;
use ::logreconlib::data::record::Columns;
use ::logreconlib::debug::printers::{e_err, e_wrn};
use ::logreconlib::printer::delimited::write_delimited;
use ::logreconlib::printer::diag::{ColorChoice, DiagLevel, DiagnosticSink, StderrSink};
use ::logreconlib::reconcile::{reconcile, ReconcileReport};

/// Default configuration file, in the current directory.
const CONFIG_PATH_DEFAULT: &str = "logrecon.toml";

const CLI_HELP_AFTER: &str = concatcp!(
    "The configuration file has sections [server] and [local].\n",
    "[server] keys: input, pid, device (optional), output.\n",
    "[local] keys: input, output, tz_offset (optional, e.g. \"+08:00\").\n",
    "\n",
    "Exit code is 0 only if exactly one server request of the session\n",
    "was found at or after the newest local event and the payloads match.",
);

/// CLI enum that maps to [`termcolor::ColorChoice`].
///
/// [`termcolor::ColorChoice`]: https://docs.rs/termcolor/1.1.3/termcolor/enum.ColorChoice.html
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

/// CLI enum that maps to [`DiagLevel`].
///
/// [`DiagLevel`]: logreconlib::printer::diag::DiagLevel
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CLI_Log_Level {
    error,
    info,
    debug,
}

/// clap command-line arguments build-time definitions.
//
// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "logrecon",
    version = concatcp!(
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path of the configuration file.
    #[clap(
        short = 'c',
        long,
        verbatim_doc_comment,
        default_value_t = String::from(CONFIG_PATH_DEFAULT),
    )]
    config: String,

    /// Least severe diagnostic messages to print to stderr.
    #[clap(
        short = 'l',
        long,
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Log_Level::info,
    )]
    log_level: CLI_Log_Level,

    /// Choose to print to terminal using colors.
    #[clap(
        long = "color",
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,

    /// Do not write the local and server output files.
    #[clap(
        long,
        verbatim_doc_comment,
    )]
    no_output: bool,
}

/// Process the command-line arguments.
fn cli_process_args() -> (FPath, DiagLevel, ColorChoice, bool) {
    let args = CLI_Args::parse();
    defo!("args {:?}", args);

    let level: DiagLevel = match args.log_level {
        CLI_Log_Level::error => DiagLevel::Error,
        CLI_Log_Level::info => DiagLevel::Info,
        CLI_Log_Level::debug => DiagLevel::Debug,
    };
    // map `CLI_Color_Choice` to `ColorChoice`
    let color_choice: ColorChoice = match args.color_choice {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto => ColorChoice::Auto,
        CLI_Color_Choice::never => ColorChoice::Never,
    };

    (args.config, level, color_choice, !args.no_output)
}

/// Write `records` to the output file at `path`.
fn write_output<R: Columns>(
    path: &FPath,
    records: &[R],
    diag: &dyn DiagnosticSink,
) -> anyhow::Result<()> {
    defn!("({:?})", path);
    write_delimited(Path::new(path), records)
        .with_context(|| format!("writing output {:?}", path))?;
    diag.info(&format!("wrote {} records to {:?}", records.len(), path));
    defx!();

    Ok(())
}

/// Write the records of `report` to the output files of `config`. Both files
/// are written even if one fails; each failure is returned.
fn write_outputs(
    config: &Config,
    report: &ReconcileReport,
    diag: &dyn DiagnosticSink,
) -> Vec<anyhow::Error> {
    [
        write_output(&config.local_output, &report.local, diag),
        write_output(&config.server_output, &report.server, diag),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}

pub fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();

    let (config_path, level, color_choice, do_write) = cli_process_args();
    let diag = StderrSink::new(level, color_choice);

    let mut config = Config::default();
    // a bad config file has been reported; continue with the defaults
    let _ = config.load(&config_path, &diag);
    defo!("config {:?}", config);

    let report: ReconcileReport = reconcile(&config, &diag);

    if do_write {
        for err in write_outputs(&config, &report, &diag) {
            e_wrn!("{:#}", err);
        }
    }

    let exitcode = match &report.outcome {
        Some(outcome) if outcome.is_matched() => {
            println!("{}", outcome);
            ExitCode::SUCCESS
        }
        Some(outcome) => {
            e_err!("{}", outcome);
            ExitCode::FAILURE
        }
        None => ExitCode::FAILURE,
    };
    defx!("exitcode {:?}", exitcode);

    exitcode
}
