//! `brushc`: compile outline documents into controller streams.
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` to see every
//! reload decision, `RUST_LOG=trace` for every frame.

mod args;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use brush_codegen::{DecodeError, WriteError};
use brush_compiler::input::parse_outlines;
use brush_compiler::{build_program, CompileOptions};
use brush_types::StrokeError;
use structopt::StructOpt;
use thiserror::Error;

use crate::args::{Command, CompileArgs, Opt};

/// Everything that can stop a `brushc` run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} [{}] {}", .0.code(), .0.category(), .0)]
    Compile(#[from] StrokeError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("invalid stream: {0}")]
    Decode(#[from] DecodeError),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Opt::from_args().into_command().and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(msg)) => {
            eprintln!("error: {msg}\n\nFor more information try --help");
            ExitCode::from(2)
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Disassemble { stream } => disassemble(&stream),
        Command::Compile(args) => compile(&args),
    }
}

fn compile(args: &CompileArgs) -> Result<(), CliError> {
    let options = load_options(args)?;
    let outlines = parse_outlines(&read_text(&args.input)?)?;
    log::info!(
        "compiling {} outlines from {}",
        outlines.len(),
        args.input.display()
    );

    let program = build_program(&outlines, &options)?;
    if args.list {
        for (index, instruction) in program.instructions.iter().enumerate() {
            println!("{index:6}  {instruction}");
        }
    }
    let written = program.save(&args.output)?;
    let stats = &program.stats;
    log::info!(
        "{} instructions, {} reloads, {:.0} units painted, {} outlines skipped ({} bytes)",
        program.len(),
        stats.reloads,
        stats.painted_length,
        stats.skipped_outlines,
        written
    );
    Ok(())
}

fn load_options(args: &CompileArgs) -> Result<CompileOptions, CliError> {
    let mut options = match &args.config {
        Some(path) => CompileOptions::from_json(&read_text(path)?)?,
        None => CompileOptions::default(),
    };
    if let Some(length) = args.max_length {
        options.stroke.max_continuous_length = length;
    }
    if let Some(z) = args.clearance_z {
        options.stroke.clearance_z = z;
    }
    if let Some(z) = args.contact_z {
        options.stroke.contact_z = z;
    }
    if let Some(length) = args.min_outline_length {
        options.min_outline_length = Some(length);
    }
    if args.split_long_edges {
        options.split_long_edges = true;
    }
    options.validate()?;
    log::debug!("compile options: {options:?}");
    Ok(options)
}

fn disassemble(path: &Path) -> Result<(), CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    for (index, instruction) in brush_codegen::decode_stream(&bytes)?.iter().enumerate() {
        println!("{index:6}  {instruction}");
    }
    Ok(())
}

fn read_text(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
