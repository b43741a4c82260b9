//! Command-line options.

use std::path::PathBuf;

use structopt::StructOpt;

use crate::CliError;

/// Compile outline documents into painting robot instruction streams.
#[derive(Debug, StructOpt)]
#[structopt(name = "brushc")]
pub struct Opt {
    /// Outline document (`[[[x, y], ...], ...]`).
    #[structopt(parse(from_os_str), required_unless = "disassemble")]
    pub input: Option<PathBuf>,

    /// Stream file to write.
    #[structopt(parse(from_os_str), required_unless = "disassemble")]
    pub output: Option<PathBuf>,

    /// Print the instruction listing of an existing stream file instead of
    /// compiling.
    #[structopt(
        long,
        value_name = "stream",
        parse(from_os_str),
        conflicts_with_all = &["input", "output", "list"]
    )]
    pub disassemble: Option<PathBuf>,

    /// JSON compile options. Fields it omits keep their defaults; the flags
    /// below override it.
    #[structopt(long, value_name = "file", parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Path length per paint dip.
    #[structopt(long, value_name = "units")]
    pub max_length: Option<f64>,

    /// Travel height.
    #[structopt(long, value_name = "units", allow_hyphen_values = true)]
    pub clearance_z: Option<i16>,

    /// Painting height.
    #[structopt(long, value_name = "units", allow_hyphen_values = true)]
    pub contact_z: Option<i16>,

    /// Drop outlines shorter than this.
    #[structopt(long, value_name = "units")]
    pub min_outline_length: Option<f64>,

    /// Subdivide edges that do not fit into one dip of paint.
    #[structopt(long)]
    pub split_long_edges: bool,

    /// Print the instruction listing.
    #[structopt(long)]
    pub list: bool,
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Compile(CompileArgs),
    Disassemble { stream: PathBuf },
}

/// Settings for a compile run. Flags override the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub max_length: Option<f64>,
    pub clearance_z: Option<i16>,
    pub contact_z: Option<i16>,
    pub min_outline_length: Option<f64>,
    pub split_long_edges: bool,
    pub list: bool,
}

impl Opt {
    pub fn into_command(self) -> Result<Command, CliError> {
        if let Some(stream) = self.disassemble {
            return Ok(Command::Disassemble { stream });
        }
        match (self.input, self.output) {
            (Some(input), Some(output)) => Ok(Command::Compile(CompileArgs {
                input,
                output,
                config: self.config,
                max_length: self.max_length,
                clearance_z: self.clearance_z,
                contact_z: self.contact_z,
                min_outline_length: self.min_outline_length,
                split_long_edges: self.split_long_edges,
                list: self.list,
            })),
            _ => Err(CliError::Usage(
                "expected an outlines file and an output file".into(),
            )),
        }
    }
}
