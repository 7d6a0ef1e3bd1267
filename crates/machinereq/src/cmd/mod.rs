use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use machinereq_schema::RequestKind;

use crate::exit::{io_error, CliResult};
use crate::output::OutputFormat;

pub mod schema;
pub mod validate;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a request body and print the normalized record.
    Validate(ValidateArgs),
    /// Print a request's JSON Schema, or check a payload against it.
    Schema(SchemaArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Validate(args) => validate::run(args, format),
        Command::Schema(args) => schema::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Request kind as spelled on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    #[value(alias = "add")]
    AddMachine,
    #[value(alias = "update")]
    UpdateMachine,
}

impl From<KindArg> for RequestKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::AddMachine => RequestKind::AddMachine,
            KindArg::UpdateMachine => RequestKind::UpdateMachine,
        }
    }
}

/// Where a request body comes from. Stdin when neither flag is set.
#[derive(Args, Debug, Default)]
pub struct PayloadArgs {
    /// Inline JSON payload.
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,
    /// Read payload from file.
    #[arg(long, conflicts_with = "json")]
    pub file: Option<PathBuf>,
}

impl PayloadArgs {
    pub fn read(&self) -> CliResult<Vec<u8>> {
        if let Some(json) = &self.json {
            return Ok(json.as_bytes().to_vec());
        }
        if let Some(path) = &self.file {
            return std::fs::read(path)
                .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
        }

        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|err| io_error("failed reading stdin", err))?;
        Ok(buf)
    }
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Request kind to validate against.
    #[arg(value_enum)]
    pub kind: KindArg,
    #[command(flatten)]
    pub payload: PayloadArgs,
    /// Report keys outside the declared fields.
    #[arg(long, env = "MACHINEREQ_STRICT")]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Request kind whose schema to print.
    #[arg(value_enum)]
    pub kind: KindArg,
    /// Forbid properties outside the declared fields.
    #[arg(long, env = "MACHINEREQ_STRICT")]
    pub strict: bool,
    /// Check an inline JSON payload against the schema instead of printing it.
    #[arg(long, conflicts_with = "check_file")]
    pub check_json: Option<String>,
    /// Check a payload file against the schema instead of printing it.
    #[arg(long, conflicts_with = "check_json")]
    pub check_file: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn check_payload(&self) -> Option<PayloadArgs> {
        if self.check_json.is_none() && self.check_file.is_none() {
            return None;
        }
        Some(PayloadArgs {
            json: self.check_json.clone(),
            file: self.check_file.clone(),
        })
    }
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
