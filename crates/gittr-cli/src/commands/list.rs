//! Implementation of the `gittr list` command.

use gittr_adapters::DirectorySource;

use crate::{
    cli::{ListArgs, ListFormat},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// List the files below a template directory that would be rendered.
pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    if !args.dir.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("'{}' is not a directory", args.dir.display()),
            source: None,
        });
    }

    let sources = DirectorySource::new(&args.dir).list();

    match args.format {
        ListFormat::Table => {
            output.header(&format!("Template sources in {}:", args.dir.display()))?;
            for path in &sources {
                output.print(&format!("  {path}"))?;
            }
            output.info(&format!("{} file(s)", sources.len()))?;
        }

        // JSON must stay parseable when piped, so it bypasses quiet mode.
        ListFormat::Json => output.json(&sources)?,

        ListFormat::List => {
            for path in &sources {
                println!("{path}");
            }
        }

        ListFormat::Csv => {
            println!("path");
            for path in &sources {
                println!("{}", csv_field(path.as_str()));
            }
        }
    }

    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
