//! formforge – command-line form renderer.
//!
//! Usage:
//!   formforge --file form.xml --sub answers.json --from xml --to pdf [--out DIR]
//!
//! If `--out` is omitted the document is written next to the schema with the
//! same stem (e.g. `survey.xml` → `survey.pdf`).

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use form_forge::classify::classify_file_format;
use form_forge::config::CommandOptions;
use form_forge::PageOrientation;

#[derive(Debug, Parser)]
#[command(
    version,
    about = "Render a form schema and its submitted answers into a document",
    after_help = "Example: formforge --file=survey.xml --sub=answers.json --from=xml --to=pdf --out=./output/"
)]
struct Cli {
    /// Form schema to render
    #[arg(short, long)]
    file: PathBuf,

    /// JSON file with the submitted answers
    #[arg(short, long = "sub")]
    submission: PathBuf,

    /// Input format (xml)
    #[arg(long)]
    from: String,

    /// Output format (pdf, json)
    #[arg(long)]
    to: String,

    /// Output directory (default: next to the schema)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Document title in PDF metadata (default: schema file stem)
    #[arg(short, long)]
    title: Option<String>,

    /// Use landscape page orientation (A4 841×595 pt)
    #[arg(short, long)]
    landscape: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "info",
            (false, 1) => "debug",
            _ => "trace",
        }
    }

    fn into_options(self) -> CommandOptions {
        CommandOptions {
            file: self.file,
            submission: self.submission,
            output_dir: self.out,
            from: classify_file_format(&self.from),
            to: classify_file_format(&self.to),
            title: self.title,
            orientation: if self.landscape {
                PageOrientation::Landscape
            } else {
                PageOrientation::Portrait
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let options = cli.into_options();
    match form_forge::run(&options) {
        Ok(report) => {
            let warnings = report.warnings.len();
            eprintln!(
                "Wrote '{}' ({} bytes, {} warning{})",
                report.output.display(),
                report.bytes,
                warnings,
                if warnings == 1 { "" } else { "s" }
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
