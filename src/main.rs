use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use ffchapters::build_document;
use ffchapters::embed::Embedder;
use ffchapters::metadata::Tags;
use ffchapters::render::{FfMetadata, OutputFormat, Renderer};

#[derive(Parser)]
#[command(author, version, about = "Build ffmpeg chapter metadata from a spreadsheet", long_about = None)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the metadata document to stdout
    Generate {
        #[command(flatten)]
        source: Source,

        #[arg(long, value_enum, default_value_t = OutputFormat::Ffmetadata)]
        format: OutputFormat,
    },
    /// Remux a media file with the chapters attached
    Embed {
        #[command(flatten)]
        source: Source,

        /// Media file to read
        #[arg(short, long)]
        input: PathBuf,

        /// Media file to write
        #[arg(short, long)]
        output: PathBuf,

        /// ffmpeg executable
        #[arg(long, env = "FFCHAPTERS_FFMPEG")]
        ffmpeg: Option<PathBuf>,

        /// Replace the output file if it exists
        #[arg(long)]
        overwrite: bool,
    },
}

#[derive(Args)]
struct Source {
    /// CSV or TSV file with title, startTime and endTime columns
    #[arg(short, long)]
    chapters: PathBuf,

    /// Global title tag
    #[arg(long)]
    title: Option<String>,

    /// Global author tag
    #[arg(long)]
    author: Option<String>,
}

impl Source {
    fn tags(&self) -> Tags {
        Tags {
            title: self.title.clone(),
            author: self.author.clone(),
        }
    }

    fn render(&self, renderer: &dyn Renderer) -> anyhow::Result<String> {
        let built = build_document(&self.chapters, &self.tags())?;
        for diagnostic in &built.diagnostics {
            diagnostic.log();
        }
        renderer.render(&built.value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Generate { source, format } => {
            let text = source.render(format.renderer().as_ref())?;
            io::stdout()
                .lock()
                .write_all(text.as_bytes())
                .context("Failed to write to stdout")?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Embed {
            source,
            input,
            output,
            ffmpeg,
            overwrite,
        } => {
            let text = source.render(&FfMetadata)?;
            let status = Embedder::new(ffmpeg.as_deref())
                .overwrite(overwrite)
                .embed(&text, &input, &output)?;

            // Killed by a signal: no code to mirror.
            let code = status.code().unwrap_or(1);
            Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
        }
    }
}
