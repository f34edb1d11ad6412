use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;

use crate::metadata::MetadataDocument;

pub const FFMETADATA_HEADER: &str = ";FFMETADATA1";

pub trait Renderer {
    fn render(&self, document: &MetadataDocument) -> Result<String>;
}

/// FFmpeg's `ffmetadata` text format with millisecond chapter timestamps.
pub struct FfMetadata;

impl Renderer for FfMetadata {
    fn render(&self, document: &MetadataDocument) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "{FFMETADATA_HEADER}")?;
        for tag in document.tags() {
            writeln!(output, "{}={}", tag.key.as_str(), tag.value)?;
        }

        for chapter in document.chapters() {
            writeln!(output)?;
            writeln!(output, "[CHAPTER]")?;
            writeln!(output, "TIMEBASE=1/1000")?;
            writeln!(output, "START={}", chapter.start_time)?;
            writeln!(output, "END={}", chapter.end_time)?;
            if let Some(title) = &chapter.title {
                writeln!(output, "title={title}")?;
            }
        }

        Ok(output)
    }
}

/// The assembled document as pretty JSON.
pub struct Json;

impl Renderer for Json {
    fn render(&self, document: &MetadataDocument) -> Result<String> {
        let mut output = serde_json::to_string_pretty(document)?;
        output.push('\n');
        Ok(output)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Ffmetadata,
    Json,
}

impl OutputFormat {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            OutputFormat::Ffmetadata => Box::new(FfMetadata),
            OutputFormat::Json => Box::new(Json),
        }
    }
}
