use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use anyhow::Context;

use crate::temp::write_temp_file;
use crate::tool::find_ffmpeg;

/// Attaches a rendered FFMETADATA document to a media file by remuxing it
/// with ffmpeg. Streams are copied as-is.
#[derive(Clone, Debug)]
pub struct Embedder {
    ffmpeg: PathBuf,
    overwrite: bool,
}

impl Embedder {
    pub fn new(ffmpeg: Option<&Path>) -> Self {
        Self {
            ffmpeg: find_ffmpeg(ffmpeg),
            overwrite: false,
        }
    }

    /// Replace an existing output file instead of refusing to.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn ffmpeg(&self) -> &Path {
        &self.ffmpeg
    }

    /// Input 0 is the media, input 1 the metadata file. Every stream of the
    /// media is copied and only global tags and chapters of input 1 are kept.
    pub fn command_args(&self, metadata: &Path, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        args.push(if self.overwrite { "-y" } else { "-n" }.into());
        args.push("-i".into());
        args.push(input.into());
        args.push("-i".into());
        args.push(metadata.into());
        for arg in ["-map", "0", "-map_metadata", "1", "-map_chapters", "1", "-codec", "copy"] {
            args.push(arg.into());
        }
        args.push(output.into());
        args
    }

    /// Runs ffmpeg and waits for it to exit. Its stdout and stderr go
    /// straight to ours.
    pub fn embed(&self, rendered: &str, input: &Path, output: &Path) -> anyhow::Result<ExitStatus> {
        let (_temp_dir, metadata_file) = write_temp_file("ffmetadata.txt", rendered)?;

        log::info!(
            "Embedding metadata \"{}\" into \"{}\" -> \"{}\"",
            metadata_file.display(),
            input.display(),
            output.display()
        );

        let status = Command::new(&self.ffmpeg)
            .args(self.command_args(&metadata_file, input, output))
            .status()
            .with_context(|| format!("Failed to start {}", self.ffmpeg.display()))?;

        if !status.success() {
            log::error!(
                "{} failed on {} with status: {}",
                self.ffmpeg.display(),
                input.display(),
                status
            );
        }

        Ok(status)
    }
}
