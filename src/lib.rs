/*

title,startTime,endTime
Intro,0:00:00,
Part One,0:01:30,0:12:00
Credits,,0:14:10

        |
        v

;FFMETADATA1
title=...

[CHAPTER]
TIMEBASE=1/1000
START=0
END=90000
title=Intro
...

*/

pub mod chapters;
pub mod diagnostics;
pub mod embed;
pub mod escape;
pub mod metadata;
pub mod render;
pub mod table;
pub mod temp;
pub mod time;
pub mod tool;

use std::path::Path;

use crate::chapters::resolve;
use crate::diagnostics::Diagnosed;
use crate::metadata::{MetadataDocument, Tags, assemble};
use crate::table::read_chapters;

/// Reads a chapter sheet, resolves its boundaries and assembles the document.
///
/// Only an unreadable chapter file is an error; everything else ends up in
/// the returned diagnostics.
pub fn build_document(
    chapters_path: impl AsRef<Path>,
    tags: &Tags,
) -> anyhow::Result<Diagnosed<MetadataDocument>> {
    let loaded = read_chapters(chapters_path)?;
    let resolved = loaded.and_then(resolve);
    log::debug!("Resolved chapters:\n{}", chapters::summary(&resolved.value));

    Ok(resolved.map(|chapters| assemble(tags, chapters)))
}
