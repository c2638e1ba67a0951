//! Writing the found videos out.

use crate::error::Result;
use crate::youtube_api::SearchResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `videos` to `writer` as a single pretty-printed JSON array.
pub fn write_videos<W: Write>(mut writer: W, videos: &[SearchResult]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, videos).map_err(std::io::Error::from)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes `videos` to the file at `path`, replacing whatever it contained.
pub fn write_videos_to_path(path: &Path, videos: &[SearchResult]) -> Result<()> {
    let file = File::create(path)?;
    write_videos(BufWriter::new(file), videos)?;
    tracing::info!(path = %path.display(), count = videos.len(), "wrote videos");
    Ok(())
}
