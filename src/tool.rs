use std::path::{Path, PathBuf};

pub const FFMPEG: &str = if cfg!(windows) { "ffmpeg.exe" } else { "ffmpeg" };

/// Picks the ffmpeg executable: an explicit path wins, otherwise the name is
/// left for the OS to look up on `PATH`.
pub fn find_ffmpeg(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(FFMPEG),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let path = Path::new("/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(find_ffmpeg(Some(path)), path);
    }

    #[test]
    fn falls_back_to_bare_name() {
        assert_eq!(find_ffmpeg(None), PathBuf::from(FFMPEG));
    }
}
