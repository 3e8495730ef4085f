pub mod synthetic;

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Anything that can hand the session loop chunks of raw sensor bytes.
///
/// A return of `Ok(0)` means the source is exhausted and the session
/// should wind down.
pub trait ByteSource: Send {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl ByteSource for Box<dyn ByteSource> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_chunk(buf)
    }
}

/// Replays a previously captured byte dump from disk.
pub struct FileReplaySource {
    file: File,
}

impl FileReplaySource {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self {
            file: File::open(path)?,
        })
    }
}

impl ByteSource for FileReplaySource {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn replay_source_drains_the_file() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&[1, 2, 3, 4, 5]).unwrap();
        let path = temp.into_temp_path();

        let mut source = FileReplaySource::open(&path).unwrap();
        let mut buf = [0u8; 3];
        assert_eq!(source.read_chunk(&mut buf).unwrap(), 3);
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(source.read_chunk(&mut buf).unwrap(), 2);
        assert_eq!(source.read_chunk(&mut buf).unwrap(), 0);
    }
}
