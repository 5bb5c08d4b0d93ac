use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use crate::ConfigSpace;

/// Config space backed by a file, typically `/sys/bus/pci/devices/<addr>/config`.
///
/// Uses positional I/O (`pread`/`pwrite` on Unix). The size is fixed when the space is
/// opened. Note that sysfs only exposes the first 64 bytes to unprivileged readers even
/// though it reports the full size; reads beyond that come back short and surface as
/// [`crate::ConfigError::ShortRead`].
#[derive(Debug)]
pub struct FileConfigSpace {
    file: File,
    size: usize,
}

impl FileConfigSpace {
    /// Opens `path` read-only, using the file length as the space size.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::from_file_with_len(file)
    }

    /// Opens `path` for reading and writing, using the file length as the space size.
    pub fn open_writable(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Self::from_file_with_len(file)
    }

    pub fn from_file(file: File, size: usize) -> Self {
        Self { file, size }
    }

    pub fn into_file(self) -> File {
        self.file
    }

    fn from_file_with_len(file: File) -> io::Result<Self> {
        let len = file.metadata()?.len();
        let size = usize::try_from(len).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidData, "config file too large")
        })?;
        Ok(Self { file, size })
    }
}

impl ConfigSpace for FileConfigSpace {
    fn size(&self) -> usize {
        self.size
    }

    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> io::Result<usize> {
        read_at(&self.file, offset as u64, buf)
    }

    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> io::Result<usize> {
        write_at(&self.file, offset as u64, data)
    }
}

#[cfg(unix)]
fn read_at(file: &File, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
    std::os::unix::fs::FileExt::read_at(file, buf, offset)
}

#[cfg(unix)]
fn write_at(file: &File, offset: u64, data: &[u8]) -> io::Result<usize> {
    std::os::unix::fs::FileExt::write_at(file, data, offset)
}

#[cfg(windows)]
fn read_at(file: &File, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
    std::os::windows::fs::FileExt::seek_read(file, buf, offset)
}

#[cfg(windows)]
fn write_at(file: &File, offset: u64, data: &[u8]) -> io::Result<usize> {
    std::os::windows::fs::FileExt::seek_write(file, data, offset)
}

#[cfg(not(any(unix, windows)))]
fn read_at(_file: &File, _offset: u64, _buf: &mut [u8]) -> io::Result<usize> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "positional file reads are not supported on this platform",
    ))
}

#[cfg(not(any(unix, windows)))]
fn write_at(_file: &File, _offset: u64, _data: &[u8]) -> io::Result<usize> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "positional file writes are not supported on this platform",
    ))
}
