pub mod maps;
pub mod rlimit;

use std::path::PathBuf;

use crate::error::ProbeError;
use maps::Maps;

/// A newtype that references the [`/proc/<id>`](https://man7.org/linux/man-pages/man5/proc.5.html) directory.
#[derive(Debug, Clone)]
pub struct Proc {
    pub path: PathBuf,
    pub pid: i32,
}

/// A extension trait for [`PathBuf`].
pub(crate) trait PathBufExt {
    /// Gets the root [`PathBuf`].
    fn root() -> Self;
}

impl PathBufExt for PathBuf {
    fn root() -> Self {
        "/".into()
    }
}

impl Proc {
    /// Creates a new [`Proc`] that references the running process.
    pub fn current() -> Self {
        let pid = std::process::id() as i32;
        Proc {
            path: PathBuf::root().join("proc").join(pid.to_string()),
            pid,
        }
    }

    /// Reads `/proc/<pid>/maps` of the current [`Proc`].
    pub fn maps(&self) -> Result<Maps, ProbeError> {
        Maps::read(self.pid)
    }

    /// Bytes mapped anonymously, privately and writably: the heap and
    /// whatever the allocator mmapped for large blocks.
    pub fn footprint(&self) -> Result<usize, ProbeError> {
        Ok(self.maps()?.anonymous_writable())
    }
}
