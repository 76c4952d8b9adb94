use std::path::Path;

use proc_maps::{get_process_maps, MapRange, Pid};

use crate::error::ProbeError;

/// A snapshot of `/proc/<pid>/maps`.
pub struct Maps {
    ranges: Vec<MapRange>,
}

impl Maps {
    pub fn read(pid: i32) -> Result<Self, ProbeError> {
        let ranges = get_process_maps(pid as Pid).map_err(|e| {
            debug!("get_process_maps({}) failed: {}", pid, e);
            ProbeError::MapsError
        })?;
        Ok(Self { ranges })
    }

    /// Sum of writable mappings with no backing file, `[heap]` included.
    pub fn anonymous_writable(&self) -> usize {
        self.ranges
            .iter()
            .filter(|map| map.is_write())
            .filter(|map| match map.filename() {
                None => true,
                Some(filename) => filename == Path::new("[heap]"),
            })
            .map(|map| map.size())
            .sum()
    }
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;

    #[test]
    fn reads_own_maps() {
        let maps = Maps::read(std::process::id() as i32).unwrap();
        assert!(maps.anonymous_writable() > 0);
    }

    #[test]
    fn unknown_pid_is_an_error() {
        assert!(matches!(Maps::read(-1), Err(ProbeError::MapsError)));
    }
}
