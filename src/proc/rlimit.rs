//! Address-space ceiling of the running process.
//!
//! With `RLIMIT_AS` in place the allocator really fails instead of the kernel
//! overcommitting and the OOM killer stepping in.

use nix::libc::{rlim_t, RLIM_INFINITY};
use nix::sys::resource::{getrlimit, setrlimit, Resource};

use crate::error::ProbeError;

/// Current soft limit in bytes, [`None`] when unlimited.
pub fn address_space() -> Result<Option<u64>, ProbeError> {
    let (soft, _hard) = getrlimit(Resource::RLIMIT_AS)?;
    if soft == RLIM_INFINITY {
        Ok(None)
    } else {
        Ok(Some(soft as u64))
    }
}

/// Caps the process' address space at `bytes`, soft and hard.
pub fn limit_address_space(bytes: u64) -> Result<(), ProbeError> {
    info!("limiting address space to {} bytes", bytes);
    setrlimit(Resource::RLIMIT_AS, bytes as rlim_t, bytes as rlim_t)?;
    Ok(())
}
