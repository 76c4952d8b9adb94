use bytesize::ByteSize;

use crate::error::ProbeError;

/// Parses a byte count such as `512`, `8MB`, `1MiB` or `1.5 GiB`.
///
/// `K`/`M`/`G` suffixes are decimal, `Ki`/`Mi`/`Gi` binary. Sizes past
/// `isize::MAX`, the largest a single allocation can be, are rejected.
pub fn parse_size(s: &str) -> Result<usize, ProbeError> {
    let size: ByteSize = s
        .trim()
        .parse()
        .map_err(|_| ProbeError::InvalidSize(s.to_string()))?;
    to_usize(size).ok_or_else(|| ProbeError::InvalidSize(s.to_string()))
}

fn to_usize(size: ByteSize) -> Option<usize> {
    let bytes = isize::try_from(size.as_u64()).ok()?;
    usize::try_from(bytes).ok()
}
