use std::fmt;

#[derive(Debug)]
pub enum ProbeError {
    InvalidChunkSize,
    InvalidSize(String),
    RlimitError(nix::Error),
    MapsError,
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::InvalidChunkSize => write!(f, "chunk size must be greater than zero"),
            ProbeError::InvalidSize(s) => write!(f, "invalid size: {:?}", s),
            ProbeError::RlimitError(e) => write!(f, "cannot apply address space limit: {}", e),
            ProbeError::MapsError => write!(f, "cannot read process maps"),
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::RlimitError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<nix::Error> for ProbeError {
    fn from(e: nix::Error) -> Self {
        ProbeError::RlimitError(e)
    }
}
