//! Turning whatever points table document we got into [Standings].

mod payload;

pub use payload::Payload;

use crate::error::Result;
use crate::generic_structs::Standings;

/// Parse and normalize in one go.
pub fn normalize(content: &str) -> Result<Standings> {
    Ok(Payload::parse(content)?.into_standings())
}
