//! Loading of the API description payload.
//!
//! The host tool that parses the API definition language hands over a JSON
//! payload of the IR (see [`crate::ir`]). This module reads that payload from
//! a file, or from standard input when the path is `-`, and decodes it.

use crate::error::{Error, Result};
use crate::ir::ApiDescription;
use log::debug;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Reads and decodes an API description payload.
///
/// # Errors
///
/// Returns an error if the payload cannot be read or is not a valid
/// description document.
pub fn load_description(path: &Path) -> Result<ApiDescription> {
    debug!("Loading API description from {}", path.display());

    let payload = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(path)?
    };

    decode_description(&payload, path)
}

/// Decodes a payload already held in memory; `origin` names it in errors.
pub fn decode_description(payload: &str, origin: &Path) -> Result<ApiDescription> {
    let description: ApiDescription =
        serde_json::from_str(payload).map_err(|err| Error::Decode {
            file: origin.to_path_buf(),
            message: err.to_string(),
        })?;

    debug!(
        "Loaded service {} with {} groups and {} types",
        description.service.name,
        description.service.groups.len(),
        description.types.len()
    );
    Ok(description)
}
