//! Single-line share codes for puzzle layouts.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use phrase_push_core::{BlockPlacement, Layout};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CODE_DOMAIN: &str = "phrase";
const CODE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded layout payload.
pub(crate) const CODE_HEADER: &str = "phrase:v1";
/// Delimiter used to separate the prefix, board dimensions and payload.
const FIELD_DELIMITER: char = ':';

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableLayout {
    player: u32,
    phrase: String,
    push_limit: u32,
    blocks: Vec<BlockPlacement>,
}

/// Encodes the layout into a single-line string suitable for clipboard transfer.
pub(crate) fn encode(layout: &Layout) -> Result<String, LayoutCodeError> {
    let payload = SerializableLayout {
        player: layout.player,
        phrase: layout.phrase.clone(),
        push_limit: layout.push_limit,
        blocks: layout.blocks.clone(),
    };
    let json = serde_json::to_vec(&payload).map_err(LayoutCodeError::InvalidPayload)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    Ok(format!(
        "{CODE_HEADER}:{}x{}:{encoded}",
        layout.side, layout.side
    ))
}

/// Decodes a layout from the provided share code.
pub(crate) fn decode(value: &str) -> Result<Layout, LayoutCodeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LayoutCodeError::EmptyPayload);
    }

    let segments: Vec<&str> = trimmed.split(FIELD_DELIMITER).collect();
    let (domain, version, dimensions, payload) = match segments.as_slice() {
        [domain, version, dimensions, payload] => (*domain, *version, *dimensions, *payload),
        [_, _, _, _, extra @ ..] => return Err(LayoutCodeError::TrailingSegments(extra.len())),
        [_, _, _] => return Err(LayoutCodeError::MissingPayload),
        [_, _] => return Err(LayoutCodeError::MissingDimensions),
        _ => return Err(LayoutCodeError::MissingVersion),
    };

    if domain != CODE_DOMAIN {
        return Err(LayoutCodeError::InvalidPrefix(domain.to_owned()));
    }
    if version != CODE_VERSION {
        return Err(LayoutCodeError::UnsupportedVersion(version.to_owned()));
    }

    let side = parse_side(dimensions)?;
    let bytes = STANDARD_NO_PAD
        .decode(payload)
        .map_err(LayoutCodeError::InvalidEncoding)?;
    let SerializableLayout {
        player,
        phrase,
        push_limit,
        blocks,
    } = serde_json::from_slice(&bytes).map_err(LayoutCodeError::InvalidPayload)?;

    Ok(Layout {
        side,
        player,
        phrase,
        push_limit,
        blocks,
    })
}

/// Errors that can occur while encoding or decoding layout share codes.
#[derive(Debug, Error)]
pub(crate) enum LayoutCodeError {
    /// The provided string was empty or contained only whitespace.
    #[error("layout code was empty")]
    EmptyPayload,
    /// The code did not contain a version segment.
    #[error("layout code is missing the version")]
    MissingVersion,
    /// The code did not include board dimensions.
    #[error("layout code is missing the board dimensions")]
    MissingDimensions,
    /// The code did not include the payload segment.
    #[error("layout code is missing the payload")]
    MissingPayload,
    /// Segments followed the payload.
    #[error("layout code has {0} unexpected segment(s) after the payload")]
    TrailingSegments(usize),
    /// The code used an unexpected prefix segment.
    #[error("layout prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The code used an unsupported version identifier.
    #[error("layout version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The board dimensions were malformed or not square.
    #[error("could not parse board dimensions '{0}'")]
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode layout payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The payload could not be serialised or deserialised.
    #[error("could not process layout payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

/// Reads the board side from a `<columns>x<rows>` segment; boards are square.
fn parse_side(dimensions: &str) -> Result<u32, LayoutCodeError> {
    let invalid = || LayoutCodeError::InvalidDimensions(dimensions.to_owned());
    let (columns, rows) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;
    let parse = |text: &str| text.trim().parse::<u32>().ok().filter(|&count| count > 0);

    match (parse(columns), parse(rows)) {
        (Some(columns), Some(rows)) if columns == rows => Ok(columns),
        _ => Err(invalid()),
    }
}
