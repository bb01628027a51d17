#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use breeding_planner_core::Creature;

const TRANSFER_DOMAIN: &str = "creature";
const TRANSFER_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded creature payload.
pub(crate) const TRANSFER_HEADER: &str = "creature:v1";
/// Delimiter used to separate the prefix, version and payload.
const FIELD_DELIMITER: char = ':';

/// Encodes a creature into a single-line string suitable for clipboard transfer.
#[must_use]
pub(crate) fn encode(creature: &Creature) -> String {
    let json = serde_json::to_vec(creature).expect("creature serialization never fails");
    let encoded = STANDARD_NO_PAD.encode(json);
    format!("{TRANSFER_HEADER}:{encoded}")
}

/// Decodes a creature from the provided string representation.
pub(crate) fn decode(value: &str) -> Result<Creature, CreatureTransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CreatureTransferError::EmptyPayload);
    }

    let mut parts = trimmed.split(FIELD_DELIMITER);
    let domain = parts.next().ok_or(CreatureTransferError::MissingPrefix)?;
    let version = parts.next().ok_or(CreatureTransferError::MissingVersion)?;
    let payload = parts.next().ok_or(CreatureTransferError::MissingPayload)?;

    if domain != TRANSFER_DOMAIN {
        return Err(CreatureTransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != TRANSFER_VERSION {
        return Err(CreatureTransferError::UnsupportedVersion(version.to_owned()));
    }

    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(CreatureTransferError::InvalidEncoding)?;
    let creature: Creature =
        serde_json::from_slice(&bytes).map_err(CreatureTransferError::InvalidPayload)?;

    Ok(creature)
}

/// Errors that can occur while decoding creature transfer strings.
#[derive(Debug)]
pub(crate) enum CreatureTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded creature.
    MissingPrefix,
    /// The encoded creature did not contain a version segment.
    MissingVersion,
    /// The encoded creature did not include the payload segment.
    MissingPayload,
    /// The encoded creature used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded creature used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for CreatureTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "clipboard payload was empty"),
            Self::MissingPrefix => write!(f, "creature string is missing the prefix"),
            Self::MissingVersion => write!(f, "creature string is missing the version"),
            Self::MissingPayload => write!(f, "creature string is missing the payload"),
            Self::InvalidPrefix(prefix) => {
                write!(f, "creature prefix '{prefix}' is not supported")
            }
            Self::UnsupportedVersion(version) => {
                write!(f, "creature version '{version}' is not supported")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode creature payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse creature payload: {error}")
            }
        }
    }
}

impl Error for CreatureTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breeding_planner_core::{CreatureId, Sex, STAT_COUNT};

    fn creature() -> Creature {
        let mut levels_wild = [0; STAT_COUNT];
        levels_wild[0] = 32;
        levels_wild[7] = 24;
        levels_wild[8] = 41;
        Creature {
            id: CreatureId::new(17),
            name: "Hildegard".to_owned(),
            sex: Sex::Female,
            levels_wild,
            mutations: 3,
        }
    }

    #[test]
    fn round_trip_creature() {
        let original = creature();

        let encoded = encode(&original);
        assert!(encoded.starts_with(&format!("{TRANSFER_HEADER}:")));

        let decoded = decode(&encoded).expect("creature decodes");
        assert_eq!(original, decoded);
    }

    #[test]
    fn round_trip_ignores_surrounding_whitespace() {
        let original = creature();
        let encoded = format!("  {}\n", encode(&original));

        let decoded = decode(&encoded).expect("creature decodes");
        assert_eq!(original, decoded);
    }

    #[test]
    fn empty_string_is_rejected() {
        assert!(matches!(
            decode("   "),
            Err(CreatureTransferError::EmptyPayload)
        ));
    }

    #[test]
    fn foreign_prefix_is_rejected() {
        assert!(matches!(
            decode("tower:v1:AAAA"),
            Err(CreatureTransferError::InvalidPrefix(prefix)) if prefix == "tower"
        ));
    }

    #[test]
    fn unsupported_version_is_rejected() {
        assert!(matches!(
            decode("creature:v2:AAAA"),
            Err(CreatureTransferError::UnsupportedVersion(version)) if version == "v2"
        ));
    }

    #[test]
    fn missing_payload_is_rejected() {
        assert!(matches!(
            decode("creature:v1"),
            Err(CreatureTransferError::MissingPayload)
        ));
    }

    #[test]
    fn garbage_payload_is_rejected() {
        assert!(matches!(
            decode("creature:v1:!!!!"),
            Err(CreatureTransferError::InvalidEncoding(_))
        ));
    }
}
