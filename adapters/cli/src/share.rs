use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use path_game_core::{BoardSize, GenerationError, Seed};
use path_game_system_score_share::{ScoreReport, ScoreSink, ScoreSinkError};
use serde::{Deserialize, Serialize};

const SHARE_DOMAIN: &str = "path";
const SHARE_VERSION: &str = "v1";
/// Delimiter used to separate the prefix, seed and payload.
const FIELD_DELIMITER: char = ':';

/// Identifier prefix emitted before the seed and the encoded payload.
fn share_header() -> String {
    format!("{SHARE_DOMAIN}{FIELD_DELIMITER}{SHARE_VERSION}")
}

/// Winning score in a form that can be pasted to other players.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ShareCode {
    /// Seed of the board the score was earned on.
    pub(crate) seed: Seed,
    /// Side length of that board.
    pub(crate) size: BoardSize,
    /// Final score.
    pub(crate) score: u64,
}

impl ShareCode {
    /// Encodes the result into a single line.
    pub(crate) fn encode(&self) -> Result<String, ShareCodeError> {
        let payload = SharePayload {
            score: self.score,
            size: self.size.side(),
        };
        let json = serde_json::to_vec(&payload).map_err(ShareCodeError::InvalidPayload)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!(
            "{header}{FIELD_DELIMITER}{seed}{FIELD_DELIMITER}{encoded}",
            header = share_header(),
            seed = self.seed,
        ))
    }

    /// Decodes a result from its single-line form.
    pub(crate) fn decode(value: &str) -> Result<Self, ShareCodeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ShareCodeError::Empty);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(ShareCodeError::MissingPrefix)?;
        let version = parts.next().ok_or(ShareCodeError::MissingVersion)?;
        let seed = parts.next().ok_or(ShareCodeError::MissingSeed)?;
        let payload = parts.next().ok_or(ShareCodeError::MissingPayload)?;

        if domain != SHARE_DOMAIN {
            return Err(ShareCodeError::InvalidPrefix(domain.to_owned()));
        }
        if version != SHARE_VERSION {
            return Err(ShareCodeError::UnsupportedVersion(version.to_owned()));
        }

        let seed = seed
            .trim()
            .parse::<u64>()
            .map(Seed::new)
            .map_err(|_| ShareCodeError::InvalidSeed(seed.to_owned()))?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(ShareCodeError::InvalidEncoding)?;
        let decoded: SharePayload =
            serde_json::from_slice(&bytes).map_err(ShareCodeError::InvalidPayload)?;
        let size = BoardSize::new(decoded.size).map_err(ShareCodeError::InvalidBoard)?;

        Ok(Self {
            seed,
            size,
            score: decoded.score,
        })
    }
}

impl From<ScoreReport> for ShareCode {
    fn from(report: ScoreReport) -> Self {
        Self {
            seed: report.seed,
            size: report.size,
            score: report.score,
        }
    }
}

impl fmt::Display for ShareCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "score {} on the {}x{} board with seed {}",
            self.score,
            self.size.side(),
            self.size.side(),
            self.seed
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SharePayload {
    score: u64,
    size: u32,
}

/// Errors that can occur while handling share strings.
#[derive(Debug)]
pub(crate) enum ShareCodeError {
    /// The provided string was empty or contained only whitespace.
    Empty,
    /// The prefix segment was missing.
    MissingPrefix,
    /// The version segment was missing.
    MissingVersion,
    /// The seed segment was missing.
    MissingSeed,
    /// The payload segment was missing.
    MissingPayload,
    /// The string used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The string used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The seed segment was not an unsigned integer.
    InvalidSeed(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The payload could not be (de)serialised.
    InvalidPayload(serde_json::Error),
    /// The payload named a board size that cannot exist.
    InvalidBoard(GenerationError),
}

impl fmt::Display for ShareCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "share string was empty"),
            Self::MissingPrefix => write!(f, "share string is missing the prefix"),
            Self::MissingVersion => write!(f, "share string is missing the version"),
            Self::MissingSeed => write!(f, "share string is missing the seed"),
            Self::MissingPayload => write!(f, "share string is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "share prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "share version '{version}' is not supported")
            }
            Self::InvalidSeed(seed) => write!(f, "could not parse seed '{seed}'"),
            Self::InvalidEncoding(error) => write!(f, "could not decode share payload: {error}"),
            Self::InvalidPayload(error) => write!(f, "could not parse share payload: {error}"),
            Self::InvalidBoard(error) => write!(f, "share payload names a bad board: {error}"),
        }
    }
}

impl Error for ShareCodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            Self::InvalidBoard(error) => Some(error),
            _ => None,
        }
    }
}

/// Score sink that prints a share string for every winning session.
#[derive(Debug, Default)]
pub(crate) struct StdoutSink {
    printed: Vec<String>,
}

impl StdoutSink {
    /// Share strings printed so far, oldest first.
    pub(crate) fn printed(&self) -> &[String] {
        &self.printed
    }
}

impl ScoreSink for StdoutSink {
    fn send(&mut self, report: ScoreReport) -> Result<(), ScoreSinkError> {
        let code = ShareCode::from(report)
            .encode()
            .map_err(|error| ScoreSinkError::Rejected(error.to_string()))?;
        println!("Share your result: {code}");
        self.printed.push(code);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code() -> ShareCode {
        ShareCode {
            seed: Seed::new(20_240_315),
            size: BoardSize::new(9).expect("valid size"),
            score: 42,
        }
    }

    #[test]
    fn encoded_string_carries_seed_in_clear() {
        let encoded = code().encode().expect("encodes");
        assert!(encoded.starts_with("path:v1:20240315:"));

        let decoded = ShareCode::decode(&encoded).expect("share string decodes");
        assert_eq!(decoded, code());
    }

    #[test]
    fn header_is_built_from_domain_and_version() {
        assert_eq!(share_header(), "path:v1");

        let encoded = code().encode().expect("encodes");
        let mut fields = encoded.split(FIELD_DELIMITER);
        assert_eq!(fields.next(), Some(SHARE_DOMAIN));
        assert_eq!(fields.next(), Some(SHARE_VERSION));
        assert_eq!(fields.next(), Some("20240315"));
        assert!(fields.next().is_some_and(|payload| !payload.is_empty()));
        assert_eq!(fields.next(), None);
    }

    #[test]
    fn decode_rejects_foreign_prefix() {
        let error = ShareCode::decode("grid:v1:1:e30").expect_err("wrong domain");
        assert!(matches!(error, ShareCodeError::InvalidPrefix(prefix) if prefix == "grid"));
    }

    #[test]
    fn decode_rejects_impossible_board() {
        let payload = STANDARD_NO_PAD.encode(br#"{"score":3,"size":8}"#);
        let error = ShareCode::decode(&format!("path:v1:7:{payload}")).expect_err("even size");
        assert!(matches!(
            error,
            ShareCodeError::InvalidBoard(GenerationError::EvenBoardSize { side: 8 })
        ));
    }

    #[test]
    fn decode_reports_missing_segments() {
        assert!(matches!(ShareCode::decode("  "), Err(ShareCodeError::Empty)));
        assert!(matches!(
            ShareCode::decode("path:v1:12"),
            Err(ShareCodeError::MissingPayload)
        ));
        assert!(matches!(
            ShareCode::decode("path:v1:abc:e30"),
            Err(ShareCodeError::InvalidSeed(_))
        ));
    }

    #[test]
    fn stdout_sink_records_each_report() {
        let mut sink = StdoutSink::default();
        let report = ScoreReport {
            seed: Seed::new(5),
            size: BoardSize::new(7).expect("valid size"),
            score: 11,
        };

        sink.send(report).expect("delivery succeeds");

        assert_eq!(sink.printed().len(), 1);
        let decoded = ShareCode::decode(&sink.printed()[0]).expect("decodes");
        assert_eq!(decoded.score, 11);
    }
}
