//! Classification of replies produced by the external reference checker.

use serde::Serialize;

const SUCCESS_PREFIX: &str = "Success";
const TIME_DELIMITER: &str = "===";

/// Outcome reported by the reference checker for a submitted solution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ValidatorReply {
    /// The solution wrapped the map in the reported number of turns.
    Success {
        /// Time units the checker measured.
        time: u32,
    },
    /// Any other reply; the raw text is kept as the diagnostic.
    Failure {
        /// Reply exactly as received, trimmed.
        raw: String,
    },
}

impl ValidatorReply {
    /// Classifies a reply of the form `Success===<time>`.
    #[must_use]
    pub fn classify(reply: &str) -> Self {
        let trimmed = reply.trim();
        let time = trimmed
            .strip_prefix(SUCCESS_PREFIX)
            .and_then(|rest| rest.strip_prefix(TIME_DELIMITER))
            .and_then(|time| time.trim().parse().ok());
        match time {
            Some(time) => Self::Success { time },
            None => Self::Failure {
                raw: trimmed.to_owned(),
            },
        }
    }

    /// Measured time, if the reply reports success.
    #[must_use]
    pub const fn time(&self) -> Option<u32> {
        match self {
            Self::Success { time } => Some(*time),
            Self::Failure { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_reply_carries_time() {
        assert_eq!(
            ValidatorReply::classify("Success===53\n"),
            ValidatorReply::Success { time: 53 }
        );
    }

    #[test]
    fn other_replies_are_failures() {
        let reply = ValidatorReply::classify("Failed: bot 0 entered a wall at (3,4)");
        assert_eq!(reply.time(), None);
        assert_eq!(
            reply,
            ValidatorReply::Failure {
                raw: "Failed: bot 0 entered a wall at (3,4)".to_owned()
            }
        );
        assert!(matches!(
            ValidatorReply::classify("Success===soon"),
            ValidatorReply::Failure { .. }
        ));
    }
}
