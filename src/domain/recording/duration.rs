//! Recording time limit for one-shot captures

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// A positive time span parsed from strings like "30s", "1m" or "2m30s"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    milliseconds: u64,
}

impl Duration {
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DurationParseError {
            input: s.to_string(),
        };
        let input = s.trim().to_lowercase();

        let (minutes, rest) = match input.split_once('m') {
            Some((m, rest)) => (Some(m), rest),
            None => (None, input.as_str()),
        };
        let seconds = match rest {
            "" => None,
            r => Some(r.strip_suffix('s').ok_or_else(invalid)?),
        };

        let parse_part = |part: Option<&str>| -> Result<u64, DurationParseError> {
            match part {
                None => Ok(0),
                Some(p) if !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()) => {
                    p.parse().map_err(|_| invalid())
                }
                Some(_) => Err(invalid()),
            }
        };

        if minutes.is_none() && seconds.is_none() {
            return Err(invalid());
        }

        let minutes = parse_part(minutes)?;
        let seconds = parse_part(seconds)?;
        let total_secs = minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .filter(|total| *total <= u64::MAX / 1000)
            .ok_or_else(invalid)?;

        if total_secs == 0 {
            return Err(invalid());
        }

        Ok(Self::from_secs(total_secs))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.milliseconds / 1000;
        match (secs / 60, secs % 60) {
            (0, s) => write!(f, "{}s", s),
            (m, 0) => write!(f, "{}m", m),
            (m, s) => write!(f, "{}m{}s", m, s),
        }
    }
}
