use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use path_game_core::Seed;

const SECONDS_PER_DAY: u64 = 86_400;

/// Where the seed for the next board comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SeedSource {
    /// Every session, including restarts, uses the same seed.
    Fixed(Seed),
    /// Seed derived from the current UTC date as `YYYYMMDD`.
    Daily,
}

impl SeedSource {
    /// Resolves the seed for the first session.
    pub(crate) fn resolve(&self) -> Result<Seed> {
        match self {
            Self::Fixed(seed) => Ok(*seed),
            Self::Daily => today(),
        }
    }

    /// Seed for a restarted session. `None` keeps the current board.
    pub(crate) fn restart_seed(&self) -> Option<Seed> {
        match self {
            Self::Fixed(_) => None,
            Self::Daily => match today() {
                Ok(seed) => Some(seed),
                Err(error) => {
                    eprintln!("keeping the current board: {error:#}");
                    None
                }
            },
        }
    }
}

/// Parses a `YYYYMMDD` date into its seed, rejecting impossible dates.
pub(crate) fn parse_date(value: &str) -> Result<Seed> {
    let value = value.trim();
    if value.len() != 8 || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        bail!("date '{value}' must be written as YYYYMMDD");
    }

    let number: u32 = value
        .parse()
        .with_context(|| format!("could not parse date '{value}'"))?;
    let (year, month, day) = (number / 10_000, number / 100 % 100, number % 100);
    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        bail!("date '{value}' does not exist");
    }

    Ok(Seed::from_date(year, month, day))
}

fn today() -> Result<Seed> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is set before 1970")?;
    let (year, month, day) = civil_from_days(elapsed.as_secs() / SECONDS_PER_DAY);
    Ok(Seed::from_date(year, month, day))
}

/// Converts days since 1970-01-01 into a proleptic Gregorian date.
fn civil_from_days(days: u64) -> (u32, u32, u32) {
    let shifted = days + 719_468;
    let era = shifted / 146_097;
    let day_of_era = shifted % 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_index = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * month_index + 2) / 5 + 1;
    let month = if month_index < 10 {
        month_index + 3
    } else {
        month_index - 9
    };
    let year = year_of_era + era * 400 + u64::from(month <= 2);

    (year as u32, month as u32, day as u32)
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
