//! Runtime settings.
//!
//! The only setting is the civil-time offset used when the caller does not
//! supply a date. There is no timezone database: the offset is fixed.

use crate::consts::{DEFAULT_UTC_OFFSET_MINUTES, MAX_YEAR};
use crate::{CalendarError, SolarDate};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minutes east of UTC, e.g. 480 for UTC+8.
    pub utc_offset_minutes: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}

impl Settings {
    /// # Errors
    /// Returns `CalendarError::InvalidUtcOffset` unless the offset is under a day either way.
    pub fn with_utc_offset(minutes: i32) -> Result<Self, CalendarError> {
        let settings = Self {
            utc_offset_minutes: minutes,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Deserialized settings are not checked until this is called.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidUtcOffset` for an offset of a day or more.
    pub fn validate(&self) -> Result<(), CalendarError> {
        self.offset().map(|_| ())
    }

    fn offset(&self) -> Result<FixedOffset, CalendarError> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(CalendarError::InvalidUtcOffset(self.utc_offset_minutes))
    }

    /// Civil date at `instant` in the configured offset.
    ///
    /// # Errors
    /// `InvalidUtcOffset`, or `YearOutOfRange` outside 1900..=2100.
    pub fn date_at(&self, instant: DateTime<Utc>) -> Result<SolarDate, CalendarError> {
        let local = instant.with_timezone(&self.offset()?);
        SolarDate::from_naive(local.date_naive())
    }

    /// # Errors
    /// See [`Settings::date_at`].
    pub fn today(&self) -> Result<SolarDate, CalendarError> {
        self.date_at(Utc::now())
    }

    /// # Errors
    /// See [`Settings::date_at`]; also `YearOutOfRange` on 2100-12-31.
    pub fn tomorrow(&self) -> Result<SolarDate, CalendarError> {
        self.today()?
            .succ()
            .ok_or(CalendarError::YearOutOfRange(i32::from(MAX_YEAR) + 1))
    }

    /// `date` if given, otherwise today.
    ///
    /// # Errors
    /// See [`Settings::today`].
    pub fn resolve(&self, date: Option<SolarDate>) -> Result<SolarDate, CalendarError> {
        date.map_or_else(|| self.today(), Ok)
    }
}
