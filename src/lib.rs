//! Lunisolar almanac: converts a Gregorian date into the traditional lunar
//! date and its sexagenary (干支) pillars, ranks the five-element dress
//! colours of the day, and groups the twelve sun signs by elemental
//! compatibility with the sign of the date.
//!
//! ```
//! use wuxing_almanac::{SolarDate, today_info};
//!
//! let date: SolarDate = "2023-01-22".parse().unwrap();
//! let info = today_info(date).unwrap();
//!
//! assert_eq!(info.date.lunar.to_string(), "正月初一");
//! assert_eq!(info.date.gan_zhi.year.to_string(), "癸卯");
//! ```

mod almanac;
mod config;
mod consts;
mod ganzhi;
mod horoscope;
mod lunar;
mod prelude;
mod types;
mod wuxing;

pub use almanac::{
    full_date_info, full_date_info_or_now, today_info, today_info_or_now, FullDateInfo, SolarInfo,
    TodayInfo,
};
pub use config::Settings;
pub use consts::*;
pub use ganzhi::{
    day_pillar, sexagenary_cycle, weekday, Animal, Branch, Pillar, SexagenaryCycle, Stem, Weekday,
};
pub use horoscope::{
    calculate_zodiac_horoscope, sun_sign, Aspect, Horoscope, SignElement, SignRange, ZodiacSign,
    SIGN_RANGES,
};
pub use lunar::{
    day_name, lunar_to_solar, solar_to_lunar, LunarDate, LunarMonth, LunarYearRecord,
};
pub use types::{Day, Month, Year};
pub use wuxing::{
    calculate_dress_colors, calculate_dress_colors_for_index, ColorFortune, Element,
    ElementFortune, FortuneLevel,
};

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Error type for every fallible operation in the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Year outside the span of the lunar table.
    #[error("Year {0} is out of range (must be {min}-{max})", min = MIN_YEAR, max = MAX_YEAR)]
    YearOutOfRange(i32),
    /// Civil date earlier than the first lunar new year in the table.
    #[error("Date {year:04}-{month:02}-{day:02} precedes the first lunar new year in the table")]
    BeforeLunarEpoch { year: u16, month: u8, day: u8 },
    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),
    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),
    #[error("Empty date string")]
    EmptyInput,
    /// Lunar date that does not exist in the table.
    #[error("No lunar date {year}-{month:02}-{day:02} (leap: {is_leap})")]
    InvalidLunarDate {
        year: u16,
        month: u8,
        day: u8,
        is_leap: bool,
    },
    #[error("Invalid earthly branch index: {0} (must be 0-11)")]
    InvalidBranch(u8),
    #[error("Invalid UTC offset: {0} minutes")]
    InvalidUtcOffset(i32),
}

/// A Gregorian civil date inside the supported range (1900-01-01 to 2100-12-31).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SolarDate {
    year: Year,
    month: Month,
    day: Day,
    naive: NaiveDate,
}

impl SolarDate {
    /// Creates a validated date.
    ///
    /// # Errors
    /// `YearOutOfRange`, `InvalidMonth` or `InvalidDay` for malformed input.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, CalendarError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let invalid = CalendarError::InvalidDay {
            year: year.get(),
            month: month.get(),
            day,
        };
        let day = Day::try_from(day).map_err(|_| invalid)?;
        Self::from_parts(year, month, day)
    }

    /// Creates a date from already validated components. The day is checked
    /// against the month here.
    ///
    /// # Errors
    /// `InvalidDay` if `day` does not exist in that month of that year.
    pub fn from_parts(year: Year, month: Month, day: Day) -> Result<Self, CalendarError> {
        let naive = NaiveDate::from_ymd_opt(
            i32::from(year.get()),
            u32::from(month.get()),
            u32::from(day.get()),
        )
        .ok_or(CalendarError::InvalidDay {
            year: year.get(),
            month: month.get(),
            day: day.get(),
        })?;
        Ok(Self {
            year,
            month,
            day,
            naive,
        })
    }

    /// # Errors
    /// `YearOutOfRange` if the date is outside 1900..=2100.
    pub fn from_naive(naive: NaiveDate) -> Result<Self, CalendarError> {
        let year = Year::try_from(naive.year())?;
        let month = u8::try_from(naive.month())
            .map_err(|_| CalendarError::InvalidFormat(naive.to_string()))?;
        let day = u8::try_from(naive.day())
            .map_err(|_| CalendarError::InvalidFormat(naive.to_string()))?;
        let month = Month::new(month)?;
        let day = Day::try_from(day)?;
        Ok(Self {
            year,
            month,
            day,
            naive,
        })
    }

    #[inline]
    pub const fn year(self) -> u16 {
        self.year.get()
    }

    #[inline]
    pub const fn month(self) -> u8 {
        self.month.get()
    }

    #[inline]
    pub const fn day(self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(self) -> Year {
        self.year
    }

    pub const fn month_typed(self) -> Month {
        self.month
    }

    pub const fn day_typed(self) -> Day {
        self.day
    }

    pub const fn as_naive(self) -> NaiveDate {
        self.naive
    }

    /// The following day, or `None` past 2100-12-31.
    pub fn succ(self) -> Option<Self> {
        self.naive
            .succ_opt()
            .and_then(|next| Self::from_naive(next).ok())
    }

    /// The preceding day, or `None` before 1900-01-01.
    pub fn pred(self) -> Option<Self> {
        self.naive
            .pred_opt()
            .and_then(|prev| Self::from_naive(prev).ok())
    }

    /// Days counted from 0001-01-01 (day 1), the scale the epochs are expressed in.
    pub(crate) fn day_number(self) -> i32 {
        self.naive.num_days_from_ce()
    }
}

impl fmt::Display for SolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{DATE_SEPARATOR}{:02}{DATE_SEPARATOR}{:02}",
            self.year(),
            self.month(),
            self.day()
        )
    }
}

impl FromStr for SolarDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CalendarError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(CalendarError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {trimmed}"
            )));
        }

        let year = parse_number::<u16>(parts[0])?;
        let month = parse_number::<u8>(parts[1])?;
        let day = parse_number::<u8>(parts[2])?;
        Self::new(year, month, day)
    }
}

impl TryFrom<(u16, u8, u8)> for SolarDate {
    type Error = CalendarError;

    fn try_from((year, month, day): (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

fn parse_number<T: FromStr>(s: &str) -> Result<T, CalendarError> {
    s.parse::<T>()
        .map_err(|_| CalendarError::InvalidFormat(s.to_owned()))
}

impl serde::Serialize for SolarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for SolarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
