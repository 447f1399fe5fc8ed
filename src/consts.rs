/// Earliest supported Gregorian year (inclusive)
pub const MIN_YEAR: u16 = 1900;
/// Latest supported Gregorian year (inclusive)
pub const MAX_YEAR: u16 = 2100;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// A leap year, for checking a month and day without a year
pub(crate) const LEAP_REFERENCE_YEAR: u16 = 2000;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';

/// Lunar new year of 1900 (庚子年正月初一), day zero of the lunar table.
pub const LUNAR_EPOCH: (u16, u8, u8) = (1900, 1, 31);

/// 1900-01-01 was a 甲戌 day: stem 0, branch 10.
pub const CYCLE_EPOCH: (u16, u8, u8) = (1900, 1, 1);
pub(crate) const CYCLE_EPOCH_STEM: i64 = 0;
pub(crate) const CYCLE_EPOCH_BRANCH: i64 = 10;

/// The year stem and branch both start from year 4 (甲子).
pub(crate) const SEXAGENARY_YEAR_OFFSET: i32 = 4;

pub const STEM_COUNT: usize = 10;
pub const BRANCH_COUNT: usize = 12;
pub const ELEMENT_COUNT: usize = 5;
pub const SIGN_COUNT: usize = 12;
pub const SEXAGENARY_CYCLE: usize = 60;

/// Twelve 29-day months; every long month and the leap month add to this.
pub(crate) const LUNAR_YEAR_BASE_DAYS: u16 = 348;
pub(crate) const SHORT_MONTH_DAYS: u16 = 29;
pub(crate) const LONG_MONTH_DAYS: u16 = 30;

/// Civil time of the original deployment (Asia/Taipei, UTC+8).
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 8 * 60;

/// `LUNAR_EPOCH` and `CYCLE_EPOCH` as days since 0001-01-01 (day 1).
pub(crate) const LUNAR_EPOCH_DAY_NUMBER: i32 = 693_626;
pub(crate) const CYCLE_EPOCH_DAY_NUMBER: i32 = 693_596;
