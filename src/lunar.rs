//! Lunar calendar table and solar/lunar conversion.
//!
//! Each year of the table packs its month lengths into one integer:
//!
//! - bits 0-3: the month followed by a leap month (0 = no leap month)
//! - bits 4-15: one flag per regular month, month 1 in bit 15 down to month 12 in bit 4;
//!   a set flag is a 30-day month, a clear one 29 days
//! - bit 16: set if the leap month has 30 days

use crate::consts::{
    LONG_MONTH_DAYS, LUNAR_EPOCH_DAY_NUMBER, LUNAR_YEAR_BASE_DAYS, MAX_MONTH, MAX_YEAR, MIN_YEAR,
    SHORT_MONTH_DAYS,
};
use crate::{CalendarError, SolarDate};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

const LEAP_MONTH_MASK: u32 = 0xf;
const LONG_MONTH_FLAGS_SHIFT: u32 = 4;
const LONG_MONTH_FLAGS_MASK: u32 = 0xfff;
const LONG_LEAP_MONTH_FLAG: u32 = 0x1_0000;

static LUNAR_INFO: [u32; (MAX_YEAR - MIN_YEAR + 1) as usize] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900-1909
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910-1919
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920-1929
    0x06566, 0x0d4a0, 0x0ea50, 0x06e95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930-1939
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940-1949
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950-1959
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960-1969
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970-1979
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980-1989
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x055c0, 0x0ab60, 0x096d5, 0x092e0, // 1990-1999
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000-2009
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010-2019
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020-2029
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030-2039
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040-2049
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050-2059
    0x0a2e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060-2069
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070-2079
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080-2089
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090-2099
    0x0d520, // 2100
];

static MONTH_NAMES: [&str; 12] = [
    "正", "二", "三", "四", "五", "六", "七", "八", "九", "十", "冬", "臘",
];

/// Chinese numerals; index 0 is 「十」 so day names can be built from `day % 10`.
static NUM_CHINESE: [&str; 10] = ["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// The decoded table entry for one lunar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarYearRecord {
    year: u16,
    bits: u32,
}

impl LunarYearRecord {
    /// # Errors
    /// Returns `CalendarError::YearOutOfRange` if the table has no entry for `year`.
    pub fn for_year(year: u16) -> Result<Self, CalendarError> {
        year.checked_sub(MIN_YEAR)
            .and_then(|index| LUNAR_INFO.get(usize::from(index)))
            .map(|&bits| Self { year, bits })
            .ok_or(CalendarError::YearOutOfRange(i32::from(year)))
    }

    /// Every record in the table, in year order.
    pub fn all() -> impl Iterator<Item = Self> {
        (MIN_YEAR..=MAX_YEAR)
            .zip(LUNAR_INFO.iter())
            .map(|(year, &bits)| Self { year, bits })
    }

    #[inline]
    pub const fn year(self) -> u16 {
        self.year
    }

    /// The regular month that is followed by a leap month, if any.
    pub const fn leap_month(self) -> Option<u8> {
        match (self.bits & LEAP_MONTH_MASK) as u8 {
            0 => None,
            month => Some(month),
        }
    }

    pub const fn leap_month_days(self) -> u16 {
        if self.leap_month().is_none() {
            0
        } else if self.bits & LONG_LEAP_MONTH_FLAG != 0 {
            LONG_MONTH_DAYS
        } else {
            SHORT_MONTH_DAYS
        }
    }

    /// Length of regular month `month`, `None` unless it is in `1..=12`.
    pub const fn month_days(self, month: u8) -> Option<u16> {
        if month == 0 || month > MAX_MONTH {
            return None;
        }
        Some(self.regular_month_days(month))
    }

    /// `month` must be in `1..=12`.
    const fn regular_month_days(self, month: u8) -> u16 {
        if self.bits & (LONG_LEAP_MONTH_FLAG >> month) != 0 {
            LONG_MONTH_DAYS
        } else {
            SHORT_MONTH_DAYS
        }
    }

    /// Length of `month` in this year. A leap month is only meaningful when it
    /// is [`LunarYearRecord::leap_month`].
    pub const fn days_in(self, month: LunarMonth) -> u16 {
        if month.is_leap {
            self.leap_month_days()
        } else {
            self.regular_month_days(month.num)
        }
    }

    /// Total length of the year: 348 days, one more per long month, plus the leap month.
    pub const fn year_days(self) -> u16 {
        let long_months = ((self.bits >> LONG_MONTH_FLAGS_SHIFT) & LONG_MONTH_FLAGS_MASK).count_ones();
        LUNAR_YEAR_BASE_DAYS + long_months as u16 + self.leap_month_days()
    }

    /// Months in calendar order with their lengths; the leap month follows its namesake.
    pub fn months(self) -> impl Iterator<Item = (LunarMonth, u16)> {
        let leap = self.leap_month();
        (1..=MAX_MONTH).flat_map(move |m| {
            let common = Some((LunarMonth::checked(m, false), self.regular_month_days(m)));
            let intercalary =
                (leap == Some(m)).then(|| (LunarMonth::checked(m, true), self.leap_month_days()));
            common.into_iter().chain(intercalary)
        })
    }
}

/// A lunar month: a regular month, or the intercalary month that repeats
/// the number of the month before it. Always numbered `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LunarMonth {
    num: u8,
    is_leap: bool,
}

impl LunarMonth {
    /// # Errors
    /// Returns `CalendarError::InvalidMonth` unless `num` is in `1..=12`.
    pub fn new(num: u8, is_leap: bool) -> Result<Self, CalendarError> {
        if num == 0 || num > MAX_MONTH {
            return Err(CalendarError::InvalidMonth(num));
        }
        Ok(Self::checked(num, is_leap))
    }

    /// # Errors
    /// See [`LunarMonth::new`].
    pub fn common(num: u8) -> Result<Self, CalendarError> {
        Self::new(num, false)
    }

    /// # Errors
    /// See [`LunarMonth::new`].
    pub fn leap(num: u8) -> Result<Self, CalendarError> {
        Self::new(num, true)
    }

    /// `num` must be in `1..=12`.
    const fn checked(num: u8, is_leap: bool) -> Self {
        Self { num, is_leap }
    }

    /// Month number, regardless of leap.
    pub const fn num(self) -> u8 {
        self.num
    }

    pub const fn is_leap(self) -> bool {
        self.is_leap
    }

    /// 「正月」..「臘月」, with 「閏」 in front of a leap month.
    pub fn name(self) -> String {
        let mut name = String::new();
        if self.is_leap {
            name += "閏";
        }
        name += MONTH_NAMES[usize::from(self.num - 1)];
        name += "月";
        name
    }
}

impl fmt::Display for LunarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// 「初一」..「初十」, 「十一」..「十九」, 「二十」, 「廿一」..「廿九」, 「三十」;
/// `None` unless `day` is in `1..=30`.
pub fn day_name(day: u8) -> Option<String> {
    let prefix = match day {
        1..=10 => "初",
        11..=19 => "十",
        20 => "二",
        21..=29 => "廿",
        30 => "三",
        _ => return None,
    };
    Some(prefix.to_owned() + NUM_CHINESE[usize::from(day % 10)])
}

/// A date in the lunar calendar, with its display names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LunarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub is_leap: bool,
    pub month_name: String,
    pub day_name: String,
}

impl LunarDate {
    fn new(year: u16, month: LunarMonth, day: u8) -> Result<Self, CalendarError> {
        let day_name = day_name(day).ok_or(CalendarError::InvalidLunarDate {
            year,
            month: month.num(),
            day,
            is_leap: month.is_leap(),
        })?;
        Ok(Self {
            year,
            month: month.num(),
            day,
            is_leap: month.is_leap(),
            month_name: month.name(),
            day_name,
        })
    }

    /// # Errors
    /// `InvalidMonth` if `month` was set outside `1..=12`.
    pub fn lunar_month(&self) -> Result<LunarMonth, CalendarError> {
        LunarMonth::new(self.month, self.is_leap)
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.month_name, self.day_name)
    }
}

/// Converts a civil date to its lunar date by walking the table forward
/// from the lunar new year of 1900, a year and then a month at a time.
///
/// # Errors
/// `BeforeLunarEpoch` for 1900-01-01..=1900-01-30, which belong to the
/// lunar year 1899.
pub fn solar_to_lunar(date: SolarDate) -> Result<LunarDate, CalendarError> {
    let mut offset = date.day_number() - LUNAR_EPOCH_DAY_NUMBER;
    if offset < 0 {
        return Err(CalendarError::BeforeLunarEpoch {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        });
    }

    let out_of_table = CalendarError::YearOutOfRange(i32::from(date.year()));
    let mut records = LunarYearRecord::all();
    let record = loop {
        let record = records.next().ok_or_else(|| out_of_table.clone())?;
        let days = i32::from(record.year_days());
        if offset < days {
            break record;
        }
        offset -= days;
    };

    for (month, days) in record.months() {
        let days = i32::from(days);
        if offset < days {
            let day = u8::try_from(offset + 1).map_err(|_| out_of_table.clone())?;
            return LunarDate::new(record.year(), month, day);
        }
        offset -= days;
    }
    Err(out_of_table)
}

/// Converts a lunar date back to the civil calendar.
///
/// # Errors
/// `YearOutOfRange` if `year` is not in the table (or the date falls after
/// 2100-12-31), `InvalidLunarDate` if the month, leap flag or day does not
/// exist in that year.
pub fn lunar_to_solar(
    year: u16,
    month: u8,
    day: u8,
    is_leap: bool,
) -> Result<SolarDate, CalendarError> {
    let record = LunarYearRecord::for_year(year)?;
    let invalid = CalendarError::InvalidLunarDate {
        year,
        month,
        day,
        is_leap,
    };
    let target = LunarMonth::new(month, is_leap).map_err(|_| invalid.clone())?;

    let mut offset: i32 = LunarYearRecord::all()
        .take_while(|r| r.year() < year)
        .map(|r| i32::from(r.year_days()))
        .sum();

    let mut found = false;
    for (candidate, days) in record.months() {
        if candidate == target {
            if day == 0 || u16::from(day) > days {
                return Err(invalid);
            }
            found = true;
            break;
        }
        offset += i32::from(days);
    }
    if !found {
        return Err(invalid);
    }
    offset += i32::from(day) - 1;

    let naive = NaiveDate::from_num_days_from_ce_opt(LUNAR_EPOCH_DAY_NUMBER + offset)
        .ok_or(invalid)?;
    SolarDate::from_naive(naive)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solar(year: u16, month: u8, day: u8) -> SolarDate {
        SolarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn test_table_covers_range() {
        assert_eq!(LunarYearRecord::all().count(), 201);
        assert!(LunarYearRecord::for_year(1900).is_ok());
        assert!(LunarYearRecord::for_year(2100).is_ok());
        assert!(matches!(
            LunarYearRecord::for_year(1899),
            Err(CalendarError::YearOutOfRange(1899))
        ));
        assert!(matches!(
            LunarYearRecord::for_year(2101),
            Err(CalendarError::YearOutOfRange(2101))
        ));
    }

    #[test]
    fn test_year_days_match_month_sum() {
        for record in LunarYearRecord::all() {
            let sum: u16 = record.months().map(|(_, days)| days).sum();
            assert_eq!(sum, record.year_days(), "year {}", record.year());
            assert!(
                (353..=385).contains(&record.year_days()),
                "year {} has {} days",
                record.year(),
                record.year_days()
            );
        }
    }

    #[test]
    fn test_at_most_one_leap_month() {
        for record in LunarYearRecord::all() {
            let leaps: Vec<_> = record.months().filter(|(m, _)| m.is_leap()).collect();
            let expected = usize::from(record.leap_month().is_some());
            assert_eq!(leaps.len(), expected, "year {}", record.year());
            if let Some(leap) = record.leap_month() {
                assert!((1..=12).contains(&leap));
                assert_eq!(leaps[0].0, LunarMonth::leap(leap).unwrap());
            }
        }
    }

    #[test]
    fn test_decode_known_years() {
        let cases = [
            (1900, 384, Some(8), 29),
            (2017, 384, Some(6), 30),
            (2020, 384, Some(4), 29),
            (2023, 384, Some(2), 29),
            (2024, 354, None, 0),
            (2025, 384, Some(6), 29),
        ];
        for (year, days, leap, leap_days) in cases {
            let record = LunarYearRecord::for_year(year).unwrap();
            assert_eq!(record.year_days(), days, "year {year}");
            assert_eq!(record.leap_month(), leap, "year {year}");
            assert_eq!(record.leap_month_days(), leap_days, "year {year}");
        }

        let record = LunarYearRecord::for_year(2024).unwrap();
        let lengths: Vec<u16> = (1..=12).filter_map(|m| record.month_days(m)).collect();
        assert_eq!(lengths, [29, 30, 29, 29, 30, 29, 30, 30, 29, 30, 30, 29]);
    }

    #[test]
    fn test_month_days_rejects_out_of_range_month() {
        // bits below month 12 hold the leap month, not month-length flags
        let record = LunarYearRecord::for_year(2023).unwrap();
        for month in [0, 13, 16, u8::MAX] {
            assert_eq!(record.month_days(month), None, "month {month}");
        }
        assert_eq!(record.month_days(12), Some(30));
    }

    #[test]
    fn test_months_order_places_leap_after_namesake() {
        let record = LunarYearRecord::for_year(2023).unwrap();
        let months: Vec<LunarMonth> = record.months().map(|(m, _)| m).collect();
        assert_eq!(months.len(), 13);
        assert_eq!(months[1], LunarMonth::common(2).unwrap());
        assert_eq!(months[2], LunarMonth::leap(2).unwrap());
        assert_eq!(months[3], LunarMonth::common(3).unwrap());
    }

    #[test]
    fn test_solar_to_lunar_scenarios() {
        let cases = [
            ((1900, 1, 31), (1900, 1, 1, false)),
            ((2000, 1, 1), (1999, 11, 25, false)),
            ((2017, 7, 22), (2017, 6, 29, false)),
            ((2017, 7, 23), (2017, 6, 1, true)),
            ((2017, 8, 22), (2017, 7, 1, false)),
            ((2020, 5, 23), (2020, 4, 1, true)),
            ((2023, 1, 21), (2022, 12, 30, false)),
            ((2023, 1, 22), (2023, 1, 1, false)),
            ((2024, 2, 9), (2023, 12, 30, false)),
            ((2024, 2, 10), (2024, 1, 1, false)),
            ((2025, 10, 15), (2025, 8, 24, false)),
            ((2100, 12, 31), (2100, 12, 1, false)),
        ];
        for ((y, m, d), (ly, lm, ld, leap)) in cases {
            let lunar = solar_to_lunar(solar(y, m, d)).unwrap();
            assert_eq!(
                (lunar.year, lunar.month, lunar.day, lunar.is_leap),
                (ly, lm, ld, leap),
                "{y}-{m:02}-{d:02}"
            );
        }
    }

    #[test]
    fn test_solar_to_lunar_names() {
        let lunar = solar_to_lunar(solar(2017, 7, 23)).unwrap();
        assert_eq!(lunar.month_name, "閏六月");
        assert_eq!(lunar.day_name, "初一");
        assert_eq!(lunar.lunar_month().unwrap(), LunarMonth::leap(6).unwrap());
        assert_eq!(lunar.to_string(), "閏六月初一");

        let lunar = solar_to_lunar(solar(2000, 1, 1)).unwrap();
        assert_eq!(lunar.to_string(), "冬月廿五");

        let lunar = solar_to_lunar(solar(2023, 1, 21)).unwrap();
        assert_eq!(lunar.to_string(), "臘月三十");
    }

    #[test]
    fn test_before_epoch() {
        assert!(matches!(
            solar_to_lunar(solar(1900, 1, 30)),
            Err(CalendarError::BeforeLunarEpoch {
                year: 1900,
                month: 1,
                day: 30
            })
        ));
        assert!(solar_to_lunar(solar(1900, 1, 1)).is_err());
    }

    #[test]
    fn test_lunar_day_within_month_length() {
        let mut date = Some(solar(1900, 1, 31));
        while let Some(current) = date {
            let lunar = solar_to_lunar(current).unwrap();
            let record = LunarYearRecord::for_year(lunar.year).unwrap();
            assert!(lunar.day >= 1);
            assert!(u16::from(lunar.day) <= record.days_in(lunar.lunar_month().unwrap()));
            if lunar.is_leap {
                assert_eq!(record.leap_month(), Some(lunar.month));
            }
            date = current.succ();
        }
    }

    #[test]
    fn test_round_trip_every_day() {
        let mut date = Some(solar(1900, 1, 31));
        while let Some(current) = date {
            let lunar = solar_to_lunar(current).unwrap();
            let back = lunar_to_solar(lunar.year, lunar.month, lunar.day, lunar.is_leap).unwrap();
            assert_eq!(back, current);
            date = current.succ();
        }
    }

    #[test]
    fn test_lunar_to_solar_known_dates() {
        assert_eq!(lunar_to_solar(1900, 1, 1, false).unwrap(), solar(1900, 1, 31));
        assert_eq!(lunar_to_solar(2023, 1, 1, false).unwrap(), solar(2023, 1, 22));
        assert_eq!(lunar_to_solar(2017, 6, 1, true).unwrap(), solar(2017, 7, 23));
    }

    #[test]
    fn test_lunar_to_solar_invalid() {
        // 2024 has no leap month
        assert!(matches!(
            lunar_to_solar(2024, 4, 1, true),
            Err(CalendarError::InvalidLunarDate { .. })
        ));
        // month 4 of 2024 has 29 days
        assert!(matches!(
            lunar_to_solar(2024, 4, 30, false),
            Err(CalendarError::InvalidLunarDate { .. })
        ));
        assert!(lunar_to_solar(2024, 13, 1, false).is_err());
        assert!(lunar_to_solar(2024, 1, 0, false).is_err());
        assert!(matches!(
            lunar_to_solar(2101, 1, 1, false),
            Err(CalendarError::YearOutOfRange(2101))
        ));
        // lunar 2100-12-29 falls in January 2101
        assert!(matches!(
            lunar_to_solar(2100, 12, 29, false),
            Err(CalendarError::YearOutOfRange(2101))
        ));
    }

    #[test]
    fn test_day_names() {
        let cases = [
            (1, "初一"),
            (10, "初十"),
            (11, "十一"),
            (19, "十九"),
            (20, "二十"),
            (21, "廿一"),
            (29, "廿九"),
            (30, "三十"),
        ];
        for (day, name) in cases {
            assert_eq!(day_name(day).as_deref(), Some(name));
        }
    }

    #[test]
    fn test_day_name_rejects_impossible_days() {
        for day in [0, 31, 40, u8::MAX] {
            assert_eq!(day_name(day), None, "day {day}");
        }
    }

    #[test]
    fn test_month_names() {
        assert_eq!(LunarMonth::common(1).unwrap().name(), "正月");
        assert_eq!(LunarMonth::common(10).unwrap().name(), "十月");
        assert_eq!(LunarMonth::common(11).unwrap().name(), "冬月");
        assert_eq!(LunarMonth::common(12).unwrap().to_string(), "臘月");
        assert_eq!(LunarMonth::leap(2).unwrap().name(), "閏二月");
    }

    #[test]
    fn test_lunar_month_rejects_out_of_range() {
        assert!(matches!(
            LunarMonth::common(0),
            Err(CalendarError::InvalidMonth(0))
        ));
        assert!(matches!(
            LunarMonth::common(13),
            Err(CalendarError::InvalidMonth(13))
        ));
        assert!(matches!(
            LunarMonth::leap(13),
            Err(CalendarError::InvalidMonth(13))
        ));
    }

    #[test]
    fn test_lunar_month_of_hand_built_date() {
        let mut lunar = solar_to_lunar(solar(2023, 1, 22)).unwrap();
        lunar.month = 13;
        assert!(matches!(
            lunar.lunar_month(),
            Err(CalendarError::InvalidMonth(13))
        ));
    }
}
