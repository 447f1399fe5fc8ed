use crate::config::Settings;
use crate::ganzhi::{cycle_for, weekday, SexagenaryCycle, Weekday};
use crate::horoscope::{sun_sign, Horoscope};
use crate::lunar::{solar_to_lunar, LunarDate};
use crate::wuxing::{calculate_dress_colors, ElementFortune};
use crate::{CalendarError, SolarDate};
use serde::Serialize;

/// The civil side of a date with its display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolarInfo {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub weekday: Weekday,
    /// 「2023年1月22日」
    pub date_str: String,
    /// 「星期日」
    pub week_str: String,
}

impl SolarInfo {
    pub fn new(date: SolarDate) -> Self {
        let weekday = weekday(date);
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            weekday,
            date_str: format!("{}年{}月{}日", date.year(), date.month(), date.day()),
            week_str: weekday.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FullDateInfo {
    pub solar: SolarInfo,
    pub lunar: LunarDate,
    pub gan_zhi: SexagenaryCycle,
}

/// Civil, lunar and sexagenary views of one date.
///
/// # Errors
/// `BeforeLunarEpoch` for dates before 1900-01-31.
pub fn full_date_info(date: SolarDate) -> Result<FullDateInfo, CalendarError> {
    let lunar = solar_to_lunar(date)?;
    let gan_zhi = cycle_for(date, &lunar);
    Ok(FullDateInfo {
        solar: SolarInfo::new(date),
        lunar,
        gan_zhi,
    })
}

/// [`full_date_info`] for `date`, or for today in the configured offset.
///
/// # Errors
/// As [`full_date_info`] and [`Settings::today`].
pub fn full_date_info_or_now(
    date: Option<SolarDate>,
    settings: &Settings,
) -> Result<FullDateInfo, CalendarError> {
    full_date_info(settings.resolve(date)?)
}

/// Everything shown for a day: the date, its dress colours and its horoscope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodayInfo {
    pub date: FullDateInfo,
    pub dress: ElementFortune,
    pub horoscope: Horoscope,
}

/// # Errors
/// As [`full_date_info`].
pub fn today_info(date: SolarDate) -> Result<TodayInfo, CalendarError> {
    let info = full_date_info(date)?;
    let dress = calculate_dress_colors(info.gan_zhi.day.branch);
    let horoscope = Horoscope::for_sign(sun_sign(date.month_typed(), date.day_typed()));
    Ok(TodayInfo {
        date: info,
        dress,
        horoscope,
    })
}

/// [`today_info`] for `date`, or for today in the configured offset.
///
/// # Errors
/// As [`today_info`] and [`Settings::today`].
pub fn today_info_or_now(
    date: Option<SolarDate>,
    settings: &Settings,
) -> Result<TodayInfo, CalendarError> {
    today_info(settings.resolve(date)?)
}
