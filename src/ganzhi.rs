//! Heavenly Stems, Earthly Branches and the year/month/day pillars.
//!
//! The year and month pillars follow the lunar year and month as converted
//! by [`solar_to_lunar`]; the year changes at lunar new year rather than at
//! 立春, and a leap month shares the pillar of the month it repeats. The day
//! pillar is a plain day count from 1900-01-01 (甲戌).

use crate::consts::{
    BRANCH_COUNT, CYCLE_EPOCH_BRANCH, CYCLE_EPOCH_DAY_NUMBER, CYCLE_EPOCH_STEM, SEXAGENARY_CYCLE,
    SEXAGENARY_YEAR_OFFSET, STEM_COUNT,
};
use crate::lunar::{solar_to_lunar, LunarDate};
use crate::prelude::*;
use crate::{CalendarError, SolarDate};
use chrono::Datelike;
use serde::Serialize;

/// 天干
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Stem {
    #[display(fmt = "甲")]
    Jia,
    #[display(fmt = "乙")]
    Yi,
    #[display(fmt = "丙")]
    Bing,
    #[display(fmt = "丁")]
    Ding,
    #[display(fmt = "戊")]
    Wu,
    #[display(fmt = "己")]
    Ji,
    #[display(fmt = "庚")]
    Geng,
    #[display(fmt = "辛")]
    Xin,
    #[display(fmt = "壬")]
    Ren,
    #[display(fmt = "癸")]
    Gui,
}

impl Stem {
    pub const ALL: [Self; STEM_COUNT] = [
        Self::Jia,
        Self::Yi,
        Self::Bing,
        Self::Ding,
        Self::Wu,
        Self::Ji,
        Self::Geng,
        Self::Xin,
        Self::Ren,
        Self::Gui,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stem at position `n` of the cycle, wrapping in both directions.
    pub const fn from_cycle(n: i64) -> Self {
        Self::ALL[n.rem_euclid(STEM_COUNT as i64) as usize]
    }
}

/// 地支
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Branch {
    #[display(fmt = "子")]
    Zi,
    #[display(fmt = "丑")]
    Chou,
    #[display(fmt = "寅")]
    Yin,
    #[display(fmt = "卯")]
    Mao,
    #[display(fmt = "辰")]
    Chen,
    #[display(fmt = "巳")]
    Si,
    #[display(fmt = "午")]
    Wu,
    #[display(fmt = "未")]
    Wei,
    #[display(fmt = "申")]
    Shen,
    #[display(fmt = "酉")]
    You,
    #[display(fmt = "戌")]
    Xu,
    #[display(fmt = "亥")]
    Hai,
}

impl Branch {
    pub const ALL: [Self; BRANCH_COUNT] = [
        Self::Zi,
        Self::Chou,
        Self::Yin,
        Self::Mao,
        Self::Chen,
        Self::Si,
        Self::Wu,
        Self::Wei,
        Self::Shen,
        Self::You,
        Self::Xu,
        Self::Hai,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Branch at position `n` of the cycle, wrapping in both directions.
    pub const fn from_cycle(n: i64) -> Self {
        Self::ALL[n.rem_euclid(BRANCH_COUNT as i64) as usize]
    }

    /// # Errors
    /// Returns `CalendarError::InvalidBranch` unless `index` is in `0..=11`.
    pub fn from_index(index: u8) -> Result<Self, CalendarError> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(CalendarError::InvalidBranch(index))
    }

    pub const fn animal(self) -> Animal {
        Animal::ALL[self.index()]
    }
}

/// 生肖, one per branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Animal {
    #[display(fmt = "鼠")]
    Rat,
    #[display(fmt = "牛")]
    Ox,
    #[display(fmt = "虎")]
    Tiger,
    #[display(fmt = "兔")]
    Rabbit,
    #[display(fmt = "龍")]
    Dragon,
    #[display(fmt = "蛇")]
    Snake,
    #[display(fmt = "馬")]
    Horse,
    #[display(fmt = "羊")]
    Goat,
    #[display(fmt = "猴")]
    Monkey,
    #[display(fmt = "雞")]
    Rooster,
    #[display(fmt = "狗")]
    Dog,
    #[display(fmt = "豬")]
    Pig,
}

impl Animal {
    pub const ALL: [Self; BRANCH_COUNT] = [
        Self::Rat,
        Self::Ox,
        Self::Tiger,
        Self::Rabbit,
        Self::Dragon,
        Self::Snake,
        Self::Horse,
        Self::Goat,
        Self::Monkey,
        Self::Rooster,
        Self::Dog,
        Self::Pig,
    ];
}

/// A stem/branch pair, written as e.g. 「甲子」.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[display(fmt = "{}{}", stem, branch)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    pub const fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// Position in the sixty-pair cycle (甲子 = 0, 癸亥 = 59).
    ///
    /// Returns `None` when stem and branch are out of phase (one odd, one
    /// even), which no real pillar can be.
    pub const fn sexagenary_index(self) -> Option<usize> {
        let stem = self.stem.index();
        let branch = self.branch.index();
        if stem % 2 != branch % 2 {
            return None;
        }
        Some((6 * stem + SEXAGENARY_CYCLE - 5 * branch % SEXAGENARY_CYCLE) % SEXAGENARY_CYCLE)
    }
}

/// 星期, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Weekday {
    #[display(fmt = "日")]
    Sunday,
    #[display(fmt = "一")]
    Monday,
    #[display(fmt = "二")]
    Tuesday,
    #[display(fmt = "三")]
    Wednesday,
    #[display(fmt = "四")]
    Thursday,
    #[display(fmt = "五")]
    Friday,
    #[display(fmt = "六")]
    Saturday,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 「星期日」..「星期六」
    pub fn label(self) -> String {
        format!("星期{self}")
    }
}

pub fn weekday(date: SolarDate) -> Weekday {
    Weekday::ALL[date.as_naive().weekday().num_days_from_sunday() as usize]
}

/// The year, month and day pillars of a date plus the year's animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SexagenaryCycle {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub animal: Animal,
}

/// # Errors
/// Fails like [`solar_to_lunar`] for dates before the first lunar new year in the table.
pub fn sexagenary_cycle(date: SolarDate) -> Result<SexagenaryCycle, CalendarError> {
    let lunar = solar_to_lunar(date)?;
    Ok(cycle_for(date, &lunar))
}

pub(crate) fn cycle_for(date: SolarDate, lunar: &LunarDate) -> SexagenaryCycle {
    let year_cycle = i64::from(i32::from(lunar.year) - SEXAGENARY_YEAR_OFFSET);
    let year = Pillar::new(Stem::from_cycle(year_cycle), Branch::from_cycle(year_cycle));

    // 甲己年起丙寅, 乙庚年起戊寅, 丙辛年起庚寅, 丁壬年起壬寅, 戊癸年起甲寅
    let first_month_stem = year_cycle.rem_euclid(5) * 2 + 2;
    let month_number = i64::from(lunar.month);
    let month = Pillar::new(
        Stem::from_cycle(first_month_stem + month_number - 1),
        Branch::from_cycle(month_number + 1),
    );

    SexagenaryCycle {
        year,
        month,
        day: day_pillar(date),
        animal: year.branch.animal(),
    }
}

/// Day pillar from the linear day count; defined for every supported date.
pub fn day_pillar(date: SolarDate) -> Pillar {
    let offset = i64::from(date.day_number() - CYCLE_EPOCH_DAY_NUMBER);
    Pillar::new(
        Stem::from_cycle(CYCLE_EPOCH_STEM + offset),
        Branch::from_cycle(CYCLE_EPOCH_BRANCH + offset),
    )
}
