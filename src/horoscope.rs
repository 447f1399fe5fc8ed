//! Sun signs and elemental compatibility.
//!
//! Sign boundaries are fixed calendar days, not solar longitude.

use crate::consts::{MAX_MONTH, SIGN_COUNT};
use crate::prelude::*;
use crate::types::{Day, Month};
use crate::CalendarError;
use serde::Serialize;

/// The twelve signs in zodiac order, starting from Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum ZodiacSign {
    #[display(fmt = "白羊座")]
    Aries,
    #[display(fmt = "金牛座")]
    Taurus,
    #[display(fmt = "雙子座")]
    Gemini,
    #[display(fmt = "巨蟹座")]
    Cancer,
    #[display(fmt = "獅子座")]
    Leo,
    #[display(fmt = "處女座")]
    Virgo,
    #[display(fmt = "天秤座")]
    Libra,
    #[display(fmt = "天蠍座")]
    Scorpio,
    #[display(fmt = "射手座")]
    Sagittarius,
    #[display(fmt = "魔羯座")]
    Capricorn,
    #[display(fmt = "水瓶座")]
    Aquarius,
    #[display(fmt = "雙魚座")]
    Pisces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum SignElement {
    #[display(fmt = "火象")]
    Fire,
    #[display(fmt = "土象")]
    Earth,
    #[display(fmt = "風象")]
    Air,
    #[display(fmt = "水象")]
    Water,
}

/// How a sign's element relates to the sun sign's element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Aspect {
    /// Same element
    #[display(fmt = "特吉")]
    Trine,
    /// Fire with air, earth with water
    #[display(fmt = "次吉")]
    Sextile,
    /// The other two elements
    #[display(fmt = "注意")]
    Square,
}

impl SignElement {
    pub const fn sextile_partner(self) -> Self {
        match self {
            Self::Fire => Self::Air,
            Self::Air => Self::Fire,
            Self::Earth => Self::Water,
            Self::Water => Self::Earth,
        }
    }

    pub fn aspect_to(self, other: Self) -> Aspect {
        if other == self {
            Aspect::Trine
        } else if other == self.sextile_partner() {
            Aspect::Sextile
        } else {
            Aspect::Square
        }
    }
}

/// An inclusive run of calendar days belonging to one sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SignRange {
    pub sign: ZodiacSign,
    /// (month, day)
    pub start: (u8, u8),
    /// (month, day), inclusive
    pub end: (u8, u8),
}

impl SignRange {
    const fn new(start: (u8, u8), end: (u8, u8), sign: ZodiacSign) -> Self {
        Self { sign, start, end }
    }

    /// Ranges never wrap past December; a range spanning two months
    /// covers the tail of the first and the head of the second.
    pub const fn contains(&self, month: u8, day: u8) -> bool {
        let (start_month, start_day) = self.start;
        let (end_month, end_day) = self.end;
        if start_month == end_month {
            month == start_month && day >= start_day && day <= end_day
        } else {
            (month == start_month && day >= start_day) || (month == end_month && day <= end_day)
        }
    }
}

/// Capricorn straddles the new year and is split in two.
pub const SIGN_RANGES: [SignRange; SIGN_COUNT + 1] = [
    SignRange::new((3, 21), (4, 19), ZodiacSign::Aries),
    SignRange::new((4, 20), (5, 20), ZodiacSign::Taurus),
    SignRange::new((5, 21), (6, 20), ZodiacSign::Gemini),
    SignRange::new((6, 21), (7, 22), ZodiacSign::Cancer),
    SignRange::new((7, 23), (8, 22), ZodiacSign::Leo),
    SignRange::new((8, 23), (9, 22), ZodiacSign::Virgo),
    SignRange::new((9, 23), (10, 22), ZodiacSign::Libra),
    SignRange::new((10, 23), (11, 21), ZodiacSign::Scorpio),
    SignRange::new((11, 22), (12, 21), ZodiacSign::Sagittarius),
    SignRange::new((12, 22), (12, 31), ZodiacSign::Capricorn),
    SignRange::new((1, 1), (1, 19), ZodiacSign::Capricorn),
    SignRange::new((1, 20), (2, 18), ZodiacSign::Aquarius),
    SignRange::new((2, 19), (3, 20), ZodiacSign::Pisces),
];

/// Per month (January first): the first day of the later sign, the sign
/// before that day and the sign from that day on. Every month holds exactly
/// one boundary, so any valid month/day resolves.
const MONTH_CUTOFFS: [(u8, ZodiacSign, ZodiacSign); MAX_MONTH as usize] = [
    (20, ZodiacSign::Capricorn, ZodiacSign::Aquarius),
    (19, ZodiacSign::Aquarius, ZodiacSign::Pisces),
    (21, ZodiacSign::Pisces, ZodiacSign::Aries),
    (20, ZodiacSign::Aries, ZodiacSign::Taurus),
    (21, ZodiacSign::Taurus, ZodiacSign::Gemini),
    (21, ZodiacSign::Gemini, ZodiacSign::Cancer),
    (23, ZodiacSign::Cancer, ZodiacSign::Leo),
    (23, ZodiacSign::Leo, ZodiacSign::Virgo),
    (23, ZodiacSign::Virgo, ZodiacSign::Libra),
    (23, ZodiacSign::Libra, ZodiacSign::Scorpio),
    (22, ZodiacSign::Scorpio, ZodiacSign::Sagittarius),
    (22, ZodiacSign::Sagittarius, ZodiacSign::Capricorn),
];

impl ZodiacSign {
    pub const ALL: [Self; SIGN_COUNT] = [
        Self::Aries,
        Self::Taurus,
        Self::Gemini,
        Self::Cancer,
        Self::Leo,
        Self::Virgo,
        Self::Libra,
        Self::Scorpio,
        Self::Sagittarius,
        Self::Capricorn,
        Self::Aquarius,
        Self::Pisces,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Fire, earth, air and water repeat in zodiac order.
    pub const fn element(self) -> SignElement {
        match self.index() % 4 {
            0 => SignElement::Fire,
            1 => SignElement::Earth,
            2 => SignElement::Air,
            _ => SignElement::Water,
        }
    }

    /// First and last (month, day) of the sign; Capricorn runs from December into January.
    pub const fn date_range(self) -> ((u8, u8), (u8, u8)) {
        let range = match self {
            Self::Capricorn => return ((12, 22), (1, 19)),
            // after the split Capricorn entries
            Self::Aquarius | Self::Pisces => SIGN_RANGES[self.index() + 1],
            _ => SIGN_RANGES[self.index()],
        };
        (range.start, range.end)
    }
}

/// The sun sign for a calendar day.
pub const fn sun_sign(month: Month, day: Day) -> ZodiacSign {
    let (cutoff, before, from) = MONTH_CUTOFFS[month.get() as usize - 1];
    if day.get() < cutoff { before } else { from }
}

/// A sun sign and every sign grouped by its element's aspect to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Horoscope {
    pub sun_sign: ZodiacSign,
    pub sun_element: SignElement,
    /// Same element, the sun sign itself included.
    pub trine: Vec<ZodiacSign>,
    pub sextile: Vec<ZodiacSign>,
    pub square: Vec<ZodiacSign>,
}

impl Horoscope {
    pub fn for_sign(sun_sign: ZodiacSign) -> Self {
        let sun_element = sun_sign.element();
        let mut horoscope = Self {
            sun_sign,
            sun_element,
            trine: Vec::new(),
            sextile: Vec::new(),
            square: Vec::new(),
        };
        for sign in ZodiacSign::ALL {
            let group = match sun_element.aspect_to(sign.element()) {
                Aspect::Trine => &mut horoscope.trine,
                Aspect::Sextile => &mut horoscope.sextile,
                Aspect::Square => &mut horoscope.square,
            };
            group.push(sign);
        }
        horoscope
    }

    pub fn group(&self, aspect: Aspect) -> &[ZodiacSign] {
        match aspect {
            Aspect::Trine => &self.trine,
            Aspect::Sextile => &self.sextile,
            Aspect::Square => &self.square,
        }
    }
}

/// # Errors
/// `InvalidMonth` or `InvalidDay` if no year has that month and day.
pub fn calculate_zodiac_horoscope(month: u8, day: u8) -> Result<Horoscope, CalendarError> {
    let month = Month::new(month)?;
    let day = Day::in_any_year(day, month)?;
    Ok(Horoscope::for_sign(sun_sign(month, day)))
}
