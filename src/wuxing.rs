//! Five elements (五行) and the daily dress-colour ranking.
//!
//! Elements are indexed in generating order, so every relation between two
//! elements is an offset modulo five:
//!
//! | relation        | offset | meaning                 |
//! |-----------------|--------|-------------------------|
//! | `generates`     | +1     | 我生: what `e` produces   |
//! | `destroys`      | +2     | 我剋: what `e` overcomes  |
//! | `destroyed_by`  | +3     | 剋我: what overcomes `e`  |
//! | `generated_by`  | +4     | 生我: what produces `e`   |

use crate::consts::{BRANCH_COUNT, ELEMENT_COUNT};
use crate::ganzhi::Branch;
use crate::prelude::*;
use crate::CalendarError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
pub enum Element {
    #[display(fmt = "木")]
    Wood,
    #[display(fmt = "火")]
    Fire,
    #[display(fmt = "土")]
    Earth,
    #[display(fmt = "金")]
    Metal,
    #[display(fmt = "水")]
    Water,
}

/// Element of each earthly branch, 子 through 亥.
const BRANCH_ELEMENTS: [Element; BRANCH_COUNT] = [
    Element::Water,
    Element::Earth,
    Element::Wood,
    Element::Wood,
    Element::Earth,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Earth,
    Element::Water,
];

impl Element {
    pub const ALL: [Self; ELEMENT_COUNT] = [
        Self::Wood,
        Self::Fire,
        Self::Earth,
        Self::Metal,
        Self::Water,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn offset(self, steps: usize) -> Self {
        Self::ALL[(self.index() + steps) % ELEMENT_COUNT]
    }

    pub const fn generates(self) -> Self {
        self.offset(1)
    }

    pub const fn destroys(self) -> Self {
        self.offset(2)
    }

    pub const fn destroyed_by(self) -> Self {
        self.offset(3)
    }

    pub const fn generated_by(self) -> Self {
        self.offset(4)
    }

    pub const fn of_branch(branch: Branch) -> Self {
        BRANCH_ELEMENTS[branch.index()]
    }

    /// Colour family shown to the reader.
    pub const fn color_family(self) -> &'static str {
        match self {
            Self::Wood => "綠色、青色、翠色、淺綠系",
            Self::Fire => "紅色、粉色、橙色、紫色、花色系",
            Self::Earth => "黃色、咖啡、棕色、卡其、褐色系",
            Self::Metal => "白色、銀色、杏色、乳白色系",
            Self::Water => "黑色、藍色、灰色系",
        }
    }

    pub const fn colors(self) -> &'static [&'static str] {
        match self {
            Self::Wood => &["綠色", "青色", "翠色", "淺綠"],
            Self::Fire => &["紅色", "粉色", "橙色", "紫色"],
            Self::Earth => &["黃色", "咖啡", "棕色", "卡其"],
            Self::Metal => &["白色", "銀色", "杏色", "乳白"],
            Self::Water => &["黑色", "藍色", "灰色"],
        }
    }

    /// Swatch colour; metal uses light grey to stay visible on white.
    pub const fn display_color(self) -> &'static str {
        match self {
            Self::Wood => "#4CAF50",
            Self::Fire => "#F44336",
            Self::Earth => "#FFC107",
            Self::Metal => "#E0E0E0",
            Self::Water => "#333333",
        }
    }
}

/// The five fortune levels, most favourable first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FortuneLevel {
    /// What the day's element generates: the day nourishes the wearer.
    MostFavorable,
    /// The day's own element.
    Favorable,
    /// What overcomes the day's element.
    Neutral,
    /// What generates the day's element, so the wearer feeds the day.
    Unfavorable,
    /// What the day's element overcomes.
    LeastFavorable,
}

impl FortuneLevel {
    pub const ALL: [Self; ELEMENT_COUNT] = [
        Self::MostFavorable,
        Self::Favorable,
        Self::Neutral,
        Self::Unfavorable,
        Self::LeastFavorable,
    ];

    /// Element assigned to this level on a day of `day` element.
    pub const fn element_for(self, day: Element) -> Element {
        match self {
            Self::MostFavorable => day.generates(),
            Self::Favorable => day,
            Self::Neutral => day.destroyed_by(),
            Self::Unfavorable => day.generated_by(),
            Self::LeastFavorable => day.destroys(),
        }
    }

    pub const fn rank(self) -> &'static str {
        match self {
            Self::MostFavorable => "大吉",
            Self::Favorable => "次吉",
            Self::Neutral => "平",
            Self::Unfavorable => "較差",
            Self::LeastFavorable => "不宜",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::MostFavorable => "旺運色",
            Self::Favorable => "好運色",
            Self::Neutral => "平平色",
            Self::Unfavorable => "耗能色",
            Self::LeastFavorable => "NG色",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::MostFavorable => {
                "今天穿這色超旺der～大環境幫你Carry，貴人自動找上門，桃花運也跟著來，整個氣場對了！"
            }
            Self::Favorable => "跟今日磁場同頻～談合作、聊生意都很OK，人際關係順順的！",
            Self::Neutral => {
                "要拚一點才有收穫，但只要肯努力，成功了就是大豐收！適合想挑戰自我的人～"
            }
            Self::Unfavorable => {
                "穿這色會比較累，好像一直在輸出能量給環境，心臟要夠大顆再挑戰！"
            }
            Self::LeastFavorable => "今天最好避開這色～容易卡卡的、事倍功半，做白工的機率偏高QQ",
        }
    }
}

/// One ranked entry of the dress-colour table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorFortune {
    pub level: FortuneLevel,
    pub rank: &'static str,
    pub name: &'static str,
    pub element: Element,
    pub color_family: &'static str,
    pub colors: &'static [&'static str],
    pub display_color: &'static str,
    pub description: &'static str,
}

impl ColorFortune {
    const fn new(level: FortuneLevel, day: Element) -> Self {
        let element = level.element_for(day);
        Self {
            level,
            rank: level.rank(),
            name: level.name(),
            element,
            color_family: element.color_family(),
            colors: element.colors(),
            display_color: element.display_color(),
            description: level.description(),
        }
    }
}

/// The day's element and the five levels, most favourable first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElementFortune {
    pub day_element: Element,
    pub levels: [ColorFortune; ELEMENT_COUNT],
}

impl ElementFortune {
    pub fn level(&self, level: FortuneLevel) -> &ColorFortune {
        &self.levels[level as usize]
    }
}

/// Ranks the five element colours against the element of the day's branch.
pub fn calculate_dress_colors(day_branch: Branch) -> ElementFortune {
    let day_element = Element::of_branch(day_branch);
    ElementFortune {
        day_element,
        levels: FortuneLevel::ALL.map(|level| ColorFortune::new(level, day_element)),
    }
}

/// [`calculate_dress_colors`] for a raw branch index.
///
/// # Errors
/// Returns `CalendarError::InvalidBranch` unless `index` is in `0..=11`.
pub fn calculate_dress_colors_for_index(index: u8) -> Result<ElementFortune, CalendarError> {
    Ok(calculate_dress_colors(Branch::from_index(index)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_relations() {
        assert_eq!(Element::Wood.generates(), Element::Fire);
        assert_eq!(Element::Water.generates(), Element::Wood);
        assert_eq!(Element::Wood.destroys(), Element::Earth);
        assert_eq!(Element::Water.destroys(), Element::Fire);
        assert_eq!(Element::Wood.destroyed_by(), Element::Metal);
        assert_eq!(Element::Wood.generated_by(), Element::Water);

        for element in Element::ALL {
            assert_eq!(element.generates().generated_by(), element);
            assert_eq!(element.destroys().destroyed_by(), element);
        }
    }

    #[test]
    fn test_branch_elements() {
        let expected = "水土木木土火火土金金土水";
        let actual: String = Branch::ALL
            .iter()
            .map(|&b| Element::of_branch(b).to_string())
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_levels_are_permutation_for_every_branch() {
        for index in 0..12 {
            let fortune = calculate_dress_colors_for_index(index).unwrap();
            let mut elements: Vec<Element> = fortune.levels.iter().map(|l| l.element).collect();
            elements.sort();
            assert_eq!(elements, Element::ALL, "branch {index}");
        }
    }

    #[test]
    fn test_wood_day() {
        let fortune = calculate_dress_colors_for_index(2).unwrap();
        assert_eq!(fortune.day_element, Element::Wood);
        let elements: Vec<Element> = fortune.levels.iter().map(|l| l.element).collect();
        assert_eq!(
            elements,
            [
                Element::Fire,
                Element::Wood,
                Element::Metal,
                Element::Water,
                Element::Earth
            ]
        );
        assert_eq!(fortune.levels[0].element.index(), 1);
    }

    #[test]
    fn test_level_text_is_relative_to_level() {
        let water_day = calculate_dress_colors(Branch::Zi);
        let fire_day = calculate_dress_colors(Branch::Wu);
        for level in FortuneLevel::ALL {
            assert_eq!(
                water_day.level(level).description,
                fire_day.level(level).description
            );
            assert_eq!(water_day.level(level).rank, level.rank());
        }

        let best = fire_day.level(FortuneLevel::MostFavorable);
        assert_eq!(best.element, Element::Earth);
        assert_eq!(best.rank, "大吉");
        assert_eq!(best.name, "旺運色");
        assert_eq!(best.display_color, "#FFC107");
        assert_eq!(best.colors, ["黃色", "咖啡", "棕色", "卡其"]);
    }

    #[test]
    fn test_invalid_branch_index() {
        assert!(matches!(
            calculate_dress_colors_for_index(12),
            Err(CalendarError::InvalidBranch(12))
        ));
    }

    #[test]
    fn test_serialize() {
        let fortune = calculate_dress_colors(Branch::Yin);
        let json = serde_json::to_value(fortune).unwrap();
        assert_eq!(json["day_element"], "Wood");
        assert_eq!(json["levels"][0]["element"], "Fire");
        assert_eq!(json["levels"][0]["level"], "MostFavorable");
        assert_eq!(json["levels"][4]["colors"][0], "黃色");
    }
}
