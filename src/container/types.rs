//! Palette and capacity tier variants with their lookup tables.

/// Slots per grid row; every tier holds a whole number of rows.
pub const ROW_SLOTS: usize = 9;

/// Fixed color palette for containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// White.
    White,
    /// Orange.
    Orange,
    /// Magenta.
    Magenta,
    /// Light blue.
    LightBlue,
    /// Yellow.
    Yellow,
    /// Lime.
    Lime,
    /// Pink.
    Pink,
    /// Gray.
    Gray,
    /// Light gray.
    LightGray,
    /// Cyan.
    Cyan,
    /// Purple.
    Purple,
    /// Blue.
    Blue,
    /// Brown, the stock leather look.
    Brown,
    /// Green.
    Green,
    /// Red.
    Red,
    /// Black.
    Black,
}

/// (variant, config key, friendly name, hex accent)
const COLOR_TABLE: [(Color, &str, &str, &str); 16] = [
    (Color::White, "white", "White", "#F9FFFE"),
    (Color::Orange, "orange", "Orange", "#F9801D"),
    (Color::Magenta, "magenta", "Magenta", "#C74EBD"),
    (Color::LightBlue, "light_blue", "Light Blue", "#3AB3DA"),
    (Color::Yellow, "yellow", "Yellow", "#FED83D"),
    (Color::Lime, "lime", "Lime", "#80C71F"),
    (Color::Pink, "pink", "Pink", "#F38BAA"),
    (Color::Gray, "gray", "Gray", "#474F52"),
    (Color::LightGray, "light_gray", "Light Gray", "#9D9D97"),
    (Color::Cyan, "cyan", "Cyan", "#169C9C"),
    (Color::Purple, "purple", "Purple", "#8932B8"),
    (Color::Blue, "blue", "Blue", "#3C44AA"),
    (Color::Brown, "brown", "Brown", "#835432"),
    (Color::Green, "green", "Green", "#5E7C16"),
    (Color::Red, "red", "Red", "#B02E26"),
    (Color::Black, "black", "Black", "#1D1D21"),
];

/// Normalize a user-typed key: lowercase, with `-`, `.` and spaces as `_`.
fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace(['.', '-', ' '], "_")
}

impl Color {
    /// Palette order, used for cycling.
    pub const ALL: [Self; 16] = [
        Self::White,
        Self::Orange,
        Self::Magenta,
        Self::LightBlue,
        Self::Yellow,
        Self::Lime,
        Self::Pink,
        Self::Gray,
        Self::LightGray,
        Self::Cyan,
        Self::Purple,
        Self::Blue,
        Self::Brown,
        Self::Green,
        Self::Red,
        Self::Black,
    ];

    const fn index(self) -> usize {
        self as usize
    }

    /// Stable config key, e.g. `light_blue`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        COLOR_TABLE[self.index()].1
    }

    /// Human-readable name, e.g. `Light Blue`.
    #[must_use]
    pub const fn friendly_name(self) -> &'static str {
        COLOR_TABLE[self.index()].2
    }

    /// Hex accent color, `#RRGGBB`.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        COLOR_TABLE[self.index()].3
    }

    /// Texture identifier the host uses to skin the carrier.
    #[must_use]
    pub fn texture(self) -> String {
        format!("satchel:backpack/{}", self.key())
    }

    /// Item kind of the dye that produces this color.
    #[must_use]
    pub fn dye_kind(self) -> String {
        format!("{}_dye", self.key())
    }

    /// What: Parse a config key, tolerating case, dashes and spaces.
    ///
    /// Output:
    /// - `None` for names outside the palette
    #[must_use]
    pub fn from_key(raw: &str) -> Option<Self> {
        let key = normalize_key(raw);
        COLOR_TABLE
            .iter()
            .find(|(_, k, _, _)| *k == key)
            .map(|(c, _, _, _)| *c)
    }

    /// Color produced by a dye item kind such as `red_dye`.
    #[must_use]
    pub fn from_dye(kind: &str) -> Option<Self> {
        normalize_key(kind)
            .strip_suffix("_dye")
            .and_then(Self::from_key)
    }

    /// Next palette entry, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// Capacity levels, ordered from smallest to largest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// One row.
    Small = 1,
    /// Two rows.
    Medium = 2,
    /// Three rows.
    Large = 3,
    /// Four rows.
    Huge = 4,
    /// Five rows.
    Giant = 5,
}

impl Tier {
    /// All tiers in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::Huge,
        Self::Giant,
    ];

    /// Position in the order, 1 through 5.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Slot count: `ordinal * 9`.
    #[must_use]
    pub const fn slots(self) -> usize {
        self.ordinal() * ROW_SLOTS
    }

    /// Stable config key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Huge => "huge",
            Self::Giant => "giant",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn friendly_name(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
            Self::Huge => "Huge",
            Self::Giant => "Giant",
        }
    }

    /// What: Parse a config key or a bare ordinal (`"2"`).
    #[must_use]
    pub fn from_key(raw: &str) -> Option<Self> {
        let key = normalize_key(raw);
        if let Ok(ordinal) = key.parse::<usize>() {
            return Self::from_ordinal(ordinal);
        }
        Self::ALL.into_iter().find(|tier| tier.key() == key)
    }

    /// Tier with the given ordinal, if it exists.
    #[must_use]
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.ordinal() == ordinal)
    }

    /// Successor in the order; `None` at the top.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// Successor, wrapping from the top back to the smallest tier.
    #[must_use]
    pub fn cycle(self) -> Self {
        self.next().unwrap_or(Self::Small)
    }

    /// Config path holding the cost of expanding *into* this tier.
    #[must_use]
    pub fn cost_key(self) -> String {
        format!("expansion_cost.tier_{}", self.ordinal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_slots_follow_ordinal() {
        let slots: Vec<usize> = Tier::ALL.iter().map(|t| t.slots()).collect();
        assert_eq!(slots, vec![9, 18, 27, 36, 45]);
    }

    #[test]
    fn tier_successor_and_cycle() {
        assert_eq!(Tier::Small.next(), Some(Tier::Medium));
        assert_eq!(Tier::Giant.next(), None);
        assert_eq!(Tier::Giant.cycle(), Tier::Small);
        assert!(Tier::Small < Tier::Giant);
    }

    #[test]
    fn tier_parsing_accepts_names_and_ordinals() {
        assert_eq!(Tier::from_key("Large"), Some(Tier::Large));
        assert_eq!(Tier::from_key(" 4 "), Some(Tier::Huge));
        assert_eq!(Tier::from_key("6"), None);
        assert_eq!(Tier::from_key("enormous"), None);
    }

    #[test]
    fn color_table_is_consistent() {
        for color in Color::ALL {
            assert_eq!(Color::from_key(color.key()), Some(color));
            assert_eq!(Color::from_dye(&color.dye_kind()), Some(color));
            assert!(color.hex().starts_with('#') && color.hex().len() == 7);
        }
        assert_eq!(Color::from_key("Light-Blue"), Some(Color::LightBlue));
        assert_eq!(Color::from_dye("stick"), None);
        assert_eq!(Color::Black.next(), Color::White);
        assert_eq!(Color::Brown.texture(), "satchel:backpack/brown");
    }
}
