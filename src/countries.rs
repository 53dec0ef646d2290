/// One flag prompt and the country it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmojiCountryPair {
    pub emoji: &'static str,
    pub country: &'static str,
}

impl EmojiCountryPair {
    pub const fn new(emoji: &'static str, country: &'static str) -> Self {
        Self { emoji, country }
    }
}

/// The built-in question table. Countries are unique.
pub const EMOJI_COUNTRIES: [EmojiCountryPair; 15] = [
    EmojiCountryPair::new("🇫🇷", "France"),
    EmojiCountryPair::new("🇯🇵", "Japan"),
    EmojiCountryPair::new("🇧🇷", "Brazil"),
    EmojiCountryPair::new("🇨🇦", "Canada"),
    EmojiCountryPair::new("🇦🇺", "Australia"),
    EmojiCountryPair::new("🇮🇳", "India"),
    EmojiCountryPair::new("🇬🇧", "United Kingdom"),
    EmojiCountryPair::new("🇺🇸", "United States"),
    EmojiCountryPair::new("🇩🇪", "Germany"),
    EmojiCountryPair::new("🇮🇹", "Italy"),
    EmojiCountryPair::new("🇪🇸", "Spain"),
    EmojiCountryPair::new("🇷🇺", "Russia"),
    EmojiCountryPair::new("🇲🇽", "Mexico"),
    EmojiCountryPair::new("🇨🇳", "China"),
    EmojiCountryPair::new("🇿🇦", "South Africa"),
];
