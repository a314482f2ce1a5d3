use occupancy::FreeDaysRating;

/// ANSI escape codes for terminal output
pub struct ColorScheme;

impl ColorScheme {
    /// Green foreground
    pub const GREEN: &'static str = "\x1b[92m";
    /// Yellow foreground
    pub const YELLOW: &'static str = "\x1b[93m";
    /// Red foreground
    pub const RED: &'static str = "\x1b[91m";
    /// Blue foreground
    pub const BLUE: &'static str = "\x1b[94m";
    /// Cyan foreground
    pub const CYAN: &'static str = "\x1b[96m";
    /// Reset all attributes
    pub const RESET: &'static str = "\x1b[0m";

    /// Colour for a free days rating
    pub fn for_rating(rating: FreeDaysRating) -> &'static str {
        match rating {
            FreeDaysRating::Best => Self::GREEN,
            FreeDaysRating::Medium => Self::YELLOW,
            FreeDaysRating::Worst => Self::RED,
        }
    }
}
