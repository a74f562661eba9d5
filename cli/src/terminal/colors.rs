use colored::Color;

pub const PRIMARY: Color = Color::BrightBlue;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const COMPLIANT: Color = Color::BrightGreen;
pub const NON_COMPLIANT: Color = Color::BrightRed;
