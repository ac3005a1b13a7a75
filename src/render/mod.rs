pub mod glyphs;
pub mod lcd;
