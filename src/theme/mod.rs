//! Theme module - breakpoint, color and font constants and the stylesheet built from them

mod constants;
mod stylesheet;

pub use constants::{theme, ColorValue, Theme};
pub use stylesheet::{font_stack, generate_stylesheet};
