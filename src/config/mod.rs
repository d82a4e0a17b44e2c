//! Configuration module - widget style settings and their on-disk file.

pub mod file;
pub mod style;

pub use file::{default_style_path, load_style, read_style};
pub use style::{Palette, Style, StyleConfig};
