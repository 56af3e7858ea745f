pub mod convert;

pub use convert::{handle_convert, parse_palette, ConvertParams};
