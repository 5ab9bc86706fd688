//! Value types for light control parameters.

mod brightness;
mod color;
mod power;
mod speed;

pub use brightness::Brightness;
pub use color::ColorRGBW;
pub use power::PowerMode;
pub use speed::Speed;
