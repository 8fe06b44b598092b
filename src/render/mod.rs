pub mod color;
pub mod contrast;
pub mod fmt;
pub mod icons;
pub mod layout;
pub mod palette;
pub mod segment;
pub mod separator;
