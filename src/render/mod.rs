pub mod error;
pub mod figure;
pub mod palette;
pub mod scale;
pub mod text;
