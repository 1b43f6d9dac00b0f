pub mod export;
pub mod pack;
pub mod palette;
pub mod sheet;
