pub mod pmf;
pub mod rarity;
pub mod roller;
