pub mod card;
pub mod collector_number;
pub mod colour;
pub mod expansion;
pub mod foreign_printing;
pub mod ptl;
pub mod rarity;
