pub mod attachment;
pub mod icons;
pub mod suggestion_card;
