use bunbun_engine::EntityRegistry;

use crate::behaviors::{
    Background, BunAnimation, Carrot, CarrotPickup, HeadsUpDisplay, Overlay, Player, Spaceship,
    Water, WinPoint,
};

/// Every entity type BunBun's level files may name.
pub fn default_registry() -> EntityRegistry {
    EntityRegistry::new()
        .with("Player", Player::from_properties)
        .with("Carrot", Carrot::from_properties)
        .with("CarrotPickup", CarrotPickup::from_properties)
        .with("Spaceship", Spaceship::from_properties)
        .with("Water", Water::from_properties)
        .with("Background", Background::from_properties)
        .with("HeadsUpDisplay", HeadsUpDisplay::from_properties)
        .with("Overlay", Overlay::from_properties)
        .with("BunAnimation", BunAnimation::from_properties)
        .with("WinPoint", WinPoint::from_properties)
}
