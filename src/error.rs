use bevy::ecs::entity::Entity;
use thiserror::Error;

/// Failures in the Bevy side adapters.
///
/// These are logged where they occur. The interaction controller itself never fails.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionError {
    #[error("Entity {0:?} has no Highlight component")]
    MissingHighlight(Entity),
    #[error("Material of entity {0:?} is not in Assets<StandardMaterial>")]
    MissingMaterial(Entity),
}
