pub mod error;
pub mod interaction;
pub mod prelude;

use bevy::app::{PluginGroup, PluginGroupBuilder};

use interaction::{CursorPointer, CursorPointerPlugin, HighlightMaterialPlugin, InteractionPlugin};

/// Pick, hover and drag with a [`CursorPointer`], tinting materials by highlight.
///
/// Expects `Assets<StandardMaterial>` to exist, which `DefaultPlugins` provides.
/// Insert `InteractionController::new(CursorPointer::default())` to start handling events.
pub struct CursorInteractionPlugins;

impl PluginGroup for CursorInteractionPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(InteractionPlugin::<CursorPointer>::default())
            .add(CursorPointerPlugin)
            .add(HighlightMaterialPlugin)
    }
}
