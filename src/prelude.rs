use bevy::ecs::schedule::{IntoSystemConfigs, SystemConfigs};

pub use crate::error::InteractionError;
pub use crate::interaction::{
    dragging, Cursor, CursorPointer, DragSession, Highlight, HighlightPalette, HighlightSink,
    InteractionController, InteractionPlugin, InteractionSet, PickEvent, PickEventKind, PickHit,
    Pickable, PickableBundle, PointerDevice, TouchHandler,
};
pub use crate::CursorInteractionPlugins;

/// Gates systems on a drag being in progress, e.g. `log_drag.while_dragging::<CursorPointer>()`.
pub trait DragSystems<Marker> {
    /// Only run while `P` is dragging something.
    fn while_dragging<P: PointerDevice>(self) -> SystemConfigs;
}

impl<T: IntoSystemConfigs<M>, M> DragSystems<M> for T {
    fn while_dragging<P: PointerDevice>(self) -> SystemConfigs {
        self.into_configs().run_if(dragging::<P>)
    }
}
