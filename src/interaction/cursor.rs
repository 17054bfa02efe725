use bevy::prelude::*;

use super::controller::{InteractionController, PointerDevice};
use super::highlight::Pickable;
use super::InteractionSet;

/// The entity whose transform a [`CursorPointer`] drags things along with.
///
/// Usually a child of the controller's aim pose, or a quad projected onto the picked surface.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Cursor;

/// A [`PointerDevice`] that drags one entity at a time with the [`Cursor`].
#[derive(Clone, Debug)]
pub struct CursorPointer {
    /// While `false`, every drag request is refused.
    pub enabled: bool,
    dragging: Option<Entity>,
    drags_started: u64,
}

impl Default for CursorPointer {
    fn default() -> Self {
        Self {
            enabled: true,
            dragging: None,
            drags_started: 0,
        }
    }
}

impl CursorPointer {
    pub fn dragging(&self) -> Option<Entity> {
        self.dragging
    }

    /// Number of accepted drags so far. Tells a re-grab of the same entity apart from the running drag.
    pub fn drags_started(&self) -> u64 {
        self.drags_started
    }
}

impl PointerDevice for CursorPointer {
    fn start_drag(&mut self, target: Entity) -> bool {
        if !self.enabled || self.dragging.is_some() {
            return false;
        }
        self.dragging = Some(target);
        self.drags_started += 1;
        true
    }

    fn stop_drag(&mut self) {
        self.dragging = None;
    }
}

/// Moves whatever the [`CursorPointer`] drags along with the cursor.
pub struct CursorPointerPlugin;

impl Plugin for CursorPointerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            drag_with_cursor
                .after(InteractionSet::Release)
                .run_if(resource_exists::<InteractionController<CursorPointer>>),
        );
    }
}

/// Per-system state of [`drag_with_cursor`]: which drag the offset belongs to.
///
/// The offset from the cursor is captured on the first frame of every drag,
/// including a release and re-grab of the same entity within one frame.
#[derive(Default)]
pub struct Grab {
    drag: Option<(Entity, u64)>,
    offset: Vec3,
}

pub fn drag_with_cursor(
    controller: Res<InteractionController<CursorPointer>>,
    cursor_query: Query<&Transform, (With<Cursor>, Without<Pickable>)>,
    mut pickable_query: Query<&mut Transform, (With<Pickable>, Without<Cursor>)>,
    mut grab: Local<Grab>,
) {
    let device = controller.device();
    let Some(target) = device.dragging() else {
        grab.drag = None;
        return;
    };
    let Ok(cursor) = cursor_query.get_single() else {
        return;
    };
    let Ok(mut transform) = pickable_query.get_mut(target) else {
        return;
    };
    let drag = (target, device.drags_started());
    if grab.drag != Some(drag) {
        grab.drag = Some(drag);
        grab.offset = transform.translation - cursor.translation;
        debug!("grabbed {:?} at offset {}", target, grab.offset);
    }
    transform.translation = cursor.translation + grab.offset;
}
