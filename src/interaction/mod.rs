pub mod controller;
pub mod cursor;
pub mod events;
pub mod highlight;

use std::marker::PhantomData;

use bevy::app::{App, Plugin, Update};
use bevy::ecs::entity::Entities;
use bevy::ecs::event::EventReader;
use bevy::ecs::removal_detection::RemovedComponents;
use bevy::ecs::schedule::common_conditions::resource_exists;
use bevy::ecs::schedule::{IntoSystemConfigs, IntoSystemSetConfigs, SystemSet};
use bevy::ecs::system::{Query, Res, ResMut};
use bevy::log::info;

pub use self::controller::{
    DragSession, HighlightSink, InteractionController, PointerDevice, TouchHandler,
};
pub use self::cursor::{Cursor, CursorPointer, CursorPointerPlugin};
pub use self::events::{PickEvent, PickEventKind, PickHit};
pub use self::highlight::{
    Highlight, HighlightMaterialPlugin, HighlightPalette, HighlightQuery, Pickable,
    PickableBundle,
};

#[derive(SystemSet, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InteractionSet {
    /// [`PickEvent`]s are fed to the controller.
    Dispatch,
    /// Drags on entities that went away are stopped.
    Release,
}

/// Drives an [`InteractionController<P>`] from [`PickEvent`]s.
///
/// The controller itself is not created here, insert it with the pointer device once one is selected:
/// `app.insert_resource(InteractionController::new(device))`. Until then events are ignored.
pub struct InteractionPlugin<P: PointerDevice> {
    pub palette: HighlightPalette,
    _device: PhantomData<fn() -> P>,
}

impl<P: PointerDevice> Default for InteractionPlugin<P> {
    fn default() -> Self {
        Self {
            palette: HighlightPalette::default(),
            _device: PhantomData,
        }
    }
}

impl<P: PointerDevice> InteractionPlugin<P> {
    pub fn with_palette(palette: HighlightPalette) -> Self {
        Self {
            palette,
            ..Default::default()
        }
    }
}

impl<P: PointerDevice> Plugin for InteractionPlugin<P> {
    fn build(&self, app: &mut App) {
        app.add_event::<PickEvent>()
            .insert_resource(self.palette)
            .configure_sets(
                Update,
                (InteractionSet::Dispatch, InteractionSet::Release).chain(),
            )
            .add_systems(
                Update,
                (
                    dispatch_pick_events::<P>
                        .in_set(InteractionSet::Dispatch)
                        .run_if(resource_exists::<InteractionController<P>>),
                    release_despawned::<P>
                        .in_set(InteractionSet::Release)
                        .run_if(resource_exists::<InteractionController<P>>),
                ),
            );
    }
}

/// A [`Condition`](bevy::ecs::schedule::Condition) system that says if an entity is being dragged with `P`.
pub fn dragging<P: PointerDevice>(controller: Option<Res<InteractionController<P>>>) -> bool {
    controller.is_some_and(|c| c.dragged().is_some())
}

pub fn dispatch_pick_events<P: PointerDevice>(
    mut events: EventReader<PickEvent>,
    mut controller: ResMut<InteractionController<P>>,
    mut highlights: Query<&'static mut Highlight>,
) {
    let mut sink = HighlightQuery::new(&mut highlights);
    for event in events.read() {
        controller.dispatch(event, &mut sink);
    }
}

pub fn release_despawned<P: PointerDevice>(
    mut removed: RemovedComponents<Pickable>,
    entities: &Entities,
    mut controller: ResMut<InteractionController<P>>,
) {
    for entity in removed.read() {
        if controller.is_dragging(entity) {
            info!("dragged entity {:?} is no longer pickable, stopping drag", entity);
            controller.cancel_drag();
        }
    }
    // drags may start on entities that were never pickable
    if let Some(dragged) = controller.dragged() {
        if !entities.contains(dragged) {
            info!("dragged entity {:?} was despawned, stopping drag", dragged);
            controller.cancel_drag();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::entity::Entity;
    use bevy::ecs::event::Events;

    #[derive(Default)]
    struct CountingPointer {
        refuse: bool,
        stops: usize,
    }

    impl PointerDevice for CountingPointer {
        fn start_drag(&mut self, _target: Entity) -> bool {
            !self.refuse
        }

        fn stop_drag(&mut self) {
            self.stops += 1;
        }
    }

    fn app_with(pointer: CountingPointer) -> App {
        let mut app = App::new();
        app.add_plugins(InteractionPlugin::<CountingPointer>::default())
            .insert_resource(InteractionController::new(pointer));
        app
    }

    fn send(app: &mut App, events: impl IntoIterator<Item = PickEvent>) {
        let mut queue = app.world.resource_mut::<Events<PickEvent>>();
        for event in events {
            queue.send(event);
        }
    }

    fn highlight(app: &App, entity: Entity) -> Highlight {
        *app.world.get::<Highlight>(entity).unwrap()
    }

    fn controller(app: &App) -> &InteractionController<CountingPointer> {
        app.world.resource::<InteractionController<CountingPointer>>()
    }

    #[test]
    fn single_drag_wins_test() {
        let mut app = app_with(CountingPointer::default());
        let a = app.world.spawn(PickableBundle::default()).id();
        let b = app.world.spawn(PickableBundle::default()).id();
        let hit = PickHit::default();

        send(
            &mut app,
            [
                PickEvent::enter(a, hit),
                PickEvent::touch_start(a, hit),
                PickEvent::touch_start(b, hit),
            ],
        );
        app.update();

        assert_eq!(highlight(&app, a), Highlight::Active);
        assert_eq!(highlight(&app, b), Highlight::Idle);
        assert_eq!(controller(&app).session(), DragSession::Active(a));
    }

    #[test]
    fn refused_drag_test() {
        let mut app = app_with(CountingPointer {
            refuse: true,
            ..Default::default()
        });
        let a = app.world.spawn(PickableBundle::default()).id();

        send(&mut app, [PickEvent::touch_start(a, PickHit::default())]);
        app.update();

        assert_eq!(highlight(&app, a), Highlight::Active);
        assert_eq!(controller(&app).session(), DragSession::None);
    }

    #[test]
    fn exit_ends_drag_test() {
        let mut app = app_with(CountingPointer::default());
        let a = app.world.spawn(PickableBundle::default()).id();

        send(&mut app, [PickEvent::touch_start(a, PickHit::default())]);
        app.update();
        send(&mut app, [PickEvent::exit(a, PickHit::default())]);
        app.update();

        assert_eq!(highlight(&app, a), Highlight::Idle);
        assert_eq!(controller(&app).device().stops, 1);
        assert_eq!(controller(&app).session(), DragSession::None);
    }

    #[test]
    fn despawn_releases_drag_test() {
        let mut app = app_with(CountingPointer::default());
        let a = app.world.spawn(PickableBundle::default()).id();

        send(&mut app, [PickEvent::touch_start(a, PickHit::default())]);
        app.update();
        app.world.despawn(a);
        app.update();

        assert_eq!(controller(&app).session(), DragSession::None);
        assert_eq!(controller(&app).device().stops, 1);
    }

    #[test]
    fn despawn_of_other_keeps_drag_test() {
        let mut app = app_with(CountingPointer::default());
        let a = app.world.spawn(PickableBundle::default()).id();
        let b = app.world.spawn(PickableBundle::default()).id();

        send(&mut app, [PickEvent::touch_start(a, PickHit::default())]);
        app.update();
        app.world.despawn(b);
        app.update();

        assert_eq!(controller(&app).session(), DragSession::Active(a));
        assert_eq!(controller(&app).device().stops, 0);
    }

    #[test]
    fn events_without_controller_are_ignored_test() {
        let mut app = App::new();
        app.add_plugins(InteractionPlugin::<CountingPointer>::default());
        let a = app.world.spawn(PickableBundle::default()).id();

        send(&mut app, [PickEvent::enter(a, PickHit::default())]);
        app.update();

        assert_eq!(highlight(&app, a), Highlight::Idle);
    }

    #[test]
    fn target_without_highlight_is_skipped_test() {
        let mut app = app_with(CountingPointer::default());
        let bare = app.world.spawn_empty().id();

        send(&mut app, [PickEvent::touch_start(bare, PickHit::default())]);
        app.update();

        // the drag still starts, only the highlight write is dropped
        assert_eq!(controller(&app).dragged(), Some(bare));
    }

    #[test]
    fn despawn_of_unpickable_releases_drag_test() {
        let mut app = app_with(CountingPointer::default());
        let bare = app.world.spawn_empty().id();

        send(&mut app, [PickEvent::touch_start(bare, PickHit::default())]);
        app.update();
        app.world.despawn(bare);
        app.update();

        assert_eq!(controller(&app).session(), DragSession::None);
        assert_eq!(controller(&app).device().stops, 1);

        app.update();
        assert_eq!(controller(&app).device().stops, 1);
    }

    #[derive(bevy::ecs::system::Resource, Default)]
    struct DragFrames(usize);

    fn count_drag_frames(mut frames: ResMut<DragFrames>) {
        frames.0 += 1;
    }

    #[test]
    fn dragging_condition_test() {
        let mut app = app_with(CountingPointer::default());
        app.init_resource::<DragFrames>().add_systems(
            Update,
            count_drag_frames
                .after(InteractionSet::Release)
                .run_if(dragging::<CountingPointer>),
        );
        let a = app.world.spawn(PickableBundle::default()).id();

        app.update();
        assert_eq!(app.world.resource::<DragFrames>().0, 0);

        send(&mut app, [PickEvent::touch_start(a, PickHit::default())]);
        app.update();
        app.update();
        assert_eq!(app.world.resource::<DragFrames>().0, 2);

        send(&mut app, [PickEvent::touch_end(a, PickHit::default())]);
        app.update();
        assert_eq!(app.world.resource::<DragFrames>().0, 2);
    }

    #[test]
    fn plugin_palette_is_inserted_test() {
        let palette = HighlightPalette {
            idle: bevy::render::color::Color::BLACK,
            ..Default::default()
        };
        let mut app = App::new();
        app.add_plugins(InteractionPlugin::<CountingPointer>::with_palette(palette));
        assert_eq!(*app.world.resource::<HighlightPalette>(), palette);
    }
}
