//! The pick/hover/drag state machine.
//!
//! Nothing in here touches the ECS directly: the pointer device is injected at
//! construction and highlight writes go through a [`HighlightSink`], so the
//! controller can be driven by the Bevy systems in [`super`] or by hand.

use bevy::ecs::entity::Entity;
use bevy::ecs::system::Resource;
use bevy::log::{debug, info};

use super::events::{PickEvent, PickEventKind, PickHit};
use super::highlight::Highlight;

/// The pointer's ability to drag an entity around, e.g. a tracked controller or gaze cursor.
pub trait PointerDevice: Send + Sync + 'static {
    /// Attach `target` to the pointer. Returns `false` if the device refuses.
    fn start_drag(&mut self, target: Entity) -> bool;
    /// Release whatever is attached. Must be harmless when nothing is.
    fn stop_drag(&mut self);
}

/// Where highlight changes are written. Rendering is someone else's job.
pub trait HighlightSink {
    fn set_highlight(&mut self, target: Entity, state: Highlight);
}

/// Handler interface for the four pick events.
pub trait TouchHandler {
    fn on_enter(&mut self, target: Entity, hit: &PickHit, highlights: &mut dyn HighlightSink);
    fn on_touch_start(&mut self, target: Entity, hit: &PickHit, highlights: &mut dyn HighlightSink);
    fn on_touch_end(&mut self, target: Entity, hit: &PickHit, highlights: &mut dyn HighlightSink);
    fn on_exit(&mut self, target: Entity, hit: &PickHit, highlights: &mut dyn HighlightSink);

    fn dispatch(&mut self, event: &PickEvent, highlights: &mut dyn HighlightSink) {
        match event.kind {
            PickEventKind::Enter => self.on_enter(event.target, &event.hit, highlights),
            PickEventKind::TouchStart => self.on_touch_start(event.target, &event.hit, highlights),
            PickEventKind::TouchEnd => self.on_touch_end(event.target, &event.hit, highlights),
            PickEventKind::Exit => self.on_exit(event.target, &event.hit, highlights),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragSession {
    #[default]
    None,
    /// The entity is attached to the pointer. Not owned, the scene owns it.
    Active(Entity),
}

impl DragSession {
    pub fn target(&self) -> Option<Entity> {
        match self {
            DragSession::None => None,
            DragSession::Active(target) => Some(*target),
        }
    }
}

/// Turns pick events into highlight changes and a single drag session.
///
/// Only one entity is dragged at a time: a touch start while something is
/// already being dragged is ignored, even for a different entity.
#[derive(Resource)]
pub struct InteractionController<P: PointerDevice> {
    device: P,
    session: DragSession,
}

impl<P: PointerDevice> InteractionController<P> {
    pub fn new(device: P) -> Self {
        Self {
            device,
            session: DragSession::None,
        }
    }

    pub fn session(&self) -> DragSession {
        self.session
    }

    pub fn dragged(&self) -> Option<Entity> {
        self.session.target()
    }

    pub fn is_dragging(&self, target: Entity) -> bool {
        self.session == DragSession::Active(target)
    }

    pub fn device(&self) -> &P {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut P {
        &mut self.device
    }

    /// Stops the active drag, if any, and returns the released entity.
    pub fn cancel_drag(&mut self) -> Option<Entity> {
        let target = self.session.target()?;
        self.device.stop_drag();
        self.session = DragSession::None;
        debug!("stopped dragging {:?}", target);
        Some(target)
    }

    /// Swaps in a newly selected pointer device and returns the old one.
    ///
    /// A drag running on the old device is stopped first.
    pub fn select_device(&mut self, device: P) -> P {
        self.cancel_drag();
        info!("pointer device changed");
        std::mem::replace(&mut self.device, device)
    }

    fn release(&mut self, target: Entity) {
        if self.is_dragging(target) {
            self.cancel_drag();
        }
    }
}

impl<P: PointerDevice> TouchHandler for InteractionController<P> {
    fn on_enter(&mut self, target: Entity, _hit: &PickHit, highlights: &mut dyn HighlightSink) {
        highlights.set_highlight(target, Highlight::Hover);
    }

    fn on_touch_start(&mut self, target: Entity, _hit: &PickHit, highlights: &mut dyn HighlightSink) {
        if self.session != DragSession::None {
            return;
        }
        // highlight goes first and stays even if the device refuses
        highlights.set_highlight(target, Highlight::Active);
        if self.device.start_drag(target) {
            self.session = DragSession::Active(target);
            debug!("started dragging {:?}", target);
        } else {
            debug!("pointer device refused to drag {:?}", target);
        }
    }

    fn on_touch_end(&mut self, target: Entity, _hit: &PickHit, highlights: &mut dyn HighlightSink) {
        highlights.set_highlight(target, Highlight::Hover);
        self.release(target);
    }

    fn on_exit(&mut self, target: Entity, _hit: &PickHit, highlights: &mut dyn HighlightSink) {
        highlights.set_highlight(target, Highlight::Idle);
        self.release(target);
    }
}
