use bevy::ecs::entity::Entity;
use bevy::ecs::event::Event;
use bevy::math::Vec3;

/// What happened between the pointer and a pickable entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickEventKind {
    /// The pointer ray started hitting the entity.
    Enter,
    /// The trigger (or gaze tap) went down while hitting the entity.
    TouchStart,
    /// The trigger was released while hitting the entity.
    TouchEnd,
    /// The pointer ray stopped hitting the entity.
    Exit,
}

/// Ray intersection info as reported by the picking backend.
///
/// Passed through to handlers untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PickHit {
    /// World space hit location.
    pub point: Vec3,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
}

/// Sent by the picking backend, consumed by [`InteractionPlugin`](super::InteractionPlugin).
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct PickEvent {
    pub target: Entity,
    pub kind: PickEventKind,
    pub hit: PickHit,
}

impl PickEvent {
    pub fn new(target: Entity, kind: PickEventKind, hit: PickHit) -> Self {
        Self { target, kind, hit }
    }

    pub fn enter(target: Entity, hit: PickHit) -> Self {
        Self::new(target, PickEventKind::Enter, hit)
    }

    pub fn touch_start(target: Entity, hit: PickHit) -> Self {
        Self::new(target, PickEventKind::TouchStart, hit)
    }

    pub fn touch_end(target: Entity, hit: PickHit) -> Self {
        Self::new(target, PickEventKind::TouchEnd, hit)
    }

    pub fn exit(target: Entity, hit: PickHit) -> Self {
        Self::new(target, PickEventKind::Exit, hit)
    }
}
