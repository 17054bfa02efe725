//! Replays a scripted pointer session over the board layout: hover, drag, a
//! second touch that gets ignored while dragging, and a dragged bunny being despawned.
//!
//! Runs headless, the highlight changes and drag positions are logged.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::utils::HashMap;
use bevy_xr_drag::interaction::Cursor;
use bevy_xr_drag::prelude::*;

const DEPTH: f32 = -7.0;
const BOARD_OFFSET: f32 = 2.0;

const BOARD: [(&str, Vec3); 12] = [
    ("MeshBoard1", Vec3::new(0.0, BOARD_OFFSET, DEPTH)),
    ("MeshBoard2", Vec3::new(0.0, -BOARD_OFFSET, DEPTH)),
    ("MeshBoard3", Vec3::new(-BOARD_OFFSET, 0.0, DEPTH)),
    ("MeshBoard4", Vec3::new(BOARD_OFFSET, 0.0, DEPTH)),
    ("MeshBoard5", Vec3::new(BOARD_OFFSET, BOARD_OFFSET, DEPTH)),
    ("MeshBoard6", Vec3::new(BOARD_OFFSET, -BOARD_OFFSET, DEPTH)),
    ("SphereBoard1", Vec3::new(-BOARD_OFFSET, BOARD_OFFSET, DEPTH)),
    ("SphereBoard2", Vec3::new(-BOARD_OFFSET, -BOARD_OFFSET, DEPTH)),
    ("BoundsBunny1", Vec3::new(0.0, 0.0, DEPTH)),
    ("BoundsBunny2", Vec3::new(4.0, 0.0, DEPTH)),
    ("MeshBunny3", Vec3::new(-4.0, 0.0, DEPTH)),
    ("MeshBunny4", Vec3::new(0.0, -4.0, DEPTH)),
];

enum Step {
    Pick(&'static str, PickEventKind),
    MoveCursor(Vec3),
    Despawn(&'static str),
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let mut app = App::new();
    app.add_plugins(LogPlugin::default())
        .init_resource::<Assets<StandardMaterial>>()
        .add_plugins(CursorInteractionPlugins)
        .insert_resource(InteractionController::new(CursorPointer::default()))
        .add_systems(PostUpdate, log_highlights)
        .add_systems(PostUpdate, log_drag.while_dragging::<CursorPointer>());

    let cursor = app
        .world
        .spawn((
            Name::new("Cursor"),
            Cursor,
            Transform::from_xyz(0.0, BOARD_OFFSET, DEPTH),
        ))
        .id();

    let mut board = HashMap::new();
    for (name, position) in BOARD {
        let material = app
            .world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());
        let entity = app
            .world
            .spawn((
                Name::new(name),
                PickableBundle::default(),
                Transform::from_translation(position),
                material,
            ))
            .id();
        board.insert(name, entity);
    }
    app.update();

    let script = [
        Step::Pick("MeshBoard1", PickEventKind::Enter),
        Step::Pick("MeshBoard1", PickEventKind::TouchStart),
        Step::MoveCursor(Vec3::new(1.0, 3.0, DEPTH)),
        Step::Pick("SphereBoard1", PickEventKind::Enter),
        Step::Pick("SphereBoard1", PickEventKind::TouchStart),
        Step::Pick("SphereBoard1", PickEventKind::Exit),
        Step::Pick("MeshBoard1", PickEventKind::TouchEnd),
        Step::MoveCursor(Vec3::new(0.0, 0.0, DEPTH)),
        Step::Pick("MeshBoard1", PickEventKind::Exit),
        Step::Pick("BoundsBunny1", PickEventKind::Enter),
        Step::Pick("BoundsBunny1", PickEventKind::TouchStart),
        Step::MoveCursor(Vec3::new(0.5, -0.5, DEPTH)),
        Step::Despawn("BoundsBunny1"),
    ];

    for step in script {
        match step {
            Step::Pick(name, kind) => {
                let target = board[name];
                let point = app
                    .world
                    .get::<Transform>(target)
                    .map(|t| t.translation)
                    .unwrap_or_default();
                let hit = PickHit {
                    point,
                    distance: point.length(),
                };
                info!("{:?} on {}", kind, name);
                app.world
                    .resource_mut::<Events<PickEvent>>()
                    .send(PickEvent::new(target, kind, hit));
            }
            Step::MoveCursor(position) => {
                if let Some(mut transform) = app.world.get_mut::<Transform>(cursor) {
                    transform.translation = position;
                }
            }
            Step::Despawn(name) => {
                info!("despawning {}", name);
                app.world.despawn(board[name]);
            }
        }
        app.update();
    }

    let controller = app
        .world
        .resource::<InteractionController<CursorPointer>>();
    info!("finished, dragging {:?}", controller.dragged());
    Ok(())
}

fn log_highlights(query: Query<(&Name, &Highlight), Changed<Highlight>>) {
    for (name, highlight) in &query {
        info!("{} is now {:?}", name, highlight);
    }
}

fn log_drag(
    controller: Res<InteractionController<CursorPointer>>,
    query: Query<(&Name, &Transform), With<Pickable>>,
) {
    if let Some((name, transform)) = controller.dragged().and_then(|e| query.get(e).ok()) {
        info!("dragging {} at {}", name, transform.translation);
    }
}
