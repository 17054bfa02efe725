use bevy::asset::{Assets, Handle};
use bevy::ecs::change_detection::DetectChangesMut;
use bevy::log::warn;
use bevy::pbr::StandardMaterial;
use bevy::prelude::{
    App, Bundle, Changed, Color, Component, Entity, Or, Plugin, PostUpdate, Query, Res, ResMut,
    Resource,
};

use crate::error::InteractionError;

use super::controller::HighlightSink;

/// Marks an entity the picking backend may report events for.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Pickable;

/// Visual interaction status of a pickable entity.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Highlight {
    #[default]
    Idle,
    Hover,
    Active,
}

#[derive(Bundle, Default)]
pub struct PickableBundle {
    pub pickable: Pickable,
    pub highlight: Highlight,
}

/// Colors used by [`HighlightMaterialPlugin`] for each [`Highlight`] state.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct HighlightPalette {
    pub idle: Color,
    pub hover: Color,
    pub active: Color,
}

impl Default for HighlightPalette {
    fn default() -> Self {
        Self {
            idle: Color::GRAY,
            hover: Color::RED,
            active: Color::BLUE,
        }
    }
}

impl HighlightPalette {
    pub fn color(&self, highlight: Highlight) -> Color {
        match highlight {
            Highlight::Idle => self.idle,
            Highlight::Hover => self.hover,
            Highlight::Active => self.active,
        }
    }
}

/// [`HighlightSink`] writing into the [`Highlight`] components of a query.
pub struct HighlightQuery<'q, 'w, 's> {
    query: &'q mut Query<'w, 's, &'static mut Highlight>,
}

impl<'q, 'w, 's> HighlightQuery<'q, 'w, 's> {
    pub fn new(query: &'q mut Query<'w, 's, &'static mut Highlight>) -> Self {
        Self { query }
    }

    pub fn try_set(&mut self, target: Entity, state: Highlight) -> Result<(), InteractionError> {
        let mut highlight = self
            .query
            .get_mut(target)
            .map_err(|_| InteractionError::MissingHighlight(target))?;
        highlight.set_if_neq(state);
        Ok(())
    }
}

impl HighlightSink for HighlightQuery<'_, '_, '_> {
    fn set_highlight(&mut self, target: Entity, state: Highlight) {
        if let Err(err) = self.try_set(target, state) {
            warn!("{}", err);
        }
    }
}

/// Tints each pickable's [`StandardMaterial`] by its [`Highlight`].
///
/// Every pickable should own its material handle, otherwise entities sharing
/// a material are tinted together.
pub struct HighlightMaterialPlugin;

impl Plugin for HighlightMaterialPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HighlightPalette>()
            .add_systems(PostUpdate, apply_highlight_materials);
    }
}

pub fn apply_highlight_materials(
    palette: Res<HighlightPalette>,
    query: Query<
        (Entity, &Highlight, &Handle<StandardMaterial>),
        Or<(Changed<Highlight>, Changed<Handle<StandardMaterial>>)>,
    >,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, highlight, handle) in &query {
        if let Err(err) = tint(&mut materials, entity, handle, palette.color(*highlight)) {
            warn!("{}", err);
        }
    }
}

fn tint(
    materials: &mut Assets<StandardMaterial>,
    entity: Entity,
    handle: &Handle<StandardMaterial>,
    color: Color,
) -> Result<(), InteractionError> {
    let material = materials
        .get_mut(handle)
        .ok_or(InteractionError::MissingMaterial(entity))?;
    material.base_color = color;
    Ok(())
}
