use crate::model::{DataModel, DataValue, SurfaceState};
use crate::protocol::{entries_to_model, BeginRendering, DataModelUpdate, SurfaceUpdate, ValidMessage};
use crate::resolve::DataPath;

use super::state::RuntimeState;
use super::Reducer;

/// Applies one validated message to a [`RuntimeState`].
pub struct RuntimeReducer;

impl Reducer for RuntimeReducer {
    type State = RuntimeState;
    type Intent = ValidMessage;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ValidMessage::BeginRendering(begin) => begin_rendering(state, begin),
            ValidMessage::SurfaceUpdate(update) => surface_update(state, update),
            ValidMessage::DataModelUpdate(update) => data_model_update(state, update),
            ValidMessage::DeleteSurface(delete) => state.without_surface(&delete.surface_id),
            ValidMessage::Unknown(case) => {
                tracing::debug!(case = %case, "ignoring unhandled message case");
                state
            }
        }
    }
}

fn begin_rendering(state: RuntimeState, begin: BeginRendering) -> RuntimeState {
    let BeginRendering {
        surface_id,
        root,
        styles,
    } = begin;
    let surface = SurfaceState {
        styles: styles.unwrap_or_default(),
        ..SurfaceState::new(surface_id, root)
    };
    state.with_surface(surface)
}

fn surface_update(state: RuntimeState, update: SurfaceUpdate) -> RuntimeState {
    if !state.contains(&update.surface_id) {
        tracing::debug!(surface = %update.surface_id, "surfaceUpdate for unknown surface");
        return state;
    }
    let SurfaceUpdate {
        surface_id,
        components,
    } = update;
    state.update_surface(&surface_id, move |surface| {
        for component in components {
            surface.components.insert(component.id.clone(), component);
        }
    })
}

fn data_model_update(state: RuntimeState, update: DataModelUpdate) -> RuntimeState {
    if !state.contains(&update.surface_id) {
        tracing::debug!(surface = %update.surface_id, "dataModelUpdate for unknown surface");
        return state;
    }
    let contents = entries_to_model(&update.contents);
    let path = DataPath::parse(update.path.as_deref().unwrap_or("/"));
    state.update_surface(&update.surface_id, move |surface| {
        replace_at(&mut surface.data_model, &path.segments, contents);
    })
}

/// Replace the mapping at `segments` with `contents`, creating mappings on
/// the way down. Anything in the way that is not a mapping is overwritten.
fn replace_at(model: &mut DataModel, segments: &[String], contents: DataModel) {
    let Some((last, parents)) = segments.split_last() else {
        *model = contents;
        return;
    };

    let mut current = model;
    for segment in parents {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| DataValue::Mapping(DataModel::new()));
        if !matches!(slot, DataValue::Mapping(_)) {
            *slot = DataValue::Mapping(DataModel::new());
        }
        current = match slot {
            DataValue::Mapping(map) => map,
            _ => return,
        };
    }
    current.insert(last.clone(), DataValue::Mapping(contents));
}
