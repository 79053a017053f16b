//! Structural well-formedness checks for inbound messages and outbound actions.
//!
//! Validation never mutates anything and never fails: callers always get a
//! [`ValidationResult`] back. A [`ValidMessage`] can only be built from a
//! message that passed, which is what lets the reducer skip re-checking.

use crate::model::ChildrenSpec;

use super::action::Action;
use super::message::{
    A2uiMessage, BeginRendering, DataModelUpdate, DataModelUpdateEntry, DeleteSurface,
    SurfaceUpdate, ValueMap,
};

/// Outcome of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub violations: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    fn push(&mut self, violation: impl Into<String>) {
        self.violations.push(violation.into());
    }

    fn require_non_blank(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(format!("{field} must not be blank"));
        }
    }
}

/// Check a single inbound message.
pub fn validate_message(message: &A2uiMessage) -> ValidationResult {
    let mut result = ValidationResult::default();

    let cases = message.populated_cases();
    if cases.len() != 1 {
        result.push(format!(
            "message must populate exactly one case, found {} ({})",
            cases.len(),
            if cases.is_empty() {
                "none".to_string()
            } else {
                cases.join(", ")
            }
        ));
    }

    if let Some(begin) = &message.begin_rendering {
        check_begin_rendering(begin, &mut result);
    }
    if let Some(update) = &message.surface_update {
        check_surface_update(update, &mut result);
    }
    if let Some(update) = &message.data_model_update {
        check_data_model_update(update, &mut result);
    }
    if let Some(delete) = &message.delete_surface {
        result.require_non_blank("deleteSurface.surfaceId", &delete.surface_id);
    }

    result
}

/// Check an outbound action before it leaves the client.
pub fn validate_action(action: &Action) -> ValidationResult {
    let mut result = ValidationResult::default();
    result.require_non_blank(
        "action.surfaceId",
        action.surface_id.as_deref().unwrap_or_default(),
    );
    result
}

fn check_begin_rendering(begin: &BeginRendering, result: &mut ValidationResult) {
    result.require_non_blank("beginRendering.surfaceId", &begin.surface_id);
    result.require_non_blank("beginRendering.root", &begin.root);
}

fn check_surface_update(update: &SurfaceUpdate, result: &mut ValidationResult) {
    result.require_non_blank("surfaceUpdate.surfaceId", &update.surface_id);
    for (i, component) in update.components.iter().enumerate() {
        let at = format!("surfaceUpdate.components[{i}]");
        result.require_non_blank(&format!("{at}.id"), &component.id);
        result.require_non_blank(&format!("{at}.type"), &component.component_type);
        if let Some(ChildrenSpec::Template {
            data_binding,
            component_id,
        }) = &component.children
        {
            result.require_non_blank(&format!("{at}.children.template.dataBinding"), data_binding);
            result.require_non_blank(&format!("{at}.children.template.componentId"), component_id);
        }
    }
}

fn check_data_model_update(update: &DataModelUpdate, result: &mut ValidationResult) {
    result.require_non_blank("dataModelUpdate.surfaceId", &update.surface_id);
    check_entries("dataModelUpdate.contents", &update.contents, result);
}

fn check_entries(at: &str, entries: &[DataModelUpdateEntry], result: &mut ValidationResult) {
    for (i, entry) in entries.iter().enumerate() {
        let here = format!("{at}[{i}]");
        let variants = entry.populated_variants();
        if variants.len() != 1 {
            result.push(format!(
                "{here} (key '{}') must set exactly one value variant, found {}",
                entry.key,
                variants.len()
            ));
        }
        if let Some(ValueMap::Entries(nested)) = &entry.value_map {
            check_entries(&format!("{here}.valueMap"), nested, result);
        }
    }
}

/// A message that passed [`validate_message`], reduced to its single case.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidMessage {
    BeginRendering(BeginRendering),
    SurfaceUpdate(SurfaceUpdate),
    DataModelUpdate(DataModelUpdate),
    DeleteSurface(DeleteSurface),
    /// A case this client does not know; carries its wire name.
    Unknown(String),
}

impl ValidMessage {
    pub fn case_name(&self) -> &str {
        match self {
            ValidMessage::BeginRendering(_) => "beginRendering",
            ValidMessage::SurfaceUpdate(_) => "surfaceUpdate",
            ValidMessage::DataModelUpdate(_) => "dataModelUpdate",
            ValidMessage::DeleteSurface(_) => "deleteSurface",
            ValidMessage::Unknown(name) => name,
        }
    }
}

impl TryFrom<A2uiMessage> for ValidMessage {
    type Error = ValidationResult;

    fn try_from(message: A2uiMessage) -> Result<Self, Self::Error> {
        let result = validate_message(&message);
        if !result.is_valid() {
            return Err(result);
        }

        let A2uiMessage {
            begin_rendering,
            surface_update,
            data_model_update,
            delete_surface,
            other,
        } = message;

        if let Some(begin) = begin_rendering {
            return Ok(ValidMessage::BeginRendering(begin));
        }
        if let Some(update) = surface_update {
            return Ok(ValidMessage::SurfaceUpdate(update));
        }
        if let Some(update) = data_model_update {
            return Ok(ValidMessage::DataModelUpdate(update));
        }
        if let Some(delete) = delete_surface {
            return Ok(ValidMessage::DeleteSurface(delete));
        }
        let name = other
            .into_iter()
            .find(|(_, value)| !value.is_null())
            .map(|(key, _)| key)
            .unwrap_or_default();
        Ok(ValidMessage::Unknown(name))
    }
}
