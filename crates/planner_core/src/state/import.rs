//! Per-field validation of untrusted planner documents.
//!
//! # Responsibility
//! - Decode each top-level document field independently.
//! - Report which fields were accepted and why others were rejected.
//!
//! # Invariants
//! - `tasks` and `slots` are accepted only as arrays whose every element
//!   decodes; `settings`, `monthly` and `gist` only as decodable objects.
//! - A rejected field never affects the decoding of another field.

use crate::model::document::{GistCredentials, MonthlyMetrics};
use crate::model::settings::Settings;
use crate::model::slot::Slot;
use crate::model::task::Task;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Whole-document import failure. State stays unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Input is not valid JSON.
    Parse(String),
    /// Input is JSON but not an object.
    NotAnObject,
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(details) => write!(f, "document is not valid JSON: {details}"),
            Self::NotAnObject => write!(f, "document must be a JSON object"),
        }
    }
}

impl Error for ImportError {}

/// Outcome for one top-level field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// Incoming value replaced the live one.
    Replaced,
    /// Live value kept.
    Retained { reason: String },
}

impl FieldOutcome {
    pub fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced)
    }
}

/// Field-by-field import result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub tasks: FieldOutcome,
    pub slots: FieldOutcome,
    pub settings: FieldOutcome,
    pub monthly: FieldOutcome,
    pub gist: FieldOutcome,
}

impl ImportReport {
    /// Number of fields that replaced live state.
    pub fn replaced_count(&self) -> usize {
        [
            &self.tasks,
            &self.slots,
            &self.settings,
            &self.monthly,
            &self.gist,
        ]
        .into_iter()
        .filter(|outcome| outcome.is_replaced())
        .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Array,
    Object,
}

/// Independently decoded top-level fields.
#[derive(Debug)]
pub(crate) struct DecodedFields {
    pub(crate) tasks: Result<Vec<Task>, String>,
    pub(crate) slots: Result<Vec<Slot>, String>,
    pub(crate) settings: Result<Settings, String>,
    pub(crate) monthly: Result<MonthlyMetrics, String>,
    pub(crate) gist: Result<GistCredentials, String>,
}

/// Parses `raw` and decodes every known field on its own.
pub(crate) fn decode_fields(raw: &str) -> Result<DecodedFields, ImportError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| ImportError::Parse(err.to_string()))?;
    let Value::Object(object) = value else {
        return Err(ImportError::NotAnObject);
    };

    Ok(DecodedFields {
        tasks: decode_field(&object, "tasks", Shape::Array),
        slots: decode_field(&object, "slots", Shape::Array),
        settings: decode_field(&object, "settings", Shape::Object),
        monthly: decode_field(&object, "monthly", Shape::Object),
        gist: decode_field(&object, "gist", Shape::Object),
    })
}

fn decode_field<T: DeserializeOwned>(
    object: &Map<String, Value>,
    name: &str,
    shape: Shape,
) -> Result<T, String> {
    let value = object
        .get(name)
        .ok_or_else(|| format!("`{name}` is missing"))?;
    let shape_ok = match shape {
        Shape::Array => value.is_array(),
        Shape::Object => value.is_object(),
    };
    if !shape_ok {
        let expected = match shape {
            Shape::Array => "an array",
            Shape::Object => "an object",
        };
        return Err(format!("`{name}` must be {expected}"));
    }
    serde_json::from_value(value.clone()).map_err(|err| format!("`{name}` is malformed: {err}"))
}

/// Stores `decoded` into `target` when valid, returning the outcome.
pub(crate) fn apply_field<T>(target: &mut T, decoded: Result<T, String>) -> FieldOutcome {
    match decoded {
        Ok(value) => {
            *target = value;
            FieldOutcome::Replaced
        }
        Err(reason) => FieldOutcome::Retained { reason },
    }
}
