//! Structural diff between two snapshots of the same record.
//!
//! Every schema type describes its wire shape through [`Diffable::fields`]: an
//! ordered table of [`Field`] descriptors, each carrying the wire name, how to
//! read the value, and what kind of field it is. One generic algorithm,
//! [`diff`], walks two such tables side by side and produces the minimal
//! PATCH payload. Adding a resource type never touches the engine.
//!
//! # Rules
//!
//! | Kind | Included in the payload when |
//! |------|------------------------------|
//! | `Scalar` | serialized values differ |
//! | `Collection` | sequences or maps are not deeply equal (whole new value sent) |
//! | `Record` | the nested diff is non-empty (nested under the wire name) |
//! | `Embedded` | always spliced: nested entries land in the parent payload |
//! | `Reference` | never (links to other resources are not diffed) |
//!
//! Fields named `""` or `"-"` are internal and always skipped.
//!
//! Unset and zero values compare equal when they serialize the same way; an
//! `Option` that stays `None` on both sides is not a change.
//!
//! # Examples
//!
//! ```
//! use redfish_entity::entity::{diff, Diffable, Field};
//!
//! #[derive(Clone)]
//! struct Fan {
//!     name: String,
//!     speed_percent: u8,
//! }
//!
//! impl Diffable for Fan {
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::scalar("Name", &self.name),
//!             Field::scalar("SpeedPercent", &self.speed_percent),
//!         ]
//!     }
//! }
//!
//! let before = Fan { name: "Fan1".into(), speed_percent: 40 };
//! let mut after = before.clone();
//! after.speed_percent = 80;
//!
//! let payload = diff(&before, &after).unwrap();
//! assert_eq!(payload.len(), 1);
//! assert_eq!(payload["SpeedPercent"], 80);
//! ```

use crate::error::{ModelError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// PATCH payload keyed by wire name.
pub type Payload = Map<String, Value>;

type Accessor<'a> = Box<dyn Fn() -> serde_json::Result<Value> + Send + Sync + 'a>;

/// How a field takes part in a diff.
pub enum FieldValue<'a> {
    /// Plain value compared by equality.
    Scalar(Accessor<'a>),
    /// Sequence or map, sent whole when anything inside changed.
    Collection(Accessor<'a>),
    /// Nested object with its own wire name.
    Record(&'a dyn Diffable),
    /// Nested record whose fields belong to the parent on the wire.
    Embedded(&'a dyn Diffable),
    /// Link to another resource. Readable, but never diffed.
    Reference(Accessor<'a>),
}

/// One entry of a record's field table.
pub struct Field<'a> {
    /// Wire name of the field.
    pub name: &'static str,
    /// Kind and accessor.
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    /// A plain value compared by its serialized form.
    pub fn scalar<T: Serialize + Sync + ?Sized>(name: &'static str, value: &'a T) -> Self {
        Field {
            name,
            value: FieldValue::Scalar(Box::new(move || serde_json::to_value(value))),
        }
    }

    /// A sequence or map sent whole when it changes.
    pub fn collection<T: Serialize + Sync + ?Sized>(name: &'static str, value: &'a T) -> Self {
        Field {
            name,
            value: FieldValue::Collection(Box::new(move || serde_json::to_value(value))),
        }
    }

    /// A nested object diffed field by field under `name`.
    pub fn record(name: &'static str, value: &'a dyn Diffable) -> Self {
        Field {
            name,
            value: FieldValue::Record(value),
        }
    }

    /// A nested record whose changes land in the parent payload.
    pub fn embedded(name: &'static str, value: &'a dyn Diffable) -> Self {
        Field {
            name,
            value: FieldValue::Embedded(value),
        }
    }

    /// A link to another resource, such as `Links` or `ManagedBy`.
    pub fn reference<T: Serialize + Sync + ?Sized>(name: &'static str, value: &'a T) -> Self {
        Field {
            name,
            value: FieldValue::Reference(Box::new(move || serde_json::to_value(value))),
        }
    }

    fn is_visible(&self) -> bool {
        !self.name.is_empty() && self.name != "-"
    }
}

/// A record that can describe its own wire shape.
///
/// `fields` must return the same table, in the same order, for every value of
/// the type.
pub trait Diffable: Sync {
    /// The field table of this record.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Compute the fields of `updated` that differ from `original`.
pub fn diff(original: &dyn Diffable, updated: &dyn Diffable) -> Result<Payload> {
    let mut payload = Payload::new();
    let before = original.fields();
    let after = updated.fields();

    if before.len() != after.len() {
        return Err(ModelError::Internal(format!(
            "field tables differ in length ({} vs {})",
            before.len(),
            after.len()
        )));
    }

    for (old, new) in before.into_iter().zip(after) {
        if old.name != new.name {
            return Err(ModelError::Internal(format!(
                "field tables out of order: {} vs {}",
                old.name, new.name
            )));
        }
        if !new.is_visible() {
            continue;
        }

        let name = new.name;
        match (old.value, new.value) {
            (FieldValue::Reference(_), _) | (_, FieldValue::Reference(_)) => {}
            (FieldValue::Scalar(a), FieldValue::Scalar(b))
            | (FieldValue::Collection(a), FieldValue::Collection(b)) => {
                let before = a().map_err(|e| encode_error(name, e))?;
                let after = b().map_err(|e| encode_error(name, e))?;
                if before != after {
                    payload.insert(name.to_string(), after);
                }
            }
            (FieldValue::Record(a), FieldValue::Record(b)) => {
                let nested = diff(a, b)?;
                if !nested.is_empty() {
                    payload.insert(name.to_string(), Value::Object(nested));
                }
            }
            (FieldValue::Embedded(a), FieldValue::Embedded(b)) => {
                payload.extend(diff(a, b)?);
            }
            _ => {
                return Err(ModelError::Internal(format!(
                    "field {} changed kind between snapshots",
                    name
                )))
            }
        }
    }

    Ok(payload)
}

fn encode_error(name: &str, err: serde_json::Error) -> ModelError {
    ModelError::Encode(format!("{}: {}", name, err))
}
