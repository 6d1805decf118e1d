//! Schema decoding.
//!
//! Responsibilities:
//! - Walk a schema's descriptor table and resolve every field from, in order,
//!   its override variable, the configuration tree, and its default literal.
//! - Coerce raw values to the field's semantic type and assign them.
//!
//! Does NOT handle:
//! - Locating the configuration file (see `locator`).
//! - Validating the environment name (see `environment`).
//!
//! Invariants:
//! - Fields are resolved independently, in table order; the first failure aborts.
//! - A null value in the tree counts as absent; unknown keys are ignored.
//! - Override variables are not consulted for elements of section lists.
//! - Secret values never appear in errors or logs.

mod coerce;
pub mod source;

use std::path::{Path, PathBuf};

use serde_yaml::Value;

pub use coerce::{format_duration, parse_bool, parse_duration, split_list};
pub use source::{SourceFormat, parse_tree, read_tree};

use crate::constants::REDACTED;
use crate::loader::{ConfigError, env_override};
use crate::schema::{FieldMeta, FieldSpec, Section, Target};
use coerce::{Raw, coerce};

/// Where a field's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Override,
    File,
    Default,
}

impl Origin {
    fn as_str(self) -> &'static str {
        match self {
            Origin::Override => "override",
            Origin::File => "file",
            Origin::Default => "default",
        }
    }
}

/// Position of a table within the document being decoded.
struct Scope<'a> {
    /// Qualified path of the enclosing node, empty at the top level.
    prefix: &'a str,
    overrides: bool,
}

impl Scope<'_> {
    fn qualify(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.prefix)
        }
    }
}

/// Decode `tree` into `dest` using `S`'s descriptor table.
///
/// On error `dest` may be partially written and must be discarded.
pub fn decode<S: Section>(tree: &Value, dest: &mut S) -> Result<(), ConfigError> {
    let fields = S::fields();
    let scope = Scope {
        prefix: "",
        overrides: true,
    };
    decode_fields(&fields, tree, &scope, dest)
}

/// Read the file at `path` and decode it into `dest`.
pub fn decode_file<S: Section>(path: &Path, dest: &mut S) -> Result<(), ConfigError> {
    let tree = read_tree(path)?;
    decode(&tree, dest)
}

/// Decode an in-memory document in `format` into `dest`.
pub fn decode_str<S: Section>(
    content: &str,
    format: SourceFormat,
    dest: &mut S,
) -> Result<(), ConfigError> {
    let tree = parse_tree(content, format).map_err(|message| ConfigError::ConfigFileParse {
        path: PathBuf::from(format!("<inline {format}>")),
        message,
    })?;
    decode(&tree, dest)
}

/// Decode one element of a section list. `path` names the element in errors.
pub(crate) fn decode_element<S: 'static>(
    fields: &[FieldSpec<S>],
    node: &Value,
    path: &str,
    dest: &mut S,
) -> Result<(), ConfigError> {
    if !matches!(node, Value::Mapping(_)) {
        return Err(ConfigError::InvalidValue {
            field: path.to_string(),
            value: describe_node(node),
            reason: "expected a mapping".to_string(),
        });
    }
    let scope = Scope {
        prefix: path,
        overrides: false,
    };
    decode_fields(fields, node, &scope, dest)
}

fn decode_fields<S: 'static>(
    fields: &[FieldSpec<S>],
    tree: &Value,
    scope: &Scope<'_>,
    dest: &mut S,
) -> Result<(), ConfigError> {
    fields
        .iter()
        .try_for_each(|field| decode_field(field, tree, scope, dest))
}

fn decode_field<S: 'static>(
    field: &FieldSpec<S>,
    tree: &Value,
    scope: &Scope<'_>,
    dest: &mut S,
) -> Result<(), ConfigError> {
    let meta = field.meta();
    let path = scope.qualify(&meta.key);

    match field.target() {
        Target::Sections(decode_items) => match lookup(tree, &meta.key) {
            Some(Value::Sequence(items)) => {
                tracing::trace!(field = %path, count = items.len(), "decoding section list");
                decode_items(dest, items.as_slice(), &path)
            }
            Some(other) => Err(ConfigError::InvalidValue {
                field: path,
                value: describe_node(other),
                reason: "expected a list of sections".to_string(),
            }),
            None if meta.required => Err(ConfigError::RequiredFieldMissing(path)),
            None => Ok(()),
        },
        Target::Scalar(assign) => {
            let Some((raw, origin)) = resolve_raw(meta, tree, scope, &path)? else {
                if meta.required {
                    return Err(ConfigError::RequiredFieldMissing(path));
                }
                tracing::trace!(field = %path, "no value, keeping zero value");
                return Ok(());
            };

            let shown = if meta.secret {
                REDACTED.to_string()
            } else {
                raw.display(meta.delimiter)
            };
            let invalid = |reason: String| ConfigError::InvalidValue {
                field: path.clone(),
                value: shown.clone(),
                reason,
            };

            let value = coerce(meta, raw).map_err(invalid)?;
            assign(dest, value).map_err(invalid)?;
            tracing::trace!(field = %path, source = origin.as_str(), "resolved field");
            Ok(())
        }
    }
}

/// First available raw value for a field: override, then file, then default.
fn resolve_raw(
    meta: &FieldMeta,
    tree: &Value,
    scope: &Scope<'_>,
    path: &str,
) -> Result<Option<(Raw, Origin)>, ConfigError> {
    if scope.overrides
        && let Some(value) = meta.env.and_then(env_override)
    {
        return Ok(Some((Raw::Text(value), Origin::Override)));
    }

    if let Some(node) = lookup(tree, &meta.key) {
        let raw = raw_from_node(node).map_err(|reason| ConfigError::InvalidValue {
            field: path.to_string(),
            value: if meta.secret {
                REDACTED.to_string()
            } else {
                describe_node(node)
            },
            reason,
        })?;
        return Ok(Some((raw, Origin::File)));
    }

    Ok(meta
        .default
        .map(|literal| (Raw::Text(literal.to_string()), Origin::Default)))
}

/// Follow a dotted key path through nested mappings. Null counts as absent.
fn lookup<'a>(tree: &'a Value, key: &str) -> Option<&'a Value> {
    let mut node = tree;
    for segment in key.split('.') {
        node = untag(node).as_mapping()?.get(segment)?;
    }
    match untag(node) {
        Value::Null => None,
        found => Some(found),
    }
}

fn untag(node: &Value) -> &Value {
    match node {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn scalar_text(node: &Value) -> Option<String> {
    match untag(node) {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn raw_from_node(node: &Value) -> Result<Raw, String> {
    if let Value::Sequence(items) = node {
        return items
            .iter()
            .map(|item| scalar_text(item).ok_or_else(|| "list elements must be scalars".to_string()))
            .collect::<Result<Vec<_>, _>>()
            .map(Raw::Items);
    }
    scalar_text(node)
        .map(Raw::Text)
        .ok_or_else(|| "expected a scalar value, got a mapping".to_string())
}

fn describe_node(node: &Value) -> String {
    match untag(node) {
        Value::Mapping(_) => "{...}".to_string(),
        Value::Sequence(_) => "[...]".to_string(),
        other => scalar_text(other).unwrap_or_default(),
    }
}
