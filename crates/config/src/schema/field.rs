//! Per-field descriptors.
//!
//! Responsibilities:
//! - Describe one configuration field: key path, semantic type, required-ness,
//!   default literal, list delimiter, override variable, description, secrecy.
//! - Carry a typed assignment into the destination schema.
//! - Lift descriptors of an embedded section into the parent schema.
//!
//! Does NOT handle:
//! - Reading or coercing raw values (see `decoder`).
//!
//! Invariants:
//! - The assignment closure only ever receives the `FieldValue` variant that
//!   matches the descriptor's `FieldKind`; the decoder coerces by kind first.
//! - Integer assignments are range-checked against the destination type.

use std::fmt;
use std::time::Duration;

use secrecy::SecretString;
use serde_yaml::Value;

use super::Section;
use crate::constants::DEFAULT_LIST_DELIMITER;
use crate::decoder;
use crate::loader::ConfigError;

/// Semantic type of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    Duration,
    Float,
    StringList,
    /// An ordered list of embedded sections.
    SectionList,
}

impl FieldKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Duration => "duration",
            FieldKind::Float => "float",
            FieldKind::StringList => "list",
            FieldKind::SectionList => "sections",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value already coerced to a field's semantic type.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    Duration(Duration),
    Float(f64),
    StringList(Vec<String>),
}

/// Declarative part of a field descriptor.
#[derive(Debug, Clone)]
pub struct FieldMeta {
    /// Dotted key path into the configuration source (e.g. `server.port`).
    pub key: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Literal applied when neither the override nor the file supply a value.
    pub default: Option<&'static str>,
    /// Separator for list fields.
    pub delimiter: char,
    /// Environment variable overriding the file-sourced value.
    pub env: Option<&'static str>,
    pub description: Option<&'static str>,
    pub secret: bool,
    /// Element descriptors, for section lists.
    pub elements: Option<fn() -> Vec<FieldMeta>>,
}

type Assign<S> = Box<dyn Fn(&mut S, FieldValue) -> Result<(), String>>;
type DecodeSections<S> = Box<dyn Fn(&mut S, &[Value], &str) -> Result<(), ConfigError>>;

pub(crate) enum Target<S> {
    Scalar(Assign<S>),
    Sections(DecodeSections<S>),
}

/// Descriptor of one field of schema `S`.
///
/// Built with one of the typed constructors and refined with the builder
/// methods:
///
/// ```
/// use std::time::Duration;
/// use svc_config::FieldSpec;
///
/// #[derive(Default)]
/// struct Producer {
///     brokers: Vec<String>,
///     batch_timeout: Duration,
/// }
///
/// type F = FieldSpec<Producer>;
/// let fields = vec![
///     F::list("brokers", |c, v| c.brokers = v).required(),
///     F::duration("batchTimeout", |c, v| c.batch_timeout = v).default_value("1s"),
/// ];
/// assert_eq!(fields[1].meta().default, Some("1s"));
/// ```
pub struct FieldSpec<S> {
    meta: FieldMeta,
    target: Target<S>,
}

impl<S> fmt::Debug for FieldSpec<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec").field("meta", &self.meta).finish_non_exhaustive()
    }
}

impl<S: 'static> FieldSpec<S> {
    fn scalar(key: &str, kind: FieldKind, assign: Assign<S>) -> Self {
        Self {
            meta: FieldMeta {
                key: key.to_string(),
                kind,
                required: false,
                default: None,
                delimiter: DEFAULT_LIST_DELIMITER,
                env: None,
                description: None,
                secret: false,
                elements: None,
            },
            target: Target::Scalar(assign),
        }
    }

    pub fn string(key: &str, set: fn(&mut S, String)) -> Self {
        Self::scalar(
            key,
            FieldKind::String,
            Box::new(move |dest: &mut S, value: FieldValue| match value {
                FieldValue::String(s) => {
                    set(dest, s);
                    Ok(())
                }
                other => Err(mismatch(FieldKind::String, &other)),
            }),
        )
    }

    /// A string field whose value is kept out of logs and error messages.
    pub fn secret(key: &str, set: fn(&mut S, SecretString)) -> Self {
        let mut spec = Self::scalar(
            key,
            FieldKind::String,
            Box::new(move |dest: &mut S, value: FieldValue| match value {
                FieldValue::String(s) => {
                    set(dest, SecretString::new(s.into()));
                    Ok(())
                }
                other => Err(mismatch(FieldKind::String, &other)),
            }),
        );
        spec.meta.secret = true;
        spec
    }

    /// An integer field; values outside the range of `T` are rejected.
    pub fn integer<T>(key: &str, set: fn(&mut S, T)) -> Self
    where
        T: TryFrom<i64> + 'static,
    {
        Self::scalar(
            key,
            FieldKind::Integer,
            Box::new(move |dest: &mut S, value: FieldValue| match value {
                FieldValue::Integer(n) => match T::try_from(n) {
                    Ok(v) => {
                        set(dest, v);
                        Ok(())
                    }
                    Err(_) => Err(format!("{n} is out of range for this field")),
                },
                other => Err(mismatch(FieldKind::Integer, &other)),
            }),
        )
    }

    pub fn boolean(key: &str, set: fn(&mut S, bool)) -> Self {
        Self::scalar(
            key,
            FieldKind::Boolean,
            Box::new(move |dest: &mut S, value: FieldValue| match value {
                FieldValue::Boolean(b) => {
                    set(dest, b);
                    Ok(())
                }
                other => Err(mismatch(FieldKind::Boolean, &other)),
            }),
        )
    }

    pub fn duration(key: &str, set: fn(&mut S, Duration)) -> Self {
        Self::scalar(
            key,
            FieldKind::Duration,
            Box::new(move |dest: &mut S, value: FieldValue| match value {
                FieldValue::Duration(d) => {
                    set(dest, d);
                    Ok(())
                }
                other => Err(mismatch(FieldKind::Duration, &other)),
            }),
        )
    }

    pub fn float(key: &str, set: fn(&mut S, f64)) -> Self {
        Self::scalar(
            key,
            FieldKind::Float,
            Box::new(move |dest: &mut S, value: FieldValue| match value {
                FieldValue::Float(x) => {
                    set(dest, x);
                    Ok(())
                }
                other => Err(mismatch(FieldKind::Float, &other)),
            }),
        )
    }

    /// An ordered list of strings, split on the field's delimiter.
    pub fn list(key: &str, set: fn(&mut S, Vec<String>)) -> Self {
        Self::scalar(
            key,
            FieldKind::StringList,
            Box::new(move |dest: &mut S, value: FieldValue| match value {
                FieldValue::StringList(items) => {
                    set(dest, items);
                    Ok(())
                }
                other => Err(mismatch(FieldKind::StringList, &other)),
            }),
        )
    }

    /// Embed every field of section `T` under `key`.
    pub fn nested<T: Section>(key: &str, lens: fn(&mut S) -> &mut T) -> Vec<Self> {
        T::fields()
            .into_iter()
            .map(|field| field.lift(key, lens))
            .collect()
    }

    /// An ordered list of sections of type `T` stored under `key`.
    ///
    /// Each element is decoded with `T`'s own required/default rules.
    /// Override variables declared by `T` are not consulted for elements.
    pub fn section_list<T: Section>(key: &str, lens: fn(&mut S) -> &mut Vec<T>) -> Self {
        let decode: DecodeSections<S> = Box::new(move |dest: &mut S, items: &[Value], path: &str| {
            let fields = T::fields();
            let mut decoded = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let mut element = T::default();
                decoder::decode_element(&fields, item, &format!("{path}[{index}]"), &mut element)?;
                decoded.push(element);
            }
            *lens(dest) = decoded;
            Ok(())
        });

        Self {
            meta: FieldMeta {
                key: key.to_string(),
                kind: FieldKind::SectionList,
                required: false,
                default: None,
                delimiter: DEFAULT_LIST_DELIMITER,
                env: None,
                description: None,
                secret: false,
                elements: Some(element_meta::<T>),
            },
            target: Target::Sections(decode),
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.meta.required = true;
        self
    }

    /// Literal applied when no source supplies a value.
    pub fn default_value(mut self, literal: &'static str) -> Self {
        self.meta.default = Some(literal);
        self
    }

    /// Separator for list fields.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.meta.delimiter = delimiter;
        self
    }

    /// Environment variable that overrides the file-sourced value.
    pub fn env(mut self, var: &'static str) -> Self {
        self.meta.env = Some(var);
        self
    }

    pub fn describe(mut self, text: &'static str) -> Self {
        self.meta.description = Some(text);
        self
    }

    pub fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    pub fn into_meta(self) -> FieldMeta {
        self.meta
    }

    pub(crate) fn target(&self) -> &Target<S> {
        &self.target
    }

    /// Re-home this descriptor into parent schema `P` under `prefix`.
    fn lift<P: 'static>(self, prefix: &str, lens: fn(&mut P) -> &mut S) -> FieldSpec<P> {
        let FieldSpec { mut meta, target } = self;
        meta.key = format!("{prefix}.{}", meta.key);
        let target = match target {
            Target::Scalar(assign) => {
                let lifted: Assign<P> = Box::new(move |dest: &mut P, value: FieldValue| {
                    assign(lens(dest), value)
                });
                Target::Scalar(lifted)
            }
            Target::Sections(decode) => {
                let lifted: DecodeSections<P> =
                    Box::new(move |dest: &mut P, items: &[Value], path: &str| {
                        decode(lens(dest), items, path)
                    });
                Target::Sections(lifted)
            }
        };
        FieldSpec { meta, target }
    }
}

fn element_meta<T: Section>() -> Vec<FieldMeta> {
    T::fields().into_iter().map(FieldSpec::into_meta).collect()
}

fn mismatch(expected: FieldKind, got: &FieldValue) -> String {
    let got = match got {
        FieldValue::String(_) => FieldKind::String,
        FieldValue::Integer(_) => FieldKind::Integer,
        FieldValue::Boolean(_) => FieldKind::Boolean,
        FieldValue::Duration(_) => FieldKind::Duration,
        FieldValue::Float(_) => FieldKind::Float,
        FieldValue::StringList(_) => FieldKind::StringList,
    };
    format!("expected a {expected} value, got a {got} value")
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[derive(Default)]
    struct Inner {
        port: u16,
    }

    impl Section for Inner {
        fn fields() -> Vec<FieldSpec<Self>> {
            vec![FieldSpec::integer("port", |c: &mut Inner, v: u16| c.port = v).required()]
        }
    }

    #[derive(Default)]
    struct Outer {
        name: String,
        token: Option<SecretString>,
        inner: Inner,
    }

    fn assign<S: 'static>(spec: &FieldSpec<S>, dest: &mut S, value: FieldValue) -> Result<(), String> {
        match spec.target() {
            Target::Scalar(assign) => assign(dest, value),
            Target::Sections(_) => panic!("not a scalar field"),
        }
    }

    #[test]
    fn test_builder_methods_fill_meta() {
        let spec = FieldSpec::list("brokers", |c: &mut Outer, v: Vec<String>| c.name = v.join("+"))
            .required()
            .delimiter(';')
            .env("BROKERS")
            .default_value("a;b")
            .describe("Kafka brokers");
        let meta = spec.meta();
        assert_eq!(meta.key, "brokers");
        assert_eq!(meta.kind, FieldKind::StringList);
        assert!(meta.required);
        assert_eq!(meta.delimiter, ';');
        assert_eq!(meta.env, Some("BROKERS"));
        assert_eq!(meta.default, Some("a;b"));
        assert_eq!(meta.description, Some("Kafka brokers"));
        assert!(!meta.secret);
    }

    #[test]
    fn test_integer_out_of_range_is_rejected() {
        let spec = FieldSpec::integer("port", |c: &mut Inner, v: u16| c.port = v);
        let mut inner = Inner::default();
        let err = assign(&spec, &mut inner, FieldValue::Integer(70_000)).unwrap_err();
        assert!(err.contains("out of range"));
        assert_eq!(inner.port, 0);

        assign(&spec, &mut inner, FieldValue::Integer(8080)).unwrap();
        assert_eq!(inner.port, 8080);
    }

    #[test]
    fn test_kind_mismatch_is_reported() {
        let spec = FieldSpec::boolean("enabled", |_: &mut Inner, _| {});
        let mut inner = Inner::default();
        let err = assign(&spec, &mut inner, FieldValue::Integer(1)).unwrap_err();
        assert!(err.contains("boolean"));
    }

    #[test]
    fn test_secret_field_wraps_value() {
        let spec = FieldSpec::secret("token", |c: &mut Outer, v| c.token = Some(v));
        assert!(spec.meta().secret);
        let mut outer = Outer::default();
        assign(&spec, &mut outer, FieldValue::String("hunter2".into())).unwrap();
        assert_eq!(outer.token.as_ref().unwrap().expose_secret(), "hunter2");
    }

    #[test]
    fn test_nested_prefixes_keys_and_routes_assignment() {
        let fields = FieldSpec::nested::<Inner>("inner", |c: &mut Outer| &mut c.inner);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].meta().key, "inner.port");
        assert!(fields[0].meta().required);

        let mut outer = Outer::default();
        assign(&fields[0], &mut outer, FieldValue::Integer(6379)).unwrap();
        assert_eq!(outer.inner.port, 6379);
        assert!(outer.name.is_empty());
    }

    #[test]
    fn test_section_list_exposes_element_meta() {
        #[derive(Default)]
        struct Many {
            items: Vec<Inner>,
        }
        let spec = FieldSpec::section_list::<Inner>("items", |c: &mut Many| &mut c.items);
        assert_eq!(spec.meta().kind, FieldKind::SectionList);
        let elements = (spec.meta().elements.unwrap())();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].key, "port");
    }
}
