//! Schema capability traits and field descriptor tables.
//!
//! A schema is a plain data type plus an explicit table of [`FieldSpec`]s
//! describing how each field is sourced. The decoder walks the table; it
//! never inspects the type itself.

mod field;
mod usage;

pub use field::{FieldKind, FieldMeta, FieldSpec};
pub(crate) use field::{FieldValue, Target};
pub use usage::{override_variables, usage};

/// A type decodable field-by-field from a configuration source.
///
/// Sections can be embedded into other sections with [`FieldSpec::nested`]
/// and [`FieldSpec::section_list`].
pub trait Section: Default + 'static {
    /// The descriptor table, one entry per field, in decode order.
    fn fields() -> Vec<FieldSpec<Self>>;
}

/// A top-level schema: a section that also names its runtime environment.
///
/// ```
/// use svc_config::{ConfigSchema, FieldSpec, Section};
///
/// #[derive(Default)]
/// struct Service {
///     env: String,
///     workers: u32,
/// }
///
/// impl Section for Service {
///     fn fields() -> Vec<FieldSpec<Self>> {
///         type F = FieldSpec<Service>;
///         vec![
///             F::string("env", |c, v| c.env = v).env("APP_ENV").required(),
///             F::integer("workers", |c, v: u32| c.workers = v).default_value("4"),
///         ]
///     }
/// }
///
/// impl ConfigSchema for Service {
///     fn environment_name(&self) -> &str {
///         &self.env
///     }
/// }
/// ```
pub trait ConfigSchema: Section {
    /// Raw environment name, validated by the loader.
    fn environment_name(&self) -> &str;
}
