//! Default resolution.
//!
//! A field's effective default comes from, highest first:
//!
//! 1. the object override ([`ObjectLookup`]) for the field's path;
//! 2. the seed mapping ([`SeedData`]) for the field's path;
//! 3. the field's configured default.
//!
//! Multi-valued fields always resolve to an empty sequence. The same
//! resolution feeds help text, the parser's default value and the engine's
//! initial data.

use std::{collections::BTreeMap, fmt, sync::Arc};

use figment::Figment;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    engine::coerce,
    field::{ComputedDefault, FieldDefault, FieldKind, FieldSpec},
    form::SEPARATOR,
    value::{Value, quote_spaced},
};

/// Source of per-field values standing in for attributes of an external
/// object.
///
/// `path` holds the short names from the root form down to the field.
pub trait ObjectLookup: Send + Sync {
    /// Value for the field at `path`, if the object provides one.
    fn lookup(&self, path: &[String]) -> Option<Value>;
}

/// A serialized object: nested JSON objects follow subform paths.
impl ObjectLookup for serde_json::Value {
    fn lookup(&self, path: &[String]) -> Option<Value> {
        let found = path
            .iter()
            .try_fold(self, |node, segment| node.as_object()?.get(segment))?;
        Value::from_json(found)
    }
}

/// Layered configuration: `xxx-b_bb-value` is read from `xxx.b_bb.value`.
impl ObjectLookup for Figment {
    fn lookup(&self, path: &[String]) -> Option<Value> {
        let key = path.join(".");
        let found = self.find_value(&key).ok()?;
        let json: serde_json::Value = found.deserialize().ok()?;
        Value::from_json(&json)
    }
}

/// Adapts a closure taking the hyphenated field name.
///
/// ```
/// use form_args::{LookupFn, ObjectLookup, Value};
///
/// let object = LookupFn(|name: &str| (name == "value").then(|| Value::from("foo")));
/// assert_eq!(object.lookup(&["value".to_owned()]), Some(Value::from("foo")));
/// ```
pub struct LookupFn<F>(pub F);

impl<F> ObjectLookup for LookupFn<F>
where
    F: Fn(&str) -> Option<Value> + Send + Sync,
{
    fn lookup(&self, path: &[String]) -> Option<Value> {
        (self.0)(&path.join(&SEPARATOR.to_string()))
    }
}

/// One entry of [`SeedData`].
#[derive(Debug, Clone, PartialEq)]
pub enum SeedEntry {
    /// Value for a leaf field.
    Value(Value),
    /// Values for a subform.
    Nested(SeedData),
}

/// Nested seed mapping keyed by short name.
///
/// # Examples
///
/// ```
/// use form_args::{SeedData, Value};
///
/// let seed = SeedData::new()
///     .with("value", "baz")
///     .with_nested("child", SeedData::new().with("value", 7));
/// assert_eq!(seed.get(&["child".to_owned(), "value".to_owned()]), Some(&Value::Int(7)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedData(BTreeMap<String, SeedEntry>);

impl SeedData {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds a leaf value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), SeedEntry::Value(value.into()));
        self
    }

    /// Adds a subform mapping.
    #[must_use]
    pub fn with_nested(mut self, name: impl Into<String>, nested: Self) -> Self {
        self.0.insert(name.into(), SeedEntry::Nested(nested));
        self
    }

    /// Builds a mapping from a JSON object; `null` members are skipped and
    /// non-object input yields an empty mapping.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Self {
        let Some(object) = json.as_object() else {
            return Self::new();
        };
        let entries = object
            .iter()
            .filter_map(|(name, member)| {
                let entry = if member.is_object() {
                    SeedEntry::Nested(Self::from_json(member))
                } else {
                    SeedEntry::Value(Value::from_json(member)?)
                };
                Some((name.clone(), entry))
            })
            .collect();
        Self(entries)
    }

    /// Builds a mapping from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] raised while serializing `value`.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(|json| Self::from_json(&json))
    }

    /// Leaf value at `path`.
    #[must_use]
    pub fn get(&self, path: &[String]) -> Option<&Value> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for segment in parents {
            match current.0.get(segment)? {
                SeedEntry::Nested(nested) => current = nested,
                SeedEntry::Value(_) => return None,
            }
        }
        match current.0.get(last)? {
            SeedEntry::Value(value) => Some(value),
            SeedEntry::Nested(_) => None,
        }
    }
}

/// Object override and seed mapping supplied when instantiating a form.
#[derive(Clone, Default)]
pub struct Overrides {
    object: Option<Arc<dyn ObjectLookup>>,
    seed: Arc<SeedData>,
}

impl Overrides {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the object override.
    #[must_use]
    pub fn with_object(mut self, object: impl ObjectLookup + 'static) -> Self {
        self.object = Some(Arc::new(object));
        self
    }

    /// Sets the seed mapping.
    #[must_use]
    pub fn with_seed(mut self, seed: SeedData) -> Self {
        self.seed = Arc::new(seed);
        self
    }

    fn object_value(&self, path: &[String]) -> Option<Value> {
        self.object.as_ref()?.lookup(path)
    }

    fn seed_value(&self, path: &[String]) -> Option<Value> {
        self.seed.get(path).cloned()
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overrides")
            .field("object", &self.object.as_ref().map(|_| "<lookup>"))
            .field("seed", &self.seed)
            .finish()
    }
}

/// Outcome of default resolution for one field.
#[derive(Debug, Clone)]
pub enum ResolvedDefault {
    /// Nothing resolved.
    Absent,
    /// Multi-valued field: always an empty sequence.
    Empty,
    /// A concrete value.
    Value(Value),
    /// A default computed when the field is processed.
    Computed(ComputedDefault),
}

/// Resolves the effective default of `spec` at `path`.
///
/// # Examples
///
/// ```
/// use form_args::{FieldSpec, Overrides, ResolvedDefault, SeedData, Value, resolve};
///
/// let spec = FieldSpec::string().default("quux");
/// let path = ["value".to_owned()];
/// let seeded = Overrides::new().with_seed(SeedData::new().with("value", "baz"));
/// assert!(matches!(
///     resolve(&spec, &path, &seeded),
///     ResolvedDefault::Value(Value::Str(ref text)) if text == "baz"
/// ));
/// ```
#[must_use]
pub fn resolve(spec: &FieldSpec, path: &[String], overrides: &Overrides) -> ResolvedDefault {
    let kind = spec.kind();
    if kind.is_multiple() {
        return ResolvedDefault::Empty;
    }
    if matches!(kind, FieldKind::Form(_)) {
        return ResolvedDefault::Absent;
    }
    if let Some(value) = overrides
        .object_value(path)
        .or_else(|| overrides.seed_value(path))
    {
        return ResolvedDefault::Value(conform(kind, value));
    }
    match spec.configured_default() {
        Some(FieldDefault::Value(value)) => ResolvedDefault::Value(value.clone()),
        Some(FieldDefault::Computed(computed)) => ResolvedDefault::Computed(computed.clone()),
        None => ResolvedDefault::Absent,
    }
}

/// Coerces textual overrides (as read from configuration) into the field's
/// type. Values that do not coerce are kept as they are.
fn conform(kind: &FieldKind, value: Value) -> Value {
    match (&value, kind) {
        (Value::Str(_), FieldKind::String | FieldKind::Select { .. }) => value,
        (Value::Str(text), _) => coerce::scalar(kind, text).unwrap_or(value),
        (Value::Int(number), FieldKind::Float) => {
            i32::try_from(*number).map_or(value, |small| Value::Float(f64::from(small)))
        }
        (Value::Int(number), FieldKind::Decimal) => Value::Decimal(Decimal::from(*number)),
        (Value::Float(number), FieldKind::Decimal) => {
            Decimal::try_from(*number).map_or(value, Value::Decimal)
        }
        _ => value,
    }
}

impl ResolvedDefault {
    /// Text of the help-text default note, without the surrounding
    /// `(default: …)`.
    #[must_use]
    pub fn display(&self, kind: &FieldKind) -> Option<String> {
        match self {
            Self::Absent | Self::Empty => None,
            Self::Computed(computed) => Some(computed.display().to_owned()),
            Self::Value(value) => Some(quote_spaced(&render_value(value, kind))),
        }
    }

    /// String handed to the parser as the argument's default value.
    ///
    /// Computed defaults have none: the flag stays absent and the engine
    /// evaluates the default itself.
    #[must_use]
    pub fn argument_value(&self, kind: &FieldKind) -> Option<String> {
        match self {
            Self::Value(value) => Some(render_value(value, kind)),
            Self::Absent | Self::Empty | Self::Computed(_) => None,
        }
    }

    /// Initial data for the engine.
    #[must_use]
    pub fn initial_value(&self) -> Option<Value> {
        match self {
            Self::Absent => None,
            Self::Empty => Some(Value::List(Vec::new())),
            Self::Value(value) => Some(value.clone()),
            Self::Computed(computed) => Some(computed.evaluate()),
        }
    }
}

fn render_value(value: &Value, kind: &FieldKind) -> String {
    kind.temporal_format()
        .filter(|_| value.is_temporal())
        .and_then(|format| value.format_temporal(format))
        .unwrap_or_else(|| value.to_string())
}
