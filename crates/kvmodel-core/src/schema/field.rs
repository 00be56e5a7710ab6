mod auto;
pub use auto::AutoStrategy;

mod options;
pub use options::FieldOptions;

mod ty;
pub use ty::FieldTy;

use super::Validator;
use crate::{Reason, Value};

#[derive(Debug, Clone)]
pub struct Field {
    /// Field name, unique within the model
    pub name: String,

    /// Declared type
    pub ty: FieldTy,

    /// Value must be non-blank (strings, json) or positive (integers).
    /// Has no effect on booleans.
    pub required: bool,

    /// A plain `update` may change the field
    pub updatable: bool,

    /// A `value -> id` index is maintained for the field
    pub indexed: bool,

    /// At most one record may hold a given normalized value
    pub unique: bool,

    /// Predicate the coerced value must satisfy
    pub validator: Option<Validator>,

    /// Json only: value used when unset or unparsable
    pub default: Option<serde_json::Value>,

    /// String only: blank input is stored as null
    pub nullify_if_blank: bool,

    /// Specified if and how the field is populated automatically
    pub auto: Option<AutoStrategy>,
}

impl Field {
    pub(crate) fn new(name: String, options: FieldOptions) -> Field {
        let validator = options.validator.or(match options.ty {
            FieldTy::Email => Some(Validator::email()),
            FieldTy::Phone => Some(Validator::phone()),
            _ => None,
        });

        let default = match options.ty {
            FieldTy::Json => Some(
                options
                    .default
                    .unwrap_or_else(|| serde_json::Value::Object(Default::default())),
            ),
            _ => options.default,
        };

        Field {
            name,
            ty: options.ty,
            required: options.required,
            updatable: options.updatable,
            indexed: options.indexed || options.unique,
            unique: options.unique,
            validator,
            default,
            nullify_if_blank: options.nullify_if_blank,
            auto: options.auto,
        }
    }

    /// Converts caller input, or a raw stored string, into the field's
    /// value form.
    pub fn coerce(&self, raw: Value) -> Value {
        match self.ty {
            FieldTy::String | FieldTy::Email | FieldTy::Phone => self.coerce_string(raw),
            FieldTy::Integer => Value::I64(coerce_integer(&raw)),
            FieldTy::Boolean => Value::Bool(match &raw {
                Value::Bool(b) => *b,
                Value::String(s) => s == "true",
                _ => false,
            }),
            FieldTy::Json => Value::Json(self.coerce_json(raw)),
        }
    }

    /// Coerces a value read back from the store.
    pub fn from_storage(&self, raw: &str) -> Value {
        self.coerce(Value::String(raw.to_string()))
    }

    /// The value an unset field holds, e.g. on a freshly built record.
    pub fn initial(&self) -> Value {
        self.coerce(Value::Null)
    }

    /// True if [`Field::validate`] checks this field at all.
    pub fn validates(&self) -> bool {
        self.required || self.validator.is_some()
    }

    /// Checks a coerced value, returning why it is rejected.
    pub fn validate(&self, value: &Value) -> Option<Reason> {
        if self.required {
            let missing = match self.ty.base() {
                FieldTy::String | FieldTy::Json => value.is_blank(),
                FieldTy::Integer => value.as_i64().unwrap_or(0) <= 0,
                _ => false,
            };

            if missing {
                return Some(Reason::Missing);
            }
        }

        match &self.validator {
            Some(validator) if !validator.check(value) => Some(Reason::Invalid),
            _ => None,
        }
    }

    fn coerce_string(&self, raw: Value) -> Value {
        if self.nullify_if_blank && raw.is_blank() {
            return Value::Null;
        }

        match raw {
            Value::String(s) => Value::String(s.trim().to_string()),
            other => Value::String(other.to_storage().trim().to_string()),
        }
    }

    fn coerce_json(&self, raw: Value) -> serde_json::Value {
        let default = || self.default.clone().unwrap_or(serde_json::Value::Null);

        match raw {
            Value::Null => default(),
            Value::Json(json) => json,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::I64(n) => serde_json::Value::from(n),
            Value::String(s) if s.trim().is_empty() => default(),
            Value::String(s) => serde_json::from_str(&s).unwrap_or_else(|_| default()),
        }
    }
}

/// Reads the leading integer of a string the lenient way: surrounding
/// whitespace and trailing garbage are ignored, and no digits at all is 0.
fn coerce_integer(raw: &Value) -> i64 {
    let s = match raw {
        Value::I64(n) => return *n,
        Value::Bool(b) => return i64::from(*b),
        Value::Null => return 0,
        Value::Json(json) => return json.as_i64().unwrap_or(0),
        Value::String(s) => s.trim_start(),
    };

    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));

    if negative {
        -magnitude
    } else {
        magnitude
    }
}
