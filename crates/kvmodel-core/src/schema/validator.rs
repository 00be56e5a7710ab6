use crate::Value;

use once_cell::sync::Lazy;
use regex::Regex;
use std::{fmt, sync::Arc};

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    // local@domain.tld, nothing stricter
    Regex::new(r"^[^@]+@[^.@]+(\.[^.@]+)+$").expect("email pattern compiles")
});

/// A predicate over a coerced field value.
#[derive(Clone)]
pub struct Validator {
    name: &'static str,
    check: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Validator {
    pub fn new(name: &'static str, check: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Validator {
        Validator {
            name,
            check: Arc::new(check),
        }
    }

    /// Accepts `local@domain.tld` shaped strings.
    pub fn email() -> Validator {
        Validator::new("email", |value| {
            value.as_str().is_some_and(|s| EMAIL.is_match(s))
        })
    }

    /// Accepts blank input, or a North American number: ten digits once
    /// formatting and a leading country code `1` are dropped.
    pub fn phone() -> Validator {
        Validator::new("phone", |value| match value {
            Value::Null => true,
            Value::String(s) if s.trim().is_empty() => true,
            Value::String(s) => clean_number(s).len() == 10,
            _ => false,
        })
    }

    /// Integers greater than or equal to `min`.
    pub fn at_least(min: i64) -> Validator {
        Validator::new("at_least", move |value| {
            value.as_i64().is_some_and(|n| n >= min)
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn check(&self, value: &Value) -> bool {
        (self.check)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Validator").field(&self.name).finish()
    }
}

fn clean_number(number: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    match digits.strip_prefix('1') {
        Some(rest) => rest.to_string(),
        None => digits,
    }
}
