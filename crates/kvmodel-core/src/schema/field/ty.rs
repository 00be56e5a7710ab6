use crate::{Error, Result};

use std::{fmt, str::FromStr};

/// The declared type of a field.
///
/// `Email` and `Phone` are stored and coerced as strings; they only differ
/// by the validator they attach.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldTy {
    #[default]
    String,
    Integer,
    Boolean,
    Json,
    Email,
    Phone,
}

impl FieldTy {
    /// The type values of this field are coerced to.
    pub fn base(self) -> FieldTy {
        match self {
            Self::Email | Self::Phone => Self::String,
            ty => ty,
        }
    }

    pub fn is_string(self) -> bool {
        self.base() == Self::String
    }

    pub fn is_integer(self) -> bool {
        self == Self::Integer
    }

    pub fn is_json(self) -> bool {
        self == Self::Json
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Json => "json",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl FromStr for FieldTy {
    type Err = Error;

    fn from_str(s: &str) -> Result<FieldTy> {
        Ok(match s {
            "string" => Self::String,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "json" => Self::Json,
            "email" => Self::Email,
            "phone" => Self::Phone,
            _ => return Err(Error::invalid_schema(format!("unknown field type `{s}`"))),
        })
    }
}

impl fmt::Display for FieldTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
