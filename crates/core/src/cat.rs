//! Cat records, the wire field schema, and the validation rules shared by
//! the gateway, the store and the client view-model.
//!
//! A request body goes through two passes:
//!
//! 1. **Schema pass** ([`NewCat::from_json`]): presence, JSON type and enum
//!    domain of every field in [`CAT_SCHEMA`].
//! 2. **Constraint pass** ([`NewCat::check`]): non-empty text, non-negative
//!    age, well-formed image URL. Stores run this pass again before writing.
//!
//! Both passes report every failing field, in schema order.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidateUrl, ValidationError, ValidationErrors};

use crate::types::{CatId, Timestamp};

/// Entity name used in not-found errors and log lines.
pub const ENTITY: &str = "Cat";

const MSG_REQUIRED: &str = "is required";
const MSG_NOT_STRING: &str = "must be a string";
const MSG_NOT_INTEGER: &str = "must be an integer";
const MSG_OUT_OF_RANGE: &str = "is out of range";
const MSG_BLANK: &str = "must not be empty";
const MSG_NEGATIVE: &str = "must be zero or greater";
const MSG_BAD_URL: &str = "must be a valid URL";

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

/// The closed set of accepted `gender` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// Wire spelling of every [`Gender`] variant, in declaration order.
pub const GENDER_VALUES: &[&str] = &["Male", "Female"];

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of [`GENDER_VALUES`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gender '{0}'")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            other => Err(UnknownGender(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A stored cat record as exchanged on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cat {
    pub id: CatId,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub breed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Bumped by exactly one on every replacement.
    pub revision: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cat {
    /// The caller-supplied part of the record.
    pub fn fields(&self) -> NewCat {
        NewCat {
            name: self.name.clone(),
            age: self.age,
            gender: self.gender,
            breed: self.breed.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// The caller-supplied fields of a cat, used for both create and full
/// replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCat {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 0, message = "must be zero or greater"))]
    pub age: i32,
    pub gender: Gender,
    #[validate(custom(function = "not_blank"))]
    pub breed: String,
    #[validate(url(message = "must be a valid URL"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed(MSG_BLANK)));
    }
    Ok(())
}

impl NewCat {
    /// Parse and validate a JSON object against [`CAT_SCHEMA`].
    ///
    /// Unknown keys (including store-managed ones such as `id` or
    /// `revision`) are ignored. An empty or `null` `imageUrl` means "no
    /// image".
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let mut name = None;
        let mut age = None;
        let mut gender = None;
        let mut breed = None;
        let mut image_url = None;

        for def in CAT_SCHEMA {
            match read_field(def, body.get(def.field.as_str())) {
                Ok(Some(value)) => {
                    if let Some(message) = constraint_violation(&value) {
                        errors.push(def.field, message);
                    }
                    match (def.field, value) {
                        (CatField::Name, FieldValue::Text(s)) => name = Some(s),
                        (CatField::Breed, FieldValue::Text(s)) => breed = Some(s),
                        (CatField::ImageUrl, FieldValue::Url(s)) => image_url = Some(s),
                        (CatField::Age, FieldValue::Integer(n)) => age = Some(n),
                        (CatField::Gender, FieldValue::Gender(g)) => gender = Some(g),
                        _ => {}
                    }
                }
                Ok(None) => {}
                Err(message) => errors.push(def.field, message),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        match (name, age, gender, breed) {
            (Some(name), Some(age), Some(gender), Some(breed)) => Ok(Self {
                name,
                age,
                gender,
                breed,
                image_url,
            }),
            // Every required field either parsed or produced an error above.
            _ => Err(errors),
        }
    }

    /// Run the constraint pass on an already-typed value.
    pub fn check(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(FieldErrors::from)
    }

    /// Render as the JSON object the gateway accepts.
    pub fn to_json(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Field schema
// ---------------------------------------------------------------------------

/// The caller-supplied fields of a cat, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatField {
    Name,
    Age,
    Gender,
    Breed,
    ImageUrl,
}

impl CatField {
    /// camelCase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Breed => "breed",
            Self::ImageUrl => "imageUrl",
        }
    }

    /// Field name on [`NewCat`], as reported by `validator`.
    fn struct_name(self) -> &'static str {
        match self {
            Self::ImageUrl => "image_url",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for CatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The JSON shape a field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Enum(&'static [&'static str]),
    Url,
}

/// One entry of [`CAT_SCHEMA`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub field: CatField,
    pub kind: FieldKind,
    pub required: bool,
}

/// Wire schema for cat payloads, in reporting order.
pub const CAT_SCHEMA: &[FieldDef] = &[
    FieldDef {
        field: CatField::Name,
        kind: FieldKind::Text,
        required: true,
    },
    FieldDef {
        field: CatField::Age,
        kind: FieldKind::Integer,
        required: true,
    },
    FieldDef {
        field: CatField::Gender,
        kind: FieldKind::Enum(GENDER_VALUES),
        required: true,
    },
    FieldDef {
        field: CatField::Breed,
        kind: FieldKind::Text,
        required: true,
    },
    FieldDef {
        field: CatField::ImageUrl,
        kind: FieldKind::Url,
        required: false,
    },
];

enum FieldValue {
    Text(String),
    Integer(i32),
    Gender(Gender),
    Url(String),
}

/// Schema pass for one field. `Ok(None)` means an absent optional field.
fn read_field(def: &FieldDef, value: Option<&Value>) -> Result<Option<FieldValue>, String> {
    let value = match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if def.kind == FieldKind::Url && s.is_empty() => None,
        Some(v) => Some(v),
    };

    let Some(value) = value else {
        return if def.required {
            Err(MSG_REQUIRED.to_string())
        } else {
            Ok(None)
        };
    };

    match def.kind {
        FieldKind::Text => value
            .as_str()
            .map(|s| Some(FieldValue::Text(s.to_string())))
            .ok_or_else(|| MSG_NOT_STRING.to_string()),
        FieldKind::Url => value
            .as_str()
            .map(|s| Some(FieldValue::Url(s.to_string())))
            .ok_or_else(|| MSG_NOT_STRING.to_string()),
        FieldKind::Integer => {
            let n = integer_value(value).ok_or_else(|| MSG_NOT_INTEGER.to_string())?;
            let n = i32::try_from(n).map_err(|_| MSG_OUT_OF_RANGE.to_string())?;
            Ok(Some(FieldValue::Integer(n)))
        }
        FieldKind::Enum(allowed) => {
            let parsed = value.as_str().and_then(|s| s.parse::<Gender>().ok());
            parsed
                .map(|g| Some(FieldValue::Gender(g)))
                .ok_or_else(|| format!("must be one of: {}", allowed.join(", ")))
        }
    }
}

/// Accepts JSON integers and integral floats (`3.0`).
fn integer_value(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Constraint pass for one parsed field; same rules as the `Validate` derive.
fn constraint_violation(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(s) => not_blank(s).err().map(|_| MSG_BLANK.to_string()),
        FieldValue::Integer(n) if *n < 0 => Some(MSG_NEGATIVE.to_string()),
        FieldValue::Url(s) if !s.validate_url() => Some(MSG_BAD_URL.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// camelCase wire name.
    pub field: String,
    /// Human-readable message, prefixed with the field name.
    pub message: String,
}

/// Every failing field of a payload, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: CatField, message: impl AsRef<str>) {
        self.0.push(FieldError {
            field: field.as_str().to_string(),
            message: format!("{} {}", field.as_str(), message.as_ref()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether `field` is among the failures.
    pub fn contains(&self, field: CatField) -> bool {
        self.0.iter().any(|e| e.field == field.as_str())
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|e| e.message.clone()).collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let by_field = errors.field_errors();
        let mut out = FieldErrors::default();
        for def in CAT_SCHEMA {
            let Some(list) = by_field.get(def.field.struct_name()) else {
                continue;
            };
            for err in list.iter() {
                let message = err
                    .message
                    .as_deref()
                    .map(str::to_string)
                    .unwrap_or_else(|| err.code.to_string());
                out.push(def.field, message);
            }
        }
        out
    }
}
