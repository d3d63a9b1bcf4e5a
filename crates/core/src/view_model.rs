//! Client view-model: the record list, the form state machine and the form
//! draft, driven by a pure reducer.
//!
//! Every action takes the state by value and returns the next state, so
//! transitions can be asserted without any rendering layer. Network calls
//! live in the client crate; this module only decides *what* to send via
//! [`submit`].
//!
//! ```text
//! Hidden --OpenAdd--> Adding
//! Hidden --OpenEdit(id)--> Editing(id)      (draft pre-populated)
//! Adding | Editing --SubmitSucceeded | Cancel--> Hidden
//! ```

use serde_json::{Map, Value};

use crate::cat::{Cat, CatField, FieldErrors, Gender, NewCat};
use crate::types::CatId;

/// Form visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Hidden,
    Adding,
    Editing(CatId),
}

/// In-progress form contents, held as the raw text the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatDraft {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub breed: String,
    pub image_url: String,
}

impl Default for CatDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            gender: Gender::Male.as_str().to_string(),
            breed: String::new(),
            image_url: String::new(),
        }
    }
}

impl CatDraft {
    pub fn from_cat(cat: &Cat) -> Self {
        Self {
            name: cat.name.clone(),
            age: cat.age.to_string(),
            gender: cat.gender.as_str().to_string(),
            breed: cat.breed.clone(),
            image_url: cat.image_url.clone().unwrap_or_default(),
        }
    }

    /// Pure two-way binding update.
    pub fn with_field(mut self, field: CatField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            CatField::Name => self.name = value,
            CatField::Age => self.age = value,
            CatField::Gender => self.gender = value,
            CatField::Breed => self.breed = value,
            CatField::ImageUrl => self.image_url = value,
        }
        self
    }

    /// Build the JSON body the gateway would receive for this draft.
    ///
    /// Blank inputs are left out so the schema reports them as required;
    /// a non-numeric age is sent as text so the schema reports its type.
    pub fn to_payload(&self) -> Map<String, Value> {
        let mut body = Map::new();
        let mut text = |field: CatField, value: &str| {
            if !value.trim().is_empty() {
                body.insert(field.as_str().to_string(), Value::String(value.to_string()));
            }
        };
        text(CatField::Name, &self.name);
        text(CatField::Gender, &self.gender);
        text(CatField::Breed, &self.breed);
        text(CatField::ImageUrl, self.image_url.trim());

        let age = self.age.trim();
        if !age.is_empty() {
            let value = age
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(age.to_string()));
            body.insert(CatField::Age.as_str().to_string(), value);
        }
        body
    }

    /// Validate with the same rules the gateway and the store apply.
    pub fn validate(&self) -> Result<NewCat, FieldErrors> {
        NewCat::from_json(&self.to_payload())
    }
}

/// Everything the view renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryState {
    pub cats: Vec<Cat>,
    pub form: FormMode,
    pub draft: CatDraft,
    /// Message of the most recent failed request, cleared on the next success.
    pub last_error: Option<String>,
}

/// User actions and request outcomes.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The record set was (re)fetched.
    Loaded(Vec<Cat>),
    OpenAdd,
    OpenEdit(CatId),
    SetField(CatField, String),
    Cancel,
    SubmitSucceeded,
    /// A request failed; form state is kept as-is.
    RequestFailed(String),
}

/// One call against the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayRequest {
    List,
    Create(NewCat),
    Update(CatId, NewCat),
    Delete(CatId),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("the form is not open")]
    FormHidden,

    #[error("invalid form: {0}")]
    Invalid(FieldErrors),
}

/// Apply one action.
pub fn reduce(mut state: RegistryState, action: Action) -> RegistryState {
    match action {
        Action::Loaded(cats) => {
            if let FormMode::Editing(id) = state.form {
                if !cats.iter().any(|c| c.id == id) {
                    tracing::debug!(cat_id = %id, "Edited cat disappeared, closing form");
                    state.form = FormMode::Hidden;
                    state.draft = CatDraft::default();
                }
            }
            state.cats = cats;
            state.last_error = None;
        }
        Action::OpenAdd => {
            if state.form == FormMode::Hidden {
                state.form = FormMode::Adding;
                state.draft = CatDraft::default();
            }
        }
        Action::OpenEdit(id) => {
            if state.form == FormMode::Hidden {
                if let Some(cat) = state.cats.iter().find(|c| c.id == id) {
                    state.draft = CatDraft::from_cat(cat);
                    state.form = FormMode::Editing(id);
                }
            }
        }
        Action::SetField(field, value) => {
            state.draft = state.draft.with_field(field, value);
        }
        Action::Cancel => {
            state.form = FormMode::Hidden;
            state.draft = CatDraft::default();
        }
        Action::SubmitSucceeded => {
            state.form = FormMode::Hidden;
            state.draft = CatDraft::default();
            state.last_error = None;
        }
        Action::RequestFailed(message) => {
            state.last_error = Some(message);
        }
    }
    state
}

/// Decide which request the current form submits.
pub fn submit(state: &RegistryState) -> Result<GatewayRequest, SubmitError> {
    let target = match state.form {
        FormMode::Hidden => return Err(SubmitError::FormHidden),
        FormMode::Adding => None,
        FormMode::Editing(id) => Some(id),
    };
    let cat = state.draft.validate().map_err(SubmitError::Invalid)?;
    Ok(match target {
        None => GatewayRequest::Create(cat),
        Some(id) => GatewayRequest::Update(id, cat),
    })
}
