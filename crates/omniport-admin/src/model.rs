//! Model metadata as seen by the admin

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Identity of a registered model: `app_label.model_name`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModelKey {
    pub app_label: String,
    pub model_name: String,
}

impl ModelKey {
    pub fn new(app_label: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            app_label: app_label.into(),
            model_name: model_name.into(),
        }
    }
}

impl Display for ModelKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.app_label, self.model_name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Auto,
    Char,
    Text,
    Integer,
    Boolean,
    DateTime,
    ForeignKey,
}

impl FieldKind {
    pub fn is_text(&self) -> bool {
        matches!(self, FieldKind::Char | FieldKind::Text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub primary_key: bool,
}

impl FieldMeta {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            primary_key: false,
        }
    }

    pub fn primary_key(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Auto,
            primary_key: true,
        }
    }
}

/// Metadata of a data model registered with an admin site
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMeta {
    pub app_label: String,
    pub object_name: String,
    pub verbose_name: String,
    pub verbose_name_plural: String,
    pub fields: Vec<FieldMeta>,
    #[serde(default)]
    pub is_abstract: bool,
}

impl ModelMeta {
    /// Create metadata for `object_name` (e.g. `StudentProfile`) in `app_label`.
    ///
    /// The verbose name is derived from the object name (`student profile`),
    /// and the model gets an `id` primary key.
    pub fn new(app_label: impl Into<String>, object_name: impl Into<String>) -> Self {
        let object_name = object_name.into();
        let verbose_name = camel_case_to_spaces(&object_name);
        Self {
            app_label: app_label.into(),
            verbose_name_plural: format!("{}s", verbose_name),
            verbose_name,
            object_name,
            fields: vec![FieldMeta::primary_key("id")],
            is_abstract: false,
        }
    }

    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldMeta::new(name, kind));
        self
    }

    pub fn verbose_name(mut self, singular: impl Into<String>, plural: impl Into<String>) -> Self {
        self.verbose_name = singular.into();
        self.verbose_name_plural = plural.into();
        self
    }

    pub fn abstract_model(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn model_name(&self) -> String {
        self.object_name.to_lowercase()
    }

    pub fn key(&self) -> ModelKey {
        ModelKey::new(self.app_label.clone(), self.model_name())
    }

    pub fn pk(&self) -> Option<&FieldMeta> {
        self.fields.iter().find(|f| f.primary_key)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }
}

/// One model or a collection of models passed to a registration call
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelSet(Vec<ModelMeta>);

impl ModelSet {
    pub fn iter(&self) -> std::slice::Iter<'_, ModelMeta> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ModelMeta> for ModelSet {
    fn from(value: ModelMeta) -> Self {
        ModelSet(vec![value])
    }
}

impl From<Vec<ModelMeta>> for ModelSet {
    fn from(value: Vec<ModelMeta>) -> Self {
        ModelSet(value)
    }
}

impl From<&[ModelMeta]> for ModelSet {
    fn from(value: &[ModelMeta]) -> Self {
        ModelSet(value.to_vec())
    }
}

impl FromIterator<ModelMeta> for ModelSet {
    fn from_iter<T: IntoIterator<Item = ModelMeta>>(iter: T) -> Self {
        ModelSet(iter.into_iter().collect())
    }
}

impl IntoIterator for ModelSet {
    type Item = ModelMeta;
    type IntoIter = std::vec::IntoIter<ModelMeta>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Split at word boundaries only, so acronyms stay whole: `HTTPResponse`
/// becomes `http response` and `FAQ` stays `faq`
fn camel_case_to_spaces(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let after_lower = i > 0 && chars[i - 1].is_lowercase();
            let starts_word = chars.get(i + 1).is_some_and(|next| !next.is_uppercase());
            if after_lower || starts_word {
                out.push(' ');
            }
        }
        out.extend(c.to_lowercase());
    }
    out.trim_matches(' ').to_string()
}

/// Capitalize the first character, as used for display names
pub fn capfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
