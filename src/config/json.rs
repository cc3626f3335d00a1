//! Loading declarative configs from JSON.

use super::{FormConfig, ShowErrors};
use crate::core::FieldConfig;
use crate::schema::{self, ConfigError};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormDocument {
    fields: IndexMap<String, FieldConfig>,
    #[serde(default)]
    show_errors: Option<ShowErrors>,
    #[serde(default)]
    custom_prefix: Option<String>,
}

impl FormConfig {
    /// Build a config from its JSON form.
    ///
    /// Only the data part (`fields`, `showErrors`, `customPrefix`) can be
    /// expressed in JSON; custom validators and the submit callback are
    /// attached afterwards. In development builds the document is checked by
    /// [`schema::check_document`] first, so every shape problem is reported at
    /// once.
    ///
    /// # Example
    ///
    /// ```rust
    /// use payform::config::{FormConfig, ShowErrors};
    /// use serde_json::json;
    ///
    /// let config = FormConfig::from_json(json!({
    ///     "fields": {
    ///         "CVC": { "isRequired": "Please provide a CVC" }
    ///     },
    ///     "showErrors": "blur"
    /// }))
    /// .unwrap();
    ///
    /// assert!(config.has_field("CVC"));
    /// assert_eq!(config.policy(), ShowErrors::Blur);
    /// ```
    pub fn from_json(document: Value) -> Result<Self, ConfigError> {
        if schema::enabled() {
            schema::check_document(&document)?;
        }

        let document: FormDocument = serde_json::from_value(document)?;
        Ok(Self {
            fields: document.fields,
            show_errors: document.show_errors,
            custom_prefix: document.custom_prefix,
            ..Self::default()
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Self::from_json(serde_json::from_str(text)?)
    }
}
