//! The validation engine.

use super::binding::{FieldBinding, FieldOverrides, FormBinding, SubmitSnapshot};
use super::policy::visible_errors;
use super::state::EngineState;
use super::transition::{reduce, Transition};
use crate::config::{ConfigSource, FormConfig};
use crate::core::{ErrorMap, FieldValues, ValidatorRegistry};
use crate::schema::{self, ConfigError};
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Field-validation state container for one form.
///
/// Owns the state snapshot, the validator registry and the config source.
/// State changes only through [`Transition`]s; every change of values
/// re-resolves the config and re-validates every field.
///
/// # Example
///
/// ```rust
/// use payform::builder::FormConfigBuilder;
/// use payform::engine::ValidationEngine;
///
/// let config = FormConfigBuilder::new()
///     .field_with("Name", |f| f.required("Please provide a name"))
///     .build();
/// let mut engine = ValidationEngine::new(config).unwrap();
///
/// assert!(engine.errors().is_empty());
/// assert!(!engine.is_form_valid());
///
/// engine.field("Name").on_change("Jane");
/// let snapshot = engine.form().on_submit();
///
/// assert!(snapshot.is_form_valid);
/// assert_eq!(engine.errors()["Name"], None);
/// ```
pub struct ValidationEngine {
    source: ConfigSource,
    config: FormConfig,
    registry: ValidatorRegistry,
    state: EngineState,
    session_id: Uuid,
    started_at: DateTime<Utc>,
}

impl ValidationEngine {
    /// Start a session for a configuration.
    ///
    /// The source is first resolved with an empty snapshot; that config
    /// supplies the custom validators, the schema check input and the
    /// initial state. In development builds a malformed config fails with
    /// [`ConfigError`].
    pub fn new(source: impl Into<ConfigSource>) -> Result<Self, ConfigError> {
        let source = source.into();
        let seed = source.resolve(&FieldValues::new());
        let registry =
            ValidatorRegistry::with_custom(&seed.custom_validators, seed.custom_prefix.as_deref());

        if schema::enabled() {
            schema::check_config(&seed, &registry)?;
        } else {
            debug!("schema checks disabled in this build");
        }

        let state = EngineState::initial(&seed, &registry);
        let session_id = Uuid::new_v4();
        debug!(
            session = %session_id,
            fields = seed.fields.len(),
            dynamic = source.is_dynamic(),
            "validation session started"
        );

        let mut engine = Self {
            source,
            config: seed,
            registry,
            state,
            session_id,
            started_at: Utc::now(),
        };
        engine.revalidate();
        Ok(engine)
    }

    /// Replace the whole session with a fresh one built from `source`.
    ///
    /// Values, errors, blur flags and the submitted flag of the old session
    /// are discarded. On error the current session is left untouched.
    pub fn reset_fields(&mut self, source: impl Into<ConfigSource>) -> Result<(), ConfigError> {
        let fresh = Self::new(source)?;
        info!(
            previous = %self.session_id,
            session = %fresh.session_id,
            "validation session reset"
        );
        *self = fresh;
        Ok(())
    }

    /// Binding for one field.
    pub fn field(&mut self, name: impl Into<String>) -> FieldBinding<'_> {
        FieldBinding::new(self, name.into(), FieldOverrides::new())
    }

    /// Binding for one field with caller overrides.
    pub fn field_with<'a>(
        &'a mut self,
        name: impl Into<String>,
        overrides: FieldOverrides<'a>,
    ) -> FieldBinding<'a> {
        FieldBinding::new(self, name.into(), overrides)
    }

    /// Form-level binding carrying the submit handler.
    pub fn form(&mut self) -> FormBinding<'_> {
        FormBinding::new(self)
    }

    /// Errors visible under the configured policy.
    pub fn errors(&self) -> ErrorMap {
        visible_errors(&self.state, self.config.policy())
    }

    /// All computed errors, regardless of visibility.
    pub fn full_errors(&self) -> &ErrorMap {
        self.state.errors()
    }

    /// True iff no field has an error, whether visible or not.
    pub fn is_form_valid(&self) -> bool {
        self.state.is_valid()
    }

    pub fn is_form_pristine(&self) -> bool {
        self.state.is_pristine()
    }

    pub fn submitted(&self) -> bool {
        self.state.submitted()
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// The config as resolved for the current values.
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Snapshot of the current session.
    pub fn snapshot(&self) -> SubmitSnapshot {
        SubmitSnapshot {
            session_id: self.session_id,
            values: self.state.values().clone(),
            errors: self.state.errors().clone(),
            blurred: self.state.blurred().clone(),
            submitted: self.state.submitted(),
            is_form_valid: self.state.is_valid(),
        }
    }

    pub(crate) fn change(&mut self, field: &str, value: &str) {
        let mut payload = FieldValues::new();
        payload.insert(field.to_string(), value.to_string());
        self.dispatch(Transition::Change(payload));
    }

    pub(crate) fn blur(&mut self, field: &str) {
        if !self.config.has_field(field) {
            warn!(field, "ignoring blur for unconfigured field");
            return;
        }
        self.dispatch(Transition::Blur(field.to_string()));
    }

    pub(crate) fn submit(&mut self) -> SubmitSnapshot {
        self.dispatch(Transition::Submit);

        let snapshot = self.snapshot();
        info!(
            session = %self.session_id,
            valid = snapshot.is_form_valid,
            "form submitted"
        );
        if let Some(handler) = &self.config.on_submit {
            handler(&snapshot);
        }
        snapshot
    }

    fn dispatch(&mut self, transition: Transition) {
        debug!(session = %self.session_id, kind = transition.kind(), "applying transition");
        let revalidate = matches!(transition, Transition::Change(_));
        self.state = reduce(&self.state, transition);
        if revalidate {
            self.revalidate();
        }
    }

    /// Re-resolve the config for the current values and re-run every field.
    ///
    /// Fields the resolver adds are given their initial value (or `""`)
    /// before validation. Fields it drops keep their value but leave the
    /// error map.
    fn revalidate(&mut self) {
        self.config = self.source.resolve(self.state.values());

        let added: FieldValues = self
            .config
            .fields
            .iter()
            .filter(|(name, _)| !self.state.values().contains_key(*name))
            .map(|(name, field)| {
                let initial = field.initial_value().unwrap_or_default().to_string();
                (name.clone(), initial)
            })
            .collect();
        if !added.is_empty() {
            debug!(session = %self.session_id, fields = added.len(), "resolver added fields");
            self.state = reduce(&self.state, Transition::Change(added));
        }

        let errors = self
            .registry
            .validate_fields(self.state.values(), &self.config.fields);
        self.dispatch(Transition::Validate(errors));
    }
}

impl fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("session_id", &self.session_id)
            .field("started_at", &self.started_at)
            .field("source", &self.source)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
