//! Request context used to evaluate selectors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SelectorError;
use crate::selection::parameter::Parameter;

/// Attributes describing the request being routed.
///
/// Every field is optional. Each `with_*` call consumes the value and
/// returns it with one field replaced, so chains read fluently without
/// sharing a mutable instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Criteria {
    application: Option<String>,
    authenticated_user: Option<String>,
    execution_type: Option<String>,
    execution_id: Option<String>,
    origin: Option<String>,
    location: Option<String>,
    parameters: Option<Vec<Parameter>>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn application(&self) -> Option<&str> {
        self.application.as_deref()
    }

    pub fn authenticated_user(&self) -> Option<&str> {
        self.authenticated_user.as_deref()
    }

    pub fn execution_type(&self) -> Option<&str> {
        self.execution_type.as_deref()
    }

    pub fn execution_id(&self) -> Option<&str> {
        self.execution_id.as_deref()
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn parameters(&self) -> Option<&[Parameter]> {
        self.parameters.as_deref()
    }

    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = Some(application.into());
        self
    }

    pub fn with_authenticated_user(mut self, user: impl Into<String>) -> Self {
        self.authenticated_user = Some(user.into());
        self
    }

    pub fn with_execution_type(mut self, execution_type: impl Into<String>) -> Self {
        self.execution_type = Some(execution_type.into());
        self
    }

    pub fn with_execution_id(mut self, execution_id: impl Into<String>) -> Self {
        self.execution_id = Some(execution_id.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Set parameters from generic mappings (e.g. deserialized config).
    ///
    /// Fails on the first malformed mapping without touching `self`'s
    /// parameters.
    pub fn with_parameter_maps(self, source: &[Map<String, Value>]) -> Result<Self, SelectorError> {
        let parameters = Parameter::to_parameters(source)?;
        Ok(self.with_parameters(parameters))
    }
}
