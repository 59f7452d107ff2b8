//! Instance-or-default parameter resolution.

use crate::defaults::DefaultParameters;
use crate::error::{AppError, Result};
use crate::models::{ParameterName, ParameterValue};
use serde::Serialize;
use std::collections::BTreeMap;

/// Read-only view of the parameters configured on an instance.
///
/// Returns `None` when the instance leaves the parameter unset; the
/// resolver then falls back to the default table.
pub trait ParameterSource: Send + Sync {
    fn parameter(&self, name: ParameterName) -> Option<ParameterValue>;
}

/// Resolves parameters against an optional instance, falling back to the
/// default table.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    defaults: &'a DefaultParameters,
}

impl<'a> Resolver<'a> {
    pub fn new(defaults: &'a DefaultParameters) -> Self {
        Self { defaults }
    }

    /// Resolve `attribute_name` for `instance`.
    ///
    /// A missing instance or an unset attribute is not an error: the default
    /// is returned and a warning naming `instance_label` is logged. Only an
    /// attribute that is not a known parameter fails, with
    /// [`AppError::AttributeNotConfigured`].
    pub fn resolve(
        &self,
        attribute_name: &str,
        instance: Option<&dyn ParameterSource>,
        instance_label: &str,
    ) -> Result<ParameterValue> {
        let name: ParameterName = attribute_name
            .parse()
            .map_err(|_| AppError::AttributeNotConfigured(attribute_name.to_string()))?;

        Ok(self.resolve_param(name, instance, instance_label))
    }

    pub fn resolve_param(
        &self,
        name: ParameterName,
        instance: Option<&dyn ParameterSource>,
        instance_label: &str,
    ) -> ParameterValue {
        if let Some(value) = instance.and_then(|source| source.parameter(name)) {
            return value;
        }

        let value = self.defaults.value(name);
        tracing::warn!(
            instance = instance_label,
            value = %value,
            param = %name,
            "instance {} not found in db, we use the default value ({}) for the param {}",
            instance_label,
            value,
            name
        );
        value
    }

    /// Resolve every known parameter for one instance.
    pub fn resolve_all(
        &self,
        instance: Option<&dyn ParameterSource>,
        instance_label: &str,
    ) -> ResolvedParameters {
        let values = ParameterName::ALL
            .into_iter()
            .map(|name| (name, self.resolve_param(name, instance, instance_label)))
            .collect();

        ResolvedParameters {
            instance: instance_label.to_string(),
            values,
        }
    }
}

/// Effective parameters of one instance, after fallback to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameters {
    pub instance: String,
    values: BTreeMap<ParameterName, ParameterValue>,
}

impl ResolvedParameters {
    pub fn get(&self, name: ParameterName) -> ParameterValue {
        // resolve_all fills every name
        self.values[&name]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterName, ParameterValue)> + '_ {
        self.values.iter().map(|(name, value)| (*name, *value))
    }
}

impl Serialize for ResolvedParameters {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr<'r> {
            instance: &'r str,
            parameters: BTreeMap<&'static str, ParameterValue>,
        }

        Repr {
            instance: &self.instance,
            parameters: self.iter().map(|(name, value)| (name.as_str(), value)).collect(),
        }
        .serialize(serializer)
    }
}
