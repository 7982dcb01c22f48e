//! Widget colour options.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Colour overrides for a listing widget. Colours are hex without `#`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(default, setter(into, strip_option))]
#[serde(default)]
pub struct WidgetOptions {
    /// Top colour
    topcolor: Option<String>,
    /// Middle colour
    middlecolor: Option<String>,
    /// Username colour
    usernamecolor: Option<String>,
    /// Certified badge colour
    certifiedcolor: Option<String>,
    /// Data colour
    datacolor: Option<String>,
    /// Label colour
    labelcolor: Option<String>,
    /// Highlight colour
    highlightcolor: Option<String>,
}

impl WidgetOptions {
    /// Creates a new options builder.
    pub fn builder() -> WidgetOptionsBuilder {
        WidgetOptionsBuilder::default()
    }

    /// Supplied, non-empty colours as query pairs in a fixed order.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("topcolor", &self.topcolor),
            ("middlecolor", &self.middlecolor),
            ("usernamecolor", &self.usernamecolor),
            ("certifiedcolor", &self.certifiedcolor),
            ("datacolor", &self.datacolor),
            ("labelcolor", &self.labelcolor),
            ("highlightcolor", &self.highlightcolor),
        ]
        .into_iter()
        .filter_map(|(key, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some((key, v)),
            _ => None,
        })
        .collect()
    }
}
