//! Chat embed payloads sent through an outgoing webhook.

use serde::{Deserialize, Serialize};

/// A rich embed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    /// Author line
    pub author: EmbedAuthor,
    /// Title
    pub title: String,
    /// Sidebar colour as `0xRRGGBB`
    pub color: u32,
    /// Thumbnail image
    pub thumbnail: EmbedThumbnail,
    /// Name/value fields
    pub fields: Vec<EmbedField>,
}

/// Author line of an embed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedAuthor {
    /// Display name
    pub name: String,
    /// Icon url
    pub icon_url: String,
}

/// Thumbnail of an embed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedThumbnail {
    /// Image url, empty for none
    pub url: String,
}

/// One name/value field of an embed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    /// Field name
    pub name: String,
    /// Field value
    pub value: String,
}

/// A field template; `{user}` and `{id}` are replaced per vote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTemplate {
    /// Name template
    pub name: String,
    /// Value template
    pub value: String,
}

impl FieldTemplate {
    /// Create a template.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Substitute every `{user}` and `{id}` placeholder.
    ///
    /// ```
    /// use dblapi_core::{EmbedField, FieldTemplate};
    ///
    /// let field = FieldTemplate::new("{user}", "voted for {id}!").render("Ann", "42");
    /// assert_eq!(field, EmbedField { name: "Ann".into(), value: "voted for 42!".into() });
    /// ```
    pub fn render(&self, username: &str, id: &str) -> EmbedField {
        let fill = |template: &str| template.replace("{user}", username).replace("{id}", id);
        EmbedField {
            name: fill(&self.name),
            value: fill(&self.value),
        }
    }
}
