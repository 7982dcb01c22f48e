//! Directory user profiles.

use serde::{Deserialize, Serialize};

/// Avatar shown for users who never uploaded one.
pub const DEFAULT_AVATAR_URL: &str =
    "https://discordapp.com/assets/dd4dbc0016779df1378e7812eabaa04d.png";

/// A user profile as returned by `GET /users/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    /// Snowflake id
    pub id: String,
    /// Username without discriminator
    pub username: String,
    /// Legacy four digit discriminator
    pub discriminator: String,
    /// Avatar hash, absent for default avatars
    pub avatar: Option<String>,
    /// Default avatar hash
    pub def_avatar: Option<String>,
    /// Profile bio
    pub bio: Option<String>,
    /// Profile banner url
    pub banner: Option<String>,
    /// Linked social accounts
    pub social: Social,
    /// Profile accent colour as hex
    pub color: Option<String>,
    /// Directory supporter
    pub supporter: bool,
    /// Certified developer
    pub certified_dev: bool,
    /// Directory moderator
    #[serde(rename = "mod")]
    pub moderator: bool,
    /// Website moderator
    pub web_mod: bool,
    /// Directory admin
    pub admin: bool,
}

impl User {
    /// CDN url of the user's avatar, or the default avatar asset.
    ///
    /// ```
    /// use dblapi_core::{User, DEFAULT_AVATAR_URL};
    ///
    /// let mut user = User { id: "42".into(), ..Default::default() };
    /// assert_eq!(user.avatar_url(), DEFAULT_AVATAR_URL);
    ///
    /// user.avatar = Some("abc".into());
    /// assert_eq!(user.avatar_url(), "https://cdn.discordapp.com/avatars/42/abc.png");
    /// ```
    pub fn avatar_url(&self) -> String {
        match self.avatar.as_deref() {
            Some(hash) if !hash.is_empty() => {
                format!("https://cdn.discordapp.com/avatars/{}/{}.png", self.id, hash)
            }
            _ => DEFAULT_AVATAR_URL.to_string(),
        }
    }
}

/// Social accounts linked to a directory profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Social {
    /// YouTube channel id
    pub youtube: Option<String>,
    /// Reddit username
    pub reddit: Option<String>,
    /// Twitter username
    pub twitter: Option<String>,
    /// Instagram username
    pub instagram: Option<String>,
    /// GitHub username
    pub github: Option<String>,
}
