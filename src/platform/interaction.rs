use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::errors::ArgumentError;

const CDN_BASE: &str = "https://cdn.discordapp.com";

/// The kinds of interaction Discord delivers to the webhook.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InteractionKind {
    Ping,
    ApplicationCommand,
    MessageComponent,
    Autocomplete,
    ModalSubmit,
}

impl InteractionKind {
    fn from_code(code: u8) -> Option<Self> {
        use InteractionKind::*;

        match code {
            1 => Some(Ping),
            2 => Some(ApplicationCommand),
            3 => Some(MessageComponent),
            4 => Some(Autocomplete),
            5 => Some(ModalSubmit),
            _ => None,
        }
    }
}

/// A single interaction as delivered by Discord.
#[derive(Clone, Debug, Deserialize)]
pub struct Interaction {
    pub id: String,

    #[serde(rename = "type")]
    pub kind_code: u8,

    #[serde(default)]
    pub data: Option<InteractionData>,

    /// Present when the interaction happened in a guild.
    #[serde(default)]
    pub member: Option<Member>,

    /// Present when the interaction happened in a direct message.
    #[serde(default)]
    pub user: Option<User>,
}

impl Interaction {
    pub fn kind(&self) -> Option<InteractionKind> {
        InteractionKind::from_code(self.kind_code)
    }

    /// The user who triggered the interaction.
    pub fn invoker(&self) -> Option<&User> {
        self.member
            .as_ref()
            .map(|m| &m.user)
            .or_else(|| self.user.as_ref())
    }

    /// The name to show for the invoking user: guild nickname, then
    /// global display name, then username.
    pub fn invoker_display_name(&self) -> Option<&str> {
        let nick = self.member.as_ref().and_then(|m| m.nick.as_deref());

        nick.or_else(|| self.invoker().map(User::display_name))
    }

    pub fn command_name(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.name.as_deref())
    }

    pub fn custom_id(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.custom_id.as_deref())
    }

    fn option(&self, name: &str) -> Option<&Value> {
        self.data
            .as_ref()?
            .options
            .iter()
            .find(|o| o.name == name)
            .map(|o| &o.value)
    }

    pub fn string_option(&self, name: &'static str) -> Result<Option<&str>, ArgumentError> {
        match self.option(name) {
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(ArgumentError::WrongOptionType { name }),
            None => Ok(None),
        }
    }

    pub fn required_string_option(&self, name: &'static str) -> Result<&str, ArgumentError> {
        self.string_option(name)?
            .ok_or(ArgumentError::MissingOption(name))
    }

    pub fn required_integer_option(&self, name: &'static str) -> Result<i64, ArgumentError> {
        match self.option(name) {
            Some(value) => value
                .as_i64()
                .ok_or(ArgumentError::WrongOptionType { name }),
            None => Err(ArgumentError::MissingOption(name)),
        }
    }

    /// Looks up the attachment passed for an attachment option.
    pub fn attachment_option(&self, name: &'static str) -> Result<Option<&Attachment>, ArgumentError> {
        let id = match self.string_option(name)? {
            Some(id) => id,
            None => return Ok(None),
        };

        self.data
            .as_ref()
            .and_then(|d| d.resolved.as_ref())
            .and_then(|r| r.attachments.get(id))
            .map(Some)
            .ok_or(ArgumentError::MissingOption(name))
    }

    /// Looks up the user passed for a user option.
    pub fn required_user_option(&self, name: &'static str) -> Result<&User, ArgumentError> {
        let id = self.required_string_option(name)?;

        self.data
            .as_ref()
            .and_then(|d| d.resolved.as_ref())
            .and_then(|r| r.users.get(id))
            .ok_or(ArgumentError::MissingOption(name))
    }

    /// The value typed into the modal text input with this custom ID.
    pub fn text_input(&self, custom_id: &str) -> Option<&str> {
        self.data
            .as_ref()?
            .components
            .iter()
            .flat_map(|row| row.components.iter())
            .find(|input| input.custom_id == custom_id)
            .and_then(|input| input.value.as_deref())
    }
}

/// The payload of a command or modal submit interaction.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct InteractionData {
    /// The command name, for application commands.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub options: Vec<CommandOption>,

    #[serde(default)]
    pub resolved: Option<Resolved>,

    /// The modal's custom ID, for modal submits.
    #[serde(default)]
    pub custom_id: Option<String>,

    #[serde(default)]
    pub components: Vec<ComponentRow>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CommandOption {
    pub name: String,

    #[serde(default)]
    pub value: Value,
}

/// Objects referenced by ID from command options.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Resolved {
    #[serde(default)]
    pub users: HashMap<String, User>,

    #[serde(default)]
    pub attachments: HashMap<String, Attachment>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ComponentRow {
    #[serde(default)]
    pub components: Vec<TextInputValue>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TextInputValue {
    pub custom_id: String,

    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Member {
    pub user: User,

    #[serde(default)]
    pub nick: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct User {
    pub id: String,

    pub username: String,

    #[serde(default)]
    pub global_name: Option<String>,

    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }

    /// The user ID as a number. Discord sends snowflakes as strings.
    pub fn numeric_id(&self) -> Result<u64, ArgumentError> {
        self.id.parse().map_err(|_| ArgumentError::WrongOptionType { name: "user" })
    }

    /// The URL of the user's avatar, or of the default avatar Discord
    /// assigns when none is set.
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(hash) => format!("{}/avatars/{}/{}.png", CDN_BASE, self.id, hash),
            None => {
                let index = self.id.parse::<u64>().map(|id| (id >> 22) % 6).unwrap_or(0);
                format!("{}/embed/avatars/{}.png", CDN_BASE, index)
            }
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Attachment {
    pub filename: String,

    #[serde(default)]
    pub content_type: Option<String>,

    pub url: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Interaction, InteractionKind};
    use crate::errors::ArgumentError;

    fn command() -> Interaction {
        serde_json::from_value(json!({
            "id": "1",
            "type": 2,
            "token": "t",
            "member": {
                "nick": "Chef",
                "user": { "id": "80351110224678912", "username": "alex", "global_name": "Alex", "avatar": null }
            },
            "data": {
                "name": "recipe",
                "options": [
                    { "name": "category", "type": 3, "value": "fish" },
                    { "name": "image", "type": 11, "value": "99" },
                    { "name": "id", "type": 4, "value": 12 }
                ],
                "resolved": {
                    "attachments": {
                        "99": { "id": "99", "filename": "a.png", "content_type": "image/png", "size": 3, "url": "https://cdn.discordapp.com/a.png" }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn command_options_are_read() {
        let interaction = command();

        assert_eq!(interaction.kind(), Some(InteractionKind::ApplicationCommand));
        assert_eq!(interaction.command_name(), Some("recipe"));
        assert_eq!(interaction.required_string_option("category").unwrap(), "fish");
        assert_eq!(interaction.required_integer_option("id").unwrap(), 12);
        assert_eq!(
            interaction.attachment_option("image").unwrap().unwrap().filename,
            "a.png"
        );
        assert!(matches!(
            interaction.required_string_option("missing"),
            Err(ArgumentError::MissingOption("missing"))
        ));
        assert!(matches!(
            interaction.required_string_option("id"),
            Err(ArgumentError::WrongOptionType { .. })
        ));
    }

    #[test]
    fn nickname_wins() {
        let interaction = command();

        assert_eq!(interaction.invoker_display_name(), Some("Chef"));
        assert_eq!(interaction.invoker().unwrap().display_name(), "Alex");
    }

    #[test]
    fn default_avatar_is_derived_from_id() {
        let user = command().invoker().cloned().unwrap();

        // (80351110224678912 >> 22) % 6 == 5
        assert_eq!(user.avatar_url(), "https://cdn.discordapp.com/embed/avatars/5.png");
    }

    #[test]
    fn modal_values_are_read() {
        let interaction: Interaction = serde_json::from_value(json!({
            "id": "2",
            "type": 5,
            "user": { "id": "5", "username": "sam", "avatar": "abc" },
            "data": {
                "custom_id": "recipe:fish:-",
                "components": [
                    { "type": 1, "components": [{ "type": 4, "custom_id": "title", "value": "Tacos" }] },
                    { "type": 1, "components": [{ "type": 4, "custom_id": "notes", "value": "" }] }
                ]
            }
        }))
        .unwrap();

        assert_eq!(interaction.kind(), Some(InteractionKind::ModalSubmit));
        assert_eq!(interaction.custom_id(), Some("recipe:fish:-"));
        assert_eq!(interaction.text_input("title"), Some("Tacos"));
        assert_eq!(interaction.text_input("notes"), Some(""));
        assert_eq!(interaction.text_input("tags"), None);
        assert_eq!(
            interaction.invoker().unwrap().avatar_url(),
            "https://cdn.discordapp.com/avatars/5/abc.png"
        );
    }
}
