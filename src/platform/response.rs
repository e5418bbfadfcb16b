use serde::Serialize;

use crate::embed::Embed;

const PONG: u8 = 1;
const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;
const MODAL: u8 = 9;

const EPHEMERAL: u64 = 1 << 6;

const ACTION_ROW: u8 = 1;
const TEXT_INPUT: u8 = 4;

/// The body returned to Discord for an interaction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Message(MessageData),
    Modal(Modal),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MessageData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: PONG,
            data: None,
        }
    }

    pub fn message(content: impl Into<String>) -> Self {
        Self::with_message(MessageData {
            content: Some(content.into()),
            ..MessageData::default()
        })
    }

    /// A message only the invoking user can see.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self::with_message(MessageData {
            content: Some(content.into()),
            flags: Some(EPHEMERAL),
            ..MessageData::default()
        })
    }

    pub fn embed(embed: Embed) -> Self {
        Self::with_message(MessageData {
            embeds: vec![embed],
            ..MessageData::default()
        })
    }

    pub fn modal(modal: Modal) -> Self {
        Self {
            kind: MODAL,
            data: Some(ResponseData::Modal(modal)),
        }
    }

    fn with_message(data: MessageData) -> Self {
        Self {
            kind: CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(ResponseData::Message(data)),
        }
    }

    /// The text content, if this is a message response.
    pub fn content(&self) -> Option<&str> {
        match &self.data {
            Some(ResponseData::Message(m)) => m.content.as_deref(),
            _ => None,
        }
    }

    /// The embeds, if this is a message response.
    pub fn embeds(&self) -> &[Embed] {
        match &self.data {
            Some(ResponseData::Message(m)) => &m.embeds,
            _ => &[],
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        matches!(&self.data, Some(ResponseData::Message(m)) if m.flags == Some(EPHEMERAL))
    }
}

/// A pop-up form.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Modal {
    pub custom_id: String,
    pub title: String,
    pub components: Vec<ModalRow>,
}

impl Modal {
    pub fn new(custom_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            title: title.into(),
            components: vec![],
        }
    }

    /// Adds a text input on its own row.
    pub fn input(mut self, input: TextInput) -> Self {
        self.components.push(ModalRow {
            kind: ACTION_ROW,
            components: vec![input],
        });
        self
    }

    pub fn inputs(&self) -> impl Iterator<Item = &TextInput> {
        self.components.iter().flat_map(|row| row.components.iter())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModalRow {
    #[serde(rename = "type")]
    kind: u8,
    components: Vec<TextInput>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(into = "u8")]
pub enum TextInputStyle {
    Short,
    Paragraph,
}

impl From<TextInputStyle> for u8 {
    fn from(style: TextInputStyle) -> u8 {
        match style {
            TextInputStyle::Short => 1,
            TextInputStyle::Paragraph => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextInput {
    #[serde(rename = "type")]
    kind: u8,
    pub custom_id: String,
    pub label: String,
    pub style: TextInputStyle,
    pub required: bool,
    pub max_length: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl TextInput {
    pub fn new(
        custom_id: impl Into<String>,
        label: impl Into<String>,
        style: TextInputStyle,
        max_length: usize,
    ) -> Self {
        Self {
            kind: TEXT_INPUT,
            custom_id: custom_id.into(),
            label: label.into(),
            style,
            required: true,
            max_length,
            placeholder: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}
