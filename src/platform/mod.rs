//! The subset of the Discord interactions API the bots speak.

mod interaction;
mod response;
mod verify;

pub use interaction::{
    Attachment, CommandOption, ComponentRow, Interaction, InteractionData, InteractionKind,
    Member, Resolved, TextInputValue, User,
};
pub use response::{
    InteractionResponse, MessageData, Modal, ModalRow, ResponseData, TextInput, TextInputStyle,
};
pub use verify::{SignatureVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};
