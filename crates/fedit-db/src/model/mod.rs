pub mod account;
pub mod custom_emoji;
pub mod media_attachment;
pub mod mention;
pub mod poll;
pub mod preview_card;
pub mod status;
pub mod status_edit;
pub mod tag;
