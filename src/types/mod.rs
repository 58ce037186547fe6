mod address;
mod attachment;
mod builder;
mod source;

pub mod graph;

use std::collections::HashMap;

pub use address::Address;
pub use attachment::Attachment;
pub use builder::MessageBuilder;
pub use source::{BodyPart, Normalize, SourceMessage};

pub type Headers = HashMap<String, String>;
