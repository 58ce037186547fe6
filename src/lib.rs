//! Convert composed email messages into Microsoft Graph `sendMail` messages.
//!
//! ```
//! use graph_mail::{types::MessageBuilder, Config, MessageConverter};
//!
//! let message = MessageBuilder::new()
//!     .sender(("Jane", "jane@example.com"))
//!     .recipient("john@example.com")
//!     .subject("Hello")
//!     .text("Hi John!")
//!     .build();
//!
//! let converter = MessageConverter::new(Config::new("no-reply@example.com").unwrap());
//! let conversion = converter.convert(&message).unwrap();
//!
//! assert_eq!(conversion.from(), "jane@example.com");
//! ```

mod parse;

pub mod config;
pub mod convert;
pub mod diagnostics;
pub mod error;
pub mod types;

pub use config::Config;
pub use convert::{convert, Conversion, MessageConverter};
pub use diagnostics::{Diagnostics, LogDiagnostics};
pub use error::{Error, ErrorKind, Result};
