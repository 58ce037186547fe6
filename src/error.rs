use std::{error, fmt, result};

use base64::DecodeError;
use mailparse::MailParseError;

#[derive(Debug)]
pub enum ErrorKind {
    /// Reading the source message failed, wraps the underlying cause.
    ConversionFailed(Box<Error>),
    /// Failed to parse mail message.
    ParseMessage(MailParseError),
    /// Failed to parse an address list header.
    ParseAddress,
    /// The source message is structurally broken.
    InvalidMessage,
    /// Failed to parse or validate the provided config.
    InvalidConfig,
    /// An attachment did not contain valid base64.
    DecodeBase64(DecodeError),
    /// Failed to serialize or deserialize JSON.
    SerializeJSON,
}

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    pub fn new<S: Into<String>>(kind: ErrorKind, msg: S) -> Self {
        Self {
            message: msg.into(),
            kind,
        }
    }

    /// Wrap an error raised while reading a source message.
    pub fn conversion_failed(cause: Error) -> Self {
        let message = cause.message.clone();

        Self::new(ErrorKind::ConversionFailed(Box::new(cause)), message)
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.kind() {
            ErrorKind::ConversionFailed(cause) => Some(cause.as_ref()),
            ErrorKind::ParseMessage(e) => Some(e),
            ErrorKind::DecodeBase64(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MailParseError> for Error {
    fn from(mailparse_error: MailParseError) -> Self {
        let message = format!("Failed to parse mail message: {}", mailparse_error);

        Error::new(ErrorKind::ParseMessage(mailparse_error), message)
    }
}

impl From<DecodeError> for Error {
    fn from(decode_error: DecodeError) -> Self {
        let message = format!("Failed to decode attachment content: {}", decode_error);

        Error::new(ErrorKind::DecodeBase64(decode_error), message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[macro_export]
macro_rules! failed {
    ($kind:expr, $($arg:tt)*) => {{
        use $crate::error::Error;

        let kind = $kind;
        let message = format!($($arg)*);
        return Err(Error::new( kind, message ));
    }};
}

pub type Result<T> = result::Result<T, Error>;
