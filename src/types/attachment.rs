/// A file attached to a composed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    file_name: Option<String>,
    content_type: Option<String>,
    content: Vec<u8>,
}

impl Attachment {
    pub fn new<C: Into<Vec<u8>>>(
        file_name: Option<String>,
        content_type: Option<String>,
        content: C,
    ) -> Self {
        Self {
            file_name,
            content_type,
            content: content.into(),
        }
    }

    /// The file name, `None` when the part had none or an empty one.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref().filter(|name| !name.is_empty())
    }

    /// The MIME type, `None` when the part had none or an empty one.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type
            .as_deref()
            .filter(|content_type| !content_type.is_empty())
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}
