use serde::Serialize;

/// One violated field rule, shaped the way clients receive it in a 400 body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub member_names: Vec<String>,
    pub error_message: String,
}

impl ValidationError {
    pub fn field(member: &str, message: impl Into<String>) -> Self {
        Self {
            member_names: vec![member.to_string()],
            error_message: message.into(),
        }
    }

    /// An error not tied to a single field, e.g. an unreadable body.
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            member_names: Vec::new(),
            error_message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.member_names.is_empty() {
            write!(f, "{}", self.error_message)
        } else {
            write!(f, "{}: {}", self.member_names.join(", "), self.error_message)
        }
    }
}
