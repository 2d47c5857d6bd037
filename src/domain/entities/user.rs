use std::fmt;

/// Represents a chat participant
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: String,
    pub name: String,
    pub is_bot: bool,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_bot: false,
        }
    }

    pub fn bot(mut self) -> Self {
        self.is_bot = true;
        self
    }

    /// Both textual forms a mention of this user can take in message text
    pub fn mention_tokens(&self) -> [String; 2] {
        [format!("<@{}>", self.id), format!("<@!{}>", self.id)]
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mention_tokens() {
        let user = User::new("42", "kizuna");
        assert_eq!(user.mention_tokens(), ["<@42>".to_string(), "<@!42>".to_string()]);
        assert_eq!(user.to_string(), "kizuna");
    }
}
