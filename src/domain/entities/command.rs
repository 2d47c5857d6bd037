use super::Language;

/// A parsed slash command: lower-cased name plus its argument tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            args,
        }
    }

    /// Arguments joined with single spaces
    pub fn joined_args(&self) -> String {
        self.args.join(" ")
    }
}

/// The handler a command name resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Ping,
    Help,
    Weather,
    News,
    Dice,
    Gourmet,
    Image,
    Rank,
    Translate(Language),
    Video,
    VTuber,
}

/// Registry entry describing one command and its aliases
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: Option<String>,
    pub kind: CommandKind,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>, kind: CommandKind) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: None,
            kind,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn matches(&self, input: &str) -> bool {
        let input_lower = input.to_lowercase();
        self.name.to_lowercase() == input_lower
            || self.aliases.iter().any(|a| a.to_lowercase() == input_lower)
    }
}

/// Ordered name → handler table, built once at startup
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: CommandSpec) {
        self.commands.push(command);
    }

    pub fn find(&self, input: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.matches(input))
    }

    pub fn all(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_name_is_lowercased() {
        let cmd = Command::new("DiCe", vec!["20".to_string()]);
        assert_eq!(cmd.name, "dice");
        assert_eq!(cmd.joined_args(), "20");
    }

    #[test]
    fn test_registry_resolves_aliases() {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandSpec::new("gourmet", CommandKind::Gourmet).with_aliases(&["gurume", "grm"]),
        );
        registry.register(CommandSpec::new("rank", CommandKind::Rank));

        assert_eq!(registry.find("GRM").map(|c| c.kind), Some(CommandKind::Gourmet));
        assert_eq!(registry.find("gurume").map(|c| c.kind), Some(CommandKind::Gourmet));
        assert_eq!(registry.find("rank").map(|c| c.kind), Some(CommandKind::Rank));
        assert!(registry.find("unknown").is_none());
        assert_eq!(registry.len(), 2);
    }
}
