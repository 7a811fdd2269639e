//! Scripted buttons.
//!
//! A button carrying a script is an action, not a selector. How its script
//! runs is decided by the session's [`ScriptTrust`]:
//!
//! - `Restricted` interprets the script as a list of declared selection
//!   commands ([`ScriptCommand`]). Nothing else is reachable.
//! - `FullTrust` hands the text to a host-supplied [`ScriptRunner`]. That
//!   runner executes user-authored code with the host's full privileges and
//!   there is no sandbox.
//! - `Disabled` refuses to run anything.

use crate::host::SelectionProvider;
use thiserror::Error;

/// Script activation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Script execution is disabled")]
    Disabled,
    #[error("Line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },
    #[error("Line {line}: '{command}' needs at least one entity name")]
    MissingArgument { line: usize, command: String },
    #[error("Line {line}: entity '{name}' does not exist")]
    UnknownEntity { line: usize, name: String },
}

/// Executes button scripts against the host.
pub trait ScriptRunner {
    fn run(&mut self, script: &str, host: &mut dyn SelectionProvider) -> Result<(), ScriptError>;
}

/// Trust level for scripted buttons.
#[derive(Default)]
pub enum ScriptTrust {
    Disabled,
    #[default]
    Restricted,
    /// Full host privileges, no sandboxing.
    FullTrust(Box<dyn ScriptRunner>),
}

impl std::fmt::Debug for ScriptTrust {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Restricted => f.write_str("Restricted"),
            Self::FullTrust(_) => f.write_str("FullTrust(..)"),
        }
    }
}

impl ScriptTrust {
    /// Run `script` under this trust level.
    pub fn run(
        &mut self,
        script: &str,
        host: &mut dyn SelectionProvider,
    ) -> Result<(), ScriptError> {
        match self {
            Self::Disabled => Err(ScriptError::Disabled),
            Self::Restricted => CommandRunner.run(script, host),
            Self::FullTrust(runner) => runner.run(script, host),
        }
    }
}

/// One declared command of the restricted script language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Replace the host selection.
    Select(Vec<String>),
    /// Add to the host selection.
    Add(Vec<String>),
    /// Remove from the host selection.
    Deselect(Vec<String>),
    /// Empty the host selection.
    Clear,
}

impl ScriptCommand {
    fn names(&self) -> &[String] {
        match self {
            Self::Select(names) | Self::Add(names) | Self::Deselect(names) => names,
            Self::Clear => &[],
        }
    }
}

/// Parse a restricted script: one command per line, `#` starts a comment.
pub fn parse_script(script: &str) -> Result<Vec<(usize, ScriptCommand)>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, raw) in script.lines().enumerate() {
        let line = idx + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        let mut words = text.split_whitespace();
        let Some(head) = words.next() else {
            continue;
        };
        let args: Vec<String> = words.map(str::to_string).collect();

        let needs_args = |command: fn(Vec<String>) -> ScriptCommand| {
            if args.is_empty() {
                Err(ScriptError::MissingArgument {
                    line,
                    command: head.to_string(),
                })
            } else {
                Ok(command(args.clone()))
            }
        };
        let command = match head {
            "select" => needs_args(ScriptCommand::Select)?,
            "add" => needs_args(ScriptCommand::Add)?,
            "deselect" => needs_args(ScriptCommand::Deselect)?,
            "clear" => ScriptCommand::Clear,
            other => {
                return Err(ScriptError::UnknownCommand {
                    line,
                    command: other.to_string(),
                });
            }
        };
        commands.push((line, command));
    }
    Ok(commands)
}

/// Interpreter for the restricted command set.
///
/// The script is parsed and every entity name validated before the host is
/// touched; the resulting selection is then applied in a single call.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRunner;

impl ScriptRunner for CommandRunner {
    fn run(&mut self, script: &str, host: &mut dyn SelectionProvider) -> Result<(), ScriptError> {
        let commands = parse_script(script)?;
        for (line, command) in &commands {
            if let Some(name) = command.names().iter().find(|n| !host.entity_exists(n)) {
                return Err(ScriptError::UnknownEntity {
                    line: *line,
                    name: name.clone(),
                });
            }
        }

        let mut selection = host.selection();
        for (_, command) in commands {
            match command {
                ScriptCommand::Select(names) => selection = names,
                ScriptCommand::Add(names) => {
                    for name in names {
                        if !selection.contains(&name) {
                            selection.push(name);
                        }
                    }
                }
                ScriptCommand::Deselect(names) => selection.retain(|s| !names.contains(s)),
                ScriptCommand::Clear => selection.clear(),
            }
        }
        host.set_selection(&selection);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn host() -> MemoryHost {
        MemoryHost::with_entities([("a", 0.0), ("b", 0.0), ("c", 0.0)])
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let commands = parse_script("# header\n\nselect a b  # both\nclear\n").unwrap();
        assert_eq!(
            commands,
            vec![
                (3, ScriptCommand::Select(vec!["a".to_string(), "b".to_string()])),
                (4, ScriptCommand::Clear),
            ]
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = parse_script("select a\nimport os").unwrap_err();
        assert_eq!(
            err,
            ScriptError::UnknownCommand {
                line: 2,
                command: "import".to_string()
            }
        );
    }

    #[test]
    fn test_parse_missing_argument() {
        let err = parse_script("add").unwrap_err();
        assert!(matches!(err, ScriptError::MissingArgument { line: 1, .. }));
    }

    #[test]
    fn test_runner_applies_commands() {
        let mut host = host();
        CommandRunner.run("select a b\nadd c\ndeselect a", &mut host).unwrap();
        assert_eq!(host.selection(), vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_unknown_entity_leaves_host_untouched() {
        let mut host = host();
        host.set_selection(&["a".to_string()]);
        let err = CommandRunner.run("clear\nselect ghost", &mut host).unwrap_err();
        assert!(matches!(err, ScriptError::UnknownEntity { line: 2, .. }));
        assert_eq!(host.selection(), vec!["a".to_string()]);
    }

    #[test]
    fn test_disabled_trust() {
        let mut host = host();
        let mut trust = ScriptTrust::Disabled;
        assert_eq!(trust.run("select a", &mut host), Err(ScriptError::Disabled));
        assert!(host.selection().is_empty());
    }

    #[test]
    fn test_full_trust_delegates() {
        struct Echo;
        impl ScriptRunner for Echo {
            fn run(
                &mut self,
                script: &str,
                host: &mut dyn SelectionProvider,
            ) -> Result<(), ScriptError> {
                host.set_selection(&[script.trim().to_string()]);
                Ok(())
            }
        }

        let mut host = host();
        let mut trust = ScriptTrust::FullTrust(Box::new(Echo));
        trust.run(" c ", &mut host).unwrap();
        assert_eq!(host.selection(), vec!["c".to_string()]);
    }
}
