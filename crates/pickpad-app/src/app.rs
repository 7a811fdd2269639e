//! Command-line host: inspects and generates layout files.

use crate::text_surface::TextSurface;
use clap::{Parser, Subcommand};
use kurbo::Point;
use pickpad_core::{
    EditorConfig, EditorError, EditorSession, MemoryHost, SelectionProvider, ShortcutRegistry,
    SidePolicy,
};
use pickpad_render::{RenderContext, render};
use std::path::PathBuf;

/// Headless host for pickpad layouts.
#[derive(Parser, Debug)]
#[command(name = "pickpad", about = "Inspect and generate pickpad layouts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load a layout and print its frame.
    Inspect { file: PathBuf },
    /// Write a sample layout.
    Demo { file: PathBuf },
    /// Print the keyboard shortcuts.
    Shortcuts,
    /// Print the effective configuration.
    Config,
}

/// Application state.
pub struct App {
    config: EditorConfig,
}

impl App {
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    /// Run a command and return what it prints.
    pub fn run(&self, command: Command) -> Result<String, EditorError> {
        match command {
            Command::Inspect { file } => self.inspect(file),
            Command::Demo { file } => self.demo(file),
            Command::Shortcuts => Ok(ShortcutRegistry::describe()),
            Command::Config => Ok(self.config.to_json()?),
        }
    }

    fn inspect(&self, path: PathBuf) -> Result<String, EditorError> {
        let mut session = EditorSession::new(self.config.clone(), Box::new(MemoryHost::new()));
        if !session.load(&path)? {
            log::warn!(
                "{} does not have the .{} extension",
                path.display(),
                self.config.layout_extension
            );
            return Ok(String::new());
        }
        let mut surface = TextSurface::new();
        render(&RenderContext::new(session.canvas()), &mut surface);
        session.close();
        Ok(surface.into_string())
    }

    fn demo(&self, path: PathBuf) -> Result<String, EditorError> {
        let mut host = MemoryHost::with_entities([
            ("head_ctrl", 0.0),
            ("arm_L", 4.0),
            ("arm_R", -4.0),
            ("leg_L", 2.0),
            ("leg_R", -2.0),
        ]);
        let mut session = EditorSession::new(self.config.clone(), Box::new(host.clone()))
            .with_color_policy(SidePolicy::default());
        session.toggle_mode();

        let center = self.config.canvas_size.width / 2.0;
        let picks: [(&[&str], Point); 3] = [
            (&["head_ctrl"], Point::new(center, 40.0)),
            (&["arm_L", "arm_R"], Point::new(center, 100.0)),
            (&["leg_L", "leg_R"], Point::new(center, 200.0)),
        ];
        for (entities, at) in picks {
            let names: Vec<String> = entities.iter().map(|s| s.to_string()).collect();
            host.set_selection(&names);
            session.press(at);
            session.release(at);
        }

        let saved = session.save(&path)?;
        session.close();
        if saved {
            Ok(format!("wrote {} buttons to {}", session.canvas().len(), path.display()))
        } else {
            Ok(format!(
                "not written: {} needs the .{} extension",
                path.display(),
                self.config.layout_extension
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["pickpad", "inspect", "a.pickpad"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Inspect {
                file: PathBuf::from("a.pickpad")
            }
        );
        let cli = Cli::try_parse_from(["pickpad", "shortcuts"]).unwrap();
        assert_eq!(cli.command, Command::Shortcuts);
    }

    #[test]
    fn test_parse_rejects_bad_invocations() {
        assert!(Cli::try_parse_from(["pickpad", "demo"]).is_err());
        assert!(Cli::try_parse_from(["pickpad", "frobnicate"]).is_err());
        assert!(Cli::try_parse_from(["pickpad"]).is_err());
    }

    #[test]
    fn test_demo_then_inspect() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("demo.pickpad");
        let app = App::new(EditorConfig::default());

        let message = app.run(Command::Demo { file: path.clone() }).unwrap();
        assert!(message.starts_with("wrote 7 buttons"));

        let dump = app.run(Command::Inspect { file: path }).unwrap();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].starts_with("rect [0 0 400 400]"));
        assert!(lines[1].starts_with("ellipse (200, 40)"));
    }

    #[test]
    fn test_demo_wrong_extension() {
        let dir = tempdir().unwrap();
        let app = App::new(EditorConfig::default());
        let message = app
            .run(Command::Demo {
                file: dir.path().join("demo.json"),
            })
            .unwrap();
        assert!(message.starts_with("not written"));
    }

    #[test]
    fn test_inspect_missing_file() {
        let dir = tempdir().unwrap();
        let app = App::new(EditorConfig::default());
        let result = app.run(Command::Inspect {
            file: dir.path().join("none.pickpad"),
        });
        assert!(result.is_err());
    }
}
