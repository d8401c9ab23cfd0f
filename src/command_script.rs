use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct CommandScriptFile {
    steps: Vec<CommandScriptStepDef>,
}

#[derive(Debug, Clone, Deserialize)]
struct CommandScriptStepDef {
    command: String,
}

/// Ordered list of session commands.
///
/// Scripts are JSON of the form `{"steps": [{"command": "..."}]}`, executed in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandScript {
    commands: Vec<String>,
}

impl CommandScript {
    /// Load a command script from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read command script {}", path.display()))?;
        Self::from_str(&contents)
            .with_context(|| format!("invalid command script {}", path.display()))
    }

    /// Load a command script from an in-memory JSON string.
    pub fn from_str(contents: &str) -> Result<Self> {
        let file: CommandScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("command script contains no steps");
        }

        let mut commands = Vec::with_capacity(file.steps.len());
        for step in file.steps {
            let command = step.command.trim().to_string();
            if command.is_empty() {
                anyhow::bail!("command script contains an empty command");
            }
            commands.push(command);
        }

        Ok(Self { commands })
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_script_rejects_empty_commands() {
        let json = r#"{"steps": [{"command": "/give dirt"}, {"command": "   "}]}"#;
        let err = CommandScript::from_str(json).unwrap_err();
        assert!(
            err.to_string().contains("empty command"),
            "unexpected error: {err:#}"
        );
        assert!(CommandScript::from_str(r#"{"steps": []}"#).is_err());
    }

    #[test]
    fn command_script_keeps_file_order() {
        let json = r#"{
            "steps": [
                {"command": " /give wood_log 4 "},
                {"command": "/fill wood_planks max"},
                {"command": "/slot shift 45"}
            ]
        }"#;
        let script = CommandScript::from_str(json).expect("script should parse");
        assert_eq!(
            script.commands(),
            &[
                "/give wood_log 4".to_string(),
                "/fill wood_planks max".to_string(),
                "/slot shift 45".to_string(),
            ]
        );
    }
}
