//! GitHub Actions runner adapter.
//!
//! Workflow commands go to stdout; environment, output and state values are
//! appended to the files the runner names in `GITHUB_ENV`, `GITHUB_OUTPUT`
//! and `GITHUB_STATE`. Runners too old to provide those files get the
//! equivalent stdout commands instead.

use credex_core::{Error, PipelineHost, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const STATE_PREFIX: &str = "STATE_";

/// File commands understood by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileCommand {
    Env,
    Output,
    State,
}

impl FileCommand {
    fn command_name(self) -> &'static str {
        match self {
            FileCommand::Env => "set-env",
            FileCommand::Output => "set-output",
            FileCommand::State => "save-state",
        }
    }
}

/// [`PipelineHost`] backed by the GitHub Actions runner protocol.
pub struct GitHubActionsHost<W: Write = io::Stdout> {
    out: RefCell<W>,
    env_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    state_file: Option<PathBuf>,
    state: HashMap<String, String>,
}

impl GitHubActionsHost<io::Stdout> {
    /// Build from the runner-provided environment.
    pub fn from_env() -> Self {
        let file = |name: &str| {
            std::env::var_os(name)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        let state = saved_state(std::env::vars());

        Self::new(
            io::stdout(),
            file("GITHUB_ENV"),
            file("GITHUB_OUTPUT"),
            file("GITHUB_STATE"),
            state,
        )
    }
}

impl<W: Write> GitHubActionsHost<W> {
    pub fn new(
        out: W,
        env_file: Option<PathBuf>,
        output_file: Option<PathBuf>,
        state_file: Option<PathBuf>,
        state: HashMap<String, String>,
    ) -> Self {
        Self {
            out: RefCell::new(out),
            env_file,
            output_file,
            state_file,
            state,
        }
    }

    /// Report the step as failed.
    pub fn set_failed(&self, message: &str) {
        self.command("error", None, message);
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn line(&self, text: &str) {
        // Nothing sensible can be done when stdout itself is gone.
        let _ = writeln!(self.out.borrow_mut(), "{}", text);
    }

    fn command(&self, name: &str, property: Option<(&str, &str)>, message: &str) {
        let props = match property {
            Some((key, value)) => format!(" {}={}", key, escape_property(value)),
            None => String::new(),
        };
        self.line(&format!("::{}{}::{}", name, props, escape_data(message)));
    }

    fn file_command(&self, kind: FileCommand, name: &str, value: &str) -> Result<()> {
        let path = match kind {
            FileCommand::Env => &self.env_file,
            FileCommand::Output => &self.output_file,
            FileCommand::State => &self.state_file,
        };

        match path {
            Some(path) => append_key_value(path, name, value),
            None => {
                self.command(kind.command_name(), Some(("name", name)), value);
                Ok(())
            }
        }
    }
}

impl<W: Write> PipelineHost for GitHubActionsHost<W> {
    fn mask_secret(&self, value: &str) {
        self.command("add-mask", None, value);
    }

    fn export_variable(&self, name: &str, value: &str) -> Result<()> {
        self.file_command(FileCommand::Env, name, value)
    }

    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        self.file_command(FileCommand::Output, name, value)
    }

    fn save_state(&self, name: &str, value: &str) -> Result<()> {
        self.file_command(FileCommand::State, name, value)
    }

    fn get_state(&self, name: &str) -> Option<String> {
        self.state.get(name).cloned()
    }

    fn info(&self, message: &str) {
        self.line(message);
    }

    fn warning(&self, message: &str) {
        self.command("warning", None, message);
    }
}

/// Values saved by the main phase, exposed to the post phase as `STATE_<name>`.
fn saved_state(vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
    vars.filter_map(|(k, v)| k.strip_prefix(STATE_PREFIX).map(|n| (n.to_string(), v)))
        .collect()
}

/// Append `name<<delimiter\nvalue\ndelimiter\n` to a runner command file.
fn append_key_value(path: &Path, name: &str, value: &str) -> Result<()> {
    let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
    if name.contains(&delimiter) || value.contains(&delimiter) {
        return Err(Error::Other(format!(
            "unexpected input: value for `{}` contains the delimiter",
            name
        )));
    }

    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    write!(file, "{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)?;
    Ok(())
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
