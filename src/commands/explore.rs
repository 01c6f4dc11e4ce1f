//! Interactive explorer.
//!
//! A line-driven session holding one profile at a time. The profile,
//! expansion state and analysis are replaced wholesale, never patched.
//!
//! Commands:
//! - `load <path>`   load a profile file
//! - `paste`         read profile text until a line containing only `.`
//! - `show`          print the tree
//! - `toggle <path>` expand/collapse one node (paths are shown next to nodes)
//! - `expand-all`    expand every node
//! - `analyze`       ask the advisor
//! - `dismiss`       hide the analysis
//! - `clear`         drop the profile
//! - `help`, `quit`

use super::models::LoadedProfile;
use crate::advisor::{parse_lines, AdvisorSession, TextGenerator};
use crate::output::read_input;
use crate::render::{render_analysis_text, render_text, ExpansionState, NodePath, TextOptions};
use log::{debug, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "Commands:
  load <path>     load a profile file
  paste           paste profile JSON, end with a line containing only '.'
  show            print the tree
  toggle <path>   expand/collapse a node, e.g. 'toggle 0/q0/0/1'
  expand-all      expand every node
  analyze         ask the AI advisor
  dismiss         hide the analysis
  clear           drop the loaded profile
  help            show this help
  quit            exit";

const INPUT_PROMPT: &str = "No profile loaded. Enable \"profile\": true in your Elasticsearch \
query and load the full response ('load <path>' or 'paste').";

/// A parsed explorer command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(PathBuf),
    Paste,
    Show,
    Toggle(NodePath),
    ExpandAll,
    Analyze,
    Dismiss,
    Clear,
    Help,
    Quit,
}

/// Parse one input line into a command
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (name, arg) = match line.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (line, ""),
    };

    match name {
        "load" if !arg.is_empty() => Ok(Command::Load(PathBuf::from(arg))),
        "load" => Err("Usage: load <path>".to_string()),
        "paste" => Ok(Command::Paste),
        "show" | "s" => Ok(Command::Show),
        "toggle" | "t" if !arg.is_empty() => arg.parse().map(Command::Toggle),
        "toggle" | "t" => Err("Usage: toggle <path>".to_string()),
        "expand-all" => Ok(Command::ExpandAll),
        "analyze" | "a" => Ok(Command::Analyze),
        "dismiss" => Ok(Command::Dismiss),
        "clear" => Ok(Command::Clear),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("Unknown command '{}' (try 'help')", other)),
    }
}

/// Explorer state: at most one profile, one error and one analysis
pub struct Explorer {
    generator: Option<Box<dyn TextGenerator>>,
    profile: Option<LoadedProfile>,
    error: Option<String>,
    expansion: ExpansionState,
    advisor: AdvisorSession,
    options: TextOptions,
}

impl Explorer {
    /// Create an explorer; without a generator `analyze` is unavailable
    pub fn new(generator: Option<Box<dyn TextGenerator>>, options: TextOptions) -> Self {
        Self {
            generator,
            profile: None,
            error: None,
            expansion: ExpansionState::new(),
            advisor: AdvisorSession::new(),
            options: options.with_paths(true),
        }
    }

    pub fn profile(&self) -> Option<&LoadedProfile> {
        self.profile.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn analysis(&self) -> Option<&str> {
        self.advisor.analysis()
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Replace the current model with `text`
    ///
    /// A failed parse clears the model and records the error.
    pub fn load_text(&mut self, text: &str) -> Result<(), String> {
        match LoadedProfile::parse(text) {
            Ok(profile) => {
                self.profile = Some(profile);
                self.error = None;
                self.expansion.reset();
                self.advisor.dismiss();
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                debug!("Profile rejected: {}", message);
                self.profile = None;
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }

    /// Drop the model, the analysis and all toggles
    pub fn clear(&mut self) {
        self.profile = None;
        self.error = None;
        self.expansion.reset();
        self.advisor.dismiss();
    }

    /// Toggle one node; returns its new state
    pub fn toggle(&mut self, path: &NodePath) -> Result<bool, String> {
        let profile = self.profile.as_ref().ok_or("No profile loaded")?;
        if profile.report(&self.expansion).find(path).is_none() {
            return Err(format!("No node at path {}", path));
        }
        Ok(self.expansion.toggle(path))
    }

    pub fn expand_all(&mut self) {
        self.expansion.expand_all();
    }

    /// Run the advisor once; a trigger while in flight is ignored
    pub fn analyze(&mut self) -> Result<(), String> {
        let profile = self.profile.as_ref().ok_or("No profile loaded")?;
        let generator = self
            .generator
            .as_deref()
            .ok_or("AI advisor unavailable: no API key configured")?;

        match self.advisor.trigger(generator, &profile.response) {
            None => {
                info!("Analysis already in progress");
                Ok(())
            }
            Some(Ok(_)) => Ok(()),
            Some(Err(message)) => {
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }

    pub fn dismiss(&mut self) {
        self.advisor.dismiss();
    }

    /// Current screen: the input prompt, or the tree plus any analysis
    pub fn view(&self) -> String {
        let mut sections = Vec::new();

        match &self.profile {
            None => sections.push(INPUT_PROMPT.to_string()),
            Some(profile) => {
                sections.push(render_text(&profile.report(&self.expansion), &self.options));
                if let Some(analysis) = self.advisor.analysis() {
                    sections.push(render_analysis_text(&parse_lines(analysis), &self.options));
                }
            }
        }

        if let Some(error) = &self.error {
            sections.push(format!("Error: {}", error));
        }

        sections.join("\n\n")
    }

    /// Drive the session from `input`, writing screens to `output`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "{}\n", self.view())?;

        let mut lines = input.lines();
        loop {
            write!(output, "> ")?;
            output.flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => break,
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(message) => {
                    writeln!(output, "{}", message)?;
                    continue;
                }
            };

            let outcome = match command {
                Command::Quit => break,
                Command::Help => {
                    writeln!(output, "{}", HELP)?;
                    continue;
                }
                Command::Load(path) => match read_input(&path) {
                    Ok(text) => self.load_text(&text),
                    Err(e) => Err(format!("Failed to read {}: {}", path.display(), e)),
                },
                Command::Paste => {
                    writeln!(output, "Paste profile JSON, end with a line containing only '.'")?;
                    let mut text = String::new();
                    for line in lines.by_ref() {
                        let line = line?;
                        if line.trim() == "." {
                            break;
                        }
                        text.push_str(&line);
                        text.push('\n');
                    }
                    self.load_text(&text)
                }
                Command::Show => Ok(()),
                Command::Toggle(path) => self.toggle(&path).map(|_| ()),
                Command::ExpandAll => {
                    self.expand_all();
                    Ok(())
                }
                Command::Analyze => {
                    writeln!(output, "Analyzing...")?;
                    self.analyze()
                }
                Command::Dismiss => {
                    self.dismiss();
                    Ok(())
                }
                Command::Clear => {
                    self.clear();
                    Ok(())
                }
            };

            match outcome {
                Ok(()) => writeln!(output, "{}\n", self.view())?,
                // load/analyze failures are already part of the view
                Err(message) if self.error.as_deref() == Some(message.as_str()) => {
                    writeln!(output, "{}\n", self.view())?
                }
                Err(message) => writeln!(output, "{}", message)?,
            }
        }

        Ok(())
    }
}

/// Run the explorer on stdin/stdout
///
/// **Public** - `explore` command
pub fn execute_explore(
    initial: Option<PathBuf>,
    generator: Option<Box<dyn TextGenerator>>,
    options: TextOptions,
) -> anyhow::Result<()> {
    let mut explorer = Explorer::new(generator, options);

    if let Some(path) = initial {
        let text = read_input(&path)?;
        // A bad initial file just leaves the input prompt up
        let _ = explorer.load_text(&text);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    explorer.run(stdin.lock(), stdout.lock())?;
    Ok(())
}
