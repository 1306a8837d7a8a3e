//! Line-based terminal implementation of the interactive collaborators

use crate::domain::ids::ElementId;
use crate::host::dialogs::DialogResult;
use crate::host::traits::{DialogResponder, DirectoryPicker, ElementPicker, MessageSink};
use crate::model::document::Document;
use crate::model::element::Element;
use std::fs;
use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Prompts on a line-based reader/writer pair
pub struct ConsoleUi<R, W> {
    input: R,
    output: W,
}

impl ConsoleUi<StdinLock<'static>, Stdout> {
    /// Console UI on the process stdin/stdout
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleUi<R, W> {
    /// Console UI on arbitrary streams
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the UI and return the output stream
    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{text}").and_then(|_| self.output.flush()) {
            tracing::warn!(error = %e, "Failed to write to console");
        }
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        if let Err(e) = write!(self.output, "{prompt}").and_then(|_| self.output.flush()) {
            tracing::warn!(error = %e, "Failed to write to console");
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read from console");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> ElementPicker for ConsoleUi<R, W> {
    fn pick_elements(
        &mut self,
        document: &Document,
        filter: &dyn Fn(&Element) -> bool,
        prompt: &str,
    ) -> Option<Vec<ElementId>> {
        self.say(prompt);
        let candidates: Vec<String> = document
            .elements()
            .iter()
            .filter(|&e| filter(e))
            .map(|e| format!("  {}  {}", e.id, e.name))
            .collect();
        for line in &candidates {
            self.say(line);
        }

        let line = self.ask("Element ids (empty line cancels): ")?;
        if line.is_empty() {
            return None;
        }

        let mut picked = Vec::new();
        for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            match ElementId::from_str(token) {
                Ok(id) if document.element(id).is_some_and(|e| filter(e)) => picked.push(id),
                Ok(id) => self.say(&format!("Element {id} cannot be picked, skipped.")),
                Err(e) => self.say(&format!("{e}, skipped.")),
            }
        }
        Some(picked)
    }
}

impl<R: BufRead, W: Write> DirectoryPicker for ConsoleUi<R, W> {
    fn browse_directory(&mut self, initial: &Path, allow_create: bool) -> Option<PathBuf> {
        let line = self.ask(&format!(
            "Output directory [{}] (\"-\" cancels): ",
            initial.display()
        ))?;
        if line == "-" {
            return None;
        }

        let chosen = if line.is_empty() {
            initial.to_path_buf()
        } else {
            PathBuf::from(line)
        };

        if !chosen.is_dir() {
            if !allow_create {
                self.say(&format!("{} is not a directory.", chosen.display()));
                return None;
            }
            if let Err(e) = fs::create_dir_all(&chosen) {
                self.say(&format!("Cannot create {}: {}", chosen.display(), e));
                return None;
            }
        }
        Some(chosen)
    }
}

impl<R: BufRead, W: Write> MessageSink for ConsoleUi<R, W> {
    fn show_info(&mut self, caption: &str, message: &str) {
        self.say(&format!("[{caption}] {message}"));
    }

    fn show_error(&mut self, caption: &str, message: &str) {
        self.say(&format!("[{caption}] Warning: {message}"));
    }
}

impl<R: BufRead, W: Write> DialogResponder for ConsoleUi<R, W> {
    fn respond(&mut self, dialog_id: &str, message: &str) -> DialogResult {
        self.say(&format!("{message} ({dialog_id})"));
        match self.ask("Choose [1/2/3, ok, cancel]: ").as_deref() {
            Some("1") => DialogResult::CommandLink1,
            Some("2") => DialogResult::CommandLink2,
            Some("3") => DialogResult::CommandLink3,
            Some(answer) if answer.eq_ignore_ascii_case("ok") => DialogResult::Ok,
            _ => DialogResult::Cancel,
        }
    }
}
