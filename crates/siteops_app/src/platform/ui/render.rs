use std::io::{self, Write};

use siteops_core::{AppViewModel, BatchId, BatchPhase};

use super::convert::{MarkupTextConverter, MessageConverter};

/// Prints the message log incrementally: new messages as they arrive and the
/// status marker whenever it changes.
pub struct TerminalRenderer<W: Write> {
    out: W,
    converter: Box<dyn MessageConverter>,
    batch_id: Option<BatchId>,
    headed: bool,
    printed_messages: usize,
    last_status: Option<String>,
    failures_printed: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            converter: Box::new(MarkupTextConverter),
            batch_id: None,
            headed: false,
            printed_messages: 0,
            last_status: None,
            failures_printed: false,
        }
    }

    pub fn render(&mut self, view: &AppViewModel) -> io::Result<()> {
        let Some(heading) = view.heading.as_deref() else {
            return Ok(());
        };

        // A rebuilt log starts over with a fresh heading.
        if !self.headed
            || view.batch_id != self.batch_id
            || view.messages.len() < self.printed_messages
        {
            writeln!(self.out, "{heading}")?;
            writeln!(self.out, "{}", "-".repeat(heading.len()))?;
            self.batch_id = view.batch_id;
            self.headed = true;
            self.printed_messages = 0;
            self.last_status = None;
            self.failures_printed = false;
        }

        for msg in &view.messages[self.printed_messages..] {
            for line in self.converter.to_plain_text(msg).lines() {
                writeln!(self.out, "  {line}")?;
            }
        }
        self.printed_messages = view.messages.len();

        if view.status != self.last_status {
            if let Some(status) = &view.status {
                writeln!(self.out, "[{status}]")?;
            }
            self.last_status = view.status.clone();
        }

        if view.phase == BatchPhase::Done && !view.failures.is_empty() && !self.failures_printed {
            writeln!(self.out, "{} request(s) failed:", view.failures.len())?;
            for failure in &view.failures {
                writeln!(self.out, "  {}: {}", failure.site, failure.reason)?;
            }
            self.failures_printed = true;
        }

        self.out.flush()
    }
}

/// Site list and operation help, operation names padded to a common width.
pub fn render_catalog(view: &AppViewModel) -> String {
    let mut text = String::from("Sites:\n");
    for site in &view.sites {
        text.push_str(&format!("    {}\n", site.name));
    }

    text.push_str("\nOperations (OP):\n");
    let width = view
        .operations
        .iter()
        .map(|op| op.name.len())
        .max()
        .unwrap_or(0);
    for op in &view.operations {
        let line = format!("  {:<width$}    {}", op.name, op.description);
        text.push_str(line.trim_end());
        text.push('\n');
    }
    text
}
