//! The interactive chat window: bootstrap, redraw, wait, read input, repeat.

use crate::dispatcher::Dispatcher;
use crate::error::{AbotError, Result};
use crate::render::{render_frame, Frame};
use crate::session::SessionState;
use crate::ui;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    Quit,
    Empty,
    Button(usize),
    Text(String),
}

/// Interpret one line typed into the chat box.
pub fn parse_input(line: &str) -> UserInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return UserInput::Empty;
    }
    if trimmed == "/quit" || trimmed == "/exit" {
        return UserInput::Quit;
    }
    if let Some(number) = trimmed.strip_prefix('/').and_then(|n| n.parse::<usize>().ok()) {
        return UserInput::Button(number);
    }
    UserInput::Text(trimmed.to_string())
}

pub struct ChatApp {
    dispatcher: Dispatcher,
    worker_threads: usize,
    session: Option<SessionState>,
    frame: Frame,
    notice: Option<String>,
}

impl ChatApp {
    pub fn new(dispatcher: Dispatcher, worker_threads: usize) -> Self {
        Self {
            dispatcher,
            worker_threads,
            session: None,
            frame: Frame::default(),
            notice: None,
        }
    }

    pub fn session(&mut self) -> Result<&mut SessionState> {
        SessionState::bootstrap(&mut self.session, self.worker_threads)
    }

    /// Entry point shared by typed input and button clicks.
    pub fn submit(&mut self, text: &str) -> Result<()> {
        let dispatcher = self.dispatcher.clone();
        self.session()?.send_message(&dispatcher, text)
    }

    /// Activate button `number` of the last rendered frame.
    pub fn activate(&mut self, number: usize) -> Result<()> {
        let label = self
            .frame
            .action(number)
            .map(str::to_string)
            .ok_or_else(|| AbotError::Other(format!("There is no button /{}", number)))?;
        log::debug!("Button /{} activated: {}", number, label);
        self.submit(&label)
    }

    /// Rebuild the frame from the current log.
    pub fn refresh(&mut self, width: usize) -> Result<&Frame> {
        let frame = render_frame(self.session()?.turns().as_slice(), width);
        self.frame = frame;
        Ok(&self.frame)
    }

    /// Wait for the outstanding reply without drawing anything.
    pub fn resolve_pending(&mut self) -> Result<bool> {
        Ok(self.session()?.resolve_pending(|_| {}).is_some())
    }

    fn draw(&mut self) -> Result<()> {
        let width = ui::terminal_width();
        self.refresh(width)?;
        ui::clear_screen();
        println!("{}", self.frame.to_text());
        if let Some(notice) = self.notice.take() {
            ui::display_notice(&notice);
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<bool> {
        match parse_input(line) {
            UserInput::Quit => return Ok(false),
            UserInput::Empty => {}
            UserInput::Button(number) => {
                if let Err(e) = self.activate(number) {
                    self.notice = Some(e.to_string());
                }
            }
            UserInput::Text(text) => match self.submit(&text) {
                Err(AbotError::ReplyPending) => {
                    self.notice = Some("Please wait for the current reply.".to_string());
                }
                other => other?,
            },
        }
        Ok(true)
    }

    /// Run the chat window until the user quits.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut editor = DefaultEditor::new()?;
        let hint = format!(
            "Type a message, /N to press button N, /quit to leave ({} replies)",
            self.dispatcher.source_name()
        );

        loop {
            self.draw()?;

            // A pending reply blocks this thread, then forces a full redraw.
            let session = self.session()?;
            if session.has_pending_reply() {
                session.resolve_pending(ui::draw_waiting);
                ui::finish_waiting();
                continue;
            }

            println!("{}", hint.dimmed());
            match editor.readline("> ") {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.trim());
                    }
                    if !self.handle_line(&line)? {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }

        println!("{}", "Goodbye!".bright_green());
        Ok(())
    }
}
