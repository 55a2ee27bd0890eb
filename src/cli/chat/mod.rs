pub mod command;
pub mod prompt;

use std::io::Write;
use std::process::ExitCode;

use color_print::cformat;
use command::Command;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use eyre::Result;
use prompt::generate_prompt;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::planner::templates::APOLOGY_MESSAGE;
use crate::planner::{Field, TravelPlanner};

const WELCOME_TEXT: &str = "
✈️  Roamyo.ai - AI Travel Planner

Welcome to your AI-powered travel planning assistant! I'll help you create a
personalized travel itinerary. Just tell me about your travel plans, and I'll
guide you through the process.

/help         Show the help dialogue
/quit         Quit the application
";

const HELP_TEXT: &str = "
Roamyo.ai travel planner

/clear        Start over with a new conversation
/prefs        Show the travel details collected so far
/history      Show the conversation so far
/help         Show this help dialogue
/quit         Quit the application
";

pub struct ChatContext {
    output: Box<dyn Write>,
    inputs: Vec<String>,
    interactive: bool,
    planner: TravelPlanner,
}

impl ChatContext {
    pub fn new(output: Box<dyn Write>, inputs: Vec<String>, interactive: bool, planner: TravelPlanner) -> Self {
        Self {
            output,
            inputs,
            interactive,
            planner,
        }
    }

    pub async fn run(&mut self) -> Result<ExitCode> {
        if self.interactive {
            self.print_welcome()?;
        }

        // Scripted turns: answer each and exit
        if !self.inputs.is_empty() {
            for input in std::mem::take(&mut self.inputs) {
                if !self.handle_input(&input).await? {
                    break;
                }
            }
            return Ok(ExitCode::SUCCESS);
        }

        if self.interactive {
            self.run_interactive().await?;
        }

        Ok(ExitCode::SUCCESS)
    }

    fn print_welcome(&mut self) -> Result<()> {
        writeln!(self.output, "{}", WELCOME_TEXT)?;
        Ok(())
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;

        loop {
            let collected = Field::ALL.len() - self.planner.preferences().missing_fields().len();
            let prompt_text = generate_prompt(collected);

            match rl.readline(&prompt_text) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line.as_str());

                    if !self.handle_input(&line).await? {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    break;
                }
            }
        }

        Ok(())
    }

    /// Returns `false` once the user asks to quit.
    async fn handle_input(&mut self, input: &str) -> Result<bool> {
        match Command::parse(input) {
            Command::Help => {
                writeln!(self.output, "{}", HELP_TEXT)?;
            }
            Command::Clear => {
                self.planner.reset();
                if self.interactive {
                    execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
                }
                writeln!(self.output, "Conversation cleared.")?;
            }
            Command::Prefs => self.print_preferences()?,
            Command::History => self.print_history()?,
            Command::Quit => return Ok(false),
            Command::Unknown(name) => {
                writeln!(self.output, "Unknown command: {}. Type /help for options.", name)?;
            }
            Command::Ask(text) => self.process_chat_input(&text).await?,
        }

        Ok(true)
    }

    async fn process_chat_input(&mut self, input: &str) -> Result<()> {
        if self.interactive {
            writeln!(self.output, "{}", cformat!("<dim>Thinking...</>"))?;
        }

        let response = self.planner.process_user_input(input).await;
        debug!("Assistant reply is {} bytes", response.len());

        if response == APOLOGY_MESSAGE {
            writeln!(self.output, "{}\n", cformat!("<red>{}</>", response))?;
        } else {
            writeln!(self.output, "{}\n", cformat!("<cyan>{}</>", response))?;
        }

        Ok(())
    }

    fn print_preferences(&mut self) -> Result<()> {
        let preferences = self.planner.preferences();
        let mut lines = Vec::with_capacity(Field::ALL.len());
        for field in Field::ALL {
            match preferences.get(field) {
                Some(value) => lines.push(format!("  {}: {}", field, value)),
                None => lines.push(format!("  {}: (not set)", field)),
            }
        }

        writeln!(self.output, "Travel details so far:\n{}", lines.join("\n"))?;

        if preferences.is_complete() {
            writeln!(self.output, "All set! Send any message to build your itinerary.")?;
        } else {
            let names = preferences
                .missing_fields()
                .iter()
                .map(Field::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(self.output, "Still needed: {}", names)?;
        }

        Ok(())
    }

    fn print_history(&mut self) -> Result<()> {
        let history = self.planner.history();
        if history.is_empty() {
            writeln!(self.output, "No messages yet.")?;
            return Ok(());
        }

        let mut lines = Vec::with_capacity(history.len());
        for turn in history.get_messages() {
            lines.push(format!("[{}] {}: {}", turn.at.format("%H:%M:%S"), turn.role, turn.content));
        }
        writeln!(self.output, "{}", lines.join("\n"))?;

        Ok(())
    }
}
