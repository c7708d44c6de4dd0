use crate::command::Command;
use crate::deck::Deck;
use crate::error::{Error, Result};
use crate::file_io;
use crate::logger::SessionLog;
use crate::models::Flashcard;
use rand::Rng;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Snapshot loaded before the first prompt.
    pub import_from: Option<PathBuf>,
    /// Destination written once more when the session exits.
    pub export_to: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Line-based driver over a [`Deck`]: one action per input line, outcomes
/// written as text and mirrored into the session's [`SessionLog`].
pub struct Session<R, W, G> {
    deck: Deck,
    log: SessionLog,
    input: R,
    output: W,
    rng: G,
    export_to: Option<PathBuf>,
}

impl<R: BufRead, W: Write, G: Rng> Session<R, W, G> {
    pub fn new(config: SessionConfig, input: R, output: W, rng: G) -> Result<Self> {
        let mut session = Self {
            deck: Deck::new(),
            log: SessionLog::new(),
            input,
            output,
            rng,
            export_to: config.export_to,
        };

        if let Some(path) = config.import_from {
            session.import_snapshot_from(&path)?;
            session.blank_line()?;
        }

        Ok(session)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    /// Runs the prompt loop until the user exits or the input ends.
    ///
    /// Only terminal I/O failures are returned; every other error is reported
    /// to the user and the loop carries on.
    pub fn run(&mut self) -> Result<()> {
        info!("session started");
        loop {
            let outcome = self
                .prompt(&Command::prompt())
                .and_then(|line| line.parse::<Command>())
                .and_then(|command| self.dispatch(command));

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(Error::InputClosed) => {
                    debug!("input closed, exiting");
                    self.exit()?;
                    break;
                }
                Err(Error::UnknownCommand(name)) => {
                    debug!(action = %name, "unknown action");
                    self.say("Invalid action!")?;
                }
                Err(Error::Io(e)) => return Err(Error::Io(e)),
                Err(e) => {
                    warn!(error = %e, "action failed");
                    self.say(&e.to_string())?;
                }
            }
        }
        info!(cards = self.deck.len(), "session finished");
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow> {
        debug!(%command, "dispatching");
        match command {
            Command::Add => self.add(),
            Command::Remove => self.remove(),
            Command::Import => self.import(),
            Command::Export => self.export(),
            Command::Ask => self.ask(),
            Command::Exit => self.exit(),
            Command::Log => self.save_log(),
            Command::HardestCard => self.hardest_card(),
            Command::ResetStats => self.reset_stats(),
        }
    }

    fn add(&mut self) -> Result<Flow> {
        let mut term = self.prompt("The card:")?;
        while self.deck.lookup_by_term(&term).is_ok() {
            term = self.prompt(&format!("The card \"{term}\" already exists. Try again:"))?;
        }

        let mut definition = self.prompt("The definition of the card:")?;
        while self.deck.lookup_by_definition(&definition).is_ok() {
            definition = self.prompt(&format!(
                "The definition \"{definition}\" already exists. Try again:"
            ))?;
        }

        let card = Flashcard::new(term, definition);
        let message = format!("The pair {card} has been added.");
        self.deck.insert_card(card)?;
        self.say(&message)?;
        self.blank_line()?;
        Ok(Flow::Continue)
    }

    fn remove(&mut self) -> Result<Flow> {
        let term = self.prompt("Which card?")?;
        let removed = self
            .deck
            .lookup_by_term(&term)
            .and_then(|card| self.deck.remove_card(&card));

        match removed {
            Ok(()) => self.say("The card has been removed.")?,
            Err(Error::NotFound { .. }) => {
                self.say(&format!("Can't remove \"{term}\": there is no such card."))?
            }
            Err(e) => return Err(e),
        }
        self.blank_line()?;
        Ok(Flow::Continue)
    }

    fn import(&mut self) -> Result<Flow> {
        let file_name = self.prompt("File name:")?;
        self.import_snapshot_from(Path::new(&file_name))?;
        self.blank_line()?;
        Ok(Flow::Continue)
    }

    fn import_snapshot_from(&mut self, path: &Path) -> Result<()> {
        let imported =
            file_io::read_snapshot(path).and_then(|snapshot| self.deck.import_snapshot(snapshot));

        match imported {
            Ok(count) => self.say(&format!("{count} cards have been loaded.")),
            Err(Error::FileUnavailable { source, .. }) => {
                warn!(path = %path.display(), error = %source, "import failed");
                self.say("File not found.")
            }
            Err(Error::MalformedInput(reason)) => {
                warn!(path = %path.display(), %reason, "import failed");
                self.say(&format!("The file is not a valid deck: {reason}"))
            }
            Err(e) => Err(e),
        }
    }

    fn export(&mut self) -> Result<Flow> {
        let file_name = self.prompt("File name:")?;
        self.export_snapshot_to(Path::new(&file_name))?;
        self.blank_line()?;
        Ok(Flow::Continue)
    }

    fn export_snapshot_to(&mut self, path: &Path) -> Result<()> {
        let (snapshot, count) = self.deck.export_snapshot();
        match file_io::write_snapshot(path, &snapshot) {
            Ok(()) => self.say(&format!("{count} cards have been saved.")),
            Err(Error::FileUnavailable { source, .. }) => {
                warn!(path = %path.display(), error = %source, "export failed");
                self.say(&format!("Can't write to \"{}\": {source}", path.display()))
            }
            Err(e) => Err(e),
        }
    }

    fn ask(&mut self) -> Result<Flow> {
        if self.deck.is_empty() {
            self.say("There are no flashcards in the deck.")?;
            return Ok(Flow::Continue);
        }

        let rounds = loop {
            let answer = self.prompt("How many times to ask?")?;
            match parse_count(&answer) {
                Ok(rounds) => break rounds,
                Err(_) => self.say("Enter a number")?,
            }
        };

        for _ in 0..rounds {
            let card = self.deck.random_card(&mut self.rng)?;
            let answer = self.prompt(&format!("Print the definition of \"{}\"", card.term))?;
            let result = self.deck.ask(&card, &answer)?;

            let message = if result.is_correct {
                "Correct!".to_string()
            } else {
                match result.matched {
                    Some(term) => format!(
                        "Wrong. The right answer is \"{}\", but your definition is correct for \"{}\".",
                        card.definition, term
                    ),
                    None => format!("Wrong. The right answer is \"{}\".", card.definition),
                }
            };
            self.say(&message)?;
        }

        self.blank_line()?;
        Ok(Flow::Continue)
    }

    fn exit(&mut self) -> Result<Flow> {
        if let Some(path) = self.export_to.clone() {
            self.export_snapshot_to(&path)?;
        }
        self.say("Bye bye!")?;
        Ok(Flow::Exit)
    }

    fn save_log(&mut self) -> Result<Flow> {
        let file_name = self.prompt("File name:")?;
        let path = Path::new(&file_name);
        match file_io::write_log(path, self.log.contents()) {
            Ok(()) => self.say("The log has been saved.")?,
            Err(Error::FileUnavailable { source, .. }) => {
                warn!(path = %path.display(), error = %source, "saving log failed");
                self.say(&format!("Can't write to \"{}\": {source}", path.display()))?
            }
            Err(e) => return Err(e),
        }
        self.blank_line()?;
        Ok(Flow::Continue)
    }

    fn hardest_card(&mut self) -> Result<Flow> {
        let (terms, mistakes) = self.deck.hardest_cards();
        let quoted: Vec<String> = terms.iter().map(|term| format!("\"{term}\"")).collect();
        let listed = quoted.join(", ");

        let message = match terms.len() {
            0 => "There are no cards with errors.".to_string(),
            1 => format!("The hardest card is {listed}. You have {mistakes} errors answering it."),
            _ => format!(
                "The hardest cards are {listed}. You have {mistakes} errors answering them."
            ),
        };
        self.say(&message)?;
        Ok(Flow::Continue)
    }

    fn reset_stats(&mut self) -> Result<Flow> {
        self.deck.reset_stats();
        self.say("Card statistics have been reset.")?;
        Ok(Flow::Continue)
    }

    fn prompt(&mut self, message: &str) -> Result<String> {
        self.say(message)?;
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(Error::InputClosed);
        }
        // Undecodable bytes become U+FFFD instead of ending the session.
        let response = String::from_utf8_lossy(&line).trim().to_string();
        self.log.log(&response);
        Ok(response)
    }

    fn say(&mut self, message: &str) -> Result<()> {
        self.log.log(message);
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn blank_line(&mut self) -> Result<()> {
        writeln!(self.output)?;
        Ok(())
    }
}

fn parse_count(input: &str) -> Result<usize> {
    input
        .parse()
        .map_err(|_| Error::MalformedInput(format!("\"{input}\" is not a number")))
}
