//! UCI (Universal Chess Interface) protocol plumbing for engine binaries.
//!
//! # Supported GUI commands
//!
//! - `uci` - Initialize engine, get id
//! - `isready` / `readyok` - Synchronization
//! - `ucinewgame` - Forget the previous game
//! - `position startpos|fen <fen> [moves <move>...]` - Set position
//! - `go [movetime|wtime|btime|winc|binc|movestogo|depth|infinite]` - Start search
//! - `stop` - Stop search
//! - `quit` - Exit engine
//!
//! # Example
//!
//! ```
//! use uci::{GuiCommand, UciEngine};
//!
//! let mut engine = UciEngine::new("isready\n".as_bytes(), Vec::new());
//! assert_eq!(engine.read_command().unwrap(), GuiCommand::IsReady);
//! engine.output.send_readyok().unwrap();
//! assert_eq!(engine.output.into_inner(), b"readyok\n");
//! ```

mod command;
mod info;

pub use command::{GoOptions, GuiCommand};
pub use info::{EngineInfo, InfoBuilder, Score};

use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UciError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Messages sent from engine to GUI.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineMessage {
    /// Engine identification.
    Id { name: String, author: String },
    /// UCI initialization complete.
    UciOk,
    /// Engine is ready.
    ReadyOk,
    /// Search information.
    Info(EngineInfo),
    /// Best move found, `0000` when there is none.
    BestMove { mv: String, ponder: Option<String> },
}

impl EngineMessage {
    /// Format message for output.
    pub fn to_uci(&self) -> String {
        match self {
            EngineMessage::Id { name, author } => {
                format!("id name {}\nid author {}", name, author)
            }
            EngineMessage::UciOk => "uciok".to_string(),
            EngineMessage::ReadyOk => "readyok".to_string(),
            EngineMessage::Info(info) => info.to_uci(),
            EngineMessage::BestMove { mv, ponder } => match ponder {
                Some(p) => format!("bestmove {} ponder {}", mv, p),
                None => format!("bestmove {}", mv),
            },
        }
    }
}

/// Reading half of a UCI channel.
pub struct UciReader<R: BufRead> {
    reader: R,
}

impl<R: BufRead> UciReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read and parse the next command from GUI.
    ///
    /// End of input reads as [`GuiCommand::Quit`].
    pub fn read_command(&mut self) -> Result<GuiCommand, UciError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(GuiCommand::Quit);
        }
        GuiCommand::parse(&line)
    }
}

/// Writing half of a UCI channel. Every message is flushed.
pub struct UciWriter<W: Write> {
    writer: W,
}

impl<W: Write> UciWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Send a message to the GUI.
    pub fn send(&mut self, msg: &EngineMessage) -> Result<(), UciError> {
        writeln!(self.writer, "{}", msg.to_uci())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Send engine identification.
    pub fn send_id(&mut self, name: &str, author: &str) -> Result<(), UciError> {
        self.send(&EngineMessage::Id {
            name: name.to_string(),
            author: author.to_string(),
        })
    }

    pub fn send_uciok(&mut self) -> Result<(), UciError> {
        self.send(&EngineMessage::UciOk)
    }

    pub fn send_readyok(&mut self) -> Result<(), UciError> {
        self.send(&EngineMessage::ReadyOk)
    }

    /// Send best move.
    pub fn send_bestmove(&mut self, mv: &str) -> Result<(), UciError> {
        self.send(&EngineMessage::BestMove {
            mv: mv.to_string(),
            ponder: None,
        })
    }

    /// Send search info.
    pub fn send_info(&mut self, info: EngineInfo) -> Result<(), UciError> {
        self.send(&EngineMessage::Info(info))
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// A GUI connection. Destructure it to read and write from different
/// threads.
pub struct UciEngine<R: BufRead, W: Write> {
    pub input: UciReader<R>,
    pub output: UciWriter<W>,
}

impl<R: BufRead, W: Write> UciEngine<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            input: UciReader::new(reader),
            output: UciWriter::new(writer),
        }
    }

    pub fn read_command(&mut self) -> Result<GuiCommand, UciError> {
        self.input.read_command()
    }

    pub fn send(&mut self, msg: &EngineMessage) -> Result<(), UciError> {
        self.output.send(msg)
    }
}

/// Create a UCI engine using stdin/stdout.
pub fn stdio_engine() -> UciEngine<std::io::BufReader<std::io::Stdin>, std::io::Stdout> {
    UciEngine::new(std::io::BufReader::new(std::io::stdin()), std::io::stdout())
}
