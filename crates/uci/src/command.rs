//! Parsing of GUI-to-engine commands.

use crate::UciError;

/// Commands sent from GUI to engine.
#[derive(Debug, Clone, PartialEq)]
pub enum GuiCommand {
    /// Initialize UCI mode.
    Uci,
    /// Check if engine is ready.
    IsReady,
    /// The next `position` belongs to a different game.
    UciNewGame,
    /// Set up a position. `fen` is `None` for `startpos`.
    Position {
        fen: Option<String>,
        moves: Vec<String>,
    },
    /// Start calculating.
    Go(GoOptions),
    /// Stop calculating.
    Stop,
    /// Quit the engine.
    Quit,
    /// Anything else, kept verbatim.
    Unknown(String),
}

/// Options for the `go` command. Times are in milliseconds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GoOptions {
    pub movetime: Option<u64>,
    pub depth: Option<u32>,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movestogo: Option<u32>,
    /// Search until `stop`.
    pub infinite: bool,
}

impl GuiCommand {
    /// Parse one line of GUI input.
    pub fn parse(input: &str) -> Result<Self, UciError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        match parts.next().unwrap_or("") {
            "uci" => Ok(GuiCommand::Uci),
            "isready" => Ok(GuiCommand::IsReady),
            "ucinewgame" => Ok(GuiCommand::UciNewGame),
            "stop" => Ok(GuiCommand::Stop),
            "quit" => Ok(GuiCommand::Quit),
            "position" => Self::parse_position(parts),
            "go" => Self::parse_go(parts),
            _ => Ok(GuiCommand::Unknown(input.to_string())),
        }
    }

    fn parse_position<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        let fen = match parts.next() {
            Some("startpos") => {
                match parts.next() {
                    None | Some("moves") => {}
                    Some(other) => {
                        return Err(UciError::ParseError(format!(
                            "Unexpected '{}' after startpos",
                            other
                        )))
                    }
                }
                None
            }
            Some("fen") => {
                let fields: Vec<&str> = parts.by_ref().take_while(|&p| p != "moves").collect();
                if fields.is_empty() {
                    return Err(UciError::ParseError("Missing FEN".to_string()));
                }
                Some(fields.join(" "))
            }
            Some(other) => {
                return Err(UciError::InvalidCommand(format!(
                    "Expected 'startpos' or 'fen', got '{}'",
                    other
                )));
            }
            None => {
                return Err(UciError::InvalidCommand(
                    "Expected 'startpos' or 'fen'".to_string(),
                ));
            }
        };

        let moves = parts.map(str::to_string).collect();
        Ok(GuiCommand::Position { fen, moves })
    }

    fn parse_go<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        fn value<'a, T: std::str::FromStr>(
            key: &str,
            parts: &mut impl Iterator<Item = &'a str>,
        ) -> Result<T, UciError> {
            let raw = parts
                .next()
                .ok_or_else(|| UciError::ParseError(format!("Missing value for '{}'", key)))?;
            raw.parse()
                .map_err(|_| UciError::ParseError(format!("Bad value for '{}': {}", key, raw)))
        }

        let mut opts = GoOptions::default();
        while let Some(key) = parts.next() {
            match key {
                "movetime" => opts.movetime = Some(value(key, &mut parts)?),
                "depth" => opts.depth = Some(value(key, &mut parts)?),
                "wtime" => opts.wtime = Some(value(key, &mut parts)?),
                "btime" => opts.btime = Some(value(key, &mut parts)?),
                "winc" => opts.winc = Some(value(key, &mut parts)?),
                "binc" => opts.binc = Some(value(key, &mut parts)?),
                "movestogo" => opts.movestogo = Some(value(key, &mut parts)?),
                "infinite" => opts.infinite = true,
                // ponder, nodes, mate, searchmoves: not supported
                _ => {}
            }
        }

        Ok(GuiCommand::Go(opts))
    }
}
