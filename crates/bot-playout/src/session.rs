//! UCI session state and the command loop.
//!
//! Commands are read on their own thread so `stop` and `isready` are
//! answered while a search runs. Searches run on a worker thread with a
//! copy of the board and report back over the same channel.

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use board88_engine::Board;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uci::{GoOptions, GuiCommand, InfoBuilder, UciError, UciReader, UciWriter};

use crate::config::BotConfig;
use crate::playout::{search, SearchLimits, SearchReport};

enum Event {
    Command(GuiCommand),
    SearchDone(u64),
}

struct RunningSearch {
    id: u64,
    stop: Arc<AtomicBool>,
    handle: JoinHandle<SearchReport>,
}

/// One GUI connection: the current position plus any search in flight.
pub struct Session {
    board: Board,
    config: BotConfig,
    rng: StdRng,
    search: Option<RunningSearch>,
    searches_started: u64,
}

impl Session {
    pub fn new(config: BotConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            board: Board::startpos(),
            config,
            rng,
            search: None,
            searches_started: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Back to the starting position.
    pub fn reset(&mut self) {
        self.board = Board::startpos();
    }

    /// Loads `fen` (or the starting position) and plays `moves` on it.
    ///
    /// A bad FEN keeps the current board. Moves that do not parse or are
    /// illegal are skipped.
    pub fn set_position(&mut self, fen: Option<&str>, moves: &[String]) {
        let mut board = match fen {
            None => Board::startpos(),
            Some(fen) => match Board::from_fen(fen) {
                Ok(board) => board,
                Err(e) => {
                    tracing::warn!(%fen, error = %e, "rejecting position");
                    return;
                }
            },
        };
        for text in moves {
            if let Err(e) = board.apply_text_move(text) {
                tracing::warn!(mv = %text, error = %e, "skipping move");
            }
        }
        tracing::debug!(fen = %board.to_fen(), "position set");
        self.board = board;
    }

    /// Serves commands from `input` until `quit` or end of input.
    pub fn run<R, W>(
        mut self,
        input: UciReader<R>,
        output: &mut UciWriter<W>,
    ) -> Result<(), UciError>
    where
        R: BufRead + Send + 'static,
        W: Write,
    {
        let (tx, rx) = mpsc::channel();
        spawn_reader(input, tx.clone());

        for event in rx.iter() {
            match event {
                Event::Command(GuiCommand::Quit) => break,
                Event::Command(cmd) => self.handle(cmd, &tx, output)?,
                Event::SearchDone(id) => {
                    if self.search.as_ref().is_some_and(|s| s.id == id) {
                        self.finish_search(output)?;
                    }
                }
            }
        }

        self.stop_search();
        self.finish_search(output)
    }

    fn handle<W: Write>(
        &mut self,
        cmd: GuiCommand,
        tx: &Sender<Event>,
        output: &mut UciWriter<W>,
    ) -> Result<(), UciError> {
        match cmd {
            GuiCommand::Uci => {
                output.send_id(&self.config.name, &self.config.author)?;
                output.send_uciok()?;
            }
            GuiCommand::IsReady => output.send_readyok()?,
            GuiCommand::UciNewGame => self.reset(),
            GuiCommand::Position { fen, moves } => self.set_position(fen.as_deref(), &moves),
            GuiCommand::Go(opts) => {
                if self.search.is_some() {
                    tracing::warn!("go while searching, finishing the previous search first");
                    self.stop_search();
                    self.finish_search(output)?;
                }
                self.start_search(&opts, tx);
            }
            GuiCommand::Stop => self.stop_search(),
            GuiCommand::Quit => {}
            GuiCommand::Unknown(text) => {
                if !text.is_empty() {
                    tracing::debug!(%text, "ignoring unknown command");
                }
            }
        }
        Ok(())
    }

    fn start_search(&mut self, opts: &GoOptions, tx: &Sender<Event>) {
        let limits = SearchLimits::from_go(
            opts,
            self.board.side_to_move(),
            self.config.default_movetime_ms,
            self.config.max_fullmoves,
        );
        self.searches_started += 1;
        let id = self.searches_started;
        let stop = Arc::new(AtomicBool::new(false));
        let board = *self.board();
        let mut rng = StdRng::seed_from_u64(self.rng.random());
        let (worker_stop, worker_tx) = (Arc::clone(&stop), tx.clone());

        tracing::info!(id, budget = ?limits.budget, "search started");
        let handle = thread::spawn(move || {
            let report = search(&board, &limits, &worker_stop, &mut rng);
            // The loop may already be gone after quit.
            let _ = worker_tx.send(Event::SearchDone(id));
            report
        });
        self.search = Some(RunningSearch { id, stop, handle });
    }

    fn stop_search(&mut self) {
        if let Some(running) = &self.search {
            running.stop.store(true, Ordering::Relaxed);
        }
    }

    fn finish_search<W: Write>(&mut self, output: &mut UciWriter<W>) -> Result<(), UciError> {
        let Some(running) = self.search.take() else {
            return Ok(());
        };
        let report = match running.handle.join() {
            Ok(report) => report,
            Err(_) => {
                tracing::error!("search thread panicked");
                output.send_bestmove("0000")?;
                return Ok(());
            }
        };

        output.send_info(
            InfoBuilder::new()
                .score_cp(report.score_cp())
                .nodes(report.nodes)
                .nps(report.nps())
                .time(report.elapsed.as_millis() as u64)
                .string(format!("{} playouts", report.playouts))
                .build(),
        )?;
        let best = report.best.map_or_else(|| "0000".to_string(), |m| m.to_uci());
        tracing::info!(id = running.id, %best, playouts = report.playouts, "search finished");
        output.send_bestmove(&best)
    }
}

fn spawn_reader<R>(mut input: UciReader<R>, tx: Sender<Event>)
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || loop {
        let cmd = match input.read_command() {
            Ok(cmd) => cmd,
            Err(UciError::IoError(e)) => {
                tracing::error!(error = %e, "input closed");
                GuiCommand::Quit
            }
            Err(e) => {
                tracing::warn!(error = %e, "bad command");
                continue;
            }
        };
        let quit = cmd == GuiCommand::Quit;
        if tx.send(Event::Command(cmd)).is_err() || quit {
            break;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn seeded() -> Session {
        Session::new(BotConfig {
            seed: Some(17),
            ..BotConfig::default()
        })
    }

    fn talk(input: &str) -> Vec<String> {
        let mut output = UciWriter::new(Vec::new());
        seeded()
            .run(UciReader::new(Cursor::new(input.to_string())), &mut output)
            .unwrap();
        String::from_utf8(output.into_inner())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn position_with_moves() {
        let mut session = seeded();
        session.set_position(None, &["e2e4".to_string(), "c7c5".to_string()]);
        assert_eq!(
            session.board().to_fen(),
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"
        );
    }

    #[test]
    fn bad_fen_keeps_previous_board() {
        let mut session = seeded();
        session.set_position(None, &["d2d4".to_string()]);
        let before = session.board().to_fen();
        session.set_position(Some("not a fen"), &[]);
        assert_eq!(session.board().to_fen(), before);
    }

    #[test]
    fn position_with_capturable_king_is_rejected() {
        let mut session = seeded();
        session.set_position(None, &["e2e4".to_string()]);
        let before = session.board().to_fen();
        session.set_position(
            Some("4k3/8/8/8/8/8/8/r3K3 b - - 0 1"),
            &["a1e1".to_string()],
        );
        assert_eq!(session.board().to_fen(), before);
    }

    #[test]
    fn illegal_moves_are_skipped() {
        let mut session = seeded();
        session.set_position(
            None,
            &["e2e5".to_string(), "zz".to_string(), "g1f3".to_string()],
        );
        assert_eq!(
            session.board().to_fen(),
            "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 1 1"
        );
    }

    #[test]
    fn new_game_resets() {
        let mut session = seeded();
        session.set_position(None, &["e2e4".to_string()]);
        session.reset();
        assert_eq!(*session.board(), Board::startpos());
    }

    #[test]
    fn handshake() {
        let lines = talk("uci\nisready\nquit\n");
        assert_eq!(
            lines,
            vec!["id name PlayoutBot", "id author Tom Metten", "uciok", "readyok"]
        );
    }

    #[test]
    fn go_answers_with_a_legal_move() {
        let lines = talk("position startpos moves e2e4\ngo movetime 50\n");
        let best = lines.last().unwrap().strip_prefix("bestmove ").unwrap();

        let mut board = Board::startpos();
        board.apply_text_move("e2e4").unwrap();
        assert!(board.parse_move(best).is_ok(), "{} is not legal", best);
        assert!(lines.iter().any(|l| l.starts_with("info ") && l.contains(" nodes ")));
    }

    #[test]
    fn go_without_moves_sends_null_move() {
        let lines = talk("position fen 7k/5Q2/6K1/8/8/8/8/8 b - - 0 1\ngo movetime 10\n");
        assert_eq!(lines.last().unwrap(), "bestmove 0000");
    }

    #[test]
    fn stop_ends_infinite_search() {
        let lines = talk("position startpos\ngo infinite\nstop\nisready\n");
        assert!(lines.iter().any(|l| l == "readyok"));
        assert!(lines.iter().any(|l| l.starts_with("bestmove ")));
    }
}
