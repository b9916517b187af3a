//! UCI `info` lines.

/// Score in centipawns or mate distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    /// Centipawn score (100 = 1 pawn advantage).
    Cp(i32),
    /// Mate in N moves (positive = engine winning).
    Mate(i32),
}

/// Search information from engine. Absent fields are not printed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineInfo {
    pub depth: Option<u32>,
    pub score: Option<Score>,
    pub nodes: Option<u64>,
    pub nps: Option<u64>,
    /// Milliseconds since the search started.
    pub time: Option<u64>,
    pub pv: Vec<String>,
    /// Free text; always printed last since it runs to the end of the line.
    pub string: Option<String>,
}

impl EngineInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format as a UCI info line.
    pub fn to_uci(&self) -> String {
        let mut line = String::from("info");

        if let Some(d) = self.depth {
            line.push_str(&format!(" depth {}", d));
        }
        match self.score {
            Some(Score::Cp(cp)) => line.push_str(&format!(" score cp {}", cp)),
            Some(Score::Mate(m)) => line.push_str(&format!(" score mate {}", m)),
            None => {}
        }
        if let Some(n) = self.nodes {
            line.push_str(&format!(" nodes {}", n));
        }
        if let Some(n) = self.nps {
            line.push_str(&format!(" nps {}", n));
        }
        if let Some(t) = self.time {
            line.push_str(&format!(" time {}", t));
        }
        if !self.pv.is_empty() {
            line.push_str(" pv ");
            line.push_str(&self.pv.join(" "));
        }
        if let Some(ref s) = self.string {
            line.push_str(" string ");
            line.push_str(s);
        }

        line
    }
}

/// Builder for constructing EngineInfo.
#[derive(Default)]
pub struct InfoBuilder {
    info: EngineInfo,
}

impl InfoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(mut self, d: u32) -> Self {
        self.info.depth = Some(d);
        self
    }

    pub fn score_cp(mut self, cp: i32) -> Self {
        self.info.score = Some(Score::Cp(cp));
        self
    }

    pub fn nodes(mut self, n: u64) -> Self {
        self.info.nodes = Some(n);
        self
    }

    pub fn nps(mut self, n: u64) -> Self {
        self.info.nps = Some(n);
        self
    }

    pub fn time(mut self, ms: u64) -> Self {
        self.info.time = Some(ms);
        self
    }

    pub fn pv(mut self, moves: Vec<String>) -> Self {
        self.info.pv = moves;
        self
    }

    pub fn string(mut self, s: impl Into<String>) -> Self {
        self.info.string = Some(s.into());
        self
    }

    pub fn build(self) -> EngineInfo {
        self.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_info() {
        assert_eq!(EngineInfo::new().to_uci(), "info");
    }

    #[test]
    fn fields_in_protocol_order() {
        let info = InfoBuilder::new()
            .string("12 playouts")
            .time(250)
            .nodes(50000)
            .nps(200000)
            .score_cp(35)
            .depth(1)
            .pv(vec!["e2e4".to_string()])
            .build();

        assert_eq!(
            info.to_uci(),
            "info depth 1 score cp 35 nodes 50000 nps 200000 time 250 pv e2e4 string 12 playouts"
        );
    }

    #[test]
    fn mate_score() {
        let info = EngineInfo {
            score: Some(Score::Mate(-2)),
            ..EngineInfo::default()
        };
        assert_eq!(info.to_uci(), "info score mate -2");
    }
}
