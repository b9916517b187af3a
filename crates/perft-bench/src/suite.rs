//! Reference positions with published perft counts.

use board88_engine::FenRecord;

pub struct SuiteCase {
    pub name: &'static str,
    pub fen: &'static str,
    /// Leaf counts for depth 1, 2, ...
    pub counts: &'static [u64],
}

impl SuiteCase {
    pub fn max_depth(&self) -> u32 {
        self.counts.len() as u32
    }

    /// Expected count at `depth`, if published.
    pub fn expected(&self, depth: u32) -> Option<u64> {
        let index = usize::try_from(depth).ok()?.checked_sub(1)?;
        self.counts.get(index).copied()
    }
}

pub const SUITE: [SuiteCase; 5] = [
    SuiteCase {
        name: "startpos",
        fen: FenRecord::STARTPOS,
        counts: &[20, 400, 8902, 197_281, 4_865_609, 119_060_324],
    },
    SuiteCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        counts: &[48, 2039, 97_862, 4_085_603, 193_690_690],
    },
    SuiteCase {
        name: "promotions",
        fen: "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
        counts: &[24, 496, 9483, 182_838, 3_605_103, 71_179_139],
    },
    SuiteCase {
        name: "position 4",
        fen: "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        counts: &[6, 264, 9467, 422_333, 15_833_292],
    },
    SuiteCase {
        name: "position 3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        counts: &[14, 191, 2812, 43_238, 674_624, 11_030_083, 178_633_661],
    },
];
