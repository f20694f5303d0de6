/// Display band for a single DREAD score on the 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DreadBand {
    Low,
    Medium,
    High,
    Critical,
}

impl DreadBand {
    pub fn from_score(score: f64) -> Self {
        if score < 3.0 {
            DreadBand::Low
        } else if score < 6.0 {
            DreadBand::Medium
        } else if score < 8.0 {
            DreadBand::High
        } else {
            DreadBand::Critical
        }
    }

    /// ANSI color escape used when printing the score.
    pub const fn color(self) -> &'static str {
        match self {
            DreadBand::Low => "\x1b[32m",
            DreadBand::Medium => "\x1b[33m",
            DreadBand::High => "\x1b[38;5;208m",
            DreadBand::Critical => "\x1b[31m",
        }
    }
}
