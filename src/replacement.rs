use std::fmt;
use std::str::FromStr;

use crate::constants::NUM_FRAMES;
use crate::error::VmError;
use crate::memory::FrameTable;

/// Victim selection for main memory, consulted only on a page fault
pub trait ReplacementPolicy {
    fn select_victim(&mut self, frames: &FrameTable) -> usize;

    fn kind(&self) -> PolicyKind;
}

/// Configured replacement policy, resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    #[default]
    Fifo,
    Lru,
}

impl PolicyKind {
    pub fn build(self) -> Box<dyn ReplacementPolicy> {
        match self {
            PolicyKind::Fifo => Box::new(Fifo::new()),
            PolicyKind::Lru => Box::new(Lru),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = VmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(PolicyKind::Fifo),
            "lru" => Ok(PolicyKind::Lru),
            _ => Err(VmError::UnknownReplacementPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Fifo => write!(f, "fifo"),
            PolicyKind::Lru => write!(f, "lru"),
        }
    }
}

/// Round-robin over frame numbers, blind to contents and recency
pub struct Fifo {
    hand: usize,
}

impl Fifo {
    pub fn new() -> Self {
        Fifo { hand: 0 }
    }

    fn inc(&mut self) {
        self.hand += 1;
        if self.hand == NUM_FRAMES {
            self.hand = 0;
        }
    }
}

impl Default for Fifo {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplacementPolicy for Fifo {
    fn select_victim(&mut self, _frames: &FrameTable) -> usize {
        let victim = self.hand;
        self.inc();
        victim
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }
}

/// Least recently used frame, lowest frame number on ties
pub struct Lru;

impl ReplacementPolicy for Lru {
    fn select_victim(&mut self, frames: &FrameTable) -> usize {
        // min_by_key keeps the first minimum, which is the lowest frame number
        frames
            .iter()
            .min_by_key(|f| f.last_used())
            .map(|f| f.frame_number())
            .unwrap_or(0)
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }
}
