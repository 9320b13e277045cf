use serde::{Deserialize, Serialize};

/// Where the text of a day block came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockSource {
    /// Accepted reply from the generation service
    Generated,
    /// Canned advice substituted for a missing or invalid reply
    Fallback,
}

/// Advice for a single day. Day 0 is the flight day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBlock {
    pub day: u32,
    /// Always contains the marker `Day {day}:`
    pub text: String,
    pub source: BlockSource,
}

impl DayBlock {
    pub fn generated(day: u32, text: impl Into<String>) -> Self {
        Self {
            day,
            text: text.into(),
            source: BlockSource::Generated,
        }
    }

    pub fn fallback(day: u32, text: impl Into<String>) -> Self {
        Self {
            day,
            text: text.into(),
            source: BlockSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == BlockSource::Fallback
    }
}

/// A complete recovery plan, built fresh on every generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePlan {
    blocks: Vec<DayBlock>,
}

impl SchedulePlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next block. Callers push days in ascending order.
    pub fn push(&mut self, block: DayBlock) {
        debug_assert!(
            self.blocks.last().map_or(true, |last| last.day < block.day),
            "day blocks must be pushed in ascending order"
        );
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[DayBlock] {
        &self.blocks
    }

    pub fn block(&self, day: u32) -> Option<&DayBlock> {
        self.blocks.iter().find(|block| block.day == day)
    }

    pub fn days(&self) -> Vec<u32> {
        self.blocks.iter().map(|block| block.day).collect()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn fallback_count(&self) -> usize {
        self.blocks.iter().filter(|block| block.is_fallback()).count()
    }

    pub fn generated_count(&self) -> usize {
        self.blocks.len() - self.fallback_count()
    }

    /// The display string: blocks in day order separated by a blank line.
    pub fn render(&self) -> String {
        crate::core::prompt::render_blocks(&self.blocks)
    }
}
