//! Cache line state.

/// One line of a cache set: validity, tag, and an LRU recency counter.
///
/// Recency is a staleness counter: 1 means "just touched" and larger values
/// mean older. It is only meaningful while the line is valid. Lines start
/// invalid and, once filled, are never invalidated again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    pub(crate) tag: u64,
    pub(crate) valid: bool,
    pub(crate) recency: u64,
}

impl CacheLine {
    /// Recency value of a line that was just filled or hit.
    pub const MRU: u64 = 1;

    /// Tag currently held (0 while invalid).
    #[inline(always)]
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Whether the line holds a block.
    #[inline(always)]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Staleness counter; lower is more recently used.
    #[inline(always)]
    pub const fn recency(&self) -> u64 {
        self.recency
    }

    #[inline(always)]
    pub(crate) const fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }

    /// Installs `tag` as the most recently used block.
    #[inline(always)]
    pub(crate) const fn fill(&mut self, tag: u64) {
        self.valid = true;
        self.tag = tag;
        self.recency = Self::MRU;
    }
}
