use crate::constants::TLB_SIZE;

/// A cached page -> frame mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlbEntry {
    pub page: usize,
    pub frame: usize,
}

/// Translation lookaside buffer
///
/// Slots are refilled in circular order no matter which replacement policy
/// main memory uses.
pub struct Tlb {
    entries: [Option<TlbEntry>; TLB_SIZE],
    next_slot: usize,
}

impl Tlb {
    pub fn new() -> Self {
        Tlb {
            entries: [None; TLB_SIZE],
            next_slot: 0,
        }
    }

    /// Find `page`, returning the slot and frame of the first match
    pub fn lookup(&self, page: usize) -> Option<(usize, usize)> {
        self.entries
            .iter()
            .enumerate()
            .find_map(|(slot, entry)| match entry {
                Some(e) if e.page == page => Some((slot, e.frame)),
                _ => None,
            })
    }

    /// Write a mapping into the next slot in circular order, returning that slot
    pub fn insert(&mut self, page: usize, frame: usize) -> usize {
        let slot = self.next_slot;
        self.entries[slot] = Some(TlbEntry { page, frame });
        self.next_slot = (self.next_slot + 1) % TLB_SIZE;
        slot
    }

    /// Drop the entry for `page`, if cached. The insertion cursor is untouched.
    pub fn invalidate_page(&mut self, page: usize) -> Option<usize> {
        let (slot, _) = self.lookup(page)?;
        self.entries[slot] = None;
        Some(slot)
    }

    #[inline]
    pub fn next_slot(&self) -> usize {
        self.next_slot
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Tlb {
    fn default() -> Self {
        Self::new()
    }
}
