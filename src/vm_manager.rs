use std::io::{Read, Seek, Write};

use log::{debug, info, warn};

use crate::error::{Result, VmError};
use crate::memory::{BackingStore, FrameTable, PageTable};
use crate::replacement::{PolicyKind, ReplacementPolicy};
use crate::tlb::Tlb;
use crate::translation::{physical_address, TlbOutcome, TranslationResult, VirtualAddress};

/// Run configuration, fixed for the lifetime of an engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub policy: PolicyKind,
    /// Leave TLB entries of evicted pages in place, so they can still hit
    pub keep_stale_tlb: bool,
}

/// Counters accumulated over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub translated: u64,
    pub page_faults: u64,
    pub tlb_hits: u64,
    /// Addresses skipped because they did not fit in 16 bits
    pub rejected: u64,
}

impl Stats {
    pub fn page_fault_rate(&self) -> Result<f64> {
        self.rate(self.page_faults)
    }

    pub fn tlb_hit_rate(&self) -> Result<f64> {
        self.rate(self.tlb_hits)
    }

    fn rate(&self, count: u64) -> Result<f64> {
        if self.translated == 0 {
            return Err(VmError::EmptyRun);
        }
        Ok(count as f64 / self.translated as f64)
    }
}

/// Owns all translation state for one run
pub struct TranslationEngine<R> {
    config: EngineConfig,
    tlb: Tlb,
    page_table: PageTable,
    frames: FrameTable,
    policy: Box<dyn ReplacementPolicy>,
    store: BackingStore<R>,
    clock: u64,
    stats: Stats,
}

impl<R: Read + Seek> TranslationEngine<R> {
    pub fn new(config: EngineConfig, store: BackingStore<R>) -> Self {
        TranslationEngine {
            config,
            tlb: Tlb::new(),
            page_table: PageTable::new(),
            frames: FrameTable::new(),
            policy: config.policy.build(),
            store,
            clock: 0,
            stats: Stats::default(),
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn tlb(&self) -> &Tlb {
        &self.tlb
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn frames(&self) -> &FrameTable {
        &self.frames
    }

    /// Translate one raw virtual address
    ///
    /// An out-of-range address leaves every table and counter untouched.
    pub fn translate(&mut self, raw: u64) -> Result<TranslationResult> {
        let va = VirtualAddress::from_raw(raw)?;
        let page = va.page_index();

        let (tlb, frame, page_fault) = match self.tlb.lookup(page) {
            Some((slot, frame)) => {
                self.stats.tlb_hits += 1;
                (TlbOutcome::Hit(slot), frame, false)
            }
            None => {
                let (frame, page_fault) = match self.page_table.lookup(page) {
                    Some(frame) => (frame, false),
                    None => (self.handle_page_fault(page)?, true),
                };
                let slot = self.tlb.insert(page, frame);
                (TlbOutcome::Miss(slot), frame, page_fault)
            }
        };

        let physical_address = physical_address(frame, va.offset);
        let value = self.frames.read(frame, va.offset_index());

        self.clock += 1;
        self.frames.touch(frame, self.clock);
        self.stats.translated += 1;

        Ok(TranslationResult {
            virtual_address: va.va,
            tlb,
            frame,
            physical_address,
            value,
            page_fault,
        })
    }

    /// Load `page` into a victim frame and map it, returning the frame
    fn handle_page_fault(&mut self, page: usize) -> Result<usize> {
        self.stats.page_faults += 1;

        let victim = self.policy.select_victim(&self.frames);
        // read before touching any table so a failed read leaves state intact
        let data = self.store.read_page(page)?;
        self.frames.load(victim, page, &data);

        if let Some(evicted) = self.page_table.bind(page, victim) {
            debug!("page {} evicted from frame {} for page {}", evicted, victim, page);
            if !self.config.keep_stale_tlb {
                if let Some(slot) = self.tlb.invalidate_page(evicted) {
                    debug!("invalidated TLB slot {} for page {}", slot, evicted);
                }
            }
        } else {
            debug!("page {} loaded into frame {}", page, victim);
        }

        Ok(victim)
    }

    /// Translate `addresses` in order, writing one trace line per translation
    ///
    /// Out-of-range addresses are logged, counted and skipped. Any other error
    /// stops the run before a line is written for the failing address.
    pub fn run<W: Write>(&mut self, addresses: &[u64], out: &mut W) -> Result<Stats> {
        info!(
            "translating {} addresses with {} replacement",
            addresses.len(),
            self.policy.kind()
        );

        for &raw in addresses {
            match self.translate(raw) {
                Ok(result) => writeln!(out, "{}", result)?,
                Err(e) if e.is_per_address() => {
                    warn!("skipping address: {}", e);
                    self.stats.rejected += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "done: {} translated, {} page faults, {} TLB hits, {} rejected, {} pages read, {} resident, {} frames occupied",
            self.stats.translated,
            self.stats.page_faults,
            self.stats.tlb_hits,
            self.stats.rejected,
            self.store.reads(),
            self.page_table.resident_count(),
            self.frames.occupied_count()
        );
        Ok(self.stats)
    }
}
