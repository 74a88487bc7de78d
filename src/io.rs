use std::fs;
use std::io::Write;
use std::num::IntErrorKind;
use std::path::Path;

use crate::error::{Result, VmError};
use crate::vm_manager::Stats;

/// Read the address list, one decimal address per line
pub fn read_virtual_addresses<P: AsRef<Path>>(path: P) -> Result<Vec<u64>> {
    let content = fs::read_to_string(path.as_ref()).map_err(|source| VmError::InputIo {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    parse_virtual_addresses(&content)
}

/// Parse addresses, skipping blank lines
///
/// Range checking is left to the translator so that oversized values are
/// reported per address instead of failing the whole list. Digit strings too
/// long for a `u64` saturate to `u64::MAX`, which is still out of range.
pub fn parse_virtual_addresses(content: &str) -> Result<Vec<u64>> {
    let mut addresses = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        let va = match token.parse::<u64>() {
            Ok(va) => va,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => u64::MAX,
            Err(_) => {
                return Err(VmError::MalformedAddress {
                    line: idx + 1,
                    text: token.to_string(),
                });
            }
        };
        addresses.push(va);
    }
    Ok(addresses)
}

/// Write the end-of-run summary block
pub fn write_summary<W: Write>(out: &mut W, stats: &Stats) -> Result<()> {
    let fault_rate = stats.page_fault_rate()?;
    let hit_rate = stats.tlb_hit_rate()?;

    writeln!(out, "Number of Translated Addresses = {}", stats.translated)?;
    writeln!(out, "Page Faults = {}", stats.page_faults)?;
    writeln!(out, "Page Fault Rate = {:.3}", fault_rate)?;
    writeln!(out, "TLB Hits = {}", stats.tlb_hits)?;
    writeln!(out, "TLB Hit Rate = {:.3}", hit_rate)?;
    Ok(())
}
