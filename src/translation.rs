use crate::constants::*;
use crate::error::{Result, VmError};

/// Represents the decomposed components of a Virtual Address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualAddress {
    pub va: u32,
    pub page: u32,
    pub offset: u32,
}

impl VirtualAddress {
    /// Decompose a raw VA into page number and offset
    ///
    /// Anything wider than 16 bits is rejected rather than truncated.
    pub fn from_raw(raw: u64) -> Result<Self> {
        if raw > u64::from(MAX_VIRTUAL_ADDRESS) {
            return Err(VmError::AddressOutOfRange(raw));
        }
        let va = raw as u32;

        let page = (va >> PAGE_SHIFT) & PAGE_MASK;
        let offset = va & OFFSET_MASK;

        Ok(VirtualAddress { va, page, offset })
    }

    #[inline]
    pub fn page_index(&self) -> usize {
        self.page as usize
    }

    #[inline]
    pub fn offset_index(&self) -> usize {
        self.offset as usize
    }
}

impl std::fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VA({}) = (page={}, offset={})", self.va, self.page, self.offset)
    }
}

/// Physical address of `offset` inside `frame`
#[inline]
pub fn physical_address(frame: usize, offset: u32) -> u32 {
    ((frame as u32) << OFFSET_BITS) | offset
}

/// How the TLB took part in a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlbOutcome {
    /// Mapping was served from this slot
    Hit(usize),
    /// Mapping was missing and has been installed in this slot
    Miss(usize),
}

impl TlbOutcome {
    pub fn slot(&self) -> usize {
        match *self {
            TlbOutcome::Hit(slot) | TlbOutcome::Miss(slot) => slot,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, TlbOutcome::Hit(_))
    }
}

/// Result of a successful address translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationResult {
    pub virtual_address: u32,
    pub tlb: TlbOutcome,
    pub frame: usize,
    pub physical_address: u32,
    pub value: i8,
    pub page_fault: bool,
}

/// Formats the trace line for this translation
impl std::fmt::Display for TranslationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Virtual address: {} TLB: {} Physical address: {} Value: {}",
            self.virtual_address,
            self.tlb.slot(),
            self.physical_address,
            self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_va_decomposition() {
        // 16916 = 0x4214 -> page 0x42, offset 0x14
        let va = VirtualAddress::from_raw(16916).unwrap();
        assert_eq!(va.page, 66);
        assert_eq!(va.offset, 20);
    }

    #[test]
    fn test_va_decomposition_edge_cases() {
        let va = VirtualAddress::from_raw(0).unwrap();
        assert_eq!(va.page, 0);
        assert_eq!(va.offset, 0);

        let va = VirtualAddress::from_raw(65535).unwrap();
        assert_eq!(va.page, 255);
        assert_eq!(va.offset, 255);

        let va = VirtualAddress::from_raw(256).unwrap();
        assert_eq!(va.page, 1);
        assert_eq!(va.offset, 0);
    }

    #[test]
    fn test_va_out_of_range() {
        assert!(matches!(
            VirtualAddress::from_raw(65536),
            Err(VmError::AddressOutOfRange(65536))
        ));
        assert!(matches!(
            VirtualAddress::from_raw(u64::MAX),
            Err(VmError::AddressOutOfRange(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_decode_round_trip(addr in 0u32..=65535) {
            let va = VirtualAddress::from_raw(u64::from(addr)).unwrap();
            prop_assert_eq!(va.page, addr / 256);
            prop_assert_eq!(va.offset, addr % 256);
            prop_assert_eq!(va.page * 256 + va.offset, addr);
        }
    }

    #[test]
    fn test_physical_address() {
        assert_eq!(physical_address(0, 0), 0);
        assert_eq!(physical_address(1, 0), 256);
        assert_eq!(physical_address(127, 255), 32767);
        assert_eq!(physical_address(3, 20), 3 * 256 + 20);
    }

    #[test]
    fn test_display() {
        let va = VirtualAddress::from_raw(16916).unwrap();
        let display = format!("{}", va);
        assert!(display.contains("16916"));
        assert!(display.contains("page=66"));
        assert!(display.contains("offset=20"));
    }

    #[test]
    fn test_trace_line_format() {
        let result = TranslationResult {
            virtual_address: 16916,
            tlb: TlbOutcome::Miss(0),
            frame: 0,
            physical_address: 20,
            value: 0,
            page_fault: true,
        };
        assert_eq!(
            result.to_string(),
            "Virtual address: 16916 TLB: 0 Physical address: 20 Value: 0"
        );

        let hit = TranslationResult { tlb: TlbOutcome::Hit(7), value: -1, ..result };
        assert_eq!(
            hit.to_string(),
            "Virtual address: 16916 TLB: 7 Physical address: 20 Value: -1"
        );
    }

    #[test]
    fn test_tlb_outcome() {
        assert!(TlbOutcome::Hit(3).is_hit());
        assert!(!TlbOutcome::Miss(3).is_hit());
        assert_eq!(TlbOutcome::Miss(9).slot(), 9);
    }
}
