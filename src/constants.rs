pub const PAGE_NUMBER_BITS: u32 = 8;
pub const OFFSET_BITS: u32 = 8;

pub const PAGE_SIZE: usize = 1 << OFFSET_BITS;
pub const FRAME_SIZE: usize = PAGE_SIZE;
pub const NUM_PAGES: usize = 1 << PAGE_NUMBER_BITS;
pub const NUM_FRAMES: usize = 128;

pub const PM_SIZE: usize = NUM_FRAMES * FRAME_SIZE;
pub const BACKING_STORE_SIZE: usize = NUM_PAGES * PAGE_SIZE;

pub const TLB_SIZE: usize = 16;

pub const OFFSET_MASK: u32 = (1 << OFFSET_BITS) - 1;
pub const PAGE_MASK: u32 = (1 << PAGE_NUMBER_BITS) - 1;
pub const PAGE_SHIFT: u32 = OFFSET_BITS;

// largest address a 16-bit virtual address space can hold
pub const MAX_VIRTUAL_ADDRESS: u32 = (1 << (PAGE_NUMBER_BITS + OFFSET_BITS)) - 1;

pub const DEFAULT_BACKING_STORE: &str = "BACKING_STORE.bin";
pub const DEFAULT_ADDRESS_FILE: &str = "addresses.txt";
