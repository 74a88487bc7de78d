use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use crate::constants::*;
use crate::error::{Result, VmError};

/// One physical frame: a page worth of bytes plus bookkeeping
#[derive(Debug, Clone)]
pub struct Frame {
    data: [u8; FRAME_SIZE],
    frame_number: usize,
    /// Logical clock value of the most recent access, 0 if never touched
    last_used: u64,
    /// Page currently loaded in this frame
    occupant: Option<usize>,
}

impl Frame {
    fn new(frame_number: usize) -> Self {
        Frame {
            data: [0u8; FRAME_SIZE],
            frame_number,
            last_used: 0,
            occupant: None,
        }
    }

    #[inline]
    pub fn frame_number(&self) -> usize {
        self.frame_number
    }

    #[inline]
    pub fn last_used(&self) -> u64 {
        self.last_used
    }

    #[inline]
    pub fn occupant(&self) -> Option<usize> {
        self.occupant
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Physical memory, addressed by frame number
pub struct FrameTable {
    frames: Vec<Frame>,
}

impl FrameTable {
    /// Create all frames zero-filled and unoccupied
    pub fn new() -> Self {
        let frames = (0..NUM_FRAMES).map(Frame::new).collect();
        FrameTable { frames }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn frame(&self, frame: usize) -> &Frame {
        &self.frames[frame]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Read the byte at `offset`, interpreted as a signed byte
    #[inline]
    pub fn read(&self, frame: usize, offset: usize) -> i8 {
        self.frames[frame].data[offset] as i8
    }

    /// Replace a frame's contents with `page`'s bytes
    pub fn load(&mut self, frame: usize, page: usize, data: &[u8; FRAME_SIZE]) {
        let f = &mut self.frames[frame];
        f.data.copy_from_slice(data);
        f.occupant = Some(page);
    }

    /// Record an access at logical time `clock`
    #[inline]
    pub fn touch(&mut self, frame: usize, clock: u64) {
        self.frames[frame].last_used = clock;
    }

    pub fn occupied_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_occupied()).count()
    }
}

impl Default for FrameTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Page number -> resident frame, with the inverse kept alongside
pub struct PageTable {
    entries: [Option<usize>; NUM_PAGES],
    owners: [Option<usize>; NUM_FRAMES],
}

impl PageTable {
    /// Create a page table with every page unmapped
    pub fn new() -> Self {
        PageTable {
            entries: [None; NUM_PAGES],
            owners: [None; NUM_FRAMES],
        }
    }

    #[inline]
    pub fn lookup(&self, page: usize) -> Option<usize> {
        self.entries[page]
    }

    /// Page currently mapped to `frame`
    #[inline]
    pub fn owner(&self, frame: usize) -> Option<usize> {
        self.owners[frame]
    }

    /// Map `page` to `frame`, returning the page that previously held the frame
    ///
    /// The previous occupant is unmapped in the same step so no frame is ever
    /// shared by two pages.
    pub fn bind(&mut self, page: usize, frame: usize) -> Option<usize> {
        let evicted = self.owners[frame].take().filter(|&p| p != page);
        if let Some(prev) = evicted {
            self.entries[prev] = None;
        }

        if let Some(old_frame) = self.entries[page] {
            if old_frame != frame {
                self.owners[old_frame] = None;
            }
        }

        self.entries[page] = Some(frame);
        self.owners[frame] = Some(page);
        evicted
    }

    /// Unmap `page`, returning the frame it occupied
    pub fn unbind(&mut self, page: usize) -> Option<usize> {
        let frame = self.entries[page].take()?;
        self.owners[frame] = None;
        Some(frame)
    }

    pub fn resident_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Secondary storage, read one page at a time
pub struct BackingStore<R> {
    reader: R,
    reads: usize,
}

impl BackingStore<File> {
    /// Open a backing store file, kept open for the whole run
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|source| VmError::BackingStoreOpen {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Ok(BackingStore::new(file))
    }
}

impl BackingStore<Cursor<Vec<u8>>> {
    /// Backing store held in memory
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        BackingStore::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> BackingStore<R> {
    pub fn new(reader: R) -> Self {
        BackingStore { reader, reads: 0 }
    }

    /// Read the bytes of `page`, failing on a short read
    pub fn read_page(&mut self, page: usize) -> Result<[u8; PAGE_SIZE]> {
        let mut buf = [0u8; PAGE_SIZE];
        self.reader
            .seek(SeekFrom::Start((page * PAGE_SIZE) as u64))
            .and_then(|_| self.reader.read_exact(&mut buf))
            .map_err(|source| VmError::BackingStore { page, source })?;
        self.reads += 1;
        Ok(buf)
    }

    /// Number of pages successfully read so far
    pub fn reads(&self) -> usize {
        self.reads
    }
}
