/// Bytes requested per allocation attempt unless configured otherwise.
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// One owned region handed out by a [`BlockSource`].
///
/// The region is reserved up front but carries no initialized bytes until
/// [`Block::fill`] writes every one of them.
#[derive(Debug)]
pub struct Block {
    buf: Vec<u8>,
    size: usize,
}

impl Block {
    /// Reserves exactly `size` bytes from the global allocator.
    ///
    /// Returns [`None`] when the allocator refuses the request.
    pub fn reserve(size: usize) -> Option<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(size).ok()?;
        Some(Block { buf, size })
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Writes `byte` into every byte of the region.
    pub fn fill(&mut self, byte: u8) {
        // capacity is already reserved, so this never reallocates
        self.buf.clear();
        self.buf.resize(self.size, byte);
    }

    /// The initialized bytes: empty before the first fill, the whole region after.
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }
}

/// Something that can hand out fixed-size blocks until it runs dry.
pub trait BlockSource {
    fn acquire(&mut self, size: usize) -> Option<Block>;
}

impl<S: BlockSource + ?Sized> BlockSource for &mut S {
    fn acquire(&mut self, size: usize) -> Option<Block> {
        (**self).acquire(size)
    }
}

/// The process' global allocator, asked fallibly.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSource;

impl BlockSource for SystemSource {
    fn acquire(&mut self, size: usize) -> Option<Block> {
        Block::reserve(size)
    }
}

/// Wraps another source and refuses any request that would push the bytes
/// granted so far past `limit`.
#[derive(Debug)]
pub struct LimitedSource<S> {
    inner: S,
    limit: usize,
    granted: usize,
}

impl<S: BlockSource> LimitedSource<S> {
    pub fn new(inner: S, limit: usize) -> Self {
        LimitedSource {
            inner,
            limit,
            granted: 0,
        }
    }

    pub fn granted(&self) -> usize {
        self.granted
    }
}

impl<S: BlockSource> BlockSource for LimitedSource<S> {
    fn acquire(&mut self, size: usize) -> Option<Block> {
        let next = self.granted.checked_add(size)?;
        if next > self.limit {
            debug!(
                "limit reached: granted {} + {} > {}",
                self.granted, size, self.limit
            );
            return None;
        }

        let block = self.inner.acquire(size)?;
        self.granted = next;
        Some(block)
    }
}
