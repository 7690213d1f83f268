/// Absolute byte position inside a resource.
pub type Offset = u64;

/// One entry of a pellet's skip table: a byte offset and a count.
///
/// The codec writes and parses these verbatim. What they point at is
/// decided by whatever index layer produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkipPair {
    pub offset: Offset,
    pub count: u64,
}

impl SkipPair {
    /// Pair `offset` with `count`.
    pub fn new(offset: Offset, count: u64) -> Self {
        SkipPair { offset, count }
    }
}

impl From<(Offset, u64)> for SkipPair {
    fn from((offset, count): (Offset, u64)) -> Self {
        SkipPair { offset, count }
    }
}
