/// A track header drag. `over` follows the pointer; the splice happens on
/// release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackReorder {
    pub from: usize,
    pub over: usize,
}

impl TrackReorder {
    pub fn new(from: usize) -> Self {
        Self { from, over: from }
    }

    pub fn is_noop(&self) -> bool {
        self.from == self.over
    }
}
