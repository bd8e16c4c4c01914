use css_cascade::ComputedStyle;

/// How much of a cached entry is still usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CacheState {
    Fresh,
    /// Interactive state changed: re-filter the cached candidates.
    PseudoDirty,
    /// Anything may have changed: rescan the stylesheet.
    Dirty,
}

/// Identity of the stylesheet contents an entry was computed against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SheetStamp {
    pub epoch: u64,
    pub version: u64,
}

/// Per-node computed style and what it was computed from.
#[derive(Clone, Debug)]
pub(crate) struct CacheEntry {
    pub style: ComputedStyle,
    /// Style as of the last `restyle` report. Transition requests are the
    /// difference between this and `style`, whoever recomputed the node.
    pub reported: ComputedStyle,
    /// Rules matching with pseudo-classes ignored, in cascade order.
    pub candidates: Vec<usize>,
    pub sheet: SheetStamp,
    pub globals_version: u64,
    pub inline_version: u64,
    pub parent_key: Option<u64>,
    /// Parent's `generation` when this entry was computed.
    pub parent_generation: u64,
    /// Parent's `match_generation` when this entry was computed.
    pub parent_match_generation: u64,
    /// Bumped on every recomputation.
    pub generation: u64,
    /// Bumped when `candidates` were rebuilt from a stylesheet scan.
    pub match_generation: u64,
    pub state: CacheState,
}
