use std::fmt;

use crate::base::{Base, N_BASES};

/// Which reads a set of counts refers to.  The Display impl gives the suffix used in the
/// depth chart column names.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DepthGroup {
    All,
    Forward,
    Reverse,
}

impl DepthGroup {
    pub const ALL: [DepthGroup; 3] = [Self::All, Self::Forward, Self::Reverse];
}

impl fmt::Display for DepthGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::All => "All",
                Self::Forward => "F",
                Self::Reverse => "R",
            }
        )
    }
}

/// Per base depth counts in ACGTN order
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BaseCounts {
    counts: [u32; N_BASES],
}

impl BaseCounts {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn incr(&mut self, b: Base) {
        self.counts[b.idx()] += 1
    }

    #[inline]
    pub fn get(&self, b: Base) -> u32 {
        self.counts[b.idx()]
    }

    #[inline]
    pub fn counts(&self) -> &[u32; N_BASES] {
        &self.counts
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Base with the strictly highest count.  Ties go to the first base in ACGTN order, so an
    /// empty (all zero) set of counts gives A.
    pub fn majority(&self) -> Base {
        let mut best = (Base::A, 0);
        for b in Base::ALL {
            let ct = self.get(b);
            if ct > best.1 {
                best = (b, ct)
            }
        }
        best.0
    }

    fn sum(&self, other: &Self) -> Self {
        let mut counts = self.counts;
        for (c1, c2) in counts.iter_mut().zip(other.counts.iter()) {
            *c1 += *c2
        }
        Self { counts }
    }
}

impl From<[u32; N_BASES]> for BaseCounts {
    fn from(counts: [u32; N_BASES]) -> Self {
        Self { counts }
    }
}

/// Depth information for one reference position (one line of the pileup).  The combined
/// counts are always the sum of the forward and reverse counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRecord {
    position: u64,
    ref_base: Base,
    fwd: BaseCounts,
    rev: BaseCounts,
    total: BaseCounts,
}

impl PositionRecord {
    pub fn new(position: u64, ref_base: Base, fwd: BaseCounts, rev: BaseCounts) -> Self {
        let total = fwd.sum(&rev);
        Self {
            position,
            ref_base,
            fwd,
            rev,
            total,
        }
    }

    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    #[inline]
    pub fn ref_base(&self) -> Base {
        self.ref_base
    }

    #[inline]
    pub fn counts(&self, g: DepthGroup) -> &BaseCounts {
        match g {
            DepthGroup::All => &self.total,
            DepthGroup::Forward => &self.fwd,
            DepthGroup::Reverse => &self.rev,
        }
    }

    /// Depth at the reference base for group g
    #[inline]
    pub fn ref_depth(&self, g: DepthGroup) -> u32 {
        self.counts(g).get(self.ref_base)
    }
}
