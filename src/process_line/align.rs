use crate::{base::Base, depth::BaseCounts};

/// Handling of indel markers in the alignment string
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct AlignOpts {
    // Treat '-' as a marker in the same way as '+'.  If false, '-' is ignored like any
    // other non-base character
    skip_deletions: bool,
    // Read the length after the marker and skip that many bases rather than the fixed two
    // characters following the marker
    indel_length: bool,
}

impl AlignOpts {
    pub fn new(skip_deletions: bool, indel_length: bool) -> Self {
        Self {
            skip_deletions,
            indel_length,
        }
    }

    pub fn skip_deletions(&self) -> bool {
        self.skip_deletions
    }

    pub fn indel_length(&self) -> bool {
        self.indel_length
    }
}

// Characters skipped after an indel marker in fixed mode
const FIXED_INDEL_SKIP: usize = 2;

/// Scan an alignment string, returning the forward and reverse counts.
///
/// '.' and ',' are matches to the reference on the forward and reverse strand respectively,
/// ACGTN are forward strand mismatches, acgtn are reverse strand mismatches. An indel marker
/// and the characters attached to it are skipped and add nothing to the counts. Everything
/// else (read start/end markers, mapping qualities, '*' placeholders etc.) is ignored.
pub fn scan_alignment(ref_base: Base, s: &[u8], opts: &AlignOpts) -> (BaseCounts, BaseCounts) {
    let mut fwd = BaseCounts::new();
    let mut rev = BaseCounts::new();

    let mut i = 0;
    while i < s.len() {
        let c = s[i];
        match c {
            b'.' => fwd.incr(ref_base),
            b',' => rev.incr(ref_base),
            b'+' => {
                i = skip_indel(s, i, opts);
                continue;
            }
            b'-' if opts.skip_deletions() => {
                i = skip_indel(s, i, opts);
                continue;
            }
            _ => {
                if let Some(b) = Base::from_upper(c) {
                    fwd.incr(b)
                } else if let Some(b) = Base::from_upper(c.to_ascii_uppercase()) {
                    rev.incr(b)
                }
            }
        }
        i += 1;
    }
    (fwd, rev)
}

/// Return the position of the first character after the indel marker at position i
fn skip_indel(s: &[u8], i: usize, opts: &AlignOpts) -> usize {
    let x = i + 1;
    let skip = if opts.indel_length() {
        let digits = s[x..].iter().take_while(|c| c.is_ascii_digit()).count();
        let l = s[x..x + digits]
            .iter()
            .fold(0usize, |l, c| l.saturating_mul(10).saturating_add((c - b'0') as usize));
        digits.saturating_add(l)
    } else {
        FIXED_INDEL_SKIP
    };
    x.saturating_add(skip).min(s.len())
}
