use std::fmt;

/// Number of distinct bases tracked per position
pub const N_BASES: usize = 5;

/// Nucleotide called at a position.  The ordering A < C < G < T < N is fixed and is used both
/// for output column order and for breaking ties in the majority vote.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Base {
    A,
    C,
    G,
    T,
    N,
}

const BASE_CHARS: [char; N_BASES] = ['A', 'C', 'G', 'T', 'N'];

impl Base {
    pub const ALL: [Base; N_BASES] = [Self::A, Self::C, Self::G, Self::T, Self::N];

    /// Index of base into count arrays
    #[inline]
    pub fn idx(self) -> usize {
        match self {
            Self::A => 0,
            Self::C => 1,
            Self::G => 2,
            Self::T => 3,
            Self::N => 4,
        }
    }

    /// Classify an upper case base character.  Lower case characters and anything outside of
    /// ACGTN give None.
    #[inline]
    pub fn from_upper(c: u8) -> Option<Self> {
        match c {
            b'A' => Some(Self::A),
            b'C' => Some(Self::C),
            b'G' => Some(Self::G),
            b'T' => Some(Self::T),
            b'N' => Some(Self::N),
            _ => None,
        }
    }

    #[inline]
    pub fn as_char(self) -> char {
        BASE_CHARS[self.idx()]
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
