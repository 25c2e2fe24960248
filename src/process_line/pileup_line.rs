use crate::base::Base;

/// The fields of a pileup line used to build a depth record.  The contig name, the depth
/// column and the quality string are checked for presence only.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct PileupLine<'a> {
    pub(crate) position: u64,
    pub(crate) ref_base: Base,
    pub(crate) align: &'a [u8],
}

const FIELD_NAMES: [&str; 5] = ["contig", "position", "reference base", "depth", "alignment"];

/// Split a pileup line into its tab separated fields.  At least 5 fields are required; the
/// alignment field can be empty (no coverage) and anything after it is ignored.  The line is
/// treated as bytes, so the contig and quality fields can hold any encoding.
pub(crate) fn parse_pileup_line(line: &[u8]) -> anyhow::Result<PileupLine<'_>> {
    let mut fields = [&b""[..]; 5];
    let mut itr = line.split(|c| *c == b'\t');
    for (f, name) in fields.iter_mut().zip(FIELD_NAMES.iter()) {
        *f = itr
            .next()
            .ok_or_else(|| anyhow!("Missing {} field", name))?;
    }

    let pos = String::from_utf8_lossy(fields[1]);
    let position = match pos.parse::<u64>() {
        Ok(0) => Err(anyhow!("Position must be 1-based, got 0")),
        Ok(x) => Ok(x),
        Err(e) => Err(anyhow!("Could not parse position '{}': {}", pos, e)),
    }?;

    let ref_base = parse_ref_base(fields[2])?;

    Ok(PileupLine {
        position,
        ref_base,
        align: fields[4],
    })
}

fn parse_ref_base(s: &[u8]) -> anyhow::Result<Base> {
    match s {
        [c] => Base::from_upper(c.to_ascii_uppercase()).ok_or_else(|| {
            anyhow!(
                "Unrecognized reference base '{}'",
                String::from_utf8_lossy(s)
            )
        }),
        _ => Err(anyhow!(
            "Reference base field '{}' is not a single character",
            String::from_utf8_lossy(s)
        )),
    }
}
