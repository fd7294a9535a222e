use std::str::FromStr;

/// Last video of a range: a 1-based position, or "through the end of the playlist".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndIndex {
    At(usize),
    Last,
}

impl EndIndex {
    pub(crate) fn resolve(self, len: usize) -> usize {
        match self {
            Self::At(index) => index,
            Self::Last => len,
        }
    }
}

impl FromStr for EndIndex {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "-1" | "last" | "end" => return Ok(Self::Last),
            _ => {}
        }
        match trimmed.parse::<usize>() {
            Ok(index) if index > 0 => Ok(Self::At(index)),
            _ => Err(format!(
                "expected a positive position, `-1` or `last`, got {raw:?}"
            )),
        }
    }
}

/// 1-based inclusive range of playlist positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RangeSelection {
    pub(crate) start: usize,
    pub(crate) end: EndIndex,
}

impl RangeSelection {
    pub(crate) fn new(start: usize, end: EndIndex) -> Self {
        Self { start, end }
    }

    /// End position after the sentinel is resolved against `len`.
    pub(crate) fn resolved_end(&self, len: usize) -> usize {
        self.end.resolve(len)
    }

    /// The selected slice. Out-of-range bounds are clipped; a start past the end
    /// of the list gives an empty slice.
    pub(crate) fn select<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let from = self.start.saturating_sub(1);
        let to = self.resolved_end(items.len()).min(items.len());
        if from >= to {
            return &[];
        }
        &items[from..to]
    }
}
