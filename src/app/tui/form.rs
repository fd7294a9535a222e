use super::super::range::{EndIndex, RangeSelection};
use super::super::stats::PlaybackSpeed;

pub(crate) const SPEED_PRESETS: [f64; 10] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0, 2.5, 3.0];
const NORMAL_SPEED_IDX: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Start,
    End,
    Speed,
}

impl FormField {
    pub(crate) const ALL: [Self; 3] = [Self::Start, Self::End, Self::Speed];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::End => "End",
            Self::Speed => "Speed",
        }
    }

    pub(crate) fn move_up(self) -> Self {
        match self {
            Self::Start => Self::Start,
            Self::End => Self::Start,
            Self::Speed => Self::End,
        }
    }

    pub(crate) fn move_down(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Speed,
            Self::Speed => Self::Speed,
        }
    }
}

/// Range and speed picker state. Positions are 1-based and kept within `1..=total`
/// with `start <= end`; both are 0 while the playlist is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RangeForm {
    total: usize,
    start: usize,
    end: usize,
    speed_idx: usize,
    pub(crate) field: FormField,
}

impl RangeForm {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            total,
            start: total.min(1),
            end: total,
            speed_idx: NORMAL_SPEED_IDX,
            field: FormField::Start,
        }
    }

    pub(crate) fn total(&self) -> usize {
        self.total
    }

    pub(crate) fn start(&self) -> usize {
        self.start
    }

    pub(crate) fn end(&self) -> usize {
        self.end
    }

    pub(crate) fn speed(&self) -> PlaybackSpeed {
        PlaybackSpeed::new(SPEED_PRESETS[self.speed_idx]).unwrap_or_default()
    }

    /// Applies a new item count. An end that sat on the last item follows the new last item.
    pub(crate) fn set_total(&mut self, total: usize) {
        let was_at_last = self.end == self.total;
        self.total = total;
        if total == 0 {
            self.start = 0;
            self.end = 0;
            return;
        }
        self.end = if was_at_last {
            total
        } else {
            self.end.clamp(1, total)
        };
        self.start = self.start.clamp(1, self.end);
    }

    pub(crate) fn step(&mut self, delta: isize) {
        match self.field {
            FormField::Start => {
                if self.total == 0 {
                    return;
                }
                self.start = offset(self.start, delta, self.total);
                self.end = self.end.max(self.start);
            }
            FormField::End => {
                if self.total == 0 {
                    return;
                }
                self.end = offset(self.end, delta, self.total);
                self.start = self.start.min(self.end);
            }
            FormField::Speed => {
                let last = SPEED_PRESETS.len() - 1;
                self.speed_idx = self.speed_idx.saturating_add_signed(delta).min(last);
            }
        }
    }

    pub(crate) fn jump_first(&mut self) {
        self.step(isize::MIN);
    }

    pub(crate) fn jump_last(&mut self) {
        self.step(isize::MAX);
    }

    pub(crate) fn selection(&self) -> Option<RangeSelection> {
        (self.total > 0).then(|| RangeSelection::new(self.start, EndIndex::At(self.end)))
    }

    pub(crate) fn value_text(&self, field: FormField) -> String {
        if self.total == 0 && field != FormField::Speed {
            return "-".to_string();
        }
        match field {
            FormField::Start if self.start == 1 => "1 (First)".to_string(),
            FormField::Start => self.start.to_string(),
            FormField::End if self.end == self.total => format!("{} (Last)", self.end),
            FormField::End => self.end.to_string(),
            FormField::Speed => format!("{}x", self.speed()),
        }
    }
}

fn offset(value: usize, delta: isize, max: usize) -> usize {
    value.saturating_add_signed(delta).clamp(1, max)
}
