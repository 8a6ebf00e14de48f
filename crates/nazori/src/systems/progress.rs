/// One slot in the progress row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMarker {
    Filled,
    Empty,
}

impl ProgressMarker {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Filled => "💗",
            Self::Empty => "🤍",
        }
    }
}

/// `done` filled markers followed by `total - done` empty ones.
pub fn progress_markers(done: usize, total: usize) -> Vec<ProgressMarker> {
    let done = done.min(total);
    let mut markers = vec![ProgressMarker::Filled; done];
    markers.resize(total, ProgressMarker::Empty);
    markers
}

/// Completed count out of a fixed total. `done` never exceeds `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTracker {
    done: usize,
    total: usize,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self { done: 0, total }
    }

    /// Count one more completion, saturating at `total`.
    pub fn increment(&mut self) {
        if self.done < self.total {
            self.done += 1;
        } else {
            log::warn!("progress already complete ({}/{})", self.done, self.total);
        }
    }

    /// (done, total).
    pub fn current(&self) -> (usize, usize) {
        (self.done, self.total)
    }

    pub fn is_complete(&self) -> bool {
        self.done >= self.total
    }

    pub fn markers(&self) -> Vec<ProgressMarker> {
        progress_markers(self.done, self.total)
    }

    /// Start a new pass of `total` items.
    pub fn reset(&mut self, total: usize) {
        self.done = 0;
        self.total = total;
    }
}
