//! Line accumulation state machine shared by the title strategies.

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Still reading lines.
    Accumulating,
    /// No further line will be taken.
    Terminated,
}

/// Decision for one line, taken by a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
    /// Ignore the line and keep scanning.
    Skip,
    /// Take the line and keep scanning.
    Append,
    /// Take the line, then terminate.
    AppendAndStop,
    /// Terminate without taking the line.
    Stop,
}

/// Accumulates title lines until a strategy says stop or the line cap is hit.
///
/// The scanner never touches I/O: it is driven over any line iterator, and
/// the per-line decision comes from a closure that sees the line and the
/// lines accumulated so far.
#[derive(Debug, Clone)]
pub struct TitleScanner<'a> {
    state: ScanState,
    lines: Vec<&'a str>,
    max_lines: Option<usize>,
}

impl<'a> TitleScanner<'a> {
    /// Create an empty scanner with no line cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ScanState::Accumulating,
            lines: Vec::new(),
            max_lines: None,
        }
    }

    /// Terminate as soon as `max_lines` lines have been taken.
    #[must_use]
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self.check_cap();
        self
    }

    /// Seed the scanner with an already accepted first line.
    #[must_use]
    pub fn seeded(mut self, line: &'a str) -> Self {
        self.feed(line, LineAction::Append);
        self
    }

    #[must_use]
    pub fn state(&self) -> ScanState {
        self.state
    }

    #[must_use]
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Apply one decision. Lines fed after termination are ignored.
    pub fn feed(&mut self, line: &'a str, action: LineAction) -> ScanState {
        if self.state == ScanState::Terminated {
            return self.state;
        }

        match action {
            LineAction::Skip => {}
            LineAction::Append => {
                self.lines.push(line);
                self.check_cap();
            }
            LineAction::AppendAndStop => {
                self.lines.push(line);
                self.state = ScanState::Terminated;
            }
            LineAction::Stop => self.state = ScanState::Terminated,
        }

        self.state
    }

    /// Drive the scanner over `lines`, asking `decide` about each one.
    ///
    /// Consumption is lazy: no line after termination is pulled from the
    /// iterator.
    #[must_use]
    pub fn run<I, F>(mut self, lines: I, mut decide: F) -> Self
    where
        I: IntoIterator<Item = &'a str>,
        F: FnMut(&str, &[&'a str]) -> LineAction,
    {
        if self.state == ScanState::Terminated {
            return self;
        }
        for line in lines {
            let action = decide(line, &self.lines);
            if self.feed(line, action) == ScanState::Terminated {
                break;
            }
        }
        self
    }

    /// Join the accumulated lines with single spaces, collapsing inner
    /// whitespace. `None` when nothing was accumulated.
    #[must_use]
    pub fn into_title(self) -> Option<String> {
        let joined = self
            .lines
            .iter()
            .flat_map(|line| line.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ");
        (!joined.is_empty()).then_some(joined)
    }

    fn check_cap(&mut self) {
        if self.max_lines.is_some_and(|max| self.lines.len() >= max) {
            self.state = ScanState::Terminated;
        }
    }
}

impl Default for TitleScanner<'_> {
    fn default() -> Self {
        Self::new()
    }
}
