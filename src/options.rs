pub const DEFAULT_DELIMITER: &str = ".";
pub const DEFAULT_MAX_INDEX: usize = 1 << 16;

/// Separator between input lines.
///
/// Never sniffed from the content: text using the other convention is read as
/// a single line and usually fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSeparator {
    Lf,
    CrLf,
}

impl LineSeparator {
    pub const fn host() -> Self {
        if cfg!(windows) {
            LineSeparator::CrLf
        } else {
            LineSeparator::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineSeparator::Lf => "\n",
            LineSeparator::CrLf => "\r\n",
        }
    }
}

impl Default for LineSeparator {
    fn default() -> Self {
        Self::host()
    }
}

/// What to do with a segment like `name[0` or `name[x]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedIndex {
    /// Keep the raw segment text, brackets included, as a plain map key.
    #[default]
    Literal,
    /// Drop the whole entry.
    Skip,
    /// Fail the conversion with an invalid-format error.
    Reject,
}

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub delimiter: String,
    pub line_separator: LineSeparator,
    pub malformed_index: MalformedIndex,
    /// When false, blank lines are ignored instead of failing validation.
    pub strict: bool,
    pub max_index: usize,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_line_separator(mut self, line_separator: LineSeparator) -> Self {
        self.line_separator = line_separator;
        self
    }

    pub fn with_malformed_index(mut self, malformed_index: MalformedIndex) -> Self {
        self.malformed_index = malformed_index;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_max_index(mut self, max_index: usize) -> Self {
        self.max_index = max_index;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            line_separator: LineSeparator::default(),
            malformed_index: MalformedIndex::default(),
            strict: true,
            max_index: DEFAULT_MAX_INDEX,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EncodeOptions {
    pub delimiter: String,
    pub line_separator: LineSeparator,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_line_separator(mut self, line_separator: LineSeparator) -> Self {
        self.line_separator = line_separator;
        self
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            line_separator: LineSeparator::default(),
        }
    }
}

impl From<&ConvertOptions> for EncodeOptions {
    fn from(options: &ConvertOptions) -> Self {
        Self {
            delimiter: options.delimiter.clone(),
            line_separator: options.line_separator,
        }
    }
}
