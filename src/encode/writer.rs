use crate::EncodeOptions;

/// Accumulates `key=value` lines while the encoder walks the tree.
pub(crate) struct Writer<'o> {
    buffer: String,
    key: String,
    segments: usize,
    options: &'o EncodeOptions,
    lines: usize,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Mark {
    len: usize,
    segments: usize,
}

impl<'o> Writer<'o> {
    pub fn new(options: &'o EncodeOptions) -> Self {
        Self {
            buffer: String::new(),
            key: String::new(),
            segments: 0,
            options,
            lines: 0,
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Current key position, to hand back to [`Writer::truncate_key`].
    pub fn mark(&self) -> Mark {
        Mark {
            len: self.key.len(),
            segments: self.segments,
        }
    }

    pub fn truncate_key(&mut self, mark: Mark) {
        self.key.truncate(mark.len);
        self.segments = mark.segments;
    }

    pub fn push_name(&mut self, name: &str) {
        if self.segments > 0 {
            self.key.push_str(&self.options.delimiter);
        }
        self.key.push_str(name);
        self.segments += 1;
    }

    pub fn push_index(&mut self, index: usize) {
        let mut buf = itoa::Buffer::new();
        self.key.push('[');
        self.key.push_str(buf.format(index));
        self.key.push(']');
    }

    pub fn write_entry(&mut self, value: &str) {
        if self.lines > 0 {
            self.buffer.push_str(self.options.line_separator.as_str());
        }
        self.buffer.push_str(&self.key);
        self.buffer.push('=');
        self.buffer.push_str(value);
        self.lines += 1;
    }
}
