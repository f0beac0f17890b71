use teloxide::utils::html;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelField {
    /// Plain text, escaped when rendered.
    pub name: String,
    /// Already HTML formatted.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub title: String,
    pub fields: Vec<PanelField>,
}

impl Panel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(PanelField {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn to_html(&self) -> String {
        let mut out = html::bold(&html::escape(&self.title));
        for field in &self.fields {
            out.push_str("\n\n");
            out.push_str(&html::bold(&html::escape(&field.name)));
            out.push('\n');
            out.push_str(field.value.trim_end());
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedMessage {
    Panel(Panel),
    Text(String),
}

/// Telegram's cap on one message, in UTF-16 code units.
pub const MESSAGE_LIMIT: usize = 4096;

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Cuts `text` into messages of at most `limit` UTF-16 units, breaking
/// between lines. Every digest line is self-contained markup, so HTML stays
/// balanced unless a single line is over the limit on its own.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut lines: Vec<&str> = Vec::new();
    let mut len = 0;

    for line in text.split('\n') {
        let line_len = utf16_len(line);
        let needed = if lines.is_empty() { line_len } else { len + 1 + line_len };

        if needed > limit && !lines.is_empty() {
            chunks.push(lines.join("\n"));
            lines.clear();
            len = 0;
        }

        if line_len > limit {
            let mut piece = String::new();
            for c in line.chars() {
                if utf16_len(&piece) + c.len_utf16() > limit {
                    chunks.push(std::mem::take(&mut piece));
                }
                piece.push(c);
            }
            chunks.push(piece);
            continue;
        }

        len = if lines.is_empty() { line_len } else { len + 1 + line_len };
        lines.push(line);
    }

    if !lines.is_empty() {
        chunks.push(lines.join("\n"));
    }

    // Telegram rejects blank messages.
    chunks
        .into_iter()
        .map(|chunk| chunk.trim_matches('\n').to_string())
        .filter(|chunk| !chunk.trim().is_empty())
        .collect()
}
