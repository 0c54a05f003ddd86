// file: src/document/mod.rs
// description: in-memory office document model consumed by extraction rules
// reference: OOXML WordprocessingML body structure

pub mod docx;

pub use docx::DocxLoader;

/// A contiguous run of text sharing one formatting state. Only the bold
/// flag matters to extraction (header detection in the table rule).
#[derive(Debug, Clone, Default)]
pub struct Run {
    pub text: String,
    pub bold: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run { text: text.into(), bold: false }],
        }
    }

    pub fn from_bold_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run { text: text.into(), bold: true }],
        }
    }

    /// Formatting-insensitive text: the concatenation of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn has_bold(&self) -> bool {
        self.runs.iter().any(|r| r.bold)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableCell {
    pub paragraphs: Vec<Paragraph>,
}

impl TableCell {
    /// Cell text is the newline join of its paragraphs, trimmed.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn from_cells(rows: Vec<Vec<&str>>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|cells| TableRow {
                    cells: cells
                        .into_iter()
                        .map(|text| TableCell { paragraphs: vec![Paragraph::from_text(text)] })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Body-level element. Paragraphs and tables interleave in document order,
/// and the table rule depends on seeing that interleaving.
#[derive(Debug, Clone)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Top-level paragraphs in body order (paragraphs nested inside table
    /// cells are reached through the table, not here).
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }
}
