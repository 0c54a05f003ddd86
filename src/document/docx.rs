// file: src/document/docx.rs
// description: docx container loader producing the in-memory document model
// reference: ECMA-376 WordprocessingML (word/document.xml)

use crate::document::{Block, Document, Paragraph, Run, Table, TableCell, TableRow};
use crate::error::Result;
use roxmltree::Node;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads the OOXML zip container and flattens `word/document.xml` into the
/// block model the rules consume. Namespace prefixes are ignored; only the
/// local element names (`p`, `tbl`, `r`, `t`, `b`) matter here.
pub struct DocxLoader;

impl DocxLoader {
    pub fn load(path: &Path) -> Result<Document> {
        let file = File::open(path)?;
        let mut archive = zip::ZipArchive::new(file)?;

        let mut xml = String::new();
        archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;

        let document = Self::parse_document_xml(&xml)?;
        debug!(
            "Loaded {}: {} body blocks",
            path.display(),
            document.blocks.len()
        );
        Ok(document)
    }

    pub fn parse_document_xml(xml: &str) -> Result<Document> {
        let tree = roxmltree::Document::parse(xml)?;
        let mut blocks = Vec::new();

        if let Some(body) = tree
            .root_element()
            .children()
            .find(|n| n.is_element() && n.tag_name().name() == "body")
        {
            for node in body.children().filter(Node::is_element) {
                match node.tag_name().name() {
                    "p" => blocks.push(Block::Paragraph(parse_paragraph(node))),
                    "tbl" => blocks.push(Block::Table(parse_table(node))),
                    _ => {}
                }
            }
        }

        Ok(Document::from_blocks(blocks))
    }
}

fn parse_paragraph(node: Node) -> Paragraph {
    // Runs may be nested under hyperlinks or smart tags, so walk all
    // descendants rather than direct children.
    let runs = node
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "r")
        .map(parse_run)
        .collect();

    Paragraph { runs }
}

fn parse_run(node: Node) -> Run {
    let text = node
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "t")
        .filter_map(|t| t.text())
        .collect();

    let bold = node
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "rPr")
        .map(|props| {
            props.children().any(|n| {
                if !n.is_element() || n.tag_name().name() != "b" {
                    return false;
                }
                // w:val may carry a namespace prefix, so match by local name.
                let val = n.attributes().find(|a| a.name() == "val").map(|a| a.value());
                !matches!(val, Some("false") | Some("0"))
            })
        })
        .unwrap_or(false);

    Run { text, bold }
}

fn parse_table(node: Node) -> Table {
    let rows = node
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "tr")
        .map(|row| TableRow {
            cells: row
                .children()
                .filter(|n| n.is_element() && n.tag_name().name() == "tc")
                .map(|cell| TableCell {
                    paragraphs: cell
                        .children()
                        .filter(|n| n.is_element() && n.tag_name().name() == "p")
                        .map(parse_paragraph)
                        .collect(),
                })
                .collect(),
        })
        .collect();

    Table { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Block;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p>
      <w:r><w:rPr><w:b/></w:rPr><w:t>Indicators of compromise</w:t></w:r>
    </w:p>
    <w:p>
      <w:r><w:t>evil</w:t></w:r>
      <w:r><w:t>[.]com</w:t></w:r>
    </w:p>
    <w:tbl>
      <w:tr>
        <w:tc><w:p><w:r><w:t>hash</w:t></w:r></w:p></w:tc>
        <w:tc><w:p><w:r><w:t>1.2.3.4</w:t></w:r></w:p></w:tc>
      </w:tr>
    </w:tbl>
  </w:body>
</w:document>"#;

    #[test]
    fn test_parse_paragraphs_and_runs() {
        let document = DocxLoader::parse_document_xml(SAMPLE_XML).unwrap();

        assert_eq!(document.blocks.len(), 3);

        let Block::Paragraph(first) = &document.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(first.text(), "Indicators of compromise");
        assert!(first.has_bold());

        let Block::Paragraph(second) = &document.blocks[1] else {
            panic!("expected paragraph");
        };
        assert_eq!(second.text(), "evil[.]com");
        assert!(!second.has_bold());
    }

    #[test]
    fn test_parse_table_cells() {
        let document = DocxLoader::parse_document_xml(SAMPLE_XML).unwrap();

        let Block::Table(table) = &document.blocks[2] else {
            panic!("expected table");
        };
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].cells.len(), 2);
        assert_eq!(table.rows[0].cells[0].text(), "hash");
        assert_eq!(table.rows[0].cells[1].text(), "1.2.3.4");
    }

    #[test]
    fn test_explicit_bold_toggle_off() {
        let xml = r#"<w:document xmlns:w="http://x/main"><w:body>
            <w:p><w:r><w:rPr><w:b w:val="false"/></w:rPr><w:t>plain</w:t></w:r></w:p>
        </w:body></w:document>"#;

        let document = DocxLoader::parse_document_xml(xml).unwrap();
        let Block::Paragraph(paragraph) = &document.blocks[0] else {
            panic!("expected paragraph");
        };
        assert!(!paragraph.has_bold());
    }

    #[test]
    fn test_load_round_trip_through_zip_container() {
        let mut docx = tempfile::NamedTempFile::new().unwrap();
        {
            let mut writer = zip::ZipWriter::new(docx.as_file_mut());
            writer
                .start_file(DOCUMENT_PART, zip::write::FileOptions::default())
                .unwrap();
            writer.write_all(SAMPLE_XML.as_bytes()).unwrap();
            writer.finish().unwrap();
        }

        let document = DocxLoader::load(docx.path()).unwrap();
        assert_eq!(document.blocks.len(), 3);
    }

    #[test]
    fn test_load_rejects_non_zip_file() {
        let mut bogus = tempfile::NamedTempFile::new().unwrap();
        bogus.write_all(b"not a zip archive").unwrap();

        assert!(DocxLoader::load(bogus.path()).is_err());
    }
}
