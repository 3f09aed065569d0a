use crate::error::TafelError;
use crate::extraction::{stream, TableExtractor, Word};
use crate::model::{PageConfig, RawTable};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;
use std::process::Command;

/// Exit code poppler uses when `-f` lies past the last page.
const WRONG_PAGE_RANGE: i32 = 99;

/// Table extraction backend using pdftotext (from poppler-utils).
///
/// Runs `pdftotext -bbox` for a single page to get word boxes, then
/// rebuilds the table from whitespace alignment (see [`stream`]).
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }

    /// Word boxes of one page, in PDF user space.
    pub fn page_words(&self, document: &Path, page: &str) -> Result<Vec<Word>, TafelError> {
        let page_number = parse_page_token(page)?;

        if !document.is_file() {
            return Err(TafelError::extraction(
                page,
                format!("cannot open document {}", document.display()),
            ));
        }

        let output = Command::new("pdftotext")
            .arg("-f")
            .arg(page_number.to_string())
            .arg("-l")
            .arg(page_number.to_string())
            .arg("-bbox")
            .arg(document)
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TafelError::PdftotextNotFound
                } else {
                    TafelError::extraction(page, format!("pdftotext failed: {e}"))
                }
            })?;

        if output.status.code() == Some(WRONG_PAGE_RANGE) {
            return Err(TafelError::extraction(page, "page is not in the document"));
        }
        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(TafelError::PdftotextFailed { code, stderr });
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        let mut pages = parse_bbox_xhtml(&xml)
            .map_err(|e| TafelError::extraction(page, format!("malformed pdftotext output: {e}")))?;

        // A page past the end exits with WRONG_PAGE_RANGE above; anything
        // other than exactly one page here is still not the requested page.
        if pages.len() != 1 {
            return Err(TafelError::extraction(page, "page is not in the document"));
        }
        let bbox_page = pages.remove(0);
        log::debug!(
            "page {page}: {} words on a {}x{} page",
            bbox_page.words.len(),
            bbox_page.width,
            bbox_page.height
        );

        Ok(bbox_page.into_user_space())
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExtractor for PdftotextExtractor {
    fn extract_tables(
        &self,
        document: &Path,
        page: &str,
        config: &PageConfig,
    ) -> Result<Vec<RawTable>, TafelError> {
        let words = self.page_words(document, page)?;
        Ok(stream::detect_table(&words, config).into_iter().collect())
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

fn parse_page_token(page: &str) -> Result<u32, TafelError> {
    match page.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(TafelError::extraction(
            page,
            format!("'{page}' is not a page number"),
        )),
        Ok(n) => Ok(n),
    }
}

/// A word box as printed by pdftotext: origin top-left.
#[derive(Debug, Clone)]
struct BBoxWord {
    text: String,
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

#[derive(Debug, Clone)]
struct BBoxPage {
    width: f64,
    height: f64,
    words: Vec<BBoxWord>,
}

impl BBoxPage {
    /// Flip y so the words line up with region coordinates.
    fn into_user_space(self) -> Vec<Word> {
        let height = self.height;
        self.words
            .into_iter()
            .map(|w| Word {
                text: w.text,
                x0: w.x_min,
                x1: w.x_max,
                top: height - w.y_min,
                bottom: height - w.y_max,
            })
            .collect()
    }
}

fn parse_bbox_xhtml(xml: &str) -> Result<Vec<BBoxPage>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<BBoxPage> = Vec::new();
    let mut current: Option<BBoxWord> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"page" => {
                pages.push(BBoxPage {
                    width: attr_f64(&e, b"width").unwrap_or(0.0),
                    height: attr_f64(&e, b"height").unwrap_or(0.0),
                    words: Vec::new(),
                });
            }
            Event::Start(e) if e.name().as_ref() == b"word" => {
                current = Some(BBoxWord {
                    text: String::new(),
                    x_min: attr_f64(&e, b"xMin").unwrap_or(0.0),
                    y_min: attr_f64(&e, b"yMin").unwrap_or(0.0),
                    x_max: attr_f64(&e, b"xMax").unwrap_or(0.0),
                    y_max: attr_f64(&e, b"yMax").unwrap_or(0.0),
                });
            }
            Event::Text(t) => {
                if let Some(word) = current.as_mut() {
                    word.text.push_str(&t.unescape()?);
                }
            }
            Event::End(e) if e.name().as_ref() == b"word" => {
                if let (Some(word), Some(page)) = (current.take(), pages.last_mut()) {
                    if !word.text.is_empty() {
                        page.words.push(word);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn attr_f64(tag: &BytesStart<'_>, name: &[u8]) -> Option<f64> {
    tag.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| a.unescape_value().ok()?.parse().ok())
}
