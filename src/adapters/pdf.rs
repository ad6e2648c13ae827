use crate::domain::ports::PageSource;
use crate::utils::error::{EtlError, Result};

/// Page text from the PDF's embedded text layer, via the pdf-extract crate.
/// Scanned pages without a text layer come back empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl PageSource for PdfTextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes).map_err(|e| {
            EtlError::PdfError {
                message: e.to_string(),
            }
        })?;

        let pages: Vec<String> = pages
            .into_iter()
            .map(|text| text.replace('\x0C', "\n"))
            .collect();

        let empty = pages.iter().filter(|p| p.trim().is_empty()).count();
        if empty > 0 {
            tracing::warn!(
                "{} of {} pages have no text layer; they will be skipped",
                empty,
                pages.len()
            );
        }

        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a one-page PDF with a single line of Helvetica text.
    fn make_test_pdf(text: &str) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let resources = dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        });

        if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(page_id) {
            dict.set("Parent", pages_id);
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_extracts_page_text() {
        let pdf = make_test_pdf("NYC New York NY United States");
        let pages = PdfTextExtractor::new().extract_pages(&pdf).unwrap();

        assert_eq!(pages.len(), 1);
        assert!(
            pages[0].contains("NYC") || pages[0].contains("New York"),
            "unexpected page text: {}",
            pages[0]
        );
    }

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let result = PdfTextExtractor::new().extract_pages(b"definitely not a pdf");
        assert!(matches!(result, Err(EtlError::PdfError { .. })));
    }
}
