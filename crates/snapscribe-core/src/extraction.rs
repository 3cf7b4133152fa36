//! Extraction collaborator: the contract the UI consumes to seed a new
//! session from an uploaded image, plus the mock implementation.

use crate::config::Latency;
use async_trait::async_trait;
use log::debug;
use rand::Rng;
use thiserror::Error;
use tokio::time::sleep;

/// Errors returned by a text extractor.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("extraction failed: {0}")]
    Failed(String),
}

/// Result of extracting text from an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Extracted text.
    pub text: String,
    /// Confidence score in [0, 1].
    pub confidence: f64,
    /// Detected document type label.
    pub detected_type: String,
}

/// Turns an image reference into extracted text with a confidence score and
/// a detected-type label.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract text from the image behind `image_url`.
    async fn extract_text(&self, image_url: &str) -> Result<Extraction, ExtractionError>;
}

/// Canned documents the mock extractor picks from.
const SAMPLE_TEXTS: &[(&str, &str)] = &[
    (
        "receipt",
        "CAFE MOCHA\nReceipt #: 5789\nCappuccino  1  $4.50\nSandwich  1  $8.25\nTOTAL: $12.75\nThank you for your visit!\n",
    ),
    (
        "businessCard",
        "JOHN SMITH\nSOFTWARE ENGINEER\nEmail: john.smith@example.com\nPhone: (555) 987-6543\n",
    ),
    (
        "invoice",
        "INVOICE\nInvoice #: INV-20230578\nWebsite Development  1  $2,500\nTOTAL DUE: $2,500\nPayment Terms: Net 30\n",
    ),
    (
        "letter",
        "Dear Ms. Johnson,\n\nThank you for your recent application. We would like to invite you for an interview.\n\nBest regards,\nEmma Davis\n",
    ),
    (
        "menu",
        "SUNRISE CAFE\nBREAKFAST MENU\nEggs Benedict..............$12.95\nCoffee.....................$3.50\n",
    ),
];

/// Mock extractor returning a random canned document after a fixed delay.
#[derive(Debug, Default)]
pub struct MockExtractor {
    latency: Latency,
}

impl MockExtractor {
    /// Create a mock extractor with the default simulated latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock extractor with an explicit latency table.
    pub fn with_latency(latency: Latency) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl TextExtractor for MockExtractor {
    async fn extract_text(&self, image_url: &str) -> Result<Extraction, ExtractionError> {
        sleep(self.latency.extract).await;

        let mut rng = rand::rng();
        let (detected_type, text) = SAMPLE_TEXTS[rng.random_range(0..SAMPLE_TEXTS.len())];
        // Confidence between 0.70 and 0.95, rounded to two decimals.
        let confidence = ((0.7 + rng.random::<f64>() * 0.25) * 100.0).round() / 100.0;
        debug!("mock extraction (image_url={image_url}, detected_type={detected_type})");

        Ok(Extraction {
            text: text.to_string(),
            confidence,
            detected_type: detected_type.to_string(),
        })
    }
}

/// Suggest a session title from extracted text.
pub fn suggest_title(text: &str) -> String {
    if text.is_empty() {
        return "New Document".to_string();
    }

    if text.contains("INVOICE") || text.contains("Invoice #") {
        return "Invoice Document".to_string();
    }
    if text.contains("Receipt #") || text.contains("RECEIPT") {
        return "Receipt".to_string();
    }
    if text.contains("MENU") || text.contains("CAFE") || text.contains("RESTAURANT") {
        return "Menu".to_string();
    }
    if (text.contains("Dear") && text.contains("Sincerely")) || text.contains("Regards") {
        return "Letter".to_string();
    }
    if text.len() < 200
        && (text.contains('@') || text.contains("Tel:") || text.contains("Phone:"))
    {
        return "Business Card".to_string();
    }

    let first_words: Vec<&str> = text.split_whitespace().take(3).collect();
    let first_words = first_words.join(" ");
    if first_words.len() > 5 {
        format!("{first_words}...")
    } else {
        "New Document".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{MockExtractor, TextExtractor, suggest_title};
    use crate::config::Latency;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn mock_extraction_stays_in_confidence_range() {
        let extractor = MockExtractor::with_latency(Latency::none());
        for _ in 0..20 {
            let extraction = extractor
                .extract_text("blob:receipt.png")
                .await
                .expect("extract");
            assert!(!extraction.text.is_empty());
            assert!(!extraction.detected_type.is_empty());
            assert!(extraction.confidence >= 0.7 && extraction.confidence <= 0.95);
        }
    }

    #[test]
    fn suggests_titles_by_document_keywords() {
        assert_eq!(suggest_title("INVOICE\nTotal due"), "Invoice Document");
        assert_eq!(suggest_title("Receipt #: 42"), "Receipt");
        assert_eq!(suggest_title("SUNRISE CAFE breakfast"), "Menu");
        assert_eq!(suggest_title("Dear Ms. Johnson, Best Regards"), "Letter");
        assert_eq!(suggest_title("Phone: (555) 987-6543"), "Business Card");
        assert_eq!(suggest_title(""), "New Document");
        assert_eq!(
            suggest_title("quarterly report draft for review"),
            "quarterly report draft..."
        );
    }
}
