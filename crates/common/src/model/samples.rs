//! Seed papers for demos and tests

use super::{Paper, ReadStatus};
use uuid::Uuid;

impl Paper {
    /// Three sample papers for seeding a fresh library.
    ///
    /// Fixed identifiers keep seeded deployments and tests deterministic.
    pub fn samples() -> Vec<Paper> {
        vec![
            sample(
                1,
                "Deep Learning Approaches for Rheumatological Disease Classification",
                &["Chen, L.", "Williams, R.", "Park, J."],
                2024,
                "Journal of Medical AI",
                Some("10.1234/jmai.2024.001"),
                "This study presents a novel deep learning framework for classifying \
                 rheumatological diseases from clinical imaging data. Using a modified \
                 ResNet architecture with attention mechanisms, we achieved 94.2% accuracy \
                 on a dataset of 12,000 patient scans.",
                &["Deep Learning", "ResNet", "Attention Mechanisms", "Image Classification"],
                &["rheumatology", "deep learning", "medical imaging", "classification"],
                45,
                "",
                ReadStatus::Read,
            ),
            sample(
                2,
                "Biomarkers in Early Arthritis: A Systematic Review",
                &["Martinez, S.", "Thompson, K."],
                2023,
                "Rheumatology Reviews",
                Some("10.1234/rr.2023.042"),
                "We conducted a systematic review of 156 studies examining biomarkers for \
                 early detection of inflammatory arthritis. Key findings indicate that \
                 combining CRP, ESR, and anti-CCP antibodies provides the highest \
                 predictive value.",
                &["Systematic Review", "Meta-Analysis", "Biomarker Analysis"],
                &["arthritis", "biomarkers", "early detection", "systematic review"],
                89,
                "Important for literature review section",
                ReadStatus::Read,
            ),
            sample(
                3,
                "Machine Learning for Treatment Response Prediction in RA",
                &["Johnson, M.", "Lee, H.", "Brown, A."],
                2024,
                "Computational Medicine",
                Some("10.1234/cm.2024.015"),
                "This paper introduces an ensemble machine learning approach to predict \
                 treatment response in rheumatoid arthritis patients. Our model integrates \
                 clinical, genetic, and imaging features to achieve AUC of 0.91.",
                &["Ensemble Learning", "Random Forest", "XGBoost", "Feature Engineering"],
                &["rheumatoid arthritis", "treatment prediction", "machine learning"],
                23,
                "",
                ReadStatus::Unread,
            ),
        ]
    }
}

#[allow(clippy::too_many_arguments)]
fn sample(
    n: u128,
    title: &str,
    authors: &[&str],
    year: i32,
    journal: &str,
    doi: Option<&str>,
    abstract_text: &str,
    methodology: &[&str],
    keywords: &[&str],
    citation_count: u32,
    notes: &str,
    status: ReadStatus,
) -> Paper {
    let mut paper = Paper::new(title);
    paper.id = Uuid::from_u128(n);
    paper.authors = authors.iter().map(|s| s.to_string()).collect();
    paper.year = year;
    paper.journal = journal.to_string();
    paper.doi = doi.map(|s| s.to_string());
    paper.abstract_text = abstract_text.to_string();
    paper.methodology = methodology.iter().map(|s| s.to_string()).collect();
    paper.keywords = keywords.iter().map(|s| s.to_string()).collect();
    paper.citation_count = citation_count;
    paper.notes = notes.to_string();
    paper.status = status;
    paper
}
