//! Fixed catalog of requestable barangay documents

/// Canonical name of the clearance certificate, as matched inside prompts
pub const CLEARANCE: &str = "barangay clearance";
/// Canonical name of the residency certificate
pub const RESIDENCY: &str = "barangay residency";
/// Canonical name of the indigency certificate
pub const INDIGENCY: &str = "barangay indigency";

/// One requestable document kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentType {
    pub id: &'static str,
    /// Lowercase name used for prompt matching and backend payloads
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// Ordered, immutable set of document kinds known to the assistant
///
/// Order matters: prompt matching takes the first entry whose name occurs
/// in the text.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<DocumentType>,
}

impl Catalog {
    /// The three certificates Barangay Amungan issues
    pub fn standard() -> Self {
        Catalog {
            entries: vec![
                DocumentType {
                    id: "barangay-clearance",
                    name: CLEARANCE,
                    display_name: "Barangay Clearance",
                    description: "Official clearance certificate from the barangay",
                    icon: "🆔",
                    color: "#ef5350",
                },
                DocumentType {
                    id: "barangay-residency",
                    name: RESIDENCY,
                    display_name: "Barangay Residency Certificate",
                    description: "Proof of residency in Barangay Amungan",
                    icon: "🏠",
                    color: "#1976d2",
                },
                DocumentType {
                    id: "barangay-indigency",
                    name: INDIGENCY,
                    display_name: "Barangay Indigency Certificate",
                    description: "Certificate for individuals with low income",
                    icon: "📄",
                    color: "#7b1fa2",
                },
            ],
        }
    }

    pub fn entries(&self) -> &[DocumentType] {
        &self.entries
    }

    /// Look up a document by canonical name, ignoring case
    pub fn get(&self, name: &str) -> Option<&DocumentType> {
        self.entries
            .iter()
            .find(|doc| doc.name.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// First catalog entry whose name occurs inside `text`
    ///
    /// Catalog order wins over position in the text; a prompt naming both
    /// residency and clearance matches clearance.
    pub fn match_in_text(&self, text: &str) -> Option<&DocumentType> {
        let lowered = text.to_lowercase();
        self.entries.iter().find(|doc| lowered.contains(doc.name))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
