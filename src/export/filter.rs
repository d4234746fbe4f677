use crate::resolve::ResolutionRecord;

/// Narrows the result list the way the results view does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Case-insensitive substring over mobile, name, bank and VPA.
    pub search: Option<String>,
    /// Exact bank name.
    pub bank: Option<String>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().map_or(true, str::is_empty) && self.bank.is_none()
    }

    pub fn matches(&self, record: &ResolutionRecord) -> bool {
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            if !record.search_text().contains(&term.to_lowercase()) {
                return false;
            }
        }
        if let Some(bank) = &self.bank {
            if &record.bank != bank {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, records: &'a [ResolutionRecord]) -> Vec<&'a ResolutionRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
