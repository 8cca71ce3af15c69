//! Loss reporting for formula fragments that did not convert cleanly.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LossKind {
    UnsupportedFunction,
    UnconvertedOperator,
    UnterminatedCall,
    RewriteStalled,
}

#[derive(Debug, Clone, Serialize)]
pub struct LossRecord {
    pub kind: LossKind,
    pub name: Option<String>,
    pub message: String,
    pub snippet: Option<String>,
}

impl LossRecord {
    pub fn new(
        kind: LossKind,
        name: Option<String>,
        message: impl Into<String>,
        snippet: Option<String>,
    ) -> Self {
        Self {
            kind,
            name,
            message: message.into(),
            snippet,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LossReport {
    pub losses: Vec<LossRecord>,
}

impl LossReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: LossRecord) {
        self.losses.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.losses.is_empty()
    }

    /// Whether any loss of the given kind was recorded.
    pub fn has(&self, kind: LossKind) -> bool {
        self.losses.iter().any(|l| l.kind == kind)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub content: String,
    pub report: LossReport,
}

impl ConversionReport {
    pub fn new(content: String, report: LossReport) -> Self {
        Self { content, report }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&LossKind::UnconvertedOperator).unwrap();
        assert_eq!(json, "\"unconverted-operator\"");
    }

    #[test]
    fn test_report_has_kind() {
        let mut report = LossReport::new();
        assert!(report.is_empty());
        report.push(LossRecord::new(
            LossKind::UnterminatedCall,
            Some("SIN".to_string()),
            "missing ')'",
            Some("SIN(x".to_string()),
        ));
        assert!(!report.is_empty());
        assert!(report.has(LossKind::UnterminatedCall));
        assert!(!report.has(LossKind::RewriteStalled));
    }
}
