/// Keywords marking a degree as technical for `degree_match`. String
/// containment heuristic, not a taxonomy.
const TECHNICAL_DEGREE_KEYWORDS: &[&str] = &["computer", "software"];

/// Keywords marking an industry string as technical.
const TECHNICAL_INDUSTRY_KEYWORDS: &[&str] = &["tech"];

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    let lowered = haystack.to_lowercase();
    keywords.iter().any(|keyword| lowered.contains(keyword))
}

/// Guess an industry from a free-form professional or job title. Only used
/// when the explicit industry field is blank on one side.
pub fn infer_industry(title: &str) -> Option<&'static str> {
    let lowered = title.to_lowercase();
    if lowered.contains("developer") || lowered.contains("engineer") {
        return Some("Tech");
    }
    if lowered.contains("legal") || lowered.contains("law") {
        return Some("Law");
    }
    None
}

/// The industry to use for matching: the explicit field when non-blank,
/// otherwise the title-derived guess.
pub fn effective_industry(explicit: Option<&str>, title: &str) -> Option<String> {
    match explicit {
        Some(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => infer_industry(title).map(str::to_string),
    }
}

pub fn is_technical_degree(degree: &str) -> bool {
    contains_any(degree, TECHNICAL_DEGREE_KEYWORDS)
}

pub fn is_technical_industry(industry: &str) -> bool {
    contains_any(industry, TECHNICAL_INDUSTRY_KEYWORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_tech_and_law_from_titles() {
        assert_eq!(infer_industry("Frontend Developer"), Some("Tech"));
        assert_eq!(infer_industry("site reliability ENGINEER"), Some("Tech"));
        assert_eq!(infer_industry("Legal Researcher"), Some("Law"));
        assert_eq!(infer_industry("Lawyer"), Some("Law"));
        assert_eq!(infer_industry("Accountant"), None);
    }

    #[test]
    fn explicit_industry_wins_over_inference() {
        assert_eq!(
            effective_industry(Some("Finance"), "Backend Developer"),
            Some("Finance".to_string())
        );
        assert_eq!(
            effective_industry(Some("  "), "Backend Developer"),
            Some("Tech".to_string())
        );
        assert_eq!(effective_industry(None, "Accountant"), None);
    }

    #[test]
    fn technical_keyword_containment() {
        assert!(is_technical_degree("BSc Computer Science"));
        assert!(is_technical_degree("Software Engineering"));
        assert!(!is_technical_degree("Economics"));

        assert!(is_technical_industry("Tech"));
        assert!(is_technical_industry("FinTech"));
        assert!(!is_technical_industry("Law"));
    }
}
