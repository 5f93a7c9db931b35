use std::collections::HashSet;

fn normalized_set(skills: &[String]) -> HashSet<String> {
    skills
        .iter()
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect()
}

/// Fraction of the job's required skills present in the candidate's skill
/// set, compared case-insensitively. Either side being empty scores 0.0.
/// Rounded to 4 decimal places so persisted scores compare exactly.
pub fn skill_score(candidate_skills: &[String], required_skills: &[String]) -> f64 {
    let required = normalized_set(required_skills);
    if required.is_empty() {
        return 0.0;
    }

    let possessed = normalized_set(candidate_skills);
    if possessed.is_empty() {
        return 0.0;
    }

    let matched = required.intersection(&possessed).count();
    super::scoring::round4(matched as f64 / required.len().max(1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(skill_score(&[], &skills(&["python"])), 0.0);
        assert_eq!(skill_score(&skills(&["python"]), &[]), 0.0);
        assert_eq!(skill_score(&[], &[]), 0.0);
    }

    #[test]
    fn scores_fraction_of_required_skills() {
        let score = skill_score(&skills(&["python", "sql"]), &skills(&["python", "django"]));
        assert_eq!(score, 0.5);
    }

    #[test]
    fn comparison_ignores_case() {
        assert_eq!(skill_score(&skills(&["Python"]), &skills(&["python"])), 1.0);
    }

    #[test]
    fn rounds_to_four_decimal_places() {
        let score = skill_score(
            &skills(&["python", "react"]),
            &skills(&["python", "react", "sql"]),
        );
        assert_eq!(score, 0.6667);
    }

    #[test]
    fn blank_entries_are_ignored() {
        let score = skill_score(&skills(&["python", "  "]), &skills(&["", "python"]));
        assert_eq!(score, 1.0);
    }

    #[test]
    fn duplicate_spellings_collapse() {
        let score = skill_score(
            &skills(&["SQL", "sql"]),
            &skills(&["sql", "Sql", "python"]),
        );
        assert_eq!(score, 0.5);
    }
}
