//! Heuristic resume quality score, independent of the embedding pipeline.

const BASE_SCORE: u32 = 50;
const SKILL_KEYWORDS: [&str; 4] = ["python", "java", "react", "sql"];
const METRIC_MARKERS: [char; 4] = ['%', '+', '-', '$'];
const LONG_RESUME_LEN: usize = 1500;

/// Scores a resume 0-100 on coarse content signals: project experience,
/// recognizable skills, quantified impact, and overall length.
pub fn resume_score(text: &str) -> u32 {
    let lower = text.to_lowercase();
    let mut score = BASE_SCORE;

    if lower.contains("project") {
        score += 10;
    }
    if SKILL_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        score += 10;
    }
    if text.chars().any(|c| METRIC_MARKERS.contains(&c)) {
        score += 10;
    }
    if text.len() > LONG_RESUME_LEN {
        score += 10;
    }

    score.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bland_resume_scores_base() {
        assert_eq!(resume_score("I am a person who works."), BASE_SCORE);
    }

    #[test]
    fn test_project_mention_adds_ten() {
        assert_eq!(resume_score("Led a team Project."), 60);
    }

    #[test]
    fn test_skill_keyword_adds_ten() {
        assert_eq!(resume_score("Fluent in Python."), 60);
    }

    #[test]
    fn test_metric_marker_adds_ten() {
        assert_eq!(resume_score("Grew revenue 40%"), 60);
    }

    #[test]
    fn test_long_resume_adds_ten() {
        let text = "a ".repeat(800);
        assert_eq!(resume_score(&text), 60);
    }

    #[test]
    fn test_all_signals_sum_to_ninety() {
        let mut text = String::from("Project using Python, improved latency by 30%. ");
        text.push_str(&"experience ".repeat(200));
        assert_eq!(resume_score(&text), 90);
    }
}
