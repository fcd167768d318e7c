use crate::core::{Assessment, Candidate, Job, Reviewer, Stance};

pub const STRONG_CONFIDENCE: f64 = 0.8;
pub const CONDITIONAL_CONFIDENCE: f64 = 0.6;

/// Minimum share of required skills for a strong recommendation.
pub const MATCH_THRESHOLD: f64 = 0.6;

const COLLABORATION_TRAIT: &str = "collaboration under pressure";
const COLLABORATION_KEYWORDS: &[&str] = &["conflict", "blam", "tension", "de-escalat"];

const ACTION_TRAIT: &str = "bias for action";
const ACTION_KEYWORDS: &[&str] = &["i jumped in", "i stepped in", "i just fixed it"];

/// Argues for hiring: skill overlap, experience, culture evidence and projects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProReviewer;

impl ProReviewer {
    pub fn new() -> Self {
        Self
    }
}

/// A trait is evidenced when it appears verbatim in the lowercased answer,
/// or when its keyword heuristic fires.
fn evidences(trait_name: &str, answer_lower: &str) -> bool {
    if answer_lower.contains(trait_name) {
        return true;
    }
    let keywords = match trait_name {
        COLLABORATION_TRAIT => COLLABORATION_KEYWORDS,
        ACTION_TRAIT => ACTION_KEYWORDS,
        _ => return false,
    };
    keywords.iter().any(|keyword| answer_lower.contains(keyword))
}

/// First answer evidencing each trait, in job order.
fn culture_evidence<'a>(candidate: &'a Candidate, job: &'a Job) -> Vec<(&'a str, &'a str)> {
    job.culture_traits
        .iter()
        .filter_map(|trait_name| {
            candidate
                .behavioral_transcript
                .iter()
                .find(|qa| evidences(trait_name, &qa.answer.to_lowercase()))
                .map(|qa| (trait_name.as_str(), qa.answer.as_str()))
        })
        .collect()
}

impl Reviewer for ProReviewer {
    fn stance(&self) -> Stance {
        Stance::Pro
    }

    fn evaluate(&self, candidate: &Candidate, job: &Job) -> Assessment {
        let matched: Vec<&str> = job
            .required_skills
            .iter()
            .filter(|skill| candidate.has_skill(skill))
            .map(String::as_str)
            .collect();
        let match_ratio = matched.len() as f64 / job.required_skills.len().max(1) as f64;
        let exp_ok = candidate.years_experience >= job.min_years_experience;

        let mut lines = vec![
            format!(
                "SKILL MATCH: {}/{} required skills => [{}]",
                matched.len(),
                job.required_skills.len(),
                matched.join(", ")
            ),
            format!(
                "EXPERIENCE: {} yrs (job asks for {}+)",
                candidate.years_experience, job.min_years_experience
            ),
        ];

        let hits = culture_evidence(candidate, job);
        if !hits.is_empty() {
            lines.push("CULTURE FIT EXAMPLES:".to_string());
            for (trait_name, evidence) in hits {
                lines.push(format!("- {}: shown in answer -> \"{}\"", trait_name, evidence));
            }
        }

        if !candidate.projects.is_empty() {
            lines.push("IMPACTFUL PROJECTS:".to_string());
            for project in &candidate.projects {
                lines.push(format!("- {}", project));
            }
        }

        let confidence = if match_ratio >= MATCH_THRESHOLD && exp_ok {
            lines.push("✅ Strong match. Can execute with low hand-holding. We should hire.".to_string());
            STRONG_CONFIDENCE
        } else {
            lines.push(
                "⚠ Slight gaps but high upside and strong behaviors. Worth hiring consideration."
                    .to_string(),
            );
            CONDITIONAL_CONFIDENCE
        };

        Assessment {
            argument: lines.join("\n"),
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QaPair;

    fn candidate(skills: &[&str], years: u32, answers: &[&str]) -> Candidate {
        Candidate {
            name: "Sam".to_string(),
            resume_skills: skills.iter().map(|s| s.to_string()).collect(),
            years_experience: years,
            projects: vec![],
            behavioral_transcript: answers
                .iter()
                .enumerate()
                .map(|(i, a)| QaPair::new(format!("q{}", i), *a))
                .collect(),
        }
    }

    fn job(required: &[&str], traits: &[&str], min_years: u32) -> Job {
        Job {
            title: "Backend Engineer".to_string(),
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            culture_traits: traits.iter().map(|s| s.to_string()).collect(),
            min_years_experience: min_years,
        }
    }

    #[test]
    fn test_partial_skill_match_is_conditional() {
        let result = ProReviewer.evaluate(
            &candidate(&["python"], 1, &[]),
            &job(&["python", "go"], &[], 3),
        );
        assert_eq!(result.confidence, CONDITIONAL_CONFIDENCE);
        assert!(result
            .argument
            .starts_with("SKILL MATCH: 1/2 required skills => [python]\nEXPERIENCE: 1 yrs (job asks for 3+)"));
        assert!(result.argument.ends_with("Worth hiring consideration."));
    }

    #[test]
    fn test_strong_match() {
        let result = ProReviewer.evaluate(
            &candidate(&["python", "go", "sql"], 5, &[]),
            &job(&["python", "go"], &[], 3),
        );
        assert_eq!(result.confidence, STRONG_CONFIDENCE);
        assert!(result.argument.contains("2/2 required skills => [python, go]"));
        assert!(result.argument.ends_with("We should hire."));
    }

    #[test]
    fn test_experience_gap_caps_confidence() {
        let result = ProReviewer.evaluate(
            &candidate(&["python", "go"], 2, &[]),
            &job(&["python", "go"], &[], 3),
        );
        assert_eq!(result.confidence, CONDITIONAL_CONFIDENCE);
    }

    #[test]
    fn test_empty_required_skills_do_not_divide_by_zero() {
        let result = ProReviewer.evaluate(&candidate(&[], 0, &[]), &job(&[], &[], 0));
        assert!(result.argument.starts_with("SKILL MATCH: 0/0 required skills => []"));
        // ratio is 0/1, below the threshold
        assert_eq!(result.confidence, CONDITIONAL_CONFIDENCE);
    }

    #[test]
    fn test_culture_keyword_heuristics() {
        let answers = [
            "We shipped on time.",
            "Backend and frontend were BLAMING each other so I set up a call.",
            "When the deploy broke I stepped in and rolled back.",
        ];
        let result = ProReviewer.evaluate(
            &candidate(&[], 0, &answers),
            &job(&[], &["collaboration under pressure", "bias for action"], 0),
        );
        assert!(result.argument.contains(&format!(
            "CULTURE FIT EXAMPLES:\n- collaboration under pressure: shown in answer -> \"{}\"\n- bias for action: shown in answer -> \"{}\"",
            answers[1], answers[2]
        )));
    }

    #[test]
    fn test_first_matching_answer_wins() {
        let answers = ["I value ownership a lot.", "Ownership again, in another answer."];
        let result = ProReviewer.evaluate(&candidate(&[], 0, &answers), &job(&[], &["ownership"], 0));
        assert!(result.argument.contains("- ownership: shown in answer -> \"I value ownership a lot.\""));
        assert!(!result.argument.contains("another answer"));
    }

    #[test]
    fn test_trait_matching_is_literal() {
        // answers are lowercased, trait names are not
        let result = ProReviewer.evaluate(
            &candidate(&[], 0, &["I care about ownership"]),
            &job(&[], &["Ownership"], 0),
        );
        assert!(!result.argument.contains("CULTURE FIT EXAMPLES"));
    }

    #[test]
    fn test_projects_listed() {
        let mut c = candidate(&[], 0, &[]);
        c.projects = vec!["payments ledger".to_string(), "k8s operator".to_string()];
        let result = ProReviewer.evaluate(&c, &job(&[], &[], 0));
        assert!(result
            .argument
            .contains("IMPACTFUL PROJECTS:\n- payments ledger\n- k8s operator"));
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let c = candidate(&["rust"], 3, &["I jumped in during the outage"]);
        let j = job(&["rust", "sql"], &["bias for action"], 2);
        assert_eq!(ProReviewer.evaluate(&c, &j), ProReviewer.evaluate(&c, &j));
    }
}
