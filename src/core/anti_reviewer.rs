use crate::core::{Assessment, Candidate, Job, Reviewer, Stance};

pub const CONCERNS_CONFIDENCE: f64 = 0.8;
/// Lower than [`CONCERNS_CONFIDENCE`]: with nothing found, the risk is unproven.
pub const UNPROVEN_CONFIDENCE: f64 = 0.5;

struct RedFlag {
    any_of: &'static [&'static str],
    all_of: &'static [&'static str],
    concern: &'static str,
}

impl RedFlag {
    fn matches(&self, answer_lower: &str) -> bool {
        let any = self.any_of.is_empty()
            || self.any_of.iter().any(|phrase| answer_lower.contains(phrase));
        let all = self.all_of.iter().all(|phrase| answer_lower.contains(phrase));
        any && all
    }
}

const RED_FLAGS: &[RedFlag] = &[
    RedFlag {
        any_of: &[
            "i just did it myself",
            "i fixed it all myself",
            "i don't like delegating",
        ],
        all_of: &[],
        concern: "Does not delegate; could bottleneck team.",
    },
    RedFlag {
        any_of: &["other people slow me down", "i prefer to work alone"],
        all_of: &[],
        concern: "Prefers solo work; might fight team process.",
    },
    RedFlag {
        any_of: &[],
        all_of: &["blame", "i made them admit"],
        concern: "May escalate tension instead of calming it.",
    },
];

/// Argues against hiring: missing skills, experience gaps and behavioral red flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct AntiReviewer;

impl AntiReviewer {
    pub fn new() -> Self {
        Self
    }
}

/// One entry per (answer, flag group) match, in transcript order.
fn behavioral_concerns(candidate: &Candidate) -> Vec<&'static str> {
    candidate
        .behavioral_transcript
        .iter()
        .flat_map(|qa| {
            let answer = qa.answer.to_lowercase();
            RED_FLAGS
                .iter()
                .filter(move |flag| flag.matches(&answer))
                .map(|flag| flag.concern)
                .collect::<Vec<_>>()
        })
        .collect()
}

impl Reviewer for AntiReviewer {
    fn stance(&self) -> Stance {
        Stance::Anti
    }

    fn evaluate(&self, candidate: &Candidate, job: &Job) -> Assessment {
        let mut lines = Vec::new();

        let missing: Vec<&str> = job
            .required_skills
            .iter()
            .filter(|skill| !candidate.has_skill(skill))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            lines.push(format!("❌ Missing required skills: [{}]", missing.join(", ")));
        }

        if candidate.years_experience < job.min_years_experience {
            lines.push(format!(
                "❌ Only {} yrs experience, job needs {}+",
                candidate.years_experience, job.min_years_experience
            ));
        }

        let concerns = behavioral_concerns(candidate);
        if !concerns.is_empty() {
            lines.push("⚠ Behavioral concerns:".to_string());
            lines.extend(concerns.iter().map(|concern| format!("- {}", concern)));
        }

        let confidence = if lines.is_empty() {
            lines.push(
                "⚠ Risk: not clearly proven in our exact environment. Onboarding cost unknown."
                    .to_string(),
            );
            UNPROVEN_CONFIDENCE
        } else {
            lines.push(
                "🚫 Recommendation: Do NOT hire yet. Could require mentorship/oversight we can't spare."
                    .to_string(),
            );
            CONCERNS_CONFIDENCE
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
            name: "Riley".to_string(),
            resume_skills: skills.iter().map(|s| s.to_string()).collect(),
            years_experience: years,
            projects: vec![],
            behavioral_transcript: answers
                .iter()
                .map(|a| QaPair::new("Tell me about a time...", *a))
                .collect(),
        }
    }

    fn job(required: &[&str], min_years: u32) -> Job {
        Job {
            title: "Platform Engineer".to_string(),
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            culture_traits: vec![],
            min_years_experience: min_years,
        }
    }

    fn flag_count(argument: &str, concern: &str) -> usize {
        argument.matches(concern).count()
    }

    #[test]
    fn test_clean_candidate_is_unproven_risk() {
        let result = AntiReviewer.evaluate(&candidate(&["go"], 5, &["We paired a lot."]), &job(&["go"], 3));
        assert_eq!(result.confidence, UNPROVEN_CONFIDENCE);
        assert_eq!(
            result.argument,
            "⚠ Risk: not clearly proven in our exact environment. Onboarding cost unknown."
        );
    }

    #[test]
    fn test_missing_skills_and_shortfall() {
        let result = AntiReviewer.evaluate(&candidate(&["python"], 1, &[]), &job(&["python", "go"], 3));
        assert_eq!(result.confidence, CONCERNS_CONFIDENCE);
        assert_eq!(
            result.argument,
            "❌ Missing required skills: [go]\n\
             ❌ Only 1 yrs experience, job needs 3+\n\
             🚫 Recommendation: Do NOT hire yet. Could require mentorship/oversight we can't spare."
        );
    }

    #[test]
    fn test_missing_skills_keep_job_order() {
        let result = AntiReviewer.evaluate(&candidate(&["b"], 0, &[]), &job(&["d", "b", "a"], 0));
        assert!(result.argument.starts_with("❌ Missing required skills: [d, a]"));
    }

    #[test]
    fn test_same_group_phrases_in_one_answer_flag_once() {
        let result = AntiReviewer.evaluate(
            &candidate(&[], 0, &["I prefer to work alone and other people slow me down"]),
            &job(&[], 0),
        );
        assert_eq!(flag_count(&result.argument, "Prefers solo work"), 1);
        assert_eq!(result.confidence, CONCERNS_CONFIDENCE);
    }

    #[test]
    fn test_repeated_phrase_across_answers_flags_each() {
        let result = AntiReviewer.evaluate(
            &candidate(&[], 0, &["Honestly I just did it myself.", "I fixed it all myself again."]),
            &job(&[], 0),
        );
        assert_eq!(flag_count(&result.argument, "Does not delegate"), 2);
    }

    #[test]
    fn test_different_groups_in_one_answer_flag_separately() {
        let result = AntiReviewer.evaluate(
            &candidate(
                &[],
                0,
                &["I don't like delegating, and I prefer to work alone."],
            ),
            &job(&[], 0),
        );
        assert!(result.argument.contains(
            "⚠ Behavioral concerns:\n- Does not delegate; could bottleneck team.\n- Prefers solo work; might fight team process."
        ));
    }

    #[test]
    fn test_escalation_needs_both_phrases() {
        let only_blame = AntiReviewer.evaluate(
            &candidate(&[], 0, &["People tried to blame QA."]),
            &job(&[], 0),
        );
        assert_eq!(only_blame.confidence, UNPROVEN_CONFIDENCE);

        let escalated = AntiReviewer.evaluate(
            &candidate(&[], 0, &["They tried to BLAME me, so I made them admit it was their bug."]),
            &job(&[], 0),
        );
        assert_eq!(flag_count(&escalated.argument, "May escalate tension"), 1);
    }

    #[test]
    fn test_confidence_values() {
        for (skills, years) in [(vec![], 0), (vec!["go"], 10)] {
            let result = AntiReviewer.evaluate(&candidate(&skills, years, &[]), &job(&["go"], 2));
            assert!(result.confidence == UNPROVEN_CONFIDENCE || result.confidence == CONCERNS_CONFIDENCE);
        }
    }
}
