//! Prompt construction
//!
//! Turns the project's planning text and scrum history into a
//! natural-language grading prompt. The model gets a chronological
//! narrative of completed vs. planned work rather than structured data,
//! since "how much of the plan is done" is a qualitative judgement.
//!
//! Prompt size is bounded: only the newest `max_entries` entries are
//! included and each done/plan text is truncated to `max_field_chars`, so
//! the payload stays flat as scrum history grows.

use crate::store::ScrumSnapshot;

pub const NO_PLANNING_PLACEHOLDER: &str = "(no planning document yet)";
pub const NO_DONE_PLACEHOLDER: &str = "(no completed work logged yet)";
pub const NO_PLAN_PLACEHOLDER: &str = "(no planned work logged yet)";

/// System instruction sent with every grading request.
pub const SYSTEM_INSTRUCTION: &str = "You grade project completion. \
Respond with a single integer between 0 and 100 and nothing else. \
Digits only, no words, no percent sign.";

/// Bounds applied while aggregating scrum history into the prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptLimits {
    /// Newest entries included
    pub max_entries: usize,
    /// Character cap per done/plan text
    pub max_field_chars: usize,
}

impl Default for PromptLimits {
    fn default() -> Self {
        Self {
            max_entries: 60,
            max_field_chars: 2000,
        }
    }
}

/// Build the user prompt for the completion call.
pub fn build_progress_prompt(
    project_name: &str,
    planning: Option<&str>,
    scrums: &[ScrumSnapshot],
    limits: PromptLimits,
) -> String {
    let window = newest_window(scrums, limits.max_entries);

    let done_block = bulleted_block(
        window.iter().filter_map(|s| s.done.as_deref()),
        limits.max_field_chars,
        NO_DONE_PLACEHOLDER,
    );
    let plan_block = bulleted_block(
        window.iter().filter_map(|s| s.plan.as_deref()),
        limits.max_field_chars,
        NO_PLAN_PLACEHOLDER,
    );

    let planning_text = match planning.map(str::trim) {
        Some(p) if !p.is_empty() => truncate_chars(p, limits.max_field_chars),
        _ => NO_PLANNING_PLACEHOLDER.to_string(),
    };

    format!(
        "Project: {name}\n\
         \n\
         Planning document:\n{planning}\n\
         \n\
         Work completed so far (oldest first):\n{done}\n\
         \n\
         Work still planned (oldest first):\n{plan}\n\
         \n\
         Estimate how complete this project is as an integer percentage \
         between 0 and 100. Respond with the integer only, no other text. \
         If any work has been completed and a plan exists, answer at least \
         20. If all planned work is complete, answer 100.",
        name = project_name,
        planning = planning_text,
        done = done_block,
        plan = plan_block,
    )
}

/// Keep the newest `max_entries` entries, preserving ascending date order.
fn newest_window(scrums: &[ScrumSnapshot], max_entries: usize) -> &[ScrumSnapshot] {
    let start = scrums.len().saturating_sub(max_entries);
    &scrums[start..]
}

/// Join non-empty texts into a bulleted block, or a placeholder when
/// nothing survives filtering.
fn bulleted_block<'a>(
    texts: impl Iterator<Item = &'a str>,
    max_field_chars: usize,
    placeholder: &str,
) -> String {
    let lines: Vec<String> = texts
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!("- {}", truncate_chars(t, max_field_chars)))
        .collect();

    if lines.is_empty() {
        placeholder.to_string()
    } else {
        lines.join("\n")
    }
}

/// Char-boundary-safe truncation with an ellipsis marker.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(day: u32, done: Option<&str>, plan: Option<&str>) -> ScrumSnapshot {
        ScrumSnapshot {
            entry_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            done: done.map(String::from),
            plan: plan.map(String::from),
        }
    }

    #[test]
    fn test_empty_history_renders_placeholders() {
        let prompt = build_progress_prompt("Chat App", None, &[], PromptLimits::default());
        assert!(prompt.contains(NO_PLANNING_PLACEHOLDER));
        assert!(prompt.contains(NO_DONE_PLACEHOLDER));
        assert!(prompt.contains(NO_PLAN_PLACEHOLDER));
        assert!(prompt.contains("Chat App"));
    }

    #[test]
    fn test_blank_fields_are_skipped() {
        let scrums = vec![
            entry(1, Some("set up repo"), Some("build auth")),
            entry(2, Some("   "), Some("build messaging")),
            entry(3, Some("built auth"), None),
        ];
        let prompt =
            build_progress_prompt("Chat App", Some("plan text"), &scrums, PromptLimits::default());
        assert!(prompt.contains("- set up repo"));
        assert!(prompt.contains("- built auth"));
        assert!(!prompt.contains("-    "));
        assert!(prompt.contains("- build auth"));
        assert!(prompt.contains("- build messaging"));
    }

    #[test]
    fn test_entry_cap_keeps_newest() {
        let scrums: Vec<ScrumSnapshot> = (1..=10)
            .map(|d| entry(d, Some(format!("day {} work", d).as_str()), None))
            .collect();
        let limits = PromptLimits {
            max_entries: 3,
            max_field_chars: 2000,
        };
        let prompt = build_progress_prompt("P", None, &scrums, limits);
        assert!(!prompt.contains("day 7 work"));
        assert!(prompt.contains("day 8 work"));
        assert!(prompt.contains("day 9 work"));
        assert!(prompt.contains("day 10 work"));
    }

    #[test]
    fn test_field_truncation() {
        let long = "x".repeat(5000);
        let scrums = vec![entry(1, Some(long.as_str()), None)];
        let limits = PromptLimits {
            max_entries: 60,
            max_field_chars: 100,
        };
        let prompt = build_progress_prompt("P", None, &scrums, limits);
        assert!(prompt.contains(&format!("- {}...", "x".repeat(100))));
        assert!(!prompt.contains(&"x".repeat(101)));
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        // Multi-byte characters must not be split.
        let text = "한글텍스트";
        let out = truncate_chars(text, 3);
        assert_eq!(out, "한글텍...");
    }

    #[test]
    fn test_instruction_present() {
        let prompt = build_progress_prompt("P", None, &[], PromptLimits::default());
        assert!(prompt.contains("integer only, no other text"));
        assert!(prompt.contains("answer at least 20"));
        assert!(prompt.contains("answer 100"));
    }
}
