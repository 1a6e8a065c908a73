//! Prompt templates and user-prompt rendering.
//!
//! Templates are plain text with `{{NAME}}` placeholders. The built-in pair
//! is compiled into the binary; a directory holding `system-prompt.txt` and
//! `user-prompt-template.txt` can replace it.

use std::path::{Path, PathBuf};

use pm_core::NormalizedIncident;

use crate::error::PromptError;

pub const SYSTEM_PROMPT_FILE: &str = "system-prompt.txt";
pub const USER_TEMPLATE_FILE: &str = "user-prompt-template.txt";

const BUILTIN_SYSTEM: &str = include_str!("../prompts/system-prompt.txt");
const BUILTIN_USER_TEMPLATE: &str = include_str!("../prompts/user-prompt-template.txt");

const NOT_SPECIFIED: &str = "Not specified";
const NO_DESCRIPTION: &str = "No description provided";
const NO_CONTEXT: &str = "None";
const NO_TIMELINE: &str = "No timeline provided";

/// The system prompt and the user-prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    pub system: String,
    pub user_template: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            system: BUILTIN_SYSTEM.to_string(),
            user_template: BUILTIN_USER_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Load both templates from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Read`] if either file is missing or unreadable.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, PromptError> {
        let dir = dir.as_ref();
        let templates = Self {
            system: read_template(&dir.join(SYSTEM_PROMPT_FILE))?,
            user_template: read_template(&dir.join(USER_TEMPLATE_FILE))?,
        };
        tracing::debug!(dir = %dir.display(), "Loaded prompt templates");
        Ok(templates)
    }

    /// Templates from `dir` when given, the built-in pair otherwise.
    ///
    /// # Errors
    ///
    /// See [`Self::from_dir`].
    pub fn load(dir: Option<&Path>) -> Result<Self, PromptError> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Ok(Self::default()),
        }
    }
}

fn read_template(path: &Path) -> Result<String, PromptError> {
    std::fs::read_to_string(path).map_err(|source| PromptError::Read {
        path: PathBuf::from(path),
        source,
    })
}

/// Renders the user prompt for a normalized incident.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    templates: PromptTemplates,
}

impl PromptBuilder {
    pub const fn new(templates: PromptTemplates) -> Self {
        Self { templates }
    }

    pub fn system_prompt(&self) -> &str {
        &self.templates.system
    }

    /// Substitute every placeholder in the user template.
    ///
    /// Values are inserted literally in a single pass, so `{{...}}` text
    /// inside the incident itself is never expanded. Unknown placeholders
    /// are left as written.
    #[must_use]
    pub fn build(&self, incident: &NormalizedIncident) -> String {
        render(&self.templates.user_template, |name| {
            placeholder_value(name, incident)
        })
    }
}

fn placeholder_value(name: &str, incident: &NormalizedIncident) -> Option<String> {
    let value = match name {
        "TITLE" => incident.title.clone(),
        "DATE" => incident.date.clone(),
        "DURATION" => incident.duration.clone(),
        "SEVERITY" => incident.severity.as_str().to_string(),
        "AFFECTED_SYSTEMS" if incident.affected_systems.is_empty() => NOT_SPECIFIED.to_string(),
        "AFFECTED_SYSTEMS" => incident.affected_systems.join(", "),
        "DESCRIPTION" => or_fallback(&incident.description, NO_DESCRIPTION),
        "TIMELINE" => format_timeline(incident),
        "RESOLUTION" => or_fallback(&incident.resolution, NOT_SPECIFIED),
        "ADDITIONAL_CONTEXT" => or_fallback(&incident.additional_context, NO_CONTEXT),
        _ => return None,
    };
    Some(value)
}

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

fn format_timeline(incident: &NormalizedIncident) -> String {
    if incident.timeline.is_empty() {
        return NO_TIMELINE.to_string();
    }
    incident
        .timeline
        .iter()
        .map(|entry| format!("- {}: {}", entry.time, entry.event))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Single left-to-right pass over `template`. Output of `lookup` is never rescanned.
fn render(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let resolved = after
            .find("}}")
            .and_then(|end| lookup(&after[..end]).map(|value| (end, value)));

        if let Some((end, value)) = resolved {
            out.push_str(&value);
            rest = &after[end + 2..];
        } else {
            // Not a known placeholder; emit one brace and keep scanning.
            out.push('{');
            rest = &rest[start + 1..];
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pm_core::{Severity, TimelineEntry};
    use pretty_assertions::assert_eq;

    fn incident() -> NormalizedIncident {
        NormalizedIncident {
            title: "Checkout outage".into(),
            date: "2024-05-01".into(),
            duration: "2 hours".into(),
            severity: Severity::P1,
            affected_systems: vec!["api".into(), "db".into()],
            description: "Payments failed".into(),
            timeline: vec![
                TimelineEntry::new("10:00", "paged"),
                TimelineEntry::new("10:30", "rolled back"),
            ],
            resolution: "Rollback".into(),
            additional_context: String::new(),
        }
    }

    fn builder(user_template: &str) -> PromptBuilder {
        PromptBuilder::new(PromptTemplates {
            system: "system".into(),
            user_template: user_template.into(),
        })
    }

    #[test]
    fn renders_every_placeholder() {
        let template = "{{TITLE}}|{{DATE}}|{{DURATION}}|{{SEVERITY}}|{{AFFECTED_SYSTEMS}}|\
                        {{DESCRIPTION}}|{{RESOLUTION}}|{{ADDITIONAL_CONTEXT}}\n{{TIMELINE}}";
        assert_eq!(
            builder(template).build(&incident()),
            "Checkout outage|2024-05-01|2 hours|P1|api, db|Payments failed|Rollback|None\n\
             - 10:00: paged\n- 10:30: rolled back"
        );
    }

    #[test]
    fn empty_fields_use_fallback_text() {
        let incident = NormalizedIncident {
            affected_systems: vec![],
            description: String::new(),
            timeline: vec![],
            resolution: "   ".into(),
            ..incident()
        };
        let rendered = builder("{{AFFECTED_SYSTEMS}}/{{DESCRIPTION}}/{{TIMELINE}}/{{RESOLUTION}}")
            .build(&incident);

        assert_eq!(
            rendered,
            "Not specified/No description provided/No timeline provided/Not specified"
        );
    }

    #[test]
    fn repeated_placeholders_are_all_replaced() {
        assert_eq!(
            builder("{{TITLE}} ({{TITLE}})").build(&incident()),
            "Checkout outage (Checkout outage)"
        );
    }

    #[test]
    fn placeholders_inside_values_are_not_expanded() {
        let incident = NormalizedIncident {
            title: "Broken {{SEVERITY}} template".into(),
            ..incident()
        };
        assert_eq!(
            builder("{{TITLE}} / {{SEVERITY}}").build(&incident),
            "Broken {{SEVERITY}} template / P1"
        );
    }

    #[test]
    fn unknown_and_unclosed_placeholders_stay_literal() {
        assert_eq!(
            builder("{{OWNER}} {{{TITLE}} {{TITLE").build(&incident()),
            "{{OWNER}} {Checkout outage {{TITLE"
        );
    }

    #[test]
    fn builtin_templates_mention_every_placeholder() {
        let templates = PromptTemplates::default();
        for name in [
            "TITLE",
            "DATE",
            "DURATION",
            "SEVERITY",
            "AFFECTED_SYSTEMS",
            "DESCRIPTION",
            "TIMELINE",
            "RESOLUTION",
            "ADDITIONAL_CONTEXT",
        ] {
            assert!(
                templates.user_template.contains(&format!("{{{{{name}}}}}")),
                "missing {name}"
            );
        }
        assert!(templates.system.contains("confidence_scores"));

        let rendered = PromptBuilder::default().build(&incident());
        assert!(!rendered.contains("{{"));
        assert!(rendered.contains("- 10:00: paged"));
    }

    #[test]
    fn from_dir_loads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SYSTEM_PROMPT_FILE), "custom system").unwrap();
        std::fs::write(dir.path().join(USER_TEMPLATE_FILE), "Incident {{TITLE}}").unwrap();

        let builder = PromptBuilder::new(PromptTemplates::from_dir(dir.path()).unwrap());

        assert_eq!(builder.system_prompt(), "custom system");
        assert_eq!(builder.build(&incident()), "Incident Checkout outage");
    }

    #[test]
    fn from_dir_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SYSTEM_PROMPT_FILE), "custom system").unwrap();

        let err = PromptTemplates::from_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains(USER_TEMPLATE_FILE));
    }

    #[test]
    fn load_without_dir_uses_builtin() {
        assert_eq!(PromptTemplates::load(None).unwrap(), PromptTemplates::default());
    }
}
