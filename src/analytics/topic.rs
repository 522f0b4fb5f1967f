// src/analytics/topic.rs

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{analytics::Subject, question::QuestionResult};

/// Chemistry units addressed as "Topic N" by some test papers.
const CHEMISTRY_UNITS: [&str; 12] = [
    "Basic Concepts of Chemistry",
    "Atomic Structure",
    "Classification of Elements and Periodicity",
    "Chemical Bonding",
    "States of Matter",
    "Thermodynamics",
    "Equilibrium",
    "Redox Reactions",
    "Hydrogen and s-Block Elements",
    "p-Block Elements",
    "Organic Chemistry",
    "Environmental Chemistry",
];

/// Canonical Chemistry topics and the fragments that identify them.
///
/// Order matters: "inorganic" contains "organic", so Inorganic is listed first.
const CHEMISTRY_KEYWORDS: [(&str, &[&str]); 7] = [
    (
        "Inorganic Chemistry",
        &["inorganic", "block element", "periodic", "coordination", "metallurgy", "transition"],
    ),
    (
        "Organic Chemistry",
        &[
            "organic", "hydrocarbon", "alcohol", "aldehyde", "ketone", "carboxylic", "amine",
            "polymer", "biomolecule", "isomer",
        ],
    ),
    ("Atomic Structure", &["atomic", "atom", "electron", "quantum", "orbital"]),
    ("Chemical Bonding", &["bonding", "hybridi", "vsepr", "molecular structure"]),
    ("Thermodynamics", &["thermodynamic", "enthalpy", "entropy", "gibbs", "thermochem"]),
    (
        "Equilibrium",
        &["equilibrium", "le chatelier", "buffer", "solubility product", "ionization"],
    ),
    ("Electrochemistry", &["electrochem", "redox", "electrolysis", "galvanic", "oxidation"]),
];

static UNIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^topic\s*(\d{1,2})$").expect("unit pattern is valid"));

/// Resolves the topic key a question is counted under.
pub fn resolve_topic(question: &QuestionResult, subject: Subject, fallback_label: &str) -> String {
    resolve_topic_name(question.topic.as_deref(), subject, fallback_label)
}

/// Resolves a raw topic string (from a question or a topic-wise summary).
///
/// Empty text falls back to `"{fallback_label} General"`. Chemistry topics are
/// canonicalized; the fallback name never is.
pub fn resolve_topic_name(raw: Option<&str>, subject: Subject, fallback_label: &str) -> String {
    let topic = raw.map(str::trim).unwrap_or_default();

    if topic.is_empty() {
        return format!("{} General", fallback_label.trim());
    }

    if subject == Subject::Chemistry {
        return canonical_chemistry_topic(topic);
    }

    topic.to_string()
}

/// "Topic N" → unit N, else first keyword-table hit, else the input unchanged.
pub fn canonical_chemistry_topic(raw: &str) -> String {
    let topic = raw.trim();

    if let Some(unit) = UNIT_PATTERN
        .captures(topic)
        .and_then(|caps| caps[1].parse::<usize>().ok())
        .filter(|n| (1..=CHEMISTRY_UNITS.len()).contains(n))
    {
        return CHEMISTRY_UNITS[unit - 1].to_string();
    }

    let lowered = topic.to_lowercase();
    CHEMISTRY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(canonical, _)| canonical.to_string())
        .unwrap_or_else(|| topic.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_units() {
        assert_eq!(canonical_chemistry_topic("Topic 1"), "Basic Concepts of Chemistry");
        assert_eq!(canonical_chemistry_topic("topic 2"), "Atomic Structure");
        assert_eq!(canonical_chemistry_topic("TOPIC 12"), "Environmental Chemistry");
    }

    #[test]
    fn test_out_of_range_unit_is_left_alone() {
        assert_eq!(canonical_chemistry_topic("Topic 13"), "Topic 13");
        assert_eq!(canonical_chemistry_topic("Topic 0"), "Topic 0");
    }

    #[test]
    fn test_keyword_table() {
        assert_eq!(canonical_chemistry_topic("Alcohols, Phenols and Ethers"), "Organic Chemistry");
        assert_eq!(canonical_chemistry_topic("Inorganic Chemistry"), "Inorganic Chemistry");
        assert_eq!(canonical_chemistry_topic("d and f Block Elements"), "Inorganic Chemistry");
        assert_eq!(canonical_chemistry_topic("Equilibrium"), "Equilibrium");
        assert_eq!(canonical_chemistry_topic("Ionic equilibrium"), "Equilibrium");
        assert_eq!(canonical_chemistry_topic("  Surface Chemistry "), "Surface Chemistry");
    }

    #[test]
    fn test_fallback_and_subject_scope() {
        assert_eq!(resolve_topic_name(None, Subject::Physics, "Physics"), "Physics General");
        assert_eq!(
            resolve_topic_name(Some("  "), Subject::Chemistry, "Chemistry"),
            "Chemistry General"
        );
        // Non-chemistry topics are only trimmed.
        assert_eq!(resolve_topic_name(Some(" Topic 2 "), Subject::Physics, "Physics"), "Topic 2");
        assert_eq!(
            resolve_topic_name(Some("Topic 2"), Subject::Chemistry, "Chemistry"),
            "Atomic Structure"
        );
    }
}
