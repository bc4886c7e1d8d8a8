//! Maps free-text recurrence labels onto canonical rules.
//!
//! Every label goes through one synonym table; nothing else in the crate
//! compares raw recurrence strings.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use strsim::levenshtein;
use tracing::warn;

use crate::config::EngineConfig;
use crate::domain::{Normalized, RecordId, Recurrence, RecurrenceRule};
use crate::errors::{EngineError, EngineResult};

const SUGGESTION_MAX_DISTANCE: usize = 3;

/// Canonical recurrence tokens the synonym table resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalTerm {
    Monthly,
    Bimonthly,
    Quarterly,
    Semiannual,
    Yearly,
    Once,
}

impl CanonicalTerm {
    pub fn token(&self) -> &'static str {
        match self {
            CanonicalTerm::Monthly => "monthly",
            CanonicalTerm::Bimonthly => "bimonthly",
            CanonicalTerm::Quarterly => "quarterly",
            CanonicalTerm::Semiannual => "semiannual",
            CanonicalTerm::Yearly => "yearly",
            CanonicalTerm::Once => "once",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        SYNONYMS.get(fold_label(token).as_str()).copied()
    }

    pub fn resolve(self) -> Normalized {
        match self {
            CanonicalTerm::Monthly => Normalized::Rule(RecurrenceRule::MONTHLY),
            CanonicalTerm::Bimonthly => Normalized::Rule(RecurrenceRule::BIMONTHLY),
            CanonicalTerm::Quarterly => Normalized::Rule(RecurrenceRule::QUARTERLY),
            CanonicalTerm::Semiannual => Normalized::Rule(RecurrenceRule::SEMIANNUAL),
            CanonicalTerm::Yearly => Normalized::Rule(RecurrenceRule::YEARLY),
            CanonicalTerm::Once => Normalized::SingleOccurrence,
        }
    }
}

// Keys are stored folded: lowercase, no accents.
static SYNONYMS: Lazy<HashMap<&'static str, CanonicalTerm>> = Lazy::new(|| {
    use CanonicalTerm::*;
    [
        ("mensal", Monthly),
        ("mensual", Monthly),
        ("monthly", Monthly),
        ("mensalmente", Monthly),
        ("mensualmente", Monthly),
        ("bimestral", Bimonthly),
        ("bimensual", Bimonthly),
        ("bimonthly", Bimonthly),
        ("trimestral", Quarterly),
        ("quarterly", Quarterly),
        ("semestral", Semiannual),
        ("semiannual", Semiannual),
        ("semi-annual", Semiannual),
        ("biannual", Semiannual),
        ("anual", Yearly),
        ("anualmente", Yearly),
        ("annual", Yearly),
        ("annually", Yearly),
        ("yearly", Yearly),
        ("unico", Once),
        ("unica", Once),
        ("once", Once),
        ("single", Once),
        ("one-off", Once),
    ]
    .into_iter()
    .collect()
});

/// Lowercases, trims and strips the Latin accents found in recurrence labels.
fn fold_label(raw: &str) -> String {
    raw.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|ch| match ch {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Normalizes with the built-in synonym table only.
pub fn normalize(label: &str) -> Normalized {
    RecurrenceNormalizer::new().normalize(label)
}

/// Synonym lookup plus configured aliases and the strictness policy.
#[derive(Debug, Clone, Default)]
pub struct RecurrenceNormalizer {
    aliases: HashMap<String, CanonicalTerm>,
    strict: bool,
}

impl RecurrenceNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let mut normalizer = Self::new().strict(config.strict_recurrence);
        for (label, token) in &config.recurrence_aliases {
            match CanonicalTerm::from_token(token) {
                Some(term) => {
                    normalizer = normalizer.with_alias(label, term);
                }
                None => warn!(
                    alias = %label,
                    token = %token,
                    "ignoring recurrence alias that targets an unknown token"
                ),
            }
        }
        normalizer
    }

    pub fn with_alias(mut self, label: &str, term: CanonicalTerm) -> Self {
        self.aliases.insert(fold_label(label), term);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn term(&self, label: &str) -> Option<CanonicalTerm> {
        let folded = fold_label(label);
        SYNONYMS
            .get(folded.as_str())
            .or_else(|| self.aliases.get(&folded))
            .copied()
    }

    /// Resolves a label; unknown labels are logged and reported as `Unrecognized`.
    pub fn normalize(&self, label: &str) -> Normalized {
        match self.term(label) {
            Some(term) => term.resolve(),
            None => {
                match closest_known(&fold_label(label)) {
                    Some(suggestion) => warn!(
                        label = %label,
                        suggestion,
                        "unrecognized recurrence label; did you mean `{}`?",
                        suggestion
                    ),
                    None => warn!(label = %label, "unrecognized recurrence label"),
                }
                Normalized::Unrecognized
            }
        }
    }

    /// Normalizes the label of record `id` into something expandable.
    ///
    /// `Ok(None)` means the record must be left out of expansion; strict
    /// normalizers turn that into [`EngineError::UnrecognizedRecurrence`].
    pub fn recurrence_for(&self, id: RecordId, label: &str) -> EngineResult<Option<Recurrence>> {
        match self.normalize(label).recurrence() {
            Some(recurrence) => Ok(Some(recurrence)),
            None if self.strict => Err(EngineError::UnrecognizedRecurrence {
                id,
                label: label.to_string(),
            }),
            None => Ok(None),
        }
    }

    /// Resolves a reminder-style repeat flag plus optional sub-type.
    ///
    /// A repeating entry whose sub-type is missing or unknown defaults to
    /// monthly with a warning, unless the normalizer is strict.
    pub fn resolve_repeat_flag(
        &self,
        id: RecordId,
        repeat: bool,
        sub_type: Option<&str>,
    ) -> EngineResult<Recurrence> {
        if !repeat {
            return Ok(Recurrence::SingleOccurrence);
        }
        let label = sub_type.unwrap_or_default();
        if let Some(term) = self.term(label) {
            if let Normalized::Rule(rule) = term.resolve() {
                return Ok(Recurrence::Rule(rule));
            }
        }
        if self.strict {
            return Err(EngineError::UnrecognizedRecurrence {
                id,
                label: label.to_string(),
            });
        }
        warn!(
            id,
            sub_type = %label,
            "repeat flag set without a usable repeat kind; assuming monthly"
        );
        Ok(Recurrence::Rule(RecurrenceRule::MONTHLY))
    }
}

fn closest_known(folded: &str) -> Option<&'static str> {
    if folded.is_empty() {
        return None;
    }
    SYNONYMS
        .keys()
        .map(|known| (levenshtein(folded, known), *known))
        .filter(|(distance, _)| *distance <= SUGGESTION_MAX_DISTANCE)
        .min()
        .map(|(_, known)| known)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecurrenceKind;

    #[test]
    fn language_variants_share_a_rule() {
        for label in ["mensal", "Monthly", "  MENSUAL ", "mensalmente"] {
            assert_eq!(normalize(label), Normalized::Rule(RecurrenceRule::MONTHLY));
        }
        for label in ["anual", "Yearly", "anualmente", "annually"] {
            assert_eq!(normalize(label), Normalized::Rule(RecurrenceRule::YEARLY));
        }
    }

    #[test]
    fn intervals_follow_the_canonical_token() {
        let interval = |label: &str| match normalize(label) {
            Normalized::Rule(rule) => (rule.kind(), rule.interval()),
            other => panic!("{label} normalized to {other:?}"),
        };
        assert_eq!(interval("bimestral"), (RecurrenceKind::Monthly, 2));
        assert_eq!(interval("Trimestral"), (RecurrenceKind::Monthly, 3));
        assert_eq!(interval("semestral"), (RecurrenceKind::Monthly, 6));
    }

    #[test]
    fn accents_and_case_are_ignored_for_single_occurrence() {
        for label in ["único", "ÚNICA", "unico", "Once"] {
            assert_eq!(normalize(label), Normalized::SingleOccurrence);
        }
    }

    #[test]
    fn unknown_labels_are_unrecognized() {
        assert_eq!(normalize("weekly"), Normalized::Unrecognized);
        assert_eq!(normalize(""), Normalized::Unrecognized);
    }

    #[test]
    fn closest_known_suggests_near_misses() {
        assert_eq!(closest_known("mensl"), Some("mensal"));
        assert_eq!(closest_known("fortnightly"), None);
    }

    #[test]
    fn aliases_extend_the_table() {
        let normalizer = RecurrenceNormalizer::new().with_alias("Every Month", CanonicalTerm::Monthly);
        assert_eq!(
            normalizer.normalize("every month"),
            Normalized::Rule(RecurrenceRule::MONTHLY)
        );
    }

    #[test]
    fn config_aliases_with_unknown_tokens_are_skipped() {
        let mut config = EngineConfig::default();
        config
            .recurrence_aliases
            .insert("quincenal".into(), "fortnightly".into());
        config
            .recurrence_aliases
            .insert("cada ano".into(), "anual".into());
        let normalizer = RecurrenceNormalizer::from_config(&config);
        assert_eq!(normalizer.normalize("quincenal"), Normalized::Unrecognized);
        assert_eq!(
            normalizer.normalize("cada año"),
            Normalized::Rule(RecurrenceRule::YEARLY)
        );
    }

    #[test]
    fn recurrence_for_drops_or_fails_depending_on_strictness() {
        let lenient = RecurrenceNormalizer::new();
        assert_eq!(lenient.recurrence_for(1, "weekly").unwrap(), None);

        let strict = RecurrenceNormalizer::new().strict(true);
        let err = strict.recurrence_for(1, "weekly").unwrap_err();
        assert!(matches!(err, EngineError::UnrecognizedRecurrence { id: 1, .. }));
    }

    #[test]
    fn repeat_flag_defaults_to_monthly() {
        let normalizer = RecurrenceNormalizer::new();
        assert_eq!(
            normalizer.resolve_repeat_flag(1, false, Some("anual")).unwrap(),
            Recurrence::SingleOccurrence
        );
        assert_eq!(
            normalizer.resolve_repeat_flag(1, true, Some("anual")).unwrap(),
            Recurrence::Rule(RecurrenceRule::YEARLY)
        );
        assert_eq!(
            normalizer.resolve_repeat_flag(1, true, None).unwrap(),
            Recurrence::Rule(RecurrenceRule::MONTHLY)
        );
        assert_eq!(
            normalizer.resolve_repeat_flag(1, true, Some("unico")).unwrap(),
            Recurrence::Rule(RecurrenceRule::MONTHLY)
        );
        assert!(RecurrenceNormalizer::new()
            .strict(true)
            .resolve_repeat_flag(1, true, Some("daily"))
            .is_err());
    }
}
