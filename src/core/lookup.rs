use crate::domain::model::{EntityId, EntityRef, Kurs, Teilnehmer};
use std::collections::HashMap;

/// Shown wherever a reference is absent or points at nothing.
pub const PLACEHOLDER: &str = "—";

/// Id-indexed view over the participant and course collections.
///
/// When ids repeat, the first record wins.
#[derive(Debug, Default)]
pub struct Lookup<'a> {
    teilnehmer: HashMap<&'a EntityId, &'a Teilnehmer>,
    kurse: HashMap<&'a EntityId, &'a Kurs>,
}

impl<'a> Lookup<'a> {
    pub fn new(teilnehmer: &'a [Teilnehmer], kurse: &'a [Kurs]) -> Self {
        let mut lookup = Self::default();
        for t in teilnehmer {
            lookup.teilnehmer.entry(&t.id).or_insert(t);
        }
        for k in kurse {
            lookup.kurse.entry(&k.id).or_insert(k);
        }
        lookup
    }

    pub fn participant(&self, reference: Option<&EntityRef>) -> Option<&'a Teilnehmer> {
        let id = reference?.id()?;
        self.teilnehmer.get(id).copied()
    }

    pub fn course(&self, reference: Option<&EntityRef>) -> Option<&'a Kurs> {
        let id = reference?.id()?;
        self.kurse.get(id).copied()
    }

    pub fn participant_name(&self, reference: Option<&EntityRef>) -> &'a str {
        self.participant(reference)
            .and_then(|t| t.name.as_deref())
            .unwrap_or(PLACEHOLDER)
    }

    pub fn course_title(&self, reference: Option<&EntityRef>) -> &'a str {
        self.course(reference)
            .and_then(|k| k.titel.as_deref())
            .unwrap_or(PLACEHOLDER)
    }
}
