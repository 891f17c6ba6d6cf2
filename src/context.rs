//! Per-run evaluation state handed to function bodies.
//!
//! An [`EvalContext`] is what a registered function receives alongside its
//! arguments: the sections attached for this evaluation run and the host's
//! dangerous-function permission. Permission state travels explicitly through
//! the context rather than through any global flag, so concurrent evaluator
//! instances can hold different grants.

use std::collections::BTreeMap;
use std::fmt;

use crate::section::Section;

/// Identifier of a section attached to an [`EvalContext`].
///
/// Ids are handed out in attachment order and never reused within one context,
/// even after a detach.
pub type SectionId = u64;

/// Evaluation state for a single run: attached sections plus the
/// dangerous-function permission grant.
///
/// The first section attached is the run's evaluation target (the data the
/// pattern program describes); later sections are auxiliary stores the program
/// creates or patches. Each context exclusively owns its sections for the
/// duration of the run.
///
/// # Examples
///
/// ```rust
/// use bytepat::{EvalContext, MemorySection};
///
/// let mut ctx = EvalContext::new();
/// let id = ctx.attach_section(Box::new(MemorySection::new("data", vec![1, 2, 3])));
///
/// assert_eq!(ctx.main_section_id(), Some(id));
/// assert_eq!(ctx.section(id).map(|s| s.size()), Some(3));
/// assert!(!ctx.dangerous_permitted());
/// ```
pub struct EvalContext {
    sections: BTreeMap<SectionId, Box<dyn Section>>,
    next_section_id: SectionId,
    dangerous_permitted: bool,
}

impl EvalContext {
    /// Create an empty context with no sections and no dangerous permission.
    pub fn new() -> EvalContext {
        EvalContext {
            sections: BTreeMap::new(),
            next_section_id: 0,
            dangerous_permitted: false,
        }
    }

    /// Attach a section, transferring ownership to the context.
    ///
    /// Returns the id under which the section is addressable for the rest of
    /// the run.
    pub fn attach_section(&mut self, section: Box<dyn Section>) -> SectionId {
        let id = self.next_section_id;
        self.next_section_id += 1;
        self.sections.insert(id, section);
        id
    }

    /// Detach a section, handing ownership back to the caller.
    ///
    /// Returns `None` if no section is attached under `id`.
    pub fn detach_section(&mut self, id: SectionId) -> Option<Box<dyn Section>> {
        self.sections.remove(&id)
    }

    /// Borrow the section attached under `id`.
    pub fn section(&self, id: SectionId) -> Option<&dyn Section> {
        self.sections.get(&id).map(|section| section.as_ref())
    }

    /// Mutably borrow the section attached under `id`.
    pub fn section_mut(&mut self, id: SectionId) -> Option<&mut dyn Section> {
        // `Option::map` leaves the boxed trait object's lifetime stuck at
        // `'static` behind `&mut`; the match arm is a coercion site.
        match self.sections.get_mut(&id) {
            Some(section) => Some(section.as_mut()),
            None => None,
        }
    }

    /// Id of the evaluation target, the earliest-attached live section.
    pub fn main_section_id(&self) -> Option<SectionId> {
        self.sections.keys().next().copied()
    }

    /// Borrow the evaluation target.
    pub fn main_section(&self) -> Option<&dyn Section> {
        self.sections.values().next().map(|section| section.as_ref())
    }

    /// Mutably borrow the evaluation target.
    pub fn main_section_mut(&mut self) -> Option<&mut dyn Section> {
        match self.sections.values_mut().next() {
            Some(section) => Some(section.as_mut()),
            None => None,
        }
    }

    /// Iterate over all attached sections in id order.
    pub fn sections(&self) -> impl Iterator<Item = (SectionId, &dyn Section)> {
        self.sections
            .iter()
            .map(|(id, section)| (*id, section.as_ref()))
    }

    /// Number of attached sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Grant permission to invoke dangerous functions for this run.
    pub fn permit_dangerous(&mut self) {
        self.dangerous_permitted = true;
    }

    /// Withdraw the dangerous-function permission.
    pub fn revoke_dangerous(&mut self) {
        self.dangerous_permitted = false;
    }

    /// Whether dangerous functions may currently run.
    pub fn dangerous_permitted(&self) -> bool {
        self.dangerous_permitted
    }
}

impl Default for EvalContext {
    fn default() -> EvalContext {
        EvalContext::new()
    }
}

impl fmt::Debug for EvalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalContext")
            .field("sections", &self.sections.keys().collect::<Vec<_>>())
            .field("dangerous_permitted", &self.dangerous_permitted)
            .finish_non_exhaustive()
    }
}
