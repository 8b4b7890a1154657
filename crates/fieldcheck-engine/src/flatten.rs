//! Resolve a rule tree into the leaves that apply to the current state.

use fieldcheck_model::State;

use crate::condition::FieldKinds;
use crate::rule::{FieldRule, Rule};

/// Applicable field rules in document order.
///
/// A node is entered only when its condition holds, so a group whose
/// condition fails contributes none of its descendants. Conditions compare
/// values through the codec of the field they reference.
pub fn flatten<'a>(state: &State, rules: &'a [Rule]) -> Vec<&'a FieldRule> {
    let kinds = FieldKinds::of(rules);
    let mut leaves = Vec::new();
    collect(state, rules, &kinds, &mut leaves);
    leaves
}

fn collect<'a>(
    state: &State,
    rules: &'a [Rule],
    kinds: &FieldKinds<'_>,
    leaves: &mut Vec<&'a FieldRule>,
) {
    for rule in rules.iter().filter(|rule| rule.applies(state, kinds)) {
        match rule {
            Rule::Field(field) => leaves.push(field),
            Rule::Group(group) => collect(state, &group.children, kinds, leaves),
        }
    }
}

/// The applicable rule for `name`, if any.
pub fn find<'a>(state: &State, rules: &'a [Rule], name: &str) -> Option<&'a FieldRule> {
    flatten(state, rules)
        .into_iter()
        .find(|field| field.name == name)
}
