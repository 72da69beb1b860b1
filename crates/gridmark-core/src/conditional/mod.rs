//! Conditional formatting
//!
//! A [`ConditionalFormatting`] applies a list of rules to one or more cell
//! ranges. Rules are built from [`RuleOption`]s:
//!
//! ```rust
//! use gridmark_core::conditional::rules::{RuleVariant, Duplicate};
//! use gridmark_core::{Bounds, ConditionalFormatting, RuleInfo, Style, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! let formatting = ConditionalFormatting::new()
//!     .with_bounds(Bounds::parse("A1:A10").unwrap())
//!     .with_rule(RuleInfo::new([Duplicate::styles(Style::new().bold(true))]));
//!
//! sheet.add_conditional_formatting(formatting).unwrap();
//! ```

mod primitives;
mod rule;
pub mod rules;

pub use primitives::{ConditionOperator, ConditionType, ConditionValueType, IconSetType, TimePeriod};
pub use rule::{ConditionalRule, RuleInfo, RuleKind, RuleOption, ValueObject};
pub use rules::RuleVariant;

use crate::bounds::Bounds;
use crate::error::{Error, Result};
use crate::style::StyleRegistry;

/// Rules applied to a set of ranges (`<conditionalFormatting>`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConditionalFormatting {
    bounds: Vec<Bounds>,
    rules: Vec<RuleInfo>,
    pivot: bool,
}

impl ConditionalFormatting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a range the rules apply to
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds.push(bounds);
        self
    }

    pub fn with_rule(mut self, rule: RuleInfo) -> Self {
        self.rules.push(rule);
        self
    }

    /// Mark the formatting as belonging to a pivot table
    pub fn with_pivot(mut self, pivot: bool) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn add_bounds(&mut self, bounds: Bounds) {
        self.bounds.push(bounds);
    }

    pub fn add_rule(&mut self, rule: RuleInfo) {
        self.rules.push(rule);
    }

    pub fn bounds(&self) -> &[Bounds] {
        &self.bounds
    }

    pub fn rules(&self) -> &[RuleInfo] {
        &self.rules
    }

    pub fn pivot(&self) -> bool {
        self.pivot
    }

    /// Space separated A1 ranges (`sqref`)
    pub fn sqref(&self) -> String {
        self.bounds
            .iter()
            .map(Bounds::to_a1_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if any range overlaps `bounds`
    pub fn overlaps(&self, bounds: &Bounds) -> bool {
        self.bounds.iter().any(|b| b.overlaps(bounds))
    }

    /// Check if the formatting covers the cell at (row, col)
    pub fn applies_to(&self, row: u32, col: u16) -> bool {
        self.bounds.iter().any(|b| b.contains(col, row))
    }

    /// Check there is at least one range and every rule is valid
    pub fn validate(&self) -> Result<()> {
        if self.bounds.is_empty() {
            return Err(Error::missing("conditionalFormatting", "sqref"));
        }
        if self.rules.is_empty() {
            return Err(Error::missing("conditionalFormatting", "cfRule"));
        }
        self.bounds.iter().try_for_each(Bounds::check_in_sheet)?;
        self.rules.iter().try_for_each(RuleInfo::validate)
    }

    /// Register pending styles and number rules that have no priority
    pub(crate) fn prepare(&mut self, styles: &mut StyleRegistry, next_priority: &mut u32) {
        for info in &mut self.rules {
            info.register_style(styles);
            if let Some(rule) = info.rule_mut() {
                if rule.priority == 0 {
                    rule.priority = *next_priority;
                    *next_priority = next_priority.saturating_add(1);
                } else {
                    *next_priority = (*next_priority).max(rule.priority.saturating_add(1));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::rules::{Expression, RankOptions, Top};
    use super::*;
    use crate::style::Style;

    fn bounds(s: &str) -> Bounds {
        Bounds::parse(s).unwrap()
    }

    #[test]
    fn test_validate() {
        let rule = RuleInfo::new([Expression::formula("A1>0")]);

        assert_eq!(
            ConditionalFormatting::new().with_rule(rule.clone()).validate(),
            Err(Error::missing("conditionalFormatting", "sqref"))
        );
        assert_eq!(
            ConditionalFormatting::new().with_bounds(bounds("A1")).validate(),
            Err(Error::missing("conditionalFormatting", "cfRule"))
        );
        assert!(ConditionalFormatting::new()
            .with_bounds(bounds("A1"))
            .with_rule(rule)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_out_of_sheet_range_fails_validation() {
        let formatting = ConditionalFormatting::new()
            .with_bounds(bounds("A1"))
            .with_bounds(Bounds::new(0, 0, 0, 16_384))
            .with_rule(RuleInfo::new([Expression::formula("TRUE")]));
        assert_eq!(
            formatting.validate(),
            Err(Error::ColumnOutOfBounds(16_384, 16_383))
        );
    }

    #[test]
    fn test_invalid_rule_fails_validation() {
        let formatting = ConditionalFormatting::new()
            .with_bounds(bounds("A1:A10"))
            .with_rule(RuleInfo::new([Top::rank(3)]));
        assert_eq!(
            formatting.validate(),
            Err(Error::missing("top", "value_type"))
        );
    }

    #[test]
    fn test_sqref_and_coverage() {
        let formatting = ConditionalFormatting::new()
            .with_bounds(bounds("A1:B2"))
            .with_bounds(bounds("D4"));
        assert_eq!(formatting.sqref(), "A1:B2 D4");
        assert!(formatting.applies_to(3, 3));
        assert!(!formatting.applies_to(2, 2));
        assert!(formatting.overlaps(&bounds("B2:C3")));
    }

    #[test]
    fn test_prepare_numbers_rules() {
        let mut registry = StyleRegistry::new();
        let mut formatting = ConditionalFormatting::new()
            .with_bounds(bounds("A1:A5"))
            .with_rule(RuleInfo::new([
                Expression::formula("A1>1"),
                Expression::styles(Style::new().italic(true)),
            ]))
            .with_rule(RuleInfo::new([Top::rank(2), Top::items(), Top::priority(7)]))
            .with_rule(RuleInfo::new([Expression::formula("A1<0")]));

        let mut next = 1;
        formatting.prepare(&mut registry, &mut next);

        let priorities: Vec<_> = formatting
            .rules()
            .iter()
            .map(|r| r.rule().unwrap().priority)
            .collect();
        assert_eq!(priorities, vec![1, 7, 8]);
        assert_eq!(next, 9);
        assert_eq!(registry.len(), 1);
        assert!(!formatting.rules()[0].rule().unwrap().style.is_default());
    }
}
