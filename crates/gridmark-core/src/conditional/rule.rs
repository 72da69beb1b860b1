//! Conditional formatting rules
//!
//! A [`RuleInfo`] starts uninitialized. The first [`RuleOption`] applied to
//! it fixes its [`RuleKind`] and installs that kind's defaults; every later
//! option only changes fields. Options are produced by the variant
//! namespaces in [`rules`](super::rules).

use super::primitives::{
    ConditionOperator, ConditionType, ConditionValueType, IconSetType, TimePeriod,
};
use crate::codec::AttributeEnum;
use crate::error::{Error, Result};
use crate::style::{Color, Style, StyleRef, StyleRegistry};

/// Threshold of a color scale, data bar or icon set (`<cfvo>`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueObject {
    pub value_type: ConditionValueType,
    pub value: Option<String>,
}

impl ValueObject {
    pub fn new<S: Into<String>>(value_type: ConditionValueType, value: Option<S>) -> Self {
        Self {
            value_type,
            value: value.map(Into::into),
        }
    }

    /// Smallest value of the range
    pub fn lowest() -> Self {
        Self::new::<String>(ConditionValueType::Lowest, None)
    }

    /// Largest value of the range
    pub fn highest() -> Self {
        Self::new::<String>(ConditionValueType::Highest, None)
    }

    pub fn number<S: Into<String>>(value: S) -> Self {
        Self::new(ConditionValueType::Number, Some(value))
    }

    pub fn percent<S: Into<String>>(value: S) -> Self {
        Self::new(ConditionValueType::Percent, Some(value))
    }

    pub fn percentile<S: Into<String>>(value: S) -> Self {
        Self::new(ConditionValueType::Percentile, Some(value))
    }

    pub fn formula<S: Into<String>>(value: S) -> Self {
        Self::new(ConditionValueType::Formula, Some(value))
    }

    fn needs_value(&self) -> bool {
        !matches!(
            self.value_type,
            ConditionValueType::Lowest | ConditionValueType::Highest
        )
    }
}

/// Evenly spaced percent thresholds for an icon set
fn icon_thresholds(icons: IconSetType) -> Vec<ValueObject> {
    let count = icons.icon_count();
    (0..count)
        .map(|i| ValueObject::percent(((i * 100 + count / 2) / count).to_string()))
        .collect()
}

/// One `<cfRule>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalRule {
    pub condition_type: ConditionType,
    /// Evaluation order, 1 first; 0 until the worksheet assigns one
    pub priority: u32,
    /// Differential style applied when the rule matches
    pub style: StyleRef,
    pub stop_if_true: bool,
    pub operator: ConditionOperator,
    pub formulas: Vec<String>,
    pub text: Option<String>,
    pub time_period: TimePeriod,
    pub rank: Option<u32>,
    /// How `rank` is interpreted
    pub value_type: ConditionValueType,
    pub bottom: bool,
    pub above_average: bool,
    pub equal_average: bool,
    pub std_dev: Option<u32>,
    pub value_objects: Vec<ValueObject>,
    /// Color scale colors (one per value object) or the data bar color
    pub colors: Vec<Color>,
    pub icon_set: IconSetType,
    pub reverse: bool,
    pub show_value: bool,
}

impl Default for ConditionalRule {
    fn default() -> Self {
        Self {
            condition_type: ConditionType::Unset,
            priority: 0,
            style: StyleRef::DefaultDirect,
            stop_if_true: false,
            operator: ConditionOperator::Unset,
            formulas: Vec::new(),
            text: None,
            time_period: TimePeriod::Unset,
            rank: None,
            value_type: ConditionValueType::Unset,
            bottom: false,
            above_average: true,
            equal_average: false,
            std_dev: None,
            value_objects: Vec::new(),
            colors: Vec::new(),
            icon_set: IconSetType::Unset,
            reverse: false,
            show_value: true,
        }
    }
}

impl ConditionalRule {
    fn of_type(condition_type: ConditionType) -> Self {
        Self {
            condition_type,
            ..Self::default()
        }
    }
}

/// Closed set of rule variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Duplicate,
    Unique,
    Top,
    Bottom,
    AboveAverage,
    BelowAverage,
    /// Cell value comparison
    Value,
    Expression,
    Text,
    Blank,
    NotBlank,
    Error,
    NotError,
    /// Dates in a time period
    Date,
    ColorScale,
    DataBar,
    IconSet,
}

impl RuleKind {
    /// Name used in validation errors
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Duplicate => "duplicate",
            RuleKind::Unique => "unique",
            RuleKind::Top => "top",
            RuleKind::Bottom => "bottom",
            RuleKind::AboveAverage => "above average",
            RuleKind::BelowAverage => "below average",
            RuleKind::Value => "value",
            RuleKind::Expression => "expression",
            RuleKind::Text => "text",
            RuleKind::Blank => "blank",
            RuleKind::NotBlank => "not blank",
            RuleKind::Error => "error",
            RuleKind::NotError => "not error",
            RuleKind::Date => "date",
            RuleKind::ColorScale => "color scale",
            RuleKind::DataBar => "data bar",
            RuleKind::IconSet => "icon set",
        }
    }

    /// Rule with this variant's defaults
    fn initial_rule(self) -> ConditionalRule {
        match self {
            RuleKind::Duplicate => ConditionalRule::of_type(ConditionType::DuplicateValues),
            RuleKind::Unique => ConditionalRule::of_type(ConditionType::UniqueValues),
            RuleKind::Top => ConditionalRule {
                rank: Some(10),
                ..ConditionalRule::of_type(ConditionType::Top10)
            },
            RuleKind::Bottom => ConditionalRule {
                rank: Some(10),
                bottom: true,
                ..ConditionalRule::of_type(ConditionType::Top10)
            },
            RuleKind::AboveAverage => ConditionalRule::of_type(ConditionType::AboveAverage),
            RuleKind::BelowAverage => ConditionalRule {
                above_average: false,
                ..ConditionalRule::of_type(ConditionType::AboveAverage)
            },
            RuleKind::Value => ConditionalRule::of_type(ConditionType::CellIs),
            RuleKind::Expression => ConditionalRule::of_type(ConditionType::Expression),
            RuleKind::Text => ConditionalRule::of_type(ConditionType::ContainsText),
            RuleKind::Blank => ConditionalRule::of_type(ConditionType::ContainsBlanks),
            RuleKind::NotBlank => ConditionalRule::of_type(ConditionType::NotContainsBlanks),
            RuleKind::Error => ConditionalRule::of_type(ConditionType::ContainsErrors),
            RuleKind::NotError => ConditionalRule::of_type(ConditionType::NotContainsErrors),
            RuleKind::Date => ConditionalRule::of_type(ConditionType::TimePeriod),
            RuleKind::ColorScale => ConditionalRule::of_type(ConditionType::ColorScale),
            RuleKind::DataBar => ConditionalRule {
                value_objects: vec![ValueObject::lowest(), ValueObject::highest()],
                ..ConditionalRule::of_type(ConditionType::DataBar)
            },
            RuleKind::IconSet => ConditionalRule {
                icon_set: IconSetType::Arrows3,
                value_objects: icon_thresholds(IconSetType::Arrows3),
                ..ConditionalRule::of_type(ConditionType::IconSet)
            },
        }
    }

    /// Variant of a rule read from markup
    pub fn of(rule: &ConditionalRule) -> Result<Self> {
        let kind = match rule.condition_type {
            ConditionType::Unset => return Err(Error::missing("cfRule", "type")),
            ConditionType::Expression => RuleKind::Expression,
            ConditionType::CellIs => RuleKind::Value,
            ConditionType::ColorScale => RuleKind::ColorScale,
            ConditionType::DataBar => RuleKind::DataBar,
            ConditionType::IconSet => RuleKind::IconSet,
            ConditionType::Top10 if rule.bottom => RuleKind::Bottom,
            ConditionType::Top10 => RuleKind::Top,
            ConditionType::UniqueValues => RuleKind::Unique,
            ConditionType::DuplicateValues => RuleKind::Duplicate,
            ConditionType::ContainsText
            | ConditionType::NotContainsText
            | ConditionType::BeginsWith
            | ConditionType::EndsWith => RuleKind::Text,
            ConditionType::ContainsBlanks => RuleKind::Blank,
            ConditionType::NotContainsBlanks => RuleKind::NotBlank,
            ConditionType::ContainsErrors => RuleKind::Error,
            ConditionType::NotContainsErrors => RuleKind::NotError,
            ConditionType::TimePeriod => RuleKind::Date,
            ConditionType::AboveAverage if rule.above_average => RuleKind::AboveAverage,
            ConditionType::AboveAverage => RuleKind::BelowAverage,
        };
        Ok(kind)
    }

    /// Check that every field this variant needs is set
    pub fn validate(self, rule: &ConditionalRule) -> Result<()> {
        let missing = |field| Err(Error::missing(self.name(), field));

        match self {
            RuleKind::Top | RuleKind::Bottom => {
                if rule.value_type.is_unset() {
                    return missing("value_type");
                }
                if rule.rank.is_none() {
                    return missing("rank");
                }
            }
            RuleKind::Value => {
                if rule.operator.is_unset() {
                    return missing("operator");
                }
                if rule.formulas.len() < rule.operator.operand_count() {
                    return missing("formula");
                }
            }
            RuleKind::Expression => {
                if rule.formulas.is_empty() {
                    return missing("formula");
                }
            }
            RuleKind::Text => {
                if rule.operator.text_condition().is_none() {
                    return missing("operator");
                }
                if rule.text.as_deref().map_or(true, str::is_empty) {
                    return missing("text");
                }
            }
            RuleKind::Date => {
                if rule.time_period.is_unset() {
                    return missing("time_period");
                }
            }
            RuleKind::ColorScale => {
                if !(2..=3).contains(&rule.value_objects.len()) {
                    return missing("cfvo");
                }
                if rule.colors.len() != rule.value_objects.len() {
                    return missing("color");
                }
            }
            RuleKind::DataBar => {
                if rule.value_objects.len() != 2 {
                    return missing("cfvo");
                }
                if rule.colors.is_empty() {
                    return missing("color");
                }
            }
            RuleKind::IconSet => {
                if rule.icon_set.is_unset() {
                    return missing("icon_set");
                }
                if rule.value_objects.len() < 2 {
                    return missing("cfvo");
                }
            }
            _ => {}
        }

        for value_object in &rule.value_objects {
            if value_object.value_type.is_unset() {
                return missing("cfvo type");
            }
            if value_object.needs_value() && value_object.value.is_none() {
                return missing("cfvo val");
            }
        }
        Ok(())
    }
}

/// Field change carried by a [`RuleOption`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Change {
    /// Only fixes the variant
    Init,
    Style(Style),
    StopIfTrue(bool),
    Priority(u32),
    Rank(u32),
    ValueType(ConditionValueType),
    EqualAverage(bool),
    StdDev(u32),
    Compare(ConditionOperator, Vec<String>),
    Formula(String),
    Text(ConditionOperator, String),
    Period(TimePeriod),
    Point(ValueObject, Color),
    Minimum(ValueObject),
    Maximum(ValueObject),
    Color(Color),
    Icons(IconSetType),
    Thresholds(Vec<ValueObject>),
    Reverse(bool),
    ShowValue(bool),
}

impl Change {
    fn apply(self, rule: &mut ConditionalRule, style: &mut Option<Style>) {
        match self {
            Change::Init => {}
            Change::Style(s) => *style = Some(s),
            Change::StopIfTrue(stop) => rule.stop_if_true = stop,
            Change::Priority(priority) => rule.priority = priority,
            Change::Rank(rank) => rule.rank = Some(rank),
            Change::ValueType(value_type) => rule.value_type = value_type,
            Change::EqualAverage(equal) => rule.equal_average = equal,
            Change::StdDev(std_dev) => rule.std_dev = Some(std_dev),
            Change::Compare(operator, formulas) => {
                rule.operator = operator;
                rule.formulas = formulas;
            }
            Change::Formula(formula) => rule.formulas.push(formula),
            Change::Text(operator, text) => {
                if let Some(condition_type) = operator.text_condition() {
                    rule.condition_type = condition_type;
                }
                rule.operator = operator;
                rule.text = Some(text);
            }
            Change::Period(period) => rule.time_period = period,
            Change::Point(value_object, color) => {
                rule.value_objects.push(value_object);
                rule.colors.push(color);
            }
            Change::Minimum(value_object) => set_slot(&mut rule.value_objects, 0, value_object),
            Change::Maximum(value_object) => set_slot(&mut rule.value_objects, 1, value_object),
            Change::Color(color) => rule.colors = vec![color],
            Change::Icons(icons) => {
                rule.icon_set = icons;
                rule.value_objects = icon_thresholds(icons);
            }
            Change::Thresholds(thresholds) => rule.value_objects = thresholds,
            Change::Reverse(reverse) => rule.reverse = reverse,
            Change::ShowValue(show) => rule.show_value = show,
        }
    }
}

fn set_slot(slots: &mut Vec<ValueObject>, index: usize, value: ValueObject) {
    while slots.len() <= index {
        slots.push(if slots.is_empty() {
            ValueObject::lowest()
        } else {
            ValueObject::highest()
        });
    }
    slots[index] = value;
}

/// One configuration step for a [`RuleInfo`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOption {
    kind: RuleKind,
    change: Change,
}

impl RuleOption {
    pub(crate) fn new(kind: RuleKind, change: Change) -> Self {
        Self { kind, change }
    }

    /// Variant the option initializes a rule to
    pub fn kind(&self) -> RuleKind {
        self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum RuleState {
    #[default]
    Uninitialized,
    Initialized {
        kind: RuleKind,
        rule: ConditionalRule,
    },
}

impl RuleState {
    /// Fix the kind on first use; later calls keep the existing rule
    fn ensure_initialized(&mut self, kind: RuleKind) {
        if let RuleState::Uninitialized = self {
            *self = RuleState::Initialized {
                kind,
                rule: kind.initial_rule(),
            };
        }
    }
}

/// Builder state of one conditional formatting rule
///
/// ```
/// use gridmark_core::conditional::rules::{RankOptions, Top};
/// use gridmark_core::{ConditionValueType, RuleInfo, RuleKind};
///
/// let mut rule = RuleInfo::new([Top::rank(5)]);
/// assert_eq!(rule.kind(), Some(RuleKind::Top));
/// assert!(rule.validate().is_err());
///
/// rule.set(Top::value_type(ConditionValueType::Percentile));
/// assert!(rule.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleInfo {
    state: RuleState,
    /// Style definition not yet registered
    style: Option<Style>,
}

impl RuleInfo {
    /// Build a rule from options applied in order
    pub fn new<I: IntoIterator<Item = RuleOption>>(options: I) -> Self {
        let mut info = Self::default();
        for option in options {
            info.set(option);
        }
        info
    }

    /// Wrap a rule read from markup
    pub fn from_rule(rule: ConditionalRule) -> Result<Self> {
        let kind = RuleKind::of(&rule)?;
        Ok(Self {
            state: RuleState::Initialized { kind, rule },
            style: None,
        })
    }

    /// Apply one option
    pub fn set(&mut self, option: RuleOption) -> &mut Self {
        self.state.ensure_initialized(option.kind);
        if let RuleState::Initialized { rule, .. } = &mut self.state {
            option.change.apply(rule, &mut self.style);
        }
        self
    }

    /// Apply one option, builder style
    pub fn with(mut self, option: RuleOption) -> Self {
        self.set(option);
        self
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, RuleState::Initialized { .. })
    }

    pub fn kind(&self) -> Option<RuleKind> {
        match &self.state {
            RuleState::Initialized { kind, .. } => Some(*kind),
            RuleState::Uninitialized => None,
        }
    }

    pub fn rule(&self) -> Option<&ConditionalRule> {
        match &self.state {
            RuleState::Initialized { rule, .. } => Some(rule),
            RuleState::Uninitialized => None,
        }
    }

    pub(crate) fn rule_mut(&mut self) -> Option<&mut ConditionalRule> {
        match &mut self.state {
            RuleState::Initialized { rule, .. } => Some(rule),
            RuleState::Uninitialized => None,
        }
    }

    /// Style definition given through `styles`, if not registered yet
    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    /// Check the rule can be written
    pub fn validate(&self) -> Result<()> {
        match &self.state {
            RuleState::Uninitialized => Err(Error::missing("rule", "type")),
            RuleState::Initialized { kind, rule } => kind.validate(rule),
        }
    }

    /// Register the pending style definition and point the rule at it
    pub(crate) fn register_style(&mut self, styles: &mut StyleRegistry) {
        if let (Some(style), RuleState::Initialized { rule, .. }) = (&self.style, &mut self.state)
        {
            rule.style = styles.add_styles(style.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn option(kind: RuleKind, change: Change) -> RuleOption {
        RuleOption::new(kind, change)
    }

    #[test]
    fn test_first_option_fixes_kind() {
        let mut info = RuleInfo::default();
        assert!(!info.is_initialized());

        info.set(option(RuleKind::Bottom, Change::Rank(3)));
        info.set(option(RuleKind::Duplicate, Change::StopIfTrue(true)));

        assert_eq!(info.kind(), Some(RuleKind::Bottom));
        let rule = info.rule().unwrap();
        assert_eq!(rule.condition_type, ConditionType::Top10);
        assert!(rule.bottom);
        assert_eq!(rule.rank, Some(3));
        assert!(rule.stop_if_true);
    }

    #[test]
    fn test_uninitialized_rule_is_invalid() {
        assert_eq!(
            RuleInfo::default().validate(),
            Err(Error::MissingRequiredField {
                rule: "rule",
                field: "type"
            })
        );
    }

    #[test]
    fn test_rank_needs_value_type() {
        let mut info = RuleInfo::new([option(RuleKind::Top, Change::Init)]);
        assert_eq!(
            info.validate(),
            Err(Error::MissingRequiredField {
                rule: "top",
                field: "value_type"
            })
        );

        info.set(option(
            RuleKind::Top,
            Change::ValueType(ConditionValueType::Percentile),
        ));
        assert_eq!(info.validate(), Ok(()));
    }

    #[test]
    fn test_value_needs_two_formulas_for_between() {
        let info = RuleInfo::new([option(
            RuleKind::Value,
            Change::Compare(ConditionOperator::Between, vec!["1".into()]),
        )]);
        assert_eq!(
            info.validate(),
            Err(Error::missing("value", "formula"))
        );

        let info = info.with(option(RuleKind::Value, Change::Formula("5".into())));
        assert_eq!(info.validate(), Ok(()));
    }

    #[test]
    fn test_icon_set_defaults() {
        let info = RuleInfo::new([option(RuleKind::IconSet, Change::Init)]);
        let rule = info.rule().unwrap();
        assert_eq!(rule.icon_set, IconSetType::Arrows3);
        let values: Vec<_> = rule
            .value_objects
            .iter()
            .map(|v| v.value.as_deref().unwrap())
            .collect();
        assert_eq!(values, vec!["0", "33", "67"]);
        assert_eq!(info.validate(), Ok(()));

        let info = info.with(option(RuleKind::IconSet, Change::Icons(IconSetType::Quarters5)));
        assert_eq!(info.rule().unwrap().value_objects.len(), 5);
    }

    #[test]
    fn test_data_bar_needs_color() {
        let info = RuleInfo::new([option(RuleKind::DataBar, Change::Init)]);
        assert_eq!(info.validate(), Err(Error::missing("data bar", "color")));

        let info = info.with(option(RuleKind::DataBar, Change::Color(Color::rgb(0x63, 0x8E, 0xC6))));
        assert_eq!(info.validate(), Ok(()));
    }

    #[test]
    fn test_threshold_needs_value() {
        let info = RuleInfo::new([
            option(RuleKind::DataBar, Change::Color(Color::rgb(0, 0, 0xFF))),
            option(
                RuleKind::DataBar,
                Change::Minimum(ValueObject::new::<String>(ConditionValueType::Number, None)),
            ),
        ]);
        assert_eq!(info.validate(), Err(Error::missing("data bar", "cfvo val")));
    }

    #[test]
    fn test_kind_of_markup_rule() {
        let rule = ConditionalRule {
            bottom: true,
            ..ConditionalRule::of_type(ConditionType::Top10)
        };
        assert_eq!(RuleKind::of(&rule), Ok(RuleKind::Bottom));

        let rule = ConditionalRule {
            above_average: false,
            ..ConditionalRule::of_type(ConditionType::AboveAverage)
        };
        assert_eq!(RuleKind::of(&rule), Ok(RuleKind::BelowAverage));

        assert!(RuleKind::of(&ConditionalRule::default()).is_err());
    }

    #[test]
    fn test_register_style() {
        let mut registry = StyleRegistry::new();
        let mut info = RuleInfo::new([option(
            RuleKind::Duplicate,
            Change::Style(Style::new().bold(true)),
        )]);
        assert!(info.rule().unwrap().style.is_default());

        info.register_style(&mut registry);
        let style = info.rule().unwrap().style;
        assert_eq!(registry.resolve(style), info.style());
    }
}
