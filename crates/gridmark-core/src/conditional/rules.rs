//! Rule variants
//!
//! Each variant is a unit struct whose associated functions produce
//! [`RuleOption`]s. The first option given to a [`RuleInfo`](super::RuleInfo)
//! decides its variant:
//!
//! ```
//! use gridmark_core::conditional::rules::{RuleVariant, Value};
//! use gridmark_core::{RuleInfo, RuleKind, Style};
//!
//! let rule = RuleInfo::new([
//!     Value::greater_than("100"),
//!     Value::styles(Style::new().bold(true)),
//!     Value::stop_if_true(true),
//! ]);
//! assert_eq!(rule.kind(), Some(RuleKind::Value));
//! assert!(rule.validate().is_ok());
//! ```

use super::primitives::{ConditionOperator, ConditionValueType, IconSetType, TimePeriod};
use super::rule::{Change, RuleKind, RuleOption, ValueObject};
use crate::style::{Color, Style};

/// Options every variant accepts
pub trait RuleVariant {
    const KIND: RuleKind;

    /// Option that only selects the variant
    fn init() -> RuleOption {
        RuleOption::new(Self::KIND, Change::Init)
    }

    /// Style applied to matching cells
    fn styles(style: Style) -> RuleOption {
        RuleOption::new(Self::KIND, Change::Style(style))
    }

    fn stop_if_true(stop: bool) -> RuleOption {
        RuleOption::new(Self::KIND, Change::StopIfTrue(stop))
    }

    /// Explicit evaluation order; the worksheet numbers rules without one
    fn priority(priority: u32) -> RuleOption {
        RuleOption::new(Self::KIND, Change::Priority(priority))
    }
}

/// Options of the top/bottom rank variants
pub trait RankOptions: RuleVariant {
    /// Number of items, or percentage depending on the value type
    fn rank(rank: u32) -> RuleOption {
        RuleOption::new(Self::KIND, Change::Rank(rank))
    }

    fn value_type(value_type: ConditionValueType) -> RuleOption {
        RuleOption::new(Self::KIND, Change::ValueType(value_type))
    }

    /// Rank counts items
    fn items() -> RuleOption {
        Self::value_type(ConditionValueType::Number)
    }

    /// Rank is a percentage
    fn percent() -> RuleOption {
        Self::value_type(ConditionValueType::Percent)
    }
}

/// Options of the above/below average variants
pub trait AverageOptions: RuleVariant {
    /// Also match values equal to the average
    fn equal_average(equal: bool) -> RuleOption {
        RuleOption::new(Self::KIND, Change::EqualAverage(equal))
    }

    /// Compare against this many standard deviations from the average
    fn std_dev(std_dev: u32) -> RuleOption {
        RuleOption::new(Self::KIND, Change::StdDev(std_dev))
    }
}

macro_rules! variants {
    ($($(#[$meta:meta])* $name:ident,)+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name;

            impl RuleVariant for $name {
                const KIND: RuleKind = RuleKind::$name;
            }
        )+
    };
}

variants! {
    /// Highlight duplicated values
    Duplicate,
    /// Highlight values that occur once
    Unique,
    /// Highlight the highest ranked values
    Top,
    /// Highlight the lowest ranked values
    Bottom,
    AboveAverage,
    BelowAverage,
    /// Compare cell values against formulas
    Value,
    /// Match where a formula evaluates to true
    Expression,
    /// Match on cell text
    Text,
    Blank,
    NotBlank,
    /// Cells holding an error value
    Error,
    NotError,
    /// Dates within a time period
    Date,
    ColorScale,
    DataBar,
    IconSet,
}

impl RankOptions for Top {}
impl RankOptions for Bottom {}
impl AverageOptions for AboveAverage {}
impl AverageOptions for BelowAverage {}

impl Value {
    fn compare(operator: ConditionOperator, formulas: Vec<String>) -> RuleOption {
        RuleOption::new(RuleKind::Value, Change::Compare(operator, formulas))
    }

    /// Operator and its operands
    pub fn operator<I, S>(operator: ConditionOperator, formulas: I) -> RuleOption
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::compare(operator, formulas.into_iter().map(Into::into).collect())
    }

    pub fn equal<S: Into<String>>(formula: S) -> RuleOption {
        Self::compare(ConditionOperator::Equal, vec![formula.into()])
    }

    pub fn not_equal<S: Into<String>>(formula: S) -> RuleOption {
        Self::compare(ConditionOperator::NotEqual, vec![formula.into()])
    }

    pub fn greater_than<S: Into<String>>(formula: S) -> RuleOption {
        Self::compare(ConditionOperator::GreaterThan, vec![formula.into()])
    }

    pub fn greater_than_or_equal<S: Into<String>>(formula: S) -> RuleOption {
        Self::compare(ConditionOperator::GreaterThanOrEqual, vec![formula.into()])
    }

    pub fn less_than<S: Into<String>>(formula: S) -> RuleOption {
        Self::compare(ConditionOperator::LessThan, vec![formula.into()])
    }

    pub fn less_than_or_equal<S: Into<String>>(formula: S) -> RuleOption {
        Self::compare(ConditionOperator::LessThanOrEqual, vec![formula.into()])
    }

    pub fn between<A: Into<String>, B: Into<String>>(from: A, to: B) -> RuleOption {
        Self::compare(ConditionOperator::Between, vec![from.into(), to.into()])
    }

    pub fn not_between<A: Into<String>, B: Into<String>>(from: A, to: B) -> RuleOption {
        Self::compare(ConditionOperator::NotBetween, vec![from.into(), to.into()])
    }
}

impl Expression {
    /// Append a formula
    pub fn formula<S: Into<String>>(formula: S) -> RuleOption {
        RuleOption::new(RuleKind::Expression, Change::Formula(formula.into()))
    }
}

impl Text {
    fn text(operator: ConditionOperator, text: String) -> RuleOption {
        RuleOption::new(RuleKind::Text, Change::Text(operator, text))
    }

    pub fn contains<S: Into<String>>(text: S) -> RuleOption {
        Self::text(ConditionOperator::ContainsText, text.into())
    }

    pub fn not_contains<S: Into<String>>(text: S) -> RuleOption {
        Self::text(ConditionOperator::NotContains, text.into())
    }

    pub fn begins_with<S: Into<String>>(text: S) -> RuleOption {
        Self::text(ConditionOperator::BeginsWith, text.into())
    }

    pub fn ends_with<S: Into<String>>(text: S) -> RuleOption {
        Self::text(ConditionOperator::EndsWith, text.into())
    }
}

impl Date {
    pub fn period(period: TimePeriod) -> RuleOption {
        RuleOption::new(RuleKind::Date, Change::Period(period))
    }
}

impl ColorScale {
    /// Append a threshold with its color
    pub fn point(value_object: ValueObject, color: Color) -> RuleOption {
        RuleOption::new(RuleKind::ColorScale, Change::Point(value_object, color))
    }

    pub fn lowest(color: Color) -> RuleOption {
        Self::point(ValueObject::lowest(), color)
    }

    pub fn highest(color: Color) -> RuleOption {
        Self::point(ValueObject::highest(), color)
    }
}

impl DataBar {
    pub fn color(color: Color) -> RuleOption {
        RuleOption::new(RuleKind::DataBar, Change::Color(color))
    }

    /// Value drawn as an empty bar
    pub fn minimum(value_object: ValueObject) -> RuleOption {
        RuleOption::new(RuleKind::DataBar, Change::Minimum(value_object))
    }

    /// Value drawn as a full bar
    pub fn maximum(value_object: ValueObject) -> RuleOption {
        RuleOption::new(RuleKind::DataBar, Change::Maximum(value_object))
    }

    pub fn show_value(show: bool) -> RuleOption {
        RuleOption::new(RuleKind::DataBar, Change::ShowValue(show))
    }
}

impl IconSet {
    /// Icon set to draw; resets thresholds to evenly spaced percentages
    pub fn icons(icons: IconSetType) -> RuleOption {
        RuleOption::new(RuleKind::IconSet, Change::Icons(icons))
    }

    pub fn thresholds<I: IntoIterator<Item = ValueObject>>(thresholds: I) -> RuleOption {
        RuleOption::new(
            RuleKind::IconSet,
            Change::Thresholds(thresholds.into_iter().collect()),
        )
    }

    pub fn reverse(reverse: bool) -> RuleOption {
        RuleOption::new(RuleKind::IconSet, Change::Reverse(reverse))
    }

    pub fn show_value(show: bool) -> RuleOption {
        RuleOption::new(RuleKind::IconSet, Change::ShowValue(show))
    }
}
