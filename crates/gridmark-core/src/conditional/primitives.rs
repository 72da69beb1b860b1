//! Attribute enumerations of `<cfRule>` and `<cfvo>`

use crate::codec::attribute_enum;

attribute_enum! {
    /// How a threshold value (`<cfvo type="..">`) or a rank is interpreted
    pub enum ConditionValueType ("cfvo type") {
        Unset,
        Number => "num",
        Percent => "percent",
        Highest => "max",
        Lowest => "min",
        Formula => "formula",
        Percentile => "percentile",
    }
}

attribute_enum! {
    /// `<cfRule type="..">`
    pub enum ConditionType ("cfRule type") {
        Unset,
        Expression => "expression",
        CellIs => "cellIs",
        ColorScale => "colorScale",
        DataBar => "dataBar",
        IconSet => "iconSet",
        Top10 => "top10",
        UniqueValues => "uniqueValues",
        DuplicateValues => "duplicateValues",
        ContainsText => "containsText",
        NotContainsText => "notContainsText",
        BeginsWith => "beginsWith",
        EndsWith => "endsWith",
        ContainsBlanks => "containsBlanks",
        NotContainsBlanks => "notContainsBlanks",
        ContainsErrors => "containsErrors",
        NotContainsErrors => "notContainsErrors",
        TimePeriod => "timePeriod",
        AboveAverage => "aboveAverage",
    }
}

attribute_enum! {
    /// `<cfRule operator="..">`
    pub enum ConditionOperator ("cfRule operator") {
        Unset,
        LessThan => "lessThan",
        LessThanOrEqual => "lessThanOrEqual",
        Equal => "equal",
        NotEqual => "notEqual",
        GreaterThanOrEqual => "greaterThanOrEqual",
        GreaterThan => "greaterThan",
        Between => "between",
        NotBetween => "notBetween",
        ContainsText => "containsText",
        NotContains => "notContains",
        BeginsWith => "beginsWith",
        EndsWith => "endsWith",
    }
}

impl ConditionOperator {
    /// Number of formulas a cell comparison with this operator needs
    pub fn operand_count(self) -> usize {
        match self {
            ConditionOperator::Between | ConditionOperator::NotBetween => 2,
            _ => 1,
        }
    }

    /// Rule type matching a text operator
    pub(crate) fn text_condition(self) -> Option<ConditionType> {
        match self {
            ConditionOperator::ContainsText => Some(ConditionType::ContainsText),
            ConditionOperator::NotContains => Some(ConditionType::NotContainsText),
            ConditionOperator::BeginsWith => Some(ConditionType::BeginsWith),
            ConditionOperator::EndsWith => Some(ConditionType::EndsWith),
            _ => None,
        }
    }
}

attribute_enum! {
    /// `<cfRule timePeriod="..">`
    pub enum TimePeriod ("timePeriod") {
        Unset,
        Today => "today",
        Yesterday => "yesterday",
        Tomorrow => "tomorrow",
        Last7Days => "last7Days",
        ThisMonth => "thisMonth",
        LastMonth => "lastMonth",
        NextMonth => "nextMonth",
        ThisWeek => "thisWeek",
        LastWeek => "lastWeek",
        NextWeek => "nextWeek",
    }
}

attribute_enum! {
    /// `<iconSet iconSet="..">`
    pub enum IconSetType ("iconSet") {
        Unset,
        Arrows3 => "3Arrows",
        Arrows3Gray => "3ArrowsGray",
        Flags3 => "3Flags",
        TrafficLights3 => "3TrafficLights1",
        TrafficLights3Black => "3TrafficLights2",
        Signs3 => "3Signs",
        Symbols3 => "3Symbols",
        Symbols3Circled => "3Symbols2",
        Arrows4 => "4Arrows",
        Arrows4Gray => "4ArrowsGray",
        RedToBlack4 => "4RedToBlack",
        Rating4 => "4Rating",
        TrafficLights4 => "4TrafficLights",
        Arrows5 => "5Arrows",
        Arrows5Gray => "5ArrowsGray",
        Rating5 => "5Rating",
        Quarters5 => "5Quarters",
    }
}

impl IconSetType {
    /// Number of icons in the set (0 when unset)
    pub fn icon_count(self) -> usize {
        match self {
            IconSetType::Unset => 0,
            IconSetType::Arrows3
            | IconSetType::Arrows3Gray
            | IconSetType::Flags3
            | IconSetType::TrafficLights3
            | IconSetType::TrafficLights3Black
            | IconSetType::Signs3
            | IconSetType::Symbols3
            | IconSetType::Symbols3Circled => 3,
            IconSetType::Arrows4
            | IconSetType::Arrows4Gray
            | IconSetType::RedToBlack4
            | IconSetType::Rating4
            | IconSetType::TrafficLights4 => 4,
            IconSetType::Arrows5
            | IconSetType::Arrows5Gray
            | IconSetType::Rating5
            | IconSetType::Quarters5 => 5,
        }
    }
}
