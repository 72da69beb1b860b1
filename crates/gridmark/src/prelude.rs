//! Prelude module - common imports for gridmark users
//!
//! ```rust
//! use gridmark::prelude::*;
//! ```

pub use crate::rules;
pub use crate::{
    // Rule option traits
    AverageOptions,
    Bounds,
    CellAddress,

    // Styles
    Color,
    ConditionOperator,
    ConditionValueType,
    // Conditional formatting
    ConditionalFormatting,
    // Error types
    Error,
    // Hyperlinks
    HyperlinkInfo,
    HyperlinkTarget,
    IconSetType,
    Link,
    NamedStyle,
    RankOptions,
    Result,
    RuleInfo,
    RuleVariant,
    Style,
    StyleRef,
    TimePeriod,
    // Main types
    Workbook,
    WorkbookSettings,
    Worksheet,
    // Extension traits
    WorksheetMarkupExt,

    XlsxError,
};
