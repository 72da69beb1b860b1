//! SpreadsheetML writer
//!
//! Produces the markup of the structural worksheet parts: the `.rels` part,
//! the `<conditionalFormatting>` blocks and the `<hyperlinks>` block.
//! Enumeration attributes go through [`AttributeEnum::encode`], so an unset
//! value never produces an attribute.

use gridmark_core::{
    AttributeEnum, Color, ConditionType, ConditionValueType, ConditionalFormatting,
    ConditionalRule, Hyperlinks, Relationships, ValueObject, Worksheet,
};
use quick_xml::escape::escape;

use crate::error::XlsxResult;

pub(crate) const PACKAGE_RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";

/// Write a complete relationships part
pub fn write_relationships(relationships: &Relationships) -> String {
    let mut content = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<Relationships xmlns=\"{}\">",
        PACKAGE_RELATIONSHIPS_NS
    );

    for rel in relationships.iter() {
        content.push_str(&format!(
            "\n    <Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"",
            escape(rel.id.as_str()),
            escape(&rel.rel_type.uri()),
            escape(&rel.target)
        ));
        push_enum(&mut content, "TargetMode", rel.mode);
        content.push_str("/>");
    }

    content.push_str("\n</Relationships>");
    content
}

/// Write the `<hyperlinks>` block, or nothing for an empty collection
pub fn write_hyperlinks(hyperlinks: &Hyperlinks) -> String {
    if hyperlinks.is_empty() {
        return String::new();
    }

    let mut content = String::from("\n    <hyperlinks>");
    for link in hyperlinks.iter() {
        content.push_str(&format!("\n        <hyperlink ref=\"{}\"", link.bounds));
        push_attr(&mut content, "r:id", link.rid.as_ref().map(|id| id.as_str()));
        push_attr(&mut content, "location", link.location.as_deref());
        push_attr(&mut content, "tooltip", link.tooltip.as_deref());
        push_attr(&mut content, "display", link.display.as_deref());
        content.push_str("/>");
    }
    content.push_str("\n    </hyperlinks>");
    content
}

/// Write one `<conditionalFormatting>` block
///
/// Every rule is validated first; an invalid rule fails with
/// `MissingRequiredField` and nothing is written.
pub fn write_conditional_formatting(formatting: &ConditionalFormatting) -> XlsxResult<String> {
    formatting.validate()?;

    let mut content = format!(
        "\n    <conditionalFormatting sqref=\"{}\"",
        formatting.sqref()
    );
    push_flag(&mut content, "pivot", formatting.pivot());
    content.push('>');

    for rule in formatting.rules().iter().filter_map(|info| info.rule()) {
        write_rule(&mut content, rule);
    }

    content.push_str("\n    </conditionalFormatting>");
    Ok(content)
}

/// Write the structural parts of a worksheet body, in schema order
pub fn write_worksheet_fragments(sheet: &Worksheet) -> XlsxResult<String> {
    let mut content = String::new();
    for formatting in sheet.conditional_formats() {
        content.push_str(&write_conditional_formatting(formatting)?);
    }
    content.push_str(&write_hyperlinks(sheet.hyperlinks()));
    Ok(content)
}

/// Write the relationships part of a worksheet, if it has one
pub fn write_worksheet_rels(sheet: &Worksheet) -> Option<String> {
    sheet.relationships().table().map(write_relationships)
}

fn write_rule(content: &mut String, rule: &ConditionalRule) {
    let ranked = rule.condition_type == ConditionType::Top10;

    content.push_str("\n        <cfRule");
    push_enum(content, "type", rule.condition_type);
    if let Some(id) = rule.style.id() {
        content.push_str(&format!(" dxfId=\"{}\"", id));
    }
    content.push_str(&format!(" priority=\"{}\"", rule.priority.max(1)));
    push_flag(content, "stopIfTrue", rule.stop_if_true);
    if rule.condition_type == ConditionType::AboveAverage && !rule.above_average {
        content.push_str(" aboveAverage=\"0\"");
    }
    if ranked {
        let percent = matches!(
            rule.value_type,
            ConditionValueType::Percent | ConditionValueType::Percentile
        );
        push_flag(content, "percent", percent);
        push_flag(content, "bottom", rule.bottom);
    }
    push_enum(content, "operator", rule.operator);
    push_attr(content, "text", rule.text.as_deref());
    push_enum(content, "timePeriod", rule.time_period);
    if let (true, Some(rank)) = (ranked, rule.rank) {
        content.push_str(&format!(" rank=\"{}\"", rank));
    }
    if let Some(std_dev) = rule.std_dev {
        content.push_str(&format!(" stdDev=\"{}\"", std_dev));
    }
    push_flag(content, "equalAverage", rule.equal_average);
    content.push('>');

    for formula in &rule.formulas {
        content.push_str(&format!(
            "\n            <formula>{}</formula>",
            escape(formula)
        ));
    }

    match rule.condition_type {
        ConditionType::ColorScale => {
            content.push_str("\n            <colorScale>");
            write_value_objects(content, &rule.value_objects);
            for color in &rule.colors {
                content.push_str(&format!("\n                {}", color_element(color)));
            }
            content.push_str("\n            </colorScale>");
        }
        ConditionType::DataBar => {
            content.push_str("\n            <dataBar");
            if !rule.show_value {
                content.push_str(" showValue=\"0\"");
            }
            content.push('>');
            write_value_objects(content, &rule.value_objects);
            if let Some(color) = rule.colors.first() {
                content.push_str(&format!("\n                {}", color_element(color)));
            }
            content.push_str("\n            </dataBar>");
        }
        ConditionType::IconSet => {
            content.push_str("\n            <iconSet");
            push_enum(content, "iconSet", rule.icon_set);
            push_flag(content, "reverse", rule.reverse);
            if !rule.show_value {
                content.push_str(" showValue=\"0\"");
            }
            content.push('>');
            write_value_objects(content, &rule.value_objects);
            content.push_str("\n            </iconSet>");
        }
        _ => {}
    }

    content.push_str("\n        </cfRule>");
}

fn write_value_objects(content: &mut String, value_objects: &[ValueObject]) {
    for value_object in value_objects {
        content.push_str("\n                <cfvo");
        push_enum(content, "type", value_object.value_type);
        push_attr(content, "val", value_object.value.as_deref());
        content.push_str("/>");
    }
}

fn color_element(color: &Color) -> String {
    match *color {
        Color::Rgb { r, g, b } => format!("<color rgb=\"FF{:02X}{:02X}{:02X}\"/>", r, g, b),
        Color::Theme { index, tint: 0 } => format!("<color theme=\"{}\"/>", index),
        Color::Theme { index, tint } => format!(
            "<color theme=\"{}\" tint=\"{}\"/>",
            index,
            f64::from(tint) / 100.0
        ),
        Color::Indexed(index) => format!("<color indexed=\"{}\"/>", index),
    }
}

fn push_attr(content: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        content.push_str(&format!(" {}=\"{}\"", name, escape(value)));
    }
}

fn push_enum<T: AttributeEnum>(content: &mut String, name: &str, value: T) {
    push_attr(content, name, value.encode());
}

fn push_flag(content: &mut String, name: &str, value: bool) {
    if value {
        content.push_str(&format!(" {}=\"1\"", name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmark_core::conditional::rules::{
        ColorScale, DataBar, IconSet, RankOptions, RuleVariant, Text, Top,
    };
    use gridmark_core::{
        Bounds, Error, HyperlinkInfo, IconSetType, RelationshipType, RuleInfo, Style, Workbook,
    };
    use pretty_assertions::assert_eq;

    fn b(s: &str) -> Bounds {
        Bounds::parse(s).unwrap()
    }

    #[test]
    fn test_write_relationships() {
        let mut rels = Relationships::new();
        rels.add_link(RelationshipType::Hyperlink, "https://example.com/?a=1&b=2");

        let xml = write_relationships(&rels);
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(
            "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink\" Target=\"https://example.com/?a=1&amp;b=2\" TargetMode=\"External\"/>"
        ));
    }

    #[test]
    fn test_write_hyperlinks() {
        let mut wb = Workbook::new();
        let sheet = wb.worksheet_mut(0).unwrap();
        sheet.add_hyperlink(b("A1"), "https://a").unwrap();
        sheet
            .add_hyperlink(
                b("B2:C3"),
                HyperlinkInfo::location("Sheet1!A1").with_tooltip("Back \"home\""),
            )
            .unwrap();

        let xml = write_hyperlinks(sheet.hyperlinks());
        assert_eq!(
            xml,
            "\n    <hyperlinks>\
             \n        <hyperlink ref=\"A1\" r:id=\"rId1\"/>\
             \n        <hyperlink ref=\"B2:C3\" location=\"Sheet1!A1\" tooltip=\"Back &quot;home&quot;\"/>\
             \n    </hyperlinks>"
        );
    }

    #[test]
    fn test_empty_hyperlinks_write_nothing() {
        assert_eq!(write_hyperlinks(&Hyperlinks::new()), "");
    }

    #[test]
    fn test_invalid_rule_is_not_written() {
        let formatting = ConditionalFormatting::new()
            .with_bounds(b("A1:A10"))
            .with_rule(RuleInfo::new([Top::rank(3)]));

        match write_conditional_formatting(&formatting) {
            Err(crate::XlsxError::Core(Error::MissingRequiredField { rule, field })) => {
                assert_eq!((rule, field), ("top", "value_type"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_write_top_percent() {
        let formatting = ConditionalFormatting::new()
            .with_bounds(b("A1:A10"))
            .with_rule(RuleInfo::new([
                Top::rank(15),
                Top::percent(),
                Top::priority(2),
            ]));

        let xml = write_conditional_formatting(&formatting).unwrap();
        assert!(xml.contains(
            "<cfRule type=\"top10\" priority=\"2\" percent=\"1\" rank=\"15\">"
        ));
    }

    #[test]
    fn test_write_text_rule_escapes() {
        let formatting = ConditionalFormatting::new()
            .with_bounds(b("B1:B4"))
            .with_rule(RuleInfo::new([
                Text::contains("<a&b>"),
                Text::styles(Style::new().bold(true)),
            ]));

        let xml = write_conditional_formatting(&formatting).unwrap();
        assert!(xml.contains(
            "type=\"containsText\" priority=\"1\" operator=\"containsText\" text=\"&lt;a&amp;b&gt;\""
        ));
        assert!(!xml.contains("dxfId"));
    }

    #[test]
    fn test_write_visualizations() {
        let formatting = ConditionalFormatting::new()
            .with_bounds(b("C1:C9"))
            .with_rule(RuleInfo::new([
                ColorScale::lowest(Color::rgb(0xF8, 0x69, 0x6B)),
                ColorScale::highest(Color::theme(4, 40)),
            ]))
            .with_rule(RuleInfo::new([
                DataBar::color(Color::rgb(0x63, 0x8E, 0xC6)),
                DataBar::show_value(false),
            ]))
            .with_rule(RuleInfo::new([IconSet::icons(IconSetType::Flags3)]));

        let xml = write_conditional_formatting(&formatting).unwrap();
        assert!(xml.contains("<cfvo type=\"min\"/>"));
        assert!(xml.contains("<color rgb=\"FFF8696B\"/>"));
        assert!(xml.contains("<color theme=\"4\" tint=\"0.4\"/>"));
        assert!(xml.contains("<dataBar showValue=\"0\">"));
        assert!(xml.contains("<iconSet iconSet=\"3Flags\">"));
        assert!(xml.contains("<cfvo type=\"percent\" val=\"67\"/>"));
    }

    #[test]
    fn test_worksheet_without_relationships() {
        let wb = Workbook::new();
        assert!(write_worksheet_rels(wb.worksheet(0).unwrap()).is_none());
        assert_eq!(write_worksheet_fragments(wb.worksheet(0).unwrap()).unwrap(), "");
    }
}
