//! End-to-end tests for the worksheet markup round trip

use gridmark::prelude::*;
use gridmark::rules::{ColorScale, DataBar, Expression, IconSet, Text, Top, Value};
use gridmark::{
    read_conditional_formatting, read_hyperlinks, read_relationships, RelationshipType, ValueObject,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn b(s: &str) -> Bounds {
    Bounds::parse(s).unwrap()
}

fn wrap(body: &str) -> String {
    format!(
        "<worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">\
         <sheetData/>{}</worksheet>",
        body
    )
}

/// Build a sheet with every kind of structural part
fn populated(wb: &mut Workbook) -> &mut Worksheet {
    let sheet = wb.worksheet_mut(0).unwrap();

    sheet.set_hyperlink(b("A1"), "https://example.com/a?x=1&y=2").unwrap();
    sheet
        .set_hyperlink(
            b("A2:B3"),
            HyperlinkInfo::location("Summary!C5").with_display("Summary"),
        )
        .unwrap();
    sheet
        .set_hyperlink(
            b("A4"),
            HyperlinkInfo::file("reports/q1.xlsx").with_tooltip("Q1 <draft>"),
        )
        .unwrap();

    let highlight = Style::new().bold(true);
    sheet
        .add_conditional_formatting(
            ConditionalFormatting::new()
                .with_bounds(b("C1:C20"))
                .with_rule(RuleInfo::new([
                    Value::between("1", "\"ten\""),
                    Value::styles(highlight.clone()),
                ]))
                .with_rule(RuleInfo::new([
                    Top::rank(10),
                    Top::percent(),
                    Top::stop_if_true(true),
                ])),
        )
        .unwrap();
    sheet
        .add_conditional_formatting(
            ConditionalFormatting::new()
                .with_bounds(b("D1:D20"))
                .with_bounds(b("F1:F20"))
                .with_rule(RuleInfo::new([
                    ColorScale::lowest(Color::rgb(0xF8, 0x69, 0x6B)),
                    ColorScale::point(ValueObject::percentile("50"), Color::theme(5, -25)),
                    ColorScale::highest(Color::rgb(0x63, 0xBE, 0x7B)),
                ]))
                .with_rule(RuleInfo::new([
                    DataBar::color(Color::rgb(0x63, 0x8E, 0xC6)),
                    DataBar::minimum(ValueObject::number("0")),
                ]))
                .with_rule(RuleInfo::new([
                    IconSet::icons(IconSetType::Arrows4),
                    IconSet::reverse(true),
                ]))
                .with_rule(RuleInfo::new([
                    Text::begins_with("<&>"),
                    Text::styles(highlight),
                ]))
                .with_rule(RuleInfo::new([Expression::formula("MOD(ROW(),2)=0")])),
        )
        .unwrap();

    sheet
}

#[test]
fn test_rules_survive_markup() {
    let mut wb = Workbook::new();
    let sheet = populated(&mut wb);

    let markup = sheet.write_markup().unwrap();
    let blocks = read_conditional_formatting(&wrap(&markup.body)).unwrap();

    let written: Vec<_> = sheet
        .conditional_formats()
        .iter()
        .map(|f| (f.sqref(), f.rules().len()))
        .collect();
    let read: Vec<_> = blocks.iter().map(|f| (f.sqref(), f.rules().len())).collect();
    assert_eq!(written, read);

    for (original, loaded) in sheet.conditional_formats().iter().zip(&blocks) {
        for (a, b) in original.rules().iter().zip(loaded.rules()) {
            assert_eq!(a.kind(), b.kind());
            assert_eq!(a.rule(), b.rule());
        }
    }
}

#[test]
fn test_hyperlinks_survive_markup() {
    let mut wb = Workbook::new();
    let sheet = populated(&mut wb);
    let markup = sheet.write_markup().unwrap();

    let links = read_hyperlinks(&wrap(&markup.body)).unwrap();
    let written: Vec<_> = sheet.hyperlinks().iter().cloned().collect();
    assert_eq!(links, written);

    let rels = read_relationships(markup.rels.as_deref().unwrap()).unwrap();
    let targets: Vec<_> = rels.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(targets, vec!["https://example.com/a?x=1&y=2", "reports/q1.xlsx"]);
    assert!(rels.iter().all(|r| r.mode == gridmark::TargetMode::External));
}

#[test]
fn test_load_into_fresh_workbook() {
    let mut wb = Workbook::new();
    let markup = populated(&mut wb).write_markup().unwrap();

    let mut copy = Workbook::new();
    let sheet = copy.worksheet_mut(0).unwrap();
    sheet
        .load_markup(&wrap(&markup.body), markup.rels.as_deref())
        .unwrap();

    assert_eq!(sheet.hyperlinks().len(), 3);
    assert_eq!(
        sheet.hyperlink("A1").unwrap().unwrap().target().raw(),
        "https://example.com/a?x=1&y=2"
    );
    assert_eq!(
        sheet.hyperlink("B3").unwrap().unwrap().display(),
        Some("Summary")
    );
    assert_eq!(
        sheet.hyperlink("A4").unwrap().unwrap().tooltip(),
        Some("Q1 <draft>")
    );
    assert_eq!(sheet.conditional_formats().len(), 2);

    // Writing again gives the same markup
    assert_eq!(sheet.write_markup().unwrap(), markup);
}

#[test]
fn test_invalid_rule_blocks_writing() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.add_hyperlink(b("A1"), "https://a").unwrap();

    let formatting = ConditionalFormatting::new()
        .with_bounds(b("A1:A5"))
        .with_rule(RuleInfo::new([Top::rank(3)]));
    match gridmark::write_conditional_formatting(&formatting) {
        Err(XlsxError::Core(Error::MissingRequiredField { rule, field })) => {
            assert_eq!((rule, field), ("top", "value_type"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_percentile_rank_reads_back_as_percent() {
    let formatting = ConditionalFormatting::new()
        .with_bounds(b("A1:A50"))
        .with_rule(RuleInfo::new([
            Top::rank(10),
            Top::value_type(ConditionValueType::Percentile),
            Top::priority(1),
        ]));

    let xml = gridmark::write_conditional_formatting(&formatting).unwrap();
    assert!(xml.contains("percent=\"1\""));

    let blocks = read_conditional_formatting(&wrap(&xml)).unwrap();
    let rule = blocks[0].rules()[0].rule().unwrap();
    // top10 only carries a percent flag
    assert_eq!(rule.value_type, ConditionValueType::Percent);
    assert_eq!(rule.rank, Some(10));
    assert!(!rule.bottom);
}

#[test]
fn test_unknown_tokens_are_errors() {
    let xml = wrap(
        "<conditionalFormatting sqref=\"A1\">\
         <cfRule type=\"timePeriod\" priority=\"1\" timePeriod=\"someday\"/>\
         </conditionalFormatting>",
    );
    assert!(matches!(
        read_conditional_formatting(&xml),
        Err(XlsxError::Core(Error::UnrecognizedToken { kind: "timePeriod", .. }))
    ));

    let xml = wrap(
        "<conditionalFormatting sqref=\"A1\">\
         <cfRule type=\"colorScale\" priority=\"1\"><colorScale>\
         <cfvo type=\"median\"/><cfvo type=\"max\"/>\
         <color rgb=\"FF000000\"/><color rgb=\"FFFFFFFF\"/>\
         </colorScale></cfRule></conditionalFormatting>",
    );
    assert!(matches!(
        read_conditional_formatting(&xml),
        Err(XlsxError::Core(Error::UnrecognizedToken { kind: "cfvo type", .. }))
    ));
}

#[test]
fn test_loaded_overlap_is_rejected() {
    let xml = wrap(
        "<hyperlinks>\
         <hyperlink ref=\"A1:B2\" location=\"Sheet1!Z1\"/>\
         <hyperlink ref=\"B2\" location=\"Sheet1!Z2\"/>\
         </hyperlinks>",
    );

    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    assert!(matches!(
        sheet.load_markup(&xml, None),
        Err(XlsxError::Core(Error::OverlapConflict { .. }))
    ));
}

fn rels(entries: &str) -> String {
    format!(
        "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">{}</Relationships>",
        entries
    )
}

const DRAWING_REL: &str = "<Relationship Id=\"rId1\" \
    Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/drawing\" \
    Target=\"../drawings/drawing1.xml\"/>";

#[test]
fn test_hyperlink_never_points_at_a_part() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet
        .load_markup(&wrap(""), Some(&rels(DRAWING_REL)))
        .unwrap();

    sheet
        .add_hyperlink(b("A1"), "../drawings/drawing1.xml")
        .unwrap();

    let rid = sheet.hyperlinks().iter().next().unwrap().rid.clone().unwrap();
    assert_eq!(rid.as_str(), "rId2");
    let table = sheet.relationships().table().unwrap();
    let rel = table.get(&rid).unwrap();
    assert_eq!(rel.rel_type, RelationshipType::Hyperlink);
    assert_eq!(rel.mode, gridmark::TargetMode::External);
    assert_eq!(table.len(), 2);
}

#[test]
fn test_new_link_after_largest_relationship_id() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    let entry = "<Relationship Id=\"rId4294967295\" \
        Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink\" \
        Target=\"https://theirs\" TargetMode=\"External\"/>";
    sheet.load_markup(&wrap(""), Some(&rels(entry))).unwrap();

    sheet.add_hyperlink(b("A1"), "https://mine").unwrap();
    sheet.add_hyperlink(b("A2"), "https://theirs").unwrap();

    let ids: Vec<_> = sheet
        .hyperlinks()
        .iter()
        .map(|link| link.rid.as_ref().unwrap().as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["rId1", "rId4294967295"]);
}

#[test]
fn test_load_into_populated_sheet_is_refused() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.add_hyperlink(b("A1"), "https://mine").unwrap();

    let entry = "<Relationship Id=\"rId1\" \
        Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink\" \
        Target=\"https://theirs\" TargetMode=\"External\"/>";
    let body = wrap("<hyperlinks><hyperlink ref=\"C3\" r:id=\"rId1\"/></hyperlinks>");
    assert!(matches!(
        sheet.load_markup(&body, Some(&rels(entry))),
        Err(XlsxError::Core(Error::SheetNotEmpty(_)))
    ));

    assert_eq!(
        sheet.hyperlink("A1").unwrap().unwrap().target().raw(),
        "https://mine"
    );
    assert!(sheet.hyperlink("C3").unwrap().is_none());
}

#[test]
fn test_out_of_sheet_hyperlink_keeps_markup_loadable() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_hyperlink(b("A1"), "https://a").unwrap();

    assert!(sheet
        .set_hyperlink(Bounds::new(1_048_575, 0, 1_048_576, 0), "https://b")
        .is_err());
    assert_eq!(sheet.hyperlinks().len(), 1);

    let markup = sheet.write_markup().unwrap();
    let mut copy = Workbook::new();
    copy.worksheet_mut(0)
        .unwrap()
        .load_markup(&wrap(&markup.body), markup.rels.as_deref())
        .unwrap();
}

proptest! {
    #[test]
    fn prop_rule_text_survives_markup(
        text in "[A-Za-z0-9<>&\"' ]{1,24}",
        formula in "[A-Za-z0-9<>&\"'=+*/()]{1,24}",
    ) {
        let formatting = ConditionalFormatting::new()
            .with_bounds(b("A1:A10"))
            .with_rule(RuleInfo::new([Text::contains(text.clone())]))
            .with_rule(RuleInfo::new([Expression::formula(formula.clone())]));

        let xml = gridmark::write_conditional_formatting(&formatting).unwrap();
        let blocks = read_conditional_formatting(&wrap(&xml)).unwrap();

        let rules = blocks[0].rules();
        prop_assert_eq!(rules[0].rule().unwrap().text.as_deref(), Some(text.as_str()));
        prop_assert_eq!(&rules[1].rule().unwrap().formulas, &vec![formula]);
    }
}
