//! SpreadsheetML reader
//!
//! Parses the markup produced by [`writer`](crate::writer) (and by Excel)
//! back into the document model. Enumeration attributes are decoded
//! strictly: an unknown token is an error, never a silently unset value.

use std::str::FromStr;

use gridmark_core::{
    AttributeEnum, Bounds, Color, ConditionOperator, ConditionType, ConditionValueType,
    ConditionalFormatting, ConditionalRule, Hyperlink, IconSetType, Relationship,
    RelationshipId, RelationshipType, Relationships, RuleInfo, StyleId, StyleRef, TargetMode,
    TimePeriod, ValueObject, Worksheet,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};

/// Read a relationships part
pub fn read_relationships(xml: &str) -> XlsxResult<Relationships> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut rels = Relationships::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut id = None;
                let mut target = None;
                let mut rel_type = None;
                let mut mode = TargetMode::Internal;

                for attr in e.attributes().flatten() {
                    let value = attr.unescape_value()?;
                    match attr.key.as_ref() {
                        b"Id" => id = Some(value.into_owned()),
                        b"Target" => target = Some(value.into_owned()),
                        b"Type" => rel_type = Some(RelationshipType::from_uri(&value)),
                        b"TargetMode" => mode = decode(&value)?,
                        _ => {}
                    }
                }

                match (id, target, rel_type) {
                    (Some(id), Some(target), Some(rel_type)) => rels.insert(Relationship {
                        id: RelationshipId::new(id),
                        rel_type,
                        target,
                        mode,
                    }),
                    _ => {
                        return Err(XlsxError::InvalidFormat(
                            "Relationship needs Id, Type and Target".into(),
                        ))
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
    }

    Ok(rels)
}

/// Read the `<hyperlink>` records of a worksheet
pub fn read_hyperlinks(xml: &str) -> XlsxResult<Vec<Hyperlink>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut links = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if e.local_name().as_ref() == b"hyperlink" =>
            {
                links.push(read_hyperlink(&e)?);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
    }

    Ok(links)
}

fn read_hyperlink(e: &BytesStart) -> XlsxResult<Hyperlink> {
    let mut bounds = None;
    let mut link = Hyperlink {
        bounds: Bounds::from_cell(0, 0),
        rid: None,
        location: None,
        tooltip: None,
        display: None,
    };

    for attr in e.attributes().flatten() {
        let value = attr.unescape_value()?;
        // r:id is the only prefixed attribute
        if attr.key.prefix().is_some() {
            if attr.key.local_name().as_ref() == b"id" {
                link.rid = Some(RelationshipId::new(value.into_owned()));
            }
            continue;
        }
        match attr.key.as_ref() {
            b"ref" => bounds = Some(Bounds::parse(&value)?),
            b"location" => link.location = Some(value.into_owned()),
            b"tooltip" => link.tooltip = Some(value.into_owned()),
            b"display" => link.display = Some(value.into_owned()),
            _ => {}
        }
    }

    link.bounds = bounds.ok_or_else(|| XlsxError::InvalidFormat("hyperlink without ref".into()))?;
    Ok(link)
}

/// Read every `<conditionalFormatting>` block of a worksheet
pub fn read_conditional_formatting(xml: &str) -> XlsxResult<Vec<ConditionalFormatting>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut parser = FormattingParser::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => parser.start(&e)?,
            Ok(Event::Empty(e)) => {
                parser.start(&e)?;
                parser.end(e.local_name().as_ref())?;
            }
            Ok(Event::End(e)) => parser.end(e.local_name().as_ref())?,
            Ok(Event::Text(e)) => {
                if parser.in_formula {
                    parser.formula.push_str(&e.unescape()?);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
    }

    Ok(parser.done)
}

/// Load the structural parts of a worksheet
///
/// Every part is parsed before the sheet is touched, and the sheet must
/// not have hyperlinks, relationships or conditional formatting yet. On
/// error the sheet is left as it was. Loaded hyperlinks skip the count
/// limit; conditional formatting is validated.
pub fn load_worksheet(
    sheet: &mut Worksheet,
    sheet_xml: &str,
    rels_xml: Option<&str>,
) -> XlsxResult<()> {
    let relationships = rels_xml.map(read_relationships).transpose()?;
    let hyperlinks = read_hyperlinks(sheet_xml)?;
    let formats = read_conditional_formatting(sheet_xml)?;

    sheet.load_parts(relationships, hyperlinks, formats)?;

    log::debug!(
        "loaded sheet '{}': {} hyperlinks, {} conditional formats",
        sheet.name(),
        sheet.hyperlinks().len(),
        sheet.conditional_formats().len()
    );
    Ok(())
}

/// Event state for `<conditionalFormatting>` blocks
#[derive(Default)]
struct FormattingParser {
    done: Vec<ConditionalFormatting>,
    block: Option<ConditionalFormatting>,
    rule: Option<ConditionalRule>,
    in_formula: bool,
    formula: String,
}

impl FormattingParser {
    fn start(&mut self, e: &BytesStart) -> XlsxResult<()> {
        let name = e.local_name();

        if name.as_ref() == b"conditionalFormatting" {
            self.block = Some(read_block(e)?);
            return Ok(());
        }
        if self.block.is_none() {
            return Ok(());
        }
        if name.as_ref() == b"cfRule" {
            self.rule = Some(read_rule(e)?);
            return Ok(());
        }

        let Some(rule) = self.rule.as_mut() else {
            return Ok(());
        };

        match name.as_ref() {
            b"formula" => {
                self.in_formula = true;
                self.formula.clear();
            }
            b"colorScale" => {}
            b"dataBar" => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"showValue" {
                        rule.show_value = parse_bool(&attr.unescape_value()?)?;
                    }
                }
            }
            b"iconSet" => {
                // Omitted attribute means the default set
                rule.icon_set = IconSetType::TrafficLights3;
                for attr in e.attributes().flatten() {
                    let value = attr.unescape_value()?;
                    match attr.key.as_ref() {
                        b"iconSet" => rule.icon_set = decode(&value)?,
                        b"reverse" => rule.reverse = parse_bool(&value)?,
                        b"showValue" => rule.show_value = parse_bool(&value)?,
                        _ => {}
                    }
                }
            }
            b"cfvo" => rule.value_objects.push(read_value_object(e)?),
            b"color" => {
                if let Some(color) = read_color(e)? {
                    rule.colors.push(color);
                }
            }
            other => log::warn!(
                "skipping unsupported cfRule child <{}>",
                String::from_utf8_lossy(other)
            ),
        }
        Ok(())
    }

    fn end(&mut self, name: &[u8]) -> XlsxResult<()> {
        match name {
            b"formula" if self.in_formula => {
                self.in_formula = false;
                if let Some(rule) = self.rule.as_mut() {
                    rule.formulas.push(std::mem::take(&mut self.formula));
                }
            }
            b"cfRule" => {
                if let (Some(rule), Some(block)) = (self.rule.take(), self.block.as_mut()) {
                    block.add_rule(RuleInfo::from_rule(rule)?);
                }
            }
            b"conditionalFormatting" => {
                if let Some(block) = self.block.take() {
                    self.done.push(block);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

fn read_block(e: &BytesStart) -> XlsxResult<ConditionalFormatting> {
    let mut block = ConditionalFormatting::new();
    for attr in e.attributes().flatten() {
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"sqref" => {
                for range in value.split_whitespace() {
                    block.add_bounds(Bounds::parse(range)?);
                }
            }
            b"pivot" => block = block.with_pivot(parse_bool(&value)?),
            _ => {}
        }
    }
    Ok(block)
}

fn read_rule(e: &BytesStart) -> XlsxResult<ConditionalRule> {
    let mut rule = ConditionalRule::default();
    let mut percent = false;

    for attr in e.attributes().flatten() {
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"type" => rule.condition_type = decode::<ConditionType>(&value)?,
            b"dxfId" => {
                rule.style = StyleRef::Id(StyleId::from_index(parse_number(&value, "dxfId")?))
            }
            b"priority" => rule.priority = parse_number(&value, "priority")?,
            b"stopIfTrue" => rule.stop_if_true = parse_bool(&value)?,
            b"aboveAverage" => rule.above_average = parse_bool(&value)?,
            b"percent" => percent = parse_bool(&value)?,
            b"bottom" => rule.bottom = parse_bool(&value)?,
            b"operator" => rule.operator = decode::<ConditionOperator>(&value)?,
            b"text" => rule.text = Some(value.into_owned()),
            b"timePeriod" => rule.time_period = decode::<TimePeriod>(&value)?,
            b"rank" => rule.rank = Some(parse_number(&value, "rank")?),
            b"stdDev" => rule.std_dev = Some(parse_number(&value, "stdDev")?),
            b"equalAverage" => rule.equal_average = parse_bool(&value)?,
            _ => {}
        }
    }

    if rule.condition_type == ConditionType::Top10 {
        rule.value_type = if percent {
            ConditionValueType::Percent
        } else {
            ConditionValueType::Number
        };
    }
    Ok(rule)
}

fn read_value_object(e: &BytesStart) -> XlsxResult<ValueObject> {
    let mut value_type = ConditionValueType::Unset;
    let mut value = None;
    for attr in e.attributes().flatten() {
        let attr_value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"type" => value_type = decode(&attr_value)?,
            b"val" => value = Some(attr_value.into_owned()),
            _ => {}
        }
    }
    Ok(ValueObject::new(value_type, value))
}

fn read_color(e: &BytesStart) -> XlsxResult<Option<Color>> {
    let mut rgb = None;
    let mut theme = None;
    let mut tint = 0.0_f64;
    let mut indexed = None;

    for attr in e.attributes().flatten() {
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"rgb" => {
                rgb = Some(
                    Color::from_hex(&value)
                        .ok_or_else(|| XlsxError::Parse(format!("invalid rgb color: {}", value)))?,
                )
            }
            b"theme" => theme = Some(parse_number::<u8>(&value, "theme")?),
            b"tint" => tint = parse_number(&value, "tint")?,
            b"indexed" => indexed = Some(parse_number::<u8>(&value, "indexed")?),
            _ => {}
        }
    }

    let color = rgb
        .or_else(|| theme.map(|index| Color::theme(index, tint_percent(tint))))
        .or(indexed.map(Color::Indexed));
    if color.is_none() {
        log::warn!("skipping color without rgb, theme or indexed value");
    }
    Ok(color)
}

/// Tint fraction (-1.0..=1.0) as a whole percentage
fn tint_percent(tint: f64) -> i8 {
    (tint * 100.0).round().clamp(-100.0, 100.0) as i8
}

fn decode<T: AttributeEnum>(value: &str) -> XlsxResult<T> {
    Ok(T::decode(Some(value))?)
}

fn parse_bool(value: &str) -> XlsxResult<bool> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(XlsxError::Parse(format!("invalid boolean: {}", other))),
    }
}

fn parse_number<T: FromStr>(value: &str, name: &str) -> XlsxResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| XlsxError::Parse(format!("invalid {} value: {}", name, value)))
}
