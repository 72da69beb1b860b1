//! Structured hyperlink values

use crate::bounds::Bounds;
use crate::error::{Error, Result};
use crate::relationships::RelationshipId;
use crate::style::StyleRef;

/// Longest target address the format accepts
pub const MAX_TARGET_LEN: usize = 2_079;

/// Longest tooltip the format accepts
pub const MAX_TOOLTIP_LEN: usize = 255;

/// Where a hyperlink points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HyperlinkTarget {
    /// Web address
    Url(String),
    /// `mailto:` link
    Email {
        address: String,
        subject: Option<String>,
    },
    /// Path to a local or network file
    File(String),
    /// Place inside the workbook (`Sheet2!B4` or a defined name)
    Location(String),
}

impl HyperlinkTarget {
    /// Guess the target kind from a plain string
    ///
    /// `mailto:` is an email, a leading `#` is a location inside the
    /// workbook, a scheme or `www.` prefix is a web address, anything else
    /// is treated as a file.
    pub fn detect(target: &str) -> Self {
        if let Some(rest) = target.strip_prefix("mailto:") {
            return match rest.split_once("?subject=") {
                Some((address, subject)) => HyperlinkTarget::Email {
                    address: address.to_string(),
                    subject: Some(subject.to_string()),
                },
                None => HyperlinkTarget::Email {
                    address: rest.to_string(),
                    subject: None,
                },
            };
        }

        if let Some(location) = target.strip_prefix('#') {
            return HyperlinkTarget::Location(location.to_string());
        }

        if target.contains("://") || target.starts_with("www.") {
            HyperlinkTarget::Url(target.to_string())
        } else {
            HyperlinkTarget::File(target.to_string())
        }
    }

    /// Plain string form; [`detect`](Self::detect) maps it back
    pub fn raw(&self) -> String {
        match self {
            HyperlinkTarget::Url(url) => url.clone(),
            HyperlinkTarget::Email {
                address,
                subject: Some(subject),
            } => format!("mailto:{}?subject={}", address, subject),
            HyperlinkTarget::Email { address, .. } => format!("mailto:{}", address),
            HyperlinkTarget::File(path) => path.clone(),
            HyperlinkTarget::Location(location) => format!("#{}", location),
        }
    }

    /// Check if the target lives outside the workbook
    pub fn is_external(&self) -> bool {
        !matches!(self, HyperlinkTarget::Location(_))
    }

    fn is_blank(&self) -> bool {
        match self {
            HyperlinkTarget::Url(s) | HyperlinkTarget::File(s) | HyperlinkTarget::Location(s) => {
                s.trim().is_empty()
            }
            HyperlinkTarget::Email { address, .. } => address.trim().is_empty(),
        }
    }
}

/// A hyperlink as seen by callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperlinkInfo {
    target: HyperlinkTarget,
    tooltip: Option<String>,
    display: Option<String>,
    style: StyleRef,
}

impl HyperlinkInfo {
    pub fn new(target: HyperlinkTarget) -> Self {
        Self {
            target,
            tooltip: None,
            display: None,
            style: StyleRef::DefaultDirect,
        }
    }

    /// Link to a web address
    pub fn url<S: Into<String>>(url: S) -> Self {
        Self::new(HyperlinkTarget::Url(url.into()))
    }

    /// Link to an email address
    pub fn email<S: Into<String>>(address: S) -> Self {
        Self::new(HyperlinkTarget::Email {
            address: address.into(),
            subject: None,
        })
    }

    /// Link to an email address with a prefilled subject
    pub fn email_with_subject<A: Into<String>, S: Into<String>>(address: A, subject: S) -> Self {
        Self::new(HyperlinkTarget::Email {
            address: address.into(),
            subject: Some(subject.into()),
        })
    }

    /// Link to a file
    pub fn file<S: Into<String>>(path: S) -> Self {
        Self::new(HyperlinkTarget::File(path.into()))
    }

    /// Link to a location inside the workbook
    pub fn location<S: Into<String>>(location: S) -> Self {
        Self::new(HyperlinkTarget::Location(location.into()))
    }

    /// Link to a cell range of another sheet
    pub fn sheet_location(sheet: &str, bounds: Bounds) -> Self {
        let needs_quotes = !sheet.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        let location = if needs_quotes {
            format!("'{}'!{}", sheet.replace('\'', "''"), bounds)
        } else {
            format!("{}!{}", sheet, bounds)
        };
        Self::location(location)
    }

    pub fn with_tooltip<S: Into<String>>(mut self, tooltip: S) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_display<S: Into<String>>(mut self, display: S) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Style to use instead of the default hyperlink style
    pub fn with_style(mut self, style: StyleRef) -> Self {
        self.style = style;
        self
    }

    pub fn target(&self) -> &HyperlinkTarget {
        &self.target
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    pub fn style(&self) -> StyleRef {
        self.style
    }

    /// Split into the stored parts, checking the format's limits
    pub(crate) fn to_record(&self) -> Result<LinkRecord> {
        let raw = self.target.raw();
        if raw.chars().count() > MAX_TARGET_LEN {
            return Err(Error::InvalidLinkShape(format!(
                "target exceeds {} characters",
                MAX_TARGET_LEN
            )));
        }
        if let Some(tooltip) = &self.tooltip {
            if tooltip.chars().count() > MAX_TOOLTIP_LEN {
                return Err(Error::InvalidLinkShape(format!(
                    "tooltip exceeds {} characters",
                    MAX_TOOLTIP_LEN
                )));
            }
        }

        let (external, location) = match &self.target {
            HyperlinkTarget::Location(location) => (None, Some(location.clone())),
            _ => (Some(raw), None),
        };

        Ok(LinkRecord {
            external,
            location,
            tooltip: self.tooltip.clone(),
            display: self.display.clone(),
            style: self.style,
        })
    }

    /// Rebuild from a stored hyperlink and its resolved relationship target
    pub(crate) fn from_record(
        hyperlink: &Hyperlink,
        external: Option<&str>,
        style: StyleRef,
    ) -> Option<Self> {
        let target = match (external, hyperlink.location.as_deref()) {
            (Some(target), Some(fragment)) => {
                HyperlinkTarget::detect(&format!("{}#{}", target, fragment))
            }
            (Some(target), None) => HyperlinkTarget::detect(target),
            (None, Some(location)) => HyperlinkTarget::Location(location.to_string()),
            (None, None) => return None,
        };

        Some(Self {
            target,
            tooltip: hyperlink.tooltip.clone(),
            display: hyperlink.display.clone(),
            style,
        })
    }
}

/// Argument accepted by `Hyperlinks::add`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    /// Plain target string, kind detected automatically
    Target(String),
    /// Fully specified hyperlink
    Info(HyperlinkInfo),
}

impl Link {
    /// Normalize into a structured hyperlink
    ///
    /// A structured target must survive a trip through its raw string: a
    /// web address needs a scheme or `www.` prefix, and a file path may not
    /// look like any other kind.
    pub fn into_info(self) -> Result<HyperlinkInfo> {
        let info = match self {
            Link::Target(target) => HyperlinkInfo::new(HyperlinkTarget::detect(target.trim())),
            Link::Info(info) => info,
        };
        if info.target.is_blank() {
            return Err(Error::InvalidLinkShape("hyperlink target is empty".into()));
        }
        // Only the raw string is stored, the kind is detected again on read
        let raw = info.target.raw();
        if HyperlinkTarget::detect(&raw) != info.target {
            return Err(Error::InvalidLinkShape(format!(
                "'{}' would be read back as a different kind of target",
                raw
            )));
        }
        Ok(info)
    }
}

impl From<&str> for Link {
    fn from(target: &str) -> Self {
        Link::Target(target.to_string())
    }
}

impl From<String> for Link {
    fn from(target: String) -> Self {
        Link::Target(target)
    }
}

impl From<HyperlinkInfo> for Link {
    fn from(info: HyperlinkInfo) -> Self {
        Link::Info(info)
    }
}

impl From<&HyperlinkInfo> for Link {
    fn from(info: &HyperlinkInfo) -> Self {
        Link::Info(info.clone())
    }
}

/// Stored hyperlink (`<hyperlink ref=".." r:id=".." location=".."/>`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    pub bounds: Bounds,
    /// Relationship holding the external target
    pub rid: Option<RelationshipId>,
    /// Location inside the workbook, or fragment of the external target
    pub location: Option<String>,
    pub tooltip: Option<String>,
    pub display: Option<String>,
}

/// Hyperlink split into the parts that are stored separately
#[derive(Debug)]
pub(crate) struct LinkRecord {
    pub external: Option<String>,
    pub location: Option<String>,
    pub tooltip: Option<String>,
    pub display: Option<String>,
    pub style: StyleRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(
            HyperlinkTarget::detect("https://example.com"),
            HyperlinkTarget::Url("https://example.com".into())
        );
        assert_eq!(
            HyperlinkTarget::detect("www.example.com"),
            HyperlinkTarget::Url("www.example.com".into())
        );
        assert_eq!(
            HyperlinkTarget::detect("mailto:a@b.c?subject=Hi"),
            HyperlinkTarget::Email {
                address: "a@b.c".into(),
                subject: Some("Hi".into())
            }
        );
        assert_eq!(
            HyperlinkTarget::detect("#Sheet2!A1"),
            HyperlinkTarget::Location("Sheet2!A1".into())
        );
        assert_eq!(
            HyperlinkTarget::detect("../docs/report.pdf"),
            HyperlinkTarget::File("../docs/report.pdf".into())
        );
    }

    #[test]
    fn test_raw_detect_roundtrip() {
        let targets = [
            HyperlinkInfo::url("https://example.com/a?b=c"),
            HyperlinkInfo::email("a@b.c"),
            HyperlinkInfo::email_with_subject("a@b.c", "Report"),
            HyperlinkInfo::file("C:\\data\\book.xlsx"),
            HyperlinkInfo::location("Totals"),
        ];
        for info in targets {
            let target = info.target();
            assert_eq!(&HyperlinkTarget::detect(&target.raw()), target);
        }
    }

    #[test]
    fn test_sheet_location() {
        let bounds = Bounds::parse("B4").unwrap();
        assert_eq!(
            HyperlinkInfo::sheet_location("Sheet2", bounds).target().raw(),
            "#Sheet2!B4"
        );
        assert_eq!(
            HyperlinkInfo::sheet_location("Q1 Data", bounds).target().raw(),
            "#'Q1 Data'!B4"
        );
    }

    #[test]
    fn test_blank_link_is_rejected() {
        assert!(matches!(
            Link::from("   ").into_info(),
            Err(Error::InvalidLinkShape(_))
        ));
        assert!(matches!(
            Link::from(HyperlinkInfo::url("")).into_info(),
            Err(Error::InvalidLinkShape(_))
        ));
    }

    #[test]
    fn test_kind_must_survive_detection() {
        assert!(matches!(
            Link::from(HyperlinkInfo::url("example.com")).into_info(),
            Err(Error::InvalidLinkShape(_))
        ));
        assert!(matches!(
            Link::from(HyperlinkInfo::file("https://example.com/a.pdf")).into_info(),
            Err(Error::InvalidLinkShape(_))
        ));
        assert!(Link::from(HyperlinkInfo::url("https://example.com"))
            .into_info()
            .is_ok());
        assert_eq!(
            Link::from("example.com").into_info().unwrap().target(),
            &HyperlinkTarget::File("example.com".into())
        );
    }

    #[test]
    fn test_record_limits() {
        let long = format!("https://example.com/{}", "a".repeat(MAX_TARGET_LEN));
        assert!(HyperlinkInfo::url(long).to_record().is_err());

        let tooltip = "t".repeat(MAX_TOOLTIP_LEN + 1);
        assert!(HyperlinkInfo::url("https://a")
            .with_tooltip(tooltip)
            .to_record()
            .is_err());
    }

    #[test]
    fn test_location_has_no_external_target() {
        let record = HyperlinkInfo::location("Sheet2!A1").to_record().unwrap();
        assert!(record.external.is_none());
        assert_eq!(record.location.as_deref(), Some("Sheet2!A1"));

        let record = HyperlinkInfo::url("https://a").to_record().unwrap();
        assert_eq!(record.external.as_deref(), Some("https://a"));
        assert!(record.location.is_none());
    }
}
