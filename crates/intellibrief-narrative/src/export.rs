//! CSV and standalone HTML renderings of a set of briefs.

use std::fmt::Write as _;

use chrono::NaiveDate;
use intellibrief_core::Brief;

const CSV_HEADERS: [&str; 8] = [
    "Company Name",
    "Website",
    "Summary",
    "Pitch Angle",
    "Subject Line",
    "Signal Tag",
    "Tech Stack",
    "Created At",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Html,
}

impl ExportFormat {
    /// Parses `csv` or `html`, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "html" => Some(ExportFormat::Html),
            _ => None,
        }
    }

    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Html => "text/html; charset=utf-8",
        }
    }

    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "intellibrief-export.csv",
            ExportFormat::Html => "intellibrief-export.html",
        }
    }

    #[must_use]
    pub fn render(self, briefs: &[Brief], generated_on: NaiveDate) -> String {
        match self {
            ExportFormat::Csv => to_csv(briefs),
            ExportFormat::Html => to_html(briefs, generated_on),
        }
    }
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// One header row plus one row per brief. Every field is quoted.
#[must_use]
pub fn to_csv(briefs: &[Brief]) -> String {
    let mut lines = vec![CSV_HEADERS.join(",")];
    for brief in briefs {
        let c = &brief.content;
        let created = brief.created_at.format(DATE_FORMAT).to_string();
        let tech = c.tech_stack.join("; ");
        let row = [
            c.company_name.as_str(),
            c.website.as_deref().unwrap_or_default(),
            c.narrative.summary.as_str(),
            c.narrative.pitch_angle.as_str(),
            c.narrative.subject_line.as_str(),
            c.narrative.signal_tag.as_str(),
            tech.as_str(),
            created.as_str(),
        ];
        lines.push(row.map(csv_field).join(","));
    }
    lines.join("\n")
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const HTML_STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:960px;margin:2rem auto;\
color:#1f2937}.brief{border:1px solid #e5e7eb;border-radius:8px;padding:1.5rem;margin-bottom:\
1.5rem}.brief h2{margin-top:0}.section{margin:1rem 0}.section h3{font-size:1rem;color:#4b5563}\
.section p{white-space:pre-wrap}.tech span{display:inline-block;background:#eef2ff;\
border-radius:4px;padding:2px 8px;margin:2px}.meta{color:#6b7280;font-size:.875rem}";

fn section(out: &mut String, heading: &str, body: &str) {
    let _ = write!(
        out,
        "<div class=\"section\"><h3>{heading}</h3><p>{}</p></div>",
        escape_html(body)
    );
}

/// A self-contained HTML document. All brief text is escaped.
#[must_use]
pub fn to_html(briefs: &[Brief], generated_on: NaiveDate) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>IntelliBrief Export</title>\
         <style>{HTML_STYLE}</style></head><body><h1>IntelliBrief Export</h1>\
         <p class=\"meta\">Generated on {}</p>",
        generated_on.format(DATE_FORMAT)
    );

    for brief in briefs {
        let c = &brief.content;
        let _ = write!(
            out,
            "<div class=\"brief\"><h2>{}</h2>",
            escape_html(&c.company_name)
        );
        if let Some(website) = &c.website {
            let _ = write!(out, "<p class=\"meta\">{}</p>", escape_html(website));
        }
        section(&mut out, "Summary", &c.narrative.summary);
        section(&mut out, "Pitch Angle", &c.narrative.pitch_angle);
        section(
            &mut out,
            "Subject Line",
            &format!("\"{}\"", c.narrative.subject_line),
        );
        if !c.tech_stack.is_empty() {
            out.push_str("<div class=\"section tech\"><h3>Tech Stack</h3>");
            for tech in &c.tech_stack {
                let _ = write!(out, "<span>{}</span>", escape_html(tech));
            }
            out.push_str("</div>");
        }
        section(&mut out, "What NOT to Pitch", &c.narrative.what_not_to_pitch);
        let _ = write!(
            out,
            "<p class=\"meta\">Created {}</p></div>",
            brief.created_at.format(DATE_FORMAT)
        );
    }

    out.push_str("</body></html>");
    out
}
