//! One-page PDF report of an analysis.
//!
//! [`ReportLayout`] decides what goes on the page; [`ReportRenderer`] draws
//! it with `genpdf`. Fonts are loaded once, when the renderer is built.

mod layout;

use std::path::Path;

use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::{Color, Style, StyledString};
use genpdf::{Document, Element, PaperSize, SimplePageDecorator};
use tracing::instrument;

pub use layout::{
    EXCERPT_CHARS, ExplanationBlock, FOOTER, Overview, ReportLayout, RiskLevel, TITLE, TacticRow,
};

use crate::types::{AnalysisResult, Explanation};
use crate::{PsychoGuardError, Result};

const GREY: Color = Color::Rgb(100, 116, 139);

/// Renders [`ReportLayout`]s to PDF bytes.
pub struct ReportRenderer {
    fonts: FontFamily<FontData>,
}

impl ReportRenderer {
    /// Load `<family>-Regular.ttf` and siblings from `font_dir`.
    pub fn new(font_dir: impl AsRef<Path>, family: &str) -> Result<Self> {
        let font_dir = font_dir.as_ref();
        let fonts = genpdf::fonts::from_files(font_dir, family, None).map_err(|e| {
            PsychoGuardError::Configuration(format!(
                "font family '{family}' in {}: {e}",
                font_dir.display()
            ))
        })?;
        Ok(Self { fonts })
    }

    /// Lay out and render a report in one step.
    pub fn render(
        &self,
        text: &str,
        analysis: &AnalysisResult,
        explanation: &Explanation,
        url: Option<&str>,
    ) -> Result<Vec<u8>> {
        self.render_layout(&ReportLayout::build(text, analysis, explanation, url))
    }

    #[instrument(name = "report.render", skip_all, fields(rows = layout.rows.len()))]
    pub fn render_layout(&self, layout: &ReportLayout) -> Result<Vec<u8>> {
        let mut doc = Document::new(self.fonts.clone());
        doc.set_title(layout.title);
        doc.set_paper_size(PaperSize::A4);
        doc.set_font_size(10);

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(18);
        doc.set_page_decorator(decorator);

        doc.push(Paragraph::new(StyledString::new(
            layout.title,
            Style::new().bold().with_font_size(18),
        )));
        doc.push(Paragraph::new(StyledString::new(
            layout.generated.as_str(),
            Style::new().with_font_size(9).with_color(GREY),
        )));
        doc.push(Break::new(1));

        doc.push(overview_table(&layout.overview)?);
        doc.push(Break::new(1));

        doc.push(heading("Tactic Breakdown"));
        doc.push(tactic_table(&layout.rows)?);
        doc.push(Break::new(1));

        match &layout.explanation {
            ExplanationBlock::Sections(sections) => {
                doc.push(heading("AI Analysis"));
                for (section, body) in sections {
                    doc.push(Paragraph::new(StyledString::new(
                        section.heading(),
                        Style::new().bold().with_font_size(10),
                    )));
                    doc.push(Paragraph::new(body.as_str()));
                    doc.push(Break::new(0.5));
                }
            }
            ExplanationBlock::Raw(text) => {
                doc.push(heading("AI Analysis"));
                doc.push(Paragraph::new(text.as_str()));
                doc.push(Break::new(0.5));
            }
            ExplanationBlock::None => {}
        }

        doc.push(heading("Analyzed Text (excerpt)"));
        doc.push(Paragraph::new(StyledString::new(
            layout.excerpt.as_str(),
            Style::new().with_font_size(9),
        )));
        if let Some(source) = &layout.source {
            doc.push(Paragraph::new(StyledString::new(
                source.as_str(),
                Style::new().with_font_size(8).with_color(GREY),
            )));
        }

        doc.push(Break::new(1.5));
        doc.push(Paragraph::new(StyledString::new(
            layout.footer,
            Style::new().italic().with_font_size(8).with_color(GREY),
        )));

        let mut out = Vec::new();
        doc.render(&mut out).map_err(report_error)?;
        Ok(out)
    }
}

fn heading(text: &str) -> Paragraph {
    Paragraph::new(StyledString::new(
        text,
        Style::new().bold().with_font_size(13),
    ))
}

fn overview_table(overview: &Overview) -> Result<TableLayout> {
    let tint = hex_color(overview.severity.color());
    let label = || Style::new().with_font_size(8).with_color(GREY);
    let value = || Style::new().bold().with_font_size(16);

    let mut table = TableLayout::new(vec![1, 1, 1]);
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    table
        .row()
        .element(Paragraph::new(StyledString::new("MANIPULATION SCORE", label())).padded(1))
        .element(Paragraph::new(StyledString::new("SEVERITY", label())).padded(1))
        .element(Paragraph::new(StyledString::new("TACTICS FOUND", label())).padded(1))
        .push()
        .map_err(report_error)?;

    table
        .row()
        .element(
            Paragraph::new(StyledString::new(
                overview.score.as_str(),
                value().with_color(tint),
            ))
            .padded(1),
        )
        .element(
            Paragraph::new(StyledString::new(
                overview.severity.as_str(),
                value().with_color(tint),
            ))
            .padded(1),
        )
        .element(
            Paragraph::new(StyledString::new(
                overview.tactics_found.to_string(),
                value(),
            ))
            .padded(1),
        )
        .push()
        .map_err(report_error)?;

    Ok(table)
}

fn tactic_table(rows: &[TacticRow]) -> Result<TableLayout> {
    let header = || Style::new().bold();

    let mut table = TableLayout::new(vec![3, 1, 1]);
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    table
        .row()
        .element(Paragraph::new(StyledString::new("Tactic", header())).padded(1))
        .element(Paragraph::new(StyledString::new("Score", header())).padded(1))
        .element(Paragraph::new(StyledString::new("Risk", header())).padded(1))
        .push()
        .map_err(report_error)?;

    for row in rows {
        table
            .row()
            .element(Paragraph::new(row.tactic.label()).padded(1))
            .element(Paragraph::new(row.score.as_str()).padded(1))
            .element(Paragraph::new(row.risk.as_str()).padded(1))
            .push()
            .map_err(report_error)?;
    }

    Ok(table)
}

fn report_error(e: genpdf::error::Error) -> PsychoGuardError {
    PsychoGuardError::Report(e.to_string())
}

/// Parse `#rrggbb`; anything else renders black.
fn hex_color(hex: &str) -> Color {
    let channel = |range: std::ops::Range<usize>| {
        hex.trim_start_matches('#')
            .get(range)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(0)
    };
    Color::Rgb(channel(0..2), channel(2..4), channel(4..6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_severity_colors() {
        assert!(matches!(hex_color("#ef4444"), Color::Rgb(0xef, 0x44, 0x44)));
        assert!(matches!(hex_color("bogus"), Color::Rgb(0, 0, 0)));
    }

    #[test]
    fn missing_fonts_are_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReportRenderer::new(dir.path(), "NoSuchFamily").err().unwrap();
        assert!(matches!(err, PsychoGuardError::Configuration(_)));
    }
}
