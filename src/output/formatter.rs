//! Output formatters: console, JSON, Markdown, HTML and PDF

use crate::config::OutputFormat;
use crate::error::{AnalyzerError, Result};
use crate::output::report::{AnalysisReport, SectionReport, NO_MISSING_KEYWORDS};
use crate::processing::sections::SectionTier;
use askama::Template;
use colored::{Color, Colorize};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::path::Path;

/// Trait for rendering an analysis report as text
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Fixed-layout PDF using the built-in Helvetica font
pub struct PdfFormatter {
    font_size: f32,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
    pdf_formatter: PdfFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ATS Analysis Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 30px; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .score-strong { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-partial { background: #ffc107; color: #000; }
        .score-weak { background: #dc3545; }
        .metrics { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; margin: 20px 0; }
        .metric { background: #f8f9fa; padding: 15px; border-radius: 6px; border-left: 4px solid #007acc; }
        .progress { background: #e9ecef; border-radius: 6px; height: 14px; }
        .progress-bar { background: #007acc; border-radius: 6px; height: 14px; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        .tip { background: #f8f9fa; padding: 10px 15px; border-left: 4px solid #17a2b8; margin: 10px 0; border-radius: 6px; }
        .tier-strong { border-left-color: #28a745; }
        .tier-moderate { border-left-color: #ffc107; }
        .tier-low { border-left-color: #dc3545; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>ATS Analysis Report</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <div class="section">
            <h2>Summary</h2>
            <h3>ATS Score: {{ similarity_score }}% <span class="score-badge {{ score_class }}">{{ score_label }}</span></h3>
            <div class="progress"><div class="progress-bar" style="width: {{ progress_width }}%"></div></div>
            <p><strong>Verdict:</strong> {{ verdict }}</p>
            <div class="metrics">
                <div class="metric"><h4>Skill Match</h4><p><strong>{{ skill_match }}%</strong></p></div>
                <div class="metric"><h4>Missing Keywords</h4><p><strong>{{ missing_count }}</strong></p></div>
            </div>
        </div>

        <div class="section">
            <h2>Missing Keywords</h2>
            {% if missing_keywords.is_empty() %}
            <p>{{ no_missing_message }}</p>
            {% else %}
            <p>{{ missing_keywords|join(", ") }}</p>
            {% endif %}
        </div>

        <div class="section">
            <h2>Readability Suggestions</h2>
            {% for tip in readability_tips %}
            <div class="tip">{{ tip }}</div>
            {% endfor %}
        </div>

        <div class="section">
            <h2>Matched Keywords ({{ matched_count }})</h2>
            <p>{{ matched_keywords|join(", ") }}</p>
        </div>

        <div class="section">
            <h2>Section Scores</h2>
            {% for section in sections %}
            <div class="tip tier-{{ section.tier }}">
                <h4>{{ section.name }}: {{ section.score }}% ({{ section.tier }})</h4>
                <p><small>Header: {{ section.header }}</small></p>
                <p>{{ section.feedback }}</p>
            </div>
            {% endfor %}
        </div>

        <div class="metadata">
            <p><strong>Generated by ats-analyzer v{{ version }}</strong></p>
            <p><strong>Resume:</strong> {{ resume_source }} | <strong>Job:</strong> {{ job_source }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    similarity_score: String,
    progress_width: String,
    score_class: String,
    score_label: String,
    verdict: String,
    skill_match: String,
    missing_count: usize,
    missing_keywords: Vec<String>,
    no_missing_message: String,
    readability_tips: Vec<String>,
    matched_count: usize,
    matched_keywords: Vec<String>,
    sections: Vec<HtmlSection>,
    version: String,
    resume_source: String,
    job_source: String,
}

struct HtmlSection {
    name: String,
    header: String,
    score: String,
    tier: String,
    feedback: String,
}

/// Badge label for an ATS score
fn score_label(score: f64) -> &'static str {
    if score >= 75.0 {
        "STRONG"
    } else if score >= 50.0 {
        "GOOD"
    } else if score >= 30.0 {
        "PARTIAL"
    } else {
        "WEAK"
    }
}

fn header_label(section: &SectionReport) -> String {
    match &section.header {
        Some(header) => format!("\"{}\"", header),
        None => "not found".to_string(),
    }
}

fn display_name(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| source.to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let badge = score_label(score);
        let color = match badge {
            "STRONG" => Color::Green,
            "GOOD" => Color::BrightGreen,
            "PARTIAL" => Color::Yellow,
            _ => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    /// Fixed-width bar, e.g. `[████████░░░░] 66.67%`
    fn format_progress_bar(&self, score: f64, width: usize) -> String {
        let filled = ((score.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(width - filled));
        format!("[{}] {:.2}%", self.colorize(&bar, Color::Cyan), score)
    }

    fn tier_color(tier: SectionTier) -> Color {
        match tier {
            SectionTier::Strong => Color::Green,
            SectionTier::Moderate => Color::Yellow,
            SectionTier::Low => Color::Red,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let summary = &report.summary;

        output.push_str(&self.format_header("ATS RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "ATS Score: {:.2}% {}\n",
            summary.similarity_score,
            self.format_score_badge(summary.similarity_score)
        ));
        output.push_str(&format!("{}\n", self.format_progress_bar(summary.similarity_score, 40)));
        output.push_str(&format!("Skill Match: {:.2}%\n", summary.skill_match_percent));
        output.push_str(&format!("Missing Keywords: {}\n", summary.missing_count));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&summary.verdict, Color::Cyan)));

        output.push_str(&self.format_header("Missing Keywords", 2));
        if report.missing_keywords.is_empty() {
            output.push_str(&format!("{}\n", self.colorize(NO_MISSING_KEYWORDS, Color::Green)));
        } else {
            output.push_str(&format!(
                "{}\n",
                self.colorize(&report.missing_keywords.join(", "), Color::Yellow)
            ));
            let hidden = report.truncated_missing();
            if hidden > 0 {
                output.push_str(&format!("... and {} more\n", hidden));
            }
        }

        output.push_str(&self.format_header("Readability Suggestions", 2));
        for tip in &report.readability_tips {
            output.push_str(&format!("  • {}\n", tip));
        }

        output.push_str(&self.format_header(
            &format!("Matched Keywords ({})", summary.matched_count),
            2,
        ));
        if report.matched_keywords.is_empty() {
            output.push_str("None\n");
        } else {
            output.push_str(&format!(
                "{}\n",
                self.colorize(&report.matched_keywords.join(", "), Color::Green)
            ));
            let hidden = report.truncated_matched();
            if hidden > 0 {
                output.push_str(&format!("... and {} more\n", hidden));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Section Scores", 2));
            for section in &report.sections {
                output.push_str(&format!(
                    "{}: {:.2}% {}\n",
                    section.name,
                    section.score,
                    self.colorize(
                        &format!("[{}]", section.tier.label().to_uppercase()),
                        Self::tier_color(section.tier)
                    )
                ));
                output.push_str(&format!("   Header: {}\n", header_label(section)));
                output.push_str(&format!("   {}\n", section.feedback));
                if !section.matched.is_empty() {
                    output.push_str(&format!("   Matched: {}\n", section.matched.join(", ")));
                }
            }
        }

        output.push_str(&format!(
            "\n{} Generated by ats-analyzer v{} | Resume: {} | Job: {}\n",
            self.colorize("ℹ", Color::Blue),
            report.metadata.tool_version,
            display_name(&report.metadata.resume_source),
            display_name(&report.metadata.job_source)
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let summary = &report.summary;
        let label = score_label(summary.similarity_score);

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            processing_time: report.metadata.processing_time_ms,
            similarity_score: format!("{:.2}", summary.similarity_score),
            progress_width: format!("{:.0}", summary.similarity_score.clamp(0.0, 100.0)),
            score_class: format!("score-{}", label.to_lowercase()),
            score_label: label.to_string(),
            verdict: summary.verdict.clone(),
            skill_match: format!("{:.2}", summary.skill_match_percent),
            missing_count: summary.missing_count,
            missing_keywords: report.missing_keywords.clone(),
            no_missing_message: NO_MISSING_KEYWORDS.to_string(),
            readability_tips: report.readability_tips.clone(),
            matched_count: summary.matched_count,
            matched_keywords: report.matched_keywords.clone(),
            sections: report
                .sections
                .iter()
                .map(|section| HtmlSection {
                    name: section.name.clone(),
                    header: header_label(section),
                    score: format!("{:.2}", section.score),
                    tier: section.tier.label().to_string(),
                    feedback: section.feedback.clone(),
                })
                .collect(),
            version: report.metadata.tool_version.clone(),
            resume_source: display_name(&report.metadata.resume_source),
            job_source: display_name(&report.metadata.job_source),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| AnalyzerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let summary = &report.summary;

        output.push_str("# ATS Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                display_name(&report.metadata.resume_source),
                display_name(&report.metadata.job_source)
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        output.push_str(&format!(
            "| ATS Score | {:.2}% ({}) |\n",
            summary.similarity_score,
            score_label(summary.similarity_score)
        ));
        output.push_str(&format!("| Skill Match | {:.2}% |\n", summary.skill_match_percent));
        output.push_str(&format!("| Missing Keywords | {} |\n\n", summary.missing_count));
        output.push_str(&format!("**Verdict:** {}\n\n", summary.verdict));

        output.push_str("## Missing Keywords\n\n");
        if report.missing_keywords.is_empty() {
            output.push_str(&format!("{}\n\n", NO_MISSING_KEYWORDS));
        } else {
            output.push_str(&format!("{}\n\n", report.missing_keywords.join(", ")));
            let hidden = report.truncated_missing();
            if hidden > 0 {
                output.push_str(&format!("*... and {} more*\n\n", hidden));
            }
        }

        output.push_str("## Readability Suggestions\n\n");
        for tip in &report.readability_tips {
            output.push_str(&format!("- {}\n", tip));
        }
        output.push('\n');

        output.push_str(&format!("## Matched Keywords ({})\n\n", summary.matched_count));
        if !report.matched_keywords.is_empty() {
            output.push_str(&format!("{}\n\n", report.matched_keywords.join(", ")));
            let hidden = report.truncated_matched();
            if hidden > 0 {
                output.push_str(&format!("*... and {} more*\n\n", hidden));
            }
        }

        output.push_str("## Section Scores\n\n");
        output.push_str("| Section | Header | Score | Tier |\n");
        output.push_str("|---------|--------|-------|------|\n");
        for section in &report.sections {
            output.push_str(&format!(
                "| {} | {} | {:.2}% | {} |\n",
                section.name,
                header_label(section),
                section.score,
                section.tier
            ));
        }
        output.push('\n');
        for section in &report.sections {
            output.push_str(&format!("- **{}:** {}\n", section.name, section.feedback));
        }

        if self.include_metadata {
            output.push_str("\n---\n\n");
            output.push_str(&format!(
                "*Generated by ats-analyzer v{}*\n",
                report.metadata.tool_version
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl PdfFormatter {
    const PAGE_WIDTH: f32 = 210.0;
    const PAGE_HEIGHT: f32 = 297.0;
    const MARGIN: f32 = 20.0;
    const LINE_HEIGHT: f32 = 6.0;
    const WRAP_COLUMNS: usize = 90;

    pub fn new(font_size: f32) -> Self {
        Self { font_size }
    }

    /// Plain text lines laid out on the PDF pages
    pub fn text_lines(&self, report: &AnalysisReport) -> Vec<String> {
        let summary = &report.summary;
        let mut lines = vec![
            "ATS Analysis Report".to_string(),
            format!(
                "Generated: {}",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            String::new(),
            format!("ATS Score: {:.2}%", summary.similarity_score),
            format!("Skill Match: {:.2}%", summary.skill_match_percent),
            format!("Verdict: {}", summary.verdict),
            String::new(),
            "Missing Keywords:".to_string(),
        ];

        if report.missing_keywords.is_empty() {
            lines.push(NO_MISSING_KEYWORDS.to_string());
        } else {
            lines.extend(report.missing_keywords.iter().cloned());
        }

        lines.push(String::new());
        lines.push("Suggestions:".to_string());
        lines.extend(report.readability_tips.iter().map(|tip| format!("- {}", tip)));

        lines.push(String::new());
        lines.push("Section Scores:".to_string());
        for section in &report.sections {
            lines.push(format!(
                "{}: {:.2}% ({}) - {}",
                section.name, section.score, section.tier, section.feedback
            ));
        }

        lines.iter().flat_map(|line| Self::wrap(line, Self::WRAP_COLUMNS)).collect()
    }

    fn wrap(line: &str, columns: usize) -> Vec<String> {
        if line.chars().count() <= columns {
            return vec![line.to_string()];
        }

        let mut wrapped = Vec::new();
        let mut current = String::new();
        for word in line.split_whitespace() {
            if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > columns {
                wrapped.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            wrapped.push(current);
        }
        wrapped
    }

    /// Render the report to PDF bytes, starting a new page whenever the
    /// current one is full.
    pub fn render(&self, report: &AnalysisReport) -> Result<Vec<u8>> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            "ATS Analysis Report",
            Mm(Self::PAGE_WIDTH),
            Mm(Self::PAGE_HEIGHT),
            "Layer 1",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AnalyzerError::OutputFormatting(e.to_string()))?;

        let mut layer = doc.get_page(first_page).get_layer(first_layer);
        let mut y = Self::PAGE_HEIGHT - Self::MARGIN;

        for line in self.text_lines(report) {
            if y < Self::MARGIN {
                let (page, page_layer) =
                    doc.add_page(Mm(Self::PAGE_WIDTH), Mm(Self::PAGE_HEIGHT), "Layer 1");
                layer = doc.get_page(page).get_layer(page_layer);
                y = Self::PAGE_HEIGHT - Self::MARGIN;
            }
            if !line.is_empty() {
                layer.use_text(line, self.font_size, Mm(Self::MARGIN), Mm(y), &font);
            }
            y -= Self::LINE_HEIGHT;
        }

        doc.save_to_bytes()
            .map_err(|e| AnalyzerError::OutputFormatting(e.to_string()))
    }
}

impl OutputFormatter for PdfFormatter {
    /// Text preview of the PDF layout
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        Ok(self.text_lines(report).join("\n"))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
            pdf_formatter: PdfFormatter::new(11.0),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
            OutputFormat::Pdf => &self.pdf_formatter,
        }
    }

    /// Text rendering; for PDF this is the layout preview
    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_report(report)
    }

    /// Bytes ready to be written to a file
    pub fn generate_bytes(&self, report: &AnalysisReport, format: OutputFormat) -> Result<Vec<u8>> {
        match format {
            OutputFormat::Pdf => self.pdf_formatter.render(report),
            other => Ok(self.generate_report(report, other)?.into_bytes()),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &[u8], file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
        OutputFormat::Pdf => "pdf",
    }
}

/// `<resume stem>_ats_report.<ext>`
pub fn suggest_filename(format: OutputFormat, resume_name: &str) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "resume".to_string());

    format!("{}_ats_report.{}", base_name, file_extension(format))
}
