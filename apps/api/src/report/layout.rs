//! Report layout: pure planning of pages, lines and styles.
//!
//! All geometry is in millimetres on an A4 page with the origin at the
//! bottom-left corner, matching the PDF coordinate system.

use chrono::{DateTime, Utc};

use crate::report::ReportPayload;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 20.0;

/// Characters per wrapped body line. Helvetica at 11pt fits roughly this many
/// average glyphs between the side margins.
pub const WRAP_COLUMNS: usize = 90;

const SECTION_GAP_MM: f32 = 4.0;

pub const REPORT_TITLE: &str = "AI Resume Analysis Report";
pub const INTERVIEW_HEADING: &str = "Interview Preparation";
pub const PRESENT_MARKER: &str = "[+]";
pub const ABSENT_MARKER: &str = "[-]";

// ────────────────────────────────────────────────────────────────────────────
// Plan data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Heading,
    Body,
}

impl TextStyle {
    pub fn font_size_pt(self) -> f32 {
        match self {
            TextStyle::Title => 20.0,
            TextStyle::Heading => 14.0,
            TextStyle::Body => 11.0,
        }
    }

    pub fn line_height_mm(self) -> f32 {
        match self {
            TextStyle::Title => 10.0,
            TextStyle::Heading => 8.0,
            TextStyle::Body => 6.0,
        }
    }

    pub fn is_bold(self) -> bool {
        !matches!(self, TextStyle::Body)
    }
}

/// Colour cue for skill lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Present,
    Absent,
}

impl Marker {
    /// Fill colour as RGB in 0.0–1.0.
    pub fn rgb(self) -> (f32, f32, f32) {
        match self {
            Marker::Present => (0.10, 0.55, 0.20),
            Marker::Absent => (0.80, 0.15, 0.15),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub style: TextStyle,
    pub marker: Option<Marker>,
    pub x_mm: f32,
    pub y_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagePlan {
    pub lines: Vec<PlacedLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportPlan {
    pub title: String,
    pub pages: Vec<PagePlan>,
}

#[cfg(test)]
impl ReportPlan {
    pub fn contains_text(&self, needle: &str) -> bool {
        self.pages
            .iter()
            .flat_map(|p| &p.lines)
            .any(|l| l.text.contains(needle))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Planner
// ────────────────────────────────────────────────────────────────────────────

struct Cursor {
    pages: Vec<PagePlan>,
    y_mm: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![PagePlan::default()],
            y_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(PagePlan::default());
        self.y_mm = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    fn push(&mut self, text: &str, style: TextStyle, marker: Option<Marker>) {
        let height = style.line_height_mm();
        if self.y_mm - height < MARGIN_MM {
            self.new_page();
        }
        self.y_mm -= height;

        if let Some(page) = self.pages.last_mut() {
            page.lines.push(PlacedLine {
                text: sanitize_latin1(text),
                style,
                marker,
                x_mm: MARGIN_MM,
                y_mm: self.y_mm,
            });
        }
    }

    fn push_wrapped(&mut self, text: &str, style: TextStyle, marker: Option<Marker>) {
        for line in wrap_text(text, WRAP_COLUMNS) {
            self.push(&line, style, marker);
        }
    }

    /// Wraps one source line, repeating its leading indentation on every
    /// wrapped line. Tabs count as four spaces.
    fn push_indented(&mut self, source_line: &str, style: TextStyle) {
        let body = source_line.trim_start();
        let indent: String = source_line[..source_line.len() - body.len()]
            .chars()
            .map(|c| if c == '\t' { "    " } else { " " })
            .collect();
        let width = WRAP_COLUMNS
            .saturating_sub(indent.len())
            .max(WRAP_COLUMNS / 2);
        for line in wrap_text(body, width) {
            self.push(&format!("{indent}{line}"), style, None);
        }
    }

    fn gap(&mut self) {
        self.y_mm -= SECTION_GAP_MM;
    }

    fn section(&mut self, heading: &str) {
        self.gap();
        self.push(heading, TextStyle::Heading, None);
    }
}

/// Lays out the report. Sections whose data is absent are skipped; interview
/// preparation, when present, always starts on a fresh page.
pub fn plan_report(payload: &ReportPayload, generated_at: DateTime<Utc>) -> ReportPlan {
    let mut cursor = Cursor::new();

    cursor.push(REPORT_TITLE, TextStyle::Title, None);
    cursor.push(
        &format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC")),
        TextStyle::Body,
        None,
    );

    if payload.ats_score.is_some() || payload.fit_score.is_some() {
        cursor.section("Scores");
        if let Some(ats) = payload.ats_score {
            cursor.push(&format!("ATS Score: {ats}/100"), TextStyle::Body, None);
        }
        if let Some(fit) = payload.fit_score {
            cursor.push(&format!("Fit Score: {fit}%"), TextStyle::Body, None);
        }
    }

    let found = found_skill_lines(payload);
    if !found.is_empty() {
        cursor.section("Skills Found");
        for line in &found {
            cursor.push_wrapped(line, TextStyle::Body, None);
        }
    }

    if let Some(matching) = payload.matching_skills.as_deref().filter(|s| !s.is_empty()) {
        cursor.section("Matching Skills");
        for skill in matching {
            cursor.push_wrapped(
                &format!("{PRESENT_MARKER} {skill}"),
                TextStyle::Body,
                Some(Marker::Present),
            );
        }
    }

    if let Some(missing) = payload.missing_skills.as_deref().filter(|s| !s.is_empty()) {
        cursor.section("Missing Skills");
        for skill in missing {
            cursor.push_wrapped(
                &format!("{ABSENT_MARKER} {skill}"),
                TextStyle::Body,
                Some(Marker::Absent),
            );
        }
    }

    if let Some(prep) = payload
        .interview_prep
        .as_deref()
        .filter(|p| !p.trim().is_empty())
    {
        cursor.new_page();
        cursor.push(INTERVIEW_HEADING, TextStyle::Heading, None);
        cursor.gap();
        for source_line in prep.lines() {
            if source_line.trim().is_empty() {
                cursor.gap();
            } else {
                cursor.push_indented(source_line, TextStyle::Body);
            }
        }
    }

    ReportPlan {
        title: REPORT_TITLE.to_string(),
        pages: cursor.pages,
    }
}

/// One line per found skill. Counts are shown when `skillStrength` is supplied;
/// without an explicit `skills` list the positive strength entries are used.
fn found_skill_lines(payload: &ReportPayload) -> Vec<String> {
    let strength = payload.skill_strength.as_ref();
    let count_of = |skill: &str| strength.and_then(|s| s.get(skill)).copied();

    match (&payload.skills, strength) {
        (Some(skills), _) => skills
            .iter()
            .map(|skill| match count_of(skill) {
                Some(n) => format!("- {skill} ({n})"),
                None => format!("- {skill}"),
            })
            .collect(),
        (None, Some(strength)) => strength
            .iter()
            .filter(|(_, n)| **n > 0)
            .map(|(skill, n)| format!("- {skill} ({n})"))
            .collect(),
        (None, None) => Vec::new(),
    }
}

/// Greedy word wrap on character counts. Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// The built-in PDF fonts only cover Latin-1; anything else becomes `?`.
/// Control characters become spaces.
pub fn sanitize_latin1(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            c if c.is_control() => ' ',
            c if (c as u32) <= 0xFF => c,
            _ => '?',
        })
        .collect()
}
