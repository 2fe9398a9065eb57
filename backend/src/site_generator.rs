//! Localized page generator.
//!
//! Every language gets `<output_dir>/<lang>/index.html`, produced from
//! `template.html` by replacing the hotwords listed in `<lang>.json`. When
//! `projects_template.html` and `projects.<lang>.json` are present, the
//! rendered project groups replace the `{{projects}}` hotword.

use indexmap::IndexMap;
use serde::Deserialize;
use shared::SiteConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CARD_START_MARKER: &str = "<!--PROJECT_CARD_START-->";
pub const CARD_END_MARKER: &str = "<!--PROJECT_CARD_END-->";
pub const IMAGE_START_MARKER: &str = "<!--IMAGE_SECTION_START-->";
pub const IMAGE_END_MARKER: &str = "<!--IMAGE_SECTION_END-->";
pub const GROUP_START_MARKER: &str = "<!--PROJECT_GROUP_START-->";
pub const GROUP_END_MARKER: &str = "<!--PROJECT_GROUP_END-->";

pub const PROJECTS_HOTWORD: &str = "{{projects}}";
const PAGE_TEMPLATE: &str = "template.html";
const PROJECTS_TEMPLATE: &str = "projects_template.html";

const DEBUG_GENERATOR: bool = false;

macro_rules! debug_log {
    ($flag:expr, $($arg:tt)*) => {
        if $flag {
            println!($($arg)*);
        }
    };
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json { path: PathBuf, source: serde_json::Error },
    #[error("project missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Escapes text for insertion into HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Replaces each hotword in file order. Later hotwords also see the output
/// of earlier ones.
pub fn apply_replacements(template: &str, replacements: &IndexMap<String, String>) -> String {
    replacements
        .iter()
        .fold(template.to_string(), |page, (hotword, replacement)| page.replace(hotword.as_str(), replacement))
}

/// Text between two markers, trimmed. Empty when either marker is missing.
pub fn extract_section(content: &str, start_marker: &str, end_marker: &str) -> String {
    match (content.find(start_marker), content.find(end_marker)) {
        (Some(start), Some(end)) if start + start_marker.len() <= end => {
            content[start + start_marker.len()..end].trim().to_string()
        }
        _ => String::new(),
    }
}

// ===== PROJECT DATA =====

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub button_text: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub url: String,
    pub button_text: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
}

impl TryFrom<RawProject> for Project {
    type Error = GeneratorError;

    fn try_from(raw: RawProject) -> Result<Self, Self::Error> {
        let missing: Vec<&'static str> = [
            ("title", raw.title.is_none()),
            ("description", raw.description.is_none()),
            ("url", raw.url.is_none()),
            ("button_text", raw.button_text.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        match (raw.title, raw.description, raw.url, raw.button_text) {
            (Some(title), Some(description), Some(url), Some(button_text)) => Ok(Project {
                title,
                description,
                url,
                button_text,
                image: raw.image.filter(|image| !image.is_empty()),
                tags: raw.tags,
            }),
            _ => Err(GeneratorError::MissingFields(missing)),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProjectGroup {
    #[serde(default)]
    pub group_title: String,
    #[serde(default)]
    pub group_description: String,
    #[serde(default)]
    pub projects: Vec<RawProject>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProjectsData {
    #[serde(default)]
    pub groups: Vec<ProjectGroup>,
}

// ===== PROJECT RENDERING =====

/// Card, image and group fragments cut out of `projects_template.html`.
#[derive(Debug, Clone, Default)]
pub struct ProjectsTemplate {
    pub card: String,
    pub image: String,
    pub group: String,
    pub styles: String,
}

impl ProjectsTemplate {
    pub fn parse(content: &str) -> Self {
        let styles = match (content.find("<style>"), content.find("</style>")) {
            (Some(start), Some(end)) if start < end => content[start..end + "</style>".len()].to_string(),
            _ => String::new(),
        };
        Self {
            card: extract_section(content, CARD_START_MARKER, CARD_END_MARKER),
            image: extract_section(content, IMAGE_START_MARKER, IMAGE_END_MARKER),
            group: extract_section(content, GROUP_START_MARKER, GROUP_END_MARKER),
            styles,
        }
    }
}

pub fn render_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!(r#"<span class="badge bg-secondary project-tag">{}</span>"#, escape_html(tag)))
        .collect::<Vec<_>>()
        .join("\n        ")
}

impl Project {
    pub fn render(&self, template: &ProjectsTemplate) -> String {
        let title = escape_html(&self.title);
        let image_section = match &self.image {
            Some(image) => template
                .image
                .replace("{{image}}", &escape_html(image))
                .replace("{{title}}", &title),
            None => String::new(),
        };

        template
            .card
            .replace("{{image_section}}", &image_section)
            .replace("{{title}}", &title)
            .replace("{{description}}", &escape_html(&self.description))
            .replace("{{tags}}", &render_tags(&self.tags))
            .replace("{{url}}", &escape_html(&self.url))
            .replace("{{button_text}}", &escape_html(&self.button_text))
    }
}

impl ProjectGroup {
    /// Invalid projects are skipped with a warning, the rest still render.
    pub fn render(&self, template: &ProjectsTemplate) -> String {
        let cards = self
            .projects
            .iter()
            .cloned()
            .filter_map(|raw| match Project::try_from(raw) {
                Ok(project) => Some(project.render(template)),
                Err(error) => {
                    eprintln!("⚠️ Skipping invalid project in '{}': {error}", self.group_title);
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("\n    ");

        let title = escape_html(&self.group_title);
        let description = escape_html(&self.group_description);

        if template.group.is_empty() {
            return format!(
                r#"<div class="project-group mb-5">
  <h3 class="project-group-title mb-3">{title}</h3>
  <p class="project-group-description mb-4">{description}</p>
  <div class="row g-4">
    {cards}
  </div>
</div>"#
            );
        }

        template
            .group
            .replace("{{group_title}}", &title)
            .replace("{{group_description}}", &description)
            .replace("{{projects}}", &cards)
    }
}

/// Styles first, then one block per group, separated by blank lines.
pub fn render_projects(data: &ProjectsData, template: &ProjectsTemplate) -> String {
    let mut parts = Vec::with_capacity(data.groups.len() + 1);
    if !template.styles.is_empty() {
        parts.push(template.styles.clone());
    }
    parts.extend(data.groups.iter().map(|group| group.render(template)));
    parts.join("\n\n")
}

// ===== PAGE GENERATION =====

pub struct SiteGenerator {
    source_dir: PathBuf,
    output_dir: PathBuf,
    languages: Vec<String>,
}

impl SiteGenerator {
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, languages: Vec<String>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            languages,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            &config.generator.source_dir,
            &config.generator.output_dir,
            config.languages.supported.clone(),
        )
    }

    /// Writes every language's page, stopping at the first failure.
    pub fn generate_all(&self) -> Result<Vec<PathBuf>, GeneratorError> {
        self.languages.iter().map(|lang| self.generate_page(lang)).collect()
    }

    pub fn generate_page(&self, lang: &str) -> Result<PathBuf, GeneratorError> {
        let page = self.render_page(lang)?;
        let directory = self.output_dir.join(lang);
        fs::create_dir_all(&directory).map_err(|source| GeneratorError::Write { path: directory.clone(), source })?;

        let path = directory.join("index.html");
        fs::write(&path, page).map_err(|source| GeneratorError::Write { path: path.clone(), source })?;
        Ok(path)
    }

    pub fn render_page(&self, lang: &str) -> Result<String, GeneratorError> {
        let template = read(&self.source_dir.join(PAGE_TEMPLATE))?;
        let hotwords: IndexMap<String, String> = read_json(&self.source_dir.join(format!("{lang}.json")))?;
        debug_log!(DEBUG_GENERATOR, "🔧 {lang}: {} hotwords", hotwords.len());

        let mut page = apply_replacements(&template, &hotwords);
        if let Some(projects) = self.render_projects_for(lang)? {
            page = page.replace(PROJECTS_HOTWORD, &projects);
        }
        Ok(page)
    }

    fn render_projects_for(&self, lang: &str) -> Result<Option<String>, GeneratorError> {
        let template_path = self.source_dir.join(PROJECTS_TEMPLATE);
        let data_path = self.source_dir.join(format!("projects.{lang}.json"));
        if !template_path.exists() || !data_path.exists() {
            debug_log!(DEBUG_GENERATOR, "🔧 {lang}: no projects section");
            return Ok(None);
        }

        let template = ProjectsTemplate::parse(&read(&template_path)?);
        let data: ProjectsData = read_json(&data_path)?;
        Ok(Some(render_projects(&data, &template)))
    }
}

fn read(path: &Path) -> Result<String, GeneratorError> {
    fs::read_to_string(path).map_err(|source| GeneratorError::Read { path: path.to_path_buf(), source })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, GeneratorError> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|source| GeneratorError::Json { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECTS_TEMPLATE_HTML: &str = r#"<style>.project-tag { margin: 2px; }</style>
<!--PROJECT_GROUP_START-->
<section><h3>{{group_title}}</h3><p>{{group_description}}</p>{{projects}}</section>
<!--PROJECT_GROUP_END-->
<!--PROJECT_CARD_START-->
<div class="card">{{image_section}}<h4>{{title}}</h4><p>{{description}}</p>{{tags}}<a href="{{url}}">{{button_text}}</a></div>
<!--PROJECT_CARD_END-->
<!--IMAGE_SECTION_START-->
<img class="project-image" data-src="{{image}}" alt="{{title}}">
<!--IMAGE_SECTION_END-->"#;

    fn project(title: &str) -> RawProject {
        RawProject {
            title: Some(title.to_string()),
            description: Some("A tool".to_string()),
            url: Some("https://example.com/tool".to_string()),
            button_text: Some("View".to_string()),
            ..RawProject::default()
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("portfolio-generator-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn escapes_html_special_characters() {
        assert_eq!(escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#), "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn replacements_follow_file_order() {
        let hotwords: IndexMap<String, String> = serde_json::from_str(r#"{"{{greeting}}": "Hallo {{name}}", "{{name}}": "Welt"}"#).unwrap();
        assert_eq!(apply_replacements("<h1>{{greeting}}</h1>", &hotwords), "<h1>Hallo Welt</h1>");
    }

    #[test]
    fn sections_between_markers() {
        let template = ProjectsTemplate::parse(PROJECTS_TEMPLATE_HTML);
        assert!(template.card.starts_with(r#"<div class="card">"#));
        assert!(template.image.starts_with("<img"));
        assert!(template.group.starts_with("<section>"));
        assert_eq!(template.styles, "<style>.project-tag { margin: 2px; }</style>");
        assert_eq!(extract_section("no markers here", CARD_START_MARKER, CARD_END_MARKER), "");
    }

    #[test]
    fn card_without_image_or_tags() {
        let template = ProjectsTemplate::parse(PROJECTS_TEMPLATE_HTML);
        let card = Project::try_from(project("Portfolio")).unwrap().render(&template);
        assert_eq!(
            card,
            r#"<div class="card"><h4>Portfolio</h4><p>A tool</p><a href="https://example.com/tool">View</a></div>"#
        );
    }

    #[test]
    fn card_with_image_and_escaped_tags() {
        let template = ProjectsTemplate::parse(PROJECTS_TEMPLATE_HTML);
        let raw = RawProject {
            image: Some("img/tool.webp".to_string()),
            tags: vec!["Rust".to_string(), "C++ & <Qt>".to_string()],
            ..project("Tool \"X\"")
        };
        let card = Project::try_from(raw).unwrap().render(&template);
        assert!(card.contains(r#"<img class="project-image" data-src="img/tool.webp" alt="Tool &quot;X&quot;">"#));
        assert!(card.contains(r#"<span class="badge bg-secondary project-tag">Rust</span>"#));
        assert!(card.contains("C++ &amp; &lt;Qt&gt;"));
    }

    #[test]
    fn missing_fields_are_listed() {
        let raw = RawProject { title: Some("Half".to_string()), ..RawProject::default() };
        let error = Project::try_from(raw).unwrap_err();
        assert_eq!(error.to_string(), "project missing required fields: description, url, button_text");
    }

    #[test]
    fn invalid_projects_are_skipped() {
        let template = ProjectsTemplate::parse(PROJECTS_TEMPLATE_HTML);
        let group = ProjectGroup {
            group_title: "Tools".to_string(),
            group_description: "Small utilities".to_string(),
            projects: vec![project("First"), RawProject::default(), project("Second")],
        };
        let html = group.render(&template);
        assert!(html.starts_with("<section><h3>Tools</h3><p>Small utilities</p>"));
        assert_eq!(html.matches(r#"<div class="card">"#).count(), 2);
    }

    #[test]
    fn built_in_group_markup_without_group_template() {
        let template = ProjectsTemplate::parse(&PROJECTS_TEMPLATE_HTML.replace(GROUP_START_MARKER, ""));
        assert!(template.group.is_empty());

        let group = ProjectGroup { group_title: "A & B".to_string(), projects: vec![project("Only")], ..ProjectGroup::default() };
        let html = group.render(&template);
        assert!(html.starts_with(r#"<div class="project-group mb-5">"#));
        assert!(html.contains(r#"<h3 class="project-group-title mb-3">A &amp; B</h3>"#));
    }

    #[test]
    fn styles_precede_groups() {
        let template = ProjectsTemplate::parse(PROJECTS_TEMPLATE_HTML);
        let data: ProjectsData = serde_json::from_str(
            r#"{"groups": [
                {"group_title": "One", "group_description": "", "projects": []},
                {"group_title": "Two", "group_description": "", "projects": []}
            ]}"#,
        )
        .unwrap();
        let parts: Vec<String> = render_projects(&data, &template).split("\n\n").map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[0].starts_with("<style>"));
        assert!(parts[1].contains("One") && parts[2].contains("Two"));
    }

    #[test]
    fn generates_each_language() {
        let source = scratch_dir("source");
        let output = scratch_dir("output");
        fs::write(source.join(PAGE_TEMPLATE), "<html lang=\"{{lang}}\"><h1>{{title}}</h1>{{projects}}</html>").unwrap();
        fs::write(source.join("de.json"), r#"{"{{lang}}": "de", "{{title}}": "Projekte"}"#).unwrap();
        fs::write(source.join("en.json"), r#"{"{{lang}}": "en", "{{title}}": "Projects"}"#).unwrap();
        fs::write(source.join(PROJECTS_TEMPLATE), PROJECTS_TEMPLATE_HTML).unwrap();
        fs::write(
            source.join("projects.en.json"),
            r#"{"groups": [{"group_title": "Tools", "group_description": "", "projects": [
                {"title": "Site", "description": "This page", "url": "https://example.com", "button_text": "Code"}
            ]}]}"#,
        )
        .unwrap();

        let generator = SiteGenerator::new(&source, &output, vec!["de".to_string(), "en".to_string()]);
        let pages = generator.generate_all().unwrap();
        assert_eq!(pages, vec![output.join("de").join("index.html"), output.join("en").join("index.html")]);

        let german = fs::read_to_string(&pages[0]).unwrap();
        assert_eq!(german, "<html lang=\"de\"><h1>Projekte</h1>{{projects}}</html>");

        let english = fs::read_to_string(&pages[1]).unwrap();
        assert!(english.starts_with("<html lang=\"en\"><h1>Projects</h1><style>"));
        assert!(english.contains("<h4>Site</h4>"));

        fs::remove_dir_all(&source).unwrap();
        fs::remove_dir_all(&output).unwrap();
    }

    #[test]
    fn missing_language_file_is_reported() {
        let source = scratch_dir("missing-lang");
        fs::write(source.join(PAGE_TEMPLATE), "<html></html>").unwrap();

        let generator = SiteGenerator::new(&source, source.join("out"), vec!["fr".to_string()]);
        let error = generator.generate_all().unwrap_err();
        assert!(matches!(error, GeneratorError::Read { ref path, .. } if path.ends_with("fr.json")));

        fs::remove_dir_all(&source).unwrap();
    }
}
