//! Output formatting for parsed pages.

use manpage_core::ManPage;

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Labelled plain text (`Name:`, `Desc:`, `Synopsis:`, `Options:`).
    #[default]
    Text,
    Json,
    Yaml,
    Markdown,
}

/// Formats a page in the requested output format.
pub fn format_page(page: &ManPage, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(page.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(page)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(page).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(page_to_markdown(page)),
    }
}

/// Formats several pages; JSON and YAML produce a single array document.
pub fn format_pages(pages: &[ManPage], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(pages)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(pages).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Text | OutputFormat::Markdown => {
            let mut out = String::new();
            for (idx, page) in pages.iter().enumerate() {
                if idx > 0 {
                    out.push('\n');
                }
                out.push_str(&format_page(page, format)?);
            }
            Ok(out)
        }
    }
}

fn page_to_markdown(page: &ManPage) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", page.name));
    out.push_str(&format!("**Source:** `{}`\n\n", page.path.display()));

    out.push_str("## Synopsis\n\n");
    out.push_str(&format!("```\n{}\n```\n\n", page.synopsis));

    out.push_str("## Description\n\n");
    out.push_str(&format!("{}\n\n", page.description));

    if !page.options.is_empty() {
        out.push_str("## Options\n\n");
        out.push_str("| Option | Description |\n");
        out.push_str("|--------|-------------|\n");
        for opt in &page.options {
            let desc = opt.description.replace('|', "\\|").replace('\n', " ");
            out.push_str(&format!("| `{}` | {desc} |\n", opt.token));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use manpage_core::{Document, ManOption};

    fn sample_page() -> ManPage {
        let mut page = ManPage::new("foobar.1.gz", Document::new(".SH NAME\nfoobar\n"));
        page.name = "foobar".to_string();
        page.description = "This is just a sample...".to_string();
        page.synopsis = "foobar [-q]".to_string();
        page.options.push(ManOption::new("-q", "q is an option"));
        page
    }

    #[test]
    fn test_format_page_text() {
        let text = format_page(&sample_page(), OutputFormat::Text).unwrap();
        assert!(text.starts_with("Name: foobar\n"));
        assert!(text.contains("Options:\n-q: q is an option\n"));
    }

    #[test]
    fn test_format_page_json() {
        let json = format_page(&sample_page(), OutputFormat::Json).unwrap();
        assert!(json.contains("\"name\": \"foobar\""));
        assert!(json.contains("\"token\": \"-q\""));
        assert!(!json.contains("document"));
    }

    #[test]
    fn test_format_page_yaml() {
        let yaml = format_page(&sample_page(), OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("name: foobar"));
    }

    #[test]
    fn test_format_page_markdown() {
        let mut page = sample_page();
        page.options.push(ManOption::new("-p", "a|b"));
        let md = format_page(&page, OutputFormat::Markdown).unwrap();
        assert!(md.contains("# foobar"));
        assert!(md.contains("| `-q` | q is an option |"));
        assert!(md.contains("a\\|b"));
    }

    #[test]
    fn test_format_page_markdown_without_options() {
        let mut page = sample_page();
        page.options.clear();
        let md = format_page(&page, OutputFormat::Markdown).unwrap();
        assert!(!md.contains("## Options"));
    }

    #[test]
    fn test_format_pages_json_is_array() {
        let pages = vec![sample_page(), sample_page()];
        let json = format_pages(&pages, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_format_pages_text_separates_pages() {
        let pages = vec![sample_page(), sample_page()];
        let text = format_pages(&pages, OutputFormat::Text).unwrap();
        assert_eq!(text.matches("Name: foobar").count(), 2);
        assert!(text.contains("q is an option\n\nName:"));
    }
}
