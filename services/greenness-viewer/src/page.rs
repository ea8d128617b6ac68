//! Page assembly: title, split map with legend, histogram section.

use renderer::html::escape;
use renderer::split_map::{SplitMap, LEAFLET_CSS, LEAFLET_JS};

pub struct PageContent<'a> {
    pub title: &'a str,
    /// Output of [`SplitMap::to_html`]
    pub map_html: &'a str,
    pub histogram_heading: &'a str,
    pub histogram_url: &'a str,
}

const PAGE_STYLES: &str = r#"body { margin: 0 auto; max-width: 1440px; padding: 0 20px 40px; font-family: sans-serif; color: #222; }
h1 { font-size: 1.6em; margin: 20px 0 12px; }
h2 { font-size: 1.3em; margin: 28px 0 12px; }
.histograms img { width: 100%; height: auto; }
"#;

pub fn render_page(content: &PageContent<'_>) -> String {
    let title = escape(content.title);
    let heading = escape(content.histogram_heading);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", title));
    html.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}\">\n<script src=\"{}\"></script>\n",
        LEAFLET_CSS, LEAFLET_JS
    ));
    html.push_str("<style>\n");
    html.push_str(PAGE_STYLES);
    html.push_str(SplitMap::stylesheet());
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str(&format!("<h1>{}</h1>\n", title));
    html.push_str(content.map_html);
    html.push_str(&format!("<h2>{}</h2>\n", heading));
    html.push_str(&format!(
        "<div class=\"histograms\"><img src=\"{}\" alt=\"{}\"></div>\n",
        escape(content.histogram_url),
        heading
    ));

    html.push_str("</body>\n</html>\n");
    html
}
