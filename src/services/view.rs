use crate::models::view::View;

/// Turns a view payload into an HTML document.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &View) -> anyhow::Result<String>;
}

/// Minimal HTML document that hands the view context to the admin
/// front-end as an embedded JSON island.
pub struct HtmlShellRenderer {
    app_name: String,
}

impl HtmlShellRenderer {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl ViewRenderer for HtmlShellRenderer {
    fn render(&self, view: &View) -> anyhow::Result<String> {
        let title = view
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or(&self.app_name);
        // `<` is escaped so the JSON cannot close the script element.
        let data = serde_json::to_string(&view.context)?.replace('<', "\\u003c");

        Ok(format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <title>{title} | {app}</title>\n\
             </head>\n\
             <body data-template=\"{template}\">\n\
             <div id=\"app\"></div>\n\
             <script id=\"view-data\" type=\"application/json\">{data}</script>\n\
             </body>\n\
             </html>\n",
            title = escape_html(title),
            app = escape_html(&self.app_name),
            template = escape_html(&view.template),
        ))
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
