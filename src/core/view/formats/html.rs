//! HTML page renderer
//!
//! Renders the interactive family tree page. The generated HTML is
//! self-contained apart from the vis-network script, which is loaded from a
//! CDN.

use crate::core::get_version;
use crate::core::view::graph_data;
use crate::core::view::{PageRenderer, ViewContext};
use chrono::Local;
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded page template
const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");
/// Embedded editor panel fragment
const EDITOR_TEMPLATE: &str = include_str!("../templates/editor.html");

/// Interactive HTML page renderer
pub struct HtmlRenderer {
    editable: bool,
}

impl HtmlRenderer {
    /// Create a renderer for a static, read-only page
    #[must_use]
    pub const fn new() -> Self {
        Self { editable: false }
    }

    /// Create a renderer for the served page, including the editing panel
    /// backed by the JSON API
    #[must_use]
    pub const fn editable() -> Self {
        Self { editable: true }
    }

    /// Render the page using template substitution
    fn render_template(&self, ctx: &ViewContext) -> Result<String, Box<dyn Error>> {
        let dataset = graph_data::translate(ctx.tree, ctx.levels);
        let nodes_json = serde_json::to_string(&dataset.nodes)?;
        let edges_json = serde_json::to_string(&dataset.edges)?;
        let options_json = graph_data::widget_options().to_string();

        let notice = if ctx.tree.is_empty() {
            if self.editable {
                "<p class=\"notice\">The family tree is currently empty. Use the add form below to get started!</p>"
            } else {
                "<p class=\"notice\">The family tree is currently empty.</p>"
            }
        } else {
            ""
        };

        let editor_panel = if self.editable { EDITOR_TEMPLATE } else { "" };

        let mut output = PAGE_TEMPLATE.to_string();
        output = output.replace("{{title}}", ctx.title);
        output = output.replace("{{stats}}", &Self::generate_stats(ctx));
        output = output.replace("{{notice}}", notice);
        output = output.replace("{{nodes}}", &nodes_json);
        output = output.replace("{{edges}}", &edges_json);
        output = output.replace("{{options}}", &options_json);
        output = output.replace("{{editor_panel}}", editor_panel);
        output = output.replace("{{version}}", get_version());
        output = output.replace(
            "{{generated}}",
            &Local::now().format("%Y-%m-%d %H:%M").to_string(),
        );

        Ok(output)
    }

    /// Render the page with validation errors in place of the graph
    ///
    /// The dataset is left empty and the issues are listed in the notice
    /// area, so the page tells the user the graph cannot be rendered until
    /// the input is corrected.
    #[must_use]
    pub fn render_error_page(&self, title: &str, issues: &[String]) -> String {
        let mut notice = String::from(
            "<div class=\"error\"><p>The family graph cannot be rendered until the input is corrected:</p><ul>",
        );
        for issue in issues {
            let _ = write!(notice, "<li>{issue}</li>");
        }
        notice.push_str("</ul></div>");

        let editor_panel = if self.editable { EDITOR_TEMPLATE } else { "" };

        let mut output = PAGE_TEMPLATE.to_string();
        output = output.replace("{{title}}", title);
        output = output.replace("{{stats}}", "");
        output = output.replace("{{notice}}", &notice);
        output = output.replace("{{nodes}}", "[]");
        output = output.replace("{{edges}}", "[]");
        output = output.replace("{{options}}", &graph_data::widget_options().to_string());
        output = output.replace("{{editor_panel}}", editor_panel);
        output = output.replace("{{version}}", get_version());
        output = output.replace(
            "{{generated}}",
            &Local::now().format("%Y-%m-%d %H:%M").to_string(),
        );

        output
    }

    /// Generate the header statistics strip
    fn generate_stats(ctx: &ViewContext) -> String {
        format!(
            "<span class=\"stat\">People: {}</span> <span class=\"stat\">Couples: {}</span> <span class=\"stat\">Generations: {}</span>",
            ctx.person_count(),
            ctx.couple_count(),
            ctx.generation_count()
        )
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer for HtmlRenderer {
    fn generate(&self, ctx: &ViewContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let page_content = self.render(ctx)?;
        fs::write(output_path, page_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ViewContext) -> Result<String, Box<dyn Error>> {
        self.render_template(ctx)
    }
}
