//! Markdown page renderer
//!
//! Renders the family tree as a Markdown document with an embedded Mermaid
//! diagram. These documents render well in GitHub, GitLab, and VS Code.

use crate::core::models::{FamilyTree, Person};
use crate::core::view::visualization::MermaidGenerator;
use crate::core::view::{PageRenderer, ViewContext};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/tree.md");

/// Markdown page renderer
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Create a new Markdown renderer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the document using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ViewContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{title}}", ctx.title);
        output = output.replace("{{person_count}}", &ctx.person_count().to_string());
        output = output.replace("{{couple_count}}", &ctx.couple_count().to_string());
        output = output.replace(
            "{{generation_count}}",
            &ctx.generation_count().to_string(),
        );

        let member_table = Self::generate_member_table(ctx);
        output = output.replace("{{member_table}}", &member_table);

        let mermaid_diagram = MermaidGenerator::generate_tree(ctx.tree);
        output = output.replace("{{mermaid_diagram}}", &mermaid_diagram);

        output
    }

    /// Generate the family member table
    fn generate_member_table(ctx: &ViewContext) -> String {
        let mut table = String::new();

        table.push_str("| Name | Born | Died | Generation | Parents | Children |\n");
        table.push_str("|---|---|---|---|---|---|\n");

        for id in ctx.tree.sorted_ids() {
            let Some(person) = ctx.tree.get_person(&id) else {
                continue;
            };

            let born = person.dob.map_or_else(|| "-".to_string(), |d| d.to_string());
            let died = person.dod.map_or_else(|| "-".to_string(), |d| d.to_string());
            let level = ctx
                .levels
                .get(&id)
                .map_or_else(|| "-".to_string(), ToString::to_string);
            let parents = Self::name_list(ctx.tree, &person.parents);
            let children = Self::name_list(ctx.tree, &person.children);

            let _ = writeln!(
                table,
                "| {} | {born} | {died} | {level} | {parents} | {children} |",
                person.display_name()
            );
        }

        table
    }

    /// Join the display names behind a list of ids, skipping unknown ids
    fn name_list(tree: &FamilyTree, ids: &[String]) -> String {
        let names: Vec<String> = ids
            .iter()
            .filter_map(|id| tree.get_person(id))
            .map(Person::display_name)
            .collect();

        if names.is_empty() {
            "-".to_string()
        } else {
            names.join(", ")
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer for MarkdownRenderer {
    fn generate(&self, ctx: &ViewContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let page_content = self.render(ctx)?;
        fs::write(output_path, page_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ViewContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
