use super::{escape_html, TableBody};
use crate::error::{Error, Result};
use ego_tree::NodeRef;
use log::debug;
use scraper::{ElementRef, Html, Node, Selector};

/// A page template that is expected to carry the table body somewhere inside it.
#[derive(Debug, Clone)]
pub struct Page {
    html: String,
}

impl Page {
    pub fn new(html: impl Into<String>) -> Self {
        Page { html: html.into() }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// True if the page has an element with this id.
    pub fn has_element(&self, id: &str) -> bool {
        self.element_name(id).is_some()
    }

    fn element_name(&self, id: &str) -> Option<String> {
        let doc = Html::parse_document(&self.html);
        let selector = Selector::parse(&format!("#{}", id)).ok()?;
        let element = doc.select(&selector).next()?;
        Some(element.value().name().to_owned())
    }

    /// Returns the page with the content of element `body.id()` swapped for the body's rows.
    /// The page is written back out from the parsed tree, so however the template spells its
    /// tags the element is found. The template itself is left alone so it can be rendered into
    /// again.
    pub fn inject(&self, body: &TableBody) -> Result<String> {
        let id = body.id();
        let doc = Html::parse_document(&self.html);
        let selector =
            Selector::parse(&format!("#{}", id)).map_err(|_| Error::MissingElement(id.to_owned()))?;
        let target = doc
            .select(&selector)
            .next()
            .ok_or_else(|| Error::MissingElement(id.to_owned()))?;
        debug!("Injecting {} rows into <{}>", body.len(), target.value().name());

        let rows = body.inner_html();
        let mut out = String::with_capacity(self.html.len() + rows.len());
        for child in doc.tree.root().children() {
            write_node(&mut out, child, target, &rows);
        }
        Ok(out)
    }
}

/// Only the path down to the target is written by hand, everything off that path is handed to
/// scraper's own serializer.
fn write_node(out: &mut String, node: NodeRef<Node>, target: ElementRef, rows: &str) {
    match node.value() {
        Node::Doctype(doctype) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(doctype.name());
            out.push('>');
        }
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        Node::Text(text) => out.push_str(&escape_html(text)),
        Node::Element(element) => {
            let on_path = node.id() == target.id() || target.ancestors().any(|a| a.id() == node.id());
            if !on_path {
                if let Some(element) = ElementRef::wrap(node) {
                    out.push_str(&element.html());
                }
                return;
            }
            out.push('<');
            out.push_str(element.name());
            for (name, value) in element.attrs() {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_html(value));
                out.push('"');
            }
            out.push('>');
            if node.id() == target.id() {
                out.push('\n');
                out.push_str(rows);
                out.push('\n');
            } else {
                for child in node.children() {
                    write_node(out, child, target, rows);
                }
            }
            out.push_str("</");
            out.push_str(element.name());
            out.push('>');
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Row;

    const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<body>
<table class="points">
  <thead><tr><th>Pos</th><th>Team</th><th>P</th><th>W</th><th>L</th><th>T</th><th>NR</th><th>Pts</th><th>NRR</th></tr></thead>
  <tbody id="points-table-body">
    <tr><td>stale</td></tr>
  </tbody>
</table>
</body>
</html>
"#;

    #[test]
    fn inject_replaces_existing_rows() {
        let page = Page::new(TEMPLATE);
        let mut body = TableBody::default();
        body.append(Row::notice("fresh"));
        let html = page.inject(&body).unwrap();
        assert!(!html.contains("stale"));
        assert!(html.contains(
            "<tbody id=\"points-table-body\">\n<tr><td colspan=\"9\" class=\"error\">fresh</td></tr>\n</tbody>"
        ));
        assert!(html.starts_with("<!DOCTYPE html><html>"));
        assert!(html.contains("<thead><tr><th>Pos</th>"));
        assert!(html.contains("<table class=\"points\">"));
        assert!(html.ends_with("</body></html>"));
        // template untouched
        assert!(page.html().contains("stale"));
    }

    #[test]
    fn inject_with_no_rows_empties_body() {
        let page = Page::new(TEMPLATE);
        let html = page.inject(&TableBody::default()).unwrap();
        assert!(html.contains("<tbody id=\"points-table-body\">\n\n</tbody>"));
    }

    #[test]
    fn single_quoted_id() {
        let page = Page::new("<table><tbody id='points-table-body'></tbody></table>");
        assert!(page.has_element("points-table-body"));
        let html = page.inject(&TableBody::default()).unwrap();
        assert_eq!(
            html,
            "<html><head></head><body><table><tbody id=\"points-table-body\">\n\n</tbody></table></body></html>"
        );
    }

    #[test]
    fn inject_however_the_template_is_spelled() {
        let templates = [
            "<TABLE><TBODY ID=\"points-table-body\"><TR><TD>old</TD></TR></TBODY></TABLE>",
            "<table><tbody id = \"points-table-body\"><tr><td>old</td></tr></tbody></table>",
            "<table><tbody id=points-table-body><tr><td>old</td></tr></tbody></table>",
            "<div data-id=\"points-table-body\">keep</div>\
             <table><tbody id=\"points-table-body\"><tr><td>old</td></tr></tbody></table>",
        ];
        let mut body = TableBody::default();
        body.append(Row::notice("fresh"));
        for template in templates.iter() {
            let page = Page::new(*template);
            assert!(page.has_element("points-table-body"), "{}", template);
            let html = page.inject(&body).unwrap();
            assert!(!html.contains("old"), "{}", html);
            assert!(
                html.contains(
                    "<tbody id=\"points-table-body\">\n<tr><td colspan=\"9\" class=\"error\">fresh</td></tr>\n</tbody>"
                ),
                "{}",
                html
            );
        }
        let html = Page::new(templates[3]).inject(&body).unwrap();
        assert!(html.contains("<div data-id=\"points-table-body\">keep</div>"));
    }

    #[test]
    fn markup_outside_table_survives() {
        let page = Page::new(
            "<!-- standings --><html><head><title>IPL &amp; more</title></head>\
             <body><h1>Points</h1><table><tbody id=\"points-table-body\"></tbody></table>\
             <script>if (a < b) {}</script></body></html>",
        );
        let html = page.inject(&TableBody::default()).unwrap();
        assert!(html.starts_with("<!-- standings -->"));
        assert!(html.contains("<title>IPL &amp; more</title>"));
        assert!(html.contains("<h1>Points</h1>"));
        assert!(html.contains("<script>if (a < b) {}</script>"));
    }

    #[test]
    fn missing_table_body() {
        let page = Page::new("<html><body><table><tbody id=\"other\"></tbody></table></body></html>");
        assert!(!page.has_element("points-table-body"));
        match page.inject(&TableBody::default()) {
            Err(Error::MissingElement(id)) => assert_eq!(id, "points-table-body"),
            other => panic!("expected missing element, got {:?}", other),
        }
    }
}
