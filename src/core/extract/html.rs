//! Table reader over the ast-grep HTML tree
//!
//! Only the parts of a document needed to scrape grade tables are kept:
//! header cell texts and the cell texts of body rows.

use ast_grep_core::{Doc, Node};
use ast_grep_language::{LanguageExt, SupportLang};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// A table as rendered text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HtmlTable {
    /// Text of every `th` cell in the table, in document order
    pub headers: Vec<String>,
    /// Text of the `td` cells of each body row
    pub rows: Vec<Vec<String>>,
}

/// Parse `html` and return every `<table>` in document order.
///
/// A nested table is returned as a table of its own and does not contribute
/// headers or rows to the table around it. Body rows are the `tr` elements
/// inside `tbody`, or placed directly in the table (which browsers wrap in an
/// implicit `tbody`); rows in `thead` and `tfoot` are not body rows.
#[must_use]
pub fn parse_tables(html: &str) -> Vec<HtmlTable> {
    let root = SupportLang::Html.ast_grep(html);
    let mut tables = Vec::new();
    collect_tables(&root.root(), &mut tables);
    tables
}

fn collect_tables<D: Doc>(node: &Node<D>, tables: &mut Vec<HtmlTable>) {
    if is_element(node, "table") {
        tables.push(read_table(node));
    }
    let children: Vec<_> = node.children().collect();
    for child in &children {
        collect_tables(child, tables);
    }
}

fn read_table<D: Doc>(table: &Node<D>) -> HtmlTable {
    let mut headers = Vec::new();
    collect_header_cells(table, &mut headers);

    let mut rows = Vec::new();
    for child in table.children() {
        match element_tag(&child).as_deref() {
            Some("tbody") => rows.extend(
                child
                    .children()
                    .filter(|row| is_element(row, "tr"))
                    .map(|row| read_row(&row)),
            ),
            Some("tr") => rows.push(read_row(&child)),
            _ => {}
        }
    }

    HtmlTable { headers, rows }
}

fn collect_header_cells<D: Doc>(node: &Node<D>, headers: &mut Vec<String>) {
    for child in node.children() {
        match element_tag(&child).as_deref() {
            Some("th") => headers.push(node_text(&child)),
            Some("table") => {}
            _ => collect_header_cells(&child, headers),
        }
    }
}

fn read_row<D: Doc>(row: &Node<D>) -> Vec<String> {
    row.children()
        .filter(|cell| is_element(cell, "td"))
        .map(|cell| node_text(&cell))
        .collect()
}

/// Lower-cased tag name of an element node
fn element_tag<D: Doc>(node: &Node<D>) -> Option<String> {
    if node.kind().as_ref() != "element" {
        return None;
    }
    let tag = node
        .children()
        .find(|child| matches!(child.kind().as_ref(), "start_tag" | "self_closing_tag"))?;
    let name = tag
        .children()
        .find(|child| child.kind().as_ref() == "tag_name")?;
    Some(name.text().to_ascii_lowercase())
}

fn is_element<D: Doc>(node: &Node<D>, tag: &str) -> bool {
    element_tag(node).as_deref() == Some(tag)
}

/// Rendered text of an HTML fragment: markup, comments and script/style
/// contents dropped, character references decoded, whitespace collapsed and
/// trimmed.
#[must_use]
pub fn clean_text(fragment: &str) -> String {
    node_text(&SupportLang::Html.ast_grep(fragment).root())
}

/// Rendered text of a node, the way a browser's `innerText` reads a cell
fn node_text<D: Doc>(node: &Node<D>) -> String {
    let source = node.text();
    let base = node.range().start;
    let mut raw = String::new();
    let mut cursor = base;
    push_text(node, &source, base, &mut cursor, &mut raw);
    normalize_ws(&decode_entities(&raw))
}

/// Append the text and entity leaves under `node` to `out`.
///
/// Whitespace between two leaves becomes one space, unless it only appears
/// inside the markup separating them (`A<sup>+</sup>` stays `A+`).
fn push_text<D: Doc>(node: &Node<D>, source: &str, base: usize, cursor: &mut usize, out: &mut String) {
    for child in node.children() {
        match child.kind().as_ref() {
            "text" | "entity" => {
                let range = child.range();
                let gap = source
                    .get(cursor.saturating_sub(base)..range.start.saturating_sub(base))
                    .unwrap_or_default();
                if strip_tags(gap).chars().any(char::is_whitespace) {
                    out.push(' ');
                }
                out.push_str(&child.text());
                *cursor = range.end;
            }
            "script_element" | "style_element" | "comment" | "start_tag" | "end_tag"
            | "self_closing_tag" => {}
            "element" if matches!(element_tag(&child).as_deref(), Some("script" | "style")) => {}
            _ => push_text(&child, source, base, cursor, out),
        }
    }
}

fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

static CHARACTER_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[xX]([0-9a-fA-F]{1,6});?|#([0-9]{1,7});?|([A-Za-z][A-Za-z0-9]{1,31});)")
        .expect("valid character reference pattern")
});

/// Decode numeric references and the common named ones in a single pass,
/// so `&amp;lt;` reads as `&lt;`. Unknown names are left as written.
fn decode_entities(s: &str) -> String {
    CHARACTER_REFERENCE
        .replace_all(s, |caps: &Captures<'_>| {
            let code_point = caps
                .get(1)
                .map(|hex| u32::from_str_radix(hex.as_str(), 16))
                .or_else(|| caps.get(2).map(|dec| dec.as_str().parse::<u32>()));
            if let Some(code_point) = code_point {
                // Out-of-range, surrogate and NUL references render as U+FFFD
                return code_point
                    .ok()
                    .filter(|&c| c != 0)
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
                    .to_string();
            }
            let decoded = match caps.get(3).map_or("", |m| m.as_str()) {
                "nbsp" => " ",
                "lt" => "<",
                "gt" => ">",
                "quot" => "\"",
                "apos" => "'",
                "amp" => "&",
                _ => &caps[0],
            };
            decoded.to_string()
        })
        .into_owned()
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
