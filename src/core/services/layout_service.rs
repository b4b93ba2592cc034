//! Groups a flat field list into a presentable sectioned, two-column view.
//!
//! Everything here is presentation-only: the storage order of the field list is
//! never touched, and calling these functions repeatedly on the same input
//! yields identical output.

use std::fmt::Write as _;

use serde::Serialize;

use crate::domain::{Displayable, Field};

/// A section header together with the non-section fields that follow it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionGroup<'a> {
    pub section: &'a Field,
    pub children: Vec<&'a Field>,
}

/// Fields before the first section, then one group per section.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GroupedLayout<'a> {
    pub preamble: Vec<&'a Field>,
    pub sections: Vec<SectionGroup<'a>>,
}

/// One presentation row of the two-column grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutRow<'a> {
    pub fields: Vec<&'a Field>,
}

impl<'a> LayoutRow<'a> {
    /// A single half-width field leaves the second column free; the builder
    /// renders an inline drop slot there.
    pub fn is_lone_single(&self) -> bool {
        matches!(self.fields.as_slice(), [only] if !only.is_full_width())
    }

    pub fn field_ids(&self) -> Vec<&'a str> {
        self.fields.iter().map(|field| field.id.as_str()).collect()
    }
}

pub struct LayoutService;

impl LayoutService {
    pub fn group(fields: &[Field]) -> GroupedLayout<'_> {
        let mut layout = GroupedLayout::default();
        for field in fields {
            if field.is_section() {
                layout.sections.push(SectionGroup {
                    section: field,
                    children: Vec::new(),
                });
            } else if let Some(current) = layout.sections.last_mut() {
                current.children.push(field);
            } else {
                layout.preamble.push(field);
            }
        }
        layout
    }

    pub fn group_into_rows<'a>(subset: &[&'a Field]) -> Vec<LayoutRow<'a>> {
        let mut rows = Vec::new();
        let mut index = 0;
        while index < subset.len() {
            let field = subset[index];
            if field.is_full_width() {
                rows.push(LayoutRow {
                    fields: vec![field],
                });
                index += 1;
                continue;
            }
            match subset.get(index + 1) {
                Some(next) if !next.is_full_width() => {
                    rows.push(LayoutRow {
                        fields: vec![field, *next],
                    });
                    index += 2;
                }
                _ => {
                    rows.push(LayoutRow {
                        fields: vec![field],
                    });
                    index += 1;
                }
            }
        }
        rows
    }

    /// Plain-text outline of the grouped layout, one line per row.
    pub fn render_outline(fields: &[Field]) -> String {
        let layout = Self::group(fields);
        let mut out = String::new();
        if !layout.preamble.is_empty() {
            out.push_str("[preamble]\n");
            Self::write_rows(&mut out, &layout.preamble);
        }
        for group in &layout.sections {
            let _ = writeln!(out, "[section] {}", group.section.label);
            Self::write_rows(&mut out, &group.children);
        }
        out
    }

    fn write_rows(out: &mut String, subset: &[&Field]) {
        for row in Self::group_into_rows(subset) {
            let cells: Vec<String> = row
                .fields
                .iter()
                .map(|field| field.display_label())
                .collect();
            let _ = write!(out, "  | {}", cells.join(" | "));
            if row.is_lone_single() {
                out.push_str(" | +");
            }
            out.push('\n');
        }
    }
}
