//! Fixed-layout renderings of a descriptor.
//!
//! Both views list every field in declaration order with a padded label
//! column. Unset optional values render as `N/A`.

use std::fmt::{self, Write};

use super::model::ApplicationDescriptor;

const NOT_AVAILABLE: &str = "N/A";
const NESTED_INDENT: &str = "                      ";
const MARKUP_INDENT: &str = "    ";
const NESTED_LABEL_WIDTH: usize = 15;

impl ApplicationDescriptor {
    /// Multi-line plain-text rendering, as printed by `--detail`.
    pub fn as_plain_text(&self) -> String {
        let mut out = String::from("\n");
        for (label, value) in self.labelled_fields() {
            let _ = writeln!(out, "{label:<20}: {value}");
        }

        out.push_str("Documents           : ");
        if self.documents().is_empty() {
            out.push_str(NOT_AVAILABLE);
            out.push('\n');
        } else {
            out.push('\n');
            for doc in self.documents() {
                let _ = writeln!(
                    out,
                    "{NESTED_INDENT}{:<width$} : {}",
                    doc.title,
                    doc.url,
                    width = NESTED_LABEL_WIDTH
                );
            }
        }

        out.push_str("Developers          : ");
        if self.developers().is_empty() {
            out.push_str(NOT_AVAILABLE);
            out.push('\n');
        } else {
            out.push('\n');
            for dev in self.developers() {
                for (label, value) in dev.fields() {
                    let _ = writeln!(
                        out,
                        "{NESTED_INDENT}{label:<width$} : {value}",
                        width = NESTED_LABEL_WIDTH
                    );
                }
                out.push('\n');
            }
        }
        out
    }

    /// HTML-flavoured rendering for rich text widgets.
    pub fn as_markup(&self) -> String {
        let mut out = String::new();
        for (label, value) in self.labelled_fields() {
            if label == "Icon File Name" {
                continue;
            }
            let _ = write!(
                out,
                "<b>{label:<21}:</b> {}<br><br>",
                escape_markup(&value)
            );
        }

        out.push_str("<b>Documents            :</b> <br>");
        if self.documents().is_empty() {
            let _ = write!(out, "{NOT_AVAILABLE}<br>");
        } else {
            out.push_str("<br>");
            for doc in self.documents() {
                let _ = write!(
                    out,
                    "{MARKUP_INDENT}<b>{} :</b> {}<br>",
                    escape_markup(&doc.title),
                    escape_markup(&doc.url)
                );
            }
        }
        out.push_str("<br>");

        out.push_str("<b>Developers           :</b> <br>");
        if self.developers().is_empty() {
            let _ = write!(out, "{NOT_AVAILABLE}<br>");
        } else {
            for dev in self.developers() {
                out.push_str("<br>");
                for (label, value) in dev.fields() {
                    let _ = write!(
                        out,
                        "{MARKUP_INDENT}<b>{label} :</b> {}<br>",
                        escape_markup(value)
                    );
                }
            }
        }
        out.push_str("<br>");
        out
    }

    fn labelled_fields(&self) -> Vec<(&'static str, String)> {
        let package_path = self
            .package()
            .map(|package| package.path.display().to_string());
        vec![
            ("Name", self.name().to_string()),
            ("Version", self.version_string().to_string()),
            ("Description", self.description().to_string()),
            ("Icon File Name", or_na(self.icon_file_name())),
            ("Parent Applications", self.parent_applications_as_string()),
            ("Keywords", self.keywords_as_string()),
            ("GUI", python_bool(self.is_gui()).to_string()),
            ("Python Command", or_na(self.python_command())),
            ("Command", or_na(self.command())),
            ("Menu Path", or_na(self.menu_path())),
            ("Full Menu Path", self.full_menu_path().to_string()),
            ("Package Path", or_na(package_path.as_deref())),
        ]
    }
}

impl fmt::Display for ApplicationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_plain_text())
    }
}

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

fn python_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn escape_markup(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}
