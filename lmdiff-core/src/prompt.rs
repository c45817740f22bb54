use crate::models::ReviewRequest;
use std::fmt::Write;

pub const DEFAULT_INSTRUCTIONS: &str = "Please analyze the git diff changes. Review the best practices of all files, including new files. Please use KISS+YAGNI+DRY+SOLID principles. Assess the new changes against existing files, suggest improvements, and ask clarifying questions if needed. Complete your review by providing a summary of the changes in paragraph form followed by a bulleted list of suggested changes.";

/// Renders the review request as a single `<prompt>` document.
///
/// File contents and the diff are wrapped in CDATA sections; `instructions`
/// replaces [`DEFAULT_INSTRUCTIONS`] when given.
pub fn render(request: &ReviewRequest, instructions: Option<&str>) -> String {
    let mut out = String::new();
    let changes = &request.changes;

    out.push_str("<prompt>\n");
    let _ = writeln!(
        out,
        "  <description>{}</description>",
        escape_text(instructions.unwrap_or(DEFAULT_INSTRUCTIONS))
    );

    out.push_str("  <changedFiles>\n");
    for name in &changes.change_set {
        if name.trim().is_empty() {
            continue;
        }
        let _ = writeln!(out, "    <file name=\"{}\"/>", escape_attr(name));
    }
    out.push_str("  </changedFiles>\n");

    out.push_str("  <files>\n");
    for (name, content) in &changes.contents {
        let _ = writeln!(out, "    <file name=\"{}\">", escape_attr(name));
        push_cdata(&mut out, content, "      ");
        out.push_str("    </file>\n");
    }
    out.push_str("  </files>\n");

    out.push_str("  <gitDiff>\n");
    push_cdata(&mut out, &request.diff, "    ");
    out.push_str("  </gitDiff>\n");
    out.push_str("</prompt>\n");

    out
}

fn push_cdata(out: &mut String, body: &str, indent: &str) {
    out.push_str(indent);
    out.push_str("<![CDATA[\n");
    // "]]>" would end the section early, so split it across two sections.
    out.push_str(&body.replace("]]>", "]]]]><![CDATA[>"));
    if !body.is_empty() && !body.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(indent);
    out.push_str("]]>\n");
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
