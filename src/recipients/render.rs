//! Rendering of the To/Cc header block.

use super::builder::RecipientSet;

const CONTINUATION_INDENT: &str = "    ";

/// Render `set` as folded `To:` and `Cc:` header lines.
///
/// ```text
/// To: Jane <jane@example.org>,
///     Bob <bob@example.org>
/// Cc: linux-foo@vger.kernel.org
/// ```
///
/// When To is empty the Cc entries are emitted under the `To:` label. The
/// block always ends with a newline.
pub fn render_recipients(set: &RecipientSet) -> String {
    let mut block = String::new();

    if !set.to.is_empty() {
        push_field(&mut block, "To", &set.to);
    }
    if !set.cc.is_empty() {
        if !block.is_empty() {
            block.push('\n');
        }
        let label = if set.to.is_empty() { "To" } else { "Cc" };
        push_field(&mut block, label, &set.cc);
    }
    block.push('\n');

    block
}

fn push_field(block: &mut String, label: &str, values: &[String]) {
    let mut values = values.iter().map(|v| v.trim());
    if let Some(first) = values.next() {
        block.push_str(&format!("{}: {}", label, first));
    }
    for value in values {
        block.push_str(&format!(",\n{}{}", CONTINUATION_INDENT, value));
    }
}

/// Reduce `Name <address>` entries of a rendered block to bare addresses.
///
/// Lines up to the first `Cc:` line are rewritten; the `Cc:` line and
/// everything after it are kept as they are.
pub fn strip_display_names(rendered: &str) -> String {
    let mut lines: Vec<String> = rendered.split('\n').map(str::to_string).collect();

    for line in lines.iter_mut() {
        if line.contains("To:") {
            *line = bare_address_line(line, "To: ");
        } else if line.contains("Cc:") {
            break;
        } else {
            *line = bare_address_line(line, CONTINUATION_INDENT);
        }
    }

    lines.join("\n")
}

/// Replace the leading `... <address>` of `line` with `prefix` + `address`,
/// keeping any trailing commas and text. Lines without an address are
/// returned unchanged.
fn bare_address_line(line: &str, prefix: &str) -> String {
    let Some(open) = line.find('<') else {
        return line.to_string();
    };
    let Some(close) = line.rfind('>').filter(|&close| close > open) else {
        return line.to_string();
    };

    format!("{}{}{}", prefix, &line[open + 1..close], &line[close + 1..])
}
