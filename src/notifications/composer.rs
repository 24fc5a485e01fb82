//! Message composition
//!
//! Pure functions turning workflow information into the sentences shown to
//! content authors. Labels are either single-quoted (plain mode) or wrapped
//! in bold HTML spans (emphasized mode, HTML-escaped).

/// Sentence appended when the user cannot act on the datasource
pub const NO_ACCESS_CLAUSE: &str =
    "You cannot change the workflow because you do not have write access to this item.";

/// How labels are highlighted in composed text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextMode {
    #[default]
    Plain,
    Emphasized,
}

impl TextMode {
    pub fn from_html_flag(use_html: bool) -> Self {
        if use_html {
            TextMode::Emphasized
        } else {
            TextMode::Plain
        }
    }

    fn label(self, value: &str) -> String {
        match self {
            TextMode::Plain => format!("'{value}'"),
            TextMode::Emphasized => {
                format!("<span style=\"font-weight:bold;\">{}</span>", escape_html(value))
            }
        }
    }
}

/// "The item {item} is in the {state} state of the {workflow} workflow."
/// followed by the no-access clause when the user lacks write access.
pub fn compose_single(
    item_label: &str,
    state_label: &str,
    workflow_label: &str,
    has_write_access: bool,
    mode: TextMode,
) -> String {
    let mut text = format!(
        "The item {} is in the {} state of the {} workflow.",
        mode.label(item_label),
        mode.label(state_label),
        mode.label(workflow_label)
    );
    if !has_write_access {
        text.push(' ');
        text.push_str(NO_ACCESS_CLAUSE);
    }
    text
}

/// Join values for prose: "A", "A and B", "A, B, and C".
pub fn compose_list<S: AsRef<str>>(values: &[S]) -> String {
    match values {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{}, and {}", head.join(", "), last.as_ref())
        }
    }
}

/// Save gate message listing datasource paths that are not final yet
pub fn compose_save_gate<S: AsRef<str>>(paths: &[S]) -> String {
    match paths.len() {
        0 => String::new(),
        1 => format!(
            "The datasource item {} is not in a final workflow state.",
            compose_list(paths)
        ),
        _ => format!(
            "The datasource items {} are not in a final workflow state.",
            compose_list(paths)
        ),
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
