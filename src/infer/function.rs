//! Function name inference from diff hunk headers.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::Serialize;

/// A line that opens a hunk.
static HUNK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@@[^@]*@@").expect("valid hunk header pattern"));

/// A `@@ -a,b +c,d @@` range marker anywhere on the line.
static HUNK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@@[^@]*@@").expect("valid hunk marker pattern"));

/// Distinct function names rendered as `name()`, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FunctionNameList(Vec<String>);

impl FunctionNameList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name()` unless it is already present. Returns whether it was added.
    pub fn push(&mut self, name: &str) -> bool {
        let rendered = format!("{}()", name);
        if self.0.contains(&rendered) {
            return false;
        }
        self.0.push(rendered);
        true
    }

    /// The only function, when exactly one was found.
    pub fn single(&self) -> Option<&str> {
        match self.0.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Function name from the context part of a hunk header line.
///
/// `None` for lines that are not hunk headers, headers without context,
/// and goto labels.
pub fn hunk_function(line: &str) -> Option<String> {
    if !HUNK_HEADER.is_match(line) {
        return None;
    }

    let context = HUNK_MARKER.replace_all(line, "");
    let context = context.split('(').next().unwrap_or("").trim();

    let token = context.split_whitespace().last()?;
    if token.ends_with(':') {
        return None;
    }
    Some(token.to_string())
}

/// Collect the functions touched by `diff`, one entry per distinct name.
pub fn guess_function_names(diff: Option<&str>) -> FunctionNameList {
    let mut names = FunctionNameList::new();
    let Some(diff) = diff else {
        return names;
    };

    for line in diff.lines() {
        if let Some(name) = hunk_function(line) {
            names.push(&name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_FUNCTION_DIFF: &str = "\
diff --git a/drivers/net/tun.c b/drivers/net/tun.c
--- a/drivers/net/tun.c
+++ b/drivers/net/tun.c
@@ -10,7 +10,7 @@ static int tun_open(struct inode *inode, struct file *file)
-\tint err;
+\tint err = 0;
@@ -80,6 +80,7 @@ static void tun_close(struct tun_struct *tun)
+\tkfree(tun);
@@ -120,6 +121,7 @@ static int tun_open(struct inode *inode, struct file *file)
+\treturn 0;
";

    #[test]
    fn test_hunk_function_basic() {
        assert_eq!(hunk_function("@@ -1,2 +1,2 @@ static int foo(int x)"), Some("foo".to_string()));
    }

    #[test]
    fn test_hunk_function_label_skipped() {
        assert_eq!(hunk_function("@@ -40,6 +40,8 @@ out_free:"), None);
    }

    #[test]
    fn test_hunk_function_without_context() {
        assert_eq!(hunk_function("@@ -1 +1 @@"), None);
        assert_eq!(hunk_function("@@ -1 +1 @@   "), None);
    }

    #[test]
    fn test_hunk_function_not_a_header() {
        assert_eq!(hunk_function("+static int foo(void)"), None);
        assert_eq!(hunk_function(" @@ -1 +1 @@ foo(void)"), None);
    }

    #[test]
    fn test_hunk_function_tab_separated() {
        assert_eq!(hunk_function("@@ -5,3 +5,4 @@ static int\tbar(void)"), Some("bar".to_string()));
    }

    #[test]
    fn test_hunk_function_struct_context() {
        assert_eq!(hunk_function("@@ -5,3 +5,4 @@ struct tun_file {"), Some("{".to_string()));
    }

    #[test]
    fn test_guess_dedups_in_order() {
        let names = guess_function_names(Some(TWO_FUNCTION_DIFF));
        assert_eq!(names.as_slice(), ["tun_open()", "tun_close()"]);
        assert_eq!(names.single(), None);
    }

    #[test]
    fn test_guess_single() {
        let names = guess_function_names(Some("@@ -1,2 +1,2 @@ static int foo(int x)\n-a\n+b\n"));
        assert_eq!(names.single(), Some("foo()"));
    }

    #[test]
    fn test_guess_absent_diff() {
        assert!(guess_function_names(None).is_empty());
    }

    #[test]
    fn test_push_is_case_sensitive() {
        let mut names = FunctionNameList::new();
        assert!(names.push("Foo"));
        assert!(names.push("foo"));
        assert!(!names.push("foo"));
        assert_eq!(names.len(), 2);
    }
}
