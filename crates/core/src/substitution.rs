//! Positional argument substitution for alias command templates.
//!
//! Templates may reference the arguments an alias was invoked with:
//!
//! - `$1` to `$9` are replaced by the Nth space-separated argument, or by
//!   nothing when fewer arguments were given
//! - `$*` is replaced by the whole argument string, verbatim
//! - `\$` produces a literal `$`
//!
//! Any other `$` is copied as is, so `$10` is `$1` followed by `0`.

use log::debug;

use crate::error::Result;

/// Result of expanding one template fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub text: String,
    /// Number of `$1`..`$9` and `$*` placeholders found in the template.
    pub placeholders: usize,
}

impl Substitution {
    pub fn matched(&self) -> bool {
        self.placeholders > 0
    }
}

/// Splits the raw argument string into tokens. Runs of spaces never produce
/// empty tokens and quotes have no special meaning.
pub fn split_arguments(arguments: &str) -> Vec<&str> {
    arguments.split(' ').filter(|token| !token.is_empty()).collect()
}

fn push_str(buffer: &mut String, text: &str) -> Result<()> {
    buffer.try_reserve(text.len())?;
    buffer.push_str(text);
    Ok(())
}

/// Expands the placeholders of `template` without forwarding unused arguments.
///
/// # Errors
///
/// Returns [`crate::error::Error::ResourceExhaustion`] if the expanded string
/// cannot be allocated.
pub fn substitute(template: &str, arguments: Option<&str>) -> Result<Substitution> {
    let arguments = arguments.unwrap_or("");
    let tokens = split_arguments(arguments);

    // Template characters never expand, so this covers everything but arguments
    let mut text = String::new();
    text.try_reserve(template.len())?;
    let mut placeholders = 0;

    let mut chars = template.chars().peekable();
    while let Some(current) = chars.next() {
        match (current, chars.peek().copied()) {
            ('\\', Some('$')) => {
                chars.next();
                text.push('$');
            }
            ('$', Some('*')) => {
                chars.next();
                placeholders += 1;
                push_str(&mut text, arguments)?;
            }
            ('$', Some(digit @ '1'..='9')) => {
                chars.next();
                placeholders += 1;
                let index = digit as usize - '1' as usize;
                if let Some(token) = tokens.get(index) {
                    push_str(&mut text, token)?;
                }
            }
            _ => text.push(current),
        }
    }

    Ok(Substitution { text, placeholders })
}

/// Expands `template` with `arguments`, appending the arguments to the result
/// when the template has no placeholder of its own.
///
/// # Errors
///
/// Returns [`crate::error::Error::ResourceExhaustion`] if the expanded string
/// cannot be allocated.
///
/// # Examples
///
/// ```
/// use rust_alias_core::substitution::replace_arguments;
///
/// let expanded = replace_arguments("msg $1 hello $2", Some("bob alice"))?;
/// assert_eq!(expanded.text, "msg bob hello alice");
///
/// let expanded = replace_arguments("join", Some("#rust"))?;
/// assert_eq!(expanded.text, "join #rust");
/// # Ok::<(), rust_alias_core::error::Error>(())
/// ```
pub fn replace_arguments(template: &str, arguments: Option<&str>) -> Result<Substitution> {
    let mut substitution = substitute(template, arguments)?;

    if let Some(arguments) = arguments.filter(|arguments| !arguments.is_empty()) {
        if !substitution.matched() {
            append_arguments(&mut substitution.text, arguments)?;
        }
    }

    debug!(
        "Expanded `{}` with {:?} into `{}`",
        template, arguments, substitution.text
    );

    Ok(substitution)
}

/// Appends a space and `arguments` to `command`.
pub(crate) fn append_arguments(command: &mut String, arguments: &str) -> Result<()> {
    command.try_reserve(arguments.len() + 1)?;
    command.push(' ');
    command.push_str(arguments);
    Ok(())
}
