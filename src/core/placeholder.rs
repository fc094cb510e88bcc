use std::fmt::{Display, Write};

pub const ARGUMENT_PLACEHOLDER: &str = "{}";

/// Fills the `{}` placeholders of `message` left to right with `args`.
///
/// Surplus arguments are dropped and surplus placeholders stay in the output untouched, a log call
/// with the wrong argument count should still produce a message rather than fail.
pub fn substitute(message: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(message.len());
    let mut rest = message;
    let mut args = args.iter();

    while let Some(pos) = rest.find(ARGUMENT_PLACEHOLDER) {
        let arg = match args.next() {
            Some(arg) => arg,
            None => break,
        };
        out.push_str(&rest[..pos]);
        // writing into a String can't fail
        let _ = write!(out, "{}", arg);
        rest = &rest[pos + ARGUMENT_PLACEHOLDER.len()..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_in_order() {
        assert_eq!(substitute("Test {} {}", &[&"information", &"message"]), "Test information message");
        assert_eq!(substitute("{}{}{}", &[&1, &2, &3]), "123");
    }

    #[test]
    fn no_placeholders_no_args() {
        assert_eq!(substitute("plain", &[]), "plain");
        assert_eq!(substitute("", &[&"x"]), "");
    }

    #[test]
    fn missing_args_leave_placeholders() {
        assert_eq!(substitute("a {} b {}", &[&"x"]), "a x b {}");
        assert_eq!(substitute("a {} b {}", &[]), "a {} b {}");
    }

    #[test]
    fn extra_args_are_ignored() {
        assert_eq!(substitute("a {}", &[&"x", &"y"]), "a x");
    }

    #[test]
    fn arguments_are_not_rescanned() {
        assert_eq!(substitute("{} and {}", &[&"{}", &"y"]), "{} and y");
    }

    #[test]
    fn unicode_around_placeholders() {
        assert_eq!(substitute("ℹ️ {} ✅", &[&"ok"]), "ℹ️ ok ✅");
    }
}
