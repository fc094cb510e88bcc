use std::fmt;
use std::str::FromStr;

/// Generates the [`Severity`] enum together with its constant presentation triple
/// (display name, code block language, message prefix).
macro_rules! define_severity {
    ($($name: ident => ($display: literal, $code_block: literal, $prefix: literal)), *) => {

        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Severity {
            $( $name ,)*
        }

        impl Severity {
            pub const ALL: &'static [Severity] = &[$(Severity::$name ,)*];

            pub fn display_name(&self) -> &'static str {
                match self {
                    $(Severity::$name => $display ,)*
                }
            }

            /// Discord colors a code block by its language tag.
            ///
            /// * `fix` renders blue
            /// * `bash` renders yellow/orange
            /// * `diff` renders green or red depending on the line prefix
            pub fn code_block(&self) -> &'static str {
                match self {
                    $(Severity::$name => $code_block ,)*
                }
            }

            /// Prepended to the message body, `- ` turns a `diff` block red.
            pub fn message_prefix(&self) -> &'static str {
                match self {
                    $(Severity::$name => $prefix ,)*
                }
            }
        }
    };
}

define_severity!(
    Info => ("INFORMATION", "fix", ""),
    Warn => ("WARNING", "bash", ""),
    Error => ("ERROR", "diff", "- ")
);

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INFO" | "INFORMATION" => Ok(Severity::Info),
            "WARN" | "WARNING" => Ok(Severity::Warn),
            "ERROR" => Ok(Severity::Error),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

impl Severity {
    /// Maps a `log` level onto a severity, debug and trace have no Discord counterpart.
    pub fn from_level(level: log::Level) -> Option<Self> {
        match level {
            log::Level::Error => Some(Severity::Error),
            log::Level::Warn => Some(Severity::Warn),
            log::Level::Info => Some(Severity::Info),
            log::Level::Debug | log::Level::Trace => None,
        }
    }
}
